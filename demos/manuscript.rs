use pageflow::pdf::{write_pdf, DocumentInfo};
use pageflow::{Figure, HelveticaMetrics, Manuscript, PageGeometry, PaginationEngine};

fn main() {
    // a small placeholder figure so the demo has no file dependencies
    let mut figure_bytes = Vec::new();
    let image = image::RgbImage::from_fn(320, 200, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    image::DynamicImage::ImageRgb8(image)
        .write_to(
            &mut std::io::Cursor::new(&mut figure_bytes),
            image::ImageOutputFormat::Png,
        )
        .expect("can encode demo figure");

    let manuscript = Manuscript {
        title: Some("On the Pagination of Manuscripts".to_string()),
        abstract_text: lipsum::lipsum(90),
        body: (0..10).map(|_| lipsum::lipsum(130)).collect(),
        figures: vec![Figure::new(
            figure_bytes,
            "image/png",
            "Figure 1.1: a gradient",
        )],
    };
    let document = manuscript.into_document();
    let geometry = PageGeometry::letter();

    let engine = PaginationEngine::new(HelveticaMetrics::new());
    let layout = engine
        .paginate(&document, &geometry)
        .expect("can paginate demo manuscript");
    println!(
        "paginated \"{}\" onto {} page(s)",
        document.title(),
        layout.page_count()
    );

    let mut info = DocumentInfo::new();
    info.title(document.title());
    let pdf_bytes = write_pdf(&layout, &geometry, &info).expect("can serialize PDF");
    std::fs::write("manuscript.pdf", pdf_bytes).expect("can write manuscript.pdf");

    let html = pageflow::html::render_html(&document);
    std::fs::write("manuscript.html", html).expect("can write manuscript.html");
}
