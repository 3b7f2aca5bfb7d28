//! Thin PDF serializer for [LayoutResult] draw programs.
//!
//! Turns the engine's instruction sequence into bytes with [pdf_writer],
//! processing instructions in strict emission order. Text draws in the
//! base-14 Helvetica fonts (nothing is embedded, matching the metrics of
//! [crate::HelveticaMetrics]); figure bytes are decoded with [image] and
//! embedded as zlib-compressed RGB XObjects, with an alpha soft mask where
//! the source has one.

use crate::error::LayoutError;
use crate::geometry::PageGeometry;
use crate::instruction::{DrawInstruction, LayoutResult};
use crate::measure::FontStyle;
use crate::refs::{ObjectReferences, RefType};
use image::GenericImageView;
use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use pdf_writer::{Filter, Finish, Name, Pdf, Rect, Ref, TextStr};
use std::io::Write;

/// General document metadata written to the PDF info block
#[derive(Default, Debug, Clone)]
pub struct DocumentInfo {
    /// The title of the document.
    pub title: Option<String>,
    /// The author(s) of the document. No prescribed format.
    pub author: Option<String>,
}

impl DocumentInfo {
    pub fn new() -> DocumentInfo {
        DocumentInfo::default()
    }

    /// Set the title of the info block, modifying `self`
    pub fn title<S: ToString>(&mut self, title: S) -> &mut Self {
        self.title = Some(title.to_string());
        self
    }

    /// Set the author of the info block, modifying `self`
    pub fn author<S: ToString>(&mut self, author: S) -> &mut Self {
        self.author = Some(author.to_string());
        self
    }

    fn write(&self, refs: &mut ObjectReferences, writer: &mut Pdf) {
        let id = refs.gen(RefType::Info);
        let mut info = writer.document_info(id);

        if let Some(title) = &self.title {
            info.title(TextStr(title.as_str()));
        }
        if let Some(author) = &self.author {
            info.author(TextStr(author.as_str()));
        }
        info.creator(TextStr(concat!(
            env!("CARGO_PKG_NAME"),
            " v",
            env!("CARGO_PKG_VERSION")
        )));

        use chrono::prelude::*;
        let now = Local::now();
        let offset = now.offset().fix();
        let offset_hours = offset.local_minus_utc() / (60 * 60);
        let offset_minutes = ((offset.local_minus_utc() - (offset_hours * (60 * 60))) / 60).abs();
        let date = pdf_writer::Date::new(now.year() as u16)
            .month(now.month() as u8)
            .day(now.day() as u8)
            .hour(now.hour() as u8)
            .minute(now.minute() as u8)
            .second(now.second() as u8)
            .utc_offset_hour(offset_hours as i8)
            .utc_offset_minute(offset_minutes as u8);
        info.creation_date(date);
    }
}

/// Serialize a draw program to PDF bytes. The geometry must be the one the
/// program was paginated against, as it supplies the media box of every
/// page.
pub fn write_pdf(
    layout: &LayoutResult,
    geometry: &PageGeometry,
    info: &DocumentInfo,
) -> Result<Vec<u8>, LayoutError> {
    geometry.validate()?;

    let mut refs = ObjectReferences::new();
    let catalog_id = refs.gen(RefType::Catalog);
    let page_tree_id = refs.gen(RefType::PageTree);

    let mut writer = Pdf::new();
    info.write(&mut refs, &mut writer);

    let pages: Vec<&[DrawInstruction]> = layout.pages().collect();
    let page_refs: Vec<Ref> = (0..pages.len())
        .map(|i| refs.gen(RefType::Page(i)))
        .collect();

    writer
        .pages(page_tree_id)
        .count(page_refs.len() as i32)
        .kids(page_refs.iter().copied());

    let font_refs: Vec<Ref> = FontStyle::ALL
        .iter()
        .map(|style| {
            let id = refs.gen(RefType::Font(style.index()));
            writer
                .type1_font(id)
                .base_font(Name(style.base_font_name().as_bytes()));
            id
        })
        .collect();

    // embed every image instruction in emission order, remembering which
    // indices land on which page
    let mut image_refs: Vec<Ref> = Vec::new();
    let mut page_images: Vec<Vec<usize>> = Vec::with_capacity(pages.len());
    for page in &pages {
        let mut indices = Vec::new();
        for instruction in page.iter() {
            if let DrawInstruction::Image { bytes, .. } = instruction {
                let index = image_refs.len();
                let id = write_image_xobject(&mut refs, index, bytes, &mut writer)?;
                image_refs.push(id);
                indices.push(index);
            }
        }
        page_images.push(indices);
    }

    log::debug!(
        "writing PDF: {} page(s), {} embedded image(s)",
        pages.len(),
        image_refs.len()
    );

    for (page_index, instructions) in pages.iter().enumerate() {
        let mut page = writer.page(page_refs[page_index]);
        page.media_box(Rect {
            x1: 0.0,
            y1: 0.0,
            x2: geometry.width.0,
            y2: geometry.height.0,
        });
        page.parent(page_tree_id);

        let mut resources = page.resources();
        let mut resource_fonts = resources.fonts();
        for style in FontStyle::ALL {
            resource_fonts.pair(
                Name(format!("F{}", style.index()).as_bytes()),
                font_refs[style.index()],
            );
        }
        resource_fonts.finish();
        let mut resource_xobjects = resources.x_objects();
        for &index in &page_images[page_index] {
            resource_xobjects.pair(Name(format!("I{index}").as_bytes()), image_refs[index]);
        }
        resource_xobjects.finish();
        resources.finish();

        let content_id = refs.gen(RefType::ContentForPage(page_index));
        page.contents(content_id);
        page.finish();

        let rendered = render_content(instructions, &page_images[page_index])?;
        writer.stream(content_id, rendered.as_slice());
    }

    writer.catalog(catalog_id).pages(page_tree_id);

    Ok(writer.finish())
}

/// Decode one figure's bytes and embed them as an image XObject, returning
/// its reference
fn write_image_xobject(
    refs: &mut ObjectReferences,
    index: usize,
    bytes: &[u8],
    writer: &mut Pdf,
) -> Result<Ref, LayoutError> {
    let decoded = image::load_from_memory(bytes)?;
    let level = CompressionLevel::DefaultLevel as u8;

    let mask = decoded.color().has_alpha().then(|| {
        let alphas: Vec<u8> = decoded.pixels().map(|p| (p.2).0[3]).collect();
        compress_to_vec_zlib(&alphas, level)
    });
    let data = compress_to_vec_zlib(decoded.to_rgb8().as_raw(), level);

    let id = refs.gen(RefType::Image(index));
    let mask_id = mask.as_ref().map(|_| refs.gen(RefType::ImageMask(index)));

    let mut xobject = writer.image_xobject(id, data.as_slice());
    xobject.filter(Filter::FlateDecode);
    xobject.width(decoded.width() as i32);
    xobject.height(decoded.height() as i32);
    xobject.color_space().device_rgb();
    xobject.bits_per_component(8);
    if let Some(mask_id) = mask_id {
        xobject.s_mask(mask_id);
    }
    xobject.finish();

    if let (Some(mask_id), Some(mask)) = (mask_id, mask) {
        let mut s_mask = writer.image_xobject(mask_id, mask.as_slice());
        s_mask.filter(Filter::FlateDecode);
        s_mask.width(decoded.width() as i32);
        s_mask.height(decoded.height() as i32);
        s_mask.color_space().device_gray();
        s_mask.bits_per_component(8);
    }

    Ok(id)
}

/// Render one page's instructions to a content stream
#[allow(clippy::write_with_newline)]
fn render_content(
    instructions: &[DrawInstruction],
    image_indices: &[usize],
) -> Result<Vec<u8>, std::io::Error> {
    let mut content: Vec<u8> = Vec::default();
    let mut images = image_indices.iter();

    for instruction in instructions {
        match instruction {
            DrawInstruction::Text {
                content: text,
                x,
                y,
                font,
                size,
            } => {
                if text.is_empty() {
                    // blank lines occupy vertical space but draw nothing
                    continue;
                }
                write!(&mut content, "q\n")?;
                write!(&mut content, "/F{} {} Tf\n", font.index(), size.0)?;
                write!(&mut content, "BT\n")?;
                write!(&mut content, "{} {} Td\n", x.0, y.0)?;
                write_literal_string(&mut content, text)?;
                write!(&mut content, " Tj\n")?;
                write!(&mut content, "ET\n")?;
                write!(&mut content, "Q\n")?;
            }
            DrawInstruction::Image {
                x,
                y,
                width,
                height,
                ..
            } => {
                // indices were assigned in emission order, so the iterator
                // stays in lockstep with the image instructions
                let index = images.next().copied().unwrap_or_default();
                write!(&mut content, "q\n")?;
                write!(
                    &mut content,
                    "{} 0 0 {} {} {} cm\n",
                    width.0, height.0, x.0, y.0
                )?;
                write!(&mut content, "/I{index} Do\n")?;
                write!(&mut content, "Q\n")?;
            }
            // pages() already split the program on break markers
            DrawInstruction::PageBreak => {}
        }
    }

    Ok(content)
}

/// Write `text` as a PDF literal string. The base-14 fonts cover the
/// Latin-1 range; anything beyond it draws as '?', the same substitution
/// [crate::HelveticaMetrics] measures with.
fn write_literal_string(content: &mut Vec<u8>, text: &str) -> Result<(), std::io::Error> {
    content.push(b'(');
    for ch in text.chars() {
        let byte = match ch as u32 {
            0x20..=0x7E | 0xA0..=0xFF => ch as u32 as u8,
            _ => b'?',
        };
        match byte {
            b'(' | b')' | b'\\' => {
                content.push(b'\\');
                content.push(byte);
            }
            _ => content.push(byte),
        }
    }
    content.push(b')');
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Figure, Manuscript};
    use crate::engine::PaginationEngine;
    use crate::measure::HelveticaMetrics;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let mut bytes = Vec::new();
        let image = image::RgbaImage::new(width, height);
        image::DynamicImage::ImageRgba8(image)
            .write_to(
                &mut std::io::Cursor::new(&mut bytes),
                image::ImageOutputFormat::Png,
            )
            .unwrap();
        bytes
    }

    #[test]
    fn writes_a_parseable_header_and_trailer() {
        let document = Manuscript {
            title: Some("A PDF".into()),
            abstract_text: "Some abstract.".into(),
            body: vec!["A paragraph.".into()],
            ..Manuscript::default()
        }
        .into_document();
        let geometry = PageGeometry::letter();
        let layout = PaginationEngine::new(HelveticaMetrics::new())
            .paginate(&document, &geometry)
            .unwrap();

        let mut info = DocumentInfo::new();
        info.title(document.title());
        let bytes = write_pdf(&layout, &geometry, &info).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
        assert!(bytes.windows(5).any(|w| w == b"%%EOF"));
    }

    #[test]
    fn embeds_figures_with_alpha_masks() {
        let document = Manuscript {
            title: Some("Figures".into()),
            figures: vec![Figure::new(png_bytes(8, 6), "image/png", "Figure 1.1")],
            ..Manuscript::default()
        }
        .into_document();
        let geometry = PageGeometry::letter();
        let layout = PaginationEngine::new(HelveticaMetrics::new())
            .paginate(&document, &geometry)
            .unwrap();

        let bytes = write_pdf(&layout, &geometry, &DocumentInfo::new()).unwrap();
        let haystack = |needle: &[u8]| bytes.windows(needle.len()).any(|w| w == needle);
        assert!(haystack(b"/I0 Do"));
        assert!(haystack(b"/SMask"));
    }

    #[test]
    fn literal_strings_escape_delimiters() {
        let mut out = Vec::new();
        write_literal_string(&mut out, r"a (b) c\d").unwrap();
        assert_eq!(out, br"(a \(b\) c\\d)".to_vec());
    }

    #[test]
    fn non_latin_text_falls_back_to_replacement() {
        let mut out = Vec::new();
        write_literal_string(&mut out, "snow ☃").unwrap();
        assert_eq!(out, b"(snow ?)".to_vec());
    }
}
