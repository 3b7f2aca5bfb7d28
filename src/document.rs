use std::io::Cursor;

/// Title used when a manuscript arrives without one
pub const UNTITLED: &str = "Untitled Manuscript";

/// Distinguishes which paragraph policy styles a [ContentBlock::Paragraph]
/// renders with. All paragraphs flow through the same wrap-and-draw path;
/// the kind only selects font, size, leading, and trailing gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParagraphKind {
    Abstract,
    Body,
    Caption,
}

/// One captioned image. The bytes are opaque to the layout engine: only the
/// pixel dimensions are needed, either declared by the caller or probed from
/// the byte stream's header. The pixel content is decoded only by the PDF
/// serializer when the image is embedded.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub bytes: Vec<u8>,
    pub mime_type: String,
    pub caption: String,
    declared_dimensions: Option<(u32, u32)>,
}

impl Figure {
    pub fn new<S: ToString, T: ToString>(bytes: Vec<u8>, mime_type: S, caption: T) -> Figure {
        Figure {
            bytes,
            mime_type: mime_type.to_string(),
            caption: caption.to_string(),
            declared_dimensions: None,
        }
    }

    /// Declare the pixel dimensions up front, skipping the header probe
    pub fn with_dimensions(mut self, width: u32, height: u32) -> Figure {
        self.declared_dimensions = Some((width, height));
        self
    }

    /// The figure's pixel dimensions: declared ones if present, otherwise
    /// read from the image header without decoding pixel data. [None] when
    /// neither source yields usable dimensions, which fails the pagination
    /// run rather than guessing a placeholder size.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        if let Some(dimensions) = self.declared_dimensions {
            return Some(dimensions);
        }
        image::io::Reader::new(Cursor::new(&self.bytes))
            .with_guessed_format()
            .ok()?
            .into_dimensions()
            .ok()
    }
}

/// One semantic unit of manuscript content. Blocks are immutable once built
/// and their order within a [Document] is fixed at construction.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentBlock {
    Heading { text: String, level: u8 },
    Paragraph { text: String, kind: ParagraphKind },
    Figure(Figure),
}

/// The raw pieces of a manuscript as handed over by the content-extraction
/// collaborators: a title, an abstract, ordered body paragraphs, and a
/// figure deck. Convert to a [Document] to fix the emission order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Manuscript {
    pub title: Option<String>,
    pub abstract_text: String,
    pub body: Vec<String>,
    pub figures: Vec<Figure>,
}

impl Manuscript {
    /// Build the ordered, immutable block sequence the engine paginates:
    ///
    /// 1. the title as a level-1 heading ([UNTITLED] when absent or blank),
    /// 2. an "Abstract" section heading, always, followed by the abstract
    ///    paragraph (an empty abstract still contributes one blank line),
    /// 3. each body paragraph in manuscript order,
    /// 4. if any figures exist, a "Figures" section heading followed by each
    ///    figure in deck order. Without figures the heading is omitted
    ///    entirely.
    pub fn into_document(self) -> Document {
        let title = match self.title {
            Some(title) if !title.trim().is_empty() => title,
            _ => UNTITLED.to_string(),
        };

        let mut blocks = Vec::with_capacity(3 + self.body.len() + self.figures.len() + 1);
        blocks.push(ContentBlock::Heading {
            text: title.clone(),
            level: 1,
        });
        blocks.push(ContentBlock::Heading {
            text: "Abstract".to_string(),
            level: 2,
        });
        blocks.push(ContentBlock::Paragraph {
            text: self.abstract_text,
            kind: ParagraphKind::Abstract,
        });
        for paragraph in self.body {
            blocks.push(ContentBlock::Paragraph {
                text: paragraph,
                kind: ParagraphKind::Body,
            });
        }
        if !self.figures.is_empty() {
            blocks.push(ContentBlock::Heading {
                text: "Figures".to_string(),
                level: 2,
            });
            for figure in self.figures {
                blocks.push(ContentBlock::Figure(figure));
            }
        }

        Document { title, blocks }
    }
}

/// An ordered sequence of content blocks plus the manuscript title, owned
/// exclusively. This is the input contract of the pagination engine and of
/// both output serializers.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    title: String,
    blocks: Vec<ContentBlock>,
}

impl Document {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn blocks(&self) -> &[ContentBlock] {
        &self.blocks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn figure() -> Figure {
        Figure::new(vec![0u8; 4], "image/png", "Figure 1.1").with_dimensions(640, 480)
    }

    #[test]
    fn block_order_is_fixed() {
        let document = Manuscript {
            title: Some("A Title".into()),
            abstract_text: "An abstract.".into(),
            body: vec!["First.".into(), "Second.".into()],
            figures: vec![figure()],
        }
        .into_document();

        let blocks = document.blocks();
        assert_eq!(blocks.len(), 7);
        assert!(matches!(&blocks[0], ContentBlock::Heading { text, level: 1 } if text == "A Title"));
        assert!(matches!(&blocks[1], ContentBlock::Heading { text, level: 2 } if text == "Abstract"));
        assert!(matches!(
            &blocks[2],
            ContentBlock::Paragraph { kind: ParagraphKind::Abstract, .. }
        ));
        assert!(matches!(&blocks[5], ContentBlock::Heading { text, level: 2 } if text == "Figures"));
        assert!(matches!(&blocks[6], ContentBlock::Figure(_)));
    }

    #[test]
    fn missing_title_gets_the_default() {
        let document = Manuscript::default().into_document();
        assert_eq!(document.title(), UNTITLED);

        let document = Manuscript {
            title: Some("   ".into()),
            ..Manuscript::default()
        }
        .into_document();
        assert_eq!(document.title(), UNTITLED);
    }

    #[test]
    fn figures_heading_is_omitted_without_figures() {
        let document = Manuscript::default().into_document();
        assert!(!document.blocks().iter().any(
            |block| matches!(block, ContentBlock::Heading { text, .. } if text == "Figures")
        ));
    }

    #[test]
    fn abstract_paragraph_survives_when_empty() {
        let document = Manuscript::default().into_document();
        assert!(matches!(
            &document.blocks()[2],
            ContentBlock::Paragraph { text, kind: ParagraphKind::Abstract } if text.is_empty()
        ));
    }

    #[test]
    fn declared_dimensions_win_over_probing() {
        assert_eq!(figure().dimensions(), Some((640, 480)));
    }

    #[test]
    fn undecodable_bytes_have_no_dimensions() {
        let figure = Figure::new(vec![0u8; 4], "image/png", "mystery");
        assert_eq!(figure.dimensions(), None);
    }

    #[test]
    fn dimensions_are_probed_from_headers() {
        let mut bytes = Vec::new();
        let image = image::RgbImage::new(12, 7);
        image::DynamicImage::ImageRgb8(image)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageOutputFormat::Png)
            .unwrap();
        let figure = Figure::new(bytes, "image/png", "probed");
        assert_eq!(figure.dimensions(), Some((12, 7)));
    }
}
