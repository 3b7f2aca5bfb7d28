use crate::cursor::PageCursor;
use crate::document::{ContentBlock, Figure, ParagraphKind};
use crate::error::LayoutError;
use crate::geometry::PageGeometry;
use crate::instruction::DrawInstruction;
use crate::measure::{FontStyle, TextMeasurer};
use crate::units::Pt;
use crate::wrap::wrap;

/// Font, size, leading, and trailing gap for one class of text block
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font: FontStyle,
    pub size: Pt,
    pub leading: Pt,
    pub trailing_gap: Pt,
}

/// The manuscript policy table: which style each class of text renders with
pub mod styles {
    use super::TextStyle;
    use crate::measure::FontStyle;
    use crate::units::Pt;

    pub const TITLE: TextStyle = TextStyle {
        font: FontStyle::Bold,
        size: Pt(18.0),
        leading: Pt(22.0),
        trailing_gap: Pt(10.0),
    };

    pub const SECTION_HEADING: TextStyle = TextStyle {
        font: FontStyle::Bold,
        size: Pt(12.0),
        leading: Pt(16.0),
        trailing_gap: Pt(0.0),
    };

    pub const ABSTRACT: TextStyle = TextStyle {
        font: FontStyle::Regular,
        size: Pt(11.0),
        leading: Pt(15.0),
        trailing_gap: Pt(12.0),
    };

    pub const BODY: TextStyle = TextStyle {
        font: FontStyle::Regular,
        size: Pt(11.0),
        leading: Pt(15.0),
        trailing_gap: Pt(8.0),
    };

    pub const CAPTION: TextStyle = TextStyle {
        font: FontStyle::Oblique,
        size: Pt(9.0),
        leading: Pt(12.0),
        trailing_gap: Pt(10.0),
    };

    /// Vertical space between a figure's image and its caption
    pub const IMAGE_GAP: Pt = Pt(8.0);
}

fn heading_style(level: u8) -> TextStyle {
    if level <= 1 {
        styles::TITLE
    } else {
        styles::SECTION_HEADING
    }
}

fn paragraph_style(kind: ParagraphKind) -> TextStyle {
    match kind {
        ParagraphKind::Abstract => styles::ABSTRACT,
        ParagraphKind::Body => styles::BODY,
        ParagraphKind::Caption => styles::CAPTION,
    }
}

/// Renders one content block onto the current page, mutating the cursor and
/// appending draw instructions, breaking pages mid-block as needed
pub struct BlockRenderer<'a, M: TextMeasurer> {
    measurer: &'a M,
    geometry: &'a PageGeometry,
}

impl<'a, M: TextMeasurer> BlockRenderer<'a, M> {
    pub fn new(measurer: &'a M, geometry: &'a PageGeometry) -> BlockRenderer<'a, M> {
        BlockRenderer { measurer, geometry }
    }

    pub fn render(
        &self,
        block: &ContentBlock,
        cursor: &mut PageCursor,
        out: &mut Vec<DrawInstruction>,
    ) -> Result<(), LayoutError> {
        match block {
            ContentBlock::Heading { text, level } => {
                self.render_text(text, heading_style(*level), cursor, out)
            }
            ContentBlock::Paragraph { text, kind } => {
                self.render_text(text, paragraph_style(*kind), cursor, out)
            }
            ContentBlock::Figure(figure) => self.render_figure(figure, cursor, out),
        }
    }

    /// Wrap `text` to the content width and emit one `Text` instruction per
    /// line at the left margin, breaking to fresh pages between lines
    fn render_text(
        &self,
        text: &str,
        style: TextStyle,
        cursor: &mut PageCursor,
        out: &mut Vec<DrawInstruction>,
    ) -> Result<(), LayoutError> {
        let lines = wrap(
            self.measurer,
            text,
            self.geometry.content_width(),
            style.font,
            style.size,
        )?;

        for line in lines {
            let (y, broke) = cursor.advance(style.leading);
            if broke {
                out.push(DrawInstruction::PageBreak);
            }
            out.push(DrawInstruction::Text {
                content: line,
                x: self.geometry.margin,
                y,
                font: style.font,
                size: style.size,
            });
        }
        cursor.gap(style.trailing_gap);

        Ok(())
    }

    /// Scale the image to fit the content width and the figure height cap,
    /// draw it, then render the caption through the paragraph path
    fn render_figure(
        &self,
        figure: &Figure,
        cursor: &mut PageCursor,
        out: &mut Vec<DrawInstruction>,
    ) -> Result<(), LayoutError> {
        let (pixel_width, pixel_height) =
            figure
                .dimensions()
                .ok_or_else(|| LayoutError::ImageDimensionUnavailable {
                    caption: figure.caption.clone(),
                })?;

        let scale = (self.geometry.content_width() / Pt(pixel_width as f32))
            .min(self.geometry.max_image_height() / Pt(pixel_height as f32))
            .min(1.0);
        let draw_width = Pt(pixel_width as f32 * scale);
        let draw_height = Pt(pixel_height as f32 * scale);
        log::trace!(
            "figure \"{}\": {}x{} px, scale {:.4}",
            figure.caption,
            pixel_width,
            pixel_height,
            scale
        );

        // a figure squeezed into less than two margins of room would strand
        // the image at the page bottom with its caption pushed to the next
        // page, so demand that much room even when the image itself fits
        let required = draw_height.max(self.geometry.margin * 2.0);
        if cursor.ensure_room(required) {
            out.push(DrawInstruction::PageBreak);
        }

        out.push(DrawInstruction::Image {
            bytes: figure.bytes.clone(),
            x: self.geometry.margin,
            y: cursor.y() - draw_height,
            width: draw_width,
            height: draw_height,
        });
        cursor.place(draw_height);
        cursor.gap(styles::IMAGE_GAP);

        self.render_text(&figure.caption, styles::CAPTION, cursor, out)
    }
}
