use crate::error::LayoutError;
use crate::units::Pt;
use owned_ttf_parser::{AsFaceRef, OwnedFace};
use std::collections::HashMap;

/// The font styles the layout engine draws with. Styles are resolved to
/// concrete metrics by a [TextMeasurer] and to concrete fonts by the output
/// serializers; the engine itself never touches font data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontStyle {
    Regular,
    Bold,
    Oblique,
}

impl FontStyle {
    pub const ALL: [FontStyle; 3] = [FontStyle::Regular, FontStyle::Bold, FontStyle::Oblique];

    /// The base-14 PostScript name for the style
    pub fn base_font_name(self) -> &'static str {
        match self {
            FontStyle::Regular => "Helvetica",
            FontStyle::Bold => "Helvetica-Bold",
            FontStyle::Oblique => "Helvetica-Oblique",
        }
    }

    /// Index of the style within [FontStyle::ALL], used for `/F{n}` resource
    /// names in the PDF serializer
    pub fn index(self) -> usize {
        match self {
            FontStyle::Regular => 0,
            FontStyle::Bold => 1,
            FontStyle::Oblique => 2,
        }
    }
}

/// Measures the rendered width of a string for a font style and size.
///
/// Implementations must be pure: the same text, style, and size always yield
/// the same width, with no locale sensitivity and no interior mutability, so
/// that pagination is deterministic and measurers can be shared between
/// engine instances running in parallel.
pub trait TextMeasurer: Sync {
    fn text_width(&self, text: &str, style: FontStyle, size: Pt) -> Result<Pt, LayoutError>;
}

// Glyph advance widths in 1/1000 em for the printable ASCII range
// (0x20..=0x7E) of the base-14 Helvetica fonts, from the Adobe AFM data.
// Helvetica-Oblique shares the regular widths.
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Built-in metric tables for the Helvetica family.
///
/// These are the AFM advance widths of the base-14 fonts the output PDF
/// refers to, so wrap decisions made against this measurer match what a PDF
/// viewer will render. Codepoints outside the tabulated range measure as the
/// replacement character the serializer substitutes for them.
#[derive(Debug, Default, Clone, Copy)]
pub struct HelveticaMetrics;

impl HelveticaMetrics {
    pub fn new() -> HelveticaMetrics {
        HelveticaMetrics
    }

    fn advance(style: FontStyle, ch: char) -> u16 {
        let table = match style {
            FontStyle::Bold => &HELVETICA_BOLD_WIDTHS,
            FontStyle::Regular | FontStyle::Oblique => &HELVETICA_WIDTHS,
        };
        let index = (ch as usize).wrapping_sub(0x20);
        match table.get(index) {
            Some(&width) => width,
            // unmapped codepoints draw as '?'
            None => table[('?' as usize) - 0x20],
        }
    }
}

impl TextMeasurer for HelveticaMetrics {
    fn text_width(&self, text: &str, style: FontStyle, size: Pt) -> Result<Pt, LayoutError> {
        if size.0 <= 0.0 {
            return Err(LayoutError::MeasurementFailure {
                font: style.base_font_name().to_string(),
                size: size.0,
            });
        }
        let units: u32 = text
            .chars()
            .map(|ch| Self::advance(style, ch) as u32)
            .sum();
        Ok(Pt(units as f32 * size.0 / 1000.0))
    }
}

/// Metrics read from loaded TTF/OTF faces, for callers that lay out against
/// their own embedded fonts instead of the built-in Helvetica tables.
///
/// Each [FontStyle] must be registered before text in that style is
/// measured; measuring an unregistered style fails the run with
/// [LayoutError::MeasurementFailure].
#[derive(Default)]
pub struct FaceMeasurer {
    faces: HashMap<FontStyle, OwnedFace>,
}

impl FaceMeasurer {
    pub fn new() -> FaceMeasurer {
        FaceMeasurer::default()
    }

    /// Parse a font from raw bytes and register it as the face for `style`,
    /// replacing any face previously registered for that style
    pub fn register(&mut self, style: FontStyle, bytes: Vec<u8>) -> Result<(), LayoutError> {
        let face = OwnedFace::from_vec(bytes, 0)?;
        self.faces.insert(style, face);
        Ok(())
    }

    pub fn has(&self, style: FontStyle) -> bool {
        self.faces.contains_key(&style)
    }
}

impl TextMeasurer for FaceMeasurer {
    fn text_width(&self, text: &str, style: FontStyle, size: Pt) -> Result<Pt, LayoutError> {
        let face = self
            .faces
            .get(&style)
            .map(|face| face.as_face_ref())
            .filter(|_| size.0 > 0.0)
            .ok_or_else(|| LayoutError::MeasurementFailure {
                font: style.base_font_name().to_string(),
                size: size.0,
            })?;

        let scaling = size / face.units_per_em() as f32;
        Ok(text
            .chars()
            .filter_map(|ch| face.glyph_index(ch))
            .map(|gid| scaling * face.glyph_hor_advance(gid).unwrap_or_default() as f32)
            .sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn helvetica_widths_match_afm() {
        let m = HelveticaMetrics::new();
        // H=722 e=556 l=222 l=222 o=556 => 2278 units
        let width = m
            .text_width("Hello", FontStyle::Regular, Pt(12.0))
            .unwrap();
        assert!((width.0 - 2278.0 * 12.0 / 1000.0).abs() < 1e-4);
    }

    #[test]
    fn bold_is_wider_than_regular() {
        let m = HelveticaMetrics::new();
        let regular = m
            .text_width("Abstract", FontStyle::Regular, Pt(12.0))
            .unwrap();
        let bold = m.text_width("Abstract", FontStyle::Bold, Pt(12.0)).unwrap();
        assert!(bold > regular);
    }

    #[test]
    fn oblique_shares_regular_widths() {
        let m = HelveticaMetrics::new();
        let regular = m
            .text_width("Figure 1.1", FontStyle::Regular, Pt(9.0))
            .unwrap();
        let oblique = m
            .text_width("Figure 1.1", FontStyle::Oblique, Pt(9.0))
            .unwrap();
        assert_eq!(regular, oblique);
    }

    #[test]
    fn unmapped_codepoints_measure_as_replacement() {
        let m = HelveticaMetrics::new();
        let snowman = m.text_width("☃", FontStyle::Regular, Pt(11.0)).unwrap();
        let question = m.text_width("?", FontStyle::Regular, Pt(11.0)).unwrap();
        assert_eq!(snowman, question);
    }

    #[test]
    fn non_positive_size_is_a_measurement_failure() {
        let m = HelveticaMetrics::new();
        let err = m.text_width("x", FontStyle::Regular, Pt(0.0)).unwrap_err();
        assert!(matches!(err, LayoutError::MeasurementFailure { .. }));
    }

    #[test]
    fn unregistered_face_is_a_measurement_failure() {
        let m = FaceMeasurer::new();
        let err = m.text_width("x", FontStyle::Bold, Pt(11.0)).unwrap_err();
        assert!(matches!(
            err,
            LayoutError::MeasurementFailure { font, .. } if font == "Helvetica-Bold"
        ));
    }

    #[test]
    fn measurement_is_deterministic() {
        let m = HelveticaMetrics::new();
        let a = m
            .text_width("determinism", FontStyle::Regular, Pt(11.0))
            .unwrap();
        let b = m
            .text_width("determinism", FontStyle::Regular, Pt(11.0))
            .unwrap();
        assert_eq!(a, b);
    }
}
