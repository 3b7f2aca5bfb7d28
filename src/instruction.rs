use crate::measure::FontStyle;
use crate::units::Pt;

/// One atomic, ordered directive of the draw program the engine emits.
/// Coordinates follow the page coordinate system: origin at the bottom-left
/// corner, y increasing upward. Text positions give the baseline start;
/// image positions give the bottom-left corner of the drawn rectangle.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawInstruction {
    Text {
        content: String,
        x: Pt,
        y: Pt,
        font: FontStyle,
        size: Pt,
    },
    Image {
        bytes: Vec<u8>,
        x: Pt,
        y: Pt,
        width: Pt,
        height: Pt,
    },
    /// Close the current page and start a fresh one. Never the first
    /// instruction, and never adjacent to another `PageBreak`.
    PageBreak,
}

/// The finished multi-page draw program: draw instructions in strict
/// emission order, grouped into pages by `PageBreak` markers. Consumers must
/// process instructions in order and may not reorder or deduplicate them.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutResult {
    instructions: Vec<DrawInstruction>,
}

impl LayoutResult {
    pub(crate) fn new(instructions: Vec<DrawInstruction>) -> LayoutResult {
        LayoutResult { instructions }
    }

    pub fn instructions(&self) -> &[DrawInstruction] {
        &self.instructions
    }

    pub fn into_instructions(self) -> Vec<DrawInstruction> {
        self.instructions
    }

    /// Number of pages in the program. An empty program still describes a
    /// single blank page.
    pub fn page_count(&self) -> usize {
        1 + self
            .instructions
            .iter()
            .filter(|instruction| matches!(instruction, DrawInstruction::PageBreak))
            .count()
    }

    /// The instructions of each page in order, with the `PageBreak` markers
    /// stripped
    pub fn pages(&self) -> impl Iterator<Item = &[DrawInstruction]> {
        self.instructions
            .split(|instruction| matches!(instruction, DrawInstruction::PageBreak))
    }
}
