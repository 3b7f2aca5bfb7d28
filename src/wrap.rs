use crate::error::LayoutError;
use crate::measure::{FontStyle, TextMeasurer};
use crate::units::Pt;

/// Greedy word wrap: split `text` on whitespace and pack as many words as
/// fit within `max_width` onto each line, measuring with `measurer`.
///
/// Empty or whitespace-only input yields a single empty line, preserving the
/// vertical space a blank paragraph occupies. A single word wider than
/// `max_width` is placed alone on its own line and allowed to overflow;
/// words are never hyphenated, split, truncated, or dropped.
///
/// Output depends only on the inputs and the measurer's metrics.
pub fn wrap<M: TextMeasurer + ?Sized>(
    measurer: &M,
    text: &str,
    max_width: Pt,
    font: FontStyle,
    size: Pt,
) -> Result<Vec<String>, LayoutError> {
    let mut words = text.split_whitespace();
    let Some(first) = words.next() else {
        return Ok(vec![String::new()]);
    };

    let mut lines: Vec<String> = Vec::new();
    let mut current = first.to_string();
    for word in words {
        let tentative = format!("{current} {word}");
        if measurer.text_width(&tentative, font, size)? <= max_width {
            current = tentative;
        } else {
            lines.push(current);
            current = word.to_string();
        }
    }
    lines.push(current);

    Ok(lines)
}
