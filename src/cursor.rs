use crate::geometry::PageGeometry;
use crate::units::Pt;

/// Tracks where the next unit of content lands: the current page index and
/// the vertical write position, measured downward from the top of the page.
///
/// A cursor is owned exclusively by a single pagination run; it is created
/// fresh at the start of the run and never shared. The cursor decides *when*
/// a page break is required but emits nothing itself — callers push the
/// `PageBreak` instruction whenever a method reports that it broke.
#[derive(Debug)]
pub struct PageCursor<'a> {
    geometry: &'a PageGeometry,
    page_index: usize,
    y: Pt,
    /// whether anything has been placed on the current page; a fresh page is
    /// never broken again, so breaking logic alone cannot produce adjacent
    /// breaks or a leading break
    dirty: bool,
}

impl<'a> PageCursor<'a> {
    pub fn new(geometry: &'a PageGeometry) -> PageCursor<'a> {
        PageCursor {
            geometry,
            page_index: 0,
            y: geometry.content_top(),
            dirty: false,
        }
    }

    /// Current page index (0-based, monotonically non-decreasing)
    pub fn page_index(&self) -> usize {
        self.page_index
    }

    /// Current vertical write position
    pub fn y(&self) -> Pt {
        self.y
    }

    fn break_page(&mut self) -> bool {
        if !self.dirty {
            // already at the top of an empty page; breaking again would only
            // emit a blank page
            return false;
        }
        self.page_index += 1;
        self.y = self.geometry.content_top();
        self.dirty = false;
        log::debug!("page break -> page {}", self.page_index);
        true
    }

    /// Break to a fresh page unless a unit `required` tall fits above the
    /// bottom margin at the current position. Returns whether a break was
    /// performed. A unit taller than the whole content area still gets a
    /// fresh page and then draws there, overflowing, rather than being
    /// split.
    pub fn ensure_room(&mut self, required: Pt) -> bool {
        if self.y - required < self.geometry.margin {
            self.break_page()
        } else {
            false
        }
    }

    /// Reserve one line of height `leading`: breaks first if the line would
    /// not fit, then steps the write position down past it. Returns the y
    /// coordinate the line should be drawn at and whether a break occurred.
    pub fn advance(&mut self, leading: Pt) -> (Pt, bool) {
        let broke = self.ensure_room(leading);
        let line_y = self.y;
        self.y -= leading;
        self.dirty = true;
        (line_y, broke)
    }

    /// Step the write position down past a placed unit of `height` (an
    /// image), marking the page as occupied
    pub fn place(&mut self, height: Pt) {
        self.y -= height;
        self.dirty = true;
    }

    /// Apply trailing whitespace after a block. Gaps never force a break on
    /// their own; if one pushes the position past the bottom margin, the
    /// next unit's room check breaks instead.
    pub fn gap(&mut self, amount: Pt) {
        self.y -= amount;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::PageGeometry;

    #[test]
    fn starts_at_the_top_of_page_zero() {
        let geometry = PageGeometry::letter();
        let cursor = PageCursor::new(&geometry);
        assert_eq!(cursor.page_index(), 0);
        assert_eq!(cursor.y(), Pt(720.0));
    }

    #[test]
    fn advance_steps_down_and_returns_draw_position() {
        let geometry = PageGeometry::letter();
        let mut cursor = PageCursor::new(&geometry);
        let (y, broke) = cursor.advance(Pt(15.0));
        assert_eq!(y, Pt(720.0));
        assert!(!broke);
        assert_eq!(cursor.y(), Pt(705.0));
    }

    #[test]
    fn breaks_when_a_line_would_cross_the_bottom_margin() {
        let geometry = PageGeometry::letter();
        let mut cursor = PageCursor::new(&geometry);
        // fill the page: lines fit while y - 15 >= 72
        let mut lines_on_first_page = 0;
        loop {
            let (_, broke) = cursor.advance(Pt(15.0));
            if broke {
                break;
            }
            lines_on_first_page += 1;
        }
        // 720 down to 90 inclusive in 15pt steps
        assert_eq!(lines_on_first_page, 43);
        assert_eq!(cursor.page_index(), 1);
        assert_eq!(cursor.y(), Pt(705.0));
    }

    #[test]
    fn a_fresh_page_is_never_broken_again() {
        let geometry = PageGeometry::letter();
        let mut cursor = PageCursor::new(&geometry);
        // taller than the whole content area
        assert!(!cursor.ensure_room(Pt(10_000.0)));
        assert_eq!(cursor.page_index(), 0);

        cursor.advance(Pt(15.0));
        assert!(cursor.ensure_room(Pt(10_000.0)));
        assert_eq!(cursor.page_index(), 1);
        // the new page is fresh, so an immediate second check stays put
        assert!(!cursor.ensure_room(Pt(10_000.0)));
        assert_eq!(cursor.page_index(), 1);
    }

    #[test]
    fn gaps_do_not_break_on_their_own() {
        let geometry = PageGeometry::letter();
        let mut cursor = PageCursor::new(&geometry);
        cursor.advance(Pt(15.0));
        cursor.gap(Pt(10_000.0));
        assert_eq!(cursor.page_index(), 0);
        // the next line's room check performs the break
        let (y, broke) = cursor.advance(Pt(15.0));
        assert!(broke);
        assert_eq!(y, Pt(720.0));
        assert_eq!(cursor.page_index(), 1);
    }
}
