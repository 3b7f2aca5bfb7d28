use crate::error::LayoutError;
use crate::units::Pt;

/// Page dimensions as (width, height) in points.
pub type PageSize = (Pt, Pt);

pub const LETTER: PageSize = (Pt(8.5 * 72.0), Pt(11.0 * 72.0));
pub const LEGAL: PageSize = (Pt(8.5 * 72.0), Pt(13.0 * 72.0));
pub const A4: PageSize = (Pt(210.0 * 72.0 / 25.4), Pt(297.0 * 72.0 / 25.4));

/// Convert page sizes between portrait and landscape orientations.
pub trait PageOrientation {
    /// Returns the size in portrait orientation (width ≤ height).
    fn portrait(self) -> Self;
    /// Returns the size in landscape orientation (width ≥ height).
    fn landscape(self) -> Self;
}

impl PageOrientation for PageSize {
    fn portrait(self) -> Self {
        if self.0 <= self.1 {
            self
        } else {
            (self.1, self.0)
        }
    }

    fn landscape(self) -> PageSize {
        if self.0 >= self.1 {
            self
        } else {
            (self.1, self.0)
        }
    }
}

/// The tallest a figure may draw, as a fraction of page height: 3.25in on a
/// US-letter page.
pub const MAX_IMAGE_HEIGHT_FRACTION: f32 = 3.25 / 11.0;

/// Fixed page dimensions shared read-only by every component of a pagination
/// run: page size, the uniform margin on all four sides, and the cap on
/// figure heights. Construct through [PageGeometry::new] (or
/// [PageGeometry::letter]) to get validation up front; the engine
/// re-validates before laying anything out, so a hand-built geometry cannot
/// corrupt a run either.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: Pt,
    pub height: Pt,
    pub margin: Pt,
    /// Maximum figure draw height as a fraction of page height, in (0, 1]
    pub max_image_height_fraction: f32,
}

impl PageGeometry {
    pub fn new(
        size: PageSize,
        margin: Pt,
        max_image_height_fraction: f32,
    ) -> Result<PageGeometry, LayoutError> {
        let geometry = PageGeometry {
            width: size.0,
            height: size.1,
            margin,
            max_image_height_fraction,
        };
        geometry.validate()?;
        Ok(geometry)
    }

    /// US-letter pages with one-inch margins and the stock figure height
    /// cap. This is the geometry the manuscript format was designed around.
    pub fn letter() -> PageGeometry {
        PageGeometry {
            width: LETTER.0,
            height: LETTER.1,
            margin: Pt(72.0),
            max_image_height_fraction: MAX_IMAGE_HEIGHT_FRACTION,
        }
    }

    /// Check that the geometry leaves a usable content area. Fails with
    /// [LayoutError::InvalidGeometry] before any layout begins.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.width.0 <= 0.0 || self.height.0 <= 0.0 {
            return Err(LayoutError::InvalidGeometry {
                reason: format!(
                    "page dimensions must be positive, got {} × {}",
                    self.width, self.height
                ),
            });
        }
        if self.margin.0 < 0.0 {
            return Err(LayoutError::InvalidGeometry {
                reason: format!("margin must be non-negative, got {}", self.margin),
            });
        }
        if self.margin * 2.0 >= self.width || self.margin * 2.0 >= self.height {
            return Err(LayoutError::InvalidGeometry {
                reason: format!(
                    "margin {} leaves no content area on a {} × {} page",
                    self.margin, self.width, self.height
                ),
            });
        }
        if self.max_image_height_fraction <= 0.0 || self.max_image_height_fraction > 1.0 {
            return Err(LayoutError::InvalidGeometry {
                reason: format!(
                    "max image height fraction must be in (0, 1], got {}",
                    self.max_image_height_fraction
                ),
            });
        }
        Ok(())
    }

    /// Width available for content between the left and right margins
    pub fn content_width(&self) -> Pt {
        self.width - self.margin * 2.0
    }

    /// The y coordinate where content starts on a fresh page
    pub fn content_top(&self) -> Pt {
        self.height - self.margin
    }

    /// The tallest a figure may draw on this geometry
    pub fn max_image_height(&self) -> Pt {
        self.height * self.max_image_height_fraction
    }
}
