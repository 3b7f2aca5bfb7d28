use derive_more::{Add, AddAssign, Display, From, Into, Sub, SubAssign};
use std::iter::Sum;
use std::ops::{Div, Mul};

/// A distance in PostScript points, 1/72 of an inch. All layout arithmetic
/// and all draw-program coordinates are in points.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, PartialOrd, Add, AddAssign, Sub, SubAssign, Display,
    From, Into,
)]
#[display("{_0}pt")]
pub struct Pt(pub f32);

impl Pt {
    pub fn max(self, other: Pt) -> Pt {
        Pt(self.0.max(other.0))
    }

    pub fn min(self, other: Pt) -> Pt {
        Pt(self.0.min(other.0))
    }
}

impl Mul<f32> for Pt {
    type Output = Pt;

    fn mul(self, rhs: f32) -> Pt {
        Pt(self.0 * rhs)
    }
}

impl Mul<Pt> for f32 {
    type Output = Pt;

    fn mul(self, rhs: Pt) -> Pt {
        Pt(self * rhs.0)
    }
}

impl Div<f32> for Pt {
    type Output = Pt;

    fn div(self, rhs: f32) -> Pt {
        Pt(self.0 / rhs)
    }
}

/// The ratio of two distances, e.g. an image scale factor
impl Div<Pt> for Pt {
    type Output = f32;

    fn div(self, rhs: Pt) -> f32 {
        self.0 / rhs.0
    }
}

impl Sum for Pt {
    fn sum<I: Iterator<Item = Pt>>(iter: I) -> Pt {
        Pt(iter.map(|pt| pt.0).sum())
    }
}

/// A distance in inches, for callers that think in paper sizes
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd, Add, Sub, Display, From, Into)]
#[display("{_0}in")]
pub struct In(pub f32);

impl From<In> for Pt {
    fn from(inches: In) -> Pt {
        Pt(inches.0 * 72.0)
    }
}

impl From<Pt> for In {
    fn from(points: Pt) -> In {
        In(points.0 / 72.0)
    }
}
