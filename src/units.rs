use derive_more::{Add, AddAssign, Deref, DerefMut, Display, Div, From, Into, Mul, MulAssign, Neg, Sub, SubAssign, Sum};
use serde::{Deserialize, Serialize};

/// A length in surface pixels. Surfaces are laid out on a y-down grid where
/// one unit corresponds to one CSS pixel of the preview canvas.
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    PartialOrd,
    Add,
    AddAssign,
    Sub,
    SubAssign,
    Mul,
    MulAssign,
    Div,
    Neg,
    Sum,
    Deref,
    DerefMut,
    From,
    Into,
    Display,
    Serialize,
    Deserialize,
)]
#[display("{_0}px")]
#[serde(transparent)]
pub struct Px(pub f32);

impl Px {
    /// Whether this length can be used as a radius or a box dimension
    pub fn is_usable(self) -> bool {
        self.0.is_finite() && self.0 > 0.0
    }
}

/// An angle in degrees, as entered by users on the position sliders
#[derive(Debug, Default, Copy, Clone, PartialEq, PartialOrd, Add, Sub, Neg, From, Into, Display)]
#[display("{_0}°")]
pub struct Deg(pub f32);

impl Deg {
    /// Convert to radians, the unit every layout function works in
    pub fn radians(self) -> f32 {
        self.0.to_radians()
    }
}
