use crate::units::*;

/// A rectangle, specified by two opposite corners. On the y-down surfaces used
/// here `(x1, y1)` is the top-left corner and `(x2, y2)` the bottom-right.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rect {
    /// The x-coordinate of the first (typically, top-left) corner.
    pub x1: Px,
    /// The y-coordinate of the first (typically, top-left) corner.
    pub y1: Px,
    /// The x-coordinate of the second (typically, bottom-right) corner.
    pub x2: Px,
    /// The y-coordinate of the second (typically, bottom-right) corner.
    pub y2: Px,
}

impl Rect {
    /// A rectangle of the given size centred on a point
    pub fn centered(center: (Px, Px), width: Px, height: Px) -> Rect {
        Rect {
            x1: center.0 - width / 2.0,
            y1: center.1 - height / 2.0,
            x2: center.0 + width / 2.0,
            y2: center.1 + height / 2.0,
        }
    }

    pub fn width(&self) -> Px {
        self.x2 - self.x1
    }

    pub fn height(&self) -> Px {
        self.y2 - self.y1
    }

    pub fn center(&self) -> (Px, Px) {
        ((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0)
    }

    /// Shrink the rectangle by `amount` on every side. There is no check that
    /// the result is still a proper rectangle; over-sized insets produce
    /// negative widths and heights
    pub fn inset(&self, amount: Px) -> Rect {
        Rect {
            x1: self.x1 + amount,
            y1: self.y1 + amount,
            x2: self.x2 - amount,
            y2: self.y2 - amount,
        }
    }
}
