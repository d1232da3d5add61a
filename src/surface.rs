//! The drawing surface abstraction the stamp is painted onto.
//!
//! Layout code never owns a surface; it borrows one for the duration of a
//! single render and only talks to it through the [Surface] trait, which
//! mirrors the small subset of the HTML canvas 2D API a stamp needs. Painting
//! is infallible from the caller's point of view: a backend that hits an error
//! logs it and carries on, so a bad frame shows up as a visibly wrong stamp
//! rather than an error.

use crate::{Colour, FontSpec, Px};

/// The ability to measure how wide a string renders in a given font
pub trait Measure {
    /// Width of `text` set in `font`, without any extra letter spacing
    fn measure_text(&self, font: &FontSpec, text: &str) -> Px;
}

impl<M: Measure + ?Sized> Measure for &M {
    fn measure_text(&self, font: &FontSpec, text: &str) -> Px {
        (**self).measure_text(font, text)
    }
}

/// A 2D painting surface with a canvas-style transform stack.
///
/// Text is always painted centred on the local origin, both horizontally
/// (`textAlign = center`) and vertically (`textBaseline = middle`).
pub trait Surface: Measure {
    /// Erase everything within the given rectangle
    fn clear_rect(&mut self, x: Px, y: Px, width: Px, height: Px);

    /// Set the colour used for both strokes and fills
    fn set_colour(&mut self, colour: Colour);

    /// Stroke the outline of a full circle
    fn stroke_circle(&mut self, cx: Px, cy: Px, radius: Px);

    /// Fill a full circle
    fn fill_circle(&mut self, cx: Px, cy: Px, radius: Px);

    /// Switch the font used by [fill_text](Surface::fill_text)
    fn set_font(&mut self, font: &FontSpec);

    /// The font most recently set with [set_font](Surface::set_font)
    fn font(&self) -> &FontSpec;

    /// Paint `text` centred on the local point `(x, y)` using the current font
    fn fill_text(&mut self, text: &str, x: Px, y: Px);

    /// Push the current transform (and font and colour) onto the state stack
    fn save(&mut self);

    /// Pop the most recently saved state. Unbalanced restores are ignored
    fn restore(&mut self);

    /// Move the local origin
    fn translate(&mut self, x: Px, y: Px);

    /// Rotate the local frame clockwise by `angle` radians
    fn rotate(&mut self, angle: f32);

    /// Measure `text` in the current font
    fn measure_current(&self, text: &str) -> Px {
        self.measure_text(self.font(), text)
    }
}

/// A deterministic measurement where every character advances by the same
/// fraction of the font size. Useful for tests and as a stand-in when no real
/// font is loaded
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FixedMetrics {
    /// Advance of one character as a fraction of the font size
    pub advance: f32,
    /// Extra advance applied to bold text, as a fraction of the font size
    pub bold_extra: f32,
}

impl Default for FixedMetrics {
    fn default() -> Self {
        FixedMetrics {
            advance: 0.6,
            bold_extra: 0.15,
        }
    }
}

impl Measure for FixedMetrics {
    fn measure_text(&self, font: &FontSpec, text: &str) -> Px {
        let per_char = if font.bold {
            self.advance + self.bold_extra
        } else {
            self.advance
        };
        Px(text.chars().count() as f32 * *font.size * per_char)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_metrics_count_characters_not_bytes() {
        let metrics = FixedMetrics::default();
        let font = FontSpec::new("Arial", Px(10.0));
        // Cyrillic letters are two bytes each in UTF-8
        assert_eq!(metrics.measure_text(&font, "ИНН"), Px(18.0));
        assert_eq!(metrics.measure_text(&font, "INN"), Px(18.0));
        assert_eq!(metrics.measure_text(&font, ""), Px(0.0));
    }

    #[test]
    fn bold_text_is_wider() {
        let metrics = FixedMetrics::default();
        let regular = FontSpec::new("Arial", Px(20.0));
        let bold = regular.clone().bold();
        assert!(metrics.measure_text(&bold, "OOO") > metrics.measure_text(&regular, "OOO"));
    }
}
