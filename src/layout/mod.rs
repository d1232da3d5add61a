//! Text layout for stamps.
//!
//! Two strategies are available, each split into a pure planning function and
//! a painting function that issues the plan against a [`Surface`](crate::Surface):
//!
//! - [`arc_glyphs`] / [`draw_text_along_arc`] - set a string along a circle, one
//!   rotated glyph at a time, centred on a start angle
//! - [`fit_text`] / [`draw_text_in_box`] - shrink and greedily wrap a phrase
//!   until it fits inside a box, then paint it centred
//!
//! # Example
//!
//! ```
//! use stamp_gen::layout::{draw_text_along_arc, ArcText, Alignment, Direction};
//! use stamp_gen::{FixedMetrics, FontSpec, Px, RecordingSurface};
//!
//! let mut surface = RecordingSurface::new(FixedMetrics::default());
//! let arc = ArcText {
//!     center: (Px(150.0), Px(150.0)),
//!     radius: Px(110.0),
//!     start_angle: std::f32::consts::PI,
//!     letter_spacing: Px(1.0),
//!     alignment: Alignment::TowardCenter,
//!     direction: Direction::Reversed,
//!     font: FontSpec::new("Arial", Px(12.0)),
//! };
//!
//! let glyphs = draw_text_along_arc(&mut surface, "ИНН 7701234567", &arc);
//! assert_eq!(glyphs.len(), 14);
//! assert_eq!(surface.texts().collect::<String>(), "ИНН 7701234567");
//! ```

mod arc;
mod fit;

pub use arc::*;
pub use fit::*;
