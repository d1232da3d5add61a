//! Lay out and paint circular company seals: a name fitted into the middle,
//! lines of text set along two concentric rings, and the tax and registration
//! numbers around the inner ring.
//!
//! Rendering is split in two. The [layout] module works out where every glyph
//! and line goes, measuring text through the [Measure] trait. Painting goes
//! through the [Surface] trait, a small subset of the HTML canvas 2D API, with
//! backends for PDF content streams ([PdfSurface]), for capturing draw calls in
//! tests ([RecordingSurface]) and, with the `web` feature, for browser canvases.
//!
//! ```
//! use stamp_gen::{compose_stamp, FixedMetrics, FormState, RecordingSurface, StampLayout, StampParameters};
//! use stamp_gen::form::fields;
//!
//! let form = FormState::default().with(fields::CENTER_TEXT, "Romashka");
//! let params = StampParameters::from_source(&form);
//!
//! let mut surface = RecordingSurface::new(FixedMetrics::default());
//! let stamp = compose_stamp(&mut surface, &params, &StampLayout::default());
//! assert_eq!(stamp.center.lines[0].text, "ROMASHKA");
//! ```

mod colour;
pub use colour::*;

mod compose;
pub use compose::*;

mod editor;
pub use editor::*;

mod error;
pub use error::*;

mod font;
pub use font::*;

/// The named inputs a stamp is read from
pub mod form;
pub use form::{FormState, ParameterSource};

/// Utility functions and structures to lay out text along arcs and inside boxes
pub mod layout;

mod params;
pub use params::*;

mod pdf;
pub use pdf::*;

mod recording;
pub use recording::*;

mod rect;
pub use rect::*;

mod surface;
pub use surface::*;

mod transform;
pub use transform::*;

mod units;
pub use units::*;

#[cfg(feature = "web")]
mod web;
#[cfg(feature = "web")]
pub use web::*;

/// Re-export PDF-writer functionality, mostly for wrapping [PdfSurface] output in a document
pub use pdf_writer;
