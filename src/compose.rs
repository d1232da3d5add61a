//! Putting a whole stamp together.
//!
//! A stamp is two concentric rings with four labels set along them, the
//! organisation name fitted into the middle, and a decorative mark either side.
//! All of the fixed geometry lives in [StampLayout], which defaults to a
//! 300×300 canvas with the stamp centred at (150, 150).

use serde::{Deserialize, Serialize};

use crate::layout::{draw_text_along_arc, draw_text_in_box, ArcText, FitBox, FittedText, GlyphPlacement, SizeRange};
use crate::{colours, Colour, FontSpec, Px, RingLabel, StampError, StampParameters, Surface};

/// Fixed geometry, fonts and wording of a stamp. Every field has a default, so
/// a layout file only needs to name the values it changes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StampLayout {
    /// Size of the area cleared before each render
    pub canvas_width: Px,
    pub canvas_height: Px,
    /// Centre of both rings and of the name box
    pub center: (Px, Px),
    pub inner_radius: Px,
    /// How far inside the outer ring its labels run
    pub outer_ring_inset: Px,
    /// How far inside the inner ring its labels run
    pub inner_ring_inset: Px,
    /// The name box is a square this much narrower than the inner ring's diameter
    pub center_box_inset: Px,
    pub center_padding: Px,
    pub center_sizes: SizeRange,
    pub ring_font: FontSpec,
    /// Family and weight of the name; its size is chosen by fitting
    pub center_font: FontSpec,
    pub ornament_font: FontSpec,
    pub ornament: String,
    /// Horizontal distance of each ornament from the centre
    pub ornament_offset: Px,
    pub tax_id_prefix: String,
    pub registration_prefix: String,
    pub colour: Colour,
}

impl Default for StampLayout {
    fn default() -> Self {
        StampLayout {
            canvas_width: Px(300.0),
            canvas_height: Px(300.0),
            center: (Px(150.0), Px(150.0)),
            inner_radius: Px(120.0),
            outer_ring_inset: Px(6.0),
            inner_ring_inset: Px(10.0),
            center_box_inset: Px(20.0),
            center_padding: Px(10.0),
            center_sizes: SizeRange::default(),
            ring_font: FontSpec::new("Arial", Px(12.0)),
            center_font: FontSpec::new("Arial", Px(30.0)).bold(),
            ornament_font: FontSpec::new("Arial", Px(16.0)),
            ornament: "*".to_string(),
            ornament_offset: Px(135.0),
            tax_id_prefix: "ИНН".to_string(),
            registration_prefix: "ОГРН".to_string(),
            colour: colours::STAMP_BLUE,
        }
    }
}

impl StampLayout {
    /// Read a layout from JSON. Missing fields keep their defaults, and the
    /// centre size range has to pass [SizeRange::validate]
    pub fn from_json(json: &str) -> Result<StampLayout, StampError> {
        let layout: StampLayout = serde_json::from_str(json)?;
        layout.center_sizes.validate()?;
        Ok(layout)
    }

    /// The box the organisation name is fitted into
    pub fn center_box(&self) -> FitBox {
        let side = self.inner_radius * 2.0 - self.center_box_inset;
        FitBox::centered(self.center, side, side).with_padding(self.center_padding)
    }
}

/// One ring label as it was painted
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedLabel {
    /// The exact string set along the ring
    pub text: String,
    pub radius: Px,
    pub glyphs: Vec<GlyphPlacement>,
}

/// Everything that was laid out during one render of a stamp
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedStamp {
    pub top: RenderedLabel,
    pub bottom: RenderedLabel,
    pub tax_id: RenderedLabel,
    pub registration_number: RenderedLabel,
    pub center: FittedText,
}

impl RenderedStamp {
    /// The ring labels, outer ring first
    pub fn labels(&self) -> [&RenderedLabel; 4] {
        [&self.top, &self.bottom, &self.tax_id, &self.registration_number]
    }
}

fn draw_label<S: Surface + ?Sized>(
    surface: &mut S,
    layout: &StampLayout,
    text: String,
    radius: Px,
    label: &RingLabel,
) -> RenderedLabel {
    let arc = ArcText {
        center: layout.center,
        radius,
        start_angle: label.start_angle,
        letter_spacing: label.spacing,
        alignment: label.alignment,
        direction: label.direction,
        font: layout.ring_font.clone(),
    };
    let glyphs = draw_text_along_arc(surface, &text, &arc);
    RenderedLabel { text, radius, glyphs }
}

/// Render a complete stamp onto `surface`, replacing whatever was there.
///
/// The surface is cleared, both rings are stroked, the four ring labels and the
/// fitted name are painted, and finally the two ornaments. Nothing here can
/// fail: nonsensical parameters (a NaN radius, say) simply produce a
/// nonsensical stamp.
///
/// ```
/// use stamp_gen::{compose_stamp, FixedMetrics, FormState, RecordingSurface, StampLayout, StampParameters};
///
/// let mut surface = RecordingSurface::new(FixedMetrics::default());
/// let params = StampParameters::from_source(&FormState::default());
/// let stamp = compose_stamp(&mut surface, &params, &StampLayout::default());
///
/// assert_eq!(stamp.tax_id.text, "ИНН 7701234567");
/// assert_eq!(stamp.center.lines[0].text, "РОМАШКА");
/// ```
pub fn compose_stamp<S: Surface + ?Sized>(
    surface: &mut S,
    params: &StampParameters,
    layout: &StampLayout,
) -> RenderedStamp {
    let (cx, cy) = layout.center;

    surface.clear_rect(Px(0.0), Px(0.0), layout.canvas_width, layout.canvas_height);
    surface.set_colour(layout.colour);

    // rings
    surface.stroke_circle(cx, cy, params.outer_radius);
    surface.stroke_circle(cx, cy, layout.inner_radius);

    let outer = params.outer_radius - layout.outer_ring_inset;
    let inner = layout.inner_radius - layout.inner_ring_inset;
    let texts = &params.texts;

    let top = draw_label(surface, layout, texts.top.clone(), outer, &params.top);
    let bottom = draw_label(surface, layout, texts.bottom.clone(), outer, &params.bottom);
    let tax_id = draw_label(
        surface,
        layout,
        format!("{} {}", layout.tax_id_prefix, texts.tax_id),
        inner,
        &params.tax_id,
    );
    let registration_number = draw_label(
        surface,
        layout,
        format!("{} {}", layout.registration_prefix, texts.registration_number),
        inner,
        &params.registration_number,
    );

    let center = draw_text_in_box(
        surface,
        &layout.center_font,
        &texts.center,
        &layout.center_box(),
        layout.center_sizes,
    );

    surface.set_font(&layout.ornament_font);
    surface.fill_text(&layout.ornament, cx - layout.ornament_offset, cy);
    surface.fill_text(&layout.ornament, cx + layout.ornament_offset, cy);

    tracing::debug!(
        outer_radius = *params.outer_radius,
        center_size = *center.size(),
        center_lines = center.lines.len(),
        "rendered stamp"
    );

    RenderedStamp {
        top,
        bottom,
        tax_id,
        registration_number,
        center,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DrawCommand, FixedMetrics, FormState, RecordingSurface};

    fn render(form: &FormState) -> (RenderedStamp, Vec<DrawCommand>) {
        let mut surface = RecordingSurface::new(FixedMetrics::default());
        let params = StampParameters::from_source(form);
        let stamp = compose_stamp(&mut surface, &params, &StampLayout::default());
        assert_eq!(surface.depth(), 0);
        (stamp, surface.take_commands())
    }

    #[test]
    fn paints_in_order() {
        let (_, commands) = render(&FormState::default());

        assert!(matches!(commands[0], DrawCommand::Clear { .. }));
        assert_eq!(commands[1], DrawCommand::Colour(colours::STAMP_BLUE));
        assert_eq!(
            commands[2],
            DrawCommand::StrokeCircle {
                cx: Px(150.0),
                cy: Px(150.0),
                radius: Px(140.0)
            }
        );
        assert_eq!(
            commands[3],
            DrawCommand::StrokeCircle {
                cx: Px(150.0),
                cy: Px(150.0),
                radius: Px(120.0)
            }
        );

        // the last two paints are the ornaments
        let texts: Vec<_> = commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, position, .. } => Some((text.as_str(), *position)),
                _ => None,
            })
            .collect();
        let n = texts.len();
        assert_eq!(texts[n - 2], ("*", (Px(15.0), Px(150.0))));
        assert_eq!(texts[n - 1], ("*", (Px(285.0), Px(150.0))));
    }

    #[test]
    fn labels_use_their_rings() {
        let (stamp, _) = render(&FormState::default());
        assert_eq!(stamp.top.radius, Px(134.0));
        assert_eq!(stamp.bottom.radius, Px(134.0));
        assert_eq!(stamp.tax_id.radius, Px(110.0));
        assert_eq!(stamp.registration_number.radius, Px(110.0));
        assert_eq!(stamp.registration_number.text, "ОГРН 1027700132195");
        for label in stamp.labels() {
            assert_eq!(label.glyphs.len(), label.text.chars().count());
        }
    }

    #[test]
    fn tax_id_runs_backwards() {
        let form = FormState::default().with(crate::form::fields::INN_TEXT, "7701234567");
        let (stamp, _) = render(&form);
        assert_eq!(stamp.tax_id.text, "ИНН 7701234567");
        assert!(stamp.tax_id.glyphs.windows(2).all(|w| w[1].angle < w[0].angle));
        assert!(stamp.tax_id.glyphs.iter().all(|g| g.flipped));
    }

    #[test]
    fn nan_radius_still_renders() {
        let form = FormState::default().with(crate::form::fields::OUTER_RADIUS, "");
        let (stamp, commands) = render(&form);
        assert!(stamp.top.radius.is_nan());
        assert_eq!(stamp.top.glyphs.len(), stamp.top.text.chars().count());
        assert!(commands.len() > 4);
    }

    #[test]
    fn layouts_load_partially_from_json() {
        let layout = StampLayout::from_json(r##"{"inner_radius": 100, "colour": "#ff0000"}"##)
            .expect("valid layout json");
        assert_eq!(layout.inner_radius, Px(100.0));
        assert_eq!(layout.colour, Colour::new_rgb(1.0, 0.0, 0.0));
        assert_eq!(layout.center, (Px(150.0), Px(150.0)));
        assert_eq!(layout.center_box().bounds.width(), Px(180.0));

        assert!(StampLayout::from_json(r#"{"colour": "blue"}"#).is_err());
    }

    #[test]
    fn out_of_range_center_sizes_are_rejected() {
        let json = r#"{"center_sizes": {"largest": 1e10, "smallest": 10}}"#;
        assert!(matches!(
            StampLayout::from_json(json),
            Err(StampError::InvalidSizeRange { .. })
        ));

        // built by hand the range is not checked up front, but rendering still finishes
        let layout = StampLayout {
            center_sizes: SizeRange {
                largest: Px(1e10),
                smallest: Px(10.0),
            },
            ..StampLayout::default()
        };
        let form = FormState::default().with(
            crate::form::fields::CENTER_TEXT,
            "obshestvo s ogranichennoy otvetstvennostyu romashka",
        );
        let mut surface = RecordingSurface::new(FixedMetrics::default());
        let stamp = compose_stamp(&mut surface, &StampParameters::from_source(&form), &layout);
        assert!(stamp.center.size() <= Px(30.0));
    }
}
