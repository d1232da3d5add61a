use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

use crate::{FontSpec, Measure, Px, Surface};

/// Which way glyphs face relative to the circle they are set on
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum Alignment {
    /// The tops of the glyphs point at the centre of the circle. Form inputs
    /// call this `bottom`
    #[default]
    #[serde(rename = "bottom")]
    TowardCenter,
    /// The glyphs are turned half a revolution so their tops point outwards.
    /// Form inputs call this `top`
    #[serde(rename = "top")]
    AwayFromCenter,
}

impl Alignment {
    /// Interpret an alignment value as submitted by the stamp form. Only `top`
    /// turns glyphs outwards; anything else keeps them facing the centre
    pub fn from_form_value(value: &str) -> Alignment {
        match value.trim() {
            "top" => Alignment::AwayFromCenter,
            "bottom" => Alignment::TowardCenter,
            other => {
                tracing::debug!(value = other, "unknown alignment, facing the centre");
                Alignment::TowardCenter
            }
        }
    }
}

/// Which way text runs around the circle
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum Direction {
    /// Clockwise, for text along the top of a ring
    #[default]
    Forward,
    /// Counter-clockwise with every glyph turned half a revolution, so text
    /// along the bottom of a ring reads left to right
    Reversed,
}

/// Where and how a string is set along a circle
#[derive(Clone, PartialEq, Debug)]
pub struct ArcText {
    /// Centre of the circle, in surface coordinates
    pub center: (Px, Px),
    pub radius: Px,
    /// Angle the text is centred on, radians clockwise from straight up
    pub start_angle: f32,
    /// Extra space inserted between consecutive glyphs, may be negative
    pub letter_spacing: Px,
    pub alignment: Alignment,
    pub direction: Direction,
    /// The font the text is measured and painted in
    pub font: FontSpec,
}

impl ArcText {
    fn is_reversed(&self) -> bool {
        self.direction == Direction::Reversed
    }
}

/// Where a single glyph of arc text ends up
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct GlyphPlacement {
    pub ch: char,
    /// Angle of the glyph's centre on the circle, radians clockwise from straight up
    pub angle: f32,
    /// Whether the glyph is turned half a revolution
    pub flipped: bool,
}

/// Calculate where each character of `text` lands on the circle described by
/// `arc`, without painting anything.
///
/// The string's total width (measured as a whole, plus the letter spacing
/// between each pair of characters) is converted to an angle at the given
/// radius and centred on [ArcText::start_angle]. Glyphs then advance one at a
/// time by their own width plus the letter spacing. Text longer than the
/// circumference simply wraps around and overlaps itself.
///
/// ```
/// use stamp_gen::layout::{arc_glyphs, ArcText, Alignment, Direction};
/// use stamp_gen::{FixedMetrics, FontSpec, Px};
///
/// let arc = ArcText {
///     center: (Px(150.0), Px(150.0)),
///     radius: Px(134.0),
///     start_angle: 0.0,
///     letter_spacing: Px(2.0),
///     alignment: Alignment::TowardCenter,
///     direction: Direction::Forward,
///     font: FontSpec::new("Arial", Px(12.0)),
/// };
/// let glyphs = arc_glyphs(&FixedMetrics::default(), "ROMASHKA", &arc);
/// assert_eq!(glyphs.len(), 8);
/// assert!(glyphs[0].angle < 0.0 && glyphs[7].angle > 0.0);
/// ```
pub fn arc_glyphs<M: Measure + ?Sized>(measure: &M, text: &str, arc: &ArcText) -> Vec<GlyphPlacement> {
    let count = text.chars().count();
    if count == 0 {
        return Vec::new();
    }
    if !arc.radius.is_usable() {
        tracing::warn!(radius = *arc.radius, text, "degenerate radius, arc text will not render sensibly");
    }

    let radius = *arc.radius;
    let spacing = *arc.letter_spacing;
    let reversed = arc.is_reversed();
    let flipped = arc.alignment == Alignment::AwayFromCenter || reversed;

    let text_width = *measure.measure_text(&arc.font, text) + (count - 1) as f32 * spacing;
    let text_angle = text_width / radius;

    let mut angle = if reversed {
        arc.start_angle + text_angle / 2.0
    } else {
        arc.start_angle - text_angle / 2.0
    };

    let mut glyphs = Vec::with_capacity(count);
    let mut buf = [0u8; 4];
    for ch in text.chars() {
        glyphs.push(GlyphPlacement { ch, angle, flipped });
        tracing::trace!(%ch, angle, "placed glyph");

        // single glyph widths, so the run can drift slightly from the whole-string estimate
        let char_width = *measure.measure_text(&arc.font, ch.encode_utf8(&mut buf));
        let angle_change = (char_width + spacing) / radius;
        if reversed {
            angle -= angle_change;
        } else {
            angle += angle_change;
        }
    }

    glyphs
}

/// Lay `text` out along a circle and paint it, one glyph at a time, onto the
/// surface. Each glyph is drawn in its own saved frame which is rotated to the
/// glyph's angle and moved out to the circle, so the surface's transform is
/// left exactly as it was found.
///
/// Returns the placements that were painted.
pub fn draw_text_along_arc<S: Surface + ?Sized>(surface: &mut S, text: &str, arc: &ArcText) -> Vec<GlyphPlacement> {
    let glyphs = arc_glyphs(&*surface, text, arc);

    surface.save();
    surface.set_font(&arc.font);
    surface.translate(arc.center.0, arc.center.1);

    let mut buf = [0u8; 4];
    for glyph in glyphs.iter() {
        surface.save();
        surface.rotate(glyph.angle);
        surface.translate(Px(0.0), -arc.radius);
        if glyph.flipped {
            surface.rotate(PI);
        }
        surface.fill_text(glyph.ch.encode_utf8(&mut buf), Px(0.0), Px(0.0));
        surface.restore();
    }

    surface.restore();
    glyphs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DrawCommand, FixedMetrics, RecordingSurface};

    fn arc(radius: f32, spacing: f32, direction: Direction) -> ArcText {
        ArcText {
            center: (Px(150.0), Px(150.0)),
            radius: Px(radius),
            start_angle: 0.0,
            letter_spacing: Px(spacing),
            alignment: Alignment::TowardCenter,
            direction,
            font: FontSpec::new("Arial", Px(12.0)),
        }
    }

    #[test]
    fn one_placement_per_character_in_order() {
        let text = "ОГРН 1027700132195";
        let glyphs = arc_glyphs(&FixedMetrics::default(), text, &arc(110.0, 1.0, Direction::Forward));
        assert_eq!(glyphs.len(), text.chars().count());
        assert!(glyphs.iter().map(|g| g.ch).eq(text.chars()));
        // forward text runs clockwise
        assert!(glyphs.windows(2).all(|w| w[1].angle > w[0].angle));
    }

    #[test]
    fn reversing_mirrors_the_advance() {
        let metrics = FixedMetrics::default();
        let forward = arc_glyphs(&metrics, "ROMASHKA", &arc(134.0, 2.0, Direction::Forward));
        let reversed = arc_glyphs(&metrics, "ROMASHKA", &arc(134.0, 2.0, Direction::Reversed));

        assert_eq!(forward.len(), reversed.len());
        for (f, r) in forward.iter().zip(reversed.iter()) {
            assert_eq!(f.ch, r.ch);
            assert!((f.angle + r.angle).abs() < 1e-5);
            assert!(!f.flipped);
            assert!(r.flipped);
        }
    }

    #[test]
    fn outward_alignment_flips_forward_text() {
        let mut text = arc(134.0, 0.0, Direction::Forward);
        text.alignment = Alignment::AwayFromCenter;
        let glyphs = arc_glyphs(&FixedMetrics::default(), "AB", &text);
        assert!(glyphs.iter().all(|g| g.flipped));
    }

    #[test]
    fn single_glyph_span_is_centred_on_the_start_angle() {
        let metrics = FixedMetrics::default();
        let mut text = arc(100.0, 0.0, Direction::Forward);
        text.start_angle = 0.75;
        let glyphs = arc_glyphs(&metrics, "W", &text);
        assert_eq!(glyphs.len(), 1);

        let width = *metrics.measure_text(&text.font, "W");
        let first = glyphs[0].angle;
        assert!((first - (0.75 - width / 200.0)).abs() < 1e-6);
        // the glyph occupies [first, first + width / radius], whose midpoint is the start angle
        assert!(((first + width / 100.0 + first) / 2.0 - 0.75).abs() < 1e-6);
    }

    #[test]
    fn spacing_widens_the_run() {
        let metrics = FixedMetrics::default();
        let tight = arc_glyphs(&metrics, "ROMASHKA", &arc(134.0, 0.0, Direction::Forward));
        let loose = arc_glyphs(&metrics, "ROMASHKA", &arc(134.0, 4.0, Direction::Forward));
        assert!(loose[0].angle < tight[0].angle);
        assert!(loose[7].angle > tight[7].angle);

        let squeezed = arc_glyphs(&metrics, "ROMASHKA", &arc(134.0, -2.0, Direction::Forward));
        assert!(squeezed[0].angle > tight[0].angle);
    }

    #[test]
    fn empty_text_places_nothing() {
        let mut surface = RecordingSurface::new(FixedMetrics::default());
        let glyphs = draw_text_along_arc(&mut surface, "", &arc(134.0, 2.0, Direction::Forward));
        assert!(glyphs.is_empty());
        assert_eq!(surface.texts().count(), 0);
        assert_eq!(surface.depth(), 0);
    }

    #[test]
    fn degenerate_radius_still_places_every_glyph() {
        let glyphs = arc_glyphs(&FixedMetrics::default(), "ABC", &arc(f32::NAN, 2.0, Direction::Forward));
        assert_eq!(glyphs.len(), 3);
        assert!(glyphs.iter().all(|g| g.angle.is_nan()));

        let glyphs = arc_glyphs(&FixedMetrics::default(), "ABC", &arc(0.0, 2.0, Direction::Forward));
        assert_eq!(glyphs.len(), 3);
    }

    #[test]
    fn painted_glyphs_sit_on_the_circle() {
        let mut surface = RecordingSurface::new(FixedMetrics::default());
        let text = arc(100.0, 0.0, Direction::Forward);
        let glyphs = draw_text_along_arc(&mut surface, "AB", &text);

        let painted: Vec<_> = surface
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { position, rotation, .. } => Some((*position, *rotation)),
                _ => None,
            })
            .collect();
        assert_eq!(painted.len(), 2);

        for (glyph, ((x, y), rotation)) in glyphs.iter().zip(painted) {
            let dx = *x - 150.0;
            let dy = *y - 150.0;
            assert!(((dx * dx + dy * dy).sqrt() - 100.0).abs() < 1e-3);
            // straight up is angle zero, clockwise positive
            assert!((dx - 100.0 * glyph.angle.sin()).abs() < 1e-3);
            assert!((dy + 100.0 * glyph.angle.cos()).abs() < 1e-3);
            assert!((rotation - glyph.angle).abs() < 1e-4);
        }
        assert_eq!(surface.depth(), 0);
    }

    #[test]
    fn reversed_glyphs_are_painted_upside_down() {
        let mut surface = RecordingSurface::new(FixedMetrics::default());
        let mut text = arc(100.0, 0.0, Direction::Reversed);
        text.start_angle = PI;
        draw_text_along_arc(&mut surface, "A", &text);

        let rotation = surface
            .commands()
            .iter()
            .find_map(|c| match c {
                DrawCommand::Text { rotation, .. } => Some(*rotation),
                _ => None,
            })
            .expect("glyph painted");
        let width = 12.0 * 0.6;
        // at the bottom of the ring, the half turn makes the glyph read upright
        let expected = PI + width / 200.0 + PI;
        let diff = (rotation - expected).rem_euclid(2.0 * PI);
        assert!(diff < 1e-4 || (2.0 * PI - diff) < 1e-4);
    }

    #[test]
    fn form_values_map_to_alignments() {
        assert_eq!(Alignment::from_form_value("top"), Alignment::AwayFromCenter);
        assert_eq!(Alignment::from_form_value("bottom"), Alignment::TowardCenter);
        assert_eq!(Alignment::from_form_value("sideways"), Alignment::TowardCenter);
        let parsed: Alignment = serde_json::from_str("\"top\"").expect("valid alignment");
        assert_eq!(parsed, Alignment::AwayFromCenter);
    }
}
