use crate::form::fields;
use crate::layout::{Alignment, Direction};
use crate::{Deg, ParameterSource, Px};

/// The words printed on a stamp
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StampTexts {
    /// Runs clockwise along the top of the outer ring
    pub top: String,
    /// The organisation name, fitted into the middle
    pub center: String,
    /// Runs along the bottom of the outer ring
    pub bottom: String,
    /// Taxpayer identification number (ИНН), without its prefix
    pub tax_id: String,
    /// State registration number (ОГРН), without its prefix
    pub registration_number: String,
}

/// How one ring label is set
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingLabel {
    /// Extra space between glyphs
    pub spacing: Px,
    /// Angle the label is centred on, radians clockwise from straight up
    pub start_angle: f32,
    pub alignment: Alignment,
    pub direction: Direction,
}

impl RingLabel {
    fn read<P: ParameterSource + ?Sized>(
        source: &P,
        spacing: &str,
        position: Option<&str>,
        alignment: &str,
        direction: Direction,
    ) -> RingLabel {
        RingLabel {
            spacing: Px(source.number(spacing)),
            start_angle: position
                .map(|name| Deg(source.number(name)).radians())
                .unwrap_or(0.0),
            alignment: Alignment::from_form_value(source.text(alignment)),
            direction,
        }
    }
}

/// A snapshot of every input for one render of a stamp. It is rebuilt from
/// the form for every render and never modified afterwards
#[derive(Debug, Clone, PartialEq)]
pub struct StampParameters {
    pub texts: StampTexts,
    pub outer_radius: Px,
    pub top: RingLabel,
    pub bottom: RingLabel,
    pub tax_id: RingLabel,
    pub registration_number: RingLabel,
    /// Read from the form but not used by any layout
    pub center_spacing: Px,
}

impl StampParameters {
    /// Take a snapshot of the form. The ring and centre texts are upper-cased;
    /// the identifiers are taken as typed. The top and registration-number
    /// labels always sit at the top of the stamp, while the bottom and tax-id
    /// labels are positioned by their sliders (in degrees). Malformed numbers
    /// become NaN and are carried through as-is
    pub fn from_source<P: ParameterSource + ?Sized>(source: &P) -> StampParameters {
        StampParameters {
            texts: StampTexts {
                top: source.text(fields::TOP_TEXT).to_uppercase(),
                center: source.text(fields::CENTER_TEXT).to_uppercase(),
                bottom: source.text(fields::BOTTOM_TEXT).to_uppercase(),
                tax_id: source.text(fields::INN_TEXT).to_string(),
                registration_number: source.text(fields::OGRN_TEXT).to_string(),
            },
            outer_radius: Px(source.number(fields::OUTER_RADIUS)),
            top: RingLabel::read(
                source,
                fields::TOP_TEXT_SPACING,
                None,
                fields::TOP_TEXT_ALIGNMENT,
                Direction::Forward,
            ),
            bottom: RingLabel::read(
                source,
                fields::BOTTOM_TEXT_SPACING,
                Some(fields::BOTTOM_TEXT_POSITION),
                fields::BOTTOM_TEXT_ALIGNMENT,
                Direction::Reversed,
            ),
            tax_id: RingLabel::read(
                source,
                fields::INN_TEXT_SPACING,
                Some(fields::INN_TEXT_POSITION),
                fields::INN_TEXT_ALIGNMENT,
                Direction::Reversed,
            ),
            registration_number: RingLabel::read(
                source,
                fields::OGRN_TEXT_SPACING,
                None,
                fields::OGRN_TEXT_ALIGNMENT,
                Direction::Forward,
            ),
            center_spacing: Px(source.number(fields::CENTER_TEXT_SPACING)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FormState;
    use std::f32::consts::PI;

    #[test]
    fn snapshot_of_the_default_form() {
        let params = StampParameters::from_source(&FormState::default());
        assert_eq!(params.outer_radius, Px(140.0));
        assert_eq!(params.texts.center, "РОМАШКА");
        assert_eq!(params.texts.tax_id, "7701234567");
        assert_eq!(params.top.start_angle, 0.0);
        assert!((params.bottom.start_angle - PI).abs() < 1e-6);
        assert_eq!(params.top.direction, Direction::Forward);
        assert_eq!(params.bottom.direction, Direction::Reversed);
        assert_eq!(params.tax_id.direction, Direction::Reversed);
        assert_eq!(params.registration_number.direction, Direction::Forward);
        assert_eq!(params.registration_number.spacing, Px(1.0));
    }

    #[test]
    fn identifiers_keep_their_case() {
        let form = FormState::default()
            .with(fields::TOP_TEXT, "ooo romashka")
            .with(fields::OGRN_TEXT, "abc-1");
        let params = StampParameters::from_source(&form);
        assert_eq!(params.texts.top, "OOO ROMASHKA");
        assert_eq!(params.texts.registration_number, "abc-1");
    }

    #[test]
    fn alignments_follow_the_form() {
        let form = FormState::default().with(fields::TOP_TEXT_ALIGNMENT, "top");
        let params = StampParameters::from_source(&form);
        assert_eq!(params.top.alignment, Alignment::AwayFromCenter);
        assert_eq!(params.bottom.alignment, Alignment::TowardCenter);
    }

    #[test]
    fn malformed_numbers_become_nan() {
        let form = FormState::default()
            .with(fields::OUTER_RADIUS, "big")
            .with(fields::INN_TEXT_POSITION, "");
        let params = StampParameters::from_source(&form);
        assert!(params.outer_radius.is_nan());
        assert!(params.tax_id.start_angle.is_nan());
        // fixed positions do not depend on the form
        assert_eq!(params.registration_number.start_angle, 0.0);
    }
}
