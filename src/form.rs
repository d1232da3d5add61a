//! The stamp form, seen as a flat source of named values.
//!
//! The form itself (its sliders, text inputs and drop-downs) lives outside this
//! crate. All the stamp needs from it is the current value of each named input,
//! as the string the input would report.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::StampError;

/// Names of the inputs a stamp is rendered from
pub mod fields {
    pub const OUTER_RADIUS: &str = "outerRadius";
    pub const TOP_TEXT_SPACING: &str = "topTextSpacing";
    pub const CENTER_TEXT_SPACING: &str = "centerTextSpacing";
    pub const BOTTOM_TEXT_SPACING: &str = "bottomTextSpacing";
    pub const BOTTOM_TEXT_POSITION: &str = "bottomTextPosition";
    pub const INN_TEXT_SPACING: &str = "innTextSpacing";
    pub const INN_TEXT_POSITION: &str = "innTextPosition";
    pub const OGRN_TEXT_SPACING: &str = "ogrnTextSpacing";

    pub const TOP_TEXT: &str = "topText";
    pub const CENTER_TEXT: &str = "centerText";
    pub const BOTTOM_TEXT: &str = "bottomText";
    pub const INN_TEXT: &str = "innText";
    pub const OGRN_TEXT: &str = "ogrnText";

    pub const TOP_TEXT_ALIGNMENT: &str = "topTextAlignment";
    pub const BOTTOM_TEXT_ALIGNMENT: &str = "bottomTextAlignment";
    pub const INN_TEXT_ALIGNMENT: &str = "innTextAlignment";
    pub const OGRN_TEXT_ALIGNMENT: &str = "ogrnTextAlignment";
}

/// Every slider on the form, with the unit suffix shown next to its value
pub const SLIDERS: &[(&str, &str)] = &[
    (fields::OUTER_RADIUS, ""),
    (fields::TOP_TEXT_SPACING, ""),
    (fields::CENTER_TEXT_SPACING, ""),
    (fields::BOTTOM_TEXT_SPACING, ""),
    (fields::BOTTOM_TEXT_POSITION, "°"),
    (fields::INN_TEXT_SPACING, ""),
    (fields::INN_TEXT_POSITION, "°"),
    (fields::OGRN_TEXT_SPACING, ""),
];

/// The suffix of a slider's value label, or [None] if `name` is not a slider
pub fn slider_suffix(name: &str) -> Option<&'static str> {
    SLIDERS
        .iter()
        .find(|(slider, _)| *slider == name)
        .map(|&(_, suffix)| suffix)
}

/// Anything that can report the current value of a named form input
pub trait ParameterSource {
    fn value(&self, name: &str) -> Option<&str>;

    /// A text input's value, empty when the input is missing
    fn text(&self, name: &str) -> &str {
        self.value(name).unwrap_or_default()
    }

    /// A numeric input's value, parsed leniently. Missing or malformed values
    /// come back as NaN rather than an error
    fn number(&self, name: &str) -> f32 {
        self.value(name).map(parse_number).unwrap_or(f32::NAN)
    }
}

impl ParameterSource for BTreeMap<String, String> {
    fn value(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl ParameterSource for std::collections::HashMap<String, String> {
    fn value(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

/// Parse the longest numeric prefix of a string the way browsers read slider
/// values: leading whitespace is skipped, trailing junk ignored (`"12px"` is
/// 12), and anything without a leading number is NaN
pub fn parse_number(value: &str) -> f32 {
    let value = value.trim_start();
    let end = value
        .char_indices()
        .find(|&(_, c)| !(c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E')))
        .map(|(i, _)| i)
        .unwrap_or(value.len());

    // back off one character at a time until the prefix parses, e.g. "1e" or "3-"
    (1..=end)
        .rev()
        .find_map(|len| value[..len].parse::<f32>().ok())
        .unwrap_or(f32::NAN)
}

/// The state of the stamp form: every input's current value by name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormState {
    values: BTreeMap<String, String>,
}

impl Default for FormState {
    /// The form as it is first shown: a sample organisation on a 140px stamp
    fn default() -> Self {
        let values = [
            (fields::OUTER_RADIUS, "140"),
            (fields::TOP_TEXT_SPACING, "2"),
            (fields::CENTER_TEXT_SPACING, "0"),
            (fields::BOTTOM_TEXT_SPACING, "2"),
            (fields::BOTTOM_TEXT_POSITION, "180"),
            (fields::INN_TEXT_SPACING, "1"),
            (fields::INN_TEXT_POSITION, "180"),
            (fields::OGRN_TEXT_SPACING, "1"),
            (fields::TOP_TEXT, "Общество с ограниченной ответственностью"),
            (fields::CENTER_TEXT, "Ромашка"),
            (fields::BOTTOM_TEXT, "г. Москва"),
            (fields::INN_TEXT, "7701234567"),
            (fields::OGRN_TEXT, "1027700132195"),
            (fields::TOP_TEXT_ALIGNMENT, "bottom"),
            (fields::BOTTOM_TEXT_ALIGNMENT, "bottom"),
            (fields::INN_TEXT_ALIGNMENT, "bottom"),
            (fields::OGRN_TEXT_ALIGNMENT, "bottom"),
        ];

        FormState {
            values: values
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl FormState {
    /// A form with no inputs at all
    pub fn empty() -> FormState {
        FormState {
            values: BTreeMap::new(),
        }
    }

    /// Read a form state from a JSON object of input name to value
    pub fn from_json(json: &str) -> Result<FormState, StampError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Update one input, returning its previous value
    pub fn set<K: Into<String>, V: Into<String>>(&mut self, name: K, value: V) -> Option<String> {
        self.values.insert(name.into(), value.into())
    }

    pub fn with<K: Into<String>, V: Into<String>>(mut self, name: K, value: V) -> FormState {
        self.set(name, value);
        self
    }

    /// The text shown next to a slider: its raw value followed by its unit
    pub fn slider_label(&self, name: &str) -> Option<String> {
        let suffix = slider_suffix(name)?;
        Some(format!("{}{suffix}", self.text(name)))
    }
}

impl ParameterSource for FormState {
    fn value(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
}
