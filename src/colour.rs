use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A colour, expressed in RGB or greyscale colour spaces
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Colour {
    /// RGB colour; r, g, b, range from 0.0 to 1.0
    RGB { r: f32, g: f32, b: f32 },
    /// Grey colour; g ranges from 0.0 to 1.0
    Grey { g: f32 },
}

impl Colour {
    /// Create a new colour in the RGB space. r, g, and b range from 0.0 to 1.0
    pub fn new_rgb(r: f32, g: f32, b: f32) -> Colour {
        Colour::RGB { r, g, b }
    }

    /// Create a new colour in the RGB space. r, g, and b range from 0 to 255
    pub fn new_rgb_bytes(r: u8, g: u8, b: u8) -> Colour {
        Colour::RGB {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Create a new colour in the Gray space, g ranges from 0.0 to 1.0
    pub fn new_grey(g: f32) -> Colour {
        Colour::Grey { g }
    }

    /// Parse a CSS-style hex colour: `#rgb` or `#rrggbb`, the leading `#` optional.
    /// Returns [None] for anything else
    pub fn from_hex(hex: &str) -> Option<Colour> {
        let hex = hex.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }
        let byte = |s: &str| u8::from_str_radix(s, 16).ok();
        match hex.len() {
            3 => {
                // expand each nibble, #0af == #00aaff
                let mut it = hex.chars().map(|c| c.to_digit(16).map(|d| (d * 17) as u8));
                Some(Colour::new_rgb_bytes(it.next()??, it.next()??, it.next()??))
            }
            6 => Some(Colour::new_rgb_bytes(
                byte(&hex[0..2])?,
                byte(&hex[2..4])?,
                byte(&hex[4..6])?,
            )),
            _ => None,
        }
    }

    /// The colour as `(r, g, b)` bytes
    pub fn to_rgb_bytes(self) -> (u8, u8, u8) {
        let to_byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        match self {
            Colour::RGB { r, g, b } => (to_byte(r), to_byte(g), to_byte(b)),
            Colour::Grey { g } => (to_byte(g), to_byte(g), to_byte(g)),
        }
    }

    /// The colour as a CSS hex string, i.e. `#0000ff`
    pub fn to_hex(self) -> String {
        let (r, g, b) = self.to_rgb_bytes();
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

// colours travel through layout files as hex strings
impl Serialize for Colour {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Colour {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Colour::from_hex(&hex)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid hex colour `{hex}`")))
    }
}

/// A list of pre-defined colour constants
pub mod colours {
    use super::*;

    pub const BLACK: Colour = Colour::Grey { g: 0.0 };
    pub const WHITE: Colour = Colour::Grey { g: 1.0 };
    /// The ink colour of a freshly pressed seal, `#0000FF`
    pub const STAMP_BLUE: Colour = Colour::RGB {
        r: 0.0,
        g: 0.0,
        b: 1.0,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_and_short_hex() {
        assert_eq!(Colour::from_hex("#0000FF"), Some(colours::STAMP_BLUE));
        assert_eq!(Colour::from_hex("00f"), Some(colours::STAMP_BLUE));
        assert_eq!(Colour::from_hex("#fff").map(Colour::to_hex), Some("#ffffff".to_string()));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(Colour::from_hex("blue"), None);
        assert_eq!(Colour::from_hex("#12345"), None);
        assert_eq!(Colour::from_hex("#ggg"), None);
        assert_eq!(Colour::from_hex("#ффф"), None);
    }

    #[test]
    fn grey_renders_as_equal_channels() {
        assert_eq!(colours::BLACK.to_hex(), "#000000");
        assert_eq!(Colour::new_grey(1.0).to_rgb_bytes(), (255, 255, 255));
    }

    #[test]
    fn round_trips_through_json() {
        let json = serde_json::to_string(&colours::STAMP_BLUE).expect("can serialize");
        assert_eq!(json, "\"#0000ff\"");
        let back: Colour = serde_json::from_str(&json).expect("can deserialize");
        assert_eq!(back, colours::STAMP_BLUE);
    }
}
