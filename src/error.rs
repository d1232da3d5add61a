use thiserror::Error;

/// All errors that the crate can generate. Rendering a stamp never fails;
/// these only arise when loading fonts or decoding configuration
#[derive(Error, Debug)]
pub enum StampError {
    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsingError(#[from] owned_ttf_parser::FaceParsingError),

    #[error(transparent)]
    /// A layout or form-state document was not valid JSON for its type
    Json(#[from] serde_json::Error),

    #[error("font face has no {0} name")]
    /// The font is missing a name record required to register it
    MissingFontName(&'static str),

    #[error("font size range {largest}..{smallest} is empty or outside 1..=1000px")]
    /// A fitting size range was empty, out of bounds or not a number
    InvalidSizeRange { largest: f32, smallest: f32 },
}
