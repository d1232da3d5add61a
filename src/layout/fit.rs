use serde::{Deserialize, Serialize};

use crate::{FontSpec, Measure, Px, Rect, StampError, Surface};

/// Padding kept clear inside a [FitBox] unless specified otherwise
pub const DEFAULT_PADDING: Px = Px(10.0);

/// The box a block of text is fitted into
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FitBox {
    pub bounds: Rect,
    /// Space kept clear on every side of the text
    pub padding: Px,
}

impl FitBox {
    /// A box of the given size centred on a point, with the default padding
    pub fn centered(center: (Px, Px), max_width: Px, max_height: Px) -> FitBox {
        FitBox {
            bounds: Rect::centered(center, max_width, max_height),
            padding: DEFAULT_PADDING,
        }
    }

    pub fn with_padding(self, padding: Px) -> FitBox {
        FitBox { padding, ..self }
    }

    /// The area text has to fit in: the bounds less the padding
    pub fn content(&self) -> Rect {
        self.bounds.inset(self.padding)
    }
}

/// Bounds every [SizeRange] has to stay within
pub const FONT_SIZE_LIMITS: (Px, Px) = (Px(1.0), Px(1000.0));

/// The font sizes tried when fitting, largest first, in steps of one pixel
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeRange {
    pub largest: Px,
    pub smallest: Px,
}

impl SizeRange {
    /// Check that the range is non-empty and within [FONT_SIZE_LIMITS]
    pub fn validate(self) -> Result<SizeRange, StampError> {
        let (min, max) = FONT_SIZE_LIMITS;
        // NaN fails every comparison
        let usable = self.smallest >= min && self.largest <= max && self.smallest <= self.largest;
        if usable {
            Ok(self)
        } else {
            Err(StampError::InvalidSizeRange {
                largest: *self.largest,
                smallest: *self.smallest,
            })
        }
    }
}

impl Default for SizeRange {
    fn default() -> Self {
        SizeRange {
            largest: Px(30.0),
            smallest: Px(10.0),
        }
    }
}

/// One line of fitted text
#[derive(Debug, Clone, PartialEq)]
pub struct FittedLine {
    pub text: String,
    /// Vertical offset of the line's middle from the centre of the box
    pub y_offset: Px,
}

/// The outcome of fitting a phrase into a box
#[derive(Debug, Clone, PartialEq)]
pub struct FittedText {
    /// The font the lines were fitted in, at the chosen size
    pub font: FontSpec,
    pub lines: Vec<FittedLine>,
    /// True when the smallest size was used without the text fitting
    pub overflowing: bool,
}

impl FittedText {
    pub fn size(&self) -> Px {
        self.font.size
    }

    /// Height of the block of lines, one font size per line
    pub fn block_height(&self) -> Px {
        self.font.size * self.lines.len() as f32
    }
}

/// Greedily break `text` into lines no wider than `max_width`. Words are split
/// on any run of whitespace; a word joins the current line (after a single
/// space) when the result measures strictly narrower than `max_width`,
/// otherwise it starts a new line. A single word wider than `max_width` still
/// gets a line of its own.
pub fn wrap_words<M: Measure + ?Sized>(measure: &M, font: &FontSpec, text: &str, max_width: Px) -> Vec<String> {
    let mut words = text.split_whitespace();
    let mut lines: Vec<String> = Vec::new();
    let mut current: String = match words.next() {
        Some(word) => word.to_string(),
        None => return lines,
    };

    for word in words {
        let candidate = format!("{current} {word}");
        if measure.measure_text(font, &candidate) < max_width {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }
    lines.push(current);

    lines
}

/// Find the largest font size in `sizes` at which `text` fits inside `bbox`,
/// wrapping it into lines as needed, without painting anything.
///
/// A size is accepted when the lines stacked one font size apart are no taller
/// than the box's content height and the first line is no wider than its
/// content width. Only the first line is checked: later lines may come out
/// wider than the box. When nothing fits, the smallest size is used anyway and
/// the result is marked as [overflowing](FittedText::overflowing). A range
/// that fails [SizeRange::validate] is replaced by the default one.
///
/// ```
/// use stamp_gen::layout::{fit_text, FitBox, SizeRange};
/// use stamp_gen::{FixedMetrics, FontSpec, Px};
///
/// let bbox = FitBox::centered((Px(150.0), Px(150.0)), Px(220.0), Px(220.0));
/// let fitted = fit_text(
///     &FixedMetrics::default(),
///     &FontSpec::new("Arial", Px(30.0)).bold(),
///     "ROMASHKA",
///     &bbox,
///     SizeRange::default(),
/// );
/// assert_eq!(fitted.lines.len(), 1);
/// assert!(fitted.size() <= Px(30.0));
/// ```
pub fn fit_text<M: Measure + ?Sized>(
    measure: &M,
    font: &FontSpec,
    text: &str,
    bbox: &FitBox,
    sizes: SizeRange,
) -> FittedText {
    let content = bbox.content();
    let max_width = content.width();
    let max_height = content.height();

    let sizes = match sizes.validate() {
        Ok(sizes) => sizes,
        Err(err) => {
            tracing::warn!(%err, "unusable size range, using the default");
            SizeRange::default()
        }
    };

    let attempt = |size: f32| {
        let candidate = font.with_size(Px(size));
        let lines = wrap_words(measure, &candidate, text, max_width);

        let height = Px(lines.len() as f32 * size);
        let first_width = lines
            .first()
            .map(|line| measure.measure_text(&candidate, line))
            .unwrap_or_default();

        let fits = height <= max_height && first_width <= max_width;
        (lines, fits)
    };

    let steps = (*sizes.largest - *sizes.smallest).ceil() as u32;
    let mut size = *sizes.largest;
    let (mut lines, mut fits) = attempt(size);
    for step in 1..=steps {
        if fits {
            break;
        }
        size = (*sizes.largest - step as f32).max(*sizes.smallest);
        (lines, fits) = attempt(size);
    }
    let overflowing = !fits;

    let start = -(lines.len().saturating_sub(1) as f32) * size / 2.0;
    let lines: Vec<FittedLine> = lines
        .into_iter()
        .enumerate()
        .map(|(i, text)| FittedLine {
            text,
            y_offset: Px(start + i as f32 * size),
        })
        .collect();

    tracing::debug!(size, lines = lines.len(), overflowing, "fitted text into box");

    FittedText {
        font: font.with_size(Px(size)),
        lines,
        overflowing,
    }
}

/// Paint previously fitted lines, each centred horizontally on the box
pub fn draw_fitted_text<S: Surface + ?Sized>(surface: &mut S, fitted: &FittedText, bbox: &FitBox) {
    let (cx, cy) = bbox.bounds.center();

    surface.save();
    surface.set_font(&fitted.font);
    for line in fitted.lines.iter() {
        surface.fill_text(&line.text, cx, cy + line.y_offset);
    }
    surface.restore();
}

/// Fit `text` into `bbox` and paint it, returning the fitted layout
pub fn draw_text_in_box<S: Surface + ?Sized>(
    surface: &mut S,
    font: &FontSpec,
    text: &str,
    bbox: &FitBox,
    sizes: SizeRange,
) -> FittedText {
    let fitted = fit_text(&*surface, font, text, bbox, sizes);
    draw_fitted_text(surface, &fitted, bbox);
    fitted
}
