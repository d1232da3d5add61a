use crate::{Measure, Px, StampError};
use id_arena::{Arena, Id};
use owned_ttf_parser::{AsFaceRef, GlyphId, OwnedFace};
use pdf_writer::types::{CidFontType, FontFlags, SystemInfo};
use pdf_writer::{Filter, Name, Pdf, Ref, Str};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::BTreeSet;

/// Describes the font a piece of text is set in: a family name, a size, and
/// whether the bold weight is wanted. This is what surfaces are asked to
/// switch to before measuring or painting, much like a CSS `font` shorthand
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct FontSpec {
    pub family: String,
    pub size: Px,
    #[serde(default)]
    pub bold: bool,
}

impl FontSpec {
    /// A regular-weight font of the given family and size
    pub fn new<S: Into<String>>(family: S, size: Px) -> FontSpec {
        FontSpec {
            family: family.into(),
            size,
            bold: false,
        }
    }

    /// The same font in its bold weight
    pub fn bold(self) -> FontSpec {
        FontSpec { bold: true, ..self }
    }

    /// The same font at a different size
    pub fn with_size(&self, size: Px) -> FontSpec {
        FontSpec {
            family: self.family.clone(),
            size,
            bold: self.bold,
        }
    }

    /// The CSS font shorthand for this font, i.e. `bold 30px Arial`
    pub fn to_css(&self) -> String {
        if self.bold {
            format!("bold {}px {}", *self.size, self.family)
        } else {
            format!("{}px {}", *self.size, self.family)
        }
    }
}

/// A parsed TrueType or OpenType font, used to measure (and, for the PDF
/// surface, to encode) text. Only the horizontal advances of the glyphs are
/// used: no kerning or shaping is applied, which is enough for Latin and
/// Cyrillic capitals
pub struct Font {
    pub face: OwnedFace,
}

impl Font {
    /// Load a font from raw bytes, parsing the font and returning an error if the font
    /// could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, StampError> {
        let face = OwnedFace::from_vec(bytes, 0)?;

        Ok(Font { face })
    }

    /// Obtain the full name of the font, if it has one
    pub fn name(&self) -> Option<String> {
        self.face
            .as_face_ref()
            .names()
            .into_iter()
            .find(|name| name.name_id == owned_ttf_parser::name_id::FULL_NAME && name.is_unicode())
            .and_then(|name| name.to_string())
    }

    /// Obtain the family name of the font, if it has one
    pub fn family(&self) -> Option<String> {
        self.face
            .as_face_ref()
            .names()
            .into_iter()
            .find(|name| name.name_id == owned_ttf_parser::name_id::FAMILY && name.is_unicode())
            .and_then(|name| name.to_string())
    }

    /// Calculate the ascent (distance from the baseline to the top of the font) for the given font size
    pub fn ascent(&self, size: Px) -> Px {
        let scaling = *size / self.face.as_face_ref().units_per_em() as f32;
        Px(scaling * self.face.as_face_ref().ascender() as f32)
    }

    /// Calculate the descent (distance from the baseline to the bottom of the font) for the given font size.
    /// Note: this is usually negative
    pub fn descent(&self, size: Px) -> Px {
        let scaling = *size / self.face.as_face_ref().units_per_em() as f32;
        Px(scaling * self.face.as_face_ref().descender() as f32)
    }

    /// Obtain the weight of the font. Numerical values generally map as follows:
    ///
    /// * 100: Thin (Hairline)
    /// * 400: Normal
    /// * 700: Bold
    /// * 900: Black (Heavy)
    pub fn weight(&self) -> u16 {
        self.face.as_face_ref().weight().to_number()
    }

    /// Whether this face is one of the bold weights (semi bold and heavier)
    pub fn is_bold(&self) -> bool {
        self.weight() >= 600
    }

    pub fn glyph_id(&self, ch: char) -> Option<u16> {
        self.face.as_face_ref().glyph_index(ch).map(|i| i.0)
    }

    pub fn replacement_glyph_id(&self) -> Option<u16> {
        self.face.as_face_ref().glyph_index('\u{FFFD}').map(|i| i.0)
    }

    /// The glyph used to draw `ch`: its own glyph if the font has one, otherwise
    /// the replacement character, otherwise a question mark, otherwise `.notdef`
    pub fn glyph_or_fallback(&self, ch: char) -> u16 {
        self.glyph_id(ch)
            .or_else(|| self.replacement_glyph_id())
            .or_else(|| self.glyph_id('?'))
            .unwrap_or(0)
    }

    /// Calculate the width of a given string of text at the given font size
    pub fn width_of_text(&self, text: &str, size: Px) -> Px {
        let scaling = *size / self.face.as_face_ref().units_per_em() as f32;
        text.chars()
            .map(|ch| self.glyph_or_fallback(ch))
            .map(|gid| {
                Px(scaling
                    * self
                        .face
                        .as_face_ref()
                        .glyph_hor_advance(GlyphId(gid))
                        .unwrap_or_default() as f32)
            })
            .sum()
    }

    /// Embed the whole font as a composite font whose character codes are
    /// two-byte glyph ids, the encoding [PdfSurface](crate::PdfSurface) writes.
    /// Objects are allocated from `next`; the returned reference is the font
    /// dictionary to list in a page's resources
    pub(crate) fn write_to_pdf(&self, pdf: &mut Pdf, next: &mut Ref, index: usize) -> Ref {
        let face = self.face.as_face_ref();
        let scaling = 1000.0 / face.units_per_em() as f32;
        let base_name = self
            .name()
            .unwrap_or_else(|| format!("F{index}"))
            .replace(' ', "");
        let base_name = Name(base_name.as_bytes());

        let font_id = next.bump();
        let cid_font_id = next.bump();
        let descriptor_id = next.bump();
        let data_id = next.bump();

        let data = miniz_oxide::deflate::compress_to_vec_zlib(
            self.face.as_slice(),
            miniz_oxide::deflate::CompressionLevel::DefaultCompression as u8,
        );
        pdf.stream(data_id, data.as_slice())
            .filter(Filter::FlateDecode)
            .pair(Name(b"Length1"), self.face.as_slice().len() as i32);

        {
            let mut flags = FontFlags::empty();
            if face.is_monospaced() {
                flags.set(FontFlags::FIXED_PITCH, true);
            }
            if face.is_italic() {
                flags.set(FontFlags::ITALIC, true);
            }

            let bbox = face.global_bounding_box();
            let mut descriptor = pdf.font_descriptor(descriptor_id);
            descriptor.name(base_name);
            descriptor.flags(flags);
            descriptor.bbox(pdf_writer::Rect::new(
                bbox.x_min as f32 * scaling,
                bbox.y_min as f32 * scaling,
                bbox.x_max as f32 * scaling,
                bbox.y_max as f32 * scaling,
            ));
            descriptor.italic_angle(face.italic_angle());
            descriptor.ascent(face.ascender() as f32 * scaling);
            descriptor.descent(face.descender() as f32 * scaling);
            descriptor.cap_height(
                face.capital_height()
                    .map(|h| h as f32 * scaling)
                    .unwrap_or(1000.0),
            );
            // no reliable source for this in the font tables
            descriptor.stem_v(80.0);
            descriptor.font_file2(data_id);
        }

        {
            let mut cid_font = pdf.cid_font(cid_font_id);
            cid_font.subtype(CidFontType::Type2);
            cid_font.base_font(base_name);
            cid_font.system_info(SystemInfo {
                registry: Str(b"Adobe"),
                ordering: Str(b"Identity"),
                supplement: 0,
            });
            cid_font.font_descriptor(descriptor_id);
            cid_font.default_width(1000.0);
            cid_font.widths().consecutive(
                0,
                (0..face.number_of_glyphs())
                    .map(|gid| face.glyph_hor_advance(GlyphId(gid)).unwrap_or_default() as f32 * scaling),
            );
            cid_font.cid_to_gid_map_predefined(Name(b"Identity"));
        }

        let mut font = pdf.type0_font(font_id);
        font.base_font(base_name);
        font.encoding_predefined(Name(b"Identity-H"));
        font.descendant_font(cid_font_id);

        font_id
    }
}

/// The collection of fonts available to a surface. Fonts are registered once
/// and then looked up by [FontSpec], matching on family name (case
/// insensitively) and weight.
///
/// Typically, fonts are referred to by their [Id] within the book, which stays
/// valid for as long as the book lives
#[derive(Default)]
pub struct FontBook {
    pub fonts: Arena<Font>,
    families: Vec<(String, bool, Id<Font>)>,
    /// Requested families that had to be substituted
    missing: RefCell<BTreeSet<String>>,
}

impl FontBook {
    /// Register a font under its own family name, returning its id
    pub fn add_font(&mut self, font: Font) -> Result<Id<Font>, StampError> {
        let family = font.family().ok_or(StampError::MissingFontName("family"))?;
        Ok(self.add_font_as(family, font))
    }

    /// Register a font under an explicit family name, for example to make a
    /// bundled face answer to `Arial`
    pub fn add_font_as<S: Into<String>>(&mut self, family: S, font: Font) -> Id<Font> {
        let bold = font.is_bold();
        let id = self.fonts.alloc(font);
        self.families.push((family.into().to_lowercase(), bold, id));
        id
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    /// Find the font best matching a spec: the exact family and weight, then
    /// any weight of the family, then whichever font was registered first
    pub fn lookup(&self, spec: &FontSpec) -> Option<Id<Font>> {
        let family = spec.family.to_lowercase();
        let found = self
            .families
            .iter()
            .find(|(f, bold, _)| *f == family && *bold == spec.bold)
            .or_else(|| self.families.iter().find(|(f, _, _)| *f == family))
            .map(|&(_, _, id)| id);

        // measuring runs glyph by glyph, so only the first miss is worth a warning
        if found.is_none() && self.missing.borrow_mut().insert(family) {
            tracing::warn!(family = %spec.family, "no font registered for family, falling back");
        }

        found.or_else(|| self.families.first().map(|&(_, _, id)| id))
    }

    pub fn get(&self, id: Id<Font>) -> Option<&Font> {
        self.fonts.get(id)
    }

    /// The families (lower-cased) that were asked for but not registered
    pub fn missing_families(&self) -> Vec<String> {
        self.missing.borrow().iter().cloned().collect()
    }
}

impl Measure for FontBook {
    fn measure_text(&self, font: &FontSpec, text: &str) -> Px {
        self.lookup(font)
            .and_then(|id| self.fonts.get(id))
            .map(|f| f.width_of_text(text, font.size))
            .unwrap_or_default()
    }
}
