//! A surface that paints into a PDF content stream.
//!
//! The stream uses the same y-down pixel grid as every other surface: the
//! first operation flips the PDF coordinate system so `(0, 0)` is the top-left
//! corner of a `width × height` area. Text is set with the TrueType fonts of a
//! [FontBook], two bytes per glyph id, and refers to each font as the resource
//! `/F{index}` where `index` is the font's position in the book. Either take the
//! bare stream with [PdfSurface::finish] and place it yourself, or let
//! [PdfSurface::finish_document] embed the fonts and wrap it in a one-page
//! document measuring one point per pixel.

use pdf_writer::{Content, Filter, Name, Pdf, Ref, Str};

use crate::{Colour, FontBook, FontSpec, Measure, Px, Surface, Transform};

/// Control point distance for approximating a quarter circle with a cubic Bézier
const KAPPA: f32 = 0.552_284_8;

#[derive(Clone, Debug)]
struct PdfState {
    font: FontSpec,
    colour: Colour,
}

/// Paints onto a PDF content stream
pub struct PdfSurface<'a> {
    fonts: &'a FontBook,
    width: Px,
    height: Px,
    line_width: f32,
    content: Content,
    state: PdfState,
    stack: Vec<PdfState>,
}

impl<'a> PdfSurface<'a> {
    /// Start an empty content stream covering a `width × height` pixel area
    pub fn new(fonts: &'a FontBook, width: Px, height: Px) -> PdfSurface<'a> {
        let mut surface = PdfSurface {
            fonts,
            width,
            height,
            line_width: 1.0,
            content: Content::new(),
            state: PdfState {
                font: FontSpec::new("sans-serif", Px(10.0)),
                colour: crate::colours::BLACK,
            },
            stack: Vec::new(),
        };
        surface.begin();
        surface
    }

    /// Set the width of stroked lines, one pixel unless changed
    pub fn set_line_width(&mut self, width: f32) {
        self.line_width = width;
        self.content.set_line_width(width);
    }

    /// The finished content stream
    pub fn finish(self) -> Vec<u8> {
        self.content.finish()
    }

    /// The finished content stream, zlib-compressed for use with `/FlateDecode`
    pub fn finish_compressed(self) -> Vec<u8> {
        miniz_oxide::deflate::compress_to_vec_zlib(
            self.finish().as_slice(),
            miniz_oxide::deflate::CompressionLevel::DefaultCompression as u8,
        )
    }

    /// A complete single-page PDF holding the stamp, with every font of the
    /// book embedded under the resource name the stream refers to it by
    pub fn finish_document(self) -> Vec<u8> {
        let (fonts, width, height) = (self.fonts, self.width, self.height);
        let content = self.finish_compressed();

        let mut pdf = Pdf::new();
        let mut next = Ref::new(1);
        let catalog_id = next.bump();
        let page_tree_id = next.bump();
        let page_id = next.bump();
        let content_id = next.bump();

        let font_refs: Vec<(String, Ref)> = fonts
            .fonts
            .iter()
            .map(|(id, font)| {
                let font_ref = font.write_to_pdf(&mut pdf, &mut next, id.index());
                (format!("F{}", id.index()), font_ref)
            })
            .collect();

        pdf.catalog(catalog_id).pages(page_tree_id);
        pdf.pages(page_tree_id).kids([page_id]).count(1);
        {
            let mut page = pdf.page(page_id);
            page.media_box(pdf_writer::Rect::new(0.0, 0.0, *width, *height));
            page.parent(page_tree_id);
            page.contents(content_id);
            let mut resources = page.resources();
            let mut names = resources.fonts();
            for (name, font_ref) in font_refs.iter() {
                names.pair(Name(name.as_bytes()), *font_ref);
            }
        }
        pdf.stream(content_id, content.as_slice())
            .filter(Filter::FlateDecode);

        pdf.finish()
    }

    fn begin(&mut self) {
        // flip to a y-down grid
        Transform::scale(1.0, -1.0)
            .then(Transform::translate(Px(0.0), self.height))
            .write_to_content(&mut self.content);
        self.content.set_line_width(self.line_width);
        self.write_colour(self.state.colour);
    }

    fn write_colour(&mut self, colour: Colour) {
        match colour {
            Colour::RGB { r, g, b } => {
                self.content.set_fill_rgb(r, g, b);
                self.content.set_stroke_rgb(r, g, b);
            }
            Colour::Grey { g } => {
                self.content.set_fill_gray(g);
                self.content.set_stroke_gray(g);
            }
        }
    }

    fn circle_path(&mut self, cx: Px, cy: Px, radius: Px) -> bool {
        if !radius.is_usable() {
            tracing::warn!(radius = *radius, "skipping circle with degenerate radius");
            return false;
        }

        let (cx, cy, r) = (*cx, *cy, *radius);
        let k = KAPPA * r;
        self.content.move_to(cx + r, cy);
        self.content.cubic_to(cx + r, cy + k, cx + k, cy + r, cx, cy + r);
        self.content.cubic_to(cx - k, cy + r, cx - r, cy + k, cx - r, cy);
        self.content.cubic_to(cx - r, cy - k, cx - k, cy - r, cx, cy - r);
        self.content.cubic_to(cx + k, cy - r, cx + r, cy - k, cx + r, cy);
        self.content.close_path();
        true
    }
}

impl Measure for PdfSurface<'_> {
    fn measure_text(&self, font: &FontSpec, text: &str) -> Px {
        self.fonts.measure_text(font, text)
    }
}

impl Surface for PdfSurface<'_> {
    fn clear_rect(&mut self, x: Px, y: Px, width: Px, height: Px) {
        let covers_all = *x <= 0.0 && *y <= 0.0 && x + width >= self.width && y + height >= self.height;
        if covers_all && self.stack.is_empty() {
            // nothing drawn so far can show through, start the stream over
            self.content = Content::new();
            self.begin();
            return;
        }

        self.content.save_state();
        self.content.set_fill_gray(1.0);
        self.content.rect(*x, *y, *width, *height);
        self.content.fill_nonzero();
        self.content.restore_state();
    }

    fn set_colour(&mut self, colour: Colour) {
        self.state.colour = colour;
        self.write_colour(colour);
    }

    fn stroke_circle(&mut self, cx: Px, cy: Px, radius: Px) {
        if self.circle_path(cx, cy, radius) {
            self.content.stroke();
        }
    }

    fn fill_circle(&mut self, cx: Px, cy: Px, radius: Px) {
        if self.circle_path(cx, cy, radius) {
            self.content.fill_nonzero();
        }
    }

    fn set_font(&mut self, font: &FontSpec) {
        self.state.font = font.clone();
    }

    fn font(&self) -> &FontSpec {
        &self.state.font
    }

    fn fill_text(&mut self, text: &str, x: Px, y: Px) {
        let fonts = self.fonts;
        let spec = &self.state.font;
        let Some((id, font)) = fonts.lookup(spec).and_then(|id| fonts.get(id).map(|f| (id, f))) else {
            tracing::warn!(font = %spec.to_css(), "no font available, skipping text");
            return;
        };

        let size = spec.size;
        let width = font.width_of_text(text, size);
        // centre of the em box on the origin, the baseline sits below it on a y-down grid
        let baseline = (font.ascent(size) + font.descent(size)) / 2.0;

        let glyphs: Vec<u8> = text
            .chars()
            .flat_map(|ch| font.glyph_or_fallback(ch).to_be_bytes())
            .collect();

        self.content.begin_text();
        self.content
            .set_font(Name(format!("F{}", id.index()).as_bytes()), *size);
        // glyphs are flipped back upright against the y-down grid
        self.content
            .set_text_matrix([1.0, 0.0, 0.0, -1.0, *x - *width / 2.0, *y + *baseline]);
        self.content.show(Str(&glyphs));
        self.content.end_text();
    }

    fn save(&mut self) {
        self.stack.push(self.state.clone());
        self.content.save_state();
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
            self.content.restore_state();
        }
    }

    fn translate(&mut self, x: Px, y: Px) {
        Transform::translate(x, y).write_to_content(&mut self.content);
    }

    fn rotate(&mut self, angle: f32) {
        Transform::rotate(angle).write_to_content(&mut self.content);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream(surface: PdfSurface<'_>) -> String {
        String::from_utf8(surface.finish()).expect("content streams are ascii")
    }

    #[test]
    fn starts_with_a_flipped_grid() {
        let fonts = FontBook::default();
        let surface = PdfSurface::new(&fonts, Px(300.0), Px(300.0));
        let content = stream(surface);
        assert!(content.starts_with("1 0 0 -1 0 300 cm"), "{content}");
    }

    #[test]
    fn circles_are_four_curves() {
        let fonts = FontBook::default();
        let mut surface = PdfSurface::new(&fonts, Px(300.0), Px(300.0));
        surface.set_colour(crate::colours::STAMP_BLUE);
        surface.stroke_circle(Px(150.0), Px(150.0), Px(120.0));
        let content = stream(surface);
        assert_eq!(content.lines().filter(|op| op.ends_with(" c")).count(), 4);
        assert!(content.contains("270 150 m"));
        assert!(content.contains("0 0 1 RG"));
        assert!(content.trim_end().ends_with('S'));
    }

    #[test]
    fn degenerate_circles_are_skipped() {
        let fonts = FontBook::default();
        let mut surface = PdfSurface::new(&fonts, Px(300.0), Px(300.0));
        surface.stroke_circle(Px(150.0), Px(150.0), Px(f32::NAN));
        surface.fill_circle(Px(150.0), Px(150.0), Px(-1.0));
        let content = stream(surface);
        assert!(!content.lines().any(|op| op.ends_with(" m")));
    }

    #[test]
    fn text_without_fonts_is_skipped() {
        let fonts = FontBook::default();
        let mut surface = PdfSurface::new(&fonts, Px(300.0), Px(300.0));
        surface.fill_text("*", Px(15.0), Px(150.0));
        assert!(!stream(surface).contains("BT"));
    }

    #[test]
    fn saves_and_restores_are_balanced() {
        let fonts = FontBook::default();
        let mut surface = PdfSurface::new(&fonts, Px(300.0), Px(300.0));
        surface.save();
        surface.translate(Px(150.0), Px(150.0));
        surface.rotate(0.5);
        surface.restore();
        surface.restore();
        let content = stream(surface);
        assert_eq!(content.lines().filter(|op| *op == "q").count(), 1);
        assert_eq!(content.lines().filter(|op| *op == "Q").count(), 1);
    }

    #[test]
    fn full_clears_restart_the_stream() {
        let fonts = FontBook::default();
        let mut surface = PdfSurface::new(&fonts, Px(300.0), Px(300.0));
        surface.stroke_circle(Px(150.0), Px(150.0), Px(120.0));
        surface.clear_rect(Px(0.0), Px(0.0), Px(300.0), Px(300.0));
        let content = stream(surface);
        assert!(!content.lines().any(|op| op.ends_with(" c")));

        let mut surface = PdfSurface::new(&fonts, Px(300.0), Px(300.0));
        surface.clear_rect(Px(10.0), Px(10.0), Px(20.0), Px(20.0));
        assert!(stream(surface).contains("10 10 20 20 re"));
    }

    #[test]
    fn compressed_streams_inflate_back() {
        let fonts = FontBook::default();
        let mut surface = PdfSurface::new(&fonts, Px(300.0), Px(300.0));
        surface.stroke_circle(Px(150.0), Px(150.0), Px(140.0));
        let compressed = surface.finish_compressed();
        let inflated = miniz_oxide::inflate::decompress_to_vec_zlib(&compressed).expect("valid zlib");
        assert!(String::from_utf8_lossy(&inflated).contains("290 150 m"));
    }

    fn dejavu_book() -> FontBook {
        let font = crate::Font::load(include_bytes!("../assets/DejaVuSans.ttf").to_vec())
            .expect("can load font");
        let mut fonts = FontBook::default();
        fonts.add_font_as("Arial", font);
        fonts
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn text_is_set_with_glyph_ids() {
        let fonts = dejavu_book();
        let mut surface = PdfSurface::new(&fonts, Px(300.0), Px(300.0));
        surface.set_font(&FontSpec::new("Arial", Px(12.0)));
        surface.fill_text("ИНН", Px(150.0), Px(150.0));
        let content = stream(surface);

        let ops: Vec<&str> = content.lines().collect();
        let bt = ops.iter().position(|op| *op == "BT").expect("text object opened");
        assert_eq!(ops[bt + 1], "/F0 12 Tf");
        assert!(ops[bt + 2].starts_with("1 0 0 -1 ") && ops[bt + 2].ends_with(" Tm"));
        assert!(ops[bt + 3].ends_with(" Tj"));
        assert_eq!(ops[bt + 4], "ET");
    }

    #[test]
    fn text_is_centred_on_its_anchor() {
        let fonts = dejavu_book();
        let spec = FontSpec::new("Arial", Px(12.0));
        let width = fonts.measure_text(&spec, "ROMASHKA");
        assert!(width > Px(0.0));

        let mut surface = PdfSurface::new(&fonts, Px(300.0), Px(300.0));
        surface.set_font(&spec);
        surface.fill_text("ROMASHKA", Px(150.0), Px(150.0));
        let content = stream(surface);
        let tm = content.lines().find(|op| op.ends_with(" Tm")).expect("text matrix set");
        let x: f32 = tm.split(' ').nth(4).and_then(|x| x.parse().ok()).expect("numeric x");
        assert!((x - (150.0 - *width / 2.0)).abs() < 1e-3);
    }

    #[test]
    fn documents_embed_the_fonts() {
        let fonts = dejavu_book();
        let mut surface = PdfSurface::new(&fonts, Px(300.0), Px(300.0));
        surface.set_font(&FontSpec::new("Arial", Px(12.0)));
        surface.fill_text("ОГРН", Px(150.0), Px(40.0));
        let pdf = surface.finish_document();

        assert!(pdf.starts_with(b"%PDF-"));
        assert!(contains(&pdf, b"/MediaBox [0 0 300 300]"));
        assert!(contains(&pdf, b"/F0 "));
        assert!(contains(&pdf, b"/Identity-H"));
        assert!(contains(&pdf, b"/FontFile2"));
        assert!(contains(&pdf, b"/CIDFontType2"));
    }
}
