use stamp_gen::form::fields;
use stamp_gen::{compose_stamp, Font, FontBook, FormState, PdfSurface, StampLayout, StampParameters};

fn main() {
    // load a font that covers both latin and cyrillic text
    let dejavu = include_bytes!("../assets/DejaVuSans.ttf");
    let dejavu = Font::load(dejavu.to_vec()).expect("can load font");

    // the default layout asks for Arial, so register the font under that family
    let mut fonts = FontBook::default();
    fonts.add_font_as("Arial", dejavu);

    // start from the form's initial values and change the company name
    let form = FormState::default().with(fields::CENTER_TEXT, "ООО «Ромашка»");
    let params = StampParameters::from_source(&form);

    // paint the stamp onto a page the size of the canvas
    let layout = StampLayout::default();
    let mut surface = PdfSurface::new(&fonts, layout.canvas_width, layout.canvas_height);
    compose_stamp(&mut surface, &params, &layout);

    // wrap the content stream in a one-page document and save it to disk
    let pdf = surface.finish_document();
    std::fs::write("stamp.pdf", pdf).unwrap();
}
