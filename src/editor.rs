use std::collections::BTreeMap;

use crate::form::SLIDERS;
use crate::{compose_stamp, FormState, RenderedStamp, StampLayout, StampParameters, Surface};

/// Drives a live stamp preview: it owns the form state and the surface, and
/// re-renders the whole stamp whenever an input changes.
///
/// ```
/// use stamp_gen::{FixedMetrics, FormState, RecordingSurface, StampEditor, StampLayout};
/// use stamp_gen::form::fields;
///
/// let surface = RecordingSurface::new(FixedMetrics::default());
/// let mut editor = StampEditor::new(surface, FormState::default(), StampLayout::default());
/// editor.init();
///
/// editor.on_input(fields::INN_TEXT_POSITION, "90");
/// assert_eq!(editor.label(fields::INN_TEXT_POSITION), Some("90°"));
/// ```
pub struct StampEditor<S: Surface> {
    surface: S,
    form: FormState,
    layout: StampLayout,
    /// Slider value labels, present once [init](StampEditor::init) has run
    labels: BTreeMap<&'static str, String>,
    last: Option<RenderedStamp>,
}

impl<S: Surface> StampEditor<S> {
    pub fn new(surface: S, form: FormState, layout: StampLayout) -> StampEditor<S> {
        StampEditor {
            surface,
            form,
            layout,
            labels: BTreeMap::new(),
            last: None,
        }
    }

    /// Bind a value label to every slider and paint the first stamp. Until
    /// this is called, input changes are stored but nothing is rendered
    pub fn init(&mut self) {
        for &(name, _) in SLIDERS {
            if let Some(label) = self.form.slider_label(name) {
                self.labels.insert(name, label);
            }
        }
        self.update_stamp();
    }

    pub fn is_initialized(&self) -> bool {
        !self.labels.is_empty()
    }

    /// Re-render the stamp from the current form state
    pub fn update_stamp(&mut self) {
        let params = StampParameters::from_source(&self.form);
        let rendered = compose_stamp(&mut self.surface, &params, &self.layout);
        self.last = Some(rendered);
    }

    /// Handle a change to one form input: store the value, refresh the
    /// slider's label, and re-render
    pub fn on_input(&mut self, name: &str, value: &str) {
        self.form.set(name, value);
        if !self.is_initialized() {
            return;
        }

        if let (Some(label), Some(text)) = (self.labels.get_mut(name), self.form.slider_label(name)) {
            *label = text;
        }
        self.update_stamp();
    }

    /// The label currently shown next to a slider
    pub fn label(&self, name: &str) -> Option<&str> {
        self.labels.get(name).map(String::as_str)
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn layout(&self) -> &StampLayout {
        &self.layout
    }

    /// Swap in a new layout and re-render if the editor is live
    pub fn set_layout(&mut self, layout: StampLayout) {
        self.layout = layout;
        if self.is_initialized() {
            self.update_stamp();
        }
    }

    /// What the most recent render laid out
    pub fn last_render(&self) -> Option<&RenderedStamp> {
        self.last.as_ref()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }
}
