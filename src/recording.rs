use crate::{Colour, FontSpec, Measure, Px, Surface, Transform};

/// A single painting operation captured by a [RecordingSurface]. All
/// coordinates are already resolved to surface space
#[derive(Clone, PartialEq, Debug)]
pub enum DrawCommand {
    Clear {
        x: Px,
        y: Px,
        width: Px,
        height: Px,
    },
    Colour(Colour),
    StrokeCircle {
        cx: Px,
        cy: Px,
        radius: Px,
    },
    FillCircle {
        cx: Px,
        cy: Px,
        radius: Px,
    },
    Font(FontSpec),
    Text {
        text: String,
        /// Where the centre of the text lands on the surface
        position: (Px, Px),
        /// Rotation of the text's baseline, radians clockwise
        rotation: f32,
        /// The complete transform in effect when the text was painted
        transform: Transform,
    },
}

#[derive(Clone, Debug)]
struct SurfaceState {
    transform: Transform,
    font: FontSpec,
    colour: Colour,
}

/// A surface which paints nothing, recording every operation instead. Text is
/// measured with whichever [Measure] implementation it wraps.
///
/// ```
/// use stamp_gen::{RecordingSurface, FixedMetrics, Surface, DrawCommand, Px};
///
/// let mut surface = RecordingSurface::new(FixedMetrics::default());
/// surface.translate(Px(150.0), Px(150.0));
/// surface.fill_text("*", Px(0.0), Px(0.0));
///
/// let Some(DrawCommand::Text { position, .. }) = surface.commands().last() else {
///     panic!("text was recorded");
/// };
/// assert_eq!(*position, (Px(150.0), Px(150.0)));
/// ```
pub struct RecordingSurface<M: Measure> {
    metrics: M,
    state: SurfaceState,
    stack: Vec<SurfaceState>,
    commands: Vec<DrawCommand>,
}

impl<M: Measure> RecordingSurface<M> {
    pub fn new(metrics: M) -> RecordingSurface<M> {
        RecordingSurface {
            metrics,
            state: SurfaceState {
                transform: Transform::identity(),
                font: FontSpec::new("sans-serif", Px(10.0)),
                colour: crate::colours::BLACK,
            },
            stack: Vec::new(),
            commands: Vec::new(),
        }
    }

    /// Every operation recorded so far, oldest first
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take the recorded operations, leaving the log empty
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// The strings painted so far, in order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// How many saves are still waiting for a matching restore
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn transform(&self) -> Transform {
        self.state.transform
    }

    pub fn colour(&self) -> Colour {
        self.state.colour
    }
}

impl<M: Measure> Measure for RecordingSurface<M> {
    fn measure_text(&self, font: &FontSpec, text: &str) -> Px {
        self.metrics.measure_text(font, text)
    }
}

impl<M: Measure> Surface for RecordingSurface<M> {
    fn clear_rect(&mut self, x: Px, y: Px, width: Px, height: Px) {
        // each clear starts a new frame
        self.commands.clear();
        self.commands.push(DrawCommand::Clear {
            x,
            y,
            width,
            height,
        });
    }

    fn set_colour(&mut self, colour: Colour) {
        self.state.colour = colour;
        self.commands.push(DrawCommand::Colour(colour));
    }

    fn stroke_circle(&mut self, cx: Px, cy: Px, radius: Px) {
        let (cx, cy) = self.state.transform.apply(cx, cy);
        self.commands.push(DrawCommand::StrokeCircle { cx, cy, radius });
    }

    fn fill_circle(&mut self, cx: Px, cy: Px, radius: Px) {
        let (cx, cy) = self.state.transform.apply(cx, cy);
        self.commands.push(DrawCommand::FillCircle { cx, cy, radius });
    }

    fn set_font(&mut self, font: &FontSpec) {
        self.state.font = font.clone();
        self.commands.push(DrawCommand::Font(font.clone()));
    }

    fn font(&self) -> &FontSpec {
        &self.state.font
    }

    fn fill_text(&mut self, text: &str, x: Px, y: Px) {
        let transform = self.state.transform.pre_translate(x, y);
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            position: transform.apply(Px(0.0), Px(0.0)),
            rotation: transform.rotation(),
            transform,
        });
    }

    fn save(&mut self) {
        self.stack.push(self.state.clone());
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn translate(&mut self, x: Px, y: Px) {
        self.state.transform = self.state.transform.pre_translate(x, y);
    }

    fn rotate(&mut self, angle: f32) {
        self.state.transform = self.state.transform.pre_rotate(angle);
    }
}
