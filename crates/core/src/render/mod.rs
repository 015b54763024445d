use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

/// Drawing backend. The core calls [`Renderer::render`] after every mutation
/// that changes what is on screen; the renderer reads nothing back from it.
pub trait Renderer {
    fn render(&mut self);
}

/// Renderer handle shared between the collections and the zoom controller.
pub type SharedRenderer = Rc<RefCell<dyn Renderer>>;

/// Wraps a renderer so it can be shared by the viewer's components.
pub fn shared<R: Renderer + 'static>(renderer: R) -> SharedRenderer {
    Rc::new(RefCell::new(renderer))
}

/// Renderer that only counts how often it was asked to draw. Useful for
/// headless hosts and tests.
#[derive(Debug, Default, Clone)]
pub struct CountingRenderer {
    frames: Rc<Cell<usize>>,
}

impl CountingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `render()` calls observed so far, shared across clones.
    pub fn frames(&self) -> usize {
        self.frames.get()
    }
}

impl Renderer for CountingRenderer {
    fn render(&mut self) {
        self.frames.set(self.frames.get() + 1);
    }
}
