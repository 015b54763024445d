//! Zoom level state machine.
//!
//! The active level is an index into the configured scale factors, finest
//! first, so a lower index is more zoomed in. Requests outside the list are
//! clamped to the nearest end.

use std::{fmt, rc::Rc};

use crate::{
    events::{Event, EventBus},
    render::SharedRenderer,
    waveform::WaveformSource,
    Result, WavemarkError,
};

pub struct ZoomController {
    levels: Vec<u32>,
    current: usize,
    bus: EventBus,
    renderer: SharedRenderer,
    waveform: Rc<dyn WaveformSource>,
}

impl ZoomController {
    /// Starts at level 0.
    pub fn new(
        levels: Vec<u32>,
        bus: EventBus,
        renderer: SharedRenderer,
        waveform: Rc<dyn WaveformSource>,
    ) -> Result<Self> {
        if levels.is_empty() {
            return Err(WavemarkError::config("at least one zoom level is required"));
        }

        Ok(Self {
            levels,
            current: 0,
            bus,
            renderer,
            waveform,
        })
    }

    /// Index of the active zoom level.
    pub fn get_zoom(&self) -> usize {
        self.current
    }

    /// Samples per pixel at the active zoom level.
    pub fn scale(&self) -> u32 {
        self.levels[self.current]
    }

    pub fn levels(&self) -> &[u32] {
        &self.levels
    }

    /// Moves to `index`, clamped into the configured range, and always
    /// publishes one `zoom.update` carrying the new and previous scales.
    /// A failing listener is reported but does not undo the transition.
    pub fn set_zoom(&mut self, index: i64) -> usize {
        let last = self.levels.len() - 1;
        let target = usize::try_from(index.max(0)).map_or(last, |index| index.min(last));

        let previous = self.current;
        self.current = target;
        tracing::info!(from = previous, to = target, scale = self.scale(), "zoom level changed");

        self.publish(self.levels[target], self.levels[previous]);
        target
    }

    pub fn zoom_in(&mut self) -> usize {
        self.set_zoom(self.current as i64 - 1)
    }

    pub fn zoom_out(&mut self) -> usize {
        self.set_zoom(self.current as i64 + 1)
    }

    /// Shows the whole-track overview scale without changing the active
    /// level. A later `set_zoom` reports the stored level as previous.
    pub fn overview(&mut self) {
        let overview = self.waveform.scale_for_overview();
        tracing::info!(scale = overview, level = self.current, "zoom overview");
        self.publish(overview, self.scale());
    }

    /// Same pulse as [`ZoomController::overview`].
    pub fn reset(&mut self) {
        self.overview();
    }

    fn publish(&self, current: u32, previous: u32) {
        self.renderer.borrow_mut().render();
        self.bus.notify(&Event::ZoomUpdate { current, previous });
    }
}

impl fmt::Debug for ZoomController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZoomController")
            .field("levels", &self.levels)
            .field("current", &self.current)
            .finish()
    }
}
