//! Facade tying configuration, annotations, zoom and collaborators together.
//!
//! A [`Viewer`] is built once per waveform display through [`ViewerBuilder`],
//! which fails fast on missing startup inputs. Afterwards every user action
//! goes through the viewer or the collections it exposes.

use std::{fmt, rc::Rc};

use crate::{
    annotations::{AnnotationId, Point, Points, Segment, Segments},
    config::{ConfigOverrides, ViewerConfig},
    events::{Event, EventBus, Subscription},
    logging::{Logger, Loggers},
    player::MediaPlayer,
    render::{self, CountingRenderer, Renderer, SharedRenderer},
    waveform::{FixedScale, WaveformSource},
    zoom::ZoomController,
    Result, WavemarkError,
};

/// Collects the startup inputs of a [`Viewer`].
#[derive(Default)]
pub struct ViewerBuilder {
    overrides: ConfigOverrides,
    player: Option<Box<dyn MediaPlayer>>,
    container_width: Option<u32>,
    renderer: Option<SharedRenderer>,
    waveform: Option<Rc<dyn WaveformSource>>,
    loggers: Loggers,
}

impl ViewerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn options(mut self, overrides: ConfigOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// The playback element. Required.
    pub fn media<P: MediaPlayer + 'static>(mut self, player: P) -> Self {
        self.player = Some(Box::new(player));
        self
    }

    /// Measured width of the container in pixels. Required and positive.
    pub fn container_width(mut self, width: u32) -> Self {
        self.container_width = Some(width);
        self
    }

    /// Drawing backend. Defaults to a [`CountingRenderer`].
    pub fn renderer<R: Renderer + 'static>(mut self, renderer: R) -> Self {
        self.renderer = Some(render::shared(renderer));
        self
    }

    /// Overview scale provider. Defaults to the coarsest zoom level.
    pub fn waveform<W: WaveformSource + 'static>(mut self, waveform: W) -> Self {
        self.waveform = Some(Rc::new(waveform));
        self
    }

    /// Error channel. Defaults to `tracing` at error level.
    pub fn logger<L: Logger + 'static>(mut self, logger: L) -> Self {
        self.loggers.error = Rc::new(logger);
        self
    }

    /// Deprecation channel. Defaults to `tracing` at warn level.
    pub fn deprecation_logger<L: Logger + 'static>(mut self, logger: L) -> Self {
        self.loggers.deprecation = Rc::new(logger);
        self
    }

    pub fn build(self) -> Result<Viewer> {
        let player = self
            .player
            .ok_or_else(|| WavemarkError::config("a media element is required"))?;
        match self.container_width {
            None => return Err(WavemarkError::config("a container element is required")),
            Some(0) => return Err(WavemarkError::config("the container must have a positive width")),
            Some(_) => {}
        }

        let config = ViewerConfig::default().merge(self.overrides);
        config.validate()?;
        let config = Rc::new(config);

        let bus = EventBus::new(self.loggers.error.clone());
        let renderer = self
            .renderer
            .unwrap_or_else(|| render::shared(CountingRenderer::new()));
        let waveform: Rc<dyn WaveformSource> = match self.waveform {
            Some(waveform) => waveform,
            None => Rc::new(FixedScale(config.zoom_levels[config.zoom_levels.len() - 1])),
        };

        let segments = Segments::new(
            bus.clone(),
            renderer.clone(),
            config.colors.segment.clone(),
            self.loggers.deprecation.clone(),
        );
        let points = Points::new(
            bus.clone(),
            renderer.clone(),
            config.colors.point_marker.clone(),
            self.loggers.deprecation.clone(),
        );
        let zoom = ZoomController::new(config.zoom_levels.clone(), bus.clone(), renderer.clone(), waveform)?;

        tracing::debug!(levels = ?config.zoom_levels, "viewer initialised");

        Ok(Viewer {
            config,
            bus,
            renderer,
            player,
            segments,
            points,
            zoom,
        })
    }
}

/// One interactive waveform display.
pub struct Viewer {
    config: Rc<ViewerConfig>,
    bus: EventBus,
    renderer: SharedRenderer,
    player: Box<dyn MediaPlayer>,
    segments: Segments,
    points: Points,
    zoom: ZoomController,
}

impl Viewer {
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn segments(&self) -> &Segments {
        &self.segments
    }

    pub fn segments_mut(&mut self) -> &mut Segments {
        &mut self.segments
    }

    pub fn points(&self) -> &Points {
        &self.points
    }

    pub fn points_mut(&mut self) -> &mut Points {
        &mut self.points
    }

    pub fn zoom(&self) -> &ZoomController {
        &self.zoom
    }

    pub fn zoom_mut(&mut self) -> &mut ZoomController {
        &mut self.zoom
    }

    /// Subscribes to every topic matching `pattern`.
    pub fn on<F>(&self, pattern: &str, listener: F) -> Result<Subscription>
    where
        F: Fn(&Event) -> Result<()> + 'static,
    {
        self.bus.on(pattern, listener)
    }

    pub fn render(&self) {
        self.renderer.borrow_mut().render();
    }

    /// Removes one segment, then renders and emits `segments.remove`.
    /// Unknown ids fail with [`WavemarkError::NotFound`].
    pub fn remove_segment(&mut self, id: &AnnotationId) -> Result<Segment> {
        let removed = self.segments.remove(id)?;
        self.render();
        self.bus.notify(&Event::SegmentsRemove(vec![removed.clone()]));
        Ok(removed)
    }

    /// Removes one point, then renders and emits `points.remove`.
    pub fn remove_point(&mut self, id: &AnnotationId) -> Result<Point> {
        let removed = self.points.remove(id)?;
        self.render();
        self.bus.notify(&Event::PointsRemove(vec![removed.clone()]));
        Ok(removed)
    }

    pub fn current_time(&self) -> f64 {
        self.player.current_time()
    }

    /// Seeks the player and publishes `player.seek`.
    pub fn seek(&mut self, seconds: f64) -> Result<()> {
        check_time(seconds)?;
        self.player.seek(seconds);
        self.bus.notify(&Event::PlayerSeek(seconds));
        Ok(())
    }

    /// Moves the playhead by the configured nudge increment, never before 0.
    pub fn nudge(&mut self, forward: bool) -> Result<()> {
        let step = if forward {
            self.config.nudge_increment
        } else {
            -self.config.nudge_increment
        };
        let target = (self.current_time() + step).max(0.0);
        self.seek(target)
    }

    /// Called by the media player whenever its position changes.
    /// Rejects the same times as [`Viewer::seek`] without rendering.
    pub fn time_changed(&mut self, seconds: f64) -> Result<()> {
        check_time(seconds)?;
        self.render();
        self.bus.notify(&Event::PlayerTimeUpdate(seconds));
        Ok(())
    }

    pub fn play_segment(&mut self, id: &AnnotationId, looped: bool) -> Result<()> {
        let segment = self
            .segments
            .get(id)
            .ok_or_else(|| WavemarkError::NotFound(id.to_string()))?;
        tracing::debug!(%id, looped, "playing segment");
        self.player.play_segment(segment, looped);
        Ok(())
    }

    /// Routes a failure reported late by a collaborator onto the `error`
    /// topic. Returns it when nothing listens there.
    pub fn report_error(&self, message: impl Into<String>) -> Result<()> {
        self.bus.report_error(message)
    }

    /// Tears the viewer down, detaching every listener.
    pub fn destroy(self) {
        self.bus.clear();
        tracing::debug!("viewer destroyed");
    }
}

fn check_time(seconds: f64) -> Result<()> {
    if seconds.is_finite() && seconds >= 0.0 {
        Ok(())
    } else {
        Err(WavemarkError::InvalidTime(seconds))
    }
}

impl fmt::Debug for Viewer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Viewer")
            .field("config", &self.config)
            .field("segments", &self.segments)
            .field("points", &self.points)
            .field("zoom", &self.zoom)
            .finish()
    }
}
