//! Annotation and zoom core for interactive waveform views.
//!
//! The crate keeps the state a waveform display needs to stay consistent:
//! segments and points attached to the timeline, the active zoom level, and
//! a synchronous event bus announcing every change. Drawing, playback and
//! waveform data stay outside and are reached through small traits
//! ([`Renderer`], [`MediaPlayer`], [`WaveformSource`]).

pub mod annotations;
pub mod config;
pub mod error;
pub mod events;
pub mod logging;
pub mod player;
pub mod render;
pub mod viewer;
pub mod waveform;
pub mod zoom;

pub use annotations::{
    Annotation, AnnotationCollection, AnnotationId, Batch, Point, PointPatch, PointSpec, Points,
    Segment, SegmentPatch, SegmentSpec, Segments,
};
pub use config::{ColorScheme, ConfigOverrides, DataUri, ViewerConfig};
pub use error::{Result, WavemarkError};
pub use events::{Event, EventBus, Subscription, TopicPattern};
pub use logging::{DeprecationLogger, Logger, Loggers, TracingLogger};
pub use player::{ClockPlayer, MediaPlayer, PlayRange};
pub use render::{CountingRenderer, Renderer, SharedRenderer};
pub use viewer::{Viewer, ViewerBuilder};
pub use waveform::{FittedOverview, FixedScale, WaveformSource};
pub use zoom::ZoomController;
