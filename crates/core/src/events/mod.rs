//! Synchronous publish/subscribe bus shared by every component of a viewer.
//!
//! Topics are dot separated namespaces (`segments.add`, `zoom.update`).
//! Subscriptions are made against a [`TopicPattern`] where `*` stands for
//! exactly one level and `**` for any number of levels, so `segments.*`
//! receives every segment event. Listeners run in subscription order within a
//! single [`EventBus::emit`] call.
//!
//! Listeners receive the event by reference and own no handle to the
//! collections that emitted it, so they cannot mutate a collection while it
//! is being iterated. Work that needs to mutate should be queued and applied
//! after `emit` returns.

use std::{
    cell::RefCell,
    fmt,
    rc::{Rc, Weak},
    str::FromStr,
};

use crate::{
    annotations::{Point, Segment},
    logging::{Logger, TracingLogger},
    Result, WavemarkError,
};

/// Every notification the core publishes.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    SegmentsAdd(Vec<Segment>),
    SegmentsUpdate(Segment),
    SegmentsRemove(Vec<Segment>),
    SegmentsRemoveAll,
    PointsAdd(Vec<Point>),
    PointsUpdate(Point),
    PointsRemove(Vec<Point>),
    PointsRemoveAll,
    /// Scale factors in samples per pixel, not zoom level indices.
    ZoomUpdate { current: u32, previous: u32 },
    PlayerSeek(f64),
    PlayerTimeUpdate(f64),
    Error(String),
}

impl Event {
    pub const ERROR_TOPIC: &'static str = "error";

    /// Fully qualified topic the event is published on.
    pub fn topic(&self) -> &'static str {
        match self {
            Event::SegmentsAdd(_) => "segments.add",
            Event::SegmentsUpdate(_) => "segments.update",
            Event::SegmentsRemove(_) => "segments.remove",
            Event::SegmentsRemoveAll => "segments.remove_all",
            Event::PointsAdd(_) => "points.add",
            Event::PointsUpdate(_) => "points.update",
            Event::PointsRemove(_) => "points.remove",
            Event::PointsRemoveAll => "points.remove_all",
            Event::ZoomUpdate { .. } => "zoom.update",
            Event::PlayerSeek(_) => "player.seek",
            Event::PlayerTimeUpdate(_) => "player.time_update",
            Event::Error(_) => Self::ERROR_TOPIC,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Level {
    Literal(String),
    Any,
    AnyDepth,
}

/// Parsed subscription pattern such as `segments.*` or `**`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicPattern {
    levels: Vec<Level>,
}

impl TopicPattern {
    pub fn matches(&self, topic: &str) -> bool {
        let levels: Vec<&str> = topic.split('.').collect();
        match_levels(&self.levels, &levels)
    }
}

fn match_levels(pattern: &[Level], topic: &[&str]) -> bool {
    match pattern.split_first() {
        None => topic.is_empty(),
        Some((Level::AnyDepth, rest)) => {
            (0..=topic.len()).any(|skip| match_levels(rest, &topic[skip..]))
        }
        Some((Level::Any, rest)) => !topic.is_empty() && match_levels(rest, &topic[1..]),
        Some((Level::Literal(name), rest)) => {
            topic.first() == Some(&name.as_str()) && match_levels(rest, &topic[1..])
        }
    }
}

impl FromStr for TopicPattern {
    type Err = WavemarkError;

    fn from_str(pattern: &str) -> Result<Self> {
        let levels = pattern
            .split('.')
            .map(|level| match level {
                "" => Err(WavemarkError::InvalidTopic(pattern.to_string())),
                "*" => Ok(Level::Any),
                "**" => Ok(Level::AnyDepth),
                name => Ok(Level::Literal(name.to_string())),
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { levels })
    }
}

impl fmt::Display for TopicPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<&str> = self
            .levels
            .iter()
            .map(|level| match level {
                Level::Literal(name) => name.as_str(),
                Level::Any => "*",
                Level::AnyDepth => "**",
            })
            .collect();
        f.write_str(&parts.join("."))
    }
}

type Listener = Rc<dyn Fn(&Event) -> Result<()>>;

struct Entry {
    id: u64,
    pattern: TopicPattern,
    listener: Listener,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    entries: Vec<Entry>,
}

/// Handle returned by [`EventBus::on`]. Dropping it keeps the listener
/// registered; call [`Subscription::dispose`] to remove it.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl Subscription {
    /// Removes the listener. Returns false when the bus is already gone or
    /// the listener was removed before.
    pub fn dispose(self) -> bool {
        let Some(registry) = self.registry.upgrade() else {
            return false;
        };
        let mut registry = registry.borrow_mut();
        let before = registry.entries.len();
        registry.entries.retain(|entry| entry.id != self.id);
        registry.entries.len() != before
    }
}

/// Cheaply cloneable handle to a shared listener registry.
#[derive(Clone)]
pub struct EventBus {
    registry: Rc<RefCell<Registry>>,
    logger: Rc<dyn Logger>,
}

impl EventBus {
    pub fn new(logger: Rc<dyn Logger>) -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry::default())),
            logger,
        }
    }

    /// Registers `listener` for every topic matching `pattern`.
    pub fn on<F>(&self, pattern: &str, listener: F) -> Result<Subscription>
    where
        F: Fn(&Event) -> Result<()> + 'static,
    {
        let pattern: TopicPattern = pattern.parse()?;
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.entries.push(Entry {
            id,
            pattern,
            listener: Rc::new(listener),
        });

        Ok(Subscription {
            id,
            registry: Rc::downgrade(&self.registry),
        })
    }

    /// Number of listeners whose pattern matches `topic`.
    pub fn listener_count(&self, topic: &str) -> usize {
        self.registry
            .borrow()
            .entries
            .iter()
            .filter(|entry| entry.pattern.matches(topic))
            .count()
    }

    /// Drops every listener.
    pub fn clear(&self) {
        self.registry.borrow_mut().entries.clear();
    }

    /// Invokes every matching listener in subscription order.
    ///
    /// A failing listener does not stop dispatch. Failures are logged and
    /// republished on the `error` topic; when nothing listens there the first
    /// failure is returned instead.
    pub fn emit(&self, event: &Event) -> Result<()> {
        let topic = event.topic();
        let failures: Vec<String> = self
            .matching(topic)
            .into_iter()
            .filter_map(|listener| listener(event).err())
            .map(|err| err.to_string())
            .collect();

        if failures.is_empty() {
            return Ok(());
        }

        if let Event::Error(_) = event {
            for message in &failures {
                self.logger.log(&format!("error listener failed: {message}"));
            }
            return Err(listener_error(topic, &failures[0]));
        }

        let handled = self.listener_count(Event::ERROR_TOPIC) > 0;
        let mut outcome = Ok(());
        for message in failures {
            let report = format!("listener for `{topic}` failed: {message}");
            self.logger.log(&report);
            let result = if handled {
                self.emit(&Event::Error(report))
            } else {
                Err(listener_error(topic, &message))
            };
            if outcome.is_ok() {
                outcome = result;
            }
        }
        outcome
    }

    /// Publishes `event` for a state change that has already been applied.
    ///
    /// Listener failures were already logged and routed by [`EventBus::emit`];
    /// they never fail or undo the change itself.
    pub fn notify(&self, event: &Event) {
        if let Err(err) = self.emit(event) {
            tracing::debug!(topic = event.topic(), %err, "listener failed after change was applied");
        }
    }

    /// Funnels a runtime failure onto the `error` topic and the error logger.
    /// Returns the failure when no `error` listener is attached so it never
    /// goes unobserved.
    pub fn report_error(&self, message: impl Into<String>) -> Result<()> {
        let message = message.into();
        self.logger.log(&message);

        if self.listener_count(Event::ERROR_TOPIC) == 0 {
            return Err(WavemarkError::Listener {
                topic: Event::ERROR_TOPIC.to_string(),
                message,
            });
        }

        self.emit(&Event::Error(message))
    }

    fn matching(&self, topic: &str) -> Vec<Listener> {
        self.registry
            .borrow()
            .entries
            .iter()
            .filter(|entry| entry.pattern.matches(topic))
            .map(|entry| entry.listener.clone())
            .collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(Rc::new(TracingLogger))
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.registry.borrow().entries.len())
            .finish()
    }
}

fn listener_error(topic: &str, message: &str) -> WavemarkError {
    WavemarkError::Listener {
        topic: topic.to_string(),
        message: message.to_string(),
    }
}
