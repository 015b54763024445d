//! Segment and point storage.
//!
//! Both kinds share one generic [`AnnotationCollection`]: an insertion ordered
//! list that owns its records, assigns ids, and publishes every batch change
//! on the event bus after a single render.
//!
//! A change is applied before it is announced. A listener that fails while
//! handling the announcement is reported through the error logger and the
//! `error` topic, but the mutation still succeeds and returns its records.

mod legacy;
mod point;
mod segment;

use std::{fmt, rc::Rc};

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::{
    events::{Event, EventBus},
    logging::Logger,
    render::SharedRenderer,
    Result, WavemarkError,
};

pub use point::{Point, PointPatch, PointSpec};
pub use segment::{Segment, SegmentPatch, SegmentSpec};

/// Identity of an annotation. Hosts may use text or integer ids; both are
/// kept as text so they compare consistently.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawId", into = "String")]
pub struct AnnotationId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(u64),
}

impl From<RawId> for AnnotationId {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(text) => Self(text),
            RawId::Number(number) => Self(number.to_string()),
        }
    }
}

impl AnnotationId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<AnnotationId> for String {
    fn from(id: AnnotationId) -> Self {
        id.0
    }
}

impl From<&str> for AnnotationId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for AnnotationId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<u64> for AnnotationId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for AnnotationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Behaviour a record needs to live in an [`AnnotationCollection`].
pub trait Annotation: Clone + PartialEq + fmt::Debug {
    type Spec: DeserializeOwned;
    type Patch;

    /// Prefix for generated ids and log lines.
    const KIND: &'static str;
    const LEGACY_NOTICE: &'static str;

    fn id(&self) -> &AnnotationId;
    fn spec_id(spec: &Self::Spec) -> Option<&AnnotationId>;

    /// Validates `spec` and builds the record under `id`.
    fn build(id: AnnotationId, spec: Self::Spec, default_color: &str) -> Result<Self>;

    /// Returns a validated copy with `patch` applied.
    fn patched(&self, patch: Self::Patch) -> Result<Self>;

    /// Exact time lookup used by `remove_by_time`.
    fn matches_time(&self, start: f64, end: Option<f64>) -> bool;

    /// Whether the record is visible inside `[start, end)`.
    fn overlaps(&self, start: f64, end: f64) -> bool;

    /// Legacy positional arguments, or `None` when `args` is not that shape.
    fn from_positional(args: &[Value]) -> Option<Result<Self::Spec>>;

    fn added(records: Vec<Self>) -> Event;
    fn updated(record: Self) -> Event;
    fn removed(records: Vec<Self>) -> Event;
    fn removed_all() -> Event;
}

/// One spec or many, so a single `add` entry point covers both.
#[derive(Debug, Clone, PartialEq)]
pub enum Batch<S> {
    One(S),
    Many(Vec<S>),
}

impl<S> Batch<S> {
    pub fn into_vec(self) -> Vec<S> {
        match self {
            Batch::One(spec) => vec![spec],
            Batch::Many(specs) => specs,
        }
    }
}

impl<S> From<S> for Batch<S> {
    fn from(spec: S) -> Self {
        Batch::One(spec)
    }
}

impl<S> From<Vec<S>> for Batch<S> {
    fn from(specs: Vec<S>) -> Self {
        Batch::Many(specs)
    }
}

pub type Segments = AnnotationCollection<Segment>;
pub type Points = AnnotationCollection<Point>;

/// Insertion ordered store of annotations of one kind.
///
/// The collection never sorts; callers that need time order sort a copy.
pub struct AnnotationCollection<T: Annotation> {
    items: Vec<T>,
    next_id: u64,
    default_color: String,
    bus: EventBus,
    renderer: SharedRenderer,
    deprecation: Rc<dyn Logger>,
}

impl<T: Annotation> AnnotationCollection<T> {
    pub fn new(
        bus: EventBus,
        renderer: SharedRenderer,
        default_color: impl Into<String>,
        deprecation: Rc<dyn Logger>,
    ) -> Self {
        Self {
            items: Vec::new(),
            next_id: 0,
            default_color: default_color.into(),
            bus,
            renderer,
            deprecation,
        }
    }

    /// Live records in insertion order.
    pub fn list(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &AnnotationId) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Records visible in `[start, end)`, in insertion order.
    pub fn find(&self, start: f64, end: f64) -> Vec<&T> {
        self.items
            .iter()
            .filter(|item| item.overlaps(start, end))
            .collect()
    }

    /// Builds one record and appends it. Does not render or emit; see
    /// [`AnnotationCollection::add`] for the batch form that does.
    ///
    /// Explicit ids that are already live are rejected with
    /// [`WavemarkError::DuplicateId`].
    pub fn create(&mut self, spec: T::Spec) -> Result<T> {
        let record = self.prepare(spec, &[])?;
        self.items.push(record.clone());
        tracing::debug!(kind = T::KIND, id = %record.id(), "created annotation");
        Ok(record)
    }

    /// Adds one or many records, then renders once and emits one add event
    /// carrying everything added.
    ///
    /// The batch is validated as a whole: when any spec is rejected nothing
    /// is inserted.
    pub fn add(&mut self, specs: impl Into<Batch<T::Spec>>) -> Result<Vec<T>> {
        let batch: Batch<T::Spec> = specs.into();
        self.add_specs(batch.into_vec())
    }

    fn add_specs(&mut self, specs: Vec<T::Spec>) -> Result<Vec<T>> {
        let mut staged = Vec::new();
        for spec in specs {
            let record = self.prepare(spec, &staged)?;
            staged.push(record);
        }

        if staged.is_empty() {
            return Ok(staged);
        }

        self.items.extend(staged.iter().cloned());
        tracing::debug!(kind = T::KIND, count = staged.len(), "added annotations");
        self.commit(T::added(staged.clone()));
        Ok(staged)
    }

    /// Entry point for loosely typed callers. A numeric first argument is
    /// treated as the deprecated positional form and logged once for the
    /// call; otherwise the first argument must decode as one spec or a list.
    pub fn add_positional(&mut self, args: &[Value]) -> Result<Vec<T>> {
        if let Some(spec) = T::from_positional(args) {
            self.deprecation.log(T::LEGACY_NOTICE);
            return self.add_specs(vec![spec?]);
        }

        let first = args
            .first()
            .ok_or_else(|| WavemarkError::InvalidArguments(format!("no {} given", T::KIND)))?;
        let specs = match first {
            Value::Array(items) => items
                .iter()
                .map(|item| serde_json::from_value(item.clone()))
                .collect::<std::result::Result<Vec<_>, _>>(),
            other => serde_json::from_value(other.clone()).map(|spec| vec![spec]),
        }
        .map_err(|err| WavemarkError::InvalidArguments(format!("invalid {}: {err}", T::KIND)))?;
        self.add_specs(specs)
    }

    /// Applies `patch` to the record with `id`, then renders and emits an
    /// update event. An invalid patch leaves the record unchanged.
    pub fn update(&mut self, id: &AnnotationId, patch: T::Patch) -> Result<T> {
        let index = self.position(id)?;
        let record = self.items[index].patched(patch)?;
        self.items[index] = record.clone();
        tracing::debug!(kind = T::KIND, %id, "updated annotation");
        self.commit(T::updated(record.clone()));
        Ok(record)
    }

    /// Removes and returns the record with `id`. Does not render or emit.
    pub fn remove(&mut self, id: &AnnotationId) -> Result<T> {
        let index = self.position(id)?;
        Ok(self.items.remove(index))
    }

    /// Removes the stored record equal to `record`. Does not render or emit.
    pub fn remove_record(&mut self, record: &T) -> Result<T> {
        let index = self
            .items
            .iter()
            .position(|item| item == record)
            .ok_or_else(|| WavemarkError::NotFound(record.id().to_string()))?;
        Ok(self.items.remove(index))
    }

    /// Removes every record with `id`. No match is not an error.
    pub fn remove_by_id(&mut self, id: &AnnotationId) -> Result<Vec<T>> {
        let matches: Vec<AnnotationId> = self
            .items
            .iter()
            .filter(|item| item.id() == id)
            .map(|item| item.id().clone())
            .collect();

        self.remove_matches(matches)
    }

    /// Removes records whose time equals `start` (and `end`, for segments,
    /// when a positive end is given). Matching uses exact float equality.
    pub fn remove_by_time(&mut self, start: f64, end: Option<f64>) -> Result<usize> {
        let matches: Vec<AnnotationId> = self
            .items
            .iter()
            .filter(|item| item.matches_time(start, end))
            .map(|item| item.id().clone())
            .collect();

        Ok(self.remove_matches(matches)?.len())
    }

    /// Clears the collection with a single render and event.
    pub fn remove_all(&mut self) {
        let count = self.items.len();
        self.items.clear();
        tracing::debug!(kind = T::KIND, count, "removed all annotations");
        self.commit(T::removed_all());
    }

    fn remove_matches(&mut self, ids: Vec<AnnotationId>) -> Result<Vec<T>> {
        let removed = ids
            .iter()
            .map(|id| self.remove(id))
            .collect::<Result<Vec<_>>>()?;

        if !removed.is_empty() {
            tracing::debug!(kind = T::KIND, count = removed.len(), "removed annotations");
            self.commit(T::removed(removed.clone()));
        }
        Ok(removed)
    }

    fn position(&self, id: &AnnotationId) -> Result<usize> {
        self.items
            .iter()
            .position(|item| item.id() == id)
            .ok_or_else(|| WavemarkError::NotFound(id.to_string()))
    }

    fn prepare(&mut self, spec: T::Spec, staged: &[T]) -> Result<T> {
        let taken = |id: &AnnotationId| {
            self.items.iter().chain(staged).any(|item| item.id() == id)
        };

        let id = match T::spec_id(&spec) {
            Some(id) if taken(id) => return Err(WavemarkError::DuplicateId(id.to_string())),
            Some(id) => id.clone(),
            None => loop {
                let candidate = AnnotationId(format!("{}.{}", T::KIND, self.next_id));
                self.next_id += 1;
                if !taken(&candidate) {
                    break candidate;
                }
            },
        };

        T::build(id, spec, &self.default_color)
    }

    fn commit(&self, event: Event) {
        self.renderer.borrow_mut().render();
        self.bus.notify(&event);
    }
}

impl<T: Annotation> fmt::Debug for AnnotationCollection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnnotationCollection")
            .field("kind", &T::KIND)
            .field("items", &self.items)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use serde_json::json;

    use super::*;
    use crate::render::{shared, CountingRenderer};

    struct Harness {
        renderer: CountingRenderer,
        events: Rc<RefCell<Vec<Event>>>,
        notices: Rc<RefCell<Vec<String>>>,
        bus: EventBus,
    }

    impl Harness {
        fn new() -> Self {
            let bus = EventBus::default();
            let events = Rc::new(RefCell::new(Vec::new()));
            let sink = events.clone();
            bus.on("**", move |event| {
                sink.borrow_mut().push(event.clone());
                Ok(())
            })
            .unwrap();

            Self {
                renderer: CountingRenderer::new(),
                events,
                notices: Rc::new(RefCell::new(Vec::new())),
                bus,
            }
        }

        fn collection<T: Annotation>(&self) -> AnnotationCollection<T> {
            let notices = self.notices.clone();
            AnnotationCollection::new(
                self.bus.clone(),
                shared(self.renderer.clone()),
                "#abc",
                Rc::new(move |line: &str| notices.borrow_mut().push(line.to_string())),
            )
        }

        fn topics(&self) -> Vec<&'static str> {
            self.events.borrow().iter().map(Event::topic).collect()
        }
    }

    #[test]
    fn create_assigns_unique_ids_without_rendering() {
        let harness = Harness::new();
        let mut segments: Segments = harness.collection();

        let first = segments.create(SegmentSpec::new(0.0, 1.0)).unwrap();
        let second = segments.create(SegmentSpec::new(0.0, 1.0)).unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(segments.len(), 2);
        assert!(segments.list().iter().all(|s| s.start_time < s.end_time));
        assert_eq!(harness.renderer.frames(), 0);
        assert!(harness.topics().is_empty());
    }

    #[test]
    fn invalid_range_leaves_collection_unchanged() {
        let harness = Harness::new();
        let mut segments: Segments = harness.collection();
        segments.create(SegmentSpec::new(0.0, 1.0)).unwrap();

        let err = segments.create(SegmentSpec::new(5.0, 3.0)).unwrap_err();

        assert!(matches!(err, WavemarkError::InvalidRange { .. }));
        assert_eq!(segments.len(), 1);
    }

    #[test]
    fn duplicate_explicit_ids_are_rejected() {
        let harness = Harness::new();
        let mut points: Points = harness.collection();
        points.add(PointSpec::new(1.0).with_id("cue")).unwrap();

        let err = points.add(PointSpec::new(2.0).with_id("cue")).unwrap_err();
        assert!(matches!(err, WavemarkError::DuplicateId(ref id) if id == "cue"));

        let err = points
            .add(vec![PointSpec::new(3.0).with_id("a"), PointSpec::new(4.0).with_id("a")])
            .unwrap_err();
        assert!(matches!(err, WavemarkError::DuplicateId(_)));
        assert_eq!(points.len(), 1);
    }

    #[test]
    fn generated_ids_skip_explicit_ones() {
        let harness = Harness::new();
        let mut points: Points = harness.collection();
        points.create(PointSpec::new(1.0).with_id("point.0")).unwrap();

        let generated = points.create(PointSpec::new(2.0)).unwrap();

        assert_eq!(generated.id.as_str(), "point.1");
    }

    #[test]
    fn ids_are_not_reused_after_removal() {
        let harness = Harness::new();
        let mut points: Points = harness.collection();
        let first = points.create(PointSpec::new(1.0)).unwrap();
        points.remove(&first.id).unwrap();

        let second = points.create(PointSpec::new(1.0)).unwrap();

        assert_ne!(first.id, second.id);
    }

    #[test]
    fn batch_add_renders_and_emits_once() {
        let harness = Harness::new();
        let mut segments: Segments = harness.collection();

        let added = segments
            .add(vec![SegmentSpec::new(1.0, 2.0), SegmentSpec::new(3.0, 4.0)])
            .unwrap();

        assert_eq!(added.len(), 2);
        assert_eq!(harness.renderer.frames(), 1);
        assert_eq!(*harness.events.borrow(), vec![Event::SegmentsAdd(added)]);
    }

    #[test]
    fn batch_add_is_all_or_nothing() {
        let harness = Harness::new();
        let mut segments: Segments = harness.collection();

        let result = segments.add(vec![SegmentSpec::new(1.0, 2.0), SegmentSpec::new(4.0, 3.0)]);

        assert!(result.is_err());
        assert!(segments.is_empty());
        assert_eq!(harness.renderer.frames(), 0);
    }

    #[test]
    fn positional_arguments_are_translated_with_a_notice() {
        let harness = Harness::new();
        let mut segments: Segments = harness.collection();

        let added = segments
            .add_positional(&[json!(1), json!(2), json!(true), json!(null), json!("verse")])
            .unwrap();

        assert_eq!(added[0].label_text, "verse");
        assert_eq!(added[0].color, "#abc");
        assert_eq!(*harness.notices.borrow(), vec![Segment::LEGACY_NOTICE.to_string()]);
    }

    #[test]
    fn structured_arguments_decode_single_and_many() {
        let harness = Harness::new();
        let mut points: Points = harness.collection();

        points.add_positional(&[json!({"timestamp": 1.0, "id": 7})]).unwrap();
        points
            .add_positional(&[json!([{"timestamp": 2.0}, {"timestamp": 3.0, "labelText": "drop"}])])
            .unwrap();

        assert_eq!(points.len(), 3);
        assert!(points.get(&AnnotationId::from(7_u64)).is_some());
        assert!(harness.notices.borrow().is_empty());
        assert!(matches!(
            points.add_positional(&[json!("nonsense")]),
            Err(WavemarkError::InvalidArguments(_))
        ));
    }

    #[test]
    fn remove_reports_missing_ids() {
        let harness = Harness::new();
        let mut points: Points = harness.collection();

        let err = points.remove(&"missing".into()).unwrap_err();

        assert!(err.is_not_found());
    }

    #[test]
    fn remove_record_matches_the_stored_value() {
        let harness = Harness::new();
        let mut points: Points = harness.collection();
        let stored = points.create(PointSpec::new(1.0)).unwrap();
        let mut stale = stored.clone();
        stale.timestamp = 9.0;

        assert!(points.remove_record(&stale).unwrap_err().is_not_found());
        assert_eq!(points.remove_record(&stored).unwrap(), stored);
        assert!(points.is_empty());
    }

    #[test]
    fn remove_by_id_without_match_is_a_no_op() {
        let harness = Harness::new();
        let mut points: Points = harness.collection();
        points.create(PointSpec::new(1.0)).unwrap();

        let removed = points.remove_by_id(&"other".into()).unwrap();

        assert!(removed.is_empty());
        assert_eq!(points.len(), 1);
        assert!(harness.topics().is_empty());
    }

    #[test]
    fn remove_by_time_matches_start_or_exact_range() {
        let harness = Harness::new();
        let mut segments: Segments = harness.collection();
        segments
            .add(vec![SegmentSpec::new(10.0, 20.0), SegmentSpec::new(10.0, 30.0)])
            .unwrap();

        assert_eq!(segments.remove_by_time(10.0, Some(20.0)).unwrap(), 1);
        assert_eq!(segments.list()[0].end_time, 30.0);
        assert_eq!(segments.remove_by_time(11.0, None).unwrap(), 0);

        segments.add(SegmentSpec::new(10.0, 20.0)).unwrap();
        assert_eq!(segments.remove_by_time(10.0, None).unwrap(), 2);
        assert!(segments.is_empty());
        assert_eq!(
            harness.topics(),
            vec!["segments.add", "segments.remove", "segments.add", "segments.remove"]
        );
    }

    #[test]
    fn remove_all_fires_a_single_event() {
        let harness = Harness::new();
        let mut points: Points = harness.collection();
        points
            .add(vec![PointSpec::new(1.0), PointSpec::new(2.0), PointSpec::new(3.0)])
            .unwrap();

        points.remove_all();

        assert!(points.list().is_empty());
        assert_eq!(harness.topics(), vec!["points.add", "points.remove_all"]);
        assert_eq!(harness.renderer.frames(), 2);
    }

    #[test]
    fn update_validates_before_replacing() {
        let harness = Harness::new();
        let mut segments: Segments = harness.collection();
        let stored = segments.create(SegmentSpec::new(1.0, 2.0)).unwrap();

        let err = segments
            .update(
                &stored.id,
                SegmentPatch {
                    end_time: Some(0.5),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, WavemarkError::InvalidRange { .. }));
        assert_eq!(segments.get(&stored.id), Some(&stored));

        let updated = segments
            .update(
                &stored.id,
                SegmentPatch {
                    end_time: Some(5.0),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.end_time, 5.0);
        assert_eq!(harness.topics(), vec!["segments.update"]);
    }

    #[test]
    fn list_keeps_insertion_order_and_find_filters_by_time() {
        let harness = Harness::new();
        let mut segments: Segments = harness.collection();
        segments
            .add(vec![
                SegmentSpec::new(30.0, 40.0).with_id("late"),
                SegmentSpec::new(0.0, 5.0).with_id("early"),
                SegmentSpec::new(4.0, 12.0).with_id("middle"),
            ])
            .unwrap();

        let order: Vec<&str> = segments.list().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(order, vec!["late", "early", "middle"]);

        let visible: Vec<&str> = segments.find(3.0, 10.0).iter().map(|s| s.id.as_str()).collect();
        assert_eq!(visible, vec!["early", "middle"]);
    }

    #[test]
    fn ids_accept_text_and_numbers() {
        let id: AnnotationId = serde_json::from_value(json!(42)).unwrap();
        assert_eq!(id, AnnotationId::from("42"));
        assert_eq!(serde_json::to_value(&id).unwrap(), json!("42"));
    }

    #[test]
    fn failing_listener_does_not_fail_an_applied_change() {
        let logged = Rc::new(RefCell::new(Vec::new()));
        let sink = logged.clone();
        let bus = EventBus::new(Rc::new(move |line: &str| sink.borrow_mut().push(line.to_string())));
        bus.on("segments.*", |_| Err(WavemarkError::msg("listener broke"))).unwrap();
        let renderer = CountingRenderer::new();
        let mut segments: Segments = AnnotationCollection::new(
            bus,
            shared(renderer.clone()),
            "#abc",
            Rc::new(|_: &str| {}),
        );

        let added = segments.add(SegmentSpec::new(1.0, 2.0).with_id("a")).unwrap();
        assert_eq!(added[0].id.as_str(), "a");
        assert!(matches!(
            segments.add(SegmentSpec::new(1.0, 2.0).with_id("a")),
            Err(WavemarkError::DuplicateId(_))
        ));

        let generated = segments.add(SegmentSpec::new(3.0, 4.0)).unwrap();
        assert_eq!(segments.len(), 2);
        assert!(segments.get(&generated[0].id).is_some());

        segments
            .update(
                &generated[0].id,
                SegmentPatch {
                    label_text: Some("bridge".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        segments.remove_all();

        assert!(segments.is_empty());
        assert_eq!(renderer.frames(), 4);
        assert_eq!(logged.borrow().len(), 4);
        assert!(logged.borrow().iter().all(|line| line.contains("listener broke")));
    }

    #[test]
    fn structured_arguments_use_camel_case_fields() {
        let harness = Harness::new();
        let mut segments: Segments = harness.collection();

        let added = segments
            .add_positional(&[json!([
                {"startTime": 1, "endTime": 2, "labelText": "intro"},
                {"startTime": 3, "endTime": 4}
            ])])
            .unwrap();

        assert_eq!(added.len(), 2);
        assert_eq!(added[0].label_text, "intro");
        assert_eq!(added[1].start_time, 3.0);
        assert_eq!(added[1].end_time, 4.0);
        assert_eq!(harness.renderer.frames(), 1);
    }

    #[test]
    fn structured_argument_errors_name_the_field() {
        let harness = Harness::new();
        let mut segments: Segments = harness.collection();

        let err = segments
            .add_positional(&[json!([{"startTime": 1, "endTime": 2}, {"startTime": 3}])])
            .unwrap_err();

        assert!(matches!(err, WavemarkError::InvalidArguments(ref message) if message.contains("endTime")));
        assert!(segments.is_empty());
    }

    #[test]
    fn point_update_moves_the_timestamp() {
        let harness = Harness::new();
        let mut points: Points = harness.collection();
        let stored = points.create(PointSpec::new(1.0).with_label("cue")).unwrap();

        let moved = points
            .update(
                &stored.id,
                PointPatch {
                    timestamp: Some(2.5),
                    editable: Some(true),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(moved.timestamp, 2.5);
        assert!(moved.editable);
        assert_eq!(moved.label_text, "cue");
        assert_eq!(points.list(), &[moved.clone()]);
        assert_eq!(*harness.events.borrow(), vec![Event::PointsUpdate(moved)]);

        let err = points
            .update(
                &stored.id,
                PointPatch {
                    timestamp: Some(-1.0),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, WavemarkError::InvalidTime(_)));
        assert_eq!(points.list()[0].timestamp, 2.5);
        assert!(points.update(&"gone".into(), PointPatch::default()).unwrap_err().is_not_found());
    }
}
