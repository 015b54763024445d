use serde::{Deserialize, Serialize};

use super::{legacy, Annotation, AnnotationId};
use crate::{events::Event, Result, WavemarkError};

/// A labelled time interval on the waveform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub id: AnnotationId,
    pub start_time: f64,
    pub end_time: f64,
    pub editable: bool,
    pub color: String,
    pub label_text: String,
}

/// Caller supplied fields for a new segment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentSpec {
    #[serde(default)]
    pub id: Option<AnnotationId>,
    pub start_time: f64,
    pub end_time: f64,
    #[serde(default)]
    pub editable: bool,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub label_text: Option<String>,
}

impl SegmentSpec {
    pub fn new(start_time: f64, end_time: f64) -> Self {
        Self {
            start_time,
            end_time,
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<AnnotationId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label_text = Some(label.into());
        self
    }

    pub fn editable(mut self, editable: bool) -> Self {
        self.editable = editable;
        self
    }
}

/// Partial update for an existing segment. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SegmentPatch {
    pub start_time: Option<f64>,
    pub end_time: Option<f64>,
    pub editable: Option<bool>,
    pub color: Option<String>,
    pub label_text: Option<String>,
}

fn check_range(start: f64, end: f64) -> Result<()> {
    for time in [start, end] {
        if !time.is_finite() || time < 0.0 {
            return Err(WavemarkError::InvalidTime(time));
        }
    }
    if start >= end {
        return Err(WavemarkError::InvalidRange { start, end });
    }
    Ok(())
}

impl Annotation for Segment {
    type Spec = SegmentSpec;
    type Patch = SegmentPatch;

    const KIND: &'static str = "segment";
    const LEGACY_NOTICE: &'static str = legacy::SEGMENT_NOTICE;

    fn id(&self) -> &AnnotationId {
        &self.id
    }

    fn spec_id(spec: &SegmentSpec) -> Option<&AnnotationId> {
        spec.id.as_ref()
    }

    fn build(id: AnnotationId, spec: SegmentSpec, default_color: &str) -> Result<Self> {
        check_range(spec.start_time, spec.end_time)?;
        Ok(Self {
            id,
            start_time: spec.start_time,
            end_time: spec.end_time,
            editable: spec.editable,
            color: spec.color.unwrap_or_else(|| default_color.to_string()),
            label_text: spec.label_text.unwrap_or_default(),
        })
    }

    fn patched(&self, patch: SegmentPatch) -> Result<Self> {
        let start_time = patch.start_time.unwrap_or(self.start_time);
        let end_time = patch.end_time.unwrap_or(self.end_time);
        check_range(start_time, end_time)?;

        Ok(Self {
            id: self.id.clone(),
            start_time,
            end_time,
            editable: patch.editable.unwrap_or(self.editable),
            color: patch.color.unwrap_or_else(|| self.color.clone()),
            label_text: patch.label_text.unwrap_or_else(|| self.label_text.clone()),
        })
    }

    /// Exact match on the start time, and on the end time too when a
    /// positive one is given.
    fn matches_time(&self, start: f64, end: Option<f64>) -> bool {
        match end {
            Some(end) if end > 0.0 => self.start_time == start && self.end_time == end,
            _ => self.start_time == start,
        }
    }

    fn overlaps(&self, start: f64, end: f64) -> bool {
        self.start_time < end && start < self.end_time
    }

    fn from_positional(args: &[serde_json::Value]) -> Option<Result<SegmentSpec>> {
        legacy::segment_spec(args)
    }

    fn added(records: Vec<Self>) -> Event {
        Event::SegmentsAdd(records)
    }

    fn updated(record: Self) -> Event {
        Event::SegmentsUpdate(record)
    }

    fn removed(records: Vec<Self>) -> Event {
        Event::SegmentsRemove(records)
    }

    fn removed_all() -> Event {
        Event::SegmentsRemoveAll
    }
}
