use serde::{Deserialize, Serialize};

use super::{legacy, Annotation, AnnotationId};
use crate::{events::Event, Result, WavemarkError};

/// A labelled instant on the waveform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Point {
    pub id: AnnotationId,
    pub timestamp: f64,
    pub editable: bool,
    pub color: String,
    pub label_text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointSpec {
    #[serde(default)]
    pub id: Option<AnnotationId>,
    pub timestamp: f64,
    #[serde(default)]
    pub editable: bool,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub label_text: Option<String>,
}

impl PointSpec {
    pub fn new(timestamp: f64) -> Self {
        Self {
            timestamp,
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
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PointPatch {
    pub timestamp: Option<f64>,
    pub editable: Option<bool>,
    pub color: Option<String>,
    pub label_text: Option<String>,
}

fn check_timestamp(timestamp: f64) -> Result<()> {
    if timestamp.is_finite() && timestamp >= 0.0 {
        Ok(())
    } else {
        Err(WavemarkError::InvalidTime(timestamp))
    }
}

impl Annotation for Point {
    type Spec = PointSpec;
    type Patch = PointPatch;

    const KIND: &'static str = "point";
    const LEGACY_NOTICE: &'static str = legacy::POINT_NOTICE;

    fn id(&self) -> &AnnotationId {
        &self.id
    }

    fn spec_id(spec: &PointSpec) -> Option<&AnnotationId> {
        spec.id.as_ref()
    }

    fn build(id: AnnotationId, spec: PointSpec, default_color: &str) -> Result<Self> {
        check_timestamp(spec.timestamp)?;
        Ok(Self {
            id,
            timestamp: spec.timestamp,
            editable: spec.editable,
            color: spec.color.unwrap_or_else(|| default_color.to_string()),
            label_text: spec.label_text.unwrap_or_default(),
        })
    }

    fn patched(&self, patch: PointPatch) -> Result<Self> {
        let timestamp = patch.timestamp.unwrap_or(self.timestamp);
        check_timestamp(timestamp)?;

        Ok(Self {
            id: self.id.clone(),
            timestamp,
            editable: patch.editable.unwrap_or(self.editable),
            color: patch.color.unwrap_or_else(|| self.color.clone()),
            label_text: patch.label_text.unwrap_or_else(|| self.label_text.clone()),
        })
    }

    fn matches_time(&self, start: f64, _end: Option<f64>) -> bool {
        self.timestamp == start
    }

    fn overlaps(&self, start: f64, end: f64) -> bool {
        start <= self.timestamp && self.timestamp < end
    }

    fn from_positional(args: &[serde_json::Value]) -> Option<Result<PointSpec>> {
        legacy::point_spec(args)
    }

    fn added(records: Vec<Self>) -> Event {
        Event::PointsAdd(records)
    }

    fn updated(record: Self) -> Event {
        Event::PointsUpdate(record)
    }

    fn removed(records: Vec<Self>) -> Event {
        Event::PointsRemove(records)
    }

    fn removed_all() -> Event {
        Event::PointsRemoveAll
    }
}
