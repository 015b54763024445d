//! Adapter for the deprecated positional calling convention.
//!
//! Old hosts call `add(start, end, editable, color, label)` for segments and
//! `add(timestamp, editable, color, label)` for points. The shape is only
//! recognised when the first argument is a number; anything else is left to
//! the structured decoder.

use serde_json::Value;

use super::{PointSpec, SegmentSpec};
use crate::{Result, WavemarkError};

pub const SEGMENT_NOTICE: &str =
    "segments.add(startTime, endTime, editable, color, labelText) is deprecated, pass a segment spec instead";
pub const POINT_NOTICE: &str =
    "points.add(timestamp, editable, color, labelText) is deprecated, pass a point spec instead";

/// True when `args` uses the positional shape.
fn is_positional(args: &[Value]) -> bool {
    args.first().map_or(false, Value::is_number)
}

/// Translates `[start, end, editable?, color?, label?]` into a spec.
pub fn segment_spec(args: &[Value]) -> Option<Result<SegmentSpec>> {
    if !is_positional(args) {
        return None;
    }

    Some(segment_from_args(args))
}

/// Translates `[timestamp, editable?, color?, label?]` into a spec.
pub fn point_spec(args: &[Value]) -> Option<Result<PointSpec>> {
    if !is_positional(args) {
        return None;
    }

    Some(point_from_args(args))
}

fn segment_from_args(args: &[Value]) -> Result<SegmentSpec> {
    Ok(SegmentSpec {
        id: None,
        start_time: number(args, 0, "startTime")?,
        end_time: number(args, 1, "endTime")?,
        editable: flag(args, 2, "editable")?,
        color: text(args, 3, "color")?,
        label_text: text(args, 4, "labelText")?,
    })
}

fn point_from_args(args: &[Value]) -> Result<PointSpec> {
    Ok(PointSpec {
        id: None,
        timestamp: number(args, 0, "timestamp")?,
        editable: flag(args, 1, "editable")?,
        color: text(args, 2, "color")?,
        label_text: text(args, 3, "labelText")?,
    })
}

fn number(args: &[Value], index: usize, name: &str) -> Result<f64> {
    args.get(index)
        .and_then(Value::as_f64)
        .ok_or_else(|| WavemarkError::InvalidArguments(format!("{name} must be a number")))
}

fn flag(args: &[Value], index: usize, name: &str) -> Result<bool> {
    match args.get(index) {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(value)) => Ok(*value),
        Some(_) => Err(WavemarkError::InvalidArguments(format!("{name} must be a boolean"))),
    }
}

fn text(args: &[Value], index: usize, name: &str) -> Result<Option<String>> {
    match args.get(index) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.clone())),
        Some(_) => Err(WavemarkError::InvalidArguments(format!("{name} must be a string"))),
    }
}
