//! Field tables for optional attributes.
//!
//! Each table enumerates the legacy keys that map onto destination columns.
//! Only the fields a record actually carries are copied; the rest are left to
//! the destination column defaults.

use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Bool,
    Integer,
    Real,
}

/// When a source field counts as present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyWhen {
    /// The key exists with a non-null value.
    Present,
    /// The key exists with a value that is not null, false, zero or empty.
    Truthy,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldMapping {
    pub source: &'static str,
    pub column: &'static str,
    pub kind: FieldKind,
}

/// A typed value ready to be bound to a destination column.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Bool(bool),
    Integer(i64),
    Real(f64),
}

#[derive(Debug, Clone, Copy)]
pub struct FieldTable {
    pub copy_when: CopyWhen,
    pub fields: &'static [FieldMapping],
}

const fn field(source: &'static str, column: &'static str, kind: FieldKind) -> FieldMapping {
    FieldMapping {
        source,
        column,
        kind,
    }
}

pub const USER_OPTION_FIELDS: FieldTable = FieldTable {
    copy_when: CopyWhen::Present,
    fields: &[
        field("fowColour", "fow_colour", FieldKind::Text),
        field("gridColour", "grid_colour", FieldKind::Text),
        field("rulerColour", "ruler_colour", FieldKind::Text),
    ],
};

pub const SHAPE_FIELDS: FieldTable = FieldTable {
    copy_when: CopyWhen::Truthy,
    fields: &[
        field("name", "name", FieldKind::Text),
        field("border", "border_colour", FieldKind::Text),
        field("fill", "fill_colour", FieldKind::Text),
        field("isToken", "is_token", FieldKind::Bool),
        field("globalCompositeOperation", "draw_operator", FieldKind::Text),
        field("annotation", "annotation", FieldKind::Text),
        field("movementObstruction", "movement_obstruction", FieldKind::Bool),
        field("visionObstruction", "vision_obstruction", FieldKind::Bool),
    ],
};

pub const LOCATION_OPTION_FIELDS: FieldTable = FieldTable {
    copy_when: CopyWhen::Present,
    fields: &[
        field("panX", "pan_x", FieldKind::Integer),
        field("panY", "pan_y", FieldKind::Integer),
        field("zoomFactor", "zoom_factor", FieldKind::Real),
    ],
};

impl FieldTable {
    /// Collects `(column, value)` pairs for every field the source carries.
    ///
    /// Values that cannot be converted to the column kind are treated as absent.
    pub fn extract(&self, source: &Map<String, Value>) -> Vec<(&'static str, FieldValue)> {
        self.fields
            .iter()
            .filter_map(|mapping| {
                let raw = source.get(mapping.source)?;
                let present = match self.copy_when {
                    CopyWhen::Present => !raw.is_null(),
                    CopyWhen::Truthy => is_truthy(raw),
                };
                if !present {
                    return None;
                }
                FieldValue::convert(raw, mapping.kind).map(|value| (mapping.column, value))
            })
            .collect()
    }
}

impl FieldValue {
    fn convert(raw: &Value, kind: FieldKind) -> Option<FieldValue> {
        match kind {
            FieldKind::Text => match raw {
                Value::String(text) => Some(FieldValue::Text(text.clone())),
                Value::Number(number) => Some(FieldValue::Text(number.to_string())),
                Value::Bool(flag) => Some(FieldValue::Text(flag.to_string())),
                _ => None,
            },
            FieldKind::Bool => Some(FieldValue::Bool(is_truthy(raw))),
            FieldKind::Integer => as_f64(raw).map(|number| FieldValue::Integer(number.round() as i64)),
            FieldKind::Real => as_f64(raw).map(FieldValue::Real),
        }
    }
}

fn as_f64(raw: &Value) -> Option<f64> {
    match raw {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn is_truthy(raw: &Value) -> bool {
    match raw {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(entries) => !entries.is_empty(),
    }
}
