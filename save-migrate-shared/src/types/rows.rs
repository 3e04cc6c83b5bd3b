//! Destination rows.
//!
//! One struct per table insert. Identifiers of already written parents are
//! carried as the destination's integer keys, shapes are keyed by their uuid.

use super::field_table::FieldValue;

/// Optional column values picked out by a field table.
pub type OptionalColumns = Vec<(&'static str, FieldValue)>;

#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewUserOption {
    pub user_id: i64,
    pub columns: OptionalColumns,
}

/// A folder (`file_hash` is `None`) or file in a user's asset tree.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAsset {
    pub owner_id: i64,
    pub parent_id: Option<i64>,
    pub name: String,
    pub file_hash: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewRoom {
    pub name: String,
    pub creator_id: i64,
    pub invitation_code: String,
    pub player_location: Option<String>,
    pub dm_location: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewLocation {
    pub room_id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewLayer {
    pub location_id: i64,
    pub name: String,
    pub player_visible: bool,
    pub player_editable: bool,
    pub selectable: bool,
    pub visible: bool,
    pub index: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewShape {
    pub uuid: String,
    pub layer_id: i64,
    pub x: f64,
    pub y: f64,
    pub index: i64,
    pub columns: OptionalColumns,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewTracker {
    pub uuid: String,
    pub shape_uuid: String,
    pub visible: bool,
    pub name: String,
    pub value: i64,
    pub maxvalue: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewAura {
    pub uuid: String,
    pub shape_uuid: String,
    pub light_source: bool,
    pub visible: bool,
    pub name: String,
    pub value: i64,
    pub dim: i64,
    pub colour: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewLocationUserOption {
    pub location_id: i64,
    pub user_id: i64,
    pub columns: OptionalColumns,
}
