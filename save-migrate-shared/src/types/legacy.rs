//! Legacy save records.
//!
//! These mirror the shelved campaign state exactly as it was persisted. Nothing
//! here normalizes or validates values; loosely typed fields stay as raw JSON
//! so the migrator decides how to coerce them.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Key of the per-location view options inside a user's option map.
const LOCATION_OPTIONS_KEY: &str = "locationOptions";

/// The whole legacy save: every known user and every room.
///
/// Both maps keep their document order, which is the order the migration
/// processes them in.
#[derive(Debug, Clone, Deserialize)]
pub struct LegacySave {
    pub user_map: IndexMap<String, LegacyUser>,
    pub rooms: IndexMap<String, LegacyRoom>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LegacyUser {
    pub username: String,
    pub password_hash: String,
    #[serde(default)]
    pub options: Map<String, Value>,
    #[serde(default)]
    pub asset_info: Value,
}

impl LegacyUser {
    /// Iterates the user's per-location options as `(composite key, entry)`.
    ///
    /// Entries whose value is not an object carry no options and are skipped.
    pub fn location_options(&self) -> impl Iterator<Item = (&str, &Map<String, Value>)> {
        self.options
            .get(LOCATION_OPTIONS_KEY)
            .and_then(Value::as_object)
            .into_iter()
            .flat_map(|entries| entries.iter())
            .filter_map(|(key, entry)| entry.as_object().map(|entry| (key.as_str(), entry)))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LegacyRoom {
    pub name: String,
    pub creator: String,
    pub invitation_code: String,
    #[serde(default)]
    pub player_location: Option<String>,
    #[serde(default)]
    pub dm_location: Option<String>,
    #[serde(default)]
    pub players: Vec<String>,
    #[serde(default)]
    pub locations: IndexMap<String, LegacyLocation>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LegacyLocation {
    pub name: String,
    #[serde(default)]
    pub layers: Vec<LegacyLayer>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LegacyLayer {
    pub name: String,
    #[serde(default)]
    pub player_visible: bool,
    #[serde(default)]
    pub player_editable: bool,
    #[serde(default = "default_true")]
    pub selectable: bool,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default)]
    pub shapes: IndexMap<String, LegacyShape>,
}

/// A shape as stored by the legacy client.
///
/// Only `uuid`, `x` and `y` are guaranteed. Every other display or behaviour
/// attribute lands in `attributes` and is copied through the shape field table.
#[derive(Debug, Clone, Deserialize)]
pub struct LegacyShape {
    pub uuid: String,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub trackers: Vec<LegacyTracker>,
    #[serde(default)]
    pub auras: Vec<LegacyAura>,
    #[serde(default)]
    pub owners: Vec<String>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LegacyTracker {
    pub uuid: String,
    #[serde(default)]
    pub visible: bool,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: Value,
    #[serde(default)]
    pub maxvalue: Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LegacyAura {
    pub uuid: String,
    #[serde(rename = "lightSource", default)]
    pub light_source: bool,
    #[serde(default)]
    pub visible: bool,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: Value,
    #[serde(default)]
    pub dim: Value,
    #[serde(default)]
    pub colour: String,
}

fn default_true() -> bool {
    true
}
