//! This module defines the core data structures used across the save migration.
//! It re-exports the legacy records, the asset tree, destination rows and field tables.

mod asset_node;
mod field_table;
mod legacy;
mod number;
mod rows;

pub use asset_node::{AssetNode, FILES_KEY};
pub use field_table::{
    CopyWhen, FieldKind, FieldMapping, FieldTable, FieldValue, LOCATION_OPTION_FIELDS,
    SHAPE_FIELDS, USER_OPTION_FIELDS,
};
pub use legacy::{
    LegacyAura, LegacyLayer, LegacyLocation, LegacyRoom, LegacySave, LegacyShape, LegacyTracker,
    LegacyUser,
};
pub use number::{coerce_integer, NumberError};
pub use rows::{
    NewAsset, NewAura, NewLayer, NewLocation, NewLocationUserOption, NewRoom, NewShape,
    NewTracker, NewUser, NewUserOption, OptionalColumns,
};
