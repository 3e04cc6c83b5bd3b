//! # Save Migrate Shared
//! This crate defines the data structures shared across the save migration:
//! the legacy save records as they are read, the asset tree variant, the
//! destination rows handed to the repository, and the field tables that drive
//! conditional copying of optional attributes.
pub mod types;

pub use types::{
    coerce_integer, AssetNode, CopyWhen, FieldKind, FieldMapping, FieldTable, FieldValue,
    LegacyAura, LegacyLayer, LegacyLocation, LegacyRoom, LegacySave, LegacyShape, LegacyTracker,
    LegacyUser, NewAsset, NewAura, NewLayer, NewLocation, NewLocationUserOption, NewRoom,
    NewShape, NewTracker, NewUser, NewUserOption, NumberError, OptionalColumns,
    LOCATION_OPTION_FIELDS, SHAPE_FIELDS, USER_OPTION_FIELDS,
};
