use std::time::Duration;

use tracing::info;

/// Row counts of a finished conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    pub users: usize,
    pub user_options: usize,
    pub assets: usize,
    pub rooms: usize,
    pub player_rooms: usize,
    pub locations: usize,
    pub layers: usize,
    pub shapes: usize,
    pub trackers: usize,
    pub auras: usize,
    pub shape_owners: usize,
    /// Owner entries that were blank or named no known user.
    pub skipped_shape_owners: usize,
    pub location_user_options: usize,
    /// Location option entries whose key was malformed or matched no location.
    pub skipped_location_options: usize,
}

impl MigrationReport {
    pub fn log(&self, elapsed: Duration) {
        info!("=== Conversion Complete ===");
        info!("Total time: {:.2}s", elapsed.as_secs_f64());
        info!(
            users = self.users,
            user_options = self.user_options,
            assets = self.assets,
            "Users"
        );
        info!(
            rooms = self.rooms,
            player_rooms = self.player_rooms,
            locations = self.locations,
            layers = self.layers,
            shapes = self.shapes,
            "Rooms"
        );
        info!(
            trackers = self.trackers,
            auras = self.auras,
            shape_owners = self.shape_owners,
            skipped = self.skipped_shape_owners,
            "Shape details"
        );
        info!(
            location_user_options = self.location_user_options,
            skipped = self.skipped_location_options,
            "Location options"
        );
    }
}
