// Migration module - preflight guard, phase driver and its helpers
pub mod assets;
pub mod executor;
pub mod report;
pub mod resolver;
pub mod scope;

use std::path::Path;

use save_migrate_repository::{connect, SqliteDestinationRepository};
use tracing::info;

pub use executor::MigrationExecutor;
pub use report::MigrationReport;
pub use resolver::{LocationKey, Reference, ReferenceKind, ReferenceResolver};
pub use scope::{Phase, PhaseScope};

use crate::config::MigrationConfig;
use crate::errors::MigrationError;
use crate::legacy::LegacyStore;

/// Converts the legacy save at `save_file` into a new destination store.
///
/// Refuses to run when the destination already exists, so a store that was
/// converted before (or left behind by an aborted run) is never written to.
pub async fn convert(
    config: &MigrationConfig,
    save_file: &Path,
) -> Result<MigrationReport, MigrationError> {
    if config.destination.exists() {
        return Err(MigrationError::Preflight(config.destination.clone()));
    }

    let store = LegacyStore::open(save_file).await?;

    info!(destination = %config.destination.display(), "Creating destination store");
    let pool = connect(&config.destination).await?;

    let executor = MigrationExecutor::new(
        pool.clone(),
        SqliteDestinationRepository::new(),
        config.clone(),
    );
    let result = executor.execute(&store).await;
    pool.close().await;
    result
}
