//! Commit boundaries for migration phases.
use std::fmt;

use sqlx::pool::PoolConnection;
use sqlx::{Sqlite, SqliteConnection, SqlitePool, Transaction};
use tracing::info;

use crate::errors::MigrationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Users,
    Rooms,
    LocationOptions,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Users => write!(f, "users"),
            Phase::Rooms => write!(f, "rooms"),
            Phase::LocationOptions => write!(f, "location options"),
        }
    }
}

/// Where a phase writes.
///
/// An atomic scope holds a transaction: `finish` commits it, dropping the
/// scope on an error path rolls every write of the phase back. An autocommit
/// scope holds a plain connection and each statement stands on its own.
pub enum PhaseScope {
    Atomic {
        phase: Phase,
        tx: Transaction<'static, Sqlite>,
    },
    Autocommit {
        phase: Phase,
        conn: PoolConnection<Sqlite>,
    },
}

impl PhaseScope {
    pub async fn open(pool: &SqlitePool, phase: Phase, atomic: bool) -> Result<Self, MigrationError> {
        if atomic {
            let tx = pool.begin().await?;
            Ok(PhaseScope::Atomic { phase, tx })
        } else {
            let conn = pool.acquire().await?;
            Ok(PhaseScope::Autocommit { phase, conn })
        }
    }

    pub fn conn(&mut self) -> &mut SqliteConnection {
        match self {
            PhaseScope::Atomic { tx, .. } => &mut **tx,
            PhaseScope::Autocommit { conn, .. } => &mut **conn,
        }
    }

    pub async fn finish(self) -> Result<(), MigrationError> {
        match self {
            PhaseScope::Atomic { phase, tx } => {
                tx.commit().await?;
                info!(%phase, "Committed phase");
            }
            PhaseScope::Autocommit { phase, .. } => {
                info!(%phase, "Finished phase");
            }
        }
        Ok(())
    }
}
