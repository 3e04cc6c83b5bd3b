//! Interface definitions for the destination store.
mod destination;

pub use destination::DestinationRepository;
