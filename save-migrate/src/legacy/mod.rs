// Legacy save access - loading the save and iterating its records
pub mod reader;

pub use reader::LegacyStore;
