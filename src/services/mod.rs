// Service exports
pub mod reference_data;

pub use reference_data::{DataError, DataFiles, ReferenceData};
