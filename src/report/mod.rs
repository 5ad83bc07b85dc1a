//! Report module - rendering and exporting profile results

pub mod export;
pub mod summary;

pub use export::*;
pub use summary::*;
