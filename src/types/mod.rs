//! Data types for the table engine.

mod header;
mod options;
mod row;
mod sort;

pub use header::*;
pub use options::*;
pub use row::*;
pub use sort::*;
