//! Stats module - Summary metrics over a selection

mod summary;

pub use summary::{group_thousands, Summary};
