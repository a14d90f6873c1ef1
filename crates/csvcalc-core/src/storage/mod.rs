//! Storage: delimited-text loading and grid rendering.

mod csv;
mod options;
mod writer;

pub use csv::{read_table, split_fields, strip_whitespace};
pub use options::{LoadOptions, RenderMode, RenderOptions};
pub use writer::{
    CellOutcome, GridReport, GridSnapshot, error_placeholder, snapshot, write_grid, write_json,
};
