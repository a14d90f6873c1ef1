//! Table state and evaluation.

mod eval;
mod io;
mod state;

pub use eval::SharedTable;
pub use state::{Table, TableStore};
pub(crate) use state::first_duplicate;
