pub mod error;
pub mod stats;
pub mod symbol_index;
pub mod types;

pub use error::{IndexError, IndexResult};
pub use symbol_index::SymbolIndex;
pub use types::*;
