// Adapters layer: concrete implementations for external systems (data files, local disk).

pub mod source;
pub mod storage;

pub use source::{parse_dataset, SourceFormat};
pub use storage::LocalStorage;
