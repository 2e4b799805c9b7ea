//! Agent domain types: definitions, tool payloads, creation requests and handles.

pub mod definition;
pub mod handle;
pub mod tools;

pub use definition::*;
pub use handle::*;
pub use tools::*;
