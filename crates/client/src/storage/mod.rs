//! Storage adapters for the cart persistence port.
//!
//! - [`MemoryStore`] keeps entries in a map and is what tests inject.
//! - [`FileStore`] keeps entries in a JSON object on disk, the command-line
//!   counterpart of browser local storage.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;
