//! Media index and folder view of the MP3 library.
//!
//! `MediaIndex` is the query the rest of the app consumes; `DirectoryIndex`
//! implements it over a directory tree. `Library` groups the result by folder
//! and answers in-folder searches.

mod folders;
mod index;
mod model;
mod scan;

pub use folders::{Library, folder_label};
pub use index::{LibraryError, MediaIndex};
pub use model::{Locator, Track};
pub use scan::DirectoryIndex;

#[cfg(test)]
mod tests;
