//! Application module: exposes the app model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds the library view, the
//! navigation stack, the last playback snapshot and the seek preview.

mod model;

pub use model::*;
