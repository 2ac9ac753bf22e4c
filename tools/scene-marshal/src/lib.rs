//! scene-marshal library
//!
//! Bidirectional marshalling between dynamic array values and the typed
//! scene graph in `scene-common`, plus the scene file formats and the
//! batch manifest. The CLI in `main.rs` and the integration tests are
//! thin layers over this crate.

pub mod codec;
pub mod constants;
pub mod convert;
pub mod fields;
pub mod formats;
pub mod manifest;
pub mod postprocess;
pub mod value;

// Re-export the value model
pub use value::{read_value_file, write_value_file, StructArray, Value};

// Re-export the top-level converters
pub use convert::{scene_from_value, scene_to_value};

// Re-export format entry points
pub use formats::{export_scene, find_format, import_scene, FormatError, EXPORT_FORMATS};
