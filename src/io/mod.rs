/// Built-in presets and catalog file loading
pub mod catalog;
/// Command-line interface and log setup
pub mod cli;
/// Constants and runtime defaults
pub mod configuration;
/// Error types and helpers
pub mod error;
/// PNG export of rendered canvases
pub mod image;
/// Terminal progress reporting
pub mod progress;
/// Text canvas rendering
pub mod render;
