// Resume render pipeline: record → composed markup → print view or PDF bytes.
// Each call is a pure function of the record and the mode; nothing is cached.

pub mod compose;
pub mod converter;
pub mod export;
pub mod handlers;
pub mod styles;

// Re-export what `main` wires into `AppState`.
pub use compose::ComposeOptions;
pub use converter::ProcessPdfConverter;
pub use export::Exporter;
