pub mod model;

// Re-export loader helpers for the CLI
pub use model::{load_object, section_summary};
