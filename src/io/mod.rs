pub mod loader;
pub mod program;

pub use loader::{load_programs, parse_programs, LoaderError};
pub use program::Program;
