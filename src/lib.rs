pub mod errors;
pub mod context;
pub mod engine;
pub mod marker;
pub mod path;
pub mod processor; // row-level collaborator interface
mod parser;

pub use context::Context;
pub use engine::{ResolveOptions, Resolver};
pub use errors::{ContextError, EvalError, ResolveError, Result};
pub use processor::{CellValue, DefaultRowProcessor, Row, RowProcessor};

/// Convenience: resolve with default options.
pub fn resolve(text: &str, ctx: &Context) -> Result<String> {
    Resolver::default().resolve(text, ctx)
}
