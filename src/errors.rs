use thiserror::Error;

/// Failures raised while resolving markers in a piece of cell text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// A `${key}` marker names a key that is absent (or null) in the context.
    #[error("unresolved key: {0}")]
    UnresolvedKey(String),

    /// A `${root.attr}` marker names a root that is absent from the context.
    #[error("unresolved root object: {0}")]
    UnresolvedRoot(String),

    /// A `${key}` marker points at an object or array, which has no text form.
    #[error("value for key `{0}` cannot be rendered as text")]
    Unrenderable(String),

    /// Substituted values kept exposing new markers.
    #[error("gave up after {0} substitution passes")]
    PassLimit(usize),
}

/// Failures of the attribute-path evaluator. These never reach the caller of
/// `resolve`; they are logged and the text passes through.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EvalError {
    #[error("parse error: {0}")]
    Parse(String),

    #[error("no attribute `{attr}` at `{at}`")]
    MissingAttribute { attr: String, at: String },

    #[error("null value at `{0}`")]
    NullIntermediate(String),

    #[error("cannot read attribute `{attr}` from non-object at `{at}`")]
    NotAnObject { attr: String, at: String },

    #[error("value at `{0}` cannot be rendered as text")]
    NotRenderable(String),
}

/// Context documents that are not JSON objects.
#[derive(Debug, Error)]
pub enum ContextError {
    #[error("invalid context JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("context must be a JSON object, got {0}")]
    NotAnObject(&'static str),
}

pub type Result<T> = std::result::Result<T, ResolveError>;
