use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, trace};

use crate::context::Context;
use crate::errors::{ResolveError, Result};
use crate::marker::Matcher;
use crate::path;

pub const DEFAULT_MAX_PASSES: NonZeroUsize = match NonZeroUsize::new(1024) {
    Some(n) => n,
    None => panic!("pass limit must be non-zero"),
};

/// Knobs for a `Resolver`. Deserializable so a batch job can read them from
/// a config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolveOptions {
    /// Accept `${root.a.b}` in addition to `${root.a}`.
    pub chained_paths: bool,
    /// Extra passes allowed per phase beyond one per marker present in the
    /// input; only values that re-expose markers consume them.
    pub max_passes: NonZeroUsize,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            chained_paths: false,
            max_passes: DEFAULT_MAX_PASSES,
        }
    }
}

/// Fills `${key}` and `${root.attr}` markers in cell text.
///
/// Holds no per-call state; build one and share it freely.
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    opts: ResolveOptions,
    matcher: Matcher,
}

impl Resolver {
    pub fn new(opts: ResolveOptions) -> Self {
        let matcher = Matcher::new(&opts);
        Self { opts, matcher }
    }

    /// Resolves every marker in `text` against `ctx`.
    ///
    /// Plain markers are substituted first, one per pass, left to right, each
    /// pass scanning from the start of the updated text. Then the first dotted
    /// marker is evaluated and its result replaces the *whole* text. A missing
    /// key or root is an error; a failed attribute evaluation is logged and
    /// the text from phase one is returned as is.
    pub fn resolve(&self, text: &str, ctx: &Context) -> Result<String> {
        let text = self.substitute_plain(text.to_string(), ctx)?;
        self.substitute_path(text, ctx)
    }

    fn pass_budget(&self, markers: usize) -> usize {
        markers.saturating_add(self.opts.max_passes.get())
    }

    fn substitute_plain(&self, mut text: String, ctx: &Context) -> Result<String> {
        let budget = self.pass_budget(self.matcher.count_plain(&text));
        let mut passes = 0;
        while let Some(m) = self.matcher.find_plain(&text) {
            passes += 1;
            if passes > budget {
                return Err(ResolveError::PassLimit(self.opts.max_passes.get()));
            }
            let value = plain_value(&m.name, ctx)?;
            trace!(key = %m.name, value = %value, "substituting plain marker");
            text.replace_range(m.span, &value);
        }
        Ok(text)
    }

    fn substitute_path(&self, mut text: String, ctx: &Context) -> Result<String> {
        let budget = self.pass_budget(self.matcher.count_path(&text));
        let mut passes = 0;
        while let Some(m) = self.matcher.find_path(&text) {
            passes += 1;
            if passes > budget {
                return Err(ResolveError::PassLimit(self.opts.max_passes.get()));
            }
            let root = ctx
                .get(&m.root)
                .ok_or_else(|| ResolveError::UnresolvedRoot(m.root.clone()))?;
            match path::evaluate(root, &m.path) {
                Ok(resolved) => {
                    debug!(root = %m.root, path = %m.path, "path marker replaced whole text");
                    text = resolved;
                }
                Err(e) => {
                    error!(
                        root = %m.root,
                        path = %m.path,
                        text = %text,
                        "path evaluation failed, leaving text unresolved: {e}"
                    );
                    return Ok(text);
                }
            }
        }
        Ok(text)
    }
}

fn plain_value(key: &str, ctx: &Context) -> Result<String> {
    match ctx.get(key) {
        None | Some(Value::Null) => Err(ResolveError::UnresolvedKey(key.to_string())),
        Some(v) => path::render(v).ok_or_else(|| ResolveError::Unrenderable(key.to_string())),
    }
}
