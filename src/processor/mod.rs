use crate::context::Context;
use crate::engine::Resolver;
use crate::errors::Result;

/// Cell content as handed over by the workbook layer.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Bool(bool),
    Formula(String),
    Blank,
}

/// One sheet row. `None` marks a slot with no cell object at all.
pub type Row = Vec<Option<CellValue>>;

/// Capability implemented by anything that can fill a template row.
///
/// Choosing between processors is left to the caller; `support` only reports
/// how strongly an implementation wants the row.
pub trait RowProcessor: Send + Sync {
    /// Priority hint for `row`; higher wins.
    fn support(&self, row: &Row) -> i32;

    /// Rewrites `row` in place and returns how many cells changed. On error
    /// the row is left exactly as it was.
    fn process_row(&self, row: &mut Row, ctx: &Context) -> Result<usize>;
}

/// Resolves markers in every text cell and leaves all other cells alone.
#[derive(Debug, Clone, Default)]
pub struct DefaultRowProcessor {
    resolver: Resolver,
}

impl DefaultRowProcessor {
    pub fn new(resolver: Resolver) -> Self {
        Self { resolver }
    }
}

impl RowProcessor for DefaultRowProcessor {
    fn support(&self, _row: &Row) -> i32 {
        0
    }

    fn process_row(&self, row: &mut Row, ctx: &Context) -> Result<usize> {
        let mut updates = Vec::new();
        for (i, cell) in row.iter().enumerate() {
            if let Some(CellValue::Text(s)) = cell {
                let resolved = self.resolver.resolve(s, ctx)?;
                if resolved != *s {
                    updates.push((i, resolved));
                }
            }
        }
        let changed = updates.len();
        for (i, resolved) in updates {
            row[i] = Some(CellValue::Text(resolved));
        }
        Ok(changed)
    }
}
