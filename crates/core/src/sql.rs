//! Parameterized SQL fragments for partial updates.
//!
//! Update DTOs resolve their present fields into ordered `(field, value)`
//! pairs; [`sql_for_partial_update`] turns those pairs into a `SET` fragment
//! using PostgreSQL numbered placeholders (`$1`, `$2`, ...) and returns the
//! values in the same order so they can be bound positionally.

use crate::error::CoreError;

/// Static translation from logical (API-facing) field names to physical
/// column names.
///
/// Fields without an entry are assumed to already be valid column names.
#[derive(Debug, Clone, Copy)]
pub struct ColumnMap {
    entries: &'static [(&'static str, &'static str)],
}

impl ColumnMap {
    pub const fn new(entries: &'static [(&'static str, &'static str)]) -> Self {
        Self { entries }
    }

    /// Resolve `field` to its physical column name.
    pub fn column<'a>(&self, field: &'a str) -> &'a str {
        self.entries
            .iter()
            .find(|(logical, _)| *logical == field)
            .map_or(field, |&(_, physical)| physical)
    }
}

/// A rendered `SET` fragment and the values bound to its placeholders.
///
/// `values[i]` is bound to placeholder `$(i + 1)`.
#[derive(Debug, Clone, PartialEq)]
pub struct PartialUpdate<V> {
    pub set_cols: String,
    pub values: Vec<V>,
}

impl<V> PartialUpdate<V> {
    /// Index of the first placeholder after the rendered assignments, for
    /// trailing parameters such as the row id in a `WHERE` clause.
    pub fn next_param(&self) -> usize {
        self.values.len() + 1
    }
}

/// Build the `SET` fragment for a partial update.
///
/// Each pair renders as `"<column>"=$<i>` in iteration order, joined with
/// `, `. Fails with [`CoreError::Validation`] when `data` is empty.
pub fn sql_for_partial_update<K, V, I>(
    data: I,
    columns: &ColumnMap,
) -> Result<PartialUpdate<V>, CoreError>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
{
    let data: Vec<(K, V)> = data.into_iter().collect();
    if data.is_empty() {
        return Err(CoreError::Validation("No data to update".into()));
    }

    let mut cols = Vec::with_capacity(data.len());
    let mut values = Vec::with_capacity(data.len());

    for (idx, (field, value)) in data.into_iter().enumerate() {
        let column = columns.column(field.as_ref());
        cols.push(format!("{}=${}", quote_ident(column), idx + 1));
        values.push(value);
    }

    Ok(PartialUpdate {
        set_cols: cols.join(", "),
        values,
    })
}

/// Quote a PostgreSQL identifier, doubling any embedded quotes.
fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}
