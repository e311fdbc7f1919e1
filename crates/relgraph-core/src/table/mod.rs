//! Relationship table loading.
//!
//! Rows are read once per render pass from a CSV file whose column names are
//! fixed by [`ColumnConfig`]. Loosely typed cells become a
//! [`RelationshipRow`] at this boundary: identifiers are trimmed strings,
//! empty optional cells become `None`, and weights must be non-negative.

mod lookup;

pub use lookup::{DetailTable, PropertyTable};

use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Serialize;

use crate::config::ColumnConfig;
use crate::error::DashboardError;

/// One undirected relationship between two entities.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelationshipRow {
    pub source: String,
    pub target: String,
    /// Relation label, used for edge color and the relation filter.
    pub relation: Option<String>,
    /// Non-negative edge weight, drawn as edge width.
    pub weight: Option<f64>,
    /// Row category, used by the tag filter.
    pub tag: Option<String>,
}

impl RelationshipRow {
    /// Create a row with only the required fields set.
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            relation: None,
            weight: None,
            tag: None,
        }
    }

    pub fn with_relation(mut self, relation: impl Into<String>) -> Self {
        self.relation = Some(relation.into());
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Whether `id` is one of the endpoints.
    pub fn touches(&self, id: &str) -> bool {
        self.source == id || self.target == id
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

/// Column positions resolved from a header row.
struct RowLayout {
    source: usize,
    target: usize,
    relation: Option<usize>,
    weight: Option<usize>,
    tag: Option<usize>,
}

impl RowLayout {
    fn resolve(headers: &StringRecord, columns: &ColumnConfig) -> Result<Self, String> {
        let find = |name: &str| headers.iter().position(|h| h == name);
        let required = |name: &str| find(name).ok_or_else(|| format!("missing required column '{}'", name));

        Ok(Self {
            source: required(&columns.source)?,
            target: required(&columns.target)?,
            relation: find(&columns.relation),
            weight: find(&columns.weight),
            tag: find(&columns.tag),
        })
    }

    fn parse(&self, record: &StringRecord, line: u64) -> Result<RelationshipRow, String> {
        let source = identifier(record, self.source, line, "source")?;
        let target = identifier(record, self.target, line, "target")?;
        let weight = match optional(record, self.weight) {
            Some(raw) => Some(parse_weight(&raw).map_err(|e| format!("line {}: {}", line, e))?),
            None => None,
        };

        Ok(RelationshipRow {
            source,
            target,
            relation: optional(record, self.relation),
            weight,
            tag: optional(record, self.tag),
        })
    }
}

fn identifier(record: &StringRecord, idx: usize, line: u64, what: &str) -> Result<String, String> {
    match record.get(idx) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(format!("line {}: empty {} identifier", line, what)),
    }
}

fn optional(record: &StringRecord, idx: Option<usize>) -> Option<String> {
    idx.and_then(|i| record.get(i))
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn parse_weight(raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .parse()
        .map_err(|_| format!("weight '{}' is not a number", raw))?;
    if !value.is_finite() || value < 0.0 {
        return Err(format!("weight '{}' must be a non-negative number", raw));
    }
    Ok(value)
}

/// Load relationship rows from a CSV file, in file order.
pub fn load_rows(
    path: impl AsRef<Path>,
    columns: &ColumnConfig,
) -> Result<Vec<RelationshipRow>, DashboardError> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|e| DashboardError::data_unavailable(path, e))?;
    let rows = read_rows(file, columns, path)?;
    tracing::debug!(path = %path.display(), rows = rows.len(), "loaded relationship table");
    Ok(rows)
}

/// Parse relationship rows from any reader. `origin` names the source in errors.
pub fn read_rows<R: Read>(
    reader: R,
    columns: &ColumnConfig,
    origin: &Path,
) -> Result<Vec<RelationshipRow>, DashboardError> {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| DashboardError::data_unavailable(origin, e))?
        .clone();
    let layout =
        RowLayout::resolve(&headers, columns).map_err(|e| DashboardError::data_unavailable(origin, e))?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| DashboardError::data_unavailable(origin, e))?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let row = layout
            .parse(&record, line)
            .map_err(|e| DashboardError::data_unavailable(origin, e))?;
        rows.push(row);
    }

    Ok(rows)
}
