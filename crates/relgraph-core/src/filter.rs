//! Category filters applied to the row set before graph construction.

use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DashboardError;
use crate::table::RelationshipRow;

/// Meaning of a selection with no values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmptySelection {
    /// Nothing selected filters nothing.
    #[default]
    ShowAll,
    /// Nothing selected drops every row.
    ShowNothing,
}

impl FromStr for EmptySelection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "show-all" | "all" => Ok(Self::ShowAll),
            "show-nothing" | "none" => Ok(Self::ShowNothing),
            other => Err(format!(
                "unknown empty-selection policy '{}' (expected show-all or show-nothing)",
                other
            )),
        }
    }
}

impl fmt::Display for EmptySelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShowAll => f.write_str("show-all"),
            Self::ShowNothing => f.write_str("show-nothing"),
        }
    }
}

/// A set of selected category values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Selection {
    values: BTreeSet<String>,
}

impl Selection {
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            values: values
                .into_iter()
                .map(Into::into)
                .filter(|v: &String| !v.is_empty())
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn contains(&self, value: &str) -> bool {
        self.values.contains(value)
    }

    pub fn values(&self) -> &BTreeSet<String> {
        &self.values
    }

    /// Whether this selection leaves rows untouched under `policy`.
    pub fn passes_everything(&self, policy: EmptySelection) -> bool {
        self.is_empty() && policy == EmptySelection::ShowAll
    }
}

fn filter_on<F>(
    rows: &[RelationshipRow],
    selection: &Selection,
    policy: EmptySelection,
    field: F,
) -> Vec<RelationshipRow>
where
    F: Fn(&RelationshipRow) -> Option<&str>,
{
    if selection.passes_everything(policy) {
        return rows.to_vec();
    }
    rows.iter()
        .filter(|row| field(row).map(|v| selection.contains(v)).unwrap_or(false))
        .cloned()
        .collect()
}

/// Keep rows whose relation is selected.
pub fn filter_by_relation(
    rows: &[RelationshipRow],
    selection: &Selection,
    policy: EmptySelection,
) -> Vec<RelationshipRow> {
    let kept = filter_on(rows, selection, policy, |r| r.relation.as_deref());
    tracing::debug!(before = rows.len(), after = kept.len(), "relation filter applied");
    kept
}

/// Keep rows whose tag column is selected.
pub fn filter_by_tag(
    rows: &[RelationshipRow],
    selection: &Selection,
    policy: EmptySelection,
) -> Vec<RelationshipRow> {
    let kept = filter_on(rows, selection, policy, |r| r.tag.as_deref());
    tracing::debug!(before = rows.len(), after = kept.len(), "tag filter applied");
    kept
}

/// Keep rows whose two endpoints are both allowed.
pub fn filter_by_node_names(rows: &[RelationshipRow], names: &HashSet<String>) -> Vec<RelationshipRow> {
    rows.iter()
        .filter(|row| names.contains(&row.source) && names.contains(&row.target))
        .cloned()
        .collect()
}

/// Signal `NoDataAfterFilter` for an empty row set.
pub fn ensure_rows(rows: Vec<RelationshipRow>) -> Result<Vec<RelationshipRow>, DashboardError> {
    if rows.is_empty() {
        Err(DashboardError::NoDataAfterFilter)
    } else {
        Ok(rows)
    }
}
