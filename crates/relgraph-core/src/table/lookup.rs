//! Auxiliary lookup tables joined against rendered node ids.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Serialize;

use crate::error::DashboardError;

fn open_reader(path: &Path) -> Result<csv::Reader<std::fs::File>, DashboardError> {
    ReaderBuilder::new()
        .trim(Trim::All)
        .from_path(path)
        .map_err(|e| DashboardError::data_unavailable(path, e))
}

fn column_index(headers: &StringRecord, name: &str, path: &Path) -> Result<usize, DashboardError> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| DashboardError::data_unavailable(path, format!("missing required column '{}'", name)))
}

/// Node-property table: entity name -> tag.
///
/// A name may carry several tags (one per row).
#[derive(Debug, Clone, Default)]
pub struct PropertyTable {
    entries: Vec<(String, String)>,
}

impl PropertyTable {
    pub fn load(path: impl AsRef<Path>, name_col: &str, tag_col: &str) -> Result<Self, DashboardError> {
        let path = path.as_ref();
        let mut reader = open_reader(path)?;
        let headers = reader
            .headers()
            .map_err(|e| DashboardError::data_unavailable(path, e))?
            .clone();
        let name_idx = column_index(&headers, name_col, path)?;
        let tag_idx = column_index(&headers, tag_col, path)?;

        let mut entries = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| DashboardError::data_unavailable(path, e))?;
            let name = record.get(name_idx).unwrap_or_default();
            let tag = record.get(tag_idx).unwrap_or_default();
            // rows without a tag never match a tag selection
            if !name.is_empty() && !tag.is_empty() {
                entries.push((name.to_string(), tag.to_string()));
            }
        }

        tracing::debug!(path = %path.display(), entries = entries.len(), "loaded property table");
        Ok(Self { entries })
    }

    /// Distinct tags, sorted.
    pub fn all_tags(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|(_, tag)| tag.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Names carrying at least one of the selected tags.
    pub fn names_with_tags(&self, selected: &BTreeSet<String>) -> HashSet<String> {
        self.entries
            .iter()
            .filter(|(_, tag)| selected.contains(tag))
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// First tag listed for each name.
    pub fn tag_by_name(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        for (name, tag) in &self.entries {
            map.entry(name.clone()).or_insert_with(|| tag.clone());
        }
        map
    }
}

/// Entity-detail table keyed by one column, displayed below the graph.
#[derive(Debug, Clone, Serialize)]
pub struct DetailTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    #[serde(skip)]
    key_index: usize,
}

impl DetailTable {
    pub fn load(path: impl AsRef<Path>, key_col: &str) -> Result<Self, DashboardError> {
        let path = path.as_ref();
        let mut reader = open_reader(path)?;
        let headers = reader
            .headers()
            .map_err(|e| DashboardError::data_unavailable(path, e))?
            .clone();
        let key_index = column_index(&headers, key_col, path)?;

        let rows = reader
            .records()
            .map(|r| {
                r.map(|record| record.iter().map(str::to_string).collect())
                    .map_err(|e| DashboardError::data_unavailable(path, e))
            })
            .collect::<Result<Vec<Vec<String>>, _>>()?;

        Ok(Self {
            headers: headers.iter().map(str::to_string).collect(),
            rows,
            key_index,
        })
    }

    /// Rows whose key matches one of `ids` exactly, sorted by key.
    pub fn join<'a>(&self, ids: impl IntoIterator<Item = &'a str>) -> DetailTable {
        let wanted: HashSet<&str> = ids.into_iter().collect();
        let mut rows: Vec<Vec<String>> = self
            .rows
            .iter()
            .filter(|row| {
                row.get(self.key_index)
                    .map(|k| wanted.contains(k.as_str()))
                    .unwrap_or(false)
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| a[self.key_index].cmp(&b[self.key_index]));

        DetailTable {
            headers: self.headers.clone(),
            rows,
            key_index: self.key_index,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_property_tags_sorted_and_distinct() {
        let file = write_csv("name,tag\nA,surgery\nB,cardiology\nC,surgery\nD,\n");
        let table = PropertyTable::load(file.path(), "name", "tag").unwrap();
        assert_eq!(table.all_tags(), vec!["cardiology", "surgery"]);

        let selected: BTreeSet<String> = ["surgery".to_string()].into();
        let names = table.names_with_tags(&selected);
        assert!(names.contains("A") && names.contains("C"));
        assert!(!names.contains("B"));
    }

    #[test]
    fn test_detail_join_sorted_by_key() {
        let file = write_csv("hcp_name,hco_name\nZed,North\nAmy,South\nBob,East\n");
        let table = DetailTable::load(file.path(), "hcp_name").unwrap();
        let joined = table.join(["Zed", "Amy", "Nobody"]);
        assert_eq!(joined.headers, vec!["hcp_name", "hco_name"]);
        assert_eq!(
            joined.rows,
            vec![
                vec!["Amy".to_string(), "South".to_string()],
                vec!["Zed".to_string(), "North".to_string()],
            ]
        );
    }

    #[test]
    fn test_detail_missing_key_column() {
        let file = write_csv("person,org\nA,X\n");
        let err = DetailTable::load(file.path(), "hcp_name").unwrap_err();
        assert!(matches!(err, DashboardError::DataUnavailable { .. }));
    }
}
