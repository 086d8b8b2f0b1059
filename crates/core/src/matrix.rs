use serde::Serialize;

use crate::tables::Table;
use crate::version::{classify, VersionRecord};

/// One subject paired with the versions it is compatible with.
///
/// `compatible_with` is non-empty by construction: rows with no classifiable
/// version cells never make it into a matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompatibilityRow {
    pub subject_id: String,
    pub compatible_with: Vec<VersionRecord>,
}

/// Insertion-ordered mapping from subject to compatible versions.
///
/// Key order follows source document order. A subject appearing in more than
/// one table keeps a single row; later occurrences append their versions to
/// it rather than replacing them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct VersionMatrix {
    rows: Vec<CompatibilityRow>,
}

impl VersionMatrix {
    pub fn get(&self, subject_id: &str) -> Option<&CompatibilityRow> {
        self.rows.iter().find(|row| row.subject_id == subject_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CompatibilityRow> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn append(&mut self, subject_id: String, mut records: Vec<VersionRecord>) {
        match self.rows.iter_mut().find(|row| row.subject_id == subject_id) {
            Some(row) => row.compatible_with.append(&mut records),
            None => self.rows.push(CompatibilityRow {
                subject_id,
                compatible_with: records,
            }),
        }
    }
}

/// Build a compatibility matrix from extracted tables.
///
/// Walks rows in document order. The first cell of each row is the subject;
/// the remaining cells are classified independently, skipping any that do
/// not denote a version. Rows yielding zero classifiable cells are dropped
/// entirely.
pub fn build_matrix(tables: &[Table]) -> VersionMatrix {
    let mut matrix = VersionMatrix::default();

    for table in tables {
        for row in &table.rows {
            let Some((subject, rest)) = row.split_first() else {
                continue;
            };

            let versions: Vec<VersionRecord> =
                rest.iter().filter_map(|cell| classify(cell)).collect();
            if versions.is_empty() {
                continue;
            }

            matrix.append(subject.clone(), versions);
        }
    }

    matrix
}

/// Classify every version-like token found anywhere in the tables.
///
/// Used for the runtime listing, where each cell (including the first) may
/// carry a version string. Unclassifiable cells are skipped.
pub fn collect_versions(tables: &[Table]) -> Vec<VersionRecord> {
    tables
        .iter()
        .flat_map(|table| table.rows.iter())
        .flat_map(|row| row.iter())
        .filter_map(|cell| classify(cell))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::{Channel, VersionKey};

    fn table(headers: &[&str], rows: &[&[&str]]) -> Table {
        Table {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: rows
                .iter()
                .map(|row| row.iter().map(|cell| cell.to_string()).collect())
                .collect(),
        }
    }

    #[test]
    fn test_build_matrix_pairs_subject_with_versions() {
        let tables = vec![table(
            &["Mule Version", "DataWeave Version"],
            &[&["4.4.0", "2.4.0"], &["4.3.0", "2.3.0"]],
        )];

        let matrix = build_matrix(&tables);

        assert_eq!(matrix.len(), 2);
        let row = matrix.get("4.4.0").unwrap();
        assert_eq!(row.compatible_with.len(), 1);
        assert_eq!(row.compatible_with[0].key, VersionKey(2, 4, 0));
    }

    #[test]
    fn test_build_matrix_preserves_document_order() {
        let tables = vec![table(
            &["Connector", "Mule"],
            &[&["ZConnector", "4.4.0"], &["AConnector", "4.3.0"]],
        )];

        let matrix = build_matrix(&tables);

        let subjects: Vec<&str> = matrix.iter().map(|r| r.subject_id.as_str()).collect();
        assert_eq!(subjects, vec!["ZConnector", "AConnector"]);
    }

    #[test]
    fn test_build_matrix_skips_unclassifiable_cells() {
        let tables = vec![table(
            &["Connector", "Mule", "Notes"],
            &[&["HTTP", "4.4.0", "see release notes"]],
        )];

        let matrix = build_matrix(&tables);

        let row = matrix.get("HTTP").unwrap();
        assert_eq!(row.compatible_with.len(), 1);
    }

    #[test]
    fn test_build_matrix_drops_rows_with_no_classifiable_cells() {
        let tables = vec![table(
            &["Connector", "Mule"],
            &[&["ConnectorX", ""], &["ConnectorY", "n/a"], &["HTTP", "4.4.0"]],
        )];

        let matrix = build_matrix(&tables);

        assert_eq!(matrix.len(), 1);
        assert!(matrix.get("ConnectorX").is_none());
        assert!(matrix.get("ConnectorY").is_none());
    }

    #[test]
    fn test_build_matrix_every_row_non_empty() {
        let tables = vec![table(
            &["Subject", "Versions"],
            &[&["A", "1.0.0"], &["B", "-"], &["C", "2.0.0", "2.1.0"]],
        )];

        let matrix = build_matrix(&tables);

        assert!(matrix.iter().all(|row| !row.compatible_with.is_empty()));
    }

    #[test]
    fn test_build_matrix_merges_duplicate_subjects_by_append() {
        let tables = vec![
            table(&["Connector", "Mule"], &[&["HTTP", "4.3.0"]]),
            table(&["Connector", "Mule"], &[&["HTTP", "4.4.0"]]),
        ];

        let matrix = build_matrix(&tables);

        assert_eq!(matrix.len(), 1);
        let row = matrix.get("HTTP").unwrap();
        let keys: Vec<VersionKey> = row.compatible_with.iter().map(|r| r.key).collect();
        assert_eq!(keys, vec![VersionKey(4, 3, 0), VersionKey(4, 4, 0)]);
    }

    #[test]
    fn test_build_matrix_is_idempotent() {
        let tables = vec![
            table(&["Connector", "Mule"], &[&["HTTP", "4.3.0"], &["FTP", "4.4.0"]]),
            table(&["Connector", "Mule"], &[&["HTTP", "4.4.0"]]),
        ];

        let first = build_matrix(&tables);
        let second = build_matrix(&tables);

        assert_eq!(first, second);
        let first_order: Vec<&str> = first.iter().map(|r| r.subject_id.as_str()).collect();
        let second_order: Vec<&str> = second.iter().map(|r| r.subject_id.as_str()).collect();
        assert_eq!(first_order, second_order);
    }

    #[test]
    fn test_build_matrix_empty_tables() {
        assert!(build_matrix(&[]).is_empty());
    }

    #[test]
    fn test_collect_versions_includes_every_cell() {
        let tables = vec![table(
            &["Version", "Release date"],
            &[
                &["4.3.0 LTS", "September 2021"],
                &["4.4.0 EDGE", "October 2021"],
                &["4.4.1 EDGE", "November 2021"],
            ],
        )];

        let versions = collect_versions(&tables);

        assert_eq!(versions.len(), 3);
        assert_eq!(versions[0].channel, Channel::Lts);
        assert_eq!(versions[2].key, VersionKey(4, 4, 1));
    }

    #[test]
    fn test_collect_versions_spans_multiple_tables() {
        let tables = vec![
            table(&["Version"], &[&["4.5.0 Edge"]]),
            table(&["Version"], &[&["4.4.0 LTS"]]),
        ];

        let versions = collect_versions(&tables);

        assert_eq!(versions.len(), 2);
        assert_eq!(versions[0].channel, Channel::Edge);
        assert_eq!(versions[1].channel, Channel::Lts);
    }

    #[test]
    fn test_collect_versions_skips_non_version_cells() {
        let tables = vec![table(
            &["Version", "Date"],
            &[&["4.4.0", "September 2021"]],
        )];

        // "September 2021" has no digit-dot run and must not classify.
        let versions = collect_versions(&tables);

        assert_eq!(versions.len(), 1);
    }

    #[test]
    fn test_matrix_serializes_as_ordered_rows() {
        let tables = vec![table(&["C", "M"], &[&["HTTP", "4.4.0"]])];
        let matrix = build_matrix(&tables);

        let json = serde_json::to_value(&matrix).unwrap();

        assert!(json.is_array());
        assert_eq!(json[0]["subject_id"], "HTTP");
        assert_eq!(json[0]["compatible_with"][0]["raw_text"], "4.4.0");
    }
}
