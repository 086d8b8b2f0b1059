use serde::Serialize;

use crate::tables::Table;
use crate::version::{classify, parse_jdk_versions, VersionRecord};

/// Supported JDK majors for one runtime version, as listed on the Java
/// support page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JdkSupport {
    pub runtime: VersionRecord,
    pub jdk_versions: Vec<u64>,
    pub jdk_raw: String,
}

/// Pair each runtime row with its supported JDK versions.
///
/// Expects rows shaped `[runtime, jdk-list, ...]`. Rows whose first cell
/// does not classify as a version, or whose JDK cell carries no digits, are
/// skipped.
pub fn build_jdk_support(tables: &[Table]) -> Vec<JdkSupport> {
    let mut support = Vec::new();

    for table in tables {
        for row in &table.rows {
            if row.len() < 2 {
                continue;
            }
            let Some(runtime) = classify(&row[0]) else {
                continue;
            };

            let jdk_raw = row[1].clone();
            let jdk_versions = parse_jdk_versions(&jdk_raw);
            if jdk_versions.is_empty() {
                continue;
            }

            support.push(JdkSupport {
                runtime,
                jdk_versions,
                jdk_raw,
            });
        }
    }

    support
}
