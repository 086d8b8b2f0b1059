use regex::Regex;
use serde::{Deserialize, Serialize};

/// Release channel of a Mule runtime version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Channel {
    Edge,
    Lts,
    Unknown,
}

/// Numeric ordering key derived from a version string.
///
/// Missing components are padded with zero, so "4.4" orders as (4, 4, 0).
/// Comparison is numeric per component, never lexicographic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VersionKey(pub u64, pub u64, pub u64);

impl std::fmt::Display for VersionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.0, self.1, self.2)
    }
}

/// A single normalized version entry scraped from the docs.
///
/// `key` is always derivable from `raw_text` via [`classify`]. Records with
/// `channel == Unknown` only appear in full listings, never in latest
/// results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionRecord {
    pub channel: Channel,
    pub key: VersionKey,
    pub raw_text: String,
}

/// Latest record per release channel.
///
/// A channel with no classified record is omitted from serialized output
/// rather than null-filled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LatestVersions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edge: Option<VersionRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lts: Option<VersionRecord>,
}

/// Decide whether a token denotes a version string and normalize it.
///
/// Returns `None` when the token carries no digit-dot run. The first run
/// becomes the ordering key; trailing pre-release or build suffixes stay in
/// `raw_text` only. Tokens containing "edge" or "lts" (case-insensitive)
/// classify into that channel, with Edge checked first.
pub fn classify(token: &str) -> Option<VersionRecord> {
    let re = Regex::new(r"(\d+)\.(\d+)(?:\.(\d+))?").unwrap();
    let caps = re.captures(token)?;

    let major: u64 = caps[1].parse().ok()?;
    let minor: u64 = caps[2].parse().ok()?;
    let patch: u64 = caps
        .get(3)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0);

    let lowered = token.to_lowercase();
    let channel = if lowered.contains("edge") {
        Channel::Edge
    } else if lowered.contains("lts") {
        Channel::Lts
    } else {
        Channel::Unknown
    };

    Some(VersionRecord {
        channel,
        key: VersionKey(major, minor, patch),
        raw_text: token.trim().to_string(),
    })
}

/// Convert a JDK support string to the list of JDK major versions.
///
/// Handles formats like "8, 11, and 17" or "8 and 11" by collecting every
/// digit run in the text.
pub fn parse_jdk_versions(text: &str) -> Vec<u64> {
    let re = Regex::new(r"\d+").unwrap();
    re.find_iter(text)
        .filter_map(|m| m.as_str().parse().ok())
        .collect()
}

/// Select the maximum ordering key per channel.
///
/// Among records sharing the maximum key within a channel, the one appearing
/// earliest in document order wins; the docs list newest releases first.
/// `Unknown` records are never selected.
pub fn latest_by_channel(records: &[VersionRecord]) -> LatestVersions {
    let mut latest = LatestVersions::default();

    for record in records {
        let slot = match record.channel {
            Channel::Edge => &mut latest.edge,
            Channel::Lts => &mut latest.lts,
            Channel::Unknown => continue,
        };

        match slot {
            Some(current) if record.key <= current.key => {}
            _ => *slot = Some(record.clone()),
        }
    }

    latest
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_plain_version_is_unknown_channel() {
        let record = classify("4.4.0").unwrap();
        assert_eq!(record.channel, Channel::Unknown);
        assert_eq!(record.key, VersionKey(4, 4, 0));
        assert_eq!(record.raw_text, "4.4.0");
    }

    #[test]
    fn test_classify_edge_substring() {
        let record = classify("4.5.1 Edge").unwrap();
        assert_eq!(record.channel, Channel::Edge);
        assert_eq!(record.key, VersionKey(4, 5, 1));
    }

    #[test]
    fn test_classify_lts_substring_case_insensitive() {
        let record = classify("4.4.0 lts").unwrap();
        assert_eq!(record.channel, Channel::Lts);
    }

    #[test]
    fn test_classify_edge_takes_precedence_over_lts() {
        let record = classify("4.6.0 Edge (LTS upgrade path)").unwrap();
        assert_eq!(record.channel, Channel::Edge);
    }

    #[test]
    fn test_classify_two_component_version_pads_patch() {
        let record = classify("4.4").unwrap();
        assert_eq!(record.key, VersionKey(4, 4, 0));
    }

    #[test]
    fn test_classify_strips_prerelease_suffix_from_key() {
        let record = classify("4.5.0-SNAPSHOT").unwrap();
        assert_eq!(record.key, VersionKey(4, 5, 0));
        assert_eq!(record.raw_text, "4.5.0-SNAPSHOT");
    }

    #[test]
    fn test_classify_uses_first_digit_dot_run() {
        let record = classify("Mule 4.4.0 (September 2021)").unwrap();
        assert_eq!(record.key, VersionKey(4, 4, 0));
    }

    #[test]
    fn test_classify_no_digit_dot_pattern_is_none() {
        assert!(classify("").is_none());
        assert!(classify("latest release").is_none());
        assert!(classify("version 4").is_none());
        assert!(classify("JDK 17").is_none());
    }

    #[test]
    fn test_classify_trims_raw_text() {
        let record = classify("  4.4.0 LTS  ").unwrap();
        assert_eq!(record.raw_text, "4.4.0 LTS");
    }

    #[test]
    fn test_version_key_orders_numerically_not_lexicographically() {
        let a = classify("4.4").unwrap().key;
        let b = classify("4.4.1").unwrap().key;
        let c = classify("4.10.0").unwrap().key;

        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn test_version_key_display() {
        assert_eq!(VersionKey(4, 4, 0).to_string(), "4.4.0");
    }

    #[test]
    fn test_parse_jdk_versions_comma_and_word() {
        assert_eq!(parse_jdk_versions("8, 11, and 17"), vec![8, 11, 17]);
    }

    #[test]
    fn test_parse_jdk_versions_two_values() {
        assert_eq!(parse_jdk_versions("8 and 11"), vec![8, 11]);
    }

    #[test]
    fn test_parse_jdk_versions_empty() {
        assert_eq!(parse_jdk_versions(""), Vec::<u64>::new());
        assert_eq!(parse_jdk_versions("not applicable"), Vec::<u64>::new());
    }

    #[test]
    fn test_latest_by_channel_picks_max_per_channel() {
        let records = vec![
            classify("4.3.0 LTS").unwrap(),
            classify("4.4.0 EDGE").unwrap(),
            classify("4.4.1 EDGE").unwrap(),
        ];

        let latest = latest_by_channel(&records);

        assert_eq!(latest.lts.unwrap().key, VersionKey(4, 3, 0));
        assert_eq!(latest.edge.unwrap().key, VersionKey(4, 4, 1));
    }

    #[test]
    fn test_latest_by_channel_tie_keeps_earliest_document_occurrence() {
        let records = vec![
            VersionRecord {
                channel: Channel::Edge,
                key: VersionKey(4, 5, 0),
                raw_text: "4.5.0 Edge (first)".to_string(),
            },
            VersionRecord {
                channel: Channel::Edge,
                key: VersionKey(4, 5, 0),
                raw_text: "4.5.0 Edge (duplicate)".to_string(),
            },
        ];

        let latest = latest_by_channel(&records);

        assert_eq!(latest.edge.unwrap().raw_text, "4.5.0 Edge (first)");
    }

    #[test]
    fn test_latest_by_channel_ignores_unknown_records() {
        let records = vec![
            classify("9.9.9").unwrap(),
            classify("4.4.0 EDGE").unwrap(),
        ];

        let latest = latest_by_channel(&records);

        assert_eq!(latest.edge.unwrap().key, VersionKey(4, 4, 0));
        assert!(latest.lts.is_none());
    }

    #[test]
    fn test_latest_by_channel_empty_input() {
        let latest = latest_by_channel(&[]);
        assert!(latest.edge.is_none());
        assert!(latest.lts.is_none());
    }

    #[test]
    fn test_latest_versions_serialization_omits_absent_channel() {
        let latest = LatestVersions {
            edge: Some(classify("4.4.1 EDGE").unwrap()),
            lts: None,
        };

        let json = serde_json::to_string(&latest).unwrap();

        assert!(json.contains("\"edge\""));
        assert!(!json.contains("\"lts\""));
    }
}
