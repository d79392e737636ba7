use crate::model::Member;
use serde::Serialize;
use std::collections::BTreeMap;

/// Languages kept after sorting the merged mapping.
const TOP_LANGUAGES: usize = 15;

/// Counts above this are taken to be byte counts rather than repository
/// counts.
const BYTE_THRESHOLD: u64 = 10_000;

/// What the counts in a [`LanguageDistribution`] measure. Snapshots do not
/// record this, so it is inferred from the magnitude of the largest count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LanguageUnit {
    Bytes,
    Repositories,
}

/// One language and its merged count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageShare {
    pub name: String,
    pub count: u64,
}

/// The language mix merged across every member, largest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageDistribution {
    pub unit: LanguageUnit,
    pub shares: Vec<LanguageShare>,
}

impl LanguageDistribution {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }
}

/// Merge every member's language mapping into one distribution.
///
/// Both wire forms of the mapping are supported. Entries with an empty,
/// "Unknown", or "null" name, and entries with a non-positive count, are
/// dropped. The merged mapping is sorted descending and cut to the top
/// [`TOP_LANGUAGES`]; the unit is [`LanguageUnit::Bytes`] when the largest
/// count exceeds [`BYTE_THRESHOLD`].
#[must_use]
pub fn language_distribution(members: &[Member]) -> LanguageDistribution {
    let mut merged: BTreeMap<String, u64> = BTreeMap::new();

    for member in members {
        let Some(data) = &member.github_data else { continue };

        for (name, count) in data.languages.entries() {
            if name.is_empty() || name == "Unknown" || name == "null" || count <= 0 {
                continue;
            }

            *merged.entry(name.to_string()).or_insert(0) += u64::try_from(count).unwrap_or_default();
        }
    }

    let unit = if merged.values().copied().max().unwrap_or(0) > BYTE_THRESHOLD {
        LanguageUnit::Bytes
    } else {
        LanguageUnit::Repositories
    };

    let mut shares: Vec<LanguageShare> = merged.into_iter().map(|(name, count)| LanguageShare { name, count }).collect();
    shares.sort_by(|a, b| b.count.cmp(&a.count));
    shares.truncate(TOP_LANGUAGES);

    LanguageDistribution { unit, shares }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ActivitySnapshot, LanguageEntry, LanguageMix};

    fn member_with_counts(pairs: &[(&str, i64)]) -> Member {
        let map = pairs.iter().map(|(name, count)| ((*name).to_string(), *count)).collect();

        Member {
            github_data: Some(ActivitySnapshot {
                languages: LanguageMix::Counts(map),
                ..ActivitySnapshot::default()
            }),
            ..Member::default()
        }
    }

    #[test]
    fn test_excludes_placeholder_names_and_non_positive_counts() {
        let members = vec![member_with_counts(&[
            ("JS", 500),
            ("Unknown", 10),
            ("Go", 0),
            ("null", 3),
            ("", 7),
            ("C", -4),
        ])];

        let dist = language_distribution(&members);

        assert_eq!(dist.shares.len(), 1);
        assert_eq!(dist.shares[0].name, "JS");
        assert_eq!(dist.shares[0].count, 500);
    }

    #[test]
    fn test_merges_across_members_and_wire_forms() {
        let entries_member = Member {
            github_data: Some(ActivitySnapshot {
                languages: LanguageMix::Entries(vec![
                    LanguageEntry {
                        name: "Rust".to_string(),
                        count: 3,
                    },
                    LanguageEntry {
                        name: "Go".to_string(),
                        count: 1,
                    },
                ]),
                ..ActivitySnapshot::default()
            }),
            ..Member::default()
        };
        let members = vec![member_with_counts(&[("Rust", 2)]), entries_member];

        let dist = language_distribution(&members);

        assert_eq!(dist.shares[0].name, "Rust");
        assert_eq!(dist.shares[0].count, 5);
        assert_eq!(dist.shares[1].count, 1);
    }

    #[test]
    fn test_unit_inferred_from_magnitude() {
        let bytes = language_distribution(&[member_with_counts(&[("Rust", 120_000)])]);
        assert_eq!(bytes.unit, LanguageUnit::Bytes);

        let repos = language_distribution(&[member_with_counts(&[("Rust", 9)])]);
        assert_eq!(repos.unit, LanguageUnit::Repositories);

        // The threshold itself still reads as a repository count
        let edge = language_distribution(&[member_with_counts(&[("Rust", 10_000)])]);
        assert_eq!(edge.unit, LanguageUnit::Repositories);
    }

    #[test]
    fn test_keeps_top_fifteen() {
        let pairs: Vec<(String, i64)> = (0..20).map(|i| (format!("lang{i:02}"), i64::from(i) + 1)).collect();
        let borrowed: Vec<(&str, i64)> = pairs.iter().map(|(n, c)| (n.as_str(), *c)).collect();
        let members = vec![member_with_counts(&borrowed)];

        let dist = language_distribution(&members);

        assert_eq!(dist.shares.len(), 15);
        assert_eq!(dist.shares[0].count, 20);
        assert_eq!(dist.shares[14].count, 6);
    }

    #[test]
    fn test_empty_collection() {
        let dist = language_distribution(&[]);

        assert!(dist.is_empty());
        assert_eq!(dist.unit, LanguageUnit::Repositories);
    }
}
