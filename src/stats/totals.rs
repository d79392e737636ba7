use crate::model::Member;
use clap::ValueEnum;
use strum::{Display, EnumIter};

/// A numeric activity field that aggregations can fold over.
///
/// Each variant knows how to pull its value out of a member's activity
/// snapshot; a member without a snapshot has no value for any field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Display, EnumIter)]
#[strum(serialize_all = "title_case")]
pub enum ActivityField {
    PublicRepos,
    PrivateRepos,
    Stars,
    Forks,
    PullRequests,
    Commits,
    Issues,
}

impl ActivityField {
    /// The field's value for one member, or `None` when the member has no
    /// activity snapshot.
    #[must_use]
    pub fn extract(self, member: &Member) -> Option<u64> {
        let data = member.github_data.as_ref()?;

        Some(match self {
            Self::PublicRepos => data.public_repos,
            Self::PrivateRepos => data.private_repos,
            Self::Stars => data.stars,
            Self::Forks => data.forks,
            Self::PullRequests => data.pull_requests.total(),
            Self::Commits => data.commits,
            Self::Issues => data.issues,
        })
    }
}

/// Sum `field` across all members, treating a missing snapshot as zero.
#[must_use]
pub fn total(members: &[Member], field: ActivityField) -> u64 {
    members.iter().filter_map(|member| field.extract(member)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ActivitySnapshot;
    use strum::IntoEnumIterator;

    fn member_with(commits: u64, stars: u64) -> Member {
        Member {
            github_data: Some(ActivitySnapshot {
                commits,
                stars,
                ..ActivitySnapshot::default()
            }),
            ..Member::default()
        }
    }

    #[test]
    fn test_total_over_empty_collection_is_zero() {
        for field in ActivityField::iter() {
            assert_eq!(total(&[], field), 0);
        }
    }

    #[test]
    fn test_total_sums_across_members() {
        let members = vec![member_with(10, 3), member_with(32, 0)];

        assert_eq!(total(&members, ActivityField::Commits), 42);
        assert_eq!(total(&members, ActivityField::Stars), 3);
    }

    #[test]
    fn test_total_treats_missing_snapshot_as_zero() {
        let members = vec![member_with(5, 0), Member::default()];

        assert_eq!(total(&members, ActivityField::Commits), 5);
    }

    #[test]
    fn test_extract_none_without_snapshot() {
        let member = Member::default();

        for field in ActivityField::iter() {
            assert_eq!(field.extract(&member), None);
        }
    }

    #[test]
    fn test_pull_requests_field_is_the_state_total() {
        let member = Member {
            github_data: Some(ActivitySnapshot {
                pull_requests: crate::model::PullRequestCounts {
                    open: 1,
                    closed: 2,
                    merged: 3,
                },
                ..ActivitySnapshot::default()
            }),
            ..Member::default()
        };

        assert_eq!(ActivityField::PullRequests.extract(&member), Some(6));
    }

    #[test]
    fn test_display_is_title_case() {
        assert_eq!(ActivityField::PublicRepos.to_string(), "Public Repos");
        assert_eq!(ActivityField::Stars.to_string(), "Stars");
    }
}
