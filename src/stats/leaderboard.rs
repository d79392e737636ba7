use super::ActivityField;
use crate::model::Member;
use serde::Serialize;

/// One leaderboard row: a member's resolved name and field value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardRow {
    pub name: String,
    pub value: u64,
}

/// Rank members by `field`, highest first, keeping at most `size` rows.
///
/// Members without an activity snapshot are excluded rather than ranked at
/// zero. The sort is stable: members with equal values keep their original
/// relative order. Names resolve through the display name, then
/// "first last", then "Unknown".
#[must_use]
pub fn leaderboard(members: &[Member], field: ActivityField, size: usize) -> Vec<LeaderboardRow> {
    let mut rows: Vec<LeaderboardRow> = members
        .iter()
        .filter_map(|member| {
            field.extract(member).map(|value| LeaderboardRow {
                name: member.label(),
                value,
            })
        })
        .collect();

    rows.sort_by(|a, b| b.value.cmp(&a.value));
    rows.truncate(size);
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ActivitySnapshot;

    fn member(name: &str, commits: u64) -> Member {
        Member {
            display_name: Some(name.to_string()),
            github_data: Some(ActivitySnapshot {
                commits,
                ..ActivitySnapshot::default()
            }),
            ..Member::default()
        }
    }

    #[test]
    fn test_leaderboard_orders_descending() {
        let members = vec![member("low", 3), member("high", 90), member("mid", 40)];

        let rows = leaderboard(&members, ActivityField::Commits, 10);
        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();

        assert_eq!(names, vec!["high", "mid", "low"]);
    }

    #[test]
    fn test_leaderboard_ties_keep_original_order() {
        let members = vec![member("first", 7), member("second", 7), member("third", 7)];

        let rows = leaderboard(&members, ActivityField::Commits, 10);
        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();

        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_leaderboard_truncates_to_size() {
        let members: Vec<Member> = (0..20).map(|i| member(&format!("m{i}"), i)).collect();

        let rows = leaderboard(&members, ActivityField::Commits, 10);

        assert_eq!(rows.len(), 10);
        assert_eq!(rows[0].value, 19);
    }

    #[test]
    fn test_leaderboard_excludes_members_without_snapshot() {
        let members = vec![member("active", 5), Member::default()];

        let rows = leaderboard(&members, ActivityField::Commits, 10);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "active");
    }

    #[test]
    fn test_leaderboard_resolves_name_fallback() {
        let members = vec![Member {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            github_data: Some(ActivitySnapshot::default()),
            ..Member::default()
        }];

        let rows = leaderboard(&members, ActivityField::Commits, 10);

        assert_eq!(rows[0].name, "Ada Lovelace");
    }

    #[test]
    fn test_leaderboard_empty_collection() {
        assert!(leaderboard(&[], ActivityField::Stars, 10).is_empty());
    }
}
