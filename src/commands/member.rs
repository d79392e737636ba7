use super::common::{Common, CommonArgs};
use crate::Result;
use crate::github::FetchResult;
use crate::model::Member;
use crate::reports::{MemberDetail, generate_member_console};
use clap::Parser;
use ohno::app_err;

/// Commits requested for the detail view.
const COMMIT_COUNT: usize = 10;

#[derive(Parser, Debug)]
pub struct MemberArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// GitHub handle or roster id of the member
    #[arg(value_name = "HANDLE")]
    pub handle: String,
}

/// Show one member's roster record enriched with live GitHub data.
///
/// The profile is fetched first, then repositories, pull requests, and
/// commits in parallel, then the language breakdown (which walks the same
/// repositories and benefits from the pacing of the earlier fetches).
pub async fn show_member(args: &MemberArgs) -> Result<()> {
    let mut common = Common::new(&args.common)?;

    let _ = common.roster.load(false).await;
    let member = resolve(common.roster.members(), &args.handle)
        .ok_or_else(|| app_err!("no member with GitHub handle or id '{}' in the roster", args.handle))?
        .clone();

    let detail = match member.github_handle() {
        Some(handle) => {
            let handle = handle.to_string();
            let profile = common.provider.fetch_user(&handle).await;

            let (repos, pulls, commits) = tokio::join!(
                common.provider.fetch_repositories(&handle),
                common.provider.fetch_pulls(&handle),
                common.provider.fetch_commits(&handle, COMMIT_COUNT),
            );

            let languages = common.provider.fetch_languages(&handle).await;

            MemberDetail {
                is_admin: common.config.is_admin(&handle),
                member,
                profile,
                repos,
                pulls,
                commits,
                languages,
            }
        }
        None => MemberDetail {
            member,
            is_admin: false,
            profile: unlinked(),
            repos: unlinked(),
            pulls: unlinked(),
            commits: unlinked(),
            languages: unlinked(),
        },
    };

    let mut output = String::new();
    generate_member_console(&detail, common.use_colors(), &mut output)?;
    print!("{output}");

    Ok(())
}

/// Find a member by GitHub handle (case-insensitive) or by roster id.
fn resolve<'a>(members: &'a [Member], query: &str) -> Option<&'a Member> {
    members
        .iter()
        .find(|m| m.github_handle().is_some_and(|h| h.eq_ignore_ascii_case(query)))
        .or_else(|| members.iter().find(|m| m.id == query))
}

fn unlinked<T>() -> FetchResult<T> {
    FetchResult::Unavailable("member has no linked GitHub account".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(id: &str, handle: Option<&str>) -> Member {
        Member {
            id: id.to_string(),
            github_username: handle.map(str::to_string),
            ..Member::default()
        }
    }

    #[test]
    fn test_resolve_by_handle_ignores_case() {
        let members = vec![member("m-1", Some("Octocat")), member("m-2", None)];

        let found = resolve(&members, "octocat").unwrap();
        assert_eq!(found.id, "m-1");
    }

    #[test]
    fn test_resolve_falls_back_to_id() {
        let members = vec![member("m-1", Some("octocat")), member("m-2", None)];

        let found = resolve(&members, "m-2").unwrap();
        assert_eq!(found.id, "m-2");
    }

    #[test]
    fn test_resolve_prefers_handle_over_id() {
        // One member's id collides with another's handle; the handle wins.
        let members = vec![member("octocat", None), member("m-9", Some("octocat"))];

        let found = resolve(&members, "octocat").unwrap();
        assert_eq!(found.id, "m-9");
    }

    #[test]
    fn test_resolve_unknown_is_none() {
        assert!(resolve(&[member("m-1", None)], "ghost").is_none());
    }
}
