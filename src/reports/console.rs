use super::{MemberDetail, Overview};
use crate::Result;
use crate::github::FetchResult;
use core::fmt::Write;
use owo_colors::OwoColorize;

/// Widest bar drawn in the trend section.
const TREND_BAR_WIDTH: usize = 30;

/// Commits shown in the member detail view.
const COMMITS_SHOWN: usize = 10;

/// Repositories shown in the member detail view.
const REPOS_SHOWN: usize = 5;

/// Languages shown in the member detail view.
const LANGUAGES_SHOWN: usize = 8;

/// Render the overview as sectioned console text.
pub fn generate<W: Write>(overview: &Overview, use_colors: bool, writer: &mut W) -> Result<()> {
    section(writer, "Team Overview", use_colors)?;
    writeln!(writer, "  Members    : {} ({} with GitHub connected)", overview.member_count, overview.connected_count)?;
    match overview.fetched_at {
        Some(at) => writeln!(writer, "  Fetched at : {}", at.format("%Y-%m-%d %H:%M UTC"))?,
        None => writeln!(writer, "  Fetched at : never")?,
    }

    writeln!(writer)?;
    section(writer, "Activity Totals", use_colors)?;
    let label_width = overview.totals.iter().map(|(field, _)| field.to_string().len()).max().unwrap_or(0);
    for (field, value) in &overview.totals {
        writeln!(writer, "  {:<label_width$} : {}", field.to_string(), format_count(*value))?;
    }

    writeln!(writer)?;
    section(writer, &format!("Top Members by {}", overview.leaderboard_field), use_colors)?;
    if overview.leaderboard.is_empty() {
        writeln!(writer, "  no members with activity data")?;
    } else {
        let name_width = overview.leaderboard.iter().map(|row| row.name.len()).max().unwrap_or(0);
        for (rank, row) in overview.leaderboard.iter().enumerate() {
            writeln!(writer, "  {:>2}. {:<name_width$}  {}", rank + 1, row.name, format_count(row.value))?;
        }
    }

    writeln!(writer)?;
    section(writer, &format!("Pull Requests (last {} days)", overview.trend.len()), use_colors)?;
    let max_count = overview.trend.iter().map(|day| day.count).max().unwrap_or(0);
    for day in &overview.trend {
        writeln!(writer, "  {}  {:>4}  {}", day.date.format("%Y-%m-%d"), day.count, bar(day.count, max_count))?;
    }

    writeln!(writer)?;
    let unit = match overview.languages.unit {
        crate::stats::LanguageUnit::Bytes => "bytes",
        crate::stats::LanguageUnit::Repositories => "repositories",
    };
    section(writer, &format!("Languages (by {unit})"), use_colors)?;
    if overview.languages.is_empty() {
        writeln!(writer, "  no language data")?;
    } else {
        let total: u64 = overview.languages.shares.iter().map(|share| share.count).sum();
        let name_width = overview.languages.shares.iter().map(|share| share.name.len()).max().unwrap_or(0);
        for share in &overview.languages.shares {
            let percent = share.count.saturating_mul(100) / total.max(1);
            writeln!(writer, "  {:<name_width$}  {:>3}%  {}", share.name, percent, format_count(share.count))?;
        }
    }

    Ok(())
}

/// Render a member detail view, including the outcome of every fetch.
pub fn generate_member<W: Write>(detail: &MemberDetail, use_colors: bool, writer: &mut W) -> Result<()> {
    section(writer, &format!("Member {}", detail.member.label()), use_colors)?;
    if let Some(email) = &detail.member.email {
        writeln!(writer, "  Email  : {email}")?;
    }
    match detail.member.github_handle() {
        Some(handle) if detail.is_admin => writeln!(writer, "  GitHub : {handle} (administrator)")?,
        Some(handle) => writeln!(writer, "  GitHub : {handle}")?,
        None => writeln!(writer, "  GitHub : not linked")?,
    }

    writeln!(writer)?;
    section(writer, "Fetches", use_colors)?;
    writeln!(writer, "  profile       : {}", status(&detail.profile, use_colors))?;
    writeln!(writer, "  repositories  : {}", status(&detail.repos, use_colors))?;
    writeln!(writer, "  pull requests : {}", status(&detail.pulls, use_colors))?;
    writeln!(writer, "  commits       : {}", status(&detail.commits, use_colors))?;
    writeln!(writer, "  languages     : {}", status(&detail.languages, use_colors))?;

    if let FetchResult::Found(profile) | FetchResult::Partial(profile) = &detail.profile {
        writeln!(writer)?;
        section(writer, "Profile", use_colors)?;
        if let Some(name) = &profile.name {
            writeln!(writer, "  Name         : {name}")?;
        }
        if let Some(company) = &profile.company {
            writeln!(writer, "  Company      : {company}")?;
        }
        if let Some(location) = &profile.location {
            writeln!(writer, "  Location     : {location}")?;
        }
        writeln!(writer, "  Public repos : {}", profile.public_repos)?;
        writeln!(writer, "  Followers    : {}", format_count(profile.followers))?;
        if let Some(created_at) = profile.created_at {
            writeln!(writer, "  Joined       : {}", created_at.format("%Y-%m-%d"))?;
        }
    }

    if let FetchResult::Found(repos) | FetchResult::Partial(repos) = &detail.repos {
        writeln!(writer)?;
        section(writer, &format!("Repositories ({})", repos.len()), use_colors)?;
        let mut by_stars: Vec<_> = repos.iter().collect();
        by_stars.sort_by(|a, b| b.stargazers_count.cmp(&a.stargazers_count));
        for repo in by_stars.iter().take(REPOS_SHOWN) {
            writeln!(writer, "  {:<4} ⭐  {}", format_count(repo.stargazers_count), repo.full_name)?;
        }
    }

    if let FetchResult::Found(pulls) | FetchResult::Partial(pulls) = &detail.pulls {
        writeln!(writer)?;
        section(writer, "Pull Requests", use_colors)?;
        writeln!(writer, "  Open   : {}", pulls.open)?;
        writeln!(writer, "  Closed : {}", pulls.closed)?;
        writeln!(writer, "  Merged : {}", pulls.merged)?;
    }

    if let FetchResult::Found(commits) | FetchResult::Partial(commits) = &detail.commits {
        writeln!(writer)?;
        section(writer, "Recent Commits", use_colors)?;
        for commit in commits.iter().take(COMMITS_SHOWN) {
            let date = commit.date.map_or_else(|| "          ".to_string(), |d| d.format("%Y-%m-%d").to_string());
            writeln!(writer, "  {date}  {}  {}", commit.repo, commit.title())?;
        }
    }

    if let FetchResult::Found(languages) | FetchResult::Partial(languages) = &detail.languages {
        writeln!(writer)?;
        section(writer, "Languages", use_colors)?;
        let mut shares: Vec<_> = languages.iter().collect();
        shares.sort_by(|a, b| b.1.cmp(a.1));
        let name_width = shares.iter().take(LANGUAGES_SHOWN).map(|(name, _)| name.len()).max().unwrap_or(0);
        for (name, bytes) in shares.into_iter().take(LANGUAGES_SHOWN) {
            writeln!(writer, "  {name:<name_width$}  {}", format_count(*bytes))?;
        }
    }

    Ok(())
}

fn section<W: Write>(writer: &mut W, title: &str, use_colors: bool) -> Result<()> {
    if use_colors {
        writeln!(writer, "{}", title.bold())?;
    } else {
        writeln!(writer, "{title}")?;
    }
    Ok(())
}

/// One-line fetch outcome: the status name, plus the reason for skipped or
/// failed fetches.
fn status<T>(result: &FetchResult<T>, use_colors: bool) -> String {
    let text = match result {
        FetchResult::Unavailable(reason) => format!("Unavailable ({reason})"),
        FetchResult::Error(e) => format!("Error ({e:#})"),
        other => other.status_str().to_string(),
    };

    if !use_colors {
        return text;
    }

    match result {
        FetchResult::Found(_) => text.green().to_string(),
        FetchResult::Partial(_) => text.yellow().to_string(),
        FetchResult::NotFound | FetchResult::Unavailable(_) | FetchResult::Error(_) => text.red().to_string(),
    }
}

/// A bar scaled so the largest count fills [`TREND_BAR_WIDTH`]; non-zero
/// counts always draw at least one cell.
fn bar(count: u64, max: u64) -> String {
    if count == 0 || max == 0 {
        return String::new();
    }

    let width = usize::try_from(count.saturating_mul(TREND_BAR_WIDTH as u64) / max).unwrap_or(TREND_BAR_WIDTH);
    "█".repeat(width.clamp(1, TREND_BAR_WIDTH))
}

/// Format a count with thousands separators.
fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index).is_multiple_of(3) {
            out.push(',');
        }
        out.push(ch);
    }

    out
}
