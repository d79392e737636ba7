//! A team-activity dashboard for GitHub-connected rosters.
//!
//! # Overview
//!
//! `teampulse` aggregates the member records of a team stored in a cloud
//! document database and enriches them with live data from the GitHub REST
//! API. It produces activity totals, ranked leaderboards, a pull-request
//! trend, and a language distribution, rendered as console, JSON, or CSV
//! reports.
//!
//! # Quick Start
//!
//! Write a starter configuration and point it at your document store:
//!
//! ```bash
//! teampulse init
//! ```
//!
//! Fetch the roster and show the team overview:
//!
//! ```bash
//! teampulse refresh
//! teampulse overview
//! ```
//!
//! Drill into one member's live GitHub activity:
//!
//! ```bash
//! teampulse member octocat
//! ```
//!
//! The roster is cached on disk with no expiration; `teampulse refresh` (or
//! `overview --refresh`) replaces it, and `teampulse cache status` /
//! `teampulse cache clear` inspect and drop it. A GitHub token
//! (`--github-token` or `GITHUB_TOKEN`) and a store API key
//! (`--store-api-key` or `STORE_API_KEY`) unlock the remote data; without
//! them the tool degrades to whatever is cached.

use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};
use teampulse::Result;
use teampulse::commands::{
    CacheArgs, InitArgs, MemberArgs, OverviewArgs, RefreshArgs, init_config, manage_cache, refresh_roster, show_member, show_overview,
};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "teampulse", version, about = "Team activity dashboard over a member roster and GitHub")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: PulseSubcommand,
}

#[derive(Subcommand, Debug)]
enum PulseSubcommand {
    /// Show team-wide totals, rankings, trend, and language mix
    Overview(Box<OverviewArgs>),
    /// Fetch a fresh member collection from the document store
    Refresh(RefreshArgs),
    /// Show one member's roster record and live GitHub activity
    Member(Box<MemberArgs>),
    /// Inspect or clear the persistent roster cache
    Cache(CacheArgs),
    /// Generate a starter configuration file
    Init(InitArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    match &Cli::parse().command {
        PulseSubcommand::Overview(overview_args) => show_overview(overview_args).await,
        PulseSubcommand::Refresh(refresh_args) => refresh_roster(refresh_args).await,
        PulseSubcommand::Member(member_args) => show_member(member_args).await,
        PulseSubcommand::Cache(cache_args) => manage_cache(cache_args).await,
        PulseSubcommand::Init(init_args) => init_config(init_args),
    }
}
