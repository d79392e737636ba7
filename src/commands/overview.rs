use super::common::{Common, CommonArgs};
use crate::Result;
use crate::reports::{Overview, generate_console, generate_csv, generate_json};
use crate::stats::ActivityField;
use camino::Utf8PathBuf;
use chrono::Local;
use clap::Parser;
use ohno::IntoAppError;
use std::fs;

#[derive(Parser, Debug)]
pub struct OverviewArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Fetch a fresh member collection instead of using the cache
    #[arg(long)]
    pub refresh: bool,

    /// Activity field ranked in the leaderboard
    #[arg(long, value_name = "FIELD", default_value = "commits")]
    pub field: ActivityField,

    /// Days covered by the pull-request trend (overrides the configuration)
    #[arg(long, value_name = "DAYS", value_parser = clap::value_parser!(u32).range(1..))]
    pub trend_days: Option<u32>,

    /// Write the overview to a JSON file instead of the terminal
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub json: Option<Utf8PathBuf>,

    /// Write the overview to a CSV file instead of the terminal
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub csv: Option<Utf8PathBuf>,
}

/// Load the roster, fold it into the overview, and render it.
pub async fn show_overview(args: &OverviewArgs) -> Result<()> {
    let mut common = Common::new(&args.common)?;

    let _ = common.roster.load(args.refresh).await;

    let overview = Overview::build(
        common.roster.members(),
        common.roster.fetched_at(),
        args.field,
        args.trend_days.unwrap_or(common.config.dashboard.trend_days),
        common.config.dashboard.leaderboard_size,
        Local::now().date_naive(),
    );

    if let Some(path) = &args.json {
        let mut output = String::new();
        generate_json(&overview, &mut output)?;
        fs::write(path, output).into_app_err_with(|| format!("writing JSON report to '{path}'"))?;
    }

    if let Some(path) = &args.csv {
        let mut output = String::new();
        generate_csv(&overview, &mut output)?;
        fs::write(path, output).into_app_err_with(|| format!("writing CSV report to '{path}'"))?;
    }

    if args.json.is_none() && args.csv.is_none() {
        let mut output = String::new();
        generate_console(&overview, common.use_colors(), &mut output)?;
        print!("{output}");
    }

    Ok(())
}
