use super::common::{Common, CommonArgs};
use crate::Result;
use clap::Parser;

#[derive(Parser, Debug)]
pub struct RefreshArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Force a fresh fetch from the document store and summarize the result.
pub async fn refresh_roster(args: &RefreshArgs) -> Result<()> {
    let mut common = Common::new(&args.common)?;

    let members = common.roster.load(true).await;
    let connected = members.iter().filter(|m| m.github_connected).count();
    let count = members.len();

    match common.roster.fetched_at() {
        Some(at) => println!(
            "Refreshed {count} member(s), {connected} with GitHub connected, fetched at {}",
            at.format("%Y-%m-%d %H:%M UTC")
        ),
        None => println!("Refreshed {count} member(s), {connected} with GitHub connected"),
    }

    Ok(())
}
