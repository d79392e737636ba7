use super::common::{Common, CommonArgs};
use crate::Result;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
pub struct CacheArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: CacheCommand,
}

#[derive(Subcommand, Debug)]
pub enum CacheCommand {
    /// Report whether the cache is populated and when it was fetched
    Status,

    /// Remove the cached member collection
    Clear,
}

/// Inspect or clear the persistent roster cache. Neither operation contacts
/// the document store.
pub async fn manage_cache(args: &CacheArgs) -> Result<()> {
    let mut common = Common::new(&args.common)?;

    match args.command {
        CacheCommand::Status => {
            println!("Directory  : {}", common.cache_dir.display());

            if !common.roster.is_valid() {
                println!("Cache      : empty");
                return Ok(());
            }

            // With both keys present, load(false) serves the persisted copy
            // without querying the document store.
            let members = common.roster.load(false).await;
            let connected = members.iter().filter(|m| m.github_connected).count();

            println!("Cache      : valid");
            println!("Members    : {} ({connected} with GitHub connected)", members.len());
            match common.roster.fetched_at() {
                Some(at) => println!("Fetched at : {}", at.format("%Y-%m-%d %H:%M UTC")),
                None => println!("Fetched at : unknown"),
            }
        }
        CacheCommand::Clear => {
            common.roster.clear();
            println!("Cleared the roster cache");
        }
    }

    Ok(())
}
