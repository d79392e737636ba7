//! CLI subcommands.
//!
//! Each subcommand owns its argument struct and an async entry point; the
//! shared pieces (configuration, roster, GitHub provider, logging, color
//! handling) live in [`common::Common`], which every command builds from the
//! flattened [`CommonArgs`].

mod cache;
mod common;
mod init;
mod member;
mod overview;
mod refresh;

pub use cache::{CacheArgs, CacheCommand, manage_cache};
pub use common::{ColorMode, Common, CommonArgs, LogLevel};
pub use init::{InitArgs, init_config};
pub use member::{MemberArgs, show_member};
pub use overview::{OverviewArgs, show_overview};
pub use refresh::{RefreshArgs, refresh_roster};
