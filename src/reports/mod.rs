//! Multi-format report generation for team activity data
//!
//! This module turns the member collection into renderable views and renders
//! them for human or programmatic consumption.
//!
//! # Implementation Model
//!
//! Two views exist. [`Overview`] folds the whole member collection into
//! aggregate counts, a leaderboard, a pull-request trend, and a language
//! distribution, computed once so every output format agrees. [`MemberDetail`]
//! pairs one roster record with the per-resource outcomes of its on-demand
//! GitHub fetches.
//!
//! Three generators render the overview, each through a `generate` function
//! writing into any `fmt::Write` sink:
//! - **Console**: sectioned terminal output with optional ANSI colors
//! - **CSV**: long-format `Section,Name,Value` rows with proper escaping
//! - **JSON**: machine-readable structured data with a schema version
//!
//! The member detail view renders to the console only.

mod console;
mod csv;
mod json;
mod member;
mod overview;

pub use console::generate as generate_console;
pub use console::generate_member as generate_member_console;
pub use csv::generate as generate_csv;
pub use json::generate as generate_json;
pub use member::MemberDetail;
pub use overview::Overview;
