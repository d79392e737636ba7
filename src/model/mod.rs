//! Member records and their embedded GitHub activity data.
//!
//! These are the documents the team document store holds. They were written
//! by a JavaScript admin application, so the wire form is camelCase and every
//! field is optional; deserialization fills gaps with defaults rather than
//! failing.

mod activity;
mod member;

pub use activity::{ActivitySnapshot, LanguageEntry, LanguageMix, PullRequestCounts};
pub use member::Member;
