//! Member roster storage.
//!
//! Three pieces stack together here: [`Client`] queries the cloud document
//! store for the raw member documents, [`KvStore`] is the durable string
//! key-value storage, and [`Roster`] is the cache in between, holding the
//! last-fetched collection in memory and mirroring it to storage under two
//! fixed keys.

mod client;
mod kv;
mod roster;

pub use client::Client;
pub use kv::KvStore;
pub use roster::{MEMBERS_KEY, Roster, SYNCED_AT_KEY};
