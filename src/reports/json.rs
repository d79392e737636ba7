use super::Overview;
use crate::Result;
use core::fmt::Write;
use serde_json::json;

/// Schema version stamped into every JSON document.
const SCHEMA_VERSION: u32 = 1;

/// Render the overview as a pretty-printed JSON document.
pub fn generate<W: Write>(overview: &Overview, writer: &mut W) -> Result<()> {
    let totals: serde_json::Map<String, serde_json::Value> = overview
        .totals
        .iter()
        .map(|(field, value)| (field.to_string(), json!(value)))
        .collect();

    let output = json!({
        "schema_version": SCHEMA_VERSION,
        "summary": {
            "members": overview.member_count,
            "connected": overview.connected_count,
            "fetched_at": overview.fetched_at.map(|at| at.to_rfc3339()),
        },
        "totals": totals,
        "leaderboard": {
            "field": overview.leaderboard_field.to_string(),
            "rows": overview.leaderboard,
        },
        "trend": overview.trend,
        "languages": overview.languages,
    });

    write!(writer, "{}", serde_json::to_string_pretty(&output)?)?;
    Ok(())
}
