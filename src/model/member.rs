use super::ActivitySnapshot;
use serde::{Deserialize, Serialize};

/// One tracked individual, with optional linked GitHub activity data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Member {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub github_connected: bool,
    pub github_username: Option<String>,
    pub github_data: Option<ActivitySnapshot>,
}

impl Member {
    /// Human-readable name: display name, then "first last", then "Unknown".
    #[must_use]
    pub fn label(&self) -> String {
        if let Some(name) = &self.display_name
            && !name.trim().is_empty()
        {
            return name.trim().to_string();
        }

        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() { "Unknown".to_string() } else { full.to_string() }
    }

    /// The member's GitHub handle, if one is set and non-blank.
    #[must_use]
    pub fn github_handle(&self) -> Option<&str> {
        self.github_username.as_deref().map(str::trim).filter(|h| !h.is_empty())
    }
}
