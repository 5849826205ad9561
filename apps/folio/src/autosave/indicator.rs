use chrono::{DateTime, Local, Utc};

use super::SaveStatus;

impl SaveStatus {
    /// Indicator text as of `now`; `None` before the first save.
    pub fn label(&self, now: DateTime<Utc>) -> Option<String> {
        if self.saving {
            return Some("Saving...".to_string());
        }
        let saved = self.last_saved?;
        let seconds = (now - saved).num_seconds();
        let when = match seconds {
            s if s < 5 => "Just now".to_string(),
            s if s < 60 => format!("{s}s ago"),
            s if s < 3600 => format!("{}m ago", s / 60),
            _ => saved.with_timezone(&Local).format("%H:%M").to_string(),
        };
        Some(format!("Saved {when}"))
    }
}
