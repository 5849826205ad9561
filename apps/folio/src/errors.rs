use serde_json::{json, Value};
use thiserror::Error;

use crate::media::MediaError;
use crate::storage::StorageError;

/// Rejected store mutation. The document is left untouched.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Unknown field '{field}' in section '{section}'")]
    UnknownField { section: String, field: String },

    #[error("Invalid value for section '{section}': {source}")]
    InvalidValue {
        section: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unknown color preset '{0}'")]
    UnknownPreset(String),
}

/// Why `save_portfolio` reported failure.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("Failed to serialize portfolio: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Error returned to the caller of an editor command.
/// Converted into a JSON reply by [`CommandError::into_reply`].
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Malformed command: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Media(#[from] MediaError),

    #[error("Save failed")]
    SaveFailed,
}

impl CommandError {
    pub fn code(&self) -> &'static str {
        match self {
            CommandError::Parse(_) => "MALFORMED_COMMAND",
            CommandError::Store(StoreError::UnknownField { .. }) => "UNKNOWN_FIELD",
            CommandError::Store(StoreError::InvalidValue { .. }) => "INVALID_VALUE",
            CommandError::Store(StoreError::UnknownPreset(_)) => "UNKNOWN_PRESET",
            CommandError::Media(MediaError::Store(_)) => "INVALID_VALUE",
            CommandError::Media(_) => "MEDIA_REJECTED",
            CommandError::SaveFailed => "SAVE_FAILED",
        }
    }

    pub fn into_reply(self) -> Value {
        json!({
            "ok": false,
            "error": {
                "code": self.code(),
                "message": self.to_string()
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_shape() {
        let err = CommandError::Store(StoreError::UnknownField {
            section: "hero".into(),
            field: "nickname".into(),
        });
        let reply = err.into_reply();
        assert_eq!(reply["ok"], false);
        assert_eq!(reply["error"]["code"], "UNKNOWN_FIELD");
        assert_eq!(
            reply["error"]["message"],
            "Unknown field 'nickname' in section 'hero'"
        );
    }

    #[test]
    fn test_save_failure_reply() {
        let reply = CommandError::SaveFailed.into_reply();
        assert_eq!(reply["error"]["code"], "SAVE_FAILED");
        assert_eq!(reply["error"]["message"], "Save failed");
    }
}
