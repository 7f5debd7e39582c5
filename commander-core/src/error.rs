//! Error types for catalog validation and view-state commands

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ─────────────────────────────────────────────────────────────
    // Startup validation
    // ─────────────────────────────────────────────────────────────
    #[error("scenario catalog is empty")]
    EmptyCatalog,

    #[error("scenario '{id}' has no steps")]
    EmptyScenario { id: String },

    #[error("scenario id '{id}' appears more than once")]
    DuplicateScenario { id: String },

    #[error("incident list is empty")]
    EmptyIncidentList,

    #[error("incident id '{id}' appears more than once")]
    DuplicateIncident { id: String },

    // ─────────────────────────────────────────────────────────────
    // Commands
    // ─────────────────────────────────────────────────────────────
    #[error("unknown scenario '{id}'")]
    UnknownScenario { id: String },

    #[error("unknown incident '{id}'")]
    UnknownIncident { id: String },

    #[error("logging setup failed: {message}")]
    Logging { message: String },
}

impl Error {
    pub fn unknown_scenario(id: impl Into<String>) -> Self {
        Self::UnknownScenario { id: id.into() }
    }

    pub fn unknown_incident(id: impl Into<String>) -> Self {
        Self::UnknownIncident { id: id.into() }
    }

    /// True for the errors a caller can correct by picking another id.
    pub fn is_unknown_id(&self) -> bool {
        matches!(self, Self::UnknownScenario { .. } | Self::UnknownIncident { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_ids_are_flagged() {
        assert!(Error::unknown_scenario("x").is_unknown_id());
        assert!(Error::unknown_incident("y").is_unknown_id());
        assert!(!Error::EmptyCatalog.is_unknown_id());
    }

    #[test]
    fn messages_name_the_offending_id() {
        let err = Error::EmptyScenario { id: "cpu-spike".into() };
        assert_eq!(err.to_string(), "scenario 'cpu-spike' has no steps");
    }
}
