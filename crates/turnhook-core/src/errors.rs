use thiserror::Error;

/// Result type alias using TurnhookError
pub type Result<T> = std::result::Result<T, TurnhookError>;

/// Classification of a failure, each with a stable `ERR_*` code for logs
/// and tests.
///
/// Dispatcher notify operations never return these; they come from snapshot
/// parsing, settings loading and the command-line front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    /// Snapshot bytes are not UTF-8 JSON, or not an array of combatants
    InvalidSnapshot,
    /// The same combatant id appears twice within one snapshot
    DuplicateCombatantId,
    /// A combatant record lacks a usable `id`
    MissingField,
    InvalidSettings,
    Io,
    Serialization,
}

impl ExErrorKind {
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidSnapshot => "ERR_INVALID_SNAPSHOT",
            ExErrorKind::DuplicateCombatantId => "ERR_DUPLICATE_COMBATANT_ID",
            ExErrorKind::MissingField => "ERR_MISSING_FIELD",
            ExErrorKind::InvalidSettings => "ERR_INVALID_SETTINGS",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
        }
    }
}

/// Error with a kind plus optional operation and combatant context.
///
/// Renders as `[CODE] in operation 'op': message (combatant_id: id)`.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    combatant_id: Option<String>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            combatant_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Name the operation that failed
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    pub fn with_combatant_id(mut self, id: impl Into<String>) -> Self {
        self.combatant_id = Some(id.into());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Chain the error that caused this one
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn combatant_id(&self) -> Option<&str> {
        self.combatant_id.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(combatant_id) = &self.combatant_id {
            write!(f, " (combatant_id: {})", combatant_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|s| s as &(dyn std::error::Error + 'static))
    }
}

/// Domain error taxonomy for turnhook operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TurnhookError {
    /// Snapshot input could not be understood
    #[error("Invalid snapshot: {reason}")]
    InvalidSnapshot { reason: String },

    /// A combatant id appears more than once within one snapshot
    #[error("Duplicate combatant id in snapshot: {combatant_id}")]
    DuplicateCombatantId { combatant_id: String },

    /// A combatant has an empty id
    #[error("Combatant at position {index} has an empty id")]
    EmptyCombatantId { index: usize },

    /// Webhook settings could not be loaded
    #[error("Invalid webhook settings: {reason}")]
    InvalidSettings { reason: String },

    /// Filesystem failure
    #[error("I/O error: {message}")]
    Io { message: String },

    /// JSON (de)serialization failure
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl From<TurnhookError> for ExError {
    fn from(err: TurnhookError) -> Self {
        match err {
            TurnhookError::InvalidSnapshot { reason } => {
                ExError::new(ExErrorKind::InvalidSnapshot).with_message(reason)
            }
            TurnhookError::DuplicateCombatantId { combatant_id } => {
                ExError::new(ExErrorKind::DuplicateCombatantId)
                    .with_combatant_id(combatant_id)
                    .with_message("Combatant id is not unique within the snapshot")
            }
            TurnhookError::EmptyCombatantId { index } => ExError::new(ExErrorKind::MissingField)
                .with_message(format!("Combatant at position {} has an empty id", index)),
            TurnhookError::InvalidSettings { reason } => {
                ExError::new(ExErrorKind::InvalidSettings).with_message(reason)
            }
            TurnhookError::Io { message } => ExError::new(ExErrorKind::Io).with_message(message),
            TurnhookError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

impl From<serde_json::Error> for TurnhookError {
    fn from(err: serde_json::Error) -> Self {
        TurnhookError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for TurnhookError {
    fn from(err: std::io::Error) -> Self {
        TurnhookError::Io {
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for TurnhookError {
    fn from(err: toml::de::Error) -> Self {
        TurnhookError::InvalidSettings {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(ExErrorKind::InvalidSnapshot.code(), "ERR_INVALID_SNAPSHOT");
        assert_eq!(
            ExErrorKind::DuplicateCombatantId.code(),
            "ERR_DUPLICATE_COMBATANT_ID"
        );
        assert_eq!(ExErrorKind::InvalidSettings.code(), "ERR_INVALID_SETTINGS");
    }

    #[test]
    fn test_duplicate_id_maps_to_ex_error() {
        let err = TurnhookError::DuplicateCombatantId {
            combatant_id: "goblin-1".to_string(),
        };
        let ex: ExError = err.into();
        assert_eq!(ex.kind(), ExErrorKind::DuplicateCombatantId);
        assert_eq!(ex.combatant_id(), Some("goblin-1"));
    }

    #[test]
    fn test_display_includes_context() {
        let ex = ExError::new(ExErrorKind::InvalidSnapshot)
            .with_op("parse_snapshot")
            .with_message("root must be an array")
            .with_combatant_id("c1");
        let rendered = ex.to_string();
        assert!(rendered.starts_with("[ERR_INVALID_SNAPSHOT]"));
        assert!(rendered.contains("parse_snapshot"));
        assert!(rendered.contains("root must be an array"));
        assert!(rendered.contains("combatant_id: c1"));
    }

    #[test]
    fn test_serde_json_error_converts() {
        let err = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        let converted: TurnhookError = err.into();
        assert!(matches!(converted, TurnhookError::Serialization { .. }));
    }
}
