use thiserror::Error;

/// Failures surfaced by tooltip construction, configuration and toggling.
#[derive(Debug, Error)]
pub enum TooltipError {
    /// Neither a wrapped child nor an explicit target was supplied.
    #[error("tooltip needs a wrapped child or an explicit target")]
    MissingTarget,
    /// The target could not be measured when an open was requested.
    #[error("tooltip target is not laid out or no longer exists")]
    TargetUnavailable,
    #[error("tooltip controller was disposed")]
    Disposed,
    #[error("invalid tooltip config: {0}")]
    InvalidConfig(#[from] ron::error::SpannedError),
    #[error("invalid color `{value}` in tooltip config")]
    InvalidColor { value: String },
}
