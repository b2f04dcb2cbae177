use thiserror::Error;

/// Every failure the engine can report.
///
/// All errors are input-validation failures raised before any computation
/// starts; nothing is retried or partially applied.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SszError {
    /// Out-of-domain input: non-positive radius, target Ξ, coherence time,
    /// gate time, zero phase drift ahead of a division, NaN or infinity.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Rejected or unparseable model configuration.
    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, SszError>;

pub(crate) fn invalid(msg: impl Into<String>) -> SszError {
    SszError::InvalidArgument(msg.into())
}

/// Reject NaN and ±∞.
pub(crate) fn ensure_finite(name: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be finite, got {value}")))
    }
}

/// Require a finite value strictly greater than zero.
pub(crate) fn ensure_positive(name: &str, value: f64) -> Result<()> {
    ensure_finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be positive, got {value}")))
    }
}

/// Require a finite value greater than or equal to zero.
pub(crate) fn ensure_non_negative(name: &str, value: f64) -> Result<()> {
    ensure_finite(name, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be non-negative, got {value}")))
    }
}
