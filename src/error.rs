use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the collision geometry core.
///
/// "No collision" is deliberately not represented here: predictors report it
/// through the [`NO_COLLISION`](crate::core::NO_COLLISION) sentinel time, so
/// a scheduler can treat it as ordinary data rather than a failure.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid caller-supplied value (non-finite coordinate, non-positive
    /// radius or mass, coincident segment endpoints, out-of-range
    /// reflection coefficient, bad search configuration).
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// Degenerate geometry discovered mid-computation, e.g. a contact
    /// normal requested for coincident centers.
    #[error("numerical error: {0}")]
    MathError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_is_informative() {
        let e = Error::InvalidParam("radius must be > 0".to_string());
        let msg = format!("{e}");
        assert!(msg.contains("invalid parameter"));
        assert!(msg.contains("radius"));
    }

    #[test]
    fn math_error_display() {
        let e = Error::MathError("degenerate contact normal".to_string());
        assert!(format!("{e}").contains("numerical error"));
    }

    #[test]
    fn result_type_alias_compiles() -> Result<()> {
        Ok(())
    }
}
