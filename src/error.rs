use thiserror::Error;

/// Error taxonomy shared by every fallible engine operation.
///
/// Construction-time checks are validate-then-apply: a rejected call never
/// mutates engine state. `step()` itself is infallible; numerical edge cases
/// inside a step resolve to defined fallbacks instead of errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PhysicsError {
    /// Bad boundary or simulation parameter values.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A particle or constraint limit was exceeded.
    #[error("capacity error: {kind} limit of {limit} reached")]
    Capacity { kind: &'static str, limit: usize },

    /// A mutating call referenced an id the engine does not hold.
    #[error("not found: {0}")]
    NotFound(String),

    /// Malformed particle fields or constraint properties.
    #[error("validation error: {0}")]
    Validation(String),
}

pub type PhysicsResult<T> = Result<T, PhysicsError>;
