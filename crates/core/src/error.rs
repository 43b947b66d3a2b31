//! Calculation error types.
//!
//! Nothing here is fatal: callers degrade to a retained model or an
//! undefined aggregate figure.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("invalid input {parameter}: {reason}")]
    InvalidInput { parameter: String, reason: String },

    #[error("{quantity} is undefined: division by zero")]
    DivisionByZero { quantity: &'static str },

    #[error("annual benefit {annual_benefit:.2} is negative; investment is never paid back")]
    NoPayback { annual_benefit: f64 },

    #[error("{quantity} overflowed: inputs are too large to evaluate")]
    Overflow { quantity: String },
}

impl CalcError {
    pub fn invalid(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }
}

/// Pass `value` through, or fail with [`CalcError::Overflow`] naming
/// `quantity` when it is infinite or NaN.
pub fn finite(quantity: impl Into<String>, value: f64) -> CalcResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::Overflow {
            quantity: quantity.into(),
        })
    }
}

pub type CalcResult<T> = Result<T, CalcError>;
