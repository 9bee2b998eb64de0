use thiserror::Error;

use crate::decimal::Money;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AmortizationError {
    #[error("invalid loan parameters: {message}")]
    InvalidLoanParameters {
        message: String,
    },

    #[error("invalid extra payment policy: {message}")]
    InvalidExtraPaymentPolicy {
        message: String,
    },

    #[error("amortization did not converge after {periods} periods: remaining balance {remaining_balance}")]
    AmortizationDidNotConverge {
        periods: u32,
        remaining_balance: Money,
    },

    #[error("invalid date: {message}")]
    InvalidDate {
        message: String,
    },

    #[error("invalid calculator input: {message}")]
    InvalidCalculatorInput {
        message: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },
}

impl AmortizationError {
    pub(crate) fn invalid_loan(message: impl Into<String>) -> Self {
        AmortizationError::InvalidLoanParameters {
            message: message.into(),
        }
    }

    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        AmortizationError::InvalidCalculatorInput {
            message: message.into(),
        }
    }

    pub(crate) fn invalid_policy(message: impl Into<String>) -> Self {
        AmortizationError::InvalidExtraPaymentPolicy {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for AmortizationError {
    fn from(err: serde_json::Error) -> Self {
        AmortizationError::InvalidConfiguration {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AmortizationError>;
