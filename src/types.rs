use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::calendar::YearMonth;
use crate::decimal::{Money, Rate};
use crate::errors::{AmortizationError, Result};

/// payment frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentFrequency {
    Monthly,
    SemiMonthly,
    Biweekly,
    Weekly,
}

impl PaymentFrequency {
    /// number of payment periods per year
    pub fn periods_per_year(&self) -> u32 {
        match self {
            PaymentFrequency::Monthly => 12,
            PaymentFrequency::SemiMonthly => 24,
            PaymentFrequency::Biweekly => 26,
            PaymentFrequency::Weekly => 52,
        }
    }

    /// number of periods covering a term expressed in months, rounded up
    pub fn periods_for_months(&self, months: u32) -> u32 {
        let periods = months as u64 * self.periods_per_year() as u64;
        periods.div_ceil(12) as u32
    }
}

/// loan terms for one calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub principal: Money,
    /// annual nominal rate as a percentage figure (4.5 means 4.5%)
    pub annual_rate_percent: Decimal,
    /// number of scheduled payment periods
    pub total_periods: u32,
    pub start_date: YearMonth,
    pub periods_per_year: u32,
    /// fixed payment to use instead of the amortizing payment
    #[serde(default)]
    pub scheduled_payment: Option<Money>,
}

impl LoanTerms {
    /// monthly loan with the amortizing payment
    pub fn monthly(
        principal: Money,
        annual_rate_percent: Decimal,
        term_months: u32,
        start_date: YearMonth,
    ) -> Self {
        Self {
            principal,
            annual_rate_percent,
            total_periods: term_months,
            start_date,
            periods_per_year: 12,
            scheduled_payment: None,
        }
    }

    /// same loan paid at a different frequency over the same number of months
    pub fn with_frequency(mut self, frequency: PaymentFrequency, term_months: u32) -> Self {
        self.periods_per_year = frequency.periods_per_year();
        self.total_periods = frequency.periods_for_months(term_months);
        self
    }

    /// override the periodic payment
    pub fn with_scheduled_payment(mut self, payment: Money) -> Self {
        self.scheduled_payment = Some(payment);
        self
    }

    pub fn annual_rate(&self) -> Rate {
        Rate::from_percent(self.annual_rate_percent)
    }

    pub fn periodic_rate(&self) -> Rate {
        self.annual_rate().periodic(self.periods_per_year)
    }

    /// check the terms describe a computable loan
    pub fn validate(&self) -> Result<()> {
        if !self.principal.is_positive() {
            return Err(AmortizationError::invalid_loan(format!(
                "principal must be positive, got {}",
                self.principal
            )));
        }
        if self.annual_rate_percent < Decimal::ZERO {
            return Err(AmortizationError::invalid_loan(format!(
                "annual rate must not be negative, got {}",
                self.annual_rate_percent
            )));
        }
        if self.total_periods == 0 {
            return Err(AmortizationError::invalid_loan("term must be at least one period"));
        }
        if self.periods_per_year == 0 {
            return Err(AmortizationError::invalid_loan("periods per year must be positive"));
        }
        if let Some(payment) = self.scheduled_payment {
            if !payment.is_positive() {
                return Err(AmortizationError::invalid_loan(format!(
                    "scheduled payment must be positive, got {}",
                    payment
                )));
            }
        }
        Ok(())
    }
}

/// why a period could not reduce principal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegenerateReason {
    /// the scheduled payment does not cover accrued interest
    PaymentBelowInterest,
    /// accrued interest is at least the whole balance
    InterestExceedsBalance,
}

impl fmt::Display for DegenerateReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DegenerateReason::PaymentBelowInterest => write!(f, "payment below accrued interest"),
            DegenerateReason::InterestExceedsBalance => write!(f, "interest exceeds balance"),
        }
    }
}

/// non-fatal schedule condition the caller should flag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduleWarning {
    Degenerate {
        period_index: u32,
        period_date: YearMonth,
        reason: DegenerateReason,
        /// accrued interest the scheduled payment did not cover
        unpaid_interest: Money,
    },
}

impl fmt::Display for ScheduleWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleWarning::Degenerate {
                period_index,
                period_date,
                reason,
                unpaid_interest,
            } => write!(
                f,
                "period {} ({}): principal not reduced, {}, {} interest unpaid",
                period_index, period_date, reason, unpaid_interest
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn start() -> YearMonth {
        YearMonth::new(2024, 1).unwrap()
    }

    #[test]
    fn test_frequency_periods() {
        assert_eq!(PaymentFrequency::Monthly.periods_for_months(360), 360);
        assert_eq!(PaymentFrequency::Biweekly.periods_for_months(360), 780);
        assert_eq!(PaymentFrequency::Weekly.periods_for_months(12), 52);
        // partial periods round up
        assert_eq!(PaymentFrequency::Biweekly.periods_for_months(1), 3);
    }

    #[test]
    fn test_periodic_rate() {
        let terms = LoanTerms::monthly(Money::from_major(1000), dec!(6), 12, start());
        assert_eq!(terms.periodic_rate().as_decimal(), dec!(0.005));

        let weekly = terms.with_frequency(PaymentFrequency::Weekly, 12);
        assert_eq!(weekly.periods_per_year, 52);
        assert_eq!(weekly.total_periods, 52);
    }

    #[test]
    fn test_validate_rejects_bad_terms() {
        let good = LoanTerms::monthly(Money::from_major(1000), dec!(5), 12, start());
        assert!(good.validate().is_ok());

        let mut bad = good.clone();
        bad.principal = Money::ZERO;
        assert!(matches!(
            bad.validate(),
            Err(AmortizationError::InvalidLoanParameters { .. })
        ));

        let mut bad = good.clone();
        bad.annual_rate_percent = dec!(-1);
        assert!(bad.validate().is_err());

        let mut bad = good.clone();
        bad.total_periods = 0;
        assert!(bad.validate().is_err());

        let bad = good.with_scheduled_payment(Money::ZERO);
        assert!(bad.validate().is_err());
    }
}
