use serde::{Deserialize, Serialize};

use crate::calendar::YearMonth;
use crate::decimal::Money;
use crate::errors::{AmortizationError, Result};

/// additional principal contributions on top of the scheduled payment
///
/// Recurring and annual contributions are inert before `start_date`; the
/// one-time contribution applies in its own month regardless.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtraPaymentPolicy {
    /// added to every period
    #[serde(default)]
    pub recurring_amount: Money,
    /// added once per calendar year in `annual_month`
    #[serde(default)]
    pub annual_amount: Money,
    #[serde(default)]
    pub annual_month: Option<u32>,
    /// added once, in the first period of `one_time_date`
    #[serde(default)]
    pub one_time_amount: Money,
    #[serde(default)]
    pub one_time_date: Option<YearMonth>,
    pub start_date: YearMonth,
}

impl ExtraPaymentPolicy {
    /// policy with no contributions, starting at `start_date`
    pub fn starting(start_date: YearMonth) -> Self {
        Self {
            recurring_amount: Money::ZERO,
            annual_amount: Money::ZERO,
            annual_month: None,
            one_time_amount: Money::ZERO,
            one_time_date: None,
            start_date,
        }
    }

    pub fn recurring(mut self, amount: Money) -> Self {
        self.recurring_amount = amount;
        self
    }

    pub fn annual(mut self, amount: Money, month: u32) -> Self {
        self.annual_amount = amount;
        self.annual_month = Some(month);
        self
    }

    pub fn one_time(mut self, amount: Money, date: YearMonth) -> Self {
        self.one_time_amount = amount;
        self.one_time_date = Some(date);
        self
    }

    /// true when no contribution would ever apply
    pub fn is_empty(&self) -> bool {
        self.recurring_amount.is_zero() && self.annual_amount.is_zero() && self.one_time_amount.is_zero()
    }

    pub fn validate(&self) -> Result<()> {
        for (name, amount) in [
            ("recurring", self.recurring_amount),
            ("annual", self.annual_amount),
            ("one-time", self.one_time_amount),
        ] {
            if amount.is_negative() {
                return Err(AmortizationError::invalid_policy(format!(
                    "{} amount must not be negative, got {}",
                    name, amount
                )));
            }
        }

        if self.annual_amount.is_positive() {
            match self.annual_month {
                Some(month) if (1..=12).contains(&month) => {}
                Some(month) => {
                    return Err(AmortizationError::invalid_policy(format!(
                        "annual month {} is outside 1-12",
                        month
                    )));
                }
                None => {
                    return Err(AmortizationError::invalid_policy(
                        "annual amount requires an annual month",
                    ));
                }
            }
        }

        if self.one_time_amount.is_positive() && self.one_time_date.is_none() {
            return Err(AmortizationError::invalid_policy(
                "one-time amount requires a date",
            ));
        }

        Ok(())
    }
}

/// contributions applied in one period, by source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExtraBreakdown {
    pub recurring: Money,
    pub annual: Money,
    pub one_time: Money,
}

impl ExtraBreakdown {
    pub fn total(&self) -> Money {
        self.recurring + self.annual + self.one_time
    }
}

/// applies a policy period by period within one schedule run
///
/// Holds the only mutable state of a run: whether the one-time amount was
/// consumed and which year last received the annual amount.
#[derive(Debug)]
pub(crate) struct ExtraPaymentTracker<'a> {
    policy: Option<&'a ExtraPaymentPolicy>,
    one_time_consumed: bool,
    last_annual_year: Option<i32>,
}

impl<'a> ExtraPaymentTracker<'a> {
    pub(crate) fn new(policy: Option<&'a ExtraPaymentPolicy>) -> Self {
        Self {
            policy,
            one_time_consumed: false,
            last_annual_year: None,
        }
    }

    /// contributions due for a period dated `date`
    pub(crate) fn contributions_for(&mut self, date: YearMonth) -> ExtraBreakdown {
        let mut breakdown = ExtraBreakdown::default();
        let policy = match self.policy {
            Some(policy) => policy,
            None => return breakdown,
        };

        if date >= policy.start_date {
            breakdown.recurring = policy.recurring_amount;

            if policy.annual_amount.is_positive()
                && policy.annual_month == Some(date.month())
                && self.last_annual_year != Some(date.year())
            {
                breakdown.annual = policy.annual_amount;
                self.last_annual_year = Some(date.year());
            }
        }

        // the one-time amount is dated explicitly and ignores the start date

        if !self.one_time_consumed
            && policy.one_time_amount.is_positive()
            && policy.one_time_date == Some(date)
        {
            breakdown.one_time = policy.one_time_amount;
            self.one_time_consumed = true;
        }

        breakdown
    }

    /// whether any period dated after `date` could still receive a contribution
    pub(crate) fn has_future_contributions(&self, date: YearMonth) -> bool {
        let policy = match self.policy {
            Some(policy) => policy,
            None => return false,
        };

        if policy.recurring_amount.is_positive() || policy.annual_amount.is_positive() {
            return true;
        }

        match policy.one_time_date {
            Some(one_time_date) => {
                !self.one_time_consumed
                    && policy.one_time_amount.is_positive()
                    && one_time_date > date
            }
            None => false,
        }
    }
}
