use serde::{Deserialize, Serialize};

use crate::calendar::{YearMonth, YearsMonths};
use crate::decimal::Money;
use crate::errors::Result;
use crate::payments::amortization::{generate_schedule, ScheduleResult};
use crate::payments::extra::ExtraPaymentPolicy;
use crate::types::LoanTerms;

/// savings of a variant schedule relative to a baseline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleComparison {
    /// baseline interest minus variant interest, negative when the variant costs more
    pub interest_saved_signed: Money,
    /// signed saving floored at zero for display
    pub interest_saved: Money,
    pub time_saved: YearsMonths,
    pub periods_saved: u32,
    pub baseline_payoff: YearMonth,
    pub variant_payoff: YearMonth,
}

impl ScheduleComparison {
    /// the variant pays more interest than the baseline
    pub fn costs_more(&self) -> bool {
        self.interest_saved_signed.is_negative()
    }

    /// the variant finishes strictly earlier
    pub fn pays_off_earlier(&self) -> bool {
        self.variant_payoff < self.baseline_payoff
    }
}

/// compare a variant schedule against its baseline
pub fn compare_schedules(baseline: &ScheduleResult, variant: &ScheduleResult) -> ScheduleComparison {
    let interest_saved_signed = baseline.total_interest_paid - variant.total_interest_paid;

    ScheduleComparison {
        interest_saved_signed,
        interest_saved: interest_saved_signed.max(Money::ZERO),
        time_saved: time_between(variant.payoff_date, baseline.payoff_date),
        periods_saved: baseline.total_periods.saturating_sub(variant.total_periods),
        baseline_payoff: baseline.payoff_date,
        variant_payoff: variant.payoff_date,
    }
}

/// calendar distance from `earlier` to `later` with month borrowing
///
/// Zero when `later` is not after `earlier`.
pub fn time_between(earlier: YearMonth, later: YearMonth) -> YearsMonths {
    if later <= earlier {
        return YearsMonths::ZERO;
    }

    let mut years = later.year() - earlier.year();
    let mut months = later.month() as i32 - earlier.month() as i32;
    if months < 0 {
        years -= 1;
        months += 12;
    }

    YearsMonths {
        years: years as u32,
        months: months as u32,
    }
}

/// baseline and accelerated schedules for the same loan
///
/// This is the payoff / extra-payment calculator: the baseline ignores the
/// policy, the accelerated schedule applies it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoffScenario {
    pub baseline: ScheduleResult,
    pub accelerated: ScheduleResult,
    pub comparison: ScheduleComparison,
}

impl PayoffScenario {
    pub fn evaluate(terms: &LoanTerms, policy: &ExtraPaymentPolicy) -> Result<Self> {
        let baseline = generate_schedule(terms, None)?;
        let accelerated = generate_schedule(terms, Some(policy))?;
        let comparison = compare_schedules(&baseline, &accelerated);

        Ok(Self {
            baseline,
            accelerated,
            comparison,
        })
    }
}
