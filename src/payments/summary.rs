use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::payments::amortization::ScheduleResult;

/// schedule totals for one calendar year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearSummary {
    pub year: i32,
    pub periods: u32,
    pub interest: Money,
    pub principal: Money,
    pub extra: Money,
    pub payments: Money,
    pub ending_balance: Money,
}

impl ScheduleResult {
    /// totals grouped by calendar year, in schedule order
    pub fn yearly_summaries(&self) -> Vec<YearSummary> {
        let mut summaries: Vec<YearSummary> = Vec::new();

        for record in &self.schedule {
            let year = record.period_date.year();
            let needs_new = summaries.last().map(|s| s.year != year).unwrap_or(true);
            if needs_new {
                summaries.push(YearSummary {
                    year,
                    periods: 0,
                    interest: Money::ZERO,
                    principal: Money::ZERO,
                    extra: Money::ZERO,
                    payments: Money::ZERO,
                    ending_balance: record.starting_balance,
                });
            }

            if let Some(summary) = summaries.last_mut() {
                summary.periods += 1;
                summary.interest += record.interest_portion;
                summary.principal += record.principal_portion;
                summary.extra += record.extra_portion;
                summary.payments += record.total_payment;
                summary.ending_balance = record.ending_balance;
            }
        }

        summaries
    }
}
