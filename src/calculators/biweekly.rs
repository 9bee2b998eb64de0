use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::calendar::YearMonth;
use crate::decimal::Money;
use crate::errors::Result;
use crate::payments::{compare_schedules, generate_schedule, ScheduleComparison, ScheduleResult};
use crate::types::{LoanTerms, PaymentFrequency};

/// monthly loan versus paying half the monthly payment every two weeks
///
/// 26 half-payments a year amount to one extra monthly payment annually.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiweeklyComparison {
    pub monthly_payment: Money,
    pub biweekly_payment: Money,
    pub monthly: ScheduleResult,
    pub biweekly: ScheduleResult,
    pub comparison: ScheduleComparison,
}

impl BiweeklyComparison {
    pub fn evaluate(
        principal: Money,
        annual_rate_percent: Decimal,
        term_months: u32,
        start_date: YearMonth,
    ) -> Result<Self> {
        let monthly_terms = LoanTerms::monthly(principal, annual_rate_percent, term_months, start_date);
        let monthly = generate_schedule(&monthly_terms, None)?;

        let monthly_payment = monthly.scheduled_payment;
        let biweekly_payment = monthly_payment / dec!(2);
        let biweekly_terms = monthly_terms
            .with_frequency(PaymentFrequency::Biweekly, term_months)
            .with_scheduled_payment(biweekly_payment);
        let biweekly = generate_schedule(&biweekly_terms, None)?;

        let comparison = compare_schedules(&monthly, &biweekly);

        Ok(Self {
            monthly_payment,
            biweekly_payment,
            monthly,
            biweekly,
            comparison,
        })
    }
}
