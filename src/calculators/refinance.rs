use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculators::BreakEven;
use crate::calendar::YearMonth;
use crate::decimal::Money;
use crate::errors::{AmortizationError, Result};
use crate::payments::{compare_schedules, generate_schedule, ScheduleComparison, ScheduleResult};
use crate::types::LoanTerms;

/// an existing loan and a proposed replacement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefinanceInputs {
    pub current_balance: Money,
    /// payment currently being made each month
    pub current_payment: Money,
    pub current_rate_percent: Decimal,
    pub remaining_months: u32,
    /// defaults to the current balance
    #[serde(default)]
    pub new_loan_amount: Option<Money>,
    pub new_rate_percent: Decimal,
    pub new_term_months: u32,
    #[serde(default)]
    pub closing_costs: Money,
    /// discount points as a percentage of the new loan amount
    #[serde(default)]
    pub points_percent: Decimal,
    pub start_date: YearMonth,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefinanceAnalysis {
    pub new_loan_amount: Money,
    pub new_payment: Money,
    /// current payment minus new payment, negative when the new loan costs more each month
    pub monthly_savings: Money,
    pub points_cost: Money,
    /// closing costs plus points
    pub total_costs: Money,
    pub break_even: BreakEven,
    pub current_interest_remaining: Money,
    pub new_interest_total: Money,
    /// everything left to pay on the current loan minus everything paid on the new one, costs included
    pub lifetime_savings: Money,
    pub current: ScheduleResult,
    pub refinanced: ScheduleResult,
    pub comparison: ScheduleComparison,
}

impl RefinanceAnalysis {
    pub fn evaluate(inputs: &RefinanceInputs) -> Result<Self> {
        validate(inputs)?;

        let new_loan_amount = inputs.new_loan_amount.unwrap_or(inputs.current_balance);
        let points_cost = new_loan_amount.percentage(inputs.points_percent);
        let total_costs = inputs.closing_costs + points_cost;

        let current_terms = LoanTerms::monthly(
            inputs.current_balance,
            inputs.current_rate_percent,
            inputs.remaining_months,
            inputs.start_date,
        )
        .with_scheduled_payment(inputs.current_payment);
        let current = generate_schedule(&current_terms, None)?;

        let new_terms = LoanTerms::monthly(
            new_loan_amount,
            inputs.new_rate_percent,
            inputs.new_term_months,
            inputs.start_date,
        );
        let refinanced = generate_schedule(&new_terms, None)?;

        let new_payment = refinanced.scheduled_payment;
        let monthly_savings = inputs.current_payment - new_payment;
        let break_even = BreakEven::from_costs(total_costs, monthly_savings);
        let lifetime_savings = current.total_paid - (refinanced.total_paid + total_costs);

        debug!(
            "refinance: payment {} -> {}, costs {}, break even {:?}",
            inputs.current_payment, new_payment, total_costs, break_even
        );

        let comparison = compare_schedules(&current, &refinanced);

        Ok(Self {
            new_loan_amount,
            new_payment,
            monthly_savings,
            points_cost,
            total_costs,
            break_even,
            current_interest_remaining: current.total_interest_paid,
            new_interest_total: refinanced.total_interest_paid,
            lifetime_savings,
            current,
            refinanced,
            comparison,
        })
    }
}

fn validate(inputs: &RefinanceInputs) -> Result<()> {
    if !inputs.current_balance.is_positive() {
        return Err(AmortizationError::invalid_input("current balance must be positive"));
    }
    if !inputs.current_payment.is_positive() {
        return Err(AmortizationError::invalid_input("current payment must be positive"));
    }
    if let Some(amount) = inputs.new_loan_amount {
        if !amount.is_positive() {
            return Err(AmortizationError::invalid_input("new loan amount must be positive"));
        }
    }
    if inputs.closing_costs.is_negative() || inputs.points_percent < Decimal::ZERO {
        return Err(AmortizationError::invalid_input("costs must not be negative"));
    }
    Ok(())
}
