use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::calculators::BreakEven;
use crate::decimal::Money;
use crate::errors::{AmortizationError, Result};
use crate::payments::compute_periodic_payment;

/// buying discount points to lower the rate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointsInputs {
    pub loan_amount: Money,
    pub annual_rate_percent: Decimal,
    pub term_months: u32,
    pub points: Decimal,
    /// price of one point as a percentage of the loan amount
    #[serde(default = "default_cost_per_point")]
    pub cost_per_point_percent: Decimal,
    /// rate reduction bought by one point, in percentage points
    pub rate_reduction_per_point: Decimal,
    /// how long the borrower expects to keep the loan
    pub planned_months: u32,
}

fn default_cost_per_point() -> Decimal {
    dec!(1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointsRecommendation {
    /// costs recovered before the planned horizon
    Beneficial,
    /// costs recovered exactly at the planned horizon
    BreakEvenAtPlan,
    /// loan is not held long enough to recover costs
    NotBeneficial,
    /// points cost money but do not lower the payment
    ///
    /// Not produced while `rate_reduction_per_point` must be positive; kept so
    /// every sign of the payment difference maps to a recommendation.
    NoSavings,
    /// points raise the payment; not produced under the same validation
    HigherPayment,
    NoPoints,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointsAnalysis {
    pub points_cost: Money,
    pub new_rate_percent: Decimal,
    pub payment_without_points: Money,
    pub payment_with_points: Money,
    pub monthly_savings: Money,
    pub break_even: BreakEven,
    /// savings over the planned horizon less the cost of the points
    pub net_savings: Money,
    pub recommendation: PointsRecommendation,
}

impl PointsAnalysis {
    pub fn evaluate(inputs: &PointsInputs) -> Result<Self> {
        validate(inputs)?;

        let points_cost = inputs.loan_amount.percentage(inputs.points * inputs.cost_per_point_percent);
        let new_rate_percent = inputs.annual_rate_percent - inputs.points * inputs.rate_reduction_per_point;
        if new_rate_percent < Decimal::ZERO {
            return Err(AmortizationError::invalid_loan(format!(
                "{} points reduce the rate below zero ({}%)",
                inputs.points, new_rate_percent
            )));
        }

        let payment_without_points =
            compute_periodic_payment(inputs.loan_amount, inputs.annual_rate_percent, inputs.term_months, 12)?;
        let payment_with_points =
            compute_periodic_payment(inputs.loan_amount, new_rate_percent, inputs.term_months, 12)?;

        let monthly_savings = payment_without_points - payment_with_points;
        let break_even = BreakEven::from_costs(points_cost, monthly_savings);
        let net_savings = monthly_savings * Decimal::from(inputs.planned_months) - points_cost;

        let recommendation = if monthly_savings.is_positive() {
            match break_even.periods() {
                Some(periods) if periods < inputs.planned_months => PointsRecommendation::Beneficial,
                Some(periods) if periods == inputs.planned_months => PointsRecommendation::BreakEvenAtPlan,
                _ => PointsRecommendation::NotBeneficial,
            }
        } else if monthly_savings.is_negative() {
            PointsRecommendation::HigherPayment
        } else if points_cost.is_positive() {
            PointsRecommendation::NoSavings
        } else {
            PointsRecommendation::NoPoints
        };

        Ok(Self {
            points_cost,
            new_rate_percent,
            payment_without_points,
            payment_with_points,
            monthly_savings,
            break_even,
            net_savings,
            recommendation,
        })
    }
}

fn validate(inputs: &PointsInputs) -> Result<()> {
    if !inputs.loan_amount.is_positive() {
        return Err(AmortizationError::invalid_input("loan amount must be positive"));
    }
    if inputs.term_months == 0 {
        return Err(AmortizationError::invalid_input("loan term must be positive"));
    }
    if inputs.points < Decimal::ZERO {
        return Err(AmortizationError::invalid_input("points must not be negative"));
    }
    if inputs.cost_per_point_percent <= Decimal::ZERO {
        return Err(AmortizationError::invalid_input("cost per point must be positive"));
    }
    if inputs.rate_reduction_per_point <= Decimal::ZERO {
        return Err(AmortizationError::invalid_input("rate reduction per point must be positive"));
    }
    if inputs.planned_months == 0 {
        return Err(AmortizationError::invalid_input("planned holding period must be positive"));
    }
    Ok(())
}
