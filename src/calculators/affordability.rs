use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{AmortizationError, Result};
use crate::payments::payment_factor;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffordabilityInputs {
    pub annual_income: Money,
    #[serde(default)]
    pub monthly_debts: Money,
    #[serde(default)]
    pub down_payment: Money,
    pub annual_rate_percent: Decimal,
    pub term_months: u32,
    #[serde(default)]
    pub property_tax_rate_percent: Decimal,
    #[serde(default)]
    pub annual_insurance: Money,
    #[serde(default)]
    pub monthly_hoa: Money,
    /// housing cost over gross monthly income
    #[serde(default = "default_front_end_ratio")]
    pub front_end_ratio: Decimal,
    /// housing cost plus other debts over gross monthly income
    #[serde(default = "default_back_end_ratio")]
    pub back_end_ratio: Decimal,
}

fn default_front_end_ratio() -> Decimal {
    dec!(0.28)
}

fn default_back_end_ratio() -> Decimal {
    dec!(0.36)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShortfallReason {
    /// existing debts use up the back-end allowance
    DebtsExceedAllowance,
    /// HOA dues use up the housing budget
    HoaExceedsBudget,
    /// insurance alone exceeds what is left for the mortgage
    FixedCostsExceedBudget,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffordabilityEstimate {
    /// whole currency units
    pub home_price: Money,
    pub loan_amount: Money,
    pub monthly_budget: Money,
    pub principal_and_interest: Money,
    pub property_tax: Money,
    pub insurance: Money,
    pub hoa: Money,
    pub total_monthly_payment: Money,
    /// percent of gross monthly income
    pub front_end_ratio_percent: Decimal,
    pub back_end_ratio_percent: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Affordability {
    Affordable(AffordabilityEstimate),
    NotAffordable { reason: ShortfallReason },
}

impl Affordability {
    /// maximum home price whose full monthly cost fits the debt-to-income limits
    ///
    /// With K the payment factor and t the monthly property tax rate, the
    /// price solves `(price - down) * K + price * t + insurance = budget - hoa`.
    pub fn estimate(inputs: &AffordabilityInputs) -> Result<Self> {
        validate(inputs)?;

        let gross_monthly = inputs.annual_income / dec!(12);
        let max_front = gross_monthly * inputs.front_end_ratio;
        let max_back = gross_monthly * inputs.back_end_ratio - inputs.monthly_debts;
        let monthly_budget = max_front.min(max_back);
        if !monthly_budget.is_positive() {
            return Ok(Affordability::NotAffordable {
                reason: ShortfallReason::DebtsExceedAllowance,
            });
        }

        let piti_budget = monthly_budget - inputs.monthly_hoa;
        if !piti_budget.is_positive() {
            return Ok(Affordability::NotAffordable {
                reason: ShortfallReason::HoaExceedsBudget,
            });
        }

        let insurance = inputs.annual_insurance / dec!(12);
        let tax_rate = Rate::from_percent(inputs.property_tax_rate_percent).periodic(12).as_decimal();
        let factor = payment_factor(Rate::from_percent(inputs.annual_rate_percent).periodic(12), inputs.term_months)
            .ok_or_else(|| AmortizationError::invalid_input("payment factor exceeds numeric range"))?;

        let numerator = (piti_budget - insurance).as_decimal() + factor * inputs.down_payment.as_decimal();
        let denominator = factor + tax_rate;
        let home_price = Money::from_decimal(numerator / denominator).floor();
        if !home_price.is_positive() {
            return Ok(Affordability::NotAffordable {
                reason: ShortfallReason::FixedCostsExceedBudget,
            });
        }

        let loan_amount = (home_price - inputs.down_payment).max(Money::ZERO);
        let principal_and_interest = loan_amount * factor;
        let property_tax = home_price * tax_rate;
        let total_monthly_payment = principal_and_interest + property_tax + insurance + inputs.monthly_hoa;

        let hundred = Decimal::ONE_HUNDRED;
        let front_end_ratio_percent = total_monthly_payment.as_decimal() / gross_monthly.as_decimal() * hundred;
        let back_end_ratio_percent =
            (total_monthly_payment + inputs.monthly_debts).as_decimal() / gross_monthly.as_decimal() * hundred;

        Ok(Affordability::Affordable(AffordabilityEstimate {
            home_price,
            loan_amount,
            monthly_budget,
            principal_and_interest,
            property_tax,
            insurance,
            hoa: inputs.monthly_hoa,
            total_monthly_payment,
            front_end_ratio_percent: front_end_ratio_percent.round_dp(2),
            back_end_ratio_percent: back_end_ratio_percent.round_dp(2),
        }))
    }
}

fn validate(inputs: &AffordabilityInputs) -> Result<()> {
    if !inputs.annual_income.is_positive() {
        return Err(AmortizationError::invalid_input("annual income must be positive"));
    }
    for amount in [
        inputs.monthly_debts,
        inputs.down_payment,
        inputs.annual_insurance,
        inputs.monthly_hoa,
    ] {
        if amount.is_negative() {
            return Err(AmortizationError::invalid_input("amounts must not be negative"));
        }
    }
    if inputs.annual_rate_percent < Decimal::ZERO || inputs.property_tax_rate_percent < Decimal::ZERO {
        return Err(AmortizationError::invalid_input("rates must not be negative"));
    }
    if inputs.term_months == 0 {
        return Err(AmortizationError::invalid_input("loan term must be positive"));
    }
    let ratio_range = Decimal::ZERO..=Decimal::ONE;
    if !ratio_range.contains(&inputs.front_end_ratio) || !ratio_range.contains(&inputs.back_end_ratio) {
        return Err(AmortizationError::invalid_input("debt-to-income ratios must be between 0 and 1"));
    }
    Ok(())
}
