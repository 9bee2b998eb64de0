use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::calendar::YearMonth;
use crate::decimal::Money;
use crate::errors::{AmortizationError, Result};
use crate::payments::compute_periodic_payment;
use crate::types::LoanTerms;

/// home purchase inputs for a full monthly housing cost
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HousingInputs {
    pub home_price: Money,
    pub down_payment: Money,
    pub annual_rate_percent: Decimal,
    pub term_months: u32,
    #[serde(default)]
    pub annual_property_tax: Money,
    #[serde(default)]
    pub annual_insurance: Money,
    #[serde(default)]
    pub monthly_hoa: Money,
}

impl HousingInputs {
    /// down payment given as a percentage of the price
    pub fn with_down_payment_percent(mut self, percent: Decimal) -> Self {
        self.down_payment = self.home_price.percentage(percent);
        self
    }

    pub fn down_payment_percent(&self) -> Decimal {
        if self.home_price.is_zero() {
            return Decimal::ZERO;
        }
        self.down_payment.as_decimal() / self.home_price.as_decimal() * Decimal::ONE_HUNDRED
    }

    pub fn loan_amount(&self) -> Money {
        self.home_price - self.down_payment
    }

    /// terms of the mortgage behind this purchase
    pub fn loan_terms(&self, start_date: YearMonth) -> LoanTerms {
        LoanTerms::monthly(self.loan_amount(), self.annual_rate_percent, self.term_months, start_date)
    }
}

/// monthly principal, interest, taxes, insurance and dues
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HousingPayment {
    pub loan_amount: Money,
    pub principal_and_interest: Money,
    pub property_tax: Money,
    pub insurance: Money,
    pub hoa: Money,
    pub total: Money,
}

impl HousingPayment {
    pub fn calculate(inputs: &HousingInputs) -> Result<Self> {
        if !inputs.home_price.is_positive() {
            return Err(AmortizationError::invalid_input("home price must be positive"));
        }
        if inputs.down_payment.is_negative() || inputs.down_payment >= inputs.home_price {
            return Err(AmortizationError::invalid_input(
                "down payment must be non-negative and below the home price",
            ));
        }
        if inputs.annual_property_tax.is_negative()
            || inputs.annual_insurance.is_negative()
            || inputs.monthly_hoa.is_negative()
        {
            return Err(AmortizationError::invalid_input("costs must not be negative"));
        }

        let loan_amount = inputs.loan_amount();
        let principal_and_interest =
            compute_periodic_payment(loan_amount, inputs.annual_rate_percent, inputs.term_months, 12)?;
        let property_tax = inputs.annual_property_tax / dec!(12);
        let insurance = inputs.annual_insurance / dec!(12);
        let total = principal_and_interest + property_tax + insurance + inputs.monthly_hoa;

        Ok(Self {
            loan_amount,
            principal_and_interest,
            property_tax,
            insurance,
            hoa: inputs.monthly_hoa,
            total,
        })
    }
}
