use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calendar::YearMonth;
use crate::decimal::Money;
use crate::errors::Result;
use crate::payments::ExtraPaymentPolicy;
use crate::types::{LoanTerms, PaymentFrequency};

/// loan request as submitted by a calculator form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRequest {
    pub principal: Money,
    pub annual_rate_percent: Decimal,
    pub term_months: u32,
    pub start_date: YearMonth,
    #[serde(default = "default_frequency")]
    pub frequency: PaymentFrequency,
    /// fixed payment instead of the amortizing one
    #[serde(default)]
    pub scheduled_payment: Option<Money>,
}

fn default_frequency() -> PaymentFrequency {
    PaymentFrequency::Monthly
}

impl LoanRequest {
    /// create 30-year monthly mortgage request
    pub fn mortgage(principal: Money, annual_rate_percent: Decimal, start_date: YearMonth) -> Self {
        Self {
            principal,
            annual_rate_percent,
            term_months: 360,
            start_date,
            frequency: PaymentFrequency::Monthly,
            scheduled_payment: None,
        }
    }

    /// create biweekly request paying the amortizing biweekly payment
    pub fn biweekly(
        principal: Money,
        annual_rate_percent: Decimal,
        term_months: u32,
        start_date: YearMonth,
    ) -> Self {
        Self {
            principal,
            annual_rate_percent,
            term_months,
            start_date,
            frequency: PaymentFrequency::Biweekly,
            scheduled_payment: None,
        }
    }

    /// validated engine terms
    pub fn to_terms(&self) -> Result<LoanTerms> {
        let mut terms = LoanTerms::monthly(self.principal, self.annual_rate_percent, self.term_months, self.start_date)
            .with_frequency(self.frequency, self.term_months);
        terms.scheduled_payment = self.scheduled_payment;
        terms.validate()?;
        Ok(terms)
    }
}

/// extra payment section of a request; dates default to the loan start
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtraPaymentRequest {
    #[serde(default)]
    pub recurring_amount: Money,
    #[serde(default)]
    pub annual_amount: Money,
    #[serde(default)]
    pub annual_month: Option<u32>,
    #[serde(default)]
    pub one_time_amount: Money,
    #[serde(default)]
    pub one_time_date: Option<YearMonth>,
    #[serde(default)]
    pub start_date: Option<YearMonth>,
}

impl ExtraPaymentRequest {
    pub fn to_policy(&self, loan_start: YearMonth) -> Result<ExtraPaymentPolicy> {
        let policy = ExtraPaymentPolicy {
            recurring_amount: self.recurring_amount,
            annual_amount: self.annual_amount,
            annual_month: self.annual_month,
            one_time_amount: self.one_time_amount,
            one_time_date: self.one_time_date,
            start_date: self.start_date.unwrap_or(loan_start),
        };
        policy.validate()?;
        Ok(policy)
    }
}

/// payoff calculator request: a loan and the extra payments to evaluate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoffRequest {
    pub loan: LoanRequest,
    #[serde(default)]
    pub extra: ExtraPaymentRequest,
}

impl PayoffRequest {
    pub fn new(loan: LoanRequest, extra: ExtraPaymentRequest) -> Self {
        Self { loan, extra }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn terms(&self) -> Result<LoanTerms> {
        self.loan.to_terms()
    }

    pub fn policy(&self) -> Result<ExtraPaymentPolicy> {
        self.extra.to_policy(self.loan.start_date)
    }
}
