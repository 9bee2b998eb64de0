//! Seams between the engine and whatever hosts it.
//!
//! A [`LoanInputReader`] supplies loan terms and an optional extra payment
//! policy, the engine produces a [`PayoffScenario`], and a [`ScheduleSink`]
//! receives a [`PayoffView`] to display. Each render call carries the whole
//! view, so sinks replace rather than patch what they showed before.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::calendar::{YearMonth, YearsMonths};
use crate::config::PayoffRequest;
use crate::decimal::Money;
use crate::errors::Result;
use crate::payments::{ExtraPaymentPolicy, PayoffScenario, YearSummary};
use crate::types::{LoanTerms, ScheduleWarning};

pub trait LoanInputReader {
    fn read_terms(&self) -> Result<LoanTerms>;

    /// `None` when no extra payments were entered
    fn read_extra_policy(&self) -> Result<Option<ExtraPaymentPolicy>>;
}

pub trait ScheduleSink {
    fn render(&mut self, view: &PayoffView) -> Result<()>;
}

/// reader over a JSON payoff request
#[derive(Debug, Clone)]
pub struct JsonInputReader {
    request: PayoffRequest,
}

impl JsonInputReader {
    pub fn new(request: PayoffRequest) -> Self {
        Self { request }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::new(PayoffRequest::from_json(json)?))
    }

    pub fn request(&self) -> &PayoffRequest {
        &self.request
    }
}

impl LoanInputReader for JsonInputReader {
    fn read_terms(&self) -> Result<LoanTerms> {
        self.request.terms()
    }

    fn read_extra_policy(&self) -> Result<Option<ExtraPaymentPolicy>> {
        let policy = self.request.policy()?;
        Ok((!policy.is_empty()).then_some(policy))
    }
}

/// display model of a payoff scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoffView {
    pub scheduled_payment: Money,
    pub baseline_payoff: YearMonth,
    pub accelerated_payoff: YearMonth,
    pub baseline_interest: Money,
    pub accelerated_interest: Money,
    pub interest_saved: Money,
    pub time_saved: YearsMonths,
    pub total_extra_paid: Money,
    pub baseline_years: Vec<YearSummary>,
    pub accelerated_years: Vec<YearSummary>,
    pub warnings: Vec<ScheduleWarning>,
}

impl PayoffView {
    pub fn from_scenario(scenario: &PayoffScenario) -> Self {
        let PayoffScenario {
            baseline,
            accelerated,
            comparison,
        } = scenario;

        Self {
            scheduled_payment: accelerated.scheduled_payment,
            baseline_payoff: baseline.payoff_date,
            accelerated_payoff: accelerated.payoff_date,
            baseline_interest: baseline.total_interest_paid,
            accelerated_interest: accelerated.total_interest_paid,
            interest_saved: comparison.interest_saved,
            time_saved: comparison.time_saved,
            total_extra_paid: accelerated.total_extra_paid,
            baseline_years: baseline.yearly_summaries(),
            accelerated_years: accelerated.yearly_summaries(),
            warnings: accelerated.warnings.clone(),
        }
    }
}

/// read inputs, evaluate the payoff scenario and hand the view to the sink
///
/// Nothing is rendered when reading or evaluation fails.
pub fn run_payoff<R, S>(reader: &R, sink: &mut S) -> Result<PayoffScenario>
where
    R: LoanInputReader + ?Sized,
    S: ScheduleSink + ?Sized,
{
    let terms = reader.read_terms()?;
    let policy = reader
        .read_extra_policy()?
        .unwrap_or_else(|| ExtraPaymentPolicy::starting(terms.start_date));

    let scenario = PayoffScenario::evaluate(&terms, &policy)?;
    debug!(
        "payoff scenario: {} -> {}, interest saved {}",
        scenario.comparison.baseline_payoff, scenario.comparison.variant_payoff, scenario.comparison.interest_saved
    );

    sink.render(&PayoffView::from_scenario(&scenario))?;
    Ok(scenario)
}
