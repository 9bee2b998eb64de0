pub mod calculator;
pub mod calculators;
pub mod calendar;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod interest;
pub mod payments;
pub mod types;

// re-export key types
pub use calculator::{run_payoff, JsonInputReader, LoanInputReader, PayoffView, ScheduleSink};
pub use calculators::{
    Affordability, AffordabilityEstimate, AffordabilityInputs, BiweeklyComparison, BreakEven, HousingInputs,
    HousingPayment, PointsAnalysis, PointsInputs, PointsRecommendation, RefinanceAnalysis, RefinanceInputs,
    ShortfallReason,
};
pub use calendar::{YearMonth, YearsMonths};
pub use config::{ExtraPaymentRequest, LoanRequest, PayoffRequest};
pub use decimal::{Money, Rate};
pub use errors::{AmortizationError, Result};
pub use interest::{
    effective_annual_rate, CompoundGrowth, CompoundingFrequency, ContributionFrequency, GrowthInputs, GrowthYear,
};
pub use payments::{
    compare_schedules, compute_periodic_payment, generate_schedule, ExtraPaymentPolicy, PaymentRecord,
    PayoffScenario, ScheduleComparison, ScheduleResult, YearSummary, PAYOFF_EPSILON,
};
pub use types::{DegenerateReason, LoanTerms, PaymentFrequency, ScheduleWarning};

// re-export external dependencies that users will need
pub use chrono;
pub use rust_decimal::Decimal;
