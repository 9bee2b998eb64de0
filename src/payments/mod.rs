pub mod amortization;
pub mod comparison;
pub mod extra;
pub mod periodic;
pub mod summary;

pub use amortization::{
    generate_schedule, period_date, safety_bound, PaymentRecord, ScheduleResult, PAYOFF_EPSILON,
};
pub use comparison::{compare_schedules, time_between, PayoffScenario, ScheduleComparison};
pub use extra::{ExtraBreakdown, ExtraPaymentPolicy};
pub use periodic::{compute_periodic_payment, payment_factor};
pub use summary::YearSummary;
