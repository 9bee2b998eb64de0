use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::calendar::YearMonth;
use crate::decimal::Money;
use crate::errors::{AmortizationError, Result};
use crate::payments::extra::{ExtraPaymentPolicy, ExtraPaymentTracker};
use crate::payments::periodic::compute_periodic_payment;
use crate::types::{DegenerateReason, LoanTerms, ScheduleWarning};

/// balance at or below which a loan counts as paid off
pub const PAYOFF_EPSILON: Money = Money::HALF_CENT;

/// one period of an amortization schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub period_index: u32,
    pub period_date: YearMonth,
    pub starting_balance: Money,
    pub scheduled_payment: Money,
    pub interest_portion: Money,
    pub principal_portion: Money,
    pub extra_portion: Money,
    /// interest + principal + extra actually paid this period
    pub total_payment: Money,
    pub ending_balance: Money,
    pub cumulative_interest: Money,
}

impl PaymentRecord {
    /// principal retired this period, standard and extra
    pub fn principal_reduction(&self) -> Money {
        self.principal_portion + self.extra_portion
    }
}

/// complete schedule for one loan under one extra-payment policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleResult {
    pub terms: LoanTerms,
    pub scheduled_payment: Money,
    pub schedule: Vec<PaymentRecord>,
    pub total_interest_paid: Money,
    pub total_principal_paid: Money,
    pub total_extra_paid: Money,
    pub total_paid: Money,
    pub payoff_date: YearMonth,
    pub total_periods: u32,
    pub warnings: Vec<ScheduleWarning>,
}

impl ScheduleResult {
    /// get record for a 1-based period
    pub fn record(&self, period_index: u32) -> Option<&PaymentRecord> {
        if period_index == 0 {
            return None;
        }
        self.schedule.get((period_index - 1) as usize)
    }

    /// remaining balance after the given period
    pub fn balance_after(&self, period_index: u32) -> Money {
        if period_index == 0 {
            return self.terms.principal;
        }
        self.record(period_index)
            .map(|r| r.ending_balance)
            .unwrap_or(Money::ZERO)
    }

    /// true when some period could not reduce principal
    pub fn is_degenerate(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// periods beyond the contractual term
    pub fn periods_beyond_term(&self) -> u32 {
        self.total_periods.saturating_sub(self.terms.total_periods)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// iteration cap that guarantees termination for inconsistent inputs
pub fn safety_bound(total_periods: u32) -> u32 {
    total_periods
        .saturating_mul(2)
        .max(total_periods.saturating_add(120))
}

/// calendar month a period falls in
///
/// Monthly loans advance one month per period; other frequencies map each
/// period onto the month containing it.
pub fn period_date(start: YearMonth, period_index: u32, periods_per_year: u32) -> YearMonth {
    let elapsed = (period_index.saturating_sub(1) as u64 * 12) / periods_per_year.max(1) as u64;
    start.add_months(elapsed as u32)
}

/// produce the full payment schedule for a loan
///
/// The scheduled payment is `terms.scheduled_payment` when set, otherwise the
/// amortizing payment. Either the whole schedule is returned or an error.
pub fn generate_schedule(
    terms: &LoanTerms,
    policy: Option<&ExtraPaymentPolicy>,
) -> Result<ScheduleResult> {
    terms.validate()?;
    if let Some(policy) = policy {
        policy.validate()?;
    }

    let scheduled_payment = match terms.scheduled_payment {
        Some(payment) => payment,
        None => compute_periodic_payment(
            terms.principal,
            terms.annual_rate_percent,
            terms.total_periods,
            terms.periods_per_year,
        )?,
    };

    let rate = terms.periodic_rate().as_decimal();
    let bound = safety_bound(terms.total_periods);

    debug!(
        "generating schedule: principal {}, rate {}%, {} periods at {}/yr, payment {}",
        terms.principal, terms.annual_rate_percent, terms.total_periods, terms.periods_per_year, scheduled_payment
    );

    let mut tracker = ExtraPaymentTracker::new(policy);
    let mut schedule: Vec<PaymentRecord> = Vec::new();
    let mut warnings = Vec::new();
    let mut balance = terms.principal;
    let mut cumulative_interest = Money::ZERO;
    let mut period_index = 1u32;

    while schedule.is_empty() || balance > PAYOFF_EPSILON {
        if period_index > bound {
            warn!(
                "schedule did not converge within {} periods, {} outstanding",
                bound, balance
            );
            return Err(AmortizationError::AmortizationDidNotConverge {
                periods: bound,
                remaining_balance: balance,
            });
        }

        let date = period_date(terms.start_date, period_index, terms.periods_per_year);
        let starting_balance = balance;

        let exact_interest = balance.as_decimal() * rate;
        let accrued = Money::from_decimal(exact_interest);
        let mut interest = accrued;
        let mut degenerate = None;
        let mut principal = if interest.is_positive() && interest >= balance {
            interest = balance;
            degenerate = Some(DegenerateReason::InterestExceedsBalance);
            Money::ZERO
        } else if scheduled_payment.as_decimal() <= exact_interest {
            degenerate = Some(DegenerateReason::PaymentBelowInterest);
            Money::ZERO
        } else {
            // may be zero when the margin is below working precision
            (scheduled_payment - interest).max(Money::ZERO)
        };

        // interest the payment cannot cover is neither paid nor capitalised
        let mut unpaid_interest = Money::ZERO;
        if degenerate.is_some() {
            interest = interest.min(scheduled_payment);
            unpaid_interest = accrued - interest;
        }

        let mut extra = tracker.contributions_for(date).total();

        // last contractual period of a formula payment retires rounding residue
        if degenerate.is_none()
            && terms.scheduled_payment.is_none()
            && period_index == terms.total_periods
            && principal + extra < balance
        {
            principal = balance - extra;
        }

        // final period: extra gives way before the contractual principal
        if principal + extra >= balance {
            if principal >= balance {
                principal = balance;
                extra = Money::ZERO;
            } else {
                extra = balance - principal;
            }
        }

        let mut ending_balance = (balance - principal - extra).max(Money::ZERO);
        if ending_balance.is_positive() && ending_balance <= PAYOFF_EPSILON {
            principal += ending_balance;
            ending_balance = Money::ZERO;
        }

        if let Some(reason) = degenerate {
            warn!(
                "period {} ({}): principal not reduced, {}, {} interest unpaid",
                period_index, date, reason, unpaid_interest
            );
            warnings.push(ScheduleWarning::Degenerate {
                period_index,
                period_date: date,
                reason,
                unpaid_interest,
            });

            if ending_balance >= starting_balance && !tracker.has_future_contributions(date) {
                return Err(AmortizationError::AmortizationDidNotConverge {
                    periods: period_index,
                    remaining_balance: starting_balance,
                });
            }
        }

        cumulative_interest += interest;
        schedule.push(PaymentRecord {
            period_index,
            period_date: date,
            starting_balance,
            scheduled_payment,
            interest_portion: interest,
            principal_portion: principal,
            extra_portion: extra,
            total_payment: interest + principal + extra,
            ending_balance,
            cumulative_interest,
        });

        balance = ending_balance;
        period_index += 1;
    }

    let total_principal_paid: Money = schedule.iter().map(|r| r.principal_portion).sum();
    let total_extra_paid: Money = schedule.iter().map(|r| r.extra_portion).sum();
    let total_paid: Money = schedule.iter().map(|r| r.total_payment).sum();
    let payoff_date = schedule
        .last()
        .map(|r| r.period_date)
        .unwrap_or(terms.start_date);
    let total_periods = schedule.len() as u32;

    debug!(
        "schedule complete: {} periods, payoff {}, interest {}",
        total_periods, payoff_date, cumulative_interest
    );

    Ok(ScheduleResult {
        terms: terms.clone(),
        scheduled_payment,
        schedule,
        total_interest_paid: cumulative_interest,
        total_principal_paid,
        total_extra_paid,
        total_paid,
        payoff_date,
        total_periods,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn ym(year: i32, month: u32) -> YearMonth {
        YearMonth::new(year, month).unwrap()
    }

    fn mortgage(principal: i64, rate: Decimal, months: u32) -> LoanTerms {
        LoanTerms::monthly(Money::from_major(principal), rate, months, ym(2024, 1))
    }

    fn assert_invariants(result: &ScheduleResult) {
        let retired: Money = result.schedule.iter().map(|r| r.principal_reduction()).sum();
        assert!((retired - result.terms.principal).abs() <= Money::CENT);

        let mut previous = result.terms.principal;
        for record in &result.schedule {
            assert!(record.ending_balance <= previous);
            assert!(!record.ending_balance.is_negative());
            previous = record.ending_balance;
        }

        let last = result.schedule.last().unwrap();
        assert!(last.ending_balance <= Money::CENT);
        assert_eq!(result.payoff_date, last.period_date);
        assert_eq!(result.total_periods as usize, result.schedule.len());
    }

    #[test]
    fn test_thirty_year_mortgage() {
        let result = generate_schedule(&mortgage(200_000, dec!(6), 360), None).unwrap();

        assert_eq!(result.scheduled_payment.to_cents(), Money::from_str_exact("1199.10").unwrap());
        assert_eq!(result.total_periods, 360);
        assert!((result.total_interest_paid - Money::from_major(231_676)).abs() <= Money::ONE);
        assert_eq!(result.payoff_date, ym(2053, 12));
        assert!(result.warnings.is_empty());
        assert_invariants(&result);
    }

    #[test]
    fn test_zero_rate_schedule() {
        let result = generate_schedule(&mortgage(200_000, Decimal::ZERO, 360), None).unwrap();

        assert_eq!(result.scheduled_payment.to_cents(), Money::from_str_exact("555.56").unwrap());
        assert_eq!(result.total_interest_paid, Money::ZERO);
        assert_eq!(result.total_periods, 360);
        assert_invariants(&result);
    }

    #[test]
    fn test_first_period_dated_at_start() {
        let result = generate_schedule(&mortgage(10_000, dec!(5), 12), None).unwrap();
        let first = result.record(1).unwrap();

        assert_eq!(first.period_date, ym(2024, 1));
        assert_eq!(first.starting_balance, Money::from_major(10_000));
        // interest accrues on the starting balance
        assert_eq!(first.interest_portion, Money::from_decimal(dec!(10000) * dec!(0.05) / dec!(12)));
        assert_eq!(result.record(2).unwrap().period_date, ym(2024, 2));
        assert_eq!(result.payoff_date, ym(2024, 12));
    }

    #[test]
    fn test_recurring_extra_shortens_loan() {
        let terms = mortgage(10_000, dec!(5), 12);
        let baseline = generate_schedule(&terms, None).unwrap();

        let policy = ExtraPaymentPolicy::starting(ym(2024, 1)).recurring(Money::from_major(100));
        let accelerated = generate_schedule(&terms, Some(&policy)).unwrap();

        assert!(accelerated.total_periods < 12);
        assert!(accelerated.total_interest_paid < baseline.total_interest_paid);
        assert!(accelerated.payoff_date < baseline.payoff_date);
        assert_invariants(&accelerated);
    }

    #[test]
    fn test_one_time_payoff_ends_schedule() {
        let terms = mortgage(20_000, dec!(4.5), 24);
        let baseline = generate_schedule(&terms, None).unwrap();
        let remaining = baseline.balance_after(5);

        let policy = ExtraPaymentPolicy::starting(ym(2024, 1)).one_time(remaining, ym(2024, 6));
        let result = generate_schedule(&terms, Some(&policy)).unwrap();

        assert_eq!(result.total_periods, 6);
        assert!(result.record(7).is_none());
        assert_eq!(result.payoff_date, ym(2024, 6));

        let last = result.record(6).unwrap();
        assert_eq!(last.ending_balance, Money::ZERO);
        // the extra was reduced to what the balance needed
        assert!(last.extra_portion < remaining);
        assert_eq!(last.principal_portion, baseline.record(6).unwrap().principal_portion);
        assert_invariants(&result);
    }

    #[test]
    fn test_one_time_applied_once() {
        let terms = mortgage(50_000, dec!(6), 120);
        let policy = ExtraPaymentPolicy::starting(ym(2024, 1)).one_time(Money::from_major(2_000), ym(2025, 3));
        let result = generate_schedule(&terms, Some(&policy)).unwrap();

        let with_extra: Vec<_> = result
            .schedule
            .iter()
            .filter(|r| r.extra_portion.is_positive())
            .collect();
        assert_eq!(with_extra.len(), 1);
        assert_eq!(with_extra[0].period_date, ym(2025, 3));
        assert_eq!(with_extra[0].extra_portion, Money::from_major(2_000));
        assert_eq!(result.total_extra_paid, Money::from_major(2_000));
    }

    #[test]
    fn test_extras_inert_before_policy_start() {
        let terms = mortgage(50_000, dec!(6), 120);
        let policy = ExtraPaymentPolicy::starting(ym(2026, 1))
            .recurring(Money::from_major(50))
            .annual(Money::from_major(1_000), 6);
        let result = generate_schedule(&terms, Some(&policy)).unwrap();

        for record in &result.schedule {
            if record.period_date < ym(2026, 1) {
                assert_eq!(record.extra_portion, Money::ZERO);
            }
        }
        let june = result
            .schedule
            .iter()
            .find(|r| r.period_date == ym(2026, 6))
            .unwrap();
        assert_eq!(june.extra_portion, Money::from_major(1_050));
        assert_invariants(&result);
    }

    #[test]
    fn test_payment_below_interest_does_not_converge() {
        let terms = mortgage(100_000, dec!(12), 360).with_scheduled_payment(Money::from_major(500));
        let err = generate_schedule(&terms, None).unwrap_err();

        assert_eq!(
            err,
            AmortizationError::AmortizationDidNotConverge {
                periods: 1,
                remaining_balance: Money::from_major(100_000),
            }
        );
    }

    #[test]
    fn test_slow_amortization_hits_safety_bound() {
        // payment barely above interest: never paid off within the bound
        let terms = mortgage(100_000, dec!(12), 12).with_scheduled_payment(Money::from_major(1_001));
        let err = generate_schedule(&terms, None).unwrap_err();

        match err {
            AmortizationError::AmortizationDidNotConverge { periods, remaining_balance } => {
                assert_eq!(periods, safety_bound(12));
                assert!(remaining_balance.is_positive());
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_degenerate_periods_flagged_but_rescued_by_extra() {
        let terms = mortgage(100_000, dec!(12), 360).with_scheduled_payment(Money::from_major(500));
        let policy = ExtraPaymentPolicy::starting(ym(2024, 1)).recurring(Money::from_major(10_000));
        let result = generate_schedule(&terms, Some(&policy)).unwrap();

        assert!(result.is_degenerate());
        assert!(matches!(
            result.warnings[0],
            ScheduleWarning::Degenerate {
                period_index: 1,
                reason: DegenerateReason::PaymentBelowInterest,
                ..
            }
        ));
        let first = result.record(1).unwrap();
        assert_eq!(first.principal_portion, Money::ZERO);
        // only the interest the payment covered is booked
        assert_eq!(first.interest_portion, Money::from_major(500));
        assert_eq!(first.total_payment, Money::from_major(10_500));
        assert!(matches!(
            result.warnings[0],
            ScheduleWarning::Degenerate { unpaid_interest, .. } if unpaid_interest == Money::from_major(500)
        ));
        assert_invariants(&result);
    }

    #[test]
    fn test_interest_exceeding_balance_rescued_by_extra() {
        // 1500% a year is 125% a month: interest outgrows the whole balance
        let terms = mortgage(1_000, dec!(1500), 12);
        let policy = ExtraPaymentPolicy::starting(ym(2024, 1)).recurring(Money::from_major(300));
        let result = generate_schedule(&terms, Some(&policy)).unwrap();

        assert_eq!(result.total_periods, 4);
        assert_eq!(result.warnings.len(), 4);
        for record in &result.schedule {
            assert_eq!(record.principal_portion, Money::ZERO);
            assert_eq!(record.interest_portion, record.starting_balance);
        }
        assert_eq!(
            result.warnings[0],
            ScheduleWarning::Degenerate {
                period_index: 1,
                period_date: ym(2024, 1),
                reason: DegenerateReason::InterestExceedsBalance,
                unpaid_interest: Money::from_major(250),
            }
        );
        assert_eq!(result.total_interest_paid, Money::from_major(2_200));
        assert_invariants(&result);
    }

    #[test]
    fn test_interest_exceeding_balance_fails_fast() {
        let terms = mortgage(1_000, dec!(1500), 12);
        let err = generate_schedule(&terms, None).unwrap_err();

        assert_eq!(
            err,
            AmortizationError::AmortizationDidNotConverge {
                periods: 1,
                remaining_balance: Money::from_major(1_000),
            }
        );
    }

    #[test]
    fn test_formula_payment_never_exceeds_term() {
        // steep quarterly and annual loans where rounding used to leave residue
        let cases = [
            (1, dec!(35), 180, 4),
            (3_000_000, dec!(19.99), 360, 4),
            (250_000, dec!(19.99), 180, 1),
        ];

        for (principal, rate, periods, per_year) in cases {
            let terms = LoanTerms {
                periods_per_year: per_year,
                total_periods: periods,
                ..mortgage(principal, rate, periods)
            };
            let result = generate_schedule(&terms, None).unwrap();

            assert!(
                result.total_periods <= periods,
                "{} at {}% over {} periods took {}",
                principal,
                rate,
                periods,
                result.total_periods
            );
            assert!(result.warnings.is_empty());
            assert_invariants(&result);
        }
    }

    #[test]
    fn test_one_time_before_policy_start_applies() {
        let terms = mortgage(50_000, dec!(6), 120);
        let policy = ExtraPaymentPolicy::starting(ym(2025, 1))
            .recurring(Money::from_major(100))
            .one_time(Money::from_major(5_000), ym(2024, 6));
        let result = generate_schedule(&terms, Some(&policy)).unwrap();

        let extra_in = |date: YearMonth| {
            result
                .schedule
                .iter()
                .find(|r| r.period_date == date)
                .map(|r| r.extra_portion)
                .unwrap()
        };
        assert_eq!(extra_in(ym(2024, 5)), Money::ZERO);
        assert_eq!(extra_in(ym(2024, 6)), Money::from_major(5_000));
        assert_eq!(extra_in(ym(2024, 12)), Money::ZERO);
        assert_eq!(extra_in(ym(2025, 1)), Money::from_major(100));
        assert_invariants(&result);
    }

    #[test]
    fn test_generation_is_idempotent() {
        let terms = mortgage(150_000, dec!(5.25), 180);
        let policy = ExtraPaymentPolicy::starting(ym(2024, 6))
            .recurring(Money::from_major(75))
            .one_time(Money::from_major(5_000), ym(2027, 2));

        let first = generate_schedule(&terms, Some(&policy)).unwrap();
        let second = generate_schedule(&terms, Some(&policy)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_biweekly_dates_follow_calendar_months() {
        let terms = LoanTerms {
            periods_per_year: 26,
            total_periods: 26 * 5,
            ..mortgage(30_000, dec!(5), 60)
        };
        let result = generate_schedule(&terms, None).unwrap();

        assert_eq!(result.total_periods, 130);
        assert_eq!(result.record(1).unwrap().period_date, ym(2024, 1));
        assert_eq!(result.record(3).unwrap().period_date, ym(2024, 1));
        assert_eq!(result.record(4).unwrap().period_date, ym(2024, 2));
        assert_eq!(result.record(27).unwrap().period_date, ym(2025, 1));
        assert_invariants(&result);
    }

    #[test]
    fn test_invalid_terms_rejected() {
        let terms = mortgage(0, dec!(5), 12);
        assert!(matches!(
            generate_schedule(&terms, None),
            Err(AmortizationError::InvalidLoanParameters { .. })
        ));

        let policy = ExtraPaymentPolicy::starting(ym(2024, 1)).recurring(Money::from_major(-10));
        assert!(matches!(
            generate_schedule(&mortgage(1_000, dec!(5), 12), Some(&policy)),
            Err(AmortizationError::InvalidExtraPaymentPolicy { .. })
        ));
    }

    #[test]
    fn test_lookup_helpers() {
        let result = generate_schedule(&mortgage(12_000, Decimal::ZERO, 12), None).unwrap();
        assert_eq!(result.balance_after(0), Money::from_major(12_000));
        assert_eq!(result.balance_after(3), Money::from_major(9_000));
        assert_eq!(result.balance_after(99), Money::ZERO);
        assert!(result.record(0).is_none());
        assert_eq!(result.periods_beyond_term(), 0);
    }
}
