use rust_decimal::{Decimal, RoundingStrategy};

use crate::decimal::{compound_factor, Money, Rate};
use crate::errors::{AmortizationError, Result};

/// fixed periodic payment that fully amortizes `principal`
///
/// `annual_rate_percent` is a percentage figure (6 means 6%). The periodic
/// rate is the annual rate divided by `periods_per_year`. A zero rate gives a
/// straight-line payment of `principal / total_periods`. The result is rounded
/// up at working precision, never down.
pub fn compute_periodic_payment(
    principal: Money,
    annual_rate_percent: Decimal,
    total_periods: u32,
    periods_per_year: u32,
) -> Result<Money> {
    if !principal.is_positive() {
        return Err(AmortizationError::invalid_loan(format!(
            "principal must be positive, got {}",
            principal
        )));
    }
    if annual_rate_percent < Decimal::ZERO {
        return Err(AmortizationError::invalid_loan(format!(
            "annual rate must not be negative, got {}",
            annual_rate_percent
        )));
    }
    if total_periods == 0 {
        return Err(AmortizationError::invalid_loan("term must be at least one period"));
    }
    if periods_per_year == 0 {
        return Err(AmortizationError::invalid_loan("periods per year must be positive"));
    }

    let periodic_rate = Rate::from_percent(annual_rate_percent).periodic(periods_per_year);
    let factor = payment_factor(periodic_rate, total_periods).ok_or_else(|| {
        AmortizationError::invalid_loan(format!(
            "payment is not computable for {}% over {} periods",
            annual_rate_percent, total_periods
        ))
    })?;

    let payment = principal
        .as_decimal()
        .checked_mul(factor)
        .ok_or_else(|| AmortizationError::invalid_loan("payment exceeds numeric range"))?;

    // round up so the payment always covers the exact amortizing amount
    let payment = Money::from_decimal(payment.round_dp_with_strategy(8, RoundingStrategy::AwayFromZero));
    if !payment.is_positive() {
        return Err(AmortizationError::invalid_loan(format!(
            "computed payment {} is not positive",
            payment
        )));
    }
    Ok(payment)
}

/// payment per unit of principal: r(1+r)^n / ((1+r)^n - 1), or 1/n at zero rate
///
/// `None` when the factor overflows or degenerates.
pub fn payment_factor(periodic_rate: Rate, periods: u32) -> Option<Decimal> {
    if periods == 0 {
        return None;
    }

    let r = periodic_rate.as_decimal();
    if r.is_zero() {
        return Decimal::ONE.checked_div(Decimal::from(periods));
    }

    // EMI = P * r * (1 + r)^n / ((1 + r)^n - 1)
    let compound = compound_factor(r, periods)?;
    let numerator = r.checked_mul(compound)?;
    let denominator = compound.checked_sub(Decimal::ONE)?;
    if denominator <= Decimal::ZERO {
        return None;
    }
    numerator.checked_div(denominator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_thirty_year_mortgage_payment() {
        let payment = compute_periodic_payment(Money::from_major(200_000), dec!(6), 360, 12).unwrap();
        assert_eq!(payment.to_cents(), Money::from_str_exact("1199.10").unwrap());
    }

    #[test]
    fn test_emi_calculation() {
        let payment = compute_periodic_payment(Money::from_major(100_000), dec!(12), 12, 12).unwrap();

        // approximate EMI for $100k at 12% for 12 months
        assert!(payment > Money::from_major(8800));
        assert!(payment < Money::from_major(8900));
    }

    #[test]
    fn test_payment_rounds_up() {
        // exact payment is 49975 plus a fraction far below working precision
        let payment = compute_periodic_payment(Money::from_major(250_000), dec!(19.99), 180, 1).unwrap();
        assert!(payment > Money::from_major(49_975));
        assert_eq!(payment, Money::from_str_exact("49975.00000001").unwrap());

        let payment = compute_periodic_payment(Money::from_major(200_000), Decimal::ZERO, 360, 12).unwrap();
        assert_eq!(payment, Money::from_str_exact("555.55555556").unwrap());
    }

    #[test]
    fn test_zero_rate_is_straight_line() {
        let payment = compute_periodic_payment(Money::from_major(200_000), Decimal::ZERO, 360, 12).unwrap();
        assert_eq!(payment.to_cents(), Money::from_str_exact("555.56").unwrap());

        let payment = compute_periodic_payment(Money::from_major(12_000), Decimal::ZERO, 12, 12).unwrap();
        assert_eq!(payment, Money::from_major(1000));
        assert_eq!(payment * Decimal::from(12), Money::from_major(12_000));
    }

    #[test]
    fn test_payments_cover_principal() {
        let cases = [
            (Money::from_major(1_000), dec!(0.5), 6u32, 12u32),
            (Money::from_major(50_000), dec!(7.25), 60, 12),
            (Money::from_major(300_000), dec!(3.875), 780, 26),
            (Money::from_major(5_000), dec!(19.99), 104, 52),
        ];

        for (principal, rate, periods, per_year) in cases {
            let payment = compute_periodic_payment(principal, rate, periods, per_year).unwrap();
            assert!(payment * Decimal::from(periods) >= principal);
        }
    }

    #[test]
    fn test_periods_per_year_changes_rate() {
        let monthly = compute_periodic_payment(Money::from_major(100_000), dec!(6), 360, 12).unwrap();
        let biweekly = compute_periodic_payment(Money::from_major(100_000), dec!(6), 780, 26).unwrap();
        assert!(biweekly < monthly / dec!(2));
    }

    #[test]
    fn test_invalid_parameters() {
        let err = compute_periodic_payment(Money::ZERO, dec!(5), 12, 12).unwrap_err();
        assert!(matches!(err, AmortizationError::InvalidLoanParameters { .. }));

        assert!(compute_periodic_payment(Money::from_major(-5), dec!(5), 12, 12).is_err());
        assert!(compute_periodic_payment(Money::from_major(1000), dec!(-0.1), 12, 12).is_err());
        assert!(compute_periodic_payment(Money::from_major(1000), dec!(5), 0, 12).is_err());
        assert!(compute_periodic_payment(Money::from_major(1000), dec!(5), 12, 0).is_err());
    }

    #[test]
    fn test_overflow_is_invalid() {
        // 1000% monthly compounded over 600 periods overflows decimal range
        let err = compute_periodic_payment(Money::from_major(100_000), dec!(12000), 600, 12).unwrap_err();
        assert!(matches!(err, AmortizationError::InvalidLoanParameters { .. }));
    }

    #[test]
    fn test_payment_factor() {
        assert_eq!(payment_factor(Rate::ZERO, 4), Some(dec!(0.25)));
        assert_eq!(payment_factor(Rate::from_percent(dec!(5)), 0), None);
        let factor = payment_factor(Rate::from_percent(dec!(10)), 1).unwrap();
        assert_eq!(factor, dec!(1.1));
    }
}
