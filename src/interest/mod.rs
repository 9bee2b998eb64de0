pub mod compound;

use rust_decimal::Decimal;

use crate::decimal::{compound_factor, Rate};

pub use compound::{CompoundGrowth, CompoundingFrequency, ContributionFrequency, GrowthInputs, GrowthYear};

/// effective annual rate (APY) of a nominal rate compounded `periods_per_year` times
pub fn effective_annual_rate(apr: Rate, periods_per_year: u32) -> Option<Rate> {
    if periods_per_year == 0 {
        return None;
    }
    let factor = compound_factor(apr.periodic(periods_per_year).as_decimal(), periods_per_year)?;
    Some(Rate::from_decimal(factor - Decimal::ONE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_apy_calculation() {
        let apr = Rate::from_percentage(18);

        let daily_apy = effective_annual_rate(apr, 365).unwrap();
        assert!(daily_apy.as_percentage() > dec!(19.7));
        assert!(daily_apy.as_percentage() < dec!(19.8));

        let monthly_apy = effective_annual_rate(apr, 12).unwrap();
        assert!(monthly_apy.as_percentage() > dec!(19.5));
        assert!(monthly_apy.as_percentage() < dec!(19.6));

        assert_eq!(effective_annual_rate(apr, 1).unwrap(), apr);
        assert!(effective_annual_rate(apr, 0).is_none());
    }
}
