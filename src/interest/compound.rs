use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{compound_factor, Money, Rate};
use crate::errors::{AmortizationError, Result};
use crate::interest::effective_annual_rate;

/// compounding frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompoundingFrequency {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    SemiAnnual,
    Annual,
}

impl CompoundingFrequency {
    /// get number of compounding periods per year
    pub fn periods_per_year(&self) -> u32 {
        match self {
            CompoundingFrequency::Daily => 365,
            CompoundingFrequency::Weekly => 52,
            CompoundingFrequency::Monthly => 12,
            CompoundingFrequency::Quarterly => 4,
            CompoundingFrequency::SemiAnnual => 2,
            CompoundingFrequency::Annual => 1,
        }
    }
}

/// how often contributions are deposited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContributionFrequency {
    Monthly,
    Quarterly,
    Annually,
}

impl ContributionFrequency {
    pub fn per_year(&self) -> u32 {
        match self {
            ContributionFrequency::Monthly => 12,
            ContributionFrequency::Quarterly => 4,
            ContributionFrequency::Annually => 1,
        }
    }
}

/// inputs for a savings growth projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthInputs {
    pub initial_investment: Money,
    #[serde(default)]
    pub annual_contribution: Money,
    pub contribution_frequency: ContributionFrequency,
    pub annual_rate_percent: Decimal,
    pub compounding: CompoundingFrequency,
    pub years: u32,
    #[serde(default)]
    pub inflation_rate_percent: Option<Decimal>,
    #[serde(default)]
    pub tax_rate_percent: Option<Decimal>,
}

/// one projected year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthYear {
    pub year: u32,
    pub starting_balance: Money,
    pub contributions: Money,
    pub interest: Money,
    pub ending_balance: Money,
}

/// result of a growth projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundGrowth {
    pub yearly: Vec<GrowthYear>,
    pub future_value: Money,
    /// initial investment plus every contribution
    pub total_contributed: Money,
    pub total_interest: Money,
    pub effective_annual_rate: Rate,
    pub inflation_adjusted_value: Option<Money>,
    /// future value less tax on the interest earned
    pub after_tax_value: Option<Money>,
}

impl CompoundGrowth {
    /// project balance growth period by period
    ///
    /// Interest accrues each compounding period on the running balance.
    /// Contributions land at the end of the compounding period in which they
    /// fall due, so the full annual contribution is in by year end whether or
    /// not the two frequencies align.
    pub fn project(inputs: &GrowthInputs) -> Result<Self> {
        validate(inputs)?;

        let periods = inputs.compounding.periods_per_year();
        let events = inputs.contribution_frequency.per_year();
        let annual_rate = Rate::from_percent(inputs.annual_rate_percent);
        let period_rate = annual_rate.periodic(periods).as_decimal();
        let per_event = inputs.annual_contribution / Decimal::from(events);

        let mut balance = inputs.initial_investment;
        let mut total_contributed = inputs.initial_investment;
        let mut total_interest = Money::ZERO;
        let mut yearly = Vec::with_capacity(inputs.years as usize);

        for year in 1..=inputs.years {
            let starting_balance = balance;
            let mut year_interest = Money::ZERO;
            let mut year_contributions = Money::ZERO;
            let mut events_made = 0u32;

            for period in 1..=periods {
                let interest = Money::from_decimal(balance.as_decimal() * period_rate);
                balance += interest;
                year_interest += interest;

                if inputs.annual_contribution.is_positive() {
                    let due = period * events / periods;
                    while events_made < due {
                        // last deposit of the year absorbs rounding
                        let amount = if events_made + 1 == events {
                            inputs.annual_contribution - year_contributions
                        } else {
                            per_event
                        };
                        balance += amount;
                        year_contributions += amount;
                        events_made += 1;
                    }
                }
            }

            total_interest += year_interest;
            total_contributed += year_contributions;
            yearly.push(GrowthYear {
                year,
                starting_balance,
                contributions: year_contributions,
                interest: year_interest,
                ending_balance: balance,
            });
        }

        let effective_annual_rate = effective_annual_rate(annual_rate, periods).ok_or_else(|| {
            AmortizationError::invalid_input("effective rate exceeds numeric range")
        })?;

        let inflation_adjusted_value = match inputs.inflation_rate_percent {
            Some(inflation) if inflation > Decimal::ZERO => {
                let deflator = compound_factor(Rate::from_percent(inflation).as_decimal(), inputs.years)
                    .ok_or_else(|| AmortizationError::invalid_input("inflation factor exceeds numeric range"))?;
                Some(balance / deflator)
            }
            _ => None,
        };

        let after_tax_value = match inputs.tax_rate_percent {
            Some(tax) if tax > Decimal::ZERO => Some(balance - total_interest.percentage(tax)),
            _ => None,
        };

        Ok(Self {
            yearly,
            future_value: balance,
            total_contributed,
            total_interest,
            effective_annual_rate,
            inflation_adjusted_value,
            after_tax_value,
        })
    }
}

fn validate(inputs: &GrowthInputs) -> Result<()> {
    if inputs.initial_investment.is_negative() || inputs.annual_contribution.is_negative() {
        return Err(AmortizationError::invalid_input("amounts must not be negative"));
    }
    if inputs.initial_investment.is_zero() && inputs.annual_contribution.is_zero() {
        return Err(AmortizationError::invalid_input(
            "either an initial investment or a contribution is required",
        ));
    }
    if inputs.annual_rate_percent < Decimal::ZERO {
        return Err(AmortizationError::invalid_input("rate must not be negative"));
    }
    if inputs.years == 0 {
        return Err(AmortizationError::invalid_input("investment period must be at least one year"));
    }
    for rate in [inputs.inflation_rate_percent, inputs.tax_rate_percent].into_iter().flatten() {
        if rate < Decimal::ZERO {
            return Err(AmortizationError::invalid_input("rates must not be negative"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn inputs() -> GrowthInputs {
        GrowthInputs {
            initial_investment: Money::from_major(10_000),
            annual_contribution: Money::ZERO,
            contribution_frequency: ContributionFrequency::Monthly,
            annual_rate_percent: dec!(6),
            compounding: CompoundingFrequency::Annual,
            years: 2,
            inflation_rate_percent: None,
            tax_rate_percent: None,
        }
    }

    #[test]
    fn test_annual_compounding_without_contributions() {
        let growth = CompoundGrowth::project(&inputs()).unwrap();

        assert_eq!(growth.yearly.len(), 2);
        assert_eq!(growth.yearly[0].ending_balance, Money::from_major(10_600));
        assert_eq!(growth.future_value, Money::from_major(11_236));
        assert_eq!(growth.total_interest, Money::from_major(1_236));
        assert_eq!(growth.total_contributed, Money::from_major(10_000));
        assert_eq!(growth.effective_annual_rate, Rate::from_percentage(6));
    }

    #[test]
    fn test_contributions_land_in_full_each_year() {
        let mut inputs = inputs();
        inputs.annual_contribution = Money::from_major(1_200);
        inputs.compounding = CompoundingFrequency::Daily;
        inputs.years = 3;

        let growth = CompoundGrowth::project(&inputs).unwrap();
        for year in &growth.yearly {
            assert_eq!(year.contributions, Money::from_major(1_200));
        }
        assert_eq!(growth.total_contributed, Money::from_major(13_600));
        assert_eq!(growth.future_value, growth.total_contributed + growth.total_interest);
    }

    #[test]
    fn test_monthly_contributions_monthly_compounding() {
        let mut inputs = inputs();
        inputs.initial_investment = Money::ZERO;
        inputs.annual_contribution = Money::from_major(1_200);
        inputs.annual_rate_percent = Decimal::ZERO;
        inputs.compounding = CompoundingFrequency::Monthly;
        inputs.years = 1;

        let growth = CompoundGrowth::project(&inputs).unwrap();
        assert_eq!(growth.future_value, Money::from_major(1_200));
        assert_eq!(growth.total_interest, Money::ZERO);
    }

    #[test]
    fn test_inflation_and_tax_adjustments() {
        let mut inputs = inputs();
        inputs.inflation_rate_percent = Some(dec!(2));
        inputs.tax_rate_percent = Some(dec!(25));

        let growth = CompoundGrowth::project(&inputs).unwrap();
        let real = growth.inflation_adjusted_value.unwrap();
        assert!(real < growth.future_value);
        assert_eq!(real.to_cents(), Money::from_str_exact("10799.69").unwrap());
        assert_eq!(growth.after_tax_value, Some(Money::from_major(10_927)));
    }

    #[test]
    fn test_rejects_invalid_inputs() {
        let mut bad = inputs();
        bad.years = 0;
        assert!(matches!(
            CompoundGrowth::project(&bad),
            Err(AmortizationError::InvalidCalculatorInput { .. })
        ));

        let mut bad = inputs();
        bad.annual_rate_percent = dec!(-1);
        assert!(CompoundGrowth::project(&bad).is_err());
    }
}
