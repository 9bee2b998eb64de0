pub mod affordability;
pub mod biweekly;
pub mod housing;
pub mod points;
pub mod refinance;

use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::calendar::YearsMonths;
use crate::decimal::Money;

pub use affordability::{Affordability, AffordabilityEstimate, AffordabilityInputs, ShortfallReason};
pub use biweekly::BiweeklyComparison;
pub use housing::{HousingInputs, HousingPayment};
pub use points::{PointsAnalysis, PointsInputs, PointsRecommendation};
pub use refinance::{RefinanceAnalysis, RefinanceInputs};

/// when upfront costs are recovered by periodic savings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BreakEven {
    /// nothing to recover
    Immediate,
    /// recovered after this many monthly periods
    After { periods: u32, span: YearsMonths },
    /// no periodic savings to recover costs with
    Never,
}

impl BreakEven {
    /// ceil(costs / savings) periods
    pub fn from_costs(costs: Money, periodic_savings: Money) -> Self {
        if !periodic_savings.is_positive() {
            return BreakEven::Never;
        }
        if !costs.is_positive() {
            return BreakEven::Immediate;
        }

        let periods = (costs.as_decimal() / periodic_savings.as_decimal())
            .ceil()
            .to_u32()
            .unwrap_or(u32::MAX);
        BreakEven::After {
            periods,
            span: YearsMonths::from_months(periods),
        }
    }

    pub fn periods(&self) -> Option<u32> {
        match self {
            BreakEven::Immediate => Some(0),
            BreakEven::After { periods, .. } => Some(*periods),
            BreakEven::Never => None,
        }
    }
}
