/// refinance and discount points - break-even analysis
use amortization_engine::calculators::{PointsAnalysis, PointsInputs, RefinanceAnalysis, RefinanceInputs};
use amortization_engine::{BreakEven, Money, YearMonth};
use rust_decimal_macros::dec;

fn describe(break_even: &BreakEven) -> String {
    match break_even {
        BreakEven::Immediate => "immediately".to_string(),
        BreakEven::After { periods, span } => format!("after {} months ({})", periods, span),
        BreakEven::Never => "never".to_string(),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let refinance = RefinanceAnalysis::evaluate(&RefinanceInputs {
        current_balance: Money::from_major(280_000),
        current_payment: Money::from_str_exact("2098.43")?,
        current_rate_percent: dec!(7.75),
        remaining_months: 324,
        new_loan_amount: None,
        new_rate_percent: dec!(6.25),
        new_term_months: 360,
        closing_costs: Money::from_major(5_500),
        points_percent: dec!(0.5),
        start_date: YearMonth::new(2025, 2)?,
    })?;

    println!("refinance");
    println!("  new payment:      {}", refinance.new_payment.to_cents());
    println!("  monthly savings:  {}", refinance.monthly_savings.to_cents());
    println!("  total costs:      {}", refinance.total_costs.to_cents());
    println!("  break even:       {}", describe(&refinance.break_even));
    println!("  lifetime savings: {}", refinance.lifetime_savings.to_cents());

    let points = PointsAnalysis::evaluate(&PointsInputs {
        loan_amount: Money::from_major(400_000),
        annual_rate_percent: dec!(6.875),
        term_months: 360,
        points: dec!(1.5),
        cost_per_point_percent: dec!(1),
        rate_reduction_per_point: dec!(0.25),
        planned_months: 84,
    })?;

    println!("points");
    println!("  cost:           {}", points.points_cost.to_cents());
    println!("  new rate:       {}%", points.new_rate_percent);
    println!("  monthly saving: {}", points.monthly_savings.to_cents());
    println!("  break even:     {}", describe(&points.break_even));
    println!("  net savings:    {}", points.net_savings.to_cents());
    println!("  recommendation: {:?}", points.recommendation);

    Ok(())
}
