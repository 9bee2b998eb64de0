/// biweekly payments - half the monthly payment every two weeks
use amortization_engine::calculators::BiweeklyComparison;
use amortization_engine::{Money, YearMonth};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let result = BiweeklyComparison::evaluate(Money::from_major(250_000), dec!(6.25), 360, YearMonth::new(2024, 1)?)?;

    println!("monthly payment:  {}", result.monthly_payment.to_cents());
    println!("biweekly payment: {}", result.biweekly_payment.to_cents());
    println!("monthly payoff:   {} after {} payments", result.monthly.payoff_date, result.monthly.total_periods);
    println!("biweekly payoff:  {} after {} payments", result.biweekly.payoff_date, result.biweekly.total_periods);
    println!("interest saved:   {}", result.comparison.interest_saved.to_cents());
    println!("time saved:       {}", result.comparison.time_saved);

    Ok(())
}
