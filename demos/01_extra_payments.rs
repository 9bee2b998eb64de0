/// extra payments - recurring, annual and one-time contributions against a baseline
use amortization_engine::{ExtraPaymentPolicy, LoanTerms, Money, PayoffScenario, YearMonth};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let start = YearMonth::new(2024, 1)?;
    let terms = LoanTerms::monthly(Money::from_major(300_000), dec!(6.5), 360, start);

    // $200 every month, $2,000 each December, $10,000 windfall in mid 2027
    let policy = ExtraPaymentPolicy::starting(start)
        .recurring(Money::from_major(200))
        .annual(Money::from_major(2_000), 12)
        .one_time(Money::from_major(10_000), YearMonth::new(2027, 6)?);

    let scenario = PayoffScenario::evaluate(&terms, &policy)?;
    let comparison = &scenario.comparison;

    println!("baseline payoff:    {}", comparison.baseline_payoff);
    println!("accelerated payoff: {}", comparison.variant_payoff);
    println!("time saved:         {}", comparison.time_saved);
    println!("interest saved:     {}", comparison.interest_saved.to_cents());
    println!("extra paid:         {}", scenario.accelerated.total_extra_paid.to_cents());

    println!("\nyear  interest     principal    extra        balance");
    for year in scenario.accelerated.yearly_summaries() {
        println!(
            "{}  {:>11}  {:>11}  {:>11}  {:>12}",
            year.year,
            year.interest.to_cents(),
            year.principal.to_cents(),
            year.extra.to_cents(),
            year.ending_balance.to_cents(),
        );
    }

    Ok(())
}
