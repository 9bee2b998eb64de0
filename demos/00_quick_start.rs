/// quick start - minimal example to get started
use amortization_engine::{generate_schedule, LoanTerms, Money, YearMonth};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // $200,000 at 6% over 30 years
    let terms = LoanTerms::monthly(Money::from_major(200_000), dec!(6), 360, YearMonth::new(2024, 1)?);
    let schedule = generate_schedule(&terms, None)?;

    println!("monthly payment: {}", schedule.scheduled_payment.to_cents());
    println!("total interest:  {}", schedule.total_interest_paid.to_cents());
    println!("paid off:        {}", schedule.payoff_date);

    // first and last rows
    for record in [schedule.schedule.first(), schedule.schedule.last()].into_iter().flatten() {
        println!(
            "#{:>3} {}  interest {:>10}  principal {:>10}  balance {:>12}",
            record.period_index,
            record.period_date,
            record.interest_portion.to_cents(),
            record.principal_portion.to_cents(),
            record.ending_balance.to_cents(),
        );
    }

    Ok(())
}
