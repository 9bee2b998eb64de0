/// json request - drive the payoff calculator from a JSON document
use amortization_engine::{run_payoff, JsonInputReader, PayoffView, ScheduleSink};

struct ConsoleSink;

impl ScheduleSink for ConsoleSink {
    fn render(&mut self, view: &PayoffView) -> amortization_engine::Result<()> {
        println!("{}", serde_json::to_string_pretty(view)?);
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let json = r#"{
        "loan": {
            "principal": "180000",
            "annual_rate_percent": "5.75",
            "term_months": 240,
            "start_date": "2025-01"
        },
        "extra": {
            "recurring_amount": "250",
            "one_time_amount": "7500",
            "one_time_date": "2026-04"
        }
    }"#;

    let reader = JsonInputReader::from_json(json)?;
    let scenario = run_payoff(&reader, &mut ConsoleSink)?;

    println!("interest saved: {}", scenario.comparison.interest_saved.to_cents());

    Ok(())
}
