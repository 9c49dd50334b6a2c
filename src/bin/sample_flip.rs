//! Run the sample flip through all three financing scenarios
//!
//! Prints the comparison table, or JSON with --json, so the output can be
//! diffed against earlier runs.

use std::env;

use anyhow::Result;

use realty_calc::flip::sample::sample_scenarios;
use realty_calc::flip::compare_scenarios;
use realty_calc::Triple;

fn row(label: &str, values: &Triple<f64>) {
    println!(
        "{:<22} {:>14.2} {:>14.2} {:>14.2}",
        label, values.scenario1, values.scenario2, values.scenario3
    );
}

fn main() -> Result<()> {
    env_logger::init();

    let json_output = env::args().any(|a| a == "--json");

    let [s1, s2, s3] = sample_scenarios();
    let address = s1.general_info.property_address.clone();
    let comparison = compare_scenarios(s1, s2, s3)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&comparison)?);
        return Ok(());
    }

    println!("Sample flip: {address}");
    println!("{}", "=".repeat(68));
    println!("{:<22} {:>14} {:>14} {:>14}", "", "Scenario 1", "Scenario 2", "Scenario 3");
    println!("{}", "-".repeat(68));
    row("Acquisition", &comparison.costs.acquisition);
    row("Renovation", &comparison.costs.renovation);
    row("Holding + maintenance", &comparison.costs.holding);
    row("Selling", &comparison.costs.selling);
    row("Financing costs", &comparison.financing.financing_costs);
    row("Total borrowed", &comparison.financing.total_borrowed);
    row("Monthly payments", &comparison.financing.monthly_payments);
    row("Cash invested", &comparison.financing.total_cash_invested);
    row("Revenue", &comparison.revenues.total_revenue);
    row("Net profit", &comparison.net_profit);
    row("ROI %", &comparison.roi);
    row("Annualized ROI %", &comparison.annualized_roi);
    println!(
        "{:<22} {:>14} {:>14} {:>14}",
        "Holding months",
        comparison.holding_period_months.scenario1,
        comparison.holding_period_months.scenario2,
        comparison.holding_period_months.scenario3,
    );
    println!("\nBest: {}", comparison.best_scenario);

    Ok(())
}
