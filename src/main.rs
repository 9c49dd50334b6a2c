//! Realty Calc CLI
//!
//! Command-line interface for flip and rental calculations

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use serde::de::DeserializeOwned;
use serde::Serialize;

use realty_calc::flip::{
    compare_scenarios, flip_napkin, FlipAnalysis, FlipComparison, FlipNapkinConfig, FlipNapkinInput,
    FlipScenario,
};
use realty_calc::multi::{
    compare_rentals, multi_napkin, run_sensitivity, MultiComparison, MultiNapkinConfig,
    MultiNapkinInput, MultiScenario, RentalAnalysis, SensitivityConfig,
};
use realty_calc::{amortization_schedule, LoanTerms, Triple};

#[derive(Parser, Debug)]
#[command(name = "realty-calc")]
#[command(about = "Profitability calculations for flip and rental real-estate deals")]
struct Args {
    /// Print JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Calculator {
    Flip,
    Multi,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze a single flip scenario from a JSON file
    Flip { file: PathBuf },

    /// Analyze a single rental scenario from a JSON file
    Multi { file: PathBuf },

    /// Compare three scenarios from a JSON file with scenario1..scenario3
    Compare {
        file: PathBuf,
        #[arg(long, value_enum, default_value = "flip")]
        calculator: Calculator,
    },

    /// Sensitivity sweep around a rental scenario
    Sensitivity {
        file: PathBuf,
        /// Optional sweep definition; defaults apply when omitted
        #[arg(long)]
        config: Option<PathBuf>,
        /// Also write the sweep to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// FIP10 quick screen for a flip
    NapkinFlip {
        #[arg(long)]
        initial_price: f64,
        #[arg(long)]
        renovation_price: f64,
        #[arg(long)]
        final_price: f64,
    },

    /// Quick screen for a multi-unit rental
    NapkinMulti {
        #[arg(long)]
        price: f64,
        #[arg(long)]
        apartments: u32,
        /// Annual gross revenue
        #[arg(long)]
        revenue: f64,
    },

    /// Month-by-month amortization table
    Schedule {
        #[arg(long)]
        principal: f64,
        /// Annual rate in percent
        #[arg(long)]
        rate: f64,
        #[arg(long)]
        years: u32,
        /// Rows to print (defaults to 12)
        #[arg(long, default_value_t = 12)]
        months: u32,
    },
}

/// JSON output wrapper
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report<'a, T: Serialize> {
    generated_at: DateTime<Utc>,
    result: &'a T,
}

fn print_json<T: Serialize>(result: &T) -> Result<()> {
    let report = Report { generated_at: Utc::now(), result };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).with_context(|| format!("Unable to open {}", path.display()))?;
    serde_json::from_reader(file).with_context(|| format!("Invalid JSON in {}", path.display()))
}

fn verdict(is_good_deal: bool) -> &'static str {
    if is_good_deal {
        "GOOD DEAL"
    } else {
        "PASS"
    }
}

fn print_flip(analysis: &FlipAnalysis) {
    let p = &analysis.profitability;
    println!("Holding period:     {} months", analysis.holding_period_months);
    println!("{}", "-".repeat(40));
    println!("Acquisition:        ${:>14.2}", p.acquisition_cost);
    println!("Renovation:         ${:>14.2}", p.renovation_cost);
    println!("Total investment:   ${:>14.2}", p.total_investment);
    println!("Revenue:            ${:>14.2}", p.total_revenue);
    println!("Gross profit:       ${:>14.2}", p.gross_profit);
    println!("Holding costs:      ${:>14.2}", p.holding_costs);
    println!("Selling costs:      ${:>14.2}", p.selling_costs);
    println!("Financing costs:    ${:>14.2}", p.financing_costs);
    println!("Net profit:         ${:>14.2}", p.net_profit);
    println!("Cash invested:      ${:>14.2}", p.total_cash_invested);
    println!("ROI:                {:>14.2}%", p.roi);
    println!("Annualized ROI:     {:>14.2}%", p.annualized_roi);
    println!("Cash on cash:       {:>14.2}%", p.cash_on_cash);
}

fn print_rental(analysis: &RentalAnalysis) {
    println!("Gross revenue:      ${:>14.2}", analysis.gross_revenue);
    println!("Vacancy loss:       ${:>14.2}", analysis.vacancy_loss);
    println!("Operating expenses: ${:>14.2}", analysis.operating_expenses);
    println!("NOI:                ${:>14.2}", analysis.net_operating_income);
    println!("Debt service:       ${:>14.2}", analysis.annual_debt_service);
    println!("Annual cashflow:    ${:>14.2}", analysis.annual_cashflow);
    println!("Cashflow/unit/mo:   ${:>14.2}", analysis.monthly_cashflow_per_unit);
    println!("Cap rate:           {:>14.2}%", analysis.cap_rate);
    println!("DSCR:               {:>14.2}", analysis.dscr);
    println!("Cash on cash:       {:>14.2}%", analysis.cash_on_cash);
    println!("Expense ratio:      {:>14.2}%", analysis.expense_ratio);
    println!("GRM:                {:>14.2}", analysis.gross_rent_multiplier);
}

fn print_row(label: &str, values: &Triple<f64>, suffix: &str) {
    println!(
        "{:<20} {:>14.2}{suffix} {:>14.2}{suffix} {:>14.2}{suffix}",
        label, values.scenario1, values.scenario2, values.scenario3
    );
}

fn print_comparison_header() {
    println!("{:<20} {:>15} {:>15} {:>15}", "", "Scenario 1", "Scenario 2", "Scenario 3");
    println!("{}", "-".repeat(68));
}

fn print_flip_comparison(comparison: &FlipComparison) {
    print_comparison_header();
    print_row("Total investment", &comparison.total_investment, " ");
    print_row("Financing costs", &comparison.financing.financing_costs, " ");
    print_row("Cash invested", &comparison.financing.total_cash_invested, " ");
    print_row("Net profit", &comparison.net_profit, " ");
    print_row("ROI", &comparison.roi, "%");
    print_row("Annualized ROI", &comparison.annualized_roi, "%");
    println!("\nBest: {} (highest annualized ROI)", comparison.best_scenario);
}

fn print_multi_comparison(comparison: &MultiComparison) {
    print_comparison_header();
    print_row("NOI", &comparison.net_operating_income, " ");
    print_row("Debt service", &comparison.annual_debt_service, " ");
    print_row("Annual cashflow", &comparison.annual_cashflow, " ");
    print_row("Cashflow/unit/mo", &comparison.cashflow_per_unit, " ");
    print_row("Cap rate", &comparison.cap_rate, "%");
    print_row("DSCR", &comparison.dscr, " ");
    print_row("Cash on cash", &comparison.cash_on_cash, "%");
    println!("\nBest: {} (highest cash on cash)", comparison.best_scenario);
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    match args.command {
        Command::Flip { file } => {
            let scenario: FlipScenario = read_json(&file)?;
            let analysis = scenario.analyze()?;
            if args.json {
                print_json(&analysis)?;
            } else {
                print_flip(&analysis);
            }
        }

        Command::Multi { file } => {
            let scenario: MultiScenario = read_json(&file)?;
            let analysis = scenario.analyze()?;
            if args.json {
                print_json(&analysis)?;
            } else {
                print_rental(&analysis);
            }
        }

        Command::Compare { file, calculator: Calculator::Flip } => {
            let set: Triple<FlipScenario> = read_json(&file)?;
            let comparison = compare_scenarios(set.scenario1, set.scenario2, set.scenario3)?;
            if args.json {
                print_json(&comparison)?;
            } else {
                print_flip_comparison(&comparison);
            }
        }

        Command::Compare { file, calculator: Calculator::Multi } => {
            let set: Triple<MultiScenario> = read_json(&file)?;
            let comparison = compare_rentals(set.scenario1, set.scenario2, set.scenario3)?;
            if args.json {
                print_json(&comparison)?;
            } else {
                print_multi_comparison(&comparison);
            }
        }

        Command::Sensitivity { file, config, csv } => {
            let scenario: MultiScenario = read_json(&file)?;
            let config: SensitivityConfig = match config {
                Some(path) => read_json(&path)?,
                None => SensitivityConfig::default(),
            };
            let report = run_sensitivity(&scenario, &config)?;

            if let Some(path) = csv {
                let out = File::create(&path)
                    .with_context(|| format!("Unable to create {}", path.display()))?;
                report.write_csv(out)?;
                eprintln!("Sensitivity written to: {}", path.display());
            }

            if args.json {
                print_json(&report)?;
            } else {
                println!(
                    "{:<28} {:>14} {:>12} {:>9} {:>7} {:>12}",
                    "Point", "Cashflow", "Per unit", "Cap", "DSCR", "Change"
                );
                println!("{}", "-".repeat(88));
                for point in std::iter::once(&report.base).chain(&report.points) {
                    println!(
                        "{:<28} {:>14.2} {:>12.2} {:>8.2}% {:>7.2} {:>12.2}",
                        point.label,
                        point.annual_cashflow,
                        point.cashflow_per_unit,
                        point.cap_rate,
                        point.dscr,
                        point.cashflow_change,
                    );
                }
            }
        }

        Command::NapkinFlip { initial_price, renovation_price, final_price } => {
            let input = FlipNapkinInput { initial_price, renovation_price, final_price };
            let result = flip_napkin(&input, &FlipNapkinConfig::default())?;
            if args.json {
                print_json(&result)?;
            } else {
                println!("Overhead:        ${:>12.2}", result.overhead);
                println!("Profit:          ${:>12.2}", result.profit);
                println!("Max offer price: ${:>12.2}", result.max_offer_price);
                println!("Verdict:         {}", verdict(result.is_good_deal));
            }
        }

        Command::NapkinMulti { price, apartments, revenue } => {
            let input = MultiNapkinInput { price, apartments, revenue };
            let result = multi_napkin(&input, &MultiNapkinConfig::default())?;
            if args.json {
                print_json(&result)?;
            } else {
                println!("Expense ratio:      {:>12.0}%", result.expense_ratio * 100.0);
                println!("NOI:               ${:>12.2}", result.net_operating_income);
                println!("Financing:         ${:>12.2}", result.financing);
                println!("Cashflow:          ${:>12.2}", result.cashflow);
                println!("Cashflow per door: ${:>12.2}", result.cashflow_per_door);
                println!("Max purchase price:${:>12.2}", result.max_purchase_price);
                println!("Verdict:            {}", verdict(result.is_good_deal));
            }
        }

        Command::Schedule { principal, rate, years, months } => {
            let terms = LoanTerms::from_years(principal, rate, years)?;
            let rows = amortization_schedule(&terms, months);
            if args.json {
                print_json(&rows)?;
            } else {
                println!("Monthly payment: ${:.2}\n", terms.monthly_payment());
                println!(
                    "{:>5} {:>14} {:>12} {:>12} {:>12} {:>14}",
                    "Month", "Opening", "Payment", "Interest", "Principal", "Closing"
                );
                println!("{}", "-".repeat(74));
                for row in &rows {
                    println!(
                        "{:>5} {:>14.2} {:>12.2} {:>12.2} {:>12.2} {:>14.2}",
                        row.month,
                        row.opening_balance,
                        row.payment,
                        row.interest,
                        row.principal,
                        row.closing_balance,
                    );
                }
            }
        }
    }

    Ok(())
}
