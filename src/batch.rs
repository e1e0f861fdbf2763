// 📑 Batch Scenarios - CSV in, CSV out
// Computes a summary for every input row so several purchases can be compared side by side

use crate::calculator::{compute, LoanInputs};
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::info;

/// One output line: the inputs followed by every derived figure
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioResult {
    pub full_cost_avr: f64,
    pub down_coefficient: f64,
    pub interest_rate: f64,
    pub years_loan: f64,
    pub rent: f64,
    pub full_cost: f64,
    pub initial_down_payment: f64,
    pub loan_amount: f64,
    pub monthly_pay: f64,
    pub net_monthly_cost: f64,
    pub anual_yield: f64,
}

impl From<LoanInputs> for ScenarioResult {
    fn from(inputs: LoanInputs) -> Self {
        let summary = compute(&inputs);
        ScenarioResult {
            full_cost_avr: inputs.full_cost_avr,
            down_coefficient: inputs.down_coefficient,
            interest_rate: inputs.interest_rate,
            years_loan: inputs.years_loan,
            rent: inputs.rent,
            full_cost: summary.full_cost,
            initial_down_payment: summary.initial_down_payment,
            loan_amount: summary.loan_amount,
            monthly_pay: summary.monthly_pay,
            net_monthly_cost: summary.net_monthly_cost(inputs.rent),
            anual_yield: summary.anual_yield,
        }
    }
}

/// Read scenario rows. Headers are the query parameter names.
pub fn read_scenarios<R: Read>(reader: R) -> Result<Vec<LoanInputs>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut scenarios = Vec::new();

    for (line, result) in rdr.deserialize().enumerate() {
        let inputs: LoanInputs =
            result.with_context(|| format!("Invalid scenario on data row {}", line + 1))?;
        scenarios.push(inputs);
    }

    Ok(scenarios)
}

pub fn write_results<W: Write>(writer: W, results: &[ScenarioResult]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for result in results {
        wtr.serialize(result)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Read scenarios from `input_path` and write results to `output`
pub fn run<P: AsRef<Path>, W: Write>(input_path: P, output: W) -> Result<usize> {
    let path = input_path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open scenarios file: {:?}", path))?;

    let scenarios = read_scenarios(file)?;
    let results: Vec<ScenarioResult> = scenarios.into_iter().map(ScenarioResult::from).collect();

    let degenerate = results.iter().filter(|r| !r.monthly_pay.is_finite()).count();
    info!(rows = results.len(), degenerate, "computed scenarios from {:?}", path);

    write_results(output, &results)?;
    Ok(results.len())
}
