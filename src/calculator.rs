// 🏠 Mortgage Calculator - Amortization Core
// Pure transform from the five loan inputs to the derived figures shown in the results table

use serde::{Deserialize, Serialize};

/// Price inputs are expressed in millions
pub const MILLION: f64 = 1_000_000.0;

// ============================================================================
// INPUTS
// ============================================================================

/// The five caller-supplied numbers. Field names on the wire match the
/// query parameters used by share links.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanInputs {
    /// Property price in millions of currency units
    pub full_cost_avr: f64,

    /// Fraction of the price paid upfront (0.3 = 30%)
    pub down_coefficient: f64,

    /// Nominal annual rate as a percentage (11 = 11%)
    pub interest_rate: f64,

    /// Loan term in years
    pub years_loan: f64,

    /// Expected monthly rent, absolute units
    pub rent: f64,
}

impl Default for LoanInputs {
    fn default() -> Self {
        LoanInputs {
            full_cost_avr: 130.0,
            down_coefficient: 0.3,
            interest_rate: 11.0,
            years_loan: 20.0,
            rent: 770_000.0,
        }
    }
}

impl LoanInputs {
    /// Monthly-equivalent fractional rate
    pub fn monthly_rate(&self) -> f64 {
        self.interest_rate / 1200.0
    }

    /// Number of monthly payments
    pub fn months(&self) -> f64 {
        self.years_loan * 12.0
    }

    /// Strict check for callers that want to reject degenerate input instead
    /// of receiving non-finite figures from `compute`.
    pub fn validate(&self) -> Result<(), Vec<InputIssue>> {
        let mut issues = Vec::new();

        let fields = [
            ("fullCostAvr", self.full_cost_avr),
            ("downCoefficient", self.down_coefficient),
            ("interestRate", self.interest_rate),
            ("yearsLoan", self.years_loan),
            ("rent", self.rent),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                issues.push(InputIssue::new(field, "must be a finite number"));
            }
        }
        if !issues.is_empty() {
            return Err(issues);
        }

        if self.full_cost_avr <= 0.0 {
            issues.push(InputIssue::new("fullCostAvr", "price must be greater than zero"));
        }
        if !(0.0..1.0).contains(&self.down_coefficient) {
            issues.push(InputIssue::new("downCoefficient", "must be in [0, 1)"));
        }
        if self.interest_rate <= 0.0 {
            issues.push(InputIssue::new("interestRate", "rate must be greater than zero"));
        }
        if self.years_loan <= 0.0 {
            issues.push(InputIssue::new("yearsLoan", "term must be greater than zero"));
        }
        if self.rent < 0.0 {
            issues.push(InputIssue::new("rent", "rent cannot be negative"));
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(issues)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InputIssue {
    pub field: String,
    pub message: String,
}

impl InputIssue {
    fn new(field: &str, message: &str) -> Self {
        InputIssue {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

impl std::fmt::Display for InputIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for InputIssue {}

// ============================================================================
// OUTPUTS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanSummary {
    pub full_cost: f64,
    pub initial_down_payment: f64,
    pub loan_amount: f64,
    pub monthly_pay: f64,

    /// `rent * 100 / full_cost`. Uses a single month of rent even though it
    /// is labelled annual; kept as-is so existing share links show the same
    /// number.
    pub anual_yield: f64,
}

impl LoanSummary {
    /// Monthly payment left to cover after the rent comes in
    pub fn net_monthly_cost(&self, rent: f64) -> f64 {
        self.monthly_pay - rent
    }

    pub fn is_finite(&self) -> bool {
        self.full_cost.is_finite()
            && self.initial_down_payment.is_finite()
            && self.loan_amount.is_finite()
            && self.monthly_pay.is_finite()
            && self.anual_yield.is_finite()
    }
}

// ============================================================================
// COMPUTATION
// ============================================================================

/// Derive the summary figures. Zero rate, zero term or zero price are not
/// special-cased: the resulting NaN/infinity is returned to the caller.
pub fn compute(inputs: &LoanInputs) -> LoanSummary {
    let full_cost = inputs.full_cost_avr * MILLION;
    let initial_down_payment = full_cost * inputs.down_coefficient;
    let loan_amount = full_cost * (1.0 - inputs.down_coefficient);

    let i = inputs.monthly_rate();
    let growth = (1.0 + i).powf(inputs.months()) - 1.0;
    let monthly_pay = (i + i / growth) * loan_amount;

    let anual_yield = (inputs.rent * 100.0) / full_cost;

    LoanSummary {
        full_cost,
        initial_down_payment,
        loan_amount,
        monthly_pay,
        anual_yield,
    }
}
