// 🔗 Share Links - Query String Layer
// Reads loan inputs from a URL query and writes them back for shareable links

use crate::calculator::LoanInputs;
use tracing::debug;

/// Parameter names in the order they are serialized (alphabetical)
pub const PARAM_NAMES: [&str; 5] = [
    "downCoefficient",
    "fullCostAvr",
    "interestRate",
    "rent",
    "yearsLoan",
];

// ============================================================================
// PARSING
// ============================================================================

/// Parse a raw query (with or without the leading `?`) into inputs.
///
/// Missing, empty, non-numeric or non-finite values fall back to the
/// default for that field. A value that parses to zero is kept.
pub fn parse_query(query: &str) -> LoanInputs {
    let query = query.strip_prefix('?').unwrap_or(query);
    let defaults = LoanInputs::default();

    let mut full_cost_avr = None;
    let mut down_coefficient = None;
    let mut interest_rate = None;
    let mut years_loan = None;
    let mut rent = None;

    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let (raw_key, raw_value) = pair.split_once('=').unwrap_or((pair, ""));
        let key = decode_component(raw_key);

        let slot = match key.as_str() {
            "fullCostAvr" => &mut full_cost_avr,
            "downCoefficient" => &mut down_coefficient,
            "interestRate" => &mut interest_rate,
            "yearsLoan" => &mut years_loan,
            "rent" => &mut rent,
            _ => continue,
        };

        // First occurrence wins
        if slot.is_none() {
            *slot = Some(decode_component(raw_value));
        }
    }

    LoanInputs {
        full_cost_avr: field_or_default("fullCostAvr", full_cost_avr, defaults.full_cost_avr),
        down_coefficient: field_or_default(
            "downCoefficient",
            down_coefficient,
            defaults.down_coefficient,
        ),
        interest_rate: field_or_default("interestRate", interest_rate, defaults.interest_rate),
        years_loan: field_or_default("yearsLoan", years_loan, defaults.years_loan),
        rent: field_or_default("rent", rent, defaults.rent),
    }
}

/// Parse a single numeric value the way form fields and query values are
/// read: trimmed, finite, otherwise `None`.
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn field_or_default(name: &str, raw: Option<String>, default: f64) -> f64 {
    match raw {
        None => default,
        Some(raw) => match parse_number(&raw) {
            Some(value) => value,
            None => {
                debug!(field = name, value = %raw, "non-numeric query value, using default");
                default
            }
        },
    }
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}

// ============================================================================
// SERIALIZATION
// ============================================================================

/// Serialize inputs so that `parse_query` reproduces them exactly
pub fn to_query_string(inputs: &LoanInputs) -> String {
    let values = [
        inputs.down_coefficient,
        inputs.full_cost_avr,
        inputs.interest_rate,
        inputs.rent,
        inputs.years_loan,
    ];

    PARAM_NAMES
        .iter()
        .zip(values)
        .map(|(name, value)| format!("{}={}", name, urlencoding::encode(&value.to_string())))
        .collect::<Vec<_>>()
        .join("&")
}

/// Full link: `{base}?{query}`
pub fn share_link(base: &str, inputs: &LoanInputs) -> String {
    format!("{}?{}", base.trim_end_matches('?'), to_query_string(inputs))
}
