// 📝 Interactive Form State
// Holds the five inputs as one record and recomputes the summary on every change

use crate::calculator::{compute, LoanInputs, LoanSummary};
use crate::query::{parse_number, share_link};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    FullCostAvr,
    Rent,
    DownCoefficient,
    InterestRate,
    YearsLoan,
}

/// Range input bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slider {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Slider {
    /// Move by `steps` and clamp, snapping to the step grid
    pub fn nudge(&self, value: f64, steps: f64) -> f64 {
        let moved = (value + steps * self.step).clamp(self.min, self.max);
        let snapped = self.min + ((moved - self.min) / self.step).round() * self.step;
        // Strip float noise (0.35000000000000003 -> 0.35)
        (snapped * 1e9).round() / 1e9
    }

    /// True when `value` is inside the range and on the step grid, i.e. a
    /// range control would hold it without adjusting it
    pub fn accepts(&self, value: f64) -> bool {
        if !(self.min..=self.max).contains(&value) {
            return false;
        }
        let steps = (value - self.min) / self.step;
        (steps - steps.round()).abs() < 1e-9
    }
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::FullCostAvr,
        Field::Rent,
        Field::DownCoefficient,
        Field::InterestRate,
        Field::YearsLoan,
    ];

    pub fn next(&self) -> Self {
        match self {
            Field::FullCostAvr => Field::Rent,
            Field::Rent => Field::DownCoefficient,
            Field::DownCoefficient => Field::InterestRate,
            Field::InterestRate => Field::YearsLoan,
            Field::YearsLoan => Field::FullCostAvr,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Field::FullCostAvr => Field::YearsLoan,
            Field::Rent => Field::FullCostAvr,
            Field::DownCoefficient => Field::Rent,
            Field::InterestRate => Field::DownCoefficient,
            Field::YearsLoan => Field::InterestRate,
        }
    }

    /// Query parameter name
    pub fn param(&self) -> &'static str {
        match self {
            Field::FullCostAvr => "fullCostAvr",
            Field::Rent => "rent",
            Field::DownCoefficient => "downCoefficient",
            Field::InterestRate => "interestRate",
            Field::YearsLoan => "yearsLoan",
        }
    }

    pub fn label(&self, inputs: &LoanInputs) -> String {
        match self {
            Field::FullCostAvr => "Cost (M)".to_string(),
            Field::Rent => "Estimated rent".to_string(),
            Field::DownCoefficient => format!(
                "Down payment {}%",
                crate::format::percent_label(inputs.down_coefficient)
            ),
            Field::InterestRate => format!("Interest {}%", inputs.interest_rate),
            Field::YearsLoan => format!("Years {}", inputs.years_loan),
        }
    }

    /// `None` for free-text fields
    pub fn slider(&self) -> Option<Slider> {
        match self {
            Field::FullCostAvr | Field::Rent => None,
            Field::DownCoefficient => Some(Slider { min: 0.3, max: 0.6, step: 0.05 }),
            Field::InterestRate => Some(Slider { min: 5.0, max: 20.0, step: 0.5 }),
            Field::YearsLoan => Some(Slider { min: 5.0, max: 20.0, step: 1.0 }),
        }
    }

    pub fn get(&self, inputs: &LoanInputs) -> f64 {
        match self {
            Field::FullCostAvr => inputs.full_cost_avr,
            Field::Rent => inputs.rent,
            Field::DownCoefficient => inputs.down_coefficient,
            Field::InterestRate => inputs.interest_rate,
            Field::YearsLoan => inputs.years_loan,
        }
    }

    pub fn set(&self, inputs: &mut LoanInputs, value: f64) {
        match self {
            Field::FullCostAvr => inputs.full_cost_avr = value,
            Field::Rent => inputs.rent = value,
            Field::DownCoefficient => inputs.down_coefficient = value,
            Field::InterestRate => inputs.interest_rate = value,
            Field::YearsLoan => inputs.years_loan = value,
        }
    }
}

// ============================================================================
// FORM
// ============================================================================

pub struct Form {
    inputs: LoanInputs,
    summary: LoanSummary,
    pub focused: Field,
    /// Raw text for the focused free-text field
    buffer: String,
}

impl Form {
    pub fn new(inputs: LoanInputs) -> Self {
        let focused = Field::FullCostAvr;
        Form {
            summary: compute(&inputs),
            buffer: focused.get(&inputs).to_string(),
            inputs,
            focused,
        }
    }

    pub fn inputs(&self) -> &LoanInputs {
        &self.inputs
    }

    pub fn summary(&self) -> &LoanSummary {
        &self.summary
    }

    /// Text shown for a field; the focused text field shows what is being typed
    pub fn display_value(&self, field: Field) -> String {
        if field == self.focused && field.slider().is_none() {
            self.buffer.clone()
        } else {
            field.get(&self.inputs).to_string()
        }
    }

    pub fn focus_next(&mut self) {
        self.focus(self.focused.next());
    }

    pub fn focus_previous(&mut self) {
        self.focus(self.focused.previous());
    }

    fn focus(&mut self, field: Field) {
        self.focused = field;
        self.buffer = field.get(&self.inputs).to_string();
    }

    pub fn increment(&mut self) {
        self.nudge(1.0);
    }

    pub fn decrement(&mut self) {
        self.nudge(-1.0);
    }

    fn nudge(&mut self, steps: f64) {
        let field = self.focused;
        let current = field.get(&self.inputs);
        let value = match field.slider() {
            Some(slider) => slider.nudge(current, steps),
            None => current + steps,
        };
        self.buffer = value.to_string();
        self.update(field, value);
    }

    /// Type into the focused text field. Ignored on sliders.
    pub fn push_char(&mut self, c: char) {
        if self.focused.slider().is_some() {
            return;
        }
        if c.is_ascii_digit() || c == '.' || c == '-' || c == 'e' {
            self.buffer.push(c);
            self.apply_buffer();
        }
    }

    pub fn pop_char(&mut self) {
        if self.focused.slider().is_some() {
            return;
        }
        self.buffer.pop();
        self.apply_buffer();
    }

    // A partial entry like "1e" or "-" keeps the last good value
    fn apply_buffer(&mut self) {
        let field = self.focused;
        if let Some(value) = parse_number(&self.buffer) {
            self.update(field, value);
        } else if self.buffer.is_empty() {
            self.update(field, 0.0);
        }
    }

    pub fn reset(&mut self) {
        let focused = self.focused;
        *self = Form::new(LoanInputs::default());
        self.focus(focused);
    }

    pub fn share_link(&self, base: &str) -> String {
        share_link(base, &self.inputs)
    }

    fn update(&mut self, field: Field, value: f64) {
        field.set(&mut self.inputs, value);
        self.summary = compute(&self.inputs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_form_computes_summary() {
        let form = Form::new(LoanInputs::default());
        assert_eq!(form.summary().full_cost, 130_000_000.0);
        assert_eq!(form.focused, Field::FullCostAvr);
        assert_eq!(form.display_value(Field::FullCostAvr), "130");
    }

    #[test]
    fn test_field_cycle() {
        let mut field = Field::FullCostAvr;
        for _ in 0..Field::ALL.len() {
            assert_eq!(field.next().previous(), field);
            field = field.next();
        }
        assert_eq!(field, Field::FullCostAvr);
    }

    #[test]
    fn test_typing_recomputes() {
        let mut form = Form::new(LoanInputs::default());
        form.pop_char();
        form.pop_char();
        form.pop_char();
        assert_eq!(form.inputs().full_cost_avr, 0.0);

        form.push_char('2');
        form.push_char('0');
        form.push_char('0');
        assert_eq!(form.inputs().full_cost_avr, 200.0);
        assert_eq!(form.summary().full_cost, 200_000_000.0);
    }

    #[test]
    fn test_partial_entry_keeps_last_value() {
        let mut form = Form::new(LoanInputs::default());
        form.push_char('e');
        assert_eq!(form.display_value(Field::FullCostAvr), "130e");
        assert_eq!(form.inputs().full_cost_avr, 130.0);
        assert!(form.summary().is_finite());

        form.push_char('1');
        assert_eq!(form.inputs().full_cost_avr, 1300.0);
    }

    #[test]
    fn test_letters_ignored() {
        let mut form = Form::new(LoanInputs::default());
        form.push_char('x');
        assert_eq!(form.display_value(Field::FullCostAvr), "130");
    }

    #[test]
    fn test_slider_steps_and_clamps() {
        let mut form = Form::new(LoanInputs::default());
        form.focus_next();
        form.focus_next();
        assert_eq!(form.focused, Field::DownCoefficient);

        form.increment();
        assert_eq!(form.inputs().down_coefficient, 0.35);

        for _ in 0..20 {
            form.increment();
        }
        assert_eq!(form.inputs().down_coefficient, 0.6);

        for _ in 0..20 {
            form.decrement();
        }
        assert_eq!(form.inputs().down_coefficient, 0.3);
    }

    #[test]
    fn test_slider_ignores_typing() {
        let mut form = Form::new(LoanInputs::default());
        form.focus_previous();
        assert_eq!(form.focused, Field::YearsLoan);

        form.push_char('9');
        form.pop_char();
        assert_eq!(form.inputs().years_loan, 20.0);

        form.decrement();
        assert_eq!(form.inputs().years_loan, 19.0);
    }

    #[test]
    fn test_interest_slider_changes_payment() {
        let mut form = Form::new(LoanInputs::default());
        let before = form.summary().monthly_pay;
        form.focused = Field::InterestRate;
        form.increment();

        assert_eq!(form.inputs().interest_rate, 11.5);
        assert!(form.summary().monthly_pay > before);
    }

    #[test]
    fn test_slider_nudge_snaps_out_of_range_value() {
        let slider = Field::InterestRate.slider().unwrap();
        assert_eq!(slider.nudge(0.0, 1.0), 5.0);
        assert_eq!(slider.nudge(11.2, 0.0), 11.0);
    }

    #[test]
    fn test_slider_accepts() {
        let down = Field::DownCoefficient.slider().unwrap();
        assert!(down.accepts(0.3));
        assert!(down.accepts(0.35));
        assert!(down.accepts(0.6));
        assert!(!down.accepts(0.0));
        assert!(!down.accepts(0.32));

        let rate = Field::InterestRate.slider().unwrap();
        assert!(rate.accepts(11.0));
        assert!(rate.accepts(11.5));
        assert!(!rate.accepts(11.2));
        assert!(!rate.accepts(0.0));
    }

    #[test]
    fn test_reset_and_share_link() {
        let mut form = Form::new(LoanInputs::default());
        form.push_char('5');
        assert_eq!(form.inputs().full_cost_avr, 1305.0);

        form.reset();
        assert_eq!(form.inputs(), &LoanInputs::default());
        assert_eq!(
            form.share_link("http://localhost:3000"),
            crate::query::share_link("http://localhost:3000", &LoanInputs::default())
        );
    }

    #[test]
    fn test_labels() {
        let inputs = LoanInputs::default();
        assert_eq!(Field::DownCoefficient.label(&inputs), "Down payment 30%");
        assert_eq!(Field::InterestRate.label(&inputs), "Interest 11%");
        assert_eq!(Field::YearsLoan.label(&inputs), "Years 20");
        assert_eq!(Field::Rent.param(), "rent");
    }
}
