// 💵 Display Formatting
// Currency and percentage rendering; applied at presentation time only

/// Round to 2 decimal places, halves toward +∞ (-0.125 -> -0.12)
pub fn round2(n: f64) -> f64 {
    (n * 100.0 + 0.5).floor() / 100.0
}

/// Format as whole US dollars with thousands separators: `$130,000,000`.
/// Non-finite values render as `$NaN`, `$∞` or `-$∞`; negatives that round
/// to zero keep their sign (`-$0`).
pub fn currency(n: f64) -> String {
    if n.is_nan() {
        return "$NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "$∞".to_string() } else { "-$∞".to_string() };
    }

    let rounded = n.round();
    let sign = if n.is_sign_negative() { "-" } else { "" };
    format!("{}${}", sign, group_thousands(&format!("{:.0}", rounded.abs())))
}

/// Down-payment coefficient as a percentage label (0.3 -> "30")
pub fn percent_label(coefficient: f64) -> String {
    format!("{}", round2(coefficient * 100.0))
}

/// Two-decimal figure for the yield row
pub fn decimal2(n: f64) -> String {
    let rounded = round2(n);
    if rounded.is_finite() {
        format!("{}", rounded)
    } else {
        non_finite(rounded)
    }
}

fn non_finite(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n > 0.0 {
        "∞".to_string()
    } else {
        "-∞".to_string()
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(0.5923076923), 0.59);
        assert_eq!(round2(1.005 * 1000.0), 1005.0);
        assert_eq!(round2(-1.234), -1.23);
    }

    #[test]
    fn test_round2_halves_go_up() {
        assert_eq!(round2(-0.125), -0.12);
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(-2.5), -2.5);
    }

    #[test]
    fn test_currency() {
        assert_eq!(currency(130_000_000.0), "$130,000,000");
        assert_eq!(currency(39_000_000.4), "$39,000,000");
        assert_eq!(currency(999.5), "$1,000");
        assert_eq!(currency(0.0), "$0");
        assert_eq!(currency(12.0), "$12");
        assert_eq!(currency(1234.0), "$1,234");
        assert_eq!(currency(-169_284.2), "-$169,284");
    }

    #[test]
    fn test_currency_non_finite() {
        assert_eq!(currency(f64::NAN), "$NaN");
        assert_eq!(currency(f64::INFINITY), "$∞");
        assert_eq!(currency(f64::NEG_INFINITY), "-$∞");
    }

    #[test]
    fn test_currency_negative_rounding_to_zero() {
        assert_eq!(currency(-0.4), "-$0");
        assert_eq!(currency(-0.0), "-$0");
        assert_eq!(currency(0.4), "$0");
    }

    #[test]
    fn test_percent_label() {
        assert_eq!(percent_label(0.3), "30");
        assert_eq!(percent_label(0.35000000000000003), "35");
        assert_eq!(percent_label(0.125), "12.5");
    }

    #[test]
    fn test_decimal2() {
        assert_eq!(decimal2(770_000.0 * 100.0 / 130_000_000.0), "0.59");
        assert_eq!(decimal2(f64::INFINITY), "∞");
        assert_eq!(decimal2(f64::NAN), "NaN");
    }
}
