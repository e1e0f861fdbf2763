// 🌐 Page Render
// Server-side HTML for the calculator: input form, results table and share link

use crate::calculator::{compute, LoanInputs};
use crate::form::Field;
use crate::query::share_link;
use crate::report::{rows, PageMeta};

/// Render the whole page for one set of inputs.
///
/// The form submits with GET using the query parameter names, so every
/// submission lands back here with the new inputs and a fresh computation.
pub fn render_page(inputs: &LoanInputs, base_url: &str) -> String {
    let summary = compute(inputs);
    let meta = PageMeta::new(inputs, &summary);
    let link = share_link(base_url, inputs);

    let mut fields = String::new();
    for field in Field::ALL {
        fields.push_str(&render_field(field, inputs));
    }

    let mut table = String::new();
    for row in rows(inputs, &summary) {
        table.push_str(&format!(
            "        <tr><td>{}</td><td class=\"mono\">{}</td></tr>\n",
            escape(&row.label),
            escape(&row.value)
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>{title}</title>
  <meta name="description" content="{description}">
  <style>
    body {{ display: flex; font-family: sans-serif; margin: 0; }}
    aside {{ width: 14rem; padding: 0.5rem; background: #570df8; color: #fff; min-height: 100vh; }}
    aside label {{ display: block; font-size: 0.75rem; margin-top: 0.5rem; }}
    aside input {{ width: 100%; }}
    main {{ padding: 1.5rem; }}
    td {{ padding: 0.25rem 1rem; }}
    .mono {{ font-family: monospace; text-align: right; }}
    .share {{ color: #fff; word-break: break-all; }}
  </style>
</head>
<body>
  <aside>
    <form method="get" action="/">
{fields}      <p><button type="submit">Calculate</button></p>
    </form>
    <p><a class="share" href="{link}">Share link</a></p>
  </aside>
  <main>
    <table>
      <tbody>
{table}      </tbody>
    </table>
  </main>
</body>
</html>
"#,
        title = escape(&meta.title),
        description = escape(&meta.description),
        fields = fields,
        link = escape(&link),
        table = table,
    )
}

fn render_field(field: Field, inputs: &LoanInputs) -> String {
    let name = field.param();
    let value = field.get(inputs);
    let label = escape(&field.label(inputs));

    // Browsers clamp and snap range values before submitting, so a value the
    // slider cannot hold exactly (from a share link) goes out as a number box
    let control = match field.slider() {
        Some(slider) if slider.accepts(value) => format!(
            "<input type=\"range\" id=\"{name}\" name=\"{name}\" value=\"{value}\" min=\"{min}\" max=\"{max}\" step=\"{step}\">",
            name = name,
            value = value,
            min = slider.min,
            max = slider.max,
            step = slider.step,
        ),
        Some(_) => format!(
            "<input type=\"number\" id=\"{name}\" name=\"{name}\" value=\"{value}\" step=\"any\">",
            name = name,
            value = value,
        ),
        None => format!(
            "<input type=\"text\" id=\"{name}\" name=\"{name}\" value=\"{value}\">",
            name = name,
            value = value,
        ),
    };

    format!(
        "      <label for=\"{name}\">{label}</label>\n      {control}\n",
        name = name,
        label = label,
        control = control,
    )
}

/// Simple HTML escaping for text and attribute values
pub fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::parse_query;

    // What a browser sends on submit: every input's name=value, in page order.
    // Only range controls adjust their value, and only to stay in range/on step.
    fn submitted_query(page: &str) -> String {
        let mut pairs = Vec::new();
        for tag in page.split("<input ").skip(1) {
            let attr = |key: &str| {
                let marker = format!("{}=\"", key);
                tag.split_once(&marker)
                    .and_then(|(_, rest)| rest.split_once('"'))
                    .map(|(v, _)| v.to_string())
            };
            let (Some(name), Some(value)) = (attr("name"), attr("value")) else {
                continue;
            };
            if attr("type").as_deref() == Some("range") {
                let min: f64 = attr("min").unwrap().parse().unwrap();
                let max: f64 = attr("max").unwrap().parse().unwrap();
                let step: f64 = attr("step").unwrap().parse().unwrap();
                let v: f64 = value.parse().unwrap();
                let snapped = min + ((v.clamp(min, max) - min) / step).round() * step;
                assert!((snapped - v).abs() < 1e-9, "range {} would change {}", name, v);
            }
            pairs.push(format!("{}={}", name, value));
        }
        pairs.join("&")
    }

    #[test]
    fn test_form_submits_inputs_unchanged() {
        for query in [
            "",
            "downCoefficient=0",
            "interestRate=11.2",
            "interestRate=0&yearsLoan=30&downCoefficient=0.32",
        ] {
            let inputs = parse_query(query);
            let page = render_page(&inputs, "http://localhost:3000");
            assert_eq!(parse_query(&submitted_query(&page)), inputs, "query {:?}", query);
        }
    }

    #[test]
    fn test_off_grid_slider_value_renders_number_input() {
        let page = render_page(&parse_query("downCoefficient=0"), "http://localhost:3000");
        assert!(page.contains(
            "<input type=\"number\" id=\"downCoefficient\" name=\"downCoefficient\" value=\"0\" step=\"any\">"
        ));
        assert!(page.contains("<input type=\"range\" id=\"interestRate\""));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("a&b<c>\"d'"), "a&amp;b&lt;c&gt;&quot;d&#39;");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_page_contains_meta_and_results() {
        let page = render_page(&LoanInputs::default(), "http://localhost:3000");

        assert!(page.contains("<title>Yield: 0.59</title>"));
        assert!(page.contains("$130,000,000"));
        assert!(page.contains("Down payment 30%"));
        assert!(page.contains("name=\"downCoefficient\" value=\"0.3\" min=\"0.3\" max=\"0.6\" step=\"0.05\""));
        assert!(page.contains("name=\"fullCostAvr\" value=\"130\""));
    }

    #[test]
    fn test_share_link_is_escaped() {
        let page = render_page(&LoanInputs::default(), "http://example.com");
        assert!(page.contains(
            "href=\"http://example.com?downCoefficient=0.3&amp;fullCostAvr=130&amp;interestRate=11&amp;rent=770000&amp;yearsLoan=20\""
        ));
    }

    #[test]
    fn test_degenerate_inputs_render() {
        let inputs = LoanInputs {
            interest_rate: 0.0,
            full_cost_avr: 0.0,
            ..LoanInputs::default()
        };
        let page = render_page(&inputs, "http://localhost:3000");

        assert!(page.contains("$NaN"));
        assert!(page.contains("<title>Yield: ∞</title>"));
    }
}
