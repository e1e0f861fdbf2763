// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{Context, Result};
use std::env;
use std::io;

// Use library instead of local modules
use mortgage_calc::{
    batch, compute, parse_query, render_text, rows, share_link, LoanInputs, DEFAULT_BASE_URL,
    VERSION,
};

const USAGE: &str = "\
Usage:
  mortgage-calc                              Interactive terminal UI
  mortgage-calc ui [QUERY]                   Terminal UI starting from QUERY
  mortgage-calc compute [QUERY]              Print the results table
  mortgage-calc link [QUERY] [--base URL]    Print a share link
  mortgage-calc batch <INPUT.csv> [OUTPUT.csv]
  mortgage-calc --version

QUERY looks like: fullCostAvr=130&downCoefficient=0.3&interestRate=11&yearsLoan=20&rent=770000";

fn main() -> Result<()> {
    init_logging();

    let args: Vec<String> = env::args().collect();

    match args.get(1).map(String::as_str) {
        None => run_ui_mode(LoanInputs::default())?,
        Some("ui") => run_ui_mode(query_arg(&args, 2))?,
        Some("compute") => run_compute(query_arg(&args, 2)),
        Some("link") => run_link(&args[2..])?,
        Some("batch") => run_batch(&args[2..])?,
        Some("help") | Some("--help") | Some("-h") => println!("{}", USAGE),
        Some("--version") | Some("-V") => println!("mortgage-calc {}", VERSION),
        Some(other) => {
            eprintln!("❌ Unknown command: {}\n", other);
            eprintln!("{}", USAGE);
            std::process::exit(2);
        }
    }

    Ok(())
}

// Logs go to stderr so table output and the terminal UI stay clean
fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(io::stderr)
        .init();
}

fn query_arg(args: &[String], index: usize) -> LoanInputs {
    args.get(index)
        .filter(|a| !a.starts_with("--"))
        .map(|q| parse_query(q))
        .unwrap_or_default()
}

fn run_compute(inputs: LoanInputs) {
    let summary = compute(&inputs);
    println!("{}", render_text(&rows(&inputs, &summary)));

    if let Err(issues) = inputs.validate() {
        eprintln!();
        for issue in issues {
            eprintln!("⚠️  {}", issue);
        }
    }
}

fn run_link(args: &[String]) -> Result<()> {
    let mut base = DEFAULT_BASE_URL.to_string();
    let mut inputs = LoanInputs::default();

    let mut i = 0;
    while i < args.len() {
        if args[i] == "--base" {
            base = args
                .get(i + 1)
                .cloned()
                .context("--base requires a URL")?;
            i += 1;
        } else {
            inputs = parse_query(&args[i]);
        }
        i += 1;
    }

    println!("{}", share_link(&base, &inputs));
    Ok(())
}

fn run_batch(args: &[String]) -> Result<()> {
    let input = args.first().context("batch requires an input CSV path")?;

    let count = match args.get(1) {
        Some(output) => {
            let file = std::fs::File::create(output)
                .with_context(|| format!("Failed to create output file: {}", output))?;
            let count = batch::run(input, file)?;
            eprintln!("✓ Wrote {} scenarios to {}", count, output);
            count
        }
        None => batch::run(input, io::stdout().lock())?,
    };

    tracing::debug!(count, "batch finished");
    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode(inputs: LoanInputs) -> Result<()> {
    let mut app = ui::App::new(inputs);
    ui::run_ui(&mut app)?;

    if let Some(link) = app.copied_link.as_deref() {
        println!("{}", link);
    }

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_inputs: LoanInputs) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or use: mortgage-calc compute [QUERY]");
    std::process::exit(1);
}
