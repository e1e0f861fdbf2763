// Mortgage Calculator - Core Library
// Exposes all modules for use in CLI, terminal UI, web server, and tests

pub mod calculator; // Amortization core
pub mod query;      // Query strings and share links
pub mod format;     // Currency / decimal display
pub mod report;     // Results table rows + page meta
pub mod form;       // Interactive form state
pub mod batch;      // CSV scenario comparison
pub mod html;       // Server-rendered page
pub mod config;     // Server bind configuration

// Re-export commonly used types
pub use calculator::{compute, InputIssue, LoanInputs, LoanSummary, MILLION};
pub use query::{parse_number, parse_query, share_link, to_query_string, PARAM_NAMES};
pub use format::{currency, decimal2, percent_label, round2};
pub use report::{rows, render_text, PageMeta, ReportRow, RowKind};
pub use form::{Field, Form, Slider};
pub use batch::{read_scenarios, write_results, ScenarioResult};
pub use html::render_page;
pub use config::ServerConfig;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Base URL used for share links when no host is known
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
