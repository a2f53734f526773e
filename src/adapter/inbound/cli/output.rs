//! Terminal output for the CLI.
//!
//! Each command prints either for people (colored, trimmed by `--quiet`) or,
//! with `--json`, exactly one JSON document on stdout. Errors always go to
//! stderr, once.

use std::fmt::Display;
use std::sync::OnceLock;

use owo_colors::OwoColorize;
use serde_json::{json, Value};
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::domain::FieldError;

/// Output flags taken from the global CLI options.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    pub json: bool,
    pub quiet: bool,
}

impl OutputConfig {
    #[must_use]
    pub const fn new(json: bool, quiet: bool) -> Self {
        Self { json, quiet }
    }
}

static OUTPUT: OnceLock<OutputConfig> = OnceLock::new();

fn current() -> OutputConfig {
    OUTPUT.get().copied().unwrap_or_default()
}

/// True when human-readable lines should be printed.
fn human() -> bool {
    let config = current();
    !config.json && !config.quiet
}

/// Set the output flags. Only the first call takes effect.
pub fn configure(config: OutputConfig) {
    let _ = OUTPUT.set(config);
}

#[must_use]
pub fn is_json() -> bool {
    current().json
}

/// Print the JSON document for `command`.
pub fn document(command: &str, body: Value) {
    println!("{}", with_command(command, body));
}

fn with_command(command: &str, body: Value) -> Value {
    match body {
        Value::Object(mut map) => {
            map.insert("command".to_string(), Value::String(command.to_string()));
            Value::Object(map)
        }
        Value::Null => json!({ "command": command }),
        other => json!({ "command": command, "result": other }),
    }
}

/// Startup line for `serve`.
pub fn banner(addr: impl Display) {
    if !human() {
        return;
    }
    println!(
        "{} {} listening on {}",
        "schoolyard".bold(),
        env!("CARGO_PKG_VERSION").dimmed(),
        format!("http://{addr}").cyan()
    );
}

pub fn section(title: &str) {
    if !human() {
        return;
    }
    println!();
    println!("{}", title.bold());
}

/// Print a labeled value.
pub fn field(label: &str, value: impl Display) {
    if !human() {
        return;
    }
    println!("  {:<16} {}", label.dimmed(), value);
}

pub fn success(message: &str) {
    if !human() {
        return;
    }
    println!("  {} {}", "✓".green(), message);
}

pub fn note(message: &str) {
    if !human() {
        return;
    }
    println!("  {}", message.dimmed());
}

/// Print rows as a rounded table, indented under the current section.
pub fn table<R: Tabled>(rows: impl IntoIterator<Item = R>) {
    if !human() {
        return;
    }
    for line in render_table(rows).lines() {
        println!("  {line}");
    }
}

fn render_table<R: Tabled>(rows: impl IntoIterator<Item = R>) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Report per-field validation problems on stderr.
pub fn field_errors(errors: &[FieldError]) {
    if is_json() {
        eprintln!("{}", json!({ "type": "validation", "fields": errors }));
        return;
    }
    for err in errors {
        eprintln!("  {} {}", "×".red(), field_error_line(err));
    }
}

fn field_error_line(err: &FieldError) -> String {
    format!("{}: {}", err.field, err.message)
}

/// Report a failure on stderr. Never suppressed.
pub fn error(message: &str) {
    if is_json() {
        eprintln!("{}", json!({ "type": "error", "message": message }));
        return;
    }
    eprintln!("  {} {}", "×".red(), message);
}
