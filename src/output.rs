//! CLI output formatting.
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects. Logging goes to stderr, so stdout only
//! carries what these functions produce.
//!
//! ## Render
//!
//! ```text
//! convert -gravity center -thumbnail '100x100^' -crop 100x100+0+0 -format png +repage -auto-orient in.jpg /tmp/out.png
//! Output: /tmp/out.png
//! ```
//!
//! ## Pass-through
//!
//! ```text
//! pass-through: https://host/a.jpg
//! ```

use crate::command::CommandSpec;
use crate::intent::RequestIntent;
use serde::Serialize;

/// Command line followed by the output file.
pub fn format_command(program: &str, spec: &CommandSpec) -> Vec<String> {
    vec![
        spec.program_line(program),
        format!("Output: {}", spec.output_file),
    ]
}

/// Line printed when a request carries no operations.
pub fn format_pass_through(intent: &RequestIntent) -> Vec<String> {
    vec![format!("pass-through: {}", intent.source_url)]
}

/// Pretty JSON, one element per line.
pub fn format_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<Vec<String>> {
    let json = serde_json::to_string_pretty(value)?;
    Ok(json.lines().map(String::from).collect())
}

pub fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}
