//! Shared test utilities.
//!
//! ```ignore
//! use crate::test_helpers::*;
//!
//! let spec = render(&intent(&["g_center", "100x100"]), "in", "out");
//! assert_eq!(&spec.arguments[..2], &args(&["-gravity", "center"]));
//! ```

use crate::intent::RequestIntent;

/// Parse segments with an empty source URL.
pub fn intent(segments: &[&str]) -> RequestIntent {
    RequestIntent::parse(segments, "")
}

/// Owned argument list for comparing against [`CommandSpec::arguments`](crate::command::CommandSpec).
pub fn args(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
