//! Translating many requests at once.
//!
//! A batch is a JSON array of [`BatchRequest`]s. Every request is parsed and
//! rendered independently, in parallel on the rayon pool; results come back
//! in input order. Translation owns no shared state, so no locking is needed.
//!
//! ```json
//! [
//!   { "tokens": ["300x200", "g_center"], "source_url": "https://host/a.jpg", "input": "/tmp/in/a" },
//!   { "tokens": ["frame_0"], "source_url": "https://host/b.gif", "input": "/tmp/in/b", "output": "/tmp/out/b" }
//! ]
//! ```

use crate::command::{CommandSpec, render};
use crate::config::NamingConfig;
use crate::error::Result;
use crate::intent::RequestIntent;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BatchRequest {
    pub tokens: Vec<String>,
    #[serde(default)]
    pub source_url: String,
    /// Local path of the fetched source image.
    pub input: String,
    /// Output base name. Derived from the request when absent.
    #[serde(default)]
    pub output: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchResult {
    pub source_url: String,
    pub has_operations: bool,
    pub command: CommandSpec,
}

/// Read a JSON array of requests from disk.
pub fn load_requests(path: &Path) -> Result<Vec<BatchRequest>> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Translate a single request.
pub fn translate(request: &BatchRequest, naming: &NamingConfig) -> BatchResult {
    let intent = RequestIntent::parse(&request.tokens, &request.source_url);
    let output = match &request.output {
        Some(o) => o.clone(),
        None => naming.derived_output(&request.source_url, &request.tokens),
    };
    BatchResult {
        source_url: request.source_url.clone(),
        has_operations: intent.has_operations(),
        command: render(&intent, &request.input, &output),
    }
}

/// Translate every request in parallel, preserving input order.
pub fn translate_all(requests: &[BatchRequest], naming: &NamingConfig) -> Vec<BatchResult> {
    info!(
        requests = requests.len(),
        threads = rayon::current_num_threads(),
        "translating batch"
    );
    requests
        .par_iter()
        .map(|request| translate(request, naming))
        .collect()
}
