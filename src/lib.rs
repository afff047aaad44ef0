//! # magick-path
//!
//! The request-to-command layer of an image resizing service. A request path
//! such as `/300x200!/g_center/png/https://host/a.jpg` is split into compact
//! tokens, the tokens are classified into a typed [`RequestIntent`], and the
//! intent is rendered into the argument list for an ImageMagick-compatible
//! `convert` invocation plus the output file name.
//!
//! ```text
//! 1. Split    request path  →  tokens + source URL     (naming::split_request)
//! 2. Parse    tokens        →  RequestIntent           (RequestIntent::parse)
//! 3. Render   intent        →  CommandSpec             (command::render)
//! ```
//!
//! Fetching the source, running the tool, and serving the result are the
//! caller's job. This crate only decides *what arguments to pass*.
//!
//! ```
//! use magick_path::{RequestIntent, render};
//!
//! let intent = RequestIntent::parse(["g_center", "100x100"], "https://host/a.jpg");
//! assert!(intent.has_operations());
//!
//! let spec = render(&intent, "/tmp/in", "/tmp/out");
//! assert_eq!(spec.output_file, "/tmp/out.png");
//! assert_eq!(spec.arguments[..4], ["-gravity", "center", "-thumbnail", "100x100^"]);
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`token`] | Ordered rule table classifying one path segment |
//! | [`intent`] | `RequestIntent`: parsed fields, last match wins |
//! | [`command`] | Default resolution and argument rendering |
//! | [`naming`] | Request path splitting and hashed output names |
//! | [`batch`] | Parallel translation of a JSON batch |
//! | [`config`] | `config.toml` loading, validation, stock defaults |
//! | [`output`] | CLI output formatting |
//! | [`error`] | Error type for the file-reading layers |
//!
//! # Totality
//!
//! Parsing and rendering never fail. Unrecognized tokens are dropped, and
//! every unset field renders with a default. Only the outer layers that read
//! files return [`Result`].

pub mod batch;
pub mod command;
pub mod config;
pub mod error;
pub mod intent;
pub mod naming;
pub mod output;
pub mod token;

pub use command::{CommandSpec, Effective, render};
pub use error::{Error, Result};
pub use intent::RequestIntent;
pub use naming::{Request, output_stem, split_request};
pub use token::{Format, ResizeModifier};

#[cfg(test)]
pub(crate) mod test_helpers;
