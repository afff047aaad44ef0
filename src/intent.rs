//! The parsed processing intent of one request.
//!
//! [`RequestIntent`] describes *what* the caller asked for, not how the raster
//! tool will be driven. Every field starts unset and is filled by
//! [`parse`](RequestIntent::parse), which feeds each path segment through
//! [`token::classify`](crate::token::classify):
//!
//! - Later segments overwrite earlier ones in the same field group
//!   (`width`/`height`/`resize_modifier` move together).
//! - Unrecognized segments are dropped without error.
//!
//! Parsing is total: no input sequence can make it fail. Value policing
//! (dimension ranges, allowed gravities) belongs to the caller.

use crate::token::{self, Format, ResizeModifier, Token};
use serde::Serialize;
use tracing::{debug, trace};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RequestIntent {
    pub width: Option<String>,
    pub height: Option<String>,
    pub resize_modifier: Option<ResizeModifier>,
    pub gravity: Option<String>,
    pub frame_index: Option<String>,
    /// Format token exactly as requested. Never back-filled.
    pub requested_format: Option<Format>,
    /// Format as parsed. Rendering resolves a default when this is unset,
    /// see [`RequestIntent::effective`].
    pub format: Option<Format>,
    /// Original request URL, carried through unparsed.
    pub source_url: String,
}

impl RequestIntent {
    /// Build an intent from path segments, last match wins per field group.
    pub fn parse<I, S>(segments: I, source_url: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut intent = Self::default();
        for segment in segments {
            let segment = segment.as_ref();
            match token::classify(segment) {
                Some(token) => {
                    debug!(segment, ?token, "classified segment");
                    intent.apply(token);
                }
                None => trace!(segment, "ignoring unrecognized segment"),
            }
        }
        intent.source_url = source_url.to_string();
        intent
    }

    /// Store a classified token, overwriting its whole field group.
    pub fn apply(&mut self, token: Token) {
        match token {
            Token::Dimensions {
                width,
                height,
                modifier,
            } => {
                self.width = width;
                self.height = height;
                self.resize_modifier = modifier;
            }
            Token::Gravity(g) => self.gravity = Some(g),
            Token::Frame(f) => self.frame_index = Some(f),
            Token::Format(f) => {
                self.requested_format = Some(f);
                self.format = Some(f);
            }
        }
    }

    /// Whether any transformation was requested.
    ///
    /// `false` means the caller can serve the source unchanged. A resize
    /// modifier alone does not count: it has no effect without geometry.
    pub fn has_operations(&self) -> bool {
        self.height.is_some()
            || self.width.is_some()
            || self.format.is_some()
            || self.gravity.is_some()
            || self.frame_index.is_some()
    }
}
