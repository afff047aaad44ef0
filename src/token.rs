//! Token classification for request path segments.
//!
//! Each path segment carries at most one piece of processing intent. A segment
//! is tested against a fixed, ordered rule table; the first rule whose shape
//! matches wins and produces a [`Token`]. Segments that match nothing yield
//! `None` and are dropped by the caller.
//!
//! | Order | Shape | Example | Captures |
//! |---|---|---|---|
//! | 1 | `[digits]x[digits][<>!^]` | `300x200!`, `x200`, `150x` | width, height, modifier |
//! | 2 | `g_[a-z]+` | `g_center` | gravity |
//! | 3 | `frame_[0-9]+` | `frame_3` | frame index |
//! | 4 | `png\|jpg\|jpeg\|gif\|mp4` | `png` | format |
//!
//! The shapes are disjoint today (each has a different literal structure), so
//! the order only matters if a future rule overlaps an existing one.

use serde::Serialize;
use std::fmt;

/// Resize geometry suffix understood by the raster tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum ResizeModifier {
    /// `<`: only enlarge images smaller than the geometry.
    OnlyEnlarge,
    /// `>`: only shrink images larger than the geometry.
    OnlyShrink,
    /// `!`: ignore aspect ratio, force exact dimensions.
    IgnoreAspect,
    /// `^`: fill the geometry (minimum dimensions), used before a crop.
    Fill,
}

impl ResizeModifier {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '<' => Some(Self::OnlyEnlarge),
            '>' => Some(Self::OnlyShrink),
            '!' => Some(Self::IgnoreAspect),
            '^' => Some(Self::Fill),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Self::OnlyEnlarge => '<',
            Self::OnlyShrink => '>',
            Self::IgnoreAspect => '!',
            Self::Fill => '^',
        }
    }
}

impl fmt::Display for ResizeModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl From<ResizeModifier> for String {
    fn from(m: ResizeModifier) -> Self {
        m.to_string()
    }
}

/// Output formats a request may ask for.
///
/// The token is kept as given: `jpg` and `jpeg` are distinct values and are
/// rendered back exactly as requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Png,
    Jpg,
    Jpeg,
    Gif,
    Mp4,
}

impl Format {
    pub const ALL: [Format; 5] = [
        Format::Png,
        Format::Jpg,
        Format::Jpeg,
        Format::Gif,
        Format::Mp4,
    ];

    pub fn from_token(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == s)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpg => "jpg",
            Self::Jpeg => "jpeg",
            Self::Gif => "gif",
            Self::Mp4 => "mp4",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified path segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Geometry. Empty captures are `None`; all three fields travel together.
    Dimensions {
        width: Option<String>,
        height: Option<String>,
        modifier: Option<ResizeModifier>,
    },
    Gravity(String),
    Frame(String),
    Format(Format),
}

type Rule = fn(&str) -> Option<Token>;

/// Classification rules in priority order.
const RULES: [Rule; 4] = [dimensions, gravity, frame, format];

/// Classify one path segment. Returns `None` for unrecognized segments.
pub fn classify(segment: &str) -> Option<Token> {
    RULES.iter().find_map(|rule| rule(segment))
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// `^(\d+)?x(\d+)?([<>!^])?$`
fn dimensions(segment: &str) -> Option<Token> {
    let (width, rest) = segment.split_once('x')?;
    if !width.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let (height, modifier) = match rest.chars().last() {
        Some(c) if !c.is_ascii_digit() => {
            (&rest[..rest.len() - c.len_utf8()], Some(ResizeModifier::from_char(c)?))
        }
        _ => (rest, None),
    };
    if !height.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    Some(Token::Dimensions {
        width: non_empty(width),
        height: non_empty(height),
        modifier,
    })
}

/// `^g_([a-z]+)$`
fn gravity(segment: &str) -> Option<Token> {
    let name = segment.strip_prefix("g_")?;
    (!name.is_empty() && name.bytes().all(|b| b.is_ascii_lowercase()))
        .then(|| Token::Gravity(name.to_string()))
}

/// `^frame_(\d+)$`
fn frame(segment: &str) -> Option<Token> {
    let index = segment.strip_prefix("frame_")?;
    is_digits(index).then(|| Token::Frame(index.to_string()))
}

/// `^(png|jpg|jpeg|gif|mp4)$`
fn format(segment: &str) -> Option<Token> {
    Format::from_token(segment).map(Token::Format)
}
