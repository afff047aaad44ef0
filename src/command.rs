//! Rendering a [`RequestIntent`] into raster-tool arguments.
//!
//! The renderer targets the ImageMagick `convert` option surface. The tool
//! reads options left to right, so argument order is part of the contract:
//!
//! ```text
//! [-gravity G] [-thumbnail GEOM [-crop WxH+0+0]] -format F +repage -auto-orient IN[FRAME] OUT.F
//! ```
//!
//! ## Defaults
//!
//! Unset fields are resolved up front by [`RequestIntent::effective`], and the
//! argument list is then built from the intent plus those finalised values:
//!
//! | Field | Condition | Default |
//! |---|---|---|
//! | resize modifier | gravity set | `^` (fill, then crop at gravity) |
//! | resize modifier | otherwise | `>` (shrink only, never enlarge) |
//! | format | frame index set | `gif` |
//! | format | otherwise | `png` |
//!
//! Rendering is total and never touches the caller's intent.

use crate::intent::RequestIntent;
use crate::token::{Format, ResizeModifier};
use serde::Serialize;
use tracing::debug;

/// Values the renderer uses after defaults have been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Effective {
    pub modifier: ResizeModifier,
    pub format: Format,
}

impl RequestIntent {
    /// Resolve the resize modifier and output format this intent renders with.
    pub fn effective(&self) -> Effective {
        let modifier = self.resize_modifier.unwrap_or(if self.gravity.is_some() {
            ResizeModifier::Fill
        } else {
            ResizeModifier::OnlyShrink
        });
        let format = self.format.unwrap_or(if self.frame_index.is_some() {
            Format::Gif
        } else {
            Format::Png
        });
        Effective { modifier, format }
    }
}

/// Arguments for one tool invocation plus the file it will write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandSpec {
    pub arguments: Vec<String>,
    /// Output base name with the effective format appended as extension.
    pub output_file: String,
    /// Effective output format, including any default.
    pub format: Format,
}

impl CommandSpec {
    /// Human-readable command line: `program` followed by the quoted arguments.
    pub fn program_line(&self, program: &str) -> String {
        std::iter::once(program)
            .chain(self.arguments.iter().map(String::as_str))
            .map(shell_quote)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Render the tool arguments for `intent` reading `input` and writing
/// `output` plus the effective format extension.
pub fn render(intent: &RequestIntent, input: &str, output: &str) -> CommandSpec {
    let Effective { modifier, format } = intent.effective();
    debug!(%modifier, %format, "rendering command");

    let mut args: Vec<String> = Vec::new();

    if let Some(gravity) = &intent.gravity {
        args.extend(["-gravity".into(), gravity.clone()]);
    }

    match (&intent.width, &intent.height) {
        (Some(w), Some(h)) => {
            args.extend(["-thumbnail".into(), format!("{w}x{h}{modifier}")]);
            args.extend(["-crop".into(), format!("{w}x{h}+0+0")]);
        }
        (Some(w), None) => args.extend(["-thumbnail".into(), format!("{w}x")]),
        (None, Some(h)) => args.extend(["-thumbnail".into(), format!("x{h}")]),
        (None, None) => {}
    }

    args.extend(["-format".into(), format.to_string()]);
    args.push("+repage".into());
    // Apply the EXIF orientation to the pixels so cameras' rotation flags
    // don't leak into the output.
    args.push("-auto-orient".into());

    let output_file = format!("{output}.{format}");
    match &intent.frame_index {
        Some(frame) => args.push(format!("{input}[{frame}]")),
        None => args.push(input.to_string()),
    }
    args.push(output_file.clone());

    CommandSpec {
        arguments: args,
        output_file,
        format,
    }
}

/// Quote an argument for display in a POSIX shell.
fn shell_quote(arg: &str) -> String {
    let safe = !arg.is_empty()
        && arg
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b"-_+./:=,@%".contains(&b));
    if safe {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{args, intent};

    #[test]
    fn empty_intent_renders_only_defaults() {
        let spec = render(&intent(&[]), "in", "out");
        assert_eq!(
            spec.arguments,
            args(&["-format", "png", "+repage", "-auto-orient", "in", "out.png"])
        );
        assert_eq!(spec.output_file, "out.png");
        assert_eq!(spec.format, Format::Png);
    }

    #[test]
    fn gravity_defaults_modifier_to_fill() {
        let spec = render(&intent(&["g_center", "100x100"]), "in", "out");
        assert_eq!(
            spec.arguments,
            args(&[
                "-gravity",
                "center",
                "-thumbnail",
                "100x100^",
                "-crop",
                "100x100+0+0",
                "-format",
                "png",
                "+repage",
                "-auto-orient",
                "in",
                "out.png",
            ])
        );
    }

    #[test]
    fn explicit_modifier_beats_gravity_default() {
        let spec = render(&intent(&["g_north", "100x50!"]), "in", "out");
        assert!(spec.arguments.contains(&"100x50!".to_string()));
    }

    #[test]
    fn no_gravity_defaults_modifier_to_shrink() {
        let spec = render(&intent(&["100x100"]), "in", "out");
        assert_eq!(&spec.arguments[..4], &args(&["-thumbnail", "100x100>", "-crop", "100x100+0+0"]));
    }

    #[test]
    fn width_only_has_no_crop_or_modifier() {
        let spec = render(&intent(&["150x^"]), "in", "out");
        assert_eq!(&spec.arguments[..2], &args(&["-thumbnail", "150x"]));
        assert!(!spec.arguments.iter().any(|a| a == "-crop"));
    }

    #[test]
    fn height_only_has_no_crop() {
        let spec = render(&intent(&["x200"]), "in", "out");
        assert_eq!(&spec.arguments[..2], &args(&["-thumbnail", "x200"]));
        assert!(!spec.arguments.iter().any(|a| a == "-crop"));
    }

    #[test]
    fn degenerate_geometry_emits_nothing() {
        let spec = render(&intent(&["x"]), "in", "out");
        assert_eq!(spec, render(&intent(&[]), "in", "out"));
    }

    #[test]
    fn frame_defaults_format_to_gif_and_subscripts_input() {
        let spec = render(&intent(&["frame_2"]), "in", "out");
        assert_eq!(spec.format, Format::Gif);
        assert_eq!(spec.output_file, "out.gif");
        assert_eq!(
            &spec.arguments[spec.arguments.len() - 2..],
            &args(&["in[2]", "out.gif"])
        );
    }

    #[test]
    fn explicit_format_beats_frame_default() {
        let spec = render(&intent(&["frame_2", "jpg"]), "in", "out");
        assert_eq!(spec.format, Format::Jpg);
        assert_eq!(spec.output_file, "out.jpg");
        assert!(spec.arguments.contains(&"in[2]".to_string()));
    }

    #[test]
    fn jpeg_extension_kept_as_requested() {
        let spec = render(&intent(&["jpeg"]), "in", "out");
        assert_eq!(spec.output_file, "out.jpeg");
    }

    #[test]
    fn render_does_not_mutate_intent() {
        let parsed = intent(&["g_center", "100x100"]);
        let before = parsed.clone();
        render(&parsed, "in", "out");
        assert_eq!(parsed, before);
        assert_eq!(parsed.resize_modifier, None);
        assert_eq!(parsed.format, None);
    }

    #[test]
    fn effective_values() {
        assert_eq!(
            intent(&[]).effective(),
            Effective {
                modifier: ResizeModifier::OnlyShrink,
                format: Format::Png
            }
        );
        assert_eq!(
            intent(&["g_east", "frame_1"]).effective(),
            Effective {
                modifier: ResizeModifier::Fill,
                format: Format::Gif
            }
        );
    }

    #[test]
    fn program_line_quotes_unsafe_arguments() {
        let spec = render(&intent(&["100x100"]), "my photo.jpg", "/tmp/out");
        assert_eq!(
            spec.program_line("convert"),
            "convert -thumbnail '100x100>' -crop 100x100+0+0 -format png +repage -auto-orient 'my photo.jpg' /tmp/out.png"
        );
    }

    #[test]
    fn shell_quote_escapes_single_quotes() {
        assert_eq!(shell_quote("it's"), r"'it'\''s'");
        assert_eq!(shell_quote(""), "''");
        assert_eq!(shell_quote("in[2]"), "'in[2]'");
    }
}
