use clap::{Parser, Subcommand};
use magick_path::{RequestIntent, batch, config, output, render, split_request};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "magick-path")]
#[command(about = "Translate image URL path tokens into raster-tool arguments")]
#[command(long_about = "\
Translate image URL path tokens into raster-tool arguments

Each token carries one piece of intent; unrecognized tokens are ignored and
later tokens override earlier ones of the same kind:

  300x200!   geometry: [width]x[height][modifier], modifier one of < > ! ^
  150x       width only (no crop)
  x200       height only (no crop)
  g_center   gravity; implies fill-crop (^) unless a modifier is given
  frame_3    pick one frame of an animated source; output defaults to gif
  png        output format: png, jpg, jpeg, gif, mp4 (default png)

Example:

  magick-path request /300x200/g_center/https://host/a.jpg --input /tmp/a

Run 'magick-path gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Config file (defaults are used when omitted)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log classification and rendering details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

/// Shared flags for commands that render a command line.
#[derive(clap::Args, Clone)]
struct RenderArgs {
    /// Local path of the source image
    #[arg(long)]
    input: String,

    /// Output base name, without extension (derived from the request when omitted)
    #[arg(long)]
    output: Option<String>,

    /// Print the command as JSON instead of a shell line
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Print the parsed intent for a list of tokens
    Parse {
        tokens: Vec<String>,
        /// Source URL carried through unchanged
        #[arg(long, default_value = "")]
        url: String,
    },
    /// Render the tool command for a list of tokens
    Render {
        tokens: Vec<String>,
        /// Source URL carried through unchanged
        #[arg(long, default_value = "")]
        url: String,
        #[command(flatten)]
        render: RenderArgs,
    },
    /// Split a request path into tokens and source URL, then render it
    Request {
        path: String,
        #[command(flatten)]
        render: RenderArgs,
    },
    /// Render every request in a JSON batch file
    Batch { file: PathBuf },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = config::load_config(cli.config.as_deref()).map_err(magick_path::Error::from)?;

    match cli.command {
        Command::Parse { tokens, url } => {
            let intent = RequestIntent::parse(&tokens, &url);
            output::print_lines(&output::format_json(&intent)?);
        }
        Command::Render {
            tokens,
            url,
            render: args,
        } => {
            print_render(&config, &tokens, &url, &args)?;
        }
        Command::Request { path, render: args } => {
            let request = split_request(&path);
            let intent = RequestIntent::parse(&request.tokens, &request.source_url);
            if intent.has_operations() {
                print_render(&config, &request.tokens, &request.source_url, &args)?;
            } else {
                output::print_lines(&output::format_pass_through(&intent));
            }
        }
        Command::Batch { file } => {
            let requests = batch::load_requests(&file)?;
            init_thread_pool(&config.processing);
            let results = batch::translate_all(&requests, &config.naming);
            output::print_lines(&output::format_json(&results)?);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn print_render(
    config: &config::Config,
    tokens: &[String],
    url: &str,
    args: &RenderArgs,
) -> magick_path::Result<()> {
    let intent = RequestIntent::parse(tokens, url);
    let out = match &args.output {
        Some(o) => o.clone(),
        None => config.naming.derived_output(url, tokens),
    };
    let spec = render(&intent, &args.input, &out);
    if args.json {
        output::print_lines(&output::format_json(&spec)?);
    } else {
        output::print_lines(&output::format_command(&config.tool.program, &spec));
    }
    Ok(())
}

/// Logs go to stderr; `RUST_LOG` overrides the `--verbose` level.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores; the config can only lower it.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
