mod config;
mod render;

use config::Config;

use std::io::{self, IsTerminal, Read};
use std::thread;
use std::time::Duration;

use clap::Parser;
use colored::{control::set_override, Colorize};
use pickline_core::{source, Dashboard, Document, Pickline, SearchHits, TargetDigit};
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

const LONG_ABOUT: &str = r##"
Pickline reads a Pick 3 prediction document and shows it cleaned up.

Draw dates in any of the shapes the sheet export produces are normalized and
the history is listed newest first. Prediction codes are padded to three
digits and sorted numerically.

SOURCES:
  pickline predictions.json          Read a file
  pickline -                         Read from stdin
  pickline https://host/p.json       Fetch a URL (see --url-timeout)

  A source that cannot be read is shown as an empty document.

EXAMPLES:
  pickline -d 9                      Replace Game 2 leading digits with 9
  pickline -f 432                    Highlight code 432 everywhere
  pickline -f 43                     Highlight codes containing 43
  pickline -w 60 https://host/p.json Refresh every minute
  pickline --parse-date '9/172025'   Show how a date cell is read
  pickline --shapes                  List the date shapes in priority order
  pickline --json | jq .game1        Machine-readable output

CONFIGURATION:
  Settings can be configured via CLI flags, environment variables, or config file.
  Precedence: CLI args > Environment vars > Config file > Defaults

  Setting      | CLI flag       | Env var                | Default
  -------------|----------------|------------------------|-----------------
  source       | SOURCE         | PICKLINE_SOURCE        | predictions.json
  target       | -d, --target   | PICKLINE_TARGET        | none
  limit        | -l, --limit    | PICKLINE_LIMIT         | 20
  no_color     | -C, --no-color | PICKLINE_NO_COLOR      | false
  watch        | -w, --watch    | PICKLINE_WATCH         | 0 (run once)
  url_timeout  | --url-timeout  | PICKLINE_URL_TIMEOUT   | 30
  url_max_size | --url-max-size | PICKLINE_URL_MAX_SIZE  | 10M

  Engine settings (overflow policy, display zone, disabled shapes) live in
  the [engine] table of the config file.

  Config file location: pickline --config-path
  Generate default config: pickline --config-init

  Note: NO_COLOR env var is also respected (https://no-color.org/)"##;

#[derive(Parser)]
#[command(name = "pickline")]
#[command(version)]
#[command(about = "Normalize and display Pick 3 draw history and predictions")]
#[command(long_about = LONG_ABOUT)]
struct Cli {
    /// Document to read: a path, `-` for stdin, or an http(s) URL
    #[arg(value_name = "SOURCE")]
    source: Option<String>,

    /// Replace the leading digit of every Game 2 code (0-9)
    #[arg(long, short = 'd', value_name = "DIGIT")]
    target: Option<TargetDigit>,

    /// Output the dashboard as JSON (for scripting/piping)
    #[arg(long, short = 'j')]
    json: bool,

    /// Find a code in history and both games
    ///
    /// Three digits match exactly; one or two digits match any code
    /// containing them.
    #[arg(long, short = 'f', value_name = "CODE")]
    find: Option<String>,

    /// History rows to show
    #[arg(long, short = 'l')]
    limit: Option<usize>,

    /// Re-read the source every SECS seconds until interrupted
    #[arg(long, short = 'w', value_name = "SECS")]
    watch: Option<u64>,

    /// Parse a single date cell and show which shape matched
    #[arg(long, value_name = "VALUE")]
    parse_date: Option<String>,

    /// List the date shapes in priority order
    #[arg(long)]
    shapes: bool,

    /// Disable colored output
    #[arg(long, short = 'C')]
    no_color: bool,

    /// Enable verbose logging (use multiple times for more detail)
    ///
    /// -v shows debug messages, -vv shows trace messages.
    /// Useful for understanding why a date or code was rejected.
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,

    /// Timeout for URL fetches in seconds
    #[arg(long, value_name = "SECS")]
    url_timeout: Option<u64>,

    /// Maximum response size for URL fetches (e.g., 10M, 50M, 1G)
    #[arg(long, value_name = "SIZE")]
    url_max_size: Option<String>,

    /// Show config file path
    #[arg(long)]
    config_path: bool,

    /// Generate default config file (see --config-path for location)
    #[arg(long)]
    config_init: bool,
}

/// Settings after merging CLI, environment and config file.
struct Settings {
    source: String,
    target: Option<TargetDigit>,
    find: Option<String>,
    json: bool,
    watch: Option<u64>,
    url_timeout: u64,
    url_max_size: u64,
}

/// Parse size string like "10M", "50M", "1G" into bytes.
fn parse_size(s: &str) -> Result<u64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("Empty size string".to_string());
    }

    // Find where the numeric part ends
    let num_end = s.find(|c: char| c.is_ascii_alphabetic()).unwrap_or(s.len());
    let (num_str, suffix) = s.split_at(num_end);

    let base: u64 = num_str
        .trim()
        .parse()
        .map_err(|_| format!("Invalid size number: '{}'", num_str))?;

    let multiplier: u64 = match suffix.to_uppercase().as_str() {
        "" | "B" => 1,
        "K" | "KB" => 1024,
        "M" | "MB" => 1024 * 1024,
        "G" | "GB" => 1024 * 1024 * 1024,
        _ => {
            return Err(format!(
                "Unknown size suffix: '{}'. Use K, M, or G.",
                suffix
            ))
        }
    };

    base.checked_mul(multiplier)
        .ok_or_else(|| format!("Size too large: '{}'", s))
}

fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Fetch a document body with timeout and size limits.
fn fetch_url(url: &str, timeout_secs: u64, max_size: u64) -> Result<String, String> {
    let response = ureq::get(url)
        .timeout(Duration::from_secs(timeout_secs))
        .call()
        .map_err(|e| {
            let msg = e.to_string();
            if msg.contains("timed out") || msg.contains("Timeout") {
                format!(
                    "Request timed out after {}s. Use --url-timeout to increase the limit.",
                    timeout_secs
                )
            } else {
                format!("Failed to fetch URL '{}': {}", url, e)
            }
        })?;

    // Read one byte past the limit to detect oversized bodies
    let mut buffer = Vec::new();
    response
        .into_reader()
        .take(max_size.saturating_add(1))
        .read_to_end(&mut buffer)
        .map_err(|e| format!("Failed to read response: {}", e))?;

    if buffer.len() as u64 > max_size {
        return Err(format!(
            "Response exceeds {} byte limit. Use --url-max-size to increase (e.g., --url-max-size 50M).",
            max_size
        ));
    }

    String::from_utf8(buffer).map_err(|_| format!("Response from '{}' is not UTF-8 text", url))
}

/// Load the document. Any failure is reported and yields an empty document.
fn load_document(settings: &Settings) -> Document {
    let location = settings.source.as_str();
    let loaded = if is_url(location) {
        fetch_url(location, settings.url_timeout, settings.url_max_size)
            .map(|text| Document::from_json_str(&text))
    } else if location == "-" {
        source::read_from(io::stdin().lock()).map_err(|e| e.to_string())
    } else {
        source::read_document(location).map_err(|e| e.to_string())
    };

    loaded.unwrap_or_else(|e| {
        eprintln!("{}: {}", "warning".yellow().bold(), e);
        Document::default()
    })
}

fn print_json(dashboard: &Dashboard, hits: Option<&SearchHits>) {
    let mut value = match serde_json::to_value(dashboard) {
        Ok(value) => value,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            std::process::exit(1);
        }
    };
    if let (Some(hits), Some(map)) = (hits, value.as_object_mut()) {
        map.insert(
            "search".to_string(),
            serde_json::to_value(hits).unwrap_or_default(),
        );
    }
    match serde_json::to_string_pretty(&value) {
        Ok(text) => println!("{}", text),
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            std::process::exit(1);
        }
    }
}

/// One fetch-and-render pass.
fn run_once(engine: &Pickline, settings: &Settings) {
    let document = load_document(settings);
    let dashboard = engine.process(&document, settings.target);

    let hits = settings.find.as_deref().and_then(|query| {
        let hits = dashboard.find(query);
        if hits.is_none() {
            eprintln!(
                "{}: search '{}' contains no digits",
                "warning".yellow().bold(),
                query
            );
        }
        hits
    });

    if settings.json {
        print_json(&dashboard, hits.as_ref());
    } else {
        print!("{}", render::dashboard(&dashboard, hits.as_ref()));
    }
}

/// Where a setting not given on the command line came from.
fn setting_source(env_key: &str, in_file: bool) -> String {
    if std::env::var(env_key).is_ok() {
        format!("env {}", env_key)
    } else if in_file {
        "config file".to_string()
    } else {
        "default".to_string()
    }
}

fn main() {
    let cli = Cli::parse();

    // Handle --config-path
    if cli.config_path {
        match Config::path() {
            Some(path) => println!("{}", path.display()),
            None => {
                eprintln!(
                    "{}: Cannot determine config directory",
                    "error".red().bold()
                );
                std::process::exit(1);
            }
        }
        return;
    }

    // Handle --config-init
    if cli.config_init {
        match config::init_config() {
            Ok(path) => println!("Created config file: {}", path.display()),
            Err(e) => {
                eprintln!("{}: {}", "error".red().bold(), e);
                std::process::exit(1);
            }
        }
        return;
    }

    // Initialize tracing based on verbosity level (before config loading for logging)
    let level = match cli.verbose {
        0 => LevelFilter::OFF,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    if level != LevelFilter::OFF {
        let filter = EnvFilter::builder()
            .with_default_directive(level.into())
            .from_env_lossy();
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    // Load config file and merge with CLI args
    // Precedence: CLI args > Environment vars > Config file > Defaults
    let file_config = Config::load();

    if let Some(path) = Config::path() {
        if path.exists() {
            tracing::debug!("Loaded config from: {}", path.display());
        } else {
            tracing::trace!("No config file at: {}", path.display());
        }
    }

    let no_color = if cli.no_color {
        tracing::debug!("no_color = true (from CLI)");
        true
    } else {
        let nc = file_config.no_color();
        if nc {
            let source = if std::env::var("NO_COLOR").is_ok() {
                "env NO_COLOR"
            } else if std::env::var("PICKLINE_NO_COLOR").is_ok() {
                "env PICKLINE_NO_COLOR"
            } else {
                "config file"
            };
            tracing::debug!("no_color = true (from {})", source);
        }
        nc
    };
    if no_color || !io::stdout().is_terminal() {
        set_override(false);
    }

    let limit = if let Some(l) = cli.limit {
        tracing::debug!("limit = {} (from CLI)", l);
        l
    } else {
        let l = file_config.limit();
        let source = setting_source("PICKLINE_LIMIT", file_config.limit.is_some());
        tracing::debug!("limit = {} (from {})", l, source);
        l
    };

    let mut engine_config = file_config.engine.clone();
    engine_config.recent_limit = limit;
    let engine = Pickline::with_config(engine_config);

    // Handle --shapes
    if cli.shapes {
        if cli.json {
            match serde_json::to_string_pretty(&engine.shape_infos()) {
                Ok(text) => println!("{}", text),
                Err(e) => eprintln!("{}: {}", "error".red().bold(), e),
            }
        } else {
            print!("{}", render::shapes(&engine.shape_infos()));
        }
        return;
    }

    // Handle --parse-date
    if let Some(ref input) = cli.parse_date {
        let parsed = engine.parse_date(input);
        if cli.json {
            match serde_json::to_string_pretty(&parsed) {
                Ok(text) => println!("{}", text),
                Err(e) => eprintln!("{}: {}", "error".red().bold(), e),
            }
        } else {
            println!("{}", render::parsed_date(input, parsed.as_ref()));
        }
        return;
    }

    let source = if let Some(ref s) = cli.source {
        tracing::debug!("source = {} (from CLI)", s);
        s.clone()
    } else {
        let s = file_config.source();
        let source = setting_source("PICKLINE_SOURCE", file_config.source.is_some());
        tracing::debug!("source = {} (from {})", s, source);
        s
    };

    let target = if cli.target.is_some() {
        tracing::debug!("target = {:?} (from CLI)", cli.target);
        cli.target
    } else {
        let t = file_config.target();
        let source = setting_source("PICKLINE_TARGET", file_config.target.is_some());
        tracing::debug!("target = {:?} (from {})", t, source);
        t
    };

    let url_timeout = if let Some(t) = cli.url_timeout {
        tracing::debug!("url_timeout = {} (from CLI)", t);
        t
    } else {
        let t = file_config.url_timeout();
        let source = setting_source("PICKLINE_URL_TIMEOUT", file_config.url_timeout.is_some());
        tracing::debug!("url_timeout = {} (from {})", t, source);
        t
    };

    let url_max_size_str = if let Some(ref s) = cli.url_max_size {
        tracing::debug!("url_max_size = {} (from CLI)", s);
        s.clone()
    } else {
        let s = file_config.url_max_size();
        let source = setting_source("PICKLINE_URL_MAX_SIZE", file_config.url_max_size.is_some());
        tracing::debug!("url_max_size = {} (from {})", s, source);
        s
    };

    let url_max_size = match parse_size(&url_max_size_str) {
        Ok(size) => size,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            std::process::exit(1);
        }
    };

    let watch = if cli.watch.is_some() {
        tracing::debug!("watch = {:?} (from CLI)", cli.watch);
        cli.watch.filter(|secs| *secs > 0)
    } else {
        let w = file_config.watch();
        let source = setting_source("PICKLINE_WATCH", file_config.watch.is_some());
        tracing::debug!("watch = {:?} (from {})", w, source);
        w
    };

    let settings = Settings {
        source,
        target,
        find: cli.find,
        json: cli.json,
        watch,
        url_timeout,
        url_max_size,
    };

    let Some(interval) = settings.watch else {
        run_once(&engine, &settings);
        return;
    };

    // Each tick starts from a fresh fetch; nothing carries over.
    let clear = !settings.json && io::stdout().is_terminal();
    loop {
        if clear {
            print!("\x1b[2J\x1b[H");
        }
        run_once(&engine, &settings);
        tracing::debug!(interval, "waiting for next refresh");
        thread::sleep(Duration::from_secs(interval));
    }
}
