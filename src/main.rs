//! hilite - print a file with syntax highlighting

use std::env;
use std::io::{self, BufWriter, IsTerminal, Read, Write};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use hilite::buffer::Buffer;
use hilite::config::{ColorMode, Config};
use hilite::error::{HighlightError, Result};
use hilite::render::{describe_matches, render_line};
use hilite::syntax::{Highlighter, SyntaxDef, SyntaxManager};
use hilite::theme::Theme;

fn main() {
    init_logging();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Log to stderr, filtered by HILITE_LOG (default: warn)
fn init_logging() {
    let filter = EnvFilter::try_from_env("HILITE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(true)
        .with_filter(filter);

    tracing_subscriber::registry().with(console_layer).init();
}

/// Command line options
#[derive(Debug, Default)]
struct Options {
    file: Option<PathBuf>,
    syntax_dir: Option<PathBuf>,
    filetype: Option<String>,
    color: Option<ColorMode>,
    dump: bool,
    list: bool,
}

enum Command {
    Run(Options),
    Help,
    Version,
}

fn parse_args(args: &[String]) -> Result<Command> {
    let mut options = Options::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" | "-h" => return Ok(Command::Help),
            "--version" | "-V" => return Ok(Command::Version),
            "--syntax" | "-s" => {
                options.syntax_dir = Some(PathBuf::from(value_for(arg, iter.next())?));
            }
            "--filetype" | "-f" => {
                options.filetype = Some(value_for(arg, iter.next())?.to_string());
            }
            "--color" => {
                options.color = Some(match value_for(arg, iter.next())? {
                    "auto" => ColorMode::Auto,
                    "always" => ColorMode::Always,
                    "never" => ColorMode::Never,
                    other => {
                        return Err(HighlightError::Message(format!(
                            "Invalid value for --color: {}",
                            other
                        )))
                    }
                });
            }
            "--dump" | "-d" => options.dump = true,
            "--list" | "-l" => options.list = true,
            "-" => options.file = None,
            other if other.starts_with('-') => {
                return Err(HighlightError::Message(format!("Unknown option: {}", other)));
            }
            other => {
                if options.file.is_some() {
                    return Err(HighlightError::Message(format!(
                        "Unexpected argument: {}",
                        other
                    )));
                }
                options.file = Some(PathBuf::from(other));
            }
        }
    }

    Ok(Command::Run(options))
}

fn value_for<'a>(option: &str, value: Option<&'a String>) -> Result<&'a str> {
    value
        .map(String::as_str)
        .ok_or_else(|| HighlightError::Message(format!("Missing value for {}", option)))
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();

    let options = match parse_args(&args)? {
        Command::Help => {
            print_usage();
            return Ok(());
        }
        Command::Version => {
            print_version();
            return Ok(());
        }
        Command::Run(options) => options,
    };

    let mut config = Config::load();
    if let Some(dir) = options.syntax_dir {
        config.syntax_dir = Some(dir);
    }
    if let Some(color) = options.color {
        config.color = color;
    }

    let manager = SyntaxManager::from_config(&config);

    if options.list {
        for name in manager.list_languages() {
            println!("{}", name);
        }
        return Ok(());
    }

    let mut buffer = match &options.file {
        Some(path) => Buffer::from_file(path)?,
        None => {
            let mut content = String::new();
            io::stdin().read_to_string(&mut content)?;
            Buffer::from_text("*stdin*", &content)
        }
    };

    let def = select_language(&manager, options.filetype.as_deref(), &buffer)?;
    match &def {
        Some(def) if manager.enabled => {
            tracing::debug!("Highlighting {} as {}", buffer.name(), def.filetype());
            Highlighter::new(def).highlight_buffer(&mut buffer);
        }
        Some(_) => tracing::debug!("Highlighting disabled"),
        None => tracing::debug!("No syntax for {}", buffer.name()),
    }

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    if options.dump {
        for (idx, line) in buffer.lines().iter().enumerate() {
            let matches = line.matches().map(describe_matches).unwrap_or_default();
            writeln!(out, "{}: {}", idx + 1, matches)?;
        }
    } else {
        let use_color = match config.color {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => io::stdout().is_terminal(),
        };
        let theme = if use_color { Theme::default() } else { Theme::plain() };

        for line in buffer.lines() {
            render_line(&mut out, line.text(), line.matches(), &theme, config.tab_width)?;
            writeln!(out)?;
        }
    }

    out.flush()?;
    Ok(())
}

/// Pick the language from --filetype, or detect it from the buffer
fn select_language(
    manager: &SyntaxManager,
    filetype: Option<&str>,
    buffer: &Buffer,
) -> Result<Option<Arc<SyntaxDef>>> {
    if let Some(name) = filetype {
        return manager
            .get_language(name)
            .map(Some)
            .ok_or_else(|| HighlightError::UnknownFiletype(name.to_string()));
    }

    let name = buffer
        .filename()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(buffer.name()));
    Ok(manager.detect_language(&name, buffer.first_line()))
}

fn print_usage() {
    println!("hilite {} - syntax highlighting for the terminal", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: hilite [OPTIONS] [FILE]");
    println!();
    println!("Reads standard input when FILE is missing or '-'.");
    println!();
    println!("Options:");
    println!("  -h, --help             Show this help message");
    println!("  -V, --version          Show version information");
    println!("  -s, --syntax DIR       Load grammar files from DIR");
    println!("  -f, --filetype NAME    Use the named language instead of detecting it");
    println!("      --color WHEN       auto, always or never");
    println!("  -d, --dump             Print group changes per line instead of text");
    println!("  -l, --list             List available languages");
    println!();
    println!("Configuration is read from ~/.hilite.conf.");
    println!("Set HILITE_LOG (e.g. HILITE_LOG=debug) to control logging.");
}

fn print_version() {
    println!("hilite {}", env!("CARGO_PKG_VERSION"));
}
