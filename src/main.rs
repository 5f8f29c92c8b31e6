/// versegrep: interactive multi-word search over Shakespeare's sonnets.
///
/// Downloads the sonnet corpus from PoetryDB once (cached as JSON next to
/// wherever `--cache` points), then runs a REPL: plain input is a search
/// query, `:`-prefixed input is a command. Preferences (highlighting, search
/// mode, highlight color) persist to a JSON config file across sessions.
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use versegrep::config::Preferences;
use versegrep::corpus::{self, CorpusSource, Sonnet};
use versegrep::render::{self, HighlightMode};
use versegrep::search::{self, SearchMode};

const BANNER: &str = "\
==========================================
 versegrep - search Shakespeare's sonnets
==========================================
Type one or more words to search. :help for commands.";

const HELP: &str = "\
Commands:
  :help                   show this help
  :quit                   exit
  :highlight on|off       toggle match highlighting
  :search-mode AND|OR     require all words (AND) or any word (OR)
  :hl-mode DEFAULT|GREEN  highlight color
Anything else is a search query; words are matched case-insensitively
as literal substrings of titles and lines.";

#[derive(Parser)]
#[command(name = "versegrep")]
#[command(about = "Interactive multi-word search over Shakespeare's sonnets", long_about = None)]
#[command(version)]
struct Cli {
    /// Sonnet cache file (downloaded from PoetryDB when missing)
    #[arg(short = 'c', long, default_value = "sonnets.json")]
    cache: String,

    /// Preferences file
    #[arg(short = 'p', long, default_value = "config.json")]
    config: String,

    /// Optional log file path for debug logging
    #[arg(short, long)]
    log: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log.as_ref())?;

    let cache_path = expand_path(&cli.cache);
    let config_path = expand_path(&cli.config);

    println!("{BANNER}");

    let mut prefs = Preferences::load(&config_path);

    let start = Instant::now();
    let (sonnets, source) = corpus::load_sonnets(&cache_path)
        .context("failed to load the sonnet corpus")?;
    match source {
        CorpusSource::Cache => println!("Loaded sonnets from the cache."),
        CorpusSource::Network => println!("Downloaded sonnets from PoetryDB."),
    }
    println!(
        "Loading sonnets took: {:.3} [ms]",
        start.elapsed().as_secs_f64() * 1000.0
    );
    println!("Loaded {} sonnets.", sonnets.len());

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut raw = String::new();
        if stdin.lock().read_line(&mut raw)? == 0 {
            // End of input terminates the program cleanly.
            println!("\nBye.");
            break;
        }
        let raw = raw.trim();
        if raw.is_empty() {
            continue;
        }

        if raw.starts_with(':') {
            match dispatch_command(raw, &mut prefs, &config_path) {
                LoopAction::Continue => continue,
                LoopAction::Quit => break,
            }
        }

        run_query(raw, &sonnets, &prefs);
    }

    Ok(())
}

enum LoopAction {
    Continue,
    Quit,
}

fn dispatch_command(raw: &str, prefs: &mut Preferences, config_path: &Path) -> LoopAction {
    let mut parts = raw.split_whitespace();
    let command = parts.next().unwrap_or_default();
    let arg = parts.next();
    let extra = parts.next();

    match command {
        ":quit" => {
            println!("Bye.");
            return LoopAction::Quit;
        }
        ":help" => println!("{HELP}"),
        ":highlight" => match arg {
            Some(arg) if extra.is_none() && arg.eq_ignore_ascii_case("on") => {
                prefs.highlight = true;
                println!("Highlighting ON");
                prefs.save(config_path);
            }
            Some(arg) if extra.is_none() && arg.eq_ignore_ascii_case("off") => {
                prefs.highlight = false;
                println!("Highlighting OFF");
                prefs.save(config_path);
            }
            _ => println!("Usage: :highlight on|off"),
        },
        ":search-mode" => match arg {
            Some(arg) if extra.is_none() && arg.eq_ignore_ascii_case("and") => {
                prefs.search_mode = SearchMode::And;
                println!("Search mode set to {}", prefs.search_mode);
                prefs.save(config_path);
            }
            Some(arg) if extra.is_none() && arg.eq_ignore_ascii_case("or") => {
                prefs.search_mode = SearchMode::Or;
                println!("Search mode set to {}", prefs.search_mode);
                prefs.save(config_path);
            }
            _ => println!("Usage: :search-mode AND|OR"),
        },
        ":hl-mode" => match arg {
            Some(arg) if extra.is_none() && arg.eq_ignore_ascii_case("default") => {
                prefs.highlight_mode = HighlightMode::Default;
                println!("Highlighting mode set to {}", prefs.highlight_mode);
                prefs.save(config_path);
            }
            Some(arg) if extra.is_none() && arg.eq_ignore_ascii_case("green") => {
                prefs.highlight_mode = HighlightMode::Green;
                println!("Highlighting mode set to {}", prefs.highlight_mode);
                prefs.save(config_path);
            }
            _ => println!("Usage: :hl-mode DEFAULT|GREEN"),
        },
        _ => println!("Unknown command. Type :help for commands."),
    }

    LoopAction::Continue
}

fn run_query(raw: &str, sonnets: &[Sonnet], prefs: &Preferences) {
    let words: Vec<&str> = raw.split_whitespace().collect();
    if words.is_empty() {
        return;
    }

    let start = Instant::now();
    let results = match search::evaluate_query(sonnets, &words, prefs.search_mode) {
        Ok(results) => results,
        Err(err) => {
            println!("{err}");
            return;
        }
    };
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
    debug!(query = raw, words = words.len(), elapsed_ms, "query evaluated");

    print!(
        "{}",
        render::render_results(
            raw,
            sonnets,
            &results,
            prefs.highlight,
            prefs.highlight_mode,
            Some(elapsed_ms),
        )
    );
}

fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).into_owned())
}

/// Initialize logging with optional file output
fn init_logging(log_path: Option<&PathBuf>) -> Result<()> {
    use tracing_subscriber::fmt::writer::MakeWriterExt;

    if let Some(log_file) = log_path {
        // With log file: info+ to file, warn+ to stderr
        let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

        let file_appender = tracing_appender::rolling::never(
            log_file
                .parent()
                .unwrap_or_else(|| std::path::Path::new(".")),
            log_file
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("versegrep.log"),
        );

        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(file_appender.and(std::io::stderr.with_max_level(tracing::Level::WARN)))
            .init();

        eprintln!("Debug logging enabled: {:?}", log_file);
    } else {
        // No log file: warn+ to stderr only (unless RUST_LOG overrides)
        let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    }

    Ok(())
}
