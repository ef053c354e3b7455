use std::io;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, bail};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use gleaner_core::{
    FetchConfig, JsonConfig, JsonFormatter, ScraperConfig, TextAnalyzer, TextConfig, TextFormatter,
    WebScraper, error_to_json, fetch_file, fetch_stdin,
};
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

mod echo;

use echo::{format_size, print_banner, print_detail, print_error, print_info, print_step, print_success, print_warning};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Output format for analysis and search reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Json,
    Text,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "text" | "txt" => Ok(Self::Text),
            _ => Err(format!("Invalid format: {}. Valid options: json, text", s)),
        }
    }
}

/// Analyze text for themes and word frequency, and scrape readable content from web pages
#[derive(Parser, Debug)]
#[command(name = "gleaner")]
#[command(author = "Gleaner Contributors")]
#[command(version)]
#[command(about = "Analyze text and scrape readable web content", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// HTTP timeout in seconds
    #[arg(long, global = true, default_value = "30", value_name = "SECS")]
    timeout: u64,

    /// Custom User-Agent for HTTP requests
    #[arg(long, global = true, value_name = "UA")]
    user_agent: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Word statistics, themes, language patterns, and top words
    Analyze {
        /// Text file to analyze, or "-" for stdin (default: stdin)
        #[arg(value_name = "INPUT")]
        input: Option<String>,

        /// Output format (json, text)
        #[arg(short, long, default_value = "json", value_name = "FORMAT")]
        format: OutputFormat,
    },

    /// Find whole-word occurrences of a term with surrounding context
    Search {
        /// Term to search for (matched literally, case-insensitive)
        #[arg(value_name = "TERM")]
        term: String,

        /// Text file to search, or "-" for stdin (default: stdin)
        #[arg(value_name = "INPUT")]
        input: Option<String>,

        /// Output format (json, text)
        #[arg(short, long, default_value = "json", value_name = "FORMAT")]
        format: OutputFormat,
    },

    /// Download a page and print its readable text
    Scrape {
        /// URL to fetch
        #[arg(value_name = "URL")]
        url: String,

        /// Number of attempts before giving up (default: 3)
        #[arg(long, value_name = "NUM")]
        retries: Option<usize>,

        /// Print only the first N characters (default N: 1000)
        #[arg(long, value_name = "N", num_args = 0..=1)]
        preview: Option<Option<usize>>,

        /// Save the text to a file (default name: scraped_content_<timestamp>.txt)
        #[arg(long, value_name = "FILENAME", num_args = 0..=1, default_missing_value = "")]
        save: Option<String>,

        /// Directory for saved files
        #[arg(long, default_value = "scraped_content", value_name = "DIR")]
        output_dir: PathBuf,
    },

    /// Print list entries found on a page as JSON
    List {
        /// URL to fetch
        #[arg(value_name = "URL")]
        url: String,

        /// CSS selector for the entries (default: detect list containers)
        #[arg(short, long, value_name = "CSS")]
        selector: Option<String>,
    },

    /// Print page title, author, date, and description as JSON
    Metadata {
        /// URL to fetch
        #[arg(value_name = "URL")]
        url: String,
    },

    /// Print a shell completion script
    Completions {
        #[arg(value_name = "SHELL")]
        shell: Shell,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).with_target(false).init();
}

fn read_input(input: Option<&str>, verbose: bool) -> anyhow::Result<String> {
    let text = match input {
        None | Some("-") => {
            if verbose {
                print_step(1, 2, "Reading from stdin");
            }
            fetch_stdin().context("Failed to read from stdin")?
        }
        Some(path) => {
            if verbose {
                print_step(1, 2, &format!("Reading from file {}", path.bright_white()));
            }
            fetch_file(path).with_context(|| format!("Failed to read file: {}", path))?
        }
    };

    if verbose {
        print_detail("Size", &format_size(text.len()));
        eprintln!();
    }

    Ok(text)
}

fn scraper_config(cli: &Cli) -> ScraperConfig {
    let mut fetch = FetchConfig { timeout: cli.timeout, ..Default::default() };
    if let Some(ua) = &cli.user_agent {
        fetch.user_agent = ua.clone();
    }
    ScraperConfig::builder().fetch(fetch).build()
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    let json = JsonFormatter::new(JsonConfig { pretty: true }).format(value).context("Failed to format JSON")?;
    println!("{}", json);
    Ok(())
}

fn analyze(input: Option<&str>, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let text = read_input(input, verbose)?;

    if verbose {
        print_step(2, 2, "Analyzing text");
    }

    let result = match TextAnalyzer::new().analyze_text(&text) {
        Ok(result) => result,
        Err(e) => {
            if format == OutputFormat::Json {
                print_json(&error_to_json(&e))?;
            }
            return Err(e).context("Analysis failed");
        }
    };

    match format {
        OutputFormat::Json => print_json(&result)?,
        OutputFormat::Text => println!("{}", TextFormatter::new(TextConfig::default()).analysis(&result)),
    }

    Ok(())
}

fn search(term: &str, input: Option<&str>, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let text = read_input(input, verbose)?;

    if verbose {
        print_step(2, 2, &format!("Searching for {}", term.bright_white()));
    }

    let result = match TextAnalyzer::new().search_content(&text, term) {
        Ok(result) => result,
        Err(e) => {
            if format == OutputFormat::Json {
                print_json(&error_to_json(&e))?;
            }
            return Err(e).context("Search failed");
        }
    };

    match format {
        OutputFormat::Json => print_json(&result)?,
        OutputFormat::Text => println!("{}", TextFormatter::new(TextConfig::default()).search(&result)),
    }

    Ok(())
}

async fn scrape(
    cli: &Cli, url: &str, retries: Option<usize>, preview: Option<Option<usize>>, save: Option<&str>,
    output_dir: PathBuf,
) -> anyhow::Result<()> {
    let mut config = scraper_config(cli);
    config.output_dir = output_dir;
    if let Some(retries) = retries {
        config.max_retries = retries;
    }
    let scraper = WebScraper::with_config(config).context("Failed to build HTTP client")?;

    if cli.verbose {
        print_step(1, 2, &format!("Fetching from {}", url.bright_white().underline()));
    }

    let Some(text) = scraper.scrape_text(url).await else {
        print_error(&format!("No content extracted from {}", url));
        bail!("Scraping {} failed after {} attempt(s)", url, scraper.config().max_retries);
    };

    if cli.verbose {
        print_detail("Length", &format!("{} characters", text.chars().count()));
        eprintln!();
    }

    if let Some(filename) = save {
        if cli.verbose {
            print_step(2, 2, "Saving text");
        }
        let saved = scraper.save_text_to_file(&text, Some(filename)).context("Failed to save text")?;
        print_success(&format!("Saved to {}", saved));
    }

    match preview {
        Some(Some(length)) => println!("{}", scraper.get_text_preview(&text, length)),
        Some(None) => println!("{}", scraper.preview(&text)),
        None => println!("{}", text),
    }

    Ok(())
}

async fn list(cli: &Cli, url: &str, selector: Option<&str>) -> anyhow::Result<()> {
    let scraper = WebScraper::with_config(scraper_config(cli)).context("Failed to build HTTP client")?;

    if cli.verbose {
        print_step(1, 1, &format!("Collecting list items from {}", url.bright_white().underline()));
    }

    let items = scraper.scrape_list_items(url, selector).await;
    if items.is_empty() {
        print_warning("No list items found");
    } else if cli.verbose {
        print_detail("Items", &items.len().to_string());
    }

    print_json(&items)
}

async fn metadata(cli: &Cli, url: &str) -> anyhow::Result<()> {
    let scraper = WebScraper::with_config(scraper_config(cli)).context("Failed to build HTTP client")?;

    if cli.verbose {
        print_step(1, 1, &format!("Reading metadata from {}", url.bright_white().underline()));
    }

    match scraper.get_website_metadata(url).await {
        Some(metadata) => print_json(&metadata),
        None => {
            print_warning(&format!("Could not fetch {}", url));
            print_json(&serde_json::json!({}))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    if cli.verbose {
        print_banner();
        print_info("Debug logging enabled");
        eprintln!();
    }

    tracing::debug!(command = ?cli.command, timeout = cli.timeout, "parsed arguments");

    match &cli.command {
        Command::Analyze { input, format } => analyze(input.as_deref(), *format, cli.verbose),
        Command::Search { term, input, format } => search(term, input.as_deref(), *format, cli.verbose),
        Command::Scrape { url, retries, preview, save, output_dir } => {
            scrape(&cli, url, *retries, *preview, save.as_deref(), output_dir.clone()).await
        }
        Command::List { url, selector } => list(&cli, url, selector.as_deref()).await,
        Command::Metadata { url } => metadata(&cli, url).await,
        Command::Completions { shell } => {
            clap_complete::generate(*shell, &mut Cli::command(), "gleaner", &mut io::stdout());
            Ok(())
        }
    }
}
