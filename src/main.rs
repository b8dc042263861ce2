mod colors;
mod commands;

use clap::{Args, Parser};
use std::path::PathBuf;
use vtsum::PackageRef;
use vtsum::browser::Browser;

#[derive(Parser)]
#[command(name = "vtsum")]
#[command(author, version, about = "Search a file's or Homebrew package's SHA-256 checksum on VirusTotal", long_about = None)]
struct Cli {
    #[command(flatten)]
    source: Source,

    /// Use the cask when a formula has the same name
    #[arg(short = 'C', long)]
    cask: bool,

    /// Browser to open the VirusTotal page in
    #[arg(short, long, value_enum, default_value_t = Browser::Chrome)]
    browser: Browser,

    /// Do not open the VirusTotal page
    #[arg(short = 'B', long)]
    no_browser: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Where the checksum comes from
#[derive(Args)]
#[group(required = true, multiple = false)]
struct Source {
    /// Search this hash as-is
    #[arg(long, value_name = "HASH")]
    hash: Option<String>,

    /// Hash this file ("-" reads stdin)
    #[arg(short, long, value_name = "FILE")]
    file: Option<PathBuf>,

    /// Hash the main executable of this app bundle
    #[arg(short, long, value_name = "APP")]
    mac: Option<PathBuf>,

    /// Use the checksum declared in this formula or cask
    #[arg(short = 'w', long, value_name = "NAME")]
    brew: Option<PackageRef>,

    /// Hash the downloaded artifact Homebrew cached for this formula or cask
    #[arg(short = 'c', long, value_name = "NAME")]
    brew_cache: Option<PackageRef>,

    /// Hash the most recent file in ~/Downloads
    #[arg(short = 'l', long)]
    latest_download: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    colors::init_colors();

    let output = commands::Output {
        browser: (!cli.no_browser).then_some(cli.browser),
        json: cli.json,
    };
    let source = cli.source;

    if let Some(hash) = source.hash {
        commands::hash(&hash, &output)
    } else if let Some(file) = source.file {
        commands::file(&file, &output)
    } else if let Some(app) = source.mac {
        commands::mac_app(&app, &output)
    } else if let Some(package) = source.brew {
        commands::brew(&vtsum::Resolver::new(), &package, cli.cask, &output)
    } else if let Some(package) = source.brew_cache {
        commands::brew_cache(&vtsum::Resolver::new(), &package, cli.cask, &output)
    } else {
        commands::latest_download(&output)
    }
}
