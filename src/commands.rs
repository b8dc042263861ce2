//! One function per checksum source. Each produces a [`Report`] and hands it
//! to [`emit`] for printing and opening in the browser.

use anyhow::{Context, Result, anyhow};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::time::Duration;
use vtsum::browser::{self, Browser};
use vtsum::{Brew, PackageRef, Report, Resolver, downloads, hashing};

/// How results get presented
pub struct Output {
    /// Browser to open the VirusTotal page in, `None` to skip
    pub browser: Option<Browser>,
    pub json: bool,
}

pub fn hash(hash: &str, output: &Output) -> Result<()> {
    emit(&Report::new(None, hash.trim()), output)
}

pub fn file(path: &Path, output: &Output) -> Result<()> {
    if path == Path::new("-") {
        let sha256 = hashing::sha256_reader(std::io::stdin().lock())
            .context("Failed to hash stdin")?;
        return emit(&Report::new(None, sha256), output);
    }

    hash_file(path.to_path_buf(), output)
}

pub fn mac_app(app: &Path, output: &Output) -> Result<()> {
    let executable = app_executable(app)
        .ok_or_else(|| anyhow!("Not an app bundle path: {}", app.display()))?;
    hash_file(executable, output)
}

pub fn brew<B: Brew>(
    resolver: &Resolver<B>,
    package: &PackageRef,
    cask: bool,
    output: &Output,
) -> Result<()> {
    let spinner = spinner(output, format!("Looking up {}...", package));
    let resolved = resolver.resolve_descriptor_checksum(&package.to_string(), cask);
    spinner.finish_and_clear();

    let resolved = resolved.with_context(|| format!("Failed to get checksum for {}", package))?;
    let report = Report::new(Some(resolved.path), resolved.sha256).with_kind(resolved.kind);
    emit(&report, output)
}

pub fn brew_cache<B: Brew>(
    resolver: &Resolver<B>,
    package: &PackageRef,
    cask: bool,
    output: &Output,
) -> Result<()> {
    let spinner = spinner(output, format!("Asking brew for the {} download...", package));
    let cache_path = resolver.resolve_cache_path(&package.to_string(), cask);
    spinner.finish_and_clear();

    let cache_path =
        cache_path.with_context(|| format!("Failed to get the cache path for {}", package))?;
    hash_file(cache_path, output)
}

pub fn latest_download(output: &Output) -> Result<()> {
    let dir = downloads::downloads_dir();
    let latest = downloads::latest_file(&dir)
        .with_context(|| format!("Failed to find the latest download in {}", dir.display()))?;
    hash_file(latest, output)
}

fn hash_file(path: PathBuf, output: &Output) -> Result<()> {
    let sha256 = hashing::sha256_file(&path)
        .with_context(|| format!("Failed to hash {}", path.display()))?;
    emit(&Report::new(Some(path), sha256), output)
}

/// Main executable of a macOS app bundle: `Foo.app/Contents/MacOS/Foo`
fn app_executable(app: &Path) -> Option<PathBuf> {
    let name = app.file_stem()?;
    Some(app.join("Contents").join("MacOS").join(name))
}

fn spinner(output: &Output, message: String) -> ProgressBar {
    if output.json || !std::io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn emit(report: &Report, output: &Output) -> Result<()> {
    if output.json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        if let Some(path) = &report.file_path {
            println!("{}       {}", "File path:".bold(), path.display());
        }
        println!("{} {}", "SHA256 checksum:".bold(), report.sha256.cyan());
        println!("{}  {}", "VirusTotal URL:".bold(), report.virustotal_url);
    }

    if let Some(browser) = output.browser {
        if let Err(e) = browser::open_url(&report.virustotal_url, browser) {
            eprintln!("{} Could not open {}: {}", "⚠".yellow(), browser.app_name(), e);
        }
    }

    Ok(())
}
