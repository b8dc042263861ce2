//! Opening URLs in a specific browser via macOS `open -a`.

use crate::error::{Error, Result};
use clap::ValueEnum;
use std::process::Command;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Browser {
    #[default]
    Chrome,
    Safari,
    Firefox,
}

impl Browser {
    /// Application name as `open -a` expects it
    pub fn app_name(&self) -> &'static str {
        match self {
            Browser::Chrome => "Google Chrome",
            Browser::Safari => "Safari",
            Browser::Firefox => "Firefox",
        }
    }
}

/// Open `url` in `browser`
pub fn open_url(url: &str, browser: Browser) -> Result<()> {
    let app = browser.app_name();
    debug!("Opening {} in {}", url, app);

    let command = format!("open -a \"{}\" {}", app, url);
    let status = Command::new("open")
        .args(["-a", app, url])
        .status()
        .map_err(|e| Error::ExternalCommandFailure {
            command: command.clone(),
            reason: e.to_string(),
        })?;

    if !status.success() {
        return Err(Error::ExternalCommandFailure {
            command,
            reason: format!("exited with {}", status),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_names() {
        assert_eq!(Browser::Chrome.app_name(), "Google Chrome");
        assert_eq!(Browser::Safari.app_name(), "Safari");
        assert_eq!(Browser::Firefox.app_name(), "Firefox");
    }

    #[test]
    fn test_parse_browser_flag() {
        assert_eq!(Browser::from_str("safari", false).unwrap(), Browser::Safari);
        assert!(Browser::from_str("lynx", false).is_err());
        assert_eq!(Browser::default(), Browser::Chrome);
    }
}
