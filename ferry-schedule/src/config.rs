//! Configuration for rendering, publishing and serving.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::domain::TimeFormat;

/// How the schedule site is presented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    /// Location direction filters are relative to.
    pub home: String,

    /// Title shown on every page.
    pub title: String,

    /// Number of consecutive days to publish.
    pub days: u32,

    /// Show times as "6:30 AM" instead of "06:30".
    pub use_12h: bool,

    /// Directory holding `styles.css`.
    pub static_dir: PathBuf,
}

impl SiteConfig {
    pub fn new(home: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            home: home.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_days(mut self, days: u32) -> Self {
        self.days = days;
        self
    }

    pub fn with_12h(mut self, use_12h: bool) -> Self {
        self.use_12h = use_12h;
        self
    }

    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = dir.into();
        self
    }

    /// The time format implied by `use_12h`.
    pub fn time_format(&self) -> TimeFormat {
        if self.use_12h {
            TimeFormat::TwelveHour
        } else {
            TimeFormat::TwentyFourHour
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            home: "Chebeague Island".to_string(),
            title: "Chebeague Island Ferry Schedule".to_string(),
            days: 30,
            use_12h: false,
            static_dir: PathBuf::from("static"),
        }
    }
}

/// Configuration for the rendered page cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// TTL for cached pages.
    pub ttl: Duration,

    /// Maximum number of cached pages.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60),
            max_capacity: 1000,
        }
    }
}

/// Configuration for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind: SocketAddr,

    /// How often the schedule file is re-read.
    pub reload_interval: Duration,

    pub cache: CacheConfig,
}

impl ServerConfig {
    pub fn with_bind(mut self, bind: SocketAddr) -> Self {
        self.bind = bind;
        self
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 3000)),
            reload_interval: Duration::from_secs(5 * 60),
            cache: CacheConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_site_config() {
        let config = SiteConfig::default();

        assert_eq!(config.home, "Chebeague Island");
        assert_eq!(config.title, "Chebeague Island Ferry Schedule");
        assert_eq!(config.days, 30);
        assert!(!config.use_12h);
        assert_eq!(config.static_dir, PathBuf::from("static"));
        assert_eq!(config.time_format(), TimeFormat::TwentyFourHour);
    }

    #[test]
    fn custom_site_config() {
        let config = SiteConfig::new("Long Island", "Long Island Ferries")
            .with_days(7)
            .with_12h(true)
            .with_static_dir("assets");

        assert_eq!(config.home, "Long Island");
        assert_eq!(config.title, "Long Island Ferries");
        assert_eq!(config.days, 7);
        assert_eq!(config.time_format(), TimeFormat::TwelveHour);
        assert_eq!(config.static_dir, PathBuf::from("assets"));
    }

    #[test]
    fn default_server_config() {
        let config = ServerConfig::default();

        assert_eq!(config.bind.to_string(), "127.0.0.1:3000");
        assert_eq!(config.reload_interval, Duration::from_secs(300));
        assert_eq!(config.cache.ttl, Duration::from_secs(60));
        assert_eq!(config.cache.max_capacity, 1000);
    }
}
