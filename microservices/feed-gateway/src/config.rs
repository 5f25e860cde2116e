//! Feed Gateway Configuration

use pulse_core::{PulseError, Result};
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Reported by the probe endpoints
    pub service_name: String,
    pub http_bind: String,
    /// Fixed seed for the shared generator; entropy when unset
    pub seed: Option<u64>,
    /// Records in a `/api/logs` snapshot
    pub snapshot_log_count: usize,
    pub stream: StreamSettings,
}

/// Live log stream tuning
#[derive(Debug, Clone)]
pub struct StreamSettings {
    pub initial_burst: usize,
    pub min_interval: Duration,
    pub max_interval: Duration,
    pub lifetime: Duration,
    pub channel_capacity: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            service_name: "feed-gateway".to_string(),
            http_bind: "0.0.0.0:8080".to_string(),
            seed: None,
            snapshot_log_count: 50,
            stream: StreamSettings::default(),
        }
    }
}

impl Default for StreamSettings {
    fn default() -> Self {
        Self {
            initial_burst: 10,
            min_interval: Duration::from_millis(2000),
            max_interval: Duration::from_millis(5000),
            lifetime: Duration::from_secs(300),
            channel_capacity: 32,
        }
    }
}

impl FeedConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let stream = StreamSettings {
            initial_burst: env_or("STREAM_INITIAL_BURST", defaults.stream.initial_burst)?,
            min_interval: Duration::from_millis(env_or(
                "STREAM_MIN_INTERVAL_MS",
                defaults.stream.min_interval.as_millis() as u64,
            )?),
            max_interval: Duration::from_millis(env_or(
                "STREAM_MAX_INTERVAL_MS",
                defaults.stream.max_interval.as_millis() as u64,
            )?),
            lifetime: Duration::from_secs(env_or(
                "STREAM_LIFETIME_SECS",
                defaults.stream.lifetime.as_secs(),
            )?),
            channel_capacity: env_or("STREAM_CHANNEL_CAPACITY", defaults.stream.channel_capacity)?,
        };
        stream.validate()?;

        Ok(Self {
            service_name: defaults.service_name,
            http_bind: std::env::var("HTTP_BIND").unwrap_or(defaults.http_bind),
            seed: std::env::var("FEED_SEED")
                .ok()
                .map(|raw| parse_var("FEED_SEED", &raw))
                .transpose()?,
            snapshot_log_count: env_or("SNAPSHOT_LOG_COUNT", defaults.snapshot_log_count)?,
            stream,
        })
    }
}

impl StreamSettings {
    pub fn validate(&self) -> Result<()> {
        if self.min_interval.is_zero() {
            return Err(PulseError::Config(
                "STREAM_MIN_INTERVAL_MS must be greater than zero".to_string(),
            ));
        }
        if self.min_interval >= self.max_interval {
            return Err(PulseError::Config(format!(
                "stream interval range is empty: {:?}..{:?}",
                self.min_interval, self.max_interval
            )));
        }
        if self.lifetime.is_zero() {
            return Err(PulseError::Config(
                "STREAM_LIFETIME_SECS must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Session buffer size; always holds the whole opening burst
    pub fn buffer(&self) -> usize {
        self.channel_capacity.max(self.initial_burst).max(1)
    }
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match std::env::var(key) {
        Ok(raw) => parse_var(key, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_var<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    raw.trim()
        .parse()
        .map_err(|e| PulseError::Config(format!("Invalid {}: {}", key, e)))
}
