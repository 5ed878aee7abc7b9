//! Provider health checks
//!
//! Checks the weather and air-quality providers concurrently, each under
//! its own timeout.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::time::timeout;
use tracing::{debug, instrument, warn};

use crate::ports::{AirQualityPort, WeatherPort};

/// Default timeout for a single health check in seconds
const DEFAULT_HEALTH_CHECK_TIMEOUT_SECS: u64 = 5;

/// Status of an individual provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceHealth {
    /// Whether the provider answered successfully
    pub healthy: bool,
    /// Response time in milliseconds (absent on timeout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<u64>,
    /// Error message if unhealthy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ServiceHealth {
    /// Create a healthy status
    #[must_use]
    pub const fn healthy(response_time_ms: u64) -> Self {
        Self {
            healthy: true,
            response_time_ms: Some(response_time_ms),
            error: None,
        }
    }

    /// Create an unhealthy status
    #[must_use]
    pub fn unhealthy(error: impl Into<String>, response_time_ms: u64) -> Self {
        Self {
            healthy: false,
            response_time_ms: Some(response_time_ms),
            error: Some(error.into()),
        }
    }

    /// Create an unhealthy status due to timeout
    #[must_use]
    pub fn timeout() -> Self {
        Self {
            healthy: false,
            response_time_ms: None,
            error: Some("Health check timed out".to_string()),
        }
    }
}

/// Health of every provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    /// True only if every provider is healthy
    pub healthy: bool,
    /// Individual provider statuses, keyed by name
    pub services: BTreeMap<String, ServiceHealth>,
    /// When the check ran
    pub checked_at: DateTime<Utc>,
}

impl HealthReport {
    /// Create a report from individual statuses
    #[must_use]
    pub fn new(services: BTreeMap<String, ServiceHealth>) -> Self {
        let healthy = services.values().all(|s| s.healthy);
        Self {
            healthy,
            services,
            checked_at: Utc::now(),
        }
    }

    /// Status of a specific provider
    #[must_use]
    pub fn service_status(&self, name: &str) -> Option<&ServiceHealth> {
        self.services.get(name)
    }
}

/// Service that checks whether the providers behind the ports answer
pub struct HealthService {
    weather: Arc<dyn WeatherPort>,
    air_quality: Arc<dyn AirQualityPort>,
    timeout: Duration,
}

impl std::fmt::Debug for HealthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HealthService")
            .field("weather", &"<WeatherPort>")
            .field("air_quality", &"<AirQualityPort>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl HealthService {
    /// Create a health service over both providers
    #[must_use]
    pub fn new(weather: Arc<dyn WeatherPort>, air_quality: Arc<dyn AirQualityPort>) -> Self {
        Self {
            weather,
            air_quality,
            timeout: Duration::from_secs(DEFAULT_HEALTH_CHECK_TIMEOUT_SECS),
        }
    }

    /// Set the per-provider timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Check both providers concurrently
    #[instrument(skip(self))]
    pub async fn check_all(&self) -> HealthReport {
        let (weather, air_quality) =
            futures::join!(self.check_weather(), self.check_air_quality());

        let mut services = BTreeMap::new();
        services.insert("weather".to_string(), weather);
        services.insert("air_quality".to_string(), air_quality);
        HealthReport::new(services)
    }

    /// Check the weather provider
    #[instrument(skip(self))]
    pub async fn check_weather(&self) -> ServiceHealth {
        self.check("weather", self.weather.is_available()).await
    }

    /// Check the air-quality provider
    #[instrument(skip(self))]
    pub async fn check_air_quality(&self) -> ServiceHealth {
        self.check("air_quality", self.air_quality.is_available()).await
    }

    async fn check(
        &self,
        service: &str,
        availability: impl std::future::Future<Output = bool>,
    ) -> ServiceHealth {
        let start = Instant::now();

        let Ok(available) = timeout(self.timeout, availability).await else {
            warn!(service, "Health check timed out");
            return ServiceHealth::timeout();
        };

        // Bounded by the timeout, far below u64::MAX
        #[allow(clippy::cast_possible_truncation)]
        let response_time = start.elapsed().as_millis() as u64;
        if available {
            debug!(service, response_time_ms = response_time, "Service healthy");
            ServiceHealth::healthy(response_time)
        } else {
            warn!(service, response_time_ms = response_time, "Service unhealthy");
            ServiceHealth::unhealthy(format!("{service} provider unavailable"), response_time)
        }
    }
}
