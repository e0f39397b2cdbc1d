//! Forward geocoding via a MapTiler-style HTTP API
//!
//! Resolves free-text locations to advisory coordinates. The lookup runs
//! with a bounded timeout outside any storage transaction; any failure —
//! timeout, transport error, bad payload, missing API key — degrades to
//! "coordinates absent" and never fails the surrounding submission.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::Deserialize;
use shared::report::Coordinates;

use crate::core::Config;

/// Orders in-flight lookup completions.
///
/// Each issued request carries a monotonically increasing sequence number;
/// a completion is applied only if it is the newest observed so far, so a
/// slow response can never overwrite the result of a later request.
#[derive(Debug, Default)]
pub struct SequenceGate {
    issued: AtomicU64,
    applied: AtomicU64,
}

impl SequenceGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the next sequence number for an outgoing request
    pub fn issue(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Returns true if this completion is the newest observed so far;
    /// stale (out-of-order) completions return false and must be dropped.
    pub fn try_apply(&self, seq: u64) -> bool {
        self.applied.fetch_max(seq, Ordering::SeqCst) < seq
    }
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    features: Vec<GeocodingFeature>,
}

#[derive(Debug, Deserialize)]
struct GeocodingFeature {
    /// `[longitude, latitude]`, GeoJSON order
    #[serde(default)]
    center: Vec<f64>,
}

/// Geocoding client
#[derive(Debug, Clone)]
pub struct GeocodingService {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    gate: Arc<SequenceGate>,
}

impl GeocodingService {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.geocoding_timeout_ms))
            .build()?;

        Ok(Self {
            client,
            base_url: config.geocoding_url.trim_end_matches('/').to_string(),
            api_key: config.geocoding_api_key.clone(),
            gate: Arc::new(SequenceGate::new()),
        })
    }

    /// Resolve a free-text location to coordinates, or `None`.
    ///
    /// `None` covers every degradation: unconfigured API key, transport
    /// failure, timeout, empty result set, or a completion superseded by
    /// a newer request.
    pub async fn resolve(&self, location: &str) -> Option<Coordinates> {
        let Some(api_key) = &self.api_key else {
            tracing::debug!("geocoding disabled: no api key configured");
            return None;
        };
        if location.trim().is_empty() {
            return None;
        }

        let seq = self.gate.issue();
        let result = self.fetch(api_key, location).await;
        if !self.gate.try_apply(seq) {
            tracing::debug!(seq, "discarding stale geocoding completion");
            return None;
        }

        match result {
            Ok(coordinates) => coordinates,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "geocoding lookup failed; proceeding without coordinates"
                );
                None
            }
        }
    }

    async fn fetch(
        &self,
        api_key: &str,
        location: &str,
    ) -> reqwest::Result<Option<Coordinates>> {
        let url = format!("{}/{}.json", self.base_url, location);
        let response = self
            .client
            .get(&url)
            .query(&[("key", api_key), ("limit", "1")])
            .send()
            .await?
            .error_for_status()?;

        let body: GeocodingResponse = response.json().await?;
        Ok(body.features.first().and_then(|feature| {
            match feature.center.as_slice() {
                [longitude, latitude] => Some(Coordinates {
                    latitude: *latitude,
                    longitude: *longitude,
                }),
                _ => None,
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_gate_in_order() {
        let gate = SequenceGate::new();
        let first = gate.issue();
        let second = gate.issue();

        assert!(gate.try_apply(first));
        assert!(gate.try_apply(second));
    }

    #[test]
    fn test_sequence_gate_discards_stale_completion() {
        let gate = SequenceGate::new();
        let older = gate.issue();
        let newer = gate.issue();

        // The newer request completes first; the older response arrives
        // late and must be dropped.
        assert!(gate.try_apply(newer));
        assert!(!gate.try_apply(older));

        // Same sequence applied twice is also stale
        assert!(!gate.try_apply(newer));
    }

    #[tokio::test]
    async fn test_resolve_without_api_key_degrades() {
        let config = Config::with_overrides("/tmp/truthlink-test", 0);
        let service = GeocodingService::new(&Config {
            geocoding_api_key: None,
            ..config
        })
        .expect("build service");

        assert!(service.resolve("Market St").await.is_none());
        assert!(service.resolve("").await.is_none());
    }
}
