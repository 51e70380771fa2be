/// Analytics events
use musicstore_core::AnalyticsSink;
use std::collections::BTreeMap;

/// Sink that writes each event as a structured `tracing` record under the
/// `analytics` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAnalytics;

impl AnalyticsSink for TracingAnalytics {
    fn track_event(&self, name: &str, properties: &BTreeMap<String, String>) {
        tracing::info!(target: "analytics", event = name, ?properties, "analytics event");
    }
}

/// Build an event property map from key/value pairs
pub fn properties<const N: usize>(pairs: [(&str, String); N]) -> BTreeMap<String, String> {
    pairs
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}
