//! Service counters exposed at `/api/stats`

use pulse_telemetry::{Counter, Gauge};
use serde_json::{Map, Value};

#[derive(Clone)]
pub struct FeedMetrics {
    pub snapshots_served: Counter,
    pub exports_served: Counter,
    pub sessions_opened: Counter,
    pub frames_emitted: Counter,
    pub active_streams: Gauge,
}

impl FeedMetrics {
    pub fn new() -> Self {
        Self {
            snapshots_served: Counter::new("snapshots_served"),
            exports_served: Counter::new("exports_served"),
            sessions_opened: Counter::new("stream_sessions_opened"),
            frames_emitted: Counter::new("stream_frames_emitted"),
            active_streams: Gauge::new("active_streams"),
        }
    }

    /// Current values keyed by metric name
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        for counter in [
            &self.snapshots_served,
            &self.exports_served,
            &self.sessions_opened,
            &self.frames_emitted,
        ] {
            map.insert(counter.name().to_string(), Value::from(counter.get()));
        }
        map.insert(
            self.active_streams.name().to_string(),
            Value::from(self.active_streams.get()),
        );
        Value::Object(map)
    }
}

impl Default for FeedMetrics {
    fn default() -> Self {
        Self::new()
    }
}
