use once_cell::sync::Lazy;
use prometheus::{IntCounter, Registry};

/// Tellere for pipelinen. Egen Registry slik at embedderen kan scrape
/// eller ignorere dem – kjernen installerer ingenting globalt i prosessen
/// utover denne instansen.
pub struct Metrics {
    pub registry: Registry,
    videos_analyzed: IntCounter,
    frames_no_reading: IntCounter,
    frames_unscored: IntCounter,
    feedback_cache_hit: IntCounter,
    feedback_cache_miss: IntCounter,
}

fn counter(registry: &Registry, name: &str, help: &str) -> IntCounter {
    let c = IntCounter::new(name, help).expect("gyldig metric-navn");
    registry
        .register(Box::new(c.clone()))
        .expect("metric registrert én gang");
    c
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();
        Self {
            videos_analyzed: counter(
                &registry,
                "formgraph_videos_analyzed_total",
                "Antall videoer analysert",
            ),
            frames_no_reading: counter(
                &registry,
                "formgraph_frames_no_reading_total",
                "Frames uten pålitelig vinkelavlesning",
            ),
            frames_unscored: counter(
                &registry,
                "formgraph_frames_unscored_total",
                "Frames ekskludert fra form-score (lav synlighet)",
            ),
            feedback_cache_hit: counter(
                &registry,
                "formgraph_feedback_cache_hit_total",
                "Feedback-cache treff",
            ),
            feedback_cache_miss: counter(
                &registry,
                "formgraph_feedback_cache_miss_total",
                "Feedback-cache bom",
            ),
            registry,
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

pub fn videos_analyzed_total(m: &Metrics) -> &IntCounter {
    &m.videos_analyzed
}

pub fn frames_no_reading_total(m: &Metrics) -> &IntCounter {
    &m.frames_no_reading
}

pub fn frames_unscored_total(m: &Metrics) -> &IntCounter {
    &m.frames_unscored
}

pub fn feedback_cache_hit_total(m: &Metrics) -> &IntCounter {
    &m.feedback_cache_hit
}

pub fn feedback_cache_miss_total(m: &Metrics) -> &IntCounter {
    &m.feedback_cache_miss
}

static GLOBAL: Lazy<Metrics> = Lazy::new(Metrics::new);

/// Prosessglobal instans brukt av pipelinen.
pub fn global() -> &'static Metrics {
    &GLOBAL
}
