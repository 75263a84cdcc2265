//! Feedback-laget: ekstern tekstgenerator bak en provider-trait, med
//! statisk fallback og en cache foran den blokkerende klienten.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use ordered_float::OrderedFloat;
use serde::Serialize;

use crate::metrics::{feedback_cache_hit_total, feedback_cache_miss_total, Metrics};
use crate::types::AnalysisSummary;

/// Det provideren får se: et sammendrag av analysen pluss et utvalg av
/// den sporede vinkelserien. Serialiserbar rett inn i en prompt.
#[derive(Debug, Clone, Serialize)]
pub struct FeedbackRequest {
    pub exercise: String,
    pub total_reps: u32,
    pub good_reps: u32,
    pub bad_reps: u32,
    pub avg_descent_angle: Option<f64>,
    pub form_score: f64,
    pub sampled_angles: Vec<f64>,
}

impl FeedbackRequest {
    pub fn from_summary(summary: &AnalysisSummary, sampled_angles: Vec<f64>) -> Self {
        Self {
            exercise: summary.exercise.clone(),
            total_reps: summary.total_reps,
            good_reps: summary.good_reps,
            bad_reps: summary.bad_reps,
            avg_descent_angle: summary.avg_descent_angle,
            form_score: summary.form_score,
            sampled_angles,
        }
    }
}

/// Opak ekstern tekstgenerator. None = ikke tilgjengelig / ikke noe svar;
/// det er aldri en feil for analysen.
pub trait FeedbackProvider {
    fn feedback_for_session(&self, request: &FeedbackRequest) -> Option<String>;
}

/// Fast svar (prod: fallback, test: kontrollert provider).
#[derive(Debug, Clone, Default)]
pub struct StaticFeedbackProvider {
    pub text: Option<String>,
}

impl FeedbackProvider for StaticFeedbackProvider {
    fn feedback_for_session(&self, _request: &FeedbackRequest) -> Option<String> {
        self.text.clone()
    }
}

/// Jevnt fordelt utvalg av vinkelserien (maks `max_points` avlesninger);
/// frames uten avlesning hoppes over.
pub fn sample_angles(angles: &[Option<f64>], max_points: usize) -> Vec<f64> {
    let readings: Vec<f64> = angles.iter().filter_map(|a| *a).collect();
    if readings.is_empty() || max_points == 0 {
        return Vec::new();
    }
    if readings.len() <= max_points {
        return readings;
    }
    let step = readings.len() as f64 / max_points as f64;
    (0..max_points)
        .map(|i| readings[(i as f64 * step) as usize])
        .collect()
}

type CacheKey = (String, OrderedFloat<f64>, OrderedFloat<f64>);

/// Cache foran en provider: identiske analyser (samme øvelse, samme
/// bunnvinkel og score) skal ikke koste et nytt API-kall.
pub struct CachedFeedback<P> {
    inner: P,
    cache: Arc<Mutex<HashMap<CacheKey, String>>>,
    metrics: &'static Metrics,
}

impl<P: FeedbackProvider> CachedFeedback<P> {
    pub fn new(inner: P, metrics: &'static Metrics) -> Self {
        Self {
            inner,
            cache: Arc::new(Mutex::new(HashMap::new())),
            metrics,
        }
    }

    fn key(request: &FeedbackRequest) -> CacheKey {
        (
            request.exercise.clone(),
            OrderedFloat(request.avg_descent_angle.unwrap_or(-1.0)),
            OrderedFloat(request.form_score),
        )
    }
}

impl<P: FeedbackProvider> FeedbackProvider for CachedFeedback<P> {
    fn feedback_for_session(&self, request: &FeedbackRequest) -> Option<String> {
        let key = Self::key(request);
        let mut cache = self.cache.lock().unwrap();

        if let Some(text) = cache.get(&key) {
            feedback_cache_hit_total(self.metrics).inc();
            return Some(text.clone());
        }

        feedback_cache_miss_total(self.metrics).inc();
        let text = self.inner.feedback_for_session(request)?;
        cache.insert(key, text.clone());
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics;

    fn request() -> FeedbackRequest {
        FeedbackRequest {
            exercise: "squat".into(),
            total_reps: 3,
            good_reps: 2,
            bad_reps: 1,
            avg_descent_angle: Some(85.0),
            form_score: 0.8,
            sampled_angles: vec![170.0, 90.0, 170.0],
        }
    }

    #[test]
    fn statisk_provider_returnerer_konfigurert_tekst() {
        let provider = StaticFeedbackProvider {
            text: Some("Solid økt!".into()),
        };
        assert_eq!(
            provider.feedback_for_session(&request()).as_deref(),
            Some("Solid økt!")
        );
        assert_eq!(
            StaticFeedbackProvider::default().feedback_for_session(&request()),
            None
        );
    }

    #[test]
    fn sample_angles_tar_jevnt_utvalg_og_dropper_none() {
        let angles: Vec<Option<f64>> = (0..100).map(|i| Some(i as f64)).collect();
        let sampled = sample_angles(&angles, 10);
        assert_eq!(sampled.len(), 10);
        assert_eq!(sampled[0], 0.0);
        assert!(sampled[9] >= 90.0);

        let sparse = vec![None, Some(42.0), None];
        assert_eq!(sample_angles(&sparse, 10), vec![42.0]);
        assert!(sample_angles(&[None, None], 10).is_empty());
    }

    #[test]
    fn cache_treffer_paa_identisk_analyse() {
        let inner = StaticFeedbackProvider {
            text: Some("Great form!".into()),
        };
        let cached = CachedFeedback::new(inner, metrics::global());
        let before_hits =
            crate::metrics::feedback_cache_hit_total(metrics::global()).get();

        let req = request();
        assert!(cached.feedback_for_session(&req).is_some());
        assert!(cached.feedback_for_session(&req).is_some());

        let after_hits = crate::metrics::feedback_cache_hit_total(metrics::global()).get();
        assert_eq!(after_hits, before_hits + 1, "andre kall skal treffe cachen");
    }
}
