// core/src/feedback_api.rs
use log::warn;
use serde::Deserialize;
use ureq::Agent;

use crate::feedback::{FeedbackProvider, FeedbackRequest};

const DEFAULT_MODEL: &str = "gemini-1.5-flash";
const API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Debug, Clone, Deserialize)]
struct GenerateResp {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Deserialize)]
struct Candidate {
    content: Content,
}

#[derive(Debug, Clone, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Clone, Deserialize)]
struct Part {
    text: String,
}

/// Gemini-klient – enkel blocking-versjon (ureq). API-nøkkel leses fra
/// miljøet; uten nøkkel svarer provideren None og pipelinen faller
/// tilbake til den terskelbaserte frasen.
pub struct GeminiFeedbackClient {
    agent: Agent,
    api_key: Option<String>,
    model: String,
}

impl GeminiFeedbackClient {
    pub fn new() -> Self {
        Self::with_api_key(std::env::var(API_KEY_ENV).ok())
    }

    pub fn with_api_key(api_key: Option<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(std::time::Duration::from_secs(10))
            .build();
        Self {
            agent,
            api_key,
            model: DEFAULT_MODEL.to_string(),
        }
    }

    fn prompt(request: &FeedbackRequest) -> String {
        format!(
            "You are a strength coach. Give one short, actionable sentence of \
             form feedback for a {} set: {} reps ({} good, {} bad), average \
             bottom angle {}, form score {:.2} of 1.0. Sampled joint angles \
             over the set: {:?}.",
            request.exercise,
            request.total_reps,
            request.good_reps,
            request.bad_reps,
            request
                .avg_descent_angle
                .map(|a| format!("{a:.1}°"))
                .unwrap_or_else(|| "unknown".into()),
            request.form_score,
            request.sampled_angles,
        )
    }
}

impl Default for GeminiFeedbackClient {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedbackProvider for GeminiFeedbackClient {
    fn feedback_for_session(&self, request: &FeedbackRequest) -> Option<String> {
        let api_key = match &self.api_key {
            Some(k) => k,
            None => {
                warn!("feedback: {} ikke satt, hopper over generering", API_KEY_ENV);
                return None;
            }
        };

        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            self.model, api_key
        );
        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": Self::prompt(request) }] }]
        });

        let resp = self.agent.post(&url).send_json(body).ok()?;
        let parsed: GenerateResp = resp.into_json().ok()?;

        let text = parsed
            .candidates
            .first()?
            .content
            .parts
            .first()?
            .text
            .trim()
            .to_string();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}
