use std::error::Error;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::AnalysisSummary;

/// Persistert analyse: sammendraget pluss når det ble produsert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredAnalysis {
    pub analyzed_at: DateTime<Utc>,
    pub summary: AnalysisSummary,
}

/// Lagrer sammendraget til disk som JSON (pretty-print).
pub fn save_summary(summary: &AnalysisSummary, path: &str) -> Result<(), Box<dyn Error>> {
    let stored = StoredAnalysis {
        analyzed_at: Utc::now(),
        summary: summary.clone(),
    };
    let json = serde_json::to_string_pretty(&stored)?;
    std::fs::write(path, json)?;
    println!(
        "✅ Analyse lagret til {} ({}, {} reps)",
        path, stored.summary.exercise, stored.summary.total_reps
    );
    Ok(())
}

/// Leser inn en lagret analyse. Manglende fil er ikke en feil – da
/// returneres None.
pub fn load_summary(path: &str) -> Result<Option<StoredAnalysis>, Box<dyn Error>> {
    if !Path::new(path).exists() {
        println!("⚠️ Fant ingen lagret analyse på {}", path);
        return Ok(None);
    }
    let contents = std::fs::read_to_string(path)?;
    let stored: StoredAnalysis = serde_json::from_str(&contents)?;
    println!(
        "📂 Analyse lastet fra {} ({})",
        path, stored.summary.exercise
    );
    Ok(Some(stored))
}
