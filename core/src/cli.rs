use anyhow::Context;

use crate::analyze::analyze;
use crate::types::{Cfg, ExerciseKind, FramePose};

/// Kjør analysen og skriv et lesbart sammendrag til stdout.
pub fn print_analysis_report(
    frames: &[FramePose],
    exercise: &str,
    cfg: &Cfg,
) -> anyhow::Result<()> {
    let kind: ExerciseKind = exercise
        .parse()
        .with_context(|| format!("kan ikke analysere øvelsen '{exercise}'"))?;
    let summary = analyze(frames, kind, cfg).context("analyse feilet")?;

    println!("--- Form Report ---");
    println!("Exercise: {}", summary.exercise);
    println!("Frames analyzed: {}", summary.total_frames_analyzed);
    println!(
        "Reps: {} total ({} good / {} bad)",
        summary.total_reps, summary.good_reps, summary.bad_reps
    );
    if let Some(peak) = summary.avg_peak_angle {
        println!("Avg peak angle: {:.2}", peak);
    }
    if let Some(descent) = summary.avg_descent_angle {
        println!("Avg descent angle: {:.2}", descent);
    }
    println!("Form score: {:.3}", summary.form_score);
    println!("Feedback: {}", summary.overall_feedback);
    Ok(())
}
