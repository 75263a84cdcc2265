//! Summary-bygger: ren aggregering og frasevalg, ingen scoringslogikk.

use crate::reps::RepSummary;
use crate::types::{AnalysisSummary, Cfg, ExerciseKind};

pub const NO_POSE_FEEDBACK: &str = "No pose detected in video";

/// Terskelbasert dom over snitt-bunnvinkelen. Uten ekstrema (ingen
/// bevegelse) faller vi til den korrigerende varianten.
fn verdict(exercise: ExerciseKind, avg_descent: Option<f64>, cfg: &Cfg) -> &'static str {
    match avg_descent {
        Some(angle) if angle <= cfg.good_bottom_max_deg => "Great form!",
        _ => match exercise {
            ExerciseKind::Squat => "Try to squat deeper!",
            ExerciseKind::Pushup => "Try to lower your chest further!",
            ExerciseKind::Pullup => "Try to stretch at the bottom more!",
            ExerciseKind::Bench => "Try to go lower on the bench!",
        },
    }
}

/// Pakk pipeline-utdataene til sluttproduktet. `detected_frames` er antall
/// frames med deteksjon; det skaleres med frame-skip for å speile
/// kildevideoens lengde.
pub fn build_summary(
    exercise: ExerciseKind,
    detected_frames: usize,
    reps: &RepSummary,
    form_score: f64,
    cfg: &Cfg,
) -> AnalysisSummary {
    let feedback = format!(
        "{} total reps: {}, good reps: {}, bad reps: {}",
        verdict(exercise, reps.avg_descent_angle, cfg),
        reps.total(),
        reps.good(),
        reps.bad()
    );

    AnalysisSummary {
        exercise: exercise.to_string(),
        total_frames_analyzed: detected_frames as u32 * cfg.frame_skip,
        total_reps: reps.total(),
        good_reps: reps.good(),
        bad_reps: reps.bad(),
        avg_peak_angle: reps.avg_peak_angle,
        avg_descent_angle: reps.avg_descent_angle,
        form_score,
        overall_feedback: feedback,
    }
}

/// Tom/triviell input er et gyldig, rapporterbart utfall – aldri en feil.
pub fn no_pose_summary(
    exercise: ExerciseKind,
    detected_frames: usize,
    cfg: &Cfg,
) -> AnalysisSummary {
    AnalysisSummary {
        exercise: exercise.to_string(),
        total_frames_analyzed: detected_frames as u32 * cfg.frame_skip,
        total_reps: 0,
        good_reps: 0,
        bad_reps: 0,
        avg_peak_angle: None,
        avg_descent_angle: None,
        form_score: 0.0,
        overall_feedback: NO_POSE_FEEDBACK.to_string(),
    }
}
