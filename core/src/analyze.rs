//! Inngangspunktet: landmark-sekvens + øvelse → `AnalysisSummary`.
//!
//! Deterministisk gitt identisk input; all tilstand er lokal for én
//! invokasjon, så uavhengige videoer kan analyseres parallelt med hver
//! sin gjennomkjøring uten delt mutabel tilstand.

use log::info;

use crate::extractor;
use crate::feedback::{sample_angles, FeedbackProvider, FeedbackRequest};
use crate::metrics::{self, videos_analyzed_total};
use crate::phase;
use crate::reps;
use crate::scoring;
use crate::summary;
use crate::types::{AnalysisSummary, AnalyzeError, Cfg, ExerciseKind, FramePose, JOINT_COUNT};

/// Strukturell validering. Per-frame-avvik (lav synlighet) er ikke feil,
/// men en deteksjon med feil antall landmarks eller ikke-endelige
/// koordinater er ugyldig input og avvises.
fn validate(frames: &[FramePose]) -> Result<(), AnalyzeError> {
    for (index, frame) in frames.iter().enumerate() {
        if let Some(landmarks) = frame {
            if landmarks.len() != JOINT_COUNT {
                return Err(AnalyzeError::MalformedFrame {
                    index,
                    reason: format!(
                        "forventet {} landmarks, fikk {}",
                        JOINT_COUNT,
                        landmarks.len()
                    ),
                });
            }
            if landmarks
                .iter()
                .any(|lm| !lm.x.is_finite() || !lm.y.is_finite() || !lm.visibility.is_finite())
            {
                return Err(AnalyzeError::MalformedFrame {
                    index,
                    reason: "non_finite_coordinate".into(),
                });
            }
        }
    }
    Ok(())
}

fn analyze_inner(
    frames: &[FramePose],
    exercise: ExerciseKind,
    cfg: &Cfg,
) -> Result<(AnalysisSummary, Vec<Option<f64>>), AnalyzeError> {
    validate(frames)?;

    let detected = frames.iter().filter(|f| f.is_some()).count();
    // Null deteksjoner eller færre enn 3 brukbare frames: gyldig utfall
    // med null reps og null score, aldri en hard feil.
    if detected < 3 {
        info!(
            "analyze: {} frames, {} deteksjoner → no pose ({})",
            frames.len(),
            detected,
            exercise
        );
        return Ok((
            summary::no_pose_summary(exercise, detected, cfg),
            Vec::new(),
        ));
    }

    let angles = extractor::angle_series(frames, exercise, cfg);
    let phases = phase::label_series(&angles, cfg);
    let rep_summary = reps::count_reps_and_extremes(&angles, &phases, cfg);
    let form_score = scoring::score_video(frames, &phases, exercise, cfg);

    videos_analyzed_total(metrics::global()).inc();
    info!(
        "analyze: {} ({} frames) → {} reps ({} gode), score {:.3}",
        exercise,
        detected,
        rep_summary.total(),
        rep_summary.good(),
        form_score
    );

    Ok((
        summary::build_summary(exercise, detected, &rep_summary, form_score, cfg),
        angles,
    ))
}

/// Analyser én fullbufret landmark-sekvens.
pub fn analyze(
    frames: &[FramePose],
    exercise: ExerciseKind,
    cfg: &Cfg,
) -> Result<AnalysisSummary, AnalyzeError> {
    analyze_inner(frames, exercise, cfg).map(|(summary, _)| summary)
}

/// Som `analyze`, men lar en ekstern feedback-generator overstyre den
/// terskelbaserte dommen. Manglende svar fra provideren er aldri en feil –
/// summary-ens egen frase beholdes da.
pub fn analyze_with_feedback(
    frames: &[FramePose],
    exercise: ExerciseKind,
    cfg: &Cfg,
    provider: &dyn FeedbackProvider,
) -> Result<AnalysisSummary, AnalyzeError> {
    let (mut summary, angles) = analyze_inner(frames, exercise, cfg)?;
    let request = FeedbackRequest::from_summary(&summary, sample_angles(&angles, cfg.feedback_samples));
    if let Some(text) = provider.feedback_for_session(&request) {
        summary.overall_feedback = text;
    }
    Ok(summary)
}
