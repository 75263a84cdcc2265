//! Form-scorer: kontinuerlig holdningskvalitet i [0,1] per video.
//!
//! MID-frames scores mot rubrikkens målbånd (rygglinje, torso, ev.
//! kroppslinje); TOP/BOT-frames bruker kun primærleddets pass/fail, der
//! en feilet sjekk overstyrer med −1.0 slik at grunne/ufullstendige reps
//! straffes uansett holdning ellers.

use log::debug;

use crate::angles::{joint_angle, RoundTo};
use crate::extractor::{self, resolve_joint};
use crate::metrics::{self, frames_unscored_total};
use crate::types::{BilateralJoint, Cfg, ExerciseKind, FramePose, Joint, Landmark, Phase};

/// Lineært fall utenfor målbåndet: 1.0 innenfor, 0.0 fra 30° utenfor.
const BAND_FALLOFF_DEG: f64 = 30.0;

fn band_score(angle: f64, band: (f64, f64)) -> f64 {
    let (lo, hi) = band;
    let distance = if angle < lo {
        lo - angle
    } else if angle > hi {
        angle - hi
    } else {
        return 1.0;
    };
    (1.0 - distance / BAND_FALLOFF_DEG).max(0.0)
}

/// Rygglinje nese–skulder–hofte. Nesen er unilateral; skulder/hofte
/// velges per side som ellers.
fn spine_angle(landmarks: &[Landmark], min_visibility: f64) -> Option<f64> {
    let nose = &landmarks[Joint::Nose.index()];
    if nose.visibility < min_visibility {
        return None;
    }
    let shoulder = resolve_joint(landmarks, BilateralJoint::SHOULDER, min_visibility)?;
    let hip = resolve_joint(landmarks, BilateralJoint::HIP, min_visibility)?;
    Some(joint_angle(nose.point(), shoulder.point(), hip.point()))
}

/// Score for én frame, None hvis nødvendige ledd ikke er synlige nok
/// (framen hoppes da helt over – den teller ikke mot snittet).
fn frame_score(
    landmarks: &[Landmark],
    phase: Phase,
    exercise: ExerciseKind,
    cfg: &Cfg,
) -> Option<f64> {
    let rubric = exercise.rubric();
    let thr = cfg.visibility_threshold;

    match phase {
        // Ytterpunkt: hard pass/fail på primærleddet, ingenting annet.
        Phase::Top | Phase::Bot => {
            let angle = extractor::tracked_angle(landmarks, exercise, cfg)?;
            let pass = match phase {
                Phase::Top => angle >= cfg.good_top_min_deg,
                Phase::Bot => angle <= cfg.good_bottom_max_deg,
                Phase::Mid => unreachable!(),
            };
            Some(if pass { 1.0 } else { -1.0 })
        }
        // Transisjon: snitt av de kontinuerlige delscorene.
        Phase::Mid => {
            let spine = spine_angle(landmarks, thr)?;
            let torso = extractor::triplet_angle(landmarks, &rubric.torso, thr)?;
            let mut sum = band_score(spine, rubric.spine_band) + band_score(torso, rubric.torso_band);
            let mut count = 2.0;
            if let Some((triplet, band)) = &rubric.body_line {
                let line = extractor::triplet_angle(landmarks, triplet, thr)?;
                sum += band_score(line, *band);
                count += 1.0;
            }
            Some(sum / count)
        }
    }
}

/// Videonivå-score: snitt av frame-scorene, klemt til [gulv, 1.0] når
/// minst én frame ble scoret, ellers 0.0 ("ingen score beregnet").
pub fn score_video(
    frames: &[FramePose],
    phases: &[Phase],
    exercise: ExerciseKind,
    cfg: &Cfg,
) -> f64 {
    debug_assert_eq!(frames.len(), phases.len());
    let m = metrics::global();

    let mut sum = 0.0;
    let mut scored = 0usize;
    for (frame, phase) in frames.iter().zip(phases.iter()) {
        let landmarks = match frame {
            Some(lms) => lms,
            None => continue,
        };
        match frame_score(landmarks, *phase, exercise, cfg) {
            Some(s) => {
                sum += s;
                scored += 1;
            }
            None => frames_unscored_total(m).inc(),
        }
    }

    if scored == 0 {
        return 0.0;
    }
    let mean = sum / scored as f64;
    let score = mean.clamp(cfg.score_floor, 1.0).round_to(3);
    debug!(
        "score_video: {} av {} frames scoret, snitt {:.3} → {:.3}",
        scored,
        frames.len(),
        mean,
        score
    );
    score
}
