//! Repetisjonsteller og ekstrema-sporing.
//!
//! Én gjennomgang over fase- og vinkelserien (posisjonsjustert, samme
//! lengde). Reps lukkes BOT→TOP; lokale ekstrema telles uavhengig med
//! 3-punkts sjekk og er kun diagnostiske – de gater aldri rep-tellingen.

use crate::angles::RoundTo;
use crate::types::{Cfg, Phase, Repetition};

#[derive(Debug, Clone, Default)]
pub struct RepSummary {
    pub reps: Vec<Repetition>,
    /// Snitt av lokale toppvinkler (2 desimaler), None uten ekstrema.
    pub avg_peak_angle: Option<f64>,
    /// Snitt av lokale bunnvinkler (2 desimaler), None uten ekstrema.
    pub avg_descent_angle: Option<f64>,
}

impl RepSummary {
    pub fn total(&self) -> u32 {
        self.reps.len() as u32
    }

    pub fn good(&self) -> u32 {
        self.reps.iter().filter(|r| r.good).count() as u32
    }

    pub fn bad(&self) -> u32 {
        self.total() - self.good()
    }
}

fn avg_rounded(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some((values.iter().sum::<f64>() / values.len() as f64).round_to(2))
}

/// Tell reps og spor ekstrema i samme pass.
///
/// - Siste BOT huskes; neste TOP lukker én rep over [siste BOT, denne TOP].
///   En BOT kan bare lukke én rep (markøren nullstilles).
/// - God rep: bunnvinkel ≤ `good_bottom_max_deg` OG toppvinkel ≥
///   `good_top_min_deg`.
/// - En hengende BOT uten påfølgende TOP telles aldri (ufullstendig rep).
/// - Færre enn 3 frames ⇒ null reps, ingen ekstrema.
pub fn count_reps_and_extremes(
    angles: &[Option<f64>],
    phases: &[Phase],
    cfg: &Cfg,
) -> RepSummary {
    debug_assert_eq!(angles.len(), phases.len(), "vinkel- og faseserien må ha lik lengde");
    if angles.len() < 3 {
        return RepSummary::default();
    }

    let mut reps = Vec::new();
    let mut pending_bot: Option<(usize, f64)> = None;
    // Siste faktiske avlesning – BOT-frames holdt over "ingen avlesning"
    // skal fortsatt få en reell bunnvinkel.
    let mut last_reading: Option<f64> = None;

    let mut peak_angles = Vec::new();
    let mut descent_angles = Vec::new();

    for i in 0..phases.len() {
        if let Some(a) = angles[i] {
            last_reading = Some(a);
        }

        match phases[i] {
            Phase::Bot => {
                if let Some(a) = angles[i].or(last_reading) {
                    pending_bot = Some((i, a));
                }
            }
            Phase::Top => {
                if let (Some((start, bottom_angle)), Some(top_angle)) =
                    (pending_bot, angles[i].or(last_reading))
                {
                    let good = bottom_angle <= cfg.good_bottom_max_deg
                        && top_angle >= cfg.good_top_min_deg;
                    reps.push(Repetition {
                        start,
                        end: i,
                        bottom_angle,
                        top_angle,
                        good,
                    });
                    pending_bot = None;
                }
            }
            Phase::Mid => {}
        }

        // 3-punkts lokal maks/min: strengt større/mindre enn begge naboer.
        if i > 0 && i + 1 < angles.len() {
            if let (Some(prev), Some(curr), Some(next)) = (angles[i - 1], angles[i], angles[i + 1])
            {
                if curr > prev && curr > next {
                    peak_angles.push(curr);
                } else if curr < prev && curr < next {
                    descent_angles.push(curr);
                }
            }
        }
    }

    RepSummary {
        reps,
        avg_peak_angle: avg_rounded(&peak_angles),
        avg_descent_angle: avg_rounded(&descent_angles),
    }
}
