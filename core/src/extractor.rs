use log::debug;

use crate::angles::{joint_angle, RoundTo};
use crate::metrics::{self, frames_no_reading_total};
use crate::types::{BilateralJoint, Cfg, ExerciseKind, FramePose, Landmark, Side};

/// Rubrikk per øvelse: hvilke ledd som er diagnostiske, og målbåndene
/// scoreren bruker. Strategy-record i stedet for spredt branching.
#[derive(Debug, Clone, Copy)]
pub struct ExerciseRubric {
    /// Triplet for sporet vinkel OG primærledd-sjekken ved TOP/BOT
    /// (vertex i midten: kne for squat, albue for press/trekk).
    pub primary: [BilateralJoint; 3],
    /// Torso-triplet for kontinuerlig holdningsscore ved MID.
    pub torso: [BilateralJoint; 3],
    /// Målbånd (grader) for torso-vinkelen.
    pub torso_band: (f64, f64),
    /// Målbånd for rygglinje-vinkelen nese–skulder–hofte.
    pub spine_band: (f64, f64),
    /// Kroppslinje (hofte–kne–ankel nær 180°) – kun push-up.
    pub body_line: Option<([BilateralJoint; 3], (f64, f64))>,
}

static SQUAT_RUBRIC: ExerciseRubric = ExerciseRubric {
    primary: [BilateralJoint::HIP, BilateralJoint::KNEE, BilateralJoint::ANKLE],
    torso: [BilateralJoint::SHOULDER, BilateralJoint::HIP, BilateralJoint::KNEE],
    torso_band: (70.0, 140.0),
    spine_band: (140.0, 170.0),
    body_line: None,
};

static PUSHUP_RUBRIC: ExerciseRubric = ExerciseRubric {
    primary: [
        BilateralJoint::SHOULDER,
        BilateralJoint::ELBOW,
        BilateralJoint::WRIST,
    ],
    torso: [BilateralJoint::SHOULDER, BilateralJoint::HIP, BilateralJoint::KNEE],
    torso_band: (150.0, 180.0),
    spine_band: (140.0, 170.0),
    body_line: Some((
        [BilateralJoint::HIP, BilateralJoint::KNEE, BilateralJoint::ANKLE],
        (160.0, 180.0),
    )),
};

static PULL_PRESS_RUBRIC: ExerciseRubric = ExerciseRubric {
    primary: [
        BilateralJoint::SHOULDER,
        BilateralJoint::ELBOW,
        BilateralJoint::WRIST,
    ],
    torso: [BilateralJoint::SHOULDER, BilateralJoint::HIP, BilateralJoint::KNEE],
    torso_band: (150.0, 180.0),
    spine_band: (140.0, 170.0),
    body_line: None,
};

impl ExerciseKind {
    pub fn rubric(self) -> &'static ExerciseRubric {
        match self {
            ExerciseKind::Squat => &SQUAT_RUBRIC,
            ExerciseKind::Pushup => &PUSHUP_RUBRIC,
            ExerciseKind::Pullup | ExerciseKind::Bench => &PULL_PRESS_RUBRIC,
        }
    }
}

/// Velg side per ledd uavhengig – en delvis okkludert venstreside
/// diskvalifiserer ikke analysen hvis høyresiden er synlig.
#[inline]
pub fn pick_side(left_visibility: f64, right_visibility: f64) -> Side {
    if right_visibility > left_visibility {
        Side::Right
    } else {
        Side::Left
    }
}

/// Mest synlige side av et bilateralt ledd, gated på synlighetsterskelen.
/// None = ingen pålitelig avlesning for dette leddet.
pub fn resolve_joint(
    landmarks: &[Landmark],
    pair: BilateralJoint,
    min_visibility: f64,
) -> Option<&Landmark> {
    let left = &landmarks[pair.left.index()];
    let right = &landmarks[pair.right.index()];
    let chosen = match pick_side(left.visibility, right.visibility) {
        Side::Left => left,
        Side::Right => right,
    };
    if chosen.visibility >= min_visibility {
        Some(chosen)
    } else {
        None
    }
}

/// Vinkel for en bilateral triplet, eller None hvis et ledd mangler.
pub fn triplet_angle(
    landmarks: &[Landmark],
    triplet: &[BilateralJoint; 3],
    min_visibility: f64,
) -> Option<f64> {
    let a = resolve_joint(landmarks, triplet[0], min_visibility)?;
    let b = resolve_joint(landmarks, triplet[1], min_visibility)?;
    let c = resolve_joint(landmarks, triplet[2], min_visibility)?;
    Some(joint_angle(a.point(), b.point(), c.point()))
}

/// Den diagnostiske vinkelen for øvelsen, avrundet til 1 desimal.
/// None = "ingen avlesning" (ledd under synlighetsterskel).
pub fn tracked_angle(landmarks: &[Landmark], exercise: ExerciseKind, cfg: &Cfg) -> Option<f64> {
    triplet_angle(landmarks, &exercise.rubric().primary, cfg.visibility_threshold)
        .map(|a| a.round_to(1))
}

/// Sporet vinkel per frame, i original temporal rekkefølge.
pub fn angle_series(frames: &[FramePose], exercise: ExerciseKind, cfg: &Cfg) -> Vec<Option<f64>> {
    let m = metrics::global();
    let mut out = Vec::with_capacity(frames.len());
    for frame in frames {
        let angle = frame
            .as_deref()
            .and_then(|lms| tracked_angle(lms, exercise, cfg));
        if angle.is_none() {
            frames_no_reading_total(m).inc();
        }
        out.push(angle);
    }
    let readings = out.iter().filter(|a| a.is_some()).count();
    debug!(
        "angle_series: {} frames, {} med avlesning ({})",
        out.len(),
        readings,
        exercise
    );
    out
}
