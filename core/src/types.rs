use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Antall pose-landmarks per frame (MediaPipe Pose, indeks 0..32).
pub const JOINT_COUNT: usize = 33;

/// Ett sporet kroppspunkt: normaliserte bildekoordinater + synlighet [0,1].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: Option<f64>,
    #[serde(alias = "v", alias = "vis")]
    pub visibility: f64,
}

/// En frame er enten en full landmark-liste eller "ingen deteksjon".
pub type FramePose = Option<Vec<Landmark>>;

/// MediaPipe Pose-landmarks. Diskriminanten er indeksen i landmark-lista.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(usize)]
pub enum Joint {
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    MouthLeft = 9,
    MouthRight = 10,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
}

impl Joint {
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Venstre/høyre-par for ledd som finnes bilateralt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BilateralJoint {
    pub left: Joint,
    pub right: Joint,
}

impl BilateralJoint {
    pub const SHOULDER: BilateralJoint = BilateralJoint {
        left: Joint::LeftShoulder,
        right: Joint::RightShoulder,
    };
    pub const ELBOW: BilateralJoint = BilateralJoint {
        left: Joint::LeftElbow,
        right: Joint::RightElbow,
    };
    pub const WRIST: BilateralJoint = BilateralJoint {
        left: Joint::LeftWrist,
        right: Joint::RightWrist,
    };
    pub const HIP: BilateralJoint = BilateralJoint {
        left: Joint::LeftHip,
        right: Joint::RightHip,
    };
    pub const KNEE: BilateralJoint = BilateralJoint {
        left: Joint::LeftKnee,
        right: Joint::RightKnee,
    };
    pub const ANKLE: BilateralJoint = BilateralJoint {
        left: Joint::LeftAnkle,
        right: Joint::RightAnkle,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Øvelsesvariantene kjernen kjenner. Lukket sett – ukjente tags avvises
/// ved parsing, de defaultes aldri stille til en annen rubrikk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseKind {
    Squat,
    #[serde(alias = "push-up", alias = "push_up")]
    Pushup,
    #[serde(alias = "pull-up", alias = "pull_up")]
    Pullup,
    #[serde(alias = "bench-press", alias = "benchpress")]
    Bench,
}

impl ExerciseKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ExerciseKind::Squat => "squat",
            ExerciseKind::Pushup => "pushup",
            ExerciseKind::Pullup => "pullup",
            ExerciseKind::Bench => "bench",
        }
    }
}

impl fmt::Display for ExerciseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExerciseKind {
    type Err = AnalyzeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "squat" => Ok(ExerciseKind::Squat),
            "pushup" | "push-up" | "push_up" => Ok(ExerciseKind::Pushup),
            "pullup" | "pull-up" | "pull_up" => Ok(ExerciseKind::Pullup),
            "bench" | "bench-press" | "benchpress" => Ok(ExerciseKind::Bench),
            other => Err(AnalyzeError::UnknownExercise(other.to_string())),
        }
    }
}

/// Grov bevegelsesfase per analysert frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Phase {
    Top,
    Mid,
    Bot,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Top => "TOP",
            Phase::Mid => "MID",
            Phase::Bot => "BOT",
        })
    }
}

/// En lukket repetisjon: BOT-frame → senere TOP-frame. Immutabel etter
/// at telleren har lukket den.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Repetition {
    /// Frame-indeks for siste BOT før lukking.
    pub start: usize,
    /// Frame-indeks for TOP-en som lukket repen.
    pub end: usize,
    pub bottom_angle: f64,
    pub top_angle: f64,
    pub good: bool,
}

/// Sluttproduktet for én video. JSON-vennlig; produseres nøyaktig én gang.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub exercise: String,
    /// Antall frames analysert, skalert med frame-skip oppstrøms.
    pub total_frames_analyzed: u32,
    pub total_reps: u32,
    pub good_reps: u32,
    pub bad_reps: u32,
    pub avg_peak_angle: Option<f64>,
    pub avg_descent_angle: Option<f64>,
    /// Aggregert holdningskvalitet i [0,1]; 0.0 betyr "ingen score beregnet".
    pub form_score: f64,
    pub overall_feedback: String,
}

fn default_visibility_threshold() -> f64 {
    0.7
}
fn default_noise_threshold() -> f64 {
    5.0
}
fn default_good_bottom() -> f64 {
    90.0
}
fn default_good_top() -> f64 {
    160.0
}
fn default_bot_enter() -> f64 {
    100.0
}
fn default_top_enter() -> f64 {
    160.0
}
fn default_score_floor() -> f64 {
    0.1
}
fn default_frame_skip() -> u32 {
    2
}
fn default_feedback_samples() -> usize {
    12
}

/// Tunables for hele pipelinen. Alle terskler har dokumenterte defaults –
/// ingen magiske tall inne i algoritmene.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cfg {
    /// Minste synlighet for at et ledd regnes som pålitelig.
    #[serde(default = "default_visibility_threshold")]
    pub visibility_threshold: f64,
    /// Vinkelendringer under dette (grader) behandles som jitter og holdes.
    #[serde(default = "default_noise_threshold")]
    pub noise_threshold_deg: f64,
    /// God rep: bunnvinkel ≤ denne (tilstrekkelig dybde).
    #[serde(default = "default_good_bottom")]
    pub good_bottom_max_deg: f64,
    /// God rep: toppvinkel ≥ denne (tilstrekkelig ekstensjon).
    #[serde(default = "default_good_top")]
    pub good_top_min_deg: f64,
    /// Fasemaskin: vinkler ≤ denne kan merkes BOT.
    #[serde(default = "default_bot_enter")]
    pub bot_enter_deg: f64,
    /// Fasemaskin: vinkler ≥ denne kan merkes TOP.
    #[serde(default = "default_top_enter")]
    pub top_enter_deg: f64,
    /// Minste form-score når minst én frame ble scoret (0.0 er reservert
    /// for "ingen score").
    #[serde(default = "default_score_floor")]
    pub score_floor: f64,
    /// Hvor mange frames oppstrøms hopper over per analysert frame.
    #[serde(default = "default_frame_skip")]
    pub frame_skip: u32,
    /// Antall vinkler som samples til feedback-generatoren.
    #[serde(default = "default_feedback_samples")]
    pub feedback_samples: usize,
}

impl Default for Cfg {
    fn default() -> Self {
        Self {
            visibility_threshold: default_visibility_threshold(),
            noise_threshold_deg: default_noise_threshold(),
            good_bottom_max_deg: default_good_bottom(),
            good_top_min_deg: default_good_top(),
            bot_enter_deg: default_bot_enter(),
            top_enter_deg: default_top_enter(),
            score_floor: default_score_floor(),
            frame_skip: default_frame_skip(),
            feedback_samples: default_feedback_samples(),
        }
    }
}

/// Strukturelt ugyldig input. Per-frame-avvik (lav synlighet osv.) er IKKE
/// feil – de absorberes lokalt i pipelinen.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("ukjent øvelsestype: {0}")]
    UnknownExercise(String),
    #[error("ugyldig frame {index}: {reason}")]
    MalformedFrame { index: usize, reason: String },
}
