//! FormGraph core: fra per-frame pose-landmarks til repetisjonstelling og
//! form-score. Kjernen er ren og sekvensiell; video, pose-ekstraksjon og
//! lagring ligger utenfor.

pub mod analyze;
pub mod angles;
pub mod cli;
pub mod extractor;
pub mod feedback;
pub mod feedback_api;
pub mod metrics;
pub mod phase;
pub mod reps;
pub mod scoring;
pub mod storage;
pub mod summary;
pub mod types;

#[cfg(feature = "python")]
pub mod py;

pub use analyze::{analyze, analyze_with_feedback};
pub use angles::{joint_angle, Point2, RoundTo};
pub use types::{
    AnalysisSummary, AnalyzeError, Cfg, ExerciseKind, FramePose, Landmark, Phase, Repetition,
};
