//! JSON-bro mot Python-backenden. Frames kommer som JSON-strenger fra
//! pose-ekstraksjonen; vi parser tolerant (aliaser for legacy-feltnavn),
//! kjører analysen og returnerer sammendraget som JSON.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::wrap_pyfunction;

use serde::Deserialize;
use serde_json::{self as json};
use serde_path_to_error as spte;

use crate::analyze::analyze;
use crate::types::{Cfg, ExerciseKind, FramePose, Landmark};

// Tolerant landmark-inngang: aksepter kortnavn fra eldre klienter.
#[derive(Debug, Clone, Deserialize)]
struct LandmarkIn {
    x: f64,
    y: f64,
    #[serde(default)]
    z: Option<f64>,
    #[serde(default, alias = "v", alias = "vis")]
    visibility: f64,
}

// En frame er enten landmark-lista direkte, et objekt med "landmarks",
// eller null (ingen deteksjon). Prøv objekt først, så liste.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FrameIn {
    Object { landmarks: Vec<LandmarkIn> },
    List(Vec<LandmarkIn>),
}

fn to_core_frames(frames: Vec<Option<FrameIn>>) -> Vec<FramePose> {
    frames
        .into_iter()
        .map(|frame| {
            frame.map(|f| {
                let landmarks = match f {
                    FrameIn::Object { landmarks } => landmarks,
                    FrameIn::List(landmarks) => landmarks,
                };
                landmarks
                    .into_iter()
                    .map(|lm| Landmark {
                        x: lm.x,
                        y: lm.y,
                        z: lm.z,
                        visibility: lm.visibility,
                    })
                    .collect()
            })
        })
        .collect()
}

fn parse_with_path<T: for<'de> Deserialize<'de>>(txt: &str, what: &str) -> PyResult<T> {
    let mut de = json::Deserializer::from_str(txt);
    spte::deserialize(&mut de).map_err(|e| {
        PyErr::new::<PyValueError, _>(format!("{what} parse at {}: {}", e.path(), e))
    })
}

/// Analyser en video fra JSON: `frames_json` er en liste av frames
/// (landmark-lister eller null), `exercise` en av squat/pushup/pullup/bench,
/// `cfg_json` valgfrie tunables (utelatte felt får defaults).
#[pyfunction]
#[pyo3(signature = (frames_json, exercise, cfg_json=None))]
fn analyze_video_json(
    frames_json: &str,
    exercise: &str,
    cfg_json: Option<&str>,
) -> PyResult<String> {
    let kind: ExerciseKind = exercise
        .parse()
        .map_err(|e| PyErr::new::<PyValueError, _>(format!("{e}")))?;

    let frames_in: Vec<Option<FrameIn>> = parse_with_path(frames_json, "frames")?;
    let frames = to_core_frames(frames_in);

    let cfg: Cfg = match cfg_json {
        Some(txt) => parse_with_path(txt, "cfg")?,
        None => Cfg::default(),
    };

    let summary = analyze(&frames, kind, &cfg)
        .map_err(|e| PyErr::new::<PyValueError, _>(format!("{e}")))?;

    serde_json::to_string(&summary)
        .map_err(|e| PyErr::new::<PyValueError, _>(format!("serialisering: {e}")))
}

/// Default-konfigurasjonen som JSON, så backenden kan vise tersklene.
#[pyfunction]
fn default_cfg_json() -> PyResult<String> {
    serde_json::to_string(&Cfg::default())
        .map_err(|e| PyErr::new::<PyValueError, _>(format!("serialisering: {e}")))
}

#[pymodule]
fn formgraph_core(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(analyze_video_json, m)?)?;
    m.add_function(wrap_pyfunction!(default_cfg_json, m)?)?;
    Ok(())
}
