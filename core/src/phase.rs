//! Online fasemaskin: skalar vinkelserie → {TOP, MID, BOT} per frame.
//!
//! Én gjennomgang, O(1) minne. Ingen lookahead – prisen er at et
//! retningsskifte kan kreve en ettstegs retroaktiv korreksjon av forrige
//! label (`Step::fix_previous`), aldri mer enn én frame bakover.

use crate::types::{Cfg, Phase};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Neutral,
    Rising,
    Falling,
}

/// Resultatet av ett steg: label for denne framen, pluss eventuell
/// korreksjon av den forrige.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub label: Phase,
    pub fix_previous: Option<Phase>,
}

#[derive(Debug)]
pub struct PhaseTracker {
    noise_threshold: f64,
    top_enter: f64,
    bot_enter: f64,
    /// Referansevinkel for deltaberegning. Oppdateres IKKE ved jitter-hold,
    /// slik at langsom drift akkumulerer og til slutt registreres.
    last_angle: Option<f64>,
    last_label: Option<Phase>,
    direction: Direction,
}

impl PhaseTracker {
    pub fn new(cfg: &Cfg) -> Self {
        Self {
            noise_threshold: cfg.noise_threshold_deg,
            top_enter: cfg.top_enter_deg,
            bot_enter: cfg.bot_enter_deg,
            last_angle: None,
            last_label: None,
            direction: Direction::Neutral,
        }
    }

    /// Første avlesning: absolutte terskler, ingen retning etablert ennå.
    fn seed_label(&self, angle: f64) -> Phase {
        if angle >= self.top_enter {
            Phase::Top
        } else if angle <= self.bot_enter {
            Phase::Bot
        } else {
            Phase::Mid
        }
    }

    /// Ett steg TOP↔MID↔BOT i bevegelsesretningen; ytterpunkt nås bare
    /// forbi sin inngangsterskel.
    fn next_label(&self, prev: Phase, direction: Direction, angle: f64) -> Phase {
        match direction {
            Direction::Rising => match prev {
                Phase::Top => Phase::Top,
                Phase::Mid | Phase::Bot => {
                    if angle >= self.top_enter {
                        Phase::Top
                    } else {
                        Phase::Mid
                    }
                }
            },
            Direction::Falling => match prev {
                Phase::Bot => Phase::Bot,
                Phase::Mid | Phase::Top => {
                    if angle <= self.bot_enter {
                        Phase::Bot
                    } else {
                        Phase::Mid
                    }
                }
            },
            Direction::Neutral => Phase::Mid,
        }
    }

    /// Konsumer neste vinkel. "Ingen avlesning" holder forrige label og
    /// får aldri injisere et retningsskifte.
    pub fn advance(&mut self, angle: Option<f64>) -> Step {
        let a = match angle {
            Some(a) => a,
            None => {
                return Step {
                    label: self.last_label.unwrap_or(Phase::Mid),
                    fix_previous: None,
                }
            }
        };

        let (prev_label, prev_angle) = match (self.last_label, self.last_angle) {
            (Some(l), Some(pa)) => (l, pa),
            _ => {
                let label = self.seed_label(a);
                self.last_label = Some(label);
                self.last_angle = Some(a);
                return Step {
                    label,
                    fix_previous: None,
                };
            }
        };

        let delta = a - prev_angle;
        if delta.abs() < self.noise_threshold {
            // Jitter: hold label, ikke flytt referansen.
            return Step {
                label: prev_label,
                fix_previous: None,
            };
        }

        let direction = if delta > 0.0 {
            Direction::Rising
        } else {
            Direction::Falling
        };

        // Retningsskifte der forrige label motsier ytterpunktet vi nettopp
        // passerte (stiger ut av en TOP / faller ut av en BOT) → forrige
        // label var tentativ, rett den til MID.
        let reversal = matches!(
            (self.direction, direction),
            (Direction::Rising, Direction::Falling) | (Direction::Falling, Direction::Rising)
        );
        let fix_previous = if reversal {
            match (direction, prev_label) {
                (Direction::Rising, Phase::Top) | (Direction::Falling, Phase::Bot) => {
                    Some(Phase::Mid)
                }
                _ => None,
            }
        } else {
            None
        };

        let effective_prev = fix_previous.unwrap_or(prev_label);
        let label = self.next_label(effective_prev, direction, a);

        self.last_angle = Some(a);
        self.direction = direction;
        self.last_label = Some(label);

        Step {
            label,
            fix_previous,
        }
    }
}

/// Merk en hel serie. Retroaktive korreksjoner skrives inn i utdataene
/// før neste label appendes (2-slots buffer, aldri en flerframes rewrite).
pub fn label_series(angles: &[Option<f64>], cfg: &Cfg) -> Vec<Phase> {
    let mut tracker = PhaseTracker::new(cfg);
    let mut out = Vec::with_capacity(angles.len());
    for angle in angles {
        let step = tracker.advance(*angle);
        if let Some(fix) = step.fix_previous {
            if let Some(last) = out.last_mut() {
                *last = fix;
            }
        }
        out.push(step.label);
    }
    out
}
