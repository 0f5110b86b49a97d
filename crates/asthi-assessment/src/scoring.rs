use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// The three measurements collected by the sarcopenia questionnaire.
///
/// Values are taken as-is. A field the client failed to parse arrives as
/// `0.0` and simply scores low; nothing here rejects input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BiomarkerInput {
    /// Hand grip strength in kilograms.
    pub grip_strength: f64,
    /// Gait speed over a 4-metre walk, metres per second.
    pub walking_speed: f64,
    /// Self-assessed muscle mass, 1 (very low) to 10 (excellent).
    pub muscle_mass: f64,
}

/// Lower bounds (inclusive) for the top two bands of a measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cutoffs {
    /// At or above this value the measurement scores 3.
    pub high: f64,
    /// At or above this value (and below `high`) it scores 2.
    pub moderate: f64,
}

impl Cutoffs {
    /// Band a value into 1, 2 or 3. NaN falls through to 1.
    pub fn sub_score(&self, value: f64) -> u8 {
        if value >= self.high {
            3
        } else if value >= self.moderate {
            2
        } else {
            1
        }
    }
}

pub const GRIP_STRENGTH: Cutoffs = Cutoffs {
    high: 28.0,
    moderate: 20.0,
};

pub const WALKING_SPEED: Cutoffs = Cutoffs {
    high: 0.8,
    moderate: 0.6,
};

pub const MUSCLE_MASS: Cutoffs = Cutoffs {
    high: 7.0,
    moderate: 4.0,
};

/// Per-measurement sub-scores and their sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SubScores {
    pub grip_strength: u8,
    pub walking_speed: u8,
    pub muscle_mass: u8,
    /// Always in `3..=9`.
    pub total: u8,
}

pub fn score(input: &BiomarkerInput) -> SubScores {
    let grip_strength = GRIP_STRENGTH.sub_score(input.grip_strength);
    let walking_speed = WALKING_SPEED.sub_score(input.walking_speed);
    let muscle_mass = MUSCLE_MASS.sub_score(input.muscle_mass);

    SubScores {
        grip_strength,
        walking_speed,
        muscle_mass,
        total: grip_strength + walking_speed + muscle_mass,
    }
}
