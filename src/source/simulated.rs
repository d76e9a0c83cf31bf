//! ==============================================================================
//! source/simulated.rs - built-in synthetic wearable (--demo)
//! ==============================================================================
//!
//! purpose:
//!     lets the dashboard run without the health server. every fetch advances
//!     a synthetic wearable by one sample and returns the most recent window,
//!     oldest-first, the same shape the real endpoint serves.
//!
//! sample model:
//!     - heart rate 60-120 bpm, temperature 36.5-38.5 C, hrv 25-80
//!     - accelerometer near 1g, with a periodic impact and a rarer freefall
//!     - values are pure functions of the sample index (reproducible)
//!
//! scoring (mirrors what the server stores with each sample):
//!     stress = clamp(0.6*hr - 0.4*hrv + 0.3*(temp - 36.5)*10, 0, 50)
//!     alert precedence: freefall, impact, high hr, fever, low hrv;
//!     a stress above 25 overrides all of them.
//!
//! ==============================================================================

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Local, NaiveDateTime};
use std::collections::VecDeque;
use tokio::sync::Mutex;

use super::ReadingSource;
use crate::domain::Reading;
use crate::error::FetchError;

/// the server answers with its 20 most recent records
pub const WINDOW: usize = 20;

/// seconds between synthetic samples (the wearable pushes every 2s)
const SAMPLE_SPACING_SECS: i64 = 2;

const IMPACT_EVERY: u64 = 20;
const FREEFALL_EVERY: u64 = 50;

const STRESS_MAX: f64 = 50.0;
const PREDICTED_STRESS_THRESHOLD: f64 = 25.0;

pub struct SimulatedSource {
    start: NaiveDateTime,
    state: Mutex<SimState>,
}

#[derive(Default)]
struct SimState {
    next_index: u64,
    window: VecDeque<Reading>,
}

impl SimulatedSource {
    pub fn new(start: NaiveDateTime) -> Self {
        Self {
            start,
            state: Mutex::new(SimState::default()),
        }
    }

    pub fn starting_now() -> Self {
        Self::new(Local::now().naive_local())
    }

    /// the reading for sample `index`
    pub fn sample(&self, index: u64) -> Reading {
        let t = index as f64;
        let heart_rate = (90.0 + 30.0 * (t * 0.37).sin()).round();
        let temperature = round_to(37.5 + (t * 0.11).sin(), 1);
        let hrv = round_to(52.5 + 27.5 * (t * 0.23 + 1.0).sin(), 1);
        let accel = accel_for(index);

        let (stress, alert) = assess(heart_rate, temperature, hrv, accel);
        let at = self.start + ChronoDuration::seconds(index as i64 * SAMPLE_SPACING_SECS);

        Reading {
            timestamp: at.format("%Y-%m-%d %H:%M:%S").to_string(),
            heart_rate,
            temperature: Some(temperature),
            hrv,
            stress_score: Some(round_to(stress, 2)),
            alert: Some(alert),
        }
    }
}

#[async_trait]
impl ReadingSource for SimulatedSource {
    async fn fetch(&self) -> Result<Vec<Reading>, FetchError> {
        let mut state = self.state.lock().await;
        let reading = self.sample(state.next_index);
        state.next_index += 1;

        if state.window.len() == WINDOW {
            state.window.pop_front();
        }
        state.window.push_back(reading);

        Ok(state.window.iter().cloned().collect())
    }

    fn describe(&self) -> String {
        "simulated wearable".to_string()
    }
}

/// derive the stress score and alert label for one sample
pub fn assess(heart_rate: f64, temperature: f64, hrv: f64, accel: (f64, f64, f64)) -> (f64, String) {
    let (ax, ay, az) = accel;
    let total_accel = (ax * ax + ay * ay + az * az).sqrt();

    let mut alert = if total_accel < 0.3 {
        "Possible Fall (Freefall)"
    } else if total_accel > 3.0 {
        "Fall Detected (Impact)"
    } else if heart_rate > 110.0 {
        "High Heart Rate"
    } else if temperature > 38.0 {
        "Fever"
    } else if hrv < 35.0 {
        "High Stress"
    } else {
        ""
    };

    let stress = (0.6 * heart_rate - 0.4 * hrv + 0.3 * (temperature - 36.5) * 10.0)
        .clamp(0.0, STRESS_MAX);
    if stress > PREDICTED_STRESS_THRESHOLD {
        alert = "Predicted High Stress";
    }

    (stress, alert.to_string())
}

fn accel_for(index: u64) -> (f64, f64, f64) {
    if index % FREEFALL_EVERY == FREEFALL_EVERY - 1 {
        return (0.05, 0.05, 0.1);
    }
    if index % IMPACT_EVERY == IMPACT_EVERY - 1 {
        return (2.5, -2.5, 2.0);
    }
    let t = index as f64;
    (
        round_to(0.2 * (t * 0.7).sin(), 2),
        round_to(0.2 * (t * 0.9).cos(), 2),
        round_to(1.0 + 0.2 * (t * 0.5).sin(), 2),
    )
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
