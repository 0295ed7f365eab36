//! Scripted verification session.
//!
//! The session is a ledger caller like any other: it produces payloads and
//! appends them. Scores come from a noisy baseline per mode, and positions
//! come from a circular-orbit model driven by the wall clock. None of it is
//! measurement; it only gives the ledger realistic data to chain.

use std::f64::consts::TAU;

use erl_crypto::canonical::finite;
use erl_ledger::{receipt_types, ContentHash, ReceiptLedger};
use rand::Rng;
use serde_json::{json, Value};
use uuid::Uuid;

pub const TERRESTRIAL_COMPONENTS: [&str; 4] =
    ["gyroscope", "accelerometer", "magnetometer", "clock_oscillator"];
pub const ORBITAL_COMPONENTS: [&str; 3] = ["star_tracker", "radiation_monitor", "thermal_array"];

/// Noisy entropy score around a baseline, compared against a pass threshold.
#[derive(Clone, Copy, Debug)]
pub struct EntropyModel {
    pub mode: &'static str,
    pub baseline: f64,
    pub spread: f64,
    pub threshold: f64,
}

pub const TERRESTRIAL: EntropyModel = EntropyModel {
    mode: "terrestrial",
    baseline: 0.88,
    spread: 0.08,
    threshold: 0.80,
};

// Radiation and thermal cycling widen the spread in orbit.
pub const ORBITAL: EntropyModel = EntropyModel {
    mode: "orbital",
    baseline: 0.84,
    spread: 0.12,
    threshold: 0.75,
};

impl EntropyModel {
    /// Score in `[0, 1]`, rounded to four decimals.
    pub fn score<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let raw = self.baseline + rng.gen_range(-self.spread..=self.spread);
        round4(raw.clamp(0.0, 1.0))
    }

    pub fn passes(&self, score: f64) -> bool {
        score >= self.threshold
    }
}

const ORBITAL_PERIOD_S: f64 = 5_561.0;
const INCLINATION_DEG: f64 = 51.64;
const MEAN_ALTITUDE_KM: f64 = 408.0;
const ALTITUDE_SWING_KM: f64 = 3.5;
const SIDEREAL_DAY_S: f64 = 86_164.1;
const SPEED_OF_LIGHT_KM_S: f64 = 299_792.458;
const GROUND_PROCESSING_MS: f64 = 12.0;

/// Simulated orbital position at an instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ephemeris {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub altitude_km: f64,
    /// Round trip to a ground station directly below, plus processing.
    pub ground_latency_ms: f64,
}

impl Ephemeris {
    pub fn at(unix_ms: u64) -> Self {
        let t = unix_ms as f64 / 1_000.0;
        let phase = (t % ORBITAL_PERIOD_S) / ORBITAL_PERIOD_S * TAU;

        let latitude_deg = INCLINATION_DEG * phase.sin();
        let orbits = t / ORBITAL_PERIOD_S * 360.0;
        let earth = t / SIDEREAL_DAY_S * 360.0;
        let longitude_deg = (orbits - earth).rem_euclid(360.0) - 180.0;
        let altitude_km = MEAN_ALTITUDE_KM + ALTITUDE_SWING_KM * (2.0 * phase).sin();
        let ground_latency_ms =
            2.0 * altitude_km / SPEED_OF_LIGHT_KM_S * 1_000.0 + GROUND_PROCESSING_MS;

        Self {
            latitude_deg: round4(latitude_deg),
            longitude_deg: round4(longitude_deg),
            altitude_km: round4(altitude_km),
            ground_latency_ms: round4(ground_latency_ms),
        }
    }
}

/// What a finished session produced.
#[derive(Clone, Debug)]
pub struct SessionSummary {
    pub session_id: Uuid,
    pub passed: usize,
    pub failed: usize,
    pub anchor_root: ContentHash,
}

/// Run the full session against `ledger`.
pub fn run_session<R: Rng + ?Sized>(
    ledger: &ReceiptLedger,
    rng: &mut R,
    now_ms: u64,
) -> anyhow::Result<SessionSummary> {
    let session_id = Uuid::now_v7();
    let (mut passed, mut failed) = (0, 0);

    ledger.append(
        receipt_types::DEMO_INIT,
        json!({
            "session_id": session_id.to_string(),
            "tenant_id": ledger.tenant_id().as_str(),
            "hash_algorithms": ledger.hasher().algorithms(),
            "started_at_ms": now_ms,
        }),
    )?;

    let mut verify = |model: &EntropyModel,
                      receipt_type: &str,
                      component: &str|
     -> anyhow::Result<()> {
        let score = model.score(&mut *rng);
        let ok = model.passes(score);
        if ok {
            passed += 1;
        } else {
            failed += 1;
        }
        ledger.append(
            receipt_type,
            json!({
                "component": component,
                "mode": model.mode,
                "entropy_score": finite(score)?,
                "threshold": finite(model.threshold)?,
                "passed": ok,
            }),
        )?;
        Ok(())
    };

    for component in TERRESTRIAL_COMPONENTS {
        verify(&TERRESTRIAL, receipt_types::TERRESTRIAL_VERIFICATION, component)?;
    }

    ledger.append(
        receipt_types::MODE_SWITCH,
        json!({ "from": TERRESTRIAL.mode, "to": ORBITAL.mode }),
    )?;

    for component in ORBITAL_COMPONENTS {
        verify(&ORBITAL, receipt_types::ORBITAL_VERIFICATION, component)?;
    }

    let position = Ephemeris::at(now_ms);
    ledger.append(
        receipt_types::LOCATION_PROOF,
        json!({
            "latitude_deg": num(position.latitude_deg)?,
            "longitude_deg": num(position.longitude_deg)?,
            "altitude_km": num(position.altitude_km)?,
            "ground_latency_ms": num(position.ground_latency_ms)?,
            "observed_at_ms": now_ms,
        }),
    )?;

    ledger.anchor()?;
    let anchor_root = ledger
        .anchors()
        .pop()
        .map(|anchor| anchor.root)
        .ok_or_else(|| anyhow::anyhow!("anchor was not recorded"))?;

    ledger.append(
        receipt_types::ARTIFACT_GENERATION,
        json!({
            "artifact": "audit_report",
            "merkle_root": anchor_root.as_str(),
            "receipts_covered": ledger.len(),
            "passed": passed,
            "failed": failed,
        }),
    )?;

    ledger.append(
        receipt_types::DEMO_COMPLETE,
        json!({
            "session_id": session_id.to_string(),
            "verifications": passed + failed,
        }),
    )?;

    Ok(SessionSummary {
        session_id,
        passed,
        failed,
        anchor_root,
    })
}

fn num(value: f64) -> anyhow::Result<Value> {
    Ok(finite(value)?)
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
