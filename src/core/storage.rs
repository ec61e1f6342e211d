//! Decimal (1000-based) digital storage conversion.
//!
//! The `to_*` functions keep the exact chain of scalar multiplications the
//! library has always used (e.g. KB→TB goes through KB→GB), so results match
//! bit-for-bit at `f64` precision. `DigitalStorage::convert` is the
//! closed-form equivalent for fractional inputs.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DigitalStorage {
    KB,
    MB,
    GB,
    TB,
}

impl DigitalStorage {
    pub fn exponent(self) -> i32 {
        match self {
            DigitalStorage::KB => 0,
            DigitalStorage::MB => 1,
            DigitalStorage::GB => 2,
            DigitalStorage::TB => 3,
        }
    }

    /// `value * 1000^(exponent(from) - exponent(to))`.
    pub fn convert(value: f64, from: DigitalStorage, to: DigitalStorage) -> f64 {
        value * 1000f64.powi(from.exponent() - to.exponent())
    }
}

pub fn to_kb(number: i32, from: DigitalStorage) -> f64 {
    let n = i64::from(number);
    match from {
        DigitalStorage::MB => (n * 1_000) as f64,
        DigitalStorage::GB => (n * 1_000_000) as f64,
        DigitalStorage::TB => (n * 1_000_000_000) as f64,
        DigitalStorage::KB => n as f64,
    }
}

pub fn to_mb(number: i32, from: DigitalStorage) -> f64 {
    let n = i64::from(number);
    match from {
        DigitalStorage::KB => number as f64 * 0.001,
        DigitalStorage::GB => (n * 1_000) as f64,
        DigitalStorage::TB => (n * 1_000_000) as f64,
        DigitalStorage::MB => n as f64,
    }
}

pub fn to_gb(number: i32, from: DigitalStorage) -> f64 {
    match from {
        DigitalStorage::KB => to_mb(number, DigitalStorage::KB) * 0.001,
        DigitalStorage::MB => number as f64 * 0.001,
        DigitalStorage::TB => (i64::from(number) * 1_000) as f64,
        DigitalStorage::GB => number as f64,
    }
}

pub fn to_tb(number: i32, from: DigitalStorage) -> f64 {
    match from {
        DigitalStorage::KB => to_gb(number, DigitalStorage::KB) * 0.001,
        DigitalStorage::MB => to_gb(number, DigitalStorage::MB) * 0.001,
        DigitalStorage::GB => number as f64 * 0.001,
        DigitalStorage::TB => number as f64,
    }
}
