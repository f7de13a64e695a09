//! Named matrices from the lock demos and seeded random matrices.
//!
//! Random matrices are reproducible: the same `seed` always yields the same
//! entries, so a lock can be shared or replayed by its seed alone.

use std::fmt;
use std::str::FromStr;

use nalgebra::Matrix2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use crate::eigen::mat2;

/// Built-in matrices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Preset {
    Identity,
    /// Approximate 30° rotation (entries rounded to two decimals).
    Rotation30,
    Rotation90,
    Scaling,
    Shear,
    /// `[[2, 1], [1, 2]]`, the single-lock page's default.
    Symmetric,
    LockA,
    LockB,
    LockC,
    LockD,
}

impl Preset {
    pub const ALL: [Preset; 10] = [
        Preset::Identity,
        Preset::Rotation30,
        Preset::Rotation90,
        Preset::Scaling,
        Preset::Shear,
        Preset::Symmetric,
        Preset::LockA,
        Preset::LockB,
        Preset::LockC,
        Preset::LockD,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Preset::Identity => "identity",
            Preset::Rotation30 => "rotation30",
            Preset::Rotation90 => "rotation90",
            Preset::Scaling => "scaling",
            Preset::Shear => "shear",
            Preset::Symmetric => "symmetric",
            Preset::LockA => "lock-a",
            Preset::LockB => "lock-b",
            Preset::LockC => "lock-c",
            Preset::LockD => "lock-d",
        }
    }

    pub fn matrix(self) -> Matrix2<f64> {
        match self {
            Preset::Identity => mat2(1.0, 0.0, 0.0, 1.0),
            Preset::Rotation30 | Preset::LockB => mat2(0.87, -0.5, 0.5, 0.87),
            Preset::Rotation90 => mat2(0.0, -1.0, 1.0, 0.0),
            Preset::Scaling => mat2(2.0, 0.0, 0.0, 1.5),
            Preset::Shear => mat2(1.0, 0.5, 0.0, 1.0),
            Preset::Symmetric => mat2(2.0, 1.0, 1.0, 2.0),
            Preset::LockA => mat2(2.0, 0.0, 0.0, 3.0),
            Preset::LockC => mat2(1.0, 0.5, 0.5, 1.0),
            Preset::LockD => mat2(3.0, 1.0, 1.0, 2.0),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unknown preset '{0}'")]
pub struct UnknownPreset(pub String);

impl FromStr for Preset {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Preset::ALL
            .into_iter()
            .find(|p| p.name() == wanted)
            .ok_or_else(|| UnknownPreset(s.to_string()))
    }
}

/// Matrix with entries uniform in `[-2, 2)`, reproducible from `seed`.
pub fn random_matrix(seed: u64) -> Matrix2<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut entry = || rng.gen_range(-2.0..2.0);
    mat2(entry(), entry(), entry(), entry())
}
