//! Per-run transition rates drawn from truncated distributions.
//!
//! Each run draws the five free annual rates once, derives the infection
//! rate from the target R0, and converts everything to daily rates. The
//! rates then stay fixed for the whole trajectory.

use rand::Rng;
use rand_distr::{Distribution, Exp1};
use serde::Serialize;
use tracing::{debug, warn};

/// Days per year used to convert annual rates to daily ones.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Scales `R0 * outflow ratio` into an annual infection rate.
pub const INFECTION_CALIBRATION: f64 = 0.1;

/// Upper bound on redraws for one truncated sample.
pub const MAX_REJECTION_DRAWS: usize = 10_000;

/// Underlying distribution of a truncated rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RateDistribution {
    /// Exponential with the given mean.
    Exponential { mean: f64 },
    /// Gamma with integer shape `k` (Erlang) and scale `theta`.
    Erlang { shape: u32, scale: f64 },
}

impl Distribution<f64> for RateDistribution {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match *self {
            Self::Exponential { mean } => {
                let x: f64 = rng.sample(Exp1);
                mean * x
            }
            Self::Erlang { shape, scale } => {
                let sum: f64 = (0..shape).map(|_| rng.sample::<f64, _>(Exp1)).sum();
                scale * sum
            }
        }
    }
}

/// A distribution truncated to `[low, high]` by rejection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TruncatedRate {
    pub low: f64,
    pub high: f64,
    pub distribution: RateDistribution,
}

/// Recovered → Susceptible.
pub const S_RATE: TruncatedRate = TruncatedRate {
    low: 0.05,
    high: 0.15,
    distribution: RateDistribution::Exponential { mean: 0.1 },
};

/// Infected → Clinical.
pub const C_RATE: TruncatedRate = TruncatedRate {
    low: 0.01,
    high: 0.05,
    distribution: RateDistribution::Erlang {
        shape: 2,
        scale: 0.01,
    },
};

/// Infected → Recovered.
pub const R1_RATE: TruncatedRate = TruncatedRate {
    low: 0.1,
    high: 0.3,
    distribution: RateDistribution::Exponential { mean: 0.2 },
};

/// Clinical → Recovered.
pub const R2_RATE: TruncatedRate = TruncatedRate {
    low: 0.2,
    high: 1.5,
    distribution: RateDistribution::Exponential { mean: 1.0 },
};

/// Clinical → Death.
pub const D_RATE: TruncatedRate = TruncatedRate {
    low: 0.05,
    high: 0.1,
    distribution: RateDistribution::Exponential { mean: 0.1 },
};

impl TruncatedRate {
    /// Draws one value inside `[low, high]`.
    ///
    /// Redraws up to [`MAX_REJECTION_DRAWS`] times; if every candidate falls
    /// outside the bounds the last one is clamped in.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let mut candidate = f64::NAN;
        for _ in 0..MAX_REJECTION_DRAWS {
            candidate = self.distribution.sample(rng);
            if (self.low..=self.high).contains(&candidate) {
                return candidate;
            }
        }
        warn!(
            low = self.low,
            high = self.high,
            candidate,
            "rejection sampling exhausted, clamping last draw"
        );
        if candidate.is_nan() {
            self.low
        } else {
            candidate.clamp(self.low, self.high)
        }
    }
}

/// Transition rates for one run, in a single time unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rates {
    /// Recovered → Susceptible.
    pub s: f64,
    /// Susceptible → Infected.
    pub i: f64,
    /// Infected → Clinical.
    pub c: f64,
    /// Infected → Recovered.
    pub r1: f64,
    /// Clinical → Recovered.
    pub r2: f64,
    /// Clinical → Death.
    pub d: f64,
}

impl Rates {
    /// Divides every rate by [`DAYS_PER_YEAR`].
    pub fn to_daily(&self) -> Self {
        Self {
            s: self.s / DAYS_PER_YEAR,
            i: self.i / DAYS_PER_YEAR,
            c: self.c / DAYS_PER_YEAR,
            r1: self.r1 / DAYS_PER_YEAR,
            r2: self.r2 / DAYS_PER_YEAR,
            d: self.d / DAYS_PER_YEAR,
        }
    }
}

/// Annual infection rate implied by R0 and the other annual rates.
///
/// `i = R0 * (c + r1) * (r2 + d) / c * 0.1`. `c` is bounded below by the
/// truncation of [`C_RATE`], so the division is safe for drawn rates.
pub fn infection_rate(basic_reproduction_number: f64, c: f64, r1: f64, r2: f64, d: f64) -> f64 {
    basic_reproduction_number * (c + r1) * (r2 + d) / c * INFECTION_CALIBRATION
}

/// Realized parameters of one run: annual draws and their daily form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RateParameters {
    pub basic_reproduction_number: f64,
    pub annual: Rates,
    pub daily: Rates,
}

impl RateParameters {
    /// Draws `s`, `c`, `r1`, `r2`, `d` in that order and derives `i`.
    pub fn draw<R: Rng + ?Sized>(basic_reproduction_number: f64, rng: &mut R) -> Self {
        let s = S_RATE.sample(rng);
        let c = C_RATE.sample(rng);
        let r1 = R1_RATE.sample(rng);
        let r2 = R2_RATE.sample(rng);
        let d = D_RATE.sample(rng);
        let i = infection_rate(basic_reproduction_number, c, r1, r2, d);

        let params = Self::from_annual(basic_reproduction_number, Rates { s, i, c, r1, r2, d });
        debug!(annual = ?params.annual, "drew annual rates");
        params
    }

    /// Wraps fixed annual rates, computing the daily form.
    pub fn from_annual(basic_reproduction_number: f64, annual: Rates) -> Self {
        Self {
            basic_reproduction_number,
            annual,
            daily: annual.to_daily(),
        }
    }
}
