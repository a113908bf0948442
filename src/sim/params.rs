//! Flat label → value record of the realized parameters of a run.

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::rates::{RateParameters, Rates};

/// Label of the caller-supplied reproduction number.
pub const R0_LABEL: &str = "Basic Reproduction number (R0)";

/// A rate symbol, its transition description, and the field it reads.
struct RateLabel {
    symbol: &'static str,
    description: &'static str,
    value: fn(&Rates) -> f64,
}

impl RateLabel {
    fn annual(&self) -> String {
        format!("{} ({}) annual", self.symbol, self.description)
    }

    fn daily(&self) -> String {
        format!("{} ({}) daily", self.symbol, self.description)
    }
}

/// Record order of the rate entries.
const RATE_LABELS: [RateLabel; 6] = [
    RateLabel {
        symbol: "s",
        description: "Recovered to Susceptible",
        value: |r| r.s,
    },
    RateLabel {
        symbol: "i",
        description: "Susceptible to Infection",
        value: |r| r.i,
    },
    RateLabel {
        symbol: "c",
        description: "Infected to Clinical",
        value: |r| r.c,
    },
    RateLabel {
        symbol: "r1",
        description: "Infected to Recovered",
        value: |r| r.r1,
    },
    RateLabel {
        symbol: "r2",
        description: "Clinical to Recovered",
        value: |r| r.r2,
    },
    RateLabel {
        symbol: "d",
        description: "Clinical to Death",
        value: |r| r.d,
    },
];

/// Number of keys every record carries: R0 plus an annual/daily pair per rate.
pub const PARAMETER_COUNT: usize = 1 + 2 * RATE_LABELS.len();

/// One labelled parameter value.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterEntry {
    pub label: String,
    pub value: f64,
}

/// Realized parameters keyed by stable, human-readable labels.
///
/// Serializes as a JSON object in record order.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterRecord {
    entries: Vec<ParameterEntry>,
}

impl ParameterRecord {
    /// Builds the full 13-key record from a run's rate parameters.
    pub fn from_rates(params: &RateParameters) -> Self {
        let mut entries = Vec::with_capacity(PARAMETER_COUNT);
        entries.push(ParameterEntry {
            label: R0_LABEL.to_string(),
            value: params.basic_reproduction_number,
        });
        for rate in &RATE_LABELS {
            entries.push(ParameterEntry {
                label: rate.annual(),
                value: (rate.value)(&params.annual),
            });
            entries.push(ParameterEntry {
                label: rate.daily(),
                value: (rate.value)(&params.daily),
            });
        }
        Self { entries }
    }

    /// Every label a record contains, in order.
    pub fn labels() -> Vec<String> {
        std::iter::once(R0_LABEL.to_string())
            .chain(
                RATE_LABELS
                    .iter()
                    .flat_map(|rate| [rate.annual(), rate.daily()]),
            )
            .collect()
    }

    pub fn get(&self, label: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.label == label)
            .map(|e| e.value)
    }

    pub fn entries(&self) -> &[ParameterEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for ParameterRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for e in &self.entries {
            map.serialize_entry(&e.label, &e.value)?;
        }
        map.end()
    }
}
