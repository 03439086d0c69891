//! Optimization criteria applied during edge relaxation.
//!
//! A [`Criterion`] inflates an edge's weight by a fixed fraction when the
//! engine relaxes it. The function is pure and is evaluated for every
//! relaxation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};

/// Supported optimization criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    /// Raw edge weight.
    #[default]
    Plain,
    /// Fuel-style cost: adds 1.5x the edge weight.
    Cost,
    /// Road-type time: adds 0.5x the edge weight.
    Time,
}

/// How unrecognised criterion names are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriterionParsing {
    /// Unknown names behave as [`Criterion::Plain`].
    #[default]
    Lenient,
    /// Unknown names are rejected with [`Error::UnknownCriterion`].
    Strict,
}

impl Criterion {
    /// Additional cost charged on top of the edge weight.
    pub fn extra_cost(self, weight: f64) -> f64 {
        match self {
            Criterion::Plain => 0.0,
            Criterion::Cost => 1.5 * weight,
            Criterion::Time => 0.5 * weight,
        }
    }

    /// Total cost of traversing an edge of the given weight.
    pub fn relaxed_cost(self, weight: f64) -> f64 {
        weight + self.extra_cost(weight)
    }

    /// Resolve a criterion name, falling back to [`Criterion::Plain`] for
    /// anything unrecognised. Not every caller validates the name up front,
    /// so the fallback is kept and logged rather than treated as an error.
    pub fn from_name_lenient(name: &str) -> Self {
        match name.parse() {
            Ok(criterion) => criterion,
            Err(_) => {
                warn!(criterion = name, "unknown optimization criterion; using plain");
                Criterion::Plain
            }
        }
    }

    /// Resolve a criterion name using the requested parsing mode.
    pub fn resolve(name: &str, parsing: CriterionParsing) -> Result<Self> {
        match parsing {
            CriterionParsing::Lenient => Ok(Self::from_name_lenient(name)),
            CriterionParsing::Strict => name.parse(),
        }
    }
}

impl FromStr for Criterion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plain" => Ok(Criterion::Plain),
            "cost" => Ok(Criterion::Cost),
            "time" => Ok(Criterion::Time),
            _ => Err(Error::UnknownCriterion {
                name: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Criterion::Plain => "plain",
            Criterion::Cost => "cost",
            Criterion::Time => "time",
        };
        f.write_str(value)
    }
}
