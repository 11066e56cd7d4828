//! Selection controller — owns the current (fund type, country) pair.
//!
//! Every accepted change bumps a generation counter and publishes an immutable
//! [`SelectionSnapshot`] to subscribers. Recomputation only ever sees
//! snapshots, never the controller itself.

use serde::Serialize;
use std::sync::mpsc::{self, Receiver, Sender};
use thiserror::Error;

use fundstats_core::Dataset;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub fund_type: String,
    pub country: String,
}

/// How much of the dashboard a change invalidates. Charts are keyed on the
/// country only, so a fund-type change leaves them valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RecomputeScope {
    Full,
    MetricsOnly,
}

impl RecomputeScope {
    /// The wider of the two scopes.
    pub fn union(self, other: RecomputeScope) -> RecomputeScope {
        if self == RecomputeScope::Full || other == RecomputeScope::Full {
            RecomputeScope::Full
        } else {
            RecomputeScope::MetricsOnly
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionSnapshot {
    pub generation: u64,
    pub selection: Selection,
    pub scope: RecomputeScope,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionChange {
    FundType(String),
    Country(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("dataset has no {0} values to select from")]
    EmptyDomain(&'static str),

    #[error("unknown fund type '{0}'")]
    UnknownFundType(String),
}

pub struct SelectionController {
    fund_types: Vec<String>,
    countries: Vec<String>,
    current: Selection,
    generation: u64,
    subscribers: Vec<Sender<SelectionSnapshot>>,
}

impl SelectionController {
    /// Start from the first value of each domain.
    pub fn new(dataset: &Dataset) -> Result<Self, SelectionError> {
        Self::with_defaults(dataset, None, None)
    }

    /// Start from the given defaults where they are in the domain, else from
    /// the first value of each domain.
    pub fn with_defaults(
        dataset: &Dataset,
        fund_type: Option<&str>,
        country: Option<&str>,
    ) -> Result<Self, SelectionError> {
        let fund_types = dataset.fund_types().to_vec();
        let countries = dataset.countries().to_vec();

        let pick = |domain: &[String], wanted: Option<&str>, name: &'static str| {
            if let Some(w) = wanted {
                if domain.iter().any(|v| v == w) {
                    return Ok(w.to_string());
                }
                log::warn!("selection: default {name} '{w}' not in data, using first value");
            }
            domain.first().cloned().ok_or(SelectionError::EmptyDomain(name))
        };
        let current = Selection {
            fund_type: pick(&fund_types, fund_type, "fund type")?,
            country: pick(&countries, country, "country")?,
        };

        Ok(Self {
            fund_types,
            countries,
            current,
            generation: 0,
            subscribers: Vec::new(),
        })
    }

    pub fn fund_types(&self) -> &[String] {
        &self.fund_types
    }

    pub fn countries(&self) -> &[String] {
        &self.countries
    }

    pub fn current(&self) -> &Selection {
        &self.current
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The current selection with a full-scope hint, for the initial render.
    pub fn snapshot(&self) -> SelectionSnapshot {
        SelectionSnapshot {
            generation: self.generation,
            selection: self.current.clone(),
            scope: RecomputeScope::Full,
        }
    }

    /// Receive every snapshot published from now on.
    pub fn subscribe(&mut self) -> Receiver<SelectionSnapshot> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    /// Apply a change. Re-selecting the current value is a no-op and returns
    /// `None`. Fund types must come from the domain; a country outside the
    /// domain is accepted and simply yields empty charts.
    pub fn apply(
        &mut self,
        change: SelectionChange,
    ) -> Result<Option<SelectionSnapshot>, SelectionError> {
        let scope = match change {
            SelectionChange::FundType(value) => {
                if !self.fund_types.contains(&value) {
                    return Err(SelectionError::UnknownFundType(value));
                }
                if value == self.current.fund_type {
                    return Ok(None);
                }
                self.current.fund_type = value;
                RecomputeScope::MetricsOnly
            }
            SelectionChange::Country(value) => {
                if value == self.current.country {
                    return Ok(None);
                }
                if !self.countries.contains(&value) {
                    log::debug!("selection: country '{value}' has no NAV rows");
                }
                self.current.country = value;
                RecomputeScope::Full
            }
        };

        self.generation += 1;
        let snapshot = SelectionSnapshot {
            generation: self.generation,
            selection: self.current.clone(),
            scope,
        };
        log::info!(
            "selection: gen {} -> {} / {}",
            snapshot.generation,
            snapshot.selection.fund_type,
            snapshot.selection.country
        );
        self.publish(&snapshot);
        Ok(Some(snapshot))
    }

    /// Step through the fund-type domain, wrapping at both ends.
    pub fn cycle_fund_type(&mut self, step: isize) -> Option<SelectionSnapshot> {
        let next = cycled(&self.fund_types, &self.current.fund_type, step)?;
        self.apply(SelectionChange::FundType(next)).ok().flatten()
    }

    /// Step through the country domain, wrapping at both ends.
    pub fn cycle_country(&mut self, step: isize) -> Option<SelectionSnapshot> {
        let next = cycled(&self.countries, &self.current.country, step)?;
        self.apply(SelectionChange::Country(next)).ok().flatten()
    }

    fn publish(&mut self, snapshot: &SelectionSnapshot) {
        // Drop subscribers whose receiver is gone.
        self.subscribers.retain(|tx| tx.send(snapshot.clone()).is_ok());
    }
}

fn cycled(domain: &[String], current: &str, step: isize) -> Option<String> {
    if domain.is_empty() {
        return None;
    }
    let len = domain.len() as isize;
    let pos = domain.iter().position(|v| v == current).unwrap_or(0) as isize;
    let next = (pos + step).rem_euclid(len) as usize;
    Some(domain[next].clone())
}
