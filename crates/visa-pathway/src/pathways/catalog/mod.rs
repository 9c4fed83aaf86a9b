//! Versioned, immutable graph of visa statuses and the legal transitions
//! between them.
//!
//! A catalog is validated once when it is loaded. After that it is only read,
//! so one instance can be shared across every request through an `Arc`.

mod document;
mod rules;
mod validation;

pub use document::{CatalogDocument, Transition, VisaState};
pub use rules::EligibilityRule;
pub(crate) use rules::all_hold;

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use super::domain::FinalGoal;
use super::error::ConfigurationError;

const STANDARD_CATALOG: &str = include_str!("../../../data/catalog.json");

#[derive(Debug)]
pub struct PathwayCatalog {
    version: String,
    states: BTreeMap<String, VisaState>,
    outgoing: BTreeMap<String, Vec<Transition>>,
    transition_count: usize,
}

impl PathwayCatalog {
    /// The catalog shipped with the crate.
    pub fn standard() -> Result<Self, ConfigurationError> {
        Self::from_json_str(STANDARD_CATALOG)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigurationError> {
        let file = std::fs::File::open(path).map_err(|source| ConfigurationError::Io {
            what: "pathway catalog",
            source,
        })?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ConfigurationError> {
        let document: CatalogDocument =
            serde_json::from_reader(reader).map_err(|source| ConfigurationError::Parse {
                what: "pathway catalog",
                source,
            })?;
        Self::from_document(document)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ConfigurationError> {
        let document: CatalogDocument =
            serde_json::from_str(raw).map_err(|source| ConfigurationError::Parse {
                what: "pathway catalog",
                source,
            })?;
        Self::from_document(document)
    }

    pub fn from_document(document: CatalogDocument) -> Result<Self, ConfigurationError> {
        validation::validate(&document)?;

        let transition_count = document.transitions.len();
        let mut outgoing: BTreeMap<String, Vec<Transition>> = BTreeMap::new();
        for transition in document.transitions {
            outgoing
                .entry(transition.from.clone())
                .or_default()
                .push(transition);
        }
        for transitions in outgoing.values_mut() {
            transitions.sort_by(|a, b| a.to.cmp(&b.to).then_with(|| a.id.cmp(&b.id)));
        }

        let states: BTreeMap<String, VisaState> = document
            .states
            .into_iter()
            .map(|state| (state.code.clone(), state))
            .collect();

        info!(
            version = %document.version,
            states = states.len(),
            transitions = transition_count,
            "pathway catalog loaded"
        );

        Ok(Self {
            version: document.version,
            states,
            outgoing,
            transition_count,
        })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn state(&self, code: &str) -> Option<&VisaState> {
        self.states.get(code)
    }

    pub fn states(&self) -> impl Iterator<Item = &VisaState> {
        self.states.values()
    }

    pub fn is_terminal(&self, code: &str) -> bool {
        self.states.get(code).is_some_and(|state| state.terminal)
    }

    /// Outgoing edges ordered by target code, then transition id.
    pub fn transitions_from(&self, code: &str) -> &[Transition] {
        self.outgoing
            .get(code)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// States tagged as admissible starts for `goal`, ordered by code.
    pub fn start_states(&self, goal: FinalGoal) -> Vec<&VisaState> {
        self.states
            .values()
            .filter(|state| state.is_start_for(goal))
            .collect()
    }

    /// Every state reachable from the starts tagged for `goal`, ignoring
    /// applicant eligibility. Ordered by code.
    pub fn states_reachable_from(&self, goal: FinalGoal) -> Vec<&VisaState> {
        let adjacency: BTreeMap<&str, Vec<&str>> = self
            .outgoing
            .iter()
            .map(|(from, transitions)| {
                (
                    from.as_str(),
                    transitions.iter().map(|edge| edge.to.as_str()).collect(),
                )
            })
            .collect();
        let roots: Vec<&str> = self
            .start_states(goal)
            .into_iter()
            .map(|state| state.code.as_str())
            .collect();

        validation::reach(&adjacency, &roots)
            .into_iter()
            .filter_map(|code| self.states.get(code))
            .collect()
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    pub fn transition_count(&self) -> usize {
        self.transition_count
    }

    pub fn summary(&self) -> CatalogSummary {
        let start_states = FinalGoal::ordered()
            .into_iter()
            .map(|goal| StartStatesEntry {
                goal,
                states: self
                    .start_states(goal)
                    .into_iter()
                    .map(|state| state.code.clone())
                    .collect(),
            })
            .collect();

        CatalogSummary {
            version: self.version.clone(),
            state_count: self.state_count(),
            transition_count: self.transition_count,
            terminal_states: self
                .states
                .values()
                .filter(|state| state.terminal)
                .map(|state| state.code.clone())
                .collect(),
            start_states,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartStatesEntry {
    pub goal: FinalGoal,
    pub states: Vec<String>,
}

/// Read-only overview used by operators and the catalog endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSummary {
    pub version: String,
    pub state_count: usize,
    pub transition_count: usize,
    pub terminal_states: Vec<String>,
    pub start_states: Vec<StartStatesEntry>,
}
