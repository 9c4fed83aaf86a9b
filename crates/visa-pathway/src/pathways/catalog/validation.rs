use std::collections::{BTreeMap, BTreeSet, VecDeque};

use super::super::error::ConfigurationError;
use super::document::CatalogDocument;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    Active,
    Done,
}

/// Check every structural invariant before a catalog is exposed to readers.
pub(super) fn validate(document: &CatalogDocument) -> Result<(), ConfigurationError> {
    if document.states.is_empty() {
        return Err(ConfigurationError::EmptyCatalog);
    }

    let mut codes = BTreeSet::new();
    for state in &document.states {
        if state.code.trim().is_empty() {
            return Err(ConfigurationError::InvalidState {
                code: state.code.clone(),
                detail: "status code must not be blank".to_string(),
            });
        }
        if state.base_duration_months == 0 {
            return Err(ConfigurationError::InvalidState {
                code: state.code.clone(),
                detail: "base_duration_months must be greater than zero".to_string(),
            });
        }
        if state.permanent && !state.terminal {
            return Err(ConfigurationError::InvalidState {
                code: state.code.clone(),
                detail: "permanent statuses must be terminal".to_string(),
            });
        }
        if !codes.insert(state.code.as_str()) {
            return Err(ConfigurationError::DuplicateState(state.code.clone()));
        }
    }

    let mut transition_ids = BTreeSet::new();
    let mut adjacency: BTreeMap<&str, Vec<&str>> =
        codes.iter().map(|code| (*code, Vec::new())).collect();
    let mut reverse: BTreeMap<&str, Vec<&str>> =
        codes.iter().map(|code| (*code, Vec::new())).collect();

    for transition in &document.transitions {
        if !transition_ids.insert(transition.id.as_str()) {
            return Err(ConfigurationError::DuplicateTransition(
                transition.id.clone(),
            ));
        }
        for endpoint in [&transition.from, &transition.to] {
            if !codes.contains(endpoint.as_str()) {
                return Err(ConfigurationError::UnknownState {
                    transition: transition.id.clone(),
                    code: endpoint.clone(),
                });
            }
        }
        if let Some(targets) = adjacency.get_mut(transition.from.as_str()) {
            targets.push(transition.to.as_str());
        }
        if let Some(sources) = reverse.get_mut(transition.to.as_str()) {
            sources.push(transition.from.as_str());
        }
    }

    check_totals(document)?;

    if let Some(path) = find_cycle(&adjacency) {
        return Err(ConfigurationError::Cycle { path });
    }

    let starts: Vec<&str> = document
        .states
        .iter()
        .filter(|state| state.is_start())
        .map(|state| state.code.as_str())
        .collect();
    if starts.is_empty() {
        return Err(ConfigurationError::NoStartStates);
    }

    let terminals: Vec<&str> = document
        .states
        .iter()
        .filter(|state| state.terminal)
        .map(|state| state.code.as_str())
        .collect();
    if terminals.is_empty() {
        return Err(ConfigurationError::NoTerminalStates);
    }

    let reachable = reach(&adjacency, &starts);
    if let Some(code) = codes.iter().find(|code| !reachable.contains(*code)) {
        return Err(ConfigurationError::Unreachable(code.to_string()));
    }

    let finishing = reach(&reverse, &terminals);
    if let Some(code) = codes.iter().find(|code| !finishing.contains(*code)) {
        return Err(ConfigurationError::Dangling(code.to_string()));
    }

    Ok(())
}

pub(super) fn reach<'a>(
    adjacency: &BTreeMap<&'a str, Vec<&'a str>>,
    roots: &[&'a str],
) -> BTreeSet<&'a str> {
    let mut seen: BTreeSet<&str> = roots.iter().copied().collect();
    let mut queue: VecDeque<&str> = roots.iter().copied().collect();

    while let Some(node) = queue.pop_front() {
        for next in adjacency.get(node).into_iter().flatten() {
            if seen.insert(*next) {
                queue.push_back(*next);
            }
        }
    }

    seen
}

/// A simple path visits each state and each transition at most once, so the
/// catalog-wide sums bound every pathway's months and cost.
fn check_totals(document: &CatalogDocument) -> Result<(), ConfigurationError> {
    let months = document
        .states
        .iter()
        .map(|state| u64::from(state.base_duration_months))
        .chain(
            document
                .transitions
                .iter()
                .map(|transition| u64::from(transition.processing_months)),
        )
        .try_fold(0u64, u64::checked_add);
    if months.map_or(true, |total| total > u64::from(u32::MAX)) {
        return Err(ConfigurationError::TotalOverflow { what: "duration" });
    }

    let cost = document
        .states
        .iter()
        .map(|state| state.cost_won)
        .chain(document.transitions.iter().map(|transition| transition.cost_won))
        .try_fold(0u64, u64::checked_add);
    if cost.is_none() {
        return Err(ConfigurationError::TotalOverflow { what: "cost" });
    }

    Ok(())
}

/// Iterative depth-first search; each frame holds a node and the index of the
/// next outgoing edge to follow.
fn find_cycle(adjacency: &BTreeMap<&str, Vec<&str>>) -> Option<Vec<String>> {
    let mut marks: BTreeMap<&str, Mark> = adjacency
        .keys()
        .map(|code| (*code, Mark::Unvisited))
        .collect();

    for root in adjacency.keys() {
        if marks.get(root) != Some(&Mark::Unvisited) {
            continue;
        }

        let mut frames: Vec<(&str, usize)> = vec![(*root, 0)];
        marks.insert(*root, Mark::Active);

        while let Some(frame) = frames.last_mut() {
            let (node, edge) = *frame;
            let next = adjacency
                .get(node)
                .and_then(|targets| targets.get(edge))
                .copied();
            let Some(next) = next else {
                marks.insert(node, Mark::Done);
                frames.pop();
                continue;
            };
            frame.1 += 1;

            match marks.get(next).copied().unwrap_or(Mark::Unvisited) {
                Mark::Active => {
                    let start = frames
                        .iter()
                        .position(|(code, _)| *code == next)
                        .unwrap_or(0);
                    let mut path: Vec<String> = frames[start..]
                        .iter()
                        .map(|(code, _)| code.to_string())
                        .collect();
                    path.push(next.to_string());
                    return Some(path);
                }
                Mark::Unvisited => {
                    marks.insert(next, Mark::Active);
                    frames.push((next, 0));
                }
                Mark::Done => {}
            }
        }
    }

    None
}
