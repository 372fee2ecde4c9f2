//! Storage location hierarchy resolution.
//!
//! Turns the flat list served by the API into a depth-first, sibling-sorted
//! sequence that a single-select control can render as an indented tree. The
//! conversion is pure and total: stale parent references, duplicate ids and
//! cycles are tolerated rather than rejected, so a partially inconsistent list
//! still renders every location. [`check_hierarchy`] is the strict counterpart
//! for callers that want to know about such problems.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use tracing::warn;

use crate::{
    entities::{LocationId, StorageLocation},
    errors::{Error, Result},
};

/// A storage location placed in the hierarchy.
#[derive(Clone, Debug, PartialEq)]
pub struct LocationNode {
    /// The location as served
    pub location: StorageLocation,
    /// Distance from the root, roots are 0
    pub depth: usize,
    /// Server-supplied breadcrumb, or the plain name when the server sent none
    pub full_path: String,
}

impl LocationNode {
    fn new(location: &StorageLocation, depth: usize) -> Self {
        let full_path = location
            .full_path
            .clone()
            .unwrap_or_else(|| location.name.clone());
        Self {
            location: location.clone(),
            depth,
            full_path,
        }
    }

    /// Id of the placed location.
    #[must_use]
    pub const fn id(&self) -> &LocationId {
        &self.location.id
    }

    /// Name indented two spaces per level, for option lists.
    #[must_use]
    pub fn indented_label(&self) -> String {
        format!("{}{}", "  ".repeat(self.depth), self.location.name)
    }
}

/// Order of siblings: `sort_order`, then name ignoring case, then name, then id.
///
/// `folded_a` and `folded_b` are the lowercased names, computed once per build.
fn sibling_order(
    (a, folded_a): (&StorageLocation, &str),
    (b, folded_b): (&StorageLocation, &str),
) -> Ordering {
    a.sort_order
        .cmp(&b.sort_order)
        .then_with(|| folded_a.cmp(folded_b))
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.id.cmp(&b.id))
}

/// First occurrence of each id, in input order.
fn unique_locations(locations: &[StorageLocation]) -> Vec<&StorageLocation> {
    let mut seen = HashSet::with_capacity(locations.len());
    locations
        .iter()
        .filter(|location| {
            let first = seen.insert(&location.id);
            if !first {
                warn!("Ignoring duplicate storage location id '{}'", location.id);
            }
            first
        })
        .collect()
}

/// Resolves a flat location list into pre-order, depth-stamped nodes.
///
/// - A location whose parent is absent from the list becomes a root.
/// - Siblings are sorted by `sort_order`, then name (case-insensitive first), at every level.
/// - Parents always precede their descendants.
/// - Locations stranded on a parent cycle are promoted to roots one at a time
///   (smallest first), so every unique location is emitted exactly once.
#[must_use]
pub fn build_tree(locations: &[StorageLocation]) -> Vec<LocationNode> {
    let unique = unique_locations(locations);
    let index: HashMap<&LocationId, usize> = unique
        .iter()
        .enumerate()
        .map(|(position, location)| (&location.id, position))
        .collect();

    let mut roots = Vec::new();
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); unique.len()];
    for (position, location) in unique.iter().enumerate() {
        match location.parent_id.as_ref().and_then(|parent| index.get(parent)) {
            Some(&parent) => children[parent].push(position),
            None => roots.push(position),
        }
    }

    let folded: Vec<String> = unique
        .iter()
        .map(|location| location.name.to_lowercase())
        .collect();
    let by_sibling_order = |a: &usize, b: &usize| {
        sibling_order(
            (unique[*a], folded[*a].as_str()),
            (unique[*b], folded[*b].as_str()),
        )
    };
    roots.sort_by(by_sibling_order);
    for siblings in &mut children {
        siblings.sort_by(by_sibling_order);
    }

    let mut visited = vec![false; unique.len()];
    let mut nodes = Vec::with_capacity(unique.len());
    for &root in &roots {
        flatten(root, &unique, &children, &mut visited, &mut nodes);
    }

    if nodes.len() < unique.len() {
        let mut stranded: Vec<usize> = (0..unique.len()).filter(|&i| !visited[i]).collect();
        stranded.sort_by(by_sibling_order);
        for position in stranded {
            if !visited[position] {
                warn!(
                    "Storage location '{}' is part of a parent cycle, showing it as a root",
                    unique[position].id
                );
                flatten(position, &unique, &children, &mut visited, &mut nodes);
            }
        }
    }

    nodes
}

/// Pre-order walk from `start` at depth 0, skipping anything already emitted.
fn flatten(
    start: usize,
    unique: &[&StorageLocation],
    children: &[Vec<usize>],
    visited: &mut [bool],
    nodes: &mut Vec<LocationNode>,
) {
    let mut stack = vec![(start, 0)];
    while let Some((position, depth)) = stack.pop() {
        if visited[position] {
            continue;
        }
        visited[position] = true;
        nodes.push(LocationNode::new(unique[position], depth));

        // Reverse so the first sibling is popped first
        for &child in children[position].iter().rev() {
            if !visited[child] {
                stack.push((child, depth + 1));
            }
        }
    }
}

/// Strict validation of a location list.
///
/// # Errors
/// - [`Error::DuplicateLocation`] for the first repeated id
/// - [`Error::LocationCycle`] for a location that is its own ancestor
pub fn check_hierarchy(locations: &[StorageLocation]) -> Result<()> {
    let mut parents: HashMap<&LocationId, Option<&LocationId>> =
        HashMap::with_capacity(locations.len());
    for location in locations {
        if parents
            .insert(&location.id, location.parent_id.as_ref())
            .is_some()
        {
            return Err(Error::DuplicateLocation {
                id: location.id.to_string(),
            });
        }
    }

    for location in locations {
        let mut ancestors = HashSet::new();
        let mut current = location.parent_id.as_ref();
        while let Some(id) = current {
            if id == &location.id || !ancestors.insert(id) {
                return Err(Error::LocationCycle { id: id.to_string() });
            }
            // Unknown parents end the chain
            current = parents.get(id).copied().flatten();
        }
    }

    Ok(())
}
