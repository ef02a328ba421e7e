//! Whole-project structural rules (V008–V014).
//!
//! Rules here are not per-reference lookups: default-preset cardinality,
//! preset/bus coverage, and the tree-shape assertions over the flattened
//! arenas. New project-wide rules belong in this module.

use std::collections::HashSet;

use petgraph::algo::is_cyclic_directed;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Bfs;

use crate::error::Violation;

use super::index::{Category, ProjectIndex};

/// Run all structural rules. Returns all violations found.
pub fn validate_structural(index: &ProjectIndex<'_>) -> Vec<Violation> {
    let mut violations = Vec::new();

    v008_v009_exactly_one_default_preset(index, &mut violations);
    v010_v011_presets_cover_buses(index, &mut violations);
    v014_wave_bank_paths_unique(index, &mut violations);

    let bus_ids: Vec<&str> = index.mix_buses.iter().map(|b| b.id.as_str()).collect();
    v012_v013_tree_shape(Category::MixBus, &bus_ids, &index.bus_children, &mut violations);

    let group_ids: Vec<&str> = index.event_groups.iter().map(|g| g.id.as_str()).collect();
    v012_v013_tree_shape(
        Category::EventGroup,
        &group_ids,
        &index.group_children,
        &mut violations,
    );

    violations
}

fn v008_v009_exactly_one_default_preset(
    index: &ProjectIndex<'_>,
    violations: &mut Vec<Violation>,
) {
    let defaults = index.mix_presets.iter().filter(|p| p.is_default).count();
    if defaults == 0 {
        violations.push(Violation::new("V008", "No default mix preset found", None));
    } else if defaults > 1 {
        violations.push(Violation::new(
            "V009",
            format!("Multiple default mix presets found ({})", defaults),
            None,
        ));
    }
}

fn v010_v011_presets_cover_buses(index: &ProjectIndex<'_>, violations: &mut Vec<Violation>) {
    for preset in &index.mix_presets {
        let mut covered = HashSet::new();
        for params in &preset.parameters {
            if !covered.insert(params.bus.as_str()) {
                violations.push(Violation::new(
                    "V010",
                    format!(
                        "Mix preset '{}' contains multiple parameter sets for mix bus '{}'",
                        preset.id, params.bus
                    ),
                    Some(preset.id.clone()),
                ));
            }
        }

        for bus in &index.mix_buses {
            if !covered.contains(bus.id.as_str()) {
                violations.push(Violation::new(
                    "V011",
                    format!(
                        "Mix preset '{}' does not contain a parameter set for mix bus '{}'",
                        preset.id, bus.id
                    ),
                    Some(preset.id.clone()),
                ));
            }
        }
    }
}

/// Audio data is addressed by path within its bank, so a bank listing the
/// same path twice would make every reference to it ambiguous.
fn v014_wave_bank_paths_unique(index: &ProjectIndex<'_>, violations: &mut Vec<Violation>) {
    for bank in &index.wave_banks {
        let mut seen = HashSet::new();
        for entry in &bank.entries {
            if !seen.insert(entry.path.as_str()) {
                violations.push(Violation::new(
                    "V014",
                    format!(
                        "Wave bank '{}' contains multiple entries for audio data '{}'",
                        bank.id, entry.path
                    ),
                    Some(bank.id.clone()),
                ));
            }
        }
    }
}

/// Re-assert the tree shape of a flattened arena: no cycles, and every
/// entry reachable from the root at index 0. The document loader cannot
/// produce anything else out of nested ownership; this guards loaders that
/// construct arenas directly.
fn v012_v013_tree_shape(
    category: Category,
    ids: &[&str],
    children: &[Vec<usize>],
    violations: &mut Vec<Violation>,
) {
    let mut graph: DiGraph<usize, ()> = DiGraph::new();
    let nodes: Vec<NodeIndex> = (0..children.len()).map(|i| graph.add_node(i)).collect();
    for (parent, kids) in children.iter().enumerate() {
        for &child in kids {
            let Some(&target) = nodes.get(child) else {
                continue;
            };
            graph.add_edge(nodes[parent], target, ());
        }
    }

    if is_cyclic_directed(&graph) {
        violations.push(Violation::new(
            "V012",
            format!("The {} arena contains a cycle", category),
            None,
        ));
    }

    let mut reachable = HashSet::new();
    if let Some(&root) = nodes.first() {
        let mut bfs = Bfs::new(&graph, root);
        while let Some(nx) = bfs.next(&graph) {
            reachable.insert(nx);
        }
    }

    for (i, node) in nodes.iter().enumerate() {
        if !reachable.contains(node) {
            violations.push(Violation::new(
                "V013",
                format!(
                    "The {} '{}' is not reachable from the {} tree root",
                    category, ids[i], category
                ),
                Some(ids[i].to_string()),
            ));
        }
    }
}
