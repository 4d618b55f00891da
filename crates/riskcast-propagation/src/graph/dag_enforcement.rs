//! Acyclicity checks and topological ordering.

use std::collections::{HashMap, HashSet, VecDeque};

use petgraph::algo::{tarjan_scc, toposort};
use petgraph::stable_graph::NodeIndex;
use petgraph::Direction;

use riskcast_core::errors::{RiskError, RiskResult};

use super::stable_graph::IndexedGraph;

/// Parents-before-children order of every node, or `CyclicGraph` naming the
/// factors on one offending cycle.
pub fn topological_order(graph: &IndexedGraph) -> RiskResult<Vec<NodeIndex>> {
    toposort(&graph.graph, None).map_err(|cycle| {
        let start = cycle.node_id();
        let members = find_cycles(graph)
            .into_iter()
            .find(|scc| scc.contains(&start))
            .unwrap_or_else(|| vec![start]);
        RiskError::CyclicGraph {
            path: cycle_path(graph, start, &members),
        }
    })
}

/// All strongly connected components that form cycles: SCCs with more than
/// one node, plus single nodes carrying a self-loop.
pub fn find_cycles(graph: &IndexedGraph) -> Vec<Vec<NodeIndex>> {
    tarjan_scc(&graph.graph)
        .into_iter()
        .filter(|scc| {
            scc.len() > 1 || graph.graph.find_edge(scc[0], scc[0]).is_some()
        })
        .collect()
}

/// Render a concrete cycle through `start` as `a -> b -> a`, walking only
/// inside `members`.
fn cycle_path(graph: &IndexedGraph, start: NodeIndex, members: &[NodeIndex]) -> String {
    let allowed: HashSet<NodeIndex> = members.iter().copied().collect();
    let mut previous: HashMap<NodeIndex, NodeIndex> = HashMap::new();
    let mut queue = VecDeque::from([start]);
    let mut closing = None;

    while let Some(current) = queue.pop_front() {
        for next in graph.graph.neighbors_directed(current, Direction::Outgoing) {
            if next == start {
                closing = Some(current);
                break;
            }
            if allowed.contains(&next) && !previous.contains_key(&next) {
                previous.insert(next, current);
                queue.push_back(next);
            }
        }
        if closing.is_some() {
            break;
        }
    }

    let mut path = vec![graph.factor_id(start).to_string()];
    if let Some(mut node) = closing {
        let mut tail = Vec::new();
        while node != start {
            tail.push(graph.factor_id(node).to_string());
            match previous.get(&node) {
                Some(&prev) => node = prev,
                None => break,
            }
        }
        tail.reverse();
        path.extend(tail);
    }
    path.push(graph.factor_id(start).to_string());
    path.join(" -> ")
}
