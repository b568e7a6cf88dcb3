use crate::epidemic::contact::{ContactGraph, NodeId};
use crate::error::EpidemicError;
use log::debug;
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::BTreeMap;
use std::iter;

const MAX_ATTEMPTS: usize = 1000;

/// Random simple graph where every node has exactly `degree` neighbours.
///
/// A regular graph needs `nodes * degree` to be even, so an odd node count is
/// bumped by one when the degree is odd as well. Stubs are paired at random;
/// pairs that would form a self-loop or a duplicate edge go back into the pool
/// and are reshuffled, and the whole attempt restarts once no valid pair is
/// left in the pool.
pub fn random_regular<R: Rng + ?Sized>(
    nodes: usize,
    degree: usize,
    rng: &mut R,
) -> Result<ContactGraph, EpidemicError> {
    let nodes = if nodes % 2 == 1 && degree % 2 == 1 {
        nodes + 1
    } else {
        nodes
    };
    if degree >= nodes {
        return Err(EpidemicError::DegreeTooLarge { degree, nodes });
    }
    if degree == 0 {
        return Ok(ContactGraph::new(nodes));
    }

    for attempt in 1..=MAX_ATTEMPTS {
        if let Some(graph) = try_pairing(nodes, degree, rng) {
            debug!(
                "{}-regular graph on {} nodes after {} attempt(s)",
                degree, nodes, attempt
            );
            return Ok(graph);
        }
    }
    Err(EpidemicError::GenerationFailed {
        attempts: MAX_ATTEMPTS,
    })
}

fn try_pairing<R: Rng + ?Sized>(nodes: usize, degree: usize, rng: &mut R) -> Option<ContactGraph> {
    let mut graph = ContactGraph::new(nodes);
    let mut stubs = (0..nodes)
        .flat_map(|v| iter::repeat_n(v, degree))
        .collect::<Vec<usize>>();

    while !stubs.is_empty() {
        let mut leftover: BTreeMap<usize, usize> = BTreeMap::new();
        stubs.shuffle(rng);
        stubs.chunks(2).for_each(|pair| {
            let (a, b) = (pair[0], pair[1]);
            if !graph.add_edge(NodeId(a), NodeId(b)) {
                *leftover.entry(a).or_default() += 1;
                *leftover.entry(b).or_default() += 1;
            }
        });

        if !has_valid_pair(&graph, &leftover) {
            return None;
        }
        stubs = leftover
            .iter()
            .flat_map(|(v, count)| iter::repeat_n(*v, *count))
            .collect();
    }
    Some(graph)
}

fn has_valid_pair(graph: &ContactGraph, leftover: &BTreeMap<usize, usize>) -> bool {
    if leftover.is_empty() {
        return true;
    }
    let keys = leftover.keys().copied().collect::<Vec<usize>>();
    keys.iter().enumerate().any(|(i, a)| {
        keys[i + 1..]
            .iter()
            .any(|b| !graph.has_edge(NodeId(*a), NodeId(*b)))
    })
}
