//! Generic best-first A* search over nodes that yield `(successor, step_cost)` pairs.
//!
//! The open list is a [BinaryHeap] of indices into an insertion-ordered map of discovered
//! nodes, so iteration order and therefore the returned path only depend on the order in
//! which successors are produced.
//!
//! Adapted from
//! [pathfinding's astar function](https://docs.rs/pathfinding/latest/pathfinding/directed/astar/index.html).
use fxhash::FxBuildHasher;
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use log::trace;
use num_traits::Zero;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::Hash;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

struct OpenEntry<K> {
    estimate: K,
    cost: K,
    index: usize,
}

impl<K: PartialEq> Eq for OpenEntry<K> {}

impl<K: PartialEq> PartialEq for OpenEntry<K> {
    fn eq(&self, other: &Self) -> bool {
        self.estimate.eq(&other.estimate) && self.cost.eq(&other.cost)
    }
}

impl<K: Ord> PartialOrd for OpenEntry<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> Ord for OpenEntry<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap on g + h; among equal estimates the deeper node (larger g) comes first.
        match other.estimate.cmp(&self.estimate) {
            Ordering::Equal => self.cost.cmp(&other.cost),
            s => s,
        }
    }
}

fn unwind<N, V, F>(discovered: &FxIndexMap<N, V>, mut parent: F, last: usize) -> Vec<N>
where
    N: Eq + Hash + Clone,
    F: FnMut(&V) -> usize,
{
    let mut path: Vec<N> = itertools::unfold(last, |i| {
        discovered.get_index(*i).map(|(node, value)| {
            *i = parent(value);
            node.clone()
        })
    })
    .collect();
    path.reverse();
    path
}

/// Runs A* from `start` until `success` accepts a node. Returns the node sequence from
/// `start` to the accepted node together with its accumulated cost, or [None] when the open
/// list runs dry.
pub fn astar<N, C, FN, IN, FH, FS>(
    start: &N,
    mut successors: FN,
    mut heuristic: FH,
    mut success: FS,
) -> Option<(Vec<N>, C)>
where
    N: Eq + Hash + Clone,
    C: Zero + Ord + Copy,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = (N, C)>,
    FH: FnMut(&N) -> C,
    FS: FnMut(&N) -> bool,
{
    let mut open = BinaryHeap::new();
    open.push(OpenEntry {
        estimate: Zero::zero(),
        cost: Zero::zero(),
        index: 0,
    });
    let mut discovered: FxIndexMap<N, (usize, C)> = FxIndexMap::default();
    discovered.insert(start.clone(), (usize::MAX, Zero::zero()));
    let mut expanded = 0usize;
    while let Some(OpenEntry { cost, index, .. }) = open.pop() {
        let next = {
            let (node, &(_, best)) = discovered.get_index(index)?;
            if success(node) {
                trace!("A* reached goal after expanding {} nodes", expanded);
                let path = unwind(&discovered, |&(p, _)| p, index);
                return Some((path, cost));
            }
            // Stale heap entry: a cheaper route to this node was queued later.
            if cost > best {
                continue;
            }
            expanded += 1;
            successors(node)
        };
        for (successor, step) in next {
            let new_cost = cost + step;
            let h;
            let n;
            match discovered.entry(successor) {
                Vacant(e) => {
                    h = heuristic(e.key());
                    n = e.index();
                    e.insert((index, new_cost));
                }
                Occupied(mut e) => {
                    if e.get().1 > new_cost {
                        h = heuristic(e.key());
                        n = e.index();
                        e.insert((index, new_cost));
                    } else {
                        continue;
                    }
                }
            }
            open.push(OpenEntry {
                estimate: new_cost + h,
                cost: new_cost,
                index: n,
            });
        }
    }
    trace!("A* exhausted the open list after expanding {} nodes", expanded);
    None
}
