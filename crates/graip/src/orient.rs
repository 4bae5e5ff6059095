//! Degeneracy-ordering DAG orientation (C2).
//!
//! Recomputed from scratch for every enumeration; never mutated
//! incrementally. Grounded on `topological_ordering` in the reference
//! implementation: a bucket-queue minimum-degree removal, the classic
//! degeneracy ordering algorithm.

use petgraph::graph::{DiGraph, NodeIndex};

use crate::graph::{Graph, NodeId};

/// `G` oriented by degeneracy ordering: every undirected edge `{u,v}`
/// becomes a directed edge `u -> v` with `rank(u) < rank(v)`.
#[derive(Debug, Clone)]
pub struct OrientedGraph {
    dag: DiGraph<NodeId, ()>,
    /// `rank[v]` is `v`'s position in the degeneracy removal order.
    rank: Vec<u32>,
    /// The largest bucket degree ever popped; an upper bound on max out-degree.
    degeneracy: usize,
}

impl OrientedGraph {
    /// Orient `g` by degeneracy ordering.
    #[must_use]
    pub fn orient(g: &Graph) -> Self {
        let n = g.node_count();
        let mut degree: Vec<usize> = (0..n as NodeId).map(|v| g.degree(v)).collect();
        let mut neighbours: Vec<Vec<NodeId>> =
            (0..n as NodeId).map(|v| g.neighbors(v).collect()).collect();

        let max_degree = degree.iter().copied().max().unwrap_or(0);
        let mut buckets: Vec<Vec<NodeId>> = vec![Vec::new(); max_degree + 1];
        for v in 0..n as NodeId {
            buckets[degree[v as usize]].push(v);
        }

        let mut rank = vec![0u32; n];
        let mut dag = DiGraph::<NodeId, ()>::with_capacity(n, g.edge_count());
        let indices: Vec<NodeIndex> = (0..n).map(|v| dag.add_node(v as NodeId)).collect();

        let mut removed = vec![false; n];
        let mut min_degree = 0usize;
        let mut degeneracy = 0usize;

        for next_rank in 0..n {
            while min_degree < buckets.len() && buckets[min_degree].is_empty() {
                min_degree += 1;
            }
            degeneracy = degeneracy.max(min_degree);

            let source = loop {
                let candidate = buckets[min_degree].pop().expect("bucket non-empty");
                if !removed[candidate as usize] {
                    break candidate;
                }
            };

            rank[source as usize] = next_rank as u32;
            removed[source as usize] = true;

            let nbrs = std::mem::take(&mut neighbours[source as usize]);
            for nb in nbrs {
                if removed[nb as usize] {
                    continue;
                }
                dag.add_edge(indices[source as usize], indices[nb as usize], ());

                let deg = degree[nb as usize];
                degree[nb as usize] = deg - 1;
                if let Some(pos) = buckets[deg].iter().position(|&x| x == nb) {
                    buckets[deg].swap_remove(pos);
                }
                buckets[deg - 1].push(nb);
                if deg - 1 < min_degree {
                    min_degree = deg - 1;
                }

                if let Some(pos) = neighbours[nb as usize].iter().position(|&x| x == source) {
                    neighbours[nb as usize].swap_remove(pos);
                }
            }
        }

        Self {
            dag,
            rank,
            degeneracy,
        }
    }

    /// The underlying DAG (node weights are the original `NodeId`s).
    #[must_use]
    pub fn dag(&self) -> &DiGraph<NodeId, ()> {
        &self.dag
    }

    /// Rank of `v` in the degeneracy removal order (0 = removed first).
    #[must_use]
    pub fn rank(&self, v: NodeId) -> u32 {
        self.rank[v as usize]
    }

    /// The degeneracy of the original graph: the maximum, over all
    /// intermediate removal steps, of the minimum degree at that step.
    #[must_use]
    pub fn degeneracy(&self) -> usize {
        self.degeneracy
    }

    /// Successors of `v` in the DAG (higher-ranked neighbours).
    pub fn successors(&self, v: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.dag
            .neighbors(NodeIndex::new(v as usize))
            .map(|idx| self.dag[idx])
    }

    /// Predecessors of `v` in the DAG (lower-ranked neighbours).
    pub fn predecessors(&self, v: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.dag
            .neighbors_directed(NodeIndex::new(v as usize), petgraph::Direction::Incoming)
            .map(|idx| self.dag[idx])
    }

    /// Out-degree of `v` in the DAG.
    #[must_use]
    pub fn out_degree(&self, v: NodeId) -> usize {
        self.dag
            .neighbors(NodeIndex::new(v as usize))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orients_every_edge_exactly_once() {
        let mut g = Graph::with_nodes(4);
        g.add_edge(0, 1);
        g.add_edge(1, 2);
        g.add_edge(2, 3);
        g.add_edge(3, 0);
        let dg = OrientedGraph::orient(&g);
        assert_eq!(dg.dag().edge_count(), g.edge_count());
    }

    #[test]
    fn orientation_follows_rank() {
        let mut g = Graph::with_nodes(4);
        g.add_edge(0, 1);
        g.add_edge(1, 2);
        g.add_edge(2, 3);
        let dg = OrientedGraph::orient(&g);
        for v in g.nodes() {
            for succ in dg.successors(v) {
                assert!(dg.rank(v) < dg.rank(succ));
            }
        }
    }

    #[test]
    fn out_degree_bounded_by_degeneracy() {
        // A star K_{1,5}: degeneracy is 1.
        let mut g = Graph::with_nodes(6);
        for leaf in 1..6 {
            g.add_edge(0, leaf);
        }
        let dg = OrientedGraph::orient(&g);
        assert_eq!(dg.degeneracy(), 1);
        for v in g.nodes() {
            assert!(dg.out_degree(v) <= dg.degeneracy());
        }
    }

    #[test]
    fn clique_degeneracy_is_n_minus_one() {
        let n = 5;
        let mut g = Graph::with_nodes(n);
        for i in 0..n as NodeId {
            for j in (i + 1)..n as NodeId {
                g.add_edge(i, j);
            }
        }
        let dg = OrientedGraph::orient(&g);
        assert_eq!(dg.degeneracy(), n - 1);
    }
}
