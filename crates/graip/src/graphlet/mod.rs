//! Graphlet enumeration: codes, class tables, and exact counting.
//!
//! Three arities are supported — 3, 4, and 5 nodes — selected via
//! [`Arity`]. A graphlet count is always a `Vec<i64>` in the class order
//! `Arity::names()` returns, cumulative from 3-node classes up.

mod codes;
mod count;
mod tables;

pub use codes::{classify, encode, extend, toggle_edge, Arity};
pub use count::{count, five_counts, four_counts, three_counts};
pub(crate) use count::{count_containing, to_vector};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;

    #[test]
    fn count_dispatches_to_matching_arity() {
        let mut g = Graph::with_nodes(3);
        g.add_edge(0, 1);
        g.add_edge(1, 2);
        g.add_edge(0, 2);
        assert_eq!(count(&g, Arity::Three), three_counts(&g));
    }

    #[test]
    fn vector_length_matches_class_count() {
        let g = Graph::with_nodes(5);
        assert_eq!(count(&g, Arity::Three).len(), Arity::Three.names().len());
        assert_eq!(count(&g, Arity::Four).len(), Arity::Four.names().len());
        assert_eq!(count(&g, Arity::Five).len(), Arity::Five.names().len());
    }
}
