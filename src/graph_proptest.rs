//! Property-based tests for dependency ordering.
//!
//! Random DAGs are generated by only allowing edges from a higher-numbered
//! node to a lower-numbered one, added in random order.

#[cfg(test)]
mod proptest_tests {
    use std::collections::HashMap;

    use crate::error::Error;
    use crate::graph::{DependencyGraph, Scope};
    use proptest::prelude::*;

    fn node(i: usize) -> String {
        format!("file{}.h", i)
    }

    /// (node count, edges) where every edge goes from a higher to a lower index.
    fn dag() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
        (1usize..24).prop_flat_map(|n| {
            let edges = prop::collection::vec((0..n, 0..n), 0..(n * 3)).prop_map(|pairs| {
                pairs
                    .into_iter()
                    .filter(|(a, b)| a != b)
                    .map(|(a, b)| if a > b { (a, b) } else { (b, a) })
                    .collect::<Vec<_>>()
            });
            (Just(n), edges)
        })
    }

    fn build(n: usize, edges: &[(usize, usize)]) -> DependencyGraph {
        let mut graph = DependencyGraph::new();
        for i in 0..n {
            graph.add_node(&node(i));
        }
        for &(from, to) in edges {
            graph.add_edge(&node(from), &node(to));
        }
        graph
    }

    proptest! {
        /// Property: every node appears exactly once, after all its dependencies
        #[test]
        fn order_respects_every_edge((n, edges) in dag()) {
            let graph = build(n, &edges);
            let order = graph.topological_order(&Scope::All).unwrap();

            prop_assert_eq!(order.len(), n);
            let position: HashMap<&str, usize> =
                order.iter().enumerate().map(|(i, name)| (name.as_str(), i)).collect();
            prop_assert_eq!(position.len(), n);
            for &(from, to) in &edges {
                prop_assert!(
                    position[node(to).as_str()] < position[node(from).as_str()],
                    "{} must precede {}", node(to), node(from)
                );
            }
        }

        /// Property: ordering the same graph twice gives the same result
        #[test]
        fn order_is_deterministic((n, edges) in dag()) {
            let first = build(n, &edges).topological_order(&Scope::All).unwrap();
            let second = build(n, &edges).topological_order(&Scope::All).unwrap();
            prop_assert_eq!(first, second);
        }

        /// Property: a scoped order holds exactly the nodes reachable from the root
        #[test]
        fn scoped_order_is_the_reachable_set((n, edges) in dag(), root_seed in any::<usize>()) {
            let root = root_seed % n;
            let graph = build(n, &edges);
            let order = graph.topological_order(&Scope::root(node(root))).unwrap();

            let mut reachable = vec![false; n];
            let mut stack = vec![root];
            while let Some(current) = stack.pop() {
                if reachable[current] {
                    continue;
                }
                reachable[current] = true;
                for &(from, to) in &edges {
                    if from == current {
                        stack.push(to);
                    }
                }
            }

            let expected = reachable.iter().filter(|&&r| r).count();
            prop_assert_eq!(order.len(), expected);
            for name in &order {
                let idx: usize = name["file".len()..name.len() - 2].parse().unwrap();
                prop_assert!(reachable[idx]);
            }
            let root_name = node(root);
            prop_assert_eq!(order.last(), Some(&root_name));
        }

        /// Property: closing any path into a cycle is detected
        #[test]
        fn back_edge_is_a_cycle((n, edges) in dag()) {
            prop_assume!(!edges.is_empty());
            let (from, to) = edges[0];
            let mut graph = build(n, &edges);
            graph.add_edge(&node(to), &node(from));

            let result = graph.topological_order(&Scope::All);
            prop_assert!(matches!(result, Err(Error::CycleDetected { .. })), "cycle not detected");
        }
    }
}
