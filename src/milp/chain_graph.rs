use crate::itemsets::Itemset;
use petgraph::graph::{NodeIndex, UnGraph};
use std::collections::{HashMap, HashSet};

/// Builds the comparability graph over `itemsets`: an edge between any two
/// itemsets where one is a (not necessarily strict) subset of the other.
/// Maximal cliques in this graph are exactly the inclusion chains used by
/// the MILP's chain constraints (§4.4).
pub fn build_chain_graph(itemsets: &[Itemset]) -> UnGraph<(), ()> {
    let mut graph = UnGraph::<(), ()>::with_capacity(itemsets.len(), 0);
    let nodes: Vec<NodeIndex> = (0..itemsets.len()).map(|_| graph.add_node(())).collect();
    for i in 0..itemsets.len() {
        for j in (i + 1)..itemsets.len() {
            if itemsets[i].is_subset_of(&itemsets[j]) || itemsets[j].is_subset_of(&itemsets[i]) {
                graph.add_edge(nodes[i], nodes[j], ());
            }
        }
    }
    graph
}

/// Enumerates all maximal cliques of size >= 2 via Bron–Kerbosch with
/// pivoting. `petgraph` has no built-in clique enumerator, so this walks
/// its adjacency iterators directly (§9 "Chain graph and clique
/// enumeration").
pub fn maximal_cliques(graph: &UnGraph<(), ()>) -> Vec<Vec<NodeIndex>> {
    let nodes: Vec<NodeIndex> = graph.node_indices().collect();
    let neighbors: HashMap<NodeIndex, HashSet<NodeIndex>> = nodes
        .iter()
        .map(|&n| (n, graph.neighbors(n).collect()))
        .collect();

    let mut cliques = Vec::new();
    let p: HashSet<NodeIndex> = nodes.into_iter().collect();
    bron_kerbosch(HashSet::new(), p, HashSet::new(), &neighbors, &mut cliques);
    cliques
}

fn bron_kerbosch(
    r: HashSet<NodeIndex>,
    mut p: HashSet<NodeIndex>,
    mut x: HashSet<NodeIndex>,
    neighbors: &HashMap<NodeIndex, HashSet<NodeIndex>>,
    cliques: &mut Vec<Vec<NodeIndex>>,
) {
    if p.is_empty() && x.is_empty() {
        if r.len() >= 2 {
            cliques.push(r.into_iter().collect());
        }
        return;
    }

    let pivot = p
        .union(&x)
        .max_by_key(|u| neighbors[u].intersection(&p).count())
        .copied();
    let candidates: Vec<NodeIndex> = match pivot {
        Some(u) => p.difference(&neighbors[&u]).copied().collect(),
        None => p.iter().copied().collect(),
    };

    for v in candidates {
        let mut r2 = r.clone();
        r2.insert(v);
        let p2: HashSet<NodeIndex> = p.intersection(&neighbors[&v]).copied().collect();
        let x2: HashSet<NodeIndex> = x.intersection(&neighbors[&v]).copied().collect();
        bron_kerbosch(r2, p2, x2, neighbors, cliques);
        p.remove(&v);
        x.insert(v);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_of_three_nested_itemsets_is_one_edge_complete_graph() {
        let itemsets = vec![
            Itemset::new(vec![1]),
            Itemset::new(vec![1, 2]),
            Itemset::new(vec![1, 2, 3]),
        ];
        let graph = build_chain_graph(&itemsets);
        assert_eq!(graph.edge_count(), 3);
        let cliques = maximal_cliques(&graph);
        assert_eq!(cliques.len(), 1);
        assert_eq!(cliques[0].len(), 3);
    }

    #[test]
    fn disjoint_itemsets_have_no_edges_or_cliques() {
        let itemsets = vec![Itemset::new(vec![1]), Itemset::new(vec![2])];
        let graph = build_chain_graph(&itemsets);
        assert_eq!(graph.edge_count(), 0);
        assert!(maximal_cliques(&graph).is_empty());
    }

    #[test]
    fn two_separate_chains_give_two_cliques() {
        let itemsets = vec![
            Itemset::new(vec![1]),
            Itemset::new(vec![1, 2]),
            Itemset::new(vec![3]),
            Itemset::new(vec![3, 4]),
        ];
        let graph = build_chain_graph(&itemsets);
        let cliques = maximal_cliques(&graph);
        assert_eq!(cliques.len(), 2);
        assert!(cliques.iter().all(|c| c.len() == 2));
    }
}
