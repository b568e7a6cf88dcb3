use petgraph::algo::connected_components;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::unionfind::UnionFind;
use petgraph::visit::EdgeRef;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }

    fn node(self) -> NodeIndex {
        NodeIndex::new(self.0)
    }
}

/// Simple undirected graph: no self-loops, at most one edge per node pair.
#[derive(Clone, Debug)]
pub struct ContactGraph {
    graph: UnGraph<(), ()>,
}

impl ContactGraph {
    pub fn new(node_count: usize) -> Self {
        let mut graph = UnGraph::with_capacity(node_count, 0);
        (0..node_count).for_each(|_| {
            graph.add_node(());
        });
        Self { graph }
    }

    /// Returns false when the edge would be a self-loop or a duplicate.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId) -> bool {
        if a == b || self.has_edge(a, b) {
            return false;
        }
        self.graph.add_edge(a.node(), b.node(), ());
        true
    }

    pub fn has_edge(&self, a: NodeId, b: NodeId) -> bool {
        self.graph.contains_edge(a.node(), b.node())
    }

    pub fn neighbors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.graph.neighbors(id.node()).map(|n| NodeId(n.index()))
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.graph
            .edge_references()
            .map(|e| (NodeId(e.source().index()), NodeId(e.target().index())))
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Spanning forest keeping the earliest edge that joins two components.
    pub fn spanning_tree(&self) -> ContactGraph {
        let mut sets = UnionFind::<usize>::new(self.node_count());
        let mut tree = ContactGraph::new(self.node_count());
        self.edges().for_each(|(a, b)| {
            if sets.union(a.index(), b.index()) {
                tree.add_edge(a, b);
            }
        });
        tree
    }

    pub fn component_count(&self) -> usize {
        connected_components(&self.graph)
    }
}
