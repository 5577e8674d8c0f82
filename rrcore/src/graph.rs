//! Derivation graph: targets expanded recursively into the vertices they depend on.
//!
//! Vertices are identified by type and label. Edges point from a vertex to the children of
//! the relation chosen for it, weighted by the child's position in that relation. Vertices
//! with no applicable relation are leaves and must be computed by other means.
use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::sync::Arc;

use log::{debug, info};
use petgraph::Direction;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::bfs::BasisFunctionSet;
use crate::context::DerivationContext;
use crate::integral::{IntegralKind, TwoBodyIntegral, Vertex, VertexKey, vertex_key};
use crate::rr::{KineticG12Relation, RecurrenceRelation};
use crate::utils::error::{RrError, RrResult};

/// Policy choosing the relation that expands a vertex.
pub trait Strategy {
    /// Relation to apply to `vertex`, or `None` when it should stay a leaf.
    fn optimal_rr(
        &self,
        ctx: &DerivationContext,
        vertex: &Arc<dyn Vertex>,
    ) -> RrResult<Option<Arc<dyn RecurrenceRelation>>>;
}

/// Expands `[T_K, G12]` integrals over sets of type `F` with [`KineticG12Relation`].
#[derive(Debug)]
pub struct KineticG12Strategy<F> {
    _marker: PhantomData<F>,
}

impl<F: BasisFunctionSet> Default for KineticG12Strategy<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: BasisFunctionSet> KineticG12Strategy<F> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<F: BasisFunctionSet> Strategy for KineticG12Strategy<F> {
    fn optimal_rr(
        &self,
        ctx: &DerivationContext,
        vertex: &Arc<dyn Vertex>,
    ) -> RrResult<Option<Arc<dyn RecurrenceRelation>>> {
        if vertex.kind() != IntegralKind::KineticG12 {
            return Ok(None);
        }
        let Ok(integral) = vertex.clone().downcast_arc::<TwoBodyIntegral<F>>() else {
            return Ok(None);
        };
        let relation: Arc<dyn RecurrenceRelation> = KineticG12Relation::instance(ctx, integral)?;
        Ok(Some(relation))
    }
}

#[derive(Debug, Clone)]
pub struct GraphVertex {
    pub vertex: Arc<dyn Vertex>,
    /// Relation expanding the vertex, `None` for leaves.
    pub relation: Option<Arc<dyn RecurrenceRelation>>,
}

#[derive(Debug, Default)]
pub struct DerivationGraph {
    graph: DiGraph<GraphVertex, usize>,
    index: BTreeMap<VertexKey, NodeIndex>,
}

impl DerivationGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the node for `vertex`, and whether it was just created.
    fn add_vertex(&mut self, vertex: Arc<dyn Vertex>) -> (NodeIndex, bool) {
        let key = vertex_key(&*vertex);
        if let Some(&node) = self.index.get(&key) {
            return (node, false);
        }
        let node = self.graph.add_node(GraphVertex {
            vertex,
            relation: None,
        });
        self.index.insert(key, node);
        (node, true)
    }

    /// Add `target` and everything it depends on under `strategy`.
    ///
    /// Vertices already in the graph are not expanded again.
    pub fn append_target(
        &mut self,
        ctx: &DerivationContext,
        strategy: &impl Strategy,
        target: Arc<dyn Vertex>,
    ) -> RrResult<NodeIndex> {
        let (root, is_new) = self.add_vertex(target);
        let mut stack = if is_new { vec![root] } else { Vec::new() };

        while let Some(node) = stack.pop() {
            let vertex = self.graph[node].vertex.clone();
            let Some(relation) = strategy.optimal_rr(ctx, &vertex)? else {
                debug!("{} is a leaf", vertex.label());
                continue;
            };

            for i in 0..relation.num_children() {
                let child = relation
                    .rr_child(i)
                    .ok_or_else(|| RrError::ChildIndexOutOfRange {
                        relation: relation.label().to_string(),
                        index: i,
                        count: relation.num_children(),
                    })?;
                let (child_node, child_is_new) = self.add_vertex(child);
                self.graph.add_edge(node, child_node, i);
                if child_is_new {
                    stack.push(child_node);
                }
            }
            self.graph[node].relation = Some(relation);
        }

        info!(
            "Derivation graph for {}: {} vertices, {} relations, {} flops",
            self.graph[root].vertex.label(),
            self.num_vertices(),
            self.num_relations(),
            self.total_flops()
        );
        Ok(root)
    }

    pub fn num_vertices(&self) -> usize {
        self.graph.node_count()
    }

    pub fn num_relations(&self) -> usize {
        self.graph
            .node_weights()
            .filter(|v| v.relation.is_some())
            .count()
    }

    /// Sum of the operation counts of every relation in the graph.
    pub fn total_flops(&self) -> u32 {
        self.graph
            .node_weights()
            .filter_map(|v| v.relation.as_ref())
            .map(|r| r.nflops())
            .sum()
    }

    /// Graph entry of `vertex`, matched by type and label.
    pub fn find(&self, vertex: &dyn Vertex) -> Option<&GraphVertex> {
        self.index
            .get(&vertex_key(vertex))
            .map(|&node| &self.graph[node])
    }

    /// Vertices with no relation, ordered by type then label.
    pub fn leaves(&self) -> Vec<Arc<dyn Vertex>> {
        self.index
            .values()
            .map(|&node| &self.graph[node])
            .filter(|v| v.relation.is_none())
            .map(|v| v.vertex.clone())
            .collect()
    }

    /// Direct dependencies of `vertex`, in child order.
    pub fn dependencies(&self, vertex: &dyn Vertex) -> Vec<Arc<dyn Vertex>> {
        let Some(&node) = self.index.get(&vertex_key(vertex)) else {
            return Vec::new();
        };
        let mut edges: Vec<_> = self
            .graph
            .edges_directed(node, Direction::Outgoing)
            .map(|e| (*e.weight(), e.target()))
            .collect();
        edges.sort_by_key(|&(i, _)| i);
        edges
            .into_iter()
            .map(|(_, n)| self.graph[n].vertex.clone())
            .collect()
    }

    /// Relations in an order where every relation comes after those of its children.
    pub fn evaluation_order(&self) -> RrResult<Vec<Arc<dyn RecurrenceRelation>>> {
        let sorted = toposort(&self.graph, None).map_err(|cycle| RrError::CyclicDependency {
            label: self.graph[cycle.node_id()].vertex.label().to_string(),
        })?;
        Ok(sorted
            .into_iter()
            .rev()
            .filter_map(|node| self.graph[node].relation.clone())
            .collect())
    }
}
