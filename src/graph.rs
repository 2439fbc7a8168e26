// Copyright (c) 2023 The rs-maxflow developers
//
// This program is free software: you can redistribute it and/or
// modify it under the terms of the GNU General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
// General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see  <http://www.gnu.org/licenses/>
//


//! The residual graph the flow algorithms work on.
//!
//! Vertices and arcs are stored in two vectors and referenced by the
//! index handles [`VertexId`] and [`ArcId`]. Every arc knows its
//! *reverse* arc, the arc in the opposite direction that receives the
//! residual capacity whenever flow is sent over the arc. The pairing is
//! mutual, i.e. `g.arc(g.arc(a).reverse).reverse == a`.
//!
//! Besides its static data (kind and position) each vertex carries a
//! [`TraversalState`]. The state is mutated in place by the searches and
//! the flow algorithms and is restored by [`FlowGraph::reset`].

use crate::builder::GraphBuilder;
use crate::error::{Error, Result};

use crate::num::traits::NumAssign;

use std::cmp::min;
use std::collections::{BTreeMap, VecDeque};
use std::fmt;

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// The number type of capacities and flows.
///
/// This is just an abbreviation for the requirements of the algorithms and
/// is implemented automatically for all primitive integer types.
pub trait Flow: NumAssign + Ord + Copy + fmt::Debug + fmt::Display {}

impl<T> Flow for T where T: NumAssign + Ord + Copy + fmt::Debug + fmt::Display {}

/// Level of a vertex that has not been reached by a search.
pub const UNREACHED: usize = usize::MAX;

/// Handle of a vertex.
///
/// This is basically a newtype of the vertex index.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct VertexId(u32);

impl VertexId {
    pub(crate) fn new(index: usize) -> Self {
        VertexId(index as u32)
    }

    /// Return the index of this vertex.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Handle of an arc.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct ArcId(u32);

impl ArcId {
    pub(crate) fn new(index: usize) -> Self {
        ArcId(index as u32)
    }

    /// Return the index of this arc.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ArcId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "a{}", self.0)
    }
}

/// The role of a vertex in the flow problem.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum VertexKind {
    Source,
    Sink,
    Other,
}

/// Position of a vertex in the plane.
///
/// Only used for drawing, the algorithms ignore it.
#[derive(PartialEq, Clone, Copy, Debug, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Mutable bookkeeping of a vertex used by searches and flow algorithms.
#[derive(PartialEq, Eq, Clone, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct TraversalState<F> {
    /// Index of the outgoing arc examined last, `None` if no arc has been
    /// examined since the last reset.
    pub cursor: Option<usize>,
    /// Whether the vertex has been discovered.
    pub seen: bool,
    /// Whether all outgoing arcs of the vertex have been examined.
    pub finished: bool,
    /// The vertex this vertex has been discovered from.
    pub parent: Option<VertexId>,
    /// The arc this vertex has been discovered over.
    pub parent_arc: Option<ArcId>,
    /// Minimal residual capacity on the discovery path to this vertex.
    pub parent_arc_min_capacity: Option<F>,
    /// Number of arcs on the discovery path, [`UNREACHED`] if not discovered.
    pub level: usize,
    /// Distance label (Preflow-Push).
    pub distance: usize,
    /// Flow received but not forwarded yet (Preflow-Push).
    pub excess: F,
    /// Smallest distance label of a residual neighbour seen at the last
    /// relabel operation (Preflow-Push).
    pub min_neighbor_distance: usize,
}

impl<F: Flow> TraversalState<F> {
    fn new() -> Self {
        TraversalState {
            cursor: None,
            seen: false,
            finished: false,
            parent: None,
            parent_arc: None,
            parent_arc_min_capacity: None,
            level: UNREACHED,
            distance: 0,
            excess: F::zero(),
            min_neighbor_distance: UNREACHED,
        }
    }

    /// Forget the last visit but keep the level and the labels.
    pub(crate) fn clear_visit(&mut self) {
        self.cursor = None;
        self.seen = false;
        self.finished = false;
        self.parent = None;
        self.parent_arc = None;
        self.parent_arc_min_capacity = None;
    }

    /// Reset the search data but keep distance label and excess.
    fn reset_search(&mut self) {
        self.clear_visit();
        self.level = UNREACHED;
        self.min_neighbor_distance = UNREACHED;
    }
}

/// Data associated with a vertex.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct VertexData<F> {
    pub kind: VertexKind,
    pub position: Position,
    pub state: TraversalState<F>,
    pub(crate) outgoing: Vec<ArcId>,
    pub(crate) incoming: Vec<ArcId>,
}

impl<F: Flow> VertexData<F> {
    pub(crate) fn new(kind: VertexKind, position: Position) -> Self {
        VertexData {
            kind,
            position,
            state: TraversalState::new(),
            outgoing: vec![],
            incoming: vec![],
        }
    }
}

/// Data associated with an arc.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct ArcData<F> {
    pub from: VertexId,
    pub to: VertexId,
    /// The current residual capacity.
    pub capacity: F,
    /// The capacity the arc has been created with.
    pub init_capacity: F,
    /// The flow sent over this arc.
    pub flow: F,
    /// The paired arc in opposite direction.
    pub reverse: ArcId,
}

/// A capacitated digraph with designated source and sink.
///
/// Graphs are created with a [`GraphBuilder`].
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct FlowGraph<F> {
    pub(crate) vertices: Vec<VertexData<F>>,
    pub(crate) arcs: Vec<ArcData<F>>,
    pub(crate) source: VertexId,
    pub(crate) sink: VertexId,
}

impl<F: Flow> FlowGraph<F> {
    /// Return a new builder.
    pub fn new_builder() -> GraphBuilder<F> {
        GraphBuilder::new()
    }

    /// Create a new graph by passing a builder to the callback `f`.
    ///
    /// # Example
    ///
    /// ```
    /// use rs_maxflow::{FlowGraph, VertexKind};
    ///
    /// let g = FlowGraph::new_with(|b| {
    ///     let s = b.add_vertex(VertexKind::Source);
    ///     let t = b.add_vertex(VertexKind::Sink);
    ///     b.add_arc(s, t, 3)?;
    ///     Ok(())
    /// })
    /// .unwrap();
    ///
    /// assert_eq!(g.num_vertices(), 2);
    /// // every arc gets a reverse arc
    /// assert_eq!(g.num_arcs(), 2);
    /// ```
    pub fn new_with<B>(f: B) -> Result<Self>
    where
        B: FnOnce(&mut GraphBuilder<F>) -> Result<()>,
    {
        let mut b = GraphBuilder::new();
        f(&mut b)?;
        b.into_graph()
    }

    /// Return the number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Return the number of arcs (including reverse arcs).
    pub fn num_arcs(&self) -> usize {
        self.arcs.len()
    }

    pub fn source(&self) -> VertexId {
        self.source
    }

    pub fn sink(&self) -> VertexId {
        self.sink
    }

    /// Return `true` if `v` is the source or the sink.
    pub fn is_terminal(&self, v: VertexId) -> bool {
        v == self.source || v == self.sink
    }

    /// Return an iterator over all vertices.
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> {
        (0..self.vertices.len()).map(VertexId::new)
    }

    /// Return an iterator over all arcs.
    pub fn arcs(&self) -> impl Iterator<Item = ArcId> {
        (0..self.arcs.len()).map(ArcId::new)
    }

    pub fn vertex(&self, v: VertexId) -> &VertexData<F> {
        &self.vertices[v.index()]
    }

    pub fn arc(&self, a: ArcId) -> &ArcData<F> {
        &self.arcs[a.index()]
    }

    /// Return the traversal state of `v`.
    pub fn state(&self, v: VertexId) -> &TraversalState<F> {
        &self.vertices[v.index()].state
    }

    pub(crate) fn state_mut(&mut self, v: VertexId) -> &mut TraversalState<F> {
        &mut self.vertices[v.index()].state
    }

    /// Return the outgoing arcs of `v` in insertion order.
    pub fn outgoing(&self, v: VertexId) -> &[ArcId] {
        &self.vertices[v.index()].outgoing
    }

    /// Return the incoming arcs of `v` in insertion order.
    pub fn incoming(&self, v: VertexId) -> &[ArcId] {
        &self.vertices[v.index()].incoming
    }

    /// Return `true` if `v` is a vertex of this graph.
    pub fn contains(&self, v: VertexId) -> bool {
        v.index() < self.vertices.len()
    }

    /// Advance the cursor of `v` and return the outgoing arc it points to.
    ///
    /// Returns `None` once all outgoing arcs have been examined. The cursor
    /// stays behind the last arc in this case.
    pub fn next_arc(&mut self, v: VertexId) -> Option<ArcId> {
        let vdata = &mut self.vertices[v.index()];
        let next = vdata.state.cursor.map_or(0, |c| c + 1);
        if next < vdata.outgoing.len() {
            vdata.state.cursor = Some(next);
            Some(vdata.outgoing[next])
        } else {
            vdata.state.cursor = Some(vdata.outgoing.len());
            None
        }
    }

    /// Return the arc the cursor of `v` currently points to.
    pub fn current_arc(&self, v: VertexId) -> Option<ArcId> {
        let vdata = &self.vertices[v.index()];
        vdata.state.cursor.and_then(|c| vdata.outgoing.get(c).cloned())
    }

    /// Send `df` additional units of flow over arc `a`.
    ///
    /// The flow on the reverse arc is cancelled first, only the remainder is
    /// added to the flow of `a`. The residual capacity of `a` decreases by
    /// `df` and the residual capacity of its reverse arc increases by `df`.
    ///
    /// Fails with [`Error::CapacityExceeded`] if `df` is larger than the
    /// residual capacity of `a`. The graph is not modified in this case.
    pub fn increase_flow(&mut self, a: ArcId, df: F) -> Result<()> {
        if df < F::zero() {
            return Err(Error::NegativeIncrement { arc: a });
        }
        let r = self.arcs[a.index()].reverse;
        if df > self.arcs[a.index()].capacity {
            log::error!(
                "cannot send {} units over {} with residual capacity {}",
                df,
                a,
                self.arcs[a.index()].capacity
            );
            return Err(Error::CapacityExceeded { arc: a });
        }

        let rdata = &mut self.arcs[r.index()];
        let cancel = min(df, rdata.flow);
        rdata.flow -= cancel;
        rdata.capacity += df;

        let adata = &mut self.arcs[a.index()];
        adata.flow += df - cancel;
        adata.capacity -= df;

        debug_assert!(adata.flow <= adata.init_capacity);
        Ok(())
    }

    /// Return the value of the current flow.
    ///
    /// This is the flow leaving the source minus the flow entering it.
    pub fn value(&self) -> F {
        let out = self.outgoing(self.source).iter().fold(F::zero(), |acc, &a| acc + self.arc(a).flow);
        let inc = self.incoming(self.source).iter().fold(F::zero(), |acc, &a| acc + self.arc(a).flow);
        out - inc
    }

    /// Return the flow on every arc.
    pub fn flow(&self) -> Vec<(ArcId, F)> {
        self.arcs().map(|a| (a, self.arc(a).flow)).collect()
    }

    /// Return the flow on all arcs with non-zero flow.
    pub fn flow_map(&self) -> BTreeMap<ArcId, F> {
        self.arcs()
            .filter(|&a| !self.arc(a).flow.is_zero())
            .map(|a| (a, self.arc(a).flow))
            .collect()
    }

    /// Return the vertices reachable from the source in the residual graph.
    ///
    /// After a maximum flow has been computed, these vertices form the
    /// source side of a minimal cut.
    pub fn mincut(&self) -> Vec<VertexId> {
        let mut reached = vec![false; self.num_vertices()];
        let mut queue = VecDeque::with_capacity(self.num_vertices());
        reached[self.source.index()] = true;
        queue.push_back(self.source);
        while let Some(u) = queue.pop_front() {
            for &a in self.outgoing(u) {
                let v = self.arcs[a.index()].to;
                if !reached[v.index()] && self.arcs[a.index()].capacity > F::zero() {
                    reached[v.index()] = true;
                    queue.push_back(v);
                }
            }
        }
        self.vertices().filter(|v| reached[v.index()]).collect()
    }

    /// Reset the search data of `v`.
    ///
    /// The cursor, the visit flags, the parent links and the level are
    /// reset. Distance label and excess are kept.
    pub fn reset_vertex_traversal(&mut self, v: VertexId) {
        self.vertices[v.index()].state.reset_search();
    }

    /// Reset the search data of all vertices.
    ///
    /// See [`FlowGraph::reset_vertex_traversal`].
    pub fn reset_traversal(&mut self) {
        for vdata in &mut self.vertices {
            vdata.state.reset_search();
        }
    }

    /// Restore the state the graph has been built with.
    ///
    /// All arcs get their initial capacity and zero flow, all vertices get a
    /// fresh [`TraversalState`]. Calling this method twice has no further
    /// effect.
    pub fn reset(&mut self) -> &mut Self {
        for adata in &mut self.arcs {
            adata.capacity = adata.init_capacity;
            adata.flow = F::zero();
        }
        for vdata in &mut self.vertices {
            vdata.state = TraversalState::new();
        }
        self
    }
}
