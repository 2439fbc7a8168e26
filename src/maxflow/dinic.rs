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


//! This module implements Dinic' max flow algorithm
//!
//! Each step of the algorithm is one phase. A phase builds the level graph
//! of the residual graph, i.e. the arcs `(u,v)` with positive residual
//! capacity and `level(v) = level(u) + 1` where the levels are the BFS
//! distances from the source, and computes a blocking flow in it. The
//! algorithm stops as soon as the sink is not reachable anymore.
//!
//! The blocking flow is computed by repeated depth-first searches along
//! the arcs of the level graph. The incident arcs of each vertex are kept
//! in doubly linked lists, so saturated arcs and dead ends (vertices
//! without outgoing arcs) can be removed in constant time per arc.
//!
//! # Example
//!
//! ```
//! use rs_maxflow::maxflow::{dinic, Dinic, MaxFlow, StepResult};
//! use rs_maxflow::{FlowGraph, VertexKind};
//!
//! //      a---2-->b
//! //     ^|\      ^\
//! //    / | \     | 4
//! //   5  |  \    |  \
//! //  /   |   |   |   v
//! // s    1   1   2    t
//! //  \   |   |   |   ^
//! //   5  |    \  |  /
//! //    \ |     \ | 5
//! //     vv      v|/
//! //      c---2-->d
//! let mut g = FlowGraph::new_with(|b| {
//!     let s = b.add_vertex(VertexKind::Source);
//!     let vs = b.add_vertices(4);
//!     let t = b.add_vertex(VertexKind::Sink);
//!     let (a, bb, c, d) = (vs[0], vs[1], vs[2], vs[3]);
//!     b.add_arc(s, a, 5)?;
//!     b.add_arc(s, c, 5)?;
//!     b.add_arc(a, bb, 2)?;
//!     b.add_arc(a, c, 1)?;
//!     b.add_arc(a, d, 1)?;
//!     b.add_arc(c, d, 2)?;
//!     b.add_arc(d, bb, 2)?;
//!     b.add_arc(bb, t, 4)?;
//!     b.add_arc(d, t, 5)?;
//!     Ok(())
//! })
//! .unwrap();
//!
//! let (value, _, mut mincut) = dinic(&mut g).unwrap();
//! assert_eq!(value, 5);
//! mincut.sort();
//! assert_eq!(mincut.iter().map(|v| v.index()).collect::<Vec<_>>(), vec![0, 1, 3]);
//!
//! g.reset();
//! let mut alg = Dinic::init(&mut g);
//! let mut phases = vec![];
//! while let StepResult::Progress(phase) = alg.step().unwrap() {
//!     phases.push(phase.blocking_flow.total);
//! }
//! assert_eq!(phases.iter().sum::<i32>(), 5);
//! ```

use super::{augment, MaxFlow, StepResult};
use crate::collections::{DoublyLinkedLists, ElementId, Frontier, ListId, Queue, Stack};
use crate::error::Result;
use crate::graph::{ArcId, Flow, FlowGraph, VertexId};
use crate::logger::{Logger, NullLogger};
use crate::search;

use std::collections::BTreeMap;

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// An arc in the incidence list of one of its end points.
#[derive(Clone, Copy, Debug)]
struct LevelArc {
    arc: ArcId,
    /// The element of the same arc in the list of the other end point.
    mirror: Option<ElementId>,
}

/// The level graph of a phase.
///
/// Every vertex has a list of admissible outgoing and a list of admissible
/// incoming arcs. Both list elements of an arc reference each other.
#[derive(Clone, Debug)]
pub struct LevelGraph {
    lists: DoublyLinkedLists<LevelArc>,
    /// The element of each arc in the outgoing list of its tail.
    elements: Vec<Option<ElementId>>,
    /// Whether a vertex has not been pruned.
    alive: Vec<bool>,
    /// All arcs the level graph has been built with.
    arcs: Vec<ArcId>,
    stack: Stack<VertexId>,
}

impl LevelGraph {
    /// Build the level graph of the current residual graph.
    ///
    /// Runs a breadth-first search from the source, the levels remain
    /// stored in the traversal state of the vertices. Returns `None` if the
    /// sink is not reachable.
    pub fn build<F: Flow>(g: &mut FlowGraph<F>) -> Result<Option<LevelGraph>> {
        g.reset_traversal();
        search::start(Queue::with_capacity(g.num_vertices()), &mut *g, None)?.run(None)?;
        if !g.state(g.sink()).seen {
            return Ok(None);
        }

        let n = g.num_vertices();
        let mut lg = LevelGraph {
            lists: DoublyLinkedLists::with_lists(2 * n),
            elements: vec![None; g.num_arcs()],
            alive: g.vertices().map(|v| g.state(v).seen).collect(),
            arcs: vec![],
            stack: Stack::with_capacity(n),
        };

        for a in g.arcs() {
            let adata = g.arc(a);
            let (su, sv) = (g.state(adata.from), g.state(adata.to));
            if su.seen && sv.seen && sv.level == su.level + 1 && adata.capacity > F::zero() {
                let out = lg.outgoing_list(adata.from);
                let inc = lg.incoming_list(adata.to);
                let eout = lg.lists.add(out, LevelArc { arc: a, mirror: None });
                let ein = lg.lists.add(inc, LevelArc { arc: a, mirror: Some(eout) });
                lg.lists.value_mut(eout).mirror = Some(ein);
                lg.elements[a.index()] = Some(eout);
                lg.arcs.push(a);
            }
        }

        // keep the levels, the blocking flow search uses the visit flags
        for v in g.vertices() {
            g.state_mut(v).clear_visit();
        }

        Ok(Some(lg))
    }

    fn outgoing_list(&self, v: VertexId) -> ListId {
        self.lists.list(2 * v.index())
    }

    fn incoming_list(&self, v: VertexId) -> ListId {
        self.lists.list(2 * v.index() + 1)
    }

    /// Return all arcs the level graph has been built with.
    pub fn arcs(&self) -> &[ArcId] {
        &self.arcs
    }

    /// Return the number of arcs not removed yet.
    pub fn num_arcs(&self) -> usize {
        self.arcs.iter().filter(|&&a| self.contains_arc(a)).count()
    }

    /// Return the remaining outgoing arcs of `v`.
    pub fn outgoing(&self, v: VertexId) -> Vec<ArcId> {
        self.lists.iter(self.outgoing_list(v)).map(|(_, la)| la.arc).collect()
    }

    /// Return the remaining incoming arcs of `v`.
    pub fn incoming(&self, v: VertexId) -> Vec<ArcId> {
        self.lists.iter(self.incoming_list(v)).map(|(_, la)| la.arc).collect()
    }

    pub fn contains_arc(&self, a: ArcId) -> bool {
        self.elements
            .get(a.index())
            .and_then(|&e| e)
            .map_or(false, |e| self.lists.contains(e))
    }

    /// Return `true` if `v` is reachable and has not been pruned.
    pub fn contains_vertex(&self, v: VertexId) -> bool {
        self.alive.get(v.index()).cloned().unwrap_or(false)
    }

    fn first_arc(&self, v: VertexId) -> Option<ArcId> {
        self.lists
            .first(self.outgoing_list(v))
            .map(|e| self.lists.value(e).arc)
    }

    fn remove_element(&mut self, e: ElementId) {
        let mirror = self.lists.value(e).mirror;
        self.lists.remove(e);
        if let Some(m) = mirror {
            self.lists.remove(m);
        }
    }

    /// Remove arc `a` from the lists of both end points.
    ///
    /// Returns `false` if `a` is not in the level graph (anymore).
    pub fn remove_arc(&mut self, a: ArcId) -> bool {
        match self.elements.get(a.index()).cloned() {
            Some(Some(e)) if self.lists.contains(e) => {
                self.remove_element(e);
                true
            }
            _ => false,
        }
    }

    /// Remove `v` and all its incident arcs.
    pub fn remove_vertex(&mut self, v: VertexId) {
        self.alive[v.index()] = false;
        while let Some(e) = self.lists.first(self.outgoing_list(v)) {
            self.remove_element(e);
        }
        while let Some(e) = self.lists.first(self.incoming_list(v)) {
            self.remove_element(e);
        }
    }

    /// Search a path from the source to the sink.
    ///
    /// The search always follows the first remaining outgoing arc. Vertices
    /// without outgoing arcs are dead ends and removed from the level graph.
    /// All visited vertices are appended to `visited` and marked as seen,
    /// their parent links describe the path.
    fn find_path<F, L>(
        &mut self,
        g: &mut FlowGraph<F>,
        logger: &mut L,
        visited: &mut Vec<VertexId>,
    ) -> Result<Option<Vec<ArcId>>>
    where
        F: Flow,
        L: Logger,
    {
        let s = g.source();
        let t = g.sink();
        if !self.contains_vertex(s) {
            return Ok(None);
        }

        let mut path = vec![];
        self.stack.clear();
        self.stack.push(s);
        g.state_mut(s).seen = true;
        visited.push(s);

        while let Some(&v) = self.stack.top() {
            if v == t {
                return Ok(Some(path));
            }
            match self.first_arc(v) {
                Some(a) => {
                    let w = g.arc(a).to;
                    debug_assert!(self.contains_vertex(w));
                    let st = g.state_mut(w);
                    st.seen = true;
                    st.parent = Some(v);
                    st.parent_arc = Some(a);
                    self.stack.push(w);
                    path.push(a);
                    visited.push(w);
                }
                None => {
                    logger.log(format_args!("Remove dead end {}", v));
                    self.remove_vertex(v);
                    g.state_mut(v).finished = true;
                    self.stack.pop()?;
                    path.pop();
                }
            }
        }

        Ok(None)
    }
}

/// The blocking flow of one phase.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct BlockingFlow<F> {
    /// The augmenting paths in the order they have been found.
    pub paths: Vec<Vec<ArcId>>,
    /// The flow increment of each path.
    pub increments: Vec<F>,
    /// The new flow on all arcs changed in this phase (including reverse arcs).
    pub flow: BTreeMap<ArcId, F>,
    /// The value of the blocking flow.
    pub total: F,
}

/// The result of a phase of Dinic' algorithm.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct DinicPhase<F> {
    /// The number of the phase, starting at 1.
    pub phase: usize,
    /// The arcs of the level graph.
    pub level_graph: Vec<ArcId>,
    pub blocking_flow: BlockingFlow<F>,
    /// The flow value after this phase.
    pub value: F,
}

/// Max-flow algorithm of Dinic.
pub struct Dinic<'a, F, L = NullLogger>
where
    F: Flow,
    L: Logger,
{
    g: &'a mut FlowGraph<F>,
    logger: L,
    phase: usize,
    done: bool,
}

impl<'a, F> Dinic<'a, F, NullLogger>
where
    F: Flow,
{
    /// Start the algorithm on `g`.
    pub fn init(g: &'a mut FlowGraph<F>) -> Self {
        Dinic::with_logger(g, NullLogger)
    }
}

impl<'a, F, L> Dinic<'a, F, L>
where
    F: Flow,
    L: Logger,
{
    /// Start the algorithm on `g` with narration to `logger`.
    pub fn with_logger(g: &'a mut FlowGraph<F>, mut logger: L) -> Self {
        g.reset_traversal();
        logger.group(format_args!("Algorithm - Dinic"));
        logger.log(format_args!("Initialized the graph with the zero flow"));
        Dinic {
            g,
            logger,
            phase: 0,
            done: false,
        }
    }

    pub fn logger(&self) -> &L {
        &self.logger
    }

    pub fn into_logger(self) -> L {
        self.logger
    }

    /// Return the number of phases executed so far.
    pub fn num_phases(&self) -> usize {
        self.phase
    }

    fn final_snapshot(&self) -> DinicPhase<F> {
        DinicPhase {
            phase: self.phase,
            level_graph: vec![],
            blocking_flow: BlockingFlow {
                paths: vec![],
                increments: vec![],
                flow: BTreeMap::new(),
                total: F::zero(),
            },
            value: self.g.value(),
        }
    }

    /// Compute a blocking flow in `lg`.
    fn blocking_flow(&mut self, lg: &mut LevelGraph) -> Result<BlockingFlow<F>> {
        let mut blocking = BlockingFlow {
            paths: vec![],
            increments: vec![],
            flow: BTreeMap::new(),
            total: F::zero(),
        };
        let mut visited = vec![];

        self.logger.group(format_args!("Compute a blocking flow"));
        while let Some(path) = lg.find_path(self.g, &mut self.logger, &mut visited)? {
            let df = match path.iter().map(|&a| self.g.arc(a).capacity).min() {
                Some(df) => df,
                None => break,
            };
            debug_assert!(df > F::zero());
            self.logger
                .log(format_args!("Found a flow augmenting path with a capacity of {}", df));
            augment(self.g, &mut self.logger, &path, df, &mut blocking.flow)?;

            for &a in &path {
                if self.g.arc(a).capacity.is_zero() {
                    lg.remove_arc(a);
                }
            }
            for v in visited.drain(..) {
                self.g.state_mut(v).clear_visit();
            }

            blocking.paths.push(path);
            blocking.increments.push(df);
            blocking.total += df;
        }
        for v in visited.drain(..) {
            self.g.state_mut(v).clear_visit();
        }

        let incs: Vec<String> = blocking.increments.iter().map(|x| x.to_string()).collect();
        self.logger
            .log(format_args!("Blocking flow: {} = {}", incs.join(" + "), blocking.total));
        self.logger.group_end();

        Ok(blocking)
    }
}

impl<'a, F, L> MaxFlow<F> for Dinic<'a, F, L>
where
    F: Flow,
    L: Logger,
{
    type Step = DinicPhase<F>;

    fn step(&mut self) -> Result<StepResult<DinicPhase<F>>> {
        if self.done {
            return Ok(StepResult::Done(self.final_snapshot()));
        }

        self.logger.group(format_args!("Phase {}", self.phase + 1));
        self.logger.log(format_args!("Build the level graph by breadth first search"));
        let mut lg = match LevelGraph::build(self.g)? {
            Some(lg) => lg,
            None => {
                let t = self.g.sink();
                self.logger.log(format_args!("The sink ({}) is not reachable", t));
                self.logger.group_end();
                self.g.reset_traversal();
                self.done = true;
                self.logger
                    .log(format_args!("Terminate because there is no flow-augmenting path"));
                self.logger.group_end();
                log::debug!(
                    "Dinic finished after {} phases, value {}",
                    self.phase,
                    self.g.value()
                );
                return Ok(StepResult::Done(self.final_snapshot()));
            }
        };
        self.phase += 1;
        self.logger.log(format_args!(
            "The level graph has {} arcs, the sink has level {}",
            lg.arcs().len(),
            self.g.state(self.g.sink()).level
        ));
        log::trace!("phase {}: level graph with {} arcs", self.phase, lg.arcs().len());

        let blocking_flow = self.blocking_flow(&mut lg)?;
        self.logger.group_end();

        Ok(StepResult::Progress(DinicPhase {
            phase: self.phase,
            level_graph: lg.arcs,
            blocking_flow,
            value: self.g.value(),
        }))
    }

    fn as_graph(&self) -> &FlowGraph<F> {
        self.g
    }
}

/// Solve the maxflow problem using Dinic' algorithm.
///
/// The graph is reset first. The function returns the flow value, the flow
/// on each arc and the vertices in a minimal cut.
pub fn dinic<F>(g: &mut FlowGraph<F>) -> Result<(F, Vec<(ArcId, F)>, Vec<VertexId>)>
where
    F: Flow,
{
    g.reset();
    let value = Dinic::init(g).run()?;
    Ok((value, g.flow(), g.mincut()))
}

#[cfg(test)]
mod tests {
    use super::LevelGraph;
    use crate::logger::{NullLogger, Recorder};
    use crate::maxflow::{Dinic, MaxFlow, StepResult};
    use crate::{FlowGraph, VertexId, VertexKind};

    /// s -> x -> y is a dead end, s -> a -> b -> t is the only path.
    fn dead_end() -> (FlowGraph<i32>, Vec<VertexId>) {
        let mut vs = vec![];
        let g = FlowGraph::new_with(|b| {
            let s = b.add_vertex(VertexKind::Source);
            vs = b.add_vertices(4);
            let t = b.add_vertex(VertexKind::Sink);
            let (x, y, a, bb) = (vs[0], vs[1], vs[2], vs[3]);
            b.add_arc(s, x, 1)?;
            b.add_arc(x, y, 1)?;
            b.add_arc(s, a, 1)?;
            b.add_arc(a, bb, 1)?;
            b.add_arc(bb, t, 1)?;
            Ok(())
        })
        .unwrap();
        (g, vs)
    }

    #[test]
    fn test_level_graph() {
        let (mut g, vs) = dead_end();
        let lg = LevelGraph::build(&mut g).unwrap().unwrap();
        // all forward arcs are admissible
        assert_eq!(lg.arcs().len(), 5);
        assert_eq!(lg.num_arcs(), 5);
        assert_eq!(g.state(vs[1]).level, 2);
        assert_eq!(g.state(g.sink()).level, 3);
        assert!(g.vertices().all(|v| !g.state(v).seen));
        for &a in lg.arcs() {
            let (u, v) = (g.arc(a).from, g.arc(a).to);
            assert!(lg.outgoing(u).contains(&a));
            assert!(lg.incoming(v).contains(&a));
        }
    }

    #[test]
    fn test_dead_end_removed() {
        let (mut g, vs) = dead_end();
        let (x, y) = (vs[0], vs[1]);
        let s = g.source();
        let mut lg = LevelGraph::build(&mut g).unwrap().unwrap();

        let mut visited = vec![];
        let path = lg.find_path(&mut g, &mut NullLogger, &mut visited).unwrap().unwrap();
        assert_eq!(path.len(), 3);
        assert!(visited.contains(&x) && visited.contains(&y));
        assert!(!lg.contains_vertex(x));
        assert!(!lg.contains_vertex(y));
        assert_eq!(lg.outgoing(s).len(), 1);
        assert_eq!(lg.num_arcs(), 3);

        for v in visited.drain(..) {
            g.state_mut(v).clear_visit();
        }
        let path2 = lg.find_path(&mut g, &mut NullLogger, &mut visited).unwrap().unwrap();
        assert_eq!(path, path2);
        assert!(!visited.contains(&x) && !visited.contains(&y));

        // saturating the path removes everything
        for &a in &path {
            g.increase_flow(a, 1).unwrap();
            assert!(lg.remove_arc(a));
            assert!(!lg.remove_arc(a));
        }
        visited.clear();
        assert_eq!(lg.find_path(&mut g, &mut NullLogger, &mut visited).unwrap(), None);
        assert!(!lg.contains_vertex(s));
        assert_eq!(lg.num_arcs(), 0);
    }

    #[test]
    fn test_unreachable_sink() {
        let (mut g, vs) = dead_end();
        g.increase_flow(g.outgoing(vs[3])[1], 1).unwrap();
        assert!(LevelGraph::build(&mut g).unwrap().is_none());
    }

    #[test]
    fn test_phases() {
        // two paths of different lengths need two phases
        let mut g = FlowGraph::<u32>::new_with(|b| {
            let s = b.add_vertex(VertexKind::Source);
            let vs = b.add_vertices(3);
            let t = b.add_vertex(VertexKind::Sink);
            b.add_arc(s, vs[0], 2)?;
            b.add_arc(vs[0], t, 1)?;
            b.add_arc(vs[0], vs[1], 1)?;
            b.add_arc(vs[1], vs[2], 1)?;
            b.add_arc(vs[2], t, 1)?;
            Ok(())
        })
        .unwrap();

        let mut rec = Recorder::new();
        let mut alg = Dinic::with_logger(&mut g, &mut rec);
        let p1 = alg.step().unwrap().into_snapshot();
        assert_eq!(p1.phase, 1);
        assert_eq!(p1.blocking_flow.increments, vec![1]);
        assert_eq!(p1.value, 1);
        let p2 = alg.step().unwrap().into_snapshot();
        assert_eq!(p2.blocking_flow.paths[0].len(), 4);
        assert_eq!(p2.value, 2);
        match alg.step().unwrap() {
            StepResult::Done(last) => assert_eq!(last.value, 2),
            _ => panic!("expected termination"),
        }
        assert_eq!(alg.num_phases(), 2);
        assert!(alg.step().unwrap().is_done());
        assert!(rec.to_string().contains("Blocking flow: 1 = 1"));
    }
}
