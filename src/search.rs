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


//! # Generic graph traversal.
//!
//! A single search routine that visits the vertices of a [`FlowGraph`]
//! reachable over arcs with positive residual capacity. The order is
//! determined by the [`Frontier`] passed in: a [`Stack`] yields a
//! depth-first search, a [`Queue`] a breadth-first search.
//!
//! The search is executed step by step. Each step examines one arc (or
//! finishes one vertex) and returns a snapshot of the accumulated
//! [`TraversalOutput`]. The search stores its bookkeeping (cursor, visit
//! flags, parent links, level) directly in the [`TraversalState`] of the
//! vertices, so the graph should be in reset state when a search starts.
//!
//! [`TraversalState`]: crate::graph::TraversalState
//!
//! # Example
//!
//! ```
//! use rs_maxflow::{FlowGraph, VertexKind};
//! use rs_maxflow::collections::Queue;
//! use rs_maxflow::search;
//!
//! let mut g = FlowGraph::new_with(|b| {
//!     let s = b.add_vertex(VertexKind::Source);
//!     let v = b.add_vertex(VertexKind::Other);
//!     let t = b.add_vertex(VertexKind::Sink);
//!     b.add_arc(s, v, 2)?;
//!     b.add_arc(v, t, 1)?;
//!     Ok(())
//! })
//! .unwrap();
//! let t = g.sink();
//!
//! let mut bfs = search::start(Queue::new(), &mut g, None).unwrap();
//! let output = bfs.run(Some(t)).unwrap();
//! assert_eq!(output.lexicographical.last(), Some(&t));
//! assert_eq!(output.min_capacity, Some(1));
//! ```

use crate::collections::{Discipline, Frontier, Queue, Stack};
use crate::error::{Error, Result};
use crate::graph::{ArcId, Flow, FlowGraph, VertexId};

use std::cmp::min;

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// The direction in which arcs are followed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Go from `u` to `v` over arc `(u,v)` if `(u,v)` has residual capacity.
    Forward,
    /// Go from `u` to `v` if the reverse arc `(v,u)` has residual capacity.
    ///
    /// This visits all vertices that can reach the start vertex in the
    /// residual graph.
    Backward,
}

/// The accumulated result of a traversal.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct TraversalOutput<F> {
    /// All vertices in discovery order, starting with the start vertex.
    pub lexicographical: Vec<VertexId>,
    /// All finished vertices in finishing order.
    pub parenthetical: Vec<VertexId>,
    /// All arcs over which a vertex has been discovered.
    pub arborescence: Vec<ArcId>,
    /// The discovery arcs of the vertices that are not finished yet.
    ///
    /// For a depth-first search this is the path from the start vertex to
    /// the top of the stack.
    pub arcs: Vec<ArcId>,
    /// The minimal residual capacity on the discovery path of the last
    /// unfinished vertex in `arcs`, for a depth-first search the minimum
    /// along `arcs`. If all discovered vertices are finished, the minimum
    /// over all discovery arcs. `None` stands for infinity.
    pub min_capacity: Option<F>,
    /// The arc examined in the last step.
    pub current_arc: Option<ArcId>,
    /// The vertex examined in the last step.
    pub current_vertex: Option<VertexId>,
    /// Whether the last step discovered or finished a vertex.
    pub progress: bool,
}

impl<F> TraversalOutput<F> {
    fn new(s: VertexId) -> Self {
        TraversalOutput {
            lexicographical: vec![s],
            parenthetical: vec![],
            arborescence: vec![],
            arcs: vec![],
            min_capacity: None,
            current_arc: None,
            current_vertex: None,
            progress: true,
        }
    }

    /// Return the vertex discovered last.
    pub fn last_discovered(&self) -> Option<VertexId> {
        self.lexicographical.last().cloned()
    }
}

/// A step-wise graph traversal.
pub struct Traversal<'a, Fr, F>
where
    Fr: Frontier<VertexId>,
{
    g: &'a mut FlowGraph<F>,
    frontier: Fr,
    discipline: Discipline,
    start: VertexId,
    direction: Direction,
    output: TraversalOutput<F>,
    /// Path minima of the unfinished vertices, aligned with `output.arcs`.
    min_capacities: Vec<F>,
    /// Minimal capacity of all discovery arcs.
    overall_min: Option<F>,
}

/// Start a traversal at `start` (or at the source if `start` is `None`).
///
/// The frontier is cleared before the start vertex is pushed. Fails with
/// [`Error::UnsupportedFrontier`] if the frontier is neither LIFO nor FIFO.
pub fn start<'a, Fr, F>(mut frontier: Fr, g: &'a mut FlowGraph<F>, start: Option<VertexId>) -> Result<Traversal<'a, Fr, F>>
where
    Fr: Frontier<VertexId>,
    F: Flow,
{
    let discipline = frontier.discipline().ok_or(Error::UnsupportedFrontier)?;
    let s = start.unwrap_or_else(|| g.source());
    if !g.contains(s) {
        return Err(Error::InvalidVertex { vertex: s });
    }

    frontier.clear();
    frontier.push(s);
    {
        let st = g.state_mut(s);
        st.seen = true;
        st.parent = None;
        st.parent_arc = None;
        st.parent_arc_min_capacity = None;
        st.level = 0;
    }

    Ok(Traversal {
        g,
        frontier,
        discipline,
        start: s,
        direction: Direction::Forward,
        output: TraversalOutput::new(s),
        min_capacities: vec![],
        overall_min: None,
    })
}

/// Start a depth-first search from the source.
pub fn dfs<F: Flow>(g: &mut FlowGraph<F>) -> Result<Traversal<'_, Stack<VertexId>, F>> {
    start(Stack::new(), g, None)
}

/// Start a breadth-first search from the source.
pub fn bfs<F: Flow>(g: &mut FlowGraph<F>) -> Result<Traversal<'_, Queue<VertexId>, F>> {
    start(Queue::new(), g, None)
}

impl<'a, Fr, F> Traversal<'a, Fr, F>
where
    Fr: Frontier<VertexId>,
    F: Flow,
{
    /// Set the direction in which arcs are followed.
    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Return the underlying graph.
    pub fn as_graph(&self) -> &FlowGraph<F> {
        self.g
    }

    /// Return the output accumulated so far.
    pub fn output(&self) -> &TraversalOutput<F> {
        &self.output
    }

    /// Return the output accumulated so far.
    pub fn into_output(self) -> TraversalOutput<F> {
        self.output
    }

    /// Return `true` if the frontier is exhausted.
    pub fn is_finished(&self) -> bool {
        self.frontier.is_empty()
    }

    /// Execute one step.
    ///
    /// Examines the next arc of the vertex at the top of the frontier.
    /// Returns `None` if the traversal is finished, otherwise the output
    /// after this step. A step that neither discovers nor finishes a vertex
    /// has `progress == false`.
    pub fn step(&mut self) -> Result<Option<&TraversalOutput<F>>> {
        let v = match self.frontier.top() {
            Some(&v) => v,
            None => return Ok(None),
        };
        let a = self.g.next_arc(v);

        self.output.current_arc = a;
        self.output.current_vertex = Some(v);
        self.output.progress = true;

        match a {
            None => {
                self.g.state_mut(v).finished = true;
                self.frontier.pop()?;
                if v != self.start {
                    match self.discipline {
                        Discipline::Lifo => {
                            self.output.arcs.pop();
                            self.min_capacities.pop();
                        }
                        Discipline::Fifo => {
                            self.output.arcs.remove(0);
                            self.min_capacities.remove(0);
                        }
                    }
                }
                self.output.parenthetical.push(v);
            }
            Some(a) => {
                let (arc, w) = match self.direction {
                    Direction::Forward => (a, self.g.arc(a).to),
                    Direction::Backward => (self.g.arc(a).reverse, self.g.arc(a).to),
                };
                let cap = self.g.arc(arc).capacity;
                if !self.g.state(w).seen && cap > F::zero() {
                    let (vlevel, vmin) = {
                        let st = self.g.state(v);
                        (st.level, st.parent_arc_min_capacity)
                    };
                    let path_min = vmin.map_or(cap, |m| min(m, cap));
                    {
                        let st = self.g.state_mut(w);
                        st.seen = true;
                        st.parent = Some(v);
                        st.parent_arc = Some(arc);
                        st.parent_arc_min_capacity = Some(path_min);
                        st.level = vlevel.saturating_add(1);
                    }
                    self.frontier.push(w);

                    self.min_capacities.push(path_min);
                    self.overall_min = Some(self.overall_min.map_or(cap, |m| min(m, cap)));

                    self.output.lexicographical.push(w);
                    self.output.arborescence.push(arc);
                    self.output.arcs.push(arc);
                } else {
                    self.output.progress = false;
                }
            }
        }

        self.output.min_capacity = self.min_capacities.last().cloned().or(self.overall_min);

        Ok(Some(&self.output))
    }

    /// Run the traversal.
    ///
    /// If `termination` is given, the traversal stops right after the step
    /// that discovered `termination`. Otherwise it runs until the frontier
    /// is exhausted.
    pub fn run(&mut self, termination: Option<VertexId>) -> Result<&TraversalOutput<F>> {
        while let Some(output) = self.step()? {
            if termination.is_some() && output.last_discovered() == termination {
                break;
            }
        }
        Ok(&self.output)
    }
}

/// Return the arcs of the discovery path to `dst`.
///
/// The path is obtained by following the parent arcs stored in the
/// traversal state, i.e. the arcs are returned starting from the last one.
pub fn path_from_parents<F: Flow>(g: &FlowGraph<F>, dst: VertexId) -> impl Iterator<Item = ArcId> + '_ {
    PathIter { g, u: dst }
}

struct PathIter<'a, F> {
    g: &'a FlowGraph<F>,
    u: VertexId,
}

impl<'a, F: Flow> Iterator for PathIter<'a, F> {
    type Item = ArcId;

    fn next(&mut self) -> Option<ArcId> {
        let st = self.g.state(self.u);
        let a = st.parent_arc?;
        self.u = st.parent?;
        Some(a)
    }
}

#[cfg(test)]
mod tests {
    use super::{bfs, dfs, path_from_parents, start, Direction};
    use crate::collections::{Discipline, Frontier, Queue, Stack};
    use crate::error::Result;
    use crate::{Error, FlowGraph, VertexKind};

    /// A container without an order.
    struct Bag(Vec<crate::VertexId>);

    impl Frontier<crate::VertexId> for Bag {
        fn len(&self) -> usize {
            self.0.len()
        }

        fn clear(&mut self) {
            self.0.clear()
        }

        fn push(&mut self, u: crate::VertexId) {
            self.0.push(u)
        }

        fn pop(&mut self) -> Result<crate::VertexId> {
            self.0.pop().ok_or(Error::EmptyContainerPop)
        }

        fn top(&self) -> Option<&crate::VertexId> {
            self.0.last()
        }
    }

    fn chain() -> FlowGraph<i32> {
        // v1 -> v2 -> v3, v3 -> v2, v2 -> v1
        FlowGraph::new_with(|b| {
            let v1 = b.add_vertex(VertexKind::Source);
            let v2 = b.add_vertex(VertexKind::Other);
            let v3 = b.add_vertex(VertexKind::Sink);
            b.add_arc_pair(v1, v2, 1, 1)?;
            b.add_arc_pair(v2, v3, 1, 1)?;
            Ok(())
        })
        .unwrap()
    }

    #[test]
    fn test_unsupported_frontier() {
        let mut g = chain();
        assert_eq!(start(Bag(vec![]), &mut g, None).err(), Some(Error::UnsupportedFrontier));
        assert!(start(Stack::new(), &mut g, None).is_ok());
        g.reset();
        assert!(start(Queue::new(), &mut g, None).is_ok());
    }

    #[test]
    fn test_early_termination() {
        let mut g = chain();
        let v1 = g.source();
        let v3 = g.sink();
        let v2 = g.vertices().nth(1).unwrap();

        let mut dfs = start(Stack::new(), &mut g, None).unwrap();
        let output = dfs.run(Some(v2)).unwrap();
        assert!(output.lexicographical.contains(&v1));
        assert!(output.lexicographical.contains(&v2));
        assert!(!output.lexicographical.contains(&v3));
    }

    #[test]
    fn test_full_traversal() {
        let mut g = chain();
        let mut dfs = start(Stack::new(), &mut g, None).unwrap();
        let output = dfs.run(None).unwrap().clone();
        assert!(dfs.is_finished());
        assert_eq!(output.lexicographical.len(), 3);
        // finishing order of a dfs on a path is reversed
        let mut par = output.parenthetical.clone();
        par.reverse();
        assert_eq!(par, output.lexicographical);
        assert!(output.arcs.is_empty());
        assert_eq!(output.arborescence.len(), 2);
        assert!(g.vertices().all(|v| g.state(v).seen && g.state(v).finished));
        assert_eq!(g.state(g.sink()).level, 2);
    }

    #[test]
    fn test_no_progress_steps() {
        let mut g = chain();
        let mut bfs = start(Queue::new(), &mut g, None).unwrap();
        // v1 -> v2 discovers v2
        assert!(bfs.step().unwrap().unwrap().progress);
        // v1 has no more arcs, v1 finishes
        assert!(bfs.step().unwrap().unwrap().progress);
        // v2 -> v1 (seen)
        let out = bfs.step().unwrap().unwrap();
        assert!(!out.progress);
        assert_eq!(out.current_vertex, Some(g_vertex(1)));
    }

    fn g_vertex(i: usize) -> crate::VertexId {
        crate::VertexId::new(i)
    }

    #[test]
    fn test_zero_capacity_not_discovered() {
        // source -> v1 (1), v1 -> v2 (1), v1 -> v3 (1), v2 -> sink (0), v3 -> sink (0),
        // every reverse arc has capacity 1
        let mut g = FlowGraph::new_with(|b| {
            let s = b.add_vertex(VertexKind::Source);
            let vs = b.add_vertices(3);
            let t = b.add_vertex(VertexKind::Sink);
            b.add_arc_pair(s, vs[0], 1, 1)?;
            b.add_arc_pair(vs[0], vs[1], 1, 1)?;
            b.add_arc_pair(vs[0], vs[2], 1, 1)?;
            b.add_arc_pair(vs[1], t, 0, 1)?;
            b.add_arc_pair(vs[2], t, 0, 1)?;
            Ok(())
        })
        .unwrap();
        let t = g.sink();

        let mut bfs = start(Queue::new(), &mut g, None).unwrap();
        let output = bfs.run(Some(t)).unwrap();
        assert!(!output.lexicographical.contains(&t));
        assert_eq!(output.lexicographical.len(), 4);
        assert!(!g.state(t).seen);
    }

    #[test]
    fn test_min_capacity_two_branches() {
        // Two branches from the source, the first one (explored first by
        // the dfs) ends in a dead end:
        //
        //   s -5-> a -1-> b -4-> c          (dead end)
        //   s -3-> d -2-> e -6-> t
        //          d -7-> f
        let mut g = FlowGraph::new_with(|b| {
            let s = b.add_vertex(VertexKind::Source);
            let vs = b.add_vertices(6);
            let t = b.add_vertex(VertexKind::Sink);
            let (a, bb, c, d, e, f) = (vs[0], vs[1], vs[2], vs[3], vs[4], vs[5]);
            b.add_arc(s, a, 5)?;
            b.add_arc(s, d, 3)?;
            b.add_arc(a, bb, 1)?;
            b.add_arc(bb, c, 4)?;
            b.add_arc(d, e, 2)?;
            b.add_arc(d, f, 7)?;
            b.add_arc(e, t, 6)?;
            Ok(())
        })
        .unwrap();
        assert_eq!(g.num_vertices(), 8);
        let t = g.sink();

        let output = start(Stack::new(), &mut g, None).unwrap().run(Some(t)).unwrap().clone();
        assert_eq!(output.last_discovered(), Some(t));
        assert_eq!(output.min_capacity, Some(2));
        assert_eq!(output.arcs.len(), 3);
        assert_eq!(g.state(t).parent_arc_min_capacity, Some(2));

        let mut path: Vec<_> = path_from_parents(&g, t).collect();
        path.reverse();
        assert_eq!(path, output.arcs);
    }

    #[test]
    fn test_backward() {
        let mut g = FlowGraph::new_with(|b| {
            let s = b.add_vertex(VertexKind::Source);
            let v = b.add_vertex(VertexKind::Other);
            let w = b.add_vertex(VertexKind::Other);
            let t = b.add_vertex(VertexKind::Sink);
            b.add_arc(s, v, 1)?;
            b.add_arc(v, t, 1)?;
            b.add_arc(t, w, 1)?;
            Ok(())
        })
        .unwrap();
        let (s, t) = (g.source(), g.sink());
        let w = g.vertices().nth(2).unwrap();

        let output = start(Queue::new(), &mut g, Some(t))
            .unwrap()
            .direction(Direction::Backward)
            .run(None)
            .unwrap()
            .clone();
        // s and v reach t, w does not
        assert_eq!(output.lexicographical.len(), 3);
        assert!(!output.lexicographical.contains(&w));
        assert_eq!(g.state(s).level, 2);
        // the recorded arcs are residual arcs pointing towards the sink
        for &a in &output.arborescence {
            assert_eq!(g.arc(a).to, g.state(g.arc(a).from).parent.unwrap());
        }
    }

    #[test]
    fn test_dfs_bfs_orders() {
        // s -> a, s -> b, a -> t
        let mut g = FlowGraph::new_with(|b| {
            let s = b.add_vertex(VertexKind::Source);
            let vs = b.add_vertices(2);
            let t = b.add_vertex(VertexKind::Sink);
            b.add_arc(s, vs[0], 1)?;
            b.add_arc(s, vs[1], 1)?;
            b.add_arc(vs[0], t, 1)?;
            Ok(())
        })
        .unwrap();
        let ids: Vec<_> = g.vertices().collect();

        let order = dfs(&mut g).unwrap().run(None).unwrap().lexicographical.clone();
        assert_eq!(order, vec![ids[0], ids[1], ids[3], ids[2]]);

        g.reset();
        let order = bfs(&mut g).unwrap().run(None).unwrap().lexicographical.clone();
        assert_eq!(order, vec![ids[0], ids[1], ids[2], ids[3]]);
        assert_eq!(g.state(ids[3]).level, 2);
    }
}
