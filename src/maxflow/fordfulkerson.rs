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


//! The augmenting path algorithm of Ford and Fulkerson.
//!
//! Each step searches an augmenting path by a depth-first search in the
//! residual graph and augments the flow along it by the minimal residual
//! capacity of the path. The arcs are examined in insertion order, no
//! other rule selects among the augmenting paths. The running time is
//! therefore only pseudo-polynomial.
//!
//! # Example
//!
//! ```
//! use rs_maxflow::maxflow::fordfulkerson;
//! use rs_maxflow::{FlowGraph, VertexKind};
//!
//! let mut g = FlowGraph::new_with(|b| {
//!     let s = b.add_vertex(VertexKind::Source);
//!     let vs = b.add_vertices(4);
//!     let t = b.add_vertex(VertexKind::Sink);
//!     b.add_arc(s, vs[0], 5)?;
//!     b.add_arc(s, vs[2], 5)?;
//!     b.add_arc(vs[0], vs[1], 2)?;
//!     b.add_arc(vs[0], vs[2], 1)?;
//!     b.add_arc(vs[0], vs[3], 1)?;
//!     b.add_arc(vs[2], vs[0], 1)?;
//!     b.add_arc(vs[2], vs[3], 2)?;
//!     b.add_arc(vs[3], vs[1], 2)?;
//!     b.add_arc(vs[1], t, 4)?;
//!     b.add_arc(vs[3], t, 5)?;
//!     Ok(())
//! })
//! .unwrap();
//!
//! let (value, flow, mut mincut) = fordfulkerson(&mut g).unwrap();
//! assert_eq!(value, 5);
//! assert!(flow.iter().all(|&(a, f)| f >= 0 && f <= g.arc(a).init_capacity));
//!
//! mincut.sort();
//! assert_eq!(mincut, g.vertices().take(4).filter(|v| v.index() != 2).collect::<Vec<_>>());
//! ```

use super::{augment, Augmentation, MaxFlow, StepResult};
use crate::collections::Stack;
use crate::error::Result;
use crate::graph::{ArcId, Flow, FlowGraph, VertexId};
use crate::logger::{Logger, NullLogger};
use crate::search;

use std::collections::BTreeMap;

/// Max-flow algorithm of Ford and Fulkerson.
pub struct FordFulkerson<'a, F, L = NullLogger>
where
    F: Flow,
    L: Logger,
{
    g: &'a mut FlowGraph<F>,
    logger: L,
    stack: Stack<VertexId>,
    npaths: usize,
    done: bool,
}

impl<'a, F> FordFulkerson<'a, F, NullLogger>
where
    F: Flow,
{
    /// Start the algorithm on `g`.
    pub fn init(g: &'a mut FlowGraph<F>) -> Self {
        FordFulkerson::with_logger(g, NullLogger)
    }
}

impl<'a, F, L> FordFulkerson<'a, F, L>
where
    F: Flow,
    L: Logger,
{
    /// Start the algorithm on `g` with narration to `logger`.
    pub fn with_logger(g: &'a mut FlowGraph<F>, mut logger: L) -> Self {
        g.reset_traversal();
        logger.group(format_args!("Algorithm - Ford Fulkerson"));
        logger.log(format_args!("Initialized the graph with the zero flow"));
        FordFulkerson {
            stack: Stack::with_capacity(g.num_vertices()),
            g,
            logger,
            npaths: 0,
            done: false,
        }
    }

    pub fn logger(&self) -> &L {
        &self.logger
    }

    pub fn into_logger(self) -> L {
        self.logger
    }

    /// Return the number of augmenting paths found so far.
    pub fn num_paths(&self) -> usize {
        self.npaths
    }

    /// Run a depth-first search until the sink is found.
    ///
    /// Returns the visited vertices and the capacity of the path to the
    /// sink (if any).
    fn dfs(&mut self) -> Result<(Vec<VertexId>, Option<F>)> {
        let t = self.g.sink();
        self.logger.group(format_args!("Perform depth first search"));
        self.logger.log(format_args!("Initialize graph traversal"));
        let mut dfs = search::start(&mut self.stack, &mut *self.g, None)?;
        self.logger
            .log(format_args!("Run graph traversal until the sink ({}) is found", t));
        let visited = dfs.run(Some(t))?.lexicographical.clone();

        let st = self.g.state(t);
        let df = if st.seen { st.parent_arc_min_capacity } else { None };
        match df {
            Some(df) => self
                .logger
                .log(format_args!("Found a flow augmenting path with a capacity of {}", df)),
            None => self.logger.log(format_args!("Did not find a flow augmenting path")),
        }
        self.logger.group_end();
        Ok((visited, df))
    }

    fn snapshot(
        &self,
        path: Vec<ArcId>,
        increment: F,
        visited: Vec<VertexId>,
        flow: BTreeMap<ArcId, F>,
    ) -> Augmentation<F> {
        Augmentation {
            path,
            increment,
            value: self.g.value(),
            flow,
            visited,
        }
    }
}

impl<'a, F, L> MaxFlow<F> for FordFulkerson<'a, F, L>
where
    F: Flow,
    L: Logger,
{
    type Step = Augmentation<F>;

    fn step(&mut self) -> Result<StepResult<Augmentation<F>>> {
        if self.done {
            return Ok(StepResult::Done(self.snapshot(vec![], F::zero(), vec![], BTreeMap::new())));
        }

        let (visited, df) = self.dfs()?;
        let df = match df {
            Some(df) => df,
            None => {
                for &v in &visited {
                    self.g.reset_vertex_traversal(v);
                }
                self.done = true;
                self.logger
                    .log(format_args!("Terminate because there is no flow-augmenting path"));
                self.logger.group_end();
                log::debug!(
                    "Ford-Fulkerson finished after {} augmenting paths, value {}",
                    self.npaths,
                    self.g.value()
                );
                return Ok(StepResult::Done(self.snapshot(vec![], F::zero(), visited, BTreeMap::new())));
            }
        };

        let mut path: Vec<ArcId> = search::path_from_parents(self.g, self.g.sink()).collect();
        path.reverse();
        let mut flow = BTreeMap::new();
        augment(self.g, &mut self.logger, &path, df, &mut flow)?;
        self.npaths += 1;
        log::trace!("augment {} units along a path with {} arcs", df, path.len());

        // only the visited vertices carry search data
        for &v in &visited {
            self.g.reset_vertex_traversal(v);
        }

        Ok(StepResult::Progress(self.snapshot(path, df, visited, flow)))
    }

    fn as_graph(&self) -> &FlowGraph<F> {
        self.g
    }
}

/// Solve the maxflow problem using the algorithm of Ford and Fulkerson.
///
/// The graph is reset first. The function returns the flow value, the flow
/// on each arc and the vertices in a minimal cut.
pub fn fordfulkerson<F>(g: &mut FlowGraph<F>) -> Result<(F, Vec<(ArcId, F)>, Vec<VertexId>)>
where
    F: Flow,
{
    g.reset();
    let value = FordFulkerson::init(g).run()?;
    Ok((value, g.flow(), g.mincut()))
}

#[cfg(test)]
mod tests {
    use crate::logger::Recorder;
    use crate::maxflow::{FordFulkerson, MaxFlow, StepResult};
    use crate::{FlowGraph, VertexKind};

    fn diamond() -> FlowGraph<u32> {
        //     a
        //  3 / \ 2
        //   s  |1 t
        //  2 \ v/ 3
        //     b
        FlowGraph::new_with(|b| {
            let s = b.add_vertex(VertexKind::Source);
            let a = b.add_vertex(VertexKind::Other);
            let c = b.add_vertex(VertexKind::Other);
            let t = b.add_vertex(VertexKind::Sink);
            b.add_arc(s, a, 3)?;
            b.add_arc(s, c, 2)?;
            b.add_arc(a, c, 1)?;
            b.add_arc(a, t, 2)?;
            b.add_arc(c, t, 3)?;
            Ok(())
        })
        .unwrap()
    }

    #[test]
    fn test_steps() {
        let mut g = diamond();
        let mut ff = FordFulkerson::init(&mut g);

        // first dfs follows s -> a -> b -> t
        let aug = ff.step().unwrap().into_snapshot();
        assert_eq!(aug.path.len(), 3);
        assert_eq!(aug.increment, 1);
        assert_eq!(aug.value, 1);
        assert_eq!(aug.flow.len(), 6);

        let mut value = aug.value;
        loop {
            match ff.step().unwrap() {
                StepResult::Progress(aug) => {
                    assert!(aug.increment > 0);
                    assert_eq!(aug.value, value + aug.increment);
                    value = aug.value;

                    // only the arcs of this path and their reverse arcs
                    let g = ff.as_graph();
                    let mut changed: Vec<_> = aug.path.iter().flat_map(|&a| vec![a, g.arc(a).reverse]).collect();
                    changed.sort();
                    assert_eq!(aug.flow.keys().cloned().collect::<Vec<_>>(), changed);
                    assert!(aug.flow.iter().all(|(&a, &f)| g.arc(a).flow == f));
                }
                StepResult::Done(aug) => {
                    assert!(aug.path.is_empty());
                    assert!(aug.flow.is_empty());
                    assert_eq!(aug.value, 5);
                    break;
                }
            }
        }
        assert_eq!(ff.num_paths(), 3);
        assert!(ff.step().unwrap().is_done());
        assert_eq!(ff.value(), 5);

        // the search data has been cleaned up
        assert!(g.vertices().all(|v| !g.state(v).seen && g.state(v).cursor.is_none()));
    }

    #[test]
    fn test_narration() {
        let mut g = diamond();
        let mut rec = Recorder::new();
        FordFulkerson::with_logger(&mut g, &mut rec).run().unwrap();
        let text = rec.to_string();
        assert!(text.starts_with("Algorithm - Ford Fulkerson\n  Initialized the graph with the zero flow"));
        assert!(text.contains("    Found a flow augmenting path with a capacity of 1"));
        assert!(text.contains("    Saturate v0 -> v1\n      Current flow: 0\n      Increase by: 1\n      New flow: 1"));
        assert!(text.ends_with("  Terminate because there is no flow-augmenting path"));
        assert_eq!(rec.depth(), 0);
    }

    #[test]
    fn test_disconnected() {
        let mut g = FlowGraph::<i64>::new_with(|b| {
            let s = b.add_vertex(VertexKind::Source);
            let v = b.add_vertex(VertexKind::Other);
            b.add_vertex(VertexKind::Sink);
            b.add_arc(s, v, 7)?;
            Ok(())
        })
        .unwrap();
        let mut ff = FordFulkerson::init(&mut g);
        match ff.step().unwrap() {
            StepResult::Done(aug) => {
                assert_eq!(aug.value, 0);
                assert_eq!(aug.visited.len(), 2);
            }
            _ => panic!("unexpected augmenting path"),
        }
    }
}
