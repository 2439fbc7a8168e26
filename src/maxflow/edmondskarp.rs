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


//! This module implements the max flow algorithm of Edmonds-Karp.
//!
//! The algorithm augments along shortest paths (in terms of the number of
//! arcs) found by a breadth-first search in the residual graph. This
//! bounds the number of augmentations by `O(nm)`.
//!
//! # Example
//!
//! ```
//! use rs_maxflow::maxflow::edmondskarp;
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
//! let (value, flow, _) = edmondskarp(&mut g).unwrap();
//!
//! assert_eq!(value, 5);
//! assert!(flow.iter().all(|&(a, f)| f >= 0 && f <= g.arc(a).init_capacity));
//! assert!(g.vertices().filter(|&u| !g.is_terminal(u)).all(|u| {
//!     g.outgoing(u).iter().map(|&a| g.arc(a).flow).sum::<i32>() ==
//!     g.incoming(u).iter().map(|&a| g.arc(a).flow).sum::<i32>()
//! }));
//! ```

use super::{augment, Augmentation, MaxFlow, StepResult};
use crate::collections::Queue;
use crate::error::Result;
use crate::graph::{ArcId, Flow, FlowGraph, VertexId};
use crate::logger::{Logger, NullLogger};
use crate::search;

use std::collections::BTreeMap;

/// Max-flow algorithm of Edmonds and Karp.
pub struct EdmondsKarp<'a, F, L = NullLogger>
where
    F: Flow,
    L: Logger,
{
    g: &'a mut FlowGraph<F>,
    logger: L,
    queue: Queue<VertexId>,
    npaths: usize,
    done: bool,
}

impl<'a, F> EdmondsKarp<'a, F, NullLogger>
where
    F: Flow,
{
    /// Start the algorithm on `g`.
    pub fn init(g: &'a mut FlowGraph<F>) -> Self {
        EdmondsKarp::with_logger(g, NullLogger)
    }
}

impl<'a, F, L> EdmondsKarp<'a, F, L>
where
    F: Flow,
    L: Logger,
{
    /// Start the algorithm on `g` with narration to `logger`.
    pub fn with_logger(g: &'a mut FlowGraph<F>, mut logger: L) -> Self {
        g.reset_traversal();
        logger.group(format_args!("Algorithm - Edmonds Karp"));
        logger.log(format_args!("Initialized the graph with the zero flow"));
        EdmondsKarp {
            queue: Queue::with_capacity(g.num_vertices()),
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

impl<'a, F, L> MaxFlow<F> for EdmondsKarp<'a, F, L>
where
    F: Flow,
    L: Logger,
{
    type Step = Augmentation<F>;

    fn step(&mut self) -> Result<StepResult<Augmentation<F>>> {
        if self.done {
            return Ok(StepResult::Done(self.snapshot(vec![], F::zero(), vec![], BTreeMap::new())));
        }

        let t = self.g.sink();
        self.logger.group(format_args!("Perform breadth first search"));
        let visited = search::start(&mut self.queue, &mut *self.g, None)?
            .run(Some(t))?
            .lexicographical
            .clone();

        // the search stops right after discovering the sink
        let df = match visited.last() {
            Some(&v) if v == t => self.g.state(t).parent_arc_min_capacity,
            _ => None,
        };
        let df = match df {
            Some(df) => {
                self.logger
                    .log(format_args!("Found a shortest flow augmenting path with a capacity of {}", df));
                self.logger.group_end();
                df
            }
            None => {
                self.logger.log(format_args!("Did not find a flow augmenting path"));
                self.logger.group_end();
                self.g.reset_traversal();
                self.done = true;
                self.logger
                    .log(format_args!("Terminate because there is no flow-augmenting path"));
                self.logger.group_end();
                log::debug!(
                    "Edmonds-Karp finished after {} augmenting paths, value {}",
                    self.npaths,
                    self.g.value()
                );
                return Ok(StepResult::Done(self.snapshot(vec![], F::zero(), visited, BTreeMap::new())));
            }
        };

        let mut path: Vec<ArcId> = search::path_from_parents(self.g, t).collect();
        path.reverse();
        let mut flow = BTreeMap::new();
        augment(self.g, &mut self.logger, &path, df, &mut flow)?;
        self.npaths += 1;
        self.logger.log(format_args!("Increased the flow by {}", df));
        log::trace!("augment {} units along a path with {} arcs", df, path.len());

        self.g.reset_traversal();

        Ok(StepResult::Progress(self.snapshot(path, df, visited, flow)))
    }

    fn as_graph(&self) -> &FlowGraph<F> {
        self.g
    }
}

/// Solve the maxflow problem using the algorithm of Edmonds-Karp.
///
/// The graph is reset first. The function returns the flow value, the flow
/// on each arc and the vertices in a minimal cut.
pub fn edmondskarp<F>(g: &mut FlowGraph<F>) -> Result<(F, Vec<(ArcId, F)>, Vec<VertexId>)>
where
    F: Flow,
{
    g.reset();
    let value = EdmondsKarp::init(g).run()?;
    Ok((value, g.flow(), g.mincut()))
}
