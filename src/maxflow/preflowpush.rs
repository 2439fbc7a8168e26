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


//! This module implements the preflow-push algorithm of Goldberg and
//! Tarjan for solving max flow problems.
//!
//! The algorithm starts by saturating all arcs leaving the source. The
//! resulting *preflow* violates flow conservation: vertices may receive
//! more flow than they send, the difference is their *excess*. Every step
//! takes the first *active* vertex (a vertex other than source and sink
//! with positive excess) from a queue and either pushes excess over an
//! admissible arc or, if there is none, relabels the vertex.
//!
//! An arc `(u,v)` is admissible if it has positive residual capacity and
//! `d(u) = d(v) + 1` for the distance labels `d`. The initial labels are
//! the distances to the sink in the residual graph, vertices that cannot
//! reach the sink and the source get label `n`.
//!
//! This is the plain FIFO variant, no gap or global relabelling
//! heuristic is used.
//!
//! # Example
//!
//! ```
//! use rs_maxflow::maxflow::{preflowpush, MaxFlow, PreflowOperation, PreflowPush, StepResult};
//! use rs_maxflow::{FlowGraph, VertexKind};
//!
//! let mut g = FlowGraph::new_with(|b| {
//!     let s = b.add_vertex(VertexKind::Source);
//!     let v = b.add_vertex(VertexKind::Other);
//!     let t = b.add_vertex(VertexKind::Sink);
//!     b.add_arc(s, v, 3)?;
//!     b.add_arc(v, t, 2)?;
//!     Ok(())
//! })
//! .unwrap();
//!
//! let mut pp = PreflowPush::init(&mut g).unwrap();
//! let mut ops = vec![];
//! while let StepResult::Progress(step) = pp.step().unwrap() {
//!     ops.push(step.operation);
//! }
//! // v pushes 2 units to t, gets relabelled and returns the rest to s
//! assert_eq!(ops.len(), 3);
//! assert!(matches!(ops[1], Some(PreflowOperation::Relabel { distance: 4, .. })));
//! assert_eq!(pp.value(), 2);
//!
//! let (value, _, mincut) = preflowpush(&mut g).unwrap();
//! assert_eq!(value, 2);
//! assert_eq!(mincut.len(), 2);
//! ```

use super::{MaxFlow, StepResult};
use crate::collections::{Frontier, Queue};
use crate::error::{Error, Result};
use crate::graph::{ArcId, Flow, FlowGraph, VertexId};
use crate::logger::{Logger, NullLogger};
use crate::search::{self, Direction};

use std::cmp::min;

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// The operation executed by a step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum PreflowOperation<F> {
    /// `amount` units of excess have been pushed over `arc`.
    Push { arc: ArcId, amount: F },
    /// `vertex` got the new distance label `distance`.
    Relabel { vertex: VertexId, distance: usize },
}

/// The result of a preflow-push step.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct PreflowStep<F> {
    /// The executed operation, `None` for the final snapshot.
    pub operation: Option<PreflowOperation<F>>,
    /// The active vertices after this step in queue order.
    pub active: Vec<VertexId>,
    /// The excess of the sink after this step.
    pub value: F,
}

/// The preflow-push algorithm.
pub struct PreflowPush<'a, F, L = NullLogger>
where
    F: Flow,
    L: Logger,
{
    g: &'a mut FlowGraph<F>,
    logger: L,
    /// The active vertices.
    active: Queue<VertexId>,
    /// The number of push operations performed so far.
    pub cnt_push: usize,
    /// The number of relabel operations performed so far.
    pub cnt_relabel: usize,
    done: bool,
}

impl<'a, F> PreflowPush<'a, F, NullLogger>
where
    F: Flow,
{
    /// Start the algorithm on `g`.
    ///
    /// This saturates the arcs leaving the source and computes the initial
    /// distance labels.
    pub fn init(g: &'a mut FlowGraph<F>) -> Result<Self> {
        PreflowPush::with_logger(g, NullLogger)
    }
}

impl<'a, F, L> PreflowPush<'a, F, L>
where
    F: Flow,
    L: Logger,
{
    /// Start the algorithm on `g` with narration to `logger`.
    pub fn with_logger(g: &'a mut FlowGraph<F>, mut logger: L) -> Result<Self> {
        let s = g.source();
        let n = g.num_vertices();
        let mut active = Queue::with_capacity(n);

        logger.group(format_args!("Algorithm - Preflow Push"));
        logger.group(format_args!("Saturate the arcs leaving the source"));
        let arcs = g.outgoing(s).to_vec();
        for a in arcs {
            let (w, cap) = {
                let adata = g.arc(a);
                (adata.to, adata.capacity)
            };
            if cap.is_zero() {
                continue;
            }
            g.increase_flow(a, cap)?;
            let st = g.state_mut(w);
            let was_active = !st.excess.is_zero();
            st.excess += cap;
            logger.log(format_args!("Push {} units to {}", cap, w));
            if !was_active && !g.is_terminal(w) {
                active.push(w);
            }
        }
        logger.group_end();

        logger.log(format_args!("Compute the distances to the sink ({})", g.sink()));
        Self::distances_to_sink(g)?;
        g.state_mut(s).distance = n;
        logger.log(format_args!("Set the distance of the source ({}) to {}", s, n));

        Ok(PreflowPush {
            g,
            logger,
            active,
            cnt_push: 0,
            cnt_relabel: 0,
            done: false,
        })
    }

    /// Set the distance labels to the residual distances to the sink.
    ///
    /// Vertices that cannot reach the sink get label `n`. All other search
    /// data is reset afterwards.
    fn distances_to_sink(g: &mut FlowGraph<F>) -> Result<()> {
        let t = g.sink();
        let n = g.num_vertices();
        g.reset_traversal();
        search::start(Queue::with_capacity(n), &mut *g, Some(t))?
            .direction(Direction::Backward)
            .run(None)?;
        for v in g.vertices() {
            let st = g.state_mut(v);
            st.distance = if st.seen { st.level } else { n };
        }
        g.reset_traversal();
        Ok(())
    }

    pub fn logger(&self) -> &L {
        &self.logger
    }

    pub fn into_logger(self) -> L {
        self.logger
    }

    /// Return the active vertices in queue order.
    pub fn active(&self) -> Vec<VertexId> {
        self.active.iter().cloned().collect()
    }

    fn is_admissible(&self, a: ArcId) -> bool {
        let adata = self.g.arc(a);
        adata.capacity > F::zero() && self.g.state(adata.from).distance == self.g.state(adata.to).distance + 1
    }

    /// Return the first admissible arc of `v` starting at its current arc.
    fn admissible_arc(&mut self, v: VertexId) -> Option<ArcId> {
        let cursor = self.g.state(v).cursor;
        let mut a = match cursor {
            None => self.g.next_arc(v),
            Some(_) => self.g.current_arc(v),
        };
        while let Some(b) = a {
            if self.is_admissible(b) {
                return Some(b);
            }
            a = self.g.next_arc(v);
        }
        None
    }

    fn push(&mut self, v: VertexId, a: ArcId) -> Result<PreflowOperation<F>> {
        let w = self.g.arc(a).to;
        let df = min(self.g.arc(a).capacity, self.g.state(v).excess);
        self.logger.group(format_args!("Push {} -> {}", v, w));

        if !self.g.is_terminal(w) && self.g.state(w).excess.is_zero() {
            self.logger.log(format_args!("{} becomes active", w));
            self.active.push(w);
        }

        self.g.increase_flow(a, df)?;
        self.g.state_mut(w).excess += df;
        self.g.state_mut(v).excess -= df;
        self.logger.log(format_args!("Pushed {} units of excess", df));

        if self.g.state(v).excess.is_zero() {
            self.logger.log(format_args!("{} is not active anymore", v));
            // v is at the front of the queue
            self.active.pop()?;
        }
        self.logger.group_end();

        self.cnt_push += 1;
        Ok(PreflowOperation::Push { arc: a, amount: df })
    }

    fn relabel(&mut self, v: VertexId) -> Result<PreflowOperation<F>> {
        let dmin = self
            .g
            .outgoing(v)
            .iter()
            .map(|&a| self.g.arc(a))
            .filter(|adata| adata.capacity > F::zero())
            .map(|adata| self.g.state(adata.to).distance)
            .min();
        let dmin = match dmin {
            Some(d) => d,
            None => {
                self.logger.error(format_args!("{} has excess but no residual arc", v));
                return Err(Error::StrandedExcess { vertex: v });
            }
        };

        let st = self.g.state_mut(v);
        debug_assert!(dmin + 1 > st.distance);
        st.min_neighbor_distance = dmin;
        st.distance = dmin + 1;
        st.cursor = None;
        self.logger.log(format_args!("Relabel {} to distance {}", v, dmin + 1));

        self.cnt_relabel += 1;
        Ok(PreflowOperation::Relabel {
            vertex: v,
            distance: dmin + 1,
        })
    }

    fn snapshot(&self, operation: Option<PreflowOperation<F>>) -> PreflowStep<F> {
        PreflowStep {
            operation,
            active: self.active(),
            value: self.g.state(self.g.sink()).excess,
        }
    }
}

impl<'a, F, L> MaxFlow<F> for PreflowPush<'a, F, L>
where
    F: Flow,
    L: Logger,
{
    type Step = PreflowStep<F>;

    fn step(&mut self) -> Result<StepResult<PreflowStep<F>>> {
        if self.done {
            return Ok(StepResult::Done(self.snapshot(None)));
        }

        let v = match self.active.top() {
            Some(&v) => v,
            None => {
                self.done = true;
                self.g.reset_traversal();
                self.logger
                    .log(format_args!("Terminate because there is no active vertex"));
                self.logger.group_end();
                log::debug!(
                    "Preflow-Push finished after {} pushes and {} relabels, value {}",
                    self.cnt_push,
                    self.cnt_relabel,
                    self.g.value()
                );
                return Ok(StepResult::Done(self.snapshot(None)));
            }
        };
        debug_assert!(self.g.state(v).excess > F::zero());

        let op = match self.admissible_arc(v) {
            Some(a) => self.push(v, a)?,
            None => self.relabel(v)?,
        };
        log::trace!("{:?}", op);

        Ok(StepResult::Progress(self.snapshot(Some(op))))
    }

    fn as_graph(&self) -> &FlowGraph<F> {
        self.g
    }
}

/// Solve the maxflow problem using the preflow-push algorithm.
///
/// The graph is reset first. The function returns the flow value, the flow
/// on each arc and the vertices in a minimal cut.
pub fn preflowpush<F>(g: &mut FlowGraph<F>) -> Result<(F, Vec<(ArcId, F)>, Vec<VertexId>)>
where
    F: Flow,
{
    g.reset();
    let value = PreflowPush::init(g)?.run()?;
    Ok((value, g.flow(), g.mincut()))
}
