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


//! Maximum flow algorithms.
//!
//! All algorithms work in place on a [`FlowGraph`] and are executed step by
//! step: `step()` performs one iteration of the algorithm (one augmenting
//! path, one blocking flow phase or one push/relabel operation) and returns
//! a snapshot of what happened. Each step leaves the graph in a consistent
//! state, the computation can be stopped after any step.
//!
//! - [`FordFulkerson`]: augmenting paths found by depth-first search,
//! - [`EdmondsKarp`]: shortest augmenting paths found by breadth-first search,
//! - [`Dinic`]: blocking flows in level graphs,
//! - [`PreflowPush`]: the push-relabel algorithm of Goldberg and Tarjan.
//!
//! Every algorithm expects the graph in the state it has been built with,
//! call [`FlowGraph::reset`] between two runs on the same graph. The
//! convenience functions [`fordfulkerson`], [`edmondskarp`], [`dinic`],
//! [`preflowpush`] and [`Algorithm::solve`] do this automatically.
//!
//! # Example
//!
//! ```
//! use rs_maxflow::maxflow::{Algorithm, MaxFlow, StepResult, EdmondsKarp};
//! use rs_maxflow::{FlowGraph, VertexKind};
//!
//! //     a
//! //  3 / \ 2
//! //   s   t
//! //  2 \ / 3
//! //     b
//! let mut g = FlowGraph::new_with(|b| {
//!     let s = b.add_vertex(VertexKind::Source);
//!     let a = b.add_vertex(VertexKind::Other);
//!     let c = b.add_vertex(VertexKind::Other);
//!     let t = b.add_vertex(VertexKind::Sink);
//!     b.add_arc(s, a, 3)?;
//!     b.add_arc(s, c, 2)?;
//!     b.add_arc(a, t, 2)?;
//!     b.add_arc(c, t, 3)?;
//!     Ok(())
//! })
//! .unwrap();
//!
//! let mut ek = EdmondsKarp::init(&mut g);
//! let mut npaths = 0;
//! while let StepResult::Progress(aug) = ek.step().unwrap() {
//!     assert_eq!(aug.path.len(), 2);
//!     npaths += 1;
//! }
//! assert_eq!(npaths, 2);
//! assert_eq!(ek.value(), 4);
//!
//! for &alg in &Algorithm::ALL {
//!     assert_eq!(alg.solve(&mut g).unwrap(), 4);
//! }
//! ```

use crate::error::Result;
use crate::graph::{ArcId, Flow, FlowGraph, VertexId};
use crate::logger::{Logger, NullLogger};

use displaydoc::Display;

use std::collections::BTreeMap;
use std::error;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

pub mod dinic;
pub use self::dinic::{dinic, BlockingFlow, Dinic, DinicPhase, LevelGraph};

pub mod edmondskarp;
pub use self::edmondskarp::{edmondskarp, EdmondsKarp};

pub mod fordfulkerson;
pub use self::fordfulkerson::{fordfulkerson, FordFulkerson};

pub mod preflowpush;
pub use self::preflowpush::{preflowpush, PreflowOperation, PreflowPush, PreflowStep};

/// The result of a single step.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum StepResult<T> {
    /// The algorithm made progress and may continue.
    Progress(T),
    /// The algorithm is finished, the flow is maximal.
    ///
    /// Further calls to `step` return `Done` again.
    Done(T),
}

impl<T> StepResult<T> {
    pub fn is_done(&self) -> bool {
        match self {
            StepResult::Progress(_) => false,
            StepResult::Done(_) => true,
        }
    }

    /// Return the snapshot of this step.
    pub fn snapshot(&self) -> &T {
        match self {
            StepResult::Progress(x) | StepResult::Done(x) => x,
        }
    }

    pub fn into_snapshot(self) -> T {
        match self {
            StepResult::Progress(x) | StepResult::Done(x) => x,
        }
    }
}

/// A step-wise maximum flow algorithm.
pub trait MaxFlow<F: Flow> {
    /// The snapshot returned by each step.
    type Step;

    /// Execute one iteration.
    fn step(&mut self) -> Result<StepResult<Self::Step>>;

    /// Return the underlying graph.
    fn as_graph(&self) -> &FlowGraph<F>;

    /// Return the value of the current flow.
    fn value(&self) -> F {
        self.as_graph().value()
    }

    /// Run the algorithm to completion and return the flow value.
    fn run(&mut self) -> Result<F> {
        while let StepResult::Progress(_) = self.step()? {}
        Ok(self.value())
    }
}

/// The result of an augmentation step of an augmenting path algorithm.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Augmentation<F> {
    /// The arcs of the augmenting path from source to sink.
    ///
    /// Empty for the final snapshot.
    pub path: Vec<ArcId>,
    /// The flow increment along `path`.
    pub increment: F,
    /// The flow value after this step.
    pub value: F,
    /// The new flow on the arcs changed by this step (including reverse arcs).
    pub flow: BTreeMap<ArcId, F>,
    /// The vertices visited by the search of this step.
    pub visited: Vec<VertexId>,
}

/// Send `df` units of flow along `path` and narrate it.
///
/// The new flow values of all arcs on the path and their reverse arcs are
/// stored in `flow`.
pub(crate) fn augment<F, L>(
    g: &mut FlowGraph<F>,
    logger: &mut L,
    path: &[ArcId],
    df: F,
    flow: &mut BTreeMap<ArcId, F>,
) -> Result<()>
where
    F: Flow,
    L: Logger,
{
    logger.group(format_args!("Saturate arcs along the flow augmenting path"));
    for &a in path {
        let (u, v, old) = {
            let adata = g.arc(a);
            (adata.from, adata.to, adata.flow)
        };
        logger.group(format_args!("Saturate {} -> {}", u, v));
        logger.log(format_args!("Current flow: {}", old));
        logger.log(format_args!("Increase by: {}", df));
        g.increase_flow(a, df)?;
        let r = g.arc(a).reverse;
        logger.log(format_args!("New flow: {}", g.arc(a).flow));
        logger.group_end();

        flow.insert(a, g.arc(a).flow);
        flow.insert(r, g.arc(r).flow);
    }
    logger.group_end();
    Ok(())
}

/// The implemented algorithms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum Algorithm {
    FordFulkerson,
    EdmondsKarp,
    Dinic,
    PreflowPush,
}

impl Algorithm {
    /// All algorithms.
    pub const ALL: [Algorithm; 4] = [
        Algorithm::FordFulkerson,
        Algorithm::EdmondsKarp,
        Algorithm::Dinic,
        Algorithm::PreflowPush,
    ];

    /// Return the name of the algorithm.
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::FordFulkerson => "Ford-Fulkerson",
            Algorithm::EdmondsKarp => "Edmonds-Karp",
            Algorithm::Dinic => "Dinic",
            Algorithm::PreflowPush => "Preflow-Push",
        }
    }

    /// Reset `g` and compute a maximum flow. Returns the flow value.
    pub fn solve<F: Flow>(self, g: &mut FlowGraph<F>) -> Result<F> {
        self.solve_with(g, NullLogger)
    }

    /// Reset `g` and compute a maximum flow while narrating to `logger`.
    pub fn solve_with<F, L>(self, g: &mut FlowGraph<F>, logger: L) -> Result<F>
    where
        F: Flow,
        L: Logger,
    {
        g.reset();
        log::debug!("solve maximum flow problem with {}", self.name());
        match self {
            Algorithm::FordFulkerson => FordFulkerson::with_logger(g, logger).run(),
            Algorithm::EdmondsKarp => EdmondsKarp::with_logger(g, logger).run(),
            Algorithm::Dinic => Dinic::with_logger(g, logger).run(),
            Algorithm::PreflowPush => PreflowPush::with_logger(g, logger)?.run(),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// unknown algorithm `{0}`
#[derive(Clone, Debug, PartialEq, Eq, Display)]
pub struct UnknownAlgorithm(pub String);

impl error::Error for UnknownAlgorithm {}

impl FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    /// Parse an algorithm name.
    ///
    /// Case, spaces, dashes and underscores are ignored, the abbreviations
    /// `ff`, `ek` and `pp` are accepted.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let name: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        match name.as_str() {
            "fordfulkerson" | "ff" => Ok(Algorithm::FordFulkerson),
            "edmondskarp" | "ek" => Ok(Algorithm::EdmondsKarp),
            "dinic" => Ok(Algorithm::Dinic),
            "preflowpush" | "pushrelabel" | "pp" => Ok(Algorithm::PreflowPush),
            _ => Err(UnknownAlgorithm(s.to_string())),
        }
    }
}
