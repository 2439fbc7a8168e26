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


//#![forbid(unsafe_code)]

//! Step-wise maximum flow algorithms.
//!
//! This crate implements four classical maximum flow algorithms on a
//! capacitated digraph with designated source and sink:
//!
//! - [`FordFulkerson`](maxflow::FordFulkerson),
//! - [`EdmondsKarp`](maxflow::EdmondsKarp),
//! - [`Dinic`](maxflow::Dinic),
//! - [`PreflowPush`](maxflow::PreflowPush).
//!
//! The algorithms work in place on a residual graph ([`FlowGraph`]) and
//! are executed step by step, each step returns a snapshot of what has
//! changed. This allows to stop, inspect or animate the computation after
//! every iteration. The steps can be narrated to a [`Logger`].
//!
//! # Example
//!
//! ```
//! use rs_maxflow::maxflow::{Algorithm, Dinic, MaxFlow};
//! use rs_maxflow::{validate, FlowGraph, VertexKind};
//!
//! let mut g = FlowGraph::new_with(|b| {
//!     let s = b.add_vertex(VertexKind::Source);
//!     let vs = b.add_vertices(2);
//!     let t = b.add_vertex(VertexKind::Sink);
//!     b.add_arc(s, vs[0], 4)?;
//!     b.add_arc(s, vs[1], 2)?;
//!     b.add_arc(vs[0], vs[1], 3)?;
//!     b.add_arc(vs[0], t, 1)?;
//!     b.add_arc(vs[1], t, 6)?;
//!     Ok(())
//! })
//! .unwrap();
//!
//! assert_eq!(Dinic::init(&mut g).run().unwrap(), 6);
//! assert!(validate::check_all(&g).is_empty());
//!
//! // run all algorithms on the same graph
//! for &alg in &Algorithm::ALL {
//!     assert_eq!(alg.solve(&mut g).unwrap(), 6);
//! }
//! ```

mod num {
    pub use num_traits as traits;
}

// # Data structures

pub mod error;
pub use self::error::{Error, Result};

pub mod graph;
pub use self::graph::{ArcData, ArcId, Flow, FlowGraph, Position, TraversalState, VertexData, VertexId, VertexKind};

pub mod builder;
pub use self::builder::GraphBuilder;

pub mod collections;

// # Algorithms

pub mod maxflow;
pub use self::maxflow::{Algorithm, MaxFlow, StepResult};

pub mod search;

pub mod logger;
pub use self::logger::{Logger, NullLogger, Recorder};

pub mod validate;

#[cfg(feature = "dimacs")]
pub mod dimacs;
