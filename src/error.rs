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


//! Error type of the flow computations.
//!
//! All errors are violated invariants of the algorithms or programming errors
//! of the caller. None of them is expected to occur at runtime for a correctly
//! built graph, therefore no error is recoverable: the running computation
//! should be aborted and the graph reset.

use crate::graph::{ArcId, VertexId};

use displaydoc::Display;

use std::error;

/// Error of a flow computation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum Error {
    /// unsupported frontier, please provide a queue or a stack
    UnsupportedFrontier,
    /// cannot pop from an empty container
    EmptyContainerPop,
    /// flow increase on arc {arc} exceeds its residual capacity
    CapacityExceeded { arc: ArcId },
    /// negative flow increase on arc {arc}
    NegativeIncrement { arc: ArcId },
    /// vertex {vertex} does not belong to the graph
    InvalidVertex { vertex: VertexId },
    /// the graph needs exactly one source and one sink
    MissingTerminal,
    /// loop at vertex {vertex}, arcs must join distinct vertices
    SelfLoop { vertex: VertexId },
    /// negative capacity on arc ({from},{to})
    NegativeCapacity { from: VertexId, to: VertexId },
    /// active vertex {vertex} has no residual outgoing arc
    StrandedExcess { vertex: VertexId },
}

impl error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
