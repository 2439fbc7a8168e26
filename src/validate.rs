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


//! Checks of computed flows.
//!
//! The validators only read the flow stored in the arcs of a
//! [`FlowGraph`]. They can be applied after any algorithm (or after any
//! step of an augmenting path algorithm) and report the first violated
//! property.
//!
//! # Example
//!
//! ```
//! use rs_maxflow::maxflow::Algorithm;
//! use rs_maxflow::validate;
//! use rs_maxflow::{FlowGraph, VertexKind};
//!
//! let mut g = FlowGraph::new_with(|b| {
//!     let s = b.add_vertex(VertexKind::Source);
//!     let v = b.add_vertex(VertexKind::Other);
//!     let t = b.add_vertex(VertexKind::Sink);
//!     b.add_arc_pair(s, v, 3, 1)?;
//!     b.add_arc_pair(v, t, 2, 2)?;
//!     Ok(())
//! })
//! .unwrap();
//!
//! let mut values = vec![];
//! for &alg in &Algorithm::ALL {
//!     values.push(alg.solve(&mut g).unwrap());
//!     assert!(validate::check_all(&g).is_empty());
//! }
//! assert_eq!(validate::check_agreement(&values), Ok(()));
//! ```

use crate::graph::{ArcId, Flow, FlowGraph, VertexId};

use displaydoc::Display;

use std::error;
use std::fmt;

/// A violated property of a flow.
///
/// Flow amounts are stored in their formatted form.
#[derive(Clone, Debug, PartialEq, Eq, Display)]
pub enum Violation {
    /// arc {arc} carries the negative flow {flow}
    NegativeFlow { arc: ArcId, flow: String },
    /// flow {flow} on arc {arc} exceeds its capacity {capacity}
    CapacityExceeded { arc: ArcId, flow: String, capacity: String },
    /// residual capacity {residual} of arc {arc} does not match its flow
    ResidualMismatch { arc: ArcId, residual: String },
    /// vertex {vertex} receives {inflow} units of flow but sends {outflow}
    Conservation {
        vertex: VertexId,
        inflow: String,
        outflow: String,
    },
    /// the algorithms computed different flow values: {values}
    Disagreement { values: String },
}

impl error::Error for Violation {}

/// Check `0 <= flow <= init_capacity` on every arc.
///
/// Also checks that the residual capacity of each arc equals its initial
/// capacity minus its flow plus the flow on the reverse arc.
pub fn check_capacities<F: Flow>(g: &FlowGraph<F>) -> Result<(), Violation> {
    for a in g.arcs() {
        let adata = g.arc(a);
        if adata.flow < F::zero() {
            return Err(Violation::NegativeFlow {
                arc: a,
                flow: adata.flow.to_string(),
            });
        }
        if adata.flow > adata.init_capacity {
            return Err(Violation::CapacityExceeded {
                arc: a,
                flow: adata.flow.to_string(),
                capacity: adata.init_capacity.to_string(),
            });
        }
        // capacity == init - flow + reverse flow, without subtraction
        let rflow = g.arc(adata.reverse).flow;
        if adata.capacity + adata.flow != adata.init_capacity + rflow {
            return Err(Violation::ResidualMismatch {
                arc: a,
                residual: adata.capacity.to_string(),
            });
        }
    }
    Ok(())
}

/// Check that every vertex except source and sink sends as much flow as it
/// receives.
pub fn check_conservation<F: Flow>(g: &FlowGraph<F>) -> Result<(), Violation> {
    for v in g.vertices().filter(|&v| !g.is_terminal(v)) {
        let inflow = g.incoming(v).iter().fold(F::zero(), |acc, &a| acc + g.arc(a).flow);
        let outflow = g.outgoing(v).iter().fold(F::zero(), |acc, &a| acc + g.arc(a).flow);
        if inflow != outflow {
            return Err(Violation::Conservation {
                vertex: v,
                inflow: inflow.to_string(),
                outflow: outflow.to_string(),
            });
        }
    }
    Ok(())
}

/// Check that all flow values are equal.
pub fn check_agreement<F>(values: &[F]) -> Result<(), Violation>
where
    F: PartialEq + fmt::Display,
{
    match values.split_first() {
        Some((first, rest)) if rest.iter().any(|x| x != first) => Err(Violation::Disagreement {
            values: values.iter().map(|x| x.to_string()).collect::<Vec<_>>().join(", "),
        }),
        _ => Ok(()),
    }
}

/// Run all checks on `g` and return the violations found.
pub fn check_all<F: Flow>(g: &FlowGraph<F>) -> Vec<Violation> {
    let mut violations = vec![];
    if let Err(v) = check_capacities(g) {
        violations.push(v);
    }
    if let Err(v) = check_conservation(g) {
        violations.push(v);
    }
    violations
}
