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


//! Constructing flow graphs.
//!
//! Graphs are static objects: the algorithms only modify flows, capacities
//! and the vertex bookkeeping, never the topology. In order to build a graph
//! one uses a [`GraphBuilder`] and, once the construction is complete,
//! converts it into a [`FlowGraph`].

use crate::error::{Error, Result};
use crate::graph::{ArcData, ArcId, Flow, FlowGraph, Position, VertexData, VertexId, VertexKind};

/// Builder for a [`FlowGraph`].
pub struct GraphBuilder<F> {
    vertices: Vec<VertexData<F>>,
    arcs: Vec<ArcData<F>>,
}

impl<F: Flow> Default for GraphBuilder<F> {
    fn default() -> Self {
        GraphBuilder::new()
    }
}

impl<F: Flow> GraphBuilder<F> {
    /// Create a new, empty builder.
    pub fn new() -> Self {
        Self::with_capacities(0, 0)
    }

    /// Create a new, empty builder.
    ///
    /// The numbers of vertices and arcs are only a hint used to reserve
    /// memory. Note that each call to [`GraphBuilder::add_arc`] creates two
    /// arcs.
    pub fn with_capacities(nvertices: usize, narcs: usize) -> Self {
        GraphBuilder {
            vertices: Vec::with_capacity(nvertices),
            arcs: Vec::with_capacity(narcs),
        }
    }

    /// Return the current number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Return the current number of arcs.
    pub fn num_arcs(&self) -> usize {
        self.arcs.len()
    }

    /// Add a new vertex.
    pub fn add_vertex(&mut self, kind: VertexKind) -> VertexId {
        self.add_vertex_at(kind, Position::default())
    }

    /// Add a new vertex at some position.
    pub fn add_vertex_at(&mut self, kind: VertexKind, position: Position) -> VertexId {
        self.vertices.push(VertexData::new(kind, position));
        VertexId::new(self.vertices.len() - 1)
    }

    /// Add `n` new ordinary vertices.
    pub fn add_vertices(&mut self, n: usize) -> Vec<VertexId> {
        (0..n).map(|_| self.add_vertex(VertexKind::Other)).collect()
    }

    /// Change the kind of vertex `v`.
    pub fn set_kind(&mut self, v: VertexId, kind: VertexKind) -> Result<()> {
        self.check_vertex(v)?;
        self.vertices[v.index()].kind = kind;
        Ok(())
    }

    /// Add an arc `(u,v)` with capacity `capacity`.
    ///
    /// The arc is paired with a new reverse arc `(v,u)` of capacity zero.
    /// Returns the new arc (not the reverse arc).
    pub fn add_arc(&mut self, u: VertexId, v: VertexId, capacity: F) -> Result<ArcId> {
        self.add_arc_pair(u, v, capacity, F::zero()).map(|(a, _)| a)
    }

    /// Add the two arcs `(u,v)` and `(v,u)` and pair them as reverse arcs.
    ///
    /// Both capacities must be non-negative.
    pub fn add_arc_pair(&mut self, u: VertexId, v: VertexId, cap_uv: F, cap_vu: F) -> Result<(ArcId, ArcId)> {
        self.check_vertex(u)?;
        self.check_vertex(v)?;
        if u == v {
            return Err(Error::SelfLoop { vertex: u });
        }
        if cap_uv < F::zero() {
            return Err(Error::NegativeCapacity { from: u, to: v });
        }
        if cap_vu < F::zero() {
            return Err(Error::NegativeCapacity { from: v, to: u });
        }

        let a = ArcId::new(self.arcs.len());
        let r = ArcId::new(self.arcs.len() + 1);
        self.arcs.push(ArcData {
            from: u,
            to: v,
            capacity: cap_uv,
            init_capacity: cap_uv,
            flow: F::zero(),
            reverse: r,
        });
        self.arcs.push(ArcData {
            from: v,
            to: u,
            capacity: cap_vu,
            init_capacity: cap_vu,
            flow: F::zero(),
            reverse: a,
        });

        self.vertices[u.index()].outgoing.push(a);
        self.vertices[v.index()].incoming.push(a);
        self.vertices[v.index()].outgoing.push(r);
        self.vertices[u.index()].incoming.push(r);

        Ok((a, r))
    }

    fn check_vertex(&self, v: VertexId) -> Result<()> {
        if v.index() < self.vertices.len() {
            Ok(())
        } else {
            Err(Error::InvalidVertex { vertex: v })
        }
    }

    /// Turn the builder into a graph.
    ///
    /// Fails if there is not exactly one source and one sink vertex.
    pub fn into_graph(self) -> Result<FlowGraph<F>> {
        let find = |kind: VertexKind| {
            let mut it = self
                .vertices
                .iter()
                .enumerate()
                .filter(|(_, vdata)| vdata.kind == kind)
                .map(|(i, _)| VertexId::new(i));
            match (it.next(), it.next()) {
                (Some(v), None) => Ok(v),
                _ => Err(Error::MissingTerminal),
            }
        };
        let source = find(VertexKind::Source)?;
        let sink = find(VertexKind::Sink)?;

        Ok(FlowGraph {
            vertices: self.vertices,
            arcs: self.arcs,
            source,
            sink,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{Algorithm, Error, FlowGraph, GraphBuilder, VertexKind};

    #[test]
    fn test_build() {
        let mut b = GraphBuilder::<u32>::new();
        let s = b.add_vertex(VertexKind::Source);
        let vs = b.add_vertices(2);
        let t = b.add_vertex(VertexKind::Sink);
        let a = b.add_arc(s, vs[0], 4).unwrap();
        let (c, d) = b.add_arc_pair(vs[0], vs[1], 2, 3).unwrap();
        b.add_arc(vs[1], t, 5).unwrap();
        assert_eq!(b.num_arcs(), 6);

        let g = b.into_graph().unwrap();
        assert_eq!(g.source(), s);
        assert_eq!(g.sink(), t);
        assert_eq!(g.outgoing(s), &[a]);
        assert_eq!(g.arc(g.arc(a).reverse).capacity, 0);
        assert_eq!(g.arc(c).reverse, d);
        assert_eq!(g.arc(d).init_capacity, 3);
        assert_eq!(g.outgoing(vs[0]).len(), 2);
        assert_eq!(g.incoming(vs[0]).len(), 2);
    }

    #[test]
    fn test_terminals() {
        let g = FlowGraph::<i32>::new_with(|b| {
            b.add_vertex(VertexKind::Source);
            Ok(())
        });
        assert_eq!(g.err(), Some(Error::MissingTerminal));

        let g = FlowGraph::<i32>::new_with(|b| {
            b.add_vertex(VertexKind::Source);
            b.add_vertex(VertexKind::Sink);
            b.add_vertex(VertexKind::Sink);
            Ok(())
        });
        assert_eq!(g.err(), Some(Error::MissingTerminal));
    }

    #[test]
    fn test_invalid_arcs() {
        let mut b = GraphBuilder::<i32>::new();
        let s = b.add_vertex(VertexKind::Source);
        assert_eq!(b.add_arc(s, s, 1), Err(Error::SelfLoop { vertex: s }));

        let mut other = GraphBuilder::<i32>::new();
        other.add_vertex(VertexKind::Other);
        let w = other.add_vertex(VertexKind::Other);
        assert_eq!(b.add_arc(s, w, 1), Err(Error::InvalidVertex { vertex: w }));
    }

    #[test]
    fn test_negative_capacity() {
        let mut b = GraphBuilder::<i32>::new();
        let s = b.add_vertex(VertexKind::Source);
        let v = b.add_vertex(VertexKind::Other);
        let t = b.add_vertex(VertexKind::Sink);

        assert_eq!(b.add_arc(s, t, -3), Err(Error::NegativeCapacity { from: s, to: t }));
        assert_eq!(b.add_arc_pair(s, v, 1, -1), Err(Error::NegativeCapacity { from: v, to: s }));
        assert_eq!(b.num_arcs(), 0);

        b.add_arc(s, v, 2).unwrap();
        b.add_arc(v, t, 2).unwrap();
        b.add_arc_pair(s, t, 0, 0).unwrap();
        let mut g = b.into_graph().unwrap();
        for &alg in &Algorithm::ALL {
            assert_eq!(alg.solve(&mut g), Ok(2));
        }
    }
}
