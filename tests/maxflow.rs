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

use rs_maxflow::maxflow::{dinic, edmondskarp, fordfulkerson, preflowpush};
use rs_maxflow::maxflow::{EdmondsKarp, FordFulkerson, PreflowPush};
use rs_maxflow::validate;
use rs_maxflow::{Algorithm, FlowGraph, MaxFlow, Position, StepResult, VertexKind};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use std::error::Error;

/// Generate a random instance on `n` vertices.
///
/// The first vertex is the source, the last one the sink. Every pair of
/// vertices gets an arc pair with random capacities in `0..=maxcap`.
fn random_graph(seed: u64, n: usize, maxcap: i32) -> FlowGraph<i32> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut b = FlowGraph::new_builder();
    let ncols = (n as f64).sqrt().ceil() as usize;
    let vs: Vec<_> = (0..n)
        .map(|i| {
            let kind = if i == 0 {
                VertexKind::Source
            } else if i + 1 == n {
                VertexKind::Sink
            } else {
                VertexKind::Other
            };
            let pos = Position {
                x: (i % ncols) as f64,
                y: (i / ncols) as f64,
            };
            b.add_vertex_at(kind, pos)
        })
        .collect();

    for i in 0..n {
        for j in i + 1..n {
            b.add_arc_pair(vs[i], vs[j], rng.random_range(0..=maxcap), rng.random_range(0..=maxcap))
                .unwrap();
        }
    }

    b.into_graph().unwrap()
}

/// Sparse variant of `random_graph` with single arcs only.
fn random_sparse_graph(seed: u64, n: usize, m: usize, maxcap: i32) -> FlowGraph<i32> {
    let mut rng = StdRng::seed_from_u64(seed);
    FlowGraph::new_with(|b| {
        let s = b.add_vertex(VertexKind::Source);
        let vs = b.add_vertices(n - 2);
        let t = b.add_vertex(VertexKind::Sink);
        let all: Vec<_> = Some(s).into_iter().chain(vs).chain(Some(t)).collect();
        for _ in 0..m {
            let u = all[rng.random_range(0..n)];
            let v = all[rng.random_range(0..n)];
            if u != v {
                b.add_arc(u, v, rng.random_range(1..=maxcap))?;
            }
        }
        Ok(())
    })
    .unwrap()
}

/// Capacity of the cut between `cut` and its complement.
fn cut_capacity(g: &FlowGraph<i32>, cut: &[rs_maxflow::VertexId]) -> i32 {
    let mut inside = vec![false; g.num_vertices()];
    for v in cut {
        inside[v.index()] = true;
    }
    g.arcs()
        .filter(|&a| inside[g.arc(a).from.index()] && !inside[g.arc(a).to.index()])
        .map(|a| g.arc(a).init_capacity)
        .sum()
}

fn check_maximal(g: &FlowGraph<i32>, value: i32) {
    let violations = validate::check_all(g);
    assert!(violations.is_empty(), "violations: {:?}", violations);
    assert_eq!(g.value(), value);

    let cut = g.mincut();
    assert!(cut.contains(&g.source()));
    assert!(!cut.contains(&g.sink()));
    assert_eq!(cut_capacity(g, &cut), value);
}

#[test]
fn test_all_algorithms_agree() -> Result<(), Box<dyn Error>> {
    for seed in 0..10 {
        let mut g = random_graph(seed, 12, 20);
        let mut values = vec![];
        for &alg in &Algorithm::ALL {
            let value = alg.solve(&mut g)?;
            check_maximal(&g, value);
            values.push(value);
        }
        validate::check_agreement(&values)?;
    }
    Ok(())
}

#[test]
fn test_sparse_instances() -> Result<(), Box<dyn Error>> {
    for seed in 0..20 {
        let mut g = random_sparse_graph(seed, 30, 90, 50);

        let (v1, _, _) = fordfulkerson(&mut g)?;
        check_maximal(&g, v1);
        let (v2, _, _) = edmondskarp(&mut g)?;
        check_maximal(&g, v2);
        let (v3, _, _) = dinic(&mut g)?;
        check_maximal(&g, v3);
        let (v4, _, _) = preflowpush(&mut g)?;
        check_maximal(&g, v4);

        validate::check_agreement(&[v1, v2, v3, v4])?;
    }
    Ok(())
}

#[test]
fn test_flow_result() -> Result<(), Box<dyn Error>> {
    let mut g = random_graph(42, 8, 10);
    let (value, flow, mincut) = dinic(&mut g)?;

    assert_eq!(flow.len(), g.num_arcs());
    for (a, f) in flow {
        assert_eq!(g.arc(a).flow, f);
    }
    assert_eq!(mincut, g.mincut());
    assert_eq!(cut_capacity(&g, &mincut), value);
    Ok(())
}

#[test]
fn test_augmentations_increase_value() -> Result<(), Box<dyn Error>> {
    let mut g = random_graph(7, 10, 15);

    let mut last = 0;
    let mut ff = FordFulkerson::init(&mut g);
    loop {
        match ff.step()? {
            StepResult::Progress(aug) => {
                assert!(aug.increment > 0);
                assert_eq!(aug.value, last + aug.increment);
                assert_eq!(aug.path.first().map(|&a| ff.as_graph().arc(a).from), Some(ff.as_graph().source()));
                assert_eq!(aug.path.last().map(|&a| ff.as_graph().arc(a).to), Some(ff.as_graph().sink()));
                last = aug.value;
            }
            StepResult::Done(aug) => {
                assert!(aug.path.is_empty());
                assert_eq!(aug.value, last);
                break;
            }
        }
    }
    let npaths = ff.num_paths();
    // further steps have no effect
    assert!(ff.step()?.is_done());
    assert_eq!(ff.num_paths(), npaths);
    assert_eq!(ff.value(), last);

    Ok(())
}

#[test]
fn test_shortest_paths_do_not_shrink() -> Result<(), Box<dyn Error>> {
    let mut g = random_sparse_graph(3, 40, 160, 30);

    let mut lengths = vec![];
    let mut ek = EdmondsKarp::init(&mut g);
    while let StepResult::Progress(aug) = ek.step()? {
        lengths.push(aug.path.len());
    }
    assert!(lengths.windows(2).all(|w| w[0] <= w[1]), "path lengths: {:?}", lengths);

    Ok(())
}

#[test]
fn test_preflow_counters() -> Result<(), Box<dyn Error>> {
    let mut g = random_graph(11, 10, 25);
    let expected = Algorithm::EdmondsKarp.solve(&mut g)?;
    g.reset();

    let mut pp = PreflowPush::init(&mut g)?;
    let mut nsteps = 0;
    while let StepResult::Progress(_) = pp.step()? {
        nsteps += 1;
    }
    assert_eq!(pp.cnt_push + pp.cnt_relabel, nsteps);
    assert_eq!(pp.value(), expected);
    assert!(pp.active().is_empty());

    Ok(())
}

#[test]
fn test_reset() -> Result<(), Box<dyn Error>> {
    let mut g = random_graph(5, 9, 12);
    let fresh = g.clone();

    Algorithm::PreflowPush.solve(&mut g)?;
    g.reset();
    g.reset();

    for a in g.arcs() {
        assert_eq!(g.arc(a).flow, 0);
        assert_eq!(g.arc(a).capacity, fresh.arc(a).capacity);
    }
    for v in g.vertices() {
        assert_eq!(g.state(v), fresh.state(v));
    }

    Ok(())
}

#[cfg(feature = "dimacs")]
#[test]
fn test_dimacs_instance() -> Result<(), Box<dyn Error>> {
    use rs_maxflow::dimacs;
    use std::io::Cursor;

    let instance = "c small instance
p max 6 9
n 1 s
n 6 t
a 1 2 10
a 1 3 10
a 2 3 2
a 2 4 4
a 2 5 8
a 3 5 9
a 4 6 10
a 5 4 6
a 5 6 10
";
    let mut g: FlowGraph<i64> = dimacs::read(Cursor::new(instance))?;
    let mut values = vec![];
    for &alg in &Algorithm::ALL {
        values.push(alg.solve(&mut g)?);
        assert!(validate::check_all(&g).is_empty());
    }
    assert_eq!(values, vec![19; 4]);

    Ok(())
}

#[cfg(feature = "serialize")]
#[test]
fn test_serialize_steps() -> Result<(), Box<dyn Error>> {
    use rs_maxflow::maxflow::{Augmentation, Dinic, DinicPhase};

    let mut g = random_graph(13, 6, 8);
    let mut snapshots = vec![];
    let mut ek = EdmondsKarp::init(&mut g);
    while let StepResult::Progress(aug) = ek.step()? {
        snapshots.push(serde_json::to_string(&aug)?);
    }
    for s in &snapshots {
        let aug: Augmentation<i32> = serde_json::from_str(s)?;
        assert!(aug.increment > 0);
    }

    let json = serde_json::to_string(&g)?;
    let mut h: FlowGraph<i32> = serde_json::from_str(&json)?;
    assert_eq!(h.value(), g.value());

    h.reset();
    let mut dinic = Dinic::init(&mut h);
    let phase = dinic.step()?.into_snapshot();
    let back: DinicPhase<i32> = serde_json::from_str(&serde_json::to_string(&phase)?)?;
    assert_eq!(back, phase);

    Ok(())
}
