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

use time::OffsetDateTime;

use rustop::opts;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

use rs_maxflow::dimacs;
use rs_maxflow::logger::LogAdapter;
use rs_maxflow::validate;
use rs_maxflow::{Algorithm, FlowGraph};

fn run(g: &mut FlowGraph<i64>, alg: Algorithm, niter: usize, narrate: bool) -> i64 {
    let tstart = OffsetDateTime::now_utc();
    let mut value = 0;
    for _ in 0..niter {
        let result = if narrate {
            alg.solve_with(g, LogAdapter::new())
        } else {
            alg.solve(g)
        };
        value = match result {
            Ok(value) => value,
            Err(err) => {
                eprintln!("{} failed: {}", alg, err);
                std::process::exit(1);
            }
        };
    }
    let tend = OffsetDateTime::now_utc();
    println!("{}", alg);
    println!("  Time: {}", (tend - tstart).as_seconds_f64());
    println!("  Flow: {}", value);

    for violation in validate::check_all(g) {
        println!("  Violation: {}", violation);
    }

    value
}

fn main() {
    let (args, _) = opts! {
        synopsis "Solve a max-flow problem in DIMACS format.";
        opt algorithm:Option<String>, desc:"The algorithm (ff, ek, dinic, pp), all if omitted.";
        opt num:usize=1, desc:"Number of times the algorithm is repeated.";
        opt narrate:bool, desc:"Print the narration of the algorithms.";
        opt verbose:bool, desc:"Verbose output.";
        param file:String, desc:"Instance file name";
    }
    .parse_or_exit();

    let level = if args.narrate || args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    TermLogger::init(level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto).unwrap();

    let algorithms = match args.algorithm {
        Some(ref name) => match name.parse::<Algorithm>() {
            Ok(alg) => vec![alg],
            Err(err) => {
                eprintln!("{}", err);
                std::process::exit(1);
            }
        },
        None => Algorithm::ALL.to_vec(),
    };

    let tstart = OffsetDateTime::now_utc();
    let mut g: FlowGraph<i64> = match dimacs::read_from_file(&args.file) {
        Ok(g) => g,
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    };
    let tend = OffsetDateTime::now_utc();
    println!("Time: {}", (tend - tstart).as_seconds_f64());
    println!("  number of vertices: {}", g.num_vertices());
    println!("  number of arcs: {}", g.num_arcs());

    let values: Vec<_> = algorithms
        .iter()
        .map(|&alg| run(&mut g, alg, args.num, args.narrate))
        .collect();

    if let Err(err) = validate::check_agreement(&values) {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}
