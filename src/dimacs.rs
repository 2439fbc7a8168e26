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

//! Reading max flow instances in DIMACS format.
//!
//! A file must look as follows.
//!
//! 1. empty lines and lines starting with `c` (comments) are ignored,
//! 2. the first other line is the problem line `p max <n> <m>` with the
//!    number of nodes `<n>` and the number of arcs `<m>`,
//! 3. two node lines `n <node> s` and `n <node> t` designate source and
//!    sink (nodes are numbered `1..=n`),
//! 4. exactly `m` arc lines `a <u> <v> <c>` follow, each describing an
//!    arc from `<u>` to `<v>` with capacity `<c> >= 0`.
//!
//! Loops are not allowed, parallel arcs are. Every arc gets its own
//! reverse arc with capacity 0.
//!
//! # Example
//!
//! ```
//! use rs_maxflow::{dimacs, Algorithm, FlowGraph};
//!
//! let file = "c two paths\np max 4 4\nn 1 s\nn 4 t\na 1 2 3\na 1 3 1\na 2 4 1\na 3 4 5\n";
//! let mut g: FlowGraph<u32> = dimacs::read(file.as_bytes()).unwrap();
//! assert_eq!(g.num_vertices(), 4);
//! assert_eq!(Algorithm::Dinic.solve(&mut g).unwrap(), 2);
//! ```

use crate::builder::GraphBuilder;
use crate::graph::{Flow, FlowGraph, VertexId, VertexKind};

use displaydoc::Display;

use std::error;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;
use std::str::FromStr;

/// Error when reading a file in DIMACS format.
#[derive(Debug, Display)]
pub enum Error {
    /// {0}
    Io(io::Error),
    /// Format error on line {line}: {msg}
    Format { line: usize, msg: String },
    /// Data error on line {line}: {msg}
    Data { line: usize, msg: String },
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// A line of a max flow file that is neither empty nor a comment.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Line<F> {
    Problem { nodes: usize, arcs: usize },
    Node { id: usize, kind: VertexKind },
    Arc { from: usize, to: usize, capacity: F },
}

fn format_error<S: Into<String>>(line: usize, msg: S) -> Error {
    Error::Format { line, msg: msg.into() }
}

fn data_error<S: Into<String>>(line: usize, msg: S) -> Error {
    Error::Data { line, msg: msg.into() }
}

/// Parse the next field of a line.
fn field<T>(line: usize, tok: Option<&str>, what: &str) -> Result<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    let tok = tok.ok_or_else(|| format_error(line, format!("missing {}", what)))?;
    tok.parse()
        .map_err(|e| format_error(line, format!("invalid {} '{}': {}", what, tok, e)))
}

/// Parse line number `line`. Empty and comment lines yield `None`.
fn parse_line<F>(line: usize, text: &str) -> Result<Option<Line<F>>>
where
    F: FromStr,
    F::Err: fmt::Display,
{
    let mut toks = text.split_whitespace();
    let parsed = match toks.next() {
        None => return Ok(None),
        Some(tok) if tok.starts_with('c') => return Ok(None),
        Some("p") => match toks.next() {
            Some("max") => Line::Problem {
                nodes: field(line, toks.next(), "number of nodes")?,
                arcs: field(line, toks.next(), "number of arcs")?,
            },
            other => {
                return Err(format_error(
                    line,
                    format!("expected problem type 'max', got '{}'", other.unwrap_or("")),
                ))
            }
        },
        Some("n") => {
            let id = field(line, toks.next(), "node id")?;
            let kind = match toks.next() {
                Some("s") => VertexKind::Source,
                Some("t") => VertexKind::Sink,
                other => {
                    return Err(format_error(
                        line,
                        format!("invalid node type, must be 's' or 't', got '{}'", other.unwrap_or("")),
                    ))
                }
            };
            Line::Node { id, kind }
        }
        Some("a") => Line::Arc {
            from: field(line, toks.next(), "tail node")?,
            to: field(line, toks.next(), "head node")?,
            capacity: field(line, toks.next(), "capacity")?,
        },
        Some(tok) => return Err(format_error(line, format!("unknown line type '{}'", tok))),
    };

    match toks.next() {
        Some(tok) => Err(format_error(line, format!("unexpected token at end of line: {}", tok))),
        None => Ok(Some(parsed)),
    }
}

/// Return the vertex of DIMACS node `id`.
fn vertex(vertices: &[VertexId], line: usize, id: usize) -> Result<VertexId> {
    if id >= 1 && id <= vertices.len() {
        Ok(vertices[id - 1])
    } else {
        Err(data_error(
            line,
            format!("invalid node id {} (must be in 1..={})", id, vertices.len()),
        ))
    }
}

/// Read a max flow instance.
pub fn read<R, F>(r: R) -> Result<FlowGraph<F>>
where
    R: Read,
    F: Flow + FromStr,
    F::Err: fmt::Display,
{
    let mut b = GraphBuilder::new();
    let mut vertices = vec![];
    let mut expected_arcs = None;
    let mut terminals: Vec<(usize, VertexKind)> = vec![];
    let mut narcs = 0;
    let mut line = 0;

    for text in BufReader::new(r).lines() {
        let text = text?;
        line += 1;
        let parsed = match parse_line::<F>(line, &text)? {
            Some(parsed) => parsed,
            None => continue,
        };

        match (parsed, expected_arcs) {
            (Line::Problem { nodes, arcs }, None) => {
                vertices = b.add_vertices(nodes);
                expected_arcs = Some(arcs);
            }
            (Line::Problem { .. }, Some(_)) => return Err(format_error(line, "duplicate problem line")),
            (_, None) => return Err(format_error(line, "expected problem line 'p max <n> <m>'")),
            (Line::Node { id, kind }, Some(_)) => {
                if narcs > 0 {
                    return Err(format_error(line, "node lines must precede the arc lines"));
                }
                let v = vertex(&vertices, line, id)?;
                if terminals.iter().any(|&(_, k)| k == kind) {
                    let name = if kind == VertexKind::Source { "source" } else { "sink" };
                    return Err(format_error(line, format!("duplicate {} node", name)));
                }
                if terminals.iter().any(|&(u, _)| u == id) {
                    return Err(data_error(line, format!("node {} cannot be both source and sink", id)));
                }
                b.set_kind(v, kind).map_err(|e| data_error(line, e.to_string()))?;
                terminals.push((id, kind));
            }
            (Line::Arc { from, to, capacity }, Some(m)) => {
                if narcs == m {
                    return Err(format_error(
                        line,
                        format!("unexpected arc line (expected exactly {} 'a' lines)", m),
                    ));
                }
                let u = vertex(&vertices, line, from)?;
                let v = vertex(&vertices, line, to)?;
                b.add_arc(u, v, capacity)
                    .map_err(|e| data_error(line, format!("arc ({},{}): {}", from, to, e)))?;
                narcs += 1;
            }
        }
    }

    match expected_arcs {
        None => return Err(format_error(line, "missing problem line")),
        Some(m) if narcs < m => {
            return Err(format_error(
                line,
                format!("unexpected end of file, expected {} 'a' lines, got {}", m, narcs),
            ))
        }
        Some(_) => {}
    }

    b.into_graph().map_err(|e| data_error(line, e.to_string()))
}

/// Read a max flow instance from a file.
pub fn read_from_file<P, F>(path: P) -> Result<FlowGraph<F>>
where
    P: AsRef<Path>,
    F: Flow + FromStr,
    F::Err: fmt::Display,
{
    read(File::open(path)?)
}
