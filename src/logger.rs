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


//! Narration of the algorithm steps.
//!
//! The algorithms describe what they do through a [`Logger`]. The
//! narration is a pure side channel: it is never read back and the
//! algorithms behave the same with every logger. Messages are organized in
//! nested groups.
//!
//! - [`NullLogger`] drops everything (the default),
//! - [`Recorder`] keeps the messages and renders them as indented text,
//! - [`LogAdapter`] forwards them to the [`log`] facade.
//!
//! # Example
//!
//! ```
//! use rs_maxflow::logger::{Logger, Recorder};
//!
//! let mut rec = Recorder::new();
//! rec.group(format_args!("Phase {}", 1));
//! rec.log(format_args!("hello"));
//! rec.warn(format_args!("careful"));
//! rec.group_end();
//! rec.log(format_args!("bye"));
//!
//! assert_eq!(rec.to_string(), "Phase 1\n  hello\n  WARN: careful\nbye");
//! ```

use std::fmt;

/// A receiver of hierarchical narration.
pub trait Logger {
    /// Open a new group, subsequent messages belong to it.
    fn group(&mut self, name: fmt::Arguments<'_>);

    fn log(&mut self, msg: fmt::Arguments<'_>);

    fn warn(&mut self, msg: fmt::Arguments<'_>);

    fn error(&mut self, msg: fmt::Arguments<'_>);

    /// Close the innermost group.
    ///
    /// Closing the root group has no effect.
    fn group_end(&mut self);
}

impl<'a, L> Logger for &'a mut L
where
    L: Logger,
{
    fn group(&mut self, name: fmt::Arguments<'_>) {
        (**self).group(name)
    }

    fn log(&mut self, msg: fmt::Arguments<'_>) {
        (**self).log(msg)
    }

    fn warn(&mut self, msg: fmt::Arguments<'_>) {
        (**self).warn(msg)
    }

    fn error(&mut self, msg: fmt::Arguments<'_>) {
        (**self).error(msg)
    }

    fn group_end(&mut self) {
        (**self).group_end()
    }
}

/// A logger that ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullLogger;

impl Logger for NullLogger {
    fn group(&mut self, _name: fmt::Arguments<'_>) {}

    fn log(&mut self, _msg: fmt::Arguments<'_>) {}

    fn warn(&mut self, _msg: fmt::Arguments<'_>) {}

    fn error(&mut self, _msg: fmt::Arguments<'_>) {}

    fn group_end(&mut self) {}
}

/// Severity of a recorded message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Error,
    Warn,
    Log,
}

#[derive(Clone, Debug)]
enum Entry {
    Message(Level, String),
    Group(usize),
}

#[derive(Clone, Debug, Default)]
struct Group {
    name: String,
    entries: Vec<Entry>,
}

/// A logger that records all messages.
///
/// The `Display` implementation renders the messages line by line, the
/// entries of a group indented by two spaces relative to the group name.
/// Warnings and errors are prefixed by `WARN: ` and `ERROR: `.
#[derive(Clone, Debug)]
pub struct Recorder {
    /// All groups, `groups[0]` is the root.
    groups: Vec<Group>,
    /// The currently open groups, innermost last.
    open: Vec<usize>,
}

impl Default for Recorder {
    fn default() -> Self {
        Recorder::new()
    }
}

impl Recorder {
    pub fn new() -> Self {
        Recorder {
            groups: vec![Group::default()],
            open: vec![0],
        }
    }

    /// Return the nesting depth of the current group (0 for the root).
    pub fn depth(&self) -> usize {
        self.open.len() - 1
    }

    /// Return `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.groups[0].entries.is_empty()
    }

    /// Return all recorded messages of the given level in order.
    pub fn messages(&self, level: Level) -> Vec<&str> {
        let mut result = vec![];
        self.collect(0, level, &mut result);
        result
    }

    /// Forget everything.
    pub fn clear(&mut self) {
        *self = Recorder::new();
    }

    fn collect<'a>(&'a self, g: usize, level: Level, result: &mut Vec<&'a str>) {
        for e in &self.groups[g].entries {
            match *e {
                Entry::Message(l, ref msg) if l == level => result.push(msg),
                Entry::Message(..) => {}
                Entry::Group(h) => self.collect(h, level, result),
            }
        }
    }

    fn add(&mut self, entry: Entry) {
        let cur = self.open[self.open.len() - 1];
        self.groups[cur].entries.push(entry);
    }

    fn render(&self, g: usize, depth: usize, lines: &mut Vec<String>) {
        let indent = "  ".repeat(depth);
        for e in &self.groups[g].entries {
            match *e {
                Entry::Message(Level::Log, ref msg) => lines.push(format!("{}{}", indent, msg)),
                Entry::Message(Level::Warn, ref msg) => lines.push(format!("{}WARN: {}", indent, msg)),
                Entry::Message(Level::Error, ref msg) => lines.push(format!("{}ERROR: {}", indent, msg)),
                Entry::Group(h) => {
                    lines.push(format!("{}{}", indent, self.groups[h].name));
                    self.render(h, depth + 1, lines);
                }
            }
        }
    }
}

impl Logger for Recorder {
    fn group(&mut self, name: fmt::Arguments<'_>) {
        let h = self.groups.len();
        self.groups.push(Group {
            name: name.to_string(),
            entries: vec![],
        });
        self.add(Entry::Group(h));
        self.open.push(h);
    }

    fn log(&mut self, msg: fmt::Arguments<'_>) {
        self.add(Entry::Message(Level::Log, msg.to_string()));
    }

    fn warn(&mut self, msg: fmt::Arguments<'_>) {
        self.add(Entry::Message(Level::Warn, msg.to_string()));
    }

    fn error(&mut self, msg: fmt::Arguments<'_>) {
        self.add(Entry::Message(Level::Error, msg.to_string()));
    }

    fn group_end(&mut self) {
        if self.open.len() > 1 {
            self.open.pop();
        }
    }
}

impl fmt::Display for Recorder {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut lines = vec![];
        self.render(0, 0, &mut lines);
        write!(f, "{}", lines.join("\n"))
    }
}

/// A logger forwarding to the [`log`] crate.
///
/// Messages are emitted with target `rs_maxflow::narration` and indented
/// by the current group depth. Group names are emitted at debug level,
/// plain messages at info level.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogAdapter {
    depth: usize,
}

const TARGET: &str = "rs_maxflow::narration";

impl LogAdapter {
    pub fn new() -> Self {
        LogAdapter::default()
    }
}

impl Logger for LogAdapter {
    fn group(&mut self, name: fmt::Arguments<'_>) {
        log::debug!(target: TARGET, "{:indent$}{}", "", name, indent = 2 * self.depth);
        self.depth += 1;
    }

    fn log(&mut self, msg: fmt::Arguments<'_>) {
        log::info!(target: TARGET, "{:indent$}{}", "", msg, indent = 2 * self.depth);
    }

    fn warn(&mut self, msg: fmt::Arguments<'_>) {
        log::warn!(target: TARGET, "{:indent$}{}", "", msg, indent = 2 * self.depth);
    }

    fn error(&mut self, msg: fmt::Arguments<'_>) {
        log::error!(target: TARGET, "{:indent$}{}", "", msg, indent = 2 * self.depth);
    }

    fn group_end(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}
