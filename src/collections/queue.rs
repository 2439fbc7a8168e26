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


use super::{Discipline, Frontier};
use crate::error::{Error, Result};

use std::collections::VecDeque;
use std::fmt;

/// A first-in-first-out container.
#[derive(Clone, Debug)]
pub struct Queue<I> {
    items: VecDeque<I>,
}

impl<I> Queue<I> {
    pub fn new() -> Self {
        Queue { items: VecDeque::new() }
    }

    pub fn with_capacity(n: usize) -> Self {
        Queue {
            items: VecDeque::with_capacity(n),
        }
    }

    /// Return an iterator from the front to the back of the queue.
    pub fn iter(&self) -> impl Iterator<Item = &I> {
        self.items.iter()
    }
}

impl<I> Default for Queue<I> {
    fn default() -> Self {
        Queue::new()
    }
}

impl<I> Frontier<I> for Queue<I> {
    fn discipline(&self) -> Option<Discipline> {
        Some(Discipline::Fifo)
    }

    fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn clear(&mut self) {
        self.items.clear()
    }

    fn push(&mut self, u: I) {
        self.items.push_back(u)
    }

    fn pop(&mut self) -> Result<I> {
        self.items.pop_front().ok_or(Error::EmptyContainerPop)
    }

    fn top(&self) -> Option<&I> {
        self.items.front()
    }
}

/// Writes `-> a < b < c` (front first) or `empty`.
impl<I: fmt::Display> fmt::Display for Queue<I> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut it = self.items.iter();
        match it.next() {
            None => write!(f, "empty"),
            Some(first) => {
                write!(f, "-> {}", first)?;
                for item in it {
                    write!(f, " < {}", item)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::collections::{Discipline, Frontier, Queue};
    use crate::Error;

    #[test]
    fn test_fifo() {
        let mut q = Queue::new();
        assert!(q.is_empty());
        assert_eq!(q.top(), None);
        assert_eq!(q.discipline(), Some(Discipline::Fifo));
        assert_eq!(q.to_string(), "empty");

        q.push(1);
        q.push(2);
        q.push(3);
        assert_eq!(q.len(), 3);
        assert_eq!(q.top(), Some(&1));
        assert_eq!(q.to_string(), "-> 1 < 2 < 3");
        assert_eq!(q.pop(), Ok(1));
        q.push(4);
        assert_eq!(q.pop(), Ok(2));
        assert_eq!(q.pop(), Ok(3));
        assert_eq!(q.pop(), Ok(4));
        assert_eq!(q.pop(), Err(Error::EmptyContainerPop));
        assert_eq!(q.len(), 0);
    }
}
