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

/// A last-in-first-out container.
#[derive(Clone, Debug)]
pub struct Stack<I> {
    items: Vec<I>,
}

impl<I> Stack<I> {
    pub fn new() -> Self {
        Stack { items: Vec::new() }
    }

    pub fn with_capacity(n: usize) -> Self {
        Stack {
            items: Vec::with_capacity(n),
        }
    }

    /// Return an iterator from the bottom to the top of the stack.
    pub fn iter(&self) -> impl Iterator<Item = &I> {
        self.items.iter()
    }
}

impl<I> Default for Stack<I> {
    fn default() -> Self {
        Stack::new()
    }
}

impl<I> Frontier<I> for Stack<I> {
    fn discipline(&self) -> Option<Discipline> {
        Some(Discipline::Lifo)
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
        self.items.push(u)
    }

    fn pop(&mut self) -> Result<I> {
        self.items.pop().ok_or(Error::EmptyContainerPop)
    }

    fn top(&self) -> Option<&I> {
        self.items.last()
    }
}

#[cfg(test)]
mod tests {
    use crate::collections::{Discipline, Frontier, Stack};
    use crate::Error;

    #[test]
    fn test_lifo() {
        let mut s = Stack::new();
        assert!(s.is_empty());
        assert_eq!(s.top(), None);
        assert_eq!(s.discipline(), Some(Discipline::Lifo));

        s.push(1);
        s.push(2);
        s.push(3);
        assert_eq!(s.len(), 3);
        assert_eq!(s.top(), Some(&3));
        assert_eq!(s.pop(), Ok(3));
        assert_eq!(s.pop(), Ok(2));
        s.push(4);
        assert_eq!(s.pop(), Ok(4));
        assert_eq!(s.pop(), Ok(1));
        assert!(s.is_empty());
        assert_eq!(s.pop(), Err(Error::EmptyContainerPop));
    }
}
