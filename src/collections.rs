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


//! Data structures used by the algorithms.
//!
//! The [`Frontier`] trait is the container contract of the generic graph
//! traversal in [`crate::search`]: a [`Stack`] turns the traversal into a
//! depth-first search, a [`Queue`] into a breadth-first search.

mod dll;
mod queue;
mod stack;

pub use self::dll::{DoublyLinkedLists, ElementId, ListId};
pub use self::queue::Queue;
pub use self::stack::Stack;

use crate::error::Result;

/// The order in which a frontier returns its items.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Discipline {
    /// Last in, first out.
    Lifo,
    /// First in, first out.
    Fifo,
}

/// A container of items waiting to be processed.
pub trait Frontier<I> {
    /// Return the order of this container.
    ///
    /// Containers without a well-defined order cannot drive a search and
    /// return `None`.
    fn discipline(&self) -> Option<Discipline> {
        None
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn len(&self) -> usize;

    fn clear(&mut self);

    fn push(&mut self, u: I);

    /// Remove and return the next item.
    ///
    /// Fails with [`Error::EmptyContainerPop`][crate::Error::EmptyContainerPop]
    /// if the container is empty.
    fn pop(&mut self) -> Result<I>;

    /// Return the next item without removing it.
    fn top(&self) -> Option<&I>;
}

impl<'a, I, D> Frontier<I> for &'a mut D
where
    D: Frontier<I>,
{
    fn discipline(&self) -> Option<Discipline> {
        (**self).discipline()
    }

    fn is_empty(&self) -> bool {
        (**self).is_empty()
    }

    fn len(&self) -> usize {
        (**self).len()
    }

    fn clear(&mut self) {
        (**self).clear()
    }

    fn push(&mut self, u: I) {
        (**self).push(u)
    }

    fn pop(&mut self) -> Result<I> {
        (**self).pop()
    }

    fn top(&self) -> Option<&I> {
        (**self).top()
    }
}
