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


//! Doubly linked lists stored in a shared arena.
//!
//! All elements of all lists live in one vector and are referenced by
//! [`ElementId`] handles. An element can be removed from its list in
//! constant time given only its handle. Since handles stay valid after
//! removal, an element value may hold the handle of an element in another
//! list (e.g. the same arc in the incidence list of its other end).

/// Handle of a list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListId(usize);

impl ListId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Handle of a list element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ElementId(usize);

impl ElementId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug)]
struct Element<T> {
    value: T,
    list: ListId,
    prev: Option<ElementId>,
    next: Option<ElementId>,
    linked: bool,
}

#[derive(Clone, Copy, Debug, Default)]
struct Header {
    head: Option<ElementId>,
    tail: Option<ElementId>,
    len: usize,
}

/// A collection of doubly linked lists sharing one element arena.
#[derive(Clone, Debug)]
pub struct DoublyLinkedLists<T> {
    elements: Vec<Element<T>>,
    lists: Vec<Header>,
}

impl<T> Default for DoublyLinkedLists<T> {
    fn default() -> Self {
        DoublyLinkedLists::new()
    }
}

impl<T> DoublyLinkedLists<T> {
    /// Create an empty collection without lists.
    pub fn new() -> Self {
        DoublyLinkedLists {
            elements: vec![],
            lists: vec![],
        }
    }

    /// Create a collection with `n` empty lists.
    ///
    /// The lists have the handles with indices `0..n`, see
    /// [`DoublyLinkedLists::list`].
    pub fn with_lists(n: usize) -> Self {
        DoublyLinkedLists {
            elements: vec![],
            lists: vec![Header::default(); n],
        }
    }

    /// Add a new empty list.
    pub fn add_list(&mut self) -> ListId {
        self.lists.push(Header::default());
        ListId(self.lists.len() - 1)
    }

    /// Return the handle of the `i`-th list.
    pub fn list(&self, i: usize) -> ListId {
        debug_assert!(i < self.lists.len());
        ListId(i)
    }

    pub fn num_lists(&self) -> usize {
        self.lists.len()
    }

    /// Append `value` to the end of `list`.
    pub fn add(&mut self, list: ListId, value: T) -> ElementId {
        let e = ElementId(self.elements.len());
        let header = &mut self.lists[list.0];
        let prev = header.tail;
        self.elements.push(Element {
            value,
            list,
            prev,
            next: None,
            linked: true,
        });
        match prev {
            Some(p) => self.elements[p.0].next = Some(e),
            None => header.head = Some(e),
        }
        header.tail = Some(e);
        header.len += 1;
        e
    }

    /// Unlink element `e` from its list.
    ///
    /// Returns `false` if the element had been removed before.
    pub fn remove(&mut self, e: ElementId) -> bool {
        if !self.elements[e.0].linked {
            return false;
        }

        let (list, prev, next) = {
            let elem = &mut self.elements[e.0];
            elem.linked = false;
            (elem.list, elem.prev.take(), elem.next.take())
        };
        let header = &mut self.lists[list.0];
        match prev {
            Some(p) => self.elements[p.0].next = next,
            None => header.head = next,
        }
        match next {
            Some(n) => self.elements[n.0].prev = prev,
            None => header.tail = prev,
        }
        header.len -= 1;
        true
    }

    /// Return `true` if `e` is still linked in its list.
    pub fn contains(&self, e: ElementId) -> bool {
        self.elements[e.0].linked
    }

    pub fn value(&self, e: ElementId) -> &T {
        &self.elements[e.0].value
    }

    pub fn value_mut(&mut self, e: ElementId) -> &mut T {
        &mut self.elements[e.0].value
    }

    /// Return the list element `e` has been added to.
    pub fn list_of(&self, e: ElementId) -> ListId {
        self.elements[e.0].list
    }

    pub fn first(&self, list: ListId) -> Option<ElementId> {
        self.lists[list.0].head
    }

    pub fn last(&self, list: ListId) -> Option<ElementId> {
        self.lists[list.0].tail
    }

    pub fn next(&self, e: ElementId) -> Option<ElementId> {
        self.elements[e.0].next
    }

    pub fn prev(&self, e: ElementId) -> Option<ElementId> {
        self.elements[e.0].prev
    }

    pub fn len(&self, list: ListId) -> usize {
        self.lists[list.0].len
    }

    pub fn is_empty(&self, list: ListId) -> bool {
        self.lists[list.0].len == 0
    }

    /// Return an iterator over the elements of `list` from head to tail.
    pub fn iter(&self, list: ListId) -> Iter<'_, T> {
        Iter {
            lists: self,
            cur: self.lists[list.0].head,
        }
    }

    /// Call `f` for each element of `list` from head to tail.
    ///
    /// The iteration stops as soon as `f` returns `false`.
    pub fn for_each<C>(&self, list: ListId, mut f: C)
    where
        C: FnMut(ElementId, &T) -> bool,
    {
        for (e, value) in self.iter(list) {
            if !f(e, value) {
                break;
            }
        }
    }

    /// Return the values of `list` from head to tail.
    pub fn to_vec(&self, list: ListId) -> Vec<T>
    where
        T: Clone,
    {
        self.iter(list).map(|(_, value)| value.clone()).collect()
    }

    /// Remove all elements and all lists.
    pub fn clear(&mut self) {
        self.elements.clear();
        self.lists.clear();
    }
}

/// Iterator over the elements of a list.
pub struct Iter<'a, T> {
    lists: &'a DoublyLinkedLists<T>,
    cur: Option<ElementId>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (ElementId, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let e = self.cur?;
        let elem = &self.lists.elements[e.0];
        self.cur = elem.next;
        Some((e, &elem.value))
    }
}

#[cfg(test)]
mod tests {
    use super::DoublyLinkedLists;

    #[test]
    fn test_add_remove() {
        let mut dll = DoublyLinkedLists::with_lists(1);
        let l = dll.list(0);
        let es: Vec<_> = (0..5).map(|i| dll.add(l, i)).collect();
        assert_eq!(dll.len(l), 5);
        assert_eq!(dll.to_vec(l), vec![0, 1, 2, 3, 4]);

        // middle, head, tail
        assert!(dll.remove(es[2]));
        assert!(dll.remove(es[0]));
        assert!(dll.remove(es[4]));
        assert_eq!(dll.to_vec(l), vec![1, 3]);
        assert_eq!(dll.first(l), Some(es[1]));
        assert_eq!(dll.last(l), Some(es[3]));
        assert_eq!(dll.prev(es[3]), Some(es[1]));
        assert_eq!(dll.len(l), 2);

        // removing twice has no effect
        assert!(!dll.remove(es[2]));
        assert_eq!(dll.len(l), 2);
        assert!(!dll.contains(es[2]));

        assert!(dll.remove(es[1]));
        assert!(dll.remove(es[3]));
        assert!(dll.is_empty(l));
        assert_eq!(dll.first(l), None);
        assert_eq!(dll.last(l), None);

        let e = dll.add(l, 7);
        assert_eq!(dll.first(l), Some(e));
        assert_eq!(dll.to_vec(l), vec![7]);
    }

    #[test]
    fn test_independent_lists() {
        let mut dll = DoublyLinkedLists::new();
        let a = dll.add_list();
        let b = dll.add_list();
        let ea = dll.add(a, 'x');
        let eb = dll.add(b, 'y');
        dll.add(a, 'z');
        *dll.value_mut(eb) = 'w';

        assert_eq!(dll.num_lists(), 2);
        assert_eq!(dll.list_of(ea), a);
        assert!(dll.remove(ea));
        assert_eq!(dll.to_vec(a), vec!['z']);
        assert_eq!(dll.to_vec(b), vec!['w']);
    }

    #[test]
    fn test_for_each_early_exit() {
        let mut dll = DoublyLinkedLists::with_lists(1);
        let l = dll.list(0);
        for i in 0..10 {
            dll.add(l, i);
        }
        let mut seen = vec![];
        dll.for_each(l, |_, &v| {
            seen.push(v);
            v < 3
        });
        assert_eq!(seen, vec![0, 1, 2, 3]);
    }
}
