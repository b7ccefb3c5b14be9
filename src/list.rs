//! Arena-backed doubly-linked list.

#![cfg(feature = "alloc")]

use crate::{
	limits::{Sequence, Values},
	splicing::{BySplice, Splice, Spliceable},
};
use alloc::vec::Vec;
use core::{
	fmt,
	ops::{Index, IndexMut},
};

/// Position of an element in a [`List`] or [`ForwardList`](crate::ForwardList).
///
/// Handles stay valid until the list is cleared, no matter how its elements get relinked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(pub(crate) usize);

#[derive(Clone)]
struct Node<T> {
	value: T,
	prev: Option<Handle>,
	next: Option<Handle>,
}

/// A doubly-linked list storing its nodes in a single vector.
///
/// Elements are never moved in memory once pushed. Reordering happens by relinking only, so
/// [`Handle`]s stay valid. The list is [`Spliceable`] via [`Splice`].
///
/// # Example
///
/// ```
/// use splice_sort::{List, SequenceExt};
///
/// let mut list = [5, 3, 1, 4, 2].into_iter().collect::<List<_>>();
/// let last = list.sort_by_merging();
///
/// assert!(list.iter().eq(&[1, 2, 3, 4, 5]));
/// assert_eq!(last.map(|last| list[last]), Some(5));
/// ```
#[derive(Clone)]
pub struct List<T> {
	nodes: Vec<Node<T>>,
	head: Option<Handle>,
	tail: Option<Handle>,
}

impl<T> List<T> {
	/// Creates an empty list.
	#[inline]
	pub const fn new() -> Self {
		Self {
			nodes: Vec::new(),
			head: None,
			tail: None,
		}
	}
	/// Creates an empty list with space for at least `capacity` elements.
	#[inline]
	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			nodes: Vec::with_capacity(capacity),
			head: None,
			tail: None,
		}
	}
	/// Returns the number of elements.
	#[inline]
	pub fn len(&self) -> usize {
		self.nodes.len()
	}
	/// Returns `true` if the list contains no elements.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}
	/// Prepends `value` and returns its handle.
	pub fn push_front(&mut self, value: T) -> Handle {
		let handle = Handle(self.nodes.len());
		self.nodes.push(Node {
			value,
			prev: None,
			next: self.head,
		});
		match self.head {
			Some(head) => self.nodes[head.0].prev = Some(handle),
			None => self.tail = Some(handle),
		}
		self.head = Some(handle);
		handle
	}
	/// Appends `value` and returns its handle.
	pub fn push_back(&mut self, value: T) -> Handle {
		let handle = Handle(self.nodes.len());
		self.nodes.push(Node {
			value,
			prev: self.tail,
			next: None,
		});
		match self.tail {
			Some(tail) => self.nodes[tail.0].next = Some(handle),
			None => self.head = Some(handle),
		}
		self.tail = Some(handle);
		handle
	}
	/// Removes all elements, invalidating all handles.
	pub fn clear(&mut self) {
		self.nodes.clear();
		self.head = None;
		self.tail = None;
	}
	/// Returns an iterator over the elements in list order.
	#[inline]
	pub fn iter(&self) -> Values<'_, Self> {
		self.values()
	}

	#[inline]
	fn set_next(&mut self, pos: Option<Handle>, next: Option<Handle>) {
		match pos {
			Some(pos) => self.nodes[pos.0].next = next,
			None => self.head = next,
		}
	}
	#[inline]
	fn set_prev(&mut self, pos: Option<Handle>, prev: Option<Handle>) {
		match pos {
			Some(pos) => self.nodes[pos.0].prev = prev,
			None => self.tail = prev,
		}
	}
}

impl<T> Sequence for List<T> {
	type Item = T;
	type Pos = Handle;

	#[inline]
	fn first(&self) -> Option<Handle> {
		self.head
	}
	#[inline]
	fn next(&self, pos: Handle) -> Option<Handle> {
		self.nodes[pos.0].next
	}
	#[inline]
	fn get(&self, pos: Handle) -> &T {
		&self.nodes[pos.0].value
	}
	#[inline]
	fn last(&self) -> Option<Handle> {
		self.tail
	}
	#[inline]
	fn len(&self) -> usize {
		self.nodes.len()
	}
}

impl<T> Splice for List<T> {
	fn splice(&mut self, pos: Option<Handle>, first: Handle, last: Option<Handle>) {
		if last == Some(first) || pos == Some(first) || pos == last {
			return;
		}
		let end = match last {
			Some(last) => self.nodes[last.0].prev,
			None => self.tail,
		};
		let Some(end) = end else {
			return;
		};

		// Unlink `[first, end]`.
		let before = self.nodes[first.0].prev;
		self.set_next(before, last);
		self.set_prev(last, before);

		// Link it in before `pos`.
		let before = match pos {
			Some(pos) => self.nodes[pos.0].prev,
			None => self.tail,
		};
		self.set_next(before, Some(first));
		self.nodes[first.0].prev = before;
		self.nodes[end.0].next = pos;
		self.set_prev(pos, Some(end));
	}
}

impl<T> Spliceable for List<T> {
	type Strategy = BySplice;
}

impl<T> Default for List<T> {
	#[inline]
	fn default() -> Self {
		Self::new()
	}
}

impl<T> Index<Handle> for List<T> {
	type Output = T;

	#[inline]
	fn index(&self, pos: Handle) -> &T {
		&self.nodes[pos.0].value
	}
}

impl<T> IndexMut<Handle> for List<T> {
	#[inline]
	fn index_mut(&mut self, pos: Handle) -> &mut T {
		&mut self.nodes[pos.0].value
	}
}

impl<T> Extend<T> for List<T> {
	fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
		for value in iter {
			self.push_back(value);
		}
	}
}

impl<T> FromIterator<T> for List<T> {
	fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
		let iter = iter.into_iter();
		let mut list = Self::with_capacity(iter.size_hint().0);
		list.extend(iter);
		list
	}
}

impl<T: fmt::Debug> fmt::Debug for List<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_list().entries(self.iter()).finish()
	}
}

#[cfg(feature = "std")]
#[cfg(test)]
mod test {
	use super::List;
	use crate::{limits::Sequence, splicing::Splice};

	#[test]
	fn push() {
		let mut list = List::new();
		let two = list.push_back(2);
		list.push_front(1);
		list.push_back(3);
		assert!(list.iter().eq(&[1, 2, 3]));
		assert_eq!(list[two], 2);
		assert_eq!(list.last().map(|last| list[last]), Some(3));
		list.clear();
		assert!(list.is_empty());
		assert_eq!(list.first(), None);
	}

	#[test]
	fn splice() {
		let mut list = (0..6).collect::<List<u32>>();
		let [one, _, three, four] = [1, 2, 3, 4].map(|n| list.nth(n).unwrap());

		// [1, 3) to the end.
		list.splice(None, one, Some(three));
		assert!(list.iter().eq(&[0, 3, 4, 5, 1, 2]));
		assert_eq!(list.last().map(|last| list[last]), Some(2));

		// [4, end) to the front.
		list.splice(list.first(), four, None);
		assert!(list.iter().eq(&[4, 5, 1, 2, 0, 3]));
		assert_eq!(list.last().map(|last| list[last]), Some(3));

		// No-ops.
		list.splice(Some(four), four, Some(one));
		list.splice(Some(one), four, Some(one));
		assert!(list.iter().eq(&[4, 5, 1, 2, 0, 3]));
	}
}
