//! Arena-backed singly-linked list.

#![cfg(feature = "alloc")]

use crate::{
	limits::{LeftLimit, Sequence, Values, after},
	list::Handle,
	splicing::{ByCosplice, Cosplice, SpliceAfter, Spliceable},
};
use alloc::vec::Vec;
use core::{
	fmt,
	ops::{Index, IndexMut},
};

#[derive(Clone)]
struct Node<T> {
	value: T,
	next: Option<Handle>,
}

/// A singly-linked list storing its nodes in a single vector.
///
/// Besides its head, the list keeps track of its tail, so [`Sequence::last`] is *O*(1). It relocates
/// coranges natively ([`Cosplice`]) in *O*(1) and also offers the open-range [`SpliceAfter`], which
/// has to walk the moved range to find its end.
///
/// # Example
///
/// ```
/// use splice_sort::{ForwardList, SequenceExt};
///
/// let mut list = [8, 1, 9, 2, 10, 3].into_iter().collect::<ForwardList<u32>>();
/// let (len, last) = list.sort_by_bucketing(4, |a, b| a >> 2 == b >> 2);
///
/// assert_eq!(len, 6);
/// assert!(list.iter().eq(&[1, 2, 3, 8, 9, 10]));
/// assert_eq!(last.map(|last| list[last]), Some(10));
/// ```
#[derive(Clone)]
pub struct ForwardList<T> {
	nodes: Vec<Node<T>>,
	head: Option<Handle>,
	tail: Option<Handle>,
}

impl<T> ForwardList<T> {
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
			next: self.head,
		});
		if self.head.is_none() {
			self.tail = Some(handle);
		}
		self.head = Some(handle);
		handle
	}
	/// Appends `value` and returns its handle.
	pub fn push_back(&mut self, value: T) -> Handle {
		let handle = Handle(self.nodes.len());
		self.nodes.push(Node { value, next: None });
		self.set_link(self.tail.map_or(LeftLimit::Front, LeftLimit::At), Some(handle));
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
	fn set_link(&mut self, pos: LeftLimit<Handle>, next: Option<Handle>) {
		match pos {
			LeftLimit::Front => self.head = next,
			LeftLimit::At(pos) => self.nodes[pos.0].next = next,
		}
	}
}

impl<T> Sequence for ForwardList<T> {
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

impl<T> Cosplice for ForwardList<T> {
	fn cosplice(&mut self, pos: LeftLimit<Handle>, lt: LeftLimit<Handle>, rt: Handle) {
		if pos == lt {
			return;
		}
		let Some(first) = after(self, lt) else {
			return;
		};
		let rest = self.nodes[rt.0].next;
		let dest = after(self, pos);

		self.set_link(lt, rest);
		self.nodes[rt.0].next = dest;
		self.set_link(pos, Some(first));

		if rest.is_none() {
			self.tail = lt.pos();
		}
		if dest.is_none() {
			self.tail = Some(rt);
		}
	}
}

impl<T> SpliceAfter for ForwardList<T> {
	fn splice_after(&mut self, pos: LeftLimit<Handle>, first: LeftLimit<Handle>, last: Option<Handle>) {
		let Some(mut end) = after(self, first) else {
			return;
		};
		if Some(end) == last {
			return;
		}
		while let Some(next) = self.nodes[end.0].next {
			if Some(next) == last {
				break;
			}
			end = next;
		}
		self.cosplice(pos, first, end);
	}
}

impl<T> Spliceable for ForwardList<T> {
	type Strategy = ByCosplice;
}

impl<T> Default for ForwardList<T> {
	#[inline]
	fn default() -> Self {
		Self::new()
	}
}

impl<T> Index<Handle> for ForwardList<T> {
	type Output = T;

	#[inline]
	fn index(&self, pos: Handle) -> &T {
		&self.nodes[pos.0].value
	}
}

impl<T> IndexMut<Handle> for ForwardList<T> {
	#[inline]
	fn index_mut(&mut self, pos: Handle) -> &mut T {
		&mut self.nodes[pos.0].value
	}
}

impl<T> Extend<T> for ForwardList<T> {
	fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
		for value in iter {
			self.push_back(value);
		}
	}
}

impl<T> FromIterator<T> for ForwardList<T> {
	fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
		let iter = iter.into_iter();
		let mut list = Self::with_capacity(iter.size_hint().0);
		list.extend(iter);
		list
	}
}

impl<T: fmt::Debug> fmt::Debug for ForwardList<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_list().entries(self.iter()).finish()
	}
}

#[cfg(feature = "std")]
#[cfg(test)]
mod test {
	use super::ForwardList;
	use crate::{
		limits::{LeftLimit, Sequence},
		splicing::{Cosplice, SpliceAfter},
	};

	#[test]
	fn push() {
		let mut list = ForwardList::new();
		list.push_front(2);
		let one = list.push_front(1);
		list.push_back(3);
		assert!(list.iter().eq(&[1, 2, 3]));
		assert_eq!(list[one], 1);
		list[one] = 0;
		assert_eq!(format!("{list:?}"), "[0, 2, 3]");
		assert_eq!(list.last().map(|last| list[last]), Some(3));
	}

	#[test]
	fn splice_after() {
		let mut list = (0..6).collect::<ForwardList<u32>>();
		let [zero, one, _, three, _, five] = [0, 1, 2, 3, 4, 5].map(|n| list.nth(n).unwrap());

		// (0, 3) to the end.
		list.splice_after(LeftLimit::At(five), LeftLimit::At(zero), Some(three));
		assert!(list.iter().eq(&[0, 3, 4, 5, 1, 2]));
		assert_eq!(list.last().map(|last| list[last]), Some(2));

		// (front, 4) after 2.
		let two = list.last().unwrap();
		list.splice_after(LeftLimit::At(two), LeftLimit::Front, list.nth(2));
		assert!(list.iter().eq(&[4, 5, 1, 2, 0, 3]));
		assert_eq!(list.last().map(|last| list[last]), Some(3));

		// Empty range and no-op.
		list.splice_after(LeftLimit::Front, LeftLimit::At(one), list.next(one));
		list.splice_after(LeftLimit::At(one), LeftLimit::At(one), None);
		assert!(list.iter().eq(&[4, 5, 1, 2, 0, 3]));
	}

	#[test]
	fn cosplice() {
		let mut list = (0..4).collect::<ForwardList<u32>>();
		let [zero, one, two, three] = [0, 1, 2, 3].map(|n| list.nth(n).unwrap());

		list.cosplice(LeftLimit::Front, LeftLimit::At(one), three);
		assert!(list.iter().eq(&[2, 3, 0, 1]));
		assert_eq!(list.last(), Some(one));

		list.cosplice(LeftLimit::At(one), LeftLimit::Front, three);
		assert!(list.iter().eq(&[0, 1, 2, 3]));
		assert_eq!(list.last(), Some(three));

		list.cosplice_one(LeftLimit::At(three), LeftLimit::At(zero));
		assert!(list.iter().eq(&[0, 2, 3, 1]));
		assert_eq!(list.first(), Some(zero));
		assert_eq!(list.next(two), Some(three));
		assert_eq!(list.last(), Some(one));
	}
}
