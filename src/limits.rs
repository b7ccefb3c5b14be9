//! Forward-traversable sequences and the limits of their sub-sequences.
//!
//! A sub-sequence is described the way a singly-linked structure can afford it: by the position
//! *preceding* its first element (a [`LeftLimit`]) and either its last element (a *corange*
//! `(left, last]`) or the position following it (a [`RightLimit`]).

/// A forward-traversable sequence with stable positions.
///
/// Positions are cheap handles that stay valid while elements are relinked within the sequence,
/// i.e., relocating elements never invalidates any position. The end of the sequence is denoted
/// by `None` wherever a position may run off the end.
pub trait Sequence {
	/// The element type.
	type Item;
	/// A dereferenceable position in the sequence.
	type Pos: Copy + Eq;

	/// Returns the position of the first element, or `None` if the sequence is empty.
	fn first(&self) -> Option<Self::Pos>;
	/// Returns the position following `pos`, or `None` if `pos` is the last element.
	fn next(&self, pos: Self::Pos) -> Option<Self::Pos>;
	/// Returns the element at `pos`.
	fn get(&self, pos: Self::Pos) -> &Self::Item;

	/// Returns the position of the last element, or `None` if the sequence is empty.
	///
	/// The provided implementation walks the whole sequence. Sequences keeping track of their
	/// tail should override it.
	fn last(&self) -> Option<Self::Pos> {
		let mut pos = self.first()?;
		while let Some(next) = self.next(pos) {
			pos = next;
		}
		Some(pos)
	}
	/// Returns the number of elements.
	///
	/// The provided implementation walks the whole sequence.
	fn len(&self) -> usize {
		self.values().count()
	}
	/// Returns `true` if the sequence contains no elements.
	fn is_empty(&self) -> bool {
		self.first().is_none()
	}
	/// Returns the position of the `n`-th element (zero-based), or `None` if there are not enough
	/// elements.
	fn nth(&self, n: usize) -> Option<Self::Pos> {
		let mut pos = self.first()?;
		for _ in 0..n {
			pos = self.next(pos)?;
		}
		Some(pos)
	}
	/// Returns the left limit preceding the element at `index`, i.e., the front sentinel for
	/// `index == 0` and the position of the element at `index - 1` otherwise.
	///
	/// # Panics
	///
	/// Panics if `index > len()`.
	fn left_limit(&self, index: usize) -> LeftLimit<Self::Pos> {
		match index.checked_sub(1) {
			None => LeftLimit::Front,
			Some(n) => match self.nth(n) {
				Some(pos) => LeftLimit::At(pos),
				None => panic!("left limit {index} is out of bounds"),
			},
		}
	}
	/// Returns the right limit at `index`, i.e., the position of the element at `index` or the
	/// end marker for `index == len()`.
	///
	/// # Panics
	///
	/// Panics if `index > len()`.
	fn right_limit(&self, index: usize) -> RightLimit<Self::Pos> {
		match self.nth(index) {
			Some(pos) => RightLimit::At(pos),
			None if index == 0 || self.nth(index - 1).is_some() => RightLimit::End,
			None => panic!("right limit {index} is out of bounds"),
		}
	}
	/// Returns an iterator over the elements in sequence order.
	fn values(&self) -> Values<'_, Self> {
		Values {
			seq: self,
			pos: self.first(),
		}
	}
}

/// The lower bound of a sub-sequence: the position immediately before its first element.
///
/// A left limit never equals the end of its sequence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LeftLimit<P> {
	/// The front sentinel preceding the first element.
	#[default]
	Front,
	/// A dereferenceable position.
	At(P),
}

impl<P> LeftLimit<P> {
	/// Returns the dereferenceable position, or `None` for the front sentinel.
	#[inline]
	pub fn pos(self) -> Option<P> {
		match self {
			LeftLimit::Front => None,
			LeftLimit::At(pos) => Some(pos),
		}
	}
}

impl<P> From<P> for LeftLimit<P> {
	#[inline]
	fn from(pos: P) -> Self {
		LeftLimit::At(pos)
	}
}

/// The upper bound of a sub-sequence: the position at or after its end.
///
/// A right limit never equals the front sentinel of its sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RightLimit<P> {
	/// A dereferenceable position.
	At(P),
	/// The end of the sequence.
	End,
}

impl<P> RightLimit<P> {
	/// Returns the dereferenceable position, or `None` for the end of the sequence.
	#[inline]
	pub fn pos(self) -> Option<P> {
		match self {
			RightLimit::At(pos) => Some(pos),
			RightLimit::End => None,
		}
	}
}

impl<P> From<P> for RightLimit<P> {
	#[inline]
	fn from(pos: P) -> Self {
		RightLimit::At(pos)
	}
}

impl<P> From<Option<P>> for RightLimit<P> {
	#[inline]
	fn from(pos: Option<P>) -> Self {
		match pos {
			Some(pos) => RightLimit::At(pos),
			None => RightLimit::End,
		}
	}
}

/// Returns the front sentinel of `seq`.
///
/// Its successor is the first element of `seq` (see [`after`]) and it compares unequal to every
/// position of `seq`.
#[inline]
pub fn before_begin<S>(seq: &S) -> LeftLimit<S::Pos>
where
	S: Sequence + ?Sized,
{
	let _ = seq;
	LeftLimit::Front
}

/// Returns the position of the element immediately following the left limit `left`, or `None` if
/// `left` is the last element (or the front sentinel of an empty sequence).
#[inline]
pub fn after<S>(seq: &S, left: LeftLimit<S::Pos>) -> Option<S::Pos>
where
	S: Sequence + ?Sized,
{
	match left {
		LeftLimit::Front => seq.first(),
		LeftLimit::At(pos) => seq.next(pos),
	}
}

/// Iterator over the elements of a [`Sequence`], see [`Sequence::values`].
pub struct Values<'a, S>
where
	S: Sequence + ?Sized,
{
	seq: &'a S,
	pos: Option<S::Pos>,
}

impl<S> Clone for Values<'_, S>
where
	S: Sequence + ?Sized,
{
	fn clone(&self) -> Self {
		Self {
			seq: self.seq,
			pos: self.pos,
		}
	}
}

impl<'a, S> Iterator for Values<'a, S>
where
	S: Sequence + ?Sized,
{
	type Item = &'a S::Item;

	#[inline]
	fn next(&mut self) -> Option<Self::Item> {
		let pos = self.pos?;
		self.pos = self.seq.next(pos);
		Some(self.seq.get(pos))
	}
}

/// Unwraps a position the caller promised to be dereferenceable.
#[inline]
#[track_caller]
pub(crate) fn deref<P>(pos: Option<P>) -> P {
	match pos {
		Some(pos) => pos,
		None => panic!("corange runs past the end of the sequence"),
	}
}

/// Steps to the position following `pos`, which the caller promised to exist.
#[inline]
#[track_caller]
pub(crate) fn step<S>(seq: &S, pos: S::Pos) -> S::Pos
where
	S: Sequence + ?Sized,
{
	deref(seq.next(pos))
}

#[cfg(feature = "std")]
#[cfg(test)]
mod test {
	use super::{LeftLimit, RightLimit, Sequence, after, before_begin};
	use crate::{ForwardList, List};
	use core::fmt::Debug;

	fn check_limits<S>(mut seq: S)
	where
		S: Sequence<Item = u32> + Extend<u32>,
		S::Pos: Debug,
	{
		let front = before_begin(&seq);
		assert_eq!(front, LeftLimit::Front);
		assert_eq!(after(&seq, front), None);
		assert_eq!(seq.last(), None);
		assert_eq!(seq.left_limit(0), LeftLimit::Front);
		assert_eq!(seq.right_limit(0), RightLimit::End);

		seq.extend([17, 42]);
		assert_eq!(after(&seq, front), seq.first());
		assert_eq!(seq.get(seq.last().unwrap()), &42);
		assert_eq!(after(&seq, LeftLimit::At(seq.last().unwrap())), None);
		assert_eq!(seq.len(), 2);
		assert_eq!(seq.left_limit(1), LeftLimit::At(seq.first().unwrap()));
		assert_eq!(seq.right_limit(1), RightLimit::At(seq.last().unwrap()));
		assert_eq!(seq.right_limit(2), RightLimit::End);
		assert_eq!(seq.values().copied().collect::<Vec<_>>(), [17, 42]);
	}

	#[test]
	fn limits() {
		check_limits(ForwardList::new());
		check_limits(List::new());
	}

	#[test]
	#[should_panic]
	fn left_limit_out_of_bounds() {
		let list = [1u32, 2].into_iter().collect::<ForwardList<_>>();
		let _ = list.left_limit(3);
	}

	#[test]
	fn conversions() {
		assert_eq!(LeftLimit::<u32>::from(3).pos(), Some(3));
		assert_eq!(LeftLimit::<u32>::default().pos(), None);
		assert_eq!(RightLimit::<u32>::from(Some(3)), RightLimit::At(3));
		assert_eq!(RightLimit::<u32>::from(None).pos(), None);
	}
}
