//! Relocation of sub-sequences by relinking.
//!
//! A sequence is [`Spliceable`] if it can cheaply move a sub-sequence to another place in itself
//! without invalidating any position, like linked lists do. Sequences declare *how* they do so by
//! choosing one of three strategies, each backed by a capability trait:
//!
//!   * [`BySplice`] for sequences implementing [`Splice`], which moves a range `[first, last)`
//!     before a position;
//!   * [`BySpliceAfter`] for sequences implementing [`SpliceAfter`], which moves an open range
//!     `(first, last)` after a left limit;
//!   * [`ByCosplice`] for sequences implementing [`Cosplice`], which moves a corange `(lt, rt]`
//!     after a left limit directly.
//!
//! The algorithms of this crate only ever call [`cosplice`] and [`cosplice_one`], which resolve the
//! strategy at compile time.

use crate::limits::{LeftLimit, Sequence, after, deref};

/// Splicing with the semantics of a doubly-linked list: ranges are moved *before* a position.
pub trait Splice: Sequence {
	/// Moves the elements `[first, last)` right before `pos`, where `None` denotes the end.
	///
	/// No position is invalidated. Moving a range before its own first element or before `last` is
	/// a no-op. The behavior is unspecified (but memory-safe) if `pos` lies inside
	/// `[first, last)`.
	fn splice(&mut self, pos: Option<Self::Pos>, first: Self::Pos, last: Option<Self::Pos>);

	/// Moves the element at `it` right before `pos`, where `None` denotes the end.
	fn splice_one(&mut self, pos: Option<Self::Pos>, it: Self::Pos) {
		let last = self.next(it);
		self.splice(pos, it, last);
	}
}

/// Splicing with the semantics of a singly-linked list: ranges are moved *after* a left limit.
pub trait SpliceAfter: Sequence {
	/// Moves the elements of the open range `(first, last)` right after `pos`, where `None`
	/// denotes the end.
	///
	/// No position is invalidated. Moving a range after `first` is a no-op. The behavior is
	/// unspecified (but memory-safe) if `pos` lies inside `(first, last)`.
	fn splice_after(
		&mut self,
		pos: LeftLimit<Self::Pos>,
		first: LeftLimit<Self::Pos>,
		last: Option<Self::Pos>,
	);

	/// Moves the element following `it` right after `pos`.
	fn splice_one_after(&mut self, pos: LeftLimit<Self::Pos>, it: LeftLimit<Self::Pos>) {
		if let Some(one) = after(self, it) {
			let last = self.next(one);
			self.splice_after(pos, it, last);
		}
	}
}

/// Direct relocation of coranges.
pub trait Cosplice: Sequence {
	/// Moves the elements of the corange `(lt, rt]` right after `pos`.
	///
	/// No position is invalidated. Moving a corange after `lt` is a no-op. The behavior is
	/// unspecified (but memory-safe) if `pos` lies inside `(lt, rt]`.
	fn cosplice(&mut self, pos: LeftLimit<Self::Pos>, lt: LeftLimit<Self::Pos>, rt: Self::Pos);

	/// Moves the element following `lt` right after `pos`.
	fn cosplice_one(&mut self, pos: LeftLimit<Self::Pos>, lt: LeftLimit<Self::Pos>) {
		if let Some(rt) = after(self, lt) {
			self.cosplice(pos, lt, rt);
		}
	}
}

/// A sequence whose sub-sequences can be relocated by relinking.
///
/// The associated [`Strategy`](Spliceable::Strategy) selects the capability used for relocation.
pub trait Spliceable: Sequence {
	/// One of [`BySplice`], [`BySpliceAfter`] or [`ByCosplice`].
	type Strategy: Relocation<Self>;
}

/// Corange relocation on top of a splicing capability of `S`.
pub trait Relocation<S>
where
	S: Sequence + ?Sized,
{
	/// Moves the corange `(lt, rt]` right after `pos`.
	fn cosplice(seq: &mut S, pos: LeftLimit<S::Pos>, lt: LeftLimit<S::Pos>, rt: S::Pos);
	/// Moves the element following `lt` right after `pos`.
	fn cosplice_one(seq: &mut S, pos: LeftLimit<S::Pos>, lt: LeftLimit<S::Pos>);
}

/// Relocation via [`Splice`]. *O*(1) as long as [`Splice::splice`] is.
#[derive(Debug)]
pub enum BySplice {}

/// Relocation via [`SpliceAfter`]. *O*(*k*) for a corange of *k* elements if the sequence has to
/// locate the end of the moved range.
#[derive(Debug)]
pub enum BySpliceAfter {}

/// Relocation via [`Cosplice`].
#[derive(Debug)]
pub enum ByCosplice {}

impl<S> Relocation<S> for BySplice
where
	S: Splice + ?Sized,
{
	#[inline]
	fn cosplice(seq: &mut S, pos: LeftLimit<S::Pos>, lt: LeftLimit<S::Pos>, rt: S::Pos) {
		let first = deref(after(seq, lt));
		let last = seq.next(rt);
		let pos = after(seq, pos);
		seq.splice(pos, first, last);
	}
	#[inline]
	fn cosplice_one(seq: &mut S, pos: LeftLimit<S::Pos>, lt: LeftLimit<S::Pos>) {
		let it = deref(after(seq, lt));
		let pos = after(seq, pos);
		seq.splice_one(pos, it);
	}
}

impl<S> Relocation<S> for BySpliceAfter
where
	S: SpliceAfter + ?Sized,
{
	#[inline]
	fn cosplice(seq: &mut S, pos: LeftLimit<S::Pos>, lt: LeftLimit<S::Pos>, rt: S::Pos) {
		let last = seq.next(rt);
		seq.splice_after(pos, lt, last);
	}
	#[inline]
	fn cosplice_one(seq: &mut S, pos: LeftLimit<S::Pos>, lt: LeftLimit<S::Pos>) {
		seq.splice_one_after(pos, lt);
	}
}

impl<S> Relocation<S> for ByCosplice
where
	S: Cosplice + ?Sized,
{
	#[inline]
	fn cosplice(seq: &mut S, pos: LeftLimit<S::Pos>, lt: LeftLimit<S::Pos>, rt: S::Pos) {
		seq.cosplice(pos, lt, rt);
	}
	#[inline]
	fn cosplice_one(seq: &mut S, pos: LeftLimit<S::Pos>, lt: LeftLimit<S::Pos>) {
		seq.cosplice_one(pos, lt);
	}
}

/// Moves the elements of the non-empty corange `(lt, rt]` of `seq`, in their relative order, right
/// after the left limit `pos`.
///
/// No element is copied or moved in memory and no position is invalidated.
///
/// # Panics
///
/// Panics if `lt` is the last element of `seq`. In debug builds, also panics if the corange is
/// empty (`lt == rt`) or if `pos` lies inside it.
#[inline]
pub fn cosplice<S>(seq: &mut S, pos: LeftLimit<S::Pos>, lt: LeftLimit<S::Pos>, rt: S::Pos)
where
	S: Spliceable + ?Sized,
{
	debug_assert!(lt != LeftLimit::At(rt), "corange must not be empty");
	debug_assert!(
		!covers(seq, lt, rt, pos),
		"destination must not lie inside the relocated corange"
	);
	S::Strategy::cosplice(seq, pos, lt, rt);
}

/// Moves the element immediately following `lt` right after the left limit `pos`.
///
/// # Panics
///
/// Panics if `lt` is the last element of `seq`. In debug builds, also panics if `pos` is that very
/// element.
#[inline]
pub fn cosplice_one<S>(seq: &mut S, pos: LeftLimit<S::Pos>, lt: LeftLimit<S::Pos>)
where
	S: Spliceable + ?Sized,
{
	debug_assert!(
		pos.pos().is_none() || pos.pos() != after(seq, lt),
		"destination must not be the relocated element"
	);
	S::Strategy::cosplice_one(seq, pos, lt);
}

/// Whether the left limit `pos` is an element of the corange `(lt, rt]`.
fn covers<S>(seq: &S, lt: LeftLimit<S::Pos>, rt: S::Pos, pos: LeftLimit<S::Pos>) -> bool
where
	S: Sequence + ?Sized,
{
	let LeftLimit::At(pos) = pos else {
		return false;
	};
	let mut it = after(seq, lt);
	while let Some(cur) = it {
		if cur == pos {
			return true;
		}
		if cur == rt {
			break;
		}
		it = seq.next(cur);
	}
	false
}

#[cfg(feature = "std")]
#[cfg(test)]
mod test {
	use super::{BySpliceAfter, SpliceAfter, Spliceable, cosplice, cosplice_one};
	use crate::{
		ForwardList, List,
		limits::{LeftLimit, Sequence},
	};

	/// Exposes only the singly-linked splicing capability of a [`ForwardList`].
	struct AfterOnly(ForwardList<u32>);

	impl Sequence for AfterOnly {
		type Item = u32;
		type Pos = <ForwardList<u32> as Sequence>::Pos;

		fn first(&self) -> Option<Self::Pos> {
			self.0.first()
		}
		fn next(&self, pos: Self::Pos) -> Option<Self::Pos> {
			self.0.next(pos)
		}
		fn get(&self, pos: Self::Pos) -> &u32 {
			self.0.get(pos)
		}
	}

	impl SpliceAfter for AfterOnly {
		fn splice_after(
			&mut self,
			pos: LeftLimit<Self::Pos>,
			first: LeftLimit<Self::Pos>,
			last: Option<Self::Pos>,
		) {
			self.0.splice_after(pos, first, last);
		}
	}

	impl Spliceable for AfterOnly {
		type Strategy = BySpliceAfter;
	}

	impl FromIterator<u32> for AfterOnly {
		fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
			Self(iter.into_iter().collect())
		}
	}

	fn values<S: Sequence<Item = u32>>(seq: &S) -> Vec<u32> {
		seq.values().copied().collect()
	}

	/// Moves `(lt, lt + count]` after the element at `dest` (or the front) and compares the outcome
	/// against the same move on a vector, then moves the elements back.
	fn round_trip<S>(len: usize)
	where
		S: Spliceable<Item = u32> + FromIterator<u32>,
	{
		let model = (0..len as u32).collect::<Vec<_>>();
		for lt in 0..len {
			for count in 1..=len - lt {
				for dest in 0..=len {
					// `dest` counts the elements preceding the insertion point.
					if dest > lt && dest <= lt + count {
						continue;
					}
					let mut seq = model.iter().copied().collect::<S>();
					let left = seq.left_limit(lt);
					let rt = seq.nth(lt + count - 1).unwrap();
					let pos = seq.left_limit(dest);
					let predecessor = left;
					cosplice(&mut seq, pos, left, rt);

					let mut expected = model.clone();
					let moved = expected.drain(lt..lt + count).collect::<Vec<_>>();
					let at = if dest > lt { dest - count } else { dest };
					expected.splice(at..at, moved);
					assert_eq!(values(&seq), expected, "{lt} {count} {dest}");
					assert_eq!(seq.len(), len);

					// The moved elements now follow `pos`, the corange ends at `rt`.
					cosplice(&mut seq, predecessor, pos, rt);
					assert_eq!(values(&seq), model, "{lt} {count} {dest}");
					assert_eq!(seq.last().map(|last| *seq.get(last)), model.last().copied());
				}
			}
		}
	}

	#[test]
	fn round_trips() {
		for len in 0..=10 {
			round_trip::<ForwardList<u32>>(len);
			round_trip::<List<u32>>(len);
			round_trip::<AfterOnly>(len);
		}
	}

	fn single<S>()
	where
		S: Spliceable<Item = u32> + FromIterator<u32>,
	{
		let mut seq = [1, 2, 3, 4].into_iter().collect::<S>();
		let last = seq.last().unwrap();
		cosplice_one(&mut seq, LeftLimit::At(last), LeftLimit::Front);
		assert_eq!(values(&seq), [2, 3, 4, 1]);
		let second = seq.nth(1).unwrap();
		cosplice_one(&mut seq, LeftLimit::Front, LeftLimit::At(second));
		assert_eq!(values(&seq), [4, 2, 3, 1]);
		assert_eq!(*seq.get(seq.last().unwrap()), 1);
	}

	#[test]
	fn single_element() {
		single::<ForwardList<u32>>();
		single::<List<u32>>();
		single::<AfterOnly>();
	}

	#[cfg(debug_assertions)]
	#[test]
	#[should_panic]
	fn overlapping_destination() {
		let mut list = (0..5).collect::<ForwardList<u32>>();
		let rt = list.nth(3).unwrap();
		let pos = list.nth(2).unwrap();
		cosplice(&mut list, LeftLimit::At(pos), LeftLimit::Front, rt);
	}
}
