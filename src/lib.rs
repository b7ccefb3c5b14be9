//! Splice-based [sorting] and merging algorithms for linked sequences (e.g., singly- and
//! doubly-linked lists), reordering elements by relinking instead of copying or swapping them.
//!
//! All algorithms work on sub-sequences described by a [`LeftLimit`], the position *preceding*
//! the first element, which is all a singly-linked sequence can afford, and relocate elements
//! through a single primitive, [`cosplice`], moving a *corange* `(lt, rt]` after another left
//! limit. A sequence opts in by implementing [`Spliceable`] with one of the relocation strategies
//! [`BySplice`], [`BySpliceAfter`] or [`ByCosplice`], resolved at compile time. Positions are
//! never invalidated, so a handle to an element keeps pointing to the same element after sorting.
//!
//! # Example
//!
//! ```
//! use splice_sort::{ForwardList, LeftLimit, Sequence, SequenceExt, merge_sort};
//!
//! let mut list = [5, 3, 1, 4, 2].into_iter().collect::<ForwardList<_>>();
//! let five = list.first().unwrap();
//!
//! // Sort the four elements following the `5`.
//! let last = merge_sort(&mut list, LeftLimit::At(five), 4);
//! assert!(list.iter().eq(&[5, 1, 2, 3, 4]));
//! assert_eq!(last, list.last());
//!
//! // Sort everything. The handle still refers to the `5`, now at the back.
//! list.sort_by_merging();
//! assert!(list.iter().eq(&[1, 2, 3, 4, 5]));
//! assert_eq!(list.last(), Some(five));
//! ```
//!
//! # Current Implementation
//!
//! Complexities where *n* is the length of the sub-sequence and *b* the maximum bucket count.
//!
//! | Resource    | Complexity | Insertion sort   | Merge sort       | In-place merge | Bucket sort                      |
//! |-------------|------------|------------------|------------------|----------------|----------------------------------|
//! | Time        | Best       | *O*(*n*)         | *O*(*n*)         | *O*(1)         | *O*(*n*)                         |
//! | Time        | Worst      | *O*(*n*^2)       | *O*(*n* log *n*) | *O*(*n*)       | *O*(*n* *b* + *n* log *n*)       |
//! | Relocations | Worst      | *O*(*n*)         | *O*(*n* log *n*) | *O*(*n*)       | *O*(*n* log *n*)                 |
//! | Space       | Worst      | *O*(1)           | *O*(log *n*)     | *O*(1)         | *O*(*b* + log *n*)               |
//!
//! All sorts are stable. Bucket sort is stable if its equivalence relation is totally consistent
//! with the order.
//!
//! [sorting]: https://en.wikipedia.org/wiki/Sorting_algorithm
//!
//! # Features
//!
//!   * `alloc` for the reference sequences [`List`] and [`ForwardList`] and for bucket sort
//!     backed by the [`Global`] allocator. Enabled by `std`.
//!   * `std` for nothing in particular but `alloc`. Enabled by `default` or `stacker`.
//!   * `stacker` for growing the stack on demand while merge sort recurses. Enabled by `default`.
//!
//! Without `alloc`, bucket sort draws its storage from a [`BucketAlloc`] such as [`StackBuffer`].

#![deny(
	missing_docs,
	rustdoc::broken_intra_doc_links,
	rustdoc::missing_crate_level_docs
)]
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

#[cfg(feature = "alloc")]
extern crate alloc;

mod bucket_sort;
mod flat_list;
mod forward_list;
mod insertion_sort;
mod limits;
mod list;
mod merge_sort;
mod splicing;
mod storage;

pub use crate::{
	limits::{LeftLimit, RightLimit, Sequence, Values, after, before_begin},
	splicing::{
		ByCosplice, BySplice, BySpliceAfter, Cosplice, Relocation, Splice, SpliceAfter, Spliceable,
		cosplice, cosplice_one,
	},
	storage::{BucketAlloc, StackBuffer},
};

#[cfg(feature = "alloc")]
pub use crate::{
	forward_list::ForwardList,
	list::{Handle, List},
	storage::Global,
};

use core::{
	alloc::Layout,
	cmp::Ordering::{self, Equal, Less},
};

/// Sorts the `count` elements following `left` using insertion sort.
///
/// This sort is stable and *O*(*n*^2) worst-case, but *O*(*n*) for sorted input and relocates
/// every element at most once. Returns the position of the last sorted element, or the element
/// following `left` if `count < 2`.
///
/// # Panics
///
/// Panics if fewer than `count` elements follow `left`.
///
/// # Examples
///
/// ```
/// use splice_sort::{ForwardList, LeftLimit, insertion_sort};
///
/// let mut list = [5, 3, 1, 4, 2].into_iter().collect::<ForwardList<_>>();
/// let last = insertion_sort(&mut list, LeftLimit::Front, 3);
/// assert!(list.iter().eq(&[1, 3, 5, 4, 2]));
/// assert_eq!(last.map(|last| list[last]), Some(5));
/// ```
#[inline]
pub fn insertion_sort<S>(seq: &mut S, left: LeftLimit<S::Pos>, count: usize) -> Option<S::Pos>
where
	S: Spliceable + ?Sized,
	S::Item: Ord,
{
	insertion_sort::insertion_sort(seq, left, count, &mut <S::Item as PartialOrd>::lt)
}
/// Sorts the `count` elements following `left` using insertion sort with a comparator function.
///
/// See [`insertion_sort`].
#[inline]
pub fn insertion_sort_by<S, F>(
	seq: &mut S,
	left: LeftLimit<S::Pos>,
	count: usize,
	mut compare: F,
) -> Option<S::Pos>
where
	S: Spliceable + ?Sized,
	F: FnMut(&S::Item, &S::Item) -> Ordering,
{
	insertion_sort::insertion_sort(seq, left, count, &mut |a: &S::Item, b: &S::Item| {
		compare(a, b) == Less
	})
}
/// Sorts the `count` elements following `left` using insertion sort with a key extraction
/// function.
///
/// See [`insertion_sort`].
#[inline]
pub fn insertion_sort_by_key<S, K, F>(
	seq: &mut S,
	left: LeftLimit<S::Pos>,
	count: usize,
	mut f: F,
) -> Option<S::Pos>
where
	S: Spliceable + ?Sized,
	K: Ord,
	F: FnMut(&S::Item) -> K,
{
	insertion_sort::insertion_sort(seq, left, count, &mut |a: &S::Item, b: &S::Item| {
		f(a).lt(&f(b))
	})
}

/// Sorts the `count` elements following `left` using merge sort.
///
/// This sort is stable and *O*(*n* log *n*) worst-case. It never allocates: runs are merged in
/// place by relocating maximal runs of the right half. Returns the position of the last sorted
/// element, or the element following `left` if `count < 2`.
///
/// # Current Implementation
///
/// The sub-sequence is split as evenly as its count allows without knowing any position but
/// `left`: a sorted prefix doubles in every step by sorting the next elements recursively and
/// merging them in. Prefixes of fewer than four elements are sorted by insertion.
///
/// # Panics
///
/// Panics if fewer than `count` elements follow `left`.
///
/// # Examples
///
/// ```
/// use splice_sort::{List, LeftLimit, Sequence, merge_sort};
///
/// let mut list = [5, 3, 1, 4, 2].into_iter().collect::<List<_>>();
/// let left = list.left_limit(1);
/// let last = merge_sort(&mut list, left, 4);
/// assert!(list.iter().eq(&[5, 1, 2, 3, 4]));
/// assert_eq!(last, list.last());
/// ```
#[inline]
pub fn merge_sort<S>(seq: &mut S, left: LeftLimit<S::Pos>, count: usize) -> Option<S::Pos>
where
	S: Spliceable + ?Sized,
	S::Item: Ord,
{
	merge_sort::merge_sort(seq, left, count, &mut <S::Item as PartialOrd>::lt)
}
/// Sorts the `count` elements following `left` using merge sort with a comparator function.
///
/// The comparator function must define a total ordering for the elements. If the ordering is not
/// total, the order of the elements is unspecified.
///
/// See [`merge_sort`].
///
/// # Examples
///
/// ```
/// use splice_sort::{ForwardList, LeftLimit, merge_sort_by};
///
/// let mut list = [5, 3, 1, 4, 2].into_iter().collect::<ForwardList<_>>();
/// merge_sort_by(&mut list, LeftLimit::Front, 5, |a, b| b.cmp(a));
/// assert!(list.iter().eq(&[5, 4, 3, 2, 1]));
/// ```
#[inline]
pub fn merge_sort_by<S, F>(
	seq: &mut S,
	left: LeftLimit<S::Pos>,
	count: usize,
	mut compare: F,
) -> Option<S::Pos>
where
	S: Spliceable + ?Sized,
	F: FnMut(&S::Item, &S::Item) -> Ordering,
{
	merge_sort::merge_sort(seq, left, count, &mut |a: &S::Item, b: &S::Item| {
		compare(a, b) == Less
	})
}
/// Sorts the `count` elements following `left` using merge sort with a key extraction function.
///
/// See [`merge_sort`].
#[inline]
pub fn merge_sort_by_key<S, K, F>(
	seq: &mut S,
	left: LeftLimit<S::Pos>,
	count: usize,
	mut f: F,
) -> Option<S::Pos>
where
	S: Spliceable + ?Sized,
	K: Ord,
	F: FnMut(&S::Item) -> K,
{
	merge_sort::merge_sort(seq, left, count, &mut |a: &S::Item, b: &S::Item| {
		f(a).lt(&f(b))
	})
}

/// Merges the adjacent sorted coranges `(left, mid]` and `(mid, last]` in place.
///
/// The merge is stable, *O*(*n*) and *O*(1) if the coranges already are in order. Returns the
/// position of the last merged element, which is either `last` or `mid`.
///
/// # Panics
///
/// Panics if `mid` does not follow `left` or `last` does not follow `mid`. The behavior is
/// unspecified (but memory-safe) if the coranges are not sorted.
///
/// # Examples
///
/// ```
/// use splice_sort::{ForwardList, LeftLimit, Sequence, merge_in_place};
///
/// let mut list = [1, 3, 5, 2, 4].into_iter().collect::<ForwardList<_>>();
/// let mid = list.nth(2).unwrap();
/// let last = list.last().unwrap();
/// let last = merge_in_place(&mut list, LeftLimit::Front, mid, last);
/// assert!(list.iter().eq(&[1, 2, 3, 4, 5]));
/// assert_eq!(last, mid);
/// ```
#[inline]
pub fn merge_in_place<S>(seq: &mut S, left: LeftLimit<S::Pos>, mid: S::Pos, last: S::Pos) -> S::Pos
where
	S: Spliceable + ?Sized,
	S::Item: Ord,
{
	merge_sort::merge_in_place(seq, left, mid, last, &mut <S::Item as PartialOrd>::lt)
}
/// Merges the adjacent sorted coranges `(left, mid]` and `(mid, last]` in place with a comparator
/// function.
///
/// See [`merge_in_place`].
#[inline]
pub fn merge_in_place_by<S, F>(
	seq: &mut S,
	left: LeftLimit<S::Pos>,
	mid: S::Pos,
	last: S::Pos,
	mut compare: F,
) -> S::Pos
where
	S: Spliceable + ?Sized,
	F: FnMut(&S::Item, &S::Item) -> Ordering,
{
	merge_sort::merge_in_place(seq, left, mid, last, &mut |a: &S::Item, b: &S::Item| {
		compare(a, b) == Less
	})
}
/// Merges the adjacent sorted coranges `(left, mid]` and `(mid, last]` in place with a key
/// extraction function.
///
/// See [`merge_in_place`].
#[inline]
pub fn merge_in_place_by_key<S, K, F>(
	seq: &mut S,
	left: LeftLimit<S::Pos>,
	mid: S::Pos,
	last: S::Pos,
	mut f: F,
) -> S::Pos
where
	S: Spliceable + ?Sized,
	K: Ord,
	F: FnMut(&S::Item) -> K,
{
	merge_sort::merge_in_place(seq, left, mid, last, &mut |a: &S::Item, b: &S::Item| {
		f(a).lt(&f(b))
	})
}

/// Sorts the elements in the open range `(left, end)` using bucket sort, grouping elements
/// equivalent under `is_eq` into at most `max_buckets` buckets in a single pass before sorting each
/// bucket by merging.
///
/// `is_eq` must be an equivalence relation *weakly consistent* with the order: elements of
/// different classes compare the same way whichever representatives are picked. Runs of
/// equivalent elements are relocated at once, so inputs of few classes in long runs need few
/// relocations. Elements of classes exceeding `max_buckets` end up in the last bucket, which is
/// then merged with all the others once more. The result is always sorted, and stable if no two
/// classes compare equal.
///
/// Returns the number of elements in the range and the position of the last element after
/// sorting, or `after(left)` if the range is empty. The bucket storage, see
/// [`bucket_storage_layout`], is drawn from the [`Global`] allocator.
///
/// # Panics
///
/// Panics if `max_buckets` is zero, if the bucket storage cannot be allocated or if `end` does not
/// follow `left`.
///
/// # Examples
///
/// ```
/// use splice_sort::{ForwardList, LeftLimit, bucket_sort};
///
/// let mut list = [8, 1, 9, 2, 10, 3].into_iter().collect::<ForwardList<u32>>();
/// let (len, last) = bucket_sort(&mut list, LeftLimit::Front, None, 4, |a, b| a >> 2 == b >> 2);
/// assert!(list.iter().eq(&[1, 2, 3, 8, 9, 10]));
/// assert_eq!((len, last.map(|last| list[last])), (6, Some(10)));
/// ```
#[cfg(feature = "alloc")]
#[inline]
pub fn bucket_sort<S, E>(
	seq: &mut S,
	left: LeftLimit<S::Pos>,
	end: Option<S::Pos>,
	max_buckets: usize,
	mut is_eq: E,
) -> (usize, Option<S::Pos>)
where
	S: Spliceable + ?Sized,
	S::Item: Ord,
	E: FnMut(&S::Item, &S::Item) -> bool,
{
	bucket_sort::bucket_sort(
		seq,
		left,
		end,
		max_buckets,
		&mut is_eq,
		&mut <S::Item as PartialOrd>::lt,
		&Global,
	)
}
/// Sorts the elements in the open range `(left, end)` using bucket sort with a comparator
/// function.
///
/// See [`bucket_sort`].
#[cfg(feature = "alloc")]
#[inline]
pub fn bucket_sort_by<S, E, F>(
	seq: &mut S,
	left: LeftLimit<S::Pos>,
	end: Option<S::Pos>,
	max_buckets: usize,
	is_eq: E,
	compare: F,
) -> (usize, Option<S::Pos>)
where
	S: Spliceable + ?Sized,
	E: FnMut(&S::Item, &S::Item) -> bool,
	F: FnMut(&S::Item, &S::Item) -> Ordering,
{
	bucket_sort_in(seq, left, end, max_buckets, is_eq, compare, &Global)
}
/// Sorts the elements in the open range `(left, end)` using bucket sort with a key extraction
/// function, grouping elements whose keys are equivalent under `is_eq`.
///
/// See [`bucket_sort`].
///
/// # Examples
///
/// ```
/// use splice_sort::{List, LeftLimit, bucket_sort_by_key};
///
/// let mut list = ["ccc", "a", "bb", "dd", "e"].into_iter().collect::<List<_>>();
/// bucket_sort_by_key(&mut list, LeftLimit::Front, None, 3, |s| s.len(), |a, b| a == b);
/// assert!(list.iter().eq(&["a", "e", "bb", "dd", "ccc"]));
/// ```
#[cfg(feature = "alloc")]
#[inline]
pub fn bucket_sort_by_key<S, K, F, E>(
	seq: &mut S,
	left: LeftLimit<S::Pos>,
	end: Option<S::Pos>,
	max_buckets: usize,
	f: F,
	mut is_eq: E,
) -> (usize, Option<S::Pos>)
where
	S: Spliceable + ?Sized,
	K: Ord,
	F: Fn(&S::Item) -> K,
	E: FnMut(&K, &K) -> bool,
{
	bucket_sort::bucket_sort(
		seq,
		left,
		end,
		max_buckets,
		&mut |a: &S::Item, b: &S::Item| is_eq(&f(a), &f(b)),
		&mut |a: &S::Item, b: &S::Item| f(a).lt(&f(b)),
		&Global,
	)
}
/// Sorts the elements in the open range `(left, end)` using bucket sort with a comparator
/// function, drawing the bucket storage from `alloc`.
///
/// See [`bucket_sort`]. The storage is released before returning, also when `is_eq` or `compare`
/// panics.
///
/// # Panics
///
/// Panics if `max_buckets` is zero, if `alloc` fails to allocate a block of
/// [`bucket_storage_layout`] or if `end` does not follow `left`.
#[inline]
pub fn bucket_sort_in<S, E, F, A>(
	seq: &mut S,
	left: LeftLimit<S::Pos>,
	end: Option<S::Pos>,
	max_buckets: usize,
	mut is_eq: E,
	mut compare: F,
	alloc: &A,
) -> (usize, Option<S::Pos>)
where
	S: Spliceable + ?Sized,
	E: FnMut(&S::Item, &S::Item) -> bool,
	F: FnMut(&S::Item, &S::Item) -> Ordering,
	A: BucketAlloc + ?Sized,
{
	bucket_sort::bucket_sort(
		seq,
		left,
		end,
		max_buckets,
		&mut is_eq,
		&mut |a: &S::Item, b: &S::Item| compare(a, b) == Less,
		alloc,
	)
}

/// Layout of the single block of storage bucket sort allocates for `max_buckets` buckets of
/// sequence `S`.
///
/// Links between buckets use the narrowest unsigned integer addressing `max_buckets + 1` slots.
///
/// # Panics
///
/// Panics if the size overflows `isize::MAX`.
///
/// # Examples
///
/// ```
/// use splice_sort::{ForwardList, bucket_storage_layout};
///
/// // One position and one count per bucket, one byte of link per bucket and the head.
/// let layout = bucket_storage_layout::<ForwardList<u32>>(255);
/// assert_eq!(layout.size(), (255 * 2 * size_of::<usize>() + 256).next_multiple_of(layout.align()));
/// ```
#[inline]
pub fn bucket_storage_layout<S>(max_buckets: usize) -> Layout
where
	S: Sequence + ?Sized,
{
	bucket_sort::storage_layout::<S::Pos>(max_buckets)
}

/// Extension trait for [`Spliceable`] sequences providing methods sorting or merging the whole
/// sequence.
pub trait SequenceExt: Spliceable {
	/// Sorts the sequence using insertion sort, see [`insertion_sort`].
	///
	/// Returns the position of the last element.
	///
	/// # Examples
	///
	/// ```
	/// use splice_sort::{ForwardList, SequenceExt};
	///
	/// let mut list = [-5, 4, 1, -3, 2].into_iter().collect::<ForwardList<_>>();
	/// list.sort_by_insertion();
	/// assert!(list.iter().eq(&[-5, -3, 1, 2, 4]));
	/// ```
	fn sort_by_insertion(&mut self) -> Option<Self::Pos>
	where
		Self::Item: Ord;
	/// Sorts the sequence using insertion sort with a comparator function, see
	/// [`insertion_sort_by`].
	fn sort_by_insertion_by<F>(&mut self, compare: F) -> Option<Self::Pos>
	where
		F: FnMut(&Self::Item, &Self::Item) -> Ordering;
	/// Sorts the sequence using insertion sort with a key extraction function, see
	/// [`insertion_sort_by_key`].
	fn sort_by_insertion_by_key<K, F>(&mut self, f: F) -> Option<Self::Pos>
	where
		K: Ord,
		F: FnMut(&Self::Item) -> K;

	/// Sorts the sequence using merge sort, see [`merge_sort`].
	///
	/// Returns the position of the last element.
	///
	/// # Examples
	///
	/// ```
	/// use splice_sort::{List, SequenceExt};
	///
	/// let mut list = [-5, 4, 1, -3, 2].into_iter().collect::<List<_>>();
	/// list.sort_by_merging();
	/// assert!(list.iter().eq(&[-5, -3, 1, 2, 4]));
	/// ```
	fn sort_by_merging(&mut self) -> Option<Self::Pos>
	where
		Self::Item: Ord;
	/// Sorts the sequence using merge sort with a comparator function, see [`merge_sort_by`].
	///
	/// # Examples
	///
	/// ```
	/// use splice_sort::{ForwardList, SequenceExt};
	///
	/// let mut floats = [5f64, 4.0, 1.0, 3.0, 2.0].into_iter().collect::<ForwardList<_>>();
	/// floats.sort_by_merging_by(|a, b| a.partial_cmp(b).unwrap());
	/// assert!(floats.iter().eq(&[1.0, 2.0, 3.0, 4.0, 5.0]));
	/// ```
	fn sort_by_merging_by<F>(&mut self, compare: F) -> Option<Self::Pos>
	where
		F: FnMut(&Self::Item, &Self::Item) -> Ordering;
	/// Sorts the sequence using merge sort with a key extraction function, see
	/// [`merge_sort_by_key`].
	///
	/// # Examples
	///
	/// ```
	/// use splice_sort::{ForwardList, SequenceExt};
	///
	/// let mut list = [-5i32, 4, 1, -3, 2].into_iter().collect::<ForwardList<_>>();
	/// list.sort_by_merging_by_key(|k| k.abs());
	/// assert!(list.iter().eq(&[1, 2, -3, 4, -5]));
	/// ```
	fn sort_by_merging_by_key<K, F>(&mut self, f: F) -> Option<Self::Pos>
	where
		K: Ord,
		F: FnMut(&Self::Item) -> K;

	/// Merges the sorted coranges from the front up to `mid` and from `mid` to the back in place,
	/// see [`merge_in_place`].
	///
	/// Returns the position of the last element.
	///
	/// # Examples
	///
	/// ```
	/// use splice_sort::{List, Sequence, SequenceExt};
	///
	/// let mut list = [1, 3, 5, 2, 4].into_iter().collect::<List<_>>();
	/// let mid = list.nth(2).unwrap();
	/// list.merge_in_place_at(mid);
	/// assert!(list.iter().eq(&[1, 2, 3, 4, 5]));
	/// ```
	fn merge_in_place_at(&mut self, mid: Self::Pos) -> Self::Pos
	where
		Self::Item: Ord;
	/// Merges the sorted coranges from the front up to `mid` and from `mid` to the back in place
	/// with a comparator function, see [`merge_in_place_by`].
	fn merge_in_place_at_by<F>(&mut self, mid: Self::Pos, compare: F) -> Self::Pos
	where
		F: FnMut(&Self::Item, &Self::Item) -> Ordering;
	/// Merges the sorted coranges from the front up to `mid` and from `mid` to the back in place
	/// with a key extraction function, see [`merge_in_place_by_key`].
	fn merge_in_place_at_by_key<K, F>(&mut self, mid: Self::Pos, f: F) -> Self::Pos
	where
		K: Ord,
		F: FnMut(&Self::Item) -> K;

	/// Sorts the sequence using bucket sort, see [`bucket_sort`].
	///
	/// Returns the length of the sequence and the position of its last element.
	#[cfg(feature = "alloc")]
	fn sort_by_bucketing<E>(&mut self, max_buckets: usize, is_eq: E) -> (usize, Option<Self::Pos>)
	where
		Self::Item: Ord,
		E: FnMut(&Self::Item, &Self::Item) -> bool;
	/// Sorts the sequence using bucket sort with a comparator function, see [`bucket_sort_by`].
	///
	/// # Examples
	///
	/// ```
	/// use splice_sort::{ForwardList, SequenceExt};
	///
	/// let mut list = [8, 1, 9, 2, 10, 3].into_iter().collect::<ForwardList<u32>>();
	/// list.sort_by_bucketing_by(4, |a, b| a >> 2 == b >> 2, |a, b| b.cmp(a));
	/// assert!(list.iter().eq(&[10, 9, 8, 3, 2, 1]));
	/// ```
	#[cfg(feature = "alloc")]
	fn sort_by_bucketing_by<E, F>(
		&mut self,
		max_buckets: usize,
		is_eq: E,
		compare: F,
	) -> (usize, Option<Self::Pos>)
	where
		E: FnMut(&Self::Item, &Self::Item) -> bool,
		F: FnMut(&Self::Item, &Self::Item) -> Ordering;
	/// Sorts the sequence using bucket sort with a comparator function, drawing the bucket storage
	/// from `alloc`, see [`bucket_sort_in`].
	fn sort_by_bucketing_in<E, F, A>(
		&mut self,
		max_buckets: usize,
		is_eq: E,
		compare: F,
		alloc: &A,
	) -> (usize, Option<Self::Pos>)
	where
		E: FnMut(&Self::Item, &Self::Item) -> bool,
		F: FnMut(&Self::Item, &Self::Item) -> Ordering,
		A: BucketAlloc + ?Sized;

	/// Checks if the elements of this sequence are sorted.
	///
	/// That is, for each element `a` and its following element `b`, `a <= b` must hold. If the
	/// sequence yields exactly zero or one element, `true` is returned.
	///
	/// Note that if `Self::Item` is only `PartialOrd`, but not `Ord`, the above definition implies
	/// that this function returns `false` if any two consecutive items are not comparable.
	///
	/// # Examples
	///
	/// ```
	/// use splice_sort::{ForwardList, SequenceExt};
	///
	/// let empty = ForwardList::<i32>::new();
	/// let sorted = [1, 2, 2, 9].into_iter().collect::<ForwardList<_>>();
	/// let unsorted = [1.0, f32::NAN].into_iter().collect::<ForwardList<_>>();
	///
	/// assert!(empty.is_sorted());
	/// assert!(sorted.is_sorted());
	/// assert!(!unsorted.is_sorted());
	/// ```
	fn is_sorted(&self) -> bool
	where
		Self::Item: PartialOrd;
	/// Checks if the elements of this sequence are sorted using the given comparator function.
	///
	/// Instead of using `PartialOrd::partial_cmp`, this function uses the given `compare`
	/// function to determine the ordering of two elements. Apart from that, it's equivalent to
	/// [`is_sorted`](SequenceExt::is_sorted); see its documentation for more information.
	fn is_sorted_by<F>(&self, compare: F) -> bool
	where
		F: FnMut(&Self::Item, &Self::Item) -> Option<Ordering>;
	/// Checks if the elements of this sequence are sorted using the given key extraction function.
	///
	/// Instead of comparing the sequence's elements directly, this function compares the keys of
	/// the elements, as determined by `f`. Apart from that, it's equivalent to
	/// [`is_sorted`](SequenceExt::is_sorted); see its documentation for more information.
	///
	/// # Examples
	///
	/// ```
	/// use splice_sort::{List, SequenceExt};
	///
	/// let list = ["c", "bb", "aaa"].into_iter().collect::<List<_>>();
	/// assert!(list.is_sorted_by_key(|s| s.len()));
	/// assert!(!list.is_sorted_by_key(|s| s.to_string()));
	/// ```
	fn is_sorted_by_key<F, K>(&self, f: F) -> bool
	where
		F: FnMut(&Self::Item) -> K,
		K: PartialOrd;
}

impl<S> SequenceExt for S
where
	S: Spliceable + ?Sized,
{
	#[inline]
	fn sort_by_insertion(&mut self) -> Option<Self::Pos>
	where
		Self::Item: Ord,
	{
		let len = Sequence::len(self);
		insertion_sort(self, LeftLimit::Front, len)
	}
	#[inline]
	fn sort_by_insertion_by<F>(&mut self, compare: F) -> Option<Self::Pos>
	where
		F: FnMut(&Self::Item, &Self::Item) -> Ordering,
	{
		let len = Sequence::len(self);
		insertion_sort_by(self, LeftLimit::Front, len, compare)
	}
	#[inline]
	fn sort_by_insertion_by_key<K, F>(&mut self, f: F) -> Option<Self::Pos>
	where
		K: Ord,
		F: FnMut(&Self::Item) -> K,
	{
		let len = Sequence::len(self);
		insertion_sort_by_key(self, LeftLimit::Front, len, f)
	}

	#[inline]
	fn sort_by_merging(&mut self) -> Option<Self::Pos>
	where
		Self::Item: Ord,
	{
		let len = Sequence::len(self);
		merge_sort(self, LeftLimit::Front, len)
	}
	#[inline]
	fn sort_by_merging_by<F>(&mut self, compare: F) -> Option<Self::Pos>
	where
		F: FnMut(&Self::Item, &Self::Item) -> Ordering,
	{
		let len = Sequence::len(self);
		merge_sort_by(self, LeftLimit::Front, len, compare)
	}
	#[inline]
	fn sort_by_merging_by_key<K, F>(&mut self, f: F) -> Option<Self::Pos>
	where
		K: Ord,
		F: FnMut(&Self::Item) -> K,
	{
		let len = Sequence::len(self);
		merge_sort_by_key(self, LeftLimit::Front, len, f)
	}

	#[inline]
	fn merge_in_place_at(&mut self, mid: Self::Pos) -> Self::Pos
	where
		Self::Item: Ord,
	{
		let last = limits::deref(self.last());
		merge_in_place(self, LeftLimit::Front, mid, last)
	}
	#[inline]
	fn merge_in_place_at_by<F>(&mut self, mid: Self::Pos, compare: F) -> Self::Pos
	where
		F: FnMut(&Self::Item, &Self::Item) -> Ordering,
	{
		let last = limits::deref(self.last());
		merge_in_place_by(self, LeftLimit::Front, mid, last, compare)
	}
	#[inline]
	fn merge_in_place_at_by_key<K, F>(&mut self, mid: Self::Pos, f: F) -> Self::Pos
	where
		K: Ord,
		F: FnMut(&Self::Item) -> K,
	{
		let last = limits::deref(self.last());
		merge_in_place_by_key(self, LeftLimit::Front, mid, last, f)
	}

	#[cfg(feature = "alloc")]
	#[inline]
	fn sort_by_bucketing<E>(&mut self, max_buckets: usize, is_eq: E) -> (usize, Option<Self::Pos>)
	where
		Self::Item: Ord,
		E: FnMut(&Self::Item, &Self::Item) -> bool,
	{
		bucket_sort(self, LeftLimit::Front, None, max_buckets, is_eq)
	}
	#[cfg(feature = "alloc")]
	#[inline]
	fn sort_by_bucketing_by<E, F>(
		&mut self,
		max_buckets: usize,
		is_eq: E,
		compare: F,
	) -> (usize, Option<Self::Pos>)
	where
		E: FnMut(&Self::Item, &Self::Item) -> bool,
		F: FnMut(&Self::Item, &Self::Item) -> Ordering,
	{
		bucket_sort_by(self, LeftLimit::Front, None, max_buckets, is_eq, compare)
	}
	#[inline]
	fn sort_by_bucketing_in<E, F, A>(
		&mut self,
		max_buckets: usize,
		is_eq: E,
		compare: F,
		alloc: &A,
	) -> (usize, Option<Self::Pos>)
	where
		E: FnMut(&Self::Item, &Self::Item) -> bool,
		F: FnMut(&Self::Item, &Self::Item) -> Ordering,
		A: BucketAlloc + ?Sized,
	{
		bucket_sort_in(self, LeftLimit::Front, None, max_buckets, is_eq, compare, alloc)
	}

	#[inline]
	fn is_sorted(&self) -> bool
	where
		Self::Item: PartialOrd,
	{
		is_sorted(self, |a, b| a.partial_cmp(b))
	}
	#[inline]
	fn is_sorted_by<F>(&self, compare: F) -> bool
	where
		F: FnMut(&Self::Item, &Self::Item) -> Option<Ordering>,
	{
		is_sorted(self, compare)
	}
	#[inline]
	fn is_sorted_by_key<F, K>(&self, mut f: F) -> bool
	where
		F: FnMut(&Self::Item) -> K,
		K: PartialOrd,
	{
		is_sorted(self, |a, b| f(a).partial_cmp(&f(b)))
	}
}

fn is_sorted<S, F>(seq: &S, mut compare: F) -> bool
where
	S: Sequence + ?Sized,
	F: FnMut(&S::Item, &S::Item) -> Option<Ordering>,
{
	let mut values = seq.values();
	let Some(mut prev) = values.next() else {
		return true;
	};
	values.all(|next| {
		let sorted = matches!(compare(prev, next), Some(Less | Equal));
		prev = next;
		sorted
	})
}

#[cfg(feature = "std")]
#[cfg(test)]
mod test {
	use super::{ForwardList, LeftLimit, List, Sequence, SequenceExt, StackBuffer};
	use quickcheck_macros::quickcheck;

	#[quickcheck]
	fn sort_by_bucketing(xs: Vec<u32>, shift: u8, max_buckets: u8) {
		let shift = u32::from(shift % 32);
		let max_buckets = usize::from(max_buckets).max(1);
		let mut expected = xs.clone();
		expected.sort();

		let mut list = xs.iter().copied().collect::<ForwardList<_>>();
		let (len, last) = list.sort_by_bucketing(max_buckets, |a, b| a >> shift == b >> shift);
		assert_eq!(len, xs.len());
		assert_eq!(last, list.last());
		assert!(list.iter().eq(&expected));

		let mut list = xs.iter().copied().collect::<List<_>>();
		let buffer = StackBuffer::<{ 1 << 13 }>::new();
		list.sort_by_bucketing_in(
			max_buckets,
			|a, b| a >> shift == b >> shift,
			|a, b| b.cmp(a),
			&buffer,
		);
		expected.reverse();
		assert!(list.iter().eq(&expected));
	}

	#[quickcheck]
	fn sorts_agree(xs: Vec<i16>) {
		let mut by_insertion = xs.iter().copied().collect::<ForwardList<_>>();
		let mut by_merging = xs.iter().copied().collect::<List<_>>();
		by_insertion.sort_by_insertion_by_key(|x| x.unsigned_abs());
		by_merging.sort_by_merging_by_key(|x| x.unsigned_abs());
		assert!(by_insertion.iter().eq(by_merging.iter()));
		assert!(by_insertion.is_sorted_by_key(|x| x.unsigned_abs()));
		assert!(by_merging.is_sorted_by(|a, b| a.unsigned_abs().partial_cmp(&b.unsigned_abs())));
	}

	#[quickcheck]
	fn merge_in_place_at(mut xs: Vec<u32>, mut ys: Vec<u32>) {
		if xs.is_empty() {
			return;
		}
		xs.sort_by(|a, b| b.cmp(a));
		ys.sort_by(|a, b| b.cmp(a));
		let mut list = xs.iter().chain(&ys).copied().collect::<ForwardList<_>>();
		let mid = list.nth(xs.len() - 1).unwrap();
		let last = list.merge_in_place_at_by(mid, |a, b| b.cmp(a));
		assert_eq!(Some(last), list.last());
		assert!(list.is_sorted_by(|a, b| b.partial_cmp(a)));
		assert_eq!(list.len(), xs.len() + ys.len());
	}

	#[test]
	fn empty() {
		let mut list = ForwardList::<u32>::new();
		assert_eq!(list.sort_by_insertion(), None);
		assert_eq!(list.sort_by_merging(), None);
		assert_eq!(list.sort_by_bucketing(1, |a, b| a == b), (0, None));
		assert!(list.is_sorted());
		assert_eq!(super::merge_sort(&mut list, LeftLimit::Front, 0), None);
	}
}
