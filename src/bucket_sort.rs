use crate::{
	flat_list::{FlatList, Link, layout},
	limits::{LeftLimit, after, deref},
	merge_sort::{merge_in_place, merge_sort},
	splicing::{Spliceable, cosplice},
	storage::BucketAlloc,
};
use core::alloc::Layout;

/// Descriptor of a run of mutually equivalent elements.
#[derive(Clone, Copy)]
struct Bucket<P> {
	len: usize,
	last: P,
}

/// Layout of the bucket storage for up to `max_buckets` buckets of positions `P`.
pub fn storage_layout<P>(max_buckets: usize) -> Layout {
	if max_buckets <= <u8 as Link>::MAX {
		return layout::<Bucket<P>, u8>(max_buckets).0;
	}
	if max_buckets <= <u16 as Link>::MAX {
		return layout::<Bucket<P>, u16>(max_buckets).0;
	}
	if max_buckets <= <u32 as Link>::MAX {
		return layout::<Bucket<P>, u32>(max_buckets).0;
	}
	layout::<Bucket<P>, u64>(max_buckets).0
}

/// Sorts the elements in the open range `(left, end)` by first grouping them into buckets of
/// elements equivalent under `is_eq`, then sorting every bucket by merging.
///
/// Returns the number of elements in the range and the position of its last element after
/// sorting, or the element following `left` if the range is empty.
///
/// `is_eq` must be weakly consistent with `is_less`: elements of different classes compare the same
/// way no matter which representatives are picked. The result is sorted, and stable if `is_eq`
/// is totally consistent, i.e., no two classes compare equal.
///
/// # Panics
///
/// Panics if `max_buckets` is zero or if `alloc` fails to allocate the bucket storage.
pub fn bucket_sort<S, E, F, A>(
	seq: &mut S,
	left: LeftLimit<S::Pos>,
	end: Option<S::Pos>,
	max_buckets: usize,
	is_eq: &mut E,
	is_less: &mut F,
	alloc: &A,
) -> (usize, Option<S::Pos>)
where
	S: Spliceable + ?Sized,
	E: FnMut(&S::Item, &S::Item) -> bool,
	F: FnMut(&S::Item, &S::Item) -> bool,
	A: BucketAlloc + ?Sized,
{
	assert!(max_buckets > 0, "bucket sort requires at least one bucket");

	let first = after(seq, left);
	if first == end {
		return (0, first);
	}

	macro_rules! with_link {
		($link:ty) => {
			bucket_sort_with::<S, $link, E, F, A>(seq, left, end, max_buckets, is_eq, is_less, alloc)
		};
	}

	if max_buckets <= <u8 as Link>::MAX {
		return with_link!(u8);
	}
	if max_buckets <= <u16 as Link>::MAX {
		return with_link!(u16);
	}
	if max_buckets <= <u32 as Link>::MAX {
		return with_link!(u32);
	}
	with_link!(u64)
}

fn bucket_sort_with<S, L, E, F, A>(
	seq: &mut S,
	left: LeftLimit<S::Pos>,
	end: Option<S::Pos>,
	max_buckets: usize,
	is_eq: &mut E,
	is_less: &mut F,
	alloc: &A,
) -> (usize, Option<S::Pos>)
where
	S: Spliceable + ?Sized,
	L: Link,
	E: FnMut(&S::Item, &S::Item) -> bool,
	F: FnMut(&S::Item, &S::Item) -> bool,
	A: BucketAlloc + ?Sized,
{
	let mut buckets = FlatList::<Bucket<S::Pos>, L, A>::new(max_buckets, alloc);

	// Last distributed element, its successor is the next one to distribute.
	let mut lhs = deref(after(seq, left));

	// Buckets are ordered like their elements. The first element opens the first bucket.
	let before_begin = buckets.before_begin();
	let mut last_bucket = buckets.emplace_after(before_begin, Bucket { len: 1, last: lhs });

	// Once the buckets run out, elements of new classes stay in the last bucket, which then needs
	// an extra merge.
	let mut dirty = false;

	let mut it = seq.next(lhs);
	while let Some(rhs) = it.filter(|&rhs| Some(rhs) != end) {
		let representative = buckets[last_bucket].last;

		// Belongs to the last bucket, which ends right here.
		if is_eq(seq.get(rhs), seq.get(representative)) {
			let bucket = &mut buckets[last_bucket];
			bucket.len += 1;
			bucket.last = rhs;
			lhs = rhs;
			it = seq.next(rhs);
			continue;
		}

		let can_add_buckets = buckets.len() < buckets.capacity();

		// Greater than any bucket, so it opens a new last bucket right here.
		if is_less(seq.get(representative), seq.get(rhs)) {
			if can_add_buckets {
				last_bucket = buckets.emplace_after(last_bucket, Bucket { len: 1, last: rhs });
			} else {
				buckets[last_bucket].len += 1;
				dirty = true;
			}
			lhs = rhs;
			it = seq.next(rhs);
			continue;
		}

		// Relocate the whole run of elements equivalent to `rhs` at once.
		let mut run_len = 1;
		let mut run_last = rhs;
		let mut run_next = seq.next(rhs);
		while let Some(next) = run_next.filter(|&next| Some(next) != end) {
			if !is_eq(seq.get(rhs), seq.get(next)) {
				break;
			}
			run_len += 1;
			run_last = next;
			run_next = seq.next(next);
		}
		it = run_next;

		// Find the bucket of the run or the bucket to open a new one after.
		let mut bucket = before_begin;
		let mut need_new_bucket = true;
		let mut bucket_next = buckets.begin();
		while bucket_next != last_bucket {
			let representative = buckets[bucket_next].last;
			if is_eq(seq.get(rhs), seq.get(representative)) {
				bucket = bucket_next;
				need_new_bucket = false;
				break;
			}
			if is_less(seq.get(rhs), seq.get(representative)) {
				break;
			}
			bucket = bucket_next;
			bucket_next = buckets.next(bucket_next);
		}

		if need_new_bucket {
			if !can_add_buckets {
				buckets[last_bucket].len += run_len;
				dirty = true;
				lhs = run_last;
				continue;
			}
			if bucket == before_begin {
				buckets.emplace_after(before_begin, Bucket {
					len: run_len,
					last: run_last,
				});
				cosplice(seq, left, LeftLimit::At(lhs), run_last);
				continue;
			}
			let last = buckets[bucket].last;
			bucket = buckets.emplace_after(bucket, Bucket { len: 0, last });
		}

		let dest = buckets[bucket].last;
		cosplice(seq, LeftLimit::At(dest), LeftLimit::At(lhs), run_last);
		let bucket = &mut buckets[bucket];
		bucket.len += run_len;
		bucket.last = run_last;
	}

	// Sort every bucket, each one following the last element of its predecessor.
	let mut len = 0;
	let mut bucket_left = left;
	let mut last_left = left;
	let mut last = lhs;
	for (_, bucket) in buckets.iter() {
		last_left = bucket_left;
		last = deref(merge_sort(seq, bucket_left, bucket.len, is_less));
		bucket_left = LeftLimit::At(last);
		len += bucket.len;
	}

	// The last bucket holds elements of classes preceding it.
	if dirty && last_left != left {
		let mid = deref(last_left.pos());
		last = merge_in_place(seq, left, mid, last, is_less);
	}

	(len, Some(last))
}
