use crate::{
	insertion_sort::insertion_sort,
	limits::{LeftLimit, after, deref, step},
	splicing::{Spliceable, cosplice},
};

/// Below this count, elements are sorted by insertion. Must be a power of two.
const MERGE_THRESHOLD: usize = 4;

/// Merges the sorted coranges `(left, mid]` and `(mid, last]` in place and returns the position of
/// the last merged element.
///
/// Every relocation moves a maximal run of the right corange, so the merge takes at most as many
/// relocations as the left corange has elements, and none at all if both are already in order.
pub fn merge_in_place<S, F>(
	seq: &mut S,
	left: LeftLimit<S::Pos>,
	mid: S::Pos,
	last: S::Pos,
	is_less: &mut F,
) -> S::Pos
where
	S: Spliceable + ?Sized,
	F: FnMut(&S::Item, &S::Item) -> bool,
{
	if mid == last {
		return last;
	}

	// First element of the right corange.
	let mut rhs = step(seq, mid);
	let end = seq.next(last);

	// Already in order.
	if !is_less(seq.get(rhs), seq.get(mid)) {
		return last;
	}
	// Now `rhs < mid`, so every scan of the left corange below stops at `mid` the latest.

	// First left element not yet known to be in place.
	let mut lhs = deref(after(seq, left));

	if is_less(seq.get(rhs), seq.get(lhs)) {
		// A run of the right corange goes to the front.
		let mut rhs_next = seq.next(rhs);
		while let Some(next) = rhs_next.filter(|&next| Some(next) != end) {
			if !is_less(seq.get(next), seq.get(lhs)) {
				break;
			}
			rhs = next;
			rhs_next = seq.next(next);
		}
		cosplice(seq, left, LeftLimit::At(mid), rhs);

		let Some(next) = rhs_next.filter(|&next| Some(next) != end) else {
			return mid;
		};
		if lhs == mid || !is_less(seq.get(next), seq.get(mid)) {
			return last;
		}
		rhs = next;
	}
	// Now `lhs != mid` and `lhs <= rhs`.

	loop {
		// Find the first left element greater than `rhs`.
		let mut lhs_next = step(seq, lhs);
		while !is_less(seq.get(rhs), seq.get(lhs_next)) {
			lhs = lhs_next;
			lhs_next = step(seq, lhs_next);
		}

		// Now `lhs <= rhs < lhs_next`, find the run of the right corange fitting in between.
		let mut rhs_next = seq.next(rhs);
		while let Some(next) = rhs_next.filter(|&next| Some(next) != end) {
			if !is_less(seq.get(next), seq.get(lhs_next)) {
				break;
			}
			rhs = next;
			rhs_next = seq.next(next);
		}
		cosplice(seq, LeftLimit::At(lhs), LeftLimit::At(mid), rhs);

		let Some(next) = rhs_next.filter(|&next| Some(next) != end) else {
			return mid;
		};
		if lhs_next == mid || !is_less(seq.get(next), seq.get(mid)) {
			return last;
		}
		lhs = lhs_next;
		rhs = next;
	}
}

/// Sorts the `count` elements following `left` using a balanced, top-down merge sort, which is
/// *O*(*n* log *n*) worst-case, stable and allocation-free.
///
/// Returns the position of the last sorted element, or the element following `left` if there are
/// fewer than two elements.
///
/// With `L` the bit length of `count` and `S(k) = count >> (L - k)`, step `k` expects the first
/// `S(k)` elements sorted, sorts the next `S(k + 1) - S(k)` elements recursively and merges them
/// into the sorted prefix. The first `S(log2(MERGE_THRESHOLD))` elements are sorted by insertion.
pub fn merge_sort<S, F>(
	seq: &mut S,
	left: LeftLimit<S::Pos>,
	count: usize,
	is_less: &mut F,
) -> Option<S::Pos>
where
	S: Spliceable + ?Sized,
	F: FnMut(&S::Item, &S::Item) -> bool,
{
	let max_steps = usize::BITS - count.leading_zeros();
	let first_step = MERGE_THRESHOLD.trailing_zeros();

	let mut sorted = if max_steps <= first_step {
		count
	} else {
		count >> (max_steps - first_step)
	};
	let mut last = insertion_sort(seq, left, sorted, is_less);

	for step in first_step..max_steps {
		let to_sort = (count >> (max_steps - step - 1)) - sorted;
		let mid = deref(last);
		let right = grow(|| merge_sort(seq, LeftLimit::At(mid), to_sort, is_less));
		last = Some(merge_in_place(seq, left, mid, deref(right), is_less));
		sorted += to_sort;
	}

	last
}

#[cfg(feature = "stacker")]
#[inline]
fn grow<R, F: FnOnce() -> R>(f: F) -> R {
	stacker::maybe_grow(32 * 1024, 1024 * 1024, f)
}

#[cfg(not(feature = "stacker"))]
#[inline(always)]
fn grow<R, F: FnOnce() -> R>(f: F) -> R {
	f()
}

#[cfg(feature = "std")]
#[cfg(test)]
mod test {
	use super::{merge_in_place, merge_sort};
	use crate::{
		ForwardList, List,
		limits::{LeftLimit, Sequence},
		splicing::Spliceable,
	};
	use quickcheck_macros::quickcheck;
	use rand::{Rng, SeedableRng, rngs::StdRng};

	fn sort<S>(xs: &[u32]) -> Vec<u32>
	where
		S: Spliceable<Item = u32> + FromIterator<u32>,
	{
		let mut seq = xs.iter().copied().collect::<S>();
		let last = merge_sort(&mut seq, LeftLimit::Front, xs.len(), &mut u32::lt);
		assert!(last == seq.last());
		seq.values().copied().collect()
	}

	#[quickcheck]
	fn sorted(xs: Vec<u32>) {
		let mut expected = xs.clone();
		expected.sort();
		assert_eq!(sort::<ForwardList<u32>>(&xs), expected);
		assert_eq!(sort::<List<u32>>(&xs), expected);
	}

	#[quickcheck]
	fn stable(xs: Vec<u8>) {
		let mut list = xs
			.iter()
			.enumerate()
			.map(|(index, &value)| (value % 8, index))
			.collect::<List<_>>();
		let len = list.len();
		merge_sort(&mut list, LeftLimit::Front, len, &mut |a: &(u8, usize), b| a.0 < b.0);
		let mut expected = list.iter().copied().collect::<Vec<_>>();
		expected.sort();
		assert!(list.iter().eq(&expected));
	}

	#[test]
	fn sub_ranges() {
		let mut rng = StdRng::seed_from_u64(42);
		for skip_left in 0..4 {
			for count in 0..70 {
				for skip_right in 0..4 {
					let xs = (0..skip_left + count + skip_right)
						.map(|_| rng.random_range(0..32))
						.collect::<Vec<u32>>();
					let mut list = xs.iter().copied().collect::<ForwardList<u32>>();
					let left = list.left_limit(skip_left);
					let last = merge_sort(&mut list, left, count, &mut u32::lt);

					let mut expected = xs.clone();
					expected[skip_left..skip_left + count].sort();
					assert!(list.iter().eq(&expected), "{skip_left} {count} {skip_right}");
					let expected_last = match count {
						0 => list.nth(skip_left),
						_ => list.nth(skip_left + count - 1),
					};
					assert_eq!(last, expected_last);
				}
			}
		}
	}

	#[test]
	fn large() {
		let mut rng = StdRng::seed_from_u64(1);
		let mut xs = (0..10_000).map(|_| rng.random::<u32>()).collect::<Vec<_>>();
		let mut expected = xs.clone();
		expected.sort();
		assert_eq!(sort::<ForwardList<u32>>(&xs), expected);
		xs.sort_by(|a, b| b.cmp(a));
		assert_eq!(sort::<List<u32>>(&xs), expected);
	}

	/// Merges every split of every sorted prefix and suffix of 42 elements.
	#[test]
	fn merges() {
		const LEN: usize = 42;
		let mut rng = StdRng::seed_from_u64(3);
		let xs = (0..LEN).map(|_| rng.random_range(0..20)).collect::<Vec<u32>>();
		for left in 0..LEN {
			for mid in left + 1..=LEN {
				for right in mid..=LEN {
					let mut expected = xs.clone();
					expected[left..mid].sort();
					expected[mid..right].sort();
					let mut list = expected.iter().copied().collect::<ForwardList<u32>>();
					let left_limit = list.left_limit(left);
					let mid_pos = list.nth(mid - 1).unwrap();
					let last_pos = list.nth(right.max(mid) - 1).unwrap();
					let last =
						merge_in_place(&mut list, left_limit, mid_pos, last_pos, &mut u32::lt);

					expected[left..right].sort();
					assert!(list.iter().eq(&expected), "{left} {mid} {right}");
					assert_eq!(Some(last), list.nth(right - 1));
				}
			}
		}
	}

	#[quickcheck]
	fn merge_stable(xs: Vec<u8>, split: usize) {
		let mut items = xs
			.iter()
			.enumerate()
			.map(|(index, &value)| (value % 4, index))
			.collect::<Vec<_>>();
		if items.len() < 2 {
			return;
		}
		let mid = 1 + split % (items.len() - 1);
		items[..mid].sort();
		items[mid..].sort();
		let mut list = items.iter().copied().collect::<List<_>>();
		let mid_pos = list.nth(mid - 1).unwrap();
		let last_pos = list.last().unwrap();
		let last = merge_in_place(
			&mut list,
			LeftLimit::Front,
			mid_pos,
			last_pos,
			&mut |a: &(u8, usize), b| a.0 < b.0,
		);
		items.sort();
		assert!(list.iter().eq(&items));
		assert_eq!(Some(last), list.last());
	}

	#[test]
	fn scenario() {
		assert_eq!(sort::<ForwardList<u32>>(&[5, 3, 1, 4, 2]), [1, 2, 3, 4, 5]);
		let mut list = [1, 3, 5, 2, 4].into_iter().collect::<ForwardList<u32>>();
		let mid = list.nth(2).unwrap();
		let last = list.last().unwrap();
		let last = merge_in_place(&mut list, LeftLimit::Front, mid, last, &mut u32::lt);
		assert!(list.iter().eq(&[1, 2, 3, 4, 5]));
		assert_eq!(list[last], 5);
	}
}
