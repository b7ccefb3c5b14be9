use crate::{
	limits::{LeftLimit, after, deref, step},
	splicing::{Spliceable, cosplice_one},
};

/// Sorts the `count` elements following `left` using insertion sort, which is *O*(*n*^2)
/// worst-case but relocates every element at most once.
///
/// Returns the position of the last sorted element, or the element following `left` if there are
/// fewer than two elements.
pub fn insertion_sort<S, F>(
	seq: &mut S,
	left: LeftLimit<S::Pos>,
	count: usize,
	is_less: &mut F,
) -> Option<S::Pos>
where
	S: Spliceable + ?Sized,
	F: FnMut(&S::Item, &S::Item) -> bool,
{
	let first = after(seq, left);
	if count < 2 {
		return first;
	}
	let mut first = deref(first);

	// Last sorted element.
	let mut lhs = first;

	// The first pair needs a single comparison.
	let rhs = step(seq, lhs);
	if is_less(seq.get(rhs), seq.get(lhs)) {
		cosplice_one(seq, left, LeftLimit::At(lhs));
		first = rhs;
	} else {
		lhs = rhs;
	}

	for _ in 2..count {
		let rhs = step(seq, lhs);
		if !is_less(seq.get(rhs), seq.get(lhs)) {
			lhs = rhs;
			continue;
		}
		// From here on `lhs` stays the last sorted element and `first != lhs`.
		if is_less(seq.get(rhs), seq.get(first)) {
			cosplice_one(seq, left, LeftLimit::At(lhs));
			first = rhs;
			continue;
		}
		// `first <= rhs < lhs`, find the last element not greater than `rhs`.
		let mut pos = first;
		let mut next = step(seq, pos);
		while !is_less(seq.get(rhs), seq.get(next)) {
			pos = next;
			next = step(seq, next);
		}
		cosplice_one(seq, LeftLimit::At(pos), LeftLimit::At(lhs));
	}

	Some(lhs)
}
