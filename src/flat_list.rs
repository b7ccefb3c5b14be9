//! Fixed-capacity, append-only singly-linked list in a single allocation.
//!
//! Elements are stored densely in insertion order, their successors in a parallel array of links
//! of the narrowest unsigned integer type `L` able to address `capacity + 1` slots. Link slot `0`
//! is the head, slot `i + 1` holds the successor of element `i` and the value `capacity` marks the
//! end.

use crate::storage::BucketAlloc;
use core::{
	alloc::Layout,
	marker::PhantomData,
	ops::{Index, IndexMut},
	ptr::{self, NonNull},
	slice,
};

/// Unsigned integer used as link.
pub(crate) trait Link: Copy {
	/// Largest addressable slot.
	const MAX: usize;

	fn new(index: usize) -> Self;
	fn index(self) -> usize;
}

macro_rules! impl_link {
	($($ty:ty),*) => {
		$(
			impl Link for $ty {
				const MAX: usize = if <$ty>::BITS >= usize::BITS {
					usize::MAX
				} else {
					<$ty>::MAX as usize
				};

				#[inline]
				fn new(index: usize) -> Self {
					debug_assert!(index <= <Self as Link>::MAX);
					index as $ty
				}
				#[inline]
				fn index(self) -> usize {
					self as usize
				}
			}
		)*
	};
}

impl_link!(u8, u16, u32, u64);

/// Position in a [`FlatList`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Cursor(usize);

/// Layout of a list of `capacity` elements and the offset of its links.
///
/// # Panics
///
/// Panics if the size overflows `isize::MAX`.
pub(crate) fn layout<T, L: Link>(capacity: usize) -> (Layout, usize) {
	let layout = capacity.checked_add(1).and_then(|links| {
		let values = Layout::array::<T>(capacity).ok()?;
		let (layout, offset) = values.extend(Layout::array::<L>(links).ok()?).ok()?;
		Some((layout.pad_to_align(), offset))
	});
	match layout {
		Some(layout) => layout,
		None => panic!("bucket storage of capacity {capacity} overflows `isize::MAX` bytes"),
	}
}

pub(crate) struct FlatList<'a, T, L, A>
where
	L: Link,
	A: BucketAlloc + ?Sized,
{
	ptr: NonNull<u8>,
	layout: Layout,
	offset: usize,
	capacity: usize,
	len: usize,
	alloc: &'a A,
	marker: PhantomData<(T, L)>,
}

impl<'a, T, L, A> FlatList<'a, T, L, A>
where
	L: Link,
	A: BucketAlloc + ?Sized,
{
	/// Allocates an empty list of `capacity` elements from `alloc`.
	///
	/// # Panics
	///
	/// Panics if `capacity` exceeds what `L` addresses or if the allocation fails.
	pub fn new(capacity: usize, alloc: &'a A) -> Self {
		assert!(capacity <= L::MAX, "flat list capacity exceeds its link width");
		let (layout, offset) = layout::<T, L>(capacity);
		let Some(ptr) = NonNull::new(alloc.allocate(layout)) else {
			panic!("bucket storage allocation of {} bytes failed", layout.size());
		};
		let list = Self {
			ptr,
			layout,
			offset,
			capacity,
			len: 0,
			alloc,
			marker: PhantomData,
		};
		// SAFETY: Slot `0` is within the allocation.
		unsafe { list.links().write(L::new(capacity)) };
		list
	}
	#[inline]
	fn values(&self) -> *mut T {
		self.ptr.as_ptr().cast()
	}
	#[inline]
	fn links(&self) -> *mut L {
		// SAFETY: The offset is within the allocation.
		unsafe { self.ptr.as_ptr().add(self.offset).cast() }
	}
	/// Index of the link slot holding the successor of `pos`.
	#[inline]
	fn slot(&self, pos: Cursor) -> usize {
		let slot = pos.0.wrapping_add(1);
		assert!(slot <= self.len, "invalid flat list cursor");
		slot
	}
	#[inline]
	pub fn len(&self) -> usize {
		self.len
	}
	#[inline]
	pub fn capacity(&self) -> usize {
		self.capacity
	}
	#[inline]
	pub fn before_begin(&self) -> Cursor {
		Cursor(usize::MAX)
	}
	#[inline]
	pub fn begin(&self) -> Cursor {
		self.next(self.before_begin())
	}
	#[inline]
	pub fn end(&self) -> Cursor {
		Cursor(self.capacity)
	}
	#[inline]
	pub fn next(&self, pos: Cursor) -> Cursor {
		let slot = self.slot(pos);
		// SAFETY: Slots `0..=len` are initialized.
		Cursor(unsafe { self.links().add(slot).read() }.index())
	}
	/// Inserts `value` right after `pos` and returns its cursor.
	///
	/// # Panics
	///
	/// Panics if the list is full or `pos` is neither the front sentinel nor an element.
	pub fn emplace_after(&mut self, pos: Cursor, value: T) -> Cursor {
		assert!(self.len < self.capacity, "flat list capacity exceeded");
		let slot = self.slot(pos);
		let new = self.len;
		// SAFETY: `new < capacity` is a free value slot and `new + 1 <= capacity` a free link slot.
		unsafe {
			self.values().add(new).write(value);
			let links = self.links();
			links.add(new + 1).write(links.add(slot).read());
			links.add(slot).write(L::new(new));
		}
		self.len += 1;
		Cursor(new)
	}
	/// Drops all elements, keeping the allocation.
	pub fn clear(&mut self) {
		let len = self.len;
		self.len = 0;
		// SAFETY: Slot `0` is within the allocation and the first `len` values are initialized.
		unsafe {
			self.links().write(L::new(self.capacity));
			ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.values(), len));
		}
	}
	/// Returns an iterator over the elements in list order.
	pub fn iter(&self) -> Iter<'_, 'a, T, L, A> {
		Iter {
			list: self,
			pos: self.begin(),
		}
	}
	#[inline]
	fn as_slice(&self) -> &[T] {
		// SAFETY: The first `len` values are initialized.
		unsafe { slice::from_raw_parts(self.values(), self.len) }
	}
	#[inline]
	fn as_mut_slice(&mut self) -> &mut [T] {
		// SAFETY: The first `len` values are initialized and borrowed uniquely.
		unsafe { slice::from_raw_parts_mut(self.values(), self.len) }
	}
}

impl<T, L, A> Index<Cursor> for FlatList<'_, T, L, A>
where
	L: Link,
	A: BucketAlloc + ?Sized,
{
	type Output = T;

	#[inline]
	fn index(&self, pos: Cursor) -> &T {
		&self.as_slice()[pos.0]
	}
}

impl<T, L, A> IndexMut<Cursor> for FlatList<'_, T, L, A>
where
	L: Link,
	A: BucketAlloc + ?Sized,
{
	#[inline]
	fn index_mut(&mut self, pos: Cursor) -> &mut T {
		&mut self.as_mut_slice()[pos.0]
	}
}

impl<T, L, A> Drop for FlatList<'_, T, L, A>
where
	L: Link,
	A: BucketAlloc + ?Sized,
{
	fn drop(&mut self) {
		struct Release<'b, A: BucketAlloc + ?Sized>(&'b A, NonNull<u8>, Layout);
		impl<A: BucketAlloc + ?Sized> Drop for Release<'_, A> {
			fn drop(&mut self) {
				// SAFETY: The block was allocated with this layout and is released exactly once.
				unsafe { self.0.deallocate(self.1.as_ptr(), self.2) };
			}
		}
		// Releases the block even if dropping an element panics.
		let _release = Release(self.alloc, self.ptr, self.layout);
		self.clear();
	}
}

pub(crate) struct Iter<'l, 'a, T, L, A>
where
	L: Link,
	A: BucketAlloc + ?Sized,
{
	list: &'l FlatList<'a, T, L, A>,
	pos: Cursor,
}

impl<'l, T, L, A> Iterator for Iter<'l, '_, T, L, A>
where
	L: Link,
	A: BucketAlloc + ?Sized,
{
	type Item = (Cursor, &'l T);

	#[inline]
	fn next(&mut self) -> Option<Self::Item> {
		if self.pos == self.list.end() {
			return None;
		}
		let pos = self.pos;
		self.pos = self.list.next(pos);
		Some((pos, &self.list[pos]))
	}
}

#[cfg(feature = "std")]
#[cfg(test)]
mod test {
	use super::{FlatList, Link, layout};
	use crate::storage::{BucketAlloc, Global};
	use core::{alloc::Layout, cell::Cell};
	use rand::{Rng, SeedableRng, rngs::StdRng};
	use std::rc::Rc;

	#[test]
	fn link_widths() {
		assert_eq!(<u8 as Link>::MAX, 255);
		assert_eq!(<u16 as Link>::MAX, 65_535);
		assert_eq!(<u64 as Link>::MAX, usize::MAX);
		assert_eq!(layout::<u32, u8>(4), (Layout::from_size_align(24, 4).unwrap(), 16));
		assert_eq!(layout::<u64, u16>(3).0.size(), 32);
	}

	#[test]
	fn random_inserts() {
		let mut rng = StdRng::seed_from_u64(42);
		let mut list = FlatList::<u32, u8, _>::new(255, &Global);
		for round in 0..3 {
			let mut model = Vec::new();
			let mut cursors = Vec::new();
			for value in 0..255 {
				let at = rng.random_range(0..=model.len());
				let pos = if at == 0 {
					list.before_begin()
				} else {
					cursors[at - 1]
				};
				let new = list.emplace_after(pos, value);
				model.insert(at, value);
				cursors.insert(at, new);
			}
			assert_eq!(list.len(), list.capacity());
			assert_eq!(list.iter().map(|(_, &value)| value).collect::<Vec<_>>(), model, "{round}");
			for (pos, value) in cursors.iter().zip(&model) {
				assert_eq!(list[*pos], *value);
			}
			list.clear();
			assert_eq!(list.begin(), list.end());
		}
	}

	#[test]
	#[should_panic]
	fn capacity_exceeded() {
		let mut list = FlatList::<u32, u8, _>::new(1, &Global);
		let pos = list.before_begin();
		list.emplace_after(pos, 1);
		list.emplace_after(pos, 2);
	}

	struct Counting {
		allocated: Cell<usize>,
		deallocated: Cell<usize>,
	}

	unsafe impl BucketAlloc for Counting {
		fn allocate(&self, layout: Layout) -> *mut u8 {
			self.allocated.set(self.allocated.get() + layout.size());
			Global.allocate(layout)
		}
		unsafe fn deallocate(&self, ptr: *mut u8, layout: Layout) {
			self.deallocated.set(self.deallocated.get() + layout.size());
			unsafe { Global.deallocate(ptr, layout) }
		}
	}

	#[test]
	fn drops_and_releases() {
		let counting = Counting {
			allocated: Cell::new(0),
			deallocated: Cell::new(0),
		};
		let value = Rc::new(());
		{
			let mut list = FlatList::<Rc<()>, u16, _>::new(300, &counting);
			let mut pos = list.before_begin();
			for _ in 0..100 {
				pos = list.emplace_after(pos, value.clone());
			}
			assert_eq!(Rc::strong_count(&value), 101);
			list.clear();
			assert_eq!(Rc::strong_count(&value), 1);
			list.emplace_after(list.before_begin(), value.clone());
		}
		assert_eq!(Rc::strong_count(&value), 1);
		assert_eq!(counting.allocated.get(), counting.deallocated.get());
		assert_eq!(counting.allocated.get(), layout::<Rc<()>, u16>(300).0.size());
	}
}
