//! Allocation hook for the auxiliary storage of bucket sort.

use core::{
	alloc::Layout,
	cell::{Cell, UnsafeCell},
	mem::MaybeUninit,
	ptr,
};

/// Source of the single block of auxiliary storage a bucket sort call uses for its bucket
/// descriptors.
///
/// The block is acquired at the start of the call and released before it returns, including when
/// unwinding from a panicking predicate.
///
/// # Safety
///
/// A non-null pointer returned by [`allocate`](BucketAlloc::allocate) must be valid for reads and
/// writes of `layout.size()` bytes, aligned to `layout.align()` and not aliased by any other live
/// allocation until it is passed to [`deallocate`](BucketAlloc::deallocate).
pub unsafe trait BucketAlloc {
	/// Allocates a block fitting `layout`, returning null on failure.
	fn allocate(&self, layout: Layout) -> *mut u8;
	/// Releases a block previously returned by [`allocate`](BucketAlloc::allocate).
	///
	/// # Safety
	///
	/// `ptr` must have been returned by `self.allocate(layout)` with the very same `layout` and not
	/// have been released since.
	unsafe fn deallocate(&self, ptr: *mut u8, layout: Layout);
}

unsafe impl<A> BucketAlloc for &A
where
	A: BucketAlloc + ?Sized,
{
	#[inline]
	fn allocate(&self, layout: Layout) -> *mut u8 {
		(**self).allocate(layout)
	}
	#[inline]
	unsafe fn deallocate(&self, ptr: *mut u8, layout: Layout) {
		// SAFETY: Forwarded contract.
		unsafe { (**self).deallocate(ptr, layout) }
	}
}

/// The global allocator.
#[cfg(feature = "alloc")]
#[derive(Clone, Copy, Debug, Default)]
pub struct Global;

#[cfg(feature = "alloc")]
unsafe impl BucketAlloc for Global {
	#[inline]
	fn allocate(&self, layout: Layout) -> *mut u8 {
		if layout.size() == 0 {
			return ptr::without_provenance_mut(layout.align());
		}
		// SAFETY: The layout has a non-zero size.
		unsafe { alloc::alloc::alloc(layout) }
	}
	#[inline]
	unsafe fn deallocate(&self, ptr: *mut u8, layout: Layout) {
		if layout.size() != 0 {
			// SAFETY: `ptr` was allocated by the global allocator with `layout`.
			unsafe { alloc::alloc::dealloc(ptr, layout) }
		}
	}
}

#[repr(C, align(16))]
struct Bytes<const N: usize>([MaybeUninit<u8>; N]);

/// `N` bytes of inline storage, aligned to 16 bytes, handing out one block at a time.
///
/// Lets bucket sort run without a heap when placed on the stack. Requests exceeding `N` bytes or an
/// alignment of 16 fail, and so does a request while the block is taken.
///
/// # Example
///
/// ```
/// use splice_sort::{ForwardList, SequenceExt, StackBuffer, bucket_storage_layout};
///
/// let buffer = StackBuffer::<1024>::new();
/// assert!(bucket_storage_layout::<ForwardList<u8>>(32).size() <= 1024);
///
/// let mut list = b"bucket sort".iter().copied().collect::<ForwardList<u8>>();
/// list.sort_by_bucketing_in(32, |a, b| a == b, u8::cmp, &buffer);
/// assert!(list.iter().eq(b" bcekorsttu"));
/// ```
pub struct StackBuffer<const N: usize> {
	bytes: UnsafeCell<Bytes<N>>,
	taken: Cell<bool>,
}

impl<const N: usize> StackBuffer<N> {
	/// Creates an unused buffer.
	#[inline]
	pub const fn new() -> Self {
		Self {
			bytes: UnsafeCell::new(Bytes([MaybeUninit::uninit(); N])),
			taken: Cell::new(false),
		}
	}
}

impl<const N: usize> Default for StackBuffer<N> {
	#[inline]
	fn default() -> Self {
		Self::new()
	}
}

unsafe impl<const N: usize> BucketAlloc for StackBuffer<N> {
	fn allocate(&self, layout: Layout) -> *mut u8 {
		if self.taken.get() || layout.size() > N || layout.align() > align_of::<Bytes<N>>() {
			return ptr::null_mut();
		}
		self.taken.set(true);
		self.bytes.get().cast()
	}
	unsafe fn deallocate(&self, ptr: *mut u8, _layout: Layout) {
		debug_assert_eq!(ptr, self.bytes.get().cast::<u8>());
		self.taken.set(false);
	}
}
