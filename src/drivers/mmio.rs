//! Opaque handle for a single memory-mapped device register.
//!
//! All accesses are volatile, so the compiler neither caches nor reorders them
//! relative to other volatile accesses.

use core::marker::PhantomData;

pub struct Mmio<T> {
    address: *mut T,
    phantom: PhantomData<T>,
}

// Device registers are plain addresses; sharing the handle is as safe as the
// register itself, which the constructor's caller vouches for.
unsafe impl<T> Send for Mmio<T> {}
unsafe impl<T> Sync for Mmio<T> {}

impl<T: Copy> Mmio<T> {
    /// # Safety
    /// `address` must be a valid, suitably aligned register of type `T` for
    /// as long as the handle lives.
    pub const unsafe fn new(address: usize) -> Self {
        Self {
            address: address as *mut T,
            phantom: PhantomData,
        }
    }

    #[inline]
    pub fn read(&self) -> T {
        unsafe { self.address.read_volatile() }
    }

    #[inline]
    pub fn write(&self, value: T) {
        unsafe { self.address.write_volatile(value) }
    }

    pub fn address(&self) -> usize {
        self.address as usize
    }
}
