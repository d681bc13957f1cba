//! Pooled scratch vectors for intermediate computations.

use crate::fph;
use nalgebra::Vector2;
use std::{
    cell::RefCell,
    marker::PhantomData,
    ops::{Deref, DerefMut},
};

/// Number of scratch vectors each thread's pool retains for reuse.
const POOL_CAPACITY: usize = 16;

thread_local! {
    static THREAD_LOCAL_POOL: RefCell<PoolState> = RefCell::new(PoolState::new());
}

/// Thread-local pool of reusable vectors for intermediate computations in
/// hot paths.
///
/// Since each thread has its own pool, checkouts never contend with other
/// threads.
#[derive(Debug)]
pub struct ScratchPool;

#[derive(Debug)]
struct PoolState {
    free: Vec<Vector2<fph>>,
    live_checkouts: usize,
}

/// A scratch vector checked out from the calling thread's [`ScratchPool`].
///
/// The vector starts out zeroed and is released back to the pool when the
/// handle is dropped, including when it is dropped during unwinding. Since
/// the vector must go back into the pool it was checked out from, the handle
/// can not leave its thread:
///
/// ```compile_fail
/// use tumble::scratch::ScratchPool;
///
/// let scratch = ScratchPool::vector();
/// std::thread::spawn(move || drop(scratch));
/// ```
#[derive(Debug)]
pub struct ScratchVector {
    vector: Vector2<fph>,
    // Keeps the handle on the thread whose pool the vector came from.
    _not_send: PhantomData<*mut ()>,
}

impl ScratchPool {
    /// Checks a zeroed vector out of the calling thread's pool.
    ///
    /// Checkouts may be nested freely. If more vectors are live than the
    /// pool retains, the excess vectors are simply not kept for reuse when
    /// released.
    pub fn vector() -> ScratchVector {
        let vector = THREAD_LOCAL_POOL.with(|pool| pool.borrow_mut().checkout());
        ScratchVector {
            vector,
            _not_send: PhantomData,
        }
    }

    /// Returns the number of vectors currently checked out of the calling
    /// thread's pool.
    pub fn live_checkouts() -> usize {
        THREAD_LOCAL_POOL.with(|pool| pool.borrow().live_checkouts)
    }
}

impl PoolState {
    const fn new() -> Self {
        Self {
            free: Vec::new(),
            live_checkouts: 0,
        }
    }

    fn checkout(&mut self) -> Vector2<fph> {
        self.live_checkouts += 1;
        match self.free.pop() {
            Some(mut vector) => {
                vector.fill(0.0);
                vector
            }
            None => Vector2::zeros(),
        }
    }

    fn release(&mut self, vector: Vector2<fph>) {
        self.live_checkouts -= 1;
        if self.free.len() < POOL_CAPACITY {
            self.free.push(vector);
        }
    }
}

impl Deref for ScratchVector {
    type Target = Vector2<fph>;

    fn deref(&self) -> &Self::Target {
        &self.vector
    }
}

impl DerefMut for ScratchVector {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.vector
    }
}

impl Drop for ScratchVector {
    fn drop(&mut self) {
        // The pool may already be gone if the thread is being torn down.
        let _ = THREAD_LOCAL_POOL.try_with(|pool| pool.borrow_mut().release(self.vector));
    }
}
