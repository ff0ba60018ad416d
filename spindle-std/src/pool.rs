//! Routing context pool.
//!
//! Every outermost dispatch borrows a [`RouteContext`] from the router's
//! pool and gives it back when the request finishes. The guard returned by
//! [`ContextPool::acquire`] does the giving back, so release happens on every
//! exit path: normal return, handler panic, or a dropped future.

use parking_lot::Mutex;
use spindle_core::RouteContext;
use std::{
    fmt, mem,
    ops::{Deref, DerefMut},
};

/// Default number of idle contexts a pool keeps around.
pub const DEFAULT_POOL_CAPACITY: usize = 1024;

/// A bounded pool of reusable routing contexts.
pub struct ContextPool {
    idle: Mutex<Vec<Box<RouteContext>>>,
    max_idle: usize,
}

impl ContextPool {
    /// Create a pool keeping up to [`DEFAULT_POOL_CAPACITY`] idle contexts.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_POOL_CAPACITY)
    }

    /// Create a pool keeping at most `max_idle` idle contexts.
    pub fn with_capacity(max_idle: usize) -> Self {
        Self {
            idle: Mutex::new(Vec::new()),
            max_idle,
        }
    }

    /// Take a context out of the pool, creating one if none is idle.
    ///
    /// The context is reset before it is handed out.
    pub fn acquire(&self) -> PooledContext<'_> {
        let mut cx = self.idle.lock().pop().unwrap_or_default();
        cx.reset();
        PooledContext { cx, pool: self }
    }

    /// Number of idle contexts.
    pub fn idle(&self) -> usize {
        self.idle.lock().len()
    }

    fn put_back(&self, cx: Box<RouteContext>) {
        let mut idle = self.idle.lock();
        if idle.len() < self.max_idle {
            idle.push(cx);
        }
    }
}

impl Default for ContextPool {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ContextPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextPool")
            .field("idle", &self.idle())
            .field("max_idle", &self.max_idle)
            .finish()
    }
}

/// A context on loan from a [`ContextPool`].
///
/// Returned to the pool when dropped.
pub struct PooledContext<'p> {
    cx: Box<RouteContext>,
    pool: &'p ContextPool,
}

impl PooledContext<'_> {
    /// Return the context to the pool now.
    pub fn release(self) {
        drop(self);
    }
}

impl Deref for PooledContext<'_> {
    type Target = RouteContext;

    fn deref(&self) -> &RouteContext {
        &self.cx
    }
}

impl DerefMut for PooledContext<'_> {
    fn deref_mut(&mut self) -> &mut RouteContext {
        &mut self.cx
    }
}

impl Drop for PooledContext<'_> {
    fn drop(&mut self) {
        self.pool.put_back(mem::take(&mut self.cx));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{sync::Arc, thread};

    #[test]
    fn test_acquire_resets_previous_state() {
        let pool = ContextPool::new();
        {
            let mut cx = pool.acquire();
            cx.params_mut().set("id", "7");
            cx.set_route_path("/leftover");
        }
        assert_eq!(pool.idle(), 1);

        let cx = pool.acquire();
        assert!(cx.params().is_empty());
        assert_eq!(cx.route_path(), None);
        assert_eq!(pool.idle(), 0);
    }

    #[test]
    fn test_release_is_explicit_drop() {
        let pool = ContextPool::new();
        let cx = pool.acquire();
        assert_eq!(pool.idle(), 0);
        cx.release();
        assert_eq!(pool.idle(), 1);
    }

    #[test]
    fn test_release_returns_the_loaned_context() {
        let pool = ContextPool::new();
        let cx = pool.acquire();
        let loaned: *const RouteContext = &*cx;
        cx.release();

        let again = pool.acquire();
        assert!(std::ptr::eq(loaned, &*again));
    }

    #[test]
    fn test_bounded_idle_list() {
        let pool = ContextPool::with_capacity(1);
        let a = pool.acquire();
        let b = pool.acquire();
        drop(a);
        drop(b);
        assert_eq!(pool.idle(), 1);
    }

    #[test]
    fn test_release_on_panic() {
        let pool = Arc::new(ContextPool::new());
        let worker = pool.clone();
        let result = thread::spawn(move || {
            let _cx = worker.acquire();
            panic!("handler blew up");
        })
        .join();

        assert!(result.is_err());
        assert_eq!(pool.idle(), 1);
    }

    #[test]
    fn test_concurrent_acquire_is_exclusive() {
        let pool = Arc::new(ContextPool::new());
        let workers: Vec<_> = (0..8)
            .map(|n| {
                let pool = pool.clone();
                thread::spawn(move || {
                    for _ in 0..200 {
                        let mut cx = pool.acquire();
                        let value = n.to_string();
                        cx.params_mut().set("worker", &value);
                        thread::yield_now();
                        assert_eq!(cx.param("worker"), Some(value.as_str()));
                    }
                })
            })
            .collect();

        for worker in workers {
            worker.join().unwrap();
        }
        assert!(pool.idle() <= 8);
    }
}
