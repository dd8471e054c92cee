//! Reuse store for expired particle resources

/// An unbounded pool of idle instances.
///
/// Grows to the high-water mark of concurrent leases and never shrinks.
/// An instance is owned either by the pool or by exactly one lease-holder;
/// transfer is a plain move in [`acquire_with`](Pool::acquire_with) /
/// [`release`](Pool::release).
pub struct Pool<T> {
    idle: Vec<T>,
}

impl<T> Pool<T> {
    pub fn new() -> Self {
        Self { idle: Vec::new() }
    }

    /// Take an idle instance, or build a fresh one with `create`.
    ///
    /// The factory runs only on a miss, so callers can capture whatever
    /// construction needs (typically the render sink) at the call site.
    pub fn acquire_with(&mut self, create: impl FnOnce() -> T) -> T {
        self.idle.pop().unwrap_or_else(create)
    }

    /// Return a deactivated instance to the idle set
    pub fn release(&mut self, item: T) {
        self.idle.push(item);
    }

    pub fn idle_count(&self) -> usize {
        self.idle.len()
    }
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_reuses_released_instances() {
        let mut pool: Pool<u32> = Pool::new();
        let mut built = 0;

        let a = pool.acquire_with(|| {
            built += 1;
            10
        });
        assert_eq!(built, 1);
        pool.release(a);
        assert_eq!(pool.idle_count(), 1);

        let b = pool.acquire_with(|| {
            built += 1;
            20
        });
        assert_eq!(built, 1, "factory must not run on a hit");
        assert_eq!(b, 10);
        assert_eq!(pool.idle_count(), 0);
    }

    #[test]
    fn pool_grows_without_cap() {
        let mut pool: Pool<usize> = Pool::new();
        for i in 0..100 {
            pool.release(i);
        }
        assert_eq!(pool.idle_count(), 100);
    }
}
