//! Fixed-capacity instance pool.

use super::config::PoolConfig;
use crate::core::State;
use crate::machine::Fsm;
use crate::table::TransitionTable;
use parking_lot::Mutex;
use std::fmt;
use std::ops::Deref;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// A preallocated array of [`Fsm`] instances sharing one table.
///
/// Instances live in one contiguous allocation made at construction and are
/// handed out as [`PooledFsm`] handles. Allocation and release pop and push
/// a free-index stack under a short lock; neither touches the heap.
///
/// # Example
///
/// ```rust
/// use densefsm::{Event, FsmPool, State, TransitionTable};
///
/// let table = TransitionTable::new([(0u32, 0u32, 1u32)]).into_shared();
/// let pool: FsmPool = FsmPool::new(2, State::new(0), table);
///
/// let a = pool.allocate().unwrap();
/// let b = pool.allocate().unwrap();
/// assert!(pool.allocate().is_none());
///
/// assert!(a.trigger(Event::new(0)));
/// pool.release(a);
/// drop(b);
/// assert_eq!(pool.allocated_count(), 0);
/// ```
pub struct FsmPool<D = (), A = ()> {
    slots: Box<[Fsm<D, A>]>,
    free: Mutex<Vec<usize>>,
    allocated: AtomicUsize,
    initial: State,
    table: Arc<TransitionTable<D, A>>,
}

impl<D: Default, A> FsmPool<D, A> {
    /// Create a pool of `capacity` instances starting in `initial`.
    pub fn new(capacity: usize, initial: State, table: Arc<TransitionTable<D, A>>) -> Self {
        Self::with_config(&PoolConfig::new(capacity, initial), table)
    }

    /// Create a pool from `config` with default user data.
    pub fn with_config(config: &PoolConfig, table: Arc<TransitionTable<D, A>>) -> Self {
        Self::with_data(config, table, |_| D::default())
    }
}

impl<D, A> FsmPool<D, A> {
    /// Create a pool from `config`, building each slot's user data with
    /// `data(index)`.
    pub fn with_data<F>(config: &PoolConfig, table: Arc<TransitionTable<D, A>>, mut data: F) -> Self
    where
        F: FnMut(usize) -> D,
    {
        let slots: Box<[Fsm<D, A>]> = (0..config.capacity)
            .map(|index| {
                Fsm::with_data(
                    config.instance_id(index),
                    config.initial_state,
                    Arc::clone(&table),
                    data(index),
                )
            })
            .collect();

        // Reversed so the lowest index is handed out first.
        let mut free = Vec::with_capacity(config.capacity);
        free.extend((0..config.capacity).rev());

        tracing::debug!(
            capacity = config.capacity,
            initial = %config.initial_state,
            prefix = %config.id_prefix,
            "built fsm pool"
        );

        Self {
            slots,
            free: Mutex::new(free),
            allocated: AtomicUsize::new(0),
            initial: config.initial_state,
            table,
        }
    }

    /// Check out a free instance, or `None` if every slot is in use.
    ///
    /// The most recently released slot is reused first.
    pub fn allocate(&self) -> Option<PooledFsm<'_, D, A>> {
        let index = {
            let mut free = self.free.lock();
            let index = free.pop();
            if index.is_some() {
                self.allocated.fetch_add(1, Ordering::AcqRel);
            }
            index
        };

        match index {
            Some(index) => Some(PooledFsm { pool: self, index }),
            None => {
                tracing::debug!(capacity = self.slots.len(), "fsm pool exhausted");
                None
            }
        }
    }

    /// Return an instance to the pool.
    ///
    /// Equivalent to dropping the handle. The instance is reset to the
    /// pool's initial state; its user data is left as the last holder
    /// left it.
    pub fn release(&self, handle: PooledFsm<'_, D, A>) {
        drop(handle);
    }

    fn release_slot(&self, index: usize) {
        self.slots[index].reset(self.initial);

        let mut free = self.free.lock();
        debug_assert!(!free.contains(&index), "pool slot {index} released twice");
        free.push(index);
        self.allocated.fetch_sub(1, Ordering::AcqRel);
    }

    /// Number of instances currently checked out.
    pub fn allocated_count(&self) -> usize {
        self.allocated.load(Ordering::Acquire)
    }

    /// Number of instances available for allocation.
    pub fn free_count(&self) -> usize {
        self.free.lock().len()
    }

    /// Total number of instances.
    pub fn size(&self) -> usize {
        self.slots.len()
    }

    /// The state instances start in and return to on release.
    pub fn initial_state(&self) -> State {
        self.initial
    }

    /// The table shared by every instance.
    pub fn table(&self) -> &Arc<TransitionTable<D, A>> {
        &self.table
    }
}

impl<D, A> fmt::Debug for FsmPool<D, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FsmPool")
            .field("size", &self.size())
            .field("allocated", &self.allocated_count())
            .field("initial", &self.initial)
            .finish_non_exhaustive()
    }
}

/// A checked-out pool instance.
///
/// Dereferences to the [`Fsm`] in the pool's storage. The slot returns to
/// the pool when the handle is dropped or passed to [`FsmPool::release`];
/// since the handle is consumed, a slot cannot be released twice.
#[must_use = "dropping the handle immediately returns the instance to the pool"]
pub struct PooledFsm<'p, D = (), A = ()> {
    pool: &'p FsmPool<D, A>,
    index: usize,
}

impl<D, A> PooledFsm<'_, D, A> {
    /// Position of the instance in pool storage.
    pub fn index(&self) -> usize {
        self.index
    }
}

impl<D, A> Deref for PooledFsm<'_, D, A> {
    type Target = Fsm<D, A>;

    fn deref(&self) -> &Self::Target {
        &self.pool.slots[self.index]
    }
}

impl<D, A> Drop for PooledFsm<'_, D, A> {
    fn drop(&mut self) {
        self.pool.release_slot(self.index);
    }
}

impl<D, A> fmt::Debug for PooledFsm<'_, D, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PooledFsm")
            .field("index", &self.index)
            .field("id", &self.id())
            .field("state", &self.current_state())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Event, Transition};
    use std::collections::HashSet;

    const IDLE: State = State::new(0);
    const RUNNING: State = State::new(1);
    const STOPPED: State = State::new(2);

    const START: Event = Event::new(0);
    const STOP: Event = Event::new(1);

    fn table<D>() -> Arc<TransitionTable<D>> {
        TransitionTable::new([
            Transition::new(IDLE, START, RUNNING),
            Transition::new(RUNNING, STOP, STOPPED),
        ])
        .into_shared()
    }

    #[test]
    fn fresh_pool_is_entirely_free() {
        let pool: FsmPool = FsmPool::new(10, IDLE, table());
        assert_eq!(pool.size(), 10);
        assert_eq!(pool.allocated_count(), 0);
        assert_eq!(pool.free_count(), 10);
    }

    #[test]
    fn eleventh_allocation_of_ten_fails() {
        let pool: FsmPool = FsmPool::new(10, IDLE, table());
        let handles: Vec<_> = (0..11).map(|_| pool.allocate()).collect();

        assert_eq!(handles.iter().filter(|h| h.is_some()).count(), 10);
        assert!(handles[10].is_none());
        assert_eq!(pool.allocated_count(), 10);
        assert_eq!(pool.free_count(), 0);
    }

    #[test]
    fn release_then_reallocate_succeeds() {
        let pool: FsmPool = FsmPool::new(10, IDLE, table());
        let mut handles: Vec<_> = (0..10).filter_map(|_| pool.allocate()).collect();
        assert!(pool.allocate().is_none());

        let released = handles.pop().unwrap();
        let index = released.index();
        pool.release(released);
        assert_eq!(pool.allocated_count(), 9);

        let again = pool.allocate().expect("slot was released");
        assert_eq!(again.index(), index);
        assert_eq!(pool.allocated_count() + pool.free_count(), pool.size());
    }

    #[test]
    fn handles_are_distinct_slots() {
        let pool: FsmPool = FsmPool::new(16, IDLE, table());
        let handles: Vec<_> = (0..16).filter_map(|_| pool.allocate()).collect();
        let indices: HashSet<usize> = handles.iter().map(|h| h.index()).collect();
        let ids: HashSet<&str> = handles.iter().map(|h| h.id()).collect();
        assert_eq!(indices.len(), 16);
        assert_eq!(ids.len(), 16);
    }

    #[test]
    fn lowest_index_is_handed_out_first() {
        let pool: FsmPool = FsmPool::new(4, IDLE, table());
        let first = pool.allocate().unwrap();
        assert_eq!(first.index(), 0);
        assert_eq!(first.id(), "fsm-0");
    }

    #[test]
    fn drop_returns_slot() {
        let pool: FsmPool = FsmPool::new(1, IDLE, table());
        {
            let _handle = pool.allocate().unwrap();
            assert!(pool.allocate().is_none());
        }
        assert_eq!(pool.allocated_count(), 0);
        assert!(pool.allocate().is_some());
    }

    #[test]
    fn released_instance_is_reset_to_initial_state() {
        let pool: FsmPool = FsmPool::new(1, IDLE, table());
        let handle = pool.allocate().unwrap();
        assert!(handle.trigger(START));
        assert!(handle.trigger(STOP));
        assert_eq!(handle.current_state(), STOPPED);
        pool.release(handle);

        let handle = pool.allocate().unwrap();
        assert_eq!(handle.current_state(), IDLE);
    }

    #[test]
    fn instances_share_the_pool_table() {
        let pool: FsmPool = FsmPool::new(2, IDLE, table());
        let a = pool.allocate().unwrap();
        let b = pool.allocate().unwrap();
        assert!(Arc::ptr_eq(a.table(), b.table()));
        assert!(Arc::ptr_eq(a.table(), pool.table()));

        assert!(a.trigger(START));
        assert_eq!(b.current_state(), IDLE);
    }

    #[test]
    fn with_data_builds_per_slot_data() {
        let config = PoolConfig::new(3, IDLE).with_id_prefix("worker");
        let pool: FsmPool<usize> = FsmPool::with_data(&config, table(), |index| index * 10);
        let handles: Vec<_> = (0..3).filter_map(|_| pool.allocate()).collect();
        for handle in &handles {
            assert_eq!(*handle.data(), handle.index() * 10);
            assert_eq!(handle.id(), format!("worker-{}", handle.index()));
        }
    }

    #[test]
    fn zero_capacity_pool_is_always_exhausted() {
        let pool: FsmPool = FsmPool::new(0, IDLE, table());
        assert!(pool.allocate().is_none());
        assert_eq!(pool.size(), 0);
    }
}
