//! Fixed-capacity instance pooling.
//!
//! An [`FsmPool`] preallocates every instance up front and hands out
//! [`PooledFsm`] handles that borrow a slot and give it back on drop, so a
//! running system creates and retires machines without heap traffic.

mod config;
mod slab;

pub use config::PoolConfig;
pub use slab::{FsmPool, PooledFsm};
