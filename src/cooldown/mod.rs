//! Cooldown tracking
//!
//! Two independent throttling axes, user-scoped and guild-scoped, each
//! optional per command. Expiry timestamps live only in the external
//! [`CooldownStore`]; the gate never caches them, so every dispatch
//! re-reads the store.

mod clock;
mod gate;
mod memory;
mod store;

pub use clock::{Clock, SystemClock};
pub use gate::CooldownGate;
pub use memory::MemoryCooldownStore;
pub use store::{CooldownAxis, CooldownStore, StoreError};
