//! Wire contracts shared between the UPTD PAL web client and its backend,
//! plus the pure domain rules both sides agree on.

pub mod domain;
pub mod shared;
pub mod system;
