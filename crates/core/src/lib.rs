//! Functional core for the itemstore API.
//!
//! Everything in this crate is pure: key derivation, the item model, the error
//! taxonomy and its HTTP mapping, the error envelope, and the storage contracts
//! implemented by the backends in the `itemstore` crate.

pub mod envelope;
pub mod item;
pub mod keys;
pub mod storage;
