//! Session repository implementations.
//!
//! Currently in-memory only; the server deliberately keeps no state
//! across restarts.

pub mod inmemory;

pub use inmemory::InMemorySessionRepository;
