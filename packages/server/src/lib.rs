//! Quorum decision-room server library.
//!
//! Participants connect over WebSocket, register a display name, form
//! ad-hoc rooms around a decision problem, and share free-text decisions
//! with the rest of the room in near real time.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
