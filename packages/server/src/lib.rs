//! Real-time collaborative whiteboard server.
//!
//! Peers connected to the same named room exchange drawing events over
//! WebSocket. The server keeps each room's authoritative replay log so that
//! a peer joining mid-session sees everything drawn so far.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
