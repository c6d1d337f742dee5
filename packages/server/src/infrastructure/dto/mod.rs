//! Data Transfer Objects (DTOs) for the whiteboard server.
//!
//! DTOs are organized by protocol:
//! - `websocket`: WebSocket message DTOs and inbound classification
//! - `http`: HTTP API response DTOs

pub mod conversion;
pub mod http;
pub mod websocket;
