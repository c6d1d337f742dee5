//! Infrastructure layer: in-memory registry, outbound queues and wire DTOs.

pub mod dto;
pub mod message_pusher;
pub mod repository;
