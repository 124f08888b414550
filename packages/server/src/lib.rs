// AstroMatch - API Core
//
// This crate provides the backend API for the AstroMatch dating app:
// multi-channel identity verification (password, Google, Facebook, phone),
// OTP challenges, JWT sessions, and zodiac matchmaking.
//
// Architecture follows domain-driven design; external collaborators
// (storage, delivery, OAuth introspection) sit behind kernel traits.

pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
