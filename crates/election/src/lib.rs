//! Bully election engine.
//!
//! This crate provides the synchronous election state machine that can
//! be driven by both the deterministic simulation and the live runner.
//!
//! # Architecture
//!
//! The engine processes events synchronously:
//!
//! - `Event::ElectionRequested` → probe live superiors, or claim victory
//! - `Event::ElectionReceived` → silence the challenger, campaign upward
//! - `Event::OkReceived` → concede to the outranking responder
//! - `Event::CoordinatorReceived` → record the leader and terminate
//!
//! All I/O is performed by the runner via returned `Action`s.

mod engine;

pub use engine::ElectionState;
