//! # Game Rules
//!
//! The entities a dialogue interpreter talks about but does not own: characters,
//! the items they carry, and the gameplay signals that can end an exchange.
//! This crate holds no conversation logic.

pub mod entities;
pub mod items;
pub mod mechanics;

pub use entities::*;
pub use items::*;
pub use mechanics::*;
