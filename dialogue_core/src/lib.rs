//! # Dialogue Core
//!
//! Branching NPC dialogue. Conversation trees are loaded from a data source,
//! an entry point is chosen from live game state, and the tree is walked one
//! player choice at a time, triggering combat or trading along the way.
//!
//! ## Core Components
//!
//! - **line**: dialogue nodes and the condition/action vocabularies
//! - **builder**: turns flat per-NPC line records into trees
//! - **registry**: each NPC's entry points, loaded once at startup
//! - **condition**: decides which entry point applies
//! - **action**: routes line actions to combat and trading
//! - **session**: the interactive traversal state machine
//! - **channel**: message output and response input

pub mod action;
pub mod builder;
pub mod channel;
pub mod condition;
pub mod config;
pub mod error;
pub mod line;
pub mod registry;
pub mod session;

pub use action::*;
pub use builder::*;
pub use channel::*;
pub use condition::*;
pub use config::*;
pub use error::*;
pub use line::*;
pub use registry::*;
pub use session::*;
