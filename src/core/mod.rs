//! # Core Console Logic
//!
//! This module contains the console's business logic.
//! It knows nothing about any specific UI technology or transport.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Console (state)      │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!                 ┌──────────────┴──────────────┐
//!                 ▼                             ▼
//!          ┌────────────┐                ┌────────────┐
//!          │    TUI     │                │   client   │
//!          │  Adapter   │                │  (reqwest) │
//!          │ (ratatui)  │                │            │
//!          └────────────┘                └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `Console` struct, all console state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`screen`]: The closed set of screens and their load requests
//! - [`content`]: What renderers produce
//! - [`form`]: Forms bound to a single controller action
//! - [`keyboard`]: The virtual keyboard session
//! - [`status`]: Status reply → overlay table
//! - [`registry`]: Screen → renderer table
//! - [`config`]: Settings and their override hierarchy

pub mod action;
pub mod config;
pub mod content;
pub mod form;
pub mod keyboard;
pub mod registry;
pub mod screen;
pub mod state;
pub mod status;
