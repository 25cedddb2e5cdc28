//! Makcik Core - Shared ordering types.
//!
//! This crate provides the types used across all Makcik Kitchen components:
//! - `ordering` - Session state machine, cart manager and controller
//! - `cli` - Terminal front end
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no timers,
//! no logging. Field validation and cart arithmetic live here so they can be
//! checked in isolation.
//!
//! # Modules
//!
//! - [`types`] - Amounts, customer records, line items, carts, menus, and
//!   the registration field validator

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
