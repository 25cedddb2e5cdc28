//! Makcik Ordering - Session state machine and controller.
//!
//! One customer, one in-memory session. The customer registers, builds a
//! cart, reviews the order summary, and either confirms (the order is
//! "sent" and the cart emptied) or goes back to editing.
//!
//! # Architecture
//!
//! - [`session`] - The phase state machine and cart operations, no I/O
//! - [`controller`] - Applies [`Command`]s and timer events, renders after each change
//! - [`timer`] - Injectable single-shot timers (tokio-backed or manual)
//! - [`render`] - The [`SessionView`] projection handed to front ends
//! - [`config`] - Fees, delays and bounds from environment variables
//!
//! # Example
//!
//! ```
//! use makcik_core::{LineItemDraft, RegistrationForm};
//! use makcik_ordering::{Phase, Session};
//!
//! let mut session = Session::default();
//! session
//!     .register(RegistrationForm {
//!         first_name: "Ana".into(),
//!         last_name: "Cruz".into(),
//!         email: "ana@example.com".into(),
//!         phone: "09171234567".into(),
//!         address: "12 Mabini Street".into(),
//!     })
//!     .unwrap();
//! session.add_item(LineItemDraft::new("Teh Tarik", 45, 2)).unwrap();
//! session.finalize_order().unwrap();
//! let order = session.confirm_order().unwrap();
//!
//! assert_eq!(order.grand_total().to_string(), "₱140");
//! assert_eq!(session.phase(), Phase::Registered);
//! assert!(session.cart().is_empty());
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod command;
pub mod config;
pub mod controller;
pub mod draft;
pub mod error;
pub mod render;
pub mod session;
pub mod summary;
pub mod timer;

pub use command::Command;
pub use config::{ConfigError, OrderingConfig};
pub use controller::{OrderController, Outcome};
pub use draft::OrderDraft;
pub use error::OrderError;
pub use render::{CustomerDetails, Notice, NullRenderer, Renderer, SessionView};
pub use session::{Phase, Session};
pub use summary::{OrderSummary, SubmittedOrder, SummaryLine, Totals};
pub use timer::{FiredTimer, ManualTimer, Timer, TimerEvent, TimerId, TokioTimer};
