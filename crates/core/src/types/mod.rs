//! Core types for Makcik Kitchen ordering.
//!
//! This module provides type-safe wrappers for the ordering domain: amounts,
//! customers, line items, the cart, and the menu.

pub mod amount;
pub mod cart;
pub mod customer;
pub mod line_item;
pub mod menu;
pub mod order_type;
pub mod validation;

pub use amount::{Amount, CURRENCY_SYMBOL};
pub use cart::{Cart, grand_total, line_total, subtotal};
pub use customer::{CustomerRecord, RegistrationForm, ValidationError};
pub use line_item::{DEFAULT_MAX_QUANTITY, LineItemDraft, LineItemError, OrderLineItem};
pub use menu::{Menu, MenuItem};
pub use order_type::{DEFAULT_DELIVERY_FEE, OrderType, UnknownOrderType};
pub use validation::{
    Field, FieldKind, FieldStatus, UnknownField, feedback, is_valid_address, is_valid_email,
    is_valid_name, is_valid_phone,
};
