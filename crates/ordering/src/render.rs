//! Render collaborator boundary.
//!
//! The controller hands a [`SessionView`] to its [`Renderer`] after every
//! change. The view is a plain projection of state: a renderer never needs
//! to call back into the controller.

use std::collections::BTreeMap;

use makcik_core::{Amount, CustomerRecord, Field, FieldStatus, OrderType};
use serde::Serialize;

use crate::draft::OrderDraft;
use crate::error::OrderError;
use crate::session::Phase;
use crate::summary::{OrderSummary, SubmittedOrder, SummaryLine, Totals};

/// Customer details shown next to the order form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

impl From<&CustomerRecord> for CustomerDetails {
    fn from(record: &CustomerRecord) -> Self {
        Self {
            name: record.full_name(),
            email: record.email().to_owned(),
            phone: record.phone().to_owned(),
            address: record.address().to_owned(),
        }
    }
}

/// Transient message for the customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    RegistrationSucceeded,
    RegistrationFailed { fields: Vec<Field> },
    ItemAdded { name: String, quantity: u32 },
    /// Blocking: the customer must acknowledge it.
    EmptyCart,
    OrderSubmitted { order: SubmittedOrder },
    Rejected { message: String },
}

impl Notice {
    /// Notice for a failed command, or `None` if it should pass silently.
    #[must_use]
    pub fn for_error(err: &OrderError) -> Option<Self> {
        match err {
            OrderError::InvalidSelection => None,
            OrderError::EmptyCart => Some(Self::EmptyCart),
            OrderError::Validation(v) => Some(Self::RegistrationFailed {
                fields: v.fields().to_vec(),
            }),
            other => Some(Self::Rejected {
                message: other.to_string(),
            }),
        }
    }
}

/// Everything a front end needs to draw the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionView {
    pub phase: Phase,
    /// False until the registration handoff fires.
    pub order_form_visible: bool,
    /// Present once the order form is visible.
    pub customer: Option<CustomerDetails>,
    pub lines: Vec<SummaryLine>,
    pub item_count: u64,
    pub order_type: OrderType,
    pub totals: Totals,
    pub draft: OrderDraft,
    pub preview_total: Amount,
    /// Live accepted/rejected state of registration fields edited so far.
    pub field_feedback: BTreeMap<Field, FieldStatus>,
    /// Present while confirming.
    pub summary: Option<OrderSummary>,
    pub notice: Option<Notice>,
    pub currency_symbol: String,
}

impl SessionView {
    /// Format an amount with this view's currency symbol.
    #[must_use]
    pub fn format(&self, amount: Amount) -> String {
        amount.display_with(&self.currency_symbol)
    }

    #[must_use]
    pub fn cart_is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Receives a fresh view after every state change.
pub trait Renderer {
    fn render(&mut self, view: &SessionView);
}

impl<F> Renderer for F
where
    F: FnMut(&SessionView),
{
    fn render(&mut self, view: &SessionView) {
        self(view);
    }
}

/// Renderer that discards every view.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _view: &SessionView) {}
}
