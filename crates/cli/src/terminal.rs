//! Terminal renderer.
//!
//! Draws each [`SessionView`] to stdout, either as a text page or as one JSON
//! object per line.

use std::fmt::Write as _;
use std::io::Write as _;

use makcik_core::FieldStatus;
use makcik_ordering::{Notice, Phase, Renderer, SessionView};
use tracing::warn;

/// Output format for rendered views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Text,
    Json,
}

/// Renders views to stdout.
#[derive(Debug)]
pub struct TerminalRenderer {
    mode: Mode,
}

impl TerminalRenderer {
    #[must_use]
    pub const fn new(mode: Mode) -> Self {
        Self { mode }
    }
}

impl Renderer for TerminalRenderer {
    fn render(&mut self, view: &SessionView) {
        let out = match self.mode {
            Mode::Text => page(view),
            Mode::Json => match serde_json::to_string(view) {
                Ok(json) => json + "\n",
                Err(e) => {
                    warn!("Failed to serialize view: {e}");
                    return;
                }
            },
        };

        let mut stdout = std::io::stdout().lock();
        if let Err(e) = stdout.write_all(out.as_bytes()).and_then(|()| stdout.flush()) {
            warn!("Failed to write view: {e}");
        }
    }
}

/// Text rendering of a whole page.
#[must_use]
pub fn page(view: &SessionView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n==== Makcik Kitchen [{}] ====", view.phase);

    if view.phase == Phase::Unregistered {
        registration(&mut out, view);
    } else if let Some(customer) = &view.customer {
        let _ = writeln!(out, "Ordering for {}", customer.name);
        let _ = writeln!(out, "  {} / {}", customer.email, customer.phone);
        let _ = writeln!(out, "  {}", customer.address);
        order_form(&mut out, view);
        cart(&mut out, view);
    } else {
        let _ = writeln!(out, "Preparing your order form...");
    }

    if let Some(summary) = &view.summary {
        let _ = writeln!(out, "---- Review your order ----");
        let _ = writeln!(out, "Customer: {}", summary.customer.full_name());
        let _ = writeln!(out, "Email:    {}", summary.customer.email());
        let _ = writeln!(out, "Phone:    {}", summary.customer.phone());
        let _ = writeln!(out, "Address:  {}", summary.customer.address());
        for line in &summary.lines {
            let _ = writeln!(
                out,
                "  {} x{}  {}",
                line.name,
                line.quantity,
                view.format(line.line_total)
            );
        }
        let _ = writeln!(out, "Order type:   {}", summary.order_type);
        let _ = writeln!(out, "Subtotal:     {}", view.format(summary.totals.subtotal));
        let _ = writeln!(out, "Delivery fee: {}", view.format(summary.totals.delivery_fee));
        let _ = writeln!(out, "Total:        {}", view.format(summary.totals.grand_total));
        let _ = writeln!(out, "`confirm` to send, `cancel` to keep editing");
    }

    if let Some(notice) = &view.notice {
        let _ = writeln!(out, "** {} **", notice_text(notice, view));
    }

    out
}

fn registration(out: &mut String, view: &SessionView) {
    let _ = writeln!(out, "Register to order (type `help` for commands)");
    for (field, status) in &view.field_feedback {
        let mark = match status {
            FieldStatus::Accepted => "ok",
            FieldStatus::Rejected => "invalid",
        };
        let _ = writeln!(out, "  {field}: {mark}");
    }
}

fn order_form(out: &mut String, view: &SessionView) {
    let selection = view
        .draft
        .selection
        .as_ref()
        .map_or("-- Select an item --", |item| item.name.as_str());
    let _ = writeln!(
        out,
        "Item: {selection}  Qty: {}  Total: {}",
        view.draft.quantity,
        view.format(view.preview_total)
    );
    if !view.draft.notes.is_empty() {
        let _ = writeln!(out, "  Notes: {}", view.draft.notes);
    }
}

fn cart(out: &mut String, view: &SessionView) {
    if view.cart_is_empty() {
        let _ = writeln!(out, "Your order is empty");
    } else {
        let _ = writeln!(out, "Your order ({} items):", view.item_count);
        for line in &view.lines {
            let _ = writeln!(
                out,
                "  {} x{} @ {}  {}",
                line.name,
                line.quantity,
                view.format(line.unit_price),
                view.format(line.line_total)
            );
            if let Some(notes) = &line.notes {
                let _ = writeln!(out, "    Notes: {notes}");
            }
        }
    }
    let _ = writeln!(out, "Order type:   {}", view.order_type);
    let _ = writeln!(out, "Subtotal:     {}", view.format(view.totals.subtotal));
    let _ = writeln!(out, "Delivery fee: {}", view.format(view.totals.delivery_fee));
    let _ = writeln!(out, "Total:        {}", view.format(view.totals.grand_total));
}

fn notice_text(notice: &Notice, view: &SessionView) -> String {
    match notice {
        Notice::RegistrationSucceeded => "Registration successful!".to_string(),
        Notice::RegistrationFailed { fields } => {
            let names: Vec<String> = fields.iter().map(ToString::to_string).collect();
            format!("Please fix: {}", names.join(", "))
        }
        Notice::ItemAdded { name, quantity } => format!("Added {quantity} x {name} to your order"),
        Notice::EmptyCart => "Your cart is empty! (`ok` to dismiss)".to_string(),
        Notice::OrderSubmitted { order } => format!(
            "Order {} sent to the restaurant. Total {}",
            order.short_reference(),
            view.format(order.grand_total())
        ),
        Notice::Rejected { message } => message.clone(),
    }
}
