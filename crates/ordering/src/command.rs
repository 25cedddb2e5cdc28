//! Commands accepted by the controller.
//!
//! One variant per thing the customer can do. Front ends translate their own
//! input (form submits, key presses, terminal lines) into these.

use makcik_core::{Field, LineItemDraft, OrderType, RegistrationForm};

/// A customer action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// A registration field changed; updates live feedback only.
    EditField { field: Field, value: String },
    /// Register with the fields entered through `EditField`.
    SubmitRegistration,
    /// Register with a complete form.
    Register(RegistrationForm),
    /// Choose a dish by name, or `None` for the placeholder option.
    SelectItem(Option<String>),
    SetQuantity(i64),
    SetNotes(String),
    /// Add the order form's current contents to the cart.
    SubmitItem,
    /// Add a line directly, bypassing the order form.
    AddItem(LineItemDraft),
    SetOrderType(OrderType),
    ClearCart,
    FinalizeOrder,
    ConfirmOrder,
    CloseModal,
    DismissNotice,
    Quit,
}

impl Command {
    /// Short name for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::EditField { .. } => "edit_field",
            Self::SubmitRegistration => "submit_registration",
            Self::Register(_) => "register",
            Self::SelectItem(_) => "select_item",
            Self::SetQuantity(_) => "set_quantity",
            Self::SetNotes(_) => "set_notes",
            Self::SubmitItem => "submit_item",
            Self::AddItem(_) => "add_item",
            Self::SetOrderType(_) => "set_order_type",
            Self::ClearCart => "clear_cart",
            Self::FinalizeOrder => "finalize_order",
            Self::ConfirmOrder => "confirm_order",
            Self::CloseModal => "close_modal",
            Self::DismissNotice => "dismiss_notice",
            Self::Quit => "quit",
        }
    }
}
