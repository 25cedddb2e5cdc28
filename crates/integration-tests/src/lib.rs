//! Integration tests for Makcik Kitchen ordering.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p makcik-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `ordering_flow` - Register, build a cart, review and confirm
//! - `validation` - Registration field rules
//! - `timers` - Order form handoff and notice dismissal, manual and tokio clocks
//!
//! Shared fixtures live here so every test file builds sessions the same way.

use makcik_core::{Amount, Menu, MenuItem, RegistrationForm};
use makcik_ordering::{ManualTimer, OrderController, OrderingConfig, Renderer, SessionView};

/// Renderer that keeps every view it receives.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub views: Vec<SessionView>,
}

impl RecordingRenderer {
    /// The most recent view, if anything has been rendered.
    #[must_use]
    pub fn last(&self) -> Option<&SessionView> {
        self.views.last()
    }
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, view: &SessionView) {
        self.views.push(view.clone());
    }
}

/// A registration form that passes every rule.
#[must_use]
pub fn sample_form() -> RegistrationForm {
    RegistrationForm {
        first_name: "Ana".to_string(),
        last_name: "Cruz".to_string(),
        email: "ana.cruz@example.com".to_string(),
        phone: "09171234567".to_string(),
        address: "12 Mabini Street, Manila".to_string(),
    }
}

/// Three dishes with round prices.
#[must_use]
pub fn sample_menu() -> Menu {
    Menu::new(vec![
        MenuItem::new("Nasi Lemak", Amount::new(120)),
        MenuItem::new("Teh Tarik", Amount::new(45)),
        MenuItem::new("Cendol", Amount::new(70)),
    ])
}

/// Controller with default config, the sample menu and a manual clock.
#[must_use]
pub fn controller() -> OrderController<RecordingRenderer, ManualTimer> {
    OrderController::new(
        OrderingConfig::default(),
        sample_menu(),
        RecordingRenderer::default(),
        ManualTimer::new(),
    )
}
