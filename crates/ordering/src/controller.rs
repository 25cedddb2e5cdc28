//! The ordering controller.
//!
//! Owns the [`Session`] plus everything the page shows around it (order form
//! contents, live field feedback, notices, the open summary) and is the only
//! thing that mutates any of it. Input arrives as [`Command`]s and
//! [`FiredTimer`]s; after each change the [`Renderer`] receives a fresh
//! [`SessionView`].
//!
//! Commands are applied one at a time and run to completion, so there is no
//! interleaving to reason about.

use std::collections::BTreeMap;
use std::time::Duration;

use makcik_core::{Field, FieldStatus, LineItemDraft, Menu, RegistrationForm, feedback};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

use crate::command::Command;
use crate::config::OrderingConfig;
use crate::draft::OrderDraft;
use crate::error::{OrderError, Result};
use crate::render::{CustomerDetails, Notice, Renderer, SessionView};
use crate::session::Session;
use crate::summary::{OrderSummary, SubmittedOrder, SummaryLine};
use crate::timer::{FiredTimer, ManualTimer, Timer, TimerEvent, TimerId};

/// What a successful command produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// State changed; nothing else to report.
    Updated,
    /// Customer registered; the order form follows after the handoff delay.
    Registered(CustomerDetails),
    /// Confirmation step opened.
    Summary(OrderSummary),
    /// Order submitted and cart cleared.
    Submitted(SubmittedOrder),
    /// Controller torn down.
    Quit,
}

/// Applies commands to one ordering session.
#[derive(Debug)]
pub struct OrderController<R, T> {
    config: OrderingConfig,
    menu: Menu,
    session: Session,
    registration: RegistrationForm,
    field_feedback: BTreeMap<Field, FieldStatus>,
    draft: OrderDraft,
    order_form_visible: bool,
    summary: Option<OrderSummary>,
    notice: Option<Notice>,
    handoff_timer: Option<TimerId>,
    notice_timer: Option<TimerId>,
    renderer: R,
    timer: T,
}

impl<R: Renderer, T: Timer> OrderController<R, T> {
    #[must_use]
    pub fn new(config: OrderingConfig, menu: Menu, renderer: R, timer: T) -> Self {
        Self {
            session: Session::new(&config),
            config,
            menu,
            registration: RegistrationForm::default(),
            field_feedback: BTreeMap::new(),
            draft: OrderDraft::default(),
            order_form_visible: false,
            summary: None,
            notice: None,
            handoff_timer: None,
            notice_timer: None,
            renderer,
            timer,
        }
    }

    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub const fn config(&self) -> &OrderingConfig {
        &self.config
    }

    #[must_use]
    pub const fn menu(&self) -> &Menu {
        &self.menu
    }

    #[must_use]
    pub const fn renderer(&self) -> &R {
        &self.renderer
    }

    pub const fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }

    /// Current projection of the whole page.
    #[must_use]
    pub fn view(&self) -> SessionView {
        let cart = self.session.cart();
        SessionView {
            phase: self.session.phase(),
            order_form_visible: self.order_form_visible,
            customer: self
                .session
                .customer()
                .filter(|_| self.order_form_visible)
                .map(CustomerDetails::from),
            lines: cart.items().iter().map(SummaryLine::from).collect(),
            item_count: cart.item_count(),
            order_type: self.session.order_type(),
            totals: self.session.totals(),
            draft: self.draft.clone(),
            preview_total: self.draft.preview_total(),
            field_feedback: self.field_feedback.clone(),
            summary: self.summary.clone(),
            notice: self.notice.clone(),
            currency_symbol: self.config.currency_symbol.clone(),
        }
    }

    /// Render the current view without changing anything.
    pub fn refresh(&mut self) {
        let view = self.view();
        self.renderer.render(&view);
    }

    /// Apply one command, then render.
    ///
    /// Failed commands change nothing in the session. Unless the failure is
    /// silent (placeholder selection) a notice describing it is shown.
    ///
    /// # Errors
    ///
    /// Returns the [`OrderError`] that rejected the command.
    #[instrument(skip(self, command), fields(command = command.name()))]
    pub fn dispatch(&mut self, command: Command) -> Result<Outcome> {
        match self.apply(command) {
            Ok(Outcome::Quit) => Ok(Outcome::Quit),
            Ok(outcome) => {
                self.refresh();
                Ok(outcome)
            }
            Err(err) => {
                if let Some(notice) = Notice::for_error(&err) {
                    warn!(error = %err, "Command rejected");
                    self.set_notice(Some(notice));
                    self.refresh();
                } else {
                    debug!("Ignoring empty selection");
                }
                Err(err)
            }
        }
    }

    fn apply(&mut self, command: Command) -> Result<Outcome> {
        match command {
            Command::EditField { field, value } => {
                self.field_feedback.insert(field, feedback(field, &value));
                self.registration.set(field, value);
                Ok(Outcome::Updated)
            }
            Command::SubmitRegistration => {
                let form = self.registration.clone();
                self.register(form)
            }
            Command::Register(form) => self.register(form),
            Command::SelectItem(None) => {
                self.draft.selection = None;
                Ok(Outcome::Updated)
            }
            Command::SelectItem(Some(name)) => {
                let item = self
                    .menu
                    .find(&name)
                    .cloned()
                    .ok_or(OrderError::InvalidSelection)?;
                self.draft.selection = Some(item);
                Ok(Outcome::Updated)
            }
            Command::SetQuantity(quantity) => {
                self.draft.quantity = quantity;
                Ok(Outcome::Updated)
            }
            Command::SetNotes(notes) => {
                self.draft.notes = notes;
                Ok(Outcome::Updated)
            }
            Command::SubmitItem => {
                let draft = self
                    .draft
                    .to_line_draft()
                    .ok_or(OrderError::InvalidSelection)?;
                let outcome = self.add_item(draft)?;
                self.draft.reset();
                Ok(outcome)
            }
            Command::AddItem(draft) => self.add_item(draft),
            Command::SetOrderType(order_type) => {
                self.session.set_order_type(order_type)?;
                Ok(Outcome::Updated)
            }
            Command::ClearCart => {
                self.session.clear_cart()?;
                Ok(Outcome::Updated)
            }
            Command::FinalizeOrder => {
                let summary = self.session.finalize_order()?;
                self.set_notice(None);
                self.summary = Some(summary.clone());
                Ok(Outcome::Summary(summary))
            }
            Command::ConfirmOrder => {
                let order = self.session.confirm_order()?;
                self.summary = None;
                self.set_notice(Some(Notice::OrderSubmitted {
                    order: order.clone(),
                }));
                Ok(Outcome::Submitted(order))
            }
            Command::CloseModal => {
                self.session.close_modal()?;
                self.summary = None;
                Ok(Outcome::Updated)
            }
            Command::DismissNotice => {
                self.set_notice(None);
                Ok(Outcome::Updated)
            }
            Command::Quit => {
                self.teardown();
                Ok(Outcome::Quit)
            }
        }
    }

    fn register(&mut self, form: RegistrationForm) -> Result<Outcome> {
        let details = match self.session.register(form.clone()) {
            Ok(record) => CustomerDetails::from(record),
            Err(err) => {
                if matches!(err, OrderError::Validation(_)) {
                    for field in Field::ALL {
                        self.field_feedback
                            .insert(field, feedback(field, form.value(field)));
                    }
                }
                return Err(err);
            }
        };

        self.set_notice(Some(Notice::RegistrationSucceeded));
        let id = self
            .timer
            .schedule(self.config.handoff_delay, TimerEvent::RevealOrderForm);
        self.handoff_timer = Some(id);
        Ok(Outcome::Registered(details))
    }

    fn add_item(&mut self, draft: LineItemDraft) -> Result<Outcome> {
        let cart = self.session.add_item(draft)?;
        let notice = cart.items().last().map(|item| Notice::ItemAdded {
            name: item.name().to_owned(),
            quantity: item.quantity(),
        });

        self.set_notice(notice);
        let id = self
            .timer
            .schedule(self.config.notice_duration, TimerEvent::DismissItemNotice);
        self.notice_timer = Some(id);
        Ok(Outcome::Updated)
    }

    /// Replace the current notice, cancelling any pending auto-dismiss.
    fn set_notice(&mut self, notice: Option<Notice>) {
        if let Some(id) = self.notice_timer.take() {
            self.timer.cancel(id);
        }
        self.notice = notice;
    }

    /// Handle an elapsed timer, then render.
    ///
    /// Timers that were superseded or cancelled are ignored.
    #[instrument(skip(self), fields(timer = fired.id.as_u64()))]
    pub fn handle_timer(&mut self, fired: FiredTimer) {
        match fired.event {
            TimerEvent::RevealOrderForm if self.handoff_timer == Some(fired.id) => {
                self.handoff_timer = None;
                self.order_form_visible = true;
                if self.notice == Some(Notice::RegistrationSucceeded) {
                    self.notice = None;
                }
                info!("Order form ready");
            }
            TimerEvent::DismissItemNotice if self.notice_timer == Some(fired.id) => {
                self.notice_timer = None;
                if matches!(self.notice, Some(Notice::ItemAdded { .. })) {
                    self.notice = None;
                }
            }
            event => {
                debug!(?event, "Ignoring stale timer");
                return;
            }
        }
        self.refresh();
    }

    /// Cancel every pending timer.
    pub fn teardown(&mut self) {
        for id in [self.handoff_timer.take(), self.notice_timer.take()]
            .into_iter()
            .flatten()
        {
            self.timer.cancel(id);
        }
        debug!("Session torn down");
    }

    /// Process commands and timer events until the command stream ends or a
    /// [`Command::Quit`] arrives, then tear down.
    ///
    /// Renders once before the first command.
    pub async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<Command>,
        mut timers: mpsc::UnboundedReceiver<FiredTimer>,
    ) -> Self {
        self.refresh();
        loop {
            tokio::select! {
                command = commands.recv() => {
                    let Some(command) = command else { break };
                    if let Ok(Outcome::Quit) = self.dispatch(command) {
                        break;
                    }
                }
                Some(fired) = timers.recv() => self.handle_timer(fired),
            }
        }
        self.teardown();
        self
    }
}

impl<R: Renderer> OrderController<R, ManualTimer> {
    /// Advance the manual clock and handle everything that came due.
    ///
    /// Returns how many timers fired.
    pub fn advance(&mut self, by: Duration) -> usize {
        let fired = self.timer.advance(by);
        let count = fired.len();
        for timer in fired {
            self.handle_timer(timer);
        }
        count
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use makcik_core::{Amount, MenuItem, OrderType};

    use super::*;
    use crate::session::Phase;
    use crate::timer::TokioTimer;

    #[derive(Default)]
    struct Recorder(Vec<SessionView>);

    impl Renderer for Recorder {
        fn render(&mut self, view: &SessionView) {
            self.0.push(view.clone());
        }
    }

    fn menu() -> Menu {
        Menu::new(vec![
            MenuItem::new("Nasi Lemak", Amount::new(100)),
            MenuItem::new("Teh Tarik", Amount::new(50)),
        ])
    }

    fn controller() -> OrderController<Recorder, ManualTimer> {
        OrderController::new(
            OrderingConfig::default(),
            menu(),
            Recorder::default(),
            ManualTimer::new(),
        )
    }

    fn form() -> RegistrationForm {
        RegistrationForm {
            first_name: "Ana".to_string(),
            last_name: "Cruz".to_string(),
            email: "ana.cruz@example.com".to_string(),
            phone: "09171234567".to_string(),
            address: "12 Mabini Street, Manila".to_string(),
        }
    }

    fn last_view(c: &OrderController<Recorder, ManualTimer>) -> &SessionView {
        c.renderer().0.last().unwrap()
    }

    #[test]
    fn test_edit_field_gives_live_feedback() {
        let mut c = controller();
        c.dispatch(Command::EditField {
            field: Field::FirstName,
            value: "ana".to_string(),
        })
        .unwrap();
        assert_eq!(
            last_view(&c).field_feedback.get(&Field::FirstName),
            Some(&FieldStatus::Rejected)
        );

        c.dispatch(Command::EditField {
            field: Field::FirstName,
            value: "Ana".to_string(),
        })
        .unwrap();
        assert_eq!(
            last_view(&c).field_feedback.get(&Field::FirstName),
            Some(&FieldStatus::Accepted)
        );
        assert_eq!(c.session().phase(), Phase::Unregistered);
    }

    #[test]
    fn test_registration_handoff_after_delay() {
        let mut c = controller();
        let outcome = c.dispatch(Command::Register(form())).unwrap();
        assert!(matches!(outcome, Outcome::Registered(ref d) if d.name == "Ana Cruz"));

        let view = last_view(&c);
        assert_eq!(view.phase, Phase::Registered);
        assert!(!view.order_form_visible);
        assert!(view.customer.is_none());
        assert_eq!(view.notice, Some(Notice::RegistrationSucceeded));

        assert_eq!(c.advance(Duration::from_millis(1499)), 0);
        assert_eq!(c.advance(Duration::from_millis(1)), 1);

        let view = last_view(&c);
        assert!(view.order_form_visible);
        assert_eq!(view.customer.as_ref().unwrap().phone, "09171234567");
        assert_eq!(view.notice, None);
    }

    #[test]
    fn test_submit_registration_uses_edited_fields() {
        let mut c = controller();
        let form = form();
        for field in Field::ALL {
            c.dispatch(Command::EditField {
                field,
                value: form.value(field).to_string(),
            })
            .unwrap();
        }
        c.dispatch(Command::SubmitRegistration).unwrap();
        assert_eq!(c.session().phase(), Phase::Registered);
    }

    #[test]
    fn test_failed_registration_shows_notice() {
        let mut c = controller();
        let mut bad = form();
        bad.set(Field::Phone, "12345");

        let err = c.dispatch(Command::Register(bad)).unwrap_err();
        assert!(matches!(err, OrderError::Validation(_)));

        let view = last_view(&c);
        assert_eq!(view.phase, Phase::Unregistered);
        assert_eq!(
            view.notice,
            Some(Notice::RegistrationFailed {
                fields: vec![Field::Phone]
            })
        );
        assert_eq!(
            view.field_feedback.get(&Field::Phone),
            Some(&FieldStatus::Rejected)
        );
        assert_eq!(c.timer_mut().pending(), 0);
    }

    #[test]
    fn test_order_form_flow() {
        let mut c = controller();
        c.dispatch(Command::Register(form())).unwrap();

        c.dispatch(Command::SelectItem(Some("nasi lemak".to_string())))
            .unwrap();
        c.dispatch(Command::SetQuantity(2)).unwrap();
        assert_eq!(last_view(&c).preview_total, Amount::new(200));

        c.dispatch(Command::SetNotes("extra sambal".to_string()))
            .unwrap();
        c.dispatch(Command::SubmitItem).unwrap();

        let view = last_view(&c);
        assert_eq!(view.lines.len(), 1);
        assert_eq!(view.lines[0].notes.as_deref(), Some("extra sambal"));
        assert_eq!(view.draft, OrderDraft::default());
        assert_eq!(view.preview_total, Amount::ZERO);
        assert_eq!(
            view.notice,
            Some(Notice::ItemAdded {
                name: "Nasi Lemak".to_string(),
                quantity: 2
            })
        );
        assert_eq!(view.totals.grand_total, Amount::new(250));
    }

    #[test]
    fn test_placeholder_submit_is_silent() {
        let mut c = controller();
        c.dispatch(Command::Register(form())).unwrap();
        let renders = c.renderer().0.len();

        let err = c.dispatch(Command::SubmitItem).unwrap_err();
        assert_eq!(err, OrderError::InvalidSelection);
        assert_eq!(c.renderer().0.len(), renders);
        assert!(c.session().cart().is_empty());
    }

    #[test]
    fn test_item_notice_dismissed_after_delay() {
        let mut c = controller();
        c.dispatch(Command::Register(form())).unwrap();
        c.advance(Duration::from_millis(1500));

        c.dispatch(Command::AddItem(LineItemDraft::new("Teh Tarik", 50, 1)))
            .unwrap();
        c.advance(Duration::from_millis(2000));
        // A second add restarts the countdown
        c.dispatch(Command::AddItem(LineItemDraft::new("Teh Tarik", 50, 1)))
            .unwrap();
        c.advance(Duration::from_millis(2000));
        assert!(matches!(
            last_view(&c).notice,
            Some(Notice::ItemAdded { .. })
        ));

        c.advance(Duration::from_millis(1000));
        assert_eq!(last_view(&c).notice, None);
        assert_eq!(c.timer_mut().pending(), 0);
    }

    #[test]
    fn test_finalize_empty_cart_notice() {
        let mut c = controller();
        c.dispatch(Command::Register(form())).unwrap();

        assert_eq!(
            c.dispatch(Command::FinalizeOrder).unwrap_err(),
            OrderError::EmptyCart
        );
        let view = last_view(&c);
        assert_eq!(view.notice, Some(Notice::EmptyCart));
        assert_eq!(view.phase, Phase::Registered);
        assert!(view.summary.is_none());
    }

    #[test]
    fn test_finalize_confirm() {
        let mut c = controller();
        c.dispatch(Command::Register(form())).unwrap();
        c.dispatch(Command::AddItem(LineItemDraft::new("Nasi Lemak", 100, 2)))
            .unwrap();
        c.dispatch(Command::AddItem(LineItemDraft::new("Teh Tarik", 50, 1)))
            .unwrap();

        let Outcome::Summary(summary) = c.dispatch(Command::FinalizeOrder).unwrap() else {
            panic!("expected summary");
        };
        assert_eq!(summary.totals.grand_total, Amount::new(300));
        assert_eq!(last_view(&c).summary.as_ref(), Some(&summary));

        let Outcome::Submitted(order) = c.dispatch(Command::ConfirmOrder).unwrap() else {
            panic!("expected submitted order");
        };
        assert_eq!(order.grand_total(), Amount::new(300));

        let view = last_view(&c);
        assert_eq!(view.phase, Phase::Registered);
        assert!(view.cart_is_empty());
        assert!(view.summary.is_none());
        assert!(matches!(view.notice, Some(Notice::OrderSubmitted { .. })));
    }

    #[test]
    fn test_close_modal_keeps_cart() {
        let mut c = controller();
        c.dispatch(Command::Register(form())).unwrap();
        c.dispatch(Command::SetOrderType(OrderType::Pickup)).unwrap();
        c.dispatch(Command::AddItem(LineItemDraft::new("Nasi Lemak", 100, 1)))
            .unwrap();
        c.dispatch(Command::FinalizeOrder).unwrap();
        c.dispatch(Command::CloseModal).unwrap();

        let view = last_view(&c);
        assert_eq!(view.phase, Phase::Registered);
        assert_eq!(view.lines.len(), 1);
        assert_eq!(view.totals.grand_total, Amount::new(100));
    }

    #[test]
    fn test_wrong_phase_notice() {
        let mut c = controller();
        let err = c.dispatch(Command::ConfirmOrder).unwrap_err();
        assert!(matches!(err, OrderError::InvalidTransition { .. }));
        assert!(matches!(
            last_view(&c).notice,
            Some(Notice::Rejected { .. })
        ));
    }

    #[test]
    fn test_teardown_cancels_handoff() {
        let mut c = controller();
        c.dispatch(Command::Register(form())).unwrap();
        assert_eq!(c.dispatch(Command::Quit).unwrap(), Outcome::Quit);
        assert_eq!(c.advance(Duration::from_secs(5)), 0);
        assert!(!last_view(&c).order_form_visible);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_loop_with_tokio_timer() {
        let (timer, timer_rx) = TokioTimer::channel();
        let controller = OrderController::new(
            OrderingConfig::default(),
            menu(),
            Recorder::default(),
            timer,
        );
        let (tx, rx) = mpsc::unbounded_channel();

        let handle = tokio::spawn(async move {
            tx.send(Command::Register(form())).unwrap();
            tokio::time::sleep(Duration::from_millis(2000)).await;
            tx.send(Command::Quit).unwrap();
        });

        let controller = controller.run(rx, timer_rx).await;
        handle.await.unwrap();

        let views = &controller.renderer().0;
        assert!(views.last().unwrap().order_form_visible);
        assert_eq!(controller.session().phase(), Phase::Registered);
    }
}
