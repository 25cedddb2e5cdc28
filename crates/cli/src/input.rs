//! Terminal input parsing.
//!
//! Each line typed during `makcik order` becomes at most one [`Command`].

use makcik_core::{Field, Menu, OrderType, RegistrationForm};
use makcik_ordering::Command;
use thiserror::Error;

pub const HELP: &str = "\
Registration
  register <first> <last> <email> <phone> <address...>
  first|last|email|phone <value>   edit one field (live feedback)
  address <text...>                edit the address
  submit                           register with the edited fields
Ordering
  menu                             show the menu
  select [<number>|<name>]         choose a dish (no argument or 0: none)
  qty <n>                          set the quantity
  notes [<text...>]                set special instructions
  add                              add the selection to the order
  type pickup|delivery             choose how to receive the order
  clear                            empty the cart
Checkout
  finalize                         review the order
  confirm                          send the order
  cancel                           close the review and keep editing
Other
  ok                               dismiss the current message
  help                             show this help
  quit                             leave
";

/// Errors that can occur while parsing a line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("unknown command: {0} (type `help`)")]
    UnknownCommand(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("not on the menu: {0}")]
    UnknownItem(String),

    #[error("not a whole number: {0}")]
    NotANumber(String),

    #[error(transparent)]
    OrderType(#[from] makcik_core::UnknownOrderType),
}

/// A parsed line.
#[derive(Debug, PartialEq, Eq)]
pub enum Input {
    Command(Command),
    ShowMenu,
    Help,
    Blank,
}

/// Parse one line of input.
///
/// # Errors
///
/// Returns an [`InputError`] describing what was wrong with the line.
pub fn parse(line: &str, menu: &Menu) -> Result<Input, InputError> {
    let line = line.trim();
    let (verb, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(verb, rest)| (verb, rest.trim()));

    let command = match verb.to_ascii_lowercase().as_str() {
        "" => return Ok(Input::Blank),
        "help" | "?" => return Ok(Input::Help),
        "menu" => return Ok(Input::ShowMenu),
        "register" => Command::Register(parse_registration(rest)?),
        "first" => edit(Field::FirstName, rest),
        "last" => edit(Field::LastName, rest),
        "email" => edit(Field::Email, rest),
        "phone" => edit(Field::Phone, rest),
        "address" => edit(Field::Address, rest),
        "submit" => Command::SubmitRegistration,
        "select" => Command::SelectItem(parse_selection(rest, menu)?),
        "qty" | "quantity" => Command::SetQuantity(parse_number(rest)?),
        "notes" | "note" => Command::SetNotes(rest.to_string()),
        "add" => Command::SubmitItem,
        "type" => Command::SetOrderType(rest.parse::<OrderType>()?),
        "clear" => Command::ClearCart,
        "finalize" | "checkout" => Command::FinalizeOrder,
        "confirm" => Command::ConfirmOrder,
        "cancel" | "close" | "back" => Command::CloseModal,
        "ok" | "dismiss" => Command::DismissNotice,
        "quit" | "exit" => Command::Quit,
        other => return Err(InputError::UnknownCommand(other.to_string())),
    };

    Ok(Input::Command(command))
}

fn edit(field: Field, value: &str) -> Command {
    Command::EditField {
        field,
        value: value.to_string(),
    }
}

fn parse_registration(rest: &str) -> Result<RegistrationForm, InputError> {
    const USAGE: &str = "register <first> <last> <email> <phone> <address...>";

    let mut parts = rest.splitn(5, char::is_whitespace);
    let mut next = || {
        parts
            .next()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .ok_or(InputError::Usage(USAGE))
    };

    Ok(RegistrationForm {
        first_name: next()?,
        last_name: next()?,
        email: next()?,
        phone: next()?,
        address: next()?,
    })
}

fn parse_selection(rest: &str, menu: &Menu) -> Result<Option<String>, InputError> {
    if rest.is_empty() {
        return Ok(None);
    }

    if let Ok(position) = rest.parse::<usize>() {
        if position == 0 {
            return Ok(None);
        }
        return menu
            .nth(position)
            .map(|item| Some(item.name.clone()))
            .ok_or_else(|| InputError::UnknownItem(rest.to_string()));
    }

    menu.find(rest)
        .map(|item| Some(item.name.clone()))
        .ok_or_else(|| InputError::UnknownItem(rest.to_string()))
}

fn parse_number(rest: &str) -> Result<i64, InputError> {
    if rest.is_empty() {
        return Err(InputError::Usage("qty <n>"));
    }
    rest.parse::<i64>()
        .map_err(|_| InputError::NotANumber(rest.to_string()))
}
