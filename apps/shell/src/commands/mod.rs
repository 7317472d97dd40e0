//! # Shell Commands
//!
//! One command per input line. The verb is the first word; arguments for
//! `add` are separated by `|` so names and descriptions may contain spaces.
//!
//! ```text
//! add Widget | 10.00 | 2 | blue, large
//! set quantity 3
//! submit
//! remove 1
//! checkout
//! back
//! show
//! ```

pub mod cart;

use tally_core::{DraftField, LineItemId};

use crate::error::ApiError;

/// Text printed by `help`.
pub const HELP: &str = "\
Commands:
  add <name> | <price> | <quantity> [| <description>]   add a line item
  set <name|price|quantity|description> <value>         edit the pending item
  submit                                                add the pending item
  clear                                                 discard the pending item
  remove <id>                                           remove a line item
  checkout                                              show the checkout summary
  back                                                  return to the cart
  show                                                  redraw the current view
  help                                                  show this text
  quit                                                  exit";

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add {
        name: String,
        price: String,
        quantity: String,
        description: String,
    },
    Set {
        field: DraftField,
        value: String,
    },
    Submit,
    Clear,
    Remove {
        id: LineItemId,
    },
    Checkout,
    Back,
    Show,
    Help,
    Quit,
}

impl Command {
    /// Parses one input line. Blank lines yield `Ok(None)`.
    ///
    /// Only the command shape is checked here; field contents are left to
    /// the cart store so its errors reach the user unchanged.
    pub fn parse(line: &str) -> Result<Option<Command>, ApiError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        let command = match verb.to_ascii_lowercase().as_str() {
            "add" => {
                let mut parts = rest.splitn(4, '|').map(|part| part.trim().to_string());
                Command::Add {
                    name: parts.next().unwrap_or_default(),
                    price: parts.next().unwrap_or_default(),
                    quantity: parts.next().unwrap_or_default(),
                    description: parts.next().unwrap_or_default(),
                }
            }
            "set" => {
                let (field, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                let field = DraftField::from_name(field).ok_or_else(|| {
                    ApiError::parse(format!(
                        "Unknown field '{field}'; expected name, price, quantity or description"
                    ))
                })?;
                Command::Set {
                    field,
                    value: value.trim().to_string(),
                }
            }
            "remove" | "rm" => {
                let id = rest.parse::<u64>().map_err(|_| {
                    ApiError::parse(format!("'{rest}' is not a line item id"))
                })?;
                Command::Remove {
                    id: LineItemId::new(id),
                }
            }
            "submit" => Command::Submit,
            "clear" => Command::Clear,
            "checkout" => Command::Checkout,
            "back" => Command::Back,
            "show" | "list" => Command::Show,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(ApiError::unknown_command(other)),
        };

        Ok(Some(command))
    }
}
