//! Session
//!
//! Text-driven shopping session: user actions are read one per line and
//! applied to a [`Storefront`] in order, each completing before the next.

use std::{
    io::{self, BufRead},
    str::FromStr,
};

use thiserror::Error;
use tracing::{debug, info};

use crate::{
    listing,
    products::ProductId,
    sections::{Section, UnknownSection},
    storefront::{Storefront, StorefrontError},
    summary::SummaryError,
};

/// Errors raised while parsing an action line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ActionParseError {
    /// The line has no command word.
    #[error("Empty action")]
    Empty,

    /// The command word is not recognised.
    #[error("Unknown action: {0}")]
    UnknownAction(String),

    /// Wrong number of arguments for the command.
    #[error("Action '{action}' expects {expected} argument(s)")]
    Arity {
        /// Command word
        action: &'static str,
        /// Number of arguments expected
        expected: usize,
    },

    /// An argument is not a valid integer.
    #[error("Invalid number: {0}")]
    InvalidNumber(String),

    /// The section anchor is not recognised.
    #[error(transparent)]
    Section(#[from] UnknownSection),
}

/// Errors that abort a session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Reading input or writing output failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Rendering the cart failed.
    #[error(transparent)]
    Summary(#[from] SummaryError),
}

/// A single user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// `add ID`: add one unit to the cart.
    Add(ProductId),
    /// `remove ID`: drop the product's line.
    Remove(ProductId),
    /// `qty ID N`: set a line's quantity.
    SetQuantity(ProductId, i64),
    /// `inc ID`: the drawer's plus button.
    Increment(ProductId),
    /// `dec ID`: the drawer's minus button.
    Decrement(ProductId),
    /// `goto SECTION`: navigate to a page section.
    Navigate(Section),
    /// `clear`: empty the cart.
    Clear,
    /// `show`: print the cart.
    Show,
    /// `quit`: end the session.
    Quit,
}

impl FromStr for Action {
    type Err = ActionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let command = words.next().ok_or(ActionParseError::Empty)?;
        let args: Vec<&str> = words.collect();

        let action = match command.to_ascii_lowercase().as_str() {
            "add" => Action::Add(product_arg("add", &args)?),
            "remove" | "rm" => Action::Remove(product_arg("remove", &args)?),
            "inc" => Action::Increment(product_arg("inc", &args)?),
            "dec" => Action::Decrement(product_arg("dec", &args)?),
            "qty" => {
                let [id, quantity] = args.as_slice() else {
                    return Err(ActionParseError::Arity {
                        action: "qty",
                        expected: 2,
                    });
                };

                Action::SetQuantity(parse_product_id(id)?, parse_number(quantity)?)
            }
            "goto" => {
                let [section] = args.as_slice() else {
                    return Err(ActionParseError::Arity {
                        action: "goto",
                        expected: 1,
                    });
                };

                Action::Navigate(section.parse()?)
            }
            "clear" => no_args(Action::Clear, "clear", &args)?,
            "show" => no_args(Action::Show, "show", &args)?,
            "quit" | "exit" => no_args(Action::Quit, "quit", &args)?,
            _ => return Err(ActionParseError::UnknownAction(command.to_string())),
        };

        Ok(action)
    }
}

fn no_args(action: Action, name: &'static str, args: &[&str]) -> Result<Action, ActionParseError> {
    if args.is_empty() {
        Ok(action)
    } else {
        Err(ActionParseError::Arity {
            action: name,
            expected: 0,
        })
    }
}

fn product_arg(name: &'static str, args: &[&str]) -> Result<ProductId, ActionParseError> {
    let [id] = args else {
        return Err(ActionParseError::Arity {
            action: name,
            expected: 1,
        });
    };

    parse_product_id(id)
}

fn parse_product_id(s: &str) -> Result<ProductId, ActionParseError> {
    s.parse::<u32>()
        .map(ProductId::new)
        .map_err(|_err| ActionParseError::InvalidNumber(s.to_string()))
}

fn parse_number(s: &str) -> Result<i64, ActionParseError> {
    s.parse::<i64>()
        .map_err(|_err| ActionParseError::InvalidNumber(s.to_string()))
}

/// Apply one action to the storefront.
///
/// `Show` and `Quit` do not change state.
///
/// # Errors
///
/// Returns a [`StorefrontError`] if a product cannot be added.
pub fn apply(storefront: &mut Storefront<'_>, action: Action) -> Result<(), StorefrontError> {
    debug!(?action, "applying action");

    match action {
        Action::Add(id) => {
            storefront.add_product(id)?;
        }
        Action::Remove(id) => storefront.remove_product(id),
        Action::SetQuantity(id, quantity) => storefront.set_quantity(id, quantity),
        Action::Increment(id) => storefront.increment(id),
        Action::Decrement(id) => storefront.decrement(id),
        Action::Navigate(section) => storefront.navigate(section),
        Action::Clear => storefront.clear_cart(),
        Action::Show | Action::Quit => {}
    }

    Ok(())
}

/// Run a session, reading actions from `input` until it ends or `quit`.
///
/// Blank lines and lines starting with `#` are skipped. Invalid actions are
/// reported on `out` and the session continues. The cart is printed on `show`
/// and once more when the session ends; `goto` prints the section's content.
///
/// # Errors
///
/// Returns a [`SessionError`] if reading input or writing output fails.
pub fn run(
    storefront: &mut Storefront<'_>,
    input: impl BufRead,
    mut out: impl io::Write,
) -> Result<(), SessionError> {
    let mut applied = 0_usize;

    for line in input.lines() {
        let line = line?;
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let action = match trimmed.parse::<Action>() {
            Ok(action) => action,
            Err(err) => {
                writeln!(out, "error: {err}")?;
                continue;
            }
        };

        if action == Action::Quit {
            break;
        }

        if let Err(err) = apply(storefront, action) {
            writeln!(out, "error: {err}")?;
            continue;
        }

        applied += 1;

        match action {
            Action::Show => storefront.summary().write_to(&mut out, storefront.cart())?,
            Action::Navigate(section) => {
                write!(out, "→ ")?;
                listing::write_section(&mut out, storefront, section)?;
            }
            _ => {}
        }
    }

    info!(applied, "session ended");

    storefront.summary().write_to(&mut out, storefront.cart())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parses_actions() {
        assert_eq!("add 3".parse(), Ok(Action::Add(ProductId::new(3))));
        assert_eq!("RM 1".parse(), Ok(Action::Remove(ProductId::new(1))));
        assert_eq!(
            "qty 2 -1".parse(),
            Ok(Action::SetQuantity(ProductId::new(2), -1))
        );
        assert_eq!("inc 5".parse(), Ok(Action::Increment(ProductId::new(5))));
        assert_eq!("dec 5".parse(), Ok(Action::Decrement(ProductId::new(5))));
        assert_eq!("goto #delivery".parse(), Ok(Action::Navigate(Section::Delivery)));
        assert_eq!("  show ".parse(), Ok(Action::Show));
        assert_eq!("exit".parse(), Ok(Action::Quit));
    }

    #[test]
    fn rejects_malformed_actions() {
        assert_eq!("".parse::<Action>(), Err(ActionParseError::Empty));
        assert_eq!(
            "buy 1".parse::<Action>(),
            Err(ActionParseError::UnknownAction("buy".to_string()))
        );
        assert_eq!(
            "add".parse::<Action>(),
            Err(ActionParseError::Arity {
                action: "add",
                expected: 1
            })
        );
        assert_eq!(
            "qty 1".parse::<Action>(),
            Err(ActionParseError::Arity {
                action: "qty",
                expected: 2
            })
        );
        assert_eq!(
            "add one".parse::<Action>(),
            Err(ActionParseError::InvalidNumber("one".to_string()))
        );
        assert_eq!(
            "add -1".parse::<Action>(),
            Err(ActionParseError::InvalidNumber("-1".to_string()))
        );
        assert!(matches!(
            "goto basket".parse::<Action>(),
            Err(ActionParseError::Section(_))
        ));
        assert_eq!(
            "clear now".parse::<Action>(),
            Err(ActionParseError::Arity {
                action: "clear",
                expected: 0
            })
        );
    }

    #[test]
    fn apply_ignores_show() -> TestResult {
        let mut storefront = Storefront::from_fixture(crate::fixtures::Fixture::builtin()?);

        apply(&mut storefront, Action::Show)?;

        assert!(storefront.cart().is_empty());

        Ok(())
    }
}
