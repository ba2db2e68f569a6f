//! Structured log entry for a resolved error.
//!
//! [`ErrorLog`] borrows the code it describes and cannot outlive it. Build
//! one at the point where an error is reported, hand it to the logger, and
//! let it drop.
//!
//! Two outputs are supported:
//!
//! - [`ErrorLog::write_to`] renders one line into any `fmt::Write`, with each
//!   free-text field capped at [`MAX_FIELD_OUTPUT_LEN`] bytes
//! - [`ErrorLog::emit`] (feature `tracing`) records the same fields as a
//!   `tracing` event, leaving serialization to the subscriber

use std::borrow::Cow;
use std::fmt;

use crate::capability::{AnyCode, AnyError, get_client_data, get_operation, get_user_msg};
use crate::chain::all_codes;
use crate::codes::Code;

/// Maximum length for any individual field in formatted output.
pub const MAX_FIELD_OUTPUT_LEN: usize = 1024;

/// Appended to fields cut at [`MAX_FIELD_OUTPUT_LEN`].
pub const TRUNCATION_INDICATOR: &str = "...[TRUNCATED]";

/// Log view of a resolved code.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use errcode::{AnyCode, ErrorLog, OpErrCode, not_found, message};
///
/// let code: AnyCode = Arc::new(OpErrCode::new("fetch", not_found(message("no row"))));
/// let log = ErrorLog::new(&code);
///
/// let mut line = String::new();
/// log.write_to(&mut line).unwrap();
/// assert_eq!(line, "[missing] msg='fetch: no row' operation='fetch'");
/// ```
#[derive(Debug)]
pub struct ErrorLog<'a> {
    error: &'a AnyCode,
    operation: Option<String>,
    user_msg: Option<String>,
    has_client_data: bool,
    other_codes: usize,
}

impl<'a> ErrorLog<'a> {
    /// Gather the log fields of `error`.
    pub fn new(error: &'a AnyCode) -> Self {
        let chain: AnyError = error.clone();
        Self {
            error,
            operation: get_operation(&chain),
            user_msg: get_user_msg(&chain),
            has_client_data: get_client_data(&chain).is_some(),
            other_codes: all_codes(&chain).len().saturating_sub(1),
        }
    }

    /// Write one line to a formatter.
    ///
    /// Layout: `[code] msg='..' operation='..' user_msg='..' [+N codes] [client_data]`,
    /// where every part after `msg` appears only when present.
    pub fn write_to(&self, f: &mut impl fmt::Write) -> fmt::Result {
        let msg = self.error.to_string();
        write!(
            f,
            "[{}] msg='{}'",
            self.error.code(),
            bounded(&msg)
        )?;

        if let Some(op) = &self.operation {
            write!(f, " operation='{}'", bounded(op))?;
        }

        if let Some(user_msg) = &self.user_msg {
            write!(f, " user_msg='{}'", bounded(user_msg))?;
        }

        if self.other_codes > 0 {
            write!(f, " [+{} codes]", self.other_codes)?;
        }

        if self.has_client_data {
            f.write_str(" [client_data]")?;
        }

        Ok(())
    }

    /// Record this entry as a `tracing` event at error level.
    ///
    /// Fields are passed untruncated; the subscriber decides how to bound them.
    #[cfg(feature = "tracing")]
    pub fn emit(&self) {
        tracing::error!(
            code = %self.error.code(),
            error = %self.error,
            operation = self.operation.as_deref(),
            user_msg = self.user_msg.as_deref(),
            other_codes = self.other_codes,
            has_client_data = self.has_client_data,
            "error reported"
        );
    }

    /// The resolved code.
    #[inline]
    pub fn code(&self) -> &'static Code {
        self.error.code()
    }

    /// Operation label found in the chain.
    #[inline]
    pub fn operation(&self) -> Option<&str> {
        self.operation.as_deref()
    }

    /// User message found in the chain.
    #[inline]
    pub fn user_msg(&self) -> Option<&str> {
        self.user_msg.as_deref()
    }

    /// Number of codes besides the primary one.
    #[inline]
    pub const fn other_codes(&self) -> usize {
        self.other_codes
    }

    /// Whether any link carries client data.
    #[inline]
    pub const fn has_client_data(&self) -> bool {
        self.has_client_data
    }
}

impl fmt::Display for ErrorLog<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(f)
    }
}

/// `field` capped at [`MAX_FIELD_OUTPUT_LEN`] bytes, indicator included.
///
/// The cut lands on a character boundary. Short fields are borrowed.
fn bounded(field: &str) -> Cow<'_, str> {
    if field.len() <= MAX_FIELD_OUTPUT_LEN {
        return Cow::Borrowed(field);
    }
    let budget = MAX_FIELD_OUTPUT_LEN - TRUNCATION_INDICATOR.len();
    let cut = (0..=budget)
        .rev()
        .find(|&idx| field.is_char_boundary(idx))
        .unwrap_or(0);
    Cow::Owned(format!("{}{}", &field[..cut], TRUNCATION_INDICATOR))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coded::{UserMsgErrCode, invalid_input, not_found};
    use crate::group::combine;
    use crate::plain::message;
    use std::sync::Arc;

    #[test]
    fn short_fields_are_borrowed() {
        let field = "x".repeat(MAX_FIELD_OUTPUT_LEN);
        assert!(matches!(bounded(&field), Cow::Borrowed(f) if f.len() == MAX_FIELD_OUTPUT_LEN));
    }

    #[test]
    fn long_fields_are_capped_with_indicator() {
        let field = "x".repeat(MAX_FIELD_OUTPUT_LEN + 1);
        let capped = bounded(&field);
        assert_eq!(capped.len(), MAX_FIELD_OUTPUT_LEN);
        assert!(capped.ends_with(TRUNCATION_INDICATOR));
    }

    #[test]
    fn cut_never_splits_a_character() {
        for unit in ["é", "€", "🦀"] {
            let field = unit.repeat(MAX_FIELD_OUTPUT_LEN);
            let capped = bounded(&field);
            assert!(capped.len() <= MAX_FIELD_OUTPUT_LEN);
            let content = capped.strip_suffix(TRUNCATION_INDICATOR).unwrap();
            assert!(content.chars().all(|c| c.to_string() == unit));
        }
    }

    #[test]
    fn line_lists_present_fields_only() {
        let code: AnyCode = Arc::new(not_found(message("no row")));
        assert_eq!(ErrorLog::new(&code).to_string(), "[missing] msg='no row'");
    }

    #[test]
    fn line_includes_user_msg_and_others() {
        let primary: AnyCode = Arc::new(UserMsgErrCode::new("try again", not_found(message("a"))));
        let other: AnyError = Arc::new(invalid_input(message("b")));
        let code = combine(Some(primary), [other]).unwrap();

        let log = ErrorLog::new(&code);
        assert_eq!(log.user_msg(), Some("try again"));
        assert_eq!(log.other_codes(), 1);
        assert_eq!(
            log.to_string(),
            "[missing] msg='try again: a; b' user_msg='try again' [+1 codes]"
        );
    }

    #[test]
    fn long_message_is_cut() {
        let code: AnyCode = Arc::new(not_found(message("x".repeat(5000))));
        let line = ErrorLog::new(&code).to_string();
        assert!(line.len() < 5000);
        assert!(line.contains(TRUNCATION_INDICATOR));
    }
}
