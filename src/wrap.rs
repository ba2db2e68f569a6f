//! Message wrapping that keeps the code.
//!
//! [`wrap`] adds context to an [`ErrorCode`] without changing its
//! classification: the result reports the same [`Code`], displays as
//! `"<message>: <original>"` and has the original as its cause. Every
//! wrapper passes absence through, so `wrap(None, ..)` is `None`.
//!
//! The wrapper is generic over the wrapped type and forwards the typed
//! capabilities it has: wrapping a [`UserCode`] gives a [`UserCode`],
//! wrapping an [`OpCode`] gives an [`OpCode`]. [`wrap_user`] and [`wrap_op`]
//! spell that requirement out at the call site.
//!
//! ```rust
//! use errcode::{ErrorCode, wrap, not_found, message};
//!
//! let err = wrap(Some(not_found(message("no row"))), "loading user").unwrap();
//! assert_eq!(err.to_string(), "loading user: no row");
//! assert_eq!(err.code().full_path(), "missing");
//! ```

use std::error::Error as StdError;
use std::fmt::{self, Write as _};
use std::sync::Arc;

use crate::capability::{AnyCode, AnyError, Chained, ErrorCode, OpCode, UserCode};
use crate::codes::Code;

/// An [`ErrorCode`] with an added message.
///
/// Operation, user message and group membership are read through to the
/// wrapped error, so wrapping an aggregate still lists all of its codes.
#[derive(Debug)]
pub struct Wrapped<E> {
    msg: String,
    err: Arc<E>,
}

impl<E: ErrorCode> Wrapped<E> {
    /// Wrap `err` with `msg`.
    pub fn new(err: E, msg: impl fmt::Display) -> Self {
        Self {
            msg: msg.to_string(),
            err: Arc::new(err),
        }
    }

    /// The added message, without the original.
    pub fn message(&self) -> &str {
        &self.msg
    }

    /// The wrapped error.
    pub fn inner(&self) -> &E {
        &self.err
    }
}

impl<E> Clone for Wrapped<E> {
    fn clone(&self) -> Self {
        Self {
            msg: self.msg.clone(),
            err: Arc::clone(&self.err),
        }
    }
}

impl<E: fmt::Display> fmt::Display for Wrapped<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.msg, self.err)
    }
}

impl<E: ErrorCode> StdError for Wrapped<E> {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(&*self.err)
    }
}

impl<E: ErrorCode> Chained for Wrapped<E> {
    fn into_error_code(self: Arc<Self>) -> Option<AnyCode> {
        Some(self)
    }

    fn next_cause(&self) -> Option<AnyError> {
        Some(self.err.clone())
    }

    fn group(&self) -> Option<Vec<AnyError>> {
        self.err.group()
    }

    fn operation(&self) -> Option<&str> {
        self.err.operation()
    }

    fn user_msg(&self) -> Option<&str> {
        self.err.user_msg()
    }
}

impl<E: ErrorCode> ErrorCode for Wrapped<E> {
    fn code(&self) -> &'static Code {
        self.err.code()
    }
}

impl<E: UserCode> UserCode for Wrapped<E> {
    fn user_message(&self) -> &str {
        self.err.user_message()
    }
}

impl<E: OpCode> OpCode for Wrapped<E> {
    fn operation_name(&self) -> &str {
        self.err.operation_name()
    }
}

// ============================================================================
// Wrapping Functions
// ============================================================================

/// Wrap an optional error code with a message.
pub fn wrap<E: ErrorCode>(err: Option<E>, msg: impl fmt::Display) -> Option<Wrapped<E>> {
    err.map(|err| Wrapped::new(err, msg))
}

/// [`wrap`] for a [`UserCode`]; the result still exposes the user message.
pub fn wrap_user<E: UserCode>(err: Option<E>, msg: impl fmt::Display) -> Option<Wrapped<E>> {
    wrap(err, msg)
}

/// [`wrap`] for an [`OpCode`]; the result still exposes the operation.
pub fn wrap_op<E: OpCode>(err: Option<E>, msg: impl fmt::Display) -> Option<Wrapped<E>> {
    wrap(err, msg)
}

/// Wrap with a message followed by `key=value` fields.
///
/// ```rust
/// use errcode::{wraps, not_found, message};
///
/// let err = wraps(Some(not_found(message("gone"))), "fetch", &[("id", &7), ("table", &"users")]);
/// assert_eq!(err.unwrap().to_string(), "fetch id=7 table=users: gone");
/// ```
pub fn wraps<E: ErrorCode>(
    err: Option<E>,
    msg: &str,
    fields: &[(&str, &dyn fmt::Display)],
) -> Option<Wrapped<E>> {
    let err = err?;
    Some(Wrapped::new(err, render_fields(msg, fields)))
}

/// [`wraps`] for a [`UserCode`].
pub fn wraps_user<E: UserCode>(
    err: Option<E>,
    msg: &str,
    fields: &[(&str, &dyn fmt::Display)],
) -> Option<Wrapped<E>> {
    wraps(err, msg, fields)
}

/// [`wraps`] for an [`OpCode`].
pub fn wraps_op<E: OpCode>(
    err: Option<E>,
    msg: &str,
    fields: &[(&str, &dyn fmt::Display)],
) -> Option<Wrapped<E>> {
    wraps(err, msg, fields)
}

fn render_fields(msg: &str, fields: &[(&str, &dyn fmt::Display)]) -> String {
    let mut out = String::from(msg);
    for (key, value) in fields {
        // Writing to a String cannot fail.
        let _ = write!(out, " {}={}", key, value);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::{causes, get_operation, get_user_msg};
    use crate::chain::all_codes;
    use crate::coded::{CodedError, OpErrCode, UserMsgErrCode, invalid_input, not_found};
    use crate::group::combine;
    use crate::json::JsonFormat;
    use crate::plain::message;

    fn gone() -> CodedError {
        not_found(message("gone"))
    }

    #[test]
    fn wrap_keeps_code_and_prefixes() {
        let err = wrap(Some(gone()), "loading").unwrap();
        assert_eq!(err.to_string(), "loading: gone");
        assert_eq!(err.code().full_path(), "missing");
        assert_eq!(err.message(), "loading");
    }

    #[test]
    fn wrap_of_nothing_is_nothing() {
        assert!(wrap::<CodedError>(None, "x").is_none());
        assert!(wrap_user::<UserMsgErrCode<CodedError>>(None, "x").is_none());
        assert!(wrap_op::<OpErrCode<CodedError>>(None, "x").is_none());
        assert!(wraps::<CodedError>(None, "x", &[]).is_none());
    }

    #[test]
    fn wrap_of_wrap_keeps_full_chain() {
        let inner = wrap(Some(gone()), "inner").unwrap();
        let outer = wrap(Some(inner), "outer").unwrap();
        assert_eq!(outer.to_string(), "outer: inner: gone");

        let outer: AnyError = Arc::new(outer);
        let chain: Vec<String> = causes(&outer).map(|e| e.to_string()).collect();
        assert_eq!(
            chain,
            ["outer: inner: gone", "inner: gone", "gone", "gone"]
        );
    }

    #[test]
    fn wrap_user_keeps_user_message() {
        let user = UserMsgErrCode::new("try later", gone());
        let err = wrap_user(Some(user), "context").unwrap();
        assert_eq!(err.user_message(), "try later");

        let err: AnyError = Arc::new(err);
        assert_eq!(get_user_msg(&err).as_deref(), Some("try later"));
    }

    #[test]
    fn wrap_op_keeps_operation() {
        let op = OpErrCode::new("sync", gone());
        let err = wrap_op(Some(op), "context").unwrap();
        assert_eq!(err.operation_name(), "sync");
        assert_eq!(err.to_string(), "context: sync: gone");

        let err: AnyError = Arc::new(err);
        assert_eq!(get_operation(&err).as_deref(), Some("sync"));
    }

    #[test]
    fn wraps_renders_fields() {
        let err = wraps_op(
            Some(OpErrCode::new("sync", gone())),
            "copy",
            &[("from", &"a"), ("to", &"b")],
        )
        .unwrap();
        assert_eq!(err.to_string(), "copy from=a to=b: sync: gone");
    }

    #[test]
    fn wrapped_aggregate_keeps_every_code() {
        let primary: AnyCode = Arc::new(gone());
        let other: AnyError = Arc::new(invalid_input(message("bad")));
        let combined = combine(Some(primary), [other]).unwrap();

        let err: AnyCode = Arc::new(wrap(Some(combined), "ctx").unwrap());
        let chain: AnyError = err.clone();
        let paths: Vec<String> = all_codes(&chain)
            .iter()
            .map(|c| c.code().full_path())
            .collect();
        assert_eq!(paths, ["missing", "input"]);

        let json = JsonFormat::from_code(&err);
        assert_eq!(json.msg, "ctx: gone; bad");
        assert_eq!(json.others.len(), 1);
        assert_eq!(json.others[0].code, "input");
    }
}
