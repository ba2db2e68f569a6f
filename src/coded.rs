//! Attaching codes, operations and user messages to errors.
//!
//! [`CodedError`] is the general-purpose way to give any chain member a
//! [`Code`]. The constructors below it pick a standard code from
//! [`crate::definitions`] and defer to an existing code when the wrapped error
//! already has one.
//!
//! [`OpErrCode`] and [`UserMsgErrCode`] annotate an existing [`ErrorCode`]
//! with an operation label or an end-user message. Their builders come in
//! two flavours:
//!
//! - [`Op::new`] / [`UserMsg::new`] return `None` for an empty label, so an
//!   absent label never produces an annotation
//! - [`with_op`] / [`with_user_msg`] treat an empty label on a present error
//!   as a programming mistake and panic

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::capability::{
    AnyCode, AnyError, Chained, ErrorCode, OpCode, UserCode, as_error_code, get_client_data,
};
use crate::codes::Code;
use crate::definitions::{
    ALREADY_EXISTS, FORBIDDEN, INTERNAL, INVALID_INPUT, NOT_ACCEPTABLE, NOT_AUTHENTICATED,
    NOT_FOUND, TIMEOUT_GATEWAY, TIMEOUT_REQUEST, UNAVAILABLE, UNIMPLEMENTED, UNPROCESSABLE_ENTITY,
};

// ============================================================================
// Coded Error
// ============================================================================

/// Any error plus a code.
///
/// Display and cause are those of the wrapped error, so classifying an error
/// never changes its message.
///
/// ```rust
/// use errcode::{CodedError, definitions, message};
///
/// let err = CodedError::new(message("no such row"), &definitions::NOT_FOUND);
/// assert_eq!(err.to_string(), "no such row");
/// ```
#[derive(Debug, Clone)]
pub struct CodedError {
    err: AnyError,
    code: &'static Code,
}

impl CodedError {
    /// Attach `code` to `err`.
    ///
    /// If `err` is already an [`ErrorCode`], its own code is kept and `code`
    /// is ignored.
    pub fn new(err: AnyError, code: &'static Code) -> Self {
        let code = as_error_code(&err).map_or(code, |inner| inner.code());
        Self { err, code }
    }

    /// The wrapped error.
    pub fn inner(&self) -> &AnyError {
        &self.err
    }
}

impl fmt::Display for CodedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.err, f)
    }
}

impl StdError for CodedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(&*self.err)
    }
}

impl Chained for CodedError {
    fn into_error_code(self: Arc<Self>) -> Option<AnyCode> {
        Some(self)
    }

    fn next_cause(&self) -> Option<AnyError> {
        Some(Arc::clone(&self.err))
    }
}

impl ErrorCode for CodedError {
    fn code(&self) -> &'static Code {
        self.code
    }
}

/// `input` (400), unless `err` already has a code.
pub fn invalid_input(err: AnyError) -> CodedError {
    CodedError::new(err, &INVALID_INPUT)
}

/// Same classification as [`invalid_input`].
pub fn bad_request(err: AnyError) -> CodedError {
    CodedError::new(err, &INVALID_INPUT)
}

/// `missing` (404), unless `err` already has a code.
pub fn not_found(err: AnyError) -> CodedError {
    CodedError::new(err, &NOT_FOUND)
}

/// `auth.unauthenticated` (401), unless `err` already has a code.
pub fn not_authenticated(err: AnyError) -> CodedError {
    CodedError::new(err, &NOT_AUTHENTICATED)
}

/// `auth.forbidden` (403), unless `err` already has a code.
pub fn forbidden(err: AnyError) -> CodedError {
    CodedError::new(err, &FORBIDDEN)
}

/// `state.unprocessable` (422), unless `err` already has a code.
pub fn unprocessable(err: AnyError) -> CodedError {
    CodedError::new(err, &UNPROCESSABLE_ENTITY)
}

/// `input.notacceptable` (406), unless `err` already has a code.
pub fn not_acceptable(err: AnyError) -> CodedError {
    CodedError::new(err, &NOT_ACCEPTABLE)
}

/// `state.exists` (422), unless `err` already has a code.
pub fn already_exists(err: AnyError) -> CodedError {
    CodedError::new(err, &ALREADY_EXISTS)
}

/// `timeout.gateway` (504), unless `err` already has a code.
pub fn timeout_gateway(err: AnyError) -> CodedError {
    CodedError::new(err, &TIMEOUT_GATEWAY)
}

/// `timeout.request` (408), unless `err` already has a code.
pub fn timeout_request(err: AnyError) -> CodedError {
    CodedError::new(err, &TIMEOUT_REQUEST)
}

/// `internal` (500).
///
/// An existing code is kept only if it is itself below `internal`, so the
/// result always maps to a server error.
pub fn internal(err: AnyError) -> CodedError {
    internal_with(err, &INTERNAL)
}

/// `internal.unimplemented` (501). Existing codes are kept as in [`internal`].
pub fn unimplemented(err: AnyError) -> CodedError {
    internal_with(err, &UNIMPLEMENTED)
}

/// `internal.unavailable` (503). Existing codes are kept as in [`internal`].
pub fn unavailable(err: AnyError) -> CodedError {
    internal_with(err, &UNAVAILABLE)
}

fn internal_with(err: AnyError, default: &'static Code) -> CodedError {
    debug_assert!(default.is_ancestor(&INTERNAL), "code is not an internal code: {default}");
    let code = as_error_code(&err)
        .map(|inner| inner.code())
        .filter(|code| code.is_ancestor(&INTERNAL))
        .unwrap_or(default);
    CodedError { err, code }
}

// ============================================================================
// Operation Annotation
// ============================================================================

/// An [`ErrorCode`] with an operation label. Displays as `"op: inner"`.
#[derive(Debug)]
pub struct OpErrCode<E> {
    op: String,
    err: Arc<E>,
}

impl<E: ErrorCode> OpErrCode<E> {
    /// Label `err` with `op`.
    pub fn new(op: impl Into<String>, err: E) -> Self {
        Self {
            op: op.into(),
            err: Arc::new(err),
        }
    }

    /// The annotated error.
    pub fn inner(&self) -> &E {
        &self.err
    }
}

impl<E> Clone for OpErrCode<E> {
    fn clone(&self) -> Self {
        Self {
            op: self.op.clone(),
            err: Arc::clone(&self.err),
        }
    }
}

impl<E: fmt::Display> fmt::Display for OpErrCode<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.op, self.err)
    }
}

impl<E: ErrorCode> StdError for OpErrCode<E> {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(&*self.err)
    }
}

impl<E: ErrorCode> Chained for OpErrCode<E> {
    fn into_error_code(self: Arc<Self>) -> Option<AnyCode> {
        Some(self)
    }

    fn next_cause(&self) -> Option<AnyError> {
        Some(self.err.clone())
    }

    fn operation(&self) -> Option<&str> {
        Some(&self.op)
    }
}

impl<E: ErrorCode> ErrorCode for OpErrCode<E> {
    fn code(&self) -> &'static Code {
        self.err.code()
    }
}

impl<E: ErrorCode> OpCode for OpErrCode<E> {
    fn operation_name(&self) -> &str {
        &self.op
    }
}

/// A validated operation label, applied with [`Op::add_to`].
///
/// ```rust
/// use errcode::{Op, message, not_found};
///
/// let op = Op::new("path.move").unwrap();
/// let err = op.add_to(not_found(message("no route")));
/// assert_eq!(err.to_string(), "path.move: no route");
///
/// assert!(Op::new("").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Op {
    label: String,
}

impl Op {
    /// `None` when `label` is empty.
    pub fn new(label: impl Into<String>) -> Option<Self> {
        let label = label.into();
        (!label.is_empty()).then_some(Self { label })
    }

    /// The label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Annotate `err` with this operation.
    pub fn add_to<E: ErrorCode>(&self, err: E) -> OpErrCode<E> {
        OpErrCode::new(self.label.clone(), err)
    }
}

/// Annotate an optional error with an operation.
///
/// # Panics
///
/// Panics if `label` is empty while `err` is present.
pub fn with_op<E: ErrorCode>(label: &str, err: Option<E>) -> Option<OpErrCode<E>> {
    let err = err?;
    assert!(!label.is_empty(), "operation label must not be empty");
    Some(OpErrCode::new(label, err))
}

// ============================================================================
// User Message Annotation
// ============================================================================

/// An [`ErrorCode`] with a message for end users. Displays as `"msg: inner"`.
///
/// Client data is looked up below the annotation, so adding a user message
/// never hides the payload of the wrapped error.
#[derive(Debug)]
pub struct UserMsgErrCode<E> {
    msg: String,
    err: Arc<E>,
}

impl<E: ErrorCode> UserMsgErrCode<E> {
    /// Attach `msg` to `err`.
    pub fn new(msg: impl Into<String>, err: E) -> Self {
        Self {
            msg: msg.into(),
            err: Arc::new(err),
        }
    }

    /// The annotated error.
    pub fn inner(&self) -> &E {
        &self.err
    }
}

impl<E> Clone for UserMsgErrCode<E> {
    fn clone(&self) -> Self {
        Self {
            msg: self.msg.clone(),
            err: Arc::clone(&self.err),
        }
    }
}

impl<E: fmt::Display> fmt::Display for UserMsgErrCode<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.msg, self.err)
    }
}

impl<E: ErrorCode> StdError for UserMsgErrCode<E> {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(&*self.err)
    }
}

impl<E: ErrorCode> Chained for UserMsgErrCode<E> {
    fn into_error_code(self: Arc<Self>) -> Option<AnyCode> {
        Some(self)
    }

    fn next_cause(&self) -> Option<AnyError> {
        Some(self.err.clone())
    }

    fn user_msg(&self) -> Option<&str> {
        Some(&self.msg)
    }

    fn client_data(&self) -> Option<Value> {
        let inner: AnyError = self.err.clone();
        get_client_data(&inner)
    }
}

impl<E: ErrorCode> ErrorCode for UserMsgErrCode<E> {
    fn code(&self) -> &'static Code {
        self.err.code()
    }
}

impl<E: ErrorCode> UserCode for UserMsgErrCode<E> {
    fn user_message(&self) -> &str {
        &self.msg
    }
}

/// A validated user message, applied with [`UserMsg::add_to`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserMsg {
    msg: String,
}

impl UserMsg {
    /// `None` when `msg` is empty.
    pub fn new(msg: impl Into<String>) -> Option<Self> {
        let msg = msg.into();
        (!msg.is_empty()).then_some(Self { msg })
    }

    /// The message.
    pub fn message(&self) -> &str {
        &self.msg
    }

    /// Attach this message to `err`.
    pub fn add_to<E: ErrorCode>(&self, err: E) -> UserMsgErrCode<E> {
        UserMsgErrCode::new(self.msg.clone(), err)
    }
}

/// Attach a user message to an optional error.
///
/// # Panics
///
/// Panics if `msg` is empty while `err` is present.
pub fn with_user_msg<E: ErrorCode>(msg: &str, err: Option<E>) -> Option<UserMsgErrCode<E>> {
    let err = err?;
    assert!(!msg.is_empty(), "user message must not be empty");
    Some(UserMsgErrCode::new(msg, err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::{causes, get_operation, get_user_msg};
    use crate::definitions::{STATE, UNIMPLEMENTED};
    use crate::plain::{annotate, message};

    #[test]
    fn coded_error_keeps_message() {
        let err = CodedError::new(message("boom"), &INVALID_INPUT);
        assert_eq!(err.to_string(), "boom");
        assert_eq!(err.code().full_path(), "input");
        assert_eq!(err.next_cause().unwrap().to_string(), "boom");
    }

    #[test]
    fn existing_code_wins() {
        let inner: AnyError = Arc::new(not_found(message("row 3")));
        let err = invalid_input(inner);
        assert_eq!(err.code().full_path(), "missing");
    }

    #[test]
    fn existing_code_behind_annotation_is_not_seen() {
        // Only the direct value is probed, not its causes.
        let inner: AnyError = Arc::new(not_found(message("row 3")));
        let err = forbidden(annotate(inner, "lookup"));
        assert_eq!(err.code().full_path(), "auth.forbidden");
    }

    #[test]
    fn standard_constructors_use_standard_codes() {
        let cases: [(fn(AnyError) -> CodedError, &str); 13] = [
            (invalid_input, "input"),
            (bad_request, "input"),
            (not_found, "missing"),
            (not_authenticated, "auth.unauthenticated"),
            (forbidden, "auth.forbidden"),
            (unprocessable, "state.unprocessable"),
            (not_acceptable, "input.notacceptable"),
            (already_exists, "state.exists"),
            (timeout_gateway, "timeout.gateway"),
            (timeout_request, "timeout.request"),
            (internal, "internal"),
            (unimplemented, "internal.unimplemented"),
            (unavailable, "internal.unavailable"),
        ];
        for (construct, path) in cases {
            assert_eq!(construct(message("x")).code().full_path(), path);
        }
    }

    #[test]
    fn internal_keeps_only_internal_codes() {
        let state: AnyError = Arc::new(CodedError::new(message("bad state"), &STATE));
        assert_eq!(internal(state).code().full_path(), "internal");

        let unimpl: AnyError = Arc::new(CodedError::new(message("todo"), &UNIMPLEMENTED));
        assert_eq!(
            unavailable(unimpl).code().full_path(),
            "internal.unimplemented"
        );
    }

    #[test]
    fn op_annotation_prefixes_and_keeps_code() {
        let err = OpErrCode::new("fetch", not_found(message("gone")));
        assert_eq!(err.to_string(), "fetch: gone");
        assert_eq!(err.code().full_path(), "missing");
        assert_eq!(err.operation_name(), "fetch");

        let err: AnyError = Arc::new(err);
        assert_eq!(get_operation(&err).as_deref(), Some("fetch"));
    }

    #[test]
    fn outer_operation_wins() {
        let inner = OpErrCode::new("inner", not_found(message("gone")));
        let outer: AnyError = Arc::new(OpErrCode::new("outer", inner));
        assert_eq!(get_operation(&outer).as_deref(), Some("outer"));
        assert_eq!(outer.to_string(), "outer: inner: gone");
    }

    #[test]
    fn inner_annotations_stay_reachable() {
        let inner = OpErrCode::new("inner", not_found(message("gone")));
        let inner = UserMsgErrCode::new("try later", inner);
        let outer: AnyError = Arc::new(OpErrCode::new("outer", inner));

        let ops: Vec<String> = causes(&outer)
            .filter_map(|link| link.operation().map(str::to_owned))
            .collect();
        assert_eq!(ops, ["outer", "inner"]);
        assert_eq!(get_user_msg(&outer).as_deref(), Some("try later"));
    }

    #[test]
    fn builders_reject_empty_labels() {
        assert!(Op::new("").is_none());
        assert!(UserMsg::new(String::new()).is_none());
        assert_eq!(Op::new("sync").unwrap().label(), "sync");
    }

    #[test]
    fn enforcing_helpers_pass_absence_through() {
        assert!(with_op::<CodedError>("", None).is_none());
        assert!(with_user_msg::<CodedError>("", None).is_none());
    }

    #[test]
    #[should_panic(expected = "operation label must not be empty")]
    fn with_op_panics_on_empty_label() {
        let _ = with_op("", Some(not_found(message("x"))));
    }

    #[test]
    #[should_panic(expected = "user message must not be empty")]
    fn with_user_msg_panics_on_empty_message() {
        let _ = with_user_msg("", Some(not_found(message("x"))));
    }

    #[test]
    fn user_message_is_retrievable() {
        let err = UserMsg::new("please retry")
            .unwrap()
            .add_to(internal(message("db down")));
        assert_eq!(err.to_string(), "please retry: db down");
        assert_eq!(err.user_message(), "please retry");

        let err: AnyError = Arc::new(err);
        assert_eq!(get_user_msg(&err).as_deref(), Some("please retry"));
    }
}
