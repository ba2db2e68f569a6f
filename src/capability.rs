//! Capability traits and chain lookups.
//!
//! Every error that takes part in code resolution implements [`Chained`]. The
//! trait is object safe, so chains are built from `Arc<dyn Chained>` links and
//! each capability is an optional provided method that a type opts into:
//!
//! | Capability     | Method              | Typed refinement |
//! |----------------|---------------------|------------------|
//! | has a code     | `into_error_code`   | [`ErrorCode`]    |
//! | single cause   | `next_cause`        |                  |
//! | group          | `group`             |                  |
//! | operation      | `operation`         | [`OpCode`]       |
//! | user message   | `user_msg`          | [`UserCode`]     |
//! | client data    | `client_data`       |                  |
//!
//! Lookups in this module ([`get_operation`], [`get_user_msg`],
//! [`get_client_data`]) walk the cause chain outward-in and stop at the first
//! link that answers, so the most recent annotation wins.

use std::error::Error as StdError;
use std::sync::Arc;

use serde_json::Value;

use crate::codes::Code;

/// Shared handle to any chain member.
pub type AnyError = Arc<dyn Chained>;

/// Shared handle to any value that carries a [`Code`].
pub type AnyCode = Arc<dyn ErrorCode>;

// ============================================================================
// Capability Traits
// ============================================================================

/// An error that can take part in code resolution.
///
/// All methods have defaults meaning "capability absent". Implementations of
/// [`ErrorCode`] must override [`Chained::into_error_code`] to return
/// `Some(self)`; without it resolution cannot see the code.
///
/// ```rust
/// use std::fmt;
/// use std::sync::Arc;
/// use errcode::{AnyCode, AnyError, Chained, Code, ErrorCode, resolve};
///
/// static QUOTA: Code = Code::new("quota");
///
/// #[derive(Debug)]
/// struct QuotaExceeded;
///
/// impl fmt::Display for QuotaExceeded {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         f.write_str("quota exceeded")
///     }
/// }
///
/// impl std::error::Error for QuotaExceeded {}
///
/// impl Chained for QuotaExceeded {
///     fn into_error_code(self: Arc<Self>) -> Option<AnyCode> {
///         Some(self)
///     }
/// }
///
/// impl ErrorCode for QuotaExceeded {
///     fn code(&self) -> &'static Code {
///         &QUOTA
///     }
/// }
///
/// let err: AnyError = Arc::new(QuotaExceeded);
/// let resolved = resolve(&err).unwrap();
/// assert_eq!(resolved.code().full_path(), "quota");
/// ```
pub trait Chained: StdError + Send + Sync + 'static {
    /// View this value as an [`ErrorCode`], if it is one.
    fn into_error_code(self: Arc<Self>) -> Option<AnyCode> {
        None
    }

    /// The next link in a single-cause chain.
    fn next_cause(&self) -> Option<AnyError> {
        None
    }

    /// Members of a multi-error value. Groups are expanded by resolution
    /// instead of following [`Chained::next_cause`].
    fn group(&self) -> Option<Vec<AnyError>> {
        None
    }

    /// High-level operation in progress when the error happened.
    fn operation(&self) -> Option<&str> {
        None
    }

    /// Message intended for end users.
    fn user_msg(&self) -> Option<&str> {
        None
    }

    /// Data safe to hand to clients.
    fn client_data(&self) -> Option<Value> {
        None
    }
}

/// An error carrying a stable [`Code`].
pub trait ErrorCode: Chained {
    /// The classification of this error.
    fn code(&self) -> &'static Code;
}

/// An [`ErrorCode`] with a message for end users.
pub trait UserCode: ErrorCode {
    /// The user-facing message.
    fn user_message(&self) -> &str;
}

/// An [`ErrorCode`] with an operation label.
pub trait OpCode: ErrorCode {
    /// The operation label.
    fn operation_name(&self) -> &str;
}

// Dynamic codes can be wrapped again without re-boxing the concrete type.
impl Chained for AnyCode {
    fn into_error_code(self: Arc<Self>) -> Option<AnyCode> {
        Some((*self).clone())
    }

    fn next_cause(&self) -> Option<AnyError> {
        (**self).next_cause()
    }

    fn group(&self) -> Option<Vec<AnyError>> {
        (**self).group()
    }

    fn operation(&self) -> Option<&str> {
        (**self).operation()
    }

    fn user_msg(&self) -> Option<&str> {
        (**self).user_msg()
    }

    fn client_data(&self) -> Option<Value> {
        (**self).client_data()
    }
}

impl ErrorCode for AnyCode {
    fn code(&self) -> &'static Code {
        (**self).code()
    }
}

// ============================================================================
// Chain Traversal
// ============================================================================

/// Iterator over an error and every single-cause link below it.
///
/// Groups are not expanded; see [`crate::all_codes`] for that.
#[derive(Clone)]
pub struct Causes {
    next: Option<AnyError>,
}

impl Iterator for Causes {
    type Item = AnyError;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.next = current.next_cause();
        Some(current)
    }
}

/// Walk `err` and its causes, outermost first.
pub fn causes(err: &AnyError) -> Causes {
    Causes {
        next: Some(Arc::clone(err)),
    }
}

/// View `err` as an [`ErrorCode`] without walking the chain.
pub fn as_error_code(err: &AnyError) -> Option<AnyCode> {
    Arc::clone(err).into_error_code()
}

/// Operation label of the first link that has one.
pub fn get_operation(err: &AnyError) -> Option<String> {
    causes(err).find_map(|link| link.operation().map(str::to_owned))
}

/// User message of the first link that has one.
pub fn get_user_msg(err: &AnyError) -> Option<String> {
    causes(err).find_map(|link| link.user_msg().map(str::to_owned))
}

/// Client data of the first link that has some.
pub fn get_client_data(err: &AnyError) -> Option<Value> {
    causes(err).find_map(|link| link.client_data())
}

/// Operation and client data together.
///
/// When no link carries an operation, a string `"operation"` field of an
/// object payload is used instead.
pub fn operation_client_data(err: &AnyError) -> (Option<String>, Option<Value>) {
    let data = get_client_data(err);
    let op = get_operation(err).or_else(|| {
        data.as_ref()
            .and_then(|d| d.get("operation"))
            .and_then(Value::as_str)
            .map(str::to_owned)
    });
    (op, data)
}
