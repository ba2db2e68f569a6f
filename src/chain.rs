//! Resolving an arbitrary error chain down to its code.
//!
//! # Algorithm
//!
//! [`resolve`] looks for the first [`ErrorCode`] reachable from an error:
//!
//! 1. The error itself is an [`ErrorCode`]: it is returned unchanged.
//! 2. Otherwise the single-cause chain is walked. At each link:
//!    - an [`ErrorCode`] ends the walk;
//!    - a group has each member resolved recursively. Members without a code
//!      are skipped, a single result is used as is, several are merged with
//!      [`crate::combine`];
//!    - anything else moves on to its cause.
//! 3. Whatever was found is paired with the original top-level error in a
//!    [`ChainContext`], so the caller still sees the full message.
//!
//! A value that is both an [`ErrorCode`] and a group is taken as a code.
//! Chains must be acyclic; a cycle never terminates.

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::capability::{
    AnyCode, AnyError, Chained, ErrorCode, as_error_code, causes, get_client_data,
};
use crate::codes::Code;
use crate::group::combine;

/// A resolved code together with the error it was found in.
///
/// Produced only by [`resolve`] when it had to walk. Displays as the
/// top-level error so no annotation is lost; reports the resolved code.
#[derive(Debug, Clone)]
pub struct ChainContext {
    top: AnyError,
    code: AnyCode,
}

impl ChainContext {
    /// The error resolution started from.
    pub fn top(&self) -> &AnyError {
        &self.top
    }

    /// The code found by the walk.
    pub fn error_code(&self) -> &AnyCode {
        &self.code
    }
}

impl fmt::Display for ChainContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.top, f)
    }
}

impl StdError for ChainContext {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        let code: &(dyn StdError + 'static) = &*self.code;
        self.top.source().or(Some(code))
    }
}

impl Chained for ChainContext {
    fn into_error_code(self: Arc<Self>) -> Option<AnyCode> {
        Some(self)
    }

    fn next_cause(&self) -> Option<AnyError> {
        let code: AnyError = self.code.clone();
        Some(self.top.next_cause().unwrap_or(code))
    }

    fn group(&self) -> Option<Vec<AnyError>> {
        self.code.group()
    }

    fn operation(&self) -> Option<&str> {
        self.top.operation()
    }

    fn user_msg(&self) -> Option<&str> {
        self.top.user_msg()
    }

    fn client_data(&self) -> Option<Value> {
        let code: AnyError = self.code.clone();
        get_client_data(&code)
    }
}

impl ErrorCode for ChainContext {
    fn code(&self) -> &'static Code {
        self.code.code()
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// The code of `err`, or `None` if nothing in the chain carries one.
///
/// ```rust
/// use std::sync::Arc;
/// use errcode::{AnyError, ErrorCode, annotate, not_found, message, resolve};
///
/// let coded: AnyError = Arc::new(not_found(message("no row")));
/// let err = annotate(coded, "loading profile");
///
/// let resolved = resolve(&err).unwrap();
/// assert_eq!(resolved.code().full_path(), "missing");
/// assert_eq!(resolved.to_string(), "loading profile: no row");
///
/// assert!(resolve(&message("plain")).is_none());
/// ```
pub fn resolve(err: &AnyError) -> Option<AnyCode> {
    if let Some(code) = as_error_code(err) {
        return Some(code);
    }
    let code = causes(err).find_map(|link| resolve_link(&link))?;
    Some(Arc::new(ChainContext {
        top: Arc::clone(err),
        code,
    }))
}

fn resolve_link(link: &AnyError) -> Option<AnyCode> {
    if let Some(code) = as_error_code(link) {
        return Some(code);
    }
    let members = link.group()?;
    let mut codes = members.iter().filter_map(resolve);
    let first = codes.next()?;
    combine(Some(first), codes.map(upcast))
}

fn upcast(code: AnyCode) -> AnyError {
    code
}

/// Every code reachable from `err`, in order.
///
/// Groups are flattened at any depth. A code that is also a group is
/// replaced by its members' codes, or kept when its members carry none.
/// Adjacent entries with the same full path collapse into one; repeats
/// further apart are kept.
pub fn all_codes(err: &AnyError) -> Vec<AnyCode> {
    let mut out = Vec::new();
    collect_codes(err, &mut out);
    out
}

/// Push every code under `err`; false when there is none.
fn collect_codes(err: &AnyError, out: &mut Vec<AnyCode>) -> bool {
    let Some(code) = resolve(err) else {
        return false;
    };
    if let Some(members) = code.group() {
        let mut found = false;
        for member in &members {
            found |= collect_codes(member, out);
        }
        // A code whose members carry none stands for itself.
        if found {
            return true;
        }
    }
    let repeated = out
        .last()
        .is_some_and(|last| last.code().path_eq(code.code()));
    if !repeated {
        out.push(code);
    }
    true
}
