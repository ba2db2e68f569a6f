//! Combining several errors under one code.
//!
//! [`combine`] is horizontal composition: a primary code plus further errors
//! reported next to it. The result is still a single [`ErrorCode`] whose code
//! is the primary's, so adapters that only understand one code keep working,
//! while [`crate::all_codes`] and the JSON projection can list every member.

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use smallvec::SmallVec;

use crate::capability::{AnyCode, AnyError, Chained, ErrorCode, as_error_code, get_client_data};
use crate::codes::Code;
use crate::plain::write_joined;

/// Inline capacity for the non-primary members. Most aggregates hold two or
/// three errors.
const INLINE_REST: usize = 2;

/// A primary [`ErrorCode`] plus further errors.
///
/// - `code()` is the primary's code
/// - Display joins the primary and every other member with `"; "`
/// - The group lists the primary first, then the others in order
/// - Client data comes from the primary
#[derive(Debug, Clone)]
pub struct MultiErrCode {
    primary: AnyCode,
    rest: SmallVec<[AnyError; INLINE_REST]>,
}

impl MultiErrCode {
    /// The member that supplies the code.
    pub fn primary(&self) -> &AnyCode {
        &self.primary
    }

    /// Every member after the primary.
    pub fn rest(&self) -> &[AnyError] {
        &self.rest
    }

    /// Total number of members, primary included.
    pub fn len(&self) -> usize {
        1 + self.rest.len()
    }

    /// Always false: an aggregate holds at least its primary.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl fmt::Display for MultiErrCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.primary)?;
        if !self.rest.is_empty() {
            f.write_str("; ")?;
            write_joined(f, self.rest.iter())?;
        }
        Ok(())
    }
}

impl StdError for MultiErrCode {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        let primary: &(dyn StdError + 'static) = &*self.primary;
        Some(primary)
    }
}

impl Chained for MultiErrCode {
    fn into_error_code(self: Arc<Self>) -> Option<AnyCode> {
        Some(self)
    }

    fn next_cause(&self) -> Option<AnyError> {
        Some(self.primary.clone())
    }

    fn group(&self) -> Option<Vec<AnyError>> {
        let mut members: Vec<AnyError> = Vec::with_capacity(self.len());
        members.push(self.primary.clone());
        members.extend(self.rest.iter().cloned());
        Some(members)
    }

    fn client_data(&self) -> Option<Value> {
        let primary: AnyError = self.primary.clone();
        get_client_data(&primary)
    }
}

impl ErrorCode for MultiErrCode {
    fn code(&self) -> &'static Code {
        self.primary.code()
    }
}

/// Merge a primary code with further errors.
///
/// - Each of `others` that is a group contributes its members instead of
///   itself (one level).
/// - With no others, `primary` is returned as is: the same `Arc`.
/// - Without a primary, the first other that is an [`ErrorCode`] is promoted.
///   If there is none the result is `None`.
///
/// ```rust
/// use std::sync::Arc;
/// use errcode::{AnyCode, AnyError, ErrorCode, combine, not_found, invalid_input, message};
///
/// let a: AnyCode = Arc::new(not_found(message("no user")));
/// let b: AnyError = Arc::new(invalid_input(message("bad email")));
///
/// let both = combine(Some(a), [b]).unwrap();
/// assert_eq!(both.code().full_path(), "missing");
/// assert_eq!(both.to_string(), "no user; bad email");
/// ```
pub fn combine(
    primary: Option<AnyCode>,
    others: impl IntoIterator<Item = AnyError>,
) -> Option<AnyCode> {
    let mut rest: SmallVec<[AnyError; INLINE_REST]> = SmallVec::new();
    for other in others {
        match other.group() {
            Some(members) => rest.extend(members),
            None => rest.push(other),
        }
    }

    let primary = match primary {
        Some(primary) => primary,
        None => {
            let (idx, promoted) = rest
                .iter()
                .enumerate()
                .find_map(|(idx, err)| as_error_code(err).map(|code| (idx, code)))?;
            rest.remove(idx);
            promoted
        }
    };

    if rest.is_empty() {
        return Some(primary);
    }
    Some(Arc::new(MultiErrCode { primary, rest }))
}
