//! Plain chain members without a code.
//!
//! These are the leaves and joints of a chain before anything is classified:
//! a bare message, a contextual annotation, an adapter for foreign
//! `std::error::Error` types, and an uncoded group of errors.

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use crate::capability::{AnyError, Chained};

/// A leaf error carrying only a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    msg: String,
}

impl Message {
    /// Create a leaf error.
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.msg)
    }
}

impl StdError for Message {}

impl Chained for Message {}

/// Shorthand for a shared [`Message`].
pub fn message(msg: impl Into<String>) -> AnyError {
    Arc::new(Message::new(msg))
}

/// Context added on top of another error. Displays as `"msg: inner"`.
#[derive(Debug, Clone)]
pub struct Annotated {
    msg: String,
    inner: AnyError,
}

impl Annotated {
    /// Annotate `inner` with `msg`.
    pub fn new(inner: AnyError, msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            inner,
        }
    }
}

impl fmt::Display for Annotated {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.msg, self.inner)
    }
}

impl StdError for Annotated {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(&*self.inner)
    }
}

impl Chained for Annotated {
    fn next_cause(&self) -> Option<AnyError> {
        Some(Arc::clone(&self.inner))
    }
}

/// Shorthand for a shared [`Annotated`].
pub fn annotate(inner: AnyError, msg: impl Into<String>) -> AnyError {
    Arc::new(Annotated::new(inner, msg))
}

/// Adapter for errors from other crates.
///
/// The adapted error is a leaf: its own `source()` chain stays reachable
/// through `std::error::Error` but is not walked by code resolution.
#[derive(Debug)]
pub struct Foreign<E> {
    inner: E,
}

impl<E> Foreign<E>
where
    E: StdError + Send + Sync + 'static,
{
    /// Adapt `inner`.
    pub fn new(inner: E) -> Self {
        Self { inner }
    }

    /// The adapted error.
    pub fn get_ref(&self) -> &E {
        &self.inner
    }

    /// Take the adapted error back.
    pub fn into_inner(self) -> E {
        self.inner
    }
}

impl<E: fmt::Display> fmt::Display for Foreign<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl<E: StdError> StdError for Foreign<E> {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner.source()
    }
}

impl<E> Chained for Foreign<E> where E: StdError + Send + Sync + 'static {}

/// Shorthand for a shared [`Foreign`].
pub fn foreign<E>(inner: E) -> AnyError
where
    E: StdError + Send + Sync + 'static,
{
    Arc::new(Foreign::new(inner))
}

/// Several errors reported together, without a code of their own.
///
/// Resolution expands the members instead of following a single cause.
#[derive(Debug, Clone)]
pub struct Group {
    members: Vec<AnyError>,
}

impl Group {
    /// Group `members` in order.
    pub fn new(members: impl IntoIterator<Item = AnyError>) -> Self {
        Self {
            members: members.into_iter().collect(),
        }
    }

    /// The grouped errors.
    pub fn members(&self) -> &[AnyError] {
        &self.members
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_joined(f, self.members.iter())
    }
}

impl StdError for Group {}

impl Chained for Group {
    fn group(&self) -> Option<Vec<AnyError>> {
        Some(self.members.clone())
    }
}

/// Shorthand for a shared [`Group`].
pub fn group(members: impl IntoIterator<Item = AnyError>) -> AnyError {
    Arc::new(Group::new(members))
}

/// Write each item separated by `"; "`.
pub(crate) fn write_joined<'a, T>(
    f: &mut fmt::Formatter<'_>,
    items: impl Iterator<Item = &'a T>,
) -> fmt::Result
where
    T: fmt::Display + ?Sized + 'a,
{
    for (i, item) in items.enumerate() {
        if i > 0 {
            f.write_str("; ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn message_displays_verbatim() {
        assert_eq!(message("boom").to_string(), "boom");
        assert!(message("boom").next_cause().is_none());
    }

    #[test]
    fn annotation_prefixes_and_links() {
        let err = annotate(message("disk full"), "writing journal");
        assert_eq!(err.to_string(), "writing journal: disk full");
        assert_eq!(err.next_cause().unwrap().to_string(), "disk full");
        assert_eq!(err.source().unwrap().to_string(), "disk full");
    }

    #[test]
    fn foreign_keeps_std_source() {
        #[derive(Debug)]
        struct Outer(io::Error);

        impl fmt::Display for Outer {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("outer")
            }
        }

        impl StdError for Outer {
            fn source(&self) -> Option<&(dyn StdError + 'static)> {
                Some(&self.0)
            }
        }

        let err = foreign(Outer(io::Error::other("inner io")));
        assert_eq!(err.to_string(), "outer");
        assert_eq!(err.source().unwrap().to_string(), "inner io");
        assert!(err.next_cause().is_none());
    }

    #[test]
    fn group_joins_members() {
        let err = group([message("a"), message("b"), message("c")]);
        assert_eq!(err.to_string(), "a; b; c");
        assert_eq!(err.group().map(|m| m.len()), Some(3));
    }

    #[test]
    fn empty_group_displays_nothing() {
        assert_eq!(group(Vec::new()).to_string(), "");
    }
}
