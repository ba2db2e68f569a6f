//! Code hierarchy - stable, dot-separated error classifications.
//!
//! A [`Code`] is a node in a tree: a local segment plus an optional parent.
//! The full path (`"state.exists"`) is what clients see on the wire and what
//! metadata tables are keyed by. It is never stored; [`Display`] walks the
//! parent chain and writes directly to the formatter.
//!
//! # Frozen Identity
//!
//! Codes are meant to be declared once as `static` items and referenced for
//! the lifetime of the process:
//!
//! - Construction is `const fn`, so a malformed hierarchy in a static is a
//!   compile error rather than a runtime surprise
//! - Children hold a `&'static` reference to their parent, so a hierarchy
//!   can never be rewired after it is built
//! - Equality is structural on `(segment, parent identity)`: two codes with
//!   the same full path but built from unrelated parents are different nodes
//!
//! Declare parents as `static`, not `const`. A `const` is copied at every use
//! and its children would point at a temporary copy.
//!
//! # Metadata
//!
//! [`MetaData`] associates arbitrary values (HTTP statuses, RPC codes, ...)
//! with a code's full path. Lookup with [`Code::metadata_from_ancestors`]
//! inherits from the closest ancestor that defines a value.
//!
//! # Example
//!
//! ```rust
//! use errcode::{Code, define_codes};
//!
//! define_codes! {
//!     pub static PATH = "path";
//!     pub static PATH_BLOCKED = "path.blocked" in PATH;
//! }
//!
//! assert_eq!(PATH_BLOCKED.full_path(), "path.blocked");
//! assert!(PATH_BLOCKED.is_ancestor(&PATH));
//! ```
//!
//! [`Display`]: std::fmt::Display

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Separator between the segments of a full code path.
pub const SEPARATOR: char = '.';

const SEPARATOR_BYTE: u8 = b'.';

// ============================================================================
// Code (Primary Identity Type)
// ============================================================================

/// A hierarchical error classification.
///
/// # Construction APIs
///
/// - [`Code::new`]: a top-level code. Panics if the segment contains `.`.
/// - [`Code::child`]: a code below `self`. The segment may be written fully
///   qualified (`"state.exists"`) for readability; the qualifying prefix must
///   equal the parent's full path. Only the last component is stored.
///
/// Both are `const fn`: in a `static` initializer a violation fails the build.
///
/// ```rust
/// use errcode::Code;
///
/// static STATE: Code = Code::new("state");
/// static EXISTS: Code = STATE.child("state.exists");
/// static RANGE: Code = STATE.child("range");
///
/// assert_eq!(EXISTS.to_string(), "state.exists");
/// assert_eq!(RANGE.segment(), "range");
/// ```
#[derive(Debug)]
pub struct Code {
    segment: &'static str,
    parent: Option<&'static Code>,
}

impl Code {
    /// Create a top-level code.
    ///
    /// # Panics
    ///
    /// Panics if `segment` is empty or contains the separator. In a `static`
    /// initializer this is a compile-time error.
    #[inline]
    pub const fn new(segment: &'static str) -> Self {
        assert!(!segment.is_empty(), "code segment must not be empty");
        assert!(
            find_last_separator(segment.as_bytes()).is_none(),
            "top-level code must be a single path component"
        );
        Self {
            segment,
            parent: None,
        }
    }

    /// Create a code whose parent is `self`.
    ///
    /// # Panics
    ///
    /// Panics if the local segment is empty, or if a qualified segment does
    /// not start with the parent's full path.
    #[inline]
    pub const fn child(&'static self, segment: &'static str) -> Self {
        let bytes = segment.as_bytes();
        let local = match find_last_separator(bytes) {
            None => segment,
            Some(idx) => {
                let (prefix, rest) = bytes.split_at(idx);
                assert!(
                    self.path_matches(prefix),
                    "qualified child segment must extend the parent path"
                );
                let (_, tail) = rest.split_at(1);
                match std::str::from_utf8(tail) {
                    Ok(tail) => tail,
                    Err(_) => panic!("code segment split inside a character"),
                }
            }
        };
        assert!(!local.is_empty(), "code segment must not be empty");
        Self {
            segment: local,
            parent: Some(self),
        }
    }

    /// The local segment, without any parent path.
    #[inline]
    pub const fn segment(&self) -> &'static str {
        self.segment
    }

    /// The parent code, `None` for a top-level code.
    #[inline]
    pub const fn parent(&self) -> Option<&'static Code> {
        self.parent
    }

    /// The full dot-separated path. Allocates; prefer `Display` when writing
    /// into an existing buffer.
    pub fn full_path(&self) -> String {
        self.to_string()
    }

    /// Number of ancestors above this code.
    pub fn depth(&self) -> usize {
        self.ancestors().count() - 1
    }

    /// Iterate from `self` up to the root, `self` first.
    pub fn ancestors(&self) -> Ancestors<'_> {
        Ancestors { next: Some(self) }
    }

    /// First code in the ancestor chain (self included) satisfying `test`.
    pub fn find_ancestor(&self, mut test: impl FnMut(&Code) -> bool) -> Option<&Code> {
        self.ancestors().find(|code| test(code))
    }

    /// True if `candidate` is `self` or one of its ancestors.
    pub fn is_ancestor(&self, candidate: &Code) -> bool {
        self.find_ancestor(|code| code == candidate).is_some()
    }

    /// Compare full paths segment by segment without allocating.
    ///
    /// Unlike `==` this ignores node identity.
    pub fn path_eq(&self, other: &Code) -> bool {
        let mut left = self.ancestors();
        let mut right = other.ancestors();
        loop {
            match (left.next(), right.next()) {
                (None, None) => return true,
                (Some(a), Some(b)) if a.segment == b.segment => continue,
                _ => return false,
            }
        }
    }

    /// Attach `value` to this code in `table`.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataConflict`] if the code already has an entry in the
    /// table; the existing value is kept.
    pub fn set_metadata<T: fmt::Debug>(
        &self,
        table: &mut MetaData<T>,
        value: T,
    ) -> Result<(), MetadataConflict> {
        let path = self.full_path();
        if let Some(existing) = table.entries.get(&path) {
            return Err(MetadataConflict {
                code: path,
                existing: format!("{:?}", existing),
            });
        }
        table.entries.insert(path, value);
        Ok(())
    }

    /// Look up `table` starting at this code, then each ancestor in turn.
    ///
    /// Returns the value of the closest code that defines one.
    pub fn metadata_from_ancestors<'t, T>(&self, table: &'t MetaData<T>) -> Option<&'t T> {
        if table.is_empty() {
            return None;
        }
        // One allocation: every ancestor path is a prefix of the full path.
        let full = self.full_path();
        let mut end = full.len();
        for code in self.ancestors() {
            if let Some(value) = table.entries.get(&full[..end]) {
                return Some(value);
            }
            end = end.saturating_sub(code.segment.len() + 1);
        }
        None
    }

    /// Const check that `prefix` equals this code's full path.
    const fn path_matches(&self, prefix: &[u8]) -> bool {
        let mut node = self;
        let mut end = prefix.len();
        loop {
            let segment = node.segment.as_bytes();
            if segment.len() > end {
                return false;
            }
            let start = end - segment.len();
            let mut i = 0;
            while i < segment.len() {
                if prefix[start + i] != segment[i] {
                    return false;
                }
                i += 1;
            }
            end = start;
            match node.parent {
                None => return end == 0,
                Some(parent) => {
                    if end == 0 || prefix[end - 1] != SEPARATOR_BYTE {
                        return false;
                    }
                    end -= 1;
                    node = parent;
                }
            }
        }
    }
}

const fn find_last_separator(bytes: &[u8]) -> Option<usize> {
    let mut i = bytes.len();
    while i > 0 {
        i -= 1;
        if bytes[i] == SEPARATOR_BYTE {
            return Some(i);
        }
    }
    None
}

impl PartialEq for Code {
    fn eq(&self, other: &Self) -> bool {
        self.segment == other.segment
            && match (self.parent, other.parent) {
                (None, None) => true,
                (Some(a), Some(b)) => std::ptr::eq(a, b),
                _ => false,
            }
    }
}

impl Eq for Code {}

impl Hash for Code {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.segment.hash(state);
        self.parent.map(|p| p as *const Code).hash(state);
    }
}

impl fmt::Display for Code {
    /// Writes the full path straight into the formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(parent) = self.parent {
            write!(f, "{}{}", parent, SEPARATOR)?;
        }
        f.write_str(self.segment)
    }
}

/// Iterator over a code and its ancestors. See [`Code::ancestors`].
#[derive(Debug, Clone)]
pub struct Ancestors<'a> {
    next: Option<&'a Code>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a Code;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.parent;
        Some(current)
    }
}

// ============================================================================
// Metadata Tables
// ============================================================================

/// A table of values keyed by full code path.
///
/// One table exists per kind of metadata. Tables are plain values: build them
/// during startup, then share them by reference. Lookups take no lock, so
/// finish registration before handing the table to concurrent readers.
#[derive(Debug, Clone)]
pub struct MetaData<T> {
    entries: HashMap<String, T>,
}

impl<T> MetaData<T> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Value registered for exactly this full path, without inheritance.
    pub fn get(&self, path: &str) -> Option<&T> {
        self.entries.get(path)
    }

    /// Number of registered codes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for MetaData<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A code already has a value in a metadata table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataConflict {
    code: String,
    existing: String,
}

impl MetadataConflict {
    /// Full path of the code that was registered twice.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Debug rendering of the value that is already registered.
    pub fn existing(&self) -> &str {
        &self.existing
    }
}

impl fmt::Display for MetadataConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "for code {} metadata exists: {}", self.code, self.existing)
    }
}

impl std::error::Error for MetadataConflict {}

// ============================================================================
// Declaration Macro
// ============================================================================

/// Declare a hierarchy of codes as statics.
///
/// `"segment"` creates a top-level code; `"segment" in PARENT` creates a child
/// of an already declared static. Children may use the fully qualified form.
///
/// ```rust
/// use errcode::define_codes;
///
/// define_codes! {
///     /// Storage layer failures.
///     pub static STORAGE = "storage";
///     pub static STORAGE_FULL = "storage.full" in STORAGE;
///     static STORAGE_FULL_QUOTA = "quota" in STORAGE_FULL;
/// }
///
/// assert_eq!(STORAGE_FULL_QUOTA.full_path(), "storage.full.quota");
/// ```
#[macro_export]
macro_rules! define_codes {
    () => {};
    (
        $(#[$meta:meta])*
        $vis:vis static $name:ident = $segment:literal in $parent:path;
        $($rest:tt)*
    ) => {
        $(#[$meta])*
        $vis static $name: $crate::Code = $parent.child($segment);
        $crate::define_codes! { $($rest)* }
    };
    (
        $(#[$meta:meta])*
        $vis:vis static $name:ident = $segment:literal;
        $($rest:tt)*
    ) => {
        $(#[$meta])*
        $vis static $name: $crate::Code = $crate::Code::new($segment);
        $crate::define_codes! { $($rest)* }
    };
}

// ============================================================================
// Tests
// ============================================================================
