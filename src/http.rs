//! HTTP status mapping.
//!
//! [`HttpStatuses`] is a [`MetaData`] table of status codes with the standard
//! mappings preloaded by [`HttpStatuses::with_defaults`]. Statuses are
//! inherited: `state.range` has no entry of its own and maps to `state`'s 400.
//! Codes with no mapping anywhere in their ancestry fall back to
//! [`DEFAULT_HTTP_STATUS`].
//!
//! The table is an ordinary value. Build it once at startup, register any
//! application codes, then share it by reference.

use crate::codes::{Code, MetaData, MetadataConflict};
use crate::definitions::{
    ALREADY_EXISTS, FORBIDDEN, INTERNAL, INVALID_INPUT, NOT_ACCEPTABLE, NOT_AUTHENTICATED,
    NOT_FOUND, STATE, TIMEOUT_GATEWAY, TIMEOUT_REQUEST, UNAVAILABLE, UNIMPLEMENTED,
    UNPROCESSABLE_ENTITY,
};

/// Status used for codes without a mapping.
pub const DEFAULT_HTTP_STATUS: u16 = 400;

/// Table of HTTP statuses keyed by code.
#[derive(Debug, Clone, Default)]
pub struct HttpStatuses {
    table: MetaData<u16>,
}

impl HttpStatuses {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// A table holding the mappings for the standard codes.
    pub fn with_defaults() -> Self {
        let mut statuses = Self::new();
        statuses
            .set(&INTERNAL, 500)
            .set(&NOT_FOUND, 404)
            .set(&UNIMPLEMENTED, 501)
            .set(&UNAVAILABLE, 503)
            .set(&STATE, 400)
            .set(&ALREADY_EXISTS, 422)
            .set(&UNPROCESSABLE_ENTITY, 422)
            .set(&INVALID_INPUT, 400)
            .set(&NOT_ACCEPTABLE, 406)
            .set(&NOT_AUTHENTICATED, 401)
            .set(&FORBIDDEN, 403)
            .set(&TIMEOUT_GATEWAY, 504)
            .set(&TIMEOUT_REQUEST, 408);
        statuses
    }

    /// Map `code` (and, by inheritance, its descendants) to `status`.
    ///
    /// # Panics
    ///
    /// Panics if `code` already has a status or `status` is not a three-digit
    /// HTTP status. Use [`HttpStatuses::try_set`] to handle duplicates.
    pub fn set(&mut self, code: &Code, status: u16) -> &mut Self {
        if let Err(conflict) = self.try_set(code, status) {
            panic!("{conflict}");
        }
        self
    }

    /// Map `code` to `status`, reporting a duplicate instead of panicking.
    ///
    /// # Panics
    ///
    /// Panics if `status` is not a three-digit HTTP status.
    pub fn try_set(&mut self, code: &Code, status: u16) -> Result<(), MetadataConflict> {
        assert!(
            (100..=999).contains(&status),
            "invalid HTTP status {status} for code {code}"
        );
        code.set_metadata(&mut self.table, status)
    }

    /// Inherited status of `code`, if any ancestor has one.
    pub fn status(&self, code: &Code) -> Option<u16> {
        code.metadata_from_ancestors(&self.table).copied()
    }

    /// Inherited status of `code`, or [`DEFAULT_HTTP_STATUS`].
    pub fn status_or_default(&self, code: &Code) -> u16 {
        self.status(code).unwrap_or_else(|| {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                code = %code,
                status = DEFAULT_HTTP_STATUS,
                "no HTTP status mapped, using default"
            );
            DEFAULT_HTTP_STATUS
        })
    }

    /// The underlying metadata table.
    pub fn table(&self) -> &MetaData<u16> {
        &self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definitions::{AUTH, OUT_OF_RANGE, TIMEOUT};

    static TEAPOT: Code = Code::new("teapot");
    static TEAPOT_EMPTY: Code = TEAPOT.child("teapot.empty");

    #[test]
    fn default_mappings() {
        let statuses = HttpStatuses::with_defaults();
        assert_eq!(statuses.status(&INTERNAL), Some(500));
        assert_eq!(statuses.status(&UNAVAILABLE), Some(503));
        assert_eq!(statuses.status(&NOT_FOUND), Some(404));
        assert_eq!(statuses.status(&ALREADY_EXISTS), Some(422));
        assert_eq!(statuses.status(&NOT_ACCEPTABLE), Some(406));
        assert_eq!(statuses.status(&FORBIDDEN), Some(403));
        assert_eq!(statuses.status(&TIMEOUT_REQUEST), Some(408));
    }

    #[test]
    fn unmapped_child_inherits() {
        let statuses = HttpStatuses::with_defaults();
        assert_eq!(statuses.status(&OUT_OF_RANGE), Some(400));
    }

    #[test]
    fn unmapped_root_uses_default() {
        let statuses = HttpStatuses::with_defaults();
        assert_eq!(statuses.status(&AUTH), None);
        assert_eq!(statuses.status_or_default(&AUTH), DEFAULT_HTTP_STATUS);
        assert_eq!(statuses.status_or_default(&TIMEOUT), 400);
    }

    #[test]
    fn application_codes_can_be_added() {
        let mut statuses = HttpStatuses::with_defaults();
        statuses.set(&TEAPOT, 418);
        assert_eq!(statuses.status(&TEAPOT_EMPTY), Some(418));
    }

    #[test]
    fn duplicate_is_reported_by_try_set() {
        let mut statuses = HttpStatuses::new();
        statuses.set(&TEAPOT, 418);
        let conflict = statuses.try_set(&TEAPOT, 500).unwrap_err();
        assert_eq!(conflict.code(), "teapot");
        assert_eq!(statuses.status(&TEAPOT), Some(418));
    }

    #[test]
    #[should_panic(expected = "metadata exists")]
    fn duplicate_set_panics() {
        let mut statuses = HttpStatuses::with_defaults();
        statuses.set(&NOT_FOUND, 410);
    }

    #[test]
    #[should_panic(expected = "invalid HTTP status")]
    fn out_of_range_status_panics() {
        HttpStatuses::new().set(&TEAPOT, 42);
    }
}
