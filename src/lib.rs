//! # errcode
//!
//! Hierarchical error codes for services that report errors to clients.
//!
//! ## Design Philosophy
//!
//! 1. **Codes are stable identifiers**: a dot-separated path such as
//!    `state.exists` is the contract with clients; messages are not
//! 2. **Classification never loses context**: wrapping, annotating and
//!    grouping keep the original error and its message reachable
//! 3. **Metadata is inherited**: a status mapped on `state` applies to every
//!    code below it unless overridden
//! 4. **Absence is a value**: no code, no operation and no client data are all
//!    `None`, never an error
//! 5. **Misuse fails fast**: malformed code definitions fail the build when
//!    declared as statics
//!
//! ## Layers
//!
//! - [`Code`] and [`MetaData`]: the hierarchy and per-code tables
//! - [`Chained`], [`ErrorCode`], [`UserCode`], [`OpCode`]: capabilities an
//!   error can expose
//! - [`CodedError`], [`OpErrCode`], [`UserMsgErrCode`], [`Wrapped`]: ways to
//!   attach a code, an operation, a user message or context
//! - [`resolve`], [`all_codes`], [`combine`]: reduce any chain to its code(s)
//! - [`JsonFormat`], [`HttpStatuses`], [`ErrorLog`]: what a boundary sends,
//!   returns and logs
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use errcode::{
//!     AnyError, ErrorCode, HttpStatuses, JsonFormat, UserMsg, annotate, define_codes,
//!     definitions, message, resolve, CodedError,
//! };
//!
//! define_codes! {
//!     pub static MISSING_FIELD = "missing" in definitions::INVALID_INPUT;
//! }
//!
//! fn parse(body: &str) -> errcode::Result<()> {
//!     if body.is_empty() {
//!         let err = CodedError::new(message("field `name` is required"), &MISSING_FIELD);
//!         let err = UserMsg::new("Please provide a name").unwrap().add_to(err);
//!         return Err(Arc::new(err));
//!     }
//!     Ok(())
//! }
//!
//! let err: AnyError = annotate(parse("").unwrap_err(), "creating account");
//!
//! let code = resolve(&err).unwrap();
//! let statuses = HttpStatuses::with_defaults();
//! assert_eq!(code.code().full_path(), "input.missing");
//! assert_eq!(statuses.status_or_default(code.code()), 400);
//!
//! let json = JsonFormat::from_code(&code);
//! assert_eq!(json.msg, "Please provide a name");
//! ```
//!
//! ## Features
//!
//! - `tracing` (default): [`ErrorLog::emit`] and a debug event when
//!   [`HttpStatuses::status_or_default`] falls back

#![warn(missing_docs)]
#![warn(clippy::all)]

use std::result;

pub mod capability;
pub mod chain;
pub mod coded;
pub mod codes;
pub mod convenience;
pub mod definitions;
pub mod group;
pub mod http;
pub mod json;
pub mod logging;
pub mod plain;
pub mod wrap;

pub use capability::*;
pub use chain::*;
pub use coded::*;
pub use codes::*;
pub use group::*;
pub use http::*;
pub use json::*;
pub use logging::*;
pub use plain::*;
pub use wrap::*;

/// Result whose error is any chain member.
pub type Result<T> = result::Result<T, AnyError>;
