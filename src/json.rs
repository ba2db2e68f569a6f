//! Client-facing JSON projection.
//!
//! [`JsonFormat`] is the record an API boundary sends to clients:
//!
//! ```json
//! { "code": "input", "msg": "please retry", "data": null,
//!   "operation": "save", "others": [ ... ] }
//! ```
//!
//! `operation` and `others` are left out when empty. `data` is always present
//! and is `null` when nothing in the chain supplies client data.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::capability::{AnyCode, AnyError, get_user_msg, operation_client_data};
use crate::chain::{all_codes, resolve};

/// Serializable summary of an [`crate::ErrorCode`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonFormat {
    /// Full code path.
    pub code: String,
    /// User message, or the error's display string when there is none.
    pub msg: String,
    /// Client data from the first link that has some.
    pub data: Option<Value>,
    /// Operation label, empty when unknown.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub operation: String,
    /// Every other code in the error, each without its own `others`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub others: Vec<JsonFormat>,
}

impl JsonFormat {
    /// Project a resolved code.
    ///
    /// ```rust
    /// use std::sync::Arc;
    /// use errcode::{AnyCode, JsonFormat, UserMsg, invalid_input, message};
    ///
    /// let err = UserMsg::new("check the email field")
    ///     .unwrap()
    ///     .add_to(invalid_input(message("missing @")));
    /// let code: AnyCode = Arc::new(err);
    ///
    /// let json = JsonFormat::from_code(&code);
    /// assert_eq!(json.code, "input");
    /// assert_eq!(json.msg, "check the email field");
    /// assert!(json.data.is_none());
    /// ```
    pub fn from_code(code: &AnyCode) -> Self {
        let err: AnyError = code.clone();
        let others = all_codes(&err)
            .iter()
            .skip(1)
            .map(|other| Self::single(other, Vec::new()))
            .collect();
        Self::single(code, others)
    }

    /// Resolve `err` and project the result. `None` when it has no code.
    pub fn from_error(err: &AnyError) -> Option<Self> {
        resolve(err).map(|code| Self::from_code(&code))
    }

    fn single(code: &AnyCode, others: Vec<JsonFormat>) -> Self {
        let err: AnyError = code.clone();
        let (operation, data) = operation_client_data(&err);
        let msg = get_user_msg(&err)
            .filter(|msg| !msg.is_empty())
            .unwrap_or_else(|| code.to_string());
        Self {
            code: code.code().full_path(),
            msg,
            data,
            operation: operation.unwrap_or_default(),
            others,
        }
    }
}
