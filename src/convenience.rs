//! Formatting macros for wrapping.
//!
//! `wrapf!` and its variants are [`crate::wrap`] with a `format!` message.
//! The error argument is an `Option`, as for the functions, so absence passes
//! straight through without formatting anything.
//!
//! ```rust
//! use errcode::{ErrorCode, wrapf, not_found, message};
//!
//! let id = 42;
//! let err = wrapf!(Some(not_found(message("no row"))), "loading user {}", id).unwrap();
//! assert_eq!(err.to_string(), "loading user 42: no row");
//! assert_eq!(err.code().full_path(), "missing");
//! ```

/// Wrap an optional error code with a formatted message.
#[macro_export]
macro_rules! wrapf {
    ($err:expr, $($fmt:tt)+) => {
        $crate::wrap($err, ::std::format_args!($($fmt)+))
    };
}

/// [`wrapf!`] for a [`crate::UserCode`].
#[macro_export]
macro_rules! wrapf_user {
    ($err:expr, $($fmt:tt)+) => {
        $crate::wrap_user($err, ::std::format_args!($($fmt)+))
    };
}

/// [`wrapf!`] for a [`crate::OpCode`].
#[macro_export]
macro_rules! wrapf_op {
    ($err:expr, $($fmt:tt)+) => {
        $crate::wrap_op($err, ::std::format_args!($($fmt)+))
    };
}

#[cfg(test)]
mod tests {
    use crate::capability::{OpCode, UserCode};
    use crate::coded::{CodedError, OpErrCode, UserMsgErrCode, not_found};
    use crate::plain::message;

    #[test]
    fn wrapf_formats_message() {
        let err = wrapf!(Some(not_found(message("gone"))), "step {} of {}", 2, 3).unwrap();
        assert_eq!(err.to_string(), "step 2 of 3: gone");
    }

    #[test]
    fn wrapf_passes_absence_through() {
        let none: Option<CodedError> = None;
        assert!(wrapf!(none, "never {}", "formatted").is_none());
    }

    #[test]
    fn typed_variants_keep_capabilities() {
        let user = UserMsgErrCode::new("retry", not_found(message("gone")));
        let err = wrapf_user!(Some(user), "attempt {}", 1).unwrap();
        assert_eq!(err.user_message(), "retry");

        let op = OpErrCode::new("sync", not_found(message("gone")));
        let err = wrapf_op!(Some(op), "attempt {}", 1).unwrap();
        assert_eq!(err.operation_name(), "sync");
    }
}
