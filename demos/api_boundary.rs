//! A request handler and the boundary that turns its errors into responses.
//!
//! The handler classifies what it knows about; everything else arrives as a
//! plain error and is reported as `internal` by the boundary.

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use errcode::{
    AnyCode, AnyError, Chained, Code, ErrorCode, ErrorLog, HttpStatuses, JsonFormat, UserMsg,
    annotate, define_codes, definitions, foreign, internal, resolve, wrapf,
};
use serde_json::{Value, json};

define_codes! {
    static ACCOUNT = "account";
    static ACCOUNT_LOCKED = "account.locked" in ACCOUNT;
}

#[derive(Debug)]
struct AccountLocked {
    user: String,
    retry_after_secs: u64,
}

impl fmt::Display for AccountLocked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "account {} is locked", self.user)
    }
}

impl StdError for AccountLocked {}

impl Chained for AccountLocked {
    fn into_error_code(self: Arc<Self>) -> Option<AnyCode> {
        Some(self)
    }

    fn client_data(&self) -> Option<Value> {
        Some(json!({ "retry_after_secs": self.retry_after_secs }))
    }
}

impl ErrorCode for AccountLocked {
    fn code(&self) -> &'static Code {
        &ACCOUNT_LOCKED
    }
}

fn handle(request: &str) -> errcode::Result<String> {
    match request {
        "login alice" => {
            let locked = AccountLocked {
                user: "alice".into(),
                retry_after_secs: 300,
            };
            let err = UserMsg::new("Too many attempts, try again later")
                .expect("literal message is not empty")
                .add_to(locked);
            Err(Arc::new(err))
        }
        "profile 7" => {
            let err = errcode::not_found(errcode::message("no row with id 7"));
            let err = wrapf!(Some(err), "loading profile {}", 7).expect("error is present");
            Err(Arc::new(err))
        }
        "export" => {
            let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "/var/export");
            Err(annotate(foreign(io), "writing export"))
        }
        _ => Ok(format!("handled {request}")),
    }
}

/// Turn any handler error into a status and a body.
fn respond(err: AnyError, statuses: &HttpStatuses) -> (u16, String) {
    let code = resolve(&err).unwrap_or_else(|| Arc::new(internal(err)) as AnyCode);

    #[cfg(feature = "tracing")]
    ErrorLog::new(&code).emit();
    eprintln!("log: {}", ErrorLog::new(&code));

    let body = serde_json::to_string(&JsonFormat::from_code(&code))
        .unwrap_or_else(|_| json!({ "code": definitions::INTERNAL.full_path() }).to_string());
    (statuses.status_or_default(code.code()), body)
}

fn main() {
    let mut statuses = HttpStatuses::with_defaults();
    statuses.set(&ACCOUNT_LOCKED, 423);

    for request in ["login alice", "profile 7", "export", "ping"] {
        println!("> {request}");
        match handle(request) {
            Ok(body) => println!("  200 {body}"),
            Err(err) => {
                let (status, body) = respond(err, &statuses);
                println!("  {status} {body}");
            }
        }
    }
}
