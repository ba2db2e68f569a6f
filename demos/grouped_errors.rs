//! Validating a form and reporting every problem at once.

use std::sync::Arc;

use errcode::{
    AnyCode, AnyError, ErrorCode, JsonFormat, all_codes, annotate, combine, define_codes,
    definitions, group, invalid_input, message, resolve, wraps,
};

define_codes! {
    static FIELD_REQUIRED = "required" in definitions::INVALID_INPUT;
    static FIELD_FORMAT = "format" in definitions::INVALID_INPUT;
}

fn check(name: &str, email: &str, age: &str) -> Vec<AnyError> {
    let mut problems: Vec<AnyError> = Vec::new();

    if name.is_empty() {
        let err = errcode::CodedError::new(message("value is empty"), &FIELD_REQUIRED);
        let err = wraps(Some(err), "field", &[("name", &"name")]).expect("error is present");
        problems.push(Arc::new(err));
    }
    if !email.contains('@') {
        let err = errcode::CodedError::new(message("missing @"), &FIELD_FORMAT);
        let err = wraps(Some(err), "field", &[("name", &"email")]).expect("error is present");
        problems.push(Arc::new(err));
    }
    if age.parse::<u8>().is_err() {
        // Not classified: kept in the report but contributes no code.
        problems.push(message(format!("age {age:?} ignored")));
    }

    problems
}

fn main() {
    let problems = check("", "bob.example.com", "old");
    println!("--- {} problems ---", problems.len());

    // Report them under one error, with context on top.
    let err = annotate(group(problems.clone()), "validating signup");
    let code = resolve(&err).expect("at least one problem is coded");

    println!("primary code: {}", code.code());
    for other in all_codes(&err) {
        println!("  includes:   {}", other.code());
    }
    println!(
        "{}",
        serde_json::to_string_pretty(&JsonFormat::from_code(&code)).expect("plain JSON")
    );

    // Building the aggregate directly, without a group value.
    let primary: AnyCode = Arc::new(invalid_input(message("form rejected")));
    let combined = combine(Some(primary), problems).expect("primary is present");
    println!("\ncombined: {combined}");
}
