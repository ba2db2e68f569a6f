use std::sync::Arc;

use errcode::{
    AnyCode, ErrorCode, ErrorLog, HttpStatuses, JsonFormat, Op, Result, annotate, define_codes,
    definitions, message, not_found, resolve,
};

define_codes! {
    static CONFIG = "config";
    static CONFIG_SYNTAX = "config.syntax" in CONFIG;
}

fn load_configuration(path: &str) -> Result<()> {
    // Simulate a failure to parse a configuration file
    if path == "bad_config.toml" {
        let err = errcode::CodedError::new(
            message("unexpected EOF at line 42"),
            &CONFIG_SYNTAX,
        );
        let err = Op::new("load_configuration")
            .expect("literal label is not empty")
            .add_to(err);
        return Err(Arc::new(err));
    }
    Ok(())
}

fn main() {
    let mut statuses = HttpStatuses::with_defaults();
    statuses.set(&CONFIG, 500);

    println!("--- Basic Usage Example ---\n");

    match load_configuration("bad_config.toml") {
        Ok(_) => println!("Success!"),
        Err(err) => {
            // Add context on the way up; the code is unaffected.
            let err = annotate(err, "starting server");
            let code = resolve(&err).expect("error carries a code");

            println!("1. [RESPONSE] What the client receives:");
            println!("   HTTP {}", statuses.status_or_default(code.code()));
            println!(
                "   {}",
                serde_json::to_string_pretty(&JsonFormat::from_code(&code))
                    .expect("projection is plain JSON")
            );

            println!("\n2. [LOG] What the operator sees:");
            println!("   {}", ErrorLog::new(&code));
        }
    }

    // An error with no mapping of its own falls back on its ancestors.
    let missing: AnyCode = Arc::new(not_found(message("no such profile")));
    println!("\n3. [INHERITANCE]");
    println!(
        "   {} -> HTTP {}",
        missing.code(),
        statuses.status_or_default(missing.code())
    );
    println!(
        "   {} -> HTTP {}",
        definitions::OUT_OF_RANGE,
        statuses.status_or_default(&definitions::OUT_OF_RANGE)
    );
}
