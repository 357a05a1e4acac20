//! # gatherconf demo application
//!
//! A sample tool that resolves its settings from the real process argv and
//! environment. It exists to demonstrate and manually verify gatherconf.
//!
//! ## Running
//!
//! ```sh
//! cargo run --example gather_demo
//! cargo run --example gather_demo -- --port 0x1F90 -v
//! ```
//!
//! | Feature             | How to exercise it                                             |
//! |---------------------|----------------------------------------------------------------|
//! | Fallbacks           | `cargo run --example gather_demo`                              |
//! | Env value           | `DEMO_HOST=0.0.0.0 cargo run --example gather_demo`            |
//! | Argv beats env      | `DEMO_PORT=1 cargo run --example gather_demo -- --port 2`      |
//! | Env beats argv      | `DEMO_PREFER_ENV=1 DEMO_PORT=1 cargo run --example gather_demo -- -p 2` |
//! | Short-flag runs     | `cargo run --example gather_demo -- -vq`                       |
//! | Warnings            | `cargo run --example gather_demo -- --port eighty`             |
//! | Unexpected flags    | `cargo run --example gather_demo -- --nope`                    |
//! | Manifest            | `name` and `quiet` are declared in TOML below                  |

use gatherconf::{Gatherer, Kind, ValueDescriptor};

const MANIFEST: &str = r#"
[[value]]
kind = "string"
nameArgvLong = "name"
nameEnv = "DEMO_NAME"
nameReturned = "name"
fallback = "world"
note = "Who to greet."

[[value]]
kind = "boolean"
nameArgvShort = "q"
nameReturned = "quiet"
fallback = false
"#;

fn main() {
    let prefer_env = std::env::var_os("DEMO_PREFER_ENV").is_some();

    let result = Gatherer::builder()
        .descriptor(
            ValueDescriptor::new(Kind::String, "host")
                .long("host")
                .env("DEMO_HOST")
                .fallback("localhost"),
        )
        .descriptor(
            ValueDescriptor::new(Kind::Number, "port")
                .long("port")
                .short('p')
                .env("DEMO_PORT")
                .fallback(8080),
        )
        .descriptor(
            ValueDescriptor::new(Kind::Boolean, "verbose")
                .long("verbose")
                .short('v')
                .fallback(false),
        )
        .manifest(MANIFEST)
        .prefer_env(prefer_env)
        .begin("gather_demo")
        .gather();

    let config = match result {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Config error:\n{e}");
            std::process::exit(1);
        }
    };

    eprint!("{}", config.warnings_text());
    if config.get_bool("quiet") != Some(true) {
        println!("{config}");
    }
    if config.get_bool("verbose") == Some(true) {
        match serde_json::to_string_pretty(&config) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("Failed to render JSON: {e}"),
        }
    }
}
