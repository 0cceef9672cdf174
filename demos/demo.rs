//! Walk through the output styles and configuration shortcuts.
//!
//! Run with: `cargo run --example demo`

use std::collections::HashMap;
use unilog::prelude::*;

fn main() {
    let state = LoggingState::new();

    // NOTE: caching is disabled just for the demo, so each section gets a
    // freshly constructed logger.
    let demo_options = || ConfigureOptions::new().cache_struct_loggers(false);

    state.configure(demo_options()).unwrap();
    state
        .logger("demo")
        .info_event("Autoconfigured with defaults")
        .field("text", "foo")
        .field("i", 1)
        .log();
    state.text_logger("STDLIB").warning("Text logger coming through");

    state
        .configure(demo_options().style(Style::TextColor))
        .unwrap();
    state
        .logger("demo")
        .info_event("Plain text, colors (forced)")
        .field("text", "foo")
        .field("i", 1)
        .log();

    state
        .configure(demo_options().style(Style::TextNoColor))
        .unwrap();
    state
        .logger("demo")
        .info_event("Plain text, no colors")
        .field("text", "foo")
        .field("i", 1)
        .log();

    state.configure(demo_options().style(Style::Json)).unwrap();
    state
        .logger("demo")
        .info_event("Json, no colors")
        .field("text", "foo")
        .field("i", 1)
        .log();

    state
        .configure(demo_options().logger_conf("dbg", LogLevel::Debug))
        .unwrap();
    state
        .logger("dbg")
        .debug_event("This particular logger is in debug level")
        .field("text", "foo")
        .field("i", 1)
        .log();

    std::env::set_var(unilog::ENV_FORCE_TEXT, "1");
    state.configure(demo_options()).unwrap();
    state
        .logger("demo")
        .info_event("Autoconfigured with forced text")
        .field("text", "foo")
        .field("i", 1)
        .log();
    std::env::remove_var(unilog::ENV_FORCE_TEXT);

    state
        .configure(
            demo_options()
                .fmt("{asctime} {levelname} -- {message}{context}")
                .datefmt("%H:%M:%S"),
        )
        .unwrap();
    state
        .logger("demo")
        .info_event("Custom format and timestamp")
        .field("text", "foo")
        .field("i", 1)
        .log();

    let mut formatters = HashMap::new();
    formatters.insert(
        "simple".to_string(),
        unilog::core::FormatterSpec {
            kind: unilog::core::FormatterKind::Text,
            fmt: "<your format goes here> {message}".to_string(),
            datefmt: DEFAULT_DATEFMT.to_string(),
        },
    );
    let mut handlers = HashMap::new();
    handlers.insert(
        "console".to_string(),
        unilog::core::HandlerSpec {
            level: LogLevel::Info,
            formatter: "simple".to_string(),
            stream: StreamTarget::Stderr,
        },
    );
    let full_conf = Configuration {
        version: 1,
        disable_existing_loggers: false,
        formatters,
        handlers,
        loggers: HashMap::new(),
        root: unilog::core::RootConfig {
            level: LogLevel::Info,
            handlers: vec!["console".to_string()],
        },
    };
    state
        .configure(demo_options().full_conf(full_conf))
        .unwrap();
    state.text_logger("FULLCONF").info("Fully custom formatting");
}
