//! Integration tests for the logging facade
//!
//! These tests verify:
//! - Style resolution across environment-override combinations
//! - Uniform output between the structured and text paths
//! - Context variable injection on both paths
//! - Full-override configuration trees
//! - JSON output hygiene (severity key, no ANSI)

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, OnceLock};
use unilog::prelude::*;
use unilog::{ENV_FORCE_TEXT, ENV_FORCE_TEXT_COLOR, ENV_FORCE_TEXT_NO_COLOR, ENV_MESSAGE_FORMAT};

const ALL_VARS: &[&str] = &[
    ENV_FORCE_TEXT_COLOR,
    ENV_FORCE_TEXT_NO_COLOR,
    ENV_FORCE_TEXT,
    ENV_MESSAGE_FORMAT,
];

fn env_lock() -> &'static Mutex<()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
}

/// Serializes env access across tests and restores the facade's variables
/// on drop.
struct EnvGuard {
    saved: Vec<(&'static str, Option<String>)>,
    _lock: MutexGuard<'static, ()>,
}

impl EnvGuard {
    fn clear() -> Self {
        let lock = env_lock().lock().unwrap_or_else(|e| e.into_inner());
        let saved = ALL_VARS
            .iter()
            .map(|&name| {
                let previous = std::env::var(name).ok();
                std::env::remove_var(name);
                (name, previous)
            })
            .collect();
        Self {
            saved,
            _lock: lock,
        }
    }

    fn set(name: &str, value: &str) -> Self {
        let guard = Self::clear();
        std::env::set_var(name, value);
        guard
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (name, previous) in self.saved.drain(..) {
            match previous {
                Some(value) => std::env::set_var(name, value),
                None => std::env::remove_var(name),
            }
        }
    }
}

fn configured(options: ConfigureOptions) -> (LoggingState, StreamTarget) {
    let stream = StreamTarget::memory();
    let state = LoggingState::new();
    state.configure(options.stream(stream.clone())).unwrap();
    (state, stream)
}

fn captured(stream: &StreamTarget) -> String {
    stream.buffer().unwrap().contents()
}

#[test]
fn test_style_resolution_env_combinations() {
    use unilog::core::resolve;

    {
        let _env = EnvGuard::clear();
        // no override: explicit concrete requests pass through...
        assert_eq!(resolve(Style::Json, Some(true)), Style::Json);
        // ...and auto follows interactivity
        assert_eq!(resolve(Style::Auto, Some(false)), Style::Json);
        assert_eq!(resolve(Style::Auto, Some(true)), Style::TextColor);
    }
    {
        let _env = EnvGuard::set(ENV_FORCE_TEXT, "1");
        assert_eq!(resolve(Style::Json, Some(false)), Style::TextNoColor);
        // forced text on an interactive stream still gets color
        assert_eq!(resolve(Style::Json, Some(true)), Style::TextColor);
    }
    {
        let _env = EnvGuard::set(ENV_FORCE_TEXT_COLOR, "1");
        assert_eq!(resolve(Style::Json, Some(false)), Style::TextColor);
    }
    {
        let _env = EnvGuard::set(ENV_FORCE_TEXT_NO_COLOR, "1");
        assert_eq!(resolve(Style::TextColor, Some(true)), Style::TextNoColor);
    }
}

#[test]
fn test_auto_style_on_memory_stream_is_json() {
    let _env = EnvGuard::clear();
    // a memory stream cannot report interactivity, which counts as
    // non-interactive, which means JSON
    let (state, stream) = configured(ConfigureOptions::new());

    state.text_logger("app").info("hello");

    let parsed: serde_json::Value = serde_json::from_str(captured(&stream).trim_end()).unwrap();
    assert_eq!(parsed["message"], "hello");
    assert_eq!(parsed["severity"], "INFO");
}

#[test]
fn test_forced_color_survives_non_tty_stream() {
    let _env = EnvGuard::set(ENV_FORCE_TEXT_COLOR, "1");
    let (state, stream) = configured(ConfigureOptions::new().fmt("{levelname} {message}"));

    state.text_logger("app").info("tinted");

    let out = captured(&stream);
    assert!(out.contains('\x1b'), "expected ANSI in {:?}", out);
    assert!(out.contains("tinted"));
}

#[test]
fn test_structured_and_text_paths_render_identically() {
    let _env = EnvGuard::set(ENV_FORCE_TEXT_NO_COLOR, "1");
    let (state, stream) =
        configured(ConfigureOptions::new().fmt("{name} {levelname} ## {message}{context}"));

    state.text_logger("app").info("steady");
    state.logger("app").info_event("steady").log();

    let out = captured(&stream);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], lines[1]);
    assert_eq!(lines[0], "app INFO ## steady");
}

#[test]
fn test_event_fields_flatten_in_insertion_order() {
    let _env = EnvGuard::set(ENV_FORCE_TEXT_NO_COLOR, "1");
    let (state, stream) = configured(ConfigureOptions::new().fmt("{message}{context}"));

    state
        .logger("app")
        .info_event("hello")
        .field("user", "bob")
        .field("n", 3)
        .log();

    assert_eq!(captured(&stream), "hello    user=\"bob\" n=3\n");
}

#[test]
fn test_contextvars_on_both_paths() {
    let _env = EnvGuard::set(ENV_FORCE_TEXT_NO_COLOR, "1");
    let request_id = ContextVar::new("request_id");
    let (state, stream) = configured(
        ConfigureOptions::new()
            .fmt("{message}{context}{contextvars}")
            .contextvar(request_id.clone()),
    );

    let _guard = request_id.set("Zf1glE");
    state.text_logger("app").info("direct");
    state.logger("app").info_event("event").field("k", 1).log();

    let out = captured(&stream);
    let lines: Vec<&str> = out.lines().collect();
    // text path: no event context, so contextvars take the full padding
    assert_eq!(lines[0], "direct    request_id=\"Zf1glE\"");
    // structured path: one space between event context and contextvars
    assert_eq!(lines[1], "event    k=1 request_id=\"Zf1glE\"");
}

#[test]
fn test_unset_contextvar_is_skipped() {
    let _env = EnvGuard::set(ENV_FORCE_TEXT_NO_COLOR, "1");
    let ghost = ContextVar::new("ghost");
    let (state, stream) = configured(
        ConfigureOptions::new()
            .fmt("{message}{contextvars}")
            .contextvar(ghost),
    );

    state.text_logger("app").info("alone");
    assert_eq!(captured(&stream), "alone    \n");
}

#[test]
fn test_json_severity_and_no_ansi_with_contextvars() {
    let _env = EnvGuard::clear();
    let request_id = ContextVar::new("request_id");
    let (state, stream) = configured(
        ConfigureOptions::new()
            .style(Style::Json)
            .contextvar(request_id.clone()),
    );

    let _guard = request_id.set("abc");
    state.text_logger("app").error("exploded");

    let out = captured(&stream);
    assert!(!out.contains('\x1b'));

    let parsed: serde_json::Value = serde_json::from_str(out.trim_end()).unwrap();
    assert_eq!(parsed["severity"], "ERROR");
    assert_eq!(parsed["levelname"], "ERROR");
    assert_eq!(parsed["contextvars"], "request_id=\"abc\"");
}

#[test]
fn test_configure_twice_is_idempotent() {
    let _env = EnvGuard::set(ENV_FORCE_TEXT_NO_COLOR, "1");
    let stream = StreamTarget::memory();
    let state = LoggingState::new();
    let options = ConfigureOptions::new()
        .fmt("{name} {levelname} {message}{context}")
        .logger_conf("app.db", LogLevel::Debug)
        .stream(stream.clone());

    state.configure(options.clone()).unwrap();
    state.logger("app.db").debug_event("ping").field("i", 1).log();
    let once = captured(&stream);

    stream.buffer().unwrap().clear();
    state.configure(options).unwrap();
    state.logger("app.db").debug_event("ping").field("i", 1).log();

    assert_eq!(captured(&stream), once);
}

#[test]
fn test_list_and_map_logger_confs_are_equivalent() {
    let _env = EnvGuard::set(ENV_FORCE_TEXT_NO_COLOR, "1");

    let effective = |options: ConfigureOptions| {
        let stream = StreamTarget::memory();
        let state = LoggingState::new();
        state
            .configure(options.fmt("{message}").stream(stream.clone()))
            .unwrap();
        state.text_logger("a.b").debug("survived");
        captured(&stream)
    };

    let via_map = effective(ConfigureOptions::new().logger_conf("a.b", LogLevel::Debug));
    let via_list =
        effective(
            ConfigureOptions::new().logger_confs_list(vec![NamedLoggerDirective {
                name: "a.b".to_string(),
                level: LogLevel::Debug,
            }]),
        );

    assert_eq!(via_map, via_list);
    assert_eq!(via_map, "survived\n");
}

#[test]
fn test_list_overrides_map_on_collision() {
    let _env = EnvGuard::set(ENV_FORCE_TEXT_NO_COLOR, "1");
    let stream = StreamTarget::memory();
    let state = LoggingState::new();
    state
        .configure(
            ConfigureOptions::new()
                .fmt("{message}")
                .logger_conf("noisy", LogLevel::Debug)
                .logger_confs_list(vec![NamedLoggerDirective {
                    name: "noisy".to_string(),
                    level: LogLevel::Error,
                }])
                .stream(stream.clone()),
        )
        .unwrap();

    state.text_logger("noisy").debug("muted");
    state.text_logger("noisy").error("heard");
    assert_eq!(captured(&stream), "heard\n");
}

#[test]
fn test_full_conf_is_used_verbatim() {
    let _env = EnvGuard::clear();
    let stream = StreamTarget::memory();

    let mut formatters = HashMap::new();
    formatters.insert(
        "simple".to_string(),
        unilog::core::FormatterSpec {
            kind: unilog::core::FormatterKind::Text,
            fmt: "<custom> {message}".to_string(),
            datefmt: DEFAULT_DATEFMT.to_string(),
        },
    );
    let mut handlers = HashMap::new();
    handlers.insert(
        "console".to_string(),
        unilog::core::HandlerSpec {
            level: LogLevel::Info,
            formatter: "simple".to_string(),
            stream: stream.clone(),
        },
    );
    let full = Configuration {
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

    let state = LoggingState::new();
    state
        .configure(
            ConfigureOptions::new()
                .style(Style::Json)
                .fmt("{levelname} IGNORED")
                .full_conf(full.clone()),
        )
        .unwrap();

    // the builder's style/format options did not touch the tree
    assert_eq!(state.configuration(), full);

    state.text_logger("anything").info("custom formatting");
    assert_eq!(captured(&stream), "<custom> custom formatting\n");
}

#[test]
fn test_broken_full_conf_fails_configure() {
    let _env = EnvGuard::clear();
    let full = Configuration {
        version: 1,
        disable_existing_loggers: false,
        formatters: HashMap::new(),
        handlers: HashMap::from([(
            "console".to_string(),
            unilog::core::HandlerSpec {
                level: LogLevel::Debug,
                formatter: "missing".to_string(),
                stream: StreamTarget::memory(),
            },
        )]),
        loggers: HashMap::new(),
        root: unilog::core::RootConfig {
            level: LogLevel::Info,
            handlers: vec!["console".to_string()],
        },
    };

    let state = LoggingState::new();
    let err = state
        .configure(ConfigureOptions::new().full_conf(full))
        .unwrap_err();
    assert!(matches!(err, ConfigError::UnknownFormatter { .. }));
}

#[test]
fn test_env_message_format_override() {
    let _env = EnvGuard::set(ENV_MESSAGE_FORMAT, "{levelname} -- {message}");
    let (state, stream) = configured(
        ConfigureOptions::new()
            .style(Style::TextNoColor)
            .fmt("builder fmt loses {message}"),
    );

    state.text_logger("app").warning("watch out");
    assert_eq!(captured(&stream), "WARNING -- watch out\n");
}

#[test]
fn test_exc_info_appended_after_record() {
    let _env = EnvGuard::set(ENV_FORCE_TEXT_NO_COLOR, "1");
    let (state, stream) = configured(ConfigureOptions::new().fmt("{message}{context}"));

    state
        .logger("app")
        .error_event("failed")
        .field("attempt", 2)
        .exc_info("stack frame 0\nstack frame 1")
        .log();

    let out = captured(&stream);
    // exc_info never flattens into the context
    assert!(out.starts_with("failed    attempt=2\n"));
    assert!(out.contains("stack frame 0\nstack frame 1\n"));
}

#[test]
fn test_custom_datefmt() {
    let _env = EnvGuard::set(ENV_FORCE_TEXT_NO_COLOR, "1");
    let (state, stream) = configured(
        ConfigureOptions::new()
            .fmt("{asctime} {message}")
            .datefmt("%Y"),
    );

    state.text_logger("app").info("dated");
    let out = captured(&stream);
    let year: i32 = out.split(' ').next().unwrap().parse().unwrap();
    assert!((2024..2100).contains(&year));
}

#[test]
fn test_default_pattern_renders_all_sections() {
    let _env = EnvGuard::set(ENV_FORCE_TEXT_NO_COLOR, "1");
    let (state, stream) = configured(ConfigureOptions::new());

    let logger = state.text_logger("app.web");
    unilog::info!(logger, "served {} requests", 3);

    let out = captured(&stream);
    assert!(out.contains("app.web"));
    assert!(out.contains("INFO"));
    assert!(out.contains("## served 3 requests"));
    // call-site capture fills the location tail
    assert!(out.contains("integration_tests"));
    assert!(out.contains("test_default_pattern_renders_all_sections"));
}

#[test]
fn test_concurrent_logging_after_configure() {
    let _env = EnvGuard::set(ENV_FORCE_TEXT_NO_COLOR, "1");
    let (state, stream) = configured(ConfigureOptions::new().fmt("{message}{context}"));

    let threads: Vec<_> = (0..8)
        .map(|t| {
            let logger = state.logger("app");
            std::thread::spawn(move || {
                for i in 0..50 {
                    logger
                        .info_event("tick")
                        .field("thread", t)
                        .field("i", i)
                        .log();
                }
            })
        })
        .collect();
    for thread in threads {
        thread.join().unwrap();
    }

    let out = captured(&stream);
    assert_eq!(out.lines().count(), 400);
    assert!(out.lines().all(|line| line.starts_with("tick    thread=")));
}
