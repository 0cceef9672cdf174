//! Context variables flowing into log output, one scope per worker.
//!
//! Run with: `cargo run --example context_vars`

use unilog::prelude::*;

fn handle_request(state: &LoggingState, request_id_var: &ContextVar, request_id: &str) {
    let _guard = request_id_var.set(request_id);
    // Will produce "Handling request    request_id=..."
    state.logger("server").info_event("Handling request").log();
}

fn main() {
    let request_id_var = ContextVar::new("request_id");

    let state = LoggingState::new();
    state
        .configure(ConfigureOptions::new().contextvar(request_id_var.clone()))
        .unwrap();

    state
        .logger("server")
        .info_event("Main server handling two requests")
        .log();

    let threads: Vec<_> = ["Zf1glE", "YcEf73"]
        .into_iter()
        .map(|request_id| {
            let logger = state.logger("server");
            let var = request_id_var.clone();
            std::thread::spawn(move || {
                let _guard = var.set(request_id);
                logger.info_event("Handling request").log();
            })
        })
        .collect();
    for thread in threads {
        thread.join().unwrap();
    }

    handle_request(&state, &request_id_var, "inline-1");

    state.logger("server").info_event("Main server done").log();
}
