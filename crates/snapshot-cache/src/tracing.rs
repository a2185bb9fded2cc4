//! # Observability & Tracing
//!
//! The [`setup_tracing`] function initializes structured logging with the `tracing` crate.
//!
//! ## Configuration
//!
//! The output uses a compact format that hides the crate/module prefix (`with_target(false)`).
//! Every event carries a `source` field instead, so lines stay short and still say which
//! cache they came from.
//!
//! ## What Gets Traced
//!
//! - **Cache task lifecycle**: startup (with the TTL) and shutdown (with the load count)
//! - **Population**: each load at `info` with `records`, `warnings` and `elapsed_ms`
//! - **Warnings**: one event per skipped input unit, emitted by the source's `on_warning` hook
//! - **Failures**: failed loads at `error`, before the error is handed to the waiting callers
//! - **Collapsing**: requests answered by another request's load, at `debug`
//!
//! ## Usage Examples
//!
//! ```bash
//! # Loads and failures only
//! RUST_LOG=info cargo run
//!
//! # Include collapsed requests and per-call spans
//! RUST_LOG=debug cargo run
//!
//! # Include fresh-slot hits (very verbose)
//! RUST_LOG=trace cargo run
//! ```
//!
//! ## Example Output
//!
//! **With `RUST_LOG=info`**:
//!
//! ```text
//! INFO Cache task started source="wwwroot/products.xml" ttl_secs=600
//! WARN Skipped malformed product path="wwwroot/products.xml" index=6 position=369 cause=Invalid price: abc
//! INFO Snapshot published source="wwwroot/products.xml" records=7 warnings=3 elapsed_ms=2
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // The `source` field identifies the cache
        .compact()
        .init();
}
