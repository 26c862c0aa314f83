//! Delivery adapters connecting the vibetodo core to the outside world.
//!
//! Two channels share one core (`vt-core`):
//! - a REST JSON API consumed by the Telegram mini app front-end
//! - the Telegram webhook, which feeds chat commands to the executor and
//!   sends replies through `vt-telegram`
//!
//! Both are translation layers only: request shape in, store/executor
//! call, response shape out.
//!
//! Key modules:
//! - [`http_api`] — Axum router, handlers, shared state
//! - [`api_error`] — unified HTTP error mapping

pub mod api_error;
pub mod http_api;
