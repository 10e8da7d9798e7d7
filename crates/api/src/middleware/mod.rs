//! HTTP middleware components.

pub mod logging;
pub mod metrics;
pub mod security_headers;
pub mod session;
pub mod trace_id;

pub use metrics::{init_metrics, metrics_handler, metrics_middleware};
pub use security_headers::security_headers_middleware;
pub use session::{redirect_signed_in, require_session};
pub use trace_id::trace_id;
