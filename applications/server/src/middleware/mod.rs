/// HTTP middleware
pub mod gate;

pub use gate::{gate_middleware, AUTH_COOKIE, AUTH_COOKIE_VALUE};
