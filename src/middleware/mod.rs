//! HTTP middleware components.
//!
//! Middleware run before route handlers and may short-circuit a request.

/// Basic-auth gate for `/admin`
pub mod admin_auth;
