// SPDX-License-Identifier: MIT
// Copyright 2026 The CodeDIY Authors

//! Middleware modules (authentication, security headers).

pub mod auth;
pub mod security;

pub use auth::{create_jwt, require_auth, AuthUser};
pub use security::add_security_headers;
