// SPDX-License-Identifier: MIT
// Copyright 2026 The Fiturai Authors

//! Middleware modules.

pub mod security;

pub use security::add_security_headers;
