// SPDX-License-Identifier: MIT
// Copyright 2026 The Fiturai Authors

//! Data models for the application.

pub mod user;

pub use user::User;
