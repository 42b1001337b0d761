// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout Tracker: log runs and rides on a map
//!
//! This crate provides the backend for a map-based workout log: the user
//! clicks a spot on the map, enters distance, duration and a type-specific
//! metric, and the workout is shown as a marker and a list entry and kept
//! across restarts in a key-value store.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use services::Tracker;
use tokio::sync::Mutex;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    /// The single application controller; handlers take turns on it.
    pub tracker: Mutex<Tracker>,
}
