// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod analytics;
pub mod cli;
pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod store;
pub mod utils;

pub use analytics::{AnalyticsOptions, compute_analytics, compute_analytics_json};
pub use error::{AnalyticsError, StoreError};
