// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod cli;
pub mod commands;
pub mod config_lists;
pub mod db;
pub mod error;
pub mod history;
pub mod ledger;
pub mod models;
pub mod settings;
pub mod stats;
pub mod store;
pub mod utils;
