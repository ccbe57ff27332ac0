//! Integration tests for mediasync

mod cli_test;
mod config_test;
mod helpers;
mod scenario_test;
