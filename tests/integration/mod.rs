pub mod bootstrap_flow;
pub mod cli_run;
pub mod config_integration;
pub mod test_utils;
