//! Infrastructure layer — production implementations of the application
//! ports: process execution, the `az` and `terraform` adapters, the var
//! file emitter, working-directory scoping, local fs, and the defaults
//! store.

pub mod azure;
pub mod command_runner;
pub mod config;
pub mod fs;
pub mod terraform;
pub mod tfvars;
pub mod workdir;
