//! Application services — one module per use-case step, plus the deploy
//! orchestrator that sequences them.

pub mod account;
pub mod ddos;
pub mod deploy;
pub mod login;
