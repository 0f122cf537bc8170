//! Integration tests for the azprov binary.
//!
//! These run the real binary but never reach az or Terraform — they cover
//! the CLI surface and the configuration checks that fail before any
//! external call.
