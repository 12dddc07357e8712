//! Domain types and pure logic for the Questlog backend.
//!
//! Nothing in this crate performs I/O. Persistence lives in `questlog-db`
//! and delivery in `questlog-events`.

pub mod campaign;
pub mod email_template;
pub mod error;
pub mod types;
