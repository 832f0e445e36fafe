//! # Blog Core
//!
//! The domain layer of the Blog API.
//! This crate contains the content model, its query rules and the ports that
//! infrastructure implements. It has zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;

pub use error::DomainError;
