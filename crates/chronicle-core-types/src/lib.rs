//! Core types shared across Chronicle facilities
//!
//! This crate provides the canonical structured-logging vocabulary used by
//! the logging macros in `chronicle-core` and by anything that asserts on
//! captured log events:
//!
//! - **Schema constants**: canonical field keys and event names

pub mod schema;
