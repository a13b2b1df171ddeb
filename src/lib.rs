//! octocov-config: configuration core for coverage reporting.
//!
//! Locates and loads `.octocov.yml`, expands environment references,
//! gates report persistence on a `datastore.if` expression, validates the
//! datastore and central sections, and maps coverage numbers to color bands.

pub mod acceptance;
pub mod cli;
pub mod commands;
pub mod condition;
pub mod config;
pub mod env;
pub mod error;
pub mod event;
pub mod exit_codes;
pub mod grade;
