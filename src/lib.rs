//! Solaris Mission Control lead capture service.
//!
//! Backs the hackathon landing page's email form: a visitor's address is
//! validated, stored as a lead, and answered with the recruitment letter.
//!
//! # Modules
//!
//! - `api`: HTTP-facing handlers and router.
//! - `core`: Submission pipeline, validation, models and errors.
//! - `integrations`: Email provider client and letter template.
//! - `config`: Configuration management.
//! - `db`: Lazily initialized database pool.
//! - `lead_storage`: Lead store trait and its Postgres and in-memory stores.
//! - `form_controller`: Client-side form state and HTTP transport.

pub mod api;
pub mod core;
pub mod integrations;

// Re-export primary modules for shared use in tests and other binaries
pub mod config;
pub mod db;
pub mod email_template;
pub mod errors;
pub mod form_controller;
pub mod handlers;
pub mod lead_storage;
pub mod mailer;
pub mod models;
pub mod services;
pub mod validation;
