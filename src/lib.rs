//! The vulnerability-management asset exporter library.
//!
//! This crate provides the core functionality for the `vmexport` CLI:
//! authenticating against a vulnerability-management platform, paginating
//! its list endpoints, and flattening assets into CSV reports.
//!
//! # Modules
//!
//! - `auth`: Authentication handshake and session headers
//! - `cli`: Command execution and exit-code mapping
//! - `client`: HTTP client for the platform's list endpoints
//! - `commands`: CLI command and parameter definitions
//! - `configuration`: Configuration management
//! - `exit_codes`: Process exit codes
//! - `export`: The export orchestration
//! - `format`: CSV record production
//! - `model`: Data models and asset flattening
//! - `pagination`: Offset/limit pagination over list endpoints

pub mod auth;
pub mod cli;
pub mod client;
pub mod commands;
pub mod configuration;
pub mod exit_codes;
pub mod export;
pub mod format;
pub mod model;
pub mod pagination;
