//! Tether Core - connection profile store and authentication resolver
//!
//! This crate provides named connection profiles persisted through a
//! pluggable settings backend, active-profile selection, and resolution of
//! the authentication mechanism a profile implies.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

pub mod auth;
pub mod config;
pub mod profile;

pub use auth::{validate, AuthType, ValidationResult};
pub use config::{ConfigError, ConfigResult, ConfigScope, ConfigurationStore};
pub use profile::{Profile, ProfileCollection, ProfileDetail, ProfileStore};
