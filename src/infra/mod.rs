//! Infrastructure layer (adapters/implementations).
//!
//! This module contains the IO-heavy integrations: the HTTP backend client,
//! the session token file and the config file.

pub mod app_config;
pub mod backend;
pub mod session;
