// Copyright 2026 campusdl contributors
// SPDX-License-Identifier: Apache-2.0

//! campusdl library — authenticated Moodle portal scraping and downloads.
//!
//! Handshake → dashboard → courses → resources → files. The CLI binary is
//! a thin wrapper over these modules.

pub mod auth;
pub mod cli;
pub mod config;
pub mod course;
pub mod error;
pub mod resource;
pub mod scrape;
pub mod session;

pub use config::Endpoints;
pub use course::Course;
pub use error::{PortalError, PortalResult};
pub use resource::Resource;
pub use session::PortalSession;
