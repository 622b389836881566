//! GanttPro project import for CTO platform.
//!
//! This crate provides:
//! - REST client for the GanttPro API
//! - Identifier extraction across GanttPro payload shapes
//! - Hierarchy importer that creates a project and its sections/tasks in order
//! - Import summary documents
//! - HTTP server for browser-initiated imports (standalone service)

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)] // Many async API methods can fail

pub mod client;
pub mod config;
pub mod error;
pub mod importer;
pub mod models;
pub mod normalize;
pub mod registry;
pub mod server;
pub mod summary;

pub use client::{GanttProClient, RemoteClient};
pub use config::Config;
pub use error::{ImportError, RemoteError};
pub use importer::{HierarchyImporter, ImportReport};
pub use models::*;
pub use registry::SectionRegistry;
pub use summary::ImportSummary;
