//! Template resolution and download
//!
//! This module provides:
//! - Repository locations (`owner/name#tag`) and their archive URLs
//! - Archive download and extraction into the project directory
//! - The interactive template/version selection flow

pub mod archive;
pub mod fetcher;
pub mod location;

pub use archive::{extract_archive, ArchiveDownloader, Downloader};
pub use fetcher::{Collaborators, TemplateFetcher};
pub use location::{GitHost, LocationError, RepoLocation, DEFAULT_CHECKOUT};
