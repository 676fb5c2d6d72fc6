//! orbitup - lifecycle manager for the Orbit desktop application
//!
//! `orbitup` installs, updates, and uninstalls a single desktop application:
//! it fetches the distributable binary artifact from the Orbit release API
//! (or accepts a locally supplied file), places it in a per-user standard
//! location, registers a freedesktop menu entry, and removes all of this
//! cleanly on uninstall.
//!
//! # Architecture Overview
//!
//! The filesystem is the source of truth: installation state is inferred
//! from the presence of three fixed paths (artifact, icon, desktop entry)
//! through a single [`core::state::inspect`] query. One command invocation
//! performs one lifecycle transition start-to-finish; all I/O is sequential.
//!
//! Control flow:
//!
//! ```text
//! Coordinator -> (state check) -> DependencyResolver -> ArtifactFetcher -> Installer
//!                                                       (auto mode only)
//! ```
//!
//! Uninstall bypasses the fetcher and performs only filesystem removal.
//!
//! # Core Modules
//!
//! - [`cli`] - Command-line interface and the interactive action menu
//! - [`config`] - Immutable runtime configuration (paths, endpoints, tools)
//! - [`core`] - Error taxonomy and installation-state inspection
//! - [`lifecycle`] - The install/update/uninstall coordinator and prompts
//!
//! # Components
//!
//! - [`resolver`] - Ensures required external executables are present
//! - [`fetcher`] - Resolves the download URL and stages the artifact
//! - [`installer`] - Moves artifacts into place and registers the menu entry
//!
//! # Supporting Modules
//!
//! - [`constants`] - Fixed identity of the managed application
//! - [`utils`] - Filesystem, platform, and progress helpers
//!
//! # Command-Line Usage
//!
//! ```bash
//! # Interactive menu (install / update / uninstall)
//! orbitup
//!
//! # Install, downloading the artifact from the release API
//! orbitup install --auto
//!
//! # Install from a local artifact instead
//! orbitup install --from ~/Downloads/orbit.AppImage
//!
//! # Update an existing installation, then inspect it
//! orbitup update --auto
//! orbitup status
//!
//! # Remove the artifact, icon, and menu entry
//! orbitup uninstall
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;

// Lifecycle components
pub mod fetcher;
pub mod installer;
pub mod lifecycle;
pub mod resolver;

// Supporting modules
pub mod utils;
