//! Integration test suite for the extension map
//!
//! These tests drive the public API the way a site build does: load a
//! configuration file, bind an extension map to it, then ask for discovery
//! globs, layout candidates, and spidering decisions.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **discovery**: glob derivation and path classification from a config file
//! - **layouts**: layout candidate lists and extension stripping
//! - **reconfigure**: snapshot changes, resets, and cache lifetimes
//! - **spidering**: dependency spidering decisions against an engine registry

mod discovery;
mod layouts;
mod reconfigure;
mod spidering;
