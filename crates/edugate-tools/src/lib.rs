//! EduGate Tools - School-management operations for agents
//!
//! This crate declares the operations of the remote school-management API
//! and provides the registry that holds the tools offered to an agent host.
//!
//! # Feature Flags
//!
//! - `http` - JSON-RPC over HTTP remote client (default)
//!
//! # Example
//!
//! ```rust,ignore
//! use edugate_tools::{HttpRemoteClient, OperationCatalog};
//!
//! let catalog = OperationCatalog::builtin();
//! let client = HttpRemoteClient::new("https://school.example/rpc")?;
//! ```

pub mod catalog;
#[cfg(feature = "http")]
pub mod client;
pub mod registry;
pub mod tools;

pub use catalog::{OperationCatalog, OperationSpec};
#[cfg(feature = "http")]
pub use client::HttpRemoteClient;
pub use registry::{BuiltinToolExecutor, RegisteredTool, ToolCategory, ToolRegistry};
pub use tools::school::SchoolOperations;

