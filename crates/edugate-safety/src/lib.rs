//! Safety Layer - Risk Tiers, Policy Gating and Confirmed Dispatch
//!
//! This crate provides:
//! - A risk registry mapping operations to tiers (`safe < moderate < destructive < critical`)
//! - A policy engine gating destructive and critical operations behind one switch
//! - Warning texts for tool descriptions and denial messages
//! - A confirmation gate requiring `"confirm_destructive_action": true`
//! - The dispatcher that runs a call through all of the above
//!
//! Design Philosophy:
//! - Safety-first: unknown operations are `moderate`, never `safe`
//! - Fail closed: destructive operations are disabled and confirmation is
//!   required unless configured otherwise
//! - Transparent: denials say which switch or argument to change
//! - Contained: remote failures become outcomes, never panics or errors

mod annotate;
mod config;
mod confirmation;
mod dispatch;
mod gated;
mod normalize;
mod policy;
mod registry;
mod warning;

pub use annotate::{CodeAnnotator, KNOWN_CODES};
pub use config::{
    parse_bool, GateConfig, ALLOW_DESTRUCTIVE_ENV, REMOTE_TIMEOUT_ENV, REQUIRE_CONFIRMATION_ENV,
};
pub use confirmation::{check_confirmation, is_confirmed, ConfirmationCheck};
pub use dispatch::{DispatchError, DispatchOutcome, Dispatcher};
pub use gated::{register_gated_tools, GatedTool};
pub use normalize::{normalize_identifier, normalize_params};
pub use policy::{PolicyDecision, PolicyEngine};
pub use registry::{OperationRisk, RiskRegistry};
pub use warning::{compose_warning, tier_warning};
