//! Domain layer — pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod cluster;
pub mod config;
pub mod env;
pub mod error;
pub mod request;

pub use cluster::{pod_statuses_from_pods, sandboxes_from_namespaces};
pub use config::Settings;
pub use env::{AmbientDefaults, EnvProjector, EnvironmentOverrides};
pub use error::{ClusterStateError, ProcessError, RequestError};
pub use request::{
    ActionRequest, DeleteChartRequest, DeleteUserRequest, DeployRequest, HelmOptions, Param,
};
