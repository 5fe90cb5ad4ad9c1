//! Infrastructure-as-code agents for Google Cloud
//!
//! A `Coordinator` agent routes each request to one of two code generators:
//!
//! - `terraform_config_gen`: Terraform HCL for core GCP infrastructure
//!   (VMs, VPC networks, buckets, GKE clusters, IAM)
//! - `kubectl_manifest_gen`: Kubernetes YAML for workloads inside a cluster
//!   (Deployments, Services, ConfigMaps, Ingress)
//!
//! Routing is decided by a weighted keyword table ([`IacRouter`]); the
//! coordinator model is only consulted when the table ties and the
//! [`RoutingStrategy`] allows it.
//!
//! # Example
//!
//! ```rust,ignore
//! use agent_iac::{IacConfig, IacCoordinator};
//! use agent_runtime::AgentRuntime;
//! use agent_core::{Agent, Context};
//!
//! let runtime = AgentRuntime::builder().provider(provider).build()?;
//! let coordinator = IacCoordinator::new(&runtime, &IacConfig::default())?;
//!
//! let mut ctx = Context::new();
//! let hcl = coordinator
//!     .process("A GCS bucket with versioning".into(), &mut ctx)
//!     .await?;
//! ```

pub mod config;
pub mod coordinator;
pub mod error;
pub mod prompts;
pub mod router;
pub mod specialists;

pub use config::{IacConfig, IacConfigBuilder, RoutingStrategy};
pub use coordinator::{IacCoordinator, ROUTE_KEY};
pub use error::{IacError, Result};
pub use router::{IacRouter, IacSpecialist, RouteDecision};
pub use specialists::specialist_agent;
