#![forbid(unsafe_code)]
//! The Savant side of the bridge: artifact identities, licenses, the AMD
//! document, the cache-backed repository, and persistent group mappings.

pub mod amd;
pub mod artifact;
pub mod cache;
pub mod error;
pub mod license;
pub mod mappings;
pub mod publish;

pub use amd::ArtifactMetaData;
pub use artifact::{Artifact, ArtifactId, Dependencies, DependencyGroup, SavantDependency};
pub use cache::CacheProcess;
pub use error::SavantError;
pub use license::License;
pub use mappings::GroupMappings;
pub use publish::{Publication, PublishWorkflow};
