//! Tenant and member directory clients.
//!
//! Both directories are externally owned, read-only, paginated GraphQL
//! services. Their endpoints are optional configuration: when one is
//! unset, the sharing workflows that need it fail with a `Config` error
//! instead of a broken request. Results are never cached here.

pub mod config;
pub mod member;
pub mod org;
pub mod types;

pub use config::DirectoryConfig;
pub use member::MemberServiceClient;
pub use org::OrgServiceClient;
pub use pixlock_graphql::{ClientError, ClientResult};
pub use types::{Member, Paginated, TenantSummary, UserInfo};
