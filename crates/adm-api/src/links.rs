//! Document link helpers
//!
//! Every entity in the service is addressed by a link of the form
//! `<factory>/<id>`. Users may pass either form on the command line.

use crate::error::WireError;

pub const HOSTS: &str = "/resources/hosts";
pub const COMPUTE: &str = "/resources/compute";
pub const RESOURCE_POOLS: &str = "/resources/pools";
pub const DEPLOYMENT_POLICIES: &str = "/resources/deployment-policies";
pub const GROUP_POLICIES: &str = "/resources/group-policies";
pub const CREDENTIALS: &str = "/core/auth/credentials";
pub const REQUESTS: &str = "/requests";
pub const TENANTS: &str = "/tenants";

/// Build a document link from a factory path and an id.
///
/// Values that already look like links (leading `/`) are returned unchanged.
pub fn link_for(factory: &str, id: &str) -> String {
    if id.starts_with('/') {
        id.to_string()
    } else {
        format!("{}/{}", factory.trim_end_matches('/'), id)
    }
}

/// Extract the trailing id segment from a document link.
pub fn id_from_link(link: &str) -> Result<&str, WireError> {
    link.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| WireError::InvalidLink(link.to_string()))
}
