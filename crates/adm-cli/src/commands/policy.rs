//! Policy command implementations

use anyhow::Result;
use clap::{Args, Subcommand};

use adm_api::links::{self, id_from_link, link_for};
use adm_api::{GroupPolicy, PolicyPatch};
use adm_core::traits::PolicyApi;
use adm_core::{parse_memory, UsageError};

use super::{require_arg, Reply};
use crate::output::format_policies;

#[derive(Debug, Clone, Subcommand)]
pub enum PolicyCommand {
    /// Add a policy
    Add(AddArgs),

    /// Remove a policy
    #[command(alias = "remove")]
    Rm {
        /// Policy ID
        id: Option<String>,
    },

    /// Update a policy
    Update(UpdateArgs),

    /// List policies
    #[command(alias = "list")]
    Ls,
}

#[derive(Debug, Clone, Args)]
pub struct AddArgs {
    /// Policy name
    pub name: Option<String>,

    /// Maximum number of container instances
    #[arg(long)]
    pub instances: i64,

    /// Group the policy applies to
    #[arg(long)]
    pub group: String,

    /// Resource pool ID
    #[arg(long)]
    pub resource_pool: String,

    /// Deployment policy ID
    #[arg(long)]
    pub deployment_policy: String,

    /// CPU shares
    #[arg(long)]
    pub cpu: Option<i32>,

    /// Priority
    #[arg(long)]
    pub prio: Option<i32>,

    /// Memory limit, e.g. 512mb or 2gb
    #[arg(long, default_value = "0kb")]
    pub memory: String,
}

#[derive(Debug, Clone, Args)]
pub struct UpdateArgs {
    /// Policy ID
    pub id: Option<String>,

    /// New name
    #[arg(long)]
    pub name: Option<String>,

    /// CPU shares
    #[arg(long)]
    pub cpu: Option<i32>,

    /// Maximum number of container instances
    #[arg(long)]
    pub instances: Option<i64>,

    /// Priority
    #[arg(long)]
    pub prio: Option<i32>,

    /// Group the policy applies to
    #[arg(long)]
    pub group: Option<String>,

    /// Resource pool ID
    #[arg(long)]
    pub resource_pool: Option<String>,

    /// Deployment policy ID
    #[arg(long)]
    pub deployment_policy: Option<String>,

    /// Memory limit, e.g. 512mb or 2gb
    #[arg(long)]
    pub memory: Option<String>,
}

/// Run a policy subcommand
pub async fn handle<A>(api: &A, command: PolicyCommand) -> Result<Reply>
where
    A: PolicyApi + ?Sized,
{
    match command {
        PolicyCommand::Add(args) => add(api, args).await.map(Reply::Done),
        PolicyCommand::Rm { id } => {
            let id = policy_id(id)?;
            api.delete_policy(&id).await?;
            Ok(Reply::Done(format!("Policy removed: {}", id)))
        }
        PolicyCommand::Update(args) => update(api, args).await.map(Reply::Done),
        PolicyCommand::Ls => {
            let policies = api.list_policies().await?;
            Ok(Reply::Listing(format_policies(&policies)))
        }
    }
}

/// Bare policy id from an id or a full policy link
fn policy_id(arg: Option<String>) -> Result<String> {
    let arg = require_arg(arg, UsageError::PolicyIdNotProvided)?;
    Ok(id_from_link(&arg)?.to_string())
}

async fn add<A>(api: &A, args: AddArgs) -> Result<String>
where
    A: PolicyApi + ?Sized,
{
    let name = require_arg(args.name, UsageError::PolicyNameNotProvided)?;
    let memory_limit = parse_memory(&args.memory)?;

    let policy = GroupPolicy {
        name,
        max_number_instances: args.instances,
        memory_limit,
        cpu_shares: args.cpu,
        priority: args.prio,
        resource_pool_link: link_for(links::RESOURCE_POOLS, &args.resource_pool),
        deployment_policy_link: link_for(links::DEPLOYMENT_POLICIES, &args.deployment_policy),
        tenant_links: vec![link_for(links::TENANTS, &args.group)],
        ..Default::default()
    };

    let stored = api.add_policy(&policy).await?;
    Ok(format!("Policy added: {}", stored.policy_id()?))
}

async fn update<A>(api: &A, args: UpdateArgs) -> Result<String>
where
    A: PolicyApi + ?Sized,
{
    let id = policy_id(args.id)?;
    let memory_limit = args.memory.as_deref().map(parse_memory).transpose()?;

    let patch = PolicyPatch {
        name: args.name,
        max_number_instances: args.instances,
        memory_limit,
        cpu_shares: args.cpu,
        priority: args.prio,
        resource_pool_link: args
            .resource_pool
            .map(|pool| link_for(links::RESOURCE_POOLS, &pool)),
        deployment_policy_link: args
            .deployment_policy
            .map(|policy| link_for(links::DEPLOYMENT_POLICIES, &policy)),
        tenant_links: args
            .group
            .map(|group| vec![link_for(links::TENANTS, &group)]),
    };

    api.patch_policy(&id, &patch).await?;
    Ok(format!("Policy updated: {}", id))
}
