//! Host command implementations

use std::io::BufRead;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use adm_api::host::{CREDENTIALS_PROPERTY, DEPLOYMENT_POLICY_PROPERTY, DISPLAY_NAME_PROPERTY};
use adm_api::links::{self, id_from_link, link_for};
use adm_api::{HostPatch, HostSpec, PowerState};
use adm_core::traits::{AddHostOutcome, CredentialsApi, HostApi};
use adm_core::{parse_properties, ApiError, CredentialsChoice, CredentialsInput, UsageError};

use super::{require_arg, Reply};
use crate::output::{format_certificate, format_hosts, print_warning};
use crate::prompt::confirm;

#[derive(Debug, Clone, Subcommand)]
pub enum HostCommand {
    /// Add a host
    Add(AddArgs),

    /// Remove an existing host
    #[command(alias = "remove")]
    Rm(RemoveArgs),

    /// Enable a host (power state ON)
    Enable {
        /// Address of the host
        address: Option<String>,
    },

    /// Disable a host (power state SUSPEND)
    Disable {
        /// Address of the host
        address: Option<String>,
    },

    /// Update name, credentials, resource pool or deployment policy of a host
    Update(UpdateArgs),

    /// List hosts
    #[command(alias = "list")]
    Ls {
        /// Only show hosts matching this text
        #[arg(short, long)]
        query: Option<String>,
    },
}

#[derive(Debug, Clone, Args)]
pub struct AddArgs {
    /// Address of the host
    #[arg(long)]
    pub ip: String,

    /// Resource pool ID
    #[arg(long)]
    pub resource_pool: String,

    /// Existing credentials ID
    #[arg(long)]
    pub credentials: Option<String>,

    /// Username for new password credentials
    #[arg(long)]
    pub username: Option<String>,

    /// Password for new password credentials
    #[arg(long)]
    pub password: Option<String>,

    /// Public certificate file for new certificate credentials
    #[arg(long)]
    pub public: Option<PathBuf>,

    /// Private key file for new certificate credentials
    #[arg(long)]
    pub private: Option<PathBuf>,

    /// Deployment policy ID
    #[arg(long)]
    pub deployment_policy: Option<String>,

    /// Accept the host certificate without asking
    #[arg(long)]
    pub accept: bool,

    /// Custom properties as KEY=VALUE (comma separated, repeatable)
    #[arg(long = "cp", value_delimiter = ',')]
    pub custom_properties: Vec<String>,
}

#[derive(Debug, Clone, Args)]
pub struct RemoveArgs {
    /// Address of the host
    pub address: Option<String>,

    /// Remove without asking for confirmation
    #[arg(short, long)]
    pub force: bool,

    /// Return once the removal is requested instead of waiting for it
    #[arg(long = "async")]
    pub no_wait: bool,
}

#[derive(Debug, Clone, Args)]
pub struct UpdateArgs {
    /// Address of the host
    pub address: Option<String>,

    /// New display name
    #[arg(long)]
    pub name: Option<String>,

    /// Credentials ID
    #[arg(long)]
    pub credentials: Option<String>,

    /// Resource pool ID
    #[arg(long)]
    pub resource_pool: Option<String>,

    /// Deployment policy ID
    #[arg(long)]
    pub deployment_policy: Option<String>,

    /// Accept the host certificate
    #[arg(long)]
    pub accept: bool,
}

/// Run a host subcommand
pub async fn handle<A>(api: &A, command: HostCommand, input: &mut dyn BufRead) -> Result<Reply>
where
    A: HostApi + CredentialsApi + ?Sized,
{
    let message = match command {
        HostCommand::Add(args) => add(api, args, input).await?,
        HostCommand::Rm(args) => remove(api, args, input).await?,
        HostCommand::Enable { address } => set_power(api, address, PowerState::On).await?,
        HostCommand::Disable { address } => set_power(api, address, PowerState::Suspend).await?,
        HostCommand::Update(args) => update(api, args).await?,
        HostCommand::Ls { query } => return list(api, query.as_deref()).await,
    };
    Ok(Reply::Done(message))
}

async fn add<A>(api: &A, args: AddArgs, input: &mut dyn BufRead) -> Result<String>
where
    A: HostApi + CredentialsApi + ?Sized,
{
    let mut custom_properties = parse_properties(&args.custom_properties)?;

    let credentials = CredentialsInput {
        existing: args.credentials,
        username: args.username,
        password: args.password,
        public_cert: args.public,
        private_cert: args.private,
    };
    let credentials_link = match credentials.resolve()? {
        Some(CredentialsChoice::Existing(link)) => Some(link),
        Some(CredentialsChoice::New(new)) => Some(
            api.create_credentials(&new)
                .await
                .context("Failed to store host credentials")?,
        ),
        None => None,
    };
    if let Some(link) = credentials_link {
        custom_properties.insert(CREDENTIALS_PROPERTY.to_string(), link);
    }
    if let Some(policy) = &args.deployment_policy {
        custom_properties.insert(
            DEPLOYMENT_POLICY_PROPERTY.to_string(),
            link_for(links::DEPLOYMENT_POLICIES, policy),
        );
    }

    let mut spec = HostSpec {
        custom_properties,
        accept_certificate: args.accept,
        ..HostSpec::new(args.ip, link_for(links::RESOURCE_POOLS, &args.resource_pool))
    };

    let link = match api.add_host(&spec).await? {
        AddHostOutcome::Added(link) => link,
        AddHostOutcome::Untrusted(_) if spec.accept_certificate => {
            return Err(ApiError::CertificateChallenge.into());
        }
        AddHostOutcome::Untrusted(challenge) => {
            print_warning("The host presented a certificate that is not trusted");
            println!("{}", format_certificate(&challenge));
            if !confirm(input, "Certificate is not trusted. Accept it? (y/n)")? {
                return Err(UsageError::CertificateRejected.into());
            }
            spec.accept_certificate = true;
            match api.add_host(&spec).await? {
                AddHostOutcome::Added(link) => link,
                AddHostOutcome::Untrusted(_) => return Err(ApiError::CertificateChallenge.into()),
            }
        }
    };

    Ok(format!("Host added: {}", id_from_link(&link)?))
}

async fn remove<A>(api: &A, args: RemoveArgs, input: &mut dyn BufRead) -> Result<String>
where
    A: HostApi + ?Sized,
{
    let address = require_arg(args.address, UsageError::HostAddressNotProvided)?;

    if !args.force {
        let question = format!("Are you sure you want to remove {}? (y/n)", address);
        if !confirm(input, &question)? {
            return Err(UsageError::RemoveAborted.into());
        }
    }

    let host = api.find_host(&address).await?;
    let host_id = host.host_id()?;
    let tracker = api
        .request_removal(&link_for(links::COMPUTE, &host_id))
        .await?;

    if args.no_wait {
        tracing::info!(tracker = %tracker, "Removal requested");
        return Ok(format!("Host removal requested: {}", host_id));
    }

    api.wait_for_task(&tracker)
        .await
        .with_context(|| format!("Removal of host {} did not complete", host_id))?;
    Ok(format!("Host removed: {}", host_id))
}

async fn set_power<A>(api: &A, address: Option<String>, state: PowerState) -> Result<String>
where
    A: HostApi + ?Sized,
{
    let address = require_arg(address, UsageError::HostAddressNotProvided)?;
    let host = api.find_host(&address).await?;
    let host_id = host.host_id()?;

    api.patch_host(&host_id, &HostPatch::power(state)).await?;

    let verb = match state {
        PowerState::On => "enabled",
        _ => "disabled",
    };
    Ok(format!("Host {}: {}", verb, host_id))
}

async fn update<A>(api: &A, args: UpdateArgs) -> Result<String>
where
    A: HostApi + ?Sized,
{
    let address = require_arg(args.address, UsageError::HostAddressNotProvided)?;
    let host = api.find_host(&address).await?;
    let host_id = host.host_id()?;

    let mut patch = HostPatch {
        resource_pool_link: args
            .resource_pool
            .map(|pool| link_for(links::RESOURCE_POOLS, &pool)),
        accept_certificate: args.accept,
        ..Default::default()
    };
    if let Some(name) = args.name {
        patch
            .custom_properties
            .insert(DISPLAY_NAME_PROPERTY.to_string(), name.clone());
        patch.name = Some(name);
    }
    if let Some(credentials) = args.credentials {
        patch.custom_properties.insert(
            CREDENTIALS_PROPERTY.to_string(),
            link_for(links::CREDENTIALS, &credentials),
        );
    }
    if let Some(policy) = args.deployment_policy {
        patch.custom_properties.insert(
            DEPLOYMENT_POLICY_PROPERTY.to_string(),
            link_for(links::DEPLOYMENT_POLICIES, &policy),
        );
    }

    api.patch_host(&host_id, &patch).await?;
    Ok(format!("Host updated: {}", host_id))
}

async fn list<A>(api: &A, query: Option<&str>) -> Result<Reply>
where
    A: HostApi + ?Sized,
{
    let hosts = api.list_hosts(query).await?;
    Ok(Reply::Listing(format_hosts(&hosts)))
}
