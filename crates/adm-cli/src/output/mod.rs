//! Output formatting utilities for the CLI
//!
//! Tables for hosts and policies, the certificate summary shown before the
//! trust prompt, and colored status lines.

use std::io::Write;

use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use tabled::{settings::Style, Table, Tabled};

use adm_api::host::CONTAINERS_PROPERTY;
use adm_api::links::id_from_link;
use adm_api::{CertificateChallenge, ComputeState, GroupPolicy};
use adm_core::format_memory;

/// Printed instead of a table when a listing is empty
pub const EMPTY_LISTING: &str = "n/a";

/// Format hosts as a table, or `n/a` when there are none
pub fn format_hosts(hosts: &[ComputeState]) -> String {
    if hosts.is_empty() {
        return EMPTY_LISTING.to_string();
    }

    #[derive(Tabled)]
    struct HostRow {
        #[tabled(rename = "ID")]
        id: String,
        #[tabled(rename = "ADDRESS")]
        address: String,
        #[tabled(rename = "NAME")]
        name: String,
        #[tabled(rename = "STATE")]
        state: String,
        #[tabled(rename = "RESOURCE POOL")]
        resource_pool: String,
        #[tabled(rename = "CONTAINERS")]
        containers: String,
    }

    let rows: Vec<HostRow> = hosts
        .iter()
        .map(|h| HostRow {
            id: truncate(&h.host_id().unwrap_or_default(), 24),
            address: h.address.clone(),
            name: h.display_name().to_string(),
            state: h
                .power_state
                .map(|s| s.to_string())
                .unwrap_or_else(|| "-".to_string()),
            resource_pool: link_tail(h.resource_pool_link.as_deref()),
            containers: h
                .custom_properties
                .get(CONTAINERS_PROPERTY)
                .cloned()
                .unwrap_or_else(|| "0".to_string()),
        })
        .collect();

    Table::new(rows).with(Style::rounded()).to_string()
}

/// Format policies as a table, or `n/a` when there are none
pub fn format_policies(policies: &[GroupPolicy]) -> String {
    if policies.is_empty() {
        return EMPTY_LISTING.to_string();
    }

    #[derive(Tabled)]
    struct PolicyRow {
        #[tabled(rename = "ID")]
        id: String,
        #[tabled(rename = "NAME")]
        name: String,
        #[tabled(rename = "GROUP")]
        group: String,
        #[tabled(rename = "RESOURCE POOL")]
        resource_pool: String,
        #[tabled(rename = "DEPLOYMENT POLICY")]
        deployment_policy: String,
        #[tabled(rename = "INSTANCES")]
        instances: i64,
        #[tabled(rename = "CPU")]
        cpu: String,
        #[tabled(rename = "MEMORY")]
        memory: String,
        #[tabled(rename = "PRIORITY")]
        priority: String,
    }

    let rows: Vec<PolicyRow> = policies
        .iter()
        .map(|p| PolicyRow {
            id: truncate(p.policy_id().unwrap_or_default(), 24),
            name: p.name.clone(),
            group: non_empty(p.groups().join(",")),
            resource_pool: link_tail(Some(p.resource_pool_link.as_str())),
            deployment_policy: link_tail(Some(p.deployment_policy_link.as_str())),
            instances: p.max_number_instances,
            cpu: optional(p.cpu_shares),
            memory: format_memory(p.memory_limit),
            priority: optional(p.priority),
        })
        .collect();

    Table::new(rows).with(Style::rounded()).to_string()
}

/// Summary of an untrusted certificate
pub fn format_certificate(challenge: &CertificateChallenge) -> String {
    let mut output = String::new();
    let fields = [
        ("Common name", &challenge.common_name),
        ("Issuer", &challenge.issuer_name),
        ("Fingerprint", &challenge.fingerprint),
    ];
    for (label, value) in fields {
        if let Some(value) = value {
            output.push_str(&format!("{}: {}\n", label, value));
        }
    }
    if output.is_empty() {
        output.push_str(challenge.certificate.trim());
        output.push('\n');
    }
    output.trim_end().to_string()
}

fn link_tail(link: Option<&str>) -> String {
    match link {
        Some(link) if !link.is_empty() => id_from_link(link).unwrap_or(link).to_string(),
        _ => "-".to_string(),
    }
}

fn optional<T: ToString>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn non_empty(s: String) -> String {
    if s.is_empty() {
        "-".to_string()
    } else {
        s
    }
}

/// Truncate a string with ellipsis if too long
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

fn print_marked(mut out: impl Write, color: Color, mark: &str, msg: &str) {
    let _ = crossterm::execute!(
        out,
        SetForegroundColor(color),
        Print(mark),
        ResetColor,
        Print(msg),
        Print("\n")
    );
}

/// Print a success message in green with a checkmark prefix (stdout)
pub fn print_success(msg: &str) {
    print_marked(std::io::stdout(), Color::Green, "✓ ", msg);
}

/// Print an error message in red with an X prefix (stderr)
pub fn print_error(msg: &str) {
    print_marked(std::io::stderr(), Color::Red, "✗ ", msg);
}

/// Print a warning message in yellow (stderr)
pub fn print_warning(msg: &str) {
    print_marked(std::io::stderr(), Color::Yellow, "⚠ ", msg);
}

/// Print an informational message in blue (stdout)
pub fn print_info(msg: &str) {
    print_marked(std::io::stdout(), Color::Blue, "ℹ ", msg);
}
