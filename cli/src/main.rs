mod args;
mod terminal;

use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, ensure};
use chrono::Local;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use sweepr_common::config::ScanConfig;
use sweepr_common::network::port::{self, Port, Protocol};
use sweepr_common::network::result::MultiScanResult;
use sweepr_common::network::target;
use sweepr_common::services;
use sweepr_core::engine;

use crate::args::CommandLine;
use crate::terminal::format;

const DEFAULT_MOST_COMMON: usize = 250;
const RESULT_DIR: &str = "scans";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CommandLine::parse_args();
    terminal::logging::init();

    let ports = build_port_list(&cli)?;
    let hosts = target::expand_host_specs(&cli.hosts);
    ensure!(!hosts.is_empty(), "no hosts to scan");

    let config = ScanConfig {
        connect_timeout: Duration::from_millis(cli.timeout_ms),
        privileged: cli.privileged,
        ping: !cli.no_ping,
        arp: !cli.no_arp,
        vendor_lookup: !cli.no_vendor,
        max_probe_retries: cli.retries,
        fd_limit_override: cli.limit,
        ..ScanConfig::default()
    };

    info!(
        "scanning {} host(s) across {} port(s) each",
        hosts.len(),
        ports.len()
    );

    let progress = ProgressBar::new(hosts.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("{spinner:.blue} [{elapsed_precise}] {bar:40} {pos}/{len} hosts")?
            .progress_chars("=>-"),
    );
    let progress_tick = progress.clone();

    let result = engine::run_scan(
        hosts,
        ports,
        config,
        Some(Box::new(move |_done| progress_tick.inc(1))),
    )
    .await;
    progress.finish_and_clear();

    println!("{}", format::render_multi(&result, cli.online_only, true));
    info!(
        "{} resolved, {} unresolved",
        result.resolved.len(),
        result.unresolved.len()
    );

    if cli.file {
        save_report(&result);
    }

    Ok(())
}

/// Builds the port list from `--ports` and the most-common table.
///
/// With no `--ports`, the most common ports are scanned (250 unless
/// `--most-common` says otherwise); with both, the common ports are added
/// on top of the explicit list.
fn build_port_list(cli: &CommandLine) -> anyhow::Result<Vec<Port>> {
    let mut ports = match &cli.ports {
        Some(spec) => port::expand_port_specs(spec, Protocol::Tcp)
            .context("invalid port specification")?,
        None => Vec::new(),
    };

    let common_count = match (&cli.ports, cli.most_common) {
        (None, explicit) => Some(explicit.unwrap_or(DEFAULT_MOST_COMMON)),
        (Some(_), explicit) => explicit,
    };

    if let Some(count) = common_count {
        if cli.ports.is_none() {
            info!("no port arguments provided, assuming {count} most common open ports");
        } else {
            info!("adding the {count} most common open ports to the provided list");
        }
        let seen: HashSet<u16> = ports.iter().map(|p| p.number).collect();
        ports.extend(
            services::most_common_ports(count)
                .into_iter()
                .filter(|number| !seen.contains(number))
                .map(|number| Port::from_registry(number, Protocol::Tcp)),
        );
    }

    ensure!(!ports.is_empty(), "no ports to scan");
    Ok(ports)
}

fn save_report(result: &MultiScanResult) {
    let report = format::render_multi(result, false, false);
    let file_name = Local::now()
        .format("scanlog_%Y-%m-%d_%H-%M-%S.txt")
        .to_string();

    let path = match std::fs::create_dir_all(RESULT_DIR) {
        Ok(()) => Path::new(RESULT_DIR).join(&file_name),
        Err(err) => {
            warn!("failed to create '{RESULT_DIR}': {err}, saving in the working directory");
            Path::new(&file_name).to_path_buf()
        }
    };

    match std::fs::write(&path, report) {
        Ok(()) => info!("scan result saved as '{}'", path.display()),
        Err(err) => warn!("failed to save scan result: {err}"),
    }
}
