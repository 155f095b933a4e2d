//! Basic example demonstrating the Hetzner Cloud client.
//!
//! Run with:
//! ```
//! HCLOUD_TOKEN=your-token cargo run --example basic
//! HCLOUD_TOKEN=your-token cargo run --example basic -- <server-id>
//! ```
//!
//! With a server ID the example powers that server on and waits for the
//! action to finish.

use hcloud_sdk::{Get, HetznerClient, List, PollOptions, DEFAULT_LIST_ALL_PAGE_SIZE};

#[tokio::main]
async fn main() -> hcloud_sdk::Result<()> {
    // RUST_LOG=hcloud_sdk=debug shows every request with the token redacted.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let client = HetznerClient::from_env()?;
    println!("Connected to: {}", client.base_url());

    println!("\n--- Servers ---");
    let servers = client.servers().list_all(DEFAULT_LIST_ALL_PAGE_SIZE).await?;
    println!("Found {} servers", servers.len());
    for server in &servers {
        let ip = server
            .public_net
            .ipv4
            .as_ref()
            .map_or("-", |ipv4| ipv4.ip.as_str());
        println!("  - {} ({}) {} {}", server.name, server.id, server.status, ip);
    }

    println!("\n--- Firewalls ---");
    for firewall in client.firewalls().list_all(DEFAULT_LIST_ALL_PAGE_SIZE).await? {
        let applied: Vec<_> = firewall.server_ids().collect();
        println!(
            "  - {} ({} rules, servers {:?})",
            firewall.name,
            firewall.rules.len(),
            applied
        );
    }

    let Some(server_id) = std::env::args().nth(1).and_then(|arg| arg.parse().ok()) else {
        println!("\nDone!");
        return Ok(());
    };

    println!("\n--- Powering on server {server_id} ---");
    let server = client.servers().get(server_id).await?.result;
    println!("Current status: {}", server.status);

    let action = client.servers().power_on(server_id).await?.result;
    println!("Started action {} ({})", action.id, action.command);

    let finished = client.actions().poll(action.id, PollOptions::default()).await?;
    match finished.error {
        Some(error) => println!("Action failed: {} ({})", error.message, error.code),
        None => println!("Action finished at {:?}", finished.finished),
    }

    println!("\nDone!");
    Ok(())
}
