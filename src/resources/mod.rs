//! Resource façades, one per API resource family.
//!
//! Façades are thin: each method maps to one HTTP call and decodes the
//! response envelope. They hold no per-call state and can be used
//! concurrently.

mod actions;
mod firewalls;
mod networks;
mod servers;
mod ssh_keys;

pub use actions::ActionsResource;
pub use firewalls::FirewallsResource;
pub use networks::NetworksResource;
pub use servers::ServersResource;
pub use ssh_keys::SshKeysResource;
