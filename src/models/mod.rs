//! Hetzner Cloud model types.

mod action;
mod common;
mod firewall;
mod image;
mod location;
mod network;
mod server;
mod ssh_key;

pub use action::*;
pub use common::*;
pub use firewall::*;
pub use image::*;
pub use location::*;
pub use network::*;
pub use server::*;
pub use ssh_key::*;
