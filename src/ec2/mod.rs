pub mod client;
pub mod types;

pub use client::{private_ip_of, VmInventory};
pub use types::{Instance, Reservation};
