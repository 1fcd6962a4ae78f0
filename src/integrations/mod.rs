pub mod icy;

pub use icy::{IcyClient, WalletSource};
