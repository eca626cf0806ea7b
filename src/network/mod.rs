pub mod config;
pub mod fixed;
pub mod network;
mod propagation;

pub use config::NetworkConfig;
pub use fixed::FixedNetwork;
pub use network::Network;
