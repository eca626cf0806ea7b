pub mod init;

pub use init::GaussianInit;
