pub mod aircraft;
pub mod init;
pub mod plan;
