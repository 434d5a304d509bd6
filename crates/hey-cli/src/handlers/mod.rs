pub mod help;
pub mod init;
pub mod update;

pub use help::HelpHandler;
pub use init::InitHandler;
pub use update::UpdateHandler;
