//! Configuration module

mod site;

pub use site::InvalidDatePolicy;
pub use site::InvalidFilePolicy;
pub use site::LoadFailurePolicy;
pub use site::PageOverflow;
pub use site::ServerConfig;
pub use site::SiteConfig;
