//! Role-configured agents

pub mod analyst;
pub mod profile;

pub use analyst::AnalystAgent;
pub use profile::RoleProfile;
