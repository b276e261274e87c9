pub mod desktop;
pub mod gateway;

pub use desktop::DesktopAlertGateway;
pub use gateway::AlertGateway;
