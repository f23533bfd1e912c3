pub mod boot;
pub mod dispatch;
pub mod registry;
pub mod timer;
