pub mod config;
pub mod dispatch;
pub mod fix;
pub mod restore;
pub mod scan;
pub mod tables;
pub mod verify;
