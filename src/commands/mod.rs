pub mod backup;
pub mod edit;
pub mod plugins;
pub mod recent;
pub mod show;
