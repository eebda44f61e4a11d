pub mod config;
pub mod logging;

pub mod checksum;
pub mod operation;
pub mod plugin_management;
pub mod resource;
pub mod storage;
pub mod url_model;
