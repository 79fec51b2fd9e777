pub mod config;
pub mod ls;
pub mod serve;
