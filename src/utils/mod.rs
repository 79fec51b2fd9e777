pub mod files;
pub mod net;
pub mod paths;
pub mod term;
