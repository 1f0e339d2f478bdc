pub mod filecheck;
pub mod process;
pub mod settings;
pub mod signature;
