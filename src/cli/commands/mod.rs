pub mod classify;
mod command_result;
pub mod decompose;
pub mod helper;
pub mod init;
pub mod repair;
pub mod sample;

pub use command_result::*;
