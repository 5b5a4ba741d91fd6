//! 配置管理模块

mod r#impl;
mod structs;

pub use structs::*;
