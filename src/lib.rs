//! # blue_lsb 库
//!
//! 本库包含蓝色通道 LSB 隐写工具的核心逻辑：
//! 位编解码 ([`bits`])、像素嵌入与提取 ([`steganography`]) 以及命令行外壳。

// 声明库包含的所有模块。

pub mod bits;
pub mod cli;
pub mod constants;
pub mod error;
pub mod handler;
pub mod steganography;

pub use error::StegoError;
pub use steganography::{MessageEncoding, embed, extract};
