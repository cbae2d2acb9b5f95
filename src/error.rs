//! # 错误类型模块
//!
//! 定义隐写编解码核心可能返回的所有错误。
//! 提取 (`extract`) 是全函数，永远不会失败，因此这里的错误只来自嵌入路径。

/// 隐写编解码过程中可能出现的错误。
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum StegoError {
    /// 位流 (包含 8 位结束标记) 超出了图像的容量，即像素数。
    #[error("Not enough space in the image: {required} bits are required, but only {available} are available.")]
    CapacityExceeded { required: usize, available: usize },

    /// 消息中包含无法用单个字节表示的字符 (码点大于 U+00FF)。
    #[error("Character {ch:?} at index {index} is outside U+0001..=U+00FF and cannot be encoded as a single byte.")]
    OutOfRangeCharacter { ch: char, index: usize },

    /// 消息中包含空字节，它会与结束标记混淆。
    #[error("The message contains a NUL character at index {index}, which collides with the end-of-message marker.")]
    NulCharacter { index: usize },

    /// 像素缓冲区长度不是 4 的倍数，不是合法的 RGBA 数据。
    #[error("Pixel buffer length {len} is not a multiple of 4 (RGBA).")]
    InvalidPixelBuffer { len: usize },
}
