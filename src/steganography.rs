//! # 隐写核心算法模块
//!
//! 在 RGBA 像素缓冲区中嵌入和提取位流。每个像素只承载 1 位，
//! 写在蓝色通道字节的最低有效位上；红、绿、alpha 通道以及蓝色通道的高 7 位保持不变。
//!
//! 所有函数都是无状态的纯函数，除了声明的缓冲区修改之外没有任何副作用。

use crate::bits::{bits_to_bytes, bits_to_text, bytes_to_bits, text_to_bits};
use crate::constants::{BITS_PER_CHAR, BLUE_CHANNEL_OFFSET, BYTES_PER_PIXEL, TERMINATOR_BITS};
use crate::error::StegoError;

/// 消息在位流中的编码方式。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MessageEncoding {
    /// 每个字符一个字节，只接受 U+0001..=U+00FF。
    #[default]
    Latin1,
    /// 先转换为 UTF-8 字节，容量按字节数计算。
    Utf8,
}

impl MessageEncoding {
    /// 消息编码后的字节数 (不含结束标记)。
    pub fn encoded_len(self, message: &str) -> usize {
        match self {
            MessageEncoding::Latin1 => message.chars().count(),
            MessageEncoding::Utf8 => message.len(),
        }
    }
}

/// 像素缓冲区可承载的位数，即像素数量。
pub fn capacity(pixels: &[u8]) -> usize {
    pixels.len() / BYTES_PER_PIXEL
}

/// 在扣除结束标记之后，缓冲区最多能容纳的消息字节数。
pub fn max_message_len(pixels: &[u8]) -> usize {
    capacity(pixels).saturating_sub(TERMINATOR_BITS) / BITS_PER_CHAR
}

/// 将 Latin-1 文本嵌入像素缓冲区 (原地修改)。
///
/// # Errors
///
/// 见 [`embed_bits`] 以及 [`text_to_bits`]。任何错误都发生在第一次写入之前。
pub fn embed(pixels: &mut [u8], message: &str) -> Result<(), StegoError> {
    let bits = text_to_bits(message)?;
    embed_bits(pixels, &bits)
}

/// 将任意 (不含 `0` 的) 字节序列嵌入像素缓冲区。
///
/// # Errors
///
/// 见 [`embed_bits`] 以及 [`bytes_to_bits`]。
pub fn embed_bytes(pixels: &mut [u8], payload: &[u8]) -> Result<(), StegoError> {
    let bits = bytes_to_bits(payload)?;
    embed_bits(pixels, &bits)
}

/// 按指定编码方式嵌入消息。
pub fn embed_message(
    pixels: &mut [u8],
    message: &str,
    encoding: MessageEncoding,
) -> Result<(), StegoError> {
    match encoding {
        MessageEncoding::Latin1 => embed(pixels, message),
        MessageEncoding::Utf8 => embed_bytes(pixels, message.as_bytes()),
    }
}

/// 将位流逐像素写入蓝色通道的最低有效位。
///
/// 位流之后的像素保持原样。
///
/// # Errors
///
/// * 缓冲区长度不是 4 的倍数时返回 [`StegoError::InvalidPixelBuffer`]。
/// * 位流长度超过像素数量时返回 [`StegoError::CapacityExceeded`]。
///
/// 两项检查都在修改缓冲区之前完成，失败时缓冲区不会被改动。
pub fn embed_bits(pixels: &mut [u8], bits: &[u8]) -> Result<(), StegoError> {
    if pixels.len() % BYTES_PER_PIXEL != 0 {
        return Err(StegoError::InvalidPixelBuffer { len: pixels.len() });
    }

    let available = capacity(pixels);
    if bits.len() > available {
        return Err(StegoError::CapacityExceeded {
            required: bits.len(),
            available,
        });
    }

    log::debug!("Embedding {} bits into {} pixels", bits.len(), available);

    pixels
        .chunks_exact_mut(BYTES_PER_PIXEL)
        .zip(bits)
        .for_each(|(pixel, &bit)| {
            let blue = &mut pixel[BLUE_CHANNEL_OFFSET];
            *blue = (*blue & 0xFE) | (bit & 1);
        });

    Ok(())
}

/// 读取每个像素蓝色通道的最低有效位，总是扫描整个缓冲区。
///
/// 末尾不足一个像素的字节会被忽略。
pub fn extract_bits(pixels: &[u8]) -> Vec<u8> {
    pixels
        .chunks_exact(BYTES_PER_PIXEL)
        .map(|pixel| pixel[BLUE_CHANNEL_OFFSET] & 1)
        .collect()
}

/// 从像素缓冲区中恢复 Latin-1 文本。
///
/// 该操作永远不会失败：没有嵌入过消息的图像会得到空字符串或一段噪声，
/// 是否可信由调用方判断。
pub fn extract(pixels: &[u8]) -> String {
    bits_to_text(&extract_bits(pixels))
}

/// 从像素缓冲区中恢复原始字节序列。
pub fn extract_bytes(pixels: &[u8]) -> Vec<u8> {
    bits_to_bytes(&extract_bits(pixels))
}

/// 按指定编码方式提取消息。UTF-8 模式下非法序列会被替换为 U+FFFD。
pub fn extract_message(pixels: &[u8], encoding: MessageEncoding) -> String {
    match encoding {
        MessageEncoding::Latin1 => extract(pixels),
        MessageEncoding::Utf8 => String::from_utf8_lossy(&extract_bytes(pixels)).into_owned(),
    }
}
