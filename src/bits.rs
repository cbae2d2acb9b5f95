//! # 位编解码模块
//!
//! 负责文本/字节与位流之间的相互转换。位流中的每个元素都是 `0` 或 `1`，
//! 每个字节按高位在前展开为 8 位，末尾总是追加 8 个 0 作为结束标记。

use crate::constants::{BITS_PER_CHAR, MAX_LATIN1_CODE_POINT, TERMINATOR_BITS};
use crate::error::StegoError;

/// 将文本按 Latin-1 (每个字符一个字节) 转换为带结束标记的位流。
///
/// # Errors
///
/// * 字符码点大于 `U+00FF` 时返回 [`StegoError::OutOfRangeCharacter`]，不做截断。
/// * 字符为 `U+0000` 时返回 [`StegoError::NulCharacter`]。
pub fn text_to_bits(message: &str) -> Result<Vec<u8>, StegoError> {
    let bytes = message
        .chars()
        .enumerate()
        .map(|(index, ch)| match u32::from(ch) {
            0 => Err(StegoError::NulCharacter { index }),
            code if code > MAX_LATIN1_CODE_POINT => {
                Err(StegoError::OutOfRangeCharacter { ch, index })
            }
            code => Ok(code as u8),
        })
        .collect::<Result<Vec<u8>, StegoError>>()?;

    bytes_to_bits(&bytes)
}

/// 将位流解码为 Latin-1 文本，遇到结束标记即停止。
///
/// 位流在找到结束标记之前耗尽时，返回已经解码的部分。
pub fn bits_to_text(bits: &[u8]) -> String {
    bits_to_bytes(bits).into_iter().map(char::from).collect()
}

/// 将任意字节序列转换为带结束标记的位流。
///
/// # Errors
///
/// 字节序列中出现 `0` 时返回 [`StegoError::NulCharacter`]。
pub fn bytes_to_bits(bytes: &[u8]) -> Result<Vec<u8>, StegoError> {
    if let Some(index) = bytes.iter().position(|&b| b == 0) {
        return Err(StegoError::NulCharacter { index });
    }

    let mut bits = Vec::with_capacity(bytes.len() * BITS_PER_CHAR + TERMINATOR_BITS);
    for &byte in bytes {
        bits.extend((0..BITS_PER_CHAR).rev().map(|shift| (byte >> shift) & 1));
    }
    bits.extend(std::iter::repeat_n(0u8, TERMINATOR_BITS));

    log::debug!(
        "Encoded {} bytes into {} bits (including terminator)",
        bytes.len(),
        bits.len()
    );
    Ok(bits)
}

/// 以 8 位为一组扫描位流，直到遇到全 0 的结束标记或剩余位数不足 8 位。
pub fn bits_to_bytes(bits: &[u8]) -> Vec<u8> {
    bits.chunks_exact(BITS_PER_CHAR)
        .map(|group| group.iter().fold(0u8, |acc, &bit| (acc << 1) | (bit & 1)))
        .take_while(|&byte| byte != 0)
        .collect()
}
