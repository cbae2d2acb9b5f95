//! # 命令处理逻辑模块
//!
//! 包含处理 `hide`、`recover` 和 `capacity` 子命令的高级业务逻辑。
//! 本模块负责图像的解码与无损保存、调用核心隐写算法以及向用户报告结果。

use crate::cli::{CapacityArgs, HideArgs, RecoverArgs};
use crate::constants::{HIDDEN_IMAGE_PREFIX, NO_HIDDEN_TEXT, RECOVERED_TEXT_PREFIX};
use crate::error::StegoError;
use crate::steganography::{
    MessageEncoding, capacity, embed_bytes, embed_message, extract_message, max_message_len,
};
use anyhow::{Context, Result};
use colored::Colorize;
use image::{ImageFormat, RgbaImage};
use std::fs;
use std::path::{Path, PathBuf};

/// 处理 'Hide' 命令的执行逻辑。
///
/// 将输入图像解码为 RGBA 像素，嵌入文本后保存为 PNG。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取或解码输入的图像，或无法读取文本文件。
/// * 目标文件已存在且未指定 `--force`。
/// * 图像没有足够的空间，或文本包含无法编码的字符。此时不会写入任何文件。
/// * 无法写入目标图像文件。
pub fn handle_hide(args: HideArgs) -> Result<()> {
    let dest = args
        .dest
        .clone()
        .unwrap_or_else(|| sibling_path(&args.image, HIDDEN_IMAGE_PREFIX, "png"));
    ensure_writable(&dest, args.force)?;

    let mut picture = load_rgba(&args.image)?;

    let encoding = MessageEncoding::from(args.encoding);
    let payload = match (&args.text, args.message) {
        (Some(path), _) => read_text_file(path, encoding)?,
        (None, Some(message)) => Payload::Text(message),
        (None, None) => anyhow::bail!("Either --text or --message must be given."),
    };

    let (result, encoded_len) = match &payload {
        Payload::Text(message) => (
            embed_message(&mut picture, message, encoding),
            encoding.encoded_len(message),
        ),
        Payload::Raw(bytes) => (embed_bytes(&mut picture, bytes), bytes.len()),
    };

    result.map_err(|err| match err {
        StegoError::CapacityExceeded {
            required,
            available,
        } => anyhow::anyhow!(
            "Not enough space in the image to hide the text. \nRequired: {} bits, Available: {} bits",
            required.to_string().red().bold(),
            available.to_string().green().bold()
        ),
        other => anyhow::Error::new(other).context("Failed to hide the text in the image."),
    })?;

    log::info!(
        "Embedded {} bytes into {}x{} image",
        encoded_len,
        picture.width(),
        picture.height()
    );

    picture
        .save_with_format(&dest, ImageFormat::Png)
        .with_context(|| {
            format!(
                "Unable to write to target image file: {}",
                dest.to_string_lossy().red().bold()
            )
        })?;

    println!(
        "The text has been successfully hidden and saved: {}",
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Recover' 命令的执行逻辑。
///
/// 提取文本，写入目标文件并在终端打印。提取本身永远不会失败，
/// 因此对结果做可打印性检查，提醒用户图像可能并未隐藏任何内容。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取或解码输入的图像。
/// * 目标文件已存在且未指定 `--force`。
/// * 无法写入目标文本文件。
pub fn handle_recover(args: RecoverArgs) -> Result<()> {
    let dest = args
        .text
        .clone()
        .unwrap_or_else(|| sibling_path(&args.image, RECOVERED_TEXT_PREFIX, "txt"));
    ensure_writable(&dest, args.force)?;

    let picture = load_rgba(&args.image)?;
    let text = extract_message(&picture, args.encoding.into());
    log::info!("Recovered {} characters", text.chars().count());

    fs::write(&dest, &text).with_context(|| {
        format!(
            "Unable to write to target text file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    if text.is_empty() {
        println!("{}", NO_HIDDEN_TEXT.yellow());
    } else {
        if !is_printable(&text) {
            println!(
                "{}",
                "Warning: the recovered text contains control characters; the image may not carry a hidden message."
                    .yellow()
                    .bold()
            );
        }
        println!("{text}");
    }

    println!(
        "The text has been successfully recovered and saved: {}",
        dest.to_string_lossy().green().bold()
    );
    Ok(())
}

/// 处理 'Capacity' 命令的执行逻辑，打印像素数与最多可隐藏的字节数。
///
/// # Errors
///
/// 无法读取或解码输入的图像时返回错误。
pub fn handle_capacity(args: CapacityArgs) -> Result<()> {
    let picture = load_rgba(&args.image)?;

    println!(
        "{}x{} pixels, capacity {} bits, up to {} bytes of text",
        picture.width(),
        picture.height(),
        capacity(&picture).to_string().green().bold(),
        max_message_len(&picture).to_string().green().bold()
    );
    Ok(())
}

/// 待隐藏的内容：合法 UTF-8 文本，或按 Latin-1 直接逐字节嵌入的原始字节。
enum Payload {
    Text(String),
    Raw(Vec<u8>),
}

/// 读取文本文件。
///
/// 文件不是合法 UTF-8 时，Latin-1 模式下把原始字节视为 Latin-1 文本直接嵌入；
/// UTF-8 模式下返回错误。
fn read_text_file(path: &Path, encoding: MessageEncoding) -> Result<Payload> {
    let bytes = fs::read(path).with_context(|| {
        format!(
            "Unable to read text file: {}",
            path.to_string_lossy().red().bold()
        )
    })?;

    match (String::from_utf8(bytes), encoding) {
        (Ok(text), _) => Ok(Payload::Text(text)),
        (Err(err), MessageEncoding::Latin1) => {
            log::info!("{} is not UTF-8, embedding its raw bytes", path.display());
            Ok(Payload::Raw(err.into_bytes()))
        }
        (Err(err), MessageEncoding::Utf8) => Err(err).with_context(|| {
            format!(
                "Text file must be valid UTF-8 when --encoding utf8 is used: {}",
                path.to_string_lossy().red().bold()
            )
        }),
    }
}

/// 判断文本是否适合直接展示：除换行、回车和制表符之外不含控制字符。
pub fn is_printable(text: &str) -> bool {
    text.chars()
        .all(|ch| !ch.is_control() || matches!(ch, '\n' | '\r' | '\t'))
}

/// 读取并解码图像，统一转换为每通道 8 位的 RGBA。
fn load_rgba(path: &Path) -> Result<RgbaImage> {
    let picture = image::open(path)
        .with_context(|| {
            format!(
                "Unable to read image file: {}",
                path.to_string_lossy().red().bold()
            )
        })?
        .to_rgba8();

    log::info!(
        "Loaded {} ({}x{})",
        path.display(),
        picture.width(),
        picture.height()
    );
    Ok(picture)
}

/// 在 `path` 所在目录下生成 `<prefix><文件名主干>.<extension>`。
fn sibling_path(path: &Path, prefix: &str, extension: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!("{prefix}{stem}.{extension}"))
}

/// 未指定 `force` 时拒绝覆盖已存在的文件。
fn ensure_writable(path: &Path, force: bool) -> Result<()> {
    anyhow::ensure!(
        force || !path.exists(),
        "Output file already exists: {}. \nUse --force to overwrite it.",
        path.to_string_lossy().red().bold()
    );
    Ok(())
}
