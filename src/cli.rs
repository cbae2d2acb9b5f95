//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use crate::steganography::MessageEncoding;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// 一款基于蓝色通道 LSB (最低有效位) 隐写术的命令行工具，用于在无损格式图像 (如 PNG) 中隐藏或恢复文本。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "一款基于蓝色通道 LSB (最低有效位) 隐写术的命令行工具。每个像素在蓝色通道的最低位承载 1 位数据，结果总是保存为无损 PNG。"
)]
pub struct Cli {
    /// 提高日志详细程度 (-v 为 info，-vv 为 debug)。
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令：hide (隐藏)、recover (恢复) 和 capacity (容量)。
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 在图像中隐藏文本，并保存为 PNG。
    Hide(HideArgs),

    /// 从经过隐写的图像中恢复隐藏的文本。
    Recover(RecoverArgs),

    /// 显示图像最多能隐藏多少文本。
    Capacity(CapacityArgs),
}

/// 命令行中可选的文本编码方式。
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EncodingArg {
    /// 每个字符一个字节，只接受 U+0001..=U+00FF。
    #[default]
    Latin1,
    /// 按 UTF-8 字节隐藏，可承载任意文本。
    Utf8,
}

impl From<EncodingArg> for MessageEncoding {
    fn from(arg: EncodingArg) -> Self {
        match arg {
            EncodingArg::Latin1 => MessageEncoding::Latin1,
            EncodingArg::Utf8 => MessageEncoding::Utf8,
        }
    }
}

/// 'hide' 命令所需的参数。
#[derive(Args, Debug)]
pub struct HideArgs {
    /// 用于隐写的输入图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 要隐藏的文本内容的文件路径。
    #[arg(short, long, conflicts_with = "message", required_unless_present = "message")]
    pub text: Option<PathBuf>,

    /// 直接在命令行中给出要隐藏的文本。
    #[arg(short, long)]
    pub message: Option<String>,

    /// 结果图像的输出路径，默认为输入图像旁的 `doctored_<名称>.png`。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// 文本的编码方式。
    #[arg(short, long, value_enum, default_value_t)]
    pub encoding: EncodingArg,

    /// 输出文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,
}

/// 'recover' 命令所需的参数。
#[derive(Args, Debug)]
pub struct RecoverArgs {
    /// 已隐藏文本数据的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 恢复文本的保存路径，默认为图像旁的 `recovered_<名称>.txt`。
    #[arg(short, long)]
    pub text: Option<PathBuf>,

    /// 文本的编码方式，必须与隐藏时一致。
    #[arg(short, long, value_enum, default_value_t)]
    pub encoding: EncodingArg,

    /// 输出文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,
}

/// 'capacity' 命令所需的参数。
#[derive(Args, Debug)]
pub struct CapacityArgs {
    /// 要检查的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,
}
