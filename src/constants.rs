/// 每个像素占用的字节数 (RGBA 交错排列，每个通道 1 字节)。
pub const BYTES_PER_PIXEL: usize = 4;

/// 像素内承载数据的通道偏移量。
/// RGBA 顺序下 `2` 即蓝色通道，只有该字节的最低位会被改写。
pub const BLUE_CHANNEL_OFFSET: usize = 2;

/// 每个字符 (字节) 编码后的位数，高位在前。
pub const BITS_PER_CHAR: usize = 8;

/// 消息结束标记的位数：8 个连续的 0，即一个空字节。
/// 结束标记属于结构的一部分，不属于消息内容。
pub const TERMINATOR_BITS: usize = 8;

/// Latin-1 编码下单个字符允许的最大码点。
pub const MAX_LATIN1_CODE_POINT: u32 = 0xFF;

/// 未指定输出路径时，隐写图像文件名的前缀。
pub const HIDDEN_IMAGE_PREFIX: &str = "doctored_";

/// 未指定输出路径时，恢复文本文件名的前缀。
pub const RECOVERED_TEXT_PREFIX: &str = "recovered_";

/// 提取结果为空时向用户展示的占位文本。
pub const NO_HIDDEN_TEXT: &str = "[no hidden text]";
