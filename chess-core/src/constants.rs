//! 棋盘与编码常量定义

/// 棋盘边长（文件数 / 横排数）
pub const BOARD_SIZE: u8 = 8;

/// 格子总数
pub const SQUARE_COUNT: usize = 64;

/// 打包棋盘的字节数（每字节两个格子）
pub const PACKED_BOARD_BYTES: usize = SQUARE_COUNT / 2;

/// 空格子的编码
pub const EMPTY_SQUARE: u8 = 0;

/// 半字节掩码
pub const NIBBLE_MASK: u8 = 0x0F;

/// 十进制编解码的缓冲区最小长度（"255" + 结束符）
pub const DECIMAL_BUFFER_LENGTH: usize = 4;

/// 十进制编解码可表示的最大值
pub const DECIMAL_MAX: u8 = u8::MAX;

/// FEN 字符串的最大长度（含结束符）
///
/// 64 个棋子字符 + 7 个分隔符 + 走子方、易位权、过路兵、两个计数器及其空格
pub const FEN_NOTATION_LENGTH: usize = 90;

/// 二进制局面记录的字节数
pub const RECORD_LENGTH: usize = PACKED_BOARD_BYTES + 4;

/// 二进制记录中表示"无过路兵目标格"的哨兵值
pub const NO_EN_PASSANT: u8 = u8::MAX;

/// 局面文件的推荐扩展名
pub const POSITION_FILE_EXTENSION: &str = "pcgpf";
