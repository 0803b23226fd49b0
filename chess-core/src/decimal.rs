//! 小整数十进制编解码
//!
//! 只处理 0-255 的无符号数（半回合计数、回合数、空格数），
//! 格式化时写入调用方提供的定长缓冲区，不分配内存。

use crate::constants::DECIMAL_BUFFER_LENGTH;
use crate::error::ChessError;

/// 从 `start` 开始读取连续的 ASCII 数字
///
/// 返回 `(数值, 数字个数)`；`start` 处不是数字时返回 `(0, 0)`。
pub fn scan_unsigned(text: &str, start: usize) -> Result<(u8, usize), ChessError> {
    let tail = text.as_bytes().get(start..).unwrap_or_default();
    let digits = tail.iter().take_while(|b| b.is_ascii_digit()).count();
    let run = &tail[..digits];

    let mut value: u8 = 0;
    for &b in run {
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(b - b'0'))
            .ok_or_else(|| ChessError::NumberOutOfRange {
                text: String::from_utf8_lossy(run).into_owned(),
            })?;
    }

    Ok((value, digits))
}

/// 从 `start` 开始读取一个十进制数，没有数字时为 0
pub fn read_unsigned(text: &str, start: usize) -> Result<u8, ChessError> {
    scan_unsigned(text, start).map(|(value, _)| value)
}

/// 将数值格式化为最短十进制串，并写入结束符 `\0`
///
/// 返回写入的字节数（含结束符）。缓冲区小于 4 字节时直接拒绝，不写入任何内容。
pub fn write_unsigned(value: u8, buffer: &mut [u8]) -> Result<usize, ChessError> {
    if buffer.len() < DECIMAL_BUFFER_LENGTH {
        return Err(ChessError::BufferTooSmall {
            needed: DECIMAL_BUFFER_LENGTH,
            capacity: buffer.len(),
        });
    }

    let mut digits = [0u8; DECIMAL_BUFFER_LENGTH - 1];
    let mut count = 0;
    let mut rest = value;
    loop {
        digits[count] = b'0' + rest % 10;
        count += 1;
        rest /= 10;
        if rest == 0 {
            break;
        }
    }

    for (slot, digit) in buffer.iter_mut().zip(digits[..count].iter().rev()) {
        *slot = *digit;
    }
    buffer[count] = 0;

    Ok(count + 1)
}

/// 将数值追加到字符串末尾
pub(crate) fn push_unsigned(out: &mut String, value: u8) {
    let mut buffer = [0u8; DECIMAL_BUFFER_LENGTH];
    // 缓冲区长度固定满足要求
    if let Ok(written) = write_unsigned(value, &mut buffer) {
        out.extend(buffer[..written - 1].iter().map(|&b| char::from(b)));
    }
}
