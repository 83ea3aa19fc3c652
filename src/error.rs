//! 本 crate 的错误类型定义。
//!
//! 所有核心运算都是确定性的纯计算，失败同步返回给调用方，内部不做重试。

use thiserror::Error;

/// 核心运算的失败分类。
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// 参数不合法（bit 取值、块大小配置、终结符约定等）。
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// 下标或序号超出有效范围。
    #[error("out of range: {0}")]
    OutOfRange(String),

    /// 在 `build` 完成前发起查询。
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// 声明的字母表大小容纳不下输入中的符号。
    #[error("alphabet size {alphabet} too small for input symbol {symbol}")]
    InvalidAlphabetSize { alphabet: usize, symbol: usize },
}

/// 核心运算的 Result 别名。
pub type Result<T> = std::result::Result<T, Error>;
