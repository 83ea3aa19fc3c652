//! 位运算工具函数。

pub mod popcount;
