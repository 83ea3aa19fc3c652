//! 索引核心：后缀数组构建（SA-IS）、BWT 正逆变换、rank/select 字典。

pub mod bwt;
pub mod fid;
pub mod sa;
