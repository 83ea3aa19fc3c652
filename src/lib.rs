//! # bwt-rust
//!
//! 基于 Burrows-Wheeler 变换的压缩 / 索引计算核心。
//!
//! 本 crate 提供 BWT 类编解码器最核心的三块计算：
//!
//! - **后缀数组构建**：SA-IS 诱导排序，线性时间、有界递归
//! - **BWT 正逆变换**：由后缀数组取末列；由 LF 映射还原原文
//! - **rank/select 字典**：两级分块 + 位技巧 popcount 的常数级查询
//!
//! 容器封装、熵编码阶段与命令行等外围设施不属于本 crate，
//! 由上层编解码器或文本检索组件以字节 / 位缓冲区的形式对接。
//!
//! ## 快速示例
//!
//! ```rust
//! use bwt_rust::index::{bwt, sa};
//! use bwt_rust::index::fid::FidIndex;
//!
//! // 文本末尾追加终结符 0，构建后缀数组并做 BWT 变换
//! let mut text = b"banana".to_vec();
//! text.push(0);
//! let sa_arr = sa::build_sa(&text).unwrap();
//! let encoded = bwt::build_bwt(&text, &sa_arr);
//!
//! // 逆变换还原原文
//! let decoded = bwt::invert_bwt(&encoded, 256).unwrap();
//! assert_eq!(decoded, text);
//!
//! // 在任意位向量（此处取 BWT 输出）上构建 rank/select 索引
//! let mut fid = FidIndex::new(encoded);
//! fid.build();
//! let ones = fid.rank(fid.len_bits(), 1).unwrap();
//! assert_eq!(fid.rank(fid.select(ones, 1).unwrap() + 1, 1).unwrap(), ones);
//! ```
//!
//! ## 模块说明
//!
//! - [`index`] — 后缀数组（SA-IS）、BWT 正逆变换、rank/select 字典
//! - [`util`] — popcount 查表与折叠原语
//! - [`error`] — 统一的错误类型

pub mod error;
pub mod index;
pub mod util;
