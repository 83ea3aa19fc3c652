//! 演示如何在 library 模式下使用 bwt-rust 完成一次 BWT 编解码往返。
//!
//! 运行方式：
//! ```bash
//! cargo run --example roundtrip
//! ```

use bwt_rust::index::fid::FidIndex;
use bwt_rust::index::{bwt, sa};

fn main() {
    // 1. 准备输入：末尾追加终结符 0
    let mut text = b"the quick brown fox jumps over the lazy dog".to_vec();
    println!("原文: {}", String::from_utf8_lossy(&text));
    println!("长度: {} 字节", text.len());
    text.push(0);

    // 2. 构建后缀数组（SA-IS）
    let sa_arr = sa::build_sa(&text).expect("suffix array construction");
    println!("\n后缀数组构建完成：长度={}", sa_arr.len());

    // 3. BWT 正变换
    let encoded = bwt::build_bwt(&text, &sa_arr);
    println!("BWT 末列: {:?}", String::from_utf8_lossy(&encoded));

    // 4. 逆变换还原并校验
    let decoded = bwt::invert_bwt(&encoded, 256).expect("inverse transform");
    assert_eq!(decoded, text);
    println!("逆变换还原成功，与原文一致");

    // 5. 在 BWT 输出上构建 rank/select 索引
    let mut fid = FidIndex::new(encoded);
    fid.build();
    let n_bits = fid.len_bits();
    let ones = fid.rank(n_bits, 1).expect("rank");
    println!("\nrank/select 索引: {} 位，其中 1 有 {} 个", n_bits, ones);

    let mid = fid.rank(n_bits / 2, 1).expect("rank");
    println!("前一半位向量中 1 有 {} 个", mid);

    let first = fid.select(1, 1).expect("select");
    let last = fid.select(ones, 1).expect("select");
    println!("第一个 1 在下标 {}，最后一个 1 在下标 {}", first, last);

    println!("\n完成！");
}
