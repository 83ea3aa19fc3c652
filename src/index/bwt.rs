//! Burrows-Wheeler 变换的正逆两个方向。
//!
//! 正变换直接由后缀数组取每个后缀的前一字符构成末列，不引入显式终结符列；
//! 逆变换依赖「终结符 0 在编码流中恰好出现一次」的约定，违反即报错。

use crate::error::{Error, Result};

/// 解码起点所用的终结符，与文本编码中 0 预留为 $ 的约定一致。
pub const TERMINATOR: u8 = 0;

/// 根据后缀数组构建 BWT。
/// text 为数值化字母表（0..alphabet），sa 为后缀数组位置。
pub fn build_bwt(text: &[u8], sa: &[u32]) -> Vec<u8> {
    let n = text.len();
    if n == 0 {
        return Vec::new();
    }
    let mut bwt = Vec::with_capacity(n);
    for &p in sa {
        let i = p as usize;
        let prev = if i == 0 { text[n - 1] } else { text[i - 1] };
        bwt.push(prev);
    }
    bwt
}

/// 由 LF 映射解码 BWT，还原原始字节序列。
/// 非空输入必须恰好包含一个终结符，否则返回 `InvalidArgument`；
/// 出现 >= alphabet 的符号返回 `InvalidAlphabetSize`；空输入解码为空。
pub fn invert_bwt(encoded: &[u8], alphabet: usize) -> Result<Vec<u8>> {
    let n = encoded.len();
    if n == 0 {
        return Ok(Vec::new());
    }

    // 频度直方图，顺带记录终结符位置并校验唯一性
    let mut count = vec![0u32; alphabet];
    let mut terminator = None;
    for (i, &sym) in encoded.iter().enumerate() {
        let c = sym as usize;
        if c >= alphabet {
            return Err(Error::InvalidAlphabetSize {
                alphabet,
                symbol: c,
            });
        }
        if sym == TERMINATOR {
            if terminator.is_some() {
                return Err(Error::InvalidArgument(
                    "encoded stream contains more than one terminator symbol".to_string(),
                ));
            }
            terminator = Some(i);
        }
        count[c] += 1;
    }
    let Some(start) = terminator else {
        return Err(Error::InvalidArgument(
            "encoded stream contains no terminator symbol".to_string(),
        ));
    };

    // 频度化为累计值（首列中各符号区段的结束位置）
    for c in 1..alphabet {
        count[c] += count[c - 1];
    }

    // 自尾向前构建 LF 映射：每个符号从其区段末端向下占位
    let mut lf = vec![0u32; n];
    for i in (0..n).rev() {
        let c = encoded[i] as usize;
        count[c] -= 1;
        lf[count[c] as usize] = i as u32;
    }

    // 从终结符位置出发沿 LF 链走 n 步，即按原文顺序输出
    let mut decoded = Vec::with_capacity(n);
    let mut next = start;
    for _ in 0..n {
        next = lf[next] as usize;
        decoded.push(encoded[next]);
    }
    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::sa;

    fn make_text(len: usize, sigma: u8) -> Vec<u8> {
        // 符号取 1..=sigma，0 留给终结符
        let mut x: u32 = 42;
        let mut v = Vec::with_capacity(len);
        for _ in 0..len {
            x = x.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            v.push((1 + (x >> 16) % u32::from(sigma)) as u8);
        }
        v
    }

    #[test]
    fn bwt_empty() {
        assert_eq!(build_bwt(&[], &[]), Vec::<u8>::new());
        assert_eq!(invert_bwt(&[], 256).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn bwt_banana_last_column() {
        // "banana" + $ 的末列为 "annb$aa"
        let mut text = b"banana".to_vec();
        text.push(0);
        let sa_arr = sa::build_sa(&text).unwrap();
        let bwt = build_bwt(&text, &sa_arr);
        assert_eq!(bwt, b"annb\0aa");
    }

    #[test]
    fn bwt_roundtrip_banana() {
        let mut text = b"banana".to_vec();
        text.push(0);
        let sa_arr = sa::build_sa(&text).unwrap();
        let bwt = build_bwt(&text, &sa_arr);
        assert_eq!(invert_bwt(&bwt, 256).unwrap(), text);
    }

    #[test]
    fn bwt_roundtrip_numeric_small_alphabet() {
        // {0:$, 1:a, 2:b, 3:n} 编码的 "banana$"
        let text = [2u8, 1, 3, 1, 3, 1, 0];
        let sa_arr = sa::build_sa_with_alphabet(&text, 4).unwrap();
        let bwt = build_bwt(&text, &sa_arr);
        assert_eq!(invert_bwt(&bwt, 4).unwrap(), text);
    }

    #[test]
    fn bwt_roundtrip_single_terminator_only() {
        let text = [0u8];
        let sa_arr = sa::build_sa(&text).unwrap();
        let bwt = build_bwt(&text, &sa_arr);
        assert_eq!(invert_bwt(&bwt, 256).unwrap(), text);
    }

    #[test]
    fn bwt_roundtrip_random_texts() {
        for len in 1..=60 {
            let mut text = make_text(len, 5);
            text.push(TERMINATOR);
            let sa_arr = sa::build_sa(&text).unwrap();
            let bwt = build_bwt(&text, &sa_arr);
            assert_eq!(invert_bwt(&bwt, 256).unwrap(), text, "mismatch on len={}", len);
        }
    }

    #[test]
    fn bwt_roundtrip_highly_repetitive() {
        let mut text = b"abababababababababababab".to_vec();
        text.push(TERMINATOR);
        let sa_arr = sa::build_sa(&text).unwrap();
        let bwt = build_bwt(&text, &sa_arr);
        assert_eq!(invert_bwt(&bwt, 256).unwrap(), text);
    }

    #[test]
    fn invert_rejects_missing_terminator() {
        let err = invert_bwt(b"abc", 256).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn invert_rejects_duplicate_terminator() {
        let err = invert_bwt(&[1, 0, 2, 0], 256).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn invert_rejects_symbol_outside_alphabet() {
        let err = invert_bwt(&[0, 1, 7], 4).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidAlphabetSize {
                alphabet: 4,
                symbol: 7
            }
        );
    }
}
