//! 位向量上的 rank/select 字典（FID，fully indexable dictionary）。
//!
//! 两级分块：大块存全局累计 1 个数，小块存距所在大块起点的累计，
//! 查询末端以逐字节查表 popcount 补偿。位下标在字节内按高位在前
//! （bit 0 = 字节最高位），与建索引时 32 位字的大端组装一致。

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::util::popcount::{popcount32, popcount8};

/// 默认大块跨度（位）。
pub const DEFAULT_LARGE_BLOCK_SIZE: usize = 256;
/// 默认小块跨度（位）。
pub const DEFAULT_SMALL_BLOCK_SIZE: usize = 32;

/// 建索引与 select 消解按 32 位字处理。
const WORD_BITS: usize = 32;

/// 两级分块的 rank/select 索引，独占持有其位向量。
#[derive(Debug, Serialize, Deserialize)]
pub struct FidIndex {
    bits: Vec<u8>,
    large_block_size: usize,
    small_block_size: usize,
    /// large_blocks[l] = [0, l*large) 内 1 的个数
    large_blocks: Vec<u32>,
    /// small_blocks[s] = 所在大块起点到 s*small 之间 1 的个数（大块边界处归零）
    small_blocks: Vec<u32>,
    built: bool,
}

impl FidIndex {
    /// 以默认块大小（256/32）包装一个位向量，尚未建索引。
    pub fn new(bits: Vec<u8>) -> Self {
        Self {
            bits,
            large_block_size: DEFAULT_LARGE_BLOCK_SIZE,
            small_block_size: DEFAULT_SMALL_BLOCK_SIZE,
            large_blocks: Vec::new(),
            small_blocks: Vec::new(),
            built: false,
        }
    }

    /// 指定块大小。小块必须是 32 的正倍数（按字建索引），
    /// 大块必须是小块的正倍数，否则返回 `InvalidArgument`。
    pub fn with_block_sizes(
        bits: Vec<u8>,
        large_block_size: usize,
        small_block_size: usize,
    ) -> Result<Self> {
        if small_block_size == 0 || small_block_size % WORD_BITS != 0 {
            return Err(Error::InvalidArgument(format!(
                "small block size {} must be a positive multiple of {}",
                small_block_size, WORD_BITS
            )));
        }
        if large_block_size == 0 || large_block_size % small_block_size != 0 {
            return Err(Error::InvalidArgument(format!(
                "large block size {} must be a positive multiple of small block size {}",
                large_block_size, small_block_size
            )));
        }
        Ok(Self {
            bits,
            large_block_size,
            small_block_size,
            large_blocks: Vec::new(),
            small_blocks: Vec::new(),
            built: false,
        })
    }

    /// 位向量长度（位）。
    pub fn len_bits(&self) -> usize {
        self.bits.len() * 8
    }

    /// 单次线性扫描重建两级累计数组。代价 O(N)，额外空间 O(N / small)。
    pub fn build(&mut self) {
        let n_bits = self.len_bits();
        let words_per_small = self.small_block_size / WORD_BITS;
        let smalls_per_large = self.large_block_size / self.small_block_size;
        let n_small = n_bits / self.small_block_size;

        self.small_blocks = vec![0u32; n_small + 1];
        self.large_blocks = vec![0u32; n_bits / self.large_block_size + 1];

        let mut since_large = 0u32;
        let mut total = 0u32;
        for s in 0..=n_small {
            if s % smalls_per_large == 0 {
                self.large_blocks[s / smalls_per_large] = total;
                since_large = 0;
            }
            self.small_blocks[s] = since_large;
            if s < n_small {
                let mut ones = 0u32;
                for w in 0..words_per_small {
                    ones += popcount32(self.word_at(s * words_per_small + w));
                }
                since_large += ones;
                total += ones;
            }
        }
        self.built = true;
    }

    /// [0, index) 内 bit 的出现次数。
    /// `build` 之前查询返回 `InvalidState`；index 越界返回 `OutOfRange`；
    /// bit 不在 {0,1} 返回 `InvalidArgument`。
    pub fn rank(&self, index: usize, bit: u8) -> Result<usize> {
        self.ensure_built()?;
        check_bit(bit)?;
        let n_bits = self.len_bits();
        if index > n_bits {
            return Err(Error::OutOfRange(format!(
                "rank index {} exceeds bit length {}",
                index, n_bits
            )));
        }
        let ones = self.rank1(index);
        Ok(if bit == 1 { ones } else { index - ones })
    }

    /// 第 n 个 bit（n 为 1 起始序数）所在的最小下标，
    /// 即满足 rank(index+1, bit) == n 的唯一 index。
    /// n 为 0 或超过总出现次数时返回 `OutOfRange`。
    pub fn select(&self, n: usize, bit: u8) -> Result<usize> {
        self.ensure_built()?;
        check_bit(bit)?;
        let n_bits = self.len_bits();
        let ones = self.rank1(n_bits);
        let total = if bit == 1 { ones } else { n_bits - ones };
        if n == 0 || n > total {
            return Err(Error::OutOfRange(format!(
                "occurrence {} of bit {} not present ({} occurrences total)",
                n, bit, total
            )));
        }

        // 大块二分：最后一个累计仍小于 n 的大块
        let mut lo = 0usize;
        let mut hi = self.large_blocks.len() - 1;
        while lo < hi {
            let mid = (lo + hi + 1) / 2;
            if self.large_rank(mid, bit) < n {
                lo = mid;
            } else {
                hi = mid - 1;
            }
        }
        let lb = lo;
        let n_in_large = n - self.large_rank(lb, bit);

        // 小块二分，范围限定在该大块之内
        let smalls_per_large = self.large_block_size / self.small_block_size;
        let s_base = lb * smalls_per_large;
        let mut lo = s_base;
        let mut hi = (s_base + smalls_per_large - 1).min(self.small_blocks.len() - 1);
        while lo < hi {
            let mid = (lo + hi + 1) / 2;
            if self.small_rank(s_base, mid, bit) < n_in_large {
                lo = mid;
            } else {
                hi = mid - 1;
            }
        }
        let sb = lo;
        let mut remain = (n_in_large - self.small_rank(s_base, sb, bit)) as u32;

        // 小块内逐字定位，字内按 16/8/4/2/1 位级联消解，无逐位扫描
        let words_per_small = self.small_block_size / WORD_BITS;
        let word_base = sb * words_per_small;
        for w in 0..words_per_small {
            let raw = self.word_at(word_base + w);
            let word = if bit == 1 { raw } else { !raw };
            let count = popcount32(word);
            if remain <= count {
                let offset = w * WORD_BITS + select_in_word(word, remain) as usize;
                return Ok(sb * self.small_block_size + offset);
            }
            remain -= count;
        }
        unreachable!("occurrence count was validated against the total")
    }

    /// 持久化已建好的索引（bincode 序列化）。
    pub fn save_to_file(&self, path: &str) -> anyhow::Result<()> {
        let mut f = std::fs::File::create(path)?;
        bincode::serialize_into(&mut f, self)?;
        Ok(())
    }

    /// 从文件载入索引。
    pub fn load_from_file(path: &str) -> anyhow::Result<Self> {
        let f = std::fs::File::open(path)?;
        let idx: Self = bincode::deserialize_from(f)?;
        Ok(idx)
    }

    /// [0, index) 内 1 的个数：大块累计 + 小块累计 + 末端逐字节补偿。
    fn rank1(&self, index: usize) -> usize {
        let lb = index / self.large_block_size;
        let sb = index / self.small_block_size;
        let mut ones = self.large_blocks[lb] as usize + self.small_blocks[sb] as usize;

        let start = sb * self.small_block_size;
        let rem = index - start;
        let byte_base = start / 8;
        for k in 0..rem / 8 {
            ones += popcount8(self.bits[byte_base + k]) as usize;
        }
        let tail_bits = rem % 8;
        if tail_bits > 0 {
            let masked = self.bits[byte_base + rem / 8] & (0xffu8 << (8 - tail_bits));
            ones += popcount8(masked) as usize;
        }
        ones
    }

    /// [0, l*large) 内 bit 的个数；bit 0 取补。
    #[inline]
    fn large_rank(&self, l: usize, bit: u8) -> usize {
        let ones = self.large_blocks[l] as usize;
        if bit == 1 {
            ones
        } else {
            l * self.large_block_size - ones
        }
    }

    /// 所在大块起点到小块 s 起点之间 bit 的个数；bit 0 取补。
    #[inline]
    fn small_rank(&self, s_base: usize, s: usize, bit: u8) -> usize {
        let ones = self.small_blocks[s] as usize;
        if bit == 1 {
            ones
        } else {
            (s - s_base) * self.small_block_size - ones
        }
    }

    /// 第 w 个 32 位字，4 字节大端组装，越过向量末尾的字节按 0 处理。
    #[inline]
    fn word_at(&self, w: usize) -> u32 {
        let base = w * 4;
        let mut word = 0u32;
        for k in 0..4 {
            let byte = self.bits.get(base + k).copied().unwrap_or(0);
            word = (word << 8) | u32::from(byte);
        }
        word
    }

    fn ensure_built(&self) -> Result<()> {
        if self.built {
            Ok(())
        } else {
            Err(Error::InvalidState(
                "index queried before build".to_string(),
            ))
        }
    }
}

fn check_bit(bit: u8) -> Result<()> {
    if bit <= 1 {
        Ok(())
    } else {
        Err(Error::InvalidArgument(format!(
            "bit must be 0 or 1, got {}",
            bit
        )))
    }
}

/// 在 32 位字内定位第 n 个置位 bit（n 为 1 起始，bit 0 = 最高位）。
/// 先折叠出 2/4/8/16 位分组的子和，再自顶向下逐级比较阈值下钻。
fn select_in_word(word: u32, n: u32) -> u32 {
    let pairs = word - ((word >> 1) & 0x5555_5555);
    let nibbles = (pairs & 0x3333_3333) + ((pairs >> 2) & 0x3333_3333);
    let bytes = (nibbles + (nibbles >> 4)) & 0x0f0f_0f0f;
    let halves = bytes + (bytes >> 8);

    let mut n = n;
    let mut pos = 0u32;
    let in_half = (halves >> 16) & 0xff;
    if n > in_half {
        n -= in_half;
        pos += 16;
    }
    let in_byte = (bytes >> (24 - pos)) & 0xff;
    if n > in_byte {
        n -= in_byte;
        pos += 8;
    }
    let in_nibble = (nibbles >> (28 - pos)) & 0xf;
    if n > in_nibble {
        n -= in_nibble;
        pos += 4;
    }
    let in_pair = (pairs >> (30 - pos)) & 0x3;
    if n > in_pair {
        n -= in_pair;
        pos += 2;
    }
    let in_bit = (word >> (31 - pos)) & 1;
    if n > in_bit {
        pos += 1;
    }
    pos
}
