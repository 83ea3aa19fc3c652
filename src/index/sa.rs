//! 后缀数组构建（SA-IS 诱导排序，线性时间）。
//!
//! 省略显式终结符 $：归纳扫描以「槽位值 0 兼作空位」的约定处理后缀 0，
//! 递归层的缩减串复用输出缓冲区尾部，临时后缀数组占用头部，两段不重叠。

use crate::error::{Error, Result};

/// 默认符号数（完整字节字母表）。
pub const DEFAULT_ALPHABET_SIZE: usize = 256;

/// 构建后缀数组，字母表大小取默认值 256。
/// 输入为数值化的文本（0 通常预留为终结符 $）；空输入产生空后缀数组。
pub fn build_sa(text: &[u8]) -> Result<Vec<u32>> {
    build_sa_with_alphabet(text, DEFAULT_ALPHABET_SIZE)
}

/// 以显式字母表大小构建后缀数组。
/// 输入中出现 >= alphabet 的符号时返回 `InvalidAlphabetSize`。
pub fn build_sa_with_alphabet(text: &[u8], alphabet: usize) -> Result<Vec<u32>> {
    if let Some(&bad) = text.iter().find(|&&b| (b as usize) >= alphabet) {
        return Err(Error::InvalidAlphabetSize {
            alphabet,
            symbol: bad as usize,
        });
    }
    if text.is_empty() {
        return Ok(Vec::new());
    }
    let mut sa = vec![0u32; text.len()];
    sais(text, &mut sa, alphabet);
    Ok(sa)
}

/// 后缀类型：S 表示该后缀小于其右邻后缀，L 表示大于；相等时继承右邻的类型。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SuffixType {
    L,
    S,
}

/// 顶层的字节输入与递归层的名字序列共用同一套归纳扫描逻辑。
trait Symbol: Copy {
    fn index(self) -> usize;
}

impl Symbol for u8 {
    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

impl Symbol for u32 {
    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// 未命名槽位的标记，命名阶段专用。
const UNNAMED: u32 = u32::MAX;

/// 每个符号的四个桶游标：静态的区间端点加上移动中的 L/S 写游标。
/// 全程满足 start <= l_cursor <= 区间分界 <= s_cursor <= end。
struct Buckets {
    start: Vec<u32>,
    end: Vec<u32>,
    l_cursor: Vec<u32>,
    s_cursor: Vec<u32>,
}

impl Buckets {
    fn new(histogram: &[u32]) -> Self {
        let mut start = Vec::with_capacity(histogram.len());
        let mut end = Vec::with_capacity(histogram.len());
        let mut acc = 0u32;
        for &count in histogram {
            start.push(acc);
            acc += count;
            end.push(acc);
        }
        let l_cursor = start.clone();
        let s_cursor = end.clone();
        Self {
            start,
            end,
            l_cursor,
            s_cursor,
        }
    }

    fn reset(&mut self) {
        self.l_cursor.copy_from_slice(&self.start);
        self.s_cursor.copy_from_slice(&self.end);
    }
}

#[inline]
fn is_lms(types: &[SuffixType], index: usize) -> bool {
    index > 0 && types[index] == SuffixType::S && types[index - 1] == SuffixType::L
}

/// SA-IS 主体，对 input 的全部后缀排序并写入 sa（与 input 等长）。
fn sais<S: Symbol>(input: &[S], sa: &mut [u32], alphabet: usize) {
    let n = input.len();

    //-------------------------------------------------------------------------
    // 阶段 1：从右向左分类（S/L 型），同时统计直方图、收集 LMS 位置
    //-------------------------------------------------------------------------
    let mut types = vec![SuffixType::L; n];
    let mut histogram = vec![0u32; alphabet];
    let mut lms: Vec<u32> = Vec::new();

    histogram[input[n - 1].index()] += 1;
    for i in (0..n - 1).rev() {
        let c = input[i].index();
        histogram[c] += 1;
        let next = input[i + 1].index();
        types[i] = if c < next {
            SuffixType::S
        } else if c > next {
            SuffixType::L
        } else {
            types[i + 1]
        };
        if types[i] == SuffixType::L && types[i + 1] == SuffixType::S {
            lms.push((i + 1) as u32);
        }
    }

    let mut buckets = Buckets::new(&histogram);

    // 槽位值 0 兼作空位：后缀 0 没有前驱，归纳扫描对二者同样跳过
    for slot in sa.iter_mut() {
        *slot = 0;
    }

    // 粗放置：LMS 仅按首符号入桶（自区间尾部向前），桶内相对顺序此时未定
    for &p in lms.iter().rev() {
        let c = input[p as usize].index();
        buckets.s_cursor[c] -= 1;
        sa[buckets.s_cursor[c] as usize] = p;
    }

    induce_l(input, &types, sa, &mut buckets);
    induce_s(input, &types, sa, &mut buckets);
    buckets.reset();

    //-------------------------------------------------------------------------
    // 阶段 2：为 LMS 子串命名，必要时对名字序列递归
    //-------------------------------------------------------------------------

    // LMS 位置按归纳后的出现顺序左移压紧
    let mut n1 = 0usize;
    for i in 0..n {
        let pos = sa[i];
        if is_lms(&types, pos as usize) {
            sa[n1] = pos;
            n1 += 1;
        }
    }
    for slot in sa[n1..].iter_mut() {
        *slot = UNNAMED;
    }

    // 相邻 LMS 子串逐字符（含类型边界）比较，出现差异即递增命名
    let mut name = 0u32;
    let mut prev: Option<usize> = None;
    for i in 0..n1 {
        let pos = sa[i] as usize;
        let diff = match prev {
            None => true,
            Some(p) => lms_substring_differs(input, &types, pos, p),
        };
        if diff {
            name += 1;
            prev = Some(pos);
        }
        // 相邻 LMS 位置至少相差 2，pos/2 在 LMS 集合上单射
        sa[n1 + pos / 2] = name - 1;
    }

    // 命名结果右对齐到尾部，形成缩减串（下标即 LMS 的文本顺序）
    let mut j = n;
    for i in (n1..n).rev() {
        if sa[i] != UNNAMED {
            j -= 1;
            sa[j] = sa[i];
        }
    }

    // 名字不唯一时递归求缩减串的后缀数组；缩减串在尾部，递归的 SA 用头部，
    // n1 <= n/2 保证两段不相交
    if (name as usize) < n1 {
        let (head, tail) = sa.split_at_mut(n - n1);
        sais(&*tail, &mut head[..n1], name as usize);
    } else {
        // 名字已是双射，直接取逆置换
        for i in 0..n1 {
            let nm = sa[n - n1 + i] as usize;
            sa[nm] = i as u32;
        }
    }

    //-------------------------------------------------------------------------
    // 阶段 3：以正确的 LMS 顺序重新播种，再做一轮归纳得到最终结果
    //-------------------------------------------------------------------------

    // 名次映射回文本位置：尾部先改写为文本序的 LMS 列表
    for slot in sa[n1..].iter_mut() {
        *slot = 0;
    }
    let mut j = n;
    for &p in lms.iter() {
        j -= 1;
        sa[j] = p;
    }
    for i in 0..n1 {
        sa[i] = sa[n - n1 + sa[i] as usize];
    }

    // LMS 必为 S 型，自尾向前插入 S 区尾部；写入槽位不小于当前读取下标
    for i in (0..n1).rev() {
        let p = sa[i];
        let c = input[p as usize].index();
        buckets.s_cursor[c] -= 1;
        sa[buckets.s_cursor[c] as usize] = p;
    }

    induce_l(input, &types, sa, &mut buckets);
    induce_s(input, &types, sa, &mut buckets);
}

/// 比较以 a、b 开头的两个 LMS 子串（含类型信息），不同返回 true。
fn lms_substring_differs<S: Symbol>(
    input: &[S],
    types: &[SuffixType],
    a: usize,
    b: usize,
) -> bool {
    let n = input.len();
    for j in 0..n {
        let (x, y) = (a + j, b + j);
        if x >= n || y >= n {
            return true;
        }
        if input[x].index() != input[y].index() || types[x] != types[y] {
            return true;
        }
        // 字符与类型至此全同，则两侧同时抵达（或同时未达）下一个 LMS 边界
        if j > 0 && (is_lms(types, x) || is_lms(types, y)) {
            return false;
        }
    }
    false
}

/// 从左向右扫描：每个已定序的后缀把自己的 L 型前驱放进其首符号桶的 L 写游标。
/// 已定序后缀完全决定同首符号 L 型前驱的相对顺序，故放置即最终位置。
fn induce_l<S: Symbol>(input: &[S], types: &[SuffixType], sa: &mut [u32], buckets: &mut Buckets) {
    let n = input.len();

    // 最末后缀必为 L 型，先行入桶
    let last = n - 1;
    let c = input[last].index();
    sa[buckets.l_cursor[c] as usize] = last as u32;
    buckets.l_cursor[c] += 1;

    for c in 0..buckets.start.len() {
        // L 区：读头追赶移动中的写游标
        let mut head = buckets.start[c] as usize;
        while head < buckets.l_cursor[c] as usize {
            place_l_predecessor(input, types, sa, buckets, head);
            head += 1;
        }
        // S 区尾部此前播种的条目；其 L 型前驱的首符号严格大于 c
        let mut head = buckets.s_cursor[c] as usize;
        let tail = buckets.end[c] as usize;
        while head < tail {
            place_l_predecessor(input, types, sa, buckets, head);
            head += 1;
        }
        // 本桶不再有新放置，游标就地复位供下一轮使用
        buckets.l_cursor[c] = buckets.start[c];
        buckets.s_cursor[c] = buckets.end[c];
    }
}

#[inline]
fn place_l_predecessor<S: Symbol>(
    input: &[S],
    types: &[SuffixType],
    sa: &mut [u32],
    buckets: &mut Buckets,
    slot: usize,
) {
    let v = sa[slot];
    if v == 0 {
        return;
    }
    let prev = (v - 1) as usize;
    if types[prev] == SuffixType::L {
        let c = input[prev].index();
        sa[buckets.l_cursor[c] as usize] = prev as u32;
        buckets.l_cursor[c] += 1;
    }
}

/// 从右向左扫描，对称地把 S 型前驱插入收缩中的 S 区写游标。
fn induce_s<S: Symbol>(input: &[S], types: &[SuffixType], sa: &mut [u32], buckets: &mut Buckets) {
    for slot in (0..sa.len()).rev() {
        let v = sa[slot];
        if v == 0 {
            continue;
        }
        let prev = (v - 1) as usize;
        if types[prev] == SuffixType::S {
            let c = input[prev].index();
            buckets.s_cursor[c] -= 1;
            sa[buckets.s_cursor[c] as usize] = prev as u32;
        }
    }
}
