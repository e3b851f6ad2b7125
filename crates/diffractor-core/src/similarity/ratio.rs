//! Character-level similarity ratio compatible with Python's
//! `difflib.SequenceMatcher(None, a, b).ratio()`.
//!
//! Junk detection is off except for the automatic "popular character"
//! heuristic: when `b` has at least 200 characters, any character occurring
//! more than `len / 100 + 1` times is not used to seed matches. Matches are
//! still extended across such characters.

use std::collections::HashMap;

/// Length threshold above which the popularity heuristic applies
const AUTOJUNK_MIN_LEN: usize = 200;

/// A matching block `a[a_start..a_start + size] == b[b_start..b_start + size]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MatchBlock {
    pub a_start: usize,
    pub b_start: usize,
    pub size: usize,
}

/// The `b` side of a comparison, prepared once and matched against many `a`.
#[derive(Debug, Clone)]
pub struct MatchTarget {
    chars: Vec<char>,
    b2j: HashMap<char, Vec<usize>>,
    counts: HashMap<char, usize>,
}

impl MatchTarget {
    pub fn new(b: &str) -> Self {
        let chars: Vec<char> = b.chars().collect();
        let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, &c) in chars.iter().enumerate() {
            b2j.entry(c).or_default().push(j);
        }
        let counts = b2j.iter().map(|(&c, js)| (c, js.len())).collect();

        let n = chars.len();
        if n >= AUTOJUNK_MIN_LEN {
            let limit = n / 100 + 1;
            b2j.retain(|_, js| js.len() <= limit);
        }

        Self { chars, b2j, counts }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Upper bound on [`MatchTarget::ratio`] from lengths alone.
    pub fn real_quick_ratio(&self, a: &[char]) -> f64 {
        let la = a.len();
        let lb = self.chars.len();
        ratio_of(la.min(lb), la + lb)
    }

    /// Upper bound on [`MatchTarget::ratio`] from character multisets.
    pub fn quick_ratio(&self, a: &[char]) -> f64 {
        let mut avail: HashMap<char, usize> = HashMap::new();
        let mut matches = 0;
        for &c in a {
            let left = avail
                .entry(c)
                .or_insert_with(|| self.counts.get(&c).copied().unwrap_or(0));
            if *left > 0 {
                *left -= 1;
                matches += 1;
            }
        }
        ratio_of(matches, a.len() + self.chars.len())
    }

    /// `2 * M / T` where `M` is the total size of the matching blocks.
    pub fn ratio(&self, a: &[char]) -> f64 {
        let matched: usize = self.matching_blocks(a).iter().map(|m| m.size).sum();
        ratio_of(matched, a.len() + self.chars.len())
    }

    /// Non-overlapping matching blocks in increasing order, adjacent blocks
    /// merged.
    pub fn matching_blocks(&self, a: &[char]) -> Vec<MatchBlock> {
        let mut queue = vec![(0, a.len(), 0, self.chars.len())];
        let mut blocks = Vec::new();
        let mut scratch = Scratch::new(self.chars.len());

        while let Some((alo, ahi, blo, bhi)) = queue.pop() {
            let m = self.find_longest_match(a, alo, ahi, blo, bhi, &mut scratch);
            if m.size == 0 {
                continue;
            }
            if alo < m.a_start && blo < m.b_start {
                queue.push((alo, m.a_start, blo, m.b_start));
            }
            if m.a_start + m.size < ahi && m.b_start + m.size < bhi {
                queue.push((m.a_start + m.size, ahi, m.b_start + m.size, bhi));
            }
            blocks.push(m);
        }
        blocks.sort();

        let mut merged: Vec<MatchBlock> = Vec::with_capacity(blocks.len());
        for block in blocks {
            match merged.last_mut() {
                Some(last)
                    if last.a_start + last.size == block.a_start
                        && last.b_start + last.size == block.b_start =>
                {
                    last.size += block.size;
                }
                _ => merged.push(block),
            }
        }
        merged
    }

    /// Longest matching block in `a[alo..ahi]` x `b[blo..bhi]`, earliest in
    /// `a` then earliest in `b` on ties.
    fn find_longest_match(
        &self,
        a: &[char],
        alo: usize,
        ahi: usize,
        blo: usize,
        bhi: usize,
        scratch: &mut Scratch,
    ) -> MatchBlock {
        let b = &self.chars;
        let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);

        // j2len[j + 1] = length of the match ending at a[i - 1], b[j]
        for (i, c) in a.iter().enumerate().take(ahi).skip(alo) {
            if let Some(js) = self.b2j.get(c) {
                for &j in js {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let k = scratch.prev[j] + 1;
                    scratch.set_next(j + 1, k);
                    if k > best_size {
                        best_i = i + 1 - k;
                        best_j = j + 1 - k;
                        best_size = k;
                    }
                }
            }
            scratch.advance();
        }
        scratch.reset();

        while best_i > alo && best_j > blo && a[best_i - 1] == b[best_j - 1] {
            best_i -= 1;
            best_j -= 1;
            best_size += 1;
        }
        while best_i + best_size < ahi
            && best_j + best_size < bhi
            && a[best_i + best_size] == b[best_j + best_size]
        {
            best_size += 1;
        }

        MatchBlock {
            a_start: best_i,
            b_start: best_j,
            size: best_size,
        }
    }
}

/// Two dense rows of run lengths, cleared by remembering touched slots.
struct Scratch {
    prev: Vec<usize>,
    next: Vec<usize>,
    prev_touched: Vec<usize>,
    next_touched: Vec<usize>,
}

impl Scratch {
    fn new(lb: usize) -> Self {
        Self {
            prev: vec![0; lb + 1],
            next: vec![0; lb + 1],
            prev_touched: Vec::new(),
            next_touched: Vec::new(),
        }
    }

    fn set_next(&mut self, slot: usize, value: usize) {
        self.next[slot] = value;
        self.next_touched.push(slot);
    }

    /// Make the row just built the previous row.
    fn advance(&mut self) {
        for &slot in &self.prev_touched {
            self.prev[slot] = 0;
        }
        self.prev_touched.clear();
        std::mem::swap(&mut self.prev, &mut self.next);
        std::mem::swap(&mut self.prev_touched, &mut self.next_touched);
    }

    /// Clear both rows; `next` is already clean after an `advance`.
    fn reset(&mut self) {
        self.advance();
    }
}

fn ratio_of(matches: usize, total: usize) -> f64 {
    if total == 0 {
        1.0
    } else {
        2.0 * matches as f64 / total as f64
    }
}

/// Similarity of `a` to `b` in `[0, 1]`; `1.0` when both are empty.
///
/// ```
/// use diffractor_core::similarity::sequence_ratio;
///
/// assert_eq!(sequence_ratio("abcd", "bcde"), 0.75);
/// assert_eq!(sequence_ratio("", ""), 1.0);
/// ```
pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    MatchTarget::new(b).ratio(&a)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_known_ratios() {
        // Values produced by difflib.SequenceMatcher(None, a, b).ratio()
        assert_eq!(sequence_ratio("abcd", "bcde"), 0.75);
        assert_eq!(sequence_ratio("abc", "abc"), 1.0);
        assert_eq!(sequence_ratio("abc", "xyz"), 0.0);
        assert_eq!(sequence_ratio("", "abc"), 0.0);
        let r = sequence_ratio(
            "private Thread currentThread;",
            "private volatile Thread currentThread;",
        );
        assert!((r - 58.0 / 67.0).abs() < 1e-12);
    }

    #[test]
    fn test_matching_blocks_are_merged_and_ordered() {
        let target = MatchTarget::new("abxcd");
        let blocks = target.matching_blocks(&chars("abcd"));
        assert_eq!(
            blocks,
            vec![
                MatchBlock { a_start: 0, b_start: 0, size: 2 },
                MatchBlock { a_start: 2, b_start: 3, size: 2 },
            ]
        );
    }

    #[test]
    fn test_popular_characters_do_not_seed_matches() {
        // 'x' is popular in a 200-char b, so the lone "x" in a cannot seed a
        // match. One char shorter and the heuristic does not apply.
        let popular = format!("y{}", "x".repeat(199));
        assert_eq!(sequence_ratio("x", &popular), 0.0);
        let short = format!("y{}", "x".repeat(198));
        assert_eq!(sequence_ratio("x", &short), 2.0 / 200.0);
    }

    #[test]
    fn test_quick_ratios_bound_ratio() {
        let a = chars("the quick brown fox jumps");
        let target = MatchTarget::new("a quick brown dog jumped");
        let exact = target.ratio(&a);
        assert!(target.quick_ratio(&a) >= exact);
        assert!(target.real_quick_ratio(&a) >= target.quick_ratio(&a));
    }

    #[test]
    fn test_similar_hunk_texts_score_between_bounds() {
        let ab = sequence_ratio("-<div>\n+<span>", "-<div class>\n+<span class>");
        assert!(ab > 0.0 && ab < 1.0);
    }
}
