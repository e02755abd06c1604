// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Approximate matching of setting names.
//!
//! Similarity is the Ratcliff/Obershelp ratio `2 * M / T`, where `M` counts
//! the characters in the recursively found longest common blocks and `T` is
//! the combined length of both strings.

const MIN_SCORE: f64 = 0.2;
const MIN_SPREAD: f64 = 0.1;
const CONFIDENT_SCORE: f64 = 0.3;

/// Similarity of `a` and `b` in `0.0..=1.0`.
pub(crate) fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    2.0 * matching_chars(&a, &b) as f64 / total as f64
}

fn matching_chars(a: &[char], b: &[char]) -> usize {
    let (i, j, size) = longest_match(a, b);
    if size == 0 {
        return 0;
    }

    size + matching_chars(&a[..i], &b[..j]) + matching_chars(&a[i + size..], &b[j + size..])
}

// Longest common block; ties go to the earliest start in `a`, then in `b`.
fn longest_match(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut best = (0, 0, 0);
    let mut previous = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        let mut current = vec![0usize; b.len() + 1];
        for (j, cb) in b.iter().enumerate() {
            if ca == cb {
                let run = previous[j] + 1;
                current[j + 1] = run;
                if run > best.2 {
                    best = (i + 1 - run, j + 1 - run, run);
                }
            }
        }
        previous = current;
    }

    best
}

/// Picks the key most similar to `input`.
///
/// Returns `None` when even the best score is poor, or when every key scores
/// about the same and none of them is convincing. Ties keep the first key in
/// iteration order.
pub(crate) fn best_match<'a>(input: &str, keys: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
    let scored: Vec<(&str, f64)> = keys.into_iter().map(|key| (key, similarity(input, key))).collect();

    let mut best: Option<(&str, f64)> = None;
    let mut worst = f64::MAX;
    for &(key, score) in &scored {
        if best.is_none_or(|(_, top)| score > top) {
            best = Some((key, score));
        }
        worst = worst.min(score);
    }

    let (key, top) = best?;
    if top < MIN_SCORE || (top - worst < MIN_SPREAD && top < CONFIDENT_SCORE) {
        return None;
    }

    Some(key)
}
