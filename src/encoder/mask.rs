//! Mask penalty scoring and selection

use crate::capability::layout::{apply_mask, draw_format_bits};
use crate::models::{BitMatrix, ECLevel, MaskPattern};
use rayon::prelude::*;

const N1: u32 = 3;
const N2: u32 = 3;
const N3: u32 = 40;
const N4: u32 = 10;

const FINDER_LIKE: [bool; 7] = [true, false, true, true, true, false, true];

/// Total penalty of a finished grid (lower is better)
pub fn penalty_score(modules: &BitMatrix) -> u32 {
    let size = modules.width();
    let rows = (0..size).map(|y| (0..size).map(|x| modules.get(x, y)).collect::<Vec<_>>());
    let cols = (0..size).map(|x| (0..size).map(|y| modules.get(x, y)).collect::<Vec<_>>());

    let mut penalty = 0;
    for line in rows.chain(cols) {
        penalty += run_penalty(&line) + finder_like_penalty(&line);
    }
    penalty + block_penalty(modules) + balance_penalty(modules)
}

/// Runs of five or more same-colour modules
fn run_penalty(line: &[bool]) -> u32 {
    let mut penalty = 0;
    for run in line.chunk_by(|a, b| a == b) {
        if run.len() >= 5 {
            penalty += N1 + (run.len() as u32 - 5);
        }
    }
    penalty
}

/// 2x2 blocks of one colour
fn block_penalty(modules: &BitMatrix) -> u32 {
    let size = modules.width();
    let mut penalty = 0;
    for y in 0..size.saturating_sub(1) {
        for x in 0..size.saturating_sub(1) {
            let c = modules.get(x, y);
            if c == modules.get(x + 1, y)
                && c == modules.get(x, y + 1)
                && c == modules.get(x + 1, y + 1)
            {
                penalty += N2;
            }
        }
    }
    penalty
}

/// 1:1:3:1:1 dark-light pattern with four light modules on either side.
/// Modules beyond the edge count as light.
fn finder_like_penalty(line: &[bool]) -> u32 {
    let light = |from: isize, to: isize| {
        (from..to).all(|i| usize::try_from(i).ok().and_then(|i| line.get(i)) != Some(&true))
    };
    let mut penalty = 0;
    for start in 0..line.len().saturating_sub(6) {
        if line[start..start + 7] != FINDER_LIKE {
            continue;
        }
        let s = start as isize;
        if light(s - 4, s) || light(s + 7, s + 11) {
            penalty += N3;
        }
    }
    penalty
}

/// Deviation of the dark share from 50%, in 5% steps
fn balance_penalty(modules: &BitMatrix) -> u32 {
    let total = modules.width() * modules.height();
    if total == 0 {
        return 0;
    }
    let dark = modules.count_set();
    ((dark * 20).abs_diff(total * 10) / total) as u32 * N4
}

struct Candidate {
    penalty: u32,
    mask: MaskPattern,
    modules: BitMatrix,
}

impl Candidate {
    fn build(
        unmasked: &BitMatrix,
        function: &BitMatrix,
        ec_level: ECLevel,
        mask: MaskPattern,
    ) -> Self {
        let mut modules = unmasked.clone();
        apply_mask(&mut modules, function, mask);
        draw_format_bits(&mut modules, ec_level, mask);
        Self {
            penalty: penalty_score(&modules),
            mask,
            modules,
        }
    }

    fn better(self, other: Self) -> Self {
        if (other.penalty, other.mask) < (self.penalty, self.mask) {
            other
        } else {
            self
        }
    }
}

/// Apply `mask` and draw its format information
pub fn apply_with_format(
    unmasked: &BitMatrix,
    function: &BitMatrix,
    ec_level: ECLevel,
    mask: MaskPattern,
) -> (MaskPattern, BitMatrix) {
    let c = Candidate::build(unmasked, function, ec_level, mask);
    (c.mask, c.modules)
}

/// Score all eight masks in parallel and keep the lowest penalty; ties go to
/// the smaller mask id. The format bits of each candidate are drawn before
/// scoring.
pub fn choose_mask(
    unmasked: &BitMatrix,
    function: &BitMatrix,
    ec_level: ECLevel,
) -> (MaskPattern, BitMatrix) {
    let (first, rest) = MaskPattern::ALL.split_at(1);
    let seed = Candidate::build(unmasked, function, ec_level, first[0]);
    let best = match rest
        .par_iter()
        .map(|&mask| Candidate::build(unmasked, function, ec_level, mask))
        .reduce_with(Candidate::better)
    {
        Some(other) => seed.better(other),
        None => seed,
    };
    tracing::trace!(mask = best.mask.bits(), penalty = best.penalty, "mask selected");
    (best.mask, best.modules)
}
