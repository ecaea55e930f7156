use std::collections::HashMap;

use crate::error::PlanError;
use crate::types::{Plan, kerf_loss};

/// Weight given to each absorbed cut when scoring a stock length for a new
/// bar. Waste per cut only breaks ties, so it must stay below this value.
pub const LOOKAHEAD_WEIGHT: f64 = 10_000.0;

#[derive(Debug, Clone)]
struct OpenBar {
    stock_length: u32,
    cuts: Vec<u32>,
    cut_total: u32,
}

impl OpenBar {
    fn new(stock_length: u32, first_cut: u32) -> Self {
        Self {
            stock_length,
            cuts: vec![first_cut],
            cut_total: first_cut,
        }
    }

    fn remaining(&self, kerf: u32) -> u32 {
        self.stock_length - self.cut_total - kerf_loss(self.cuts.len(), kerf)
    }

    /// Leftover after seating `cut` plus the kerf in front of it, if it fits.
    fn leftover_after(&self, cut: u32, kerf: u32) -> Option<u32> {
        self.remaining(kerf).checked_sub(cut)?.checked_sub(kerf)
    }

    fn place(&mut self, cut: u32) {
        self.cuts.push(cut);
        self.cut_total += cut;
    }

    fn finish(self, kerf: u32) -> Plan {
        Plan::new(self.stock_length, self.cuts, kerf)
    }
}

/// Look-ahead score of opening a fresh bar of `stock_length` for a cut of
/// `cut`, given how many cuts of that length are still unassigned.
fn lookahead_score(stock_length: u32, cut: u32, kerf: u32, backlog: usize) -> f64 {
    let step = cut as u64 + kerf as u64;
    let fits = (stock_length as u64 / step) as usize;
    let will_use = fits.min(backlog);

    let waste_per_cut = if will_use == 0 {
        stock_length as f64
    } else {
        let total_used = will_use as i64 * step as i64 - kerf as i64;
        (stock_length as i64 - total_used) as f64 / will_use as f64
    };

    if waste_per_cut >= LOOKAHEAD_WEIGHT {
        tracing::warn!(
            stock_length,
            cut,
            waste_per_cut,
            "waste per cut exceeds look-ahead weight, stock ranking may be unreliable"
        );
    }

    will_use as f64 * LOOKAHEAD_WEIGHT - waste_per_cut
}

/// Picks the stock length for a new bar holding `cut`. Ties keep the
/// earliest entry of `stock_lengths`.
fn choose_stock(
    stock_lengths: &[u32],
    cut: u32,
    kerf: u32,
    backlog: usize,
) -> Result<u32, PlanError> {
    let mut best: Option<(u32, f64)> = None;

    for &stock_length in stock_lengths.iter().filter(|&&s| s >= cut) {
        let score = lookahead_score(stock_length, cut, kerf, backlog);
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((stock_length, score));
        }
    }

    match best {
        Some((stock_length, score)) => {
            tracing::debug!(stock_length, cut, score, "opening new bar");
            Ok(stock_length)
        }
        None => Err(PlanError::InsufficientStock { length: cut }),
    }
}

fn validate(required_cuts: &[u32], stock_lengths: &[u32]) -> Result<(), PlanError> {
    if stock_lengths.is_empty() {
        return Err(PlanError::InvalidInput(
            "at least one stock length is required".to_string(),
        ));
    }
    if stock_lengths.contains(&0) {
        return Err(PlanError::InvalidInput(
            "stock lengths must be non-zero".to_string(),
        ));
    }
    if required_cuts.contains(&0) {
        return Err(PlanError::InvalidInput(
            "cut lengths must be non-zero".to_string(),
        ));
    }
    Ok(())
}

/// Assigns every required cut to a bar of one of the given stock lengths.
///
/// Cuts are taken longest first. Each cut goes to the open bar it leaves the
/// least leftover on (earliest bar on ties); when none has room a new bar is
/// opened, choosing the stock length that can absorb the most of the
/// remaining cuts of the same length, then the least waste per cut.
/// Bars never change once a cut is placed, and the order of
/// `stock_lengths` decides ties.
///
/// Plans are returned in the order their bars were opened. Fails without a
/// partial result when a cut is longer than every stock length.
pub fn plan(
    required_cuts: &[u32],
    stock_lengths: &[u32],
    kerf: u32,
) -> Result<Vec<Plan>, PlanError> {
    validate(required_cuts, stock_lengths)?;

    let mut cuts = required_cuts.to_vec();
    cuts.sort_by(|a, b| b.cmp(a));

    let mut backlog: HashMap<u32, usize> = HashMap::new();
    for &cut in &cuts {
        *backlog.entry(cut).or_default() += 1;
    }

    let mut bars: Vec<OpenBar> = Vec::new();

    for cut in cuts {
        let mut best_bar: Option<usize> = None;
        let mut best_leftover: Option<u32> = None;

        for (bi, bar) in bars.iter().enumerate() {
            if let Some(leftover) = bar.leftover_after(cut, kerf)
                && best_leftover.is_none_or(|best| leftover < best)
            {
                best_bar = Some(bi);
                best_leftover = Some(leftover);
            }
        }

        let remaining = backlog.entry(cut).or_default();
        match best_bar {
            Some(bi) => bars[bi].place(cut),
            None => {
                let stock_length = choose_stock(stock_lengths, cut, kerf, *remaining)?;
                bars.push(OpenBar::new(stock_length, cut));
            }
        }
        *remaining -= 1;
    }

    Ok(bars.into_iter().map(|bar| bar.finish(kerf)).collect())
}
