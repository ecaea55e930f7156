use serde::{Deserialize, Deserializer, Serialize};

use crate::error::PlanError;

/// Upper bound on the number of single cuts one request may expand to.
pub const MAX_CUTS: u64 = 100_000;

/// Kerf lost on a bar holding `cut_count` cuts. Kerf is only charged between
/// neighbouring cuts, never after the last one.
pub fn kerf_loss(cut_count: usize, kerf: u32) -> u32 {
    cut_count.saturating_sub(1) as u32 * kerf
}

/// One bar of stock and the cuts assigned to it, in assignment order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub stock_length: u32,
    pub cuts: Vec<u32>,
    pub used_length: u32,
    pub kerf_loss: u32,
    pub waste: u32,
}

impl Plan {
    /// Builds a finished plan, deriving used length, kerf loss and waste.
    ///
    /// Callers must only pass cuts that fit: `sum(cuts) + kerf_loss <= stock_length`.
    pub fn new(stock_length: u32, cuts: Vec<u32>, kerf: u32) -> Self {
        let used_length: u32 = cuts.iter().sum();
        let kerf_loss = kerf_loss(cuts.len(), kerf);
        let waste = stock_length - used_length - kerf_loss;
        Self {
            stock_length,
            cuts,
            used_length,
            kerf_loss,
            waste,
        }
    }

    pub fn cut_count(&self) -> usize {
        self.cuts.len()
    }
}

impl std::fmt::Display for Plan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cuts: Vec<String> = self.cuts.iter().map(|c| c.to_string()).collect();
        write!(
            f,
            "{} [{}] waste {}",
            self.stock_length,
            cuts.join(", "),
            self.waste
        )
    }
}

/// Bars consumed of one stock length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockUsage {
    pub stock_length: u32,
    pub count: usize,
    pub waste: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub kerf: u32,
    pub total_stock_used: usize,
    pub total_length: u64,
    pub total_used: u64,
    pub total_waste: u64,
    pub total_kerf_loss: u64,
    /// Percentage of purchased length that is not waste, two decimals.
    pub efficiency: f64,
    /// Sorted by stock length, longest first.
    pub stock_usage: Vec<StockUsage>,
}

/// A required length and how many pieces of it are needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CutRequest {
    #[serde(deserialize_with = "deserialize_u32_from_number")]
    pub length: u32,
    #[serde(default = "default_qty", deserialize_with = "deserialize_u32_from_number")]
    pub qty: u32,
}

fn default_qty() -> u32 {
    1
}

/// Expands length/quantity pairs into the multiset of single cuts. The total
/// is checked against `MAX_CUTS` before anything is allocated.
pub fn expand_requests(requests: &[CutRequest]) -> Result<Vec<u32>, PlanError> {
    let total: u64 = requests.iter().map(|r| r.qty as u64).sum();
    if total > MAX_CUTS {
        return Err(PlanError::InvalidInput(format!(
            "{} cuts requested, at most {} allowed",
            total, MAX_CUTS
        )));
    }
    Ok(requests
        .iter()
        .flat_map(|r| std::iter::repeat_n(r.length, r.qty as usize))
        .collect())
}

/// Accepts `1000` as well as `1000.0`; JSON clients often send floats.
pub fn deserialize_u32_from_number<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if value.fract() != 0.0 || value < 0.0 || value > u32::MAX as f64 {
        return Err(serde::de::Error::custom(format!(
            "expected a non-negative whole number, got {}",
            value
        )));
    }
    Ok(value as u32)
}

pub fn deserialize_u32_vec_from_numbers<'de, D>(deserializer: D) -> Result<Vec<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Wrapped(#[serde(deserialize_with = "deserialize_u32_from_number")] u32);

    let values = Vec::<Wrapped>::deserialize(deserializer)?;
    Ok(values.into_iter().map(|Wrapped(v)| v).collect())
}
