use crate::types::{Plan, StockUsage, Summary};

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Totals, per-stock-length usage and efficiency over a finished plan list.
pub fn summarize(plans: &[Plan], kerf: u32) -> Summary {
    let total_length: u64 = plans.iter().map(|p| p.stock_length as u64).sum();
    let total_waste: u64 = plans.iter().map(|p| p.waste as u64).sum();
    let total_kerf_loss: u64 = plans.iter().map(|p| p.kerf_loss as u64).sum();
    let total_used = total_length - total_waste;

    let efficiency = if total_length == 0 {
        0.0
    } else {
        round2(total_used as f64 / total_length as f64 * 100.0)
    };

    let mut stock_usage: Vec<StockUsage> = Vec::new();
    for p in plans {
        match stock_usage
            .iter_mut()
            .find(|u| u.stock_length == p.stock_length)
        {
            Some(usage) => {
                usage.count += 1;
                usage.waste += p.waste as u64;
            }
            None => stock_usage.push(StockUsage {
                stock_length: p.stock_length,
                count: 1,
                waste: p.waste as u64,
            }),
        }
    }
    stock_usage.sort_by(|a, b| b.stock_length.cmp(&a.stock_length));

    Summary {
        kerf,
        total_stock_used: plans.len(),
        total_length,
        total_used,
        total_waste,
        total_kerf_loss,
        efficiency,
        stock_usage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::plan;

    #[test]
    fn test_summary_totals() {
        let plans = vec![
            Plan::new(6000, vec![5500], 0),
            Plan::new(6000, vec![3000, 3000], 0),
            Plan::new(12000, vec![6000, 4800], 0),
        ];
        let summary = summarize(&plans, 0);
        assert_eq!(summary.total_stock_used, 3);
        assert_eq!(summary.total_length, 24000);
        assert_eq!(summary.total_waste, 1700);
        assert_eq!(summary.total_used, 22300);
        assert_eq!(summary.total_kerf_loss, 0);
        assert!((summary.efficiency - 92.92).abs() < 1e-9);
    }

    #[test]
    fn test_stock_usage_sorted_numerically_descending() {
        let plans = vec![
            Plan::new(9000, vec![8000], 0),
            Plan::new(12100, vec![12000], 0),
            Plan::new(9000, vec![4000, 4000], 0),
            Plan::new(6000, vec![6000], 0),
        ];
        let summary = summarize(&plans, 0);
        assert_eq!(
            summary.stock_usage,
            vec![
                StockUsage { stock_length: 12100, count: 1, waste: 100 },
                StockUsage { stock_length: 9000, count: 2, waste: 2000 },
                StockUsage { stock_length: 6000, count: 1, waste: 0 },
            ]
        );
    }

    #[test]
    fn test_empty_plan_list() {
        let summary = summarize(&[], 3);
        assert_eq!(summary.total_stock_used, 0);
        assert_eq!(summary.total_length, 0);
        assert_eq!(summary.efficiency, 0.0);
        assert!(summary.stock_usage.is_empty());
        assert_eq!(summary.kerf, 3);
    }

    #[test]
    fn test_kerf_counts_as_used() {
        let plans = plan(&[1000, 1000], &[2500], 10).unwrap();
        let summary = summarize(&plans, 10);
        assert_eq!(summary.total_kerf_loss, 10);
        assert_eq!(summary.total_waste, 490);
        assert_eq!(summary.total_used, 2010);
        assert!((summary.efficiency - 80.4).abs() < 1e-9);
    }
}
