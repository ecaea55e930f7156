use bar_cutter::{PlanError, plan, summarize};
use proptest::prelude::*;

fn stock_and_cuts() -> impl Strategy<Value = (Vec<u32>, Vec<u32>, u32)> {
    (
        prop::collection::vec(500u32..15_000, 1..4),
        prop::collection::vec(50u32..6_000, 0..40),
        0u32..12,
    )
}

proptest! {
    #[test]
    fn plans_balance_and_keep_every_cut((stock, cuts, kerf) in stock_and_cuts()) {
        match plan(&cuts, &stock, kerf) {
            Ok(plans) => {
                for p in &plans {
                    prop_assert!(stock.contains(&p.stock_length));
                    prop_assert!(!p.cuts.is_empty());
                    let kerf_loss = (p.cuts.len() as u32 - 1) * kerf;
                    prop_assert_eq!(p.kerf_loss, kerf_loss);
                    prop_assert_eq!(p.used_length, p.cuts.iter().sum::<u32>());
                    prop_assert_eq!(p.stock_length, p.used_length + p.kerf_loss + p.waste);
                }

                let mut placed: Vec<u32> = plans.iter().flat_map(|p| p.cuts.clone()).collect();
                let mut expected = cuts.clone();
                placed.sort_unstable();
                expected.sort_unstable();
                prop_assert_eq!(placed, expected);

                let summary = summarize(&plans, kerf);
                prop_assert_eq!(summary.total_stock_used, plans.len());
                prop_assert_eq!(summary.total_used + summary.total_waste, summary.total_length);
                prop_assert!(summary.efficiency >= 0.0 && summary.efficiency <= 100.0);
            }
            Err(PlanError::InsufficientStock { length }) => {
                prop_assert!(cuts.contains(&length));
                prop_assert!(stock.iter().all(|&s| s < length));
            }
            Err(e) => prop_assert!(false, "unexpected error: {}", e),
        }
    }

    #[test]
    fn planning_is_deterministic((stock, cuts, kerf) in stock_and_cuts()) {
        prop_assert_eq!(plan(&cuts, &stock, kerf), plan(&cuts, &stock, kerf));
    }

    #[test]
    fn uniform_cuts_need_no_fewer_bars_with_more_kerf(
        stock_length in 1_000u32..12_000,
        cut in 100u32..1_000,
        count in 1usize..60,
        kerf in 0u32..20,
        extra in 1u32..20,
    ) {
        let cuts = vec![cut; count];
        let narrow = plan(&cuts, &[stock_length], kerf).unwrap();
        let wide = plan(&cuts, &[stock_length], kerf + extra).unwrap();
        prop_assert!(wide.len() >= narrow.len());
    }

    #[test]
    fn kerf_loss_is_one_kerf_per_inner_boundary((stock, cuts, kerf) in stock_and_cuts()) {
        if let Ok(plans) = plan(&cuts, &stock, kerf) {
            let summary = summarize(&plans, kerf);
            let boundaries = (cuts.len() - plans.len()) as u64;
            prop_assert_eq!(summary.total_kerf_loss, boundaries * kerf as u64);
        }
    }
}
