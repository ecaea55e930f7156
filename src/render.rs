use std::fmt::Write;

use crate::types::{Plan, Summary};

const MAX_WIDTH: f64 = 80.0;

/// ASCII strip of one bar scaled to at most `MAX_WIDTH` columns, e.g.
/// `|--1000--|--1000--|####|`. Waste is drawn as `#`.
pub fn render_bar(plan: &Plan) -> String {
    // `plan` never yields one, but `Plan::new` and deserialization can.
    if plan.stock_length == 0 {
        return String::new();
    }
    let scale = MAX_WIDTH / plan.stock_length as f64;

    let mut line = String::from("|");
    for &cut in &plan.cuts {
        let width = ((cut as f64 * scale).round() as usize).max(1);
        let label = cut.to_string();
        if width >= label.len() + 2 {
            let pad = width - label.len();
            let left = pad / 2;
            line.push_str(&"-".repeat(left));
            line.push_str(&label);
            line.push_str(&"-".repeat(pad - left));
        } else {
            line.push_str(&"-".repeat(width));
        }
        line.push('|');
    }

    let waste_width = (plan.waste as f64 * scale).round() as usize;
    if waste_width > 0 {
        line.push_str(&"#".repeat(waste_width));
        line.push('|');
    }
    line
}

/// Plain-text cutting list: one line per bar, then usage and totals.
pub fn render_report(plans: &[Plan], summary: &Summary, layout: bool) -> String {
    let mut out = String::new();

    for (i, plan) in plans.iter().enumerate() {
        let cuts: Vec<String> = plan.cuts.iter().map(|c| c.to_string()).collect();
        let _ = writeln!(
            out,
            "Bar {} (stock {}): {} | waste {}",
            i + 1,
            plan.stock_length,
            cuts.join(" + "),
            plan.waste
        );
        if layout {
            let _ = writeln!(out, "  {}", render_bar(plan));
        }
    }
    if !plans.is_empty() {
        out.push('\n');
    }

    for usage in &summary.stock_usage {
        let _ = writeln!(
            out,
            "{} x {} (waste {})",
            usage.count, usage.stock_length, usage.waste
        );
    }

    let _ = writeln!(
        out,
        "Summary: {} bar{} used, total {}, waste {}, kerf loss {}, {:.2}% efficiency",
        summary.total_stock_used,
        if summary.total_stock_used == 1 { "" } else { "s" },
        summary.total_length,
        summary.total_waste,
        summary.total_kerf_loss,
        summary.efficiency,
    );
    out
}
