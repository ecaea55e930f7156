use std::path::PathBuf;

use bar_cutter::parse::{parse_cut, parse_cut_list, parse_stock_lengths};
use bar_cutter::types::{CutRequest, expand_requests};
use bar_cutter::{plan, presets, render, summarize};
use clap::Parser;
use serde::Serialize;

#[derive(Parser)]
#[command(
    name = "bar_cutter",
    about = "1D cutting stock planner for bars, tubes and profiles"
)]
struct Cli {
    /// Available stock lengths in mm (e.g. 6000 12100 or 6000,12100); order decides ties
    #[arg(long, num_args = 1..)]
    stock: Vec<String>,

    /// Named stock-length preset (see --list-presets)
    #[arg(long)]
    preset: Option<String>,

    /// Required cuts as LENGTH or LENGTHxQTY (e.g. 1200x4 800)
    #[arg(long = "cuts", num_args = 1..)]
    cuts: Vec<String>,

    /// File with a free-text cut list, entries separated by commas or newlines
    #[arg(long)]
    cuts_file: Option<PathBuf>,

    /// Blade kerf width in mm (default: 0)
    #[arg(long, default_value_t = 0)]
    kerf: u32,

    /// Show ASCII layout of each bar
    #[arg(long)]
    layout: bool,

    /// Print plans and summary as JSON
    #[arg(long)]
    json: bool,

    /// List the built-in stock presets and exit
    #[arg(long)]
    list_presets: bool,
}

#[derive(Serialize)]
struct Output<'a> {
    plans: &'a [bar_cutter::Plan],
    summary: &'a bar_cutter::Summary,
}

fn fail(msg: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", msg);
    std::process::exit(1);
}

fn stock_lengths(cli: &Cli) -> Result<Vec<u32>, String> {
    let mut lengths = Vec::new();
    if let Some(name) = &cli.preset {
        let preset = presets::find(name).ok_or_else(|| format!("unknown preset '{}'", name))?;
        lengths.extend_from_slice(preset.stock_lengths);
    }
    let listed = parse_stock_lengths(&cli.stock.join(" ")).map_err(|e| e.to_string())?;
    for length in listed {
        if !lengths.contains(&length) {
            lengths.push(length);
        }
    }
    if lengths.is_empty() {
        return Err("no stock lengths given, use --stock or --preset".to_string());
    }
    Ok(lengths)
}

fn cut_requests(cli: &Cli) -> Result<Vec<CutRequest>, String> {
    let mut requests = cli
        .cuts
        .iter()
        .map(|c| parse_cut(c))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| e.to_string())?;

    if let Some(path) = &cli.cuts_file {
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
        requests.extend(parse_cut_list(&text).map_err(|e| e.to_string())?);
    }
    Ok(requests)
}

fn main() {
    let cli = Cli::parse();

    if cli.list_presets {
        for preset in presets::PRESETS {
            let lengths: Vec<String> = preset.stock_lengths.iter().map(|l| l.to_string()).collect();
            println!("{}: {}", preset.name, lengths.join(", "));
        }
        return;
    }

    let stock = stock_lengths(&cli).unwrap_or_else(|e| fail(e));
    let requests = cut_requests(&cli).unwrap_or_else(|e| fail(e));
    let cuts = expand_requests(&requests).unwrap_or_else(|e| fail(e));

    let plans = plan(&cuts, &stock, cli.kerf).unwrap_or_else(|e| fail(e));
    let summary = summarize(&plans, cli.kerf);

    if cli.json {
        let output = Output {
            plans: &plans,
            summary: &summary,
        };
        match serde_json::to_string_pretty(&output) {
            Ok(json) => println!("{}", json),
            Err(e) => fail(e),
        }
    } else {
        print!("{}", render::render_report(&plans, &summary, cli.layout));
    }
}
