/// Diagnostic tool to verify snapshot → items → layout pipeline
///
/// Usage: debug-layout [snapshot.json] [width] [height] [padding] [min_cell] [cap|volume]
use std::path::PathBuf;

use anyhow::Context;
use tickermap::layout::{layout_grouped_with, layout_or_equal, LayoutConfig, Rect};
use tickermap::market::format::{format_change, format_money};
use tickermap::market::{self, Snapshot, WeightMetric};

fn arg_f64(args: &[String], index: usize, default: f64) -> anyhow::Result<f64> {
    match args.get(index) {
        Some(s) => s
            .parse()
            .with_context(|| format!("argument {} is not a number: '{}'", index, s)),
        None => Ok(default),
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("tickermap=debug")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let snapshot_path = args
        .get(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data/sample_snapshot.json"));
    let width = arg_f64(&args, 2, 1920.0)?;
    let height = arg_f64(&args, 3, 1080.0)?;
    let padding = arg_f64(&args, 4, 1.0)?;
    let min_cell = arg_f64(&args, 5, 20.0)?;
    let metric = match args.get(6) {
        Some(s) => WeightMetric::parse(s).with_context(|| format!("unknown weight metric '{}'", s))?,
        None => WeightMetric::default(),
    };

    println!("=== DIAGNOSTIC: Snapshot → Layout Pipeline ===");
    println!("Snapshot: {}", snapshot_path.display());
    println!("Viewport: {:.0}x{:.0}, padding={}, min_cell={}", width, height, padding, min_cell);

    // Load
    let snapshot = Snapshot::load(&snapshot_path)
        .with_context(|| format!("loading {}", snapshot_path.display()))?;
    println!("\n[1] Loaded {} quotes", snapshot.quotes.len());

    // Items
    let mut items = market::items_from_quotes(&snapshot.quotes, metric);
    let dropped = market::retain_positive(&mut items);
    market::sort_by_weight_desc(&mut items);
    let total: f64 = items.iter().map(|i| i.weight).sum();
    println!(
        "\n[2] {} items weighted by {} ({} dropped), total {}",
        items.len(),
        metric.name(),
        dropped,
        format_money(total)
    );

    // Flat layout
    let bounds = Rect::new(0.0, 0.0, width, height);
    let config = LayoutConfig::default()
        .with_padding(padding)
        .with_min_cell(min_cell);
    let layout = layout_or_equal(&items, bounds, &config)?;
    println!("\n[3] Flat layout: {} cells", layout.len());

    println!("\n[4] Top 10 cells by area:");
    let mut by_area: Vec<_> = layout.iter().collect();
    by_area.sort_by(|a, b| b.rect.area().total_cmp(&a.rect.area()));
    for (i, placed) in by_area.iter().take(10).enumerate() {
        let quote = snapshot.quotes.iter().find(|q| q.symbol == placed.id);
        println!(
            "    [{}] {:<6} {:.1}x{:.1} ({:.0}px²) at ({:.1}, {:.1}) - {} {}",
            i,
            placed.id,
            placed.rect.width,
            placed.rect.height,
            placed.rect.area(),
            placed.rect.x,
            placed.rect.y,
            format_money(placed.weight),
            quote.map(|q| format_change(q.change_percent)).unwrap_or_default()
        );
    }

    // Anomalies
    println!("\n[5] Checking for anomalies:");
    let mut overlaps = 0;
    for (i, a) in layout.rects.iter().enumerate() {
        for b in &layout.rects[i + 1..] {
            if a.rect.overlap_area(&b.rect) > 1e-6 {
                overlaps += 1;
            }
        }
    }
    let clamped = layout
        .iter()
        .filter(|r| r.rect.width <= min_cell || r.rect.height <= min_cell)
        .count();
    println!("    Total cell area: {:.0}px²", layout.total_area());
    println!("    Viewport area:   {:.0}px²", bounds.area());
    println!("    Coverage:        {:.1}%", layout.coverage(bounds) * 100.0);
    println!("    Overlapping pairs: {}", overlaps);
    println!("    Cells at minimum size: {}", clamped);

    // Grouped layout
    let mut groups = market::group_by_sector(&snapshot.quotes, metric);
    for group in &mut groups {
        market::retain_positive(&mut group.members);
    }
    groups.retain(|g| !g.members.is_empty());
    market::sort_groups_by_weight_desc(&mut groups);

    let placements = layout_grouped_with(&groups, bounds, &config)?;
    println!("\n[6] Sector layout: {} groups", placements.len());
    for g in &placements {
        println!(
            "    {:<14} {:.1}x{:.1} at ({:.1}, {:.1}) - {} members, {}",
            g.name,
            g.rect.width,
            g.rect.height,
            g.rect.x,
            g.rect.y,
            g.members.len(),
            format_money(g.total_weight)
        );
        let intruders = g
            .members
            .iter()
            .filter(|m| m.rect.y < g.header.bottom())
            .count();
        if intruders > 0 {
            println!("      ✗ {} members overlap the header strip", intruders);
        }
    }

    Ok(())
}
