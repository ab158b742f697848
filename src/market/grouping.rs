use crate::model::{Group, WeightedItem};

use super::snapshot::Quote;

/// Which quote field drives cell area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeightMetric {
    #[default]
    MarketCap,
    Volume,
}

impl WeightMetric {
    pub fn weight_of(self, quote: &Quote) -> f64 {
        match self {
            WeightMetric::MarketCap => quote.market_cap,
            WeightMetric::Volume => quote.volume,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            WeightMetric::MarketCap => "market cap",
            WeightMetric::Volume => "volume",
        }
    }

    /// Parse a command-line style name ("cap", "market_cap", "volume", "vol").
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "cap" | "marketcap" | "market_cap" | "market-cap" => Some(WeightMetric::MarketCap),
            "vol" | "volume" => Some(WeightMetric::Volume),
            _ => None,
        }
    }
}

/// One weighted item per quote, in quote order. Weights are passed through
/// as-is; the layout config decides what happens to non-positive ones.
pub fn items_from_quotes(quotes: &[Quote], metric: WeightMetric) -> Vec<WeightedItem> {
    quotes
        .iter()
        .map(|q| WeightedItem::new(q.symbol.clone(), metric.weight_of(q)))
        .collect()
}

/// Sort items by weight, largest first. Stable, so equal weights keep their order.
pub fn sort_by_weight_desc(items: &mut [WeightedItem]) {
    items.sort_by(|a, b| b.weight.total_cmp(&a.weight));
}

/// Drop items that would be rejected for a non-positive weight.
pub fn retain_positive(items: &mut Vec<WeightedItem>) -> usize {
    let before = items.len();
    items.retain(|i| i.weight.is_finite() && i.weight > 0.0);
    let dropped = before - items.len();
    if dropped > 0 {
        tracing::debug!("Dropped {} items with non-positive weight", dropped);
    }
    dropped
}

/// Group quotes by sector. Sectors appear in order of first occurrence and
/// members keep quote order.
pub fn group_by_sector(quotes: &[Quote], metric: WeightMetric) -> Vec<Group> {
    let mut groups: Vec<Group> = Vec::new();
    for quote in quotes {
        let item = WeightedItem::new(quote.symbol.clone(), metric.weight_of(quote));
        match groups.iter_mut().find(|g| g.name == quote.sector) {
            Some(group) => group.members.push(item),
            None => groups.push(Group::new(quote.sector.clone(), vec![item])),
        }
    }
    tracing::debug!(
        "Grouped {} quotes into {} sectors by {}",
        quotes.len(),
        groups.len(),
        metric.name()
    );
    groups
}

/// Sort groups by total weight and members within each group, largest first.
pub fn sort_groups_by_weight_desc(groups: &mut [Group]) {
    for group in groups.iter_mut() {
        sort_by_weight_desc(&mut group.members);
    }
    groups.sort_by(|a, b| b.total_weight().total_cmp(&a.total_weight()));
}
