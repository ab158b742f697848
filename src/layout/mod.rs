pub mod error;
pub mod geometry;
mod grouped;
mod split;

use std::collections::HashMap;

use compact_str::CompactString;

pub use self::error::LayoutError;
pub use self::geometry::Rect;
use crate::model::{Group, GroupPlacement, PlacedItem, WeightedItem};

/// What to do with items whose weight is zero or negative.
///
/// Applied once, up front, to every item (and every group total) of a call.
/// NaN and infinite weights are rejected under either policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WeightPolicy {
    /// Fail the whole call with `LayoutError::InvalidWeight`.
    Reject,
    /// Substitute this strictly positive weight.
    Floor(f64),
}

/// Configuration for treemap layout.
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// Gutter removed from every side of each cell (px)
    pub padding: f64,
    /// Minimum width and height of a cell after padding (px). Clamping can
    /// push a cell past its share of the container under heavy weight skew.
    pub min_cell: f64,
    /// Strip reserved at the top of each group cell for its label (px)
    pub header_height: f64,
    pub weight_policy: WeightPolicy,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            padding: 0.0,
            min_cell: 20.0,
            header_height: 18.0,
            weight_policy: WeightPolicy::Reject,
        }
    }
}

impl LayoutConfig {
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_min_cell(mut self, min_cell: f64) -> Self {
        self.min_cell = min_cell;
        self
    }

    pub fn with_header_height(mut self, header_height: f64) -> Self {
        self.header_height = header_height;
        self
    }

    pub fn with_weight_policy(mut self, policy: WeightPolicy) -> Self {
        self.weight_policy = policy;
        self
    }

    fn validate(&self) -> Result<(), LayoutError> {
        check_param("padding", self.padding)?;
        check_param("min_cell", self.min_cell)?;
        check_param("header_height", self.header_height)?;
        if let WeightPolicy::Floor(eps) = self.weight_policy {
            if !(eps.is_finite() && eps > 0.0) {
                return Err(LayoutError::InvalidParameter {
                    name: "weight floor",
                    value: eps,
                });
            }
        }
        Ok(())
    }
}

/// The full layout result (cells + id lookup).
#[derive(Debug, Clone, Default)]
pub struct Layout {
    /// One cell per input item, in partition order
    pub rects: Vec<PlacedItem>,
    /// id → index into `rects`. On duplicate ids the first cell wins.
    pub id_to_rect: HashMap<CompactString, usize>,
}

impl Layout {
    fn from_rects(rects: Vec<PlacedItem>) -> Self {
        let mut id_to_rect = HashMap::with_capacity(rects.len());
        for (i, placed) in rects.iter().enumerate() {
            id_to_rect.entry(placed.id.clone()).or_insert(i);
        }
        Self { rects, id_to_rect }
    }

    pub fn get(&self, id: &str) -> Option<&PlacedItem> {
        self.id_to_rect.get(id).map(|&i| &self.rects[i])
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PlacedItem> {
        self.rects.iter()
    }

    /// Cell under a point, for hover and tooltips.
    pub fn hit_test(&self, px: f64, py: f64) -> Option<&PlacedItem> {
        self.rects.iter().find(|r| r.rect.contains(px, py))
    }

    /// Sum of cell areas (after padding and clamping).
    pub fn total_area(&self) -> f64 {
        self.rects.iter().map(|r| r.rect.area()).sum()
    }

    /// Fraction of `bounds` covered by cells. Can exceed 1.0 when small cells were clamped.
    pub fn coverage(&self, bounds: Rect) -> f64 {
        if bounds.is_empty() {
            0.0
        } else {
            self.total_area() / bounds.area()
        }
    }

    pub fn into_rects(self) -> Vec<PlacedItem> {
        self.rects
    }
}

impl<'a> IntoIterator for &'a Layout {
    type Item = &'a PlacedItem;
    type IntoIter = std::slice::Iter<'a, PlacedItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.rects.iter()
    }
}

/// Lay out `items` in the rectangle `(x, y, width, height)` with the default
/// configuration and the given padding.
pub fn layout(
    items: &[WeightedItem],
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    padding: f64,
) -> Result<Layout, LayoutError> {
    let config = LayoutConfig::default().with_padding(padding);
    layout_with(items, Rect::new(x, y, width, height), &config)
}

/// Lay out `items` inside `bounds`, one cell per item.
///
/// A zero-width or zero-height container yields an empty layout; negative
/// dimensions are an error. Cells are in partition order, which for this
/// engine is also input order; join by id when correlating with other data.
pub fn layout_with(
    items: &[WeightedItem],
    bounds: Rect,
    config: &LayoutConfig,
) -> Result<Layout, LayoutError> {
    config.validate()?;
    check_container(bounds)?;
    let weights = resolve_weights(
        items.iter().map(|i| (i.id.as_str(), i.weight)),
        config.weight_policy,
    )?;

    if bounds.is_empty() || items.is_empty() {
        return Ok(Layout::default());
    }

    let rects = place_leaves(items.iter().map(|i| &i.id), &weights, bounds, config);

    tracing::debug!(
        "Laid out {} items in {:.0}x{:.0} at ({:.0}, {:.0}), padding={}",
        rects.len(),
        bounds.width,
        bounds.height,
        bounds.x,
        bounds.y,
        config.padding
    );

    Ok(Layout::from_rects(rects))
}

/// Like [`layout_with`], but when a weight is invalid, lays the same ids out
/// with equal weights instead of failing. Other errors are still returned.
pub fn layout_or_equal(
    items: &[WeightedItem],
    bounds: Rect,
    config: &LayoutConfig,
) -> Result<Layout, LayoutError> {
    match layout_with(items, bounds, config) {
        Err(LayoutError::InvalidWeight { id, weight }) => {
            tracing::warn!(
                "Invalid weight {} for '{}', falling back to equal-weight layout",
                weight,
                id
            );
            let equal: Vec<WeightedItem> = items
                .iter()
                .map(|i| WeightedItem::new(i.id.clone(), 1.0))
                .collect();
            layout_with(&equal, bounds, config)
        }
        other => other,
    }
}

/// Two-level layout in the rectangle `(x, y, width, height)` with the default
/// configuration, the given header height and padding.
pub fn layout_grouped(
    groups: &[Group],
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    header_height: f64,
    padding: f64,
) -> Result<Vec<GroupPlacement>, LayoutError> {
    let config = LayoutConfig::default()
        .with_header_height(header_height)
        .with_padding(padding);
    layout_grouped_with(groups, Rect::new(x, y, width, height), &config)
}

/// Lay out groups by total weight, then each group's members below its header.
///
/// Every returned rectangle (group cell, header, members) is in the same
/// absolute coordinate space as `bounds`.
pub fn layout_grouped_with(
    groups: &[Group],
    bounds: Rect,
    config: &LayoutConfig,
) -> Result<Vec<GroupPlacement>, LayoutError> {
    config.validate()?;
    check_container(bounds)?;
    grouped::layout_groups(groups, bounds, config)
}

fn check_param(name: &'static str, value: f64) -> Result<(), LayoutError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(LayoutError::InvalidParameter { name, value })
    }
}

fn check_container(bounds: Rect) -> Result<(), LayoutError> {
    let finite = bounds.x.is_finite()
        && bounds.y.is_finite()
        && bounds.width.is_finite()
        && bounds.height.is_finite();
    if !finite || bounds.width < 0.0 || bounds.height < 0.0 {
        return Err(LayoutError::InvalidContainer {
            width: bounds.width,
            height: bounds.height,
        });
    }
    Ok(())
}

/// Apply the weight policy, producing strictly positive finite weights.
fn resolve_weights<'a>(
    entries: impl Iterator<Item = (&'a str, f64)>,
    policy: WeightPolicy,
) -> Result<Vec<f64>, LayoutError> {
    entries
        .map(|(id, weight)| {
            if !weight.is_finite() {
                return Err(LayoutError::InvalidWeight {
                    id: id.into(),
                    weight,
                });
            }
            match policy {
                _ if weight > 0.0 => Ok(weight),
                WeightPolicy::Floor(eps) => Ok(eps),
                WeightPolicy::Reject => Err(LayoutError::InvalidWeight {
                    id: id.into(),
                    weight,
                }),
            }
        })
        .collect()
}

/// Partition `bounds`, then pad and clamp every cell.
fn place_leaves<'a>(
    ids: impl Iterator<Item = &'a CompactString>,
    weights: &[f64],
    bounds: Rect,
    config: &LayoutConfig,
) -> Vec<PlacedItem> {
    let cells = split::partition(weights, bounds);
    let mut clamped = 0usize;

    let placed: Vec<PlacedItem> = ids
        .zip(weights)
        .zip(cells)
        .map(|((id, &weight), cell)| {
            let padded = cell.inset(config.padding);
            let rect = padded.at_least(config.min_cell);
            if rect != padded {
                clamped += 1;
            }
            PlacedItem {
                id: id.clone(),
                weight,
                rect,
            }
        })
        .collect();

    if clamped > 0 {
        tracing::warn!(
            "{} of {} cells grown to the {}px minimum; layout may exceed its container",
            clamped,
            placed.len(),
            config.min_cell
        );
    }

    placed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(weights: &[f64]) -> Vec<WeightedItem> {
        weights
            .iter()
            .enumerate()
            .map(|(i, &w)| WeightedItem::new(format!("T{}", i), w))
            .collect()
    }

    #[test]
    fn single_item_covers_container() {
        let out = layout(&[WeightedItem::new("x", 1.0)], 0.0, 0.0, 100.0, 50.0, 0.0).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out.rects[0].rect, Rect::new(0.0, 0.0, 100.0, 50.0));
        assert_eq!(out.rects[0].id, "x");
    }

    #[test]
    fn single_item_is_padded_then_floored() {
        let out = layout(&[WeightedItem::new("x", 1.0)], 10.0, 10.0, 100.0, 30.0, 2.0).unwrap();
        assert_eq!(out.rects[0].rect, Rect::new(12.0, 12.0, 96.0, 26.0));

        let out = layout(&[WeightedItem::new("x", 1.0)], 0.0, 0.0, 100.0, 10.0, 2.0).unwrap();
        assert_eq!(out.rects[0].rect, Rect::new(2.0, 2.0, 96.0, 20.0));
    }

    #[test]
    fn empty_input_and_zero_area_yield_nothing() {
        assert!(layout(&[], 0.0, 0.0, 100.0, 100.0, 0.0).unwrap().is_empty());
        let one = [WeightedItem::new("x", 1.0)];
        assert!(layout(&one, 0.0, 0.0, 0.0, 100.0, 0.0).unwrap().is_empty());
        assert!(layout(&one, 0.0, 0.0, 100.0, 0.0, 0.0).unwrap().is_empty());
    }

    #[test]
    fn negative_container_is_rejected() {
        let one = [WeightedItem::new("x", 1.0)];
        let err = layout(&one, 0.0, 0.0, -1.0, 100.0, 0.0).unwrap_err();
        assert_eq!(
            err,
            LayoutError::InvalidContainer {
                width: -1.0,
                height: 100.0
            }
        );
        assert!(matches!(
            layout(&one, f64::NAN, 0.0, 10.0, 10.0, 0.0),
            Err(LayoutError::InvalidContainer { .. })
        ));
    }

    #[test]
    fn bad_parameters_are_rejected() {
        let one = [WeightedItem::new("x", 1.0)];
        let bounds = Rect::new(0.0, 0.0, 10.0, 10.0);
        let err = layout(&one, 0.0, 0.0, 10.0, 10.0, -2.0).unwrap_err();
        assert!(matches!(err, LayoutError::InvalidParameter { name: "padding", .. }));

        let config = LayoutConfig::default().with_min_cell(f64::INFINITY);
        assert!(layout_with(&one, bounds, &config).is_err());

        let config = LayoutConfig::default().with_weight_policy(WeightPolicy::Floor(0.0));
        assert!(matches!(
            layout_with(&one, bounds, &config),
            Err(LayoutError::InvalidParameter { name: "weight floor", .. })
        ));
    }

    #[test]
    fn reject_policy_fails_whole_call() {
        let err = layout(&items(&[5.0, 0.0, 3.0]), 0.0, 0.0, 100.0, 100.0, 0.0).unwrap_err();
        assert_eq!(
            err,
            LayoutError::InvalidWeight {
                id: "T1".into(),
                weight: 0.0
            }
        );
        assert!(layout(&items(&[5.0, -1.0]), 0.0, 0.0, 100.0, 100.0, 0.0).is_err());
    }

    #[test]
    fn floor_policy_substitutes_epsilon() {
        let config = LayoutConfig::default()
            .with_min_cell(0.0)
            .with_weight_policy(WeightPolicy::Floor(1.0));
        let out = layout_with(
            &items(&[3.0, 0.0, -4.0]),
            Rect::new(0.0, 0.0, 500.0, 100.0),
            &config,
        )
        .unwrap();
        assert_eq!(out.len(), 3);
        assert_eq!(out.get("T1").unwrap().weight, 1.0);
        assert_eq!(out.get("T2").unwrap().weight, 1.0);
        assert!((out.get("T0").unwrap().rect.area() - 30_000.0).abs() < 1e-6);
        assert!((out.get("T2").unwrap().rect.area() - 10_000.0).abs() < 1e-6);
    }

    #[test]
    fn non_finite_weight_rejected_under_floor() {
        let config = LayoutConfig::default().with_weight_policy(WeightPolicy::Floor(1.0));
        let err = layout_with(
            &items(&[1.0, f64::NAN]),
            Rect::new(0.0, 0.0, 10.0, 10.0),
            &config,
        )
        .unwrap_err();
        assert!(matches!(err, LayoutError::InvalidWeight { .. }));
    }

    #[test]
    fn sixty_thirty_ten_scenario() {
        let out = layout(&items(&[60.0, 30.0, 10.0]), 0.0, 0.0, 300.0, 200.0, 0.0).unwrap();
        let a = out.get("T0").unwrap().rect;
        let b = out.get("T1").unwrap().rect;
        let c = out.get("T2").unwrap().rect;

        assert!((a.width - 180.0).abs() < 1e-9);
        assert!((b.x - 180.0).abs() < 1e-9 && (c.x - 180.0).abs() < 1e-9);
        assert!((b.width - 120.0).abs() < 1e-9);
        // The 120x200 remainder is taller than wide, so 30:10 splits its height 3:1.
        assert!((b.height - 150.0).abs() < 1e-9);
        assert!((c.height - 50.0).abs() < 1e-9);
        assert!((out.total_area() - 60_000.0).abs() < 1e-6);
    }

    #[test]
    fn min_cell_clamp_can_exceed_container() {
        let config = LayoutConfig::default().with_min_cell(20.0);
        let out = layout_with(
            &items(&[1000.0, 1.0]),
            Rect::new(0.0, 0.0, 200.0, 100.0),
            &config,
        )
        .unwrap();
        let small = out.get("T1").unwrap().rect;
        assert_eq!(small.width, 20.0);
        assert!(out.coverage(Rect::new(0.0, 0.0, 200.0, 100.0)) > 1.0);
    }

    #[test]
    fn padding_shrinks_every_cell() {
        let config = LayoutConfig::default().with_padding(2.0).with_min_cell(0.0);
        let out = layout_with(
            &items(&[1.0, 1.0]),
            Rect::new(0.0, 0.0, 100.0, 40.0),
            &config,
        )
        .unwrap();
        assert_eq!(out.rects[0].rect, Rect::new(2.0, 2.0, 46.0, 36.0));
        assert_eq!(out.rects[1].rect, Rect::new(52.0, 2.0, 46.0, 36.0));
    }

    #[test]
    fn lookup_and_hit_test() {
        let out = layout(&items(&[1.0, 1.0]), 0.0, 0.0, 100.0, 50.0, 0.0).unwrap();
        assert_eq!(out.hit_test(10.0, 10.0).unwrap().id, "T0");
        assert_eq!(out.hit_test(60.0, 10.0).unwrap().id, "T1");
        assert!(out.hit_test(150.0, 10.0).is_none());
        assert!(out.get("missing").is_none());
        assert_eq!((&out).into_iter().count(), 2);
    }

    #[test]
    fn duplicate_ids_resolve_to_first_cell() {
        let dup = vec![WeightedItem::new("A", 1.0), WeightedItem::new("A", 3.0)];
        let out = layout(&dup, 0.0, 0.0, 100.0, 100.0, 0.0).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out.get("A").unwrap().weight, 1.0);
    }

    #[test]
    fn equal_fallback_on_bad_weight() {
        let config = LayoutConfig::default().with_min_cell(0.0);
        let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
        let out = layout_or_equal(&items(&[5.0, 0.0]), bounds, &config).unwrap();
        assert_eq!(out.len(), 2);
        assert!((out.rects[0].rect.area() - out.rects[1].rect.area()).abs() < 1e-9);

        let err = layout_or_equal(&items(&[1.0]), Rect::new(0.0, 0.0, -5.0, 1.0), &config);
        assert!(matches!(err, Err(LayoutError::InvalidContainer { .. })));
    }

    #[test]
    fn huge_finite_weights_split_evenly() {
        let config = LayoutConfig::default().with_min_cell(0.0);
        let bounds = Rect::new(0.0, 0.0, 300.0, 100.0);
        let out = layout_with(&items(&[1e308, 1e308, 1e308]), bounds, &config).unwrap();
        assert_eq!(out.len(), 3);
        for placed in &out {
            assert_eq!(placed.weight, 1e308);
            assert!(placed.rect.x.is_finite() && placed.rect.width.is_finite());
            assert!((placed.rect.area() - 10_000.0).abs() < 1e-6);
        }
        assert!((out.coverage(bounds) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn identical_calls_give_identical_output() {
        let input = items(&[7.0, 3.0, 9.0, 1.0, 4.0]);
        let a = layout(&input, 3.0, 4.0, 640.0, 480.0, 1.0).unwrap();
        let b = layout(&input, 3.0, 4.0, 640.0, 480.0, 1.0).unwrap();
        assert_eq!(a.rects, b.rects);
    }
}
