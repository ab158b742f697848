use rayon::prelude::*;

use super::geometry::Rect;
use super::{place_leaves, resolve_weights, split, LayoutConfig, LayoutError};
use crate::model::{Group, GroupPlacement};

/// Two-level layout: groups by total weight, then members inside each group
/// below a reserved header strip. Inputs are already validated by the caller.
pub(super) fn layout_groups(
    groups: &[Group],
    bounds: Rect,
    config: &LayoutConfig,
) -> Result<Vec<GroupPlacement>, LayoutError> {
    // Resolve members first so group totals reflect any floored weights.
    let member_weights = groups
        .iter()
        .map(|g| {
            resolve_weights(
                g.members.iter().map(|m| (m.id.as_str(), m.weight)),
                config.weight_policy,
            )
        })
        .collect::<Result<Vec<_>, _>>()?;

    // Group sums can overflow even when every member is finite. In that case
    // groups are weighted by member sums relative to the largest member, which
    // keeps their proportions; reported totals are then scaled back up.
    let raw_sums: Vec<f64> = member_weights.iter().map(|w| w.iter().sum()).collect();
    let scale = if raw_sums.iter().all(|s| s.is_finite()) {
        1.0
    } else {
        let max = member_weights
            .iter()
            .flatten()
            .copied()
            .fold(0.0, f64::max);
        tracing::debug!("Group totals overflow, weighting groups relative to {:e}", max);
        max
    };

    let totals = resolve_weights(
        groups.iter().zip(&member_weights).map(|(g, w)| {
            (g.name.as_str(), w.iter().map(|m| m / scale).sum::<f64>())
        }),
        config.weight_policy,
    )?;

    if bounds.is_empty() || groups.is_empty() {
        return Ok(Vec::new());
    }

    let outer = split::partition(&totals, bounds);

    // Each group's members depend only on its own cell; results keep group order.
    let placements: Vec<GroupPlacement> = (0..groups.len())
        .into_par_iter()
        .map(|i| {
            let group = &groups[i];
            let rect = outer[i].inset(config.padding).at_least(config.min_cell);
            let header_h = config.header_height.min(rect.height);
            let header = Rect::new(rect.x, rect.y, rect.width, header_h);
            let body = Rect::new(rect.x, rect.y + header_h, rect.width, rect.height - header_h);

            if body.is_empty() && !group.members.is_empty() {
                tracing::warn!(
                    "Group '{}' has no room below its {}px header ({:.1}x{:.1}); {} members hidden",
                    group.name,
                    config.header_height,
                    rect.width,
                    rect.height,
                    group.members.len()
                );
            }

            let members = if body.is_empty() {
                Vec::new()
            } else {
                place_leaves(
                    group.members.iter().map(|m| &m.id),
                    &member_weights[i],
                    body,
                    config,
                )
            };

            GroupPlacement {
                name: group.name.clone(),
                total_weight: totals[i] * scale,
                rect,
                header,
                members,
            }
        })
        .collect();

    tracing::debug!(
        "Laid out {} groups ({} members) in {:.0}x{:.0}, header={}px",
        placements.len(),
        placements.iter().map(|g| g.members.len()).sum::<usize>(),
        bounds.width,
        bounds.height,
        config.header_height
    );

    Ok(placements)
}
