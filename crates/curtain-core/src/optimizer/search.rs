use crate::types::*;
use tracing::trace;

/// Returns the feasible layout with the least waste, or `None` when nothing fits.
///
/// Fabric widths are tried in catalog order and part counts in ascending
/// order; on equal waste the first layout found is kept. Inputs that fail
/// validation (non-positive width, empty inventory) yield `None`.
pub fn find_optimal_solution(
    curtain: &CurtainSpec,
    inventory: &Inventory,
    catalog: &FabricCatalog,
    allowance: &FoldAllowance,
    options: &SearchOptions,
) -> Option<Solution> {
    let mut best: Option<Solution> = None;

    for candidate in enumerate_candidates(curtain, inventory, catalog, allowance, options) {
        match &best {
            Some(current) if candidate.waste >= current.waste => {}
            _ => best = Some(candidate),
        }
    }

    best
}

/// Every feasible layout, in search order.
pub fn enumerate_candidates(
    curtain: &CurtainSpec,
    inventory: &Inventory,
    catalog: &FabricCatalog,
    allowance: &FoldAllowance,
    options: &SearchOptions,
) -> Vec<Solution> {
    let mut candidates = Vec::new();

    if !curtain.width.is_finite() || curtain.width <= 0.0 {
        return candidates;
    }

    for &fabric_width in catalog.widths() {
        let rolls = inventory.count(fabric_width);
        if rolls == 0 || fabric_width == 0 {
            continue;
        }

        let Some(bound) = part_count_bound(curtain, fabric_width, rolls, options) else {
            trace!(fabric_width, "roll too short for the curtain height");
            continue;
        };

        for part_count in MIN_PART_COUNT..=bound.max_parts {
            if let Some(mut solution) =
                evaluate(curtain, fabric_width, part_count, allowance, options.mode)
            {
                if let Some(panels_per_roll) = bound.panels_per_roll {
                    let rolls_needed = part_count.div_ceil(panels_per_roll);
                    if rolls_needed > rolls {
                        continue;
                    }
                    solution.rolls_needed = Some(rolls_needed);
                    solution.panels_per_roll = Some(panels_per_roll);
                }
                candidates.push(solution);
            }
        }
    }

    candidates
}

struct PartCountBound {
    max_parts: u32,
    panels_per_roll: Option<u32>,
}

/// Highest part count worth trying for one fabric width.
///
/// Without a roll length every panel takes its own roll. With one, a roll
/// yields `floor(roll_length / height)` panels and the search is further
/// capped at `ceil(width / fabric_width) + extra_parts`. Returns `None` when
/// a single panel does not fit on a roll.
fn part_count_bound(
    curtain: &CurtainSpec,
    fabric_width: u32,
    rolls: u32,
    options: &SearchOptions,
) -> Option<PartCountBound> {
    let limits = &options.limits;

    let Some(roll_length) = options.roll_length else {
        return Some(PartCountBound {
            max_parts: rolls.min(limits.max_part_count),
            panels_per_roll: None,
        });
    };

    if !curtain.height.is_finite() || curtain.height <= 0.0 {
        return None;
    }

    let panels_per_roll = (roll_length / curtain.height).floor();
    if panels_per_roll.is_nan() || panels_per_roll < 1.0 {
        return None;
    }
    let panels_per_roll = panels_per_roll.min(u32::MAX as f64) as u32;

    let from_rolls = panels_per_roll.saturating_mul(rolls);
    let from_width =
        ((curtain.width / fabric_width as f64).ceil() as u32).saturating_add(limits.extra_parts);

    Some(PartCountBound {
        max_parts: from_rolls.min(from_width).min(limits.max_part_count),
        panels_per_roll: Some(panels_per_roll),
    })
}

/// Builds the layout for one (fabric width, part count) pair if it can be cut.
fn evaluate(
    curtain: &CurtainSpec,
    fabric_width: u32,
    part_count: u32,
    allowance: &FoldAllowance,
    mode: NetWidthMode,
) -> Option<Solution> {
    let parts = part_count as f64;
    let inner_count = (part_count - MIN_PART_COUNT) as f64;

    let net_width = match mode {
        NetWidthMode::NetOfFolds => round_to_tenth(curtain.width / parts),
        NetWidthMode::ExactDivision => {
            let gross = curtain.width
                + 2.0 * allowance.outer_fold
                + inner_count * allowance.inner_fold;
            let net = gross / parts;
            if (net - net.round()).abs() > WHOLE_MM_TOLERANCE {
                trace!(fabric_width, part_count, net, "net width is not a whole millimeter");
                return None;
            }
            net.round()
        }
    };

    if net_width <= 0.0 {
        return None;
    }

    let fabric = fabric_width as f64;
    let outer_panel_width = net_width + allowance.outer_fold;
    let inner_panel_width = net_width + allowance.inner_fold;

    if outer_panel_width > fabric || inner_panel_width > fabric {
        trace!(
            fabric_width,
            part_count,
            outer_panel_width,
            inner_panel_width,
            "panel wider than the roll"
        );
        return None;
    }

    let waste = 2.0 * (fabric - outer_panel_width) + inner_count * (fabric - inner_panel_width);
    if waste < 0.0 {
        return None;
    }

    Some(Solution {
        fabric_width,
        part_count,
        net_width,
        outer_panel_width,
        inner_panel_width,
        waste,
        rolls_needed: None,
        panels_per_roll: None,
    })
}

const WHOLE_MM_TOLERANCE: f64 = 1e-9;

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
