use crate::types::*;
use tracing::debug;

mod panels;
mod search;
mod summary;

pub use search::{enumerate_candidates, find_optimal_solution};

/// Picks the curtain layout that wastes the least roll width.
pub struct Optimizer {
    request: LayoutRequest,
}

impl Optimizer {
    /// Validates requests and builds a new optimizer instance.
    pub fn new(request: LayoutRequest) -> Result<Self> {
        let curtain = &request.curtain;
        if !curtain.width.is_finite() || curtain.width <= 0.0 {
            return Err(OptimizerError::InvalidInput(format!(
                "Curtain width must be a positive number, got {}",
                curtain.width
            )));
        }

        if !curtain.height.is_finite() || curtain.height <= 0.0 {
            return Err(OptimizerError::InvalidInput(format!(
                "Curtain height must be a positive number, got {}",
                curtain.height
            )));
        }

        let allowance = &request.allowance;
        for (name, fold) in [
            ("Outer fold", allowance.outer_fold),
            ("Inner fold", allowance.inner_fold),
        ] {
            if !fold.is_finite() || fold < 0.0 {
                return Err(OptimizerError::InvalidInput(format!(
                    "{name} must be zero or positive, got {fold}"
                )));
            }
        }

        if request.catalog.is_empty() {
            return Err(OptimizerError::InvalidInput(
                "At least one fabric width must be provided".to_string(),
            ));
        }

        let widths = request.catalog.widths();
        for (idx, &width) in widths.iter().enumerate() {
            if width == 0 {
                return Err(OptimizerError::InvalidInput(
                    "Fabric widths must be positive".to_string(),
                ));
            }
            if widths[..idx].contains(&width) {
                return Err(OptimizerError::InvalidInput(format!(
                    "Fabric width {width}mm is listed twice"
                )));
            }
        }

        for width in request.inventory.stocked_widths() {
            if !request.catalog.contains(width) {
                return Err(OptimizerError::InvalidInput(format!(
                    "Inventory lists fabric width {width}mm which is not in the catalog"
                )));
            }
        }

        if request.inventory.is_empty() {
            return Err(OptimizerError::EmptyInventory);
        }

        if let Some(roll_length) = request.roll_length {
            if !roll_length.is_finite() || roll_length <= 0.0 {
                return Err(OptimizerError::InvalidInput(format!(
                    "Roll length must be a positive number, got {roll_length}"
                )));
            }
        }

        if request.limits.max_part_count < MIN_PART_COUNT {
            return Err(OptimizerError::InvalidInput(format!(
                "Part count limit must be at least {MIN_PART_COUNT}"
            )));
        }

        Ok(Self { request })
    }

    /// Runs the search and assembles the panel breakdown and statistics.
    pub fn optimize(&self) -> Result<OptimizationResult> {
        let request = &self.request;
        let solution = find_optimal_solution(
            &request.curtain,
            &request.inventory,
            &request.catalog,
            &request.allowance,
            &request.search_options(),
        )
        .ok_or(OptimizerError::NoValidSolution)?;

        debug!(
            fabric_width = solution.fabric_width,
            part_count = solution.part_count,
            waste = solution.waste,
            "selected layout"
        );

        let panels = solution.panels();
        let summary = self.calculate_summary(&solution, &panels);

        Ok(OptimizationResult {
            solution,
            panels,
            summary,
        })
    }
}
