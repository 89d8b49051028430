use super::*;

impl Optimizer {
    /// Computes material usage and waste statistics for a chosen layout.
    pub(super) fn calculate_summary(&self, solution: &Solution, panels: &[PanelCut]) -> Summary {
        let total_fabric_width = solution.part_count as f64 * solution.fabric_width as f64;
        let total_cut_width: f64 = panels.iter().map(|p| p.cut_width).sum();
        let total_net_width: f64 = panels.iter().map(|p| p.net_width).sum();
        let waste_percentage = if total_fabric_width > 0.0 {
            (solution.waste / total_fabric_width) * 100.0
        } else {
            0.0
        };

        // Every panel runs the full curtain height, wherever it is cut from
        let fabric_length = solution
            .rolls_needed
            .map(|_| solution.part_count as f64 * self.request.curtain.height);

        Summary {
            total_fabric_width,
            total_cut_width,
            total_net_width,
            waste: solution.waste,
            waste_percentage,
            rolls_needed: solution.rolls_needed,
            fabric_length,
        }
    }
}
