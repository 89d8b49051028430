use crate::types::*;

impl Solution {
    /// Lays the panels out left to right: an outer panel at each end and the
    /// inner panels between them. Offsets follow the net widths, so the last
    /// panel ends at `part_count * net_width`.
    pub fn panels(&self) -> Vec<PanelCut> {
        (0..self.part_count)
            .map(|idx| {
                let is_outer = idx == 0 || idx + 1 == self.part_count;
                let (kind, cut_width) = if is_outer {
                    (PanelKind::Outer, self.outer_panel_width)
                } else {
                    (PanelKind::Inner, self.inner_panel_width)
                };

                PanelCut {
                    index: idx + 1,
                    kind,
                    net_width: self.net_width,
                    cut_width,
                    offset: idx as f64 * self.net_width,
                }
            })
            .collect()
    }
}
