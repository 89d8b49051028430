use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Standard roll widths in millimeters, widest first.
pub const STANDARD_FABRIC_WIDTHS: [u32; 4] = [2100, 2000, 1900, 1500];

/// Length of one standard fabric roll in millimeters.
pub const STANDARD_ROLL_LENGTH: f64 = 5000.0;

/// Hem allowance of an outer panel: 140mm on the outside plus 40mm on the seam side.
pub const DEFAULT_OUTER_FOLD: f64 = 180.0;

/// Hem allowance of an inner panel: 40mm on both seam sides.
pub const DEFAULT_INNER_FOLD: f64 = 80.0;

/// Smallest number of panels a curtain is cut into.
pub const MIN_PART_COUNT: u32 = 2;

/// Ordered list of roll widths the search walks through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FabricCatalog(Vec<u32>);

impl FabricCatalog {
    pub fn new(widths: Vec<u32>) -> Self {
        Self(widths)
    }

    /// The four standard widths (2100, 2000, 1900, 1500).
    pub fn standard() -> Self {
        Self(STANDARD_FABRIC_WIDTHS.to_vec())
    }

    pub fn widths(&self) -> &[u32] {
        &self.0
    }

    pub fn contains(&self, width: u32) -> bool {
        self.0.contains(&width)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for FabricCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

/// Available roll count per fabric width.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory(BTreeMap<u32, u32>);

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rolls available at `width`, zero when the width is not stocked.
    pub fn count(&self, width: u32) -> u32 {
        self.0.get(&width).copied().unwrap_or(0)
    }

    pub fn set(&mut self, width: u32, count: u32) {
        self.0.insert(width, count);
    }

    pub fn increment(&mut self, width: u32) {
        let count = self.0.entry(width).or_insert(0);
        *count = count.saturating_add(1);
    }

    /// Removes one roll; never goes below zero.
    pub fn decrement(&mut self, width: u32) {
        if let Some(count) = self.0.get_mut(&width) {
            *count = count.saturating_sub(1);
        }
    }

    /// Rolls across all widths, summed in `u64` so large counts cannot overflow.
    pub fn total_rolls(&self) -> u64 {
        self.0.values().map(|&count| u64::from(count)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(|&count| count == 0)
    }

    /// Widths holding at least one roll.
    pub fn stocked_widths(&self) -> impl Iterator<Item = u32> + '_ {
        self.0
            .iter()
            .filter(|&(_, &count)| count > 0)
            .map(|(&width, _)| width)
    }
}

impl FromIterator<(u32, u32)> for Inventory {
    fn from_iter<I: IntoIterator<Item = (u32, u32)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Finished curtain dimensions (net, outer edge to outer edge).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurtainSpec {
    pub width: f64,
    pub height: f64,
}

/// Hem allowance added to the net width of each panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FoldAllowance {
    /// Total allowance of each of the two end panels
    pub outer_fold: f64,
    /// Total allowance of each panel between the end panels
    pub inner_fold: f64,
}

impl Default for FoldAllowance {
    fn default() -> Self {
        Self {
            outer_fold: DEFAULT_OUTER_FOLD,
            inner_fold: DEFAULT_INNER_FOLD,
        }
    }
}

/// How the curtain width is split into per-panel net widths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NetWidthMode {
    /// The curtain width is the sum of the net widths: `net = width / parts`,
    /// rounded to one decimal.
    #[default]
    NetOfFolds,
    /// `net = (width + 2 * outer_fold + (parts - 2) * inner_fold) / parts`,
    /// only accepted when it divides to a whole millimeter.
    ExactDivision,
}

impl fmt::Display for NetWidthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetWidthMode::NetOfFolds => write!(f, "net_of_folds"),
            NetWidthMode::ExactDivision => write!(f, "exact_division"),
        }
    }
}

impl FromStr for NetWidthMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "net_of_folds" | "net" => Ok(NetWidthMode::NetOfFolds),
            "exact_division" | "exact" => Ok(NetWidthMode::ExactDivision),
            other => Err(format!(
                "unknown net width mode '{other}' (expected net_of_folds or exact_division)"
            )),
        }
    }
}

/// Bounds of the part-count search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchLimits {
    /// Absolute ceiling on the number of panels tried per fabric width
    pub max_part_count: u32,
    /// Panels tried beyond `ceil(width / fabric_width)` when roll length is tracked
    pub extra_parts: u32,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_part_count: 30,
            extra_parts: 5,
        }
    }
}

/// Everything that shapes the search apart from the curtain and the stock.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SearchOptions {
    pub mode: NetWidthMode,
    /// Length of one roll. When set, several panels may come from the same roll.
    pub roll_length: Option<f64>,
    pub limits: SearchLimits,
}

/// Input: what the user provides
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutRequest {
    pub curtain: CurtainSpec,
    pub inventory: Inventory,
    #[serde(default)]
    pub catalog: FabricCatalog,
    #[serde(default)]
    pub allowance: FoldAllowance,
    #[serde(default)]
    pub mode: NetWidthMode,
    /// Track roll length, see [`SearchOptions::roll_length`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roll_length: Option<f64>,
    #[serde(default)]
    pub limits: SearchLimits,
}

impl LayoutRequest {
    /// A request on the standard catalog with default folds and search options.
    pub fn new(curtain: CurtainSpec, inventory: Inventory) -> Self {
        Self {
            curtain,
            inventory,
            catalog: FabricCatalog::standard(),
            allowance: FoldAllowance::default(),
            mode: NetWidthMode::default(),
            roll_length: None,
            limits: SearchLimits::default(),
        }
    }

    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            mode: self.mode,
            roll_length: self.roll_length,
            limits: self.limits,
        }
    }
}

/// The chosen cutting configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    pub fabric_width: u32,
    pub part_count: u32,
    /// Visible width of every panel once hemmed
    pub net_width: f64,
    /// Cut width of each end panel (`net_width + outer_fold`)
    pub outer_panel_width: f64,
    /// Cut width of each interior panel (`net_width + inner_fold`)
    pub inner_panel_width: f64,
    /// Roll width left over, summed across all panels
    pub waste: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rolls_needed: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub panels_per_roll: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelKind {
    Outer,
    Inner,
}

/// One panel of the finished curtain, left to right.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelCut {
    /// 1-based position from the left
    pub index: u32,
    pub kind: PanelKind,
    pub net_width: f64,
    pub cut_width: f64,
    /// Left edge of the visible width on the finished curtain
    pub offset: f64,
}

/// Summary statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Roll width consumed: `part_count * fabric_width`
    pub total_fabric_width: f64,
    pub total_cut_width: f64,
    pub total_net_width: f64,
    pub waste: f64,
    pub waste_percentage: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rolls_needed: Option<u32>,
    /// Fabric length consumed across all panels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fabric_length: Option<f64>,
}

/// Output: what the optimizer returns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    pub solution: Solution,
    /// Panels in curtain order, ready for drawing
    pub panels: Vec<PanelCut>,
    pub summary: Summary,
}

/// Error type for optimization
#[derive(Debug, thiserror::Error)]
pub enum OptimizerError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No fabric in inventory")]
    EmptyInventory,

    #[error("No valid solution for the given curtain and inventory")]
    NoValidSolution,
}

pub type Result<T> = std::result::Result<T, OptimizerError>;
