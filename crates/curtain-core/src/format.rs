//! Human-readable rendering of a [`Solution`] for terminals and reports.

use crate::types::Solution;
use std::fmt;
use std::str::FromStr;

/// Unit the formatted lengths are shown in. Values are always stored in mm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DisplayUnit {
    #[default]
    Millimeters,
    Centimeters,
}

impl DisplayUnit {
    pub fn symbol(self) -> &'static str {
        match self {
            DisplayUnit::Millimeters => "mm",
            DisplayUnit::Centimeters => "cm",
        }
    }

    pub fn convert(self, value: f64) -> f64 {
        match self {
            DisplayUnit::Millimeters => value,
            DisplayUnit::Centimeters => value / 10.0,
        }
    }

    /// Formats a millimeter length in this unit, dropping a trailing `.0`.
    pub fn format_length(self, value_mm: f64) -> String {
        let value = self.convert(value_mm);
        let decimals = match self {
            DisplayUnit::Millimeters => 1,
            DisplayUnit::Centimeters => 2,
        };
        let text = format!("{value:.decimals$}");
        let text = if text.contains('.') {
            text.trim_end_matches('0').trim_end_matches('.').to_string()
        } else {
            text
        };
        format!("{text} {}", self.symbol())
    }
}

impl fmt::Display for DisplayUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for DisplayUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mm" | "millimeters" => Ok(DisplayUnit::Millimeters),
            "cm" | "centimeters" => Ok(DisplayUnit::Centimeters),
            other => Err(format!("unknown unit '{other}' (expected mm or cm)")),
        }
    }
}

/// Label/value pairs describing a solution, in display order.
pub fn format_solution(solution: &Solution, unit: DisplayUnit) -> Vec<(&'static str, String)> {
    let mut fields = vec![
        ("Fabric width", unit.format_length(solution.fabric_width as f64)),
        ("Panels", solution.part_count.to_string()),
        ("Net width per panel", unit.format_length(solution.net_width)),
        ("Outer panel cut", unit.format_length(solution.outer_panel_width)),
        ("Inner panel cut", unit.format_length(solution.inner_panel_width)),
        ("Waste", unit.format_length(solution.waste)),
    ];

    if let Some(rolls) = solution.rolls_needed {
        fields.push(("Rolls needed", rolls.to_string()));
    }
    if let Some(per_roll) = solution.panels_per_roll {
        fields.push(("Panels per roll", per_roll.to_string()));
    }

    fields
}
