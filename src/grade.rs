//! Color bands for coverage percentages and code-to-test ratios.
//!
//! Colors follow the shields.io badge palette. Lower bounds are inclusive.

use std::fmt;

/// One of five ordered color bands, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    Green,
    YellowGreen,
    Yellow,
    Orange,
    Red,
}

impl Band {
    /// Band name as used by badge renderers.
    pub fn name(&self) -> &'static str {
        match self {
            Band::Green => "green",
            Band::YellowGreen => "yellowgreen",
            Band::Yellow => "yellow",
            Band::Orange => "orange",
            Band::Red => "red",
        }
    }

    /// Hex color of the band.
    pub fn hex(&self) -> &'static str {
        match self {
            Band::Green => "#97CA00",
            Band::YellowGreen => "#A4A61D",
            Band::Yellow => "#DFB317",
            Band::Orange => "#FE7D37",
            Band::Red => "#E05D44",
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lower bounds for green, yellowgreen, yellow and orange; anything below is red.
const COVERAGE_BOUNDS: [f64; 4] = [80.0, 60.0, 40.0, 20.0];
const RATIO_BOUNDS: [f64; 4] = [1.2, 1.0, 0.8, 0.6];

const BANDS: [Band; 4] = [Band::Green, Band::YellowGreen, Band::Yellow, Band::Orange];

fn grade(value: f64, bounds: &[f64; 4]) -> Band {
    bounds
        .iter()
        .zip(BANDS)
        .find(|(bound, _)| value >= **bound)
        .map(|(_, band)| band)
        .unwrap_or(Band::Red)
}

/// Band for a coverage percentage (0-100).
pub fn coverage_band(percent: f64) -> Band {
    grade(percent, &COVERAGE_BOUNDS)
}

/// Band for a code-to-test ratio.
pub fn ratio_band(ratio: f64) -> Band {
    grade(ratio, &RATIO_BOUNDS)
}
