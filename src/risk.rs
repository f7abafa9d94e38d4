use crate::data::DataStore;
use ratatui::style::Color;

/// Region → risk percentage for a single time period.
///
/// Entries keep the data store's region order; that order decides ties in
/// [`Summary::of`].
#[derive(Clone, Debug, PartialEq)]
pub struct RiskSnapshot {
    entries: Vec<(&'static str, f64)>,
}

impl RiskSnapshot {
    pub fn from_entries(entries: Vec<(&'static str, f64)>) -> Self {
        Self { entries }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        self.entries.iter().copied()
    }

    pub fn get(&self, region: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(name, _)| *name == region)
            .map(|&(_, pct)| pct)
    }

    /// Percentage by position in the data store's region order
    pub fn at(&self, idx: usize) -> Option<f64> {
        self.entries.get(idx).map(|&(_, pct)| pct)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries ordered by region name (code point order)
    pub fn sorted_by_name(&self) -> Vec<(&'static str, f64)> {
        let mut sorted = self.entries.clone();
        sorted.sort_by(|a, b| a.0.cmp(b.0));
        sorted
    }
}

/// Project one matrix column into percentages.
///
/// # Panics
/// If `time_index >= store.num_periods()`. The time control never produces
/// such an index.
pub fn snapshot_at(store: &DataStore, time_index: usize) -> RiskSnapshot {
    assert!(
        time_index < store.num_periods(),
        "time index {time_index} out of range for {} periods",
        store.num_periods()
    );

    let entries = store
        .regions()
        .iter()
        .enumerate()
        .map(|(i, region)| (region.name, store.probability(i, time_index) * 100.0))
        .collect();

    RiskSnapshot { entries }
}

/// Five risk bands, lightest to darkest
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ColorTier {
    Low,
    LowMedium,
    Medium,
    MediumHigh,
    High,
}

impl ColorTier {
    /// Every tier, lightest first
    pub const ALL: [ColorTier; 5] = [
        ColorTier::Low,
        ColorTier::LowMedium,
        ColorTier::Medium,
        ColorTier::MediumHigh,
        ColorTier::High,
    ];

    /// Bands are closed below and open above; anything past either end
    /// lands in the outermost band
    pub fn from_percentage(pct: f64) -> Self {
        if pct < 20.0 {
            ColorTier::Low
        } else if pct < 40.0 {
            ColorTier::LowMedium
        } else if pct < 60.0 {
            ColorTier::Medium
        } else if pct < 80.0 {
            ColorTier::MediumHigh
        } else {
            ColorTier::High
        }
    }

    pub fn hex(self) -> &'static str {
        match self {
            ColorTier::Low => "#fee5d9",
            ColorTier::LowMedium => "#fcae91",
            ColorTier::Medium => "#fb6a4a",
            ColorTier::MediumHigh => "#de2d26",
            ColorTier::High => "#a50f15",
        }
    }

    pub fn color(self) -> Color {
        match self {
            ColorTier::Low => Color::Rgb(0xfe, 0xe5, 0xd9),
            ColorTier::LowMedium => Color::Rgb(0xfc, 0xae, 0x91),
            ColorTier::Medium => Color::Rgb(0xfb, 0x6a, 0x4a),
            ColorTier::MediumHigh => Color::Rgb(0xde, 0x2d, 0x26),
            ColorTier::High => Color::Rgb(0xa5, 0x0f, 0x15),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ColorTier::Low => "Low Risk (0-20%)",
            ColorTier::LowMedium => "Low-Medium (20-40%)",
            ColorTier::Medium => "Medium (40-60%)",
            ColorTier::MediumHigh => "Medium-High (60-80%)",
            ColorTier::High => "High Risk (80-100%)",
        }
    }

    /// 0 for the lightest band, 4 for the darkest
    pub fn darkness(self) -> usize {
        self as usize
    }
}

/// Shorthand for [`ColorTier::from_percentage`]
pub fn color_for(pct: f64) -> ColorTier {
    ColorTier::from_percentage(pct)
}

/// Percentage with one decimal, e.g. `42.5%`
pub fn format_percent(pct: f64) -> String {
    format!("{pct:.1}%")
}

/// Tooltip text for a region marker
pub fn region_label(name: &str, pct: f64) -> String {
    format!("{name}: {}", format_percent(pct))
}

/// Aggregate figures for one snapshot
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Summary {
    pub average: f64,
    pub highest: (&'static str, f64),
    pub lowest: (&'static str, f64),
}

impl Summary {
    /// `None` for an empty snapshot. On equal values the region seen first wins.
    pub fn of(snapshot: &RiskSnapshot) -> Option<Self> {
        let mut iter = snapshot.iter();
        let first = iter.next()?;

        let (sum, highest, lowest) = iter.fold(
            (first.1, first, first),
            |(sum, hi, lo), entry| {
                let hi = if entry.1 > hi.1 { entry } else { hi };
                let lo = if entry.1 < lo.1 { entry } else { lo };
                (sum + entry.1, hi, lo)
            },
        );

        Some(Self {
            average: sum / snapshot.len() as f64,
            highest,
            lowest,
        })
    }
}
