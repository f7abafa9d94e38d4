use crate::app::Period;
use crate::data::DataStore;
use crate::risk::{format_percent, snapshot_at, ColorTier, Summary};
use crate::ui::{caption, SUBTITLE, TITLE};
use std::io::{self, Write};

/// Plain-text rendition of the view for one period: the sidebar list,
/// legend, summary and caption, without the map
pub fn write_report<W: Write>(out: &mut W, store: &DataStore, period: Period) -> io::Result<()> {
    let snapshot = snapshot_at(store, period.index());

    writeln!(out, "{TITLE}")?;
    writeln!(out, "{SUBTITLE}")?;
    writeln!(out)?;
    writeln!(out, "Month {} of {}", period.get(), period.max())?;
    writeln!(out)?;

    writeln!(out, "Regional Probabilities")?;
    for (name, pct) in snapshot.sorted_by_name() {
        let tier = ColorTier::from_percentage(pct);
        writeln!(out, "  {name:<13}{:>7}  {}", format_percent(pct), tier.hex())?;
    }
    writeln!(out)?;

    writeln!(out, "Risk Legend")?;
    for tier in ColorTier::ALL.iter().rev() {
        writeln!(out, "  {}  {}", tier.hex(), tier.label())?;
    }
    writeln!(out)?;

    writeln!(out, "Summary Statistics")?;
    if let Some(summary) = Summary::of(&snapshot) {
        let (high, low) = (summary.highest, summary.lowest);
        writeln!(out, "  Average Risk  {}", format_percent(summary.average))?;
        writeln!(out, "  Highest Risk  {} {}", high.0, format_percent(high.1))?;
        writeln!(out, "  Lowest Risk   {} {}", low.0, format_percent(low.1))?;
    }
    writeln!(out)?;
    writeln!(out, "{}", caption(store))?;

    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(period: usize) -> String {
        let store = DataStore::senegal().unwrap();
        let mut out = Vec::new();
        write_report(&mut out, &store, Period::new(period, store.num_periods()).unwrap()).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_report_sections() {
        let text = report(1);
        assert!(text.starts_with(TITLE));
        assert!(text.contains("Month 1 of 30"));
        assert!(text.contains("Regional Probabilities"));
        assert!(text.contains("  #a50f15  High Risk (80-100%)"));
        assert!(text.contains("Average Risk"));
        assert!(text.trim_end().ends_with("Data: 14 regions × 30 time periods"));
    }

    #[test]
    fn test_report_regions_alphabetical() {
        let text = report(12);
        let names: Vec<&str> = text
            .lines()
            .skip_while(|l| *l != "Regional Probabilities")
            .skip(1)
            .take_while(|l| !l.is_empty())
            .filter_map(|l| l.split_whitespace().next())
            .collect();
        assert_eq!(names.len(), 14);
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_report_extremes() {
        let store = DataStore::senegal().unwrap();
        let summary = Summary::of(&snapshot_at(&store, 0)).unwrap();
        let text = report(1);
        assert!(text.contains(&format!(
            "Highest Risk  {} {}",
            summary.highest.0,
            format_percent(summary.highest.1)
        )));
        assert!(text.contains(&format!("Lowest Risk   {}", summary.lowest.0)));
    }

    #[test]
    fn test_report_is_repeatable() {
        assert_eq!(report(1), report(1));
    }
}
