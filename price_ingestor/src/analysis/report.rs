//! Plain-text rendering of a [`PriceAnalysis`] for terminal output.

use std::fmt::Write;

use super::{PriceAnalysis, SolarTiming};

/// Renders the full analysis as a human-readable report.
///
/// Prices are EUR/MWh throughout, matching the input series.
pub fn render(country: &str, analysis: &PriceAnalysis) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Price pattern analysis: {country} ===");

    let _ = writeln!(out, "\n-- Hourly profile --");
    for entry in &analysis.hourly.by_hour {
        let s = &entry.stats;
        let _ = writeln!(
            out,
            "  {:02}:00  mean {:>8.2}  median {:>8.2}  min {:>8.2}  max {:>8.2}",
            entry.hour, s.mean, s.median, s.min, s.max
        );
    }
    let _ = writeln!(out, "  peak hours:   {}", hour_list(&analysis.hourly.peak_hours));
    let _ = writeln!(out, "  valley hours: {}", hour_list(&analysis.hourly.valley_hours));
    if let (Some(solar), Some(other)) =
        (analysis.hourly.solar_window_mean, analysis.hourly.other_hours_mean)
    {
        let _ = writeln!(
            out,
            "  solar window mean {solar:.2} vs other hours {other:.2}"
        );
    }

    let _ = writeln!(out, "\n-- Seasons --");
    for entry in &analysis.seasonal.by_season {
        let _ = writeln!(
            out,
            "  {:<6}  mean {:>8.2}  ({} obs)",
            entry.season.label(),
            entry.stats.mean,
            entry.stats.count
        );
    }

    let _ = writeln!(out, "\n-- Weekday vs weekend --");
    if let Some(s) = &analysis.weekday.weekday {
        let _ = writeln!(out, "  weekday  mean {:>8.2}  ({} obs)", s.mean, s.count);
    }
    if let Some(s) = &analysis.weekday.weekend {
        let _ = writeln!(out, "  weekend  mean {:>8.2}  ({} obs)", s.mean, s.count);
    }

    let _ = writeln!(out, "\n-- Extreme events --");
    let ev = &analysis.extremes;
    let _ = writeln!(out, "  p05 {:>8.2}   p95 {:>8.2}", ev.p05, ev.p95);
    let _ = writeln!(
        out,
        "  negative prices: {} obs ({:.1}%)",
        ev.negative.count,
        ev.negative.share * 100.0
    );
    let _ = writeln!(
        out,
        "  spikes above p95: {} obs ({:.1}%)",
        ev.spikes.count,
        ev.spikes.share * 100.0
    );

    let _ = writeln!(out, "\n-- Daily arbitrage potential --");
    let arb = &analysis.arbitrage;
    let _ = writeln!(
        out,
        "  spread mean {:.2}  median {:.2}  max {:.2}  (EUR/MWh)",
        arb.mean_spread, arb.median_spread, arb.max_spread
    );
    let _ = writeln!(
        out,
        "  spread mean {:.4}  median {:.4}  max {:.4}  (EUR/kWh)",
        arb.mean_spread_kwh, arb.median_spread_kwh, arb.max_spread_kwh
    );
    for day in &arb.best_days {
        let _ = writeln!(
            out,
            "    {}  spread {:>8.2}  ({:.4}/kWh, min {:.2}, max {:.2})",
            day.date, day.spread, day.spread_kwh, day.min_price, day.max_price
        );
    }

    render_solar(&mut out, &analysis.solar);
    out
}

fn render_solar(out: &mut String, solar: &SolarTiming) {
    let _ = writeln!(out, "\n-- Solar timing --");
    match (solar.mean_solar_peak, solar.mean_evening_peak) {
        (Some(midday), Some(evening)) => {
            let _ = writeln!(
                out,
                "  solar peak mean {midday:.2} vs evening peak {evening:.2}"
            );
            match solar.mean_favorable_premium {
                Some(premium) => {
                    let _ = writeln!(out, "  mean benefit on favorable days {premium:.2}");
                }
                None => {
                    let _ = writeln!(out, "  evening was never dearer than the solar peak");
                }
            }
            if let Some(share) = solar.share_evening_dearer {
                let _ = writeln!(
                    out,
                    "  evening dearer on {:.1}% of {} comparable days",
                    share * 100.0,
                    solar.days.len()
                );
            }
        }
        _ => {
            let _ = writeln!(out, "  no days with both windows populated");
        }
    }
}

fn hour_list(hours: &[u32]) -> String {
    hours
        .iter()
        .map(|h| format!("{h:02}:00"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::test_support::{midnight, synthetic_series};
    use crate::analysis::{analyze, AnalysisWindows};

    #[test]
    fn report_names_every_section() {
        let series = synthetic_series(midnight(2023, 1, 1), 24 * 30, |h| (h % 24) as f64);
        let analysis = analyze(&series, &AnalysisWindows::default()).unwrap();
        let text = render("NL", &analysis);

        for heading in [
            "Price pattern analysis: NL",
            "Hourly profile",
            "Seasons",
            "Weekday vs weekend",
            "Extreme events",
            "Daily arbitrage potential",
            "Solar timing",
        ] {
            assert!(text.contains(heading), "missing section: {heading}");
        }
        assert!(text.contains("Winter"));
    }

    #[test]
    fn arbitrage_section_reports_both_units() {
        let series = synthetic_series(midnight(2023, 6, 1), 48, |h| {
            if h < 24 { h as f64 } else { 50.0 }
        });
        let analysis = analyze(&series, &AnalysisWindows::default()).unwrap();
        let text = render("NL", &analysis);
        assert!(text.contains("spread mean 11.50  median 11.50  max 23.00  (EUR/MWh)"));
        assert!(text.contains("spread mean 0.0115  median 0.0115  max 0.0230  (EUR/kWh)"));
    }

    #[test]
    fn solar_section_reports_favorable_day_benefit() {
        // Evening dearer by 10 on day one, cheaper by 4 on day two.
        let series = synthetic_series(midnight(2023, 6, 1), 48, |h| {
            let (day, hour) = (h / 24, h % 24);
            match (day, hour) {
                (0, 17..=21) => 60.0,
                (1, 17..=21) => 46.0,
                _ => 50.0,
            }
        });
        let analysis = analyze(&series, &AnalysisWindows::default()).unwrap();
        let text = render("NL", &analysis);
        assert!(text.contains("mean benefit on favorable days 10.00"));
        assert!(text.contains("evening dearer on 50.0% of 2 comparable days"));
    }

    #[test]
    fn empty_solar_section_renders_placeholder() {
        let series = synthetic_series(midnight(2023, 6, 1), 4, |_| 10.0);
        let analysis = analyze(&series, &AnalysisWindows::default()).unwrap();
        let text = render("DE", &analysis);
        assert!(text.contains("no days with both windows populated"));
    }
}
