//! Seasonal and monthly price pattern.

use chrono::Datelike;
use indexmap::IndexMap;
use serde::Serialize;

use super::stats::{self, SummaryStats};
use crate::models::observation::PriceSeries;

/// Meteorological seasons; December belongs to winter, not to the
/// astronomical year-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Autumn,
}

impl Season {
    pub fn from_month(month: u32) -> Self {
        match month {
            12 | 1 | 2 => Season::Winter,
            3 | 4 | 5 => Season::Spring,
            6 | 7 | 8 => Season::Summer,
            _ => Season::Autumn,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Season::Winter => "Winter",
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Autumn => "Autumn",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonStats {
    pub season: Season,
    pub stats: SummaryStats,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthStats {
    /// Calendar month, 1-12.
    pub month: u32,
    pub stats: SummaryStats,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonalPattern {
    /// One entry per season present in the data, winter first.
    pub by_season: Vec<SeasonStats>,
    /// One entry per calendar month present in the data, ordered by month.
    pub by_month: Vec<MonthStats>,
}

pub fn analyze(series: &PriceSeries) -> SeasonalPattern {
    let mut seasons: IndexMap<Season, Vec<f64>> = IndexMap::new();
    let mut months: IndexMap<u32, Vec<f64>> = IndexMap::new();
    for obs in &series.observations {
        let month = obs.timestamp.month();
        seasons.entry(Season::from_month(month)).or_default().push(obs.price);
        months.entry(month).or_default().push(obs.price);
    }
    months.sort_keys();

    let order = [Season::Winter, Season::Spring, Season::Summer, Season::Autumn];
    let by_season = order
        .iter()
        .filter_map(|season| {
            let prices = seasons.get(season)?;
            stats::summarize(prices).map(|stats| SeasonStats { season: *season, stats })
        })
        .collect();

    let by_month = months
        .iter()
        .filter_map(|(&month, prices)| {
            stats::summarize(prices).map(|stats| MonthStats { month, stats })
        })
        .collect();

    SeasonalPattern { by_season, by_month }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::test_support::{midnight, synthetic_series};
    use chrono::Duration;

    #[test]
    fn december_maps_to_winter() {
        assert_eq!(Season::from_month(12), Season::Winter);
        assert_eq!(Season::from_month(2), Season::Winter);
        assert_eq!(Season::from_month(3), Season::Spring);
        assert_eq!(Season::from_month(8), Season::Summer);
        assert_eq!(Season::from_month(11), Season::Autumn);
    }

    #[test]
    fn seasons_and_months_grouped_independently() {
        // 24 hours in January plus 24 hours in July.
        let jan = synthetic_series(midnight(2023, 1, 10), 24, |_| 100.0);
        let jul = synthetic_series(midnight(2023, 7, 10), 24, |_| 40.0);
        let mut series = jan;
        series.observations.extend(jul.observations);

        let pattern = analyze(&series);
        assert_eq!(pattern.by_season.len(), 2);
        assert_eq!(pattern.by_season[0].season, Season::Winter);
        assert_eq!(pattern.by_season[0].stats.mean, 100.0);
        assert_eq!(pattern.by_season[1].season, Season::Summer);
        assert_eq!(pattern.by_season[1].stats.mean, 40.0);

        assert_eq!(pattern.by_month.len(), 2);
        assert_eq!(pattern.by_month[0].month, 1);
        assert_eq!(pattern.by_month[1].month, 7);
    }

    #[test]
    fn month_boundary_splits_on_local_timestamp() {
        // Series crossing midnight from Jan 31 into Feb 1.
        let start = midnight(2023, 1, 31) + Duration::hours(22);
        let series = synthetic_series(start, 4, |_| 10.0);
        let pattern = analyze(&series);
        assert_eq!(pattern.by_month.len(), 2);
        assert_eq!(pattern.by_month[0].stats.count, 2);
        assert_eq!(pattern.by_month[1].stats.count, 2);
    }
}
