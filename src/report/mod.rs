//! Reporting utilities: headline stat cards and formatted terminal output.

pub mod format;

pub use format::*;

use crate::domain::{Metric, MetricValues};

/// One headline metric as shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCard {
    pub metric: Metric,
    pub title: String,
    pub value: u64,
    /// Exact value with thousands separators.
    pub exact: String,
    /// K/M/B form, empty below 1,000.
    pub abbreviated: String,
}

/// Cards for the headline metrics.
///
/// `selected` marks cards computed over the selected duration rather than the
/// whole dataset.
pub fn stat_cards(values: &MetricValues, selected: bool) -> Vec<StatCard> {
    Metric::HEADLINE
        .iter()
        .map(|&metric| {
            let value = values.get(metric);
            let title = if selected {
                format!("{} (Selected)", metric.column_name())
            } else {
                metric.column_name().to_string()
            };
            StatCard {
                metric,
                title,
                value,
                exact: format_with_commas(value),
                abbreviated: format_abbreviated(value),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::generate_sample;

    #[test]
    fn all_time_cards_for_sample() {
        let cards = stat_cards(&generate_sample().totals(), false);
        assert_eq!(cards.len(), 4);

        assert_eq!(cards[0].title, "Subscribers");
        assert_eq!(cards[0].exact, "664,300");
        assert_eq!(cards[0].abbreviated, "(664.3K)");

        assert_eq!(cards[1].metric, Metric::Views);
        assert_eq!(cards[1].exact, "6,643,000");
        assert_eq!(cards[1].abbreviated, "(6.6M)");

        assert_eq!(cards[2].title, "Watch Hours");
        assert_eq!(cards[3].title, "Likes");
    }

    #[test]
    fn selected_cards_are_labelled() {
        let values = MetricValues {
            likes: 999,
            ..MetricValues::default()
        };
        let cards = stat_cards(&values, true);
        assert_eq!(cards[3].title, "Likes (Selected)");
        assert_eq!(cards[3].exact, "999");
        assert_eq!(cards[3].abbreviated, "");
    }
}
