//! Plain-text table output for question results.

use std::fmt::Write as _;

use crime_stats_analytics_models::{
    AgeBracketRankRow, DateRangeResult, IncreaseRow, PercentageIncreaseRow, SeasonRankRow,
    YearCount, YearRankRow,
};

/// A result row that can be printed as a table line.
pub trait TableRow {
    /// Column headings.
    fn headers() -> &'static [&'static str];

    /// Cell values, one per heading.
    fn cells(&self) -> Vec<String>;
}

impl TableRow for YearCount {
    fn headers() -> &'static [&'static str] {
        &["year", "count"]
    }

    fn cells(&self) -> Vec<String> {
        vec![self.year.to_string(), self.count.to_string()]
    }
}

impl TableRow for IncreaseRow {
    fn headers() -> &'static [&'static str] {
        &["crime_description", "base_count", "target_count", "increase"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.crime_description.clone(),
            self.base_count.to_string(),
            self.target_count.to_string(),
            self.increase.to_string(),
        ]
    }
}

impl TableRow for PercentageIncreaseRow {
    fn headers() -> &'static [&'static str] {
        &[
            "crime_description",
            "base_count",
            "target_count",
            "percentage_increase",
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.crime_description.clone(),
            self.base_count.to_string(),
            self.target_count.to_string(),
            self.percentage_increase
                .map_or_else(|| "n/a".to_string(), |p| format!("{p:.2}")),
        ]
    }
}

impl TableRow for SeasonRankRow {
    fn headers() -> &'static [&'static str] {
        &["year", "season", "crime_description", "count", "rank"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.year.to_string(),
            self.season.to_string(),
            self.crime_description.clone(),
            self.count.to_string(),
            self.rank.to_string(),
        ]
    }
}

impl TableRow for AgeBracketRankRow {
    fn headers() -> &'static [&'static str] {
        &["year", "age_bracket", "crime_description", "count", "rank"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.year.to_string(),
            self.age_bracket.to_string(),
            self.crime_description.clone(),
            self.count.to_string(),
            self.rank.to_string(),
        ]
    }
}

impl TableRow for YearRankRow {
    fn headers() -> &'static [&'static str] {
        &["year", "crime_description", "count", "rank"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.year.to_string(),
            self.crime_description.clone(),
            self.count.to_string(),
            self.rank.to_string(),
        ]
    }
}

fn push_line(out: &mut String, cells: &[&str], widths: &[usize]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect();
    let _ = writeln!(out, "{}", padded.join("  ").trim_end());
}

/// Renders rows as a left-aligned table with a dashed rule under the
/// headings.
#[must_use]
pub fn render_table<T: TableRow>(rows: &[T]) -> String {
    let headers = T::headers();
    let body: Vec<Vec<String>> = rows.iter().map(TableRow::cells).collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for cells in &body {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, headers, &widths);
    let total = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
    let _ = writeln!(out, "{}", "-".repeat(total));
    for cells in &body {
        let refs: Vec<&str> = cells.iter().map(String::as_str).collect();
        push_line(&mut out, &refs, &widths);
    }

    out
}

/// Renders the date range answer: the year span, then totals per year.
#[must_use]
pub fn render_date_range(result: &DateRangeResult) -> String {
    let mut out = String::new();
    match result.range {
        Some(range) => {
            let _ = writeln!(
                out,
                "earliest_year: {}\nlatest_year:   {}\n",
                range.earliest_year, range.latest_year
            );
        }
        None => {
            let _ = writeln!(out, "no incidents\n");
        }
    }
    out.push_str(&render_table(&result.by_year));
    out
}

#[cfg(test)]
mod tests {
    use crime_stats_analytics_models::DateRange;

    use super::*;

    #[test]
    fn aligns_columns() {
        let rows = vec![
            YearRankRow {
                year: 2022,
                crime_description: "VEHICLE - STOLEN".to_string(),
                count: 1200,
                rank: 1,
            },
            YearRankRow {
                year: 2022,
                crime_description: "ARSON".to_string(),
                count: 7,
                rank: 2,
            },
        ];
        let table = render_table(&rows);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "year  crime_description  count  rank");
        assert_eq!(lines[1], "-".repeat(36));
        assert_eq!(lines[2], "2022  VEHICLE - STOLEN   1200   1");
        assert_eq!(lines[3], "2022  ARSON              7      2");
    }

    #[test]
    fn undefined_percentage_prints_placeholder() {
        let row = PercentageIncreaseRow {
            crime_description: "NEW CODE".to_string(),
            base_year: 2020,
            target_year: 2021,
            base_count: 0,
            target_count: 3,
            percentage_increase: None,
        };
        assert_eq!(row.cells()[3], "n/a");
    }

    #[test]
    fn date_range_lists_years() {
        let result = DateRangeResult {
            range: Some(DateRange {
                earliest_year: 2020,
                latest_year: 2021,
            }),
            by_year: vec![
                YearCount {
                    year: 2020,
                    count: 10,
                },
                YearCount {
                    year: 2021,
                    count: 12,
                },
            ],
        };
        let text = render_date_range(&result);
        assert!(text.starts_with("earliest_year: 2020\nlatest_year:   2021\n"));
        assert!(text.contains("2021  12"));
    }
}
