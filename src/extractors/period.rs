// src/extractors/period.rs
use crate::statement::models::{StatementPeriod, StatementText};
use crate::utils::error::ExtractError;
use chrono::NaiveDate;
use regex::Regex;

const MONTH_NAMES: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

// Words allowed between the two dates of a period range.
const RANGE_SEPARATORS: &[&str] = &["-", "\u{2013}", "\u{2014}", "to", "through", "thru"];

/// Finds the statement period (and with it the year of month/day rows) in header text.
pub struct PeriodDetector {
    long_date: Regex,
    numeric_date: Regex,
}

impl PeriodDetector {
    pub fn new() -> Result<Self, ExtractError> {
        let long_date = Regex::new(
            r"(?i)\b(jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?\s+(\d{1,2}),?\s+(\d{4})\b",
        )
        .map_err(|e| ExtractError::RegexError(e.to_string()))?;
        let numeric_date = Regex::new(r"\b(\d{1,2})/(\d{1,2})/(\d{4}|\d{2})\b")
            .map_err(|e| ExtractError::RegexError(e.to_string()))?;
        Ok(Self { long_date, numeric_date })
    }

    /// Looks for an explicit date range on the first page with text, falling back to the
    /// latest full date found there. Returns `None` when that page carries no full date at all.
    pub fn detect(&self, text: &StatementText) -> Option<StatementPeriod> {
        let first_page = text.first_text_page()?;
        let mut latest: Option<NaiveDate> = None;

        for line in first_page.lines() {
            let dates = self.dates_in(line);
            for pair in dates.windows(2) {
                let (start, end) = (pair[0].2, pair[1].2);
                let Some(between) = line.get(pair[0].1..pair[1].0) else { continue };
                let between = between.trim().to_lowercase();
                if RANGE_SEPARATORS.contains(&between.as_str()) && start <= end {
                    tracing::debug!("Statement period range found: {} - {}", start, end);
                    return Some(StatementPeriod { start: Some(start), end });
                }
            }
            for (_, _, date) in dates {
                if latest.map_or(true, |l| date > l) {
                    latest = Some(date);
                }
            }
        }

        latest.map(|end| {
            tracing::debug!("No period range found, using latest header date {}", end);
            StatementPeriod { start: None, end }
        })
    }

    /// All full dates in a line as (match start, match end, date), in line order.
    fn dates_in(&self, line: &str) -> Vec<(usize, usize, NaiveDate)> {
        let mut found = Vec::new();

        for caps in self.long_date.captures_iter(line) {
            let Some(whole) = caps.get(0) else { continue };
            let month = caps[1]
                .get(..3)
                .map(|prefix| prefix.to_lowercase())
                .and_then(|prefix| MONTH_NAMES.iter().position(|m| *m == prefix))
                .map(|idx| idx as u32 + 1);
            let day = caps[2].parse::<u32>().ok();
            let year = caps[3].parse::<i32>().ok();
            if let (Some(month), Some(day), Some(year)) = (month, day, year) {
                if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
                    found.push((whole.start(), whole.end(), date));
                }
            }
        }

        for caps in self.numeric_date.captures_iter(line) {
            let Some(whole) = caps.get(0) else { continue };
            let month = caps[1].parse::<u32>().ok();
            let day = caps[2].parse::<u32>().ok();
            let year = caps[3].parse::<i32>().ok().map(|y| if y < 100 { 2000 + y } else { y });
            if let (Some(month), Some(day), Some(year)) = (month, day, year) {
                if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
                    found.push((whole.start(), whole.end(), date));
                }
            }
        }

        found.sort_by_key(|(start, _, _)| *start);
        found
    }
}
