// src/statement/models.rs
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

/// One dated, described, signed money movement recognized on a statement.
/// Positive amounts are deposits/credits, negative amounts withdrawals/debits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionRecord {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Amount", serialize_with = "serialize_amount")]
    pub amount: Decimal,
}

/// Writes an amount with exactly two fraction digits, e.g. `-12.34` or `56.00`.
pub fn format_amount(amount: &Decimal) -> String {
    let mut rounded = amount.round_dp(2);
    rounded.rescale(2);
    rounded.to_string()
}

fn serialize_amount<S: Serializer>(amount: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_amount(amount))
}

/// Direction of a money movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Flow {
    Credit,
    Debit,
}

impl Flow {
    pub fn apply(self, magnitude: Decimal) -> Decimal {
        match self {
            Flow::Credit => magnitude.abs(),
            Flow::Debit => -magnitude.abs(),
        }
    }
}

/// What a statement section says about the rows listed under it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionRole {
    /// Every row is a credit unless the amount carries its own sign.
    Credit,
    /// Every row is a debit unless the amount carries its own sign.
    Debit,
    /// Deposits and withdrawals share one table; the direction comes from the row itself.
    Mixed,
    /// Balance listings and summaries. Rows here are not transactions.
    Summary,
}

impl SectionRole {
    pub fn flow(self) -> Option<Flow> {
        match self {
            SectionRole::Credit => Some(Flow::Credit),
            SectionRole::Debit => Some(Flow::Debit),
            SectionRole::Mixed | SectionRole::Summary => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct StatementSection {
    pub name: &'static str,
    pub role: SectionRole,
}

/// Scanner position relative to the statement's section headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanState {
    #[default]
    AwaitingSection,
    InSection(StatementSection),
}

impl ScanState {
    pub fn section(&self) -> Option<StatementSection> {
        match self {
            ScanState::AwaitingSection => None,
            ScanState::InSection(section) => Some(*section),
        }
    }
}

/// Year to attach to month/day rows.
///
/// Statements that close in January list December rows from the previous year, so a hint
/// built from such a period remembers the closing month and rolls later months back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearHint {
    pub year: i32,
    pub closing_month: Option<u32>,
}

impl YearHint {
    pub fn fixed(year: i32) -> Self {
        Self { year, closing_month: None }
    }

    pub fn current() -> Self {
        Self::fixed(chrono::Local::now().year())
    }

    pub fn year_for(&self, month: u32) -> i32 {
        match self.closing_month {
            Some(closing) if month > closing => self.year - 1,
            _ => self.year,
        }
    }
}

/// Statement period found in the header text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatementPeriod {
    pub start: Option<NaiveDate>,
    pub end: NaiveDate,
}

impl StatementPeriod {
    pub fn year_hint(&self) -> YearHint {
        let closing_month = match self.start {
            Some(start) if start.year() < self.end.year() => Some(self.end.month()),
            _ => None,
        };
        YearHint { year: self.end.year(), closing_month }
    }
}

/// Extracted text of one statement, page order preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatementText {
    pages: Vec<String>,
}

impl StatementText {
    #[allow(dead_code)]
    pub fn from_pages(pages: Vec<String>) -> Self {
        Self { pages }
    }

    /// Splits text produced by a PDF extractor on form feeds, one page per chunk.
    /// Blank pages are kept so page numbers line up with the PDF.
    pub fn from_extracted(text: &str) -> Self {
        let pages = text.split('\u{000C}').map(str::to_string).collect();
        Self { pages }
    }

    /// The first page that carries any text.
    pub fn first_text_page(&self) -> Option<&str> {
        self.pages
            .iter()
            .map(String::as_str)
            .find(|page| !page.trim().is_empty())
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn is_blank(&self) -> bool {
        self.pages.iter().all(|page| page.trim().is_empty())
    }

    pub fn lines(&self) -> PageLines<'_> {
        PageLines { pages: &self.pages, page: 0, line: 0, current: None }
    }
}

/// A single line of statement text with its 1-based page and line numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLine<'a> {
    pub page: usize,
    pub line: usize,
    pub text: &'a str,
}

pub struct PageLines<'a> {
    pages: &'a [String],
    page: usize,
    line: usize,
    current: Option<std::str::Lines<'a>>,
}

impl<'a> Iterator for PageLines<'a> {
    type Item = PageLine<'a>;

    fn next(&mut self) -> Option<PageLine<'a>> {
        loop {
            if let Some(lines) = self.current.as_mut() {
                if let Some(text) = lines.next() {
                    self.line += 1;
                    return Some(PageLine { page: self.page, line: self.line, text });
                }
            }
            let next_page = self.pages.get(self.page)?;
            self.page += 1;
            self.line = 0;
            self.current = Some(next_page.lines());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn amounts_always_carry_two_fraction_digits() {
        assert_eq!(format_amount(&Decimal::from_str("-12.34").unwrap()), "-12.34");
        assert_eq!(format_amount(&Decimal::from(56)), "56.00");
        assert_eq!(format_amount(&Decimal::from_str("1234.5").unwrap()), "1234.50");
    }

    #[test]
    fn year_hint_rolls_back_across_year_end() {
        let period = StatementPeriod {
            start: NaiveDate::from_ymd_opt(2023, 12, 8),
            end: NaiveDate::from_ymd_opt(2024, 1, 7).unwrap(),
        };
        let hint = period.year_hint();
        assert_eq!(hint.year_for(12), 2023);
        assert_eq!(hint.year_for(1), 2024);

        let same_year = StatementPeriod {
            start: NaiveDate::from_ymd_opt(2024, 3, 1),
            end: NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
        };
        assert_eq!(same_year.year_hint(), YearHint::fixed(2024));
    }

    #[test]
    fn lines_are_numbered_per_page() {
        let text = StatementText::from_extracted("first\nsecond\u{000C}third\n");
        let lines: Vec<_> = text.lines().map(|l| (l.page, l.line, l.text)).collect();
        assert_eq!(lines, vec![(1, 1, "first"), (1, 2, "second"), (2, 1, "third")]);
        assert_eq!(text.page_count(), 2);
    }

    #[test]
    fn blank_pages_keep_their_page_number() {
        let text = StatementText::from_extracted("\u{000C}Checks Paid\n\u{000C}\u{000C}03/03 CHECK 7 50.00\n");
        let numbered: Vec<_> = text
            .lines()
            .filter(|l| !l.text.trim().is_empty())
            .map(|l| (l.page, l.text))
            .collect();
        assert_eq!(numbered, vec![(2, "Checks Paid"), (4, "03/03 CHECK 7 50.00")]);
        assert_eq!(text.first_text_page(), Some("Checks Paid\n"));
        assert!(!text.is_blank());
        assert!(StatementText::from_extracted("\u{000C} \n\u{000C}").is_blank());
    }
}
