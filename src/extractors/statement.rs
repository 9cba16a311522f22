// src/extractors/statement.rs
//! Transaction-line extraction for Wells Fargo statement text.
//!
//! The scanner walks the statement line by line, tracking the current section header.
//! Dated rows with a trailing amount become records. Wrapped description lines are glued
//! onto the record before them, and printed subtotals are checked against what was
//! extracted for their section.

// --- Imports ---
use crate::extractors::patterns::{LineKind, LinePatterns, RowFields};
use crate::extractors::period::PeriodDetector;
use crate::statement::models::{
    Flow, PageLine, PageLines, ScanState, SectionRole, StatementPeriod, StatementSection,
    StatementText, TransactionRecord, YearHint,
};
use crate::utils::error::{AmountParseError, DateParseError, ExtractError, LineError};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use std::collections::{HashMap, HashSet};
use std::str::FromStr;

// --- Constants ---
/// Subtotal differences up to this many cents are treated as rounding.
const RECONCILE_TOLERANCE_CENTS: i64 = 1;

// --- Data Structures ---

/// Why a non-blank line produced no record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum SkipReason {
    /// Page furniture: footers, balance lines, column headings.
    Noise,
    /// Nothing recognizable and no open record to continue.
    Unclassified,
    /// A row inside a balance or summary listing.
    SummaryRow,
    /// Looked like a transaction row but a field failed to parse.
    Invalid(#[serde(serialize_with = "serialize_display")] LineError),
}

fn serialize_display<S: Serializer>(err: &LineError, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(err)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedLine {
    pub page: usize,
    pub line: usize,
    pub text: String,
    pub reason: SkipReason,
}

/// Result of comparing a printed section subtotal with the extracted amounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionCheck {
    pub section: &'static str,
    pub printed: Decimal,
    pub extracted: Decimal,
    pub matched: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExtractionWarning {
    ReconciliationMismatch {
        section: &'static str,
        printed: Decimal,
        extracted: Decimal,
    },
}

impl std::fmt::Display for ExtractionWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractionWarning::ReconciliationMismatch { section, printed, extracted } => write!(
                f,
                "'{}' subtotal is {} but extracted rows sum to {}",
                section, printed, extracted
            ),
        }
    }
}

/// How each line of a statement was treated, for annotated debug dumps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    Blank,
    Header(&'static str),
    Subtotal(&'static str),
    Record,
    Continuation,
    Skipped(SkipReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracedLine {
    pub page: usize,
    pub line: usize,
    pub text: String,
    pub outcome: LineOutcome,
}

/// Bookkeeping gathered while scanning one statement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionReport {
    pub lines_scanned: usize,
    pub headers: usize,
    pub records: usize,
    pub continuations: usize,
    pub skipped: Vec<SkippedLine>,
    pub checks: Vec<SectionCheck>,
    pub warnings: Vec<ExtractionWarning>,
    #[serde(skip)]
    pub trace: Vec<TracedLine>,
}

impl ExtractionReport {
    pub fn skip_count(&self) -> usize {
        self.skipped.len()
    }

    /// Lines that looked like rows but failed date or amount parsing.
    pub fn invalid_count(&self) -> usize {
        self.skipped
            .iter()
            .filter(|s| matches!(s.reason, SkipReason::Invalid(_)))
            .count()
    }
}

/// Everything extracted from one statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementExtraction {
    pub year_hint: YearHint,
    pub records: Vec<TransactionRecord>,
    pub report: ExtractionReport,
}

// --- Field Parsing ---

/// An amount token with separators removed and its explicit sign, if it had one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedAmount {
    pub magnitude: Decimal,
    pub explicit: Option<Flow>,
}

/// Parses tokens like `1,234.56`, `-12.00`, `+3.10`, `45.67-` or `$9.99`.
pub fn parse_amount(token: &str) -> Result<ParsedAmount, AmountParseError> {
    let raw = token.trim();
    let mut body = raw;
    let mut explicit = None;

    if let Some(rest) = body.strip_suffix('-') {
        explicit = Some(Flow::Debit);
        body = rest;
    }
    if let Some(rest) = body.strip_prefix('-') {
        if explicit.is_some() {
            return Err(AmountParseError::ConflictingSign(raw.to_string()));
        }
        explicit = Some(Flow::Debit);
        body = rest;
    } else if let Some(rest) = body.strip_prefix('+') {
        if explicit.is_some() {
            return Err(AmountParseError::ConflictingSign(raw.to_string()));
        }
        explicit = Some(Flow::Credit);
        body = rest;
    }
    let body = body.strip_prefix('$').unwrap_or(body);

    let (integer, fraction) = match body.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (body, None),
    };
    if integer.contains(',') {
        let mut groups = integer.split(',');
        let first_ok = groups.next().map_or(false, |g| (1..=3).contains(&g.len()));
        if !first_ok || groups.any(|g| g.len() != 3) {
            return Err(AmountParseError::BadGrouping(raw.to_string()));
        }
    }

    let digits = integer.replace(',', "");
    let plain = match fraction {
        Some(f) => format!("{}.{}", digits, f),
        None => digits,
    };
    if plain.is_empty() || !plain.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return Err(AmountParseError::NonNumeric(raw.to_string()));
    }
    let magnitude =
        Decimal::from_str(&plain).map_err(|_| AmountParseError::NonNumeric(raw.to_string()))?;
    if magnitude.is_zero() {
        return Err(AmountParseError::Zero(raw.to_string()));
    }

    Ok(ParsedAmount { magnitude, explicit })
}

/// Combines a `MM/DD` token with an explicit row year or the statement year hint.
pub fn parse_month_day(
    token: &str,
    year_token: Option<&str>,
    hint: &YearHint,
) -> Result<NaiveDate, DateParseError> {
    let malformed = || DateParseError::Malformed(token.to_string());
    let (month, day) = token
        .trim()
        .split_once(['/', '-'])
        .ok_or_else(malformed)?;
    let month: u32 = month.parse().map_err(|_| malformed())?;
    let day: u32 = day.parse().map_err(|_| malformed())?;

    let year = match year_token {
        Some(y) => {
            let y: i32 = y.parse().map_err(|_| malformed())?;
            if y < 100 { 2000 + y } else { y }
        }
        None => hint.year_for(month),
    };

    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or(DateParseError::OutOfRange { month, day, year })
}

// --- Main Extractor Structure ---

/// Stateless extractor owning the compiled pattern set. Build it once and share it.
pub struct StatementLineExtractor {
    patterns: LinePatterns,
    periods: PeriodDetector,
}

impl StatementLineExtractor {
    pub fn new() -> Result<Self, ExtractError> {
        Ok(Self {
            patterns: LinePatterns::new()?,
            periods: PeriodDetector::new()?,
        })
    }

    pub fn detect_period(&self, text: &StatementText) -> Option<StatementPeriod> {
        self.periods.detect(text)
    }

    /// Year hint for a statement: the override if given, else the detected period,
    /// else the current year.
    pub fn year_hint(&self, text: &StatementText, year_override: Option<i32>) -> YearHint {
        if let Some(year) = year_override {
            return YearHint::fixed(year);
        }
        match self.detect_period(text) {
            Some(period) => period.year_hint(),
            None => {
                let fallback = YearHint::current();
                tracing::warn!(
                    "No statement period found in header text, assuming year {}",
                    fallback.year
                );
                fallback
            }
        }
    }

    /// Lazily yields the records of one statement. Each call starts a fresh scan.
    pub fn records<'a>(&'a self, text: &'a StatementText, year: YearHint) -> Records<'a> {
        Records {
            patterns: &self.patterns,
            lines: text.lines(),
            year,
            state: ScanState::AwaitingSection,
            page: None,
            pending: None,
            section_sums: HashMap::new(),
            warned: HashSet::new(),
            report: ExtractionReport::default(),
            tracing: false,
        }
    }

    /// Scans the whole statement, collecting records and the report.
    pub fn extract(&self, text: &StatementText, year: YearHint) -> StatementExtraction {
        self.collect(self.records(text, year), year)
    }

    /// Like [`extract`](Self::extract) but also records how every line was treated.
    pub fn extract_traced(&self, text: &StatementText, year: YearHint) -> StatementExtraction {
        self.collect(self.records(text, year).traced(), year)
    }

    fn collect(&self, mut records: Records<'_>, year_hint: YearHint) -> StatementExtraction {
        let collected: Vec<TransactionRecord> = records.by_ref().collect();
        let report = records.into_report();
        tracing::debug!(
            "Extracted {} records ({} skipped lines, {} warnings)",
            collected.len(),
            report.skip_count(),
            report.warnings.len()
        );
        StatementExtraction { year_hint, records: collected, report }
    }
}

/// Iterator over the records of one statement.
///
/// A record is held back until the next line shows it has no more continuation lines.
pub struct Records<'a> {
    patterns: &'a LinePatterns,
    lines: PageLines<'a>,
    year: YearHint,
    state: ScanState,
    page: Option<usize>,
    pending: Option<TransactionRecord>,
    section_sums: HashMap<&'static str, Decimal>,
    warned: HashSet<&'static str>,
    report: ExtractionReport,
    tracing: bool,
}

impl<'a> Records<'a> {
    pub fn traced(mut self) -> Self {
        self.tracing = true;
        self
    }

    #[allow(dead_code)]
    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Drains whatever is left and hands back the finished report.
    pub fn into_report(mut self) -> ExtractionReport {
        while self.next().is_some() {}
        self.report
    }

    fn step(&mut self, line: PageLine<'a>) -> Option<TransactionRecord> {
        // Descriptions never continue across a page break.
        let mut finished = None;
        if self.page != Some(line.page) {
            finished = self.pending.take();
            self.page = Some(line.page);
        }

        let text = line.text.trim();
        if text.is_empty() {
            self.trace(&line, LineOutcome::Blank);
            return finished;
        }
        self.report.lines_scanned += 1;

        match self.patterns.classify(text) {
            LineKind::Header(section) => {
                finished = finished.or_else(|| self.pending.take());
                tracing::debug!("Section header '{}' on page {}", section.name, line.page);
                self.state = ScanState::InSection(section);
                self.report.headers += 1;
                self.trace(&line, LineOutcome::Header(section.name));
            }
            LineKind::Subtotal { section, amount } => {
                finished = finished.or_else(|| self.pending.take());
                match parse_amount(amount) {
                    Ok(printed) => {
                        self.reconcile(section, printed.magnitude);
                        self.trace(&line, LineOutcome::Subtotal(section.name));
                    }
                    Err(e) => self.skip(&line, SkipReason::Invalid(e.into())),
                }
            }
            LineKind::Row(fields) => {
                finished = finished.or_else(|| self.pending.take());
                if self.state.section().map(|s| s.role) == Some(SectionRole::Summary) {
                    self.skip(&line, SkipReason::SummaryRow);
                } else {
                    match self.build_record(&fields) {
                        Ok(record) => {
                            self.account(&record);
                            self.trace(&line, LineOutcome::Record);
                            self.pending = Some(record);
                        }
                        Err(e) => {
                            tracing::debug!("Skipping row on page {} line {}: {}", line.page, line.line, e);
                            self.skip(&line, SkipReason::Invalid(e));
                        }
                    }
                }
            }
            LineKind::Noise => {
                finished = finished.or_else(|| self.pending.take());
                self.skip(&line, SkipReason::Noise);
            }
            LineKind::Continuation => {
                if let Some(open) = self.pending.as_mut() {
                    let extra = self.patterns.normalize_description(text);
                    open.description.push(' ');
                    open.description.push_str(&extra);
                    self.report.continuations += 1;
                    self.trace(&line, LineOutcome::Continuation);
                } else {
                    self.skip(&line, SkipReason::Unclassified);
                }
            }
            LineKind::Unclassified => {
                finished = finished.or_else(|| self.pending.take());
                self.skip(&line, SkipReason::Unclassified);
            }
        }

        finished
    }

    fn build_record(&self, fields: &RowFields<'_>) -> Result<TransactionRecord, LineError> {
        let date = parse_month_day(fields.date, fields.year, &self.year)?;
        let amount = parse_amount(fields.amount)?;
        let description = self.patterns.normalize_description(fields.description);

        // Explicit notation on the amount beats the section, which beats description keywords.
        let flow = amount
            .explicit
            .or_else(|| self.state.section().and_then(|s| s.role.flow()))
            .unwrap_or_else(|| self.patterns.keyword_flow(&description));

        Ok(TransactionRecord { date, description, amount: flow.apply(amount.magnitude) })
    }

    fn account(&mut self, record: &TransactionRecord) {
        self.report.records += 1;
        if let Some(section) = self.state.section() {
            *self.section_sums.entry(section.name).or_insert(Decimal::ZERO) += record.amount;
        }
    }

    fn reconcile(&mut self, section: StatementSection, printed: Decimal) {
        let extracted = self
            .section_sums
            .get(section.name)
            .copied()
            .unwrap_or(Decimal::ZERO);
        let matched = (extracted.abs() - printed.abs()).abs() <= Decimal::new(RECONCILE_TOLERANCE_CENTS, 2);

        self.report.checks.push(SectionCheck { section: section.name, printed, extracted, matched });
        if matched {
            tracing::debug!("'{}' subtotal {} reconciles", section.name, printed);
        } else if self.warned.insert(section.name) {
            let warning = ExtractionWarning::ReconciliationMismatch {
                section: section.name,
                printed,
                extracted,
            };
            tracing::warn!("{}", warning);
            self.report.warnings.push(warning);
        }
    }

    fn skip(&mut self, line: &PageLine<'_>, reason: SkipReason) {
        tracing::trace!("Skipped page {} line {}: '{}' ({:?})", line.page, line.line, line.text, reason);
        self.trace(line, LineOutcome::Skipped(reason.clone()));
        self.report.skipped.push(SkippedLine {
            page: line.page,
            line: line.line,
            text: line.text.trim().to_string(),
            reason,
        });
    }

    fn trace(&mut self, line: &PageLine<'_>, outcome: LineOutcome) {
        if self.tracing {
            self.report.trace.push(TracedLine {
                page: line.page,
                line: line.line,
                text: line.text.to_string(),
                outcome,
            });
        }
    }
}

impl Iterator for Records<'_> {
    type Item = TransactionRecord;

    fn next(&mut self) -> Option<TransactionRecord> {
        while let Some(line) = self.lines.next() {
            if let Some(record) = self.step(line) {
                return Some(record);
            }
        }
        self.pending.take()
    }
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> StatementLineExtractor {
        StatementLineExtractor::new().expect("extractor builds")
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn hint() -> YearHint {
        YearHint::fixed(2024)
    }

    fn extract(pages: &[&str]) -> StatementExtraction {
        let text = StatementText::from_pages(pages.iter().map(|p| p.to_string()).collect());
        extractor().extract(&text, hint())
    }

    #[test]
    fn sign_follows_section() {
        let debit = extract(&["Withdrawals and Other Debits\n03/14  AMAZON.COM PURCHASE  45.67\n"]);
        assert_eq!(debit.records.len(), 1);
        assert_eq!(debit.records[0].amount, dec("-45.67"));
        assert_eq!(debit.records[0].date, NaiveDate::from_ymd_opt(2024, 3, 14).unwrap());
        assert_eq!(debit.records[0].description, "AMAZON.COM PURCHASE");

        let credit = extract(&["Deposits and Other Credits\n03/14  AMAZON.COM PURCHASE  45.67\n"]);
        assert_eq!(credit.records[0].amount, dec("45.67"));
    }

    #[test]
    fn explicit_sign_beats_section() {
        let out = extract(&["Deposits and Other Credits\n03/14  AMAZON.COM PURCHASE  45.67-\n"]);
        assert_eq!(out.records[0].amount, dec("-45.67"));

        let out = extract(&["Checks Paid\n03/15  RETURNED ITEM  +12.00\n"]);
        assert_eq!(out.records[0].amount, dec("12.00"));
    }

    #[test]
    fn keywords_decide_without_a_section() {
        let out = extract(&["03/01 Mobile Deposit Ref 555 200.00\n03/02 Safeway #12 31.50\n"]);
        assert_eq!(out.records[0].amount, dec("200.00"));
        assert_eq!(out.records[1].amount, dec("-31.50"));
    }

    #[test]
    fn continuation_lines_join_with_a_single_space() {
        let out = extract(&[
            "Withdrawals and Other Debits\n03/14 PURCHASE AUTHORIZED ON 03/12   45.67\n   SQ *BLUE BOTTLE   OAKLAND CA\n03/15 ATM WITHDRAWAL 40.00\n",
        ]);
        assert_eq!(out.records.len(), 2);
        assert_eq!(
            out.records[0].description,
            "PURCHASE AUTHORIZED ON 03/12 SQ *BLUE BOTTLE OAKLAND CA"
        );
        assert_eq!(out.report.continuations, 1);
        assert_eq!(out.report.skip_count(), 0);
    }

    #[test]
    fn footer_is_skipped_once_and_never_raises() {
        let out = extract(&["Page 2 of 5\n"]);
        assert!(out.records.is_empty());
        assert_eq!(out.report.skip_count(), 1);
        assert_eq!(out.report.skipped[0].reason, SkipReason::Noise);
    }

    #[test]
    fn footer_closes_the_open_description() {
        let out = extract(&["Checks Paid\n03/14 CHECK 101 20.00\nPage 1 of 2\nREF 99\n"]);
        assert_eq!(out.records[0].description, "CHECK 101");
        assert_eq!(out.report.skip_count(), 2);
        assert_eq!(out.report.skipped[1].reason, SkipReason::Unclassified);
    }

    #[test]
    fn bad_fields_are_counted_not_fatal() {
        let out = extract(&[
            "Checks Paid\n13/45 CHECK 101 20.00\n03/02 CHECK 102 1,0000.00\n03/03 CHECK 103 0.00\n03/04 CHECK 104 5.00\n",
        ]);
        assert_eq!(out.records.len(), 1);
        assert_eq!(out.report.invalid_count(), 3);
        assert!(matches!(
            out.report.skipped[0].reason,
            SkipReason::Invalid(LineError::Date(DateParseError::OutOfRange { month: 13, .. }))
        ));
        assert!(matches!(
            out.report.skipped[1].reason,
            SkipReason::Invalid(LineError::Amount(AmountParseError::BadGrouping(_)))
        ));
        assert!(matches!(
            out.report.skipped[2].reason,
            SkipReason::Invalid(LineError::Amount(AmountParseError::Zero(_)))
        ));
    }

    #[test]
    fn dated_balance_lines_are_not_transactions() {
        let out = extract(&[
            "Transaction history\n03/01 Beginning balance 1,000.00\n03/02 Safeway 12.00\n03/31 Ending balance 988.00\n",
        ]);
        assert_eq!(out.records.len(), 1);
        assert_eq!(out.records[0].description, "Safeway");
        assert_eq!(out.records[0].amount, dec("-12.00"));
        assert_eq!(out.report.skip_count(), 2);
        assert!(out.report.skipped.iter().all(|s| s.reason == SkipReason::Noise));
    }

    #[test]
    fn row_named_like_a_section_keeps_the_current_section() {
        let out = extract(&[
            "Deposits and Other Credits\n03/02 Service fees refund 10.00\n03/03 PAYROLL 5.00\n",
        ]);
        assert_eq!(out.report.headers, 1);
        let amounts: Vec<_> = out.records.iter().map(|r| r.amount).collect();
        assert_eq!(amounts, vec![dec("10.00"), dec("5.00")]);
    }

    #[test]
    fn two_page_statement_keeps_source_order() {
        let out = extract(&[
            "Wells Fargo\nWithdrawals and Other Debits\n03/02 RENT PAYMENT 1,500.00\n03/05 PG&E BILL 80.25\nPage 1 of 2\n",
            "03/09 TRADER JOE'S 42.10 1,200.00\nPage 2 of 2\n",
        ]);
        let amounts: Vec<_> = out.records.iter().map(|r| r.amount).collect();
        assert_eq!(amounts, vec![dec("-1500.00"), dec("-80.25"), dec("-42.10")]);
        let days: Vec<_> = out.records.iter().map(|r| r.date.to_string()).collect();
        assert_eq!(days, vec!["2024-03-02", "2024-03-05", "2024-03-09"]);
    }

    #[test]
    fn extraction_is_repeatable() {
        let text = StatementText::from_pages(vec![
            "Deposits and Other Credits\n03/01 PAYROLL ACME 2,000.00\n03/15 PAYROLL ACME 2,000.00\n".to_string(),
        ]);
        let ex = extractor();
        let first: Vec<_> = ex.records(&text, hint()).collect();
        let second: Vec<_> = ex.records(&text, hint()).collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn matching_subtotal_emits_no_warning() {
        let out = extract(&[
            "Deposits and Other Credits\n03/01 PAYROLL 1,000.00\n03/15 PAYROLL 234.56\nTotal deposits and other credits $1,234.56\n",
        ]);
        assert!(out.report.warnings.is_empty());
        assert_eq!(out.report.checks.len(), 1);
        assert!(out.report.checks[0].matched);
    }

    #[test]
    fn subtotal_within_a_cent_is_rounding() {
        let out = extract(&["Checks Paid\n03/01 CHECK 1 10.00\nTotal checks paid 10.01\n"]);
        assert!(out.report.warnings.is_empty());
    }

    #[test]
    fn mismatched_subtotal_warns_once_per_section() {
        let out = extract(&[
            "Withdrawals and Other Debits\n03/01 RENT 1,000.00\nTotal withdrawals and other debits 1,100.00\nTotal withdrawals and other debits 1,100.00\n",
        ]);
        assert_eq!(out.report.checks.len(), 2);
        assert_eq!(
            out.report.warnings,
            vec![ExtractionWarning::ReconciliationMismatch {
                section: "Withdrawals and Other Debits",
                printed: dec("1100.00"),
                extracted: dec("-1000.00"),
            }]
        );
    }

    #[test]
    fn summary_sections_are_not_transactions() {
        let out = extract(&[
            "Daily ending balance\n03/01 1,000.00 03/02 950.00\nChecks Paid\n03/03 CHECK 7 50.00\n",
        ]);
        assert_eq!(out.records.len(), 1);
        assert_eq!(out.report.skipped[0].reason, SkipReason::SummaryRow);
    }

    #[test]
    fn scanner_state_follows_headers() {
        let ex = extractor();
        let text = StatementText::from_pages(vec!["Checks Paid\n03/03 CHECK 7 50.00\n".to_string()]);
        let mut records = ex.records(&text, hint());
        assert_eq!(records.state(), ScanState::AwaitingSection);
        assert!(records.next().is_some());
        assert!(matches!(
            records.state(),
            ScanState::InSection(StatementSection { name: "Checks Paid", role: SectionRole::Debit })
        ));
        assert!(records.next().is_none());
    }

    #[test]
    fn traced_extraction_labels_every_line() {
        let text = StatementText::from_pages(vec!["Checks Paid\n\n03/03 CHECK 7 50.00\nMEMO\nPage 1 of 1\n".to_string()]);
        let out = extractor().extract_traced(&text, hint());
        let outcomes: Vec<_> = out.report.trace.iter().map(|t| t.outcome.clone()).collect();
        assert_eq!(
            outcomes,
            vec![
                LineOutcome::Header("Checks Paid"),
                LineOutcome::Blank,
                LineOutcome::Record,
                LineOutcome::Continuation,
                LineOutcome::Skipped(SkipReason::Noise),
            ]
        );
    }

    #[test]
    fn amount_tokens() {
        assert_eq!(parse_amount("1,234.56").unwrap(), ParsedAmount { magnitude: dec("1234.56"), explicit: None });
        assert_eq!(parse_amount("45.67-").unwrap().explicit, Some(Flow::Debit));
        assert_eq!(parse_amount("-$9.99").unwrap().magnitude, dec("9.99"));
        assert_eq!(parse_amount("+3.10").unwrap().explicit, Some(Flow::Credit));
        assert!(matches!(parse_amount("12,34.00"), Err(AmountParseError::BadGrouping(_))));
        assert!(matches!(parse_amount("-1.00-"), Err(AmountParseError::ConflictingSign(_))));
        assert!(matches!(parse_amount("abc"), Err(AmountParseError::NonNumeric(_))));
        assert!(matches!(parse_amount("0.00"), Err(AmountParseError::Zero(_))));
    }

    #[test]
    fn month_day_tokens() {
        let rollover = YearHint { year: 2024, closing_month: Some(1) };
        assert_eq!(parse_month_day("12/28", None, &rollover).unwrap(), NaiveDate::from_ymd_opt(2023, 12, 28).unwrap());
        assert_eq!(parse_month_day("1-05", None, &rollover).unwrap(), NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        assert_eq!(parse_month_day("3/4", Some("22"), &rollover).unwrap(), NaiveDate::from_ymd_opt(2022, 3, 4).unwrap());
        assert!(matches!(
            parse_month_day("02/30", None, &hint()),
            Err(DateParseError::OutOfRange { month: 2, day: 30, year: 2024 })
        ));
        assert!(matches!(parse_month_day("0314", None, &hint()), Err(DateParseError::Malformed(_))));
    }
}
