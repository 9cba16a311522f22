// src/extractors/patterns.rs

// --- Imports ---
use crate::statement::models::{Flow, SectionRole, StatementSection};
use crate::utils::error::ExtractError;
use regex::Regex;

// --- Section Vocabulary ---
// Header phrases as they appear in Wells Fargo checking and savings statements.
// Order matters: the first entry whose phrase starts the line wins.
struct SectionEntry {
    name: &'static str,
    role: SectionRole,
    phrases: &'static [&'static str],
}

const SECTION_VOCABULARY: &[SectionEntry] = &[
    SectionEntry {
        name: "Deposits and Other Credits",
        role: SectionRole::Credit,
        phrases: &["deposits and other credits", "deposits/additions", "deposits and additions"],
    },
    SectionEntry {
        name: "Electronic Deposits",
        role: SectionRole::Credit,
        phrases: &["electronic deposits/bank credits", "electronic deposits"],
    },
    SectionEntry {
        name: "Other Credits",
        role: SectionRole::Credit,
        phrases: &["other credits"],
    },
    SectionEntry {
        name: "Withdrawals and Other Debits",
        role: SectionRole::Debit,
        phrases: &[
            "withdrawals and other debits",
            "withdrawals/subtractions",
            "withdrawals and subtractions",
        ],
    },
    SectionEntry {
        name: "Electronic Withdrawals",
        role: SectionRole::Debit,
        phrases: &["electronic withdrawals/bank debits", "electronic withdrawals"],
    },
    SectionEntry {
        name: "ATM & Debit Card Withdrawals",
        role: SectionRole::Debit,
        phrases: &["atm & debit card withdrawals", "atm and debit card withdrawals"],
    },
    SectionEntry {
        name: "Other Withdrawals",
        role: SectionRole::Debit,
        phrases: &["other withdrawals", "other debits"],
    },
    SectionEntry {
        name: "Checks Paid",
        role: SectionRole::Debit,
        phrases: &["checks paid"],
    },
    SectionEntry {
        name: "Service Fees",
        role: SectionRole::Debit,
        phrases: &["service fees"],
    },
    SectionEntry {
        name: "Transaction History",
        role: SectionRole::Mixed,
        phrases: &["transaction history"],
    },
    SectionEntry {
        name: "Daily Ending Balance",
        role: SectionRole::Summary,
        phrases: &["daily ending balance", "ending daily balance"],
    },
    SectionEntry {
        name: "Account Summary",
        role: SectionRole::Summary,
        phrases: &["activity summary", "account summary"],
    },
];

// Description words that mark a credit when neither a section nor a sign decides it.
const CREDIT_KEYWORDS: &[&str] = &["deposit", "credit", "refund", "transfer in"];

// --- Raw Patterns ---
const DATE_TOKEN: &str = r"\d{1,2}[/-]\d{1,2}";
const AMOUNT_TOKEN: &str = r"[-+]?\$?\d[\d,]*\.\d{2}-?";

/// Lines that carry statement furniture rather than transactions.
const NOISE_PATTERNS: &[&str] = &[
    r"(?i)^page\s+\d+\s+of\s+\d+\b",
    r"(?i)^\(?continued\)?$",
    r"(?i)\bcontinued\s+on\s+next\s+page\b",
    r"(?i)^totals?\s+\$?\d[\d,]*\.\d{2}",
    r"(?i)^date\b.*\bdescription\b",
    r"(?i)^(?:sheet\s+seq|account\s+number|statement\s+period)\b",
];

/// Opening and closing balance lines, wherever the phrase sits on the line.
const BALANCE_PATTERN: &str = r"(?i)\b(?:beginning|ending)\s+balance\b";

// --- Data Structures ---

/// Pieces of a transaction-row line, still as raw text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowFields<'t> {
    pub date: &'t str,
    pub year: Option<&'t str>,
    pub description: &'t str,
    pub amount: &'t str,
}

/// First-pass classification of a single trimmed line, before scanner state is considered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'t> {
    Header(StatementSection),
    Subtotal { section: StatementSection, amount: &'t str },
    Row(RowFields<'t>),
    Noise,
    /// No leading date and no trailing amount: may continue the previous description.
    Continuation,
    Unclassified,
}

/// The fixed pattern set of the extractor, compiled once.
pub struct LinePatterns {
    headers: Vec<(Regex, StatementSection)>,
    subtotal: Regex,
    row: Regex,
    balance: Regex,
    leading_date: Regex,
    trailing_amount: Regex,
    noise: Vec<Regex>,
    whitespace: Regex,
}

fn compile(pattern: &str) -> Result<Regex, ExtractError> {
    Regex::new(pattern)
        .map_err(|e| ExtractError::RegexError(format!("Invalid pattern '{}': {}", pattern, e)))
}

/// Turns a vocabulary phrase into a pattern tolerant of irregular spacing.
fn phrase_pattern(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+")
}

impl LinePatterns {
    pub fn new() -> Result<Self, ExtractError> {
        let mut headers = Vec::with_capacity(SECTION_VOCABULARY.len());
        for entry in SECTION_VOCABULARY {
            let alternatives = entry
                .phrases
                .iter()
                .map(|p| phrase_pattern(p))
                .collect::<Vec<_>>()
                .join("|");
            // Nothing may follow the phrase but a colon or "(continued)".
            let pattern = format!(r"(?i)^(?:{alternatives})\s*:?(?:\s*\(continued\))?$");
            let section = StatementSection { name: entry.name, role: entry.role };
            headers.push((compile(&pattern)?, section));
        }

        let subtotal = compile(&format!(
            r"(?i)^total\s+(?P<label>.+?)\s*:?\s+(?P<amount>{AMOUNT_TOKEN})$"
        ))?;
        let row = compile(&format!(
            r"^(?P<date>{DATE_TOKEN})(?:[/-](?P<year>\d{{4}}|\d{{2}}))?\s+(?P<desc>.*?\S)\s+(?P<amount>{AMOUNT_TOKEN})(?:\s+{AMOUNT_TOKEN})?$"
        ))?;
        let balance = compile(BALANCE_PATTERN)?;
        let leading_date = compile(&format!(r"^{DATE_TOKEN}\b"))?;
        let trailing_amount = compile(&format!(r"(?:^|\s){AMOUNT_TOKEN}$"))?;
        let noise = NOISE_PATTERNS
            .iter()
            .map(|p| compile(p))
            .collect::<Result<Vec<_>, _>>()?;
        let whitespace = compile(r"\s+")?;

        Ok(Self { headers, subtotal, row, balance, leading_date, trailing_amount, noise, whitespace })
    }

    /// Classifies a line that has already been trimmed.
    /// Headers are tried first, so a line that fits both header and row shapes is a header.
    /// Balance lines are noise even when they carry a date and an amount.
    pub fn classify<'t>(&self, line: &'t str) -> LineKind<'t> {
        if let Some(section) = self.header(line) {
            return LineKind::Header(section);
        }

        if let Some(caps) = self.subtotal.captures(line) {
            let label = caps.name("label").map_or("", |m| m.as_str());
            if let (Some(section), Some(amount)) = (self.header(label), caps.name("amount")) {
                return LineKind::Subtotal { section, amount: amount.as_str() };
            }
            return LineKind::Noise;
        }

        if self.balance.is_match(line) {
            return LineKind::Noise;
        }

        if let Some(caps) = self.row.captures(line) {
            if let (Some(date), Some(desc), Some(amount)) =
                (caps.name("date"), caps.name("desc"), caps.name("amount"))
            {
                return LineKind::Row(RowFields {
                    date: date.as_str(),
                    year: caps.name("year").map(|m| m.as_str()),
                    description: desc.as_str(),
                    amount: amount.as_str(),
                });
            }
        }

        if self.noise.iter().any(|re| re.is_match(line)) {
            return LineKind::Noise;
        }

        if self.leading_date.is_match(line) || self.trailing_amount.is_match(line) {
            return LineKind::Unclassified;
        }

        LineKind::Continuation
    }

    fn header(&self, text: &str) -> Option<StatementSection> {
        self.headers
            .iter()
            .find(|(re, _)| re.is_match(text))
            .map(|(_, section)| *section)
    }

    /// Collapses runs of whitespace to single spaces.
    pub fn normalize_description(&self, text: &str) -> String {
        self.whitespace.replace_all(text.trim(), " ").into_owned()
    }

    /// Direction guessed from the description alone, used when no section or sign decides it.
    pub fn keyword_flow(&self, description: &str) -> Flow {
        let lower = description.to_lowercase();
        if CREDIT_KEYWORDS.iter().any(|k| lower.contains(k)) {
            Flow::Credit
        } else {
            Flow::Debit
        }
    }
}
