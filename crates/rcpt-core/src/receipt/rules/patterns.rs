//! Regex patterns for receipt text extraction.
//!
//! Cascades are stored as ordered `Vec<Regex>`; callers try them front to
//! back and every pattern captures its value in group 1.

use lazy_static::lazy_static;
use regex::Regex;

use super::vocabulary::{
    alternation, BUSINESS_REGISTRY, CURRENCY_UNITS, DATE_TIME, FISCAL_DOCUMENT, LEGAL_FORMS,
    RECEIPT_MARKERS, TILL, TOTAL,
};

/// Money amount with exactly two decimals, `.` or `,` separated.
const AMOUNT: &str = r"\d+[.,]\d{2}";

lazy_static! {
    // Merchant name shapes, tried against the whole line
    pub static ref STORE_NAME_PATTERNS: Vec<Regex> = vec![
        // Letters (any script), spaces and ampersands only
        Regex::new(r"^([\p{L}\s&]+)$").unwrap(),
        // Name followed by a fiscal / checkout / receipt marker
        Regex::new(&format!(
            r"(?i)^(.+?)(?:{})",
            alternation(&[FISCAL_DOCUMENT, &TILL[..1], RECEIPT_MARKERS])
        )).unwrap(),
        // Name followed by a tax identifier
        Regex::new(&format!(
            r"(?i)^(.+?)(?:{})",
            alternation(&[BUSINESS_REGISTRY, &["ИНН"]])
        )).unwrap(),
        // Name followed by a bare registry number
        Regex::new(r"^(.+?)\d{9,13}").unwrap(),
        // Name followed by a date or time label
        Regex::new(&format!(r"(?i)^(.+?)(?:{})", alternation(&[DATE_TIME]))).unwrap(),
    ];

    pub static ref LEGAL_FORM_PREFIX: Regex = Regex::new(&format!(
        r"(?i)^(?:{})\b-?\s*",
        alternation(&[LEGAL_FORMS])
    )).unwrap();

    pub static ref LEGAL_FORM_SUFFIX: Regex = Regex::new(&format!(
        r"(?i)\s*\b(?:{})$",
        alternation(&[LEGAL_FORMS])
    )).unwrap();

    pub static ref LEADING_DIGIT: Regex = Regex::new(r"^\d").unwrap();

    // Date shapes. The leading guard keeps a shape from starting inside a
    // longer digit run, so "2024-05-17" is not read as "24-05-17". Only the
    // two-digit-year shape is guarded at its end; the others accept a time
    // glued on by OCR, as in "17.05.202414:32".
    pub static ref DATE_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"(?:^|\D)(\d{1,2}[/.\-]\d{1,2}[/.\-]\d{4})").unwrap(),
        Regex::new(r"(?:^|\D)(\d{1,2}[/.\-]\d{1,2}[/.\-]\d{2})(?:\D|$)").unwrap(),
        Regex::new(r"(?:^|\D)(\d{4}[/.\-]\d{1,2}[/.\-]\d{1,2})").unwrap(),
        Regex::new(r"(?:^|\D)(\d{1,2}\.\d{1,2}\.\d{4})").unwrap(),
        Regex::new(r"(?:^|\D)(\d{1,2}/\d{1,2}/\d{4})").unwrap(),
        Regex::new(r"(?:^|\D)(\d{1,2}-\d{1,2}-\d{4})").unwrap(),
    ];

    // Total amount shapes
    pub static ref TOTAL_PATTERNS: Vec<Regex> = {
        let total = alternation(&[TOTAL, &["ОБЩО ЗА ПЛАЩАНЕ"]]);
        let units = alternation(&[CURRENCY_UNITS]);
        vec![
            // ОБЩО ЗА ПЛАЩАНЕ: 23.54
            Regex::new(&format!(r"(?i)(?:{total})\s*:*\s*({AMOUNT})")).unwrap(),
            // ТОТАЛ 23.54
            Regex::new(&format!(r"(?i)(?:{})\s*({AMOUNT})", alternation(&[TOTAL]))).unwrap(),
            // СУМА = 23.54
            Regex::new(&format!(
                r"(?i)(?:{})\s*=*\s*({AMOUNT})",
                alternation(&[&TOTAL[..4]])
            )).unwrap(),
            // = 23.54
            Regex::new(&format!(r"=\s*({AMOUNT})")).unwrap(),
            // 23.54 ЛВ
            Regex::new(&format!(r"(?i)({AMOUNT})\s*(?:{units})")).unwrap(),
            // trailing 23.54
            Regex::new(&format!(r"({AMOUNT})\s*$")).unwrap(),
        ]
    };

    // Item line shapes
    pub static ref ITEM_QTY_TIMES_PRICE: Regex = Regex::new(&format!(
        r"^(.+?)\s+(\d+(?:[.,]\d+)?)\s*[xхXХ]\s*({AMOUNT})\s*=\s*({AMOUNT})"
    )).unwrap();

    pub static ref ITEM_NAME_PRICE: Regex = Regex::new(&format!(
        r"(?i)^(.+?)\s+({AMOUNT})(?:\s*(?:{}))?$",
        alternation(&[CURRENCY_UNITS])
    )).unwrap();

    pub static ref ITEM_QTY_NAME_PRICE: Regex = Regex::new(&format!(
        r"^(\d{{1,3}})\s+(.+?)\s+({AMOUNT})$"
    )).unwrap();

    pub static ref ITEM_CODE_NAME_PRICE: Regex = Regex::new(&format!(
        r"^\d+\s+(.+?)\s+({AMOUNT})$"
    )).unwrap();

    // Product line heuristics
    pub static ref PRICE: Regex = Regex::new(AMOUNT).unwrap();

    pub static ref LETTER_RUN: Regex = Regex::new(r"\p{L}{3,}").unwrap();
}
