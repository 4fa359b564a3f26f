//! Keyword tables shared by the receipt extractors.
//!
//! Words are stored upper-case; matching upper-cases the line and looks for
//! a plain substring, so `Касиер: 3` matches `КАСИЕР`.

/// Fiscal receipt document markers.
pub const FISCAL_DOCUMENT: &[&str] = &["ФИСКАЛЕН", "БОЛЕТ", "ЧЕК"];

/// Shorter receipt markers that only appear after a merchant name.
pub const RECEIPT_MARKERS: &[&str] = &["ФИСК", "КВИТАНЦИЯ"];

/// Till, cashier and operator lines.
pub const TILL: &[&str] = &["КАСА", "КАСИЕР", "ОПЕРАТОР"];

/// Date and time labels.
pub const DATE_TIME: &[&str] = &["ДАТА", "ЧАС", "ВРЕМЕ"];

/// Company registry identifiers.
pub const BUSINESS_REGISTRY: &[&str] = &["ЕИК", "БУЛСТАТ"];

/// Tax identifiers and the accountable-person label printed next to them.
pub const TAX_IDENTITY: &[&str] = &["ИНН", "ДДС", "МОЛ"];

/// Address and phone lines.
pub const CONTACT: &[&str] = &["АДРЕС", "ТЕЛ", "ТЕЛЕФОН"];

/// Fiscal memory and device lines.
pub const FISCAL_DEVICE: &[&str] = &["ФИСКАЛНА ПАМЕТ", "ФИСКАЛНО УСТРОЙСТВО"];

/// Total labels.
pub const TOTAL: &[&str] = &["ОБЩО", "ТОТАЛ", "СУМА", "ВСИЧКО", "ЗА ПЛАЩАНЕ", "КРАЙНА СУМА"];

/// Amount-due labels. A line carrying one of these most likely holds the total.
pub const AMOUNT_DUE: &[&str] = &["ЗА ПЛАЩАНЕ", "КРАЙНА СУМА", "ОБЩО ЗА ПЛАЩАНЕ", "ТОТАЛ", "ВСИЧКО"];

/// Subtotal labels.
pub const SUBTOTAL: &[&str] = &["МЕЖДИННА СУМА", "ПОДСУМА", "SUBTOTAL"];

/// Tax summary labels.
pub const TAX_SUMMARY: &[&str] = &["ДДС", "VAT", "ДАНЪК"];

/// Tendered amount and change.
pub const TENDER: &[&str] = &["ПОЛУЧЕНА СУМА", "ПЛАТЕНО", "РЕСТО"];

/// Fiscal footer lines.
pub const FISCAL_FOOTER: &[&str] = &["ФИСКАЛЕН", "КАСОВ", "БОЛЕТ"];

/// Currency units printed after amounts.
pub const CURRENCY_UNITS: &[&str] = &["ЛЕВА", "ЛВ", "LV"];

/// Legal-entity forms stripped from merchant names. Longer forms first.
pub const LEGAL_FORMS: &[&str] = &[
    "ЕООД",
    "ООД",
    "ЕАД",
    "АД",
    "СДРУЖЕНИЕ",
    "КООПЕРАЦИЯ",
    "EOOD",
    "OOD",
    "EAD",
];

/// A named union of keyword groups.
#[derive(Debug, Clone, Copy)]
pub struct Vocabulary {
    name: &'static str,
    groups: &'static [&'static [&'static str]],
}

impl Vocabulary {
    pub const fn new(name: &'static str, groups: &'static [&'static [&'static str]]) -> Self {
        Self { name, groups }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// All words of all groups, in declaration order.
    pub fn words(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.groups.iter().flat_map(|g| g.iter().copied())
    }

    /// Case-insensitive substring match against any word.
    pub fn matches(&self, line: &str) -> bool {
        let upper = line.to_uppercase();
        self.words().any(|w| upper.contains(w))
    }
}

/// Lines above the merchant name that can never be the name itself.
pub const STORE_HEADER: Vocabulary = Vocabulary::new(
    "store header",
    &[FISCAL_DOCUMENT, TILL, DATE_TIME, BUSINESS_REGISTRY],
);

/// Receipt header lines that precede the purchased items.
pub const ITEM_HEADER: Vocabulary = Vocabulary::new(
    "item header",
    &[TILL, BUSINESS_REGISTRY, TAX_IDENTITY, CONTACT, DATE_TIME, FISCAL_DEVICE],
);

/// Lines that close the list of purchased items.
pub const ITEM_FOOTER: Vocabulary = Vocabulary::new(
    "item footer",
    &[TOTAL, SUBTOTAL, TAX_SUMMARY, TENDER, FISCAL_FOOTER],
);

/// Lines worth checking first when looking for the total.
pub const PAYMENT: Vocabulary = Vocabulary::new("payment", &[AMOUNT_DUE]);

/// Build a regex alternation from keyword groups.
pub(crate) fn alternation(groups: &[&[&str]]) -> String {
    groups
        .iter()
        .flat_map(|g| g.iter())
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_case_insensitive() {
        assert!(ITEM_HEADER.matches("Касиер: Иван"));
        assert!(ITEM_HEADER.matches("ЕИК 123456789"));
        assert!(!ITEM_HEADER.matches("Мляко Верея 2.50"));
    }

    #[test]
    fn test_footer_matches_total_line() {
        assert!(ITEM_FOOTER.matches("ОБЩО 23.54"));
        assert!(ITEM_FOOTER.matches("Subtotal 10.00"));
        assert!(ITEM_FOOTER.matches("Ресто 0.46"));
    }

    #[test]
    fn test_payment_vocabulary() {
        assert!(PAYMENT.matches("Обща сума за плащане: 23.54"));
        assert!(!PAYMENT.matches("ОБЩО 23.54"));
    }

    #[test]
    fn test_vocabulary_names() {
        assert_eq!(STORE_HEADER.name(), "store header");
        assert_eq!(ITEM_FOOTER.name(), "item footer");
        assert_eq!(PAYMENT.words().collect::<Vec<_>>(), AMOUNT_DUE.to_vec());
    }

    #[test]
    fn test_alternation_escapes() {
        assert_eq!(alternation(&[&["A.B"], &["C"]]), r"A\.B|C");
    }
}
