use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use super::NOT_AVAILABLE;

/// Card condition tiers quoted on a pricing page, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Grade {
    Ungraded,
    Grade7,
    Grade8,
    Grade9,
    Grade9_5,
    Psa10,
}

impl Grade {
    pub const ALL: [Grade; 6] = [
        Grade::Ungraded,
        Grade::Grade7,
        Grade::Grade8,
        Grade::Grade9,
        Grade::Grade9_5,
        Grade::Psa10,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Grade::Ungraded => "Ungraded",
            Grade::Grade7 => "Grade 7",
            Grade::Grade8 => "Grade 8",
            Grade::Grade9 => "Grade 9",
            Grade::Grade9_5 => "Grade 9.5",
            Grade::Psa10 => "PSA 10",
        }
    }

    /// Id of the `<td>` holding this grade's price. The ids come from the
    /// site's generic product template, hence the unrelated-looking names.
    pub fn cell_id(&self) -> &'static str {
        match self {
            Grade::Ungraded => "used_price",
            Grade::Grade7 => "complete_price",
            Grade::Grade8 => "new_price",
            Grade::Grade9 => "graded_price",
            Grade::Grade9_5 => "box_only_price",
            Grade::Psa10 => "manual_only_price",
        }
    }

    /// Suffix used for the flattened per-grade database column.
    pub fn column_suffix(&self) -> &'static str {
        match self {
            Grade::Ungraded => "ungraded",
            Grade::Grade7 => "grade_7",
            Grade::Grade8 => "grade_8",
            Grade::Grade9 => "grade_9",
            Grade::Grade9_5 => "grade_9_5",
            Grade::Psa10 => "psa_10",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Why a grade has no usable price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unavailable {
    /// The cell exists but its price text is empty or a lone dash.
    NoListing,
    /// No `<td>` with the grade's id in the data row.
    CellMissing,
    /// The cell exists but has no `span.price` inside it.
    PriceElementMissing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriceQuote {
    /// Price text exactly as the page shows it, e.g. `$12.50`.
    Listed(String),
    NotAvailable(Unavailable),
}

impl PriceQuote {
    pub fn as_listed(&self) -> Option<&str> {
        match self {
            PriceQuote::Listed(price) => Some(price),
            PriceQuote::NotAvailable(_) => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, PriceQuote::Listed(_))
    }
}

impl fmt::Display for PriceQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceQuote::Listed(price) => f.write_str(price),
            PriceQuote::NotAvailable(_) => f.write_str(NOT_AVAILABLE),
        }
    }
}

impl Serialize for PriceQuote {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One quote per grade. Every grade is always present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceTable {
    quotes: BTreeMap<Grade, PriceQuote>,
}

impl PriceTable {
    /// Builds a table from a per-grade lookup, so no grade can be left out.
    pub fn from_fn(mut quote_for: impl FnMut(Grade) -> PriceQuote) -> Self {
        let quotes = Grade::ALL
            .into_iter()
            .map(|grade| (grade, quote_for(grade)))
            .collect();
        Self { quotes }
    }

    pub fn get(&self, grade: Grade) -> &PriceQuote {
        // from_fn fills every grade
        &self.quotes[&grade]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Grade, &PriceQuote)> {
        self.quotes.iter().map(|(grade, quote)| (*grade, quote))
    }

    pub fn listed_count(&self) -> usize {
        self.quotes.values().filter(|quote| quote.is_available()).count()
    }
}

impl Serialize for PriceTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.quotes.len()))?;
        for (grade, quote) in &self.quotes {
            map.serialize_entry(grade.label(), quote)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn cell_ids_are_distinct() {
        let mut ids: Vec<_> = Grade::ALL.iter().map(|grade| grade.cell_id()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), Grade::ALL.len());
    }

    #[test]
    fn table_holds_every_grade() {
        let table = PriceTable::from_fn(|_| PriceQuote::NotAvailable(Unavailable::CellMissing));
        assert_eq!(table.iter().count(), Grade::ALL.len());
        assert_eq!(table.listed_count(), 0);
    }

    #[test]
    fn serializes_labels_in_grade_order_with_sentinel() {
        let table = PriceTable::from_fn(|grade| match grade {
            Grade::Ungraded => PriceQuote::Listed("$1.00".to_string()),
            Grade::Psa10 => PriceQuote::NotAvailable(Unavailable::PriceElementMissing),
            _ => PriceQuote::NotAvailable(Unavailable::NoListing),
        });

        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(
            json,
            r#"{"Ungraded":"$1.00","Grade 7":"N/A","Grade 8":"N/A","Grade 9":"N/A","Grade 9.5":"N/A","PSA 10":"N/A"}"#
        );
    }
}
