use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::error::{ExtractionError, Result};
use crate::models::{Grade, PriceQuote, PriceTable, Unavailable};

static TABLE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("table#price_data").expect("Invalid price table selector")
});

static BODY_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("tbody").expect("Invalid table body selector")
});

static ROW_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("tr").expect("Invalid data row selector")
});

static PRICE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("span.price").expect("Invalid price span selector")
});

static CELL_SELECTORS: Lazy<Vec<(Grade, Selector)>> = Lazy::new(|| {
    Grade::ALL
        .into_iter()
        .map(|grade| {
            let selector = Selector::parse(&format!("td#{}", grade.cell_id()))
                .expect("Invalid price cell selector");
            (grade, selector)
        })
        .collect()
});

/// Read the current prices out of a pricing page.
///
/// Only the first row of the first `tbody` in `table#price_data` is used;
/// later rows and bodies hold history. A missing table or row fails the
/// whole parse, while a missing cell only marks that grade as not available.
pub fn parse_price_table(document: &Html) -> Result<PriceTable> {
    let table = document
        .select(&TABLE_SELECTOR)
        .next()
        .ok_or(ExtractionError::TableNotFound)?;

    let row = table
        .select(&BODY_SELECTOR)
        .next()
        .and_then(|body| body.select(&ROW_SELECTOR).next())
        .ok_or(ExtractionError::NoDataRow)?;

    Ok(PriceTable::from_fn(|grade| parse_grade_cell(row, grade)))
}

fn parse_grade_cell(row: ElementRef<'_>, grade: Grade) -> PriceQuote {
    let cell = CELL_SELECTORS
        .iter()
        .find(|(g, _)| *g == grade)
        .and_then(|(_, selector)| row.select(selector).next());

    let Some(cell) = cell else {
        debug!("No cell #{} for {}", grade.cell_id(), grade);
        return PriceQuote::NotAvailable(Unavailable::CellMissing);
    };

    let Some(price) = cell.select(&PRICE_SELECTOR).next() else {
        debug!("No span.price in cell #{} for {}", grade.cell_id(), grade);
        return PriceQuote::NotAvailable(Unavailable::PriceElementMissing);
    };

    price_quote_from_text(&price.text().collect::<String>())
}

fn price_quote_from_text(raw: &str) -> PriceQuote {
    let text = raw.trim();
    if text.is_empty() || text == "-" {
        PriceQuote::NotAvailable(Unavailable::NoListing)
    } else {
        PriceQuote::Listed(text.to_string())
    }
}
