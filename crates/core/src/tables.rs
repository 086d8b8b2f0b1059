use scraper::{ElementRef, Html, Selector};
use serde::Serialize;

/// Markup that could not be parsed into a document tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("malformed markup: {0}")]
    MalformedInput(String),
}

/// Structural landmarks identifying target tables.
///
/// The docs get reformatted from time to time, so tables are located by what
/// they contain instead of where they sit in the page. A table matches when
/// it has the required shape (at least `min_columns` columns somewhere and at
/// least one data row) and either its header row contains one of
/// `header_terms` (case-insensitive substring match) or its `class`
/// attribute carries `css_class`. Empty hints match any table of the
/// required shape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Landmark {
    pub header_terms: Vec<String>,
    pub css_class: Option<String>,
    pub min_columns: usize,
}

impl Landmark {
    /// Match tables whose header row contains any of the given terms.
    pub fn header_any(terms: &[&str]) -> Self {
        Landmark {
            header_terms: terms.iter().map(|t| t.to_string()).collect(),
            ..Landmark::default()
        }
    }

    /// Require a minimum column count on top of the other hints.
    pub fn min_columns(mut self, count: usize) -> Self {
        self.min_columns = count;
        self
    }

    fn matches(&self, table: &ElementRef, headers: &[String], rows: &[Vec<String>]) -> bool {
        let widest = headers
            .len()
            .max(rows.iter().map(|r| r.len()).max().unwrap_or(0));
        if widest < self.min_columns {
            return false;
        }

        let class_hit = self.css_class.as_deref().map(|wanted| {
            table
                .value()
                .attr("class")
                .is_some_and(|attr| {
                    attr.split_whitespace()
                        .any(|class| class.eq_ignore_ascii_case(wanted))
                })
        });

        let header_hit = if self.header_terms.is_empty() {
            None
        } else {
            let lowered: Vec<String> = headers.iter().map(|h| h.to_lowercase()).collect();
            Some(self.header_terms.iter().any(|term| {
                let term = term.to_lowercase();
                lowered.iter().any(|header| header.contains(&term))
            }))
        };

        match (class_hit, header_hit) {
            (None, None) => true,
            (class_hit, header_hit) => {
                class_hit.unwrap_or(false) || header_hit.unwrap_or(false)
            }
        }
    }
}

/// A table extracted from the document tree: the header row plus data rows
/// of whitespace-normalized cell text. Owning the text keeps every
/// downstream transformation pure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Parse raw markup into a navigable document tree.
///
/// The parser itself is lenient, so only input that cannot yield any tree at
/// all (empty or all-whitespace) is rejected.
pub fn parse_document(raw: &str) -> Result<Html, ParseError> {
    if raw.trim().is_empty() {
        return Err(ParseError::MalformedInput("empty document".to_string()));
    }
    Ok(Html::parse_document(raw))
}

/// Locate tables matching the landmark hint, in document order.
///
/// Returns an empty vector when nothing matches; the caller decides whether
/// "found nothing" is fatal. Tables without at least one data row are never
/// returned.
pub fn find_tables(document: &Html, hint: &Landmark) -> Vec<Table> {
    let table_selector = Selector::parse("table").unwrap();
    let row_selector = Selector::parse("tr").unwrap();
    let cell_selector = Selector::parse("th, td").unwrap();

    let mut tables = Vec::new();

    for table_el in document.select(&table_selector) {
        let all_rows: Vec<Vec<String>> = table_el
            .select(&row_selector)
            .map(|tr| tr.select(&cell_selector).map(cell_text).collect())
            .collect();

        // A lone row is a header with nothing under it.
        if all_rows.len() < 2 {
            continue;
        }

        let headers = all_rows[0].clone();
        let rows = all_rows[1..].to_vec();

        if hint.matches(&table_el, &headers, &rows) {
            tables.push(Table { headers, rows });
        }
    }

    tables
}

fn cell_text(cell: ElementRef) -> String {
    cell.text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
