use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::borrow::Cow;
use std::sync::LazyLock;

use super::extract::cell_text;

static TABLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("table").expect("table selector"));
static HEADER_CELL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("th").expect("th selector"));
static ROW: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").expect("tr selector"));
static DATA_CELL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").expect("td selector"));
static DETACHED_BODY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)</table>\s*(<tbody[\s>].*?</tbody>)").expect("detached body regex"));

/// Moves a `<tbody>` written after its table's closing tag back inside the
/// table. Left as is, the parser drops its rows and keeps only their text.
pub fn reattach_detached_bodies(html: &str) -> Cow<'_, str> {
    DETACHED_BODY.replace_all(html, "${1}</table>")
}

/// Header texts a table must (and must not) carry to be picked up
#[derive(Debug, Clone, Copy)]
pub struct TableSignature<'s> {
    pub required: &'s [&'s str],
    pub excluded: &'s [&'s str],
}

impl<'s> TableSignature<'s> {
    pub const fn new(required: &'s [&'s str]) -> Self {
        Self {
            required,
            excluded: &[],
        }
    }

    pub const fn excluding(mut self, excluded: &'s [&'s str]) -> Self {
        self.excluded = excluded;
        self
    }

    /// Unordered subset match, case-insensitive, extra columns allowed
    pub fn matches(&self, headers: &[String]) -> bool {
        let has = |wanted: &&str| headers.iter().any(|h| h.eq_ignore_ascii_case(wanted));
        self.required.iter().all(has) && !self.excluded.iter().any(has)
    }
}

/// A table whose headers satisfied a signature, with its data rows resolved
#[derive(Debug, Clone)]
pub struct LocatedTable<'a> {
    pub element: ElementRef<'a>,
    pub headers: Vec<String>,
    rows: Vec<ElementRef<'a>>,
}

impl<'a> LocatedTable<'a> {
    /// Index of the first header matching any of the given names
    pub fn column(&self, names: &[&str]) -> Option<usize> {
        self.headers
            .iter()
            .position(|header| names.iter().any(|name| header.eq_ignore_ascii_case(name)))
    }

    pub fn rows(&self) -> &[ElementRef<'a>] {
        &self.rows
    }

    /// Cell texts of every data row
    pub fn row_cells(&self) -> impl Iterator<Item = Vec<ElementRef<'a>>> + '_ {
        self.rows.iter().map(|row| row_cells(*row))
    }
}

/// First table matching the signature
pub fn find_table<'a>(document: &'a Html, signature: &TableSignature<'_>) -> Option<LocatedTable<'a>> {
    find_tables(document, signature).next()
}

/// Every table matching the signature, in document order
pub fn find_tables<'a>(
    document: &'a Html,
    signature: &TableSignature<'_>,
) -> impl Iterator<Item = LocatedTable<'a>> {
    document.select(&TABLE).filter_map(move |table| {
        let (headers, header_from_first_row) = header_texts(table);
        if !signature.matches(&headers) {
            return None;
        }
        let rows = body_rows(table, header_from_first_row);
        Some(LocatedTable {
            element: table,
            headers,
            rows,
        })
    })
}

/// Header cell texts of a table. Tables without `<th>` use their first row.
fn header_texts(table: ElementRef<'_>) -> (Vec<String>, bool) {
    let headers: Vec<String> = table.select(&HEADER_CELL).map(cell_text).collect();
    if !headers.is_empty() {
        return (headers, false);
    }

    let first_row = table
        .select(&ROW)
        .next()
        .map(|row| row.select(&DATA_CELL).map(cell_text).collect())
        .unwrap_or_default();
    (first_row, true)
}

/// Rows carrying at least one `<td>`. Some pages close the header table and
/// put the body in a second table right after it.
fn body_rows(table: ElementRef<'_>, skip_first: bool) -> Vec<ElementRef<'_>> {
    let rows = data_rows(table, skip_first);
    if !rows.is_empty() {
        return rows;
    }

    table
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .next()
        .filter(|sibling| sibling.value().name() == "table")
        .map(|sibling| data_rows(sibling, false))
        .unwrap_or_default()
}

fn data_rows(container: ElementRef<'_>, skip_first: bool) -> Vec<ElementRef<'_>> {
    container
        .select(&ROW)
        .skip(usize::from(skip_first))
        .filter(|row| row.select(&DATA_CELL).next().is_some())
        .collect()
}

/// Direct `<td>`/`<th>` children of a row
pub fn row_cells(row: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|cell| matches!(cell.value().name(), "td" | "th"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const STANDINGS: TableSignature<'static> = TableSignature::new(&["GP", "W", "L"]);

    #[test]
    fn test_locator_skips_table_missing_a_required_header() {
        let html = Html::parse_document(
            r#"
            <table id="first"><tr><th>Team</th><th>GP</th><th>L</th></tr>
                <tr><td>Wrong</td><td>1</td><td>1</td></tr></table>
            <table id="second"><tr><th>L</th><th>Team</th><th>PIM</th><th>W</th><th>GP</th></tr>
                <tr><td>0</td><td>Right</td><td>4</td><td>3</td><td>3</td></tr></table>
            "#,
        );

        let table = find_table(&html, &STANDINGS).expect("second table matches");

        assert_eq!(table.element.value().attr("id"), Some("second"));
        assert_eq!(table.rows().len(), 1);
        assert_eq!(table.column(&["team"]), Some(1));
    }

    #[test]
    fn test_locator_yields_every_matching_table() {
        let html = Html::parse_document(
            r#"
            <table><thead><tr><th>GP</th><th>W</th><th>L</th></tr></thead>
                <tbody><tr><td>1</td><td>1</td><td>0</td></tr></tbody></table>
            <table><thead><tr><th>GP</th><th>W</th><th>L</th></tr></thead>
                <tbody><tr><td>2</td><td>0</td><td>2</td></tr>
                       <tr><td>2</td><td>1</td><td>1</td></tr></tbody></table>
            "#,
        );

        let tables: Vec<_> = find_tables(&html, &STANDINGS).collect();
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[1].rows().len(), 2);
    }

    #[test]
    fn test_excluded_header_rejects_table() {
        let skaters = TableSignature::new(&["GP", "G", "A", "PTS"]).excluding(&["W"]);
        let html = Html::parse_document(
            r#"<table><tr><th>GP</th><th>G</th><th>A</th><th>PTS</th><th>W</th></tr></table>"#,
        );

        assert!(find_table(&html, &skaters).is_none());
    }

    #[test]
    fn test_headers_from_first_row_when_no_th() {
        let html = Html::parse_document(
            r#"<table>
                <tr><td>Team</td><td>GP</td><td>W</td><td>L</td></tr>
                <tr><td>Bears</td><td>2</td><td>2</td><td>0</td></tr>
            </table>"#,
        );

        let table = find_table(&html, &STANDINGS).unwrap();
        let rows: Vec<_> = table.row_cells().collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(cell_text(rows[0][0]), "Bears");
    }

    #[test]
    fn test_rows_in_detached_tbody() {
        let page = r#"<body><h2>Standings</h2>
            <table><tr><th>Team</th><th>GP</th><th>W</th><th>L</th></tr></table>
            <tbody><tr><td>Ice Dogs</td><td>2</td><td>2</td><td>0</td></tr>
                   <tr><td>Polar Bears</td><td>2</td><td>0</td><td>2</td></tr></tbody>
            <p>Updated nightly</p></body>"#;

        let html = Html::parse_document(&reattach_detached_bodies(page));
        let table = find_table(&html, &STANDINGS).unwrap();
        let rows: Vec<_> = table.row_cells().collect();

        assert_eq!(rows.len(), 2);
        assert_eq!(cell_text(rows[0][0]), "Ice Dogs");
        assert_eq!(cell_text(rows[1][3]), "2");
    }

    #[test]
    fn test_rows_in_following_table() {
        let html = Html::parse_document(
            r#"<table><thead><tr><th>Team</th><th>GP</th><th>W</th><th>L</th></tr></thead></table>
               <table><tr><td>Ice Dogs</td><td>1</td><td>1</td><td>0</td></tr></table>"#,
        );

        let table = find_table(&html, &STANDINGS).unwrap();
        assert_eq!(table.rows().len(), 1);
    }

    #[test]
    fn test_reattach_leaves_regular_tables_alone() {
        let page = "<table><tbody><tr><td>1</td></tr></tbody></table><p>x</p>";
        assert!(matches!(reattach_detached_bodies(page), Cow::Borrowed(_)));
    }

    #[test]
    fn test_no_match_is_none() {
        let html = Html::parse_document("<p>No standings published yet</p>");
        assert!(find_table(&html, &STANDINGS).is_none());
    }
}
