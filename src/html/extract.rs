use chrono::NaiveDate;
use regex::Regex;
use scraper::node::{Element, Node};
use scraper::{ElementRef, Selector};
use std::sync::LazyLock;

static IMAGE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("img").expect("img selector"));

// Team logos live in a `logos/` directory or carry a `_logo` suffix
static LOGO_DIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|/)(?:team[-_]?)?logos?/(?:[^/?#]+/)*([^/?#]+)\.(?:png|jpe?g|gif|svg|webp)(?:[?#].*)?$")
        .expect("logo directory regex")
});
static LOGO_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|/)([^/?#]+?)[-_]logo\.(?:png|jpe?g|gif|svg|webp)(?:[?#].*)?$").expect("logo suffix regex")
});
static PARENTHETICAL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\([^)]*\)").expect("parenthetical regex"));
static CAPTAINCY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s*\(\s*([CA])\s*\)\s*$").expect("captaincy regex"));

const DATE_FORMATS: [&str; 5] = ["%Y-%m-%d", "%B %d, %Y", "%b %d, %Y", "%A, %B %d, %Y", "%m/%d/%Y"];

const BLOCK_ELEMENTS: [&str; 18] = [
    "address", "article", "br", "dd", "div", "dt", "h1", "h2", "h3", "h4", "h5", "h6", "li", "p", "section",
    "table", "tr", "ul",
];

/// Trimmed text of a cell with inner whitespace collapsed
pub fn cell_text(cell: ElementRef<'_>) -> String {
    collapse_whitespace(&cell.text().collect::<String>())
}

pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parses a count cell ("12", "1,024"); anything else counts as zero
pub fn parse_count(text: &str) -> u32 {
    text.trim().replace(',', "").parse().unwrap_or(0)
}

/// Text of an element with a line break before every block-level element
pub fn block_text(element: ElementRef<'_>) -> String {
    let mut out = String::new();
    for node in element.descendants() {
        match node.value() {
            Node::Element(el) if BLOCK_ELEMENTS.contains(&el.name()) => out.push('\n'),
            Node::Text(text) => {
                let hidden = node
                    .parent()
                    .and_then(|parent| parent.value().as_element().map(|el| matches!(el.name(), "script" | "style")))
                    .unwrap_or(false);
                if !hidden {
                    out.push_str(text);
                }
            }
            _ => {}
        }
    }
    out
}

// --- Team attribution ---

/// Team owning a stats or roster table, taken from the nearest logo image
/// before it. Empty when no logo precedes the table.
pub fn team_from_logo(table: ElementRef<'_>) -> String {
    let mut anchor = Some(*table);

    // The table may sit inside a wrapper div; look a few levels up
    for _ in 0..3 {
        let Some(node) = anchor else { break };
        for sibling in node.prev_siblings().filter_map(ElementRef::wrap) {
            if let Some(team) = logo_in(sibling) {
                return team;
            }
        }
        anchor = node
            .parent()
            .filter(|parent| parent.value().as_element().is_some_and(|el| !matches!(el.name(), "body" | "html")));
    }

    String::new()
}

fn logo_in(element: ElementRef<'_>) -> Option<String> {
    if element.value().name() == "img" {
        return element.value().attr("src").and_then(team_name_from_logo_src);
    }

    let images: Vec<_> = element.select(&IMAGE).collect();
    images
        .into_iter()
        .rev()
        .find_map(|img| img.value().attr("src").and_then(team_name_from_logo_src))
}

/// Derives a team name from a logo path: `/img/logos/Ice_Dogs_(2024).png` → `Ice Dogs`
pub fn team_name_from_logo_src(src: &str) -> Option<String> {
    let stem = LOGO_DIR
        .captures(src)
        .or_else(|| LOGO_SUFFIX.captures(src))?
        .get(1)?
        .as_str();

    let decoded = urlencoding::decode(stem).map(|s| s.into_owned()).unwrap_or_else(|_| stem.to_string());
    let spaced = decoded.replace(['_', '-', '+'], " ");
    let name = collapse_whitespace(&PARENTHETICAL.replace_all(&spaced, " "));

    (!name.is_empty()).then_some(name)
}

// --- Captaincy markers ---

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Captaincy {
    pub name: String,
    pub is_captain: bool,
    pub is_assistant: bool,
}

#[derive(Clone, Copy, PartialEq)]
enum Marker {
    Captain,
    Assistant,
}

fn marker_kind(element: &Element) -> Option<Marker> {
    let mut kind = None;
    for class in element.classes() {
        let class = class.to_lowercase();
        if class.contains("assistant") || class.contains("alternate") {
            return Some(Marker::Assistant);
        }
        if class.contains("captain") {
            kind = Some(Marker::Captain);
        }
    }
    kind
}

/// Splits a player name cell into the display name and its `(C)`/`(A)` markers,
/// whether written as text or as marker elements
pub fn captaincy_from_cell(cell: ElementRef<'_>) -> Captaincy {
    let mut text = String::new();
    let mut is_captain = false;
    let mut is_assistant = false;

    for node in cell.descendants() {
        match node.value() {
            Node::Element(el) => match marker_kind(el) {
                Some(Marker::Captain) => is_captain = true,
                Some(Marker::Assistant) => is_assistant = true,
                None => {}
            },
            Node::Text(fragment) => {
                let in_marker = node
                    .ancestors()
                    .take_while(|ancestor| ancestor.id() != cell.id())
                    .any(|ancestor| ancestor.value().as_element().and_then(marker_kind).is_some());
                if !in_marker {
                    text.push_str(fragment);
                }
            }
            _ => {}
        }
    }

    let mut captaincy = split_captaincy(&text);
    captaincy.is_captain |= is_captain;
    captaincy.is_assistant |= is_assistant;
    captaincy
}

/// Strips trailing `(C)`/`(A)` tokens from a name
pub fn split_captaincy(raw: &str) -> Captaincy {
    let mut name = collapse_whitespace(raw);
    let mut is_captain = false;
    let mut is_assistant = false;

    while let Some(captures) = CAPTAINCY.captures(&name) {
        match captures[1].to_ascii_uppercase().as_str() {
            "C" => is_captain = true,
            _ => is_assistant = true,
        }
        let start = captures.get(0).map_or(name.len(), |m| m.start());
        name.truncate(start);
    }

    Captaincy {
        name: name.trim().to_string(),
        is_captain,
        is_assistant,
    }
}

// --- Dates ---

/// Normalizes an upstream date to `YYYY-MM-DD`. Only calendar components are
/// read, so the host timezone never shifts the day.
pub fn normalize_date(raw: &str) -> Option<String> {
    let text = collapse_whitespace(raw);
    if text.is_empty() {
        return None;
    }

    // ISO dates may carry a time part
    if let Some(prefix) = text.get(..10) {
        if let Ok(date) = NaiveDate::parse_from_str(prefix, "%Y-%m-%d") {
            return Some(date.format("%Y-%m-%d").to_string());
        }
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(&text, format).ok())
        .map(|date| date.format("%Y-%m-%d").to_string())
}
