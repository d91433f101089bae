use core_types::{Citation, CitationKind};
use regex::Regex;

use crate::domain::DomainError;

/// Canonical material names and the patterns that identify them anywhere in a document.
/// Acronyms are matched case-sensitively between non-alphanumeric boundaries.
pub const MATERIAL_PATTERNS: &[(&str, &str)] = &[
    ("PLA", r"(?:^|[^A-Za-z0-9])PLA(?:[^A-Za-z0-9]|$)|(?i)polylactic|ポリ乳酸"),
    ("PHA", r"(?:^|[^A-Za-z0-9])(?:PHA|PHBH)(?:[^A-Za-z0-9]|$)|(?i)polyhydroxyalkanoate"),
    ("PBS", r"(?:^|[^A-Za-z0-9])PBS(?:[^A-Za-z0-9]|$)|(?i)polybutylene succinate"),
    ("PBAT", r"(?:^|[^A-Za-z0-9])PBAT(?:[^A-Za-z0-9]|$)"),
    ("PEF", r"(?:^|[^A-Za-z0-9])PEF(?:[^A-Za-z0-9]|$)|(?i)polyethylene furanoate"),
    ("Bio-PE", r"(?i)bio[- ]?pe(?:[^a-z0-9]|$)|バイオPE|バイオポリエチレン"),
    (
        "Cellulose nanofiber",
        r"(?:^|[^A-Za-z0-9])CNF(?:[^A-Za-z0-9]|$)|(?i)cellulose nano ?fib(?:er|re)|セルロースナノファイバー",
    ),
    ("Chitosan", r"(?i)chitosan|キトサン"),
    ("Mycelium composite", r"(?i)mycelium|菌糸"),
    ("Seaweed-based film", r"(?i)seaweed|alginate|海藻"),
];

/// Reference-line shapes, tried in order. Each captures title, authors and year.
pub const CITATION_PATTERNS: &[&str] = &[
    r#"^["“「](.+?)["”」]\s*[(（]([^()（）]+?)[,，、]\s*(\d{4})\s*[)）]"#,
    r"^([^,，]+?)[,，]\s*([^,，]+?)[,，]\s*(\d{4})\b",
    r"^\[\d+\]\s*(.+?)\s+[-–]\s+(.+?)\s*\((\d{4})\)",
];

#[derive(Clone, Debug)]
pub struct MaterialRule {
    pub name: &'static str,
    pattern: Regex,
}

impl MaterialRule {
    pub fn matches(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

#[derive(Clone, Debug)]
pub struct CitationRule {
    pattern: Regex,
}

impl CitationRule {
    pub fn apply(&self, line: &str) -> Option<Citation> {
        let caps = self.pattern.captures(line)?;
        let title = clean_fragment(caps.get(1)?.as_str());
        if title.is_empty() {
            return None;
        }
        let authors = caps
            .get(2)
            .map(|m| clean_fragment(m.as_str()))
            .filter(|a| !a.is_empty());
        let year = caps.get(3).and_then(|m| m.as_str().parse::<u16>().ok());
        Some(Citation {
            kind: classify_kind(&title),
            title,
            authors,
            year,
            url: None,
        })
    }
}

pub fn compile_material_rules() -> Result<Vec<MaterialRule>, DomainError> {
    MATERIAL_PATTERNS
        .iter()
        .map(|&(name, pattern)| {
            Ok(MaterialRule {
                name,
                pattern: compile(pattern)?,
            })
        })
        .collect()
}

pub fn compile_citation_rules() -> Result<Vec<CitationRule>, DomainError> {
    CITATION_PATTERNS
        .iter()
        .map(|pattern| {
            Ok(CitationRule {
                pattern: compile(pattern)?,
            })
        })
        .collect()
}

pub(crate) fn compile(pattern: &str) -> Result<Regex, DomainError> {
    Regex::new(pattern).map_err(|e| DomainError::Internal(format!("bad pattern {pattern}: {e}")))
}

pub(crate) fn clean_fragment(raw: &str) -> String {
    raw.trim()
        .trim_matches(|c: char| matches!(c, '"' | '“' | '”' | '「' | '」' | '*' | '\''))
        .trim()
        .to_string()
}

pub fn classify_kind(title: &str) -> CitationKind {
    let lower = title.to_lowercase();
    if ["patent", "特許"].iter().any(|k| lower.contains(k)) {
        CitationKind::Patent
    } else if ["report", "white paper", "報告", "レポート"]
        .iter()
        .any(|k| lower.contains(k))
    {
        CitationKind::Report
    } else {
        CitationKind::Paper
    }
}
