use std::collections::HashSet;

use core_types::{Citation, CitationKind, Confidence, ExternalFinding, ResearchReport};
use log::debug;
use regex::Regex;

use crate::capability::rules::{
    CitationRule, MaterialRule, clean_fragment, classify_kind, compile, compile_citation_rules,
    compile_material_rules,
};
use crate::domain::DomainError;

pub const SECTION_SOURCE_LABEL: &str = "External Research";
pub const PATTERN_SOURCE_LABEL: &str = "Pattern Match";

/// Longer numbered lines are list items, not headers.
const MAX_HEADER_CHARS: usize = 48;
const MIN_DOMAIN_TOKEN_CHARS: usize = 3;
const COUNTRY_SECOND_LEVEL: &[&str] = &["co", "go", "ac", "or", "ne", "com", "org", "gov", "edu"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SectionKind {
    Recommended,
    Trends,
    Considerations,
    Citations,
}

impl SectionKind {
    /// Keyword lists are checked in this order; the first hit decides.
    const KEYWORDS: [(SectionKind, &'static [&'static str]); 4] = [
        (
            SectionKind::Citations,
            &["参考", "引用", "出典", "citation", "reference", "sources", "bibliography"],
        ),
        (SectionKind::Trends, &["トレンド", "trend", "動向"]),
        (
            SectionKind::Considerations,
            &["注意", "考慮", "consideration", "課題", "challenge", "caveat"],
        ),
        (
            SectionKind::Recommended,
            &["推奨", "recommend", "候補", "candidate"],
        ),
    ];

    pub fn classify(title: &str) -> Option<SectionKind> {
        let lower = title.to_lowercase();
        Self::KEYWORDS
            .iter()
            .find(|(_, words)| words.iter().any(|w| lower.contains(w)))
            .map(|(kind, _)| *kind)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Section {
    pub kind: SectionKind,
    pub body: String,
}

/// Best-effort miner for free-form research answers. Never fails once compiled.
#[derive(Clone, Debug)]
pub struct ResearchParser {
    header: Regex,
    material_marker: Regex,
    confidence: Regex,
    inline_source: Regex,
    bullet: Regex,
    list_prefix: Regex,
    url: Regex,
    citation_rules: Vec<CitationRule>,
    material_rules: Vec<MaterialRule>,
}

impl ResearchParser {
    pub fn compile() -> Result<Self, DomainError> {
        Ok(Self {
            header: compile(r"^\s*(?:#{1,6}\s*)?\**\s*(\d{1,2})\s*[.)．]\s*(.+?)\s*$")?,
            material_marker: compile(r"(?i)(?:材料名|material(?:\s*name)?)\s*\**\s*[:：]")?,
            confidence: compile(
                r"(?i)(?:信頼度|confidence)\s*\**\s*[:：]?\s*\**\s*(high|medium|low|高|中|低)",
            )?,
            inline_source: compile(r"(?i)(?:source|出典)\s*\**\s*[:：]\s*(.+)")?,
            bullet: compile(r"^\s*(?:[-*•]\s+|・\s*)(.+?)\s*$")?,
            list_prefix: compile(r"^\s*(?:[-*•・]\s*|\d+[.)]\s+)")?,
            url: compile(r#"https?://[^\s<>()\[\]"'、。）」]+"#)?,
            citation_rules: compile_citation_rules()?,
            material_rules: compile_material_rules()?,
        })
    }

    pub fn parse(&self, text: &str) -> ResearchReport {
        let mut report = ResearchReport {
            raw_text: text.to_string(),
            ..ResearchReport::default()
        };

        for section in self.sections(text) {
            match section.kind {
                SectionKind::Recommended => {
                    for finding in self.parse_findings(&section.body) {
                        for citation in &finding.citations {
                            push_citation(&mut report.citations, citation.clone());
                        }
                        if !report.findings.iter().any(|f| f.name == finding.name) {
                            report.findings.push(finding);
                        }
                    }
                }
                SectionKind::Trends => report.trends.extend(self.bullets(&section.body)),
                SectionKind::Considerations => {
                    report.considerations.extend(self.bullets(&section.body))
                }
                SectionKind::Citations => {
                    for citation in self.parse_citation_lines(&section.body) {
                        push_citation(&mut report.citations, citation);
                    }
                }
            }
        }

        for finding in self.rule_findings(text) {
            if !report.findings.iter().any(|f| f.name == finding.name) {
                report.findings.push(finding);
            }
        }
        self.attach_urls(text, &mut report.citations);

        debug!(
            "research text parsed: {} findings, {} citations, {} trends, {} considerations",
            report.findings.len(),
            report.citations.len(),
            report.trends.len(),
            report.considerations.len()
        );
        report
    }

    /// Splits on numbered headers whose title names a known section. Text before the
    /// first such header, and under unknown headers, belongs to no section.
    pub fn sections(&self, text: &str) -> Vec<Section> {
        let mut out: Vec<Section> = Vec::new();
        let mut current: Option<Section> = None;
        for line in text.lines() {
            if let Some(kind) = self.header_kind(line) {
                out.extend(current.take());
                current = Some(Section {
                    kind,
                    body: String::new(),
                });
                continue;
            }
            if let Some(section) = current.as_mut() {
                section.body.push_str(line);
                section.body.push('\n');
            }
        }
        out.extend(current);
        out
    }

    fn header_kind(&self, line: &str) -> Option<SectionKind> {
        let caps = self.header.captures(line)?;
        let title = caps.get(2)?.as_str().trim_matches(|c: char| {
            matches!(c, '*' | '#' | ':' | '：') || c.is_whitespace()
        });
        // numbered reference entries share the header shape
        if title.chars().count() > MAX_HEADER_CHARS
            || title.contains(['"', '「', '“'])
            || self.material_marker.is_match(title)
            || self.is_citation(title)
        {
            return None;
        }
        SectionKind::classify(title)
    }

    fn is_citation(&self, line: &str) -> bool {
        self.citation_rules.iter().any(|rule| rule.apply(line).is_some())
    }

    pub fn parse_findings(&self, body: &str) -> Vec<ExternalFinding> {
        // the piece before the first marker is preamble
        self.material_marker
            .split(body)
            .skip(1)
            .filter_map(|block| self.parse_block(block))
            .collect()
    }

    fn parse_block(&self, block: &str) -> Option<ExternalFinding> {
        let first_line = block.lines().next()?;
        let name = first_line
            .trim_matches(|c: char| matches!(c, '*' | '#') || c.is_whitespace())
            .trim_end_matches(['.', ',', '。', '、'])
            .to_string();
        if name.is_empty() {
            return None;
        }
        let confidence = self
            .confidence
            .captures(block)
            .and_then(|c| c.get(1))
            .map(|m| parse_confidence(m.as_str()))
            .unwrap_or_default();
        let citations = self
            .inline_source
            .captures(block)
            .and_then(|c| c.get(1))
            .and_then(|m| inline_citation(m.as_str()))
            .into_iter()
            .collect();
        Some(ExternalFinding {
            name,
            source_label: SECTION_SOURCE_LABEL.to_string(),
            confidence,
            citations,
        })
    }

    pub fn bullets(&self, body: &str) -> Vec<String> {
        body.lines()
            .filter_map(|line| self.bullet.captures(line))
            .filter_map(|c| c.get(1).map(|m| clean_fragment(m.as_str())))
            .filter(|s| !s.is_empty())
            .collect()
    }

    pub fn parse_citation_lines(&self, body: &str) -> Vec<Citation> {
        body.lines()
            .map(|line| self.list_prefix.replace(line.trim(), "").into_owned())
            .filter(|line| !line.is_empty())
            .filter_map(|line| self.citation_rules.iter().find_map(|rule| rule.apply(&line)))
            .collect()
    }

    pub fn rule_findings(&self, text: &str) -> Vec<ExternalFinding> {
        self.material_rules
            .iter()
            .filter(|rule| rule.matches(text))
            .map(|rule| ExternalFinding {
                name: rule.name.to_string(),
                source_label: PATTERN_SOURCE_LABEL.to_string(),
                confidence: Confidence::Low,
                citations: Vec::new(),
            })
            .collect()
    }

    pub fn urls(&self, text: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        self.url
            .find_iter(text)
            .map(|m| {
                m.as_str()
                    .trim_end_matches(['.', ',', ';', ':', ')', '!', '?', '*'])
                    .to_string()
            })
            .filter(|u| seen.insert(u.clone()))
            .collect()
    }

    fn attach_urls(&self, text: &str, citations: &mut Vec<Citation>) {
        for url in self.urls(text) {
            if citations.iter().any(|c| c.url.as_deref() == Some(url.as_str())) {
                continue;
            }
            let host = url_host(&url);
            let token = domain_token(&host);
            let target = token
                .as_deref()
                .filter(|t| t.chars().count() >= MIN_DOMAIN_TOKEN_CHARS)
                .and_then(|t| {
                    citations.iter_mut().find(|c| {
                        c.url.is_none()
                            && (c.title.to_lowercase().contains(t)
                                || c.authors
                                    .as_deref()
                                    .is_some_and(|a| a.to_lowercase().contains(t)))
                    })
                });
            match target {
                Some(citation) => citation.url = Some(url),
                None => citations.push(Citation {
                    title: format!("Online resource ({host})"),
                    authors: None,
                    year: None,
                    url: Some(url),
                    kind: CitationKind::Web,
                }),
            }
        }
    }
}

fn parse_confidence(raw: &str) -> Confidence {
    match raw.to_lowercase().as_str() {
        "high" | "高" => Confidence::High,
        "low" | "低" => Confidence::Low,
        _ => Confidence::Medium,
    }
}

/// `title, authors..., year` after a source marker. Fewer than two parts is dropped.
pub fn inline_citation(raw: &str) -> Option<Citation> {
    let parts = raw
        .split([',', '，', '、'])
        .map(clean_fragment)
        .collect::<Vec<_>>();
    if parts.len() < 2 {
        return None;
    }
    let title = parts[0].clone();
    if title.is_empty() {
        return None;
    }
    let rest = &parts[1..];
    let year = rest.last().and_then(|p| parse_year(p));
    let author_parts = if year.is_some() {
        &rest[..rest.len() - 1]
    } else {
        rest
    };
    let authors = author_parts
        .iter()
        .filter(|p| !p.is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join(", ");
    Some(Citation {
        kind: classify_kind(&title),
        title,
        authors: (!authors.is_empty()).then_some(authors),
        year,
        url: None,
    })
}

fn parse_year(raw: &str) -> Option<u16> {
    let digits = raw.trim_end_matches(['.', ')', '）', '年']).trim();
    (digits.len() == 4 && digits.chars().all(|c| c.is_ascii_digit()))
        .then(|| digits.parse().ok())
        .flatten()
}

fn push_citation(list: &mut Vec<Citation>, citation: Citation) {
    let key = citation.title.to_lowercase();
    if !list.iter().any(|c| c.title.to_lowercase() == key) {
        list.push(citation);
    }
}

pub fn url_host(url: &str) -> String {
    let without_scheme = url.split_once("://").map_or(url, |(_, rest)| rest);
    let authority = without_scheme
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default();
    let host = authority.rsplit('@').next().unwrap_or(authority);
    let host = host.split(':').next().unwrap_or(host);
    host.trim_start_matches("www.").to_lowercase()
}

/// Registrable label of a host: `nature` for `www.nature.com`, `nikkei` for `nikkei.co.jp`.
pub fn domain_token(host: &str) -> Option<String> {
    let labels = host.split('.').filter(|l| !l.is_empty()).collect::<Vec<_>>();
    let n = labels.len();
    let token = match n {
        0 => return None,
        1 | 2 => labels[0],
        _ if labels[n - 1].len() == 2 && COUNTRY_SECOND_LEVEL.contains(&labels[n - 2]) => {
            labels[n - 3]
        }
        _ => labels[n - 2],
    };
    Some(token.to_lowercase())
}
