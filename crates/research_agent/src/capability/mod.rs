pub mod parser;
pub mod prompt;
pub mod rules;
pub mod search;

pub use parser::{ResearchParser, Section, SectionKind};
pub use prompt::{requirement_lines, research_prompt};
pub use rules::{CitationRule, MaterialRule};
pub use search::{ExternalSearcher, SearchOutcome};
