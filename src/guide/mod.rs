//! Guide content: the instructional pages and prompt templates.
//!
//! Pages are authored in `assets/guide.json` and compiled into the binary.
use std::borrow::Cow;
use std::collections::HashSet;

use serde::Deserialize;

use crate::data::model::Table;

/// Placeholders in prompt templates that stand for the dataset's `df.info()` text.
pub const INFO_PLACEHOLDERS: &[&str] = &["{Paste df.info() output here}", "{Paste .info Here}"];

const EMBEDDED_GUIDE: &str = include_str!("../../assets/guide.json");

#[derive(Debug, thiserror::Error)]
pub enum GuideError {
    #[error("parsing guide content: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("guide has no pages")]
    Empty,
    #[error("duplicate page id '{0}'")]
    DuplicatePage(String),
}

// ---------------------------------------------------------------------------
// Content model
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Guide {
    /// Shared context block shown above every prompt page.
    #[serde(default)]
    pub prompt_context: String,
    pub pages: Vec<GuidePage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GuidePage {
    pub id: String,
    pub nav_label: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Heading {
        text: String,
    },
    Paragraph {
        text: String,
    },
    Bullets {
        items: Vec<Item>,
    },
    Numbered {
        items: Vec<Item>,
    },
    Code {
        #[serde(default)]
        label: Option<String>,
        #[serde(default = "default_language")]
        language: String,
        text: String,
    },
    SideBySide {
        panes: Vec<CodePane>,
    },
    Commandments {
        items: Vec<Commandment>,
    },
    Callout {
        #[serde(default)]
        tone: Tone,
        title: String,
        body: String,
        #[serde(default)]
        items: Vec<String>,
    },
    Expander {
        title: String,
        #[serde(default)]
        open: bool,
        blocks: Vec<Block>,
    },
    PromptContext,
    Prompt {
        #[serde(default = "default_prompt_title")]
        title: String,
        text: String,
    },
    LaunchDashboard {
        label: String,
    },
}

/// A list entry, either plain text or a bold lead followed by an explanation.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Item {
    Plain(String),
    Lead { lead: String, text: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct CodePane {
    pub label: String,
    #[serde(default = "default_language")]
    pub language: String,
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Commandment {
    pub title: String,
    pub explanation: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    #[default]
    Info,
    Success,
    Warning,
}

fn default_language() -> String {
    "bash".to_string()
}

fn default_prompt_title() -> String {
    "Prompt to Copy".to_string()
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

impl Guide {
    /// The guide compiled into the binary.
    pub fn embedded() -> Result<Self, GuideError> {
        Self::from_json(EMBEDDED_GUIDE)
    }

    pub fn from_json(text: &str) -> Result<Self, GuideError> {
        let guide: Guide = serde_json::from_str(text)?;
        if guide.pages.is_empty() {
            return Err(GuideError::Empty);
        }
        let mut ids = HashSet::new();
        for page in &guide.pages {
            if !ids.insert(page.id.as_str()) {
                return Err(GuideError::DuplicatePage(page.id.clone()));
            }
        }
        Ok(guide)
    }

    pub fn page(&self, index: usize) -> Option<&GuidePage> {
        self.pages.get(index)
    }
}

/// Fill the dataset-info placeholders of a prompt template from the loaded table.
/// Without a table the template is returned untouched.
pub fn render_prompt<'a>(template: &'a str, table: Option<&Table>) -> Cow<'a, str> {
    let Some(table) = table else {
        return Cow::Borrowed(template);
    };
    if !INFO_PLACEHOLDERS.iter().any(|p| template.contains(p)) {
        return Cow::Borrowed(template);
    }
    let info = table.info();
    let info = info.trim_end();
    let mut out = template.to_string();
    for placeholder in INFO_PLACEHOLDERS {
        out = out.replace(placeholder, info);
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CellValue, Column, DType};

    fn prompts(blocks: &[Block]) -> Vec<&str> {
        blocks
            .iter()
            .flat_map(|b| match b {
                Block::Prompt { text, .. } => vec![text.as_str()],
                Block::Expander { blocks, .. } => prompts(blocks),
                _ => Vec::new(),
            })
            .collect()
    }

    fn code_blocks(blocks: &[Block]) -> Vec<(&str, &str)> {
        blocks
            .iter()
            .flat_map(|b| match b {
                Block::Code { language, text, .. } => vec![(language.as_str(), text.as_str())],
                Block::Expander { blocks, .. } => code_blocks(blocks),
                _ => Vec::new(),
            })
            .collect()
    }

    #[test]
    fn embedded_guide_parses() {
        let guide = Guide::embedded().unwrap();
        assert_eq!(guide.pages.len(), 10);
        assert_eq!(guide.pages[0].id, "commandments");
        assert!(guide.prompt_context.contains("{Paste .info Here}"));

        let page = guide.pages.iter().find(|p| p.id == "initial_dashboard").unwrap();
        let listing = code_blocks(&page.blocks)
            .into_iter()
            .find(|(_, text)| text.contains("def filter_values"))
            .expect("initial dashboard listing");
        assert_eq!(listing.0, "python");
        assert!(listing.1.contains("nunique() < 20"));
        assert!(page
            .blocks
            .iter()
            .any(|b| matches!(b, Block::LaunchDashboard { .. })));
    }

    #[test]
    fn code_language_defaults_to_bash() {
        let block: Block = serde_json::from_str(r#"{"kind":"code","text":"pip install streamlit"}"#).unwrap();
        match block {
            Block::Code { language, label, .. } => {
                assert_eq!(language, "bash");
                assert!(label.is_none());
            }
            other => panic!("expected code block, got {other:?}"),
        }
    }

    #[test]
    fn commandments_page_has_ten_items() {
        let guide = Guide::embedded().unwrap();
        let count: usize = guide.pages[0]
            .blocks
            .iter()
            .map(|b| match b {
                Block::Commandments { items } => items.len(),
                _ => 0,
            })
            .sum();
        assert_eq!(count, 10);
    }

    #[test]
    fn every_prompt_page_has_a_prompt() {
        let guide = Guide::embedded().unwrap();
        for page in guide.pages.iter().filter(|p| p.id.starts_with("prompt") || p.id.starts_with("bonus")) {
            assert!(!prompts(&page.blocks).is_empty(), "page {} has no prompt", page.id);
        }
    }

    #[test]
    fn guide_ships_no_api_keys() {
        let guide = Guide::embedded().unwrap();
        for page in &guide.pages {
            for text in prompts(&page.blocks) {
                assert!(!text.contains("sk-"), "page {} embeds a key", page.id);
            }
        }
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let json = r#"{"pages": [
            {"id": "a", "nav_label": "A", "title": "A", "blocks": []},
            {"id": "a", "nav_label": "B", "title": "B", "blocks": []}
        ]}"#;
        assert!(matches!(Guide::from_json(json), Err(GuideError::DuplicatePage(id)) if id == "a"));
    }

    #[test]
    fn empty_guide_is_rejected() {
        assert!(matches!(Guide::from_json(r#"{"pages": []}"#), Err(GuideError::Empty)));
        assert!(matches!(Guide::from_json("{"), Err(GuideError::Parse(_))));
    }

    #[test]
    fn items_accept_plain_and_lead_forms() {
        let json = r#"{"pages": [{"id": "a", "nav_label": "A", "title": "A", "blocks": [
            {"kind": "bullets", "items": ["plain", {"lead": "Bold", "text": "rest"}]}
        ]}]}"#;
        let guide = Guide::from_json(json).unwrap();
        match &guide.pages[0].blocks[0] {
            Block::Bullets { items } => {
                assert!(matches!(&items[0], Item::Plain(s) if s == "plain"));
                assert!(matches!(&items[1], Item::Lead { lead, .. } if lead == "Bold"));
            }
            other => panic!("unexpected block {other:?}"),
        }
    }

    #[test]
    fn prompt_placeholder_filled_only_with_a_table() {
        let template = "Here is the info:\n\n{Paste df.info() output here}";
        assert_eq!(render_prompt(template, None), template);

        let table = Table::new(vec![Column {
            name: "Units Sold".into(),
            dtype: DType::Integer,
            values: vec![CellValue::Integer(4), CellValue::Integer(7)],
        }]);
        let rendered = render_prompt(template, Some(&table));
        assert!(!rendered.contains("{Paste"));
        assert!(rendered.contains("Units Sold"));
        assert!(rendered.contains("int64"));
    }
}
