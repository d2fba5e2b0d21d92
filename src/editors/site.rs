//! JSON lists embedded in the sidebar and footer singletons.

use super::{ContentShape, ListSpec, SectionEditor, TypedEditor};
use crate::content::{Check, Extra, Rule, When};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const ANNOUNCEMENT_TYPES: &[&str] = &["text", "link"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnouncementsContent(pub Vec<Announcement>);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Announcement {
    pub title: String,
    pub content: String,
    /// `text` or `link`; a link announcement needs `link`.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

fn announcement() -> Value {
    json!({ "title": "", "content": "", "type": "text" })
}

impl ContentShape for AnnouncementsContent {
    fn lists() -> &'static [ListSpec] {
        const LISTS: &[ListSpec] = &[ListSpec {
            pattern: "",
            min: 0,
            item: announcement,
        }];
        LISTS
    }

    fn rules() -> Vec<Rule> {
        vec![
            Rule::required("/*/title", "Enter a title"),
            Rule::required("/*/content", "Enter the announcement text"),
            Rule::new("/*/type", Check::OneOf(ANNOUNCEMENT_TYPES), "Choose a type"),
            Rule::required("/*/link", "Enter the link").when(When::Equals("type", "link")),
        ]
    }
}

pub type AnnouncementsEditor = TypedEditor<AnnouncementsContent>;

impl AnnouncementsEditor {
    pub fn add_announcement(&mut self) -> Result<usize> {
        self.append("")
    }

    pub fn remove_announcement(&mut self, index: usize) -> Result<bool> {
        self.remove("", index)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FooterLinksContent(pub Vec<FooterLink>);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FooterLink {
    pub title: String,
    pub url: String,
    /// Ant Design icon name, e.g. `GithubOutlined`.
    pub icon: String,
    pub is_external: bool,
    #[serde(flatten)]
    pub extra: Extra,
}

fn footer_link() -> Value {
    json!({ "title": "", "url": "", "icon": "", "isExternal": false })
}

impl ContentShape for FooterLinksContent {
    fn lists() -> &'static [ListSpec] {
        const LISTS: &[ListSpec] = &[ListSpec {
            pattern: "",
            min: 0,
            item: footer_link,
        }];
        LISTS
    }

    fn rules() -> Vec<Rule> {
        vec![
            Rule::required("/*/title", "Enter a title"),
            Rule::required("/*/url", "Enter the link"),
        ]
    }
}

pub type FooterLinksEditor = TypedEditor<FooterLinksContent>;

impl FooterLinksEditor {
    pub fn add_link(&mut self) -> Result<usize> {
        self.append("")
    }

    pub fn remove_link(&mut self, index: usize) -> Result<bool> {
        self.remove("", index)
    }
}
