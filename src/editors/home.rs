//! Home page blocks: banner, features, skills, timeline and contact.

use super::{ContentShape, ListSpec, SectionEditor, TypedEditor};
use crate::content::{Check, Extra, Rule};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::{json, Number, Value};

pub const BUTTON_STYLES: &[&str] = &["default", "primary", "link"];

pub const CONTACT_TYPES: &[&str] = &["Email", "Phone", "GitHub", "LinkedIn", "Twitter", "WeChat", "Other"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BannerContent {
    pub subtitle: String,
    pub background_image: String,
    pub buttons: Vec<BannerButton>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BannerButton {
    pub text: String,
    pub link: String,
    #[serde(rename = "type")]
    pub style: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

fn banner_button() -> Value {
    json!({ "text": "", "link": "", "type": "default", "icon": "" })
}

impl ContentShape for BannerContent {
    fn lists() -> &'static [ListSpec] {
        const LISTS: &[ListSpec] = &[ListSpec {
            pattern: "/buttons",
            min: 1,
            item: banner_button,
        }];
        LISTS
    }

    fn rules() -> Vec<Rule> {
        vec![
            Rule::required("/subtitle", "Enter a subtitle"),
            Rule::required("/backgroundImage", "Enter the background image URL"),
            Rule::required("/buttons/*/text", "Enter the button text"),
            Rule::required("/buttons/*/link", "Enter the button link"),
            Rule::new("/buttons/*/type", Check::OneOf(BUTTON_STYLES), "Choose a button style"),
        ]
    }
}

pub type BannerEditor = TypedEditor<BannerContent>;

impl BannerEditor {
    pub fn add_button(&mut self) -> Result<usize> {
        self.append("/buttons")
    }

    pub fn remove_button(&mut self, index: usize) -> Result<bool> {
        self.remove("/buttons", index)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeaturesContent(pub Vec<Feature>);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Feature {
    pub icon: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

fn feature() -> Value {
    json!({ "icon": "", "title": "", "description": "", "link": "" })
}

impl ContentShape for FeaturesContent {
    fn lists() -> &'static [ListSpec] {
        const LISTS: &[ListSpec] = &[ListSpec {
            pattern: "",
            min: 1,
            item: feature,
        }];
        LISTS
    }

    fn rules() -> Vec<Rule> {
        vec![
            Rule::required("/*/icon", "Enter an icon"),
            Rule::required("/*/title", "Enter a title"),
            Rule::required("/*/description", "Enter a description"),
        ]
    }
}

pub type FeaturesEditor = TypedEditor<FeaturesContent>;

impl FeaturesEditor {
    pub fn add_feature(&mut self) -> Result<usize> {
        self.append("")
    }

    pub fn remove_feature(&mut self, index: usize) -> Result<bool> {
        self.remove("", index)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillsContent(pub Vec<SkillCategory>);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SkillCategory {
    pub name: String,
    pub items: Vec<Skill>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Skill {
    pub name: String,
    pub icon: String,
    /// Proficiency, 0 to 100. Kept as the stored number so fractional or
    /// out-of-range values load and surface as validation issues.
    pub level: Number,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Default for Skill {
    fn default() -> Self {
        Skill {
            name: String::new(),
            icon: String::new(),
            level: Number::from(0),
            description: None,
            extra: Extra::new(),
        }
    }
}

fn skill_category() -> Value {
    json!({ "name": "", "items": [skill()] })
}

fn skill() -> Value {
    json!({ "name": "", "icon": "", "level": 0, "description": "" })
}

impl ContentShape for SkillsContent {
    fn lists() -> &'static [ListSpec] {
        const LISTS: &[ListSpec] = &[
            ListSpec {
                pattern: "",
                min: 1,
                item: skill_category,
            },
            ListSpec {
                pattern: "/*/items",
                min: 1,
                item: skill,
            },
        ];
        LISTS
    }

    fn rules() -> Vec<Rule> {
        vec![
            Rule::required("/*/name", "Enter a category name"),
            Rule::required("/*/items/*/name", "Enter a skill name"),
            Rule::required("/*/items/*/icon", "Enter an icon"),
            Rule::new(
                "/*/items/*/level",
                Check::Range { min: 0.0, max: 100.0 },
                "Proficiency must be between 0 and 100",
            ),
        ]
    }
}

pub type SkillsEditor = TypedEditor<SkillsContent>;

impl SkillsEditor {
    pub fn add_category(&mut self) -> Result<usize> {
        self.append("")
    }

    pub fn remove_category(&mut self, index: usize) -> Result<bool> {
        self.remove("", index)
    }

    pub fn add_skill(&mut self, category: usize) -> Result<usize> {
        self.append(&format!("/{}/items", category))
    }

    pub fn remove_skill(&mut self, category: usize, index: usize) -> Result<bool> {
        self.remove(&format!("/{}/items", category), index)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimelineContent(pub Vec<TimelineEntry>);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimelineEntry {
    pub date: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub color: String,
    #[serde(flatten)]
    pub extra: Extra,
}

fn timeline_entry() -> Value {
    json!({ "date": "", "title": "", "description": "", "icon": "", "color": "" })
}

impl ContentShape for TimelineContent {
    fn lists() -> &'static [ListSpec] {
        const LISTS: &[ListSpec] = &[ListSpec {
            pattern: "",
            min: 1,
            item: timeline_entry,
        }];
        LISTS
    }

    fn rules() -> Vec<Rule> {
        vec![
            Rule::required("/*/date", "Enter a date"),
            Rule::required("/*/title", "Enter a title"),
            Rule::required("/*/description", "Enter a description"),
            Rule::required("/*/color", "Choose a color"),
        ]
    }
}

pub type TimelineEditor = TypedEditor<TimelineContent>;

impl TimelineEditor {
    pub fn add_entry(&mut self) -> Result<usize> {
        self.append("")
    }

    pub fn remove_entry(&mut self, index: usize) -> Result<bool> {
        self.remove("", index)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactContent(pub Vec<ContactItem>);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactItem {
    #[serde(rename = "type")]
    pub kind: String,
    pub icon: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

fn contact_item() -> Value {
    json!({ "type": "", "icon": "", "value": "", "link": "" })
}

impl ContentShape for ContactContent {
    fn lists() -> &'static [ListSpec] {
        const LISTS: &[ListSpec] = &[ListSpec {
            pattern: "",
            min: 1,
            item: contact_item,
        }];
        LISTS
    }

    fn rules() -> Vec<Rule> {
        vec![
            Rule::new("/*/type", Check::OneOf(CONTACT_TYPES), "Choose a contact type"),
            Rule::required("/*/icon", "Enter an icon"),
            Rule::required("/*/value", "Enter a value"),
        ]
    }
}

pub type ContactEditor = TypedEditor<ContactContent>;

impl ContactEditor {
    pub fn add_item(&mut self) -> Result<usize> {
        self.append("")
    }

    pub fn remove_item(&mut self, index: usize) -> Result<bool> {
        self.remove("", index)
    }
}
