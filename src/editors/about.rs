//! About page blocks: profile, skills, journey, contact and free-form custom blocks.

use super::{ContentShape, ListSpec, SectionEditor, TypedEditor};
use crate::content::{Check, Extra, Rule, When};
use crate::error::Result;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};

pub const CONTACT_TYPES: &[&str] = &["email", "phone", "wechat", "qq", "github", "weibo", "website", "other"];

pub const BLOCK_TYPES: &[&str] = &["text", "list", "cards"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub bio: String,
    pub location: String,
    pub education: Vec<Education>,
    pub highlights: Vec<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    pub school: String,
    pub degree: String,
    pub major: String,
    /// Free text such as `2019-2023`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

fn education() -> Value {
    json!({ "school": "", "degree": "", "major": "", "time": "" })
}

fn empty_text() -> Value {
    json!("")
}

impl ContentShape for ProfileContent {
    fn lists() -> &'static [ListSpec] {
        const LISTS: &[ListSpec] = &[
            ListSpec {
                pattern: "/education",
                min: 1,
                item: education,
            },
            ListSpec {
                pattern: "/highlights",
                min: 1,
                item: empty_text,
            },
        ];
        LISTS
    }

    fn rules() -> Vec<Rule> {
        vec![
            Rule::required("/bio", "Enter a short bio"),
            Rule::required("/location", "Enter a location"),
            Rule::required("/education/*/school", "Enter the school name"),
            Rule::required("/education/*/degree", "Enter the degree"),
            Rule::required("/education/*/major", "Enter the major"),
            Rule::required("/highlights/*", "Enter a highlight"),
        ]
    }
}

pub type ProfileEditor = TypedEditor<ProfileContent>;

impl ProfileEditor {
    pub fn add_education(&mut self) -> Result<usize> {
        self.append("/education")
    }

    pub fn remove_education(&mut self, index: usize) -> Result<bool> {
        self.remove("/education", index)
    }

    pub fn add_highlight(&mut self) -> Result<usize> {
        self.append("/highlights")
    }

    pub fn remove_highlight(&mut self, index: usize) -> Result<bool> {
        self.remove("/highlights", index)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SkillsContent {
    pub categories: Vec<SkillGroup>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SkillGroup {
    pub name: String,
    pub items: Vec<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

fn skill_group() -> Value {
    json!({ "name": "", "items": [""] })
}

impl ContentShape for SkillsContent {
    fn lists() -> &'static [ListSpec] {
        const LISTS: &[ListSpec] = &[
            ListSpec {
                pattern: "/categories",
                min: 1,
                item: skill_group,
            },
            ListSpec {
                pattern: "/categories/*/items",
                min: 1,
                item: empty_text,
            },
        ];
        LISTS
    }

    fn rules() -> Vec<Rule> {
        vec![
            Rule::required("/categories/*/name", "Enter a category name"),
            Rule::required("/categories/*/items/*", "Enter a skill"),
        ]
    }
}

pub type SkillsEditor = TypedEditor<SkillsContent>;

impl SkillsEditor {
    pub fn add_category(&mut self) -> Result<usize> {
        self.append("/categories")
    }

    pub fn remove_category(&mut self, index: usize) -> Result<bool> {
        self.remove("/categories", index)
    }

    pub fn add_skill(&mut self, category: usize) -> Result<usize> {
        self.append(&format!("/categories/{}/items", category))
    }

    pub fn remove_skill(&mut self, category: usize, index: usize) -> Result<bool> {
        self.remove(&format!("/categories/{}/items", category), index)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JourneyContent {
    /// Paragraphs of the story.
    pub description: Vec<String>,
    pub milestones: Vec<Milestone>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Milestone {
    /// `YYYY-MM-DD`
    pub date: String,
    pub title: String,
    pub description: String,
    #[serde(flatten)]
    pub extra: Extra,
}

fn milestone() -> Value {
    json!({ "date": "", "title": "", "description": "" })
}

impl ContentShape for JourneyContent {
    fn lists() -> &'static [ListSpec] {
        const LISTS: &[ListSpec] = &[
            ListSpec {
                pattern: "/description",
                min: 1,
                item: empty_text,
            },
            ListSpec {
                pattern: "/milestones",
                min: 0,
                item: milestone,
            },
        ];
        LISTS
    }

    fn rules() -> Vec<Rule> {
        vec![
            Rule::required("/description/*", "Enter a paragraph"),
            Rule::new("/milestones/*/date", Check::Date, "Enter the date as YYYY-MM-DD"),
            Rule::required("/milestones/*/title", "Enter a title"),
            Rule::required("/milestones/*/description", "Enter a description"),
        ]
    }
}

pub type JourneyEditor = TypedEditor<JourneyContent>;

impl JourneyEditor {
    pub fn add_paragraph(&mut self) -> Result<usize> {
        self.append("/description")
    }

    pub fn remove_paragraph(&mut self, index: usize) -> Result<bool> {
        self.remove("/description", index)
    }

    pub fn add_milestone(&mut self) -> Result<usize> {
        self.append("/milestones")
    }

    pub fn remove_milestone(&mut self, index: usize) -> Result<bool> {
        self.remove("/milestones", index)
    }
}

/// Contact methods, stored as a bare array. Older records wrap the array as
/// `{"items": [...]}`; both forms load and the bare form is written back.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ContactContent(pub Vec<ContactItem>);

impl<'de> Deserialize<'de> for ContactContent {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Stored {
            List(Vec<ContactItem>),
            Wrapped { items: Vec<ContactItem> },
        }

        match Stored::deserialize(deserializer)? {
            Stored::List(items) | Stored::Wrapped { items } => Ok(ContactContent(items)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactItem {
    #[serde(rename = "type")]
    pub kind: String,
    pub icon: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Show `qr_code_url` as a scannable image instead of the plain value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_qr_code: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr_code_url: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

fn contact_item() -> Value {
    json!({
        "type": "email",
        "icon": "MailOutlined",
        "value": "",
        "link": "",
        "isQrCode": false,
        "qrCodeUrl": ""
    })
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
            Rule::required("/*/icon", "Enter an icon name"),
            Rule::required("/*/value", "Enter the contact value"),
            Rule::required("/*/qrCodeUrl", "Enter the QR code image URL").when(When::Truthy("isQrCode")),
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

    /// Toggles QR display. A previously entered image URL is kept when
    /// turning it off.
    pub fn set_qr_code(&mut self, index: usize, enabled: bool) -> Result<()> {
        self.set_field(&format!("/{}/isQrCode", index), Value::Bool(enabled))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomContent {
    pub description: String,
    /// One of [`BLOCK_TYPES`]; `text` blocks ignore `items`.
    pub block_type: String,
    pub items: Vec<CustomItem>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Default for CustomContent {
    fn default() -> Self {
        CustomContent {
            description: String::new(),
            block_type: "text".to_string(),
            items: Vec::new(),
            extra: Extra::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Only shown by `cards` blocks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

fn custom_item() -> Value {
    json!({ "title": "", "description": "", "icon": "", "link": "" })
}

impl ContentShape for CustomContent {
    fn lists() -> &'static [ListSpec] {
        const LISTS: &[ListSpec] = &[ListSpec {
            pattern: "/items",
            min: 0,
            item: custom_item,
        }];
        LISTS
    }

    fn rules() -> Vec<Rule> {
        vec![
            Rule::required("/description", "Enter a description"),
            Rule::new("/blockType", Check::OneOf(BLOCK_TYPES), "Choose a block type"),
            Rule::required("/items/*/description", "Enter a description")
                .when(When::NotEquals("/blockType", "text")),
        ]
    }
}

pub type CustomEditor = TypedEditor<CustomContent>;

impl CustomEditor {
    pub fn add_item(&mut self) -> Result<usize> {
        self.append("/items")
    }

    pub fn remove_item(&mut self, index: usize) -> Result<bool> {
        self.remove("/items", index)
    }

    /// Whether the item list is shown for the current block type.
    pub fn shows_items(&self) -> bool {
        self.get().block_type != "text"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{codec, ContentRegistry};
    use crate::models::{AboutSectionType, SectionType};

    const CONTACT: SectionType = SectionType::About(AboutSectionType::Contact);

    fn registry() -> ContentRegistry {
        ContentRegistry::standard()
    }

    #[test]
    fn test_contact_append_keeps_existing_item() {
        let raw = r#"[{"type":"email","icon":"MailOutlined","value":"a@b.com"}]"#;
        let mut editor = ContactEditor::open(CONTACT, Some(raw), &registry());

        let index = editor.add_item().unwrap();
        editor.set_field(&format!("/{}/type", index), json!("github")).unwrap();
        editor.set_field(&format!("/{}/icon", index), json!("GithubOutlined")).unwrap();
        editor.set_field(&format!("/{}/value", index), json!("octocat")).unwrap();
        assert!(editor.validate().is_ok());

        let saved = codec::decode(Some(&editor.content())).unwrap();
        let items = saved.as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(
            items[0],
            json!({"type": "email", "icon": "MailOutlined", "value": "a@b.com"})
        );
    }

    #[test]
    fn test_contact_single_item_cannot_be_removed() {
        let mut editor = ContactEditor::open(CONTACT, None, &registry());

        assert!(!editor.remove_item(0).unwrap());
        assert_eq!(editor.get().0.len(), 1);
        assert!(editor.remove_item(3).is_err());
    }

    #[test]
    fn test_qr_code_url_required_only_when_enabled() {
        let raw = r#"[{"type":"wechat","icon":"WechatOutlined","value":"me","qrCodeUrl":""}]"#;
        let mut editor = ContactEditor::open(CONTACT, Some(raw), &registry());
        assert!(editor.validate().is_ok());

        editor.set_qr_code(0, true).unwrap();
        assert!(editor.validate().has_issue_at("/0/qrCodeUrl"));

        editor.set_field("/0/qrCodeUrl", json!("https://cdn.example.com/qr.png")).unwrap();
        assert!(editor.validate().is_ok());

        editor.set_field("/0/qrCodeUrl", json!("")).unwrap();
        editor.set_qr_code(0, false).unwrap();
        assert!(editor.validate().is_ok());
    }

    #[test]
    fn test_contact_accepts_wrapped_form() {
        let raw = r#"{"items":[{"type":"phone","icon":"PhoneOutlined","value":"123"}]}"#;
        let editor = ContactEditor::open(CONTACT, Some(raw), &registry());

        assert_eq!(editor.get().0[0].kind, "phone");
        assert!(codec::decode(Some(&editor.content())).unwrap().is_array());
    }

    #[test]
    fn test_malformed_contact_opens_template() {
        let editor = ContactEditor::open(CONTACT, Some("{not json"), &registry());
        assert_eq!(editor.get().0.len(), 1);
        assert_eq!(editor.get().0[0].icon, "MailOutlined");
        assert_eq!(editor.get().0[0].is_qr_code, Some(false));
    }

    #[test]
    fn test_profile_highlight_lists() {
        let mut editor = ProfileEditor::open(SectionType::About(AboutSectionType::Profile), None, &registry());

        assert!(!editor.remove_highlight(0).unwrap());
        editor.add_highlight().unwrap();
        editor.set_field("/highlights/1", json!("Open source maintainer")).unwrap();
        assert!(editor.remove_highlight(0).unwrap());
        assert_eq!(editor.get().highlights, vec!["Open source maintainer".to_string()]);
    }

    #[test]
    fn test_profile_required_fields() {
        let editor = ProfileEditor::open(SectionType::About(AboutSectionType::Profile), None, &registry());
        let report = editor.validate();

        for field in ["/bio", "/location", "/education/0/school", "/highlights/0"] {
            assert!(report.has_issue_at(field), "expected issue at {}", field);
        }
        assert!(!report.has_issue_at("/avatar"));
    }

    #[test]
    fn test_journey_without_milestones_can_add_one() {
        let raw = r#"{"description":["Started coding in 2015"]}"#;
        let mut editor = JourneyEditor::open(SectionType::About(AboutSectionType::Journey), Some(raw), &registry());

        assert!(editor.get().milestones.is_empty());
        editor.add_milestone().unwrap();
        editor.set_field("/milestones/0/date", json!("2019/06/01")).unwrap();
        assert!(editor.validate().has_issue_at("/milestones/0/date"));

        editor.set_field("/milestones/0/date", json!("2019-06-01")).unwrap();
        editor.set_field("/milestones/0/title", json!("Graduated")).unwrap();
        editor.set_field("/milestones/0/description", json!("BSc Computer Science")).unwrap();
        assert!(editor.validate().is_ok());
        assert!(editor.remove_milestone(0).unwrap());
    }

    #[test]
    fn test_custom_items_required_outside_text_blocks() {
        let mut editor = CustomEditor::open(SectionType::About(AboutSectionType::Custom), None, &registry());
        editor.set_field("/description", json!("Things I use")).unwrap();
        editor.add_item().unwrap();
        assert!(!editor.shows_items());
        assert!(editor.validate().is_ok());

        editor.set_field("/blockType", json!("cards")).unwrap();
        assert!(editor.shows_items());
        assert!(editor.validate().has_issue_at("/items/0/description"));
    }

    #[test]
    fn test_about_skills_nested_minimum() {
        let mut editor = SkillsEditor::open(SectionType::About(AboutSectionType::Skills), None, &registry());

        assert!(!editor.remove_skill(0, 0).unwrap());
        editor.add_skill(0).unwrap();
        editor.set_field("/categories/0/items/1", json!("Rust")).unwrap();
        assert!(editor.remove_skill(0, 0).unwrap());
        assert_eq!(editor.get().categories[0].items, vec!["Rust".to_string()]);
    }
}
