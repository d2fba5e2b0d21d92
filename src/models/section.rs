use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;

use super::{Entity, Sortable};

/// Block types of the public home page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HomeSectionType {
    Banner,
    Features,
    Skills,
    Timeline,
    Contact,
}

/// Block types of the about page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AboutSectionType {
    Profile,
    Skills,
    Journey,
    Contact,
    Custom,
}

/// Key of the content schema registry and the editor dispatcher.
///
/// `skills` and `contact` exist on both pages with different shapes, so the
/// page is part of the key. `Announcements` and `FooterLinks` are the
/// JSON-in-string fields of the sidebar and footer singletons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionType {
    Home(HomeSectionType),
    About(AboutSectionType),
    Announcements,
    FooterLinks,
}

impl SectionType {
    pub const ALL: [SectionType; 12] = [
        SectionType::Home(HomeSectionType::Banner),
        SectionType::Home(HomeSectionType::Features),
        SectionType::Home(HomeSectionType::Skills),
        SectionType::Home(HomeSectionType::Timeline),
        SectionType::Home(HomeSectionType::Contact),
        SectionType::About(AboutSectionType::Profile),
        SectionType::About(AboutSectionType::Skills),
        SectionType::About(AboutSectionType::Journey),
        SectionType::About(AboutSectionType::Contact),
        SectionType::About(AboutSectionType::Custom),
        SectionType::Announcements,
        SectionType::FooterLinks,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            SectionType::Home(kind) => kind.as_str(),
            SectionType::About(kind) => kind.as_str(),
            SectionType::Announcements => "announcements",
            SectionType::FooterLinks => "links",
        }
    }
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectionType::Home(kind) => write!(f, "home/{}", kind.as_str()),
            SectionType::About(kind) => write!(f, "about/{}", kind.as_str()),
            SectionType::Announcements => write!(f, "sidebar/announcements"),
            SectionType::FooterLinks => write!(f, "footer/links"),
        }
    }
}

/// The per-page type enumeration carried by a [`Section`].
pub trait SectionKind:
    Copy + Eq + Hash + fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    fn all() -> &'static [Self];
    fn as_str(self) -> &'static str;
    fn section_type(self) -> SectionType;
}

impl SectionKind for HomeSectionType {
    fn all() -> &'static [Self] {
        &[
            HomeSectionType::Banner,
            HomeSectionType::Features,
            HomeSectionType::Skills,
            HomeSectionType::Timeline,
            HomeSectionType::Contact,
        ]
    }

    fn as_str(self) -> &'static str {
        match self {
            HomeSectionType::Banner => "banner",
            HomeSectionType::Features => "features",
            HomeSectionType::Skills => "skills",
            HomeSectionType::Timeline => "timeline",
            HomeSectionType::Contact => "contact",
        }
    }

    fn section_type(self) -> SectionType {
        SectionType::Home(self)
    }
}

impl SectionKind for AboutSectionType {
    fn all() -> &'static [Self] {
        &[
            AboutSectionType::Profile,
            AboutSectionType::Skills,
            AboutSectionType::Journey,
            AboutSectionType::Contact,
            AboutSectionType::Custom,
        ]
    }

    fn as_str(self) -> &'static str {
        match self {
            AboutSectionType::Profile => "profile",
            AboutSectionType::Skills => "skills",
            AboutSectionType::Journey => "journey",
            AboutSectionType::Contact => "contact",
            AboutSectionType::Custom => "custom",
        }
    }

    fn section_type(self) -> SectionType {
        SectionType::About(self)
    }
}

/// Wire `type` field. Tags this build does not know survive a load/save
/// cycle untouched and get raw-text editing only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeTag<K> {
    Known(K),
    Unknown(String),
}

impl<K: SectionKind> TypeTag<K> {
    pub fn known(&self) -> Option<K> {
        match self {
            TypeTag::Known(kind) => Some(*kind),
            TypeTag::Unknown(_) => None,
        }
    }

    pub fn section_type(&self) -> Option<SectionType> {
        self.known().map(SectionKind::section_type)
    }

    pub fn as_str(&self) -> &str {
        match self {
            TypeTag::Known(kind) => kind.as_str(),
            TypeTag::Unknown(tag) => tag,
        }
    }
}

impl<K: SectionKind> From<K> for TypeTag<K> {
    fn from(kind: K) -> Self {
        TypeTag::Known(kind)
    }
}

/// A page block as stored by the blog API. `content` holds JSON text whose
/// shape depends on `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section<K> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "type")]
    pub kind: TypeTag<K>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<String>,
}

fn default_enabled() -> bool {
    true
}

pub type HomeSection = Section<HomeSectionType>;
pub type AboutSection = Section<AboutSectionType>;

/// Partial update body; absent fields are left alone by the server.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionPatch<K> {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<TypeTag<K>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

impl<K> Default for SectionPatch<K> {
    fn default() -> Self {
        SectionPatch {
            kind: None,
            title: None,
            description: None,
            content: None,
            sort_order: None,
            enabled: None,
        }
    }
}

impl<K: SectionKind> Entity for Section<K> {
    type Patch = SectionPatch<K>;

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn enabled_patch(enabled: bool) -> Self::Patch {
        SectionPatch {
            enabled: Some(enabled),
            ..SectionPatch::default()
        }
    }

    fn apply_patch(&mut self, patch: &Self::Patch) {
        if let Some(kind) = &patch.kind {
            self.kind = kind.clone();
        }
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(content) = &patch.content {
            self.content = content.clone();
        }
        if let Some(sort_order) = patch.sort_order {
            self.sort_order = sort_order;
        }
        if let Some(enabled) = patch.enabled {
            self.enabled = enabled;
        }
    }
}

impl<K: SectionKind> Sortable for Section<K> {
    fn sort_order(&self) -> i32 {
        self.sort_order
    }

    fn set_sort_order(&mut self, sort_order: i32) {
        self.sort_order = sort_order;
    }

    fn sort_patch(sort_order: i32) -> Self::Patch {
        SectionPatch {
            sort_order: Some(sort_order),
            ..SectionPatch::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_known_type_deserializes() {
        let section: AboutSection = serde_json::from_value(json!({
            "id": 3,
            "type": "journey",
            "title": "Journey",
            "description": "How I got here",
            "content": "{}",
            "sortOrder": 2,
            "enabled": false,
            "createTime": "2024-05-01T10:00:00"
        }))
        .unwrap();

        assert_eq!(section.id, Some(3));
        assert_eq!(section.kind.known(), Some(AboutSectionType::Journey));
        assert_eq!(section.sort_order, 2);
        assert!(!section.enabled);
    }

    #[test]
    fn test_unknown_type_is_kept() {
        let section: HomeSection = serde_json::from_value(json!({
            "type": "gallery",
            "title": "Photos"
        }))
        .unwrap();

        assert_eq!(section.kind, TypeTag::Unknown("gallery".to_string()));
        assert_eq!(section.kind.section_type(), None);
        assert!(section.enabled);

        let back = serde_json::to_value(&section).unwrap();
        assert_eq!(back["type"], "gallery");
        assert!(back.get("id").is_none());
    }

    #[test]
    fn test_content_is_json_within_json() {
        let section = HomeSection {
            id: None,
            kind: HomeSectionType::Contact.into(),
            title: "Contact".to_string(),
            description: String::new(),
            content: r#"[{"type":"Email"}]"#.to_string(),
            sort_order: 0,
            enabled: true,
            create_time: None,
            update_time: None,
        };

        let wire = serde_json::to_value(&section).unwrap();
        assert!(wire["content"].is_string());
    }

    #[test]
    fn test_patch_skips_absent_fields() {
        let patch = HomeSection::sort_patch(4);
        assert_eq!(serde_json::to_value(&patch).unwrap(), json!({"sortOrder": 4}));

        let patch = AboutSection::enabled_patch(false);
        assert_eq!(serde_json::to_value(&patch).unwrap(), json!({"enabled": false}));
    }

    #[test]
    fn test_section_type_display() {
        assert_eq!(
            SectionType::About(AboutSectionType::Contact).to_string(),
            "about/contact"
        );
        assert_eq!(SectionType::Home(HomeSectionType::Skills).tag(), "skills");
    }
}
