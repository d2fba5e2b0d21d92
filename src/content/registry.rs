//! Default content per section type.
//!
//! A type without a registered template has no visual editor seed; callers
//! fall back to raw JSON entry for it.

use crate::content::codec;
use crate::models::{AboutSectionType, HomeSectionType, SectionType};
use serde_json::{json, Value};
use std::collections::HashMap;

pub type TemplateFn = fn() -> Value;

#[derive(Debug, Clone, Default)]
pub struct ContentRegistry {
    templates: HashMap<SectionType, TemplateFn>,
}

impl ContentRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Templates for every built-in type.
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        registry.register(SectionType::Home(HomeSectionType::Banner), banner);
        registry.register(SectionType::Home(HomeSectionType::Features), features);
        registry.register(SectionType::Home(HomeSectionType::Skills), home_skills);
        registry.register(SectionType::Home(HomeSectionType::Timeline), timeline);
        registry.register(SectionType::Home(HomeSectionType::Contact), home_contact);
        registry.register(SectionType::About(AboutSectionType::Profile), profile);
        registry.register(SectionType::About(AboutSectionType::Skills), about_skills);
        registry.register(SectionType::About(AboutSectionType::Journey), journey);
        registry.register(SectionType::About(AboutSectionType::Contact), about_contact);
        registry.register(SectionType::About(AboutSectionType::Custom), custom);
        registry.register(SectionType::Announcements, empty_list);
        registry.register(SectionType::FooterLinks, empty_list);
        registry
    }

    pub fn register(&mut self, section_type: SectionType, template: TemplateFn) {
        self.templates.insert(section_type, template);
    }

    pub fn unregister(&mut self, section_type: SectionType) {
        self.templates.remove(&section_type);
    }

    pub fn contains(&self, section_type: SectionType) -> bool {
        self.templates.contains_key(&section_type)
    }

    /// A fresh copy of the template, or `None` for an unregistered type.
    pub fn template(&self, section_type: SectionType) -> Option<Value> {
        self.templates.get(&section_type).map(|template| template())
    }

    /// The template encoded as `content` text for a new section.
    pub fn template_content(&self, section_type: SectionType, pretty: bool) -> Option<String> {
        self.template(section_type)
            .map(|value| codec::encode_with(&value, pretty))
    }
}

/// Template lookup against the built-in registry.
pub fn get_template(section_type: SectionType) -> Option<Value> {
    ContentRegistry::standard().template(section_type)
}

fn banner() -> Value {
    json!({
        "subtitle": "",
        "backgroundImage": "",
        "buttons": [
            { "text": "", "link": "", "type": "default", "icon": "" }
        ]
    })
}

fn features() -> Value {
    json!([
        { "icon": "", "title": "", "description": "", "link": "" }
    ])
}

fn home_skills() -> Value {
    json!([
        {
            "name": "",
            "items": [
                { "name": "", "icon": "", "level": 0, "description": "" }
            ]
        }
    ])
}

fn timeline() -> Value {
    json!([
        { "date": "", "title": "", "description": "", "icon": "", "color": "" }
    ])
}

fn home_contact() -> Value {
    json!([
        { "type": "", "icon": "", "value": "", "link": "" }
    ])
}

fn profile() -> Value {
    json!({
        "avatar": "",
        "bio": "",
        "location": "",
        "education": [
            { "school": "", "degree": "", "major": "", "time": "" }
        ],
        "highlights": [""]
    })
}

fn about_skills() -> Value {
    json!({
        "categories": [
            { "name": "", "items": [""] }
        ]
    })
}

fn journey() -> Value {
    json!({
        "description": [""],
        "milestones": []
    })
}

fn about_contact() -> Value {
    json!([
        {
            "type": "email",
            "icon": "MailOutlined",
            "value": "",
            "link": "",
            "isQrCode": false,
            "qrCodeUrl": ""
        }
    ])
}

fn custom() -> Value {
    json!({
        "description": "",
        "blockType": "text",
        "items": []
    })
}

fn empty_list() -> Value {
    json!([])
}
