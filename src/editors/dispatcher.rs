use super::{about, home, site, ContentShape, RawTextEditor, SectionEditor, TypedEditor};
use crate::content::{ContentRegistry, FieldIssue, ValidationReport};
use crate::models::{AboutSectionType, HomeSectionType, SectionType};
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// Builds an editor for `content` of the given type.
pub type EditorFactory = fn(SectionType, Option<&str>, &ContentRegistry) -> Box<dyn SectionEditor>;

fn open_typed<S: ContentShape>(
    section_type: SectionType,
    raw: Option<&str>,
    registry: &ContentRegistry,
) -> Box<dyn SectionEditor> {
    Box::new(TypedEditor::<S>::open(section_type, raw, registry))
}

/// Maps section types to editors. A type with no mapping is edited as raw
/// JSON text; that is a normal outcome, not an error.
#[derive(Clone)]
pub struct EditorDispatcher {
    registry: ContentRegistry,
    factories: HashMap<SectionType, EditorFactory>,
    pretty: bool,
}

impl fmt::Debug for EditorDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorDispatcher")
            .field("registry", &self.registry)
            .field("editors", &self.factories.keys().collect::<Vec<_>>())
            .field("pretty", &self.pretty)
            .finish()
    }
}

impl Default for EditorDispatcher {
    fn default() -> Self {
        Self::standard()
    }
}

impl EditorDispatcher {
    pub fn new(registry: ContentRegistry) -> Self {
        EditorDispatcher {
            registry,
            factories: HashMap::new(),
            pretty: true,
        }
    }

    /// Whether opened editors emit indented JSON.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Built-in templates and editors for every known type.
    pub fn standard() -> Self {
        let mut dispatcher = Self::new(ContentRegistry::standard());
        dispatcher.register(
            SectionType::Home(HomeSectionType::Banner),
            open_typed::<home::BannerContent>,
        );
        dispatcher.register(
            SectionType::Home(HomeSectionType::Features),
            open_typed::<home::FeaturesContent>,
        );
        dispatcher.register(
            SectionType::Home(HomeSectionType::Skills),
            open_typed::<home::SkillsContent>,
        );
        dispatcher.register(
            SectionType::Home(HomeSectionType::Timeline),
            open_typed::<home::TimelineContent>,
        );
        dispatcher.register(
            SectionType::Home(HomeSectionType::Contact),
            open_typed::<home::ContactContent>,
        );
        dispatcher.register(
            SectionType::About(AboutSectionType::Profile),
            open_typed::<about::ProfileContent>,
        );
        dispatcher.register(
            SectionType::About(AboutSectionType::Skills),
            open_typed::<about::SkillsContent>,
        );
        dispatcher.register(
            SectionType::About(AboutSectionType::Journey),
            open_typed::<about::JourneyContent>,
        );
        dispatcher.register(
            SectionType::About(AboutSectionType::Contact),
            open_typed::<about::ContactContent>,
        );
        dispatcher.register(
            SectionType::About(AboutSectionType::Custom),
            open_typed::<about::CustomContent>,
        );
        dispatcher.register(SectionType::Announcements, open_typed::<site::AnnouncementsContent>);
        dispatcher.register(SectionType::FooterLinks, open_typed::<site::FooterLinksContent>);
        dispatcher
    }

    pub fn register(&mut self, section_type: SectionType, factory: EditorFactory) {
        self.factories.insert(section_type, factory);
    }

    pub fn unregister(&mut self, section_type: SectionType) {
        self.factories.remove(&section_type);
    }

    pub fn registry(&self) -> &ContentRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ContentRegistry {
        &mut self.registry
    }

    pub fn select(&self, section_type: SectionType) -> Option<EditorFactory> {
        self.factories.get(&section_type).copied()
    }

    /// Opens `raw` content of a possibly unknown type. Unknown or unmapped
    /// types get the raw-text editor, seeded from the template when there is
    /// no stored content yet.
    pub fn open(&self, section_type: Option<SectionType>, raw: Option<&str>) -> EditorSession {
        if let Some(section_type) = section_type {
            if let Some(factory) = self.select(section_type) {
                let mut editor = factory(section_type, raw, &self.registry);
                editor.set_pretty(self.pretty);
                return EditorSession::Visual(editor);
            }
            debug!("No visual editor for {}; using raw text", section_type);
        }

        let text = match raw {
            Some(text) if !text.trim().is_empty() => text.to_string(),
            _ => section_type
                .and_then(|section_type| self.registry.template_content(section_type, self.pretty))
                .unwrap_or_default(),
        };
        EditorSession::Raw(RawTextEditor::new(text))
    }
}

/// An open editor: structured when one is registered, plain text otherwise.
pub enum EditorSession {
    Visual(Box<dyn SectionEditor>),
    Raw(RawTextEditor),
}

impl EditorSession {
    pub fn is_visual(&self) -> bool {
        matches!(self, EditorSession::Visual(_))
    }

    pub fn content(&self) -> String {
        match self {
            EditorSession::Visual(editor) => editor.content(),
            EditorSession::Raw(editor) => editor.text().to_string(),
        }
    }

    pub fn validate(&self) -> ValidationReport {
        match self {
            EditorSession::Visual(editor) => editor.validate(),
            EditorSession::Raw(editor) => editor.validate(),
        }
    }

    pub fn visual(&self) -> Option<&dyn SectionEditor> {
        match self {
            EditorSession::Visual(editor) => Some(editor.as_ref()),
            EditorSession::Raw(_) => None,
        }
    }

    pub fn visual_mut(&mut self) -> Option<&mut (dyn SectionEditor + 'static)> {
        match self {
            EditorSession::Visual(editor) => Some(editor.as_mut()),
            EditorSession::Raw(_) => None,
        }
    }

    /// Downcasts to a concrete editor such as [`about::ContactEditor`].
    pub fn typed_mut<S: ContentShape>(&mut self) -> Option<&mut TypedEditor<S>> {
        self.visual_mut()
            .and_then(|editor| editor.as_any_mut().downcast_mut::<TypedEditor<S>>())
    }

    /// Content encoded and checked for submission.
    pub fn submission(&self) -> Result<String, Vec<FieldIssue>> {
        let report = self.validate();
        if report.is_ok() {
            Ok(self.content())
        } else {
            Err(report.issues().to_vec())
        }
    }
}
