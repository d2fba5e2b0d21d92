use crate::content::{codec, FieldIssue, ValidationReport};
use crate::editors::{EditorDispatcher, EditorSession};
use crate::error::Result;
use crate::models::{Section, SectionKind, SectionPatch, TypeTag};
use crate::repository::CollectionRepository;
use tracing::info;

/// Form state of a section being created or edited.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionDraft<K> {
    pub kind: TypeTag<K>,
    pub title: String,
    pub description: String,
    pub content: String,
    pub sort_order: i32,
    pub enabled: bool,
}

impl<K: SectionKind> SectionDraft<K> {
    /// Opens the editor matching this draft's type on its content.
    pub fn open_editor(&self, dispatcher: &EditorDispatcher) -> EditorSession {
        dispatcher.open(self.kind.section_type(), Some(&self.content))
    }

    /// Switches the type. Content is reset to the new type's template since
    /// the old layout no longer applies.
    pub fn change_kind(&mut self, kind: K, dispatcher: &EditorDispatcher) {
        self.kind = TypeTag::Known(kind);
        self.content = template_content(kind, dispatcher);
    }

    pub fn validate(&self, dispatcher: &EditorDispatcher) -> ValidationReport {
        let mut report = ValidationReport::default();
        if self.title.trim().is_empty() {
            report.push(FieldIssue::new("title", "Title is required"));
        }

        if self.content.trim().is_empty() {
            report.push(FieldIssue::new("content", "Content is required"));
        } else if !codec::is_well_formed(&self.content) {
            report.push(FieldIssue::new("content", "Content must be valid JSON"));
        } else if let EditorSession::Visual(editor) = self.open_editor(dispatcher) {
            if editor.layout_mismatch() {
                report.push(FieldIssue::new(
                    "content",
                    format!("Content does not match the {} layout", editor.section_type().tag()),
                ));
            } else {
                for issue in editor.validate().issues() {
                    report.push(FieldIssue::new(format!("content{}", issue.field), issue.message.clone()));
                }
            }
        }
        report
    }

    fn to_patch(&self) -> SectionPatch<K> {
        SectionPatch {
            kind: Some(self.kind.clone()),
            title: Some(self.title.trim().to_string()),
            description: Some(self.description.trim().to_string()),
            content: Some(self.content.clone()),
            sort_order: Some(self.sort_order),
            enabled: Some(self.enabled),
        }
    }

    fn to_section(&self) -> Section<K> {
        Section {
            id: None,
            kind: self.kind.clone(),
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            content: self.content.clone(),
            sort_order: self.sort_order,
            enabled: self.enabled,
            create_time: None,
            update_time: None,
        }
    }
}

fn template_content<K: SectionKind>(kind: K, dispatcher: &EditorDispatcher) -> String {
    dispatcher
        .registry()
        .template_content(kind.section_type(), true)
        .unwrap_or_default()
}

/// All sections of a page in display order.
pub async fn list_sections<K, R>(repo: &R) -> Result<Vec<Section<K>>>
where
    K: SectionKind,
    R: CollectionRepository<Section<K>> + ?Sized,
{
    let mut sections = repo.list_all().await?;
    sections.sort_by_key(|section| section.sort_order);
    Ok(sections)
}

/// A blank draft of `kind` whose content starts from the type's template.
pub fn new_draft<K: SectionKind>(kind: K, dispatcher: &EditorDispatcher) -> SectionDraft<K> {
    SectionDraft {
        kind: TypeTag::Known(kind),
        title: String::new(),
        description: String::new(),
        content: template_content(kind, dispatcher),
        sort_order: 0,
        enabled: true,
    }
}

pub fn draft_from<K: SectionKind>(section: &Section<K>) -> SectionDraft<K> {
    SectionDraft {
        kind: section.kind.clone(),
        title: section.title.clone(),
        description: section.description.clone(),
        content: section.content.clone(),
        sort_order: section.sort_order,
        enabled: section.enabled,
    }
}

/// Creates the section when `id` is `None`, otherwise updates it. Nothing is
/// sent while the draft has validation issues.
pub async fn save_section<K, R>(
    repo: &R,
    id: Option<i64>,
    draft: &SectionDraft<K>,
    dispatcher: &EditorDispatcher,
) -> Result<Section<K>>
where
    K: SectionKind,
    R: CollectionRepository<Section<K>> + ?Sized,
{
    draft.validate(dispatcher).into_result()?;

    let saved = match id {
        Some(id) => repo.update(id, &draft.to_patch()).await?,
        None => repo.create(&draft.to_section()).await?,
    };
    info!(
        "Saved {} section {:?} ({})",
        saved.kind.as_str(),
        saved.id,
        saved.title
    );
    Ok(saved)
}

pub async fn delete_section<K, R>(repo: &R, id: i64) -> Result<()>
where
    K: SectionKind,
    R: CollectionRepository<Section<K>> + ?Sized,
{
    repo.delete(id).await?;
    info!("Deleted section {}", id);
    Ok(())
}

pub async fn set_section_enabled<K, R>(repo: &R, id: i64, enabled: bool) -> Result<()>
where
    K: SectionKind,
    R: CollectionRepository<Section<K>> + ?Sized,
{
    repo.set_enabled(id, enabled).await?;
    info!("Section {} {}", id, if enabled { "enabled" } else { "disabled" });
    Ok(())
}
