use crate::content::{codec, FieldIssue, ValidationReport};
use crate::editors::{EditorDispatcher, EditorSession};
use crate::error::Result;
use crate::models::{SectionType, SidebarConfig};
use crate::repository::SingletonRepository;
use serde_json::Value;
use tracing::info;

pub async fn load_sidebar<R>(repo: &R) -> Result<SidebarConfig>
where
    R: SingletonRepository<SidebarConfig> + ?Sized,
{
    repo.fetch().await
}

/// Editor over the announcements list kept as text in `config`.
pub fn open_announcements(config: &SidebarConfig, dispatcher: &EditorDispatcher) -> EditorSession {
    dispatcher.open(Some(SectionType::Announcements), Some(&config.announcements))
}

pub fn validate_sidebar(config: &SidebarConfig, dispatcher: &EditorDispatcher) -> ValidationReport {
    let mut report = ValidationReport::default();
    let required = [
        ("avatar", &config.avatar, "Avatar is required"),
        ("name", &config.name, "Name is required"),
        ("bio", &config.bio, "Bio is required"),
        ("statusText", &config.status_text, "Status text is required"),
        ("email", &config.email, "Email is required"),
    ];
    for (field, value, message) in required {
        if value.trim().is_empty() {
            report.push(FieldIssue::new(field, message));
        }
    }

    match codec::decode(Some(&config.announcements)) {
        Some(Value::Array(items)) if !items.is_empty() => {
            let session = open_announcements(config, dispatcher);
            for issue in session.validate().issues() {
                report.push(FieldIssue::new(
                    format!("announcements{}", issue.field),
                    issue.message.clone(),
                ));
            }
        }
        _ => report.push(FieldIssue::new(
            "announcements",
            "At least one announcement is required",
        )),
    }
    report
}

/// Replaces the sidebar configuration once it validates.
pub async fn save_sidebar<R>(
    repo: &R,
    config: &SidebarConfig,
    dispatcher: &EditorDispatcher,
) -> Result<SidebarConfig>
where
    R: SingletonRepository<SidebarConfig> + ?Sized,
{
    validate_sidebar(config, dispatcher).into_result()?;
    let saved = repo.store(&config.without_server_fields()).await?;
    info!("Saved sidebar configuration");
    Ok(saved)
}
