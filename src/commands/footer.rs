use crate::content::{codec, FieldIssue, ValidationReport};
use crate::editors::{EditorDispatcher, EditorSession};
use crate::error::Result;
use crate::models::{FooterConfig, SectionType};
use crate::repository::SingletonRepository;
use serde_json::Value;
use tracing::info;

pub async fn load_footer<R>(repo: &R) -> Result<FooterConfig>
where
    R: SingletonRepository<FooterConfig> + ?Sized,
{
    repo.fetch().await
}

pub fn open_footer_links(config: &FooterConfig, dispatcher: &EditorDispatcher) -> EditorSession {
    dispatcher.open(Some(SectionType::FooterLinks), Some(&config.links))
}

pub fn validate_footer(config: &FooterConfig, dispatcher: &EditorDispatcher) -> ValidationReport {
    let mut report = ValidationReport::default();
    match codec::decode(Some(&config.links)) {
        Some(Value::Array(links)) if !links.is_empty() => {
            for issue in open_footer_links(config, dispatcher).validate().issues() {
                report.push(FieldIssue::new(format!("links{}", issue.field), issue.message.clone()));
            }
        }
        _ => report.push(FieldIssue::new("links", "At least one link is required")),
    }
    report
}

pub async fn save_footer<R>(
    repo: &R,
    config: &FooterConfig,
    dispatcher: &EditorDispatcher,
) -> Result<FooterConfig>
where
    R: SingletonRepository<FooterConfig> + ?Sized,
{
    validate_footer(config, dispatcher).into_result()?;
    let saved = repo.store(&config.without_server_fields()).await?;
    info!("Saved footer configuration");
    Ok(saved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editors::site::FooterLinksContent;
    use crate::error::ConsoleError;
    use crate::repository::memory::MemorySingleton;
    use std::sync::atomic::Ordering;

    #[tokio::test]
    async fn test_footer_needs_a_link() {
        let dispatcher = EditorDispatcher::standard();
        let repo = MemorySingleton::new(FooterConfig {
            id: Some(1),
            links: "[]".to_string(),
            create_time: None,
            update_time: None,
        });
        let config = load_footer(&repo).await.unwrap();

        let err = save_footer(&repo, &config, &dispatcher).await.unwrap_err();
        assert!(matches!(err, ConsoleError::Validation(_)));
        assert_eq!(repo.store_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_add_link_and_save() {
        let dispatcher = EditorDispatcher::standard();
        let repo = MemorySingleton::new(FooterConfig::default());
        let mut config = load_footer(&repo).await.unwrap();

        let mut session = open_footer_links(&config, &dispatcher);
        let editor = session.typed_mut::<FooterLinksContent>().unwrap();
        editor.add_link().unwrap();
        editor.update(|links| {
            links.0[0].title = "GitHub".to_string();
            links.0[0].url = "https://github.com/folio".to_string();
            links.0[0].is_external = true;
        });
        config.links = session.content();

        let saved = save_footer(&repo, &config, &dispatcher).await.unwrap();
        let links = codec::decode(Some(&saved.links)).unwrap();
        assert_eq!(links[0]["title"], "GitHub");
        assert_eq!(links[0]["isExternal"], true);
    }
}
