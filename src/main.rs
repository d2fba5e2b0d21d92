use anyhow::{bail, Context};
use folio_console::commands::{draft_from, list_sections};
use folio_console::config::load_config;
use folio_console::editors::EditorDispatcher;
use folio_console::logger;
use folio_console::models::{Section, SectionKind};
use folio_console::repository::{CollectionRepository, HttpCollection, RestClient, StaticCredentials};
use std::sync::Arc;

/// Lists the sections of a page with the editor each one opens in and any
/// validation issues in its stored content.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logger::init_logging();

    let config = load_config().context("Failed to load configuration")?;
    tracing::info!("Folio console using {}", config.api_root());

    let credentials = Arc::new(StaticCredentials::from_config(&config));
    let client = Arc::new(RestClient::new(&config, credentials)?);
    let dispatcher = EditorDispatcher::standard().with_pretty(config.pretty_content);

    let home = HttpCollection::home_sections(Arc::clone(&client));
    let about = HttpCollection::about_sections(client);

    match std::env::args().nth(1).as_deref() {
        None | Some("all") => {
            report("home", &home, &dispatcher).await?;
            report("about", &about, &dispatcher).await?;
        }
        Some("home") => report("home", &home, &dispatcher).await?,
        Some("about") => report("about", &about, &dispatcher).await?,
        Some(other) => bail!("Unknown page '{}'; expected home, about or all", other),
    }

    Ok(())
}

async fn report<K, R>(page: &str, repo: &R, dispatcher: &EditorDispatcher) -> anyhow::Result<()>
where
    K: SectionKind,
    R: CollectionRepository<Section<K>>,
{
    let sections = list_sections(repo)
        .await
        .with_context(|| format!("Failed to list {} sections", page))?;
    println!("{} ({} sections)", page, sections.len());

    for section in &sections {
        let draft = draft_from(section);
        let editor = if draft.open_editor(dispatcher).is_visual() {
            "visual"
        } else {
            "raw"
        };
        let validation = draft.validate(dispatcher);
        let status = if validation.is_ok() {
            "ok".to_string()
        } else {
            format!("{} issue(s)", validation.issues().len())
        };

        println!(
            "  #{:<4} {:<10} {:<6} {:<8} {} [{}]",
            section.id.map(|id| id.to_string()).unwrap_or_default(),
            section.kind.as_str(),
            editor,
            if section.enabled { "shown" } else { "hidden" },
            section.title,
            status
        );
        for issue in validation.issues() {
            println!("        {}: {}", issue.field, issue.message);
        }
    }

    Ok(())
}
