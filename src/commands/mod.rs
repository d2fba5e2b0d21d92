mod footer;
mod sections;
mod sidebar;

pub use footer::{load_footer, open_footer_links, save_footer, validate_footer};
pub use sections::{
    delete_section, draft_from, list_sections, new_draft, save_section, set_section_enabled,
    SectionDraft,
};
pub use sidebar::{load_sidebar, open_announcements, save_sidebar, validate_sidebar};
