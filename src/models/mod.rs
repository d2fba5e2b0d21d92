mod section;
mod site;

use serde::de::DeserializeOwned;
use serde::Serialize;

pub use section::{
    AboutSection, AboutSectionType, HomeSection, HomeSectionType, Section, SectionKind,
    SectionPatch, SectionType, TypeTag,
};
pub use site::{FooterConfig, SidebarConfig};

/// A record of a REST collection.
pub trait Entity: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// Body of a partial update.
    type Patch: Serialize + Send + Sync;

    /// `None` until the server has assigned one on create.
    fn id(&self) -> Option<i64>;

    fn set_id(&mut self, id: i64);

    fn enabled_patch(enabled: bool) -> Self::Patch;

    /// Applies a patch locally, mirroring what the server does with it.
    fn apply_patch(&mut self, patch: &Self::Patch);
}

/// Entities displayed in a user-controlled order.
pub trait Sortable: Entity {
    fn sort_order(&self) -> i32;

    fn set_sort_order(&mut self, sort_order: i32);

    fn sort_patch(sort_order: i32) -> Self::Patch;
}
