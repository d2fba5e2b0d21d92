use serde::{Deserialize, Serialize};

/// Sidebar profile card. `announcements` is a JSON array kept as text.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SidebarConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub avatar: String,
    pub name: String,
    pub bio: String,
    pub online: bool,
    pub status_text: String,
    pub announcements: String,
    pub email: String,
    pub show_weather: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_time: Option<String>,
}

/// Footer configuration. `links` is a JSON array kept as text.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FooterConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub links: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_time: Option<String>,
}

impl SidebarConfig {
    /// Update body: the server rejects `id` and timestamps on PUT.
    pub fn without_server_fields(&self) -> Self {
        SidebarConfig {
            id: None,
            create_time: None,
            update_time: None,
            ..self.clone()
        }
    }
}

impl FooterConfig {
    pub fn without_server_fields(&self) -> Self {
        FooterConfig {
            id: None,
            create_time: None,
            update_time: None,
            ..self.clone()
        }
    }
}
