use once_cell::sync::Lazy;
use serde::Serialize;

/// What the subscriber dashboard shows: engagement totals and featured media.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardOverview {
    pub stats: EngagementStats,
    pub featured: Vec<FeaturedContent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementStats {
    pub total_views: u64,
    pub total_likes: u64,
    pub total_comments: u64,
    /// Items published since the subscriber's last visit
    pub new_content: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Photo,
    Video,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturedContent {
    pub id: u32,
    #[serde(rename = "type")]
    pub kind: ContentKind,
    pub title: String,
    pub thumbnail: String,
    /// `mm:ss`, videos only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    /// Display-formatted counters ("2.3K")
    pub views: String,
    pub likes: String,
    pub is_new: bool,
}

static SHOWCASE: Lazy<DashboardOverview> = Lazy::new(|| DashboardOverview {
    stats: EngagementStats {
        total_views: 8547,
        total_likes: 1234,
        total_comments: 156,
        new_content: 12,
    },
    featured: vec![
        FeaturedContent {
            id: 1,
            kind: ContentKind::Photo,
            title: "Ensaio Exclusivo - Praia".to_string(),
            thumbnail: "/images/preview1.jpg".to_string(),
            duration: None,
            views: "2.3K".to_string(),
            likes: "456".to_string(),
            is_new: true,
        },
        FeaturedContent {
            id: 2,
            kind: ContentKind::Video,
            title: "Vídeo Especial - Bastidores".to_string(),
            thumbnail: "/images/video-thumb1.jpg".to_string(),
            duration: Some("05:24".to_string()),
            views: "1.8K".to_string(),
            likes: "312".to_string(),
            is_new: true,
        },
        FeaturedContent {
            id: 3,
            kind: ContentKind::Photo,
            title: "Sessão Íntima".to_string(),
            thumbnail: "/images/preview2.jpg".to_string(),
            duration: None,
            views: "3.1K".to_string(),
            likes: "678".to_string(),
            is_new: false,
        },
    ],
});

impl DashboardOverview {
    /// The fixed overview served to every subscriber.
    pub fn showcase() -> &'static DashboardOverview {
        &SHOWCASE
    }

    pub fn new_items(&self) -> impl Iterator<Item = &FeaturedContent> {
        self.featured.iter().filter(|item| item.is_new)
    }
}

#[cfg(test)]
#[path = "overview_test.rs"]
mod overview_test;
