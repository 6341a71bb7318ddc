pub mod overview;

pub use overview::{ContentKind, DashboardOverview, EngagementStats, FeaturedContent};
