//! Routed Pages

mod dashboard;
mod feed;
mod gallery;
mod item_detail;
mod landing;
mod profile;
mod report;

pub use dashboard::DashboardPage;
pub use feed::FeedPage;
pub use gallery::GalleryPage;
pub use item_detail::ItemDetailPage;
pub use landing::LandingPage;
pub use profile::ProfilePage;
pub use report::ReportPage;
