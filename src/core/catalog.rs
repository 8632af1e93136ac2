use crate::core::query::{query, QueryParams};
use crate::domain::model::{
    Course, ForumPost, Gig, JobPost, Notification, Order, OrderStatus, User,
};
use crate::utils::error::{MarketError, Result};
use serde::Deserialize;

const BUILTIN_CATALOG: &str = include_str!("../../data/catalog.json");

/// 啟動時載入一次的靜態目錄，之後不再變動
#[derive(Debug, Clone, Deserialize)]
pub struct Catalog {
    users: Vec<User>,
    gigs: Vec<Gig>,
    jobs: Vec<JobPost>,
    orders: Vec<Order>,
    courses: Vec<Course>,
    forum: Vec<ForumPost>,
    notifications: Vec<Notification>,
}

impl Catalog {
    pub fn builtin() -> Result<Self> {
        Self::from_json_str(BUILTIN_CATALOG)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let catalog: Catalog = serde_json::from_str(content)?;
        tracing::debug!(
            "📦 Catalog loaded: {} gigs, {} jobs, {} courses",
            catalog.gigs.len(),
            catalog.jobs.len(),
            catalog.courses.len()
        );
        Ok(catalog)
    }

    pub fn gigs(&self) -> &[Gig] {
        &self.gigs
    }

    pub fn jobs(&self) -> &[JobPost] {
        &self.jobs
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn forum(&self) -> &[ForumPost] {
        &self.forum
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn unread_notifications(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }

    /// 登入時用來補齊欄位的預設使用者
    pub fn template_user(&self) -> Option<&User> {
        self.users.first()
    }

    pub fn search_gigs(&self, params: &QueryParams) -> Vec<&Gig> {
        query(&self.gigs, params)
    }

    pub fn search_jobs(&self, params: &QueryParams) -> Vec<&JobPost> {
        query(&self.jobs, params)
    }

    pub fn search_courses(&self, params: &QueryParams) -> Vec<&Course> {
        query(&self.courses, params)
    }

    pub fn gig(&self, id: &str) -> Option<&Gig> {
        self.gigs.iter().find(|g| g.id == id)
    }

    pub fn gig_or_first(&self, id: &str) -> Result<&Gig> {
        or_first(&self.gigs, self.gig(id), "Gig", id)
    }

    pub fn course(&self, id: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == id)
    }

    pub fn course_or_first(&self, id: &str) -> Result<&Course> {
        or_first(&self.courses, self.course(id), "Course", id)
    }

    pub fn forum_post(&self, id: &str) -> Option<&ForumPost> {
        self.forum.iter().find(|p| p.id == id)
    }

    pub fn forum_post_or_first(&self, id: &str) -> Result<&ForumPost> {
        or_first(&self.forum, self.forum_post(id), "ForumPost", id)
    }

    pub fn orders_with_status(&self, status: Option<OrderStatus>) -> Vec<&Order> {
        self.orders
            .iter()
            .filter(|o| status.map_or(true, |s| o.status == s))
            .collect()
    }
}

/// 詳細頁找不到 id 時退回第一筆
fn or_first<'a, T>(items: &'a [T], found: Option<&'a T>, kind: &str, id: &str) -> Result<&'a T> {
    if found.is_none() {
        tracing::debug!("{} '{}' not found, falling back to the first record", kind, id);
    }
    found.or_else(|| items.first()).ok_or_else(|| MarketError::NotFound {
        kind: kind.to_string(),
        id: id.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::query::{CategoryFilter, SortMode};
    use crate::domain::model::Category;

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.gigs().len(), 5);
        assert_eq!(catalog.jobs().len(), 4);
        assert_eq!(catalog.courses().len(), 3);
        assert_eq!(catalog.forum().len(), 3);
        assert_eq!(catalog.template_user().unwrap().name, "Sanjeev Sharma");
        assert_eq!(catalog.unread_notifications(), 2);
    }

    #[test]
    fn test_marketplace_design_search() {
        let catalog = Catalog::builtin().unwrap();
        let params = QueryParams::default()
            .with_category(CategoryFilter::Only(Category::Design))
            .with_sort(SortMode::PriceAsc);

        let ids: Vec<&str> = catalog
            .search_gigs(&params)
            .iter()
            .map(|g| g.id.as_str())
            .collect();
        assert_eq!(ids, vec!["g3", "g1"]);
    }

    #[test]
    fn test_job_board_uses_budget_minimum() {
        let catalog = Catalog::builtin().unwrap();
        let params = QueryParams::default()
            .with_price_ceiling(25_000)
            .with_sort(SortMode::PriceDesc);

        let ids: Vec<&str> = catalog
            .search_jobs(&params)
            .iter()
            .map(|j| j.id.as_str())
            .collect();
        assert_eq!(ids, vec!["j2", "j4"]);
    }

    #[test]
    fn test_detail_lookup_falls_back_to_first() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.gig_or_first("g4").unwrap().id, "g4");
        assert_eq!(catalog.gig_or_first("missing").unwrap().id, "g1");
        assert_eq!(catalog.course_or_first("nope").unwrap().id, "c1");
        assert_eq!(catalog.forum_post_or_first("f2").unwrap().id, "f2");
        assert!(catalog.gig("missing").is_none());
    }

    #[test]
    fn test_empty_collection_reports_not_found() {
        let catalog = Catalog::from_json_str(
            r#"{"users":[{"id":"u1","name":"A","email":"a@b.np","phone":"1","role":"CLIENT","avatar":"","skills":[],"verificationStatus":"PENDING","badges":[],"achievements":[],"rating":0,"reviewCount":0,"completionRate":0,"isVacationMode":false,"isAgency":false,"referralCode":"X","location":"Kathmandu","bio":"","portfolio":[],"availability":"AWAY","memberSince":"2024","responseTimeMins":0,"totalEarnedNPR":0,"profileStrength":0,"lastActive":"now"}],
                "gigs":[],"jobs":[],"orders":[],"courses":[],"forum":[],"notifications":[]}"#,
        )
        .unwrap();
        assert!(matches!(
            catalog.gig_or_first("g1"),
            Err(MarketError::NotFound { .. })
        ));
        assert!(catalog.search_gigs(&QueryParams::default()).is_empty());
    }

    #[test]
    fn test_orders_with_status() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.orders_with_status(None).len(), 3);
        let active = catalog.orders_with_status(Some(OrderStatus::Active));
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, "o1");
    }
}
