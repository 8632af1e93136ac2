use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 市集分類（固定集合）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Design,
    Dev,
    Writing,
    Marketing,
    Video,
    Business,
    Ai,
    Mobile,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Design,
        Category::Dev,
        Category::Writing,
        Category::Marketing,
        Category::Video,
        Category::Business,
        Category::Ai,
        Category::Mobile,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Category::Design => "design",
            Category::Dev => "dev",
            Category::Writing => "writing",
            Category::Marketing => "marketing",
            Category::Video => "video",
            Category::Business => "business",
            Category::Ai => "ai",
            Category::Mobile => "mobile",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Design => "Graphic Design",
            Category::Dev => "Programming",
            Category::Writing => "Writing/Translation",
            Category::Marketing => "Digital Marketing",
            Category::Video => "Video & Animation",
            Category::Business => "Business",
            Category::Ai => "AI Services",
            Category::Mobile => "Mobile Apps",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.id() == s)
            .ok_or_else(|| format!("unknown category '{}'", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Client,
    Freelancer,
    Admin,
    Agency,
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "client" => Ok(UserRole::Client),
            "freelancer" => Ok(UserRole::Freelancer),
            "admin" => Ok(UserRole::Admin),
            "agency" => Ok(UserRole::Agency),
            other => Err(format!("unknown role '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationStatus {
    Unverified,
    Pending,
    Verified,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rarity {
    Common,
    Rare,
    Elite,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: String,
    pub title: String,
    pub icon: String,
    pub description: String,
    pub rarity: Rarity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_earned: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioItem {
    pub id: String,
    pub title: String,
    pub image_url: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    pub tags: Vec<String>,
    pub is_featured: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BadgeType {
    Verified,
    TopRated,
    OnTime,
    Expert,
    FastResponder,
    #[serde(rename = "LEVEL_1")]
    Level1,
    #[serde(rename = "LEVEL_2")]
    Level2,
    RisingStar,
    TaxCompliant,
    AgencyCertified,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Badge {
    #[serde(rename = "type")]
    pub badge_type: BadgeType,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Availability {
    Available,
    Busy,
    Away,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: UserRole,
    pub avatar: String,
    pub skills: Vec<String>,
    pub verification_status: VerificationStatus,
    pub badges: Vec<Badge>,
    pub achievements: Vec<Achievement>,
    pub rating: f32,
    pub review_count: u32,
    pub completion_rate: u32,
    pub is_vacation_mode: bool,
    pub is_agency: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agency_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_members: Option<Vec<String>>,
    pub referral_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pan_vat_number: Option<String>,
    pub location: String,
    pub bio: String,
    pub portfolio: Vec<PortfolioItem>,
    pub availability: Availability,
    pub member_since: String,
    pub response_time_mins: u32,
    #[serde(rename = "totalEarnedNPR")]
    pub total_earned_npr: u64,
    pub profile_strength: u32,
    pub last_active: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddOn {
    pub title: String,
    pub price: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: u64,
    pub delivery_days: u32,
    pub revisions: u32,
    pub features: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub add_ons: Vec<AddOn>,
}

/// 三個固定價格級距
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Packages {
    pub basic: Package,
    pub standard: Package,
    pub premium: Package,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Faq {
    pub q: String,
    pub a: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gig {
    pub id: String,
    pub freelancer_id: String,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub thumbnail: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_intro_url: Option<String>,
    pub packages: Packages,
    pub rating: f32,
    pub review_count: u32,
    pub faq: Vec<Faq>,
    pub delivery_history: Vec<String>,
    #[serde(default)]
    pub is_flash_gig: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flash_expires_at: Option<String>,
    pub views_count: u64,
    pub clicks_count: u64,
}

impl Gig {
    /// 起始價格（basic 級距）
    pub fn starting_price(&self) -> u64 {
        self.packages.basic.price
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub min: u64,
    pub max: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    Open,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPost {
    pub id: String,
    pub client_id: String,
    pub client_name: String,
    pub client_avatar: String,
    pub title: String,
    pub description: String,
    pub budget: Budget,
    pub category: Category,
    pub skills: Vec<String>,
    pub posted_at: String,
    pub proposals_count: u32,
    pub status: JobStatus,
    pub location: String,
    #[serde(rename = "type")]
    pub job_type: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Active,
    Delivered,
    Completed,
    Cancelled,
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "active" => Ok(OrderStatus::Active),
            "delivered" => Ok(OrderStatus::Delivered),
            "completed" => Ok(OrderStatus::Completed),
            "cancelled" | "canceled" => Ok(OrderStatus::Cancelled),
            other => Err(format!("unknown order status '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub gig_id: String,
    pub gig_title: String,
    pub gig_thumbnail: String,
    pub client_id: String,
    pub client_name: String,
    pub amount: u64,
    pub status: OrderStatus,
    pub due_date: chrono::NaiveDate,
    pub progress: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    pub title: String,
    pub duration: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub title: String,
    pub instructor: String,
    pub students: u32,
    pub rating: f32,
    pub image: String,
    pub price: u64,
    pub description: String,
    pub lessons: Vec<Lesson>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub user: String,
    pub text: String,
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForumPost {
    pub id: String,
    pub user: String,
    pub avatar: String,
    pub title: String,
    pub content: String,
    pub replies: u32,
    pub views: u32,
    pub tag: String,
    pub timestamp: String,
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub message: String,
    pub time: String,
    pub read: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            other => Err(format!("unknown theme '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_round_trip_ids() {
        for category in Category::ALL {
            assert_eq!(category.id().parse::<Category>().unwrap(), category);
        }
        assert!("food".parse::<Category>().is_err());
        assert_eq!(Category::Ai.display_name(), "AI Services");
    }

    #[test]
    fn test_badge_level_serialization() {
        let badge: Badge =
            serde_json::from_str(r#"{"type":"LEVEL_2","label":"Level 2 Seller"}"#).unwrap();
        assert_eq!(badge.badge_type, BadgeType::Level2);
        let badge: Badge =
            serde_json::from_str(r#"{"type":"TAX_COMPLIANT","label":"PAN Registered"}"#).unwrap();
        assert_eq!(badge.badge_type, BadgeType::TaxCompliant);
    }

    #[test]
    fn test_theme_toggle() {
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!("light".parse::<Theme>().unwrap(), Theme::Light);
    }
}
