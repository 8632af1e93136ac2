use crate::core::dashboard::{format_npr, DashboardOverview};
use crate::domain::model::{Category, Course, ForumPost, Gig, Notification, Order};
use crate::domain::ports::Listing;
use crate::utils::error::{MarketError, Result};
use serde::Serialize;

pub const NO_RESULTS: &str = "No results found. Try adjusting your filters or search term.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

#[derive(Debug, Serialize)]
struct ListingRow<'a> {
    id: &'a str,
    title: &'a str,
    category: &'a str,
    price: u64,
}

impl<'a> ListingRow<'a> {
    fn from_listing<T: Listing>(item: &'a T) -> Self {
        Self {
            id: item.id(),
            title: item.title(),
            category: item.category().map(|c| c.id()).unwrap_or("-"),
            price: item.price(),
        }
    }
}

/// 每行結尾補上換行
fn join_lines(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// 查詢結果輸出；空結果在表格模式下顯示提示文字
pub fn render_listings<T: Listing + Serialize>(items: &[&T], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(items)?),
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            if items.is_empty() {
                writer.write_record(["id", "title", "category", "price"])?;
            }
            for item in items {
                writer.serialize(ListingRow::from_listing(*item))?;
            }
            let data = writer
                .into_inner()
                .map_err(|e| MarketError::IoError(e.into_error()))?;
            Ok(String::from_utf8_lossy(&data).into_owned())
        }
        OutputFormat::Table => {
            if items.is_empty() {
                return Ok(format!("{}\n", NO_RESULTS));
            }
            let mut lines: Vec<String> = items
                .iter()
                .map(|item| {
                    let row = ListingRow::from_listing(*item);
                    format!(
                        "{:<4} {:<12} {:>12}  {}",
                        row.id,
                        row.category,
                        format_npr(row.price),
                        row.title
                    )
                })
                .collect();
            lines.push(format!("\n{} result(s)", items.len()));
            Ok(join_lines(lines))
        }
    }
}

pub fn render_categories() -> String {
    join_lines(
        Category::ALL
            .iter()
            .map(|category| format!("{:<10} {}", category.id(), category.display_name()))
            .collect(),
    )
}

pub fn render_gig(gig: &Gig) -> String {
    let mut lines = vec![
        format!("{} [{}]", gig.title, gig.category.display_name()),
        format!(
            "★ {:.1} ({} reviews) · {} views",
            gig.rating, gig.review_count, gig.views_count
        ),
        format!("\n{}\n", gig.description),
    ];
    for (tier, package) in [
        ("Basic", &gig.packages.basic),
        ("Standard", &gig.packages.standard),
        ("Premium", &gig.packages.premium),
    ] {
        lines.push(format!(
            "{:<9} {:<16} {:>12}  {} day(s), {} revision(s)",
            tier,
            package.name,
            format_npr(package.price),
            package.delivery_days,
            package.revisions
        ));
        if !package.features.is_empty() {
            lines.push(format!("          {}", package.features.join(", ")));
        }
    }
    lines.extend(gig.faq.iter().map(|faq| format!("\nQ: {}\nA: {}", faq.q, faq.a)));
    join_lines(lines)
}

pub fn render_course(course: &Course) -> String {
    let price = if course.price == 0 {
        "Free".to_string()
    } else {
        format_npr(course.price)
    };
    let mut lines = vec![
        format!("{} by {}", course.title, course.instructor),
        format!(
            "★ {:.1} · {} students · {}",
            course.rating, course.students, price
        ),
        format!("\n{}\n", course.description),
    ];
    lines.extend(
        course
            .lessons
            .iter()
            .enumerate()
            .map(|(i, lesson)| format!("{:>2}. {:<40} {}", i + 1, lesson.title, lesson.duration)),
    );
    join_lines(lines)
}

pub fn render_forum_post(post: &ForumPost) -> String {
    let mut lines = vec![
        format!("[{}] {}", post.tag, post.title),
        format!(
            "{} · {} · {} replies · {} views",
            post.user, post.timestamp, post.replies, post.views
        ),
        format!("\n{}", post.content),
    ];
    lines.extend(
        post.comments
            .iter()
            .map(|c| format!("\n  {} ({}): {}", c.user, c.time, c.text)),
    );
    join_lines(lines)
}

pub fn render_overview(overview: &DashboardOverview, orders: &[&Order]) -> String {
    let mut lines = vec![
        format!("Dashboard for {}", overview.name),
        format!("  Total Earnings   {}", overview.earnings_label),
        format!("  Open Orders      {}", overview.open_orders),
        format!("  Avg Response     {}m", overview.response_time_mins),
        format!("  Profile Strength {}%", overview.profile_strength),
        format!("  Notifications    {} unread", overview.unread_notifications),
        "\nOrders:".to_string(),
    ];
    if orders.is_empty() {
        lines.push("  (none)".to_string());
    }
    lines.extend(orders.iter().map(|order| {
        format!(
            "  {:<3} {:<10} {:>12}  due {}  {:>3}%  {} ({})",
            order.id,
            format!("{:?}", order.status),
            format_npr(order.amount),
            order.due_date,
            order.progress,
            order.gig_title,
            order.client_name
        )
    }));
    join_lines(lines)
}

/// 通知列表，未讀的以 `*` 標示
pub fn render_notifications(notifications: &[Notification]) -> String {
    if notifications.is_empty() {
        return "No notifications.\n".to_string();
    }
    join_lines(
        notifications
            .iter()
            .map(|n| {
                let marker = if n.read { ' ' } else { '*' };
                format!("{} {:<28} {:>12}\n  {}", marker, n.title, n.time, n.message)
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::Catalog;
    use crate::core::query::{QueryParams, SortMode};

    #[test]
    fn test_empty_table_shows_no_results() {
        let catalog = Catalog::builtin().unwrap();
        let results = catalog.search_gigs(&QueryParams::default().with_term("blockchain"));
        let out = render_listings(&results, OutputFormat::Table).unwrap();
        assert_eq!(out.trim(), NO_RESULTS);
    }

    #[test]
    fn test_csv_rows_follow_sort_order() {
        let catalog = Catalog::builtin().unwrap();
        let results = catalog.search_gigs(
            &QueryParams::default()
                .with_price_ceiling(8000)
                .with_sort(SortMode::PriceAsc),
        );
        let out = render_listings(&results, OutputFormat::Csv).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "id,title,category,price");
        assert!(lines[1].starts_with("g4,"));
        assert!(lines[2].starts_with("g3,"));
        assert!(lines[3].starts_with("g1,"));
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_json_keeps_full_records() {
        let catalog = Catalog::builtin().unwrap();
        let results = catalog.search_courses(&QueryParams::default().with_term("react"));
        let out = render_listings(&results, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["id"], "c2");
        assert_eq!(value[0]["lessons"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_gig_detail_lists_all_tiers() {
        let catalog = Catalog::builtin().unwrap();
        let out = render_gig(catalog.gig_or_first("g1").unwrap());
        assert!(out.contains("Spark"));
        assert!(out.contains("Rs 65,000"));
        assert!(out.contains("Nepali font support"));
    }

    #[test]
    fn test_notifications_mark_unread() {
        let catalog = Catalog::builtin().unwrap();
        let out = render_notifications(catalog.notifications());
        let unread = out.lines().filter(|line| line.starts_with('*')).count();
        assert_eq!(unread, catalog.unread_notifications());
        assert_eq!(render_notifications(&[]), "No notifications.\n");
    }

    #[test]
    fn test_overview_without_orders() {
        let catalog = Catalog::builtin().unwrap();
        let user = catalog.template_user().unwrap();
        let overview = DashboardOverview::build(user, &catalog);
        let out = render_overview(&overview, &[]);
        assert!(out.starts_with("Dashboard for Sanjeev Sharma\n"));
        assert!(out.ends_with("Orders:\n  (none)\n"));
    }
}
