use crate::core::catalog::Catalog;
use crate::domain::model::{Order, OrderStatus, User};
use serde::Serialize;

/// 儀表板總覽卡片
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardOverview {
    pub name: String,
    pub total_earned_npr: u64,
    pub earnings_label: String,
    pub open_orders: usize,
    pub response_time_mins: u32,
    pub profile_strength: u32,
    pub unread_notifications: usize,
}

impl DashboardOverview {
    pub fn build(user: &User, catalog: &Catalog) -> Self {
        let open_orders = catalog
            .orders()
            .iter()
            .filter(|o| is_open(o))
            .count();

        Self {
            name: user.name.clone(),
            total_earned_npr: user.total_earned_npr,
            earnings_label: format_npr_thousands(user.total_earned_npr),
            open_orders,
            response_time_mins: user.response_time_mins,
            profile_strength: user.profile_strength,
            unread_notifications: catalog.unread_notifications(),
        }
    }
}

/// 尚未結案（進行中或已交付待驗收）
fn is_open(order: &Order) -> bool {
    matches!(order.status, OrderStatus::Active | OrderStatus::Delivered)
}

/// 825000 -> "Rs 825.0k"
pub fn format_npr_thousands(amount: u64) -> String {
    format!("Rs {:.1}k", amount as f64 / 1000.0)
}

/// 25000 -> "Rs 25,000"
pub fn format_npr(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("Rs {}", grouped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overview_for_seed_user() {
        let catalog = Catalog::builtin().unwrap();
        let user = catalog.template_user().unwrap();

        let overview = DashboardOverview::build(user, &catalog);
        assert_eq!(overview.earnings_label, "Rs 825.0k");
        assert_eq!(overview.open_orders, 2);
        assert_eq!(overview.response_time_mins, 38);
        assert_eq!(overview.unread_notifications, 2);
    }

    #[test]
    fn test_amount_formatting() {
        assert_eq!(format_npr(0), "Rs 0");
        assert_eq!(format_npr(999), "Rs 999");
        assert_eq!(format_npr(25_000), "Rs 25,000");
        assert_eq!(format_npr(1_500_000), "Rs 1,500,000");
        assert_eq!(format_npr_thousands(150_000), "Rs 150.0k");
        assert_eq!(format_npr_thousands(0), "Rs 0.0k");
    }
}
