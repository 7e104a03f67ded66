//! Dashboard overview tiles.

/// Platform totals shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metrics {
    pub total_users: u64,
    pub total_admins: u64,
    pub total_revenue: u64,
    pub monthly_revenue: u64,
    pub active_subscriptions: u64,
}

impl Default for Metrics {
    fn default() -> Self {
        Self {
            total_users: 1200,
            total_admins: 24,
            total_revenue: 985_000,
            monthly_revenue: 78_500,
            active_subscriptions: 480,
        }
    }
}

/// One tile. `link` is the page route opened by selecting it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    pub title: &'static str,
    pub value: String,
    pub link: Option<&'static str>,
}

/// `1234567` → `1,234,567`.
pub fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

pub fn tiles(metrics: &Metrics) -> Vec<Tile> {
    vec![
        Tile {
            title: "Total Users",
            value: thousands(metrics.total_users),
            link: Some("users"),
        },
        Tile {
            title: "Total Admins",
            value: thousands(metrics.total_admins),
            link: Some("admins"),
        },
        Tile {
            title: "Active Subscriptions",
            value: thousands(metrics.active_subscriptions),
            link: None,
        },
        Tile {
            title: "Monthly Revenue",
            value: format!("${}", thousands(metrics.monthly_revenue)),
            link: None,
        },
        Tile {
            title: "Total Revenue",
            value: format!("${}", thousands(metrics.total_revenue)),
            link: None,
        },
    ]
}
