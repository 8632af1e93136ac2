use crate::app::render::OutputFormat;
use crate::core::query::{parse_price_ceiling, CategoryFilter, QueryParams, SortMode};
use crate::domain::model::{OrderStatus, Theme, UserRole};
use crate::utils::error::{MarketError, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Clone, Parser)]
#[command(name = "kaamkhoj")]
#[command(about = "Browse the KaamKhoj freelance marketplace from the terminal")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "kaamkhoj.toml")]
    pub config: String,

    /// Override the session storage directory from config
    #[arg(long)]
    pub storage: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Search gigs in the marketplace
    Gigs(FilterArgs),
    /// Search the job board (price = minimum budget)
    Jobs(FilterArgs),
    /// Search academy courses
    Courses(FilterArgs),
    /// Show a single record; unknown ids fall back to the first one
    Show {
        #[arg(value_enum)]
        kind: DetailKind,
        id: String,
    },
    /// List marketplace categories
    Categories,
    Login(LoginArgs),
    Logout,
    Whoami,
    /// List notifications, unread ones marked with '*'
    Notifications,
    /// Show or change the theme
    Theme {
        #[arg(value_enum)]
        choice: Option<ThemeChoice>,
    },
    Dashboard {
        /// Only show orders with this status (active, delivered, completed, cancelled)
        #[arg(long)]
        orders: Option<String>,
    },
    Suggest {
        #[command(subcommand)]
        target: SuggestTarget,
    },
}

#[derive(Debug, Clone, Args)]
pub struct FilterArgs {
    #[arg(short, long)]
    pub search: Option<String>,

    /// Category id or 'all' (default: all)
    #[arg(long)]
    pub category: Option<String>,

    #[arg(long)]
    pub max_price: Option<String>,

    /// recommended, price_asc or price_desc (default: recommended)
    #[arg(long)]
    pub sort: Option<String>,

    /// Marketplace deep link query, e.g. "search=logo&category=design";
    /// explicit filter flags override the link
    #[arg(long)]
    pub link: Option<String>,

    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

impl FilterArgs {
    /// 設定值 → 連結 → 明確指定的旗標，後者覆蓋前者
    pub fn to_params(&self, default_price_ceiling: u64) -> Result<QueryParams> {
        let mut params = QueryParams::default().with_price_ceiling(default_price_ceiling);
        if let Some(link) = &self.link {
            params = params.merge_query_string(link)?;
        }

        if let Some(search) = &self.search {
            params = params.with_term(search.clone());
        }
        if let Some(category) = &self.category {
            let category: CategoryFilter =
                category.parse().map_err(|reason| MarketError::InvalidQuery {
                    field: "category".to_string(),
                    value: category.clone(),
                    reason,
                })?;
            params = params.with_category(category);
        }
        if let Some(value) = &self.max_price {
            params = params.with_price_ceiling(parse_price_ceiling(value)?);
        }
        if let Some(sort) = &self.sort {
            let sort: SortMode = sort.parse().map_err(|reason| MarketError::InvalidQuery {
                field: "sort".to_string(),
                value: sort.clone(),
                reason,
            })?;
            params = params.with_sort(sort);
        }

        Ok(params)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DetailKind {
    Gig,
    Course,
    Forum,
}

#[derive(Debug, Clone, Args)]
pub struct LoginArgs {
    #[arg(long)]
    pub email: String,

    /// client, freelancer, agency or admin
    #[arg(long, default_value = "freelancer")]
    pub role: String,

    /// Create a new account instead of logging in
    #[arg(long, requires_all = ["name", "phone"])]
    pub signup: bool,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,
}

impl LoginArgs {
    pub fn role(&self) -> Result<UserRole> {
        self.role.parse().map_err(|reason| MarketError::InvalidConfigValueError {
            field: "role".to_string(),
            value: self.role.clone(),
            reason,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeChoice {
    Dark,
    Light,
    Toggle,
}

impl ThemeChoice {
    pub fn as_theme(&self) -> Option<Theme> {
        match self {
            ThemeChoice::Dark => Some(Theme::Dark),
            ThemeChoice::Light => Some(Theme::Light),
            ThemeChoice::Toggle => None,
        }
    }
}

#[derive(Debug, Clone, Subcommand)]
pub enum SuggestTarget {
    /// Profile visibility tip for the logged-in user
    Profile,
    /// Gig description draft
    Gig {
        #[arg(long)]
        title: String,
        #[arg(long)]
        category: String,
        #[arg(long, value_delimiter = ',')]
        skills: Vec<String>,
    },
    /// Proposal draft for a job post, using the logged-in user's skills
    Proposal {
        /// Job post id
        job_id: String,
    },
}

pub fn parse_order_status(value: &str) -> Result<OrderStatus> {
    value.parse().map_err(|reason| MarketError::InvalidQuery {
        field: "orders".to_string(),
        value: value.to_string(),
        reason,
    })
}
