use crate::domain::model::{Category, Course, Gig, JobPost};
use crate::domain::ports::Listing;
use crate::utils::error::{MarketError, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_PRICE_CEILING: u64 = 100_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    fn accepts(&self, category: Option<Category>) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => category == Some(*wanted),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s == "all" {
            Ok(CategoryFilter::All)
        } else {
            s.parse::<Category>().map(CategoryFilter::Only)
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("all"),
            CategoryFilter::Only(category) => write!(f, "{}", category),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    #[default]
    #[serde(alias = "default", alias = "relevance")]
    Recommended,
    #[serde(alias = "price_low")]
    PriceAsc,
    #[serde(alias = "price_high")]
    PriceDesc,
}

impl FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "recommended" | "default" | "relevance" => Ok(SortMode::Recommended),
            "price_asc" | "price_low" => Ok(SortMode::PriceAsc),
            "price_desc" | "price_high" => Ok(SortMode::PriceDesc),
            other => Err(format!("unknown sort mode '{}'", other)),
        }
    }
}

/// 單次查詢的篩選與排序條件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParams {
    pub term: String,
    pub category: CategoryFilter,
    pub price_ceiling: u64,
    pub sort: SortMode,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            term: String::new(),
            category: CategoryFilter::All,
            price_ceiling: DEFAULT_PRICE_CEILING,
            sort: SortMode::Recommended,
        }
    }
}

impl QueryParams {
    pub fn with_term(mut self, term: impl Into<String>) -> Self {
        self.term = term.into();
        self
    }

    pub fn with_category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    pub fn with_price_ceiling(mut self, price_ceiling: u64) -> Self {
        self.price_ceiling = price_ceiling;
        self
    }

    pub fn with_sort(mut self, sort: SortMode) -> Self {
        self.sort = sort;
        self
    }

    /// 解析市集深層連結的查詢字串，例如 `?search=logo&category=design`
    pub fn from_query_string(query: &str) -> Result<Self> {
        Self::default().merge_query_string(query)
    }

    /// 把連結中有值的參數疊加到目前條件上，沒帶或空值的參數維持原值
    pub fn merge_query_string(self, query: &str) -> Result<Self> {
        let mut params = self;
        let raw = query.trim_start_matches('?');

        for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
            // 空值沿用預設
            if value.is_empty() {
                continue;
            }
            match key.as_ref() {
                "search" => params.term = value.into_owned(),
                "category" => {
                    params.category = value.parse().map_err(|reason| MarketError::InvalidQuery {
                        field: "category".to_string(),
                        value: value.to_string(),
                        reason,
                    })?;
                }
                "max_price" => {
                    params.price_ceiling = parse_price_ceiling(&value)?;
                }
                "sort" => {
                    params.sort = value.parse().map_err(|reason| MarketError::InvalidQuery {
                        field: "sort".to_string(),
                        value: value.to_string(),
                        reason,
                    })?;
                }
                other => tracing::debug!("Ignoring unknown query parameter: {}", other),
            }
        }

        Ok(params)
    }

    pub fn matches<T: Listing + ?Sized>(&self, item: &T) -> bool {
        self.matches_lowered(item, &self.term.to_lowercase())
    }

    fn matches_lowered<T: Listing + ?Sized>(&self, item: &T, needle: &str) -> bool {
        let matches_text = needle.is_empty()
            || item.title().to_lowercase().contains(needle)
            || item.description().to_lowercase().contains(needle);

        matches_text && self.category.accepts(item.category()) && item.price() <= self.price_ceiling
    }
}

pub fn parse_price_ceiling(value: &str) -> Result<u64> {
    match value.trim().parse::<u64>() {
        Ok(0) => Err(MarketError::InvalidQuery {
            field: "max_price".to_string(),
            value: value.to_string(),
            reason: "price ceiling must be positive".to_string(),
        }),
        Ok(ceiling) => Ok(ceiling),
        Err(e) => Err(MarketError::InvalidQuery {
            field: "max_price".to_string(),
            value: value.to_string(),
            reason: e.to_string(),
        }),
    }
}

/// 篩選後依排序模式穩定排序，回傳目錄的子集合
pub fn query<'a, T: Listing>(catalog: &'a [T], params: &QueryParams) -> Vec<&'a T> {
    let needle = params.term.to_lowercase();

    let mut results: Vec<&T> = catalog
        .iter()
        .filter(|item| params.matches_lowered(*item, &needle))
        .collect();

    // sort_by_key 為穩定排序，同價格保留原順序
    match params.sort {
        SortMode::Recommended => {}
        SortMode::PriceAsc => results.sort_by_key(|item| item.price()),
        SortMode::PriceDesc => results.sort_by_key(|item| Reverse(item.price())),
    }

    results
}

/// 不依附特定模型的扁平目錄紀錄
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub price: u64,
}

impl Listing for CatalogItem {
    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn category(&self) -> Option<Category> {
        Some(self.category)
    }

    fn price(&self) -> u64 {
        self.price
    }
}

impl From<&Gig> for CatalogItem {
    fn from(gig: &Gig) -> Self {
        Self {
            id: gig.id.clone(),
            title: gig.title.clone(),
            description: gig.description.clone(),
            category: gig.category,
            price: gig.starting_price(),
        }
    }
}

impl Listing for Gig {
    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn category(&self) -> Option<Category> {
        Some(self.category)
    }

    fn price(&self) -> u64 {
        self.starting_price()
    }
}

impl Listing for JobPost {
    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn category(&self) -> Option<Category> {
        Some(self.category)
    }

    fn price(&self) -> u64 {
        self.budget.min
    }
}

impl Listing for Course {
    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn category(&self) -> Option<Category> {
        None
    }

    fn price(&self) -> u64 {
        self.price
    }
}
