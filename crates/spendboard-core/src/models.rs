//! Data models for Spendboard

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

/// Spending category assigned to every transaction
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum Category {
    Groceries,
    Shopping,
    Restaurants,
    Drinks,
    Transport,
    Entertainment,
    Fuel,
    HealthCare,
    SelfCare,
    #[default]
    #[serde(rename = "unassigned")]
    Unassigned,
}

impl Category {
    /// Categories that keyword rules can assign, in evaluation order
    pub const RULE_ORDER: [Category; 9] = [
        Self::Groceries,
        Self::Shopping,
        Self::Restaurants,
        Self::Drinks,
        Self::Transport,
        Self::Entertainment,
        Self::Fuel,
        Self::HealthCare,
        Self::SelfCare,
    ];

    /// Every label a transaction can carry
    pub const ALL: [Category; 10] = [
        Self::Groceries,
        Self::Shopping,
        Self::Restaurants,
        Self::Drinks,
        Self::Transport,
        Self::Entertainment,
        Self::Fuel,
        Self::HealthCare,
        Self::SelfCare,
        Self::Unassigned,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Groceries => "Groceries",
            Self::Shopping => "Shopping",
            Self::Restaurants => "Restaurants",
            Self::Drinks => "Drinks",
            Self::Transport => "Transport",
            Self::Entertainment => "Entertainment",
            Self::Fuel => "Fuel",
            Self::HealthCare => "HealthCare",
            Self::SelfCare => "SelfCare",
            Self::Unassigned => "unassigned",
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "groceries" => Ok(Self::Groceries),
            "shopping" => Ok(Self::Shopping),
            "restaurants" => Ok(Self::Restaurants),
            "drinks" => Ok(Self::Drinks),
            "transport" => Ok(Self::Transport),
            "entertainment" => Ok(Self::Entertainment),
            "fuel" => Ok(Self::Fuel),
            "healthcare" | "health care" => Ok(Self::HealthCare),
            "selfcare" | "self care" => Ok(Self::SelfCare),
            "unassigned" => Ok(Self::Unassigned),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Dashboard tab selection: everything, or a single category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Selection {
    Total,
    Category(Category),
}

impl Selection {
    /// Tab shown when the dashboard first opens
    pub const DEFAULT: Selection = Selection::Category(Category::Groceries);

    /// Whether a transaction with `category` belongs to this selection
    pub fn includes(&self, category: Category) -> bool {
        match self {
            Self::Total => true,
            Self::Category(selected) => *selected == category,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Total => "Total",
            Self::Category(c) => c.as_str(),
        }
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl FromStr for Selection {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "total" | "total spending" => Ok(Self::Total),
            _ => s
                .parse::<Category>()
                .map(Self::Category)
                .map_err(|_| format!("Unknown selection: {} (use Total or a category)", s)),
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for Selection {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Selection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A dashboard tab (label shown, value sent back on selection)
#[derive(Debug, Clone, Serialize)]
pub struct Tab {
    pub label: &'static str,
    pub value: Selection,
}

/// The ten dashboard tabs: each rule category, then the all-categories view
pub fn tabs() -> Vec<Tab> {
    let mut tabs: Vec<Tab> = Category::RULE_ORDER
        .iter()
        .map(|c| Tab {
            label: c.as_str(),
            value: Selection::Category(*c),
        })
        .collect();
    tabs.push(Tab {
        label: "Total Spending",
        value: Selection::Total,
    });
    tabs
}

/// Calendar month key, displayed as "Jan 2024"
///
/// Ordering is calendar order (year, then month), unlike the display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthYear {
    year: i32,
    month: u32,
}

impl MonthYear {
    const LABEL_FORMAT: &'static str = "%b %Y";

    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(Error::InvalidData(format!("Invalid month: {}", month)));
        }
        Ok(Self { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// First day of the month
    pub fn first_day(&self) -> NaiveDate {
        // month is validated on construction
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    pub fn label(&self) -> String {
        self.first_day().format(Self::LABEL_FORMAT).to_string()
    }
}

impl FromStr for MonthYear {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        // chrono needs a day to build a date
        let date = NaiveDate::parse_from_str(&format!("1 {}", s.trim()), "%d %b %Y")
            .map_err(|_| Error::InvalidData(format!("Invalid month label: {}", s)))?;
        Ok(Self::from_date(date))
    }
}

impl fmt::Display for MonthYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Serialize for MonthYear {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthYear {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A row as read from the spreadsheet, after column selection
#[derive(Debug, Clone, PartialEq)]
pub struct SourceRow {
    /// 1-based data row number in the sheet (blank rows still count)
    pub row: usize,
    /// Raw completion date text (parsed during enrichment)
    pub date: String,
    /// Merchant/label, lowercased
    pub description: String,
    pub amount: f64,
}

/// A source row with its assigned category
#[derive(Debug, Clone, PartialEq)]
pub struct CategorizedRow {
    pub row: SourceRow,
    pub category: Category,
}

/// A fully enriched transaction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub description: String,
    pub amount: f64,
    pub category: Category,
    pub month: u32,
    pub year: i32,
    pub month_year: MonthYear,
}

impl Transaction {
    /// Build a transaction, deriving month, year and month label from the date
    pub fn new(date: NaiveDate, description: &str, amount: f64, category: Category) -> Self {
        Self {
            date,
            description: description.to_string(),
            amount,
            category,
            month: date.month(),
            year: date.year(),
            month_year: MonthYear::from_date(date),
        }
    }
}

/// The enriched, read-only transaction table in source order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Table {
    transactions: Vec<Transaction>,
}

impl Table {
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Transactions belonging to a selection, in table order
    pub fn select(&self, selection: Selection) -> impl Iterator<Item = &Transaction> {
        self.transactions
            .iter()
            .filter(move |tx| selection.includes(tx.category))
    }

    /// Sum of every amount in the table
    pub fn total_amount(&self) -> f64 {
        self.transactions.iter().map(|tx| tx.amount).sum()
    }
}
