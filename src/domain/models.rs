use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whole currency units. Rupiah has no minor unit in everyday use.
pub type Amount = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Income,
    Expense,
}

/// One transaction line parsed out of a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    pub group_label: String,
    pub amount: Amount,
    pub kind: EntryKind,
}

impl LineItem {
    pub fn new(group_label: impl Into<String>, amount: Amount, kind: EntryKind) -> Self {
        Self {
            group_label: group_label.into(),
            amount,
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSummary {
    pub title: String,
    pub income_total: Amount,
    pub expense_total: Amount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TotalsSummary {
    pub total_income: Amount,
    pub total_expense: Amount,
    pub free_cash: Amount,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Summary {
    pub totals: TotalsSummary,
    pub groups: Vec<GroupSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(pub String);

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageKind {
    #[default]
    Note,
    Budget,
    Template,
}

impl PageKind {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            PageKind::Note => "note",
            PageKind::Budget => "budget",
            PageKind::Template => "template",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub id: PageId,
    pub title: String,
    pub kind: PageKind,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub meta: PageMeta,
    pub body: String,
}
