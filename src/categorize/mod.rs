use rust_decimal::Decimal;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

use crate::ledger::Ledger;
use crate::models::Transaction;

/// Description markers that drive the filter pipeline. Every match is a
/// case-sensitive literal substring.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub(crate) struct CategoryRules {
    /// Moves between the owner's own accounts.
    pub(crate) transfer_markers: Vec<String>,
    /// Inflows containing this are government payments.
    pub(crate) government_marker: String,
    /// E-transfers in and employer pay.
    pub(crate) income_markers: Vec<String>,
}

impl Default for CategoryRules {
    fn default() -> Self {
        Self {
            transfer_markers: vec![
                "PAYMENT".into(),
                "Payment".into(),
                "C/C".into(),
                "NEO FINANCE".into(),
            ],
            government_marker: "CANADA ".into(),
            income_markers: vec!["E-TRANSFER".into(), "U of T".into()],
        }
    }
}

/// Does `description` contain any of `keywords`?
pub(crate) fn contains_any<S: AsRef<str>>(description: &str, keywords: &[S]) -> bool {
    keywords.iter().any(|k| description.contains(k.as_ref()))
}

pub(crate) struct Categorizer {
    rules: CategoryRules,
}

impl Categorizer {
    pub(crate) fn new(rules: CategoryRules) -> Self {
        Self { rules }
    }

    /// Run the pipeline. Each stage only sees what the previous stages left,
    /// so every transaction lands in exactly one bucket.
    pub(crate) fn split<'a>(&self, ledger: &'a Ledger) -> Breakdown<'a> {
        let mut breakdown = Breakdown::default();

        for txn in ledger.transactions() {
            let desc = txn.description.as_str();
            if contains_any(desc, &self.rules.transfer_markers) {
                breakdown.transfers.push(txn);
            } else if desc.contains(self.rules.government_marker.as_str()) && txn.is_inflow() {
                breakdown.government.push(txn);
            } else if contains_any(desc, &self.rules.income_markers) {
                breakdown.income.push(txn);
            } else {
                breakdown.expenses.push(txn);
            }
        }

        breakdown
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Bucket {
    Transfers,
    Government,
    Income,
    Expenses,
}

impl Bucket {
    pub(crate) const ALL: [Bucket; 4] = [
        Bucket::Transfers,
        Bucket::Government,
        Bucket::Income,
        Bucket::Expenses,
    ];

    pub(crate) fn name(self) -> &'static str {
        match self {
            Self::Transfers => "transfers",
            Self::Government => "government",
            Self::Income => "income",
            Self::Expenses => "expenses",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Bucket {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|b| b.name() == s.to_lowercase())
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown bucket: {s} (expected transfers, government, income or expenses)"
                )
            })
    }
}

/// The ledger split into disjoint, ledger-ordered subsets.
#[derive(Debug, Default)]
pub(crate) struct Breakdown<'a> {
    pub(crate) transfers: Vec<&'a Transaction>,
    pub(crate) government: Vec<&'a Transaction>,
    pub(crate) income: Vec<&'a Transaction>,
    pub(crate) expenses: Vec<&'a Transaction>,
}

impl<'a> Breakdown<'a> {
    pub(crate) fn bucket(&self, bucket: Bucket) -> &[&'a Transaction] {
        match bucket {
            Bucket::Transfers => &self.transfers,
            Bucket::Government => &self.government,
            Bucket::Income => &self.income,
            Bucket::Expenses => &self.expenses,
        }
    }

    pub(crate) fn total(&self, bucket: Bucket) -> Decimal {
        sum_amounts(self.bucket(bucket))
    }

    /// Sum over every bucket; equals the ledger total.
    pub(crate) fn grand_total(&self) -> Decimal {
        Bucket::ALL.into_iter().map(|b| self.total(b)).sum()
    }

    pub(crate) fn len(&self) -> usize {
        Bucket::ALL.into_iter().map(|b| self.bucket(b).len()).sum()
    }

    /// Expenses whose description contains any of `keywords`. An empty
    /// keyword list matches nothing.
    pub(crate) fn search<S: AsRef<str>>(&self, keywords: &[S]) -> Vec<&'a Transaction> {
        self.expenses
            .iter()
            .copied()
            .filter(|t| contains_any(&t.description, keywords))
            .collect()
    }

    /// Total spent on expenses matching `keywords`.
    pub(crate) fn sum<S: AsRef<str>>(&self, keywords: &[S]) -> Decimal {
        sum_amounts(&self.search(keywords))
    }

    /// Income narrowed to one marker, e.g. e-transfers only.
    pub(crate) fn income_matching(&self, marker: &str) -> Vec<&'a Transaction> {
        self.income
            .iter()
            .copied()
            .filter(|t| t.description.contains(marker))
            .collect()
    }
}

fn sum_amounts(txns: &[&Transaction]) -> Decimal {
    txns.iter().map(|t| t.amount).sum()
}
