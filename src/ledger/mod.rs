use rust_decimal::Decimal;
use std::collections::HashSet;

use crate::import::StatementBatch;
use crate::models::Transaction;

/// Every transaction from every statement, oldest first.
///
/// Transactions that share a date keep the order they were parsed in.
/// Nothing is deduplicated: statements with overlapping periods contribute
/// the shared rows twice.
#[derive(Debug, Clone, Default)]
pub(crate) struct Ledger {
    transactions: Vec<Transaction>,
}

impl Ledger {
    pub(crate) fn assemble<I>(batches: I) -> Self
    where
        I: IntoIterator<Item = Vec<Transaction>>,
    {
        let mut transactions: Vec<Transaction> = batches.into_iter().flatten().collect();
        // `sort_by_key` is stable.
        transactions.sort_by_key(|t| t.date);
        Self { transactions }
    }

    pub(crate) fn from_statements(batches: Vec<StatementBatch>) -> Self {
        Self::assemble(batches.into_iter().map(|b| b.transactions))
    }

    pub(crate) fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Transactions paired with their position, counted from zero.
    pub(crate) fn entries(&self) -> impl Iterator<Item = (usize, &Transaction)> {
        self.transactions.iter().enumerate()
    }

    /// Ledger entries for a subset borrowed from this ledger, so each row
    /// keeps the index `entries` gives it.
    pub(crate) fn entries_of<'a>(
        &'a self,
        subset: &[&'a Transaction],
    ) -> Vec<(usize, &'a Transaction)> {
        let wanted: HashSet<*const Transaction> =
            subset.iter().map(|t| *t as *const Transaction).collect();
        self.entries()
            .filter(|(_, t)| wanted.contains(&(*t as *const Transaction)))
            .collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.transactions.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub(crate) fn total(&self) -> Decimal {
        self.transactions.iter().map(|t| t.amount).sum()
    }
}
