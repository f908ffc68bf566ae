use chrono::NaiveDate;
use rust_decimal::Decimal;

/// One normalized statement line.
///
/// Amounts are outflow-positive: money spent is positive, money received
/// is negative, whatever the source statement prints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
}

impl Transaction {
    pub fn new(date: NaiveDate, description: impl Into<String>, amount: Decimal) -> Self {
        Self {
            date,
            description: description.into(),
            amount,
        }
    }

    pub fn is_inflow(&self) -> bool {
        self.amount < Decimal::ZERO
    }
}
