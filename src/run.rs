mod cli;

pub(crate) use cli::as_cli;

use rust_decimal::Decimal;

use crate::models::Transaction;

pub(crate) fn money(amount: Decimal) -> String {
    format!("${:.2}", amount)
}

pub(crate) fn print_transactions<'a, I>(rows: I)
where
    I: IntoIterator<Item = (usize, &'a Transaction)>,
{
    println!("{:>5}  {:<10}  {:>12}  Description", "#", "Date", "Amount");
    println!("{}", "─".repeat(60));
    for (index, txn) in rows {
        println!(
            "{:>5}  {:<10}  {:>12}  {}",
            index,
            txn.date.format("%Y-%m-%d").to_string(),
            money(txn.amount),
            txn.description
        );
    }
}
