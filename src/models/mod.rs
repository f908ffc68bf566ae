mod format;
mod transaction;

pub use format::StatementFormat;
pub use transaction::Transaction;
