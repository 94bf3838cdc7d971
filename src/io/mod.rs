//! Reading and writing itemset-support files (FIMI convention) and raw
//! transaction files, plus a process-scoped memo of dataset statistics.

mod fimi;
mod stats_cache;
mod transactions;

pub use fimi::{from_collection, read_itemsets, to_collection, write_itemsets, ItemsetSupport};
pub use stats_cache::DatasetStatsCache;
pub use transactions::read_transactions;
