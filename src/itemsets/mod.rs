//! Itemsets and the set algebra used to derive closed sets, maximal sets,
//! and the negative border of a frequent-itemset family.

mod algebra;
mod collection;
mod itemset;

pub use algebra::{closed, maximal, negative_border};
pub use collection::ItemsetCollection;
pub use itemset::Itemset;
