//! Layout data model: words, clusters and columns.

mod cluster;
mod column;
mod word;

pub use cluster::{Cluster, ContentSignature};
pub use column::Column;
pub use word::{RawWord, Word};
