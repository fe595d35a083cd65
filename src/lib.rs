use table::TableError;

pub mod hash;
pub mod table;

pub use hash::bucket_index;
pub use table::HashTable;

pub type Result<T> = std::result::Result<T, TableError>;
