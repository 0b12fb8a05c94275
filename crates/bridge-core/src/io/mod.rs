pub mod lin;
pub mod pbn;
