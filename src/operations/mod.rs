pub mod query;
pub mod relate;
