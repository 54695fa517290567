pub mod extract;
pub mod tables;

pub use tables::{LocatedTable, TableSignature, find_table, find_tables, reattach_detached_bodies, row_cells};
