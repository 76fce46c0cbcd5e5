pub mod cell;
pub mod sheet_row;

pub use cell::{Cell, Row};
pub use sheet_row::SheetRow;
