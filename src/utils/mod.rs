pub mod format;
pub mod html;
pub mod table;

pub use table::Table;
