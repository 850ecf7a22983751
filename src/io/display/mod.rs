//! Plain-text previews of tables.

mod options;
mod table;

pub use options::DisplayOptions;
