mod mock_static_table;

pub use mock_static_table::*;
