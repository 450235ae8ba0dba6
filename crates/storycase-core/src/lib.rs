pub mod error;
pub mod export;
pub mod normalize;
pub mod render;
pub mod test_case;

pub use error::StorycaseError;
pub use export::{export_json, import_json, DEFAULT_EXPORT_FILE};
pub use normalize::normalize_suite;
pub use render::render_suite;
pub use test_case::{Priority, TestCase, TestSuite, TestType};
