pub mod analyze;
pub mod health;
pub mod verdict;

pub use analyze::analyze;
pub use health::health_check;
pub use verdict::verdict;
