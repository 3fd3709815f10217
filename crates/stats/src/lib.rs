pub mod percentile;
pub mod rolling;
pub mod summary;

pub use percentile::IntegerStats;
pub use rolling::RollingWindow;
pub use summary::RunningSummary;
