//! Role-to-permission aggregation

mod aggregator;

pub use aggregator::PermissionAggregator;
