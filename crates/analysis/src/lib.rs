pub mod close_time;
pub mod counts;
pub mod filter;
pub mod monthly;
pub mod summary;

pub use close_time::{average_close_time_by_label, LabelCloseTime};
pub use counts::{rank_counts, Count};
pub use filter::{filter_issues, label_activity, CreatorLabelCounts, LabelActivity};
pub use monthly::{monthly_histogram, MonthlyHistogram};
pub use summary::{summary, top_closers, HistogramBin, ResolutionStats, Summary};

pub(crate) const SECONDS_PER_DAY: f64 = 86_400.0;
