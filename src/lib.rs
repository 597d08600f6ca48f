pub mod analysis;
pub mod args;
pub mod classify;
pub mod dedupe;
pub mod history;
pub mod normalize;
pub mod report;
pub mod stats;
pub mod utils;

pub use analysis::{
    analyze_links, analyze_links_with, AnalyzeOptions, Clock, FixedClock, IdSource, LinkAnalysis,
    SequentialIdSource, SystemClock, UuidSource,
};
pub use args::Args;
pub use classify::LinkRow;
pub use history::{History, HISTORY_CAPACITY};
pub use stats::{top_entries, Distributions, Metrics};
