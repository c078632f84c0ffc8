mod date_resolver;
mod main;
mod path_planner;
mod sort_engine;

pub use date_resolver::{EffectiveDate, resolve_effective_date};
pub use main::MediaSorter;
pub use path_planner::{TransferPlan, plan_transfer};
pub use sort_engine::{
    MediaSortEngine, SortEvent, SortOptions, SortReport, destination_nested_in_source,
};
