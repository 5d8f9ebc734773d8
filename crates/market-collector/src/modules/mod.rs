//! 수집기 명령 모듈.

pub mod collect;
pub mod extract_file;
pub mod report;

pub use collect::{build_source, collect_markets, harvest_markets, MarketHarvest};
pub use extract_file::{extract_file, render_report};
pub use report::{render_json, render_table, top_indices};
