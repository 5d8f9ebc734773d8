//! Standalone index quote collector.
//!
//! 이 crate는 지수 목록 페이지를 수집하는 바이너리를 제공합니다:
//! - 브라질/중국/미국 지수 페이지 수집 (HTTP 또는 스냅샷)
//! - 지수 테이블 추출 및 섹터 분류
//! - PostgreSQL 저장 및 상위 지수 리포트

pub mod config;
pub mod error;
pub mod modules;
pub mod stats;

pub use config::CollectorConfig;
pub use error::{CollectorError, Result};
pub use stats::CollectionStats;
