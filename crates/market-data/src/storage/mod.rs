//! 레코드 저장소.
//!
//! 수집 흐름은 `RecordStore`에만 의존하며, 기본 구현은 PostgreSQL
//! (`IndexQuoteRepository`)입니다.

pub mod database;
pub mod index_quote;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use market_core::IndexRecord;

use crate::error::Result;

pub use database::{Database, DatabaseConfig};
pub use index_quote::{IndexQuoteRepository, StoreSummary, TopIndexRow, TopIndicesQuery};

/// 한 시장의 레코드를 저장하는 저장소.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// 국가/섹터 차원 행을 upsert하고 레코드마다 팩트 행을 추가합니다.
    async fn save_market(
        &self,
        country: &str,
        records: &[IndexRecord],
        collected_at: DateTime<Utc>,
    ) -> Result<StoreSummary>;
}
