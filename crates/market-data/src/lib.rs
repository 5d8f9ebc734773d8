//! 지수 데이터 추출 및 저장.
//!
//! 이 crate는 다음을 제공합니다:
//! - 현지화된 숫자 파서 (`numeric`)
//! - 섹터 분류 정책 (`sector`)
//! - 지수 테이블 추출기 (`extract`)
//! - 시장 페이지 Provider (HTTP, 스냅샷)
//! - PostgreSQL 저장소

pub mod error;
pub mod extract;
pub mod numeric;
pub mod provider;
pub mod sector;
pub mod storage;

pub use error::{DataError, Result};

pub use extract::{ExtractionReport, RawCell, RawRow, RowSkip, TableExtractor};
pub use numeric::{parse_localized_number, NumberParseError};
pub use sector::{SectorPolicy, SectorResolution, SectorRule, SectorTier};

pub use provider::{HttpFetcherConfig, HttpPageFetcher, MarketPageSource, SnapshotPageFetcher};
pub use storage::{
    Database, DatabaseConfig, IndexQuoteRepository, RecordStore, StoreSummary, TopIndexRow,
    TopIndicesQuery,
};
