//! 시장 페이지 Provider 모듈.
//!
//! 추출기는 전송 방식과 무관하게 `MarketPage`만 받습니다.
//! 페이지를 가져오는 방법은 `MarketPageSource` 구현으로 교체할 수 있습니다.
//!
//! ## HTTP
//! - `HttpPageFetcher`: reqwest로 목록 페이지를 직접 요청
//!
//! ## 스냅샷
//! - `SnapshotPageFetcher`: 미리 저장해 둔 HTML 파일(`{slug}.html`)을 읽음
//! - 브라우저로 렌더링한 페이지를 저장해 두고 오프라인으로 재처리할 때 사용

pub mod http;
pub mod snapshot;

use async_trait::async_trait;
use market_core::{MarketPage, MarketTarget};

use crate::error::Result;

pub use http::{HttpFetcherConfig, HttpPageFetcher};
pub use snapshot::SnapshotPageFetcher;

/// 시장 페이지를 제공하는 수집 백엔드.
#[async_trait]
pub trait MarketPageSource: Send + Sync {
    /// 백엔드 이름 (로그용)
    fn name(&self) -> &str;

    /// 대상 시장의 목록 페이지를 가져옵니다.
    async fn fetch_page(&self, target: &MarketTarget) -> Result<MarketPage>;
}
