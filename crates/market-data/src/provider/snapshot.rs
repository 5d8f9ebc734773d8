//! 저장된 HTML 스냅샷을 읽는 fetcher.
//!
//! 디렉터리 안의 `{slug}.html` 파일을 시장 페이지로 사용합니다.
//! 예: `snapshots/brazil-indices.html`

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use market_core::{MarketPage, MarketTarget};
use std::path::{Path, PathBuf};
use tracing::debug;

use super::MarketPageSource;
use crate::error::{DataError, Result};

/// 스냅샷 디렉터리 기반 fetcher.
#[derive(Debug, Clone)]
pub struct SnapshotPageFetcher {
    dir: PathBuf,
}

impl SnapshotPageFetcher {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// 대상 시장의 스냅샷 파일 경로.
    pub fn path_for(&self, target: &MarketTarget) -> PathBuf {
        self.dir.join(format!("{}.html", target.slug))
    }

    /// 스냅샷 디렉터리.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl MarketPageSource for SnapshotPageFetcher {
    fn name(&self) -> &str {
        "snapshot"
    }

    async fn fetch_page(&self, target: &MarketTarget) -> Result<MarketPage> {
        let path = self.path_for(target);

        let html = tokio::fs::read_to_string(&path).await.map_err(|e| {
            DataError::FetchError(format!("스냅샷 읽기 실패 ({}): {}", path.display(), e))
        })?;

        // 파일 수정 시각을 수집 시각으로 사용
        let fetched_at = tokio::fs::metadata(&path)
            .await
            .and_then(|meta| meta.modified())
            .map(DateTime::<Utc>::from)
            .unwrap_or_else(|_| Utc::now());

        debug!(country = %target.country, path = %path.display(), bytes = html.len(), "스냅샷 로드 완료");

        Ok(MarketPage::new(target.country.clone(), html).with_fetched_at(fetched_at))
    }
}
