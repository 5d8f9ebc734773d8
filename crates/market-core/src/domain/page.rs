//! fetch 결과로 얻은 시장 페이지.

use chrono::{DateTime, Utc};

/// 한 시장의 지수 목록 페이지 원문.
///
/// fetch 한 번에 하나씩 생성되며 추출기에서 한 번 소비됩니다.
#[derive(Debug, Clone)]
pub struct MarketPage {
    /// 국가 라벨 (예: "Brasil")
    pub country: String,
    /// 페이지 HTML
    pub html: String,
    /// 수집 시각
    pub fetched_at: DateTime<Utc>,
}

impl MarketPage {
    /// 현재 시각으로 새 페이지를 생성합니다.
    pub fn new(country: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            country: country.into(),
            html: html.into(),
            fetched_at: Utc::now(),
        }
    }

    /// 수집 시각을 지정합니다.
    pub fn with_fetched_at(mut self, fetched_at: DateTime<Utc>) -> Self {
        self.fetched_at = fetched_at;
        self
    }

    /// 페이지 본문이 비어 있는지 여부.
    pub fn is_blank(&self) -> bool {
        self.html.trim().is_empty()
    }
}
