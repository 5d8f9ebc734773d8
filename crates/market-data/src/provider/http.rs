//! HTTP 기반 시장 페이지 fetcher.
//!
//! ```rust,ignore
//! let fetcher = HttpPageFetcher::new(HttpFetcherConfig::default())?;
//! let page = fetcher.fetch_page(&Market::Brazil.target(DEFAULT_BASE_URL)).await?;
//! ```

use async_trait::async_trait;
use market_core::{MarketPage, MarketTarget};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, instrument};

use super::MarketPageSource;
use crate::error::{DataError, Result};

/// 기본 User-Agent (데스크톱 브라우저).
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// HTTP fetcher 설정.
#[derive(Debug, Clone)]
pub struct HttpFetcherConfig {
    /// 요청 타임아웃
    pub timeout: Duration,
    /// User-Agent 헤더
    pub user_agent: String,
}

impl Default for HttpFetcherConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// reqwest로 목록 페이지를 가져오는 fetcher.
#[derive(Debug, Clone)]
pub struct HttpPageFetcher {
    client: Client,
}

impl HttpPageFetcher {
    /// 주어진 설정으로 생성합니다.
    pub fn new(config: HttpFetcherConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent)
            .build()
            .map_err(|e| DataError::ConfigError(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl MarketPageSource for HttpPageFetcher {
    fn name(&self) -> &str {
        "http"
    }

    #[instrument(skip(self), fields(country = %target.country))]
    async fn fetch_page(&self, target: &MarketTarget) -> Result<MarketPage> {
        let response = self
            .client
            .get(&target.url)
            .header(reqwest::header::ACCEPT_LANGUAGE, "pt-BR,pt;q=0.9")
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(DataError::RateLimited(target.url.clone()));
        }
        if !status.is_success() {
            return Err(DataError::FetchError(format!(
                "{} 응답: {}",
                status, target.url
            )));
        }

        let html = response.text().await?;
        debug!(bytes = html.len(), "페이지 수신 완료");

        Ok(MarketPage::new(target.country.clone(), html))
    }
}
