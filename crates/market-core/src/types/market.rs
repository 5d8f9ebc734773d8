//! 수집 대상 시장 정의.
//!
//! - `Market` - 지원하는 세 개의 시장 (브라질, 중국, 미국)
//! - `MarketTarget` - 한 번의 fetch에 필요한 국가 라벨, 슬러그, URL

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::MarketError;

/// 지수 목록 페이지의 기본 URL.
pub const DEFAULT_BASE_URL: &str = "https://br.investing.com/indices/";

/// 수집 대상 시장.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Market {
    /// 브라질 (주요/추가/1차 섹터/기타 지수 포함)
    Brazil,
    /// 중국 (1차 섹터 지수 포함)
    China,
    /// 미국 (1차 섹터 지수 포함)
    Usa,
}

impl Market {
    /// 수집 순서대로 나열된 전체 시장.
    pub const ALL: [Market; 3] = [Market::Brazil, Market::China, Market::Usa];

    /// 저장소와 섹터 정책에서 사용하는 국가 라벨.
    pub fn country(&self) -> &'static str {
        match self {
            Market::Brazil => "Brasil",
            Market::China => "China",
            Market::Usa => "EUA",
        }
    }

    /// 목록 페이지 경로 (스냅샷 파일명으로도 사용).
    pub fn slug(&self) -> &'static str {
        match self {
            Market::Brazil => "brazil-indices",
            Market::China => "china-indices",
            Market::Usa => "usa-indices",
        }
    }

    /// 페이지에 포함할 지수 그룹을 고르는 쿼리 문자열.
    pub fn query(&self) -> &'static str {
        match self {
            Market::Brazil => {
                "include-major-indices=true&include-additional-indices=true&include-primary-sectors=true&include-other-indices=true"
            }
            Market::China | Market::Usa => "include-primary-sectors=true",
        }
    }

    /// 기본 URL을 기준으로 fetch 대상을 구성합니다.
    pub fn target(&self, base_url: &str) -> MarketTarget {
        MarketTarget {
            country: self.country().to_string(),
            slug: self.slug().to_string(),
            url: format!(
                "{}/{}?{}",
                base_url.trim_end_matches('/'),
                self.slug(),
                self.query()
            ),
        }
    }

    /// 쉼표로 구분된 시장 목록을 파싱합니다 (예: "brasil,eua").
    pub fn parse_list(s: &str) -> Result<Vec<Market>, MarketError> {
        let mut markets = Vec::new();
        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let market: Market = part.parse()?;
            if !markets.contains(&market) {
                markets.push(market);
            }
        }
        if markets.is_empty() {
            return Err(MarketError::InvalidInput(format!(
                "시장 목록이 비어 있습니다: '{}'",
                s
            )));
        }
        Ok(markets)
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.country())
    }
}

impl FromStr for Market {
    type Err = MarketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "brasil" | "brazil" | "br" => Ok(Market::Brazil),
            "china" | "cn" => Ok(Market::China),
            "eua" | "usa" | "us" => Ok(Market::Usa),
            _ => Err(MarketError::UnknownMarket(s.to_string())),
        }
    }
}

/// 한 시장에 대한 fetch 대상.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketTarget {
    /// 국가 라벨 (예: "Brasil")
    pub country: String,
    /// 페이지 슬러그 (예: "brazil-indices")
    pub slug: String,
    /// 전체 요청 URL
    pub url: String,
}
