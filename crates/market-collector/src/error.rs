//! 에러 타입 정의.

use thiserror::Error;

/// Collector 에러 타입
#[derive(Debug, Error)]
pub enum CollectorError {
    /// 데이터 계층 에러 (DB, fetch, 정책 파일)
    #[error("Data error: {0}")]
    Data(#[from] market_data::DataError),

    /// 도메인 에러 (알 수 없는 시장 등)
    #[error("Market error: {0}")]
    Market(#[from] market_core::MarketError),

    /// 설정 에러
    #[error("Configuration error: {0}")]
    Config(String),

    /// 출력 직렬화 에러
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// 파일 입출력 에러
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result 타입 별칭
pub type Result<T> = std::result::Result<T, CollectorError>;
