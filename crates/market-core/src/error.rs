//! 도메인 에러 타입.

use thiserror::Error;

/// 핵심 도메인 에러.
#[derive(Debug, Error)]
pub enum MarketError {
    /// 알 수 없는 시장 이름
    #[error("알 수 없는 시장: {0}")]
    UnknownMarket(String),

    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 잘못된 입력
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),
}

/// 도메인 작업을 위한 Result 타입.
pub type MarketResult<T> = Result<T, MarketError>;
