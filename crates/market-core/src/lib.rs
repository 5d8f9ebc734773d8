//! # Market Core
//!
//! 지수 수집기의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 수집 파이프라인 전반에서 사용되는 기본 타입을 제공합니다:
//! - 수집 대상 시장 (브라질, 중국, 미국) 및 URL 구성
//! - 시장 페이지 (fetch 결과물)
//! - 정규화된 지수 레코드
//! - 로깅 인프라

pub mod domain;
pub mod error;
pub mod logging;
pub mod types;

pub use domain::*;
pub use error::*;
pub use logging::*;
pub use types::*;
