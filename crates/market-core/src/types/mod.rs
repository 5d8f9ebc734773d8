//! 시장 관련 기본 타입.

mod market;

pub use market::*;
