//! 정규화된 지수 레코드.

use serde::{Deserialize, Serialize};

/// 지수 한 건의 시세 스냅샷.
///
/// 추출기가 만든 레코드는 항상 다음을 만족합니다:
/// - `name`은 비어 있지 않음
/// - 네 개의 수치 필드는 모두 유한값
/// - `sector`는 항상 지정됨
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexRecord {
    /// 지수명 (이름 셀의 링크 텍스트)
    pub name: String,
    /// 현재가
    pub current_value: f64,
    /// 고가
    pub high: f64,
    /// 저가
    pub low: f64,
    /// 등락률 (%)
    pub change_percent: f64,
    /// 섹터 라벨
    pub sector: String,
}

impl IndexRecord {
    /// 수치 필드가 모두 유한값이고 이름/섹터가 채워져 있는지 확인합니다.
    pub fn is_well_formed(&self) -> bool {
        !self.name.trim().is_empty()
            && !self.sector.is_empty()
            && [self.current_value, self.high, self.low, self.change_percent]
                .iter()
                .all(|v| v.is_finite())
    }
}
