//! 수집 통계 구조체.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 한 시장의 수집 결과
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarketOutcome {
    /// 국가 라벨
    pub country: String,
    /// 추출된 레코드 수
    pub records: usize,
    /// 저장된 레코드 수
    pub stored: usize,
    /// 건너뛴 행 수
    pub skipped_rows: usize,
    /// 실패 메시지 (fetch 또는 저장 실패)
    pub error: Option<String>,
}

/// 수집 작업 통계
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollectionStats {
    /// 시도한 시장 수
    pub total: usize,
    /// 레코드를 저장한 시장 수
    pub success: usize,
    /// 실패한 시장 수
    pub errors: usize,
    /// 레코드가 없었던 시장 수
    pub empty: usize,
    /// 저장된 총 레코드 수
    pub total_records: usize,
    /// 건너뛴 총 행 수
    pub skipped_rows: usize,
    /// 시장별 결과 (수집 순서)
    pub markets: Vec<MarketOutcome>,
    /// 소요 시간
    #[serde(skip)]
    pub elapsed: Duration,
}

impl CollectionStats {
    /// 새 통계 객체 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 시장 결과 반영
    pub fn record(&mut self, outcome: MarketOutcome) {
        self.total += 1;
        self.skipped_rows += outcome.skipped_rows;

        if outcome.error.is_some() {
            self.errors += 1;
        } else if outcome.records == 0 {
            self.empty += 1;
        } else {
            self.success += 1;
            self.total_records += outcome.stored;
        }

        self.markets.push(outcome);
    }

    /// 성공률 계산 (%)
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.success as f64 / self.total as f64) * 100.0
        }
    }

    /// 통계 요약 로그 출력
    pub fn log_summary(&self, operation: &str) {
        tracing::info!(
            operation = operation,
            total = self.total,
            success = self.success,
            errors = self.errors,
            empty = self.empty,
            total_records = self.total_records,
            skipped_rows = self.skipped_rows,
            success_rate = format!("{:.1}%", self.success_rate()),
            elapsed = format!("{:.1}s", self.elapsed.as_secs_f64()),
            "수집 완료"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(country: &str, records: usize, error: Option<&str>) -> MarketOutcome {
        MarketOutcome {
            country: country.to_string(),
            records,
            stored: if error.is_some() { 0 } else { records },
            skipped_rows: 2,
            error: error.map(str::to_string),
        }
    }

    #[test]
    fn test_record_classifies_outcomes() {
        let mut stats = CollectionStats::new();
        stats.record(outcome("Brasil", 30, None));
        stats.record(outcome("China", 0, None));
        stats.record(outcome("EUA", 0, Some("timeout")));

        assert_eq!(stats.total, 3);
        assert_eq!(stats.success, 1);
        assert_eq!(stats.empty, 1);
        assert_eq!(stats.errors, 1);
        assert_eq!(stats.total_records, 30);
        assert_eq!(stats.skipped_rows, 6);
        assert_eq!(stats.markets[2].country, "EUA");
    }

    #[test]
    fn test_success_rate() {
        let mut stats = CollectionStats::new();
        assert_eq!(stats.success_rate(), 0.0);
        stats.record(outcome("Brasil", 1, None));
        stats.record(outcome("China", 1, Some("503")));
        assert!((stats.success_rate() - 50.0).abs() < f64::EPSILON);
    }
}
