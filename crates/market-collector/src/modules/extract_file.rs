//! 저장된 HTML 파일에 대한 오프라인 추출 (DB 저장 없음).

use market_core::MarketPage;
use market_data::{ExtractionReport, TableExtractor};
use serde::Serialize;
use std::path::Path;

use crate::Result;

/// 오프라인 추출 결과 (JSON 출력용).
#[derive(Debug, Serialize)]
pub struct DryRunOutput<'a> {
    pub country: &'a str,
    pub rows_seen: usize,
    pub skipped: usize,
    pub records: &'a [market_core::IndexRecord],
}

/// HTML 파일을 읽어 지수 테이블을 추출합니다.
pub async fn extract_file(
    extractor: &TableExtractor,
    path: &Path,
    country: &str,
) -> Result<ExtractionReport> {
    let html = tokio::fs::read_to_string(path).await?;
    let page = MarketPage::new(country, html);

    let report = extractor.extract_with_report(&page);
    tracing::info!(
        path = %path.display(),
        country,
        rows = report.rows_seen,
        records = report.records.len(),
        skipped = report.skipped(),
        "파일 추출 완료"
    );
    Ok(report)
}

/// 추출 결과를 JSON으로 변환합니다.
pub fn render_report(country: &str, report: &ExtractionReport) -> Result<String> {
    let output = DryRunOutput {
        country,
        rows_seen: report.rows_seen,
        skipped: report.skipped(),
        records: &report.records,
    };
    Ok(serde_json::to_string_pretty(&output)?)
}
