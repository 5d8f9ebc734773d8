//! 지수 테이블 추출기.
//!
//! 시장 페이지 HTML에서 지수 테이블의 행을 찾아 `IndexRecord`로 정규화합니다.
//!
//! ## 행 구조
//! ```html
//! <tbody>
//!   <tr>
//!     <td>1</td>                                  <!-- 순위 -->
//!     <td><a href="/indices/bovespa">Ibovespa</a></td>  <!-- 지수명 -->
//!     <td>130.000,50</td>                         <!-- 현재가 -->
//!     <td>131.200,00</td>                         <!-- 고가 -->
//!     <td>129.800,25</td>                         <!-- 저가 -->
//!     <td>+1,25%</td>                             <!-- 등락률 -->
//!     ...
//!   </tr>
//! </tbody>
//! ```
//!
//! 행 단위 실패(셀 부족, 링크 없음, 숫자 파싱 실패)는 해당 행만 건너뛰며
//! 페이지 전체를 중단시키지 않습니다. 테이블이 없으면 빈 결과를 반환합니다.

use market_core::{IndexRecord, MarketPage};
use scraper::{ElementRef, Html, Selector};
use std::sync::Arc;
use tracing::{debug, trace};

use crate::error::{DataError, Result};
use crate::numeric::parse_localized_number;
use crate::sector::SectorPolicy;

/// 유효한 행의 최소 셀 수.
pub const MIN_CELLS: usize = 6;

const NAME_COLUMN: usize = 1;
const CURRENT_COLUMN: usize = 2;
const HIGH_COLUMN: usize = 3;
const LOW_COLUMN: usize = 4;
const CHANGE_COLUMN: usize = 5;

/// 기본 행 셀렉터.
pub const DEFAULT_ROW_SELECTOR: &str = "tbody tr";
/// 기본 셀 셀렉터.
pub const DEFAULT_CELL_SELECTOR: &str = "td";
/// 기본 링크 셀렉터.
pub const DEFAULT_LINK_SELECTOR: &str = "a";

/// 테이블 셀 하나.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawCell {
    /// 셀 전체 텍스트 (앞뒤 공백 제거)
    pub text: String,
    /// 셀 안 첫 번째 링크의 텍스트
    pub link_text: Option<String>,
}

impl RawCell {
    /// 링크 없는 셀.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            link_text: None,
        }
    }

    /// 링크를 포함한 셀.
    pub fn link(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            link_text: Some(text.clone()),
            text,
        }
    }
}

/// 테이블 행 하나 (전송 방식과 무관한 표현).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    pub cells: Vec<RawCell>,
}

impl RawRow {
    pub fn new(cells: Vec<RawCell>) -> Self {
        Self { cells }
    }
}

/// 행을 건너뛴 이유.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowSkip {
    /// 셀 수 부족 (헤더/광고 행 등)
    TooFewCells(usize),
    /// 이름 셀에 링크가 없거나 비어 있음
    MissingName,
    /// 해당 열의 숫자 파싱 실패
    Unparsable { column: usize },
}

/// 한 페이지의 추출 결과와 건너뛴 행 통계.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractionReport {
    /// 원본 행 순서를 유지한 레코드
    pub records: Vec<IndexRecord>,
    /// 검사한 행 수
    pub rows_seen: usize,
    /// 셀 수 부족으로 건너뛴 행
    pub short_rows: usize,
    /// 이름 링크가 없어 건너뛴 행
    pub missing_name: usize,
    /// 숫자 파싱 실패로 건너뛴 행
    pub unparsable: usize,
}

impl ExtractionReport {
    /// 건너뛴 행의 총합.
    pub fn skipped(&self) -> usize {
        self.short_rows + self.missing_name + self.unparsable
    }

    fn record_skip(&mut self, skip: RowSkip) {
        match skip {
            RowSkip::TooFewCells(_) => self.short_rows += 1,
            RowSkip::MissingName => self.missing_name += 1,
            RowSkip::Unparsable { .. } => self.unparsable += 1,
        }
    }
}

/// 지수 테이블 추출기.
///
/// 섹터 정책은 `Arc`로 공유되므로 여러 시장을 동시에 추출해도 안전합니다.
#[derive(Clone)]
pub struct TableExtractor {
    row_selector: Selector,
    cell_selector: Selector,
    link_selector: Selector,
    policy: Arc<SectorPolicy>,
}

impl TableExtractor {
    /// 기본 셀렉터(`tbody tr` / `td` / `a`)로 생성합니다.
    pub fn new(policy: Arc<SectorPolicy>) -> Result<Self> {
        Self::with_selectors(
            policy,
            DEFAULT_ROW_SELECTOR,
            DEFAULT_CELL_SELECTOR,
            DEFAULT_LINK_SELECTOR,
        )
    }

    /// 사용자 지정 셀렉터로 생성합니다.
    pub fn with_selectors(
        policy: Arc<SectorPolicy>,
        row: &str,
        cell: &str,
        link: &str,
    ) -> Result<Self> {
        Ok(Self {
            row_selector: parse_selector(row)?,
            cell_selector: parse_selector(cell)?,
            link_selector: parse_selector(link)?,
            policy,
        })
    }

    /// 사용 중인 섹터 정책.
    pub fn policy(&self) -> &SectorPolicy {
        &self.policy
    }

    /// 페이지에서 레코드만 추출합니다.
    pub fn extract(&self, page: &MarketPage) -> Vec<IndexRecord> {
        self.extract_with_report(page).records
    }

    /// 페이지에서 레코드와 건너뛴 행 통계를 추출합니다.
    pub fn extract_with_report(&self, page: &MarketPage) -> ExtractionReport {
        let rows = self.raw_rows(&page.html);
        if rows.is_empty() {
            debug!(country = %page.country, "지수 테이블 행을 찾지 못했습니다");
        }
        self.extract_rows(&page.country, rows)
    }

    /// HTML에서 행/셀 텍스트를 읽어 `RawRow` 목록으로 변환합니다.
    pub fn raw_rows(&self, html: &str) -> Vec<RawRow> {
        let document = Html::parse_document(html);
        document
            .select(&self.row_selector)
            .map(|tr| RawRow {
                cells: tr
                    .select(&self.cell_selector)
                    .map(|td| self.raw_cell(td))
                    .collect(),
            })
            .collect()
    }

    fn raw_cell(&self, td: ElementRef<'_>) -> RawCell {
        RawCell {
            text: td.text().collect::<String>().trim().to_string(),
            link_text: td
                .select(&self.link_selector)
                .next()
                .map(|a| normalize_whitespace(&a.text().collect::<String>())),
        }
    }

    /// 이미 분리된 행 목록에서 레코드를 추출합니다.
    pub fn extract_rows<I>(&self, country: &str, rows: I) -> ExtractionReport
    where
        I: IntoIterator<Item = RawRow>,
    {
        let mut report = ExtractionReport::default();

        for row in rows {
            report.rows_seen += 1;
            match self.extract_row(country, &row) {
                Ok(record) => report.records.push(record),
                Err(skip) => {
                    trace!(country, row = report.rows_seen, reason = ?skip, "행 건너뜀");
                    report.record_skip(skip);
                }
            }
        }

        debug!(
            country,
            rows = report.rows_seen,
            records = report.records.len(),
            short_rows = report.short_rows,
            missing_name = report.missing_name,
            unparsable = report.unparsable,
            "지수 테이블 추출 완료"
        );

        report
    }

    /// 행 하나를 레코드로 변환합니다.
    pub fn extract_row(&self, country: &str, row: &RawRow) -> std::result::Result<IndexRecord, RowSkip> {
        let cells = &row.cells;
        if cells.len() < MIN_CELLS {
            return Err(RowSkip::TooFewCells(cells.len()));
        }

        let name = cells[NAME_COLUMN]
            .link_text
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or(RowSkip::MissingName)?;

        let number = |column: usize| {
            parse_localized_number(&cells[column].text)
                .map_err(|_| RowSkip::Unparsable { column })
        };

        let current_value = number(CURRENT_COLUMN)?;
        let high = number(HIGH_COLUMN)?;
        let low = number(LOW_COLUMN)?;
        let change_percent = number(CHANGE_COLUMN)?;

        Ok(IndexRecord {
            name: name.to_string(),
            current_value,
            high,
            low,
            change_percent,
            sector: self.policy.resolve(country, name).to_string(),
        })
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector)
        .map_err(|e| DataError::ParseError(format!("invalid selector '{}': {:?}", selector, e)))
}

/// 연속된 공백을 하나로 합칩니다.
fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
