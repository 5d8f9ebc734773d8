//! 지수 수집 모듈 (fetch → extract → store).
//!
//! 시장별 fetch와 추출은 서로 공유 상태가 없으므로 동시에 실행하고,
//! 저장은 시장 순서대로 하나씩 처리합니다. 한 시장의 실패는 나머지 시장에 영향을 주지 않습니다.

use futures::future::join_all;
use market_core::{market_span, Market, MarketTarget};
use market_data::{
    DataError, ExtractionReport, HttpPageFetcher, MarketPageSource, RecordStore,
    SnapshotPageFetcher, TableExtractor,
};
use std::time::Instant;
use tracing::Instrument;

use crate::config::{FetchConfig, FetchMode};
use crate::stats::{CollectionStats, MarketOutcome};
use crate::Result;

/// 한 시장의 fetch + 추출 결과.
#[derive(Debug)]
pub struct MarketHarvest {
    pub target: MarketTarget,
    pub result: std::result::Result<HarvestedPage, DataError>,
}

/// 추출까지 끝난 페이지.
#[derive(Debug)]
pub struct HarvestedPage {
    pub fetched_at: chrono::DateTime<chrono::Utc>,
    pub report: ExtractionReport,
}

/// 설정에 맞는 페이지 수집 백엔드를 생성합니다.
pub fn build_source(config: &FetchConfig) -> Result<Box<dyn MarketPageSource>> {
    let source: Box<dyn MarketPageSource> = match config.mode {
        FetchMode::Http => Box::new(HttpPageFetcher::new(config.http_config())?),
        FetchMode::Snapshot => Box::new(SnapshotPageFetcher::new(config.snapshot_dir.clone())),
    };
    Ok(source)
}

/// 한 시장의 페이지를 가져와 추출합니다.
pub async fn harvest_market(
    source: &dyn MarketPageSource,
    extractor: &TableExtractor,
    target: MarketTarget,
) -> MarketHarvest {
    let span = market_span!("harvest", target.country, target.url);

    let result = async {
        let page = source.fetch_page(&target).await?;
        let report = extractor.extract_with_report(&page);
        Ok::<_, DataError>(HarvestedPage {
            fetched_at: page.fetched_at,
            report,
        })
    }
    .instrument(span)
    .await;

    MarketHarvest { target, result }
}

/// 여러 시장을 동시에 가져와 추출합니다 (결과는 입력 순서).
pub async fn harvest_markets(
    source: &dyn MarketPageSource,
    extractor: &TableExtractor,
    markets: &[Market],
    base_url: &str,
) -> Vec<MarketHarvest> {
    join_all(
        markets
            .iter()
            .map(|market| harvest_market(source, extractor, market.target(base_url))),
    )
    .await
}

/// 시장 목록을 수집하여 저장합니다.
pub async fn collect_markets(
    store: &dyn RecordStore,
    source: &dyn MarketPageSource,
    extractor: &TableExtractor,
    markets: &[Market],
    base_url: &str,
) -> Result<CollectionStats> {
    let start = Instant::now();
    let mut stats = CollectionStats::new();

    tracing::info!(
        source = source.name(),
        markets = markets.len(),
        "지수 수집 시작"
    );

    for harvest in harvest_markets(source, extractor, markets, base_url).await {
        let outcome = store_harvest(store, harvest).await;
        stats.record(outcome);
    }

    stats.elapsed = start.elapsed();
    Ok(stats)
}

async fn store_harvest(store: &dyn RecordStore, harvest: MarketHarvest) -> MarketOutcome {
    let country = harvest.target.country;
    let mut outcome = MarketOutcome {
        country: country.clone(),
        ..Default::default()
    };

    let page = match harvest.result {
        Ok(page) => page,
        Err(e) => {
            tracing::error!(country = %country, url = %harvest.target.url, error = %e, "페이지 수집 실패");
            outcome.error = Some(e.to_string());
            return outcome;
        }
    };

    outcome.records = page.report.records.len();
    outcome.skipped_rows = page.report.skipped();

    if page.report.records.is_empty() {
        tracing::warn!(
            country = %country,
            rows = page.report.rows_seen,
            "추출된 지수가 없습니다"
        );
        return outcome;
    }

    match store
        .save_market(&country, &page.report.records, page.fetched_at)
        .await
    {
        Ok(summary) => {
            outcome.stored = summary.inserted;
            tracing::info!(
                country = %country,
                records = summary.inserted,
                sectors = summary.sectors,
                skipped_rows = outcome.skipped_rows,
                "저장 완료"
            );
        }
        Err(e) => {
            tracing::error!(country = %country, error = %e, "저장 실패");
            outcome.error = Some(e.to_string());
        }
    }

    outcome
}
