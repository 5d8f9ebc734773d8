//! 지수 시세 저장소.
//!
//! 국가/섹터 차원 행은 이름 기준으로 upsert하고, 레코드마다 팩트 행을 추가합니다.
//! 한 시장의 저장은 하나의 트랜잭션으로 처리되며, commit 전에 반환되면 롤백됩니다.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use market_core::IndexRecord;
use serde::Serialize;
use sqlx::{FromRow, PgConnection};
use std::collections::HashMap;
use tracing::{debug, instrument};

use super::{Database, RecordStore};
use crate::error::Result;
use crate::sector::PRIMARY_SECTOR;

/// 한 시장 저장 결과.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreSummary {
    /// 추가된 팩트 행 수
    pub inserted: usize,
    /// 사용된 서로 다른 섹터 수
    pub sectors: usize,
}

/// 상위 지수 조회 조건.
#[derive(Debug, Clone)]
pub struct TopIndicesQuery {
    /// 섹터 라벨
    pub sector: String,
    /// 포함할 국가 라벨
    pub countries: Vec<String>,
    /// 최대 행 수
    pub limit: i64,
}

impl Default for TopIndicesQuery {
    /// 중국/미국 1차 섹터 지수 중 고가 상위 10개.
    fn default() -> Self {
        Self {
            sector: PRIMARY_SECTOR.to_string(),
            countries: vec!["China".to_string(), "EUA".to_string()],
            limit: 10,
        }
    }
}

/// 상위 지수 조회 결과 행.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct TopIndexRow {
    pub name: String,
    pub country: String,
    pub sector: String,
    pub high: f64,
}

/// 지수 시세 repository.
pub struct IndexQuoteRepository {
    db: Database,
}

impl IndexQuoteRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// 섹터/국가 조건에 맞는 레코드를 고가 내림차순으로 조회합니다.
    pub async fn top_by_high(&self, query: &TopIndicesQuery) -> Result<Vec<TopIndexRow>> {
        let rows = sqlx::query_as::<_, TopIndexRow>(
            r#"
            SELECT q.name, c.name AS country, s.name AS sector, q.high
            FROM index_quote q
            JOIN country c ON q.country_id = c.id
            JOIN sector s ON q.sector_id = s.id
            WHERE s.name = $1 AND c.name = ANY($2)
            ORDER BY q.high DESC
            LIMIT $3
            "#,
        )
        .bind(&query.sector)
        .bind(&query.countries)
        .bind(query.limit)
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows)
    }

    /// 국가별 저장된 팩트 행 수.
    pub async fn count_by_country(&self) -> Result<Vec<(String, i64)>> {
        let rows: Vec<(String, i64)> = sqlx::query_as(
            r#"
            SELECT c.name, COUNT(q.id)
            FROM country c
            LEFT JOIN index_quote q ON q.country_id = c.id
            GROUP BY c.name
            ORDER BY c.name
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows)
    }
}

#[async_trait]
impl RecordStore for IndexQuoteRepository {
    /// 한 시장의 레코드를 저장합니다.
    #[instrument(skip(self, records), fields(record_count = records.len()))]
    async fn save_market(
        &self,
        country: &str,
        records: &[IndexRecord],
        collected_at: DateTime<Utc>,
    ) -> Result<StoreSummary> {
        let mut tx = self.db.pool().begin().await?;

        let country_id = upsert_country(&mut tx, country).await?;
        let mut sector_ids: HashMap<&str, i32> = HashMap::new();
        let mut summary = StoreSummary::default();

        for record in records {
            let sector_id = match sector_ids.get(record.sector.as_str()) {
                Some(id) => *id,
                None => {
                    let id = upsert_sector(&mut tx, &record.sector).await?;
                    sector_ids.insert(record.sector.as_str(), id);
                    id
                }
            };

            sqlx::query(
                r#"
                INSERT INTO index_quote (
                    name, country_id, sector_id, current_value, high, low, change_percent, collected_at
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                "#,
            )
            .bind(&record.name)
            .bind(country_id)
            .bind(sector_id)
            .bind(record.current_value)
            .bind(record.high)
            .bind(record.low)
            .bind(record.change_percent)
            .bind(collected_at)
            .execute(&mut *tx)
            .await?;

            summary.inserted += 1;
        }

        tx.commit().await?;

        summary.sectors = sector_ids.len();
        debug!(
            country,
            inserted = summary.inserted,
            sectors = summary.sectors,
            "시장 레코드 저장 완료"
        );

        Ok(summary)
    }
}

async fn upsert_country(conn: &mut PgConnection, name: &str) -> Result<i32> {
    let (id,): (i32,) = sqlx::query_as(
        r#"
        INSERT INTO country (name) VALUES ($1)
        ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
        RETURNING id
        "#,
    )
    .bind(name)
    .fetch_one(conn)
    .await?;
    Ok(id)
}

async fn upsert_sector(conn: &mut PgConnection, name: &str) -> Result<i32> {
    let (id,): (i32,) = sqlx::query_as(
        r#"
        INSERT INTO sector (name) VALUES ($1)
        ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
        RETURNING id
        "#,
    )
    .bind(name)
    .fetch_one(conn)
    .await?;
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_top_query() {
        let query = TopIndicesQuery::default();
        assert_eq!(query.sector, "Primário");
        assert_eq!(query.countries, vec!["China", "EUA"]);
        assert_eq!(query.limit, 10);
    }
}
