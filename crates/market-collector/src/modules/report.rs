//! 상위 지수 리포트.
//!
//! 중국/미국의 1차 섹터 지수를 고가 기준 내림차순으로 보여줍니다.

use market_data::{IndexQuoteRepository, TopIndexRow, TopIndicesQuery};
use std::fmt::Write;

use crate::Result;

/// 고가 상위 지수를 조회합니다.
pub async fn top_indices(repo: &IndexQuoteRepository, limit: i64) -> Result<Vec<TopIndexRow>> {
    let query = TopIndicesQuery {
        limit,
        ..Default::default()
    };

    let rows = repo.top_by_high(&query).await?;
    tracing::info!(
        sector = %query.sector,
        countries = ?query.countries,
        limit,
        rows = rows.len(),
        "상위 지수 조회 완료"
    );
    Ok(rows)
}

/// 리포트를 JSON 배열로 변환합니다.
pub fn render_json(rows: &[TopIndexRow]) -> Result<String> {
    Ok(serde_json::to_string_pretty(rows)?)
}

/// 리포트를 고정폭 텍스트 표로 변환합니다.
pub fn render_table(rows: &[TopIndexRow]) -> String {
    if rows.is_empty() {
        return "조회된 지수가 없습니다\n".to_string();
    }

    let name_width = rows
        .iter()
        .map(|row| row.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Nome".len());

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>3}  {:<name_width$}  {:<7}  {:<10}  {:>14}",
        "#", "Nome", "País", "Setor", "Máxima"
    );
    for (rank, row) in rows.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>3}  {:<name_width$}  {:<7}  {:<10}  {:>14.2}",
            rank + 1,
            row.name,
            row.country,
            row.sector,
            row.high
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<TopIndexRow> {
        vec![
            TopIndexRow {
                name: "Dow Jones".to_string(),
                country: "EUA".to_string(),
                sector: "Primário".to_string(),
                high: 39_120.75,
            },
            TopIndexRow {
                name: "Shanghai".to_string(),
                country: "China".to_string(),
                sector: "Primário".to_string(),
                high: 3_050.2,
            },
        ]
    }

    #[test]
    fn test_render_table_ranks_rows() {
        let table = render_table(&rows());
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("Nome"));
        assert!(lines[1].trim_start().starts_with("1  Dow Jones"));
        assert!(lines[1].ends_with("39120.75"));
        assert!(lines[2].contains("Shanghai"));
        assert!(lines[2].ends_with("3050.20"));
    }

    #[test]
    fn test_render_table_empty() {
        assert_eq!(render_table(&[]), "조회된 지수가 없습니다\n");
    }

    #[test]
    fn test_render_json() {
        let json = render_json(&rows()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed[0]["name"], "Dow Jones");
        assert_eq!(parsed[1]["country"], "China");
        assert_eq!(parsed[1]["high"], 3050.2);
    }
}
