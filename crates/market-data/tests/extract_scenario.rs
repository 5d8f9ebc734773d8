//! 지수 테이블 추출 통합 테스트
//!
//! 실제 목록 페이지와 같은 구조의 HTML을 페이지 단위로 추출합니다.

use market_core::{IndexRecord, MarketPage};
use market_data::sector::BRAZIL_CATCH_ALL;
use market_data::{SectorPolicy, TableExtractor};
use std::sync::Arc;

fn extractor() -> TableExtractor {
    TableExtractor::new(Arc::new(SectorPolicy::builtin())).unwrap()
}

fn table(rows: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
        <html><body>
          <table class="datatable">
            <thead>
              <tr><th></th><th>Nome</th><th>Último</th><th>Máxima</th><th>Mínima</th><th>Var.%</th><th>Hora</th></tr>
            </thead>
            <tbody>{}</tbody>
          </table>
        </body></html>"#,
        rows
    )
}

#[test]
fn test_brazil_end_to_end() {
    let html = table(
        r#"
        <tr>
          <td>1</td><td><a href="/indices/bovespa">Ibovespa</a></td>
          <td>130.000,50</td><td>131.200,00</td><td>129.800,25</td><td>+1,25%</td><td>17:05</td>
        </tr>
        <tr>
          <td>2</td><td><a href="/indices/xpto">XPTO Index</a></td>
          <td>10,5</td><td>11,0</td><td>9,9</td><td>-0,50%</td><td>17:05</td>
        </tr>
        "#,
    );

    let records = extractor().extract(&MarketPage::new("Brasil", html));

    assert_eq!(
        records,
        vec![
            IndexRecord {
                name: "Ibovespa".to_string(),
                current_value: 130000.50,
                high: 131200.00,
                low: 129800.25,
                change_percent: 1.25,
                sector: "Financeiro".to_string(),
            },
            IndexRecord {
                name: "XPTO Index".to_string(),
                current_value: 10.5,
                high: 11.0,
                low: 9.9,
                change_percent: -0.50,
                sector: BRAZIL_CATCH_ALL.to_string(),
            },
        ]
    );
    assert!(records.iter().all(IndexRecord::is_well_formed));
}

#[test]
fn test_noise_rows_are_counted_and_skipped() {
    let html = table(
        r#"
        <tr><td colspan="7">Publicidade</td></tr>
        <tr>
          <td>1</td><td>Sem link</td>
          <td>1,0</td><td>1,0</td><td>1,0</td><td>0,00%</td>
        </tr>
        <tr>
          <td>2</td><td><a href="/indices/csi-300">CSI 300</a></td>
          <td>3.500,10</td><td>3.550,00</td><td>3.480,75</td><td>+0,35%</td>
        </tr>
        <tr>
          <td>3</td><td><a href="/indices/szse">SZSE Component</a></td>
          <td>10.100,00</td><td>-</td><td>10.000,00</td><td>+0,10%</td>
        </tr>
        <tr>
          <td>4</td><td><a href="/indices/ftse-china">FTSE China A50</a></td>
          <td>12.000</td><td>12.100</td><td>11.900</td>
        </tr>
        "#,
    );

    let report = extractor().extract_with_report(&MarketPage::new("China", html));

    assert_eq!(report.rows_seen, 5);
    assert_eq!(report.short_rows, 2);
    assert_eq!(report.missing_name, 1);
    assert_eq!(report.unparsable, 1);
    assert_eq!(report.skipped(), 4);

    assert_eq!(report.records.len(), 1);
    let record = &report.records[0];
    assert_eq!(record.name, "CSI 300");
    assert_eq!(record.current_value, 3500.10);
    assert_eq!(record.high, 3550.0);
    assert_eq!(record.low, 3480.75);
    assert_eq!(record.change_percent, 0.35);
    assert_eq!(record.sector, "Primário");
}

#[test]
fn test_usa_page_uses_country_sector() {
    let html = table(
        r#"
        <tr>
          <td>1</td><td><a href="/indices/us-30">Dow Jones</a></td>
          <td>39.512,84</td><td>39.600,10</td><td>39.300,00</td><td>+0,32%</td>
        </tr>
        <tr>
          <td>2</td><td><a href="/indices/us-spx-500">S&amp;P 500</a></td>
          <td>5.222,68</td><td>5.239,66</td><td>5.202,10</td><td>-0,16%</td>
        </tr>
        "#,
    );

    let records = extractor().extract(&MarketPage::new("EUA", html));
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].name, "S&P 500");
    assert!(records.iter().all(|r| r.sector == "Primário"));
}

#[test]
fn test_unknown_country_gets_global_fallback() {
    let html = table(
        r#"
        <tr>
          <td>1</td><td><a href="/indices/nikkei">Nikkei 225</a></td>
          <td>38.000,00</td><td>38.100,00</td><td>37.900,00</td><td>+0,01%</td>
        </tr>
        "#,
    );

    let records = extractor().extract(&MarketPage::new("Japão", html));
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].sector, "Primário");
}
