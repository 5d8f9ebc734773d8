//! Standalone index quote collector CLI.

use clap::{Parser, Subcommand};
use market_collector::{modules, CollectorConfig};
use market_core::{init_logging, LogConfig, Market};
use market_data::{Database, IndexQuoteRepository, TableExtractor};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "market-collector")]
#[command(about = "Index quote collector (Brasil, China, EUA)", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// 스키마 마이그레이션 실행
    Migrate,

    /// 지수 페이지 수집 및 저장
    Collect {
        /// 수집할 시장 (쉼표로 구분, 예: "brasil,china,eua")
        #[arg(long)]
        markets: Option<String>,
    },

    /// 중국/미국 1차 섹터 지수 중 고가 상위 N개 출력
    Report {
        /// 출력할 행 수 (기본값: REPORT_LIMIT)
        #[arg(long)]
        limit: Option<i64>,

        /// JSON으로 출력
        #[arg(long)]
        json: bool,
    },

    /// 저장된 HTML 파일에서 지수 테이블 추출 (DB 저장 없음)
    Extract {
        /// HTML 파일 경로
        #[arg(long)]
        file: PathBuf,

        /// 국가 라벨 또는 시장 이름 (예: "Brasil", "china", "us")
        #[arg(long)]
        country: String,
    },

    /// 전체 워크플로우 실행 (마이그레이션 → 수집 → 리포트)
    RunAll {
        /// 수집할 시장 (쉼표로 구분)
        #[arg(long)]
        markets: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // 로깅 초기화
    init_logging(
        LogConfig::for_crates(
            &["market_collector", "market_data", "market_core"],
            &cli.log_level,
        )
        .with_env_format(),
    )?;

    tracing::info!("Index Quote Collector 시작");

    // 설정 로드
    let config = CollectorConfig::from_env()?;
    tracing::debug!(
        base_url = %config.base_url,
        fetch_mode = ?config.fetch.mode,
        "설정 로드 완료"
    );

    // DB가 필요 없는 명령
    if let Commands::Extract { file, country } = &cli.command {
        let extractor = TableExtractor::new(Arc::new(config.load_sector_policy()?))?;
        let country = country_label(country);
        let report = modules::extract_file(&extractor, file, &country).await?;
        println!("{}", modules::render_report(&country, &report)?);
        return Ok(());
    }

    // DB 연결
    let db = Database::connect(&config.database_config()?).await?;
    tracing::info!("데이터베이스 연결 성공");

    // 명령 실행
    match cli.command {
        Commands::Migrate => {
            db.migrate().await?;
        }
        Commands::Collect { markets } => {
            let markets = parse_markets(markets.as_deref())?;
            collect(&db, &config, &markets).await?;
        }
        Commands::Report { limit, json } => {
            report(&db, limit.unwrap_or(config.report.limit), json).await?;
        }
        Commands::RunAll { markets } => {
            let markets = parse_markets(markets.as_deref())?;
            tracing::info!("=== 전체 워크플로우 시작 ===");

            tracing::info!("Step 1/3: 마이그레이션");
            db.migrate().await?;

            tracing::info!("Step 2/3: 지수 수집");
            collect(&db, &config, &markets).await?;

            tracing::info!("Step 3/3: 상위 지수 리포트");
            report(&db, config.report.limit, false).await?;

            tracing::info!("=== 전체 워크플로우 완료 ===");
        }
        Commands::Extract { .. } => {}
    }

    db.close().await;
    tracing::info!("Index Quote Collector 종료");

    Ok(())
}

async fn collect(
    db: &Database,
    config: &CollectorConfig,
    markets: &[Market],
) -> market_collector::Result<()> {
    let source = modules::build_source(&config.fetch)?;
    let extractor = TableExtractor::new(Arc::new(config.load_sector_policy()?))?;
    let repo = IndexQuoteRepository::new(db.clone());

    let stats =
        modules::collect_markets(&repo, source.as_ref(), &extractor, markets, &config.base_url)
            .await?;
    stats.log_summary("지수 수집");
    Ok(())
}

async fn report(db: &Database, limit: i64, json: bool) -> market_collector::Result<()> {
    let repo = IndexQuoteRepository::new(db.clone());
    let rows = modules::top_indices(&repo, limit).await?;

    if json {
        println!("{}", modules::render_json(&rows)?);
    } else {
        print!("{}", modules::render_table(&rows));
    }
    Ok(())
}

fn parse_markets(markets: Option<&str>) -> market_collector::Result<Vec<Market>> {
    match markets {
        Some(list) => Ok(Market::parse_list(list)?),
        None => Ok(Market::ALL.to_vec()),
    }
}

/// 시장 이름이면 국가 라벨로 바꾸고, 아니면 입력값을 그대로 사용합니다.
fn country_label(input: &str) -> String {
    match input.parse::<Market>() {
        Ok(market) => market.country().to_string(),
        Err(_) => input.trim().to_string(),
    }
}
