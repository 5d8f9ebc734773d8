//! 환경변수 기반 설정 모듈.

use market_core::DEFAULT_BASE_URL;
use market_data::provider::http::DEFAULT_USER_AGENT;
use market_data::{DatabaseConfig, HttpFetcherConfig, SectorPolicy};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::CollectorError;
use crate::Result;

/// Collector 전체 설정
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// 데이터베이스 URL (DB를 쓰는 명령에서만 필수)
    pub database_url: Option<String>,
    /// 연결 풀 최대 연결 수
    pub db_max_connections: u32,
    /// 지수 목록 페이지 기본 URL
    pub base_url: String,
    /// 페이지 수집 설정
    pub fetch: FetchConfig,
    /// 섹터 정책 TOML 경로 (없으면 내장 정책)
    pub sector_policy_path: Option<PathBuf>,
    /// 리포트 설정
    pub report: ReportConfig,
}

/// 페이지 수집 방식
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// HTTP 직접 요청
    Http,
    /// 저장된 HTML 스냅샷
    Snapshot,
}

impl FromStr for FetchMode {
    type Err = CollectorError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "http" => Ok(Self::Http),
            "snapshot" => Ok(Self::Snapshot),
            other => Err(CollectorError::Config(format!(
                "FETCH_MODE는 http 또는 snapshot이어야 합니다: '{}'",
                other
            ))),
        }
    }
}

/// 페이지 수집 설정
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// 수집 방식
    pub mode: FetchMode,
    /// 스냅샷 디렉터리
    pub snapshot_dir: PathBuf,
    /// HTTP 요청 타임아웃 (초)
    pub timeout_secs: u64,
    /// HTTP User-Agent
    pub user_agent: String,
}

/// 리포트 설정
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// 상위 N개
    pub limit: i64,
}

impl CollectorConfig {
    /// 환경변수(.env 포함)에서 설정 로드
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 키 조회 함수로 설정 로드
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mode = match lookup("FETCH_MODE") {
            Some(value) => value.parse()?,
            None => FetchMode::Http,
        };

        Ok(Self {
            database_url: lookup("DATABASE_URL").filter(|v| !v.trim().is_empty()),
            db_max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 5),
            base_url: lookup("INDICES_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            fetch: FetchConfig {
                mode,
                snapshot_dir: lookup("SNAPSHOT_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from("snapshots")),
                timeout_secs: parse_or(&lookup, "HTTP_TIMEOUT_SECS", 30),
                user_agent: lookup("HTTP_USER_AGENT")
                    .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            },
            sector_policy_path: lookup("SECTOR_POLICY_PATH").map(PathBuf::from),
            report: ReportConfig {
                limit: parse_or(&lookup, "REPORT_LIMIT", 10),
            },
        })
    }

    /// DB 연결 설정 (DATABASE_URL 필수)
    pub fn database_config(&self) -> Result<DatabaseConfig> {
        let url = self.database_url.clone().ok_or_else(|| {
            CollectorError::Config("DATABASE_URL 환경변수가 설정되지 않았습니다".to_string())
        })?;

        let mut config = DatabaseConfig::new(url);
        config.max_connections = self.db_max_connections;
        Ok(config)
    }

    /// 섹터 정책 로드 (경로가 없으면 내장 정책)
    pub fn load_sector_policy(&self) -> Result<SectorPolicy> {
        match &self.sector_policy_path {
            Some(path) => {
                tracing::info!(path = %path.display(), "섹터 정책 파일 로드");
                Ok(SectorPolicy::from_file(path)?)
            }
            None => Ok(SectorPolicy::builtin()),
        }
    }
}

impl FetchConfig {
    /// HTTP fetcher 설정으로 변환
    pub fn http_config(&self) -> HttpFetcherConfig {
        HttpFetcherConfig {
            timeout: Duration::from_secs(self.timeout_secs),
            user_agent: self.user_agent.clone(),
        }
    }
}

/// 값을 파싱 (없거나 실패 시 기본값 사용)
fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<CollectorConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        CollectorConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.database_url, None);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.fetch.mode, FetchMode::Http);
        assert_eq!(config.fetch.snapshot_dir, PathBuf::from("snapshots"));
        assert_eq!(config.fetch.timeout_secs, 30);
        assert_eq!(config.report.limit, 10);
        assert!(config.sector_policy_path.is_none());
        assert!(config.database_config().is_err());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("DATABASE_URL", "postgres://u:p@localhost/indices"),
            ("DB_MAX_CONNECTIONS", "2"),
            ("FETCH_MODE", "Snapshot"),
            ("SNAPSHOT_DIR", "/tmp/pages"),
            ("HTTP_TIMEOUT_SECS", "5"),
            ("REPORT_LIMIT", "3"),
        ])
        .unwrap();

        assert_eq!(config.fetch.mode, FetchMode::Snapshot);
        assert_eq!(config.fetch.snapshot_dir, PathBuf::from("/tmp/pages"));
        assert_eq!(config.fetch.http_config().timeout, Duration::from_secs(5));
        assert_eq!(config.report.limit, 3);

        let db = config.database_config().unwrap();
        assert_eq!(db.url, "postgres://u:p@localhost/indices");
        assert_eq!(db.max_connections, 2);
    }

    #[test]
    fn test_invalid_numbers_fall_back_to_defaults() {
        let config = config_from(&[("REPORT_LIMIT", "ten"), ("HTTP_TIMEOUT_SECS", "")]).unwrap();
        assert_eq!(config.report.limit, 10);
        assert_eq!(config.fetch.timeout_secs, 30);
    }

    #[test]
    fn test_invalid_fetch_mode_is_error() {
        assert!(matches!(
            config_from(&[("FETCH_MODE", "browser")]),
            Err(CollectorError::Config(_))
        ));
    }

    #[test]
    fn test_builtin_policy_without_path() {
        let policy = config_from(&[]).unwrap().load_sector_policy().unwrap();
        assert_eq!(policy.resolve("Brasil", "Ibovespa"), "Financeiro");
    }
}
