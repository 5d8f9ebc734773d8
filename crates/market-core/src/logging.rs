//! tracing을 사용한 로깅 인프라.
//!
//! 수집기 바이너리와 테스트 하네스가 공통으로 사용하는 구독자 초기화 코드입니다.
//! 출력 형식은 `pretty`(개발용), `json`(로그 집계용), `compact` 중 하나를 고릅니다.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 로그 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// 색상이 포함된 사람이 읽기 쉬운 형식
    #[default]
    Pretty,
    /// 로그 집계용 JSON 형식
    Json,
    /// 간결한 한 줄 형식
    Compact,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            "compact" => Ok(Self::Compact),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// 필터 지시어 (예: "info", "market_collector=debug,market_data=debug")
    pub filter: String,
    /// 출력 형식
    pub format: LogFormat,
    /// 대상(모듈 경로) 포함 여부
    pub with_target: bool,
    /// ANSI 색상 사용 여부
    pub with_ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            format: LogFormat::Pretty,
            with_target: true,
            with_ansi: true,
        }
    }
}

impl LogConfig {
    /// 주어진 필터 지시어로 설정을 생성합니다.
    pub fn new(filter: impl Into<String>) -> Self {
        Self {
            filter: filter.into(),
            ..Default::default()
        }
    }

    /// 지정한 crate들에 동일한 레벨을 적용하는 설정을 생성합니다.
    ///
    /// `for_crates(&["market_collector", "market_data"], "debug")`는
    /// `"market_collector=debug,market_data=debug"` 필터가 됩니다.
    pub fn for_crates(crates: &[&str], level: &str) -> Self {
        let filter = crates
            .iter()
            .map(|name| format!("{}={}", name, level))
            .collect::<Vec<_>>()
            .join(",");
        Self::new(filter)
    }

    /// 로그 형식을 설정합니다.
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// `LOG_FORMAT` 환경 변수가 있으면 형식을 덮어씁니다.
    pub fn with_env_format(mut self) -> Self {
        if let Some(format) = std::env::var("LOG_FORMAT")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            self.format = format;
        }
        self
    }
}

/// 주어진 설정으로 전역 구독자를 초기화합니다.
///
/// `RUST_LOG`가 설정되어 있으면 `config.filter`보다 우선합니다.
///
/// ```no_run
/// use market_core::logging::{init_logging, LogConfig, LogFormat};
///
/// let config = LogConfig::for_crates(&["market_collector"], "debug")
///     .with_format(LogFormat::Json);
/// init_logging(config).unwrap();
/// ```
pub fn init_logging(config: LogConfig) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.filter))?;

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.format {
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .pretty()
                    .with_target(config.with_target)
                    .with_ansi(config.with_ansi),
            )
            .try_init()?,
        LogFormat::Json => registry
            .with(fmt::layer().json().with_target(config.with_target))
            .try_init()?,
        LogFormat::Compact => registry
            .with(
                fmt::layer()
                    .compact()
                    .with_target(config.with_target)
                    .with_ansi(config.with_ansi),
            )
            .try_init()?,
    }

    tracing::debug!(format = ?config.format, filter = %config.filter, "Logging initialized");

    Ok(())
}

/// 시장 단위 작업 span을 생성하는 매크로.
#[macro_export]
macro_rules! market_span {
    ($name:expr, $country:expr) => {
        tracing::info_span!($name, country = %$country)
    };
    ($name:expr, $country:expr, $url:expr) => {
        tracing::info_span!($name, country = %$country, url = %$url)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_from_str() {
        assert_eq!("pretty".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!(" compact ".parse::<LogFormat>().unwrap(), LogFormat::Compact);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_for_crates_builds_filter() {
        let config = LogConfig::for_crates(&["market_collector", "market_data"], "debug");
        assert_eq!(config.filter, "market_collector=debug,market_data=debug");
        assert_eq!(config.format, LogFormat::Pretty);
    }

    #[test]
    fn test_with_format() {
        let config = LogConfig::new("warn").with_format(LogFormat::Json);
        assert_eq!(config.filter, "warn");
        assert_eq!(config.format, LogFormat::Json);
    }
}
