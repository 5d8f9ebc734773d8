//! 지수 섹터 분류 정책.
//!
//! 정책은 순서가 있는 규칙 목록과 전역 기본 섹터로 구성됩니다.
//! 규칙은 국가 라벨로 매칭되며, 처음 매칭된 규칙이 섹터를 결정합니다.
//!
//! - `PerIndex`: 지수명별 섹터 표. 표에 없는 지수는 해당 국가의 catch-all 섹터.
//! - `PerCountry`: 국가 전체에 하나의 섹터.
//! - 어떤 규칙에도 매칭되지 않으면 `fallback`.
//!
//! 따라서 `resolve`는 모든 (국가, 지수명) 쌍에 대해 항상 섹터를 반환합니다.
//!
//! ## TOML 형식
//! ```toml
//! fallback = "Primário"
//!
//! [[rules]]
//! kind = "per_index"
//! country = "Brasil"
//! catch_all = "Diversificado"
//! [rules.overrides]
//! "Ibovespa" = "Financeiro"
//!
//! [[rules]]
//! kind = "per_country"
//! country = "China"
//! sector = "Primário"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{DataError, Result};

/// 브라질 catch-all 섹터.
pub const BRAZIL_CATCH_ALL: &str = "Diversificado";

/// 국가 단위 분류 및 전역 기본 섹터.
pub const PRIMARY_SECTOR: &str = "Primário";

/// 브라질 지수명별 섹터 표.
const BRAZIL_INDEX_SECTORS: &[(&str, &str)] = &[
    ("Ibovespa", "Financeiro"),
    ("IBrX 50", "Financeiro"),
    ("IBrX 100", "Financeiro"),
    ("Brasil Amplo IBrA", "Diversificado"),
    ("MidLarge Cap MLCX", "Indústria"),
    ("Small Cap SMLL", "Indústria"),
    ("Tag Along ITAG", "Financeiro"),
    ("Gov. Corporativa Novo Mercado IGC-NM", "Governança Corporativa"),
    ("Ibov Smart Dividendos", "Financeiro"),
    ("BDRs Não Patrocinados BDRX", "Internacional"),
    ("Inv. Imobiliários IFIX", "Imobiliário"),
    ("Carbono Eficiente ICO2", "Sustentabilidade"),
    ("Gov. Corporativa Trade IGCT", "Governança Corporativa"),
    ("FTSE Brazil", "Internacional"),
    ("Gov. Corporativa IGC", "Governança Corporativa"),
    ("IVBX 2", "Diversificado"),
    ("Dividendos IDIV", "Financeiro"),
    ("Ibovespa USD", "Câmbio"),
    ("Ibovespa EUR", "Câmbio"),
    ("IFIL", "Financeiro"),
    ("Indice de GPTW B3", "Governança Corporativa"),
    ("Sustentabilidade Empresarial", "Sustentabilidade"),
    ("S&P/B3 Ibovespa VIX", "Volatilidade"),
    ("Ibovespa B3 Br+", "Financeiro"),
    ("Bovespa B3 Estatais", "Financeiro"),
    ("Bovespa B3 Empresas Privada", "Financeiro"),
];

/// 분류 규칙.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SectorRule {
    /// 지수명별 섹터 표 + 국가 catch-all
    PerIndex {
        country: String,
        #[serde(default)]
        overrides: BTreeMap<String, String>,
        catch_all: String,
    },
    /// 국가 전체에 적용되는 섹터
    PerCountry { country: String, sector: String },
}

impl SectorRule {
    /// 규칙이 적용되는 국가 라벨.
    pub fn country(&self) -> &str {
        match self {
            SectorRule::PerIndex { country, .. } | SectorRule::PerCountry { country, .. } => {
                country
            }
        }
    }

    fn apply<'a>(&'a self, index_name: &str) -> SectorResolution<'a> {
        match self {
            SectorRule::PerIndex {
                overrides,
                catch_all,
                ..
            } => match overrides.get(index_name) {
                Some(sector) => SectorResolution {
                    sector,
                    tier: SectorTier::IndexOverride,
                },
                None => SectorResolution {
                    sector: catch_all,
                    tier: SectorTier::CountryCatchAll,
                },
            },
            SectorRule::PerCountry { sector, .. } => SectorResolution {
                sector,
                tier: SectorTier::CountryDefault,
            },
        }
    }
}

/// 섹터를 결정한 단계.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectorTier {
    /// 지수명별 표에서 찾음
    IndexOverride,
    /// 지수명별 표가 있는 국가지만 표에 없음
    CountryCatchAll,
    /// 국가 단위 섹터
    CountryDefault,
    /// 전역 기본 섹터
    GlobalFallback,
}

/// 섹터 결정 결과.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectorResolution<'a> {
    pub sector: &'a str,
    pub tier: SectorTier,
}

/// 섹터 분류 정책 (읽기 전용으로 공유).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectorPolicy {
    /// 평가 순서대로 나열된 규칙
    #[serde(default)]
    pub rules: Vec<SectorRule>,
    /// 어떤 규칙에도 매칭되지 않을 때의 섹터
    pub fallback: String,
}

impl SectorPolicy {
    /// 기본 내장 정책 (브라질 지수명별 표, 중국/미국 국가 단위).
    pub fn builtin() -> Self {
        let overrides = BRAZIL_INDEX_SECTORS
            .iter()
            .map(|(name, sector)| (name.to_string(), sector.to_string()))
            .collect();

        Self {
            rules: vec![
                SectorRule::PerIndex {
                    country: "Brasil".to_string(),
                    overrides,
                    catch_all: BRAZIL_CATCH_ALL.to_string(),
                },
                SectorRule::PerCountry {
                    country: "China".to_string(),
                    sector: PRIMARY_SECTOR.to_string(),
                },
                SectorRule::PerCountry {
                    country: "EUA".to_string(),
                    sector: PRIMARY_SECTOR.to_string(),
                },
            ],
            fallback: PRIMARY_SECTOR.to_string(),
        }
    }

    /// TOML 문자열에서 정책을 읽습니다.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let policy: SectorPolicy = toml::from_str(content)?;
        policy.validate()?;
        Ok(policy)
    }

    /// TOML 파일에서 정책을 읽습니다.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// 모든 규칙이 비어 있지 않은 섹터를 반환하는지 검사합니다.
    pub fn validate(&self) -> Result<()> {
        if self.fallback.trim().is_empty() {
            return Err(DataError::ConfigError(
                "fallback sector must not be empty".to_string(),
            ));
        }

        for rule in &self.rules {
            let empty = match rule {
                SectorRule::PerIndex {
                    overrides,
                    catch_all,
                    ..
                } => catch_all.trim().is_empty() || overrides.values().any(|s| s.trim().is_empty()),
                SectorRule::PerCountry { sector, .. } => sector.trim().is_empty(),
            };
            if empty {
                return Err(DataError::ConfigError(format!(
                    "empty sector in rule for country '{}'",
                    rule.country()
                )));
            }
        }

        Ok(())
    }

    /// (국가, 지수명)에 대한 섹터를 반환합니다. 실패하지 않습니다.
    pub fn resolve(&self, country: &str, index_name: &str) -> &str {
        self.resolve_with_tier(country, index_name).sector
    }

    /// 섹터와 함께 어느 단계에서 결정되었는지 반환합니다.
    pub fn resolve_with_tier(&self, country: &str, index_name: &str) -> SectorResolution<'_> {
        self.rules
            .iter()
            .find(|rule| rule.country() == country)
            .map(|rule| rule.apply(index_name))
            .unwrap_or(SectorResolution {
                sector: &self.fallback,
                tier: SectorTier::GlobalFallback,
            })
    }
}

impl Default for SectorPolicy {
    fn default() -> Self {
        Self::builtin()
    }
}
