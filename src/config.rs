//! Configuração do painel: `painel.toml` (opcional), `.env` e variáveis de
//! ambiente, nessa ordem de precedência crescente.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::Result;
use crate::excel::{CANDIDATOS_PADRAO, LINHAS_VAZIAS_PADRAO, resolver_planilha};
use crate::painel::TopN;

/// Arquivo lido quando `--config` não é informado
pub const CONFIG_PADRAO: &str = "painel.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PainelConfig {
    /// Diretório onde procurar a planilha pelos nomes candidatos
    pub dir: PathBuf,
    /// Caminho explícito da planilha (ignora os candidatos)
    pub planilha: Option<PathBuf>,
    pub candidatos: Vec<String>,
    pub logos_dir: PathBuf,
    pub bind: String,
    /// Linhas vazias seguidas que encerram uma série mensal
    pub linhas_vazias_fim: usize,
    pub top_padrao: TopN,
}

impl Default for PainelConfig {
    fn default() -> Self {
        PainelConfig {
            dir: PathBuf::from("."),
            planilha: None,
            candidatos: CANDIDATOS_PADRAO.iter().map(|s| s.to_string()).collect(),
            logos_dir: PathBuf::from("assets/logos"),
            bind: "127.0.0.1:8080".to_string(),
            linhas_vazias_fim: LINHAS_VAZIAS_PADRAO,
            top_padrao: TopN::default(),
        }
    }
}

impl PainelConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut cfg: PainelConfig = toml::from_str(content)?;
        cfg.linhas_vazias_fim = cfg.linhas_vazias_fim.max(1);
        Ok(cfg)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Sobrescreve com `PAINEL_PLANILHA`, `PAINEL_DIR`, `PAINEL_LOGOS`,
    /// `PAINEL_BIND` e `PAINEL_LINHAS_VAZIAS` quando presentes.
    pub fn aplicar_env<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |k: &str| var(k).filter(|v| !v.trim().is_empty());
        if let Some(v) = var("PAINEL_PLANILHA") {
            self.planilha = Some(PathBuf::from(v));
        }
        if let Some(v) = var("PAINEL_DIR") {
            self.dir = PathBuf::from(v);
        }
        if let Some(v) = var("PAINEL_LOGOS") {
            self.logos_dir = PathBuf::from(v);
        }
        if let Some(v) = var("PAINEL_BIND") {
            self.bind = v;
        }
        if let Some(n) = var("PAINEL_LINHAS_VAZIAS").and_then(|v| v.trim().parse::<usize>().ok()) {
            self.linhas_vazias_fim = n.max(1);
        }
    }

    /// Carrega `.env`, o arquivo de configuração (explícito ou `painel.toml`
    /// se existir) e por fim as variáveis de ambiente.
    pub fn carregar(arquivo: Option<&Path>) -> Result<Self> {
        let _ = dotenv::dotenv();

        let mut cfg = match arquivo {
            Some(p) => {
                info!(arquivo = %p.display(), "lendo configuração");
                Self::from_file(p)?
            }
            None if Path::new(CONFIG_PADRAO).is_file() => {
                info!(arquivo = CONFIG_PADRAO, "lendo configuração");
                Self::from_file(CONFIG_PADRAO)?
            }
            None => {
                debug!("sem arquivo de configuração, usando padrões");
                Self::default()
            }
        };
        cfg.aplicar_env(|k| std::env::var(k).ok());
        Ok(cfg)
    }

    /// Caminho da planilha: o explícito (relativo a `dir` se não existir
    /// como está) ou o primeiro candidato existente em `dir`.
    pub fn caminho_planilha(&self) -> Result<PathBuf> {
        match &self.planilha {
            Some(p) if p.is_file() => Ok(p.clone()),
            Some(p) => resolver_planilha(&self.dir, &[p.to_string_lossy()]),
            None => resolver_planilha(&self.dir, self.candidatos.as_slice()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn toml_parcial_mantem_padroes() {
        let cfg = PainelConfig::from_toml_str("bind = \"0.0.0.0:9000\"\ntop_padrao = \"10\"\n").unwrap();
        assert_eq!(cfg.bind, "0.0.0.0:9000");
        assert_eq!(cfg.top_padrao, TopN::Dez);
        assert_eq!(cfg.candidatos.len(), 4);
        assert_eq!(cfg.linhas_vazias_fim, LINHAS_VAZIAS_PADRAO);
    }

    #[test]
    fn toml_invalido_e_erro() {
        assert!(PainelConfig::from_toml_str("top_padrao = \"7\"").is_err());
        assert!(PainelConfig::from_toml_str("bind = [").is_err());
    }

    #[test]
    fn env_sobrescreve() {
        let env: HashMap<&str, &str> = [
            ("PAINEL_PLANILHA", "/tmp/obras.xlsx"),
            ("PAINEL_BIND", "0.0.0.0:80"),
            ("PAINEL_LINHAS_VAZIAS", "0"),
            ("PAINEL_LOGOS", "  "),
        ]
        .into_iter()
        .collect();
        let mut cfg = PainelConfig::default();
        cfg.aplicar_env(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(cfg.planilha, Some(PathBuf::from("/tmp/obras.xlsx")));
        assert_eq!(cfg.bind, "0.0.0.0:80");
        assert_eq!(cfg.linhas_vazias_fim, 1);
        assert_eq!(cfg.logos_dir, PathBuf::from("assets/logos"));
    }
}
