//! Resumo e rankings de ACRÉSCIMOS (desvios) e ECONOMIAS.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

use crate::models::ItemVariacao;
use crate::painel::formato::fmt_brl_sem_decimais;

/// Quantidade de linhas nas tabelas detalhadas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TopN {
    #[default]
    Cinco,
    Dez,
    Todas,
}

impl TopN {
    pub fn limite(self) -> Option<usize> {
        match self {
            TopN::Cinco => Some(5),
            TopN::Dez => Some(10),
            TopN::Todas => None,
        }
    }
}

impl FromStr for TopN {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "5" | "cinco" => Ok(TopN::Cinco),
            "10" | "dez" => Ok(TopN::Dez),
            "todas" | "todos" | "all" => Ok(TopN::Todas),
            outro => Err(format!("top inválido '{}' (use 5, 10 ou todas)", outro)),
        }
    }
}

impl TryFrom<String> for TopN {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<TopN> for String {
    fn from(t: TopN) -> String {
        match t {
            TopN::Cinco => "5".to_string(),
            TopN::Dez => "10".to_string(),
            TopN::Todas => "todas".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResumoVariacoes {
    /// Σ |variação| dos acréscimos
    pub total_acrescimos: f64,
    /// Σ |variação| das economias
    pub total_economias: f64,
    /// desvios + economias, com sinal
    pub saldo: f64,
    pub qtd_acrescimos: usize,
    pub qtd_economias: usize,
    /// "Economia líquida" quando o saldo é negativo
    pub rotulo_saldo: String,
}

pub fn resumo_variacoes(acrescimos: &[ItemVariacao], economias: &[ItemVariacao]) -> ResumoVariacoes {
    let valores = |itens: &[ItemVariacao]| -> Vec<f64> {
        itens.iter().map(|i| i.variacao.unwrap_or(0.0)).collect()
    };
    let va = valores(acrescimos);
    let ve = valores(economias);

    let saldo = va.iter().sum::<f64>() + ve.iter().sum::<f64>();
    ResumoVariacoes {
        total_acrescimos: va.iter().map(|v| v.abs()).sum(),
        total_economias: ve.iter().map(|v| v.abs()).sum(),
        saldo,
        qtd_acrescimos: acrescimos.len(),
        qtd_economias: economias.len(),
        rotulo_saldo: if saldo < 0.0 { "Economia líquida" } else { "Acréscimo líquido" }.to_string(),
    }
}

/// Ordena pela variação; itens sem variação ficam no fim em qualquer sentido.
fn ordenar(itens: &[ItemVariacao], crescente: bool) -> Vec<ItemVariacao> {
    let mut v = itens.to_vec();
    v.sort_by(|a, b| match (a.variacao, b.variacao) {
        (Some(x), Some(y)) => {
            let ord = x.partial_cmp(&y).unwrap_or(Ordering::Equal);
            if crescente { ord } else { ord.reverse() }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    v
}

fn cortar(mut itens: Vec<ItemVariacao>, limite: Option<usize>) -> Vec<ItemVariacao> {
    if let Some(n) = limite {
        itens.truncate(n);
    }
    itens
}

/// Economias mais negativas primeiro
pub fn ranking_economias(itens: &[ItemVariacao], limite: Option<usize>) -> Vec<ItemVariacao> {
    cortar(ordenar(itens, true), limite)
}

/// Acréscimos maiores primeiro
pub fn ranking_acrescimos(itens: &[ItemVariacao], limite: Option<usize>) -> Vec<ItemVariacao> {
    cortar(ordenar(itens, false), limite)
}

/// Linha dos cards laterais ("PRINCIPAIS ECONOMIAS", "DESVIOS DO MÊS")
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemDestaque {
    pub descricao: String,
    pub valor: f64,
    /// "R$ 12.000" ou "- R$ 12.000" para desvios
    pub valor_fmt: String,
}

fn destaques(itens: Vec<ItemVariacao>, prefixo: &str) -> Vec<ItemDestaque> {
    itens
        .into_iter()
        .map(|i| {
            let valor = i.variacao.unwrap_or(0.0);
            ItemDestaque {
                descricao: i.descricao,
                valor,
                valor_fmt: format!("{}{}", prefixo, fmt_brl_sem_decimais(valor.abs())),
            }
        })
        .collect()
}

pub fn principais_economias(itens: &[ItemVariacao], n: usize) -> Vec<ItemDestaque> {
    destaques(ranking_economias(itens, Some(n)), "")
}

pub fn principais_desvios(itens: &[ItemVariacao], n: usize) -> Vec<ItemDestaque> {
    destaques(ranking_acrescimos(itens, Some(n)), "- ")
}
