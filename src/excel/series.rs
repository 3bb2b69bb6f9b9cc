//! Séries mensais: índice projetado, financeiro (desembolso x medido) e prazo
//! (planejado x realizado). Cada leitor devolve vetor vazio quando o
//! cabeçalho não existe na aba.

use crate::excel::grade::{Coluna, Grade, Limites, ler_tabela};
use crate::models::{LinhaFinanceiro, LinhaIndice, LinhaPrazo, Tabela, Valor};

pub const MES: &str = "MÊS";
pub const INDICE_PROJETADO: &str = "ÍNDICE PROJETADO";
pub const DESEMBOLSO_DO_MES: &str = "DESEMBOLSO DO MÊS (R$)";
pub const MEDIDO_NO_MES: &str = "MEDIDO NO MÊS (R$)";
pub const PLANEJADO_MES: &str = "PLANEJADO MÊS (%)";
pub const REALIZADO_MES: &str = "REALIZADO MÊS (%)";

/// Linhas vazias seguidas que encerram uma série
pub const LINHAS_VAZIAS_PADRAO: usize = 2;

fn limites_indice(fim: usize) -> Limites {
    Limites::new(250, 30).com_linhas_vazias(fim)
}

fn limites_financeiro(fim: usize) -> Limites {
    Limites::new(300, 40).com_linhas_vazias(fim)
}

fn limites_prazo(fim: usize) -> Limites {
    Limites::new(350, 30).com_linhas_vazias(fim)
}

fn numero(linha: &[Valor], i: usize) -> Option<f64> {
    linha.get(i).and_then(Valor::como_numero)
}

fn mes(linha: &[Valor]) -> Option<chrono::NaiveDate> {
    linha.first().and_then(Valor::como_mes)
}

pub fn tabela_indice(grade: &Grade, linhas_vazias_fim: usize) -> Tabela {
    ler_tabela(
        grade,
        &[Coluna::mes(MES), Coluna::numero(INDICE_PROJETADO)],
        &limites_indice(linhas_vazias_fim),
    )
}

pub fn tabela_financeiro(grade: &Grade, linhas_vazias_fim: usize) -> Tabela {
    ler_tabela(
        grade,
        &[Coluna::mes(MES), Coluna::numero(DESEMBOLSO_DO_MES), Coluna::numero(MEDIDO_NO_MES)],
        &limites_financeiro(linhas_vazias_fim),
    )
}

pub fn tabela_prazo(grade: &Grade, linhas_vazias_fim: usize) -> Tabela {
    ler_tabela(
        grade,
        &[Coluna::mes(MES), Coluna::numero(PLANEJADO_MES), Coluna::numero(REALIZADO_MES)],
        &limites_prazo(linhas_vazias_fim),
    )
}

pub fn ler_indice(grade: &Grade) -> Vec<LinhaIndice> {
    ler_indice_com(grade, LINHAS_VAZIAS_PADRAO)
}

pub fn ler_indice_com(grade: &Grade, linhas_vazias_fim: usize) -> Vec<LinhaIndice> {
    tabela_indice(grade, linhas_vazias_fim)
        .linhas
        .iter()
        .filter_map(|l| {
            Some(LinhaIndice { mes: mes(l)?, indice_projetado: numero(l, 1) })
        })
        .collect()
}

pub fn ler_financeiro(grade: &Grade) -> Vec<LinhaFinanceiro> {
    ler_financeiro_com(grade, LINHAS_VAZIAS_PADRAO)
}

pub fn ler_financeiro_com(grade: &Grade, linhas_vazias_fim: usize) -> Vec<LinhaFinanceiro> {
    tabela_financeiro(grade, linhas_vazias_fim)
        .linhas
        .iter()
        .filter_map(|l| {
            Some(LinhaFinanceiro {
                mes: mes(l)?,
                desembolso: numero(l, 1),
                medido: numero(l, 2),
            })
        })
        .collect()
}

pub fn ler_prazo(grade: &Grade) -> Vec<LinhaPrazo> {
    ler_prazo_com(grade, LINHAS_VAZIAS_PADRAO)
}

pub fn ler_prazo_com(grade: &Grade, linhas_vazias_fim: usize) -> Vec<LinhaPrazo> {
    tabela_prazo(grade, linhas_vazias_fim)
        .linhas
        .iter()
        .filter_map(|l| {
            Some(LinhaPrazo {
                mes: mes(l)?,
                planejado: numero(l, 1),
                realizado: numero(l, 2),
            })
        })
        .collect()
}
