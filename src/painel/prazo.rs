//! Prazo: Curva S (acumulado), avanço mensal e aderência.

use serde::Serialize;

use crate::excel::io::to_ratio;
use crate::models::LinhaPrazo;
use crate::painel::formato::{fmt_pontos_percentuais, rotulo_mes};

/// Limita a razão a [0, 1]; ausente vira 0
pub fn clamp01(v: Option<f64>) -> f64 {
    match v {
        Some(n) if n.is_finite() => n.clamp(0.0, 1.0),
        _ => 0.0,
    }
}

/// Um mês da série, já em percentual (0-100). `None` depois do último mês
/// com dado de cada série.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PontoPrazo {
    pub mes: chrono::NaiveDate,
    pub rotulo: String,
    pub planejado_mes_pct: Option<f64>,
    pub realizado_mes_pct: Option<f64>,
    pub planejado_acum_pct: Option<f64>,
    pub realizado_acum_pct: Option<f64>,
    /// Realizado ÷ Planejado do mês × 100
    pub aderencia_pct: Option<f64>,
}

/// Situação no último mês com realizado preenchido
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenciaPrazo {
    pub mes: chrono::NaiveDate,
    pub rotulo: String,
    /// Razões acumuladas (0-1, sem limitar)
    pub realizado_acum: f64,
    pub planejado_acum: f64,
    pub aderencia_pct: Option<f64>,
    pub delta_pp: Option<f64>,
    pub delta_rotulo: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalisePrazo {
    /// "INÍCIO: jan/2026"
    pub inicio: String,
    pub pontos: Vec<PontoPrazo>,
    pub referencia: Option<ReferenciaPrazo>,
}

fn acumular(valores: &[Option<f64>]) -> Vec<f64> {
    valores
        .iter()
        .scan(0.0, |soma, v| {
            *soma += v.unwrap_or(0.0);
            Some(*soma)
        })
        .collect()
}

fn aderencia(planejado: Option<f64>, realizado: Option<f64>) -> Option<f64> {
    match (planejado, realizado) {
        (Some(p), Some(r)) if p != 0.0 => Some(r / p * 100.0),
        _ => None,
    }
}

/// Percentual até `ultimo` (inclusive), `None` depois. Sem último, tudo `None`.
fn cortar(valores: impl Iterator<Item = Option<f64>>, ultimo: Option<usize>) -> Vec<Option<f64>> {
    valores
        .enumerate()
        .map(|(i, v)| match ultimo {
            Some(u) if i <= u => v.map(|x| x * 100.0),
            _ => None,
        })
        .collect()
}

/// Calcula a Curva S e a aderência. `None` quando não há linhas.
pub fn calcular_prazo(linhas: &[LinhaPrazo]) -> Option<AnalisePrazo> {
    let primeira = linhas.first()?;

    let planejado_m: Vec<Option<f64>> = linhas.iter().map(|l| to_ratio(l.planejado)).collect();
    let realizado_m: Vec<Option<f64>> = linhas.iter().map(|l| to_ratio(l.realizado)).collect();
    let planejado_acum = acumular(&planejado_m);
    let realizado_acum = acumular(&realizado_m);

    let ultimo_planejado = planejado_m.iter().rposition(Option::is_some);
    let ultimo_realizado = realizado_m.iter().rposition(Option::is_some);

    let p_mes = cortar(planejado_m.iter().copied(), ultimo_planejado);
    let r_mes = cortar(realizado_m.iter().copied(), ultimo_realizado);
    let p_acum = cortar(planejado_acum.iter().map(|v| Some(*v)), ultimo_planejado);
    let r_acum = cortar(realizado_acum.iter().map(|v| Some(*v)), ultimo_realizado);

    let pontos = linhas
        .iter()
        .enumerate()
        .map(|(i, l)| PontoPrazo {
            mes: l.mes,
            rotulo: rotulo_mes(l.mes),
            planejado_mes_pct: p_mes[i],
            realizado_mes_pct: r_mes[i],
            planejado_acum_pct: p_acum[i],
            realizado_acum_pct: r_acum[i],
            aderencia_pct: aderencia(planejado_m[i], realizado_m[i]),
        })
        .collect();

    let referencia = ultimo_realizado.map(|u| {
        let aderencia_pct = aderencia(planejado_m[u], realizado_m[u]);
        let delta_pp = aderencia_pct.map(|a| a - 100.0);
        ReferenciaPrazo {
            mes: linhas[u].mes,
            rotulo: rotulo_mes(linhas[u].mes),
            realizado_acum: realizado_acum[u],
            planejado_acum: planejado_acum[u],
            aderencia_pct,
            delta_pp,
            delta_rotulo: fmt_pontos_percentuais(delta_pp),
        }
    });

    Some(AnalisePrazo {
        inicio: format!("INÍCIO: {}", rotulo_mes(primeira.mes)),
        pontos,
        referencia,
    })
}
