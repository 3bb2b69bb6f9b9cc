//! Painel resumido da planilha "one page" (indicadores chave/valor).

use serde::Serialize;

use crate::excel::io::norm_str;
use crate::models::{Indicadores, Valor};
use crate::painel::formato::{fmt_brl, fmt_percentual};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardIndicador {
    pub rotulo: String,
    pub valor: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AvancoFisico {
    pub planejado: f64,
    pub real: f64,
    pub aderencia: f64,
    pub rotulo: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OnePage {
    pub obra: String,
    pub principais: Vec<CardIndicador>,
    pub avanco_fisico: AvancoFisico,
    pub financeiros: Vec<CardIndicador>,
}

/// Busca pelo rótulo normalizado ("Índice Econômico" == "INDICE ECONOMICO")
fn buscar<'a>(ind: &'a Indicadores, rotulo: &str) -> Option<&'a Valor> {
    let alvo = norm_str(rotulo);
    ind.get(rotulo)
        .or_else(|| ind.iter().find(|(k, _)| norm_str(k) == alvo).map(|(_, v)| v))
}

fn texto(v: Option<&Valor>) -> String {
    match v {
        Some(Valor::Numero(n)) if n.fract() == 0.0 => format!("{}", *n as i64),
        Some(Valor::Numero(n)) => format!("{}", n).replace('.', ","),
        Some(Valor::Texto(s)) => s.clone(),
        Some(Valor::Data(d)) | Some(Valor::Mes(d)) => d.format("%d/%m/%Y").to_string(),
        Some(Valor::Vazio) | None => "-".to_string(),
    }
}

fn numero(v: Option<&Valor>) -> f64 {
    v.and_then(Valor::como_numero).unwrap_or(0.0)
}

pub fn montar_one_page(obra: &str, ind: &Indicadores) -> OnePage {
    let card = |rotulo: &str, valor: String| CardIndicador { rotulo: rotulo.to_string(), valor };

    let principais = vec![
        card("AC (m²)", texto(buscar(ind, "AC(m²)"))),
        card("AP (m²)", texto(buscar(ind, "AP(m²)"))),
        card("Efetivo", fmt_percentual(Some(numero(buscar(ind, "Ef"))))),
        card("Total Unidades", texto(buscar(ind, "Total Unidades"))),
    ];

    let planejado = numero(buscar(ind, "Avanço Físico Planejado"));
    let real = numero(buscar(ind, "Avanço Físico Real"));
    let aderencia = numero(buscar(ind, "Aderência Física"));
    let avanco_fisico = AvancoFisico {
        planejado,
        real,
        aderencia,
        rotulo: format!(
            "Planejado: {} | Real: {} | Aderência: {}",
            fmt_percentual(Some(planejado)),
            fmt_percentual(Some(real)),
            fmt_percentual(Some(aderencia))
        ),
    };

    let financeiros = vec![
        card("Desvio", fmt_percentual(Some(numero(buscar(ind, "Desvio"))))),
        card("Desembolso", fmt_brl(Some(numero(buscar(ind, "Desembolso"))))),
        card("Saldo", fmt_brl(Some(numero(buscar(ind, "Saldo"))))),
        card("Índice Econômico", fmt_percentual(Some(numero(buscar(ind, "Índice Econômico"))))),
    ];

    OnePage { obra: obra.to_string(), principais, avanco_fisico, financeiros }
}
