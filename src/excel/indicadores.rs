use crate::excel::grade::Grade;
use crate::excel::io::{cell_to_string, is_blank, to_date, to_float};
use crate::models::{Indicadores, Valor};

/// Aba "one page": indicador na coluna A, valor na coluna B, sem cabeçalho.
/// O valor vira número, senão data, senão texto. Linhas sem indicador são
/// ignoradas; rótulos repetidos ficam com o último valor.
pub fn ler_indicadores(grade: &Grade) -> Indicadores {
    let mut out = Indicadores::new();
    for r in 1..=grade.max_linha() {
        let k = grade.celula(r, 1);
        if is_blank(k) {
            continue;
        }
        let v = grade.celula(r, 2);
        let valor = if is_blank(v) {
            Valor::Vazio
        } else if let Some(n) = to_float(v) {
            Valor::Numero(n)
        } else if let Some(d) = to_date(v) {
            Valor::Data(d)
        } else {
            Valor::Texto(cell_to_string(v))
        };
        out.insert(cell_to_string(k), valor);
    }
    out
}
