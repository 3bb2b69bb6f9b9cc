use tracing::debug;

use crate::excel::grade::{Grade, achar_linha_contendo};
use crate::excel::io::{cell_to_string, is_blank, norm_str, to_float};
use crate::models::ResumoFinanceiro;

pub const ORCAMENTO_INICIAL: &str = "ORÇAMENTO INICIAL (R$)";
pub const ORCAMENTO_REAJUSTADO: &str = "ORÇAMENTO REAJUSTADO (R$)";
pub const DESEMBOLSO_ACUMULADO: &str = "DESEMBOLSO ACUMULADO (R$)";
pub const A_PAGAR: &str = "A PAGAR (R$)";
pub const SALDO_A_INCORRER: &str = "SALDO A INCORRER (R$)";
pub const CUSTO_FINAL: &str = "CUSTO FINAL (R$)";
pub const VARIACAO: &str = "VARIAÇÃO (R$)";

const TITULO: &str = "RESUMO FINANCEIRO";
const MAX_LINHA_TITULO: usize = 80;

/// Chave canônica para um rótulo já normalizado (sem acento, maiúsculo)
fn chave_canonica(rotulo_norm: &str) -> Option<&'static str> {
    let base = rotulo_norm.trim_end_matches("(R$)").trim_end();
    let chave = match base {
        "ORCAMENTO INICIAL" => ORCAMENTO_INICIAL,
        "ORCAMENTO REAJUSTADO" => ORCAMENTO_REAJUSTADO,
        "DESEMBOLSO ACUMULADO" => DESEMBOLSO_ACUMULADO,
        "A PAGAR" => A_PAGAR,
        "SALDO A INCORRER" => SALDO_A_INCORRER,
        "CUSTO FINAL" => CUSTO_FINAL,
        "VARIACAO" => VARIACAO,
        _ => return None,
    };
    Some(chave)
}

/// Bloco:
///   RESUMO FINANCEIRO (INSIRA OS VALORES)
///   coluna A = item
///   coluna B = valor
///
/// Lê do título até o primeiro item em branco. Sem título, mapa vazio.
pub fn ler_resumo_financeiro(grade: &Grade) -> ResumoFinanceiro {
    let mut out = ResumoFinanceiro::new();
    let Some(linha_titulo) = achar_linha_contendo(grade, TITULO, 1, MAX_LINHA_TITULO) else {
        debug!("bloco RESUMO FINANCEIRO não encontrado");
        return out;
    };

    let mut r = linha_titulo + 1;
    while r <= grade.max_linha() {
        let k = grade.celula(r, 1);
        if is_blank(k) {
            break;
        }
        let texto = cell_to_string(k);
        let chave = match chave_canonica(&norm_str(&texto)) {
            Some(c) => c.to_string(),
            None => texto,
        };
        out.insert(chave, to_float(grade.celula(r, 2)));
        r += 1;
    }
    out
}
