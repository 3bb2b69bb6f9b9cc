use tracing::debug;

use crate::excel::grade::Grade;
use crate::excel::io::{cell_to_string, is_blank, norm, to_float};
use crate::models::ItemVariacao;

const MAX_LINHA: usize = 500;

/// Colunas (1-based) de um dos lados: descrição, orç. inicial, orç.
/// reajustado, custo final e variação.
#[derive(Debug, Clone, Copy)]
struct Lado {
    descricao: usize,
    orcamento_inicial: usize,
    orcamento_reajustado: usize,
    custo_final: usize,
    variacao: usize,
}

impl Lado {
    const fn a_partir_de(coluna: usize) -> Self {
        Lado {
            descricao: coluna,
            orcamento_inicial: coluna + 1,
            orcamento_reajustado: coluna + 2,
            custo_final: coluna + 3,
            variacao: coluna + 4,
        }
    }
}

/// A..E
const ACRESCIMOS: Lado = Lado::a_partir_de(1);
/// G..K
const ECONOMIAS: Lado = Lado::a_partir_de(7);

fn achar_linha_titulo(grade: &Grade) -> Option<usize> {
    let ate = grade.max_linha().min(MAX_LINHA);
    let titulo = (1..=ate).find(|&r| {
        let a = norm(grade.celula(r, ACRESCIMOS.descricao));
        let g = norm(grade.celula(r, ECONOMIAS.descricao));
        a.contains("ACRESCIM") && g.contains("ECONOM")
    });
    if titulo.is_some() {
        return titulo;
    }

    // sem título: a linha acima do cabeçalho "DESCRIÇÃO" em A e em G
    (1..=ate)
        .find(|&r| {
            norm(grade.celula(r, ACRESCIMOS.descricao)) == "DESCRICAO"
                && norm(grade.celula(r, ECONOMIAS.descricao)) == "DESCRICAO"
        })
        .map(|r| r - 1)
}

fn ler_lado(grade: &Grade, linha_cabecalho: usize, lado: Lado) -> Vec<ItemVariacao> {
    let mut itens = Vec::new();
    let mut r = linha_cabecalho + 1;
    while r <= grade.max_linha() {
        let desc = grade.celula(r, lado.descricao);
        if is_blank(desc) {
            break;
        }
        itens.push(ItemVariacao {
            descricao: cell_to_string(desc),
            orcamento_inicial: to_float(grade.celula(r, lado.orcamento_inicial)),
            orcamento_reajustado: to_float(grade.celula(r, lado.orcamento_reajustado)),
            custo_final: to_float(grade.celula(r, lado.custo_final)),
            variacao: to_float(grade.celula(r, lado.variacao)),
        });
        r += 1;
    }
    itens
}

/// Espera blocos lado a lado:
///   A..E = ACRÉSCIMOS
///   G..K = ECONOMIAS
///
/// Devolve (acréscimos, economias); ambos vazios se o título não existir.
pub fn ler_acrescimos_economias(grade: &Grade) -> (Vec<ItemVariacao>, Vec<ItemVariacao>) {
    let Some(linha_titulo) = achar_linha_titulo(grade) else {
        debug!("blocos ACRÉSCIMOS/ECONOMIAS não encontrados");
        return (Vec::new(), Vec::new());
    };
    let linha_cabecalho = linha_titulo + 1;
    (
        ler_lado(grade, linha_cabecalho, ACRESCIMOS),
        ler_lado(grade, linha_cabecalho, ECONOMIAS),
    )
}
