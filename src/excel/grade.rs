//! Grade de células de uma aba e o localizador de blocos por cabeçalho.
//!
//! As abas não têm layout fixo: títulos mudam de linha, o texto dos
//! cabeçalhos varia entre versões e há blocos lado a lado. Por isso os blocos
//! são achados varrendo o texto das células, nunca por faixa fixa.

use calamine::{Data, Range};
use tracing::debug;

use crate::excel::io::{is_blank, norm, norm_str, to_float, to_month};
use crate::models::{Tabela, Valor};

static VAZIO: Data = Data::Empty;

/// Aba já carregada, endereçada como no Excel: linha e coluna a partir de 1,
/// em posição absoluta (A1 = (1, 1)) mesmo que o range comece depois.
#[derive(Debug, Clone, Default)]
pub struct Grade {
    range: Range<Data>,
}

impl Grade {
    pub fn new(range: Range<Data>) -> Self {
        Grade { range }
    }

    /// Célula na posição (linha, coluna), 1-based. Fora do range é vazia.
    pub fn celula(&self, linha: usize, coluna: usize) -> &Data {
        if linha == 0 || coluna == 0 {
            return &VAZIO;
        }
        let pos = ((linha - 1) as u32, (coluna - 1) as u32);
        self.range.get_value(pos).unwrap_or(&VAZIO)
    }

    /// Última linha com conteúdo (0 se a aba estiver vazia)
    pub fn max_linha(&self) -> usize {
        self.range.end().map(|(r, _)| r as usize + 1).unwrap_or(0)
    }

    pub fn max_coluna(&self) -> usize {
        self.range.end().map(|(_, c)| c as usize + 1).unwrap_or(0)
    }
}

impl From<Range<Data>> for Grade {
    fn from(range: Range<Data>) -> Self {
        Grade::new(range)
    }
}

/// Limites de varredura de um bloco
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limites {
    pub max_linha: usize,
    pub max_coluna: usize,
    /// Quantidade de linhas vazias seguidas que encerra o bloco
    pub linhas_vazias_fim: usize,
}

impl Limites {
    pub fn new(max_linha: usize, max_coluna: usize) -> Self {
        Limites { max_linha, max_coluna, linhas_vazias_fim: 2 }
    }

    pub fn com_linhas_vazias(mut self, n: usize) -> Self {
        self.linhas_vazias_fim = n.max(1);
        self
    }
}

impl Default for Limites {
    fn default() -> Self {
        Limites::new(300, 60)
    }
}

/// Como converter as células de uma coluna
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversao {
    Mes,
    Numero,
    Texto,
}

/// Cabeçalho procurado e a conversão das células abaixo dele
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coluna {
    pub cabecalho: String,
    pub conversao: Conversao,
}

impl Coluna {
    pub fn new(cabecalho: &str, conversao: Conversao) -> Self {
        Coluna { cabecalho: cabecalho.to_string(), conversao }
    }

    pub fn mes(cabecalho: &str) -> Self {
        Coluna::new(cabecalho, Conversao::Mes)
    }

    pub fn numero(cabecalho: &str) -> Self {
        Coluna::new(cabecalho, Conversao::Numero)
    }

    pub fn texto(cabecalho: &str) -> Self {
        Coluna::new(cabecalho, Conversao::Texto)
    }
}

/// Primeira linha (até `max_linha`) cuja célula em `coluna` contém `needle`.
pub fn achar_linha_contendo(grade: &Grade, needle: &str, coluna: usize, max_linha: usize) -> Option<usize> {
    let n = norm_str(needle);
    let ate = grade.max_linha().min(max_linha);
    (1..=ate).find(|&r| norm(grade.celula(r, coluna)).contains(&n))
}

/// Primeira linha que contém todos os cabeçalhos pedidos. Devolve o número
/// da linha e os valores normalizados dela (índice 0 = coluna 1).
pub fn achar_cabecalho(grade: &Grade, cabecalhos: &[&str], limites: &Limites) -> Option<(usize, Vec<String>)> {
    let want: Vec<String> = cabecalhos.iter().map(|h| norm_str(h)).collect();
    let r_max = grade.max_linha().min(limites.max_linha);
    let c_max = grade.max_coluna().min(limites.max_coluna);

    for r in 1..=r_max {
        let valores: Vec<String> = (1..=c_max).map(|c| norm(grade.celula(r, c))).collect();
        let ok = want.iter().all(|h| h.is_empty() || valores.contains(h));
        if ok {
            return Some((r, valores));
        }
    }
    None
}

/// Coluna (1-based) do cabeçalho na linha já normalizada
pub fn indice_coluna(valores: &[String], cabecalho: &str) -> Option<usize> {
    let h = norm_str(cabecalho);
    valores.iter().position(|v| *v == h).map(|i| i + 1)
}

fn converter(c: &Data, conversao: Conversao) -> Valor {
    let v = match conversao {
        Conversao::Mes => to_month(c).map(Valor::Mes),
        Conversao::Numero => to_float(c).map(Valor::Numero),
        Conversao::Texto if is_blank(c) => None,
        Conversao::Texto => Some(Valor::Texto(crate::excel::io::cell_to_string(c))),
    };
    v.unwrap_or(Valor::Vazio)
}

/// Localizador genérico de blocos.
///
/// A primeira coluna é a chave: a linha conta como vazia quando a chave está
/// em branco, e linhas cuja chave não converte (ex. TOTAL) são descartadas.
/// O bloco termina em `linhas_vazias_fim` linhas vazias seguidas, numa chave
/// que não converte logo depois de linha vazia, num novo cabeçalho com a
/// mesma chave ou no fim da aba.
/// Sem cabeçalho, devolve a tabela vazia com as colunas pedidas.
pub fn ler_tabela(grade: &Grade, colunas: &[Coluna], limites: &Limites) -> Tabela {
    let nomes: Vec<String> = colunas.iter().map(|c| norm_str(&c.cabecalho)).collect();
    if colunas.is_empty() {
        return Tabela::vazia(nomes);
    }

    let cabecalhos: Vec<&str> = colunas.iter().map(|c| c.cabecalho.as_str()).collect();
    let Some((linha_cab, valores)) = achar_cabecalho(grade, &cabecalhos, limites) else {
        debug!(cabecalhos = ?nomes, "cabeçalho não encontrado");
        return Tabela::vazia(nomes);
    };

    let mut indices = Vec::with_capacity(colunas.len());
    for c in colunas {
        match indice_coluna(&valores, &c.cabecalho) {
            Some(i) => indices.push(i),
            None => return Tabela::vazia(nomes),
        }
    }

    let mut linhas = Vec::new();
    let mut vazias = 0usize;
    let mut r = linha_cab + 1;
    while r <= grade.max_linha() {
        let chave = grade.celula(r, indices[0]);
        if is_blank(chave) {
            vazias += 1;
            if vazias >= limites.linhas_vazias_fim {
                break;
            }
            r += 1;
            continue;
        }
        // o cabeçalho de outro bloco empilhado logo abaixo
        if norm(chave) == nomes[0] {
            break;
        }
        let apos_vazia = vazias > 0;
        vazias = 0;

        let linha: Vec<Valor> = colunas
            .iter()
            .zip(indices.iter())
            .map(|(c, &col)| converter(grade.celula(r, col), c.conversao))
            .collect();
        if !linha[0].is_vazio() {
            linhas.push(linha);
        } else if apos_vazia {
            break;
        }
        r += 1;
    }

    debug!(linha_cabecalho = linha_cab, linhas = linhas.len(), "bloco lido");
    Tabela { colunas: nomes, linhas }
}
