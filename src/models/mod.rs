// Estruturas de dados principais

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// Valor de uma célula já convertido. `Vazio` é o sentinela de "sem dado"
/// para células em branco ou que não puderam ser convertidas.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Valor {
    Numero(f64),
    Mes(NaiveDate),
    Data(NaiveDate),
    Texto(String),
    Vazio,
}

impl Valor {
    pub fn como_numero(&self) -> Option<f64> {
        match self {
            Valor::Numero(n) => Some(*n),
            _ => None,
        }
    }

    pub fn como_mes(&self) -> Option<NaiveDate> {
        match self {
            Valor::Mes(d) => Some(*d),
            _ => None,
        }
    }

    pub fn como_texto(&self) -> Option<&str> {
        match self {
            Valor::Texto(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn is_vazio(&self) -> bool {
        matches!(self, Valor::Vazio)
    }
}

/// Resultado genérico do localizador de blocos: uma coluna por cabeçalho
/// pedido, com o nome já normalizado.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tabela {
    pub colunas: Vec<String>,
    pub linhas: Vec<Vec<Valor>>,
}

impl Tabela {
    /// Tabela sem linhas, mantendo as colunas esperadas
    pub fn vazia(colunas: Vec<String>) -> Self {
        Tabela { colunas, linhas: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.linhas.is_empty()
    }

    pub fn len(&self) -> usize {
        self.linhas.len()
    }

    /// Posição da coluna; aceita o nome com ou sem acento
    pub fn indice_coluna(&self, nome: &str) -> Option<usize> {
        let alvo = crate::excel::io::norm_str(nome);
        self.colunas.iter().position(|c| *c == alvo)
    }

    /// Valores de uma coluna pelo nome (vazio se a coluna não existir)
    pub fn coluna(&self, nome: &str) -> Vec<&Valor> {
        match self.indice_coluna(nome) {
            Some(i) => self.linhas.iter().filter_map(|l| l.get(i)).collect(),
            None => Vec::new(),
        }
    }
}

/// Bloco "RESUMO FINANCEIRO": item -> valor (R$). Chaves conhecidas vêm
/// canonizadas (ver `excel::resumo`), as demais com o texto da célula.
pub type ResumoFinanceiro = BTreeMap<String, Option<f64>>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinhaIndice {
    pub mes: NaiveDate,
    pub indice_projetado: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinhaFinanceiro {
    pub mes: NaiveDate,
    pub desembolso: Option<f64>,
    pub medido: Option<f64>,
}

/// Avanço mensal como veio da planilha (razão 0-1 ou percentual 0-100)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinhaPrazo {
    pub mes: NaiveDate,
    pub planejado: Option<f64>,
    pub realizado: Option<f64>,
}

/// Linha dos blocos lado a lado ACRÉSCIMOS / ECONOMIAS
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemVariacao {
    pub descricao: String,
    pub orcamento_inicial: Option<f64>,
    pub orcamento_reajustado: Option<f64>,
    pub custo_final: Option<f64>,
    pub variacao: Option<f64>,
}

/// Indicadores chave/valor da aba "one page" (colunas A:B)
pub type Indicadores = BTreeMap<String, Valor>;

/// Todos os blocos de uma aba de obra, lidos uma vez por requisição
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlocosObra {
    pub resumo: ResumoFinanceiro,
    pub indice: Vec<LinhaIndice>,
    pub financeiro: Vec<LinhaFinanceiro>,
    pub prazo: Vec<LinhaPrazo>,
    pub acrescimos: Vec<ItemVariacao>,
    pub economias: Vec<ItemVariacao>,
}
