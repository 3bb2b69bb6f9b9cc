// Dados do painel de uma obra: cards de KPI, séries, Curva S e rankings.
// Tudo aqui é cálculo puro sobre `BlocosObra`; nenhuma leitura de arquivo.
pub mod formato;
pub mod one_page;
pub mod prazo;
pub mod variacoes;

pub use one_page::{OnePage, montar_one_page};
pub use prazo::{AnalisePrazo, PontoPrazo, ReferenciaPrazo, calcular_prazo, clamp01};
pub use variacoes::{ItemDestaque, ResumoVariacoes, TopN, resumo_variacoes};

use serde::Serialize;

use crate::excel::resumo;
use crate::models::{BlocosObra, ItemVariacao, LinhaFinanceiro, LinhaIndice};
use formato::{brl_compacto, fmt_brl};

/// Linha de base do índice projetado
pub const BASE_INDICE: f64 = 1.0;

/// Itens nos cards laterais de economias e desvios
const DESTAQUES: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Kpi {
    pub rotulo: String,
    pub valor: Option<f64>,
    /// "R$ 1,23 mi"
    pub compacto: String,
    /// "R$ 1.234.567,89"
    pub completo: String,
}

impl Kpi {
    fn new(rotulo: &str, valor: Option<f64>) -> Self {
        Kpi {
            rotulo: rotulo.to_string(),
            valor,
            compacto: brl_compacto(valor),
            completo: fmt_brl(valor),
        }
    }
}

/// Card "Obra vs. Planejado"
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Progresso {
    pub inicio: String,
    pub referencia: String,
    /// 0-100, limitado
    pub real_pct: f64,
    pub planejado_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Painel {
    pub obra: String,
    pub arquivo: String,
    pub top: TopN,
    /// Duas linhas: 4 + 3 cards
    pub kpis: Vec<Vec<Kpi>>,
    pub indice: Vec<LinhaIndice>,
    pub base_indice: f64,
    pub financeiro: Vec<LinhaFinanceiro>,
    pub prazo: Option<AnalisePrazo>,
    pub progresso: Progresso,
    pub principais_economias: Vec<ItemDestaque>,
    pub desvios_do_mes: Vec<ItemDestaque>,
    pub resumo_variacoes: ResumoVariacoes,
    pub acrescimos: Vec<ItemVariacao>,
    pub economias: Vec<ItemVariacao>,
}

fn kpis(blocos: &BlocosObra) -> Vec<Vec<Kpi>> {
    let v = |chave: &str| blocos.resumo.get(chave).copied().flatten();
    vec![
        vec![
            Kpi::new("Orç. Inicial", v(resumo::ORCAMENTO_INICIAL)),
            Kpi::new("Orç. Reajust.", v(resumo::ORCAMENTO_REAJUSTADO)),
            Kpi::new("Desembolso Acum.", v(resumo::DESEMBOLSO_ACUMULADO)),
            Kpi::new("A Pagar", v(resumo::A_PAGAR)),
        ],
        vec![
            Kpi::new("Saldo a Incorrer", v(resumo::SALDO_A_INCORRER)),
            Kpi::new("Custo Final", v(resumo::CUSTO_FINAL)),
            Kpi::new("Variação", v(resumo::VARIACAO)),
        ],
    ]
}

fn progresso(prazo: Option<&AnalisePrazo>) -> Progresso {
    let sem = formato::SEM_VALOR.to_string();
    match prazo {
        Some(p) => {
            let r = p.referencia.as_ref();
            Progresso {
                inicio: p.inicio.clone(),
                referencia: r.map(|r| r.rotulo.clone()).unwrap_or(sem),
                real_pct: clamp01(r.map(|r| r.realizado_acum)) * 100.0,
                planejado_pct: clamp01(r.map(|r| r.planejado_acum)) * 100.0,
            }
        }
        None => Progresso { inicio: sem.clone(), referencia: sem, real_pct: 0.0, planejado_pct: 0.0 },
    }
}

/// Monta o painel completo da obra a partir dos blocos lidos.
pub fn montar_painel(obra: &str, arquivo: &str, blocos: &BlocosObra, top: TopN) -> Painel {
    let prazo = calcular_prazo(&blocos.prazo);
    let limite = top.limite();

    Painel {
        obra: obra.to_string(),
        arquivo: arquivo.to_string(),
        top,
        kpis: kpis(blocos),
        indice: blocos.indice.clone(),
        base_indice: BASE_INDICE,
        financeiro: blocos.financeiro.clone(),
        progresso: progresso(prazo.as_ref()),
        prazo,
        principais_economias: variacoes::principais_economias(&blocos.economias, DESTAQUES),
        desvios_do_mes: variacoes::principais_desvios(&blocos.acrescimos, DESTAQUES),
        resumo_variacoes: resumo_variacoes(&blocos.acrescimos, &blocos.economias),
        acrescimos: variacoes::ranking_acrescimos(&blocos.acrescimos, limite),
        economias: variacoes::ranking_economias(&blocos.economias, limite),
    }
}
