mod common;

use common::{Celula::*, grade, layout_obra, layout_one_page, mes};
use painel_obras::excel::resumo::{CUSTO_FINAL, ORCAMENTO_INICIAL, ORCAMENTO_REAJUSTADO, VARIACAO};
use painel_obras::excel::series::{ler_indice_com, tabela_prazo};
use painel_obras::excel::{
    Grade, ler_acrescimos_economias, ler_financeiro, ler_indicadores, ler_indice, ler_obra, ler_prazo,
    ler_resumo_financeiro,
};
use painel_obras::models::Valor;

#[test]
fn test_resumo_financeiro() {
    let g = grade(&layout_obra());
    let r = ler_resumo_financeiro(&g);
    assert_eq!(r.len(), 7);
    assert_eq!(r[ORCAMENTO_INICIAL], Some(1_000_000.0));
    assert_eq!(r[ORCAMENTO_REAJUSTADO], Some(1_100_000.0));
    assert_eq!(r[CUSTO_FINAL], Some(1_095_000.0));
    assert_eq!(r[VARIACAO], Some(-5_000.0));
}

#[test]
fn test_resumo_rotulo_desconhecido_e_valor_invalido() {
    let g = grade(&[
        (2, 1, Texto("RESUMO FINANCEIRO")),
        (3, 1, Texto("Contingência")),
        (3, 2, Texto("a definir")),
        (4, 1, Texto("CUSTO FINAL")),
        (4, 2, Numero(10.0)),
        (6, 1, Texto("A PAGAR (R$)")),
        (6, 2, Numero(1.0)),
    ]);
    let r = ler_resumo_financeiro(&g);
    assert_eq!(r.len(), 2);
    assert_eq!(r["Contingência"], None);
    assert_eq!(r[CUSTO_FINAL], Some(10.0));
}

#[test]
fn test_indice_projetado() {
    let g = grade(&layout_obra());
    let indice = ler_indice(&g);
    let meses: Vec<_> = indice.iter().map(|l| l.mes).collect();
    assert_eq!(meses, vec![mes(2026, 1), mes(2026, 2), mes(2026, 3)]);
    assert_eq!(indice[1].indice_projetado, Some(1.02));
}

#[test]
fn test_indice_para_no_bloco_seguinte_com_limite_maior() {
    let g = grade(&layout_obra());
    assert_eq!(ler_indice_com(&g, 2).len(), 3);
    // mesmo tolerando 4 linhas vazias o cabeçalho do financeiro encerra o índice
    assert_eq!(ler_indice_com(&g, 4).len(), 3);
}

fn indice_empilhado(vazias: u32) -> Grade {
    let f = 4 + vazias;
    grade(&[
        (1, 1, Texto("MÊS")),
        (1, 2, Texto("ÍNDICE PROJETADO")),
        (2, 1, Texto("jan/2026")),
        (2, 2, Numero(1.0)),
        (3, 1, Texto("fev/2026")),
        (3, 2, Numero(1.01)),
        (f, 1, Texto("MÊS")),
        (f, 2, Texto("DESEMBOLSO DO MÊS (R$)")),
        (f, 3, Texto("MEDIDO NO MÊS (R$)")),
        (f + 1, 1, Texto("jan/2026")),
        (f + 1, 2, Numero(100_000.0)),
        (f + 1, 3, Numero(90_000.0)),
    ])
}

#[test]
fn test_blocos_empilhados_nao_se_misturam() {
    for vazias in [0, 1, 2] {
        let g = indice_empilhado(vazias);
        let indice = ler_indice(&g);
        assert_eq!(indice.len(), 2, "{} linha(s) vazia(s) entre os blocos", vazias);
        assert_eq!(indice[1].indice_projetado, Some(1.01));

        let f = ler_financeiro(&g);
        assert_eq!(f.len(), 1);
        assert_eq!(f[0].desembolso, Some(100_000.0));
    }
}

#[test]
fn test_texto_depois_de_linha_vazia_encerra_serie() {
    let g = grade(&[
        (1, 1, Texto("MÊS")),
        (1, 2, Texto("ÍNDICE PROJETADO")),
        (2, 1, Texto("jan/2026")),
        (2, 2, Numero(1.0)),
        (4, 1, Texto("Observações")),
        (5, 1, Texto("fev/2026")),
        (5, 2, Numero(7.0)),
    ]);
    assert_eq!(ler_indice(&g).len(), 1);
}

#[test]
fn test_financeiro() {
    let g = grade(&layout_obra());
    let f = ler_financeiro(&g);
    assert_eq!(f.len(), 2);
    assert_eq!(f[0].mes, mes(2026, 1));
    assert_eq!(f[0].desembolso, Some(100_000.0));
    assert_eq!(f[1].desembolso, Some(150_000.5));
    assert_eq!(f[1].medido, Some(140_000.0));
}

#[test]
fn test_prazo() {
    let g = grade(&layout_obra());
    let p = ler_prazo(&g);
    assert_eq!(p.len(), 4);
    assert_eq!(p[1].realizado, Some(22.0));
    assert_eq!(p[2].realizado, None);
    assert_eq!(p[3].planejado, Some(40.0));

    let t = tabela_prazo(&g, 2);
    assert_eq!(t.colunas, vec!["MES", "PLANEJADO MES (%)", "REALIZADO MES (%)"]);
    assert_eq!(t.coluna("Realizado Mês (%)")[2], &Valor::Vazio);
}

#[test]
fn test_acrescimos_economias_lado_a_lado() {
    let g = grade(&layout_obra());
    let (acr, eco) = ler_acrescimos_economias(&g);
    assert_eq!(acr.len(), 3);
    assert_eq!(eco.len(), 2);
    assert_eq!(acr[0].descricao, "Fundação");
    assert_eq!(acr[2].variacao, Some(50.0));
    assert_eq!(acr[2].custo_final, Some(150.0));
    assert_eq!(eco[0].descricao, "Esquadrias");
    assert_eq!(eco[0].variacao, Some(-40.0));
}

#[test]
fn test_variacoes_sem_titulo_usa_cabecalho() {
    let g = grade(&[
        (4, 1, Texto("Descrição")),
        (4, 7, Texto("DESCRIÇÃO")),
        (5, 1, Texto("Item A")),
        (5, 5, Numero(3.0)),
        (5, 7, Texto("Item B")),
        (5, 11, Texto("-1.000,00")),
    ]);
    let (acr, eco) = ler_acrescimos_economias(&g);
    assert_eq!(acr.len(), 1);
    assert_eq!(eco[0].variacao, Some(-1000.0));
}

#[test]
fn test_aba_sem_blocos_nao_falha() {
    for g in [Grade::default(), grade(&[(1, 1, Texto("qualquer coisa"))])] {
        let b = ler_obra(&g, 2);
        assert!(b.resumo.is_empty());
        assert!(b.indice.is_empty());
        assert!(b.financeiro.is_empty());
        assert!(b.prazo.is_empty());
        assert!(b.acrescimos.is_empty());
        assert!(b.economias.is_empty());
    }
}

#[test]
fn test_indicadores_one_page() {
    let g = grade(&layout_one_page());
    let ind = ler_indicadores(&g);
    assert_eq!(ind["AC(m²)"], Valor::Numero(12500.0));
    assert_eq!(ind["AP(m²)"], Valor::Numero(8300.5));
    assert_eq!(ind["Data Base"], Valor::Data(chrono::NaiveDate::from_ymd_opt(2026, 5, 31).unwrap()));
    assert_eq!(ind["Responsável"], Valor::Texto("Eng. Silva".into()));
    assert_eq!(ind["Desvio"], Valor::Vazio);
    assert_eq!(ind.len(), 10);
}
