// Planilhas de exemplo usadas pelos testes de integração: a mesma disposição
// serve para a grade em memória e para o .xlsx gravado em disco.
#![allow(dead_code)]

use calamine::{Data, ExcelDateTime, ExcelDateTimeType, Range};
use chrono::NaiveDate;
use painel_obras::excel::Grade;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub enum Celula {
    Texto(&'static str),
    Numero(f64),
    /// Célula com formato de data (ano, mês, dia)
    Dia(i32, u32, u32),
}

use Celula::*;

/// (linha, coluna, valor), 1-based como no Excel
pub type Layout = Vec<(u32, u16, Celula)>;

pub fn serial(ano: i32, mes: u32, dia: u32) -> f64 {
    let base = NaiveDate::from_ymd_opt(1899, 12, 30).unwrap();
    let d = NaiveDate::from_ymd_opt(ano, mes, dia).unwrap();
    (d - base).num_days() as f64
}

pub fn mes(ano: i32, m: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(ano, m, 1).unwrap()
}

fn para_data(c: &Celula) -> Data {
    match c {
        Texto(s) => Data::String(s.to_string()),
        Numero(n) => Data::Float(*n),
        Dia(a, m, d) => Data::DateTime(ExcelDateTime::new(serial(*a, *m, *d), ExcelDateTimeType::DateTime, false)),
    }
}

/// Grade em memória a partir de A1
pub fn grade(layout: &[(u32, u16, Celula)]) -> Grade {
    if layout.is_empty() {
        return Grade::default();
    }
    let max_l = layout.iter().map(|(l, _, _)| *l).max().unwrap();
    let max_c = layout.iter().map(|(_, c, _)| *c as u32).max().unwrap();
    let mut range: Range<Data> = Range::new((0, 0), (max_l - 1, max_c - 1));
    for (l, c, v) in layout {
        range.set_value((l - 1, *c as u32 - 1), para_data(v));
    }
    Grade::new(range)
}

/// Aba completa de uma obra com todos os blocos
pub fn layout_obra() -> Layout {
    let mut l: Layout = vec![
        (1, 1, Texto("PAINEL DE OBRA - OBRA A")),
        (3, 1, Texto("RESUMO FINANCEIRO (INSIRA OS VALORES)")),
        (4, 1, Texto("Orçamento Inicial (R$)")),
        (4, 2, Numero(1_000_000.0)),
        (5, 1, Texto("ORÇAMENTO REAJUSTADO (R$)")),
        (5, 2, Texto("1.100.000,00")),
        (6, 1, Texto("DESEMBOLSO ACUMULADO (R$)")),
        (6, 2, Numero(500_000.0)),
        (7, 1, Texto("A PAGAR (R$)")),
        (7, 2, Numero(20_000.0)),
        (8, 1, Texto("SALDO A INCORRER (R$)")),
        (8, 2, Numero(580_000.0)),
        (9, 1, Texto("CUSTO FINAL (R$)")),
        (9, 2, Numero(1_095_000.0)),
        (10, 1, Texto("VARIAÇÃO (R$)")),
        (10, 2, Texto("(5.000,00)")),
        // índice projetado
        (13, 1, Texto("MÊS")),
        (13, 2, Texto("ÍNDICE PROJETADO")),
        (14, 1, Texto("jan/2026")),
        (14, 2, Numero(1.0)),
        (15, 1, Texto("FEV.26")),
        (15, 2, Texto("1,02")),
        (16, 1, Dia(2026, 3, 15)),
        (16, 2, Numero(0.98)),
        // financeiro
        (20, 1, Texto("Mês")),
        (20, 2, Texto("Desembolso do Mês (R$)")),
        (20, 3, Texto("MEDIDO NO MÊS (R$)")),
        (21, 1, Dia(2026, 1, 1)),
        (21, 2, Numero(100_000.0)),
        (21, 3, Numero(90_000.0)),
        (22, 1, Dia(2026, 2, 1)),
        (22, 2, Texto("R$ 150.000,50")),
        (22, 3, Numero(140_000.0)),
        // prazo
        (27, 1, Texto("MÊS")),
        (27, 2, Texto("PLANEJADO MÊS (%)")),
        (27, 3, Texto("REALIZADO MÊS (%)")),
        (28, 1, Texto("01/2026")),
        (28, 2, Numero(10.0)),
        (28, 3, Numero(8.0)),
        (29, 1, Texto("02/2026")),
        (29, 2, Numero(20.0)),
        (29, 3, Texto("22%")),
        (30, 1, Texto("03/2026")),
        (30, 2, Numero(30.0)),
        (31, 1, Texto("04/2026")),
        (31, 2, Numero(40.0)),
        // acréscimos / economias lado a lado
        (35, 1, Texto("ACRÉSCIMOS")),
        (35, 7, Texto("ECONOMIAS")),
    ];
    for (i, h) in ["DESCRIÇÃO", "ORÇ. INICIAL", "ORÇ. REAJUSTADO", "CUSTO FINAL", "VARIAÇÃO"].iter().enumerate() {
        l.push((36, 1 + i as u16, Texto(*h)));
        l.push((36, 7 + i as u16, Texto(*h)));
    }
    let acrescimos = [("Fundação", 30.0), ("Elétrica", 12.0), ("Pintura", 50.0)];
    for (i, (d, v)) in acrescimos.iter().enumerate() {
        let r = 37 + i as u32;
        l.push((r, 1, Texto(*d)));
        l.push((r, 2, Numero(100.0)));
        l.push((r, 3, Numero(100.0)));
        l.push((r, 4, Numero(100.0 + v)));
        l.push((r, 5, Numero(*v)));
    }
    let economias = [("Esquadrias", -40.0), ("Louças", -10.0)];
    for (i, (d, v)) in economias.iter().enumerate() {
        let r = 37 + i as u32;
        l.push((r, 7, Texto(*d)));
        l.push((r, 8, Numero(200.0)));
        l.push((r, 9, Numero(200.0)));
        l.push((r, 10, Numero(200.0 + v)));
        l.push((r, 11, Numero(*v)));
    }
    l
}

/// Aba "one page" chave/valor
pub fn layout_one_page() -> Layout {
    vec![
        (1, 1, Texto("AC(m²)")),
        (1, 2, Numero(12500.0)),
        (2, 1, Texto("AP(m²)")),
        (2, 2, Texto("8.300,5")),
        (3, 1, Texto("Ef")),
        (3, 2, Numero(0.66)),
        (4, 1, Texto("Total Unidades")),
        (4, 2, Numero(120.0)),
        (5, 1, Texto("Avanço Físico Planejado")),
        (5, 2, Numero(0.5)),
        (6, 1, Texto("Avanço Físico Real")),
        (6, 2, Numero(0.45)),
        (7, 1, Texto("Aderência Física")),
        (7, 2, Numero(0.9)),
        (8, 1, Texto("Data Base")),
        (8, 2, Dia(2026, 5, 31)),
        (9, 1, Texto("Responsável")),
        (9, 2, Texto("Eng. Silva")),
        (11, 1, Texto("Desvio")),
    ]
}

/// Grava um .xlsx com LEIA-ME, duas obras e a aba one page
pub fn escrever_planilha(dir: &Path, nome: &str) -> PathBuf {
    use rust_xlsxwriter::{ExcelDateTime as XlsxData, Format, Workbook};

    let formato_data = Format::new().set_num_format("dd/mm/yyyy");
    let mut wb = Workbook::new();

    let abas: Vec<(&str, Layout)> = vec![
        ("LEIA-ME", vec![(1, 1, Texto("Preencha uma aba por obra."))]),
        ("OBRA A", layout_obra()),
        ("Obra Centro", vec![(1, 1, Texto("sem blocos ainda"))]),
        ("ONE PAGE", layout_one_page()),
    ];
    for (nome_aba, layout) in abas {
        let ws = wb.add_worksheet();
        ws.set_name(nome_aba).unwrap();
        for (l, c, v) in layout {
            let (r, c) = (l - 1, c - 1);
            match v {
                Texto(s) => {
                    ws.write_string(r, c, s).unwrap();
                }
                Numero(n) => {
                    ws.write_number(r, c, n).unwrap();
                }
                Dia(a, m, d) => {
                    let dt = XlsxData::from_ymd(a as u16, m as u8, d as u8).unwrap();
                    ws.write_datetime_with_format(r, c, &dt, &formato_data).unwrap();
                }
            }
        }
    }

    let path = dir.join(nome);
    wb.save(&path).unwrap();
    path
}
