//! Conversão de células: texto normalizado, números no formato BR e meses.
//!
//! Todas as funções aqui são tolerantes: o que não puder ser convertido vira
//! `None` (ou string vazia), nunca erro.

use calamine::{Data, ExcelDateTime, ExcelDateTimeType};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::OnceLock;

/// Limite da heurística razão x percentual: até 1,5 o valor já é razão.
pub const LIMITE_RAZAO: f64 = 1.5;

/// Faixa de seriais do Excel aceitos como mês (1950-01-01 .. 2100-01-01)
const SERIAL_MIN: f64 = 18_264.0;
const SERIAL_MAX: f64 = 73_051.0;

/// Converte um `Data` de calamine a String para exibição
pub fn cell_to_string(c: &Data) -> String {
    match c {
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => {
            if (f.floor() - f).abs() < f64::EPSILON {
                format!("{}", *f as i64)
            } else {
                format!("{}", f)
            }
        }
        Data::Int(i) => format!("{}", i),
        Data::Bool(b) => format!("{}", b),
        Data::Empty => String::new(),
        Data::Error(_) => String::new(),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(d) => d.date().format("%Y-%m-%d").to_string(),
            None => dt.to_string(),
        },
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
    }
}

/// Tira acentos comuns do português (entrada já em maiúsculas ou não)
fn dobrar_acento(ch: char) -> char {
    match ch {
        'Á' | 'À' | 'Ä' | 'Â' | 'Ã' => 'A',
        'á' | 'à' | 'ä' | 'â' | 'ã' => 'a',
        'É' | 'È' | 'Ë' | 'Ê' => 'E',
        'é' | 'è' | 'ë' | 'ê' => 'e',
        'Í' | 'Ì' | 'Ï' | 'Î' => 'I',
        'í' | 'ì' | 'ï' | 'î' => 'i',
        'Ó' | 'Ò' | 'Ö' | 'Ô' | 'Õ' => 'O',
        'ó' | 'ò' | 'ö' | 'ô' | 'õ' => 'o',
        'Ú' | 'Ù' | 'Ü' | 'Û' => 'U',
        'ú' | 'ù' | 'ü' | 'û' => 'u',
        'Ç' => 'C',
        'ç' => 'c',
        'Ñ' => 'N',
        'ñ' => 'n',
        other => other,
    }
}

/// Normaliza texto para comparação: maiúsculas, sem acentos, espaços
/// internos colapsados e sem espaços nas pontas.
pub fn norm_str(s: &str) -> String {
    s.split_whitespace()
        .map(|parte| {
            parte
                .chars()
                .flat_map(|c| c.to_uppercase())
                .map(dobrar_acento)
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// `norm_str` aplicado ao texto da célula
pub fn norm(c: &Data) -> String {
    norm_str(&cell_to_string(c))
}

/// Célula vazia para efeitos de leitura de bloco
pub fn is_blank(c: &Data) -> bool {
    match c {
        Data::Empty | Data::Error(_) => true,
        Data::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Número no formato brasileiro ("R$ 1.234,56", "4,96%", "(1.000,00)").
/// Sem vírgula, um único ponto seguido de 1, 2 ou 4+ dígitos é decimal
/// ("1234.5"); com três dígitos é milhar ("1.234").
pub fn parse_numero_br(texto: &str) -> Option<f64> {
    let mut s: String = texto
        .replace("R$", "")
        .replace('%', "")
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '\u{a0}')
        .collect();
    if s.is_empty() {
        return None;
    }

    let mut negativo = false;
    if s.starts_with('(') && s.ends_with(')') && s.len() > 2 {
        negativo = true;
        s = s[1..s.len() - 1].to_string();
    }

    let normalizado = if s.contains(',') {
        s.replace('.', "").replace(',', ".")
    } else {
        let pontos = s.matches('.').count();
        let decimais = s.rsplit('.').next().map(|d| d.len()).unwrap_or(0);
        if pontos == 1 && decimais != 3 {
            s.clone()
        } else {
            s.replace('.', "")
        }
    };

    // Só dígitos, sinal e ponto: evita que "inf"/"NaN" passem pelo parse
    if !normalizado
        .chars()
        .all(|c| c.is_ascii_digit() || c == '.' || c == '-' || c == '+')
    {
        return None;
    }

    let v = normalizado.parse::<f64>().ok()?;
    Some(if negativo { -v } else { v })
}

/// Converte a célula para float (ou None)
pub fn to_float(c: &Data) -> Option<f64> {
    match c {
        Data::Float(f) if f.is_finite() => Some(*f),
        Data::Float(_) => None,
        Data::Int(i) => Some(*i as f64),
        Data::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Data::String(s) => parse_numero_br(s),
        _ => None,
    }
}

/// Aceita 0-1 (ex 0.0496) ou 0-100 (ex 4.96).
///
/// Ambíguo por construção: uma razão legítima acima de 1,5 é lida como
/// percentual e dividida por 100.
pub fn to_ratio(v: Option<f64>) -> Option<f64> {
    let v = v?;
    if !v.is_finite() {
        return None;
    }
    Some(if v <= LIMITE_RAZAO { v } else { v / 100.0 })
}

fn primeiro_do_mes(d: NaiveDate) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(d.year(), d.month(), 1)
}

fn mes_por_abreviacao(nome: &str) -> Option<u32> {
    let tres: String = norm_str(nome).chars().take(3).collect();
    let m = match tres.as_str() {
        "JAN" => 1,
        "FEV" | "FEB" => 2,
        "MAR" => 3,
        "ABR" | "APR" => 4,
        "MAI" | "MAY" => 5,
        "JUN" => 6,
        "JUL" => 7,
        "AGO" | "AUG" => 8,
        "SET" | "SEP" => 9,
        "OUT" | "OCT" => 10,
        "NOV" => 11,
        "DEZ" | "DEC" => 12,
        _ => return None,
    };
    Some(m)
}

fn re_mes_abreviado() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^([A-Za-zÀ-ÿ]{3,})\.?\s*[/\-. ]?\s*(\d{4}|\d{2})$")
            .expect("regex de mês abreviado inválida")
    })
}

/// Texto de mês: datas completas ("01/01/2026", "2026-01-15"), "01/2026" e
/// abreviações "jan/2026", "JAN.26", "Jan-26", "março 2026".
pub fn parse_mes(texto: &str) -> Option<NaiveDate> {
    let s = texto.trim();
    if s.is_empty() {
        return None;
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return primeiro_do_mes(dt.date());
        }
    }
    for fmt in ["%d/%m/%Y", "%Y-%m-%d", "%d-%m-%Y", "%d.%m.%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            // "01/01/26": %Y aceita o ano com dois dígitos
            let ano = if d.year() < 100 { d.year() + 2000 } else { d.year() };
            return NaiveDate::from_ymd_opt(ano, d.month(), 1);
        }
    }
    // "01/2026"
    if let Some((m, a)) = s.split_once('/') {
        if let (Ok(mes), Ok(ano)) = (m.trim().parse::<u32>(), a.trim().parse::<i32>()) {
            if a.trim().len() == 4 {
                return NaiveDate::from_ymd_opt(ano, mes, 1);
            }
        }
    }

    let caps = re_mes_abreviado().captures(s)?;
    let mes = mes_por_abreviacao(caps.get(1)?.as_str())?;
    let ano: i32 = caps.get(2)?.as_str().parse().ok()?;
    let ano = if ano < 100 { 2000 + ano } else { ano };
    NaiveDate::from_ymd_opt(ano, mes, 1)
}

/// Converte a célula para o primeiro dia do mês que ela representa
pub fn to_month(c: &Data) -> Option<NaiveDate> {
    match c {
        Data::DateTime(dt) => primeiro_do_mes(dt.as_datetime()?.date()),
        Data::DateTimeIso(s) => parse_mes(s),
        Data::String(s) => parse_mes(s),
        // Serial do Excel numa célula sem formato de data
        Data::Float(f) if (SERIAL_MIN..=SERIAL_MAX).contains(f) => {
            let dt = ExcelDateTime::new(*f, ExcelDateTimeType::DateTime, false);
            primeiro_do_mes(dt.as_datetime()?.date())
        }
        Data::Int(i) if (SERIAL_MIN..=SERIAL_MAX).contains(&(*i as f64)) => {
            let dt = ExcelDateTime::new(*i as f64, ExcelDateTimeType::DateTime, false);
            primeiro_do_mes(dt.as_datetime()?.date())
        }
        _ => None,
    }
}

/// Data completa (sem truncar no mês): célula de data, ISO ou "dd/mm/aaaa"
pub fn to_date(c: &Data) -> Option<NaiveDate> {
    match c {
        Data::DateTime(dt) => Some(dt.as_datetime()?.date()),
        Data::DateTimeIso(s) | Data::String(s) => {
            let s = s.trim();
            for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
                if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
                    return Some(dt.date());
                }
            }
            ["%d/%m/%Y", "%Y-%m-%d"]
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
                .filter(|d| d.year() >= 1900)
        }
        _ => None,
    }
}
