//! Formatação para exibição no padrão brasileiro.

use chrono::{Datelike, NaiveDate};

/// Marcador de valor ausente
pub const SEM_VALOR: &str = "—";

/// "1234567.891" com 2 casas -> "1.234.567,89" (sem sinal)
fn agrupar_milhar(n: f64, casas: usize) -> String {
    let texto = format!("{:.*}", casas, n.abs());
    let (inteiro, decimal) = match texto.split_once('.') {
        Some((i, d)) => (i.to_string(), Some(d.to_string())),
        None => (texto, None),
    };

    let digitos: Vec<char> = inteiro.chars().collect();
    let mut agrupado = String::with_capacity(digitos.len() + digitos.len() / 3);
    for (i, ch) in digitos.iter().enumerate() {
        if i > 0 && (digitos.len() - i) % 3 == 0 {
            agrupado.push('.');
        }
        agrupado.push(*ch);
    }

    match decimal {
        Some(d) => format!("{},{}", agrupado, d),
        None => agrupado,
    }
}

fn com_sinal(n: f64, casas: usize) -> String {
    let corpo = agrupar_milhar(n, casas);
    // "-0,00" não faz sentido
    if n < 0.0 && corpo.chars().any(|c| c.is_ascii_digit() && c != '0') {
        format!("-{}", corpo)
    } else {
        corpo
    }
}

/// "R$ 1.234,56"; ausente ou não finito vira "—"
pub fn fmt_brl(v: Option<f64>) -> String {
    match v {
        Some(n) if n.is_finite() => format!("R$ {}", com_sinal(n, 2)),
        _ => SEM_VALOR.to_string(),
    }
}

/// "R$ 1.235"
pub fn fmt_brl_sem_decimais(v: f64) -> String {
    if !v.is_finite() {
        return SEM_VALOR.to_string();
    }
    format!("R$ {}", com_sinal(v, 0))
}

/// Valor curto para cards: "R$ 1,23 mi", "R$ 4,50 mil", "R$ 2,00 bi"
pub fn brl_compacto(v: Option<f64>) -> String {
    let Some(n) = v.filter(|n| n.is_finite()) else {
        return SEM_VALOR.to_string();
    };
    let a = n.abs();
    let (divisor, sufixo) = if a >= 1_000_000_000.0 {
        (1_000_000_000.0, "bi")
    } else if a >= 1_000_000.0 {
        (1_000_000.0, "mi")
    } else if a >= 1_000.0 {
        (1_000.0, "mil")
    } else {
        return fmt_brl(Some(n));
    };
    format!("R$ {:.2} {}", n / divisor, sufixo).replace('.', ",")
}

/// Razão como percentual: 0.4962 -> "49,6%"
pub fn fmt_percentual(v: Option<f64>) -> String {
    match v {
        Some(n) if n.is_finite() => format!("{:.1}%", n * 100.0).replace('.', ","),
        _ => SEM_VALOR.to_string(),
    }
}

/// Diferença em pontos percentuais: "+2,5 p.p.", "-10,0 p.p."
pub fn fmt_pontos_percentuais(v: Option<f64>) -> String {
    match v {
        Some(n) if n.is_finite() => {
            let sinal = if n >= 0.0 { "+" } else { "" };
            format!("{}{} p.p.", sinal, format!("{:.1}", n).replace('.', ","))
        }
        _ => SEM_VALOR.to_string(),
    }
}

const MESES: [&str; 12] = ["jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez"];

/// "jan/2026", "fev/2026"
pub fn rotulo_mes(mes: NaiveDate) -> String {
    format!("{}/{}", MESES[mes.month0() as usize], mes.year())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn milhar_e_decimais() {
        assert_eq!(agrupar_milhar(1234567.891, 2), "1.234.567,89");
        assert_eq!(agrupar_milhar(999.0, 2), "999,00");
        assert_eq!(agrupar_milhar(1000.0, 0), "1.000");
        assert_eq!(agrupar_milhar(0.0, 2), "0,00");
    }

    #[test]
    fn negativo_zero_sem_sinal() {
        assert_eq!(fmt_brl(Some(-0.001)), "R$ 0,00");
        assert_eq!(fmt_brl(Some(-1500.5)), "R$ -1.500,50");
    }

    #[test]
    fn mes_em_portugues() {
        let d = |m| NaiveDate::from_ymd_opt(2026, m, 1).unwrap();
        assert_eq!(rotulo_mes(d(2)), "fev/2026");
        assert_eq!(rotulo_mes(d(12)), "dez/2026");
    }
}
