//! Módulo `excel` dividido em submódulos para manter o código organizado.
//!
//! Submódulos:
//! - `io`: conversão de células (texto normalizado, número BR, mês)
//! - `grade`: grade absoluta da aba e localizador de blocos por cabeçalho
//! - `resumo`: bloco RESUMO FINANCEIRO
//! - `series`: séries mensais (índice, financeiro, prazo)
//! - `variacoes`: blocos lado a lado ACRÉSCIMOS / ECONOMIAS
//! - `indicadores`: aba "one page" chave/valor
//! - `cache`: pastas abertas, recarregadas quando o arquivo muda

pub mod io;
pub mod grade;
pub mod resumo;
pub mod series;
pub mod variacoes;
pub mod indicadores;
pub mod cache;

pub use grade::{Coluna, Conversao, Grade, Limites, achar_cabecalho, achar_linha_contendo, indice_coluna, ler_tabela};
pub use indicadores::ler_indicadores;
pub use io::{norm, norm_str, is_blank, to_float, to_month, to_ratio, parse_numero_br, parse_mes};
pub use resumo::ler_resumo_financeiro;
pub use series::{ler_financeiro, ler_indice, ler_prazo, LINHAS_VAZIAS_PADRAO};
pub use variacoes::ler_acrescimos_economias;
pub use cache::abrir_pasta_cached;

use calamine::{Reader, open_workbook_auto};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{PainelError, Result};
use crate::models::BlocosObra;

/// Nomes procurados, em ordem, quando não há caminho explícito
pub const CANDIDATOS_PADRAO: [&str; 4] = ["Excel.xlsm", "Excel.xlsx", "excel.xlsm", "excel.xlsx"];

/// Abas que não são obras
const ABAS_IGNORADAS: [&str; 3] = ["LEIA-ME", "README", "READ ME"];

/// Primeiro candidato existente dentro de `dir`
pub fn localizar_planilha<S: AsRef<str>>(dir: &Path, candidatos: &[S]) -> Option<PathBuf> {
    candidatos
        .iter()
        .map(|nome| dir.join(nome.as_ref()))
        .find(|p| p.is_file())
}

/// Como `localizar_planilha`, mas com erro descritivo quando nada existe
pub fn resolver_planilha<S: AsRef<str>>(dir: &Path, candidatos: &[S]) -> Result<PathBuf> {
    localizar_planilha(dir, candidatos).ok_or_else(|| PainelError::PlanilhaNaoEncontrada {
        dir: dir.display().to_string(),
        candidatos: candidatos.iter().map(|c| c.as_ref()).collect::<Vec<_>>().join(", "),
    })
}

/// Pasta de trabalho carregada em memória: todas as abas, na ordem do
/// arquivo, já com os valores calculados das fórmulas.
#[derive(Debug, Clone)]
pub struct Pasta {
    caminho: PathBuf,
    abas: Vec<(String, Grade)>,
}

impl Pasta {
    /// Monta a pasta a partir de abas já carregadas (usado em testes e no cache)
    pub fn from_abas(caminho: PathBuf, abas: Vec<(String, Grade)>) -> Self {
        Pasta { caminho, abas }
    }

    /// Nome do arquivo para exibição ("Excel.xlsm")
    pub fn rotulo(&self) -> String {
        self.caminho
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Todas as abas, inclusive as ignoradas
    pub fn abas(&self) -> Vec<&str> {
        self.abas.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Abas de obra (sem LEIA-ME / README)
    pub fn obras(&self) -> Vec<&str> {
        self.abas
            .iter()
            .map(|(n, _)| n.as_str())
            .filter(|n| !ABAS_IGNORADAS.contains(&norm_str(n).as_str()))
            .collect()
    }

    /// Grade da obra; aceita o nome exato ou o normalizado
    pub fn grade(&self, obra: &str) -> Result<&Grade> {
        if let Some((_, g)) = self.abas.iter().find(|(n, _)| n == obra) {
            return Ok(g);
        }
        let alvo = norm_str(obra);
        self.abas
            .iter()
            .find(|(n, _)| norm_str(n) == alvo)
            .map(|(_, g)| g)
            .ok_or_else(|| PainelError::ObraNaoEncontrada(obra.to_string()))
    }
}

/// Abre a planilha só para leitura (xlsx/xlsm/xls/xlsb) e carrega todas as abas.
pub fn abrir_pasta<P: AsRef<Path>>(path: P) -> Result<Pasta> {
    let path = path.as_ref();
    let mut workbook = open_workbook_auto(path)?;
    let nomes = workbook.sheet_names().to_owned();

    let mut abas = Vec::with_capacity(nomes.len());
    for nome in nomes {
        match workbook.worksheet_range(&nome) {
            Ok(range) => abas.push((nome, Grade::new(range))),
            Err(e) => {
                warn!(aba = %nome, erro = %e, "aba ilegível, tratada como vazia");
                abas.push((nome, Grade::default()));
            }
        }
    }
    info!(arquivo = %path.display(), abas = abas.len(), "planilha carregada");
    Ok(Pasta::from_abas(path.to_path_buf(), abas))
}

/// Lê todos os blocos da aba de uma obra, uma vez cada.
pub fn ler_obra(grade: &Grade, linhas_vazias_fim: usize) -> BlocosObra {
    let (acrescimos, economias) = ler_acrescimos_economias(grade);
    let blocos = BlocosObra {
        resumo: ler_resumo_financeiro(grade),
        indice: series::ler_indice_com(grade, linhas_vazias_fim),
        financeiro: series::ler_financeiro_com(grade, linhas_vazias_fim),
        prazo: series::ler_prazo_com(grade, linhas_vazias_fim),
        acrescimos,
        economias,
    };
    debug!(
        resumo = blocos.resumo.len(),
        indice = blocos.indice.len(),
        financeiro = blocos.financeiro.len(),
        prazo = blocos.prazo.len(),
        acrescimos = blocos.acrescimos.len(),
        economias = blocos.economias.len(),
        "blocos lidos"
    );
    blocos
}
