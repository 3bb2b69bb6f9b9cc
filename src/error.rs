use thiserror::Error;

pub type Result<T> = std::result::Result<T, PainelError>;

/// Erros de acesso à planilha e de configuração. A leitura dos blocos em si
/// nunca falha: bloco ausente vira resultado vazio.
#[derive(Error, Debug)]
pub enum PainelError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Falha ao ler a planilha: {0}")]
    Planilha(#[from] calamine::Error),

    #[error("Configuração inválida: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Falha ao gerar JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Nenhuma planilha encontrada em {dir} (procurado: {candidatos})")]
    PlanilhaNaoEncontrada { dir: String, candidatos: String },

    #[error("Obra '{0}' não encontrada na planilha")]
    ObraNaoEncontrada(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn serializar(v: f64) -> Result<String> {
        let mut mapa = std::collections::HashMap::new();
        mapa.insert(vec![v as i64], v);
        Ok(serde_json::to_string(&mapa)?)
    }

    #[test]
    fn erro_de_json_propaga() {
        // chave não-string não serializa como objeto JSON
        match serializar(1.0) {
            Err(PainelError::Json(e)) => assert!(e.to_string().contains("key must be")),
            outro => panic!("esperava PainelError::Json, veio {:?}", outro),
        }
    }
}
