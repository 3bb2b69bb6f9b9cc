use std::path::{Path, PathBuf};

pub const EXTENSOES_LOGO: [&str; 4] = ["png", "jpg", "jpeg", "webp"];

/// Variações do nome da aba usadas como nome de arquivo, sem repetição e na
/// ordem de preferência.
pub fn candidatos(nome: &str) -> Vec<String> {
    let n = nome.trim();
    let variacoes = [
        n.to_string(),
        n.to_uppercase(),
        n.to_lowercase(),
        n.replace(' ', "_"),
        n.replace(' ', "-"),
        n.to_uppercase().replace(' ', "_"),
        n.to_uppercase().replace(' ', "-"),
    ];

    let mut out: Vec<String> = Vec::with_capacity(variacoes.len());
    for v in variacoes {
        if !out.contains(&v) {
            out.push(v);
        }
    }
    out
}

/// Nome usável como nome de arquivo dentro do diretório de logos: sem
/// separadores, sem ".." e sem caracteres de controle.
pub fn nome_seguro(nome: &str) -> bool {
    let n = nome.trim();
    !n.is_empty()
        && !n.contains(['/', '\\'])
        && !n.contains("..")
        && !n.chars().any(char::is_control)
}

/// Logo da obra em `dir` (ex. "assets/logos/OBRA_A.png"), se houver.
/// O arquivo encontrado precisa estar dentro de `dir` (links inclusive).
pub fn achar_logo(obra: &str, dir: &Path) -> Option<PathBuf> {
    if !nome_seguro(obra) {
        return None;
    }
    let base = dir.canonicalize().ok()?;
    candidatos(obra).iter().find_map(|cand| {
        EXTENSOES_LOGO
            .iter()
            .map(|ext| base.join(format!("{}.{}", cand, ext)))
            .filter(|p| p.is_file())
            .find_map(|p| p.canonicalize().ok().filter(|real| real.starts_with(&base)))
    })
}

/// Content-Type pela extensão
pub fn tipo_mime(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()).map(|e| e.to_lowercase()).as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidatos_sem_repeticao() {
        assert_eq!(candidatos("OBRA"), vec!["OBRA".to_string(), "obra".to_string()]);
        let c = candidatos("Obra Centro");
        assert_eq!(c[0], "Obra Centro");
        assert!(c.contains(&"OBRA_CENTRO".to_string()));
        assert!(c.contains(&"Obra-Centro".to_string()));
        assert_eq!(c.len(), 7);
    }

    #[test]
    fn nomes_com_caminho_sao_recusados() {
        assert!(nome_seguro("OBRA A"));
        assert!(nome_seguro("Obra 1.2"));
        for nome in ["../segredo", "..", "a/b", "a\\b", "/etc/passwd", "", "  ", "x\0"] {
            assert!(!nome_seguro(nome), "{:?}", nome);
        }
    }
}
