//! Cache simples em memória das planilhas abertas.
//!
//! A chave é o caminho; a entrada é descartada quando a data de modificação
//! do arquivo muda, de modo que reler uma planilha inalterada não toca no
//! disco e uma planilha salva de novo é recarregada.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};
use std::time::SystemTime;
use tracing::debug;

use crate::error::Result;
use crate::excel::{Pasta, abrir_pasta};

type Entrada = (Option<SystemTime>, Arc<Pasta>);

static PASTA_CACHE: OnceLock<Mutex<HashMap<PathBuf, Entrada>>> = OnceLock::new();

fn cache() -> MutexGuard<'static, HashMap<PathBuf, Entrada>> {
    let m = PASTA_CACHE.get_or_init(|| Mutex::new(HashMap::new()));
    // um pânico durante a leitura não invalida o mapa
    m.lock().unwrap_or_else(|e| e.into_inner())
}

fn modificado(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}

/// Devolve a pasta do cache se o arquivo não mudou; senão lê do disco e guarda.
pub fn abrir_pasta_cached(path: &Path) -> Result<Arc<Pasta>> {
    let chave = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    let mtime = modificado(&chave);

    {
        let guard = cache();
        if let Some((t, pasta)) = guard.get(&chave) {
            if t.is_some() && *t == mtime {
                debug!(arquivo = %chave.display(), "planilha servida do cache");
                return Ok(Arc::clone(pasta));
            }
        }
    }

    // Leitura fora do lock
    let pasta = Arc::new(abrir_pasta(&chave)?);
    cache().insert(chave, (mtime, Arc::clone(&pasta)));
    Ok(pasta)
}

/// Esvazia o cache (próxima leitura vai ao disco)
pub fn limpar_cache() {
    cache().clear();
}
