//! # Persistencia de Submissions
//! src/store/mod.rs
//!
//! Store de un solo slot: cada submission válida reemplaza por completo a
//! la anterior, y lo único que el resto del sistema puede pedir es la más
//! reciente.
//!
//! Los writes se serializan con un `Mutex` y se hacen sobre un archivo
//! temporal que después se renombra (atómico en Unix). Dos POST
//! concurrentes nunca intercalan bytes y un lector nunca observa un
//! registro a medio escribir.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Store de la última submission recibida
pub struct SubmissionStore {
    /// Ruta al archivo de persistencia
    path: PathBuf,

    /// Serializa a los escritores; el dato compartido es el archivo mismo
    write_lock: Arc<Mutex<()>>,
}

impl SubmissionStore {
    /// Crea un store sobre la ruta indicada
    ///
    /// No toca el disco: el archivo aparece con el primer `save`.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Ruta del archivo de persistencia
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Guarda un registro, reemplazando al anterior
    ///
    /// El registro se escribe completo en `<path>.tmp` y recién entonces
    /// se renombra sobre la ruta final.
    ///
    /// # Errores
    ///
    /// Propaga el error de I/O (directorio inexistente, sin permisos,
    /// disco lleno); el handler de POST lo traduce a `500`.
    pub fn save(&self, record: &str) -> std::io::Result<()> {
        let _guard = self.write_lock.lock().unwrap();

        // Escribir primero a un archivo temporal (atomic write)
        let temp_path = self.temp_path();
        let file = File::create(&temp_path)?;
        let mut writer = BufWriter::new(file);

        writer.write_all(record.as_bytes())?;
        writer.flush()?;

        // Renombrar (atómico en sistemas Unix)
        fs::rename(&temp_path, &self.path)?;

        Ok(())
    }

    /// Lee la submission más reciente
    ///
    /// Retorna `Ok(None)` si todavía no se guardó ninguna.
    pub fn last(&self) -> std::io::Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Ruta del archivo temporal usado por `save`
    ///
    /// Un solo nombre alcanza: el lock garantiza un escritor a la vez.
    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl Clone for SubmissionStore {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            write_lock: Arc::clone(&self.write_lock),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    // ==================== Basic Operations ====================

    #[test]
    fn test_store_save_and_last() {
        let temp_file = "/tmp/form_server_test_store.txt";
        let _ = fs::remove_file(temp_file); // Limpiar

        let store = SubmissionStore::new(temp_file);
        store.save("Title: T\nContent: C").unwrap();

        let last = store.last().unwrap();
        assert_eq!(last.as_deref(), Some("Title: T\nContent: C"));

        // Cleanup
        let _ = fs::remove_file(temp_file);
    }

    #[test]
    fn test_store_last_before_any_save() {
        let store = SubmissionStore::new("/tmp/form_server_test_store_nunca_escrito.txt");
        assert_eq!(store.last().unwrap(), None);
    }

    #[test]
    fn test_store_single_slot_overwrites() {
        let temp_file = "/tmp/form_server_test_store_overwrite.txt";
        let _ = fs::remove_file(temp_file);

        let store = SubmissionStore::new(temp_file);
        store.save("Title: primera\nContent: 1").unwrap();
        store.save("Title: segunda\nContent: 2").unwrap();

        // Solo sobrevive la más reciente
        let last = store.last().unwrap().unwrap();
        assert_eq!(last, "Title: segunda\nContent: 2");

        let _ = fs::remove_file(temp_file);
    }

    #[test]
    fn test_store_save_fails_without_parent_dir() {
        let store = SubmissionStore::new("/tmp/no_existe_este_dir_store/datos.txt");
        assert!(store.save("Title: x\nContent: y").is_err());
    }

    #[test]
    fn test_store_leaves_no_temp_file() {
        let temp_file = "/tmp/form_server_test_store_tmp.txt";
        let _ = fs::remove_file(temp_file);

        let store = SubmissionStore::new(temp_file);
        store.save("Title: a\nContent: b").unwrap();

        assert!(!Path::new("/tmp/form_server_test_store_tmp.txt.tmp").exists());

        let _ = fs::remove_file(temp_file);
    }

    // ==================== Concurrency ====================

    #[test]
    fn test_store_concurrent_saves_never_interleave() {
        let temp_file = "/tmp/form_server_test_store_concurrente.txt";
        let _ = fs::remove_file(temp_file);

        let store = SubmissionStore::new(temp_file);
        let record_a = format!("Title: {}\nContent: {}", "A".repeat(4096), "A".repeat(4096));
        let record_b = format!("Title: {}\nContent: {}", "B".repeat(4096), "B".repeat(4096));

        let mut handles = Vec::new();
        for record in [record_a.clone(), record_b.clone()] {
            for _ in 0..10 {
                let store = store.clone();
                let record = record.clone();
                handles.push(thread::spawn(move || {
                    store.save(&record).unwrap();
                }));
            }
        }
        for handle in handles {
            handle.join().unwrap();
        }

        // El resultado es siempre un registro completo, nunca una mezcla
        let last = store.last().unwrap().unwrap();
        assert!(last == record_a || last == record_b);

        let _ = fs::remove_file(temp_file);
    }
}
