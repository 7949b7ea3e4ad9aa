//! # Logging Inyectable
//! src/logging/mod.rs
//!
//! Capacidad de logging que se pasa explícitamente a los componentes que
//! la necesitan, en lugar de un logger global. Así el servidor y los
//! handlers se prueban con [`NullLogger`] sin tocar el disco.
//!
//! El sink de producción es [`FileLogger`]: un archivo en modo append con
//! un evento JSON por línea:
//!
//! ```text
//! {"timestamp_ms":1717000000000,"level":"INFO","message":"GET /index.html -> 200 OK"}
//! ```

use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

/// Niveles de log que emite el servidor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Progreso normal (conexiones, requests atendidos)
    Info,

    /// Fallas (accept, lectura, persistencia)
    Error,
}

impl LogLevel {
    /// Etiqueta del nivel tal como aparece en los eventos
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Error => "ERROR",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Capacidad de emitir mensajes con nivel
///
/// Los componentes reciben `Arc<dyn Logger>`; quién escribe y a dónde es
/// decisión del que arma el servidor.
pub trait Logger: Send + Sync {
    /// Emite un mensaje con el nivel indicado
    fn log(&self, level: LogLevel, message: &str);

    /// Emite un mensaje de progreso
    fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    /// Emite un mensaje de error
    fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }
}

/// Evento estructurado tal como se serializa al archivo
#[derive(Serialize)]
struct LogEvent<'a> {
    /// Milisegundos desde epoch
    timestamp_ms: u128,

    /// "INFO" o "ERROR"
    level: &'a str,

    /// Texto libre del evento
    message: &'a str,
}

/// Logger de producción: archivo en modo append, un JSON por línea
///
/// Los writes se serializan con un `Mutex` para que los threads de
/// conexión no intercalen líneas. Una falla al escribir el log cae a
/// stderr y nunca afecta la atención del request.
pub struct FileLogger {
    file: Arc<Mutex<File>>,
}

impl FileLogger {
    /// Abre (o crea) el archivo de log en modo append
    ///
    /// # Errores
    ///
    /// Retorna el error de I/O si el archivo no se puede abrir; el caller
    /// decide si eso es fatal (en `main` lo es).
    pub fn create(path: &str) -> std::io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            file: Arc::new(Mutex::new(file)),
        })
    }
}

impl Logger for FileLogger {
    fn log(&self, level: LogLevel, message: &str) {
        let timestamp_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);

        let event = LogEvent {
            timestamp_ms,
            level: level.as_str(),
            message,
        };

        // to_string de una struct plana no falla; el write sí puede
        let line = match serde_json::to_string(&event) {
            Ok(line) => line,
            Err(e) => {
                eprintln!("[log] serialize error: {}", e);
                return;
            }
        };

        let mut file = self.file.lock().unwrap();
        if let Err(e) = writeln!(file, "{}", line) {
            eprintln!("[log] write error: {}", e);
        }
    }
}

impl Clone for FileLogger {
    fn clone(&self) -> Self {
        Self {
            file: Arc::clone(&self.file),
        }
    }
}

/// Logger que descarta todo; para tests
pub struct NullLogger;

impl Logger for NullLogger {
    fn log(&self, _level: LogLevel, _message: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_level_labels() {
        assert_eq!(LogLevel::Info.as_str(), "INFO");
        assert_eq!(LogLevel::Error.as_str(), "ERROR");
        assert_eq!(LogLevel::Error.to_string(), "ERROR");
    }

    #[test]
    fn test_file_logger_writes_json_lines() {
        let temp_file = "/tmp/form_server_test_log.jsonl";
        let _ = fs::remove_file(temp_file); // Limpiar

        let logger = FileLogger::create(temp_file).unwrap();
        logger.info("arrancando");
        logger.error("algo falló");

        let contents = fs::read_to_string(temp_file).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["level"], "INFO");
        assert_eq!(first["message"], "arrancando");
        assert!(first["timestamp_ms"].as_u64().is_some());

        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["level"], "ERROR");
        assert_eq!(second["message"], "algo falló");

        // Cleanup
        let _ = fs::remove_file(temp_file);
    }

    #[test]
    fn test_file_logger_appends_across_instances() {
        let temp_file = "/tmp/form_server_test_log_append.jsonl";
        let _ = fs::remove_file(temp_file);

        {
            let logger = FileLogger::create(temp_file).unwrap();
            logger.info("primera");
        }
        {
            let logger = FileLogger::create(temp_file).unwrap();
            logger.info("segunda");
        }

        let contents = fs::read_to_string(temp_file).unwrap();
        assert_eq!(contents.lines().count(), 2);

        let _ = fs::remove_file(temp_file);
    }

    #[test]
    fn test_file_logger_create_fails_on_bad_path() {
        let result = FileLogger::create("/tmp/no_existe_este_dir_fs/x.log");
        assert!(result.is_err());
    }

    #[test]
    fn test_null_logger_discards() {
        // No debe tocar el disco ni fallar
        let logger = NullLogger;
        logger.info("nada");
        logger.error("nada");
    }

    #[test]
    fn test_logger_trait_object() {
        let logger: Arc<dyn Logger> = Arc::new(NullLogger);
        logger.info("via trait object");
    }
}
