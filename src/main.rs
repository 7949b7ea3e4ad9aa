//! # Form Server - Entry Point
//! src/main.rs
//!
//! Punto de entrada del servidor: parsea la configuración, prepara los
//! directorios de salida, abre el log y arranca el accept loop.

use form_server::config::Config;
use form_server::logging::{FileLogger, Logger};
use form_server::server::Server;
use std::path::Path;
use std::process;
use std::sync::Arc;

fn main() {
    println!("=================================");
    println!("  Form Server HTTP/1.1");
    println!("  GET estáticos + POST formularios");
    println!("=================================\n");

    // Configuración desde CLI y variables de entorno
    let config = Config::new();

    if let Err(e) = config.validate() {
        eprintln!("💥 Configuración inválida: {}", e);
        process::exit(1);
    }

    config.print_summary();

    // Asegurar los directorios del store y del log antes de arrancar
    if let Err(e) = ensure_parent_dirs(&config) {
        eprintln!("💥 No se pudo preparar el directorio de salida: {}", e);
        process::exit(1);
    }

    // Sin log no se arranca: es el único sink de eventos del servidor
    let logger: Arc<dyn Logger> = match FileLogger::create(&config.log_path) {
        Ok(logger) => Arc::new(logger),
        Err(e) => {
            eprintln!("💥 No se pudo abrir el log {}: {}", config.log_path, e);
            process::exit(1);
        }
    };
    logger.info(&format!("starting on {}", config.address()));

    // Crear el servidor e iniciar el accept loop (bloquea el thread)
    let mut server = Server::new(config, logger);
    if let Err(e) = server.run() {
        eprintln!("💥 Error fatal: {}", e);
        process::exit(1);
    }
}

/// Crea los directorios padre del store y del log si no existen
fn ensure_parent_dirs(config: &Config) -> std::io::Result<()> {
    for path in [&config.store_path, &config.log_path] {
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
    }

    Ok(())
}
