//! # Configuración del Servidor
//! src/config.rs
//!
//! Este módulo define la configuración del servidor con soporte para
//! argumentos CLI y variables de entorno.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./form_server --port 8080 \
//!   --web-root ./public \
//!   --store-path output/post_data.txt \
//!   --read-timeout-ms 5000
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! HTTP_PORT=8080 WEB_ROOT=./public ./form_server
//! ```

use clap::Parser;

/// Configuración del servidor HTTP/1.1
#[derive(Debug, Clone, Parser)]
#[command(name = "form_server")]
#[command(about = "Servidor HTTP/1.1 de archivos estáticos y formularios")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Puerto en el que escucha el servidor
    #[arg(short, long, default_value = "8080", env = "HTTP_PORT")]
    pub port: u16,

    /// Host/IP en el que escucha
    #[arg(long, default_value = "127.0.0.1", env = "HTTP_HOST")]
    pub host: String,

    /// Directorio raíz desde donde se sirven los archivos de GET
    #[arg(long = "web-root", default_value = ".", env = "WEB_ROOT")]
    pub web_root: String,

    /// Ruta del archivo donde se persiste la última submission
    #[arg(long = "store-path", default_value = "output/post_data.txt", env = "STORE_PATH")]
    pub store_path: String,

    /// Ruta del archivo de log (JSON lines)
    #[arg(long = "log-path", default_value = "server.log", env = "LOG_PATH")]
    pub log_path: String,

    /// Timeout de lectura/escritura por conexión en milisegundos (0 = sin timeout)
    #[arg(long = "read-timeout-ms", default_value = "5000", env = "READ_TIMEOUT_MS")]
    pub read_timeout_ms: u64,

    /// Responder los GET de archivos inexistentes con 200 y el texto
    /// "File Not Found", como las primeras versiones del servidor
    #[arg(long = "legacy-not-found", env = "LEGACY_NOT_FOUND")]
    pub legacy_not_found: bool,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    pub fn new() -> Self {
        Config::parse()
    }

    /// Obtiene la dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use form_server::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "127.0.0.1:8080");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Valida la configuración
    ///
    /// Retorna errores si hay valores inválidos
    pub fn validate(&self) -> Result<(), String> {
        if self.host.trim().is_empty() {
            return Err("Host must not be empty".to_string());
        }
        if self.web_root.trim().is_empty() {
            return Err("Web root must not be empty".to_string());
        }
        if self.store_path.trim().is_empty() {
            return Err("Store path must not be empty".to_string());
        }
        if self.log_path.trim().is_empty() {
            return Err("Log path must not be empty".to_string());
        }

        Ok(())
    }

    /// Imprime un resumen de la configuración
    pub fn print_summary(&self) {
        println!("╔══════════════════════════════════════════════════╗");
        println!("║        Form Server - HTTP/1.1 Configuration      ║");
        println!("╚══════════════════════════════════════════════════╝");
        println!();
        println!("🌐 Network:");
        println!("   Address:       {}", self.address());
        println!("   Read timeout:  {} ms{}", self.read_timeout_ms,
            if self.read_timeout_ms == 0 { " (disabled)" } else { "" });
        println!();
        println!("📁 Filesystem:");
        println!("   Web root:      {}", self.web_root);
        println!("   Store:         {}", self.store_path);
        println!("   Log:           {}", self.log_path);
        println!();
        println!("⚙️  Behavior:");
        if self.legacy_not_found {
            println!("   Not found:     200 + \"File Not Found\" (legacy)");
        } else {
            println!("   Not found:     404 + \"404 File Not Found\"");
        }
        println!();
        println!("════════════════════════════════════════════════════");
        println!();
    }
}

impl Default for Config {
    /// Configuración por defecto
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
            web_root: ".".to_string(),
            store_path: "output/post_data.txt".to_string(),
            log_path: "server.log".to_string(),
            read_timeout_ms: 5_000,
            legacy_not_found: false,
        }
    }
}
