//! # Form Server
//! src/lib.rs
//!
//! Servidor HTTP/1.1 mínimo implementado desde cero: sirve archivos
//! estáticos con GET y recibe formularios simples con POST. Cada conexión
//! se maneja en su propio thread, aislada de las demás.
//!
//! ## Arquitectura
//!
//! El servidor está dividido en módulos especializados:
//! - `http`: Parsing del protocolo HTTP/1.1 y construcción de responses
//! - `server`: Lógica del servidor TCP y manejo de conexiones
//! - `handlers`: Handlers de GET (archivos) y POST (formularios)
//! - `store`: Persistencia de la última submission recibida
//! - `logging`: Capacidad de logging inyectable (archivo JSON lines)
//! - `config`: Configuración por CLI y variables de entorno
//!
//! ## Ejemplo de uso
//!
//! ```ignore
//! use std::sync::Arc;
//! use form_server::config::Config;
//! use form_server::logging::NullLogger;
//! use form_server::server::Server;
//!
//! let config = Config::default();
//! let mut server = Server::new(config, Arc::new(NullLogger));
//! server.run().expect("Error al iniciar servidor");
//! ```

pub mod config;
pub mod handlers;
pub mod http;
pub mod logging;
pub mod server;
pub mod store;
