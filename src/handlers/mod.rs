//! # Handlers
//! src/handlers/mod.rs
//!
//! Un handler por método soportado:
//! - GET sirve archivos estáticos desde el web root (`files`)
//! - POST recibe un formulario y lo persiste (`forms`)
//!
//! El dispatch por método vive en `server::tcp`; los handlers reciben
//! explícitamente lo que necesitan (config, store, logger) y devuelven la
//! `Response` lista para serializar.

pub mod files;
pub mod forms;
