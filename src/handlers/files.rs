//! # Handler de GET: Archivos Estáticos
//! src/handlers/files.rs
//!
//! Sirve el archivo que nombra el target del request, resuelto debajo del
//! web root configurado.
//!
//! Dos comportamientos heredados se conservan a propósito:
//! - El target se usa crudo: si trae query string (`/a.html?x=1`), esa
//!   parte queda en el nombre y simplemente no va a matchear un archivo.
//! - El Content-Type se deriva del path pedido incluso cuando el archivo
//!   no existe.
//!
//! La respuesta de archivo no lleva `Content-Length`: el cliente lee
//! hasta que el servidor cierra la conexión.

use crate::config::Config;
use crate::http::response::content_type_for;
use crate::http::{Request, Response, StatusCode};
use crate::logging::Logger;
use std::fs;
use std::io;

/// Atiende un GET sirviendo un archivo del web root
///
/// Si el archivo no se puede leer (no existe, es un directorio, el path
/// intenta escapar del root), responde la variante de "no encontrado"
/// configurada: `404` con `"404 File Not Found"` por defecto, o el
/// histórico `200` con `"File Not Found"` si `legacy_not_found` está
/// activo.
pub fn handle_get(request: &Request, config: &Config, logger: &dyn Logger) -> Response {
    let target = request.target();
    let relative = target.strip_prefix('/').unwrap_or(target);
    let content_type = content_type_for(relative);

    match read_confined(&config.web_root, relative) {
        Ok(contents) => Response::file(content_type, contents),
        Err(e) => {
            logger.error(&format!("GET {}: {}", target, e));
            not_found_response(content_type, config.legacy_not_found)
        }
    }
}

/// Lee un archivo garantizando que queda debajo del web root
///
/// Canonicaliza el root y el path pedido; si el path canónico se sale del
/// root (por `..`, symlinks o un path absoluto), se responde igual que si
/// el archivo no existiera, sin señal distinguible para el cliente.
fn read_confined(web_root: &str, relative: &str) -> io::Result<Vec<u8>> {
    let root = fs::canonicalize(web_root)?;
    let resolved = fs::canonicalize(root.join(relative))?;

    if !resolved.starts_with(&root) {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            "path escapes web root",
        ));
    }

    fs::read(&resolved)
}

/// Arma la respuesta de archivo no encontrado
fn not_found_response(content_type: &str, legacy: bool) -> Response {
    if legacy {
        // Comportamiento de las primeras versiones: 200 con texto fijo
        Response::new(StatusCode::Ok)
            .with_header("Content-Type", content_type)
            .with_body("File Not Found")
    } else {
        Response::new(StatusCode::NotFound)
            .with_header("Content-Type", content_type)
            .with_body("404 File Not Found")
    }
}
