//! # Handler de POST: Formularios
//! src/handlers/forms.rs
//!
//! Decodifica los campos `title`/`content` del body, persiste el registro
//! en el store y confirma al cliente.
//!
//! El `Content-Length` de la confirmación declara el tamaño del registro
//! persistido, no el del body de la respuesta; así lo hace este servidor
//! desde su primera versión y la conexión se cierra igual tras responder.

use crate::http::{FormFields, Request, Response, StatusCode};
use crate::logging::Logger;
use crate::store::SubmissionStore;

/// Cuerpo de la confirmación de una submission aceptada
const ACK_BODY: &str = "Data saved successfully\n";

/// Atiende un POST persistiendo el formulario recibido
///
/// - Campos completos y store escribible: `200 OK`, confirmación corta,
///   `Content-Length` igual al tamaño del registro guardado.
/// - Falta `title=` o `content=`: `400 Bad Request`, sin tocar el store.
/// - El store no se pudo escribir: `500 Internal Server Error`.
pub fn handle_post(request: &Request, store: &SubmissionStore, logger: &dyn Logger) -> Response {
    let body = request.body_string();

    let fields = match FormFields::parse(&body) {
        Ok(fields) => fields,
        Err(e) => {
            logger.error(&format!("POST rejected: {}", e));
            return Response::empty(StatusCode::BadRequest);
        }
    };

    let record = fields.to_record();
    match store.save(&record) {
        Ok(()) => {
            logger.info(&format!(
                "submission saved to {} ({} bytes)",
                store.path().display(),
                record.len()
            ));
            Response::new(StatusCode::Ok)
                .with_header("Content-Type", "text/plain")
                .with_content_length(record.len())
                .with_body(ACK_BODY)
        }
        Err(e) => {
            logger.error(&format!("store write failed: {}", e));
            Response::empty(StatusCode::InternalServerError)
        }
    }
}
