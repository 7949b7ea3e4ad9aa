//! # Construcción de Responses HTTP
//!
//! Este módulo proporciona una API para construir respuestas HTTP/1.1 y
//! convertirlas a bytes para enviar al cliente.
//!
//! Dos decisiones fijan el contrato de salida:
//!
//! - Los headers se emiten **en el orden en que se agregaron**, y
//!   `Connection: close` va siempre al final: el servidor atiende un
//!   request por conexión y cierra.
//! - `Content-Length` **nunca se agrega solo**. La ruta GET lo omite a
//!   propósito (el cierre de la conexión es el framing) y la ruta POST lo
//!   fija al tamaño del registro persistido, que no coincide con el body.
//!
//! ## Ejemplo de uso
//!
//! ```
//! use form_server::http::{Response, StatusCode};
//!
//! let response = Response::new(StatusCode::Ok)
//!     .with_header("Content-Type", "text/plain")
//!     .with_body("hola");
//!
//! let bytes = response.to_bytes();
//! // Ahora puedes enviar `bytes` por el socket
//! ```

use super::StatusCode;

/// Determina el Content-Type a partir del path pedido
///
/// La detección es por **substring**, no por sufijo: un path que contenga
/// `.html` en cualquier parte califica como HTML. Así se comporta el
/// servidor desde su primera versión y los tests lo fijan.
///
/// # Ejemplo
/// ```
/// use form_server::http::response::content_type_for;
///
/// assert_eq!(content_type_for("index.html"), "text/html");
/// assert_eq!(content_type_for("data.bin"), "text/plain");
/// ```
pub fn content_type_for(path: &str) -> &'static str {
    if path.contains(".html") {
        "text/html"
    } else if path.contains(".css") {
        "text/css"
    } else if path.contains(".js") {
        "application/javascript"
    } else {
        "text/plain"
    }
}

/// Representa una respuesta HTTP/1.1 completa
#[derive(Debug, Clone)]
pub struct Response {
    /// Código de estado HTTP (200, 404, etc.)
    status: StatusCode,

    /// Headers en orden de inserción, tal como saldrán al socket
    headers: Vec<(String, String)>,

    /// Cuerpo de la respuesta (puede ser vacío)
    body: Vec<u8>,
}

impl Response {
    /// Crea una nueva respuesta con el código de estado especificado
    ///
    /// Por defecto, la respuesta no tiene headers ni body.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Agrega un header a la respuesta
    ///
    /// # Ejemplo
    /// ```
    /// use form_server::http::{Response, StatusCode};
    ///
    /// let response = Response::new(StatusCode::Ok)
    ///     .with_header("Content-Type", "text/html");
    /// ```
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Agrega el header `Content-Length` con el valor indicado
    ///
    /// Se pasa explícito porque no siempre es el tamaño del body: la
    /// confirmación de POST declara el tamaño del registro guardado.
    pub fn with_content_length(self, length: usize) -> Self {
        self.with_header("Content-Length", &length.to_string())
    }

    /// Establece el cuerpo de la respuesta desde un string
    ///
    /// No toca los headers: si la respuesta debe declarar
    /// `Content-Length`, se agrega con [`Response::with_content_length`].
    pub fn with_body(mut self, body: &str) -> Self {
        self.body = body.as_bytes().to_vec();
        self
    }

    /// Establece el cuerpo de la respuesta desde bytes
    ///
    /// Útil para servir archivos tal cual están en disco.
    pub fn with_body_bytes(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    /// Crea la respuesta con que se sirve un archivo
    ///
    /// `200 OK` con el Content-Type indicado y los bytes del archivo como
    /// body. Sin `Content-Length`: el cliente lee hasta el cierre de la
    /// conexión.
    ///
    /// # Ejemplo
    /// ```
    /// use form_server::http::Response;
    ///
    /// let response = Response::file("text/html", b"<h1>hola</h1>".to_vec());
    /// assert_eq!(response.header("Content-Length"), None);
    /// ```
    pub fn file(content_type: &str, contents: Vec<u8>) -> Self {
        Self::new(StatusCode::Ok)
            .with_header("Content-Type", content_type)
            .with_body_bytes(contents)
    }

    /// Crea una respuesta de error sin cuerpo
    ///
    /// `Content-Type: text/plain` y `Content-Length: 0`; es la forma de
    /// las respuestas 400, 405 y 500 de este servidor.
    pub fn empty(status: StatusCode) -> Self {
        Self::new(status)
            .with_header("Content-Type", "text/plain")
            .with_content_length(0)
    }

    /// Convierte la respuesta a bytes listos para enviar por el socket
    ///
    /// Genera el formato completo HTTP/1.1:
    /// - Status line: `HTTP/1.1 200 OK\r\n`
    /// - Headers en orden de inserción: `Header-Name: Value\r\n`
    /// - `Connection: close\r\n` (siempre, al final)
    /// - Línea vacía: `\r\n`
    /// - Body: contenido binario
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut result = Vec::new();

        // 1. Status line
        let status_line = format!("HTTP/1.1 {}\r\n", self.status);
        result.extend_from_slice(status_line.as_bytes());

        // 2. Headers, en el orden en que se agregaron
        for (name, value) in &self.headers {
            let header_line = format!("{}: {}\r\n", name, value);
            result.extend_from_slice(header_line.as_bytes());
        }

        // 3. Siempre se cierra la conexión después de una respuesta
        result.extend_from_slice(b"Connection: close\r\n");

        // 4. Línea vacía que separa headers del body
        result.extend_from_slice(b"\r\n");

        // 5. Body (si existe)
        result.extend_from_slice(&self.body);

        result
    }

    /// Obtiene el código de estado de la respuesta
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Busca un header por nombre (case-insensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Obtiene una referencia a los headers en orden de inserción
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Obtiene una referencia al body
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_for_known_extensions() {
        assert_eq!(content_type_for("index.html"), "text/html");
        assert_eq!(content_type_for("styles/main.css"), "text/css");
        assert_eq!(content_type_for("app.js"), "application/javascript");
    }

    #[test]
    fn test_content_type_for_default() {
        assert_eq!(content_type_for("notes.txt"), "text/plain");
        assert_eq!(content_type_for("archivo"), "text/plain");
        assert_eq!(content_type_for(""), "text/plain");
    }

    #[test]
    fn test_content_type_for_substring_match() {
        // La detección es por substring: .html en cualquier parte del path
        assert_eq!(content_type_for("backup.html.old"), "text/html");
        assert_eq!(content_type_for("dir.css/archivo"), "text/css");
    }

    #[test]
    fn test_new_response() {
        let response = Response::new(StatusCode::Ok);
        assert_eq!(response.status(), StatusCode::Ok);
        assert!(response.headers().is_empty());
        assert!(response.body().is_empty());
    }

    #[test]
    fn test_with_header_keeps_order() {
        let response = Response::new(StatusCode::Ok)
            .with_header("Content-Type", "text/plain")
            .with_header("Content-Length", "4");

        assert_eq!(response.headers()[0].0, "Content-Type");
        assert_eq!(response.headers()[1].0, "Content-Length");
    }

    #[test]
    fn test_with_body_does_not_add_content_length() {
        let response = Response::new(StatusCode::Ok).with_body("Hello World");

        assert_eq!(response.body(), b"Hello World");
        assert_eq!(response.header("Content-Length"), None);
    }

    #[test]
    fn test_with_content_length_explicit() {
        let response = Response::new(StatusCode::Ok)
            .with_content_length(37)
            .with_body("corto");

        // El valor declarado manda, no el tamaño del body
        assert_eq!(response.header("Content-Length"), Some("37"));
        assert_eq!(response.body(), b"corto");
    }

    #[test]
    fn test_file_response() {
        let response = Response::file("text/html", b"<p>hi</p>".to_vec());

        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(response.header("Content-Type"), Some("text/html"));
        assert_eq!(response.header("Content-Length"), None);
        assert_eq!(response.body(), b"<p>hi</p>");
    }

    #[test]
    fn test_empty_response() {
        let response = Response::empty(StatusCode::BadRequest);

        assert_eq!(response.status(), StatusCode::BadRequest);
        assert_eq!(response.header("Content-Type"), Some("text/plain"));
        assert_eq!(response.header("Content-Length"), Some("0"));
        assert!(response.body().is_empty());
    }

    #[test]
    fn test_to_bytes() {
        let response = Response::new(StatusCode::Ok)
            .with_header("Content-Type", "text/plain")
            .with_body("Test");

        let bytes = response.to_bytes();
        let text = String::from_utf8(bytes).unwrap();

        assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(text.contains("Content-Type: text/plain\r\n"));
        assert!(text.contains("Connection: close\r\n"));
        assert!(text.ends_with("\r\n\r\nTest"));
    }

    #[test]
    fn test_to_bytes_header_order() {
        let response = Response::new(StatusCode::Ok)
            .with_header("Content-Type", "text/plain")
            .with_content_length(0);

        let text = String::from_utf8(response.to_bytes()).unwrap();
        let ct = text.find("Content-Type:").unwrap();
        let cl = text.find("Content-Length:").unwrap();
        let close = text.find("Connection: close").unwrap();

        assert!(ct < cl);
        assert!(cl < close);
    }

    #[test]
    fn test_to_bytes_always_closes() {
        let response = Response::new(StatusCode::Ok);
        let text = String::from_utf8(response.to_bytes()).unwrap();

        assert!(text.contains("Connection: close\r\n"));
        assert!(text.ends_with("\r\n\r\n"));
    }

    #[test]
    fn test_to_bytes_binary_body() {
        let binary_data = vec![0x00, 0x01, 0x02, 0xFF];
        let response = Response::new(StatusCode::Ok)
            .with_header("Content-Type", "text/plain")
            .with_body_bytes(binary_data.clone());

        let bytes = response.to_bytes();
        assert!(bytes.ends_with(&binary_data));
    }
}
