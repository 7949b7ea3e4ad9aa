//! # Lectura y Parsing de Requests
//! src/http/request.rs
//!
//! Este módulo implementa la lectura de un request HTTP desde el socket:
//! se consume el stream hasta el terminador de headers (`\r\n\r\n`), se
//! parsea la request line y, para POST, se completa el body según el
//! framing declarado.
//!
//! ## Tolerancia
//!
//! El parser es deliberadamente tolerante: una request line con menos de
//! dos tokens no es un error, produce método `Other` con target vacío y el
//! dispatcher responde 405. Los headers que no se entienden se ignoran;
//! el único que se consulta es `Content-Length`.
//!
//! ## Framing del body (POST)
//!
//! Si el cliente declara `Content-Length`, el body se lee hasta completar
//! esa cantidad de bytes. Si no lo declara, se lee hasta que el cliente
//! cierre su lado de la conexión. El timeout de lectura del socket acota
//! ambos casos.

use std::collections::HashMap;
use std::io::Read;

/// Tamaño máximo aceptado para la cabecera de un request, en bytes.
/// Coincide con el buffer de lectura por conexión del servidor.
pub const MAX_HEAD_BYTES: usize = 8192;

/// Métodos HTTP que el servidor distingue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET - Servir un archivo estático
    Get,

    /// POST - Recibir un formulario
    Post,

    /// Cualquier otro token (o request line malformada)
    Other,
}

impl Method {
    /// Clasifica el token de método de la request line
    ///
    /// Nunca falla: un token desconocido (o vacío) es `Other` y el
    /// dispatcher decide qué hacer con él.
    fn from_token(token: &str) -> Self {
        match token {
            "GET" => Method::Get,
            "POST" => Method::Post,
            _ => Method::Other,
        }
    }

    /// Convierte el método a string (para logging)
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Other => "OTHER",
        }
    }
}

/// Errores al leer un request desde el socket
///
/// Cualquiera de estos aborta el request sin enviar respuesta; la conexión
/// simplemente se cierra.
#[derive(Debug)]
pub enum RequestError {
    /// Error de I/O, o EOF antes del terminador de headers
    ReadFailure(std::io::Error),

    /// La cabecera supera `MAX_HEAD_BYTES`
    HeadTooLarge,
}

impl std::fmt::Display for RequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestError::ReadFailure(e) => write!(f, "failed to read request: {}", e),
            RequestError::HeadTooLarge => {
                write!(f, "request head exceeds {} bytes", MAX_HEAD_BYTES)
            }
        }
    }
}

impl std::error::Error for RequestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RequestError::ReadFailure(e) => Some(e),
            RequestError::HeadTooLarge => None,
        }
    }
}

/// Representa un request HTTP leído de una conexión
///
/// Vive solamente durante el ciclo de atención de esa conexión; nunca se
/// persiste.
#[derive(Debug, Clone)]
pub struct Request {
    /// Método clasificado (GET, POST u otro)
    method: Method,

    /// Target crudo de la request line (path + query, sin decodificar)
    target: String,

    /// Headers con nombre en minúsculas (solo se consulta content-length)
    headers: HashMap<String, String>,

    /// Body del request (vacío salvo en POST)
    body: Vec<u8>,
}

impl Request {
    /// Lee un request completo desde `reader`
    ///
    /// Consume el stream hasta `\r\n\r\n`, parsea la request line y los
    /// headers, y para POST completa el body según `Content-Length` (o
    /// hasta EOF si no fue declarado).
    ///
    /// # Errores
    ///
    /// * `ReadFailure` - error de I/O o EOF antes del terminador
    /// * `HeadTooLarge` - cabecera de más de `MAX_HEAD_BYTES` bytes
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use std::io::Cursor;
    /// use form_server::http::{Method, Request};
    ///
    /// let raw = b"GET /index.html HTTP/1.1\r\n\r\n";
    /// let request = Request::read_from(&mut Cursor::new(&raw[..])).unwrap();
    ///
    /// assert_eq!(request.method(), Method::Get);
    /// assert_eq!(request.target(), "/index.html");
    /// ```
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self, RequestError> {
        // 1. Leer hasta el terminador de headers
        let mut buffer: Vec<u8> = Vec::new();
        let mut chunk = [0u8; 1024];

        let head_end = loop {
            if let Some(pos) = Self::find_header_end(&buffer) {
                break pos;
            }
            if buffer.len() > MAX_HEAD_BYTES {
                return Err(RequestError::HeadTooLarge);
            }

            let n = reader.read(&mut chunk).map_err(RequestError::ReadFailure)?;
            if n == 0 {
                // El cliente cerró sin completar la cabecera
                return Err(RequestError::ReadFailure(std::io::Error::new(
                    std::io::ErrorKind::UnexpectedEof,
                    "connection closed before end of headers",
                )));
            }
            buffer.extend_from_slice(&chunk[..n]);
        };

        // 2. Parsear request line y headers
        let head = String::from_utf8_lossy(&buffer[..head_end]).into_owned();
        let mut lines = head.split("\r\n");
        let (method, target) = Self::parse_request_line(lines.next().unwrap_or(""));
        let headers = Self::parse_headers(lines);

        // 3. Completar el body (solo POST; lo que vino pegado a la
        //    cabecera ya está en el buffer)
        let mut body = buffer[head_end + 4..].to_vec();
        if method == Method::Post {
            let declared = headers
                .get("content-length")
                .and_then(|v| v.parse::<usize>().ok());
            Self::read_body(reader, &mut body, declared)?;
        } else {
            body.clear();
        }

        Ok(Request {
            method,
            target,
            headers,
            body,
        })
    }

    /// Busca el terminador `\r\n\r\n` en lo acumulado hasta ahora
    fn find_header_end(buffer: &[u8]) -> Option<usize> {
        buffer.windows(4).position(|w| w == b"\r\n\r\n")
    }

    /// Parsea la request line con tolerancia
    ///
    /// Formato esperado: `METHOD TARGET [VERSION]`. Solo se usan los dos
    /// primeros tokens; el de versión, si está, se ignora. Con menos de
    /// dos tokens el método queda en `Other` y el target vacío.
    fn parse_request_line(line: &str) -> (Method, String) {
        let mut parts = line.split_whitespace();

        let method_token = match parts.next() {
            Some(token) => token,
            None => return (Method::Other, String::new()),
        };
        let target = match parts.next() {
            Some(token) => token.to_string(),
            None => return (Method::Other, String::new()),
        };

        (Method::from_token(method_token), target)
    }

    /// Parsea las líneas de headers en un mapa
    ///
    /// Los nombres se guardan en minúsculas para poder consultarlos sin
    /// importar cómo los escribió el cliente. Las líneas sin `:` se
    /// ignoran: este servidor no valida headers, solo los lee.
    fn parse_headers<'a>(lines: impl Iterator<Item = &'a str>) -> HashMap<String, String> {
        let mut headers = HashMap::new();

        for line in lines {
            if line.trim().is_empty() {
                break;
            }
            if let Some(colon_pos) = line.find(':') {
                let name = line[..colon_pos].trim().to_ascii_lowercase();
                let value = line[colon_pos + 1..].trim().to_string();
                headers.insert(name, value);
            }
        }

        headers
    }

    /// Completa el body según el framing declarado
    ///
    /// Con `Content-Length` se lee hasta juntar esa cantidad (el exceso se
    /// descarta y un EOF temprano deja el body corto). Sin declarar, se
    /// lee hasta que el cliente cierre.
    fn read_body<R: Read>(
        reader: &mut R,
        body: &mut Vec<u8>,
        declared_len: Option<usize>,
    ) -> Result<(), RequestError> {
        match declared_len {
            Some(len) => {
                let mut chunk = [0u8; 1024];
                while body.len() < len {
                    let n = reader.read(&mut chunk).map_err(RequestError::ReadFailure)?;
                    if n == 0 {
                        break;
                    }
                    body.extend_from_slice(&chunk[..n]);
                }
                body.truncate(len);
            }
            None => {
                reader
                    .read_to_end(body)
                    .map_err(RequestError::ReadFailure)?;
            }
        }

        Ok(())
    }

    // === Métodos públicos para acceder a los campos ===

    /// Obtiene el método del request
    pub fn method(&self) -> Method {
        self.method
    }

    /// Obtiene el target crudo (path + query) de la request line
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Obtiene un header por nombre (case-insensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(|s| s.as_str())
    }

    /// Obtiene el `Content-Length` declarado, si lo hubo y es numérico
    pub fn content_length(&self) -> Option<usize> {
        self.header("content-length")
            .and_then(|v| v.parse::<usize>().ok())
    }

    /// Obtiene el body del request
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Obtiene el body como texto (los bytes inválidos se reemplazan)
    pub fn body_string(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn read(raw: &[u8]) -> Result<Request, RequestError> {
        Request::read_from(&mut Cursor::new(raw))
    }

    #[test]
    fn test_read_simple_get() {
        let request = read(b"GET /index.html HTTP/1.1\r\n\r\n").unwrap();

        assert_eq!(request.method(), Method::Get);
        assert_eq!(request.target(), "/index.html");
        assert!(request.body().is_empty());
    }

    #[test]
    fn test_read_get_without_version_token() {
        let request = read(b"GET /style.css\r\n\r\n").unwrap();

        assert_eq!(request.method(), Method::Get);
        assert_eq!(request.target(), "/style.css");
    }

    #[test]
    fn test_read_target_keeps_query() {
        let request = read(b"GET /page.html?user=7 HTTP/1.1\r\n\r\n").unwrap();

        assert_eq!(request.target(), "/page.html?user=7");
    }

    #[test]
    fn test_read_unknown_method() {
        let request = read(b"DELETE /x HTTP/1.1\r\n\r\n").unwrap();

        assert_eq!(request.method(), Method::Other);
        assert_eq!(request.target(), "/x");
    }

    #[test]
    fn test_read_malformed_request_line() {
        // Un solo token: método y target quedan vacíos, sin error
        let request = read(b"GARBAGE\r\n\r\n").unwrap();

        assert_eq!(request.method(), Method::Other);
        assert_eq!(request.target(), "");
    }

    #[test]
    fn test_read_headers_case_insensitive() {
        let raw = b"POST /submit HTTP/1.1\r\ncOnTeNt-LeNgTh: 4\r\n\r\nabcd";
        let request = read(raw).unwrap();

        assert_eq!(request.content_length(), Some(4));
        assert_eq!(request.header("Content-Length"), Some("4"));
    }

    #[test]
    fn test_read_header_line_without_colon_is_ignored() {
        let raw = b"GET / HTTP/1.1\r\nthis line has no separator\r\nHost: x\r\n\r\n";
        let request = read(raw).unwrap();

        assert_eq!(request.header("host"), Some("x"));
        assert_eq!(request.header("this line has no separator"), None);
    }

    #[test]
    fn test_read_post_body_with_content_length() {
        let raw = b"POST /submit HTTP/1.1\r\nContent-Length: 10\r\n\r\ntitle=Hola";
        let request = read(raw).unwrap();

        assert_eq!(request.method(), Method::Post);
        assert_eq!(request.body(), b"title=Hola");
    }

    #[test]
    fn test_read_post_body_truncates_excess() {
        // Declara 5 bytes pero manda 10: el body queda en 5
        let raw = b"POST /submit HTTP/1.1\r\nContent-Length: 5\r\n\r\n0123456789";
        let request = read(raw).unwrap();

        assert_eq!(request.body(), b"01234");
    }

    #[test]
    fn test_read_post_body_short_on_early_eof() {
        // Declara 50 bytes pero el cliente cierra antes
        let raw = b"POST /submit HTTP/1.1\r\nContent-Length: 50\r\n\r\ntitle=x";
        let request = read(raw).unwrap();

        assert_eq!(request.body(), b"title=x");
    }

    #[test]
    fn test_read_post_body_until_eof_without_content_length() {
        let raw = b"POST /submit HTTP/1.1\r\n\r\ntitle=a&content=b";
        let request = read(raw).unwrap();

        assert_eq!(request.body(), b"title=a&content=b");
    }

    #[test]
    fn test_read_get_discards_body_bytes() {
        let raw = b"GET / HTTP/1.1\r\n\r\nleftover";
        let request = read(raw).unwrap();

        assert!(request.body().is_empty());
    }

    #[test]
    fn test_read_eof_before_terminator() {
        let result = read(b"GET / HTTP/1.1\r\nHost: x");

        assert!(matches!(result, Err(RequestError::ReadFailure(_))));
    }

    #[test]
    fn test_read_empty_stream() {
        let result = read(b"");

        assert!(matches!(result, Err(RequestError::ReadFailure(_))));
    }

    #[test]
    fn test_read_head_too_large() {
        let mut raw = Vec::from(&b"GET / HTTP/1.1\r\n"[..]);
        while raw.len() <= MAX_HEAD_BYTES + 1024 {
            raw.extend_from_slice(b"X-Filler: aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa\r\n");
        }
        // Sin terminador a propósito

        let result = read(&raw);
        assert!(matches!(result, Err(RequestError::HeadTooLarge)));
    }

    #[test]
    fn test_read_non_numeric_content_length_falls_back_to_eof() {
        let raw = b"POST /submit HTTP/1.1\r\nContent-Length: many\r\n\r\ntitle=a&content=b";
        let request = read(raw).unwrap();

        assert_eq!(request.content_length(), None);
        assert_eq!(request.body(), b"title=a&content=b");
    }
}
