//! # Módulo HTTP
//!
//! Este módulo implementa el subconjunto de HTTP/1.1 que el servidor
//! necesita, sin usar librerías de alto nivel. Incluye:
//!
//! - Lectura y parsing de requests (request line + headers + body)
//! - Decodificación de formularios `application/x-www-form-urlencoded`
//! - Construcción de responses HTTP
//! - Manejo de status codes
//!
//! ## Subconjunto soportado
//!
//! El servidor atiende exactamente un request por conexión y siempre
//! responde `Connection: close`. No hay keep-alive, ni chunked transfer
//! encoding, ni validación del header `Host`. De los headers del request
//! solo se consulta `Content-Length` (para el framing del body en POST).
//!
//! ### Formato de Request
//!
//! ```text
//! POST /submit HTTP/1.1\r\n
//! Content-Length: 21\r\n
//! \r\n
//! title=Hola&content=Si
//! ```
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: text/plain\r\n
//! Content-Length: 21\r\n
//! Connection: close\r\n
//! \r\n
//! Data saved successfully
//! ```

pub mod form;
pub mod request;   // Lectura y parsing de HTTP requests
pub mod response;  // Construcción de HTTP responses
pub mod status;    // Códigos de estado HTTP

// Re-exportamos los tipos principales para facilitar su uso
// Esto permite usar `http::Request` en vez de `http::request::Request`
pub use form::FormFields;
pub use request::{Method, Request};
pub use response::Response;
pub use status::StatusCode;
