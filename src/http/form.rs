//! # Decodificación de Formularios
//! src/http/form.rs
//!
//! Este módulo extrae los campos `title` y `content` de un body
//! `application/x-www-form-urlencoded` del estilo
//! `title=Hola%20Mundo&content=Texto`.
//!
//! Los campos se localizan por **búsqueda de substring** (`"title="` y
//! `"content="` en cualquier posición del body), el orden entre ellos es
//! irrelevante y cualquier otro campo se ignora. Ambos campos son
//! obligatorios: si falta uno, la submission completa se rechaza, nunca se
//! acepta a medias.

/// Campos decodificados de una submission válida
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFields {
    /// Valor decodificado del campo `title`
    pub title: String,

    /// Valor decodificado del campo `content`
    pub content: String,
}

/// Errores al decodificar un formulario
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// Falta un campo requerido (`title` o `content`)
    MissingField(&'static str),
}

impl std::fmt::Display for FormError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormError::MissingField(name) => write!(f, "missing required field: {}", name),
        }
    }
}

impl std::error::Error for FormError {}

impl FormFields {
    /// Decodifica los campos `title` y `content` de un body de formulario
    ///
    /// # Errores
    ///
    /// Retorna `MissingField` si `title=` o `content=` no aparece en el
    /// body; en ese caso no se registra nada.
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use form_server::http::FormFields;
    ///
    /// let fields = FormFields::parse("title=Hola%20Mundo&content=Hi").unwrap();
    /// assert_eq!(fields.title, "Hola Mundo");
    /// assert_eq!(fields.content, "Hi");
    /// ```
    pub fn parse(body: &str) -> Result<Self, FormError> {
        let title_pos = body
            .find("title=")
            .ok_or(FormError::MissingField("title"))?;
        let content_pos = body
            .find("content=")
            .ok_or(FormError::MissingField("content"))?;

        Ok(FormFields {
            title: extract_field(body, title_pos),
            content: extract_field(body, content_pos),
        })
    }

    /// Arma el texto que se persiste en el store
    ///
    /// Formato: `Title: <title>\nContent: <content>`
    pub fn to_record(&self) -> String {
        format!("Title: {}\nContent: {}", self.title, self.content)
    }
}

/// Extrae y decodifica el valor de un campo del body
///
/// `field_pos` es la posición donde empieza el nombre del campo. El valor
/// corre desde el primer `=` a partir de ahí hasta el siguiente `&` o el
/// final del body, y se retorna url-decodificado.
///
/// # Ejemplo
///
/// ```
/// use form_server::http::form::extract_field;
///
/// let body = "title=Hello%20World&content=Hi";
/// assert_eq!(extract_field(body, 0), "Hello World");
/// ```
pub fn extract_field(body: &str, field_pos: usize) -> String {
    let value_start = match body[field_pos..].find('=') {
        Some(offset) => field_pos + offset + 1,
        None => return String::new(),
    };

    let value_end = body[value_start..]
        .find('&')
        .map(|offset| value_start + offset)
        .unwrap_or(body.len());

    url_decode(&body[value_start..value_end])
}

/// Decodifica texto url-encoded
///
/// - `%XX` con dos dígitos hex a continuación se convierte en el byte con
///   ese valor; si quedan menos de dos dígitos hex, el `%` y lo que siga
///   pasan tal cual, sin error
/// - `+` se convierte en espacio
/// - todo lo demás pasa sin cambios
///
/// # Ejemplo
///
/// ```
/// use form_server::http::form::url_decode;
///
/// assert_eq!(url_decode("a+b%20c"), "a b c");
/// ```
pub fn url_decode(encoded: &str) -> String {
    let bytes = encoded.as_bytes();
    let mut decoded: Vec<u8> = Vec::with_capacity(bytes.len());

    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                let pair = if i + 2 < bytes.len() {
                    hex_digit(bytes[i + 1]).zip(hex_digit(bytes[i + 2]))
                } else {
                    None
                };

                match pair {
                    Some((high, low)) => {
                        decoded.push(high * 16 + low);
                        i += 3;
                    }
                    None => {
                        // Escape incompleto o inválido: pasa tal cual
                        decoded.push(b'%');
                        i += 1;
                    }
                }
            }
            b'+' => {
                decoded.push(b' ');
                i += 1;
            }
            other => {
                decoded.push(other);
                i += 1;
            }
        }
    }

    String::from_utf8_lossy(&decoded).into_owned()
}

/// Valor numérico de un dígito hexadecimal ASCII
fn hex_digit(byte: u8) -> Option<u8> {
    (byte as char).to_digit(16).map(|d| d as u8)
}
