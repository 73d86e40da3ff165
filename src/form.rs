//! `application/x-www-form-urlencoded` request bodies.

use thiserror::Error;
use url::form_urlencoded;

use crate::request::Request;
use crate::store::MovieFields;

const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

#[derive(Debug, Error, Eq, PartialEq)]
pub enum FormError {
    #[error("unsupported content type `{0}`")]
    UnsupportedContentType(String),

    #[error("body is not valid utf-8")]
    InvalidUtf8,

    #[error("malformed percent escape at byte {offset}")]
    MalformedEscape { offset: usize },
}

/// Decoded form fields in submission order.
#[derive(Debug, Default)]
pub struct Form {
    fields: Vec<(String, String)>,
}

impl Form {
    /// Decodes the body of `req`. A missing `content-type` is accepted.
    pub fn parse(req: &Request) -> Result<Self, FormError> {
        if let Some(ct) = req.header("content-type") {
            let essence = ct.split(';').next().unwrap_or_default().trim();
            if !essence.eq_ignore_ascii_case(FORM_URLENCODED) {
                return Err(FormError::UnsupportedContentType(ct.to_owned()));
            }
        }

        let body = std::str::from_utf8(req.body()).map_err(|_| FormError::InvalidUtf8)?;
        check_escapes(body)?;

        let fields = form_urlencoded::parse(body.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        Ok(Self { fields })
    }

    /// First value submitted for `name`, or `""` when absent.
    pub fn value(&self, name: &str) -> &str {
        self.fields.iter()
            .find(|(k, _)| k == name)
            .map_or("", |(_, v)| v.as_str())
    }

    pub fn movie_fields(&self) -> MovieFields {
        MovieFields {
            isbn: self.value("isbn").to_owned(),
            title: self.value("title").to_owned(),
            synopsis: self.value("synopsis").to_owned(),
            director_first_name: self.value("directorfirstname").to_owned(),
            director_last_name: self.value("directorlastname").to_owned(),
        }
    }
}

/// `form_urlencoded` passes bad escapes through verbatim; reject them instead.
fn check_escapes(body: &str) -> Result<(), FormError> {
    let bytes = body.as_bytes();
    for (offset, _) in body.match_indices('%') {
        let valid = bytes.get(offset + 1..offset + 3)
            .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
        if !valid {
            return Err(FormError::MalformedEscape { offset });
        }
    }
    Ok(())
}
