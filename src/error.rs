use std::{fmt, io, string::FromUtf8Error};

use serde::{Deserialize, Serialize};
use serde_json::Error as JsonError;
use serde_yaml::Error as YamlError;
use thiserror::Error;
use zip::result::ZipError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
pub enum NotegraphError {
    #[error("Archive error: {0}")]
    Archive(String),
    #[error("Notegraph codec software error: {0}")]
    Codec(String),
    #[error("File System error: {0}")]
    Io(String),
    #[error("Item Not Found: {0}")]
    NotFound(String),
    #[error("You do not have permission to access this resource")]
    PermissionDenied,
    #[error("(De)Serialization error: {0}")]
    Serialization(String),
}

impl From<io::Error> for NotegraphError {
    fn from(x: io::Error) -> Self {
        match x.kind() {
            io::ErrorKind::NotFound => NotegraphError::NotFound(format!("{x}")),
            io::ErrorKind::PermissionDenied => NotegraphError::PermissionDenied,
            _ => NotegraphError::Io(format!("IOError: {}", x.kind())),
        }
    }
}

impl From<ZipError> for NotegraphError {
    fn from(src: ZipError) -> NotegraphError {
        NotegraphError::Archive(format!("Zip archive read failed: {src}"))
    }
}

impl From<FromUtf8Error> for NotegraphError {
    fn from(src: FromUtf8Error) -> NotegraphError {
        NotegraphError::Archive(format!("Archive entry is not valid UTF-8: {src}"))
    }
}

impl From<YamlError> for NotegraphError {
    fn from(src: YamlError) -> NotegraphError {
        NotegraphError::Serialization(format!("Yaml deserialization error: {src}"))
    }
}

impl From<JsonError> for NotegraphError {
    fn from(src: JsonError) -> NotegraphError {
        NotegraphError::Serialization(format!("JSON (de)serialization error: {src}"))
    }
}

impl From<fmt::Error> for NotegraphError {
    fn from(x: fmt::Error) -> Self {
        NotegraphError::Codec(format!("{x}"))
    }
}
