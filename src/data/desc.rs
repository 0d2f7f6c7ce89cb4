// --- Файл: src/data/desc.rs ---

//! Семантические теги позиций в батче.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Вид элемента батча. Используется как ключ таблицы [`Kinds`](super::transforms::Kinds).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Desc {
    Image = 1,
    Label = 2,
}

impl Desc {
    /// Числовой код тега.
    pub fn code(self) -> u8 {
        self as u8
    }

    fn as_str(self) -> &'static str {
        match self {
            Desc::Image => "image",
            Desc::Label => "label",
        }
    }
}

impl fmt::Display for Desc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("Неизвестный тег дескриптора: '{0}'")]
pub struct ParseDescError(pub String);

impl FromStr for Desc {
    type Err = ParseDescError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "image" => Ok(Desc::Image),
            "label" => Ok(Desc::Label),
            _ => Err(ParseDescError(s.to_string())),
        }
    }
}
