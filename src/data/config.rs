// --- Файл: src/data/config.rs ---

//! Конфигурация композиции преобразований.
//!
//! Пример JSON:
//!
//! ```json
//! { "descriptor": ["image", "label"], "transforms": ["to_float", "identity"] }
//! ```

use super::desc::Desc;
use super::transforms::{Compose, Identity, ToFloat, Transform};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Ошибка JSON: {0}")]
    Json(#[from] serde_json::Error),
}

type Result<T> = std::result::Result<T, ConfigError>;

/// Имена встроенных преобразований.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformName {
    ToFloat,
    Identity,
}

impl TransformName {
    fn build(self, descriptor: Option<&[Desc]>) -> Box<dyn Transform> {
        match (self, descriptor) {
            (TransformName::ToFloat, Some(d)) => Box::new(ToFloat::with_descriptor(d)),
            (TransformName::ToFloat, None) => Box::new(ToFloat::new()),
            (TransformName::Identity, Some(d)) => Box::new(Identity::with_descriptor(d)),
            (TransformName::Identity, None) => Box::new(Identity::new()),
        }
    }
}

/// Описание веерной композиции.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComposeConfig {
    /// Дескриптор по умолчанию для всех преобразований
    #[serde(default)]
    pub descriptor: Option<Vec<Desc>>,
    /// Преобразования в порядке выдачи результатов
    #[serde(default)]
    pub transforms: Vec<TransformName>,
}

impl ComposeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Устанавливает дескриптор по умолчанию
    pub fn with_descriptor(mut self, descriptor: impl Into<Vec<Desc>>) -> Self {
        self.descriptor = Some(descriptor.into());
        self
    }

    /// Добавляет преобразование
    pub fn with_transform(mut self, name: TransformName) -> Self {
        self.transforms.push(name);
        self
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Собирает [`Compose`]; дескриптор становится значением по умолчанию
    /// у каждого преобразования.
    pub fn build(&self) -> Compose {
        let descriptor = self.descriptor.as_deref();
        Compose::from_transforms(
            self.transforms
                .iter()
                .map(|name| name.build(descriptor))
                .collect(),
        )
    }
}
