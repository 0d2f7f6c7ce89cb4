// --- Файл: src/data/item.rs ---

//! Значения, из которых состоит батч.

use ndarray::{arr0, Array1, ArrayD};

/// Один позиционный элемент батча.
///
/// Картинки обычно приходят как `U8`, метки классов как `I64`,
/// а результат нормализации всегда `F32`.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    U8(ArrayD<u8>),
    I64(ArrayD<i64>),
    F32(ArrayD<f32>),
}

impl Item {
    /// Приводит элемент к `f32` без масштабирования.
    ///
    /// Для `I64` приведение с потерями: значения больше 2^24 по модулю
    /// округляются до ближайшего представимого `f32`.
    pub fn to_f32(&self) -> ArrayD<f32> {
        match self {
            Item::U8(a) => a.mapv(f32::from),
            Item::I64(a) => a.mapv(|x| x as f32),
            Item::F32(a) => a.clone(),
        }
    }

    pub fn shape(&self) -> &[usize] {
        match self {
            Item::U8(a) => a.shape(),
            Item::I64(a) => a.shape(),
            Item::F32(a) => a.shape(),
        }
    }

    /// Количество скалярных значений в элементе.
    pub fn len(&self) -> usize {
        self.shape().iter().product()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn dtype_name(&self) -> &'static str {
        match self {
            Item::U8(_) => "u8",
            Item::I64(_) => "i64",
            Item::F32(_) => "f32",
        }
    }

    /// Возвращает массив, если элемент уже в `f32`.
    pub fn as_f32(&self) -> Option<&ArrayD<f32>> {
        match self {
            Item::F32(a) => Some(a),
            _ => None,
        }
    }
}

impl From<ArrayD<u8>> for Item {
    fn from(a: ArrayD<u8>) -> Self {
        Item::U8(a)
    }
}

impl From<ArrayD<i64>> for Item {
    fn from(a: ArrayD<i64>) -> Self {
        Item::I64(a)
    }
}

impl From<ArrayD<f32>> for Item {
    fn from(a: ArrayD<f32>) -> Self {
        Item::F32(a)
    }
}

impl From<Vec<u8>> for Item {
    fn from(v: Vec<u8>) -> Self {
        Item::U8(Array1::from(v).into_dyn())
    }
}

impl From<Vec<i64>> for Item {
    fn from(v: Vec<i64>) -> Self {
        Item::I64(Array1::from(v).into_dyn())
    }
}

impl From<Vec<f32>> for Item {
    fn from(v: Vec<f32>) -> Self {
        Item::F32(Array1::from(v).into_dyn())
    }
}

/// Скалярная метка класса.
impl From<i64> for Item {
    fn from(label: i64) -> Self {
        Item::I64(arr0(label).into_dyn())
    }
}
