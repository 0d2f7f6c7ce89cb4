// --- Файл: src/data/transforms.rs ---

//! Преобразования батчей, выбираемые по тегу [`Desc`].

use super::desc::Desc;
use super::item::Item;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransformError {
    #[error("{0} получил пустой дескриптор. Передайте дескриптор при вызове или задайте его при создании.")]
    MissingDescriptor(String),

    #[error("{transform}: {items} элементов, но дескриптор длины {descriptor}")]
    LengthMismatch {
        transform: String,
        items: usize,
        descriptor: usize,
    },
}

pub type TransformResult<T> = std::result::Result<T, TransformError>;

/// Обработчик одного элемента.
pub type KindFn = Box<dyn Fn(&Item) -> Item + Send + Sync>;

/// Тождественный обработчик. Используется для тегов, которых нет в [`Kinds`].
pub fn noop(item: &Item) -> Item {
    item.clone()
}

/// Таблица диспетчеризации `Desc -> обработчик`.
#[derive(Default)]
pub struct Kinds {
    table: HashMap<Desc, KindFn>,
}

impl Kinds {
    /// Создает пустую таблицу (все элементы проходят без изменений).
    pub fn new() -> Self {
        Self::default()
    }

    /// Регистрирует обработчик для тега, заменяя прежний.
    pub fn with<F>(mut self, desc: Desc, func: F) -> Self
    where
        F: Fn(&Item) -> Item + Send + Sync + 'static,
    {
        self.table.insert(desc, Box::new(func));
        self
    }

    pub fn get(&self, desc: Desc) -> Option<&KindFn> {
        self.table.get(&desc)
    }

    pub fn contains(&self, desc: Desc) -> bool {
        self.table.contains_key(&desc)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl fmt::Debug for Kinds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<_> = self.table.keys().collect();
        keys.sort_by_key(|d| d.code());
        f.debug_set().entries(keys).finish()
    }
}

fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    // Параметры типа отбрасываются: `a::Wrap<b::Vec<u8>>` -> `Wrap`.
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

/// Трейт для преобразований батча.
///
/// Реализация объявляет таблицу [`Kinds`]; каждый элемент батча
/// обрабатывается функцией, выбранной по тегу из дескриптора.
/// Теги без обработчика оставляют элемент как есть.
pub trait Transform: Send + Sync {
    /// Таблица обработчиков по тегам.
    fn kinds(&self) -> &Kinds;

    /// Дескриптор по умолчанию, если он не передан при вызове.
    fn descriptor(&self) -> Option<&[Desc]> {
        None
    }

    /// Имя преобразования для сообщений об ошибках.
    fn name(&self) -> &str {
        short_type_name::<Self>()
    }

    /// Применяет обработчик тега `desc` к одному элементу.
    fn apply_item(&self, item: &Item, desc: Desc) -> Item {
        match self.kinds().get(desc) {
            Some(func) => func(item),
            None => noop(item),
        }
    }

    /// Применяет преобразование ко всему батчу.
    ///
    /// Пустой `descriptor` считается отсутствующим и заменяется
    /// дескриптором по умолчанию.
    fn apply(&self, items: &[Item], descriptor: Option<&[Desc]>) -> TransformResult<Vec<Item>> {
        let descriptor = descriptor
            .filter(|d| !d.is_empty())
            .or_else(|| self.descriptor())
            .filter(|d| !d.is_empty())
            .ok_or_else(|| TransformError::MissingDescriptor(self.name().to_string()))?;

        if items.len() != descriptor.len() {
            return Err(TransformError::LengthMismatch {
                transform: self.name().to_string(),
                items: items.len(),
                descriptor: descriptor.len(),
            });
        }

        Ok(items
            .iter()
            .zip(descriptor)
            .map(|(item, &desc)| self.apply_item(item, desc))
            .collect())
    }
}

/// Преобразование без обработчиков: возвращает копию батча.
#[derive(Debug, Default)]
pub struct Identity {
    kinds: Kinds,
    descriptor: Option<Vec<Desc>>,
}

impl Identity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_descriptor(descriptor: impl Into<Vec<Desc>>) -> Self {
        Self {
            kinds: Kinds::new(),
            descriptor: Some(descriptor.into()),
        }
    }
}

impl Transform for Identity {
    fn kinds(&self) -> &Kinds {
        &self.kinds
    }

    fn descriptor(&self) -> Option<&[Desc]> {
        self.descriptor.as_deref()
    }
}

/// Преобразование, собранное из замыканий.
///
/// ```rust,ignore
/// let invert = Lambda::new("Invert", Kinds::new().with(Desc::Image, |item| {
///     Item::F32(item.to_f32().mapv(|x| 1.0 - x))
/// }));
/// ```
#[derive(Debug)]
pub struct Lambda {
    name: String,
    kinds: Kinds,
    descriptor: Option<Vec<Desc>>,
}

impl Lambda {
    pub fn new(name: impl Into<String>, kinds: Kinds) -> Self {
        Self {
            name: name.into(),
            kinds,
            descriptor: None,
        }
    }

    /// Устанавливает дескриптор по умолчанию.
    pub fn with_descriptor(mut self, descriptor: impl Into<Vec<Desc>>) -> Self {
        self.descriptor = Some(descriptor.into());
        self
    }
}

impl Transform for Lambda {
    fn kinds(&self) -> &Kinds {
        &self.kinds
    }

    fn descriptor(&self) -> Option<&[Desc]> {
        self.descriptor.as_deref()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Переводит картинки из `[0, 255]` в `f32` из `[0, 1]`.
///
/// Сначала приведение к `f32`, потом деление на 255, поэтому
/// целочисленного усечения нет. Остальные теги не трогаются.
#[derive(Debug)]
pub struct ToFloat {
    kinds: Kinds,
    descriptor: Option<Vec<Desc>>,
}

impl ToFloat {
    /// Создает преобразование без дескриптора по умолчанию.
    pub fn new() -> Self {
        Self {
            kinds: Kinds::new().with(Desc::Image, Self::image_to_float),
            descriptor: None,
        }
    }

    /// Создает преобразование с дескриптором по умолчанию.
    pub fn with_descriptor(descriptor: impl Into<Vec<Desc>>) -> Self {
        Self {
            descriptor: Some(descriptor.into()),
            ..Self::new()
        }
    }

    pub fn image_to_float(item: &Item) -> Item {
        Item::F32(item.to_f32().mapv(|x| x / 255.0))
    }
}

impl Default for ToFloat {
    fn default() -> Self {
        Self::new()
    }
}

impl Transform for ToFloat {
    fn kinds(&self) -> &Kinds {
        &self.kinds
    }

    fn descriptor(&self) -> Option<&[Desc]> {
        self.descriptor.as_deref()
    }
}

/// Веерная композиция: каждое преобразование получает один и тот же
/// исходный батч, результаты собираются по порядку.
///
/// Выход одного преобразования НЕ передается следующему.
pub struct Compose {
    transforms: Vec<Box<dyn Transform>>,
}

impl Compose {
    /// Создает пустую композицию.
    pub fn new() -> Self {
        Self {
            transforms: Vec::new(),
        }
    }

    /// Создает композицию из списка преобразований.
    pub fn from_transforms(transforms: Vec<Box<dyn Transform>>) -> Self {
        Self { transforms }
    }

    /// Добавляет преобразование в композицию.
    pub fn add<T: Transform + 'static>(mut self, transform: T) -> Self {
        self.transforms.push(Box::new(transform));
        self
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    /// Применяет все преобразования к одному и тому же батчу.
    ///
    /// Пустой `descriptor` передается как есть, и каждое преобразование
    /// берет свой дескриптор по умолчанию.
    pub fn apply(&self, items: &[Item], descriptor: &[Desc]) -> TransformResult<Vec<Vec<Item>>> {
        self.transforms
            .iter()
            .map(|transform| transform.apply(items, Some(descriptor)))
            .collect()
    }
}

impl Default for Compose {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Compose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.transforms.iter().map(|t| t.name()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::ArrayD;

    fn image() -> Item {
        Item::from(vec![0u8, 128, 255])
    }

    #[test]
    fn test_to_float_scales_images() {
        let result = ToFloat::new()
            .apply(&[image()], Some(&[Desc::Image]))
            .unwrap();

        let expected = vec![0.0f32, 128.0 / 255.0, 1.0];
        assert_eq!(result[0].as_f32().unwrap().as_slice().unwrap(), &expected[..]);
        assert!((expected[1] - 0.501_960_8).abs() < 1e-6);
    }

    #[test]
    fn test_to_float_leaves_labels() {
        let items = [image(), Item::from(3i64)];
        let result = ToFloat::new()
            .apply(&items, Some(&[Desc::Image, Desc::Label]))
            .unwrap();

        assert_eq!(result[0].dtype_name(), "f32");
        assert_eq!(result[1], Item::from(3i64));
    }

    #[test]
    fn test_stored_descriptor_fallback() {
        let to_float = ToFloat::with_descriptor([Desc::Image]);

        let implicit = to_float.apply(&[image()], None).unwrap();
        let empty = to_float.apply(&[image()], Some(&[])).unwrap();
        assert_eq!(implicit, empty);
        assert_eq!(implicit[0].dtype_name(), "f32");

        // Дескриптор вызова важнее дескриптора по умолчанию.
        let explicit = to_float.apply(&[image()], Some(&[Desc::Label])).unwrap();
        assert_eq!(explicit[0], image());
    }

    #[test]
    fn test_missing_descriptor_names_transform() {
        let err = ToFloat::new().apply(&[image()], None).unwrap_err();
        assert_eq!(err, TransformError::MissingDescriptor("ToFloat".to_string()));
        assert!(err.to_string().contains("ToFloat"));

        let err = Lambda::new("Custom", Kinds::new()).apply(&[], Some(&[])).unwrap_err();
        assert_eq!(err, TransformError::MissingDescriptor("Custom".to_string()));
    }

    #[test]
    fn test_length_mismatch() {
        let err = Identity::new()
            .apply(&[image()], Some(&[Desc::Image, Desc::Label]))
            .unwrap_err();

        assert_eq!(
            err,
            TransformError::LengthMismatch {
                transform: "Identity".to_string(),
                items: 1,
                descriptor: 2,
            }
        );
    }

    #[test]
    fn test_identity_for_undeclared_kinds() {
        let double = Lambda::new(
            "Double",
            Kinds::new().with(Desc::Label, |item| Item::F32(item.to_f32().mapv(|x| x * 2.0))),
        );

        let img = Item::from(ArrayD::<u8>::ones(ndarray::IxDyn(&[2, 2])));
        assert_eq!(double.apply_item(&img, Desc::Image), img);
        assert_eq!(
            double.apply_item(&Item::from(4i64), Desc::Label),
            Item::F32(ndarray::arr0(8.0f32).into_dyn())
        );
    }

    #[test]
    fn test_compose_fans_out() {
        let add_one = Lambda::new(
            "AddOne",
            Kinds::new().with(Desc::Image, |item| Item::F32(item.to_f32().mapv(|x| x + 1.0))),
        );
        let compose = Compose::new().add(ToFloat::new()).add(add_one);
        let items = [Item::from(vec![0u8, 255])];

        let result = compose.apply(&items, &[Desc::Image]).unwrap();

        assert_eq!(result.len(), 2);
        // Второе преобразование видит исходные байты, а не выход ToFloat.
        assert_eq!(result[0], vec![Item::from(vec![0.0f32, 1.0])]);
        assert_eq!(result[1], vec![Item::from(vec![1.0f32, 256.0])]);
    }

    #[test]
    fn test_compose_propagates_error() {
        let compose = Compose::new().add(Identity::new()).add(ToFloat::new());
        let err = compose.apply(&[image()], &[]).unwrap_err();
        assert_eq!(err, TransformError::MissingDescriptor("Identity".to_string()));
    }

    #[test]
    fn test_debug_output() {
        let compose = Compose::new().add(ToFloat::new()).add(Lambda::new("Mine", Kinds::new()));
        assert_eq!(format!("{:?}", compose), r#"["ToFloat", "Mine"]"#);
        assert_eq!(format!("{:?}", ToFloat::new().kinds()), "{Image}");
    }

    #[test]
    fn test_generic_transform_name() {
        struct Wrap<T> {
            kinds: Kinds,
            _inner: std::marker::PhantomData<fn() -> T>,
        }

        impl<T> Transform for Wrap<T> {
            fn kinds(&self) -> &Kinds {
                &self.kinds
            }
        }

        let wrap = Wrap::<Vec<u8>> {
            kinds: Kinds::new(),
            _inner: std::marker::PhantomData,
        };
        assert_eq!(wrap.name(), "Wrap");

        let err = wrap.apply(&[Item::from(1i64)], None).unwrap_err();
        assert_eq!(err, TransformError::MissingDescriptor("Wrap".to_string()));
    }

    #[test]
    fn test_kinds_table() {
        let kinds = Kinds::new().with(Desc::Image, noop).with(Desc::Image, noop);
        assert_eq!(kinds.len(), 1);
        assert!(kinds.contains(Desc::Image));
        assert!(!kinds.contains(Desc::Label));
        assert!(Kinds::new().is_empty());
    }
}
