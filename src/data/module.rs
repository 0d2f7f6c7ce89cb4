// --- Файл: src/data/module.rs ---

//! Точка расширения для загрузчиков данных.

/// Маркер для модулей данных, которые предоставляет пользователь библиотеки.
///
/// Трейт не требует ни методов, ни ассоциированных типов.
pub trait DataModule {}
