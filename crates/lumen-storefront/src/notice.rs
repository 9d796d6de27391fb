//! Transient user-facing messages.

use lumen_commerce::catalog::Product;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A dismissible message, shown once and then forgotten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Notice {
    pub fn info(title: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            title: title.into(),
            description: None,
        }
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: title.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }

    pub fn added_to_cart(product: &Product) -> Self {
        Self::info("Добавлено в корзину").with_description(product.name.clone())
    }

    pub fn products_unavailable() -> Self {
        Self::error("Ошибка загрузки").with_description("Не удалось загрузить товары")
    }

    pub fn signed_out() -> Self {
        Self::info("Вы вышли из аккаунта")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_commerce::catalog::Category;
    use lumen_commerce::{Money, ProductId};

    #[test]
    fn test_added_to_cart_names_product() {
        let lamp = Product::new(ProductId::new(1), "Бра Loft", Category::Wall, Money::from_major(3000));
        let notice = Notice::added_to_cart(&lamp);
        assert!(!notice.is_error());
        assert_eq!(notice.description.as_deref(), Some("Бра Loft"));
    }

    #[test]
    fn test_fetch_failure_is_error() {
        let notice = Notice::products_unavailable();
        assert!(notice.is_error());
        assert_eq!(notice.title, "Ошибка загрузки");
    }
}
