//! 表单校验模块
//!
//! 提交前的字段级校验（必填、长度、格式、跨字段规则）。
//! 校验失败时不会发出任何网络请求。

use std::fmt;
use validator::{Validate, ValidationErrors};

/// 跨字段（schema 级）规则在 validator 中使用的键
const SCHEMA_FIELD: &str = "__all__";
/// 对外暴露的表单级错误键
pub const FORM_FIELD: &str = "form";

/// 字段 -> 第一条错误消息，按字段名排序
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: Vec<(String, String)>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一条错误（如表单输入无法解析）；同一字段只保留第一条
    pub fn add(&mut self, field: &str, message: &str) {
        if self.message_for(field).is_some() {
            return;
        }
        self.errors.push((field.to_string(), message.to_string()));
        self.errors.sort();
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors.iter().map(|(f, m)| (f.as_str(), m.as_str()))
    }

    /// 指定字段的错误消息
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|(f, _)| f == field)
            .map(|(_, m)| m.as_str())
    }

    /// 第一条错误，用于只显示一条提示的简单表单
    pub fn first(&self) -> Option<&str> {
        self.errors.first().map(|(_, m)| m.as_str())
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut collected: Vec<(String, String)> = errors
            .field_errors()
            .into_iter()
            .filter_map(|(field, errs)| {
                let first = errs.first()?;
                let message = first
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value ({})", first.code));
                let field = if field == SCHEMA_FIELD {
                    FORM_FIELD.to_string()
                } else {
                    field.to_string()
                };
                Some((field, message))
            })
            .collect();
        collected.sort();
        Self { errors: collected }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .errors
            .iter()
            .map(|(_, m)| m.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        f.write_str(&joined)
    }
}

impl std::error::Error for FieldErrors {}

/// 校验表单数据
pub fn validate_form<T: Validate>(form: &T) -> Result<(), FieldErrors> {
    form.validate().map_err(FieldErrors::from)
}
