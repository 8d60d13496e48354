// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use thiserror::Error;

pub mod linkedin;

/// 选择器解析错误
#[derive(Error, Debug)]
#[error("Invalid selector '{selector}': {message}")]
pub struct SelectorError {
    pub selector: String,
    pub message: String,
}

/// 解析CSS选择器
pub(crate) fn parse_selector(selector: &str) -> Result<scraper::Selector, SelectorError> {
    scraper::Selector::parse(selector).map_err(|e| SelectorError {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}
