// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use url::{ParseError, Url};

/// 默认的跟踪参数
pub const DEFAULT_TRACKING_PARAMS: &[&str] = &["refId", "trackingId", "trk", "position", "pageNum"];

/// 将可能为相对路径的URL转换为绝对路径URL
pub fn resolve_url(base_url: &Url, path: &str) -> Result<Url, ParseError> {
    base_url.join(path)
}

/// URL规范化器
///
/// 去掉不影响职位标识的跟踪参数，使只在跟踪参数上不同的链接合并为同一条
#[derive(Debug, Clone)]
pub struct UrlCanonicalizer {
    tracking_params: Vec<String>,
}

impl Default for UrlCanonicalizer {
    fn default() -> Self {
        Self::new(DEFAULT_TRACKING_PARAMS.iter().map(|p| p.to_string()))
    }
}

impl UrlCanonicalizer {
    /// 使用给定的跟踪参数列表创建规范化器
    ///
    /// 以 `utm_` 开头的参数始终被视为跟踪参数
    pub fn new<I>(tracking_params: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self {
            tracking_params: tracking_params
                .into_iter()
                .map(|p| p.trim().to_lowercase())
                .filter(|p| !p.is_empty())
                .collect(),
        }
    }

    fn is_tracking_param(&self, key: &str) -> bool {
        let key = key.to_lowercase();
        key.starts_with("utm_") || self.tracking_params.iter().any(|p| *p == key)
    }

    /// 规范化URL
    ///
    /// 去掉片段标识符和跟踪参数，保留其余参数的原有顺序，去掉非根路径末尾的斜杠。
    /// 无法解析的URL原样返回（去掉首尾空白）。
    pub fn canonicalize(&self, raw: &str) -> String {
        let raw = raw.trim();
        let mut url = match Url::parse(raw) {
            Ok(url) => url,
            Err(_) => return raw.to_string(),
        };

        url.set_fragment(None);

        let kept: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(k, _)| !self.is_tracking_param(k))
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        if kept.is_empty() {
            url.set_query(None);
        } else {
            url.query_pairs_mut().clear().extend_pairs(kept);
        }

        let path = url.path().to_string();
        if path.len() > 1 && path.ends_with('/') {
            url.set_path(path.trim_end_matches('/'));
        }

        url.to_string()
    }
}
