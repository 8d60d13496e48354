// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::job::{is_not_found, JobRecord};
use crate::domain::models::taxonomy::KeywordTaxonomy;
use regex::{Regex, RegexBuilder};
use std::collections::{BTreeSet, HashSet};
use thiserror::Error;

/// 分类体系错误
#[derive(Error, Debug)]
pub enum TaxonomyError {
    /// 关键词无法编译为匹配模式
    #[error("Invalid term '{term}': {source}")]
    InvalidTerm {
        term: String,
        #[source]
        source: regex::Error,
    },
}

/// 整词匹配器
///
/// 词条两侧必须是文本边界或非单词字符，不区分大小写。
/// 词条可以包含标点（如 `make.com`、`c++`），
/// 词条中的空格可匹配描述中任意长度的空白。
#[derive(Debug, Clone)]
pub struct TermMatcher {
    term: String,
    pattern: Regex,
}

impl TermMatcher {
    pub fn new(term: &str) -> Result<Self, TaxonomyError> {
        let body = term
            .split_whitespace()
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join(r"\s+");
        let pattern = RegexBuilder::new(&format!(r"(?:^|\W){}(?:\W|$)", body))
            .case_insensitive(true)
            .build()
            .map_err(|source| TaxonomyError::InvalidTerm {
                term: term.to_string(),
                source,
            })?;

        Ok(Self {
            term: term.to_string(),
            pattern,
        })
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

/// 分类结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    /// 命中的过滤关键词，按配置顺序
    pub matched_filter_keywords: Vec<String>,
    /// 命中的技能词
    pub skill_hits: BTreeSet<String>,
}

/// 分类器
///
/// 将职位描述与过滤关键词列表和技能分类体系做整词匹配。
/// 匹配模式在构建时编译一次；分类是 (描述, 分类体系) 的纯函数。
#[derive(Debug, Clone)]
pub struct Classifier {
    filter_keywords: Vec<TermMatcher>,
    skills: Vec<TermMatcher>,
}

impl Classifier {
    /// 创建分类器
    ///
    /// 过滤关键词按不区分大小写去重，保留首次出现的写法和顺序
    pub fn new<S: AsRef<str>>(
        filter_keywords: &[S],
        taxonomy: &KeywordTaxonomy,
    ) -> Result<Self, TaxonomyError> {
        let mut seen = HashSet::new();
        let filter_keywords = filter_keywords
            .iter()
            .map(|k| k.as_ref().trim())
            .filter(|k| !k.is_empty() && seen.insert(k.to_lowercase()))
            .map(TermMatcher::new)
            .collect::<Result<Vec<_>, _>>()?;

        let skills = taxonomy
            .terms()
            .iter()
            .map(|t| TermMatcher::new(&t.skill))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            filter_keywords,
            skills,
        })
    }

    /// 对描述文本分类
    ///
    /// 描述为占位值时不命中任何词条
    pub fn classify(&self, description: &str) -> Classification {
        if is_not_found(description) {
            return Classification::default();
        }

        Classification {
            matched_filter_keywords: self
                .filter_keywords
                .iter()
                .filter(|m| m.is_match(description))
                .map(|m| m.term().to_string())
                .collect(),
            skill_hits: self
                .skills
                .iter()
                .filter(|m| m.is_match(description))
                .map(|m| m.term().to_string())
                .collect(),
        }
    }

    /// 对职位记录分类，返回填好匹配结果的记录
    pub fn apply(&self, mut record: JobRecord) -> JobRecord {
        let classification = self.classify(&record.description);
        record.matched_filter_keywords = classification.matched_filter_keywords;
        record.skill_hits = classification.skill_hits;
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn taxonomy() -> KeywordTaxonomy {
        KeywordTaxonomy::from_entries(vec![
            ("Data", vec!["data", "sql", "power bi"]),
            ("Automation", vec!["n8n", "make.com", "zapier"]),
            ("Programming", vec!["python", "c++"]),
        ])
    }

    fn classifier() -> Classifier {
        Classifier::new(&["Zapier", "make.com", "Data", "python"], &taxonomy()).unwrap()
    }

    #[test]
    fn test_whole_word_policy() {
        let classifier = classifier();

        let miss = classifier.classify("databases are great");
        assert!(!miss.skill_hits.contains("data"));
        assert!(miss.matched_filter_keywords.is_empty());

        let hit = classifier.classify("daily data pipelines");
        assert!(hit.skill_hits.contains("data"));
        assert_eq!(hit.matched_filter_keywords, vec!["Data"]);
    }

    #[test]
    fn test_case_insensitive_and_punctuated_terms() {
        let hits = classifier()
            .classify("We automate with Make.com, ZAPIER and N8N. C++ is a plus.")
            .skill_hits;

        let expected: BTreeSet<String> = ["make.com", "zapier", "n8n", "c++"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(hits, expected);
    }

    #[test]
    fn test_punctuated_term_requires_boundaries() {
        let hits = classifier().classify("see remake.com.au for details").skill_hits;
        assert!(!hits.contains("make.com"));
    }

    #[test]
    fn test_multi_word_terms_match_any_whitespace() {
        let hits = classifier()
            .classify("Dashboards in Power\n  BI and SQL")
            .skill_hits;
        assert!(hits.contains("power bi"));
        assert!(hits.contains("sql"));
    }

    #[test]
    fn test_filter_keywords_keep_configured_order() {
        let matched = classifier()
            .classify("python scripts feeding zapier; data everywhere")
            .matched_filter_keywords;
        assert_eq!(matched, vec!["Zapier", "Data", "python"]);
    }

    #[test]
    fn test_duplicate_filter_keywords_are_collapsed() {
        let classifier = Classifier::new(&["Data", "data", " DATA "], &taxonomy()).unwrap();
        assert_eq!(
            classifier.classify("data team").matched_filter_keywords,
            vec!["Data"]
        );
    }

    #[test]
    fn test_deterministic() {
        let classifier = classifier();
        let text = "Python and SQL for data quality, plus n8n";
        assert_eq!(classifier.classify(text), classifier.classify(text));
    }

    #[test]
    fn test_sentinel_description_matches_nothing() {
        let classifier = Classifier::new(&["Not Found", "found"], &taxonomy()).unwrap();
        assert_eq!(
            classifier.classify(crate::domain::models::job::NOT_FOUND),
            Classification::default()
        );
    }
}
