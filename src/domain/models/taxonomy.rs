// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::HashMap;
use tracing::warn;

/// 技能词条
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillTerm {
    /// 技能词（保留首次声明时的写法）
    pub skill: String,
    /// 所属分类
    pub tag: String,
}

/// 关键词分类体系
///
/// 技能词到分类的映射，每个技能词只属于一个分类。
/// 同一技能词在多个分类下声明时，以第一次声明为准，
/// 该规则在构建时执行，匹配阶段不再处理冲突。
/// 技能词比较不区分大小写。
#[derive(Debug, Clone, Default)]
pub struct KeywordTaxonomy {
    terms: Vec<SkillTerm>,
    tags: Vec<String>,
    by_skill: HashMap<String, usize>,
}

impl KeywordTaxonomy {
    /// 按声明顺序从 (分类, 技能词列表) 构建分类体系
    pub fn from_entries<I, T, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (T, Vec<S>)>,
        T: Into<String>,
        S: Into<String>,
    {
        let mut taxonomy = Self::default();
        for (tag, skills) in entries {
            let tag = tag.into();
            for skill in skills {
                taxonomy.register(&tag, skill.into());
            }
        }
        taxonomy
    }

    /// 注册技能词
    ///
    /// # 返回值
    ///
    /// 新注册时返回true；技能词为空或已在其他分类下注册时返回false
    pub fn register(&mut self, tag: &str, skill: String) -> bool {
        let skill = skill.trim().to_string();
        if skill.is_empty() {
            return false;
        }

        let key = skill.to_lowercase();
        if let Some(&existing) = self.by_skill.get(&key) {
            let owner = &self.terms[existing].tag;
            if owner != tag {
                warn!(
                    "Skill '{}' already registered under tag '{}', ignoring declaration under '{}'",
                    skill, owner, tag
                );
            }
            return false;
        }

        if !self.tags.iter().any(|t| t == tag) {
            self.tags.push(tag.to_string());
        }
        self.by_skill.insert(key, self.terms.len());
        self.terms.push(SkillTerm {
            skill,
            tag: tag.to_string(),
        });
        true
    }

    /// 技能词所属分类
    pub fn tag_of(&self, skill: &str) -> Option<&str> {
        self.by_skill
            .get(&skill.trim().to_lowercase())
            .map(|&i| self.terms[i].tag.as_str())
    }

    /// 按声明顺序遍历技能词
    pub fn terms(&self) -> &[SkillTerm] {
        &self.terms
    }

    /// 按首次出现顺序排列的分类
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}
