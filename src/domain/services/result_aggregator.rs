// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::job::JobRecord;
use crate::domain::models::skill_count::SkillCountRow;
use crate::domain::models::table::Table;
use crate::domain::models::taxonomy::KeywordTaxonomy;
use crate::domain::repositories::sink_repository::{SinkError, SinkRepository};
use chrono::NaiveDate;
use tracing::info;

/// 职位表表头
pub const JOB_HEADER: [&str; 7] = [
    "Date",
    "Title",
    "Company",
    "Location",
    "Link",
    "SearchedKeyword",
    "FoundKeywords",
];

/// 技能计数表表头
pub const SKILL_COUNT_HEADER: [&str; 4] = ["Date", "Tag", "Skill", "Count"];

/// 运行日期格式
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// 输出表名
#[derive(Debug, Clone)]
pub struct TableNames {
    pub jobs: String,
    pub matched_jobs: String,
    pub skill_counts: String,
}

impl Default for TableNames {
    fn default() -> Self {
        Self {
            jobs: "jobs".to_string(),
            matched_jobs: "matched_jobs".to_string(),
            skill_counts: "skill_counts".to_string(),
        }
    }
}

/// 汇总结果
#[derive(Debug, Clone)]
pub struct ScanResults {
    /// 全部职位
    pub jobs: Table,
    /// 命中过滤关键词的职位
    pub matched_jobs: Table,
    /// 技能计数
    pub skill_counts: Table,
    /// 技能计数行，与 `skill_counts` 表逐行对应
    pub skill_rows: Vec<SkillCountRow>,
}

/// 结果汇总器
///
/// 由分类后的职位记录生成职位表、命中职位表和技能计数表，并写入结果存储
pub struct ResultAggregator {
    taxonomy: KeywordTaxonomy,
    names: TableNames,
    include_zero_counts: bool,
}

impl ResultAggregator {
    pub fn new(taxonomy: KeywordTaxonomy, names: TableNames, include_zero_counts: bool) -> Self {
        Self {
            taxonomy,
            names,
            include_zero_counts,
        }
    }

    /// 统计每个技能词命中的不同职位数
    ///
    /// 按分类体系的声明顺序输出
    pub fn skill_counts(&self, records: &[JobRecord], date: NaiveDate) -> Vec<SkillCountRow> {
        self.taxonomy
            .terms()
            .iter()
            .map(|term| SkillCountRow {
                date,
                tag: term.tag.clone(),
                skill: term.skill.clone(),
                count: records
                    .iter()
                    .filter(|r| r.skill_hits.contains(&term.skill))
                    .count(),
            })
            .filter(|row| self.include_zero_counts || row.count > 0)
            .collect()
    }

    fn job_row(record: &JobRecord) -> Vec<String> {
        vec![
            record.date.format(DATE_FORMAT).to_string(),
            record.title.clone(),
            record.company.clone(),
            record.location.clone(),
            record.url.clone(),
            record.origin_query.keyword.clone(),
            record.matched_filter_keywords.join(", "),
        ]
    }

    fn job_table<'a, I>(name: &str, records: I) -> Table
    where
        I: IntoIterator<Item = &'a JobRecord>,
    {
        let mut table = Table::new(name, &JOB_HEADER);
        for record in records {
            table.push_row(Self::job_row(record));
        }
        table
    }

    /// 汇总职位记录
    ///
    /// # 参数
    ///
    /// * `records` - 按规范顺序排列且已分类的职位记录
    /// * `date` - 运行日期
    pub fn aggregate(&self, records: &[JobRecord], date: NaiveDate) -> ScanResults {
        let jobs = Self::job_table(&self.names.jobs, records);
        let matched_jobs = Self::job_table(
            &self.names.matched_jobs,
            records.iter().filter(|r| r.has_filter_match()),
        );

        let skill_rows = self.skill_counts(records, date);
        let mut skill_counts = Table::new(&self.names.skill_counts, &SKILL_COUNT_HEADER);
        for row in &skill_rows {
            skill_counts.push_row(vec![
                row.date.format(DATE_FORMAT).to_string(),
                row.tag.clone(),
                row.skill.clone(),
                row.count.to_string(),
            ]);
        }

        ScanResults {
            jobs,
            matched_jobs,
            skill_counts,
            skill_rows,
        }
    }

    /// 写入结果存储
    ///
    /// 职位表和命中职位表整体覆盖，技能计数表追加
    pub async fn deliver(
        &self,
        results: &ScanResults,
        sink: &dyn SinkRepository,
    ) -> Result<(), SinkError> {
        sink.overwrite(&results.jobs).await?;
        sink.overwrite(&results.matched_jobs).await?;
        sink.append(&results.skill_counts).await?;

        info!(
            "Wrote {} jobs, {} matched jobs, {} skill counts",
            results.jobs.len(),
            results.matched_jobs.len(),
            results.skill_counts.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::job::{JobDetail, NOT_FOUND};
    use crate::domain::models::query::Query;
    use crate::domain::services::classifier::Classifier;
    use crate::infrastructure::sinks::memory_sink::MemorySink;
    use std::collections::BTreeSet;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    }

    fn taxonomy() -> KeywordTaxonomy {
        KeywordTaxonomy::from_entries(vec![
            ("Programming", vec!["python", "rust"]),
            ("Data", vec!["sql"]),
        ])
    }

    fn record(url: &str, filters: &[&str], skills: &[&str]) -> JobRecord {
        let mut record = JobRecord::from_detail(
            url.to_string(),
            Query::new("AI", "Worldwide"),
            JobDetail {
                title: "Engineer".to_string(),
                company: "Acme".to_string(),
                location: NOT_FOUND.to_string(),
                description: "...".to_string(),
            },
            date(),
        );
        record.matched_filter_keywords = filters.iter().map(|s| s.to_string()).collect();
        record.skill_hits = skills.iter().map(|s| s.to_string()).collect::<BTreeSet<_>>();
        record
    }

    fn records() -> Vec<JobRecord> {
        vec![
            record("https://j/1", &["Python", "SQL"], &["python", "sql"]),
            record("https://j/2", &[], &["python"]),
            record("https://j/3", &["SQL"], &[]),
        ]
    }

    #[test]
    fn test_counts_distinct_jobs_per_skill() {
        let aggregator = ResultAggregator::new(taxonomy(), TableNames::default(), true);

        let rows = aggregator.skill_counts(&records(), date());

        let counts: Vec<(&str, &str, usize)> = rows
            .iter()
            .map(|r| (r.tag.as_str(), r.skill.as_str(), r.count))
            .collect();
        assert_eq!(
            counts,
            vec![
                ("Programming", "python", 2),
                ("Programming", "rust", 0),
                ("Data", "sql", 1),
            ]
        );
    }

    #[test]
    fn test_repeated_mentions_count_once_per_job() {
        let taxonomy = taxonomy();
        let classifier = Classifier::new(&["SQL"], &taxonomy).unwrap();
        let aggregator = ResultAggregator::new(taxonomy, TableNames::default(), true);
        let job = |url: &str, description: &str| {
            let mut record = record(url, &[], &[]);
            record.description = description.to_string();
            classifier.apply(record)
        };

        let records = vec![
            job("https://j/1", "Python, python and more PYTHON. Python!"),
            job("https://j/2", "python scripts; python services; sql"),
            job("https://j/3", "No scripting here"),
        ];
        let rows = aggregator.skill_counts(&records, date());

        let python = rows.iter().find(|r| r.skill == "python").unwrap();
        let sql = rows.iter().find(|r| r.skill == "sql").unwrap();
        assert_eq!(python.count, 2);
        assert_eq!(sql.count, 1);
        assert_eq!(records[1].matched_filter_keywords, vec!["SQL"]);
    }

    #[test]
    fn test_zero_counts_can_be_omitted() {
        let aggregator = ResultAggregator::new(taxonomy(), TableNames::default(), false);
        let rows = aggregator.skill_counts(&records(), date());
        assert!(rows.iter().all(|r| r.skill != "rust"));
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_job_tables() {
        let aggregator = ResultAggregator::new(taxonomy(), TableNames::default(), true);

        let results = aggregator.aggregate(&records(), date());

        assert_eq!(results.jobs.header, JOB_HEADER);
        assert_eq!(results.jobs.len(), 3);
        assert_eq!(
            results.jobs.rows[0],
            vec![
                "2025-03-14",
                "Engineer",
                "Acme",
                "Not Found",
                "https://j/1",
                "AI",
                "Python, SQL"
            ]
        );

        let matched: Vec<&str> = results
            .matched_jobs
            .rows
            .iter()
            .map(|r| r[4].as_str())
            .collect();
        assert_eq!(matched, vec!["https://j/1", "https://j/3"]);
        assert_eq!(results.skill_counts.rows[0], vec!["2025-03-14", "Programming", "python", "2"]);
    }

    #[tokio::test]
    async fn test_deliver_overwrites_jobs_and_appends_counts() {
        let aggregator = ResultAggregator::new(taxonomy(), TableNames::default(), true);
        let sink = MemorySink::new();

        let results = aggregator.aggregate(&records(), date());
        aggregator.deliver(&results, &sink).await.unwrap();
        aggregator.deliver(&results, &sink).await.unwrap();

        assert_eq!(sink.table("jobs").unwrap().len(), 3);
        assert_eq!(sink.table("matched_jobs").unwrap().len(), 2);
        assert_eq!(sink.table("skill_counts").unwrap().len(), 6);
    }
}
