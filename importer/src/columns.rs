//! Resolution of loosely named spreadsheet columns onto job fields.

use serde_json::{Map, Value};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Organization,
    Posts,
    LastDate,
    State,
    Qualification,
    Category,
    AgeLimit,
    Salary,
    ApplicationFee,
    Eligibility,
    Syllabus,
    ExamPattern,
    ApplyLink,
    OfficialWebsite,
}

impl Field {
    pub const ALL: [Field; 15] = [
        Field::Title,
        Field::Organization,
        Field::Posts,
        Field::LastDate,
        Field::State,
        Field::Qualification,
        Field::Category,
        Field::AgeLimit,
        Field::Salary,
        Field::ApplicationFee,
        Field::Eligibility,
        Field::Syllabus,
        Field::ExamPattern,
        Field::ApplyLink,
        Field::OfficialWebsite,
    ];

    /// Header spellings seen in exported sheets, lower-case.
    pub fn variations(self) -> &'static [&'static str] {
        match self {
            Field::Title => &["title", "job title", "job_title", "post name", "post"],
            Field::Organization => &["organization", "organisation", "department", "company"],
            Field::Posts => &["posts", "vacancies", "vacancy", "no of posts", "total posts"],
            Field::LastDate => &["last date", "closing date", "end date", "deadline"],
            Field::State => &["state", "location", "place", "region"],
            Field::Qualification => &["qualification", "educational qualification", "eligibility", "education"],
            Field::Category => &["category", "type", "sector", "department type"],
            Field::AgeLimit => &["age limit", "age", "age criteria"],
            Field::Salary => &["salary", "pay scale", "pay", "remuneration"],
            Field::ApplicationFee => &["application fee", "fee", "registration fee"],
            Field::Eligibility => &["eligibility criteria", "eligibility", "requirements"],
            Field::Syllabus => &["syllabus", "exam syllabus", "subjects"],
            Field::ExamPattern => &["exam pattern", "selection process", "process"],
            Field::ApplyLink => &["apply link", "application link", "registration link", "link"],
            Field::OfficialWebsite => &["official website", "website", "portal"],
        }
    }
}

/// Which source key feeds each field for one row.
#[derive(Debug, Default)]
pub struct ColumnMap {
    keys: HashMap<Field, String>,
}

impl ColumnMap {
    /// A header naming a variation exactly wins; otherwise the first header
    /// containing any variation is used.
    pub fn for_row(row: &Map<String, Value>) -> Self {
        let headers: Vec<(String, &String)> = row.keys().map(|k| (k.trim().to_lowercase(), k)).collect();
        let mut keys = HashMap::new();
        for field in Field::ALL {
            let vars = field.variations();
            let exact = headers.iter().find(|(h, _)| vars.contains(&h.as_str()));
            let found = exact.or_else(|| headers.iter().find(|(h, _)| vars.iter().any(|v| h.contains(v))));
            if let Some((_, original)) = found {
                keys.insert(field, (*original).clone());
            }
        }
        Self { keys }
    }

    pub fn key(&self, field: Field) -> Option<&str> {
        self.keys.get(&field).map(String::as_str)
    }

    /// Trimmed cell text; null and blank cells count as missing.
    pub fn text(&self, row: &Map<String, Value>, field: Field) -> Option<String> {
        let value = row.get(self.key(field)?)?;
        let text = match value {
            Value::Null => return None,
            Value::String(s) => s.trim().to_string(),
            other => other.to_string(),
        };
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}
