//! Human-readable labels for state and qualification codes.

pub const ALL_INDIA: &str = "all-india";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Qualification {
    Tenth,
    Twelfth,
    Graduate,
    PostGraduate,
    Diploma,
}

impl Qualification {
    pub const ALL: [Qualification; 5] = [
        Qualification::Tenth,
        Qualification::Twelfth,
        Qualification::Graduate,
        Qualification::PostGraduate,
        Qualification::Diploma,
    ];

    /// Exact code lookup; anything outside the table is `None`.
    pub fn parse(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|q| q.code() == code)
    }

    pub fn code(self) -> &'static str {
        match self {
            Qualification::Tenth => "10th",
            Qualification::Twelfth => "12th",
            Qualification::Graduate => "graduate",
            Qualification::PostGraduate => "postgraduate",
            Qualification::Diploma => "diploma",
        }
    }

    /// Label shown on job cards and the filter summary.
    pub fn label(self) -> &'static str {
        match self {
            Qualification::Tenth => "10th Pass",
            Qualification::Twelfth => "12th Pass",
            Qualification::Graduate => "Graduate",
            Qualification::PostGraduate => "Post Graduate",
            Qualification::Diploma => "Diploma",
        }
    }

    /// Label offered as a search suggestion.
    pub fn suggestion(self) -> &'static str {
        match self {
            Qualification::Tenth => "10th pass jobs",
            Qualification::Twelfth => "12th pass jobs",
            Qualification::Graduate => "Graduate jobs",
            Qualification::PostGraduate => "Post Graduate jobs",
            Qualification::Diploma => "Diploma jobs",
        }
    }
}

/// Card label for a raw qualification code; unknown codes display unchanged.
pub fn qualification_label(code: &str) -> &str {
    match Qualification::parse(code) {
        Some(q) => q.label(),
        None => code,
    }
}

/// `all-india` becomes `All India`; other codes get a capital first letter and
/// spaces in place of hyphens.
pub fn state_label(state: &str) -> String {
    if state == ALL_INDIA {
        return "All India".to_string();
    }
    let mut chars = state.chars();
    match chars.next() {
        Some(first) => {
            let mut out: String = first.to_uppercase().collect();
            out.push_str(&chars.as_str().replace('-', " "));
            out
        }
        None => String::new(),
    }
}
