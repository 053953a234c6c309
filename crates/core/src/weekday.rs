//! Weekday labels and the tokens that spell them.

use ovenlog_sheet::CellValue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Day of the week resolved from a header cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayLabel {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
    /// Blank before the first label, or text that is not a weekday
    Unknown,
}

/// Recognized spellings. Matching is exact after trimming whitespace.
const DAY_TOKENS: &[(&str, DayLabel)] = &[
    // Korean
    ("월", DayLabel::Mon),
    ("화", DayLabel::Tue),
    ("수", DayLabel::Wed),
    ("목", DayLabel::Thu),
    ("금", DayLabel::Fri),
    ("토", DayLabel::Sat),
    ("일", DayLabel::Sun),
    ("월요일", DayLabel::Mon),
    ("화요일", DayLabel::Tue),
    ("수요일", DayLabel::Wed),
    ("목요일", DayLabel::Thu),
    ("금요일", DayLabel::Fri),
    ("토요일", DayLabel::Sat),
    ("일요일", DayLabel::Sun),
    // English
    ("Mon", DayLabel::Mon),
    ("Tue", DayLabel::Tue),
    ("Wed", DayLabel::Wed),
    ("Thu", DayLabel::Thu),
    ("Fri", DayLabel::Fri),
    ("Sat", DayLabel::Sat),
    ("Sun", DayLabel::Sun),
    ("MON", DayLabel::Mon),
    ("TUE", DayLabel::Tue),
    ("WED", DayLabel::Wed),
    ("THU", DayLabel::Thu),
    ("FRI", DayLabel::Fri),
    ("SAT", DayLabel::Sat),
    ("SUN", DayLabel::Sun),
    ("Monday", DayLabel::Mon),
    ("Tuesday", DayLabel::Tue),
    ("Wednesday", DayLabel::Wed),
    ("Thursday", DayLabel::Thu),
    ("Friday", DayLabel::Fri),
    ("Saturday", DayLabel::Sat),
    ("Sunday", DayLabel::Sun),
    // Japanese
    ("月", DayLabel::Mon),
    ("火", DayLabel::Tue),
    ("水", DayLabel::Wed),
    ("木", DayLabel::Thu),
    ("金", DayLabel::Fri),
    ("土", DayLabel::Sat),
    ("日", DayLabel::Sun),
    ("月曜日", DayLabel::Mon),
    ("火曜日", DayLabel::Tue),
    ("水曜日", DayLabel::Wed),
    ("木曜日", DayLabel::Thu),
    ("金曜日", DayLabel::Fri),
    ("土曜日", DayLabel::Sat),
    ("日曜日", DayLabel::Sun),
    // Chinese
    ("周一", DayLabel::Mon),
    ("周二", DayLabel::Tue),
    ("周三", DayLabel::Wed),
    ("周四", DayLabel::Thu),
    ("周五", DayLabel::Fri),
    ("周六", DayLabel::Sat),
    ("周日", DayLabel::Sun),
    ("星期一", DayLabel::Mon),
    ("星期二", DayLabel::Tue),
    ("星期三", DayLabel::Wed),
    ("星期四", DayLabel::Thu),
    ("星期五", DayLabel::Fri),
    ("星期六", DayLabel::Sat),
    ("星期日", DayLabel::Sun),
];

impl DayLabel {
    /// The seven days, Monday first.
    pub const WEEK: [DayLabel; 7] = [
        DayLabel::Mon,
        DayLabel::Tue,
        DayLabel::Wed,
        DayLabel::Thu,
        DayLabel::Fri,
        DayLabel::Sat,
        DayLabel::Sun,
    ];

    /// Resolve a free-text token. Unrecognized text is `Unknown`.
    #[must_use]
    pub fn from_token(text: &str) -> DayLabel {
        let text = text.trim();
        DAY_TOKENS
            .iter()
            .find(|(token, _)| *token == text)
            .map_or(DayLabel::Unknown, |(_, label)| *label)
    }

    /// Resolve a header cell. Only text cells can name a day.
    #[must_use]
    pub fn from_cell(cell: &CellValue) -> DayLabel {
        cell.as_text().map_or(DayLabel::Unknown, DayLabel::from_token)
    }

    /// Monday through Friday
    #[must_use]
    pub fn is_weekday(self) -> bool {
        matches!(
            self,
            DayLabel::Mon | DayLabel::Tue | DayLabel::Wed | DayLabel::Thu | DayLabel::Fri
        )
    }

    /// Saturday or Sunday
    #[must_use]
    pub fn is_weekend(self) -> bool {
        matches!(self, DayLabel::Sat | DayLabel::Sun)
    }

    #[must_use]
    pub fn is_known(self) -> bool {
        self != DayLabel::Unknown
    }
}

impl fmt::Display for DayLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DayLabel::Mon => "Mon",
            DayLabel::Tue => "Tue",
            DayLabel::Wed => "Wed",
            DayLabel::Thu => "Thu",
            DayLabel::Fri => "Fri",
            DayLabel::Sat => "Sat",
            DayLabel::Sun => "Sun",
            DayLabel::Unknown => "?",
        };
        write!(f, "{name}")
    }
}
