use serde::Deserialize;
use time::{Date, OffsetDateTime};

/// Body for creating or replacing a meal. Both fields are optional: a
/// blank or missing name becomes "Meal" and a missing date becomes today
/// (UTC).
#[derive(Debug, Deserialize)]
pub struct MealInput {
    pub name: Option<String>,
    pub date: Option<Date>,
}

impl MealInput {
    pub fn normalize(self) -> (String, Date) {
        let name = match self.name {
            Some(name) if !name.trim().is_empty() => name.trim().to_string(),
            _ => "Meal".to_string(),
        };
        let date = self.date.unwrap_or_else(|| OffsetDateTime::now_utc().date());
        (name, date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn keeps_explicit_fields() {
        let (name, date) = MealInput {
            name: Some("Breakfast".into()),
            date: Some(date!(2026 - 08 - 01)),
        }
        .normalize();
        assert_eq!(name, "Breakfast");
        assert_eq!(date, date!(2026 - 08 - 01));
    }

    #[test]
    fn blank_name_falls_back_to_meal() {
        let (name, _) = MealInput {
            name: Some("   ".into()),
            date: Some(date!(2026 - 08 - 01)),
        }
        .normalize();
        assert_eq!(name, "Meal");
    }

    #[test]
    fn missing_date_falls_back_to_today_utc() {
        let before = OffsetDateTime::now_utc().date();
        let (_, date) = MealInput { name: None, date: None }.normalize();
        let after = OffsetDateTime::now_utc().date();
        assert!(date == before || date == after);
    }
}
