use serde::Serialize;

use crate::xref;

/// Habits parsed from one slash-delimited fish table value. Line-caught fish
/// use the full 14-field form; trap-caught fish use a short form that only
/// yields a size range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FishHabits {
    pub time: String,
    pub seasons: String,
    pub weather: String,
    pub difficulty: String,
    pub behavior: String,
    pub size: String,
    pub min_fishing_level: String,
}

impl Default for FishHabits {
    fn default() -> Self {
        Self {
            time: "any".to_string(),
            seasons: "any".to_string(),
            weather: "any".to_string(),
            difficulty: "0".to_string(),
            behavior: "0".to_string(),
            size: String::new(),
            min_fishing_level: "0".to_string(),
        }
    }
}

impl FishHabits {
    pub fn parse(raw: &str) -> Self {
        let fields: Vec<&str> = raw.split('/').collect();
        let mut habits = FishHabits::default();

        if fields.len() == 14 {
            habits.time = render_clock(fields[5]);
            habits.seasons = render_seasons(fields[6]);
            habits.weather = fields[7].replace("both", "any");
            habits.difficulty = fields[1].to_string();
            habits.behavior = fields[2].to_string();
            habits.size = render_line_size(fields[3], fields[4]);
            habits.min_fishing_level = fields[fields.len() - 2].to_string();
        } else {
            // Trap-caught form: only the size range is declared.
            let min = fields.get(5).copied().unwrap_or_default();
            let max = fields.get(6).copied().unwrap_or_default();
            habits.size = format!("{min}-{max}");
        }

        habits
    }
}

/// The source's maximum size is exclusive; display it inclusive.
fn render_line_size(min: &str, max: &str) -> String {
    match max.parse::<i64>() {
        Ok(max) => format!("{min}-{}", max + 1),
        Err(_) => format!("{min}-{max}"),
    }
}

/// Season field is a space-separated lowercase list; the complete list
/// collapses to "any"-style shorthand, subsets render as season templates.
fn render_seasons(field: &str) -> String {
    let seasons: Vec<String> = field.split_whitespace().map(str::to_string).collect();
    if xref::is_all_seasons(seasons.iter().map(String::as_str)) {
        return "all".to_string();
    }
    if seasons.len() == 1 {
        return seasons[0].clone();
    }
    xref::render_seasons(&seasons)
}

/// Time windows come as pairs of 26-hour clock values (`600 2600` is the
/// whole day). Hours wrap past midnight.
fn render_clock(field: &str) -> String {
    if field == "600 2600" {
        return "any".to_string();
    }
    let values: Vec<i64> = field
        .split_whitespace()
        .filter_map(|token| token.parse().ok())
        .collect();
    let mut windows = Vec::new();
    for pair in values.chunks_exact(2) {
        let start = (pair[0] / 100) % 24;
        let end = (pair[1] / 100) % 24;
        windows.push(format!("{start}:00 - {end}:00"));
    }
    windows.join("<br/>")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_caught_fish_parses_full_form() {
        let habits = FishHabits::parse(
            "Pufferfish/80/floater/1/36/1200 1600/summer/sunny/690 .4 685 .1/4/.3/.5/0/false",
        );
        assert_eq!(habits.difficulty, "80");
        assert_eq!(habits.behavior, "floater");
        assert_eq!(habits.size, "1-37");
        assert_eq!(habits.time, "12:00 - 16:00");
        assert_eq!(habits.seasons, "summer");
        assert_eq!(habits.weather, "sunny");
        assert_eq!(habits.min_fishing_level, "0");
    }

    #[test]
    fn whole_day_window_renders_as_any() {
        let habits = FishHabits::parse(
            "Carp/15/mixed/15/50/600 2600/spring summer fall winter/both/684 .4/5/.1/.3/0/false",
        );
        assert_eq!(habits.time, "any");
        assert_eq!(habits.seasons, "all");
        assert_eq!(habits.weather, "any");
    }

    #[test]
    fn split_windows_wrap_past_midnight() {
        let habits = FishHabits::parse(
            "Eel/70/smooth/12/80/1600 2600/spring fall/rainy/689 .35/6/.2/.4/2/false",
        );
        assert_eq!(habits.time, "16:00 - 2:00");
        assert_eq!(habits.min_fishing_level, "2");
        assert_eq!(
            habits.seasons,
            "{{Season|spring}} • {{Season|fall}}"
        );
    }

    #[test]
    fn trap_caught_fish_only_declares_size() {
        let habits = FishHabits::parse("Lobster/trap/.05/freshwater ocean/ocean/2/17/fall winter");
        assert_eq!(habits.size, "2-17");
        assert_eq!(habits.time, "any");
        assert_eq!(habits.difficulty, "0");
    }
}
