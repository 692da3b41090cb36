use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// `MM:SS` clock face
pub fn format_clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Human phrasing for a whole-day gap
pub fn days_ago(days: i64) -> String {
    match days {
        i64::MIN..=-1 => "in the future".to_string(),
        0 => "today".to_string(),
        1 => "yesterday".to_string(),
        n => format!("{n} days ago"),
    }
}

/// Cut `s` to at most `max_width` terminal columns, marking the cut with `…`
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(60), "01:00");
        assert_eq!(format_clock(75), "01:15");
        assert_eq!(format_clock(3599), "59:59");
    }

    #[test]
    fn test_days_ago() {
        assert_eq!(days_ago(0), "today");
        assert_eq!(days_ago(1), "yesterday");
        assert_eq!(days_ago(12), "12 days ago");
        assert_eq!(days_ago(-2), "in the future");
    }

    #[test]
    fn test_truncate_short_strings_untouched() {
        assert_eq!(truncate_to_width("Yoga", 10), "Yoga");
        assert_eq!(truncate_to_width("Yoga", 4), "Yoga");
    }

    #[test]
    fn test_truncate_long_strings() {
        assert_eq!(truncate_to_width("Cardio Blast", 7), "Cardio…");
        assert_eq!(truncate_to_width("abc", 0), "");
    }

    #[test]
    fn test_truncate_wide_chars() {
        // each CJK char is two columns wide
        assert_eq!(truncate_to_width("日本語テキスト", 5), "日本…");
    }
}
